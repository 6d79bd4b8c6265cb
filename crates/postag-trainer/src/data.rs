//! Data loading for parallel sentence/tag corpora.
//!
//! A corpus is two line-aligned files: line `n` of the sentence file holds
//! the whitespace-separated tokens whose tags are on line `n` of the tag file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, bail};
use postag_core::TrainingPair;
use tracing::info;

/// Reads every line of a text file.
pub fn read_sentences<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    BufReader::new(file)
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("failed to read {}", path.display()))
}

/// Loads a parallel corpus from a sentence file and its tag file.
pub fn load_parallel_corpus<P, Q>(sentences: P, tags: Q) -> anyhow::Result<Vec<TrainingPair>>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let sentence_lines = read_sentences(sentences.as_ref())?;
    let tag_lines = read_sentences(tags.as_ref())?;

    if sentence_lines.len() != tag_lines.len() {
        bail!(
            "{} has {} line(s) but {} has {}",
            sentences.as_ref().display(),
            sentence_lines.len(),
            tags.as_ref().display(),
            tag_lines.len()
        );
    }

    let pairs = pair_lines(&sentence_lines, &tag_lines)?;
    info!(
        pairs = pairs.len(),
        corpus = %sentences.as_ref().display(),
        "loaded parallel corpus"
    );
    Ok(pairs)
}

/// Aligns sentence lines with tag lines, skipping blank line pairs.
pub fn pair_lines<S, T>(sentences: &[S], tags: &[T]) -> anyhow::Result<Vec<TrainingPair>>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let mut pairs = Vec::with_capacity(sentences.len());

    for (idx, (sentence, tag_line)) in sentences.iter().zip(tags).enumerate() {
        let pair = TrainingPair::from_lines(sentence.as_ref(), tag_line.as_ref());
        if pair.is_empty() {
            continue;
        }
        if pair.tokens.len() != pair.tags.len() {
            bail!(
                "line {}: {} token(s) but {} tag(s)",
                idx + 1,
                pair.tokens.len(),
                pair.tags.len()
            );
        }
        pairs.push(pair);
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(lines: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(lines.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_parallel_corpus() {
        let sentences = write_file("The dog runs .\n\nA cat sleeps .\n");
        let tags = write_file("DET N V .\n\nDET N V .\n");

        let pairs = load_parallel_corpus(sentences.path(), tags.path()).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].tokens, vec!["The", "dog", "runs", "."]);
        assert_eq!(pairs[1].tags, vec!["DET", "N", "V", "."]);
    }

    #[test]
    fn test_line_count_mismatch() {
        let sentences = write_file("the dog\nthe cat\n");
        let tags = write_file("DET N\n");

        let err = load_parallel_corpus(sentences.path(), tags.path()).unwrap_err();
        assert!(err.to_string().contains("2 line(s)"));
    }

    #[test]
    fn test_token_count_mismatch_reports_line() {
        let err = pair_lines(&["the dog", "the big cat"], &["DET N", "DET N"]).unwrap_err();
        assert_eq!(err.to_string(), "line 2: 3 token(s) but 2 tag(s)");
    }

    #[test]
    fn test_one_sided_blank_line_is_an_error() {
        assert!(pair_lines(&["", "the dog"], &["DET", "DET N"]).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = read_sentences("/nonexistent/postag/sentences.txt").unwrap_err();
        assert!(err.to_string().contains("failed to open"));
    }
}
