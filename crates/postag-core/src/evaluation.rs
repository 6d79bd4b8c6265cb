//! # Tagging Evaluation
//!
//! Compares predicted tag sequences against gold-standard ones and reports
//! token accuracy, sentence accuracy and per-tag precision/recall/F1.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Tag-wise counts.
#[derive(Debug, Default, Clone)]
struct TagMeasure {
    /// Number of correct predictions.
    num_correct: usize,
    /// Number of occurrences of the tag in the gold-standard data.
    num_observation: usize,
    /// Number of predictions of the tag.
    num_prediction: usize,
}

impl TagMeasure {
    fn precision(&self) -> f64 {
        ratio(self.num_correct, self.num_prediction)
    }

    fn recall(&self) -> f64 {
        ratio(self.num_correct, self.num_observation)
    }

    fn fmeasure(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r > 0.0 { 2.0 * p * r / (p + r) } else { 0.0 }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

/// Performance values for a single tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagReport {
    pub tag: String,
    pub correct: usize,
    pub predicted: usize,
    pub observed: usize,
    pub precision: f64,
    pub recall: f64,
    pub fmeasure: f64,
}

/// Overall performance values, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationSummary {
    pub correct: usize,
    pub incorrect: usize,
    pub accuracy: f64,
    pub sentences: usize,
    pub sentence_accuracy: f64,
    pub macro_fmeasure: f64,
    pub tags: Vec<TagReport>,
}

/// Accumulates tagging results over a test corpus.
#[derive(Debug, Default, Clone)]
pub struct Evaluation {
    tbl: BTreeMap<String, TagMeasure>,
    /// Number of correctly predicted tokens.
    item_correct: usize,
    /// Total number of compared positions.
    item_total: usize,
    /// Number of sentences predicted without a single error.
    sentence_correct: usize,
    sentence_total: usize,
}

impl Evaluation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one sentence.
    ///
    /// Positions present on only one side count as incorrect.
    pub fn accumulate<R, P>(&mut self, reference: &[R], prediction: &[P])
    where
        R: AsRef<str>,
        P: AsRef<str>,
    {
        let len = reference.len().max(prediction.len());
        let mut matched = 0;

        for pos in 0..len {
            let gold: Option<&str> = reference.get(pos).map(|tag| tag.as_ref());
            let guess: Option<&str> = prediction.get(pos).map(|tag| tag.as_ref());

            if let Some(gold) = gold {
                self.measure(gold).num_observation += 1;
            }
            if let Some(guess) = guess {
                self.measure(guess).num_prediction += 1;
            }
            if let (Some(gold), Some(guess)) = (gold, guess) {
                if gold == guess {
                    self.measure(gold).num_correct += 1;
                    matched += 1;
                }
            }
        }

        self.item_correct += matched;
        self.item_total += len;
        if matched == len {
            self.sentence_correct += 1;
        }
        self.sentence_total += 1;
    }

    fn measure(&mut self, tag: &str) -> &mut TagMeasure {
        self.tbl.entry(tag.to_string()).or_default()
    }

    pub fn correct(&self) -> usize {
        self.item_correct
    }

    pub fn incorrect(&self) -> usize {
        self.item_total - self.item_correct
    }

    pub fn total(&self) -> usize {
        self.item_total
    }

    pub fn sentences(&self) -> usize {
        self.sentence_total
    }

    /// Fraction of correctly tagged tokens, `0.0` when nothing was compared.
    pub fn accuracy(&self) -> f64 {
        ratio(self.item_correct, self.item_total)
    }

    /// Fraction of sentences tagged without error.
    pub fn sentence_accuracy(&self) -> f64 {
        ratio(self.sentence_correct, self.sentence_total)
    }

    /// F1 averaged over the tags that occur in the gold-standard data.
    pub fn macro_fmeasure(&self) -> f64 {
        let observed: Vec<_> = self
            .tbl
            .values()
            .filter(|m| m.num_observation > 0)
            .collect();
        if observed.is_empty() {
            return 0.0;
        }
        observed.iter().map(|m| m.fmeasure()).sum::<f64>() / observed.len() as f64
    }

    /// Per-tag results in lexicographic tag order.
    pub fn tag_reports(&self) -> Vec<TagReport> {
        self.tbl
            .iter()
            .map(|(tag, m)| TagReport {
                tag: tag.clone(),
                correct: m.num_correct,
                predicted: m.num_prediction,
                observed: m.num_observation,
                precision: m.precision(),
                recall: m.recall(),
                fmeasure: m.fmeasure(),
            })
            .collect()
    }

    pub fn summary(&self) -> EvaluationSummary {
        EvaluationSummary {
            correct: self.correct(),
            incorrect: self.incorrect(),
            accuracy: self.accuracy(),
            sentences: self.sentences(),
            sentence_accuracy: self.sentence_accuracy(),
            macro_fmeasure: self.macro_fmeasure(),
            tags: self.tag_reports(),
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Performance by tag (#match, #model, #ref) (precision, recall, F1):")?;
        for report in self.tag_reports() {
            if report.observed == 0 {
                writeln!(
                    f,
                    "\t{}: ({}, {}, {}) (******, ******, ******)",
                    report.tag, report.correct, report.predicted, report.observed
                )?;
            } else {
                writeln!(
                    f,
                    "\t{}: ({}, {}, {}) ({:.4}, {:.4}, {:.4})",
                    report.tag,
                    report.correct,
                    report.predicted,
                    report.observed,
                    report.precision,
                    report.recall,
                    report.fmeasure
                )?;
            }
        }
        writeln!(f, "Number of correct: {}", self.correct())?;
        writeln!(f, "Number of incorrect: {}", self.incorrect())?;
        writeln!(f, "Accuracy: {:.2} %", self.accuracy() * 100.0)?;
        write!(
            f,
            "Sentence accuracy: {}/{} => {:.4}",
            self.sentence_correct,
            self.sentence_total,
            self.sentence_accuracy()
        )
    }
}
