//! Training and evaluation drivers over corpus files.

use std::path::Path;

use anyhow::Context;
use postag_core::{Evaluation, Model, ModelTrainer, TrainingPair, ViterbiDecoder};
use tracing::info;

use crate::data::load_parallel_corpus;

/// Trains a model from a parallel corpus on disk.
pub fn train_from_files<P, Q>(sentences: P, tags: Q) -> anyhow::Result<Model>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let pairs = load_parallel_corpus(sentences, tags)?;
    let model = ModelTrainer::train(&pairs).context("failed to train model")?;
    info!(
        tags = model.tags().len(),
        vocabulary = model.vocabulary_size(),
        "trained model"
    );
    Ok(model)
}

/// Decodes every pair's sentence and compares the result with its tags.
pub fn evaluate_pairs(
    decoder: &ViterbiDecoder,
    model: &Model,
    pairs: &[TrainingPair],
) -> anyhow::Result<Evaluation> {
    let mut evaluation = Evaluation::new();
    for (idx, pair) in pairs.iter().enumerate() {
        let words: Vec<String> = pair.tokens.iter().map(|t| t.to_lowercase()).collect();
        let predicted = decoder
            .decode_tokens(&words, model)
            .with_context(|| format!("failed to decode test sentence #{}", idx + 1))?;
        evaluation.accumulate(&pair.tags, &predicted.tags);
    }
    info!(
        sentences = evaluation.sentences(),
        accuracy = evaluation.accuracy(),
        "evaluation complete"
    );
    Ok(evaluation)
}

/// Evaluates a model against a parallel test corpus on disk.
pub fn evaluate_files<P, Q>(
    decoder: &ViterbiDecoder,
    model: &Model,
    sentences: P,
    tags: Q,
) -> anyhow::Result<Evaluation>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let pairs = load_parallel_corpus(sentences, tags)?;
    evaluate_pairs(decoder, model, &pairs)
}
