//! # Supervised Model Estimation
//!
//! Counts tag bigrams and tag/token co-occurrences over aligned training
//! pairs, then normalizes each row into log-probabilities.

use std::borrow::Borrow;

use tracing::{debug, info};

use super::counts::FrequencyTable;
use super::model::{Model, START_TAG};
use crate::error::{PosTagError, Result};

/// One training sentence: tokens and their tags, position by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingPair {
    pub tokens: Vec<String>,
    pub tags: Vec<String>,
}

impl TrainingPair {
    pub fn new(tokens: Vec<String>, tags: Vec<String>) -> Self {
        Self { tokens, tags }
    }

    /// Builds a pair from a sentence line and its parallel tag line,
    /// both split on whitespace.
    ///
    /// # Examples
    /// ```
    /// use postag_core::hmm::TrainingPair;
    ///
    /// let pair = TrainingPair::from_lines("The dog runs", "DET NOUN VERB");
    /// assert_eq!(pair.tokens, vec!["The", "dog", "runs"]);
    /// assert_eq!(pair.tags, vec!["DET", "NOUN", "VERB"]);
    /// ```
    pub fn from_lines(sentence: &str, tags: &str) -> Self {
        Self {
            tokens: sentence.split_whitespace().map(str::to_string).collect(),
            tags: tags.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.tags.is_empty()
    }

    fn is_aligned(&self) -> bool {
        !self.tokens.is_empty() && self.tokens.len() == self.tags.len()
    }
}

/// Frequency-counting trainer for a first-order HMM.
///
/// Counts stay exact integers until [`ModelTrainer::finish`] performs the
/// single log-normalization pass.
#[derive(Debug, Default)]
pub struct ModelTrainer {
    transitions: FrequencyTable,
    emissions: FrequencyTable,
    observed: usize,
}

impl ModelTrainer {
    /// Create an empty trainer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trains a model over a whole batch of pairs.
    ///
    /// The batch is rejected as a whole if any pair is malformed; no model
    /// is produced in that case.
    ///
    /// # Examples
    /// ```
    /// use postag_core::hmm::{ModelTrainer, TrainingPair, START_TAG};
    ///
    /// let pairs = vec![TrainingPair::from_lines("the dog runs", "DET NOUN VERB")];
    /// let model = ModelTrainer::train(&pairs).unwrap();
    /// assert_eq!(model.transition(START_TAG, "DET"), Some(0.0));
    /// assert_eq!(model.emission("NOUN", "dog"), Some(0.0));
    /// ```
    pub fn train<I, P>(pairs: I) -> Result<Model>
    where
        I: IntoIterator<Item = P>,
        P: Borrow<TrainingPair>,
    {
        let mut trainer = Self::new();
        for pair in pairs {
            trainer.observe(pair.borrow())?;
        }
        Ok(trainer.finish())
    }

    /// Adds the counts of one pair.
    ///
    /// A malformed pair, or one tagged with [`START_TAG`], is rejected before
    /// anything is counted, so counts from earlier pairs are left untouched.
    pub fn observe(&mut self, pair: &TrainingPair) -> Result<()> {
        if !pair.is_aligned() {
            return Err(PosTagError::MalformedTrainingData {
                index: self.observed,
                tokens: pair.tokens.len(),
                tags: pair.tags.len(),
            });
        }
        if let Some(position) = pair.tags.iter().position(|tag| tag == START_TAG) {
            return Err(PosTagError::ReservedTag {
                index: self.observed,
                position,
            });
        }

        let mut prev = START_TAG;
        for (token, tag) in pair.tokens.iter().zip(&pair.tags) {
            self.transitions.increment(prev, tag);
            self.emissions.increment(tag, &token.to_lowercase());
            prev = tag.as_str();
        }

        self.observed += 1;
        Ok(())
    }

    /// Number of pairs counted so far.
    pub fn observed(&self) -> usize {
        self.observed
    }

    /// Raw number of times `to` followed `from`.
    pub fn transition_count(&self, from: &str, to: &str) -> u64 {
        self.transitions.count(from, to)
    }

    /// Raw number of times `token` (lowercased) was labeled `tag`.
    pub fn emission_count(&self, tag: &str, token: &str) -> u64 {
        self.emissions.count(tag, &token.to_lowercase())
    }

    /// Raw number of tokens labeled `tag`.
    pub fn tag_frequency(&self, tag: &str) -> u64 {
        self.emissions.row_total(tag)
    }

    /// Normalizes the accumulated counts into an immutable model.
    pub fn finish(self) -> Model {
        info!(
            pairs = self.observed,
            tags = self.emissions.num_rows(),
            "normalizing training counts"
        );
        let transitions = self.transitions.into_log_probs();
        let emissions = self.emissions.into_log_probs();
        let model = Model::from_tables(transitions, emissions);
        debug!(vocabulary = model.vocabulary_size(), "model ready");
        model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_mass(row: &std::collections::BTreeMap<String, f64>) -> f64 {
        row.values().map(|v| v.exp()).sum()
    }

    #[test]
    fn test_single_sentence() {
        let pairs = [TrainingPair::from_lines("the dog runs", "DET NOUN VERB")];
        let model = ModelTrainer::train(&pairs).unwrap();

        assert_eq!(model.transition(START_TAG, "DET"), Some(0.0));
        assert_eq!(model.transition("DET", "NOUN"), Some(0.0));
        assert_eq!(model.transition("NOUN", "VERB"), Some(0.0));
        assert!(model.transitions_from("VERB").is_none());
        assert_eq!(model.emission("DET", "the"), Some(0.0));
        assert_eq!(model.emission("NOUN", "dog"), Some(0.0));
        assert_eq!(model.emission("VERB", "runs"), Some(0.0));
        assert!(model.emissions_of(START_TAG).is_none());
    }

    #[test]
    fn test_counts_accumulate_across_pairs() {
        let pairs = [
            TrainingPair::from_lines("the dog runs", "DET NOUN VERB"),
            TrainingPair::from_lines("dogs run", "NOUN VERB"),
            TrainingPair::from_lines("the cat sleeps", "DET NOUN VERB"),
            TrainingPair::from_lines("a dog", "DET NOUN"),
        ];
        let mut trainer = ModelTrainer::new();
        for pair in &pairs {
            trainer.observe(pair).unwrap();
        }
        assert_eq!(trainer.observed(), 4);
        assert_eq!(trainer.transition_count(START_TAG, "DET"), 3);
        assert_eq!(trainer.transition_count(START_TAG, "NOUN"), 1);
        assert_eq!(trainer.transition_count("NOUN", "VERB"), 3);
        assert_eq!(trainer.emission_count("NOUN", "dog"), 2);
        assert_eq!(trainer.tag_frequency("DET"), 3);

        let model = trainer.finish();
        assert_eq!(model.transition(START_TAG, "DET"), Some((0.75f64).ln()));
        assert_eq!(model.transition(START_TAG, "NOUN"), Some((0.25f64).ln()));
        assert_eq!(model.emission("NOUN", "dog"), Some((0.5f64).ln()));
        assert_eq!(model.emission("DET", "the"), Some((2.0f64 / 3.0).ln()));
    }

    #[test]
    fn test_rows_are_normalized() {
        let pairs = [
            TrainingPair::from_lines("the old man the boats", "DET NOUN VERB DET NOUN"),
            TrainingPair::from_lines("the old dog barks", "DET ADJ NOUN VERB"),
            TrainingPair::from_lines("time flies fast", "NOUN VERB ADV"),
        ];
        let model = ModelTrainer::train(&pairs).unwrap();

        for row in model.transition_table().values() {
            assert!((row_mass(row) - 1.0).abs() < 1e-9);
        }
        for row in model.emission_table().values() {
            assert!((row_mass(row) - 1.0).abs() < 1e-9);
        }
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_tokens_are_lowercased() {
        let pairs = [TrainingPair::from_lines("The Dog", "DET NOUN")];
        let model = ModelTrainer::train(&pairs).unwrap();
        assert_eq!(model.emission("NOUN", "dog"), Some(0.0));
        assert_eq!(model.emission("NOUN", "Dog"), None);
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        let pairs = [TrainingPair::from_lines("run run", "VERB verb")];
        let model = ModelTrainer::train(&pairs).unwrap();
        assert_eq!(model.tags(), vec!["VERB", "verb"]);
    }

    #[test]
    fn test_empty_training_set() {
        let model = ModelTrainer::train(Vec::<TrainingPair>::new()).unwrap();
        assert!(model.is_empty());
        assert!(model.transition_table().is_empty());
        assert!(model.emission_table().is_empty());
    }

    #[test]
    fn test_length_mismatch_rejects_batch() {
        let pairs = [
            TrainingPair::from_lines("the dog", "DET NOUN"),
            TrainingPair::from_lines("the dog runs", "DET NOUN"),
        ];
        let err = ModelTrainer::train(&pairs).unwrap_err();
        match err {
            PosTagError::MalformedTrainingData { index, tokens, tags } => {
                assert_eq!(index, 1);
                assert_eq!(tokens, 3);
                assert_eq!(tags, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_pair_is_malformed() {
        let err = ModelTrainer::train([TrainingPair::from_lines("", "")]).unwrap_err();
        assert!(matches!(
            err,
            PosTagError::MalformedTrainingData {
                index: 0,
                tokens: 0,
                tags: 0
            }
        ));
    }

    #[test]
    fn test_start_tag_is_reserved() {
        let pairs = [
            TrainingPair::from_lines("the dog", "DET NOUN"),
            TrainingPair::from_lines("a b c", "X # Y"),
        ];
        let err = ModelTrainer::train(&pairs).unwrap_err();
        assert!(matches!(
            err,
            PosTagError::ReservedTag {
                index: 1,
                position: 1
            }
        ));

        let mut trainer = ModelTrainer::new();
        assert!(trainer.observe(&pairs[1]).is_err());
        assert_eq!(trainer.observed(), 0);
        assert_eq!(trainer.transition_count(START_TAG, "X"), 0);
        assert_eq!(trainer.emission_count("X", "a"), 0);
    }

    #[test]
    fn test_failed_observe_commits_nothing() {
        let mut trainer = ModelTrainer::new();
        trainer
            .observe(&TrainingPair::from_lines("the dog", "DET NOUN"))
            .unwrap();
        let bad = TrainingPair::from_lines("a cat sat", "DET NOUN");
        assert!(trainer.observe(&bad).is_err());

        assert_eq!(trainer.observed(), 1);
        assert_eq!(trainer.transition_count(START_TAG, "DET"), 1);
        assert_eq!(trainer.emission_count("DET", "a"), 0);
        assert_eq!(trainer.emission_count("NOUN", "cat"), 0);
    }

    #[test]
    fn test_training_is_deterministic() {
        let pairs = [
            TrainingPair::from_lines("the dog runs", "DET NOUN VERB"),
            TrainingPair::from_lines("a cat runs fast", "DET NOUN VERB ADV"),
        ];
        let first = ModelTrainer::train(&pairs).unwrap();
        let second = ModelTrainer::train(&pairs).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_from_lines_collapses_whitespace() {
        let pair = TrainingPair::from_lines("  the   dog ", "DET\tNOUN");
        assert_eq!(pair.len(), 2);
        assert_eq!(pair.tags, vec!["DET", "NOUN"]);
        assert!(!pair.is_empty());
    }
}
