//! # Postag Core
//!
//! Supervised Hidden Markov Model estimation and Viterbi decoding for
//! part-of-speech style sequence tagging.
//!
//! ## Quick Start
//!
//! ```rust
//! use postag_core::{ModelTrainer, TrainingPair, ViterbiDecoder};
//!
//! let pairs = vec![
//!     TrainingPair::from_lines("the dog runs", "DET NOUN VERB"),
//!     TrainingPair::from_lines("a cat sleeps", "DET NOUN VERB"),
//! ];
//! let model = ModelTrainer::train(&pairs).unwrap();
//!
//! let decoder = ViterbiDecoder::default();
//! let tags = decoder.decode("The cat runs", &model).unwrap();
//! assert_eq!(tags, vec!["DET", "NOUN", "VERB"]);
//! ```
pub mod decoder;
pub mod error;
pub mod evaluation;
pub mod hmm;

// Re-export primary API
pub use decoder::{DecoderConfig, Tagging, Token, Tokenizer, UNSEEN_PENALTY, ViterbiDecoder};
pub use error::{PosTagError, Result};
pub use evaluation::{Evaluation, EvaluationSummary, TagReport};
pub use hmm::{LogTable, Model, ModelTrainer, START_TAG, TrainingPair};
