//! # Postag
//!
//! Hidden Markov Model part-of-speech tagging: supervised estimation from
//! tagged corpora and Viterbi decoding of new sentences.
//!
//! ```rust
//! use postag::{ModelTrainer, TrainingPair, ViterbiDecoder};
//!
//! let model = ModelTrainer::train([TrainingPair::from_lines("the dog runs", "DET NOUN VERB")]).unwrap();
//! let tags = ViterbiDecoder::default().decode("the dog runs", &model).unwrap();
//! assert_eq!(tags.join(" "), "DET NOUN VERB");
//! ```

pub use postag_core::*;

/// Corpus files, evaluation drivers and the console loop.
pub mod workflow {
    pub use postag_trainer::*;
}
