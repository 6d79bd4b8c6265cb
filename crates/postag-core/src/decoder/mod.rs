pub mod config;
pub mod tokenizer;
pub mod viterbi;

pub use config::{DecoderConfig, UNSEEN_PENALTY};
pub use tokenizer::{Token, Tokenizer};
pub use viterbi::{Tagging, ViterbiDecoder};
