//! # Postag Trainer
//!
//! File-backed workflows around the core tagger: loading parallel
//! sentence/tag corpora, training and evaluating models, and the
//! interactive tagging console.

pub mod console;
pub mod data;
pub mod trainer;

pub use console::run_console;
pub use data::{load_parallel_corpus, read_sentences};
pub use trainer::{evaluate_files, train_from_files};
