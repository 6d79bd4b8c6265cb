mod counts;
pub mod model;
pub mod trainer;

pub use model::{LogTable, Model, START_TAG};
pub use trainer::{ModelTrainer, TrainingPair};
