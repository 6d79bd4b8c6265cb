use thiserror::Error;

/// Errors that can occur while training or decoding with a tagging model.
#[derive(Debug, Error)]
pub enum PosTagError {
    /// A training pair had mismatched or empty token/tag sequences.
    #[error("malformed training pair #{index}: {tokens} token(s) but {tags} tag(s)")]
    MalformedTrainingData {
        /// Position of the offending pair in the training batch.
        index: usize,
        /// Number of tokens in the pair.
        tokens: usize,
        /// Number of tags in the pair.
        tags: usize,
    },

    /// A training pair used the reserved start tag `#` as a real tag.
    #[error("training pair #{index} uses the reserved start tag at position {position}")]
    ReservedTag {
        /// Position of the offending pair in the training batch.
        index: usize,
        /// Position of the tag within the pair.
        position: usize,
    },

    /// The model has no transitions out of the start tag, so no path can begin.
    #[error("model has no transitions out of the start tag")]
    NoViableState,

    /// A persisted model violates the log-probability contract.
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// Reading or writing a model file failed.
    #[error("model I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The model could not be encoded or decoded as JSON.
    #[error("model serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for tagging operations.
pub type Result<T> = std::result::Result<T, PosTagError>;
