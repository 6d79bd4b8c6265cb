//! # Decoder Configuration

/// Log-probability charged when a tag has never been seen with a token.
///
/// Finite on purpose: an unseen word disfavors a path without eliminating it.
pub const UNSEEN_PENALTY: f64 = -100.0;

/// Configuration for the Viterbi decoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecoderConfig {
    /// Emission score used for tag/token pairs absent from the model.
    pub unseen_penalty: f64,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            unseen_penalty: UNSEEN_PENALTY,
        }
    }
}

impl DecoderConfig {
    /// Create a new decoder configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unseen-word penalty.
    ///
    /// Positive values are clamped to `0.0`; non-finite values fall back to
    /// [`UNSEEN_PENALTY`].
    pub fn with_unseen_penalty(mut self, penalty: f64) -> Self {
        self.unseen_penalty = if penalty.is_finite() {
            penalty.min(0.0)
        } else {
            UNSEEN_PENALTY
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_penalty() {
        assert_eq!(DecoderConfig::new().unseen_penalty, -100.0);
        assert_eq!(DecoderConfig::default(), DecoderConfig::new());
    }

    #[test]
    fn test_with_unseen_penalty() {
        let config = DecoderConfig::new().with_unseen_penalty(-25.5);
        assert_eq!(config.unseen_penalty, -25.5);
    }

    #[test]
    fn test_penalty_clamping() {
        let config = DecoderConfig::new().with_unseen_penalty(3.0);
        assert_eq!(config.unseen_penalty, 0.0);

        let config = DecoderConfig::new().with_unseen_penalty(f64::NEG_INFINITY);
        assert_eq!(config.unseen_penalty, UNSEEN_PENALTY);

        let config = DecoderConfig::new().with_unseen_penalty(f64::NAN);
        assert_eq!(config.unseen_penalty, UNSEEN_PENALTY);
    }
}
