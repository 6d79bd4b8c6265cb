//! # Sentence Tokenizer
//!
//! Splits a sentence on whitespace and lowercases each token so that it can
//! be matched against the emission table.

/// A token extracted from a sentence with positional information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The lowercased token text
    pub text: String,
    /// Start byte offset in the original string
    pub start: usize,
    /// End byte offset in the original string
    pub end: usize,
    /// Token index in the sequence
    pub index: usize,
}

/// Whitespace tokenizer for untagged sentences.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Create a new tokenizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Tokenize a sentence into a sequence of tokens.
    ///
    /// # Examples
    /// ```
    /// use postag_core::decoder::Tokenizer;
    ///
    /// let tokens = Tokenizer::new().tokenize("The Dog  runs");
    /// assert_eq!(tokens.len(), 3);
    /// assert_eq!(tokens[1].text, "dog");
    /// assert_eq!((tokens[2].start, tokens[2].end), (9, 13));
    /// ```
    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut current_start = None;

        for (idx, c) in input.char_indices() {
            match (c.is_whitespace(), current_start) {
                (true, Some(start)) => {
                    tokens.push(Self::make_token(input, start, idx, tokens.len()));
                    current_start = None;
                }
                (false, None) => current_start = Some(idx),
                _ => {}
            }
        }

        if let Some(start) = current_start {
            tokens.push(Self::make_token(input, start, input.len(), tokens.len()));
        }

        tokens
    }

    /// Tokenize and keep only the normalized texts.
    pub fn words(&self, input: &str) -> Vec<String> {
        self.tokenize(input).into_iter().map(|t| t.text).collect()
    }

    fn make_token(input: &str, start: usize, end: usize, index: usize) -> Token {
        Token {
            text: input[start..end].to_lowercase(),
            start,
            end,
            index,
        }
    }
}
