//! # Viterbi Decoding for HMM Tagging
//!
//! Finds the most likely tag sequence for a sentence given a trained
//! [`Model`]. The trellis is implicit: each step keeps only the tags that are
//! reachable from the previous step through a transition in the model.
//!
//! Live states and successor tags are visited in lexicographic order and a
//! candidate only replaces the current best when it is strictly greater, so
//! ties resolve to the lexicographically smallest predecessor (and, at the
//! end, the smallest final tag).

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use tracing::debug;

use crate::decoder::config::DecoderConfig;
use crate::decoder::tokenizer::Tokenizer;
use crate::error::{PosTagError, Result};
use crate::hmm::{Model, START_TAG};

/// Path score and backpointer for one trellis node.
#[derive(Debug, Clone, Copy)]
struct PathState<'m> {
    score: f64,
    /// Predecessor in the previous column, [`START_TAG`] in the first one.
    prev_tag: &'m str,
}

/// One column of the trellis.
#[derive(Debug, Default)]
struct Step<'m> {
    states: BTreeMap<&'m str, PathState<'m>>,
    /// Best tag of the previous column when the path was re-anchored at the
    /// start tag because every live state was a dead end.
    resumed_from: Option<&'m str>,
}

/// A decoded tag sequence with its cumulative log-score.
#[derive(Debug, Clone, PartialEq)]
pub struct Tagging {
    pub tags: Vec<String>,
    pub log_score: f64,
}

/// Viterbi decoder over a trained HMM.
#[derive(Debug, Clone, Default)]
pub struct ViterbiDecoder {
    config: DecoderConfig,
    tokenizer: Tokenizer,
}

impl ViterbiDecoder {
    /// Create a new Viterbi decoder.
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            tokenizer: Tokenizer::new(),
        }
    }

    /// Get the decoder configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode the most likely tag for every whitespace-delimited token of `line`.
    ///
    /// # Examples
    /// ```
    /// use postag_core::{ModelTrainer, TrainingPair, ViterbiDecoder};
    ///
    /// let model = ModelTrainer::train([TrainingPair::from_lines("the dog runs", "DET NOUN VERB")]).unwrap();
    /// let tags = ViterbiDecoder::default().decode("The dog runs", &model).unwrap();
    /// assert_eq!(tags, vec!["DET", "NOUN", "VERB"]);
    /// ```
    pub fn decode(&self, line: &str, model: &Model) -> Result<Vec<String>> {
        Ok(self.decode_scored(line, model)?.tags)
    }

    /// Like [`ViterbiDecoder::decode`], also returning the path log-score.
    pub fn decode_scored(&self, line: &str, model: &Model) -> Result<Tagging> {
        let words = self.tokenizer.words(line);
        self.decode_tokens(&words, model)
    }

    /// Decode a sequence of already normalized (lowercased) tokens.
    pub fn decode_tokens<S: AsRef<str>>(&self, tokens: &[S], model: &Model) -> Result<Tagging> {
        if tokens.is_empty() {
            return Ok(Tagging {
                tags: Vec::new(),
                log_score: 0.0,
            });
        }

        if model
            .transitions_from(START_TAG)
            .is_none_or(|row| row.is_empty())
        {
            return Err(PosTagError::NoViableState);
        }

        // Forward pass
        let mut trellis: Vec<Step<'_>> = Vec::with_capacity(tokens.len());
        for (pos, token) in tokens.iter().enumerate() {
            let token = token.as_ref();
            let step = match trellis.last() {
                None => Step {
                    states: self.advance([(START_TAG, 0.0)], token, model),
                    resumed_from: None,
                },
                Some(prev) => {
                    let live = prev.states.iter().map(|(tag, s)| (*tag, s.score));
                    let states = self.advance(live, token, model);
                    if states.is_empty() {
                        let (best_tag, best_score) =
                            best_final(&prev.states).ok_or(PosTagError::NoViableState)?;
                        debug!(
                            position = pos,
                            dead_end = best_tag,
                            "no live state continues, re-anchoring at start tag"
                        );
                        Step {
                            states: self.advance([(START_TAG, best_score)], token, model),
                            resumed_from: Some(best_tag),
                        }
                    } else {
                        Step {
                            states,
                            resumed_from: None,
                        }
                    }
                }
            };
            trellis.push(step);
        }

        // Backtrack
        let last = trellis.last().ok_or(PosTagError::NoViableState)?;
        let (best_tag, log_score) = best_final(&last.states).ok_or(PosTagError::NoViableState)?;

        let mut tags = Vec::with_capacity(tokens.len());
        let mut current = best_tag;
        for (pos, step) in trellis.iter().enumerate().rev() {
            tags.push(current.to_string());
            if pos == 0 {
                break;
            }
            current = match step.resumed_from {
                Some(closed) => closed,
                None => step
                    .states
                    .get(current)
                    .map(|state| state.prev_tag)
                    .ok_or(PosTagError::NoViableState)?,
            };
        }
        tags.reverse();

        debug!(tokens = tokens.len(), log_score, "decoded sentence");
        Ok(Tagging { tags, log_score })
    }

    /// Computes the next trellis column from the live predecessors.
    fn advance<'m, I>(
        &self,
        live: I,
        token: &str,
        model: &'m Model,
    ) -> BTreeMap<&'m str, PathState<'m>>
    where
        I: IntoIterator<Item = (&'m str, f64)>,
    {
        let mut next: BTreeMap<&'m str, PathState<'m>> = BTreeMap::new();

        for (prev, prev_score) in live {
            let Some(row) = model.transitions_from(prev) else {
                continue;
            };
            for (tag, transition) in row {
                let score = prev_score + transition + self.emission_score(model, tag, token);
                let candidate = PathState {
                    score,
                    prev_tag: prev,
                };

                match next.entry(tag.as_str()) {
                    Entry::Vacant(slot) => {
                        slot.insert(candidate);
                    }
                    Entry::Occupied(mut slot) => {
                        if score > slot.get().score {
                            slot.insert(candidate);
                        }
                    }
                }
            }
        }

        next
    }

    fn emission_score(&self, model: &Model, tag: &str, token: &str) -> f64 {
        model
            .emission(tag, token)
            .unwrap_or(self.config.unseen_penalty)
    }
}

/// Highest-scoring state, first in lexicographic order on ties.
fn best_final<'m>(states: &BTreeMap<&'m str, PathState<'m>>) -> Option<(&'m str, f64)> {
    let mut best: Option<(&'m str, f64)> = None;
    for (tag, state) in states {
        match best {
            Some((_, score)) if state.score <= score => {}
            _ => best = Some((*tag, state.score)),
        }
    }
    best
}
