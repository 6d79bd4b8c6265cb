//! # Hidden Markov Model Tables
//!
//! Transition and emission tables in natural-log probability space.
//! A [`Model`] is produced once by [`ModelTrainer`](crate::hmm::ModelTrainer)
//! and is read-only afterwards.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PosTagError, Result};

/// Synthetic tag that precedes the first token of every sentence.
///
/// It only ever appears as a transition source. It is never emitted and never
/// part of a decoded tag sequence.
pub const START_TAG: &str = "#";

/// One conditional distribution per row: `row -> (column -> ln P(column | row))`.
pub type LogTable = BTreeMap<String, BTreeMap<String, f64>>;

/// Allowed drift of a row's probability mass away from 1.0.
const ROW_SUM_TOLERANCE: f64 = 1e-6;

/// A first-order HMM over string tags and lowercase tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    transitions: LogTable,
    emissions: LogTable,
}

impl Model {
    pub(crate) fn from_tables(transitions: LogTable, emissions: LogTable) -> Self {
        Self {
            transitions,
            emissions,
        }
    }

    /// Log-probability of `to` immediately following `from`.
    pub fn transition(&self, from: &str, to: &str) -> Option<f64> {
        self.transitions.get(from)?.get(to).copied()
    }

    /// Log-probability of `tag` emitting `token`.
    ///
    /// Tokens are stored lowercased, so `token` must already be normalized.
    pub fn emission(&self, tag: &str, token: &str) -> Option<f64> {
        self.emissions.get(tag)?.get(token).copied()
    }

    /// All outgoing transitions of `tag`, in lexicographic order of the target.
    pub fn transitions_from(&self, tag: &str) -> Option<&BTreeMap<String, f64>> {
        self.transitions.get(tag)
    }

    /// All tokens observed under `tag`, in lexicographic order.
    pub fn emissions_of(&self, tag: &str) -> Option<&BTreeMap<String, f64>> {
        self.emissions.get(tag)
    }

    /// The full transition table, including the start tag row.
    pub fn transition_table(&self) -> &LogTable {
        &self.transitions
    }

    /// The full emission table.
    pub fn emission_table(&self) -> &LogTable {
        &self.emissions
    }

    /// Every real tag known to the model (the start tag excluded), sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags = BTreeSet::new();
        for (source, row) in &self.transitions {
            tags.insert(source.as_str());
            tags.extend(row.keys().map(String::as_str));
        }
        tags.extend(self.emissions.keys().map(String::as_str));
        tags.remove(START_TAG);
        tags.into_iter().collect()
    }

    /// Number of distinct tokens observed under any tag.
    pub fn vocabulary_size(&self) -> usize {
        self.emissions
            .values()
            .flat_map(|row| row.keys())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// True if the model was trained on nothing.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty() && self.emissions.is_empty()
    }

    /// Checks the log-probability contract of both tables.
    ///
    /// Every value must be finite and `<= 0.0`, every row must carry a
    /// probability mass of 1.0, the start tag must never be a transition
    /// target and must have no emission row.
    pub fn validate(&self) -> Result<()> {
        if self.emissions.contains_key(START_TAG) {
            return Err(PosTagError::InvalidModel(format!(
                "start tag {START_TAG:?} has an emission row"
            )));
        }
        for (source, row) in &self.transitions {
            if row.contains_key(START_TAG) {
                return Err(PosTagError::InvalidModel(format!(
                    "tag {source:?} transitions into the start tag"
                )));
            }
        }
        validate_table("transition", &self.transitions)?;
        validate_table("emission", &self.emissions)
    }

    /// Encodes the model as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decodes and validates a model from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Writes the model to `path` as JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        debug!(path = %path.as_ref().display(), "saved model");
        Ok(())
    }

    /// Reads and validates a model previously written by [`Model::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let model = Self::from_json(&content)?;
        debug!(
            path = %path.as_ref().display(),
            tags = model.tags().len(),
            "loaded model"
        );
        Ok(model)
    }
}

fn validate_table(kind: &str, table: &LogTable) -> Result<()> {
    for (row_key, row) in table {
        if row.is_empty() {
            return Err(PosTagError::InvalidModel(format!(
                "{kind} row {row_key:?} is empty"
            )));
        }
        if let Some((column, value)) = row.iter().find(|(_, v)| !v.is_finite() || **v > 0.0) {
            return Err(PosTagError::InvalidModel(format!(
                "{kind} {row_key:?} -> {column:?} has log-probability {value}"
            )));
        }
        let mass: f64 = row.values().map(|v| v.exp()).sum();
        if (mass - 1.0).abs() > ROW_SUM_TOLERANCE {
            return Err(PosTagError::InvalidModel(format!(
                "{kind} row {row_key:?} sums to {mass}, expected 1.0"
            )));
        }
    }
    Ok(())
}
