//! Raw co-occurrence counting for the training pass.

use std::collections::BTreeMap;

use super::model::LogTable;

/// Exact integer counts, `row -> (column -> count)`.
///
/// Owned by a single training run and consumed by [`FrequencyTable::into_log_probs`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FrequencyTable {
    rows: BTreeMap<String, BTreeMap<String, u64>>,
}

impl FrequencyTable {
    pub fn increment(&mut self, row: &str, column: &str) {
        *self
            .rows
            .entry(row.to_string())
            .or_default()
            .entry(column.to_string())
            .or_insert(0) += 1;
    }

    pub fn count(&self, row: &str, column: &str) -> u64 {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .copied()
            .unwrap_or(0)
    }

    pub fn row_total(&self, row: &str) -> u64 {
        self.rows.get(row).map(|r| r.values().sum()).unwrap_or(0)
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Normalizes every row to `ln(count / row_total)`.
    ///
    /// Rows only exist once a count has been recorded, so every total is at least 1.
    pub fn into_log_probs(self) -> LogTable {
        self.rows
            .into_iter()
            .map(|(key, row)| {
                let total = row.values().sum::<u64>() as f64;
                let row = row
                    .into_iter()
                    .map(|(column, count)| (column, (count as f64 / total).ln()))
                    .collect();
                (key, row)
            })
            .collect()
    }
}
