//! Measurement counts.
//!
//! Bitstring ordering: the rightmost bit corresponds to the lowest-indexed
//! qubit (OpenQASM 3 convention). For example, the string `"01"` means
//! qubit 0 measured `1` and qubit 1 measured `0`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Measurement counts from circuit execution.
///
/// Maps bitstrings to occurrence counts and serializes as a flat JSON
/// object, e.g. `{"00": 100, "11": 100}`. Keys iterate in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    /// Map from bitstring to count.
    counts: BTreeMap<String, u64>,
}

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of a bitstring; zero counts are not stored.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        if count == 0 {
            return;
        }
        *self.counts.entry(bitstring.into()).or_default() += count;
    }

    /// Get the count for a bitstring.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Iterate over (bitstring, count) pairs in ascending bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Iterate over the observed bitstrings.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Get the total number of shots.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Get the most frequent bitstring (the first one on ties).
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.iter()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
    }

    /// Get the number of unique bitstrings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if counts are empty.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (key, value) in iter {
            counts.insert(key, value);
        }
        counts
    }
}

impl IntoIterator for Counts {
    type Item = (String, u64);
    type IntoIter = std::collections::btree_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_accumulates() {
        let mut counts = Counts::new();
        counts.insert("01", 3);
        counts.insert("01", 2);
        counts.insert("10", 0);
        assert_eq!(counts.get("01"), 5);
        assert_eq!(counts.get("10"), 0);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.total_shots(), 5);
    }

    #[test]
    fn test_most_frequent() {
        let counts: Counts = [("00".to_string(), 40), ("11".to_string(), 60)]
            .into_iter()
            .collect();
        assert_eq!(counts.most_frequent(), Some(("11", 60)));

        let tied: Counts = [("00".to_string(), 5), ("11".to_string(), 5)]
            .into_iter()
            .collect();
        assert_eq!(tied.most_frequent(), Some(("00", 5)));
        assert_eq!(Counts::new().most_frequent(), None);
    }

    #[test]
    fn test_json_is_flat_map() {
        let counts: Counts = [("11".to_string(), 100), ("00".to_string(), 100)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"00":100,"11":100}"#);

        let back: Counts = serde_json::from_str(&json).unwrap();
        assert_eq!(back, counts);
    }
}
