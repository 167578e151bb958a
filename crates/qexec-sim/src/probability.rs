//! Outcome probabilities extracted from a final state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::statevector::Statevector;

/// Probabilities at or below this value are treated as floating noise.
pub const PROBABILITY_EPSILON: f64 = 1e-12;

/// Format a basis index as a bit-string of `num_qubits` characters.
///
/// The rightmost character is qubit 0 (OpenQASM 3 convention), so the
/// string read as a binary number equals the basis index.
pub fn bitstring(index: usize, num_qubits: usize) -> String {
    if num_qubits == 0 {
        return String::new();
    }
    format!("{index:0num_qubits$b}")
}

/// Exact outcome distribution, keyed by bit-string.
///
/// Only outcomes with probability above [`PROBABILITY_EPSILON`] are kept.
/// Iteration is in ascending bit-string order, which for equal-length keys
/// is ascending basis-index order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Probabilities {
    probabilities: BTreeMap<String, f64>,
}

impl Probabilities {
    /// Compute |amplitude|² for every basis state of `state`.
    pub fn from_statevector(state: &Statevector) -> Self {
        let num_qubits = state.num_qubits();
        state
            .amplitudes()
            .iter()
            .enumerate()
            .map(|(index, amp)| (bitstring(index, num_qubits), amp.norm_sqr()))
            .collect()
    }

    /// Probability of one outcome (0 if absent).
    pub fn get(&self, bitstring: &str) -> f64 {
        self.probabilities.get(bitstring).copied().unwrap_or(0.0)
    }

    /// Iterate over (bitstring, probability) pairs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.probabilities.iter().map(|(k, &p)| (k.as_str(), p))
    }

    /// Whether an outcome is present.
    pub fn contains(&self, bitstring: &str) -> bool {
        self.probabilities.contains_key(bitstring)
    }

    /// Sum of all retained probabilities.
    pub fn total(&self) -> f64 {
        self.probabilities.values().sum()
    }

    /// Get the number of outcomes.
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// Check if there are no outcomes.
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }
}

/// Collect outcomes, dropping those at or below [`PROBABILITY_EPSILON`].
///
/// Duplicate keys keep the last value.
impl FromIterator<(String, f64)> for Probabilities {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            probabilities: iter
                .into_iter()
                .filter(|&(_, p)| p > PROBABILITY_EPSILON)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qexec_ir::StandardGate;

    #[test]
    fn test_bitstring_order() {
        assert_eq!(bitstring(0, 3), "000");
        assert_eq!(bitstring(1, 3), "001");
        assert_eq!(bitstring(6, 3), "110");
        assert_eq!(bitstring(0, 0), "");
    }

    #[test]
    fn test_initial_state_probability() {
        let probs = Probabilities::from_statevector(&Statevector::new(2).unwrap());
        assert_eq!(probs.len(), 1);
        assert_eq!(probs.get("00"), 1.0);
    }

    #[test]
    fn test_hadamard_probabilities() {
        let mut sv = Statevector::new(1).unwrap();
        sv.apply_gate(&StandardGate::H, &[0]).unwrap();
        let probs = Probabilities::from_statevector(&sv);

        assert_eq!(probs.len(), 2);
        assert!((probs.get("0") - 0.5).abs() < 1e-12);
        assert!((probs.get("1") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_qubit_zero_is_rightmost() {
        let mut sv = Statevector::new(3).unwrap();
        sv.apply_gate(&StandardGate::X, &[0]).unwrap();
        let probs = Probabilities::from_statevector(&sv);
        assert!(probs.contains("001"));
    }

    #[test]
    fn test_noise_is_dropped() {
        let probs: Probabilities = [
            ("0".to_string(), 1.0 - 1e-13),
            ("1".to_string(), 1e-13),
        ]
        .into_iter()
        .collect();
        assert_eq!(probs.len(), 1);
        assert!(!probs.contains("1"));
    }

    #[test]
    fn test_iteration_is_ascending() {
        let probs: Probabilities = [
            ("11".to_string(), 0.25),
            ("00".to_string(), 0.25),
            ("10".to_string(), 0.25),
            ("01".to_string(), 0.25),
        ]
        .into_iter()
        .collect();
        let keys: Vec<_> = probs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["00", "01", "10", "11"]);
    }

    #[test]
    fn test_serializes_flat() {
        let probs: Probabilities = [("0".to_string(), 1.0)].into_iter().collect();
        let json = serde_json::to_string(&probs).unwrap();
        assert_eq!(json, r#"{"0":1.0}"#);
    }
}
