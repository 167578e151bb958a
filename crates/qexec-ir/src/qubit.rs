//! Qubit, classical bit and register types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Index of a qubit within a circuit.
///
/// Qubit `i` is bit `i` of the basis-state index, so qubit 0 is the
/// least significant bit (rightmost character of an outcome bit-string).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// Index of a classical bit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClbitId(pub u32);

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl From<u32> for ClbitId {
    fn from(id: u32) -> Self {
        ClbitId(id)
    }
}

/// What a register holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegisterKind {
    /// Quantum register.
    Qubit,
    /// Classical bit register.
    Bit,
}

impl fmt::Display for RegisterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterKind::Qubit => write!(f, "qubit"),
            RegisterKind::Bit => write!(f, "bit"),
        }
    }
}

/// A named, contiguous block of qubits or classical bits.
///
/// Registers of the same kind never overlap: each one starts where the
/// previously declared one ended.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Register {
    /// Register name as declared.
    pub name: String,
    /// Qubit or classical bit register.
    pub kind: RegisterKind,
    /// First global index covered by this register.
    pub start: u32,
    /// Number of elements.
    pub size: u32,
}

impl Register {
    /// Create a register.
    pub fn new(name: impl Into<String>, kind: RegisterKind, start: u32, size: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            start,
            size,
        }
    }

    /// Global indices covered by this register.
    pub fn range(&self) -> Range<u32> {
        self.start..self.start.saturating_add(self.size)
    }

    /// Check whether a global index belongs to this register.
    pub fn contains(&self, index: u32) -> bool {
        self.range().contains(&index)
    }

    /// Global index of the `offset`-th element, if in bounds.
    pub fn get(&self, offset: u32) -> Option<u32> {
        if offset < self.size {
            self.start.checked_add(offset)
        } else {
            None
        }
    }

    /// Qubit ids of this register (meaningful for qubit registers).
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.range().map(QubitId)
    }

    /// Classical bit ids of this register (meaningful for bit registers).
    pub fn clbits(&self) -> impl Iterator<Item = ClbitId> + '_ {
        self.range().map(ClbitId)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}] {}", self.kind, self.size, self.name)
    }
}
