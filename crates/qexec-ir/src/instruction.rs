//! Instructions: an operation plus the qubits and bits it touches.

use serde::{Deserialize, Serialize};

use crate::gate::{GateKind, StandardGate};
use crate::qubit::{ClbitId, QubitId};

/// What an instruction does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A gate application.
    Gate(GateKind),
    /// Measurement of each listed qubit, into the matching classical bit
    /// when bits are given.
    Measure,
    /// Barrier (no effect on the state).
    Barrier,
}

/// One step of a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on, in operand order.
    pub qubits: Vec<QubitId>,
    /// Classical bits this instruction writes (measurement only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// Gate applied to `qubits` in operand order.
    pub fn gate(gate: impl Into<GateKind>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate.into()),
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Standard gate on one qubit.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Standard gate on two qubits; `q1` is the control for controlled gates.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Measure `qubit` into `clbit`.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// Measure several qubits at once.
    ///
    /// Qubit and bit lists are paired positionally; the circuit rejects
    /// the instruction if both are non-empty and their lengths differ.
    pub fn measure_many(
        qubits: impl IntoIterator<Item = QubitId>,
        clbits: impl IntoIterator<Item = ClbitId>,
    ) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: qubits.into_iter().collect(),
            clbits: clbits.into_iter().collect(),
        }
    }

    /// Barrier across `qubits`.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Whether this applies a gate.
    pub fn is_gate(&self) -> bool {
        self.as_gate().is_some()
    }

    /// Whether this is a measurement.
    pub fn is_measure(&self) -> bool {
        self.kind == InstructionKind::Measure
    }

    /// The applied gate, if any.
    pub fn as_gate(&self) -> Option<&GateKind> {
        if let InstructionKind::Gate(gate) = &self.kind {
            Some(gate)
        } else {
            None
        }
    }

    /// Operation name: the gate name, `measure` or `barrier`.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(gate) => gate.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Barrier => "barrier",
        }
    }

    /// Numeric parameters of the instruction (empty for non-gates).
    pub fn params(&self) -> Vec<f64> {
        match &self.kind {
            InstructionKind::Gate(GateKind::Standard(g)) => g.parameters(),
            InstructionKind::Gate(GateKind::Opaque(g)) => g.params.clone(),
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::OpaqueGate;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::single_qubit_gate(StandardGate::H, QubitId(0));
        assert!(inst.is_gate());
        assert!(inst.clbits.is_empty());
        assert_eq!(inst.name(), "h");
        assert!(inst.params().is_empty());
    }

    #[test]
    fn test_measure_pairs_qubit_and_bit() {
        let inst = Instruction::measure(QubitId(2), ClbitId(0));
        assert!(inst.is_measure());
        assert_eq!(inst.qubits, vec![QubitId(2)]);
        assert_eq!(inst.clbits, vec![ClbitId(0)]);
        assert_eq!(inst.name(), "measure");
    }

    #[test]
    fn test_barrier_instruction() {
        let inst = Instruction::barrier((0..3).map(QubitId));
        assert_eq!(inst.kind, InstructionKind::Barrier);
        assert_eq!(inst.name(), "barrier");
        assert!(!inst.is_gate());
    }

    #[test]
    fn test_opaque_instruction_keeps_name_and_params() {
        let inst = Instruction::gate(
            OpaqueGate::new("warp").with_params(vec![0.5]),
            [QubitId(1)],
        );
        assert_eq!(inst.name(), "warp");
        assert_eq!(inst.params(), vec![0.5]);
    }

    #[test]
    fn test_instruction_json_shape() {
        let inst = Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1));
        let json = serde_json::to_value(&inst).unwrap();
        assert_eq!(json["qubits"], serde_json::json!([0, 1]));
        assert!(json.get("clbits").is_none());
    }
}
