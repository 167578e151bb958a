//! Statevector simulation engine.

use num_complex::Complex64;
use tracing::debug;

use qexec_ir::{Circuit, GateKind, Instruction, InstructionKind, IrError, QubitId, StandardGate};

use crate::error::{SimError, SimResult};

/// Largest allowed deviation of the squared norm from 1.
pub const NORM_TOLERANCE: f64 = 1e-6;

/// Largest register whose amplitude buffer size is representable in memory.
///
/// This is an addressing bound, not a practical one; [`crate::SimulatorConfig`]
/// carries the working limit.
pub const MAX_STATEVECTOR_QUBITS: usize = usize::BITS as usize - 6;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A statevector representing a quantum state.
///
/// Basis index `i` has qubit `q` in state `(i >> q) & 1`, so qubit 0 is the
/// least significant bit.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    ///
    /// Allocates `2^num_qubits` amplitudes. Fails with
    /// [`SimError::ResourceLimit`] above [`MAX_STATEVECTOR_QUBITS`].
    pub fn new(num_qubits: usize) -> SimResult<Self> {
        if num_qubits > MAX_STATEVECTOR_QUBITS {
            return Err(SimError::ResourceLimit {
                num_qubits,
                max_qubits: MAX_STATEVECTOR_QUBITS,
            });
        }
        let mut amplitudes = vec![ZERO; 1 << num_qubits];
        amplitudes[0] = ONE;
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Run every unitary instruction of `circuit` on |0...0⟩.
    ///
    /// Measurements and barriers are skipped. Fails on the first opaque
    /// operation, on a malformed instruction, or on norm drift.
    pub fn evolve(circuit: &Circuit) -> SimResult<Self> {
        let mut state = Self::new(circuit.num_qubits())?;
        for instruction in circuit.unitary_ops() {
            state.apply(instruction)?;
        }
        debug!(
            "Evolved {} qubits through {} operations",
            state.num_qubits,
            circuit.unitary_ops().count()
        );
        Ok(state)
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The amplitudes, indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Sum of squared amplitude magnitudes.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Apply an instruction to the statevector.
    pub fn apply(&mut self, instruction: &Instruction) -> SimResult<()> {
        match &instruction.kind {
            InstructionKind::Gate(GateKind::Standard(gate)) => {
                let qubits: Vec<_> = instruction.qubits.iter().map(|q| q.0 as usize).collect();
                self.apply_gate(gate, &qubits)?;
                self.check_norm(gate.name())
            }
            InstructionKind::Gate(GateKind::Opaque(gate)) => Err(SimError::UnsupportedGate {
                name: gate.name.clone(),
            }),
            // Outcomes are read from the final amplitudes
            InstructionKind::Measure | InstructionKind::Barrier => Ok(()),
        }
    }

    /// Apply a gate's unitary to the listed qubits.
    ///
    /// The first listed qubit is the most significant bit of the gate
    /// matrix's local index, so controls are listed before targets.
    pub fn apply_gate(&mut self, gate: &StandardGate, qubits: &[usize]) -> SimResult<()> {
        self.check_operands(gate, qubits)?;

        let matrix = gate.matrix();
        let k = qubits.len();
        let dim = 1_usize << k;

        // Offset of each local basis state within the full index.
        let offsets: Vec<usize> = (0..dim)
            .map(|local| {
                qubits
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| (local >> (k - 1 - j)) & 1 == 1)
                    .fold(0, |acc, (_, &q)| acc | (1 << q))
            })
            .collect();
        let target_mask = offsets[dim - 1];

        let mut local = vec![ZERO; dim];
        for base in 0..self.amplitudes.len() {
            if base & target_mask != 0 {
                continue;
            }
            for (slot, &offset) in local.iter_mut().zip(&offsets) {
                *slot = self.amplitudes[base | offset];
            }
            for (row, &offset) in offsets.iter().enumerate() {
                self.amplitudes[base | offset] = local
                    .iter()
                    .enumerate()
                    .map(|(col, amp)| matrix[[row, col]] * amp)
                    .sum();
            }
        }
        Ok(())
    }

    fn check_operands(&self, gate: &StandardGate, qubits: &[usize]) -> SimResult<()> {
        let expected = gate.num_qubits() as usize;
        if qubits.len() != expected {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().to_string(),
                expected: gate.num_qubits(),
                got: u32::try_from(qubits.len()).unwrap_or(u32::MAX),
            }
            .into());
        }
        for (i, &q) in qubits.iter().enumerate() {
            let qubit = QubitId(u32::try_from(q).unwrap_or(u32::MAX));
            if q >= self.num_qubits {
                return Err(IrError::QubitOutOfRange {
                    qubit,
                    num_qubits: u32::try_from(self.num_qubits).unwrap_or(u32::MAX),
                    gate_name: Some(gate.name().to_string()),
                }
                .into());
            }
            if qubits[..i].contains(&q) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: Some(gate.name().to_string()),
                }
                .into());
            }
        }
        Ok(())
    }

    fn check_norm(&self, gate: &str) -> SimResult<()> {
        let norm = self.norm_sqr();
        // NaN compares false against the tolerance
        if !norm.is_finite() || (norm - 1.0).abs() > NORM_TOLERANCE {
            return Err(SimError::InternalNumeric {
                norm,
                gate: gate.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qexec_ir::OpaqueGate;
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    fn assert_amp(sv: &Statevector, index: usize, expected: Complex64) {
        let amp = sv.amplitudes()[index];
        assert!(
            (amp - expected).norm() < 1e-10,
            "amplitude {index}: expected {expected}, got {amp}"
        );
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(3).unwrap();
        assert_eq!(sv.amplitudes().len(), 8);
        assert_amp(&sv, 0, ONE);
        assert!((sv.norm_sqr() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_hadamard() {
        let mut sv = Statevector::new(1).unwrap();
        sv.apply_gate(&StandardGate::H, &[0]).unwrap();
        assert_amp(&sv, 0, Complex64::new(FRAC_1_SQRT_2, 0.0));
        assert_amp(&sv, 1, Complex64::new(FRAC_1_SQRT_2, 0.0));
    }

    #[test]
    fn test_x_on_higher_qubit() {
        let mut sv = Statevector::new(3).unwrap();
        sv.apply_gate(&StandardGate::X, &[2]).unwrap();
        assert_amp(&sv, 0b100, ONE);
    }

    #[test]
    fn test_cx_control_first() {
        // |q1 q0⟩ = |01⟩, control q0, target q1 → |11⟩
        let mut sv = Statevector::new(2).unwrap();
        sv.apply_gate(&StandardGate::X, &[0]).unwrap();
        sv.apply_gate(&StandardGate::CX, &[0, 1]).unwrap();
        assert_amp(&sv, 0b11, ONE);

        // control q1 is |0⟩, nothing happens
        let mut sv = Statevector::new(2).unwrap();
        sv.apply_gate(&StandardGate::X, &[0]).unwrap();
        sv.apply_gate(&StandardGate::CX, &[1, 0]).unwrap();
        assert_amp(&sv, 0b01, ONE);
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2).unwrap();
        sv.apply_gate(&StandardGate::H, &[0]).unwrap();
        sv.apply_gate(&StandardGate::CX, &[0, 1]).unwrap();
        assert_amp(&sv, 0b00, Complex64::new(FRAC_1_SQRT_2, 0.0));
        assert_amp(&sv, 0b11, Complex64::new(FRAC_1_SQRT_2, 0.0));
        assert_amp(&sv, 0b01, ZERO);
        assert_amp(&sv, 0b10, ZERO);
    }

    #[test]
    fn test_toffoli() {
        let mut sv = Statevector::new(3).unwrap();
        sv.apply_gate(&StandardGate::X, &[0]).unwrap();
        sv.apply_gate(&StandardGate::X, &[2]).unwrap();
        sv.apply_gate(&StandardGate::CCX, &[0, 2, 1]).unwrap();
        assert_amp(&sv, 0b111, ONE);
    }

    #[test]
    fn test_swap_non_adjacent() {
        let mut sv = Statevector::new(3).unwrap();
        sv.apply_gate(&StandardGate::X, &[0]).unwrap();
        sv.apply_gate(&StandardGate::Swap, &[0, 2]).unwrap();
        assert_amp(&sv, 0b100, ONE);
    }

    #[test]
    fn test_rotation_phase() {
        let mut sv = Statevector::new(1).unwrap();
        sv.apply_gate(&StandardGate::Rx(PI), &[0]).unwrap();
        assert_amp(&sv, 1, Complex64::new(0.0, -1.0));
    }

    #[test]
    fn test_opaque_gate_is_unsupported() {
        let mut circuit = Circuit::with_size("t", 1, 0);
        circuit.gate(OpaqueGate::new("mystery"), [QubitId(0)]).unwrap();
        let err = Statevector::evolve(&circuit).unwrap_err();
        assert!(matches!(err, SimError::UnsupportedGate { ref name } if name == "mystery"));
    }

    #[test]
    fn test_bad_operands() {
        let mut sv = Statevector::new(2).unwrap();
        assert!(matches!(
            sv.apply_gate(&StandardGate::H, &[2]),
            Err(SimError::RegisterIndex(IrError::QubitOutOfRange { .. }))
        ));
        assert!(matches!(
            sv.apply_gate(&StandardGate::CX, &[1, 1]),
            Err(SimError::RegisterIndex(IrError::DuplicateQubit { .. }))
        ));
        assert!(matches!(
            sv.apply_gate(&StandardGate::CX, &[0]),
            Err(SimError::RegisterIndex(IrError::QubitCountMismatch { .. }))
        ));
    }

    #[test]
    fn test_norm_preserved_by_all_gates() {
        let gates = [
            (StandardGate::U(0.3, 1.1, -0.7), vec![1]),
            (StandardGate::CRy(0.9), vec![2, 0]),
            (StandardGate::ISwap, vec![0, 1]),
            (StandardGate::CSwap, vec![1, 2, 0]),
            (StandardGate::SXdg, vec![2]),
        ];
        let mut sv = Statevector::new(3).unwrap();
        sv.apply_gate(&StandardGate::H, &[0]).unwrap();
        for (gate, qubits) in &gates {
            sv.apply_gate(gate, qubits).unwrap();
            sv.check_norm(gate.name()).unwrap();
        }
    }

    #[test]
    fn test_nan_amplitudes_fail_norm_check() {
        let mut sv = Statevector::new(1).unwrap();
        sv.apply_gate(&StandardGate::Rx(f64::NAN), &[0]).unwrap();
        assert!(sv.norm_sqr().is_nan());
        assert!(matches!(
            sv.check_norm("rx"),
            Err(SimError::InternalNumeric { ref gate, .. }) if gate == "rx"
        ));

        let instruction =
            Instruction::single_qubit_gate(StandardGate::Ry(f64::INFINITY), QubitId(0));
        let mut sv = Statevector::new(1).unwrap();
        assert!(matches!(
            sv.apply(&instruction),
            Err(SimError::InternalNumeric { .. })
        ));
    }

    #[test]
    fn test_new_rejects_unaddressable_sizes() {
        for n in [MAX_STATEVECTOR_QUBITS + 1, 64, usize::MAX] {
            assert!(matches!(
                Statevector::new(n),
                Err(SimError::ResourceLimit { max_qubits: MAX_STATEVECTOR_QUBITS, .. })
            ));
        }
        assert_eq!(Statevector::new(0).unwrap().amplitudes().len(), 1);
    }
}
