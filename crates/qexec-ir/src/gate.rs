//! Quantum gate types and their unitary matrices.

use ndarray::{Array2, array, s};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};

use crate::error::{IrError, IrResult};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Dense unitary matrix of a gate acting on k qubits (2^k × 2^k).
///
/// Row/column index convention: for an instruction targeting
/// `[q_0, .., q_{k-1}]` the local basis index is
/// `sum_j bit(q_j) << (k - 1 - j)`, i.e. the first listed qubit is the
/// most significant local bit. Controls are listed first.
pub type GateMatrix = Array2<Complex64>;

/// The supported gate set.
///
/// Each variant carries its numeric parameters, so the unitary is fully
/// determined by the variant value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X) gate.
    SX,
    /// sqrt(X)-dagger gate.
    SXdg,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase gate.
    P(f64),
    /// Universal single-qubit gate U(θ, φ, λ).
    U(f64, f64, f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// Controlled-Hadamard gate.
    CH,
    /// SWAP gate.
    Swap,
    /// iSWAP gate.
    ISwap,
    /// Controlled rotation around X.
    CRx(f64),
    /// Controlled rotation around Y.
    CRy(f64),
    /// Controlled rotation around Z.
    CRz(f64),
    /// Controlled phase gate.
    CP(f64),

    // Three-qubit gates
    /// Toffoli gate (CCX).
    CCX,
    /// Fredkin gate (CSWAP).
    CSwap,
}

impl StandardGate {
    /// Resolve a gate by its OpenQASM name.
    ///
    /// Returns `Ok(None)` for names outside the supported set, and an
    /// error when a known gate is given the wrong number of parameters.
    pub fn from_name(name: &str, params: &[f64]) -> IrResult<Option<Self>> {
        let expected = match Self::param_count(name) {
            Some(n) => n,
            None => return Ok(None),
        };
        if params.len() != expected {
            return Err(IrError::ParameterCountMismatch {
                gate_name: name.to_string(),
                expected,
                got: params.len(),
            });
        }

        let gate = match name {
            "id" | "i" => StandardGate::I,
            "x" => StandardGate::X,
            "y" => StandardGate::Y,
            "z" => StandardGate::Z,
            "h" => StandardGate::H,
            "s" => StandardGate::S,
            "sdg" => StandardGate::Sdg,
            "t" => StandardGate::T,
            "tdg" => StandardGate::Tdg,
            "sx" => StandardGate::SX,
            "sxdg" => StandardGate::SXdg,
            "rx" => StandardGate::Rx(params[0]),
            "ry" => StandardGate::Ry(params[0]),
            "rz" => StandardGate::Rz(params[0]),
            "p" | "phase" | "u1" => StandardGate::P(params[0]),
            "u" | "U" | "u3" => StandardGate::U(params[0], params[1], params[2]),
            "cx" | "CX" | "cnot" => StandardGate::CX,
            "cy" => StandardGate::CY,
            "cz" => StandardGate::CZ,
            "ch" => StandardGate::CH,
            "swap" => StandardGate::Swap,
            "iswap" => StandardGate::ISwap,
            "crx" => StandardGate::CRx(params[0]),
            "cry" => StandardGate::CRy(params[0]),
            "crz" => StandardGate::CRz(params[0]),
            "cp" | "cphase" => StandardGate::CP(params[0]),
            "ccx" | "toffoli" => StandardGate::CCX,
            "cswap" | "fredkin" => StandardGate::CSwap,
            _ => return Ok(None),
        };
        Ok(Some(gate))
    }

    /// Number of parameters a named gate takes, or `None` if unknown.
    pub fn param_count(name: &str) -> Option<usize> {
        match name {
            "id" | "i" | "x" | "y" | "z" | "h" | "s" | "sdg" | "t" | "tdg" | "sx" | "sxdg"
            | "cx" | "CX" | "cnot" | "cy" | "cz" | "ch" | "swap" | "iswap" | "ccx"
            | "toffoli" | "cswap" | "fredkin" => Some(0),
            "rx" | "ry" | "rz" | "p" | "phase" | "u1" | "crx" | "cry" | "crz" | "cp"
            | "cphase" => Some(1),
            "u" | "U" | "u3" => Some(3),
            _ => None,
        }
    }

    /// Get the canonical name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::SX => "sx",
            StandardGate::SXdg => "sxdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::U(_, _, _) => "u",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::CH => "ch",
            StandardGate::Swap => "swap",
            StandardGate::ISwap => "iswap",
            StandardGate::CRx(_) => "crx",
            StandardGate::CRy(_) => "cry",
            StandardGate::CRz(_) => "crz",
            StandardGate::CP(_) => "cp",
            StandardGate::CCX => "ccx",
            StandardGate::CSwap => "cswap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::SX
            | StandardGate::SXdg
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_)
            | StandardGate::U(_, _, _) => 1,

            StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::CH
            | StandardGate::Swap
            | StandardGate::ISwap
            | StandardGate::CRx(_)
            | StandardGate::CRy(_)
            | StandardGate::CRz(_)
            | StandardGate::CP(_) => 2,

            StandardGate::CCX | StandardGate::CSwap => 3,
        }
    }

    /// Get the numeric parameters of this gate.
    pub fn parameters(&self) -> Vec<f64> {
        match *self {
            StandardGate::Rx(p)
            | StandardGate::Ry(p)
            | StandardGate::Rz(p)
            | StandardGate::P(p)
            | StandardGate::CRx(p)
            | StandardGate::CRy(p)
            | StandardGate::CRz(p)
            | StandardGate::CP(p) => vec![p],

            StandardGate::U(theta, phi, lambda) => vec![theta, phi, lambda],

            _ => vec![],
        }
    }

    /// The unitary matrix of this gate.
    pub fn matrix(&self) -> GateMatrix {
        match *self {
            StandardGate::I => Array2::eye(2),
            StandardGate::X => pauli_x(),
            StandardGate::Y => pauli_y(),
            StandardGate::Z => diagonal(ONE, -ONE),
            StandardGate::H => hadamard(),
            StandardGate::S => diagonal(ONE, I),
            StandardGate::Sdg => diagonal(ONE, -I),
            StandardGate::T => diagonal(ONE, Complex64::from_polar(1.0, FRAC_PI_4)),
            StandardGate::Tdg => diagonal(ONE, Complex64::from_polar(1.0, -FRAC_PI_4)),
            StandardGate::SX => {
                let (a, b) = (Complex64::new(0.5, 0.5), Complex64::new(0.5, -0.5));
                array![[a, b], [b, a]]
            }
            StandardGate::SXdg => {
                let (a, b) = (Complex64::new(0.5, -0.5), Complex64::new(0.5, 0.5));
                array![[a, b], [b, a]]
            }
            StandardGate::Rx(theta) => rx(theta),
            StandardGate::Ry(theta) => ry(theta),
            StandardGate::Rz(theta) => rz(theta),
            StandardGate::P(lambda) => diagonal(ONE, Complex64::from_polar(1.0, lambda)),
            StandardGate::U(theta, phi, lambda) => u(theta, phi, lambda),

            StandardGate::CX => controlled(&pauli_x()),
            StandardGate::CY => controlled(&pauli_y()),
            StandardGate::CZ => controlled(&diagonal(ONE, -ONE)),
            StandardGate::CH => controlled(&hadamard()),
            StandardGate::Swap => swap(),
            StandardGate::ISwap => array![
                [ONE, ZERO, ZERO, ZERO],
                [ZERO, ZERO, I, ZERO],
                [ZERO, I, ZERO, ZERO],
                [ZERO, ZERO, ZERO, ONE],
            ],
            StandardGate::CRx(theta) => controlled(&rx(theta)),
            StandardGate::CRy(theta) => controlled(&ry(theta)),
            StandardGate::CRz(theta) => controlled(&rz(theta)),
            StandardGate::CP(lambda) => {
                controlled(&diagonal(ONE, Complex64::from_polar(1.0, lambda)))
            }

            StandardGate::CCX => controlled(&controlled(&pauli_x())),
            StandardGate::CSwap => controlled(&swap()),
        }
    }
}

// =========================================================================
// Matrix builders
// =========================================================================

fn diagonal(a: Complex64, b: Complex64) -> GateMatrix {
    array![[a, ZERO], [ZERO, b]]
}

fn pauli_x() -> GateMatrix {
    array![[ZERO, ONE], [ONE, ZERO]]
}

fn pauli_y() -> GateMatrix {
    array![[ZERO, -I], [I, ZERO]]
}

fn hadamard() -> GateMatrix {
    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
    array![[h, h], [h, -h]]
}

fn rx(theta: f64) -> GateMatrix {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());
    array![[c, neg_i_s], [neg_i_s, c]]
}

fn ry(theta: f64) -> GateMatrix {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new((theta / 2.0).sin(), 0.0);
    array![[c, -s], [s, c]]
}

fn rz(theta: f64) -> GateMatrix {
    diagonal(
        Complex64::from_polar(1.0, -theta / 2.0),
        Complex64::from_polar(1.0, theta / 2.0),
    )
}

fn u(theta: f64, phi: f64, lambda: f64) -> GateMatrix {
    let c = (theta / 2.0).cos();
    let s = (theta / 2.0).sin();
    array![
        [
            Complex64::new(c, 0.0),
            -Complex64::from_polar(s, lambda)
        ],
        [
            Complex64::from_polar(s, phi),
            Complex64::from_polar(c, phi + lambda)
        ],
    ]
}

fn swap() -> GateMatrix {
    array![
        [ONE, ZERO, ZERO, ZERO],
        [ZERO, ZERO, ONE, ZERO],
        [ZERO, ONE, ZERO, ZERO],
        [ZERO, ZERO, ZERO, ONE],
    ]
}

/// Add one control qubit (most significant local bit) to a unitary.
fn controlled(target: &GateMatrix) -> GateMatrix {
    let dim = target.nrows();
    let mut m = Array2::eye(2 * dim);
    m.slice_mut(s![dim.., dim..]).assign(target);
    m
}

/// A named operation outside the supported gate set.
///
/// The parser keeps these so that the rejection happens where the gate
/// would be applied, with the gate's name in the error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpaqueGate {
    /// The name as written in the source.
    pub name: String,
    /// Numeric parameters, if any.
    #[serde(default)]
    pub params: Vec<f64>,
}

impl OpaqueGate {
    /// Create a new opaque gate.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: vec![],
        }
    }

    /// Attach parameters.
    #[must_use]
    pub fn with_params(mut self, params: Vec<f64>) -> Self {
        self.params = params;
        self
    }
}

/// A gate, either one with known semantics or an opaque named operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// A supported gate with a fixed unitary.
    Standard(StandardGate),
    /// An operation the simulator does not know how to apply.
    Opaque(OpaqueGate),
}

impl GateKind {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            GateKind::Standard(g) => g.name(),
            GateKind::Opaque(g) => &g.name,
        }
    }

    /// Get the standard gate, if this is one.
    pub fn as_standard(&self) -> Option<&StandardGate> {
        match self {
            GateKind::Standard(g) => Some(g),
            GateKind::Opaque(_) => None,
        }
    }
}

impl From<StandardGate> for GateKind {
    fn from(gate: StandardGate) -> Self {
        GateKind::Standard(gate)
    }
}

impl From<OpaqueGate> for GateKind {
    fn from(gate: OpaqueGate) -> Self {
        GateKind::Opaque(gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn assert_unitary(gate: &StandardGate) {
        let m = gate.matrix();
        let dim = 1usize << gate.num_qubits();
        assert_eq!(m.dim(), (dim, dim), "{} has wrong shape", gate.name());

        let adjoint = m.t().mapv(|z| z.conj());
        let product = adjoint.dot(&m);
        for i in 0..dim {
            for j in 0..dim {
                let expected = if i == j { ONE } else { ZERO };
                assert!(
                    (product[[i, j]] - expected).norm() < 1e-12,
                    "{} is not unitary at ({i}, {j})",
                    gate.name()
                );
            }
        }
    }

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::CCX.num_qubits(), 3);
        assert_eq!(StandardGate::U(1.0, 2.0, 3.0).parameters(), vec![1.0, 2.0, 3.0]);
        assert!(StandardGate::H.parameters().is_empty());
    }

    #[test]
    fn test_all_gates_are_unitary() {
        let gates = [
            StandardGate::I,
            StandardGate::X,
            StandardGate::Y,
            StandardGate::Z,
            StandardGate::H,
            StandardGate::S,
            StandardGate::Sdg,
            StandardGate::T,
            StandardGate::Tdg,
            StandardGate::SX,
            StandardGate::SXdg,
            StandardGate::Rx(0.3),
            StandardGate::Ry(-1.2),
            StandardGate::Rz(PI / 3.0),
            StandardGate::P(0.7),
            StandardGate::U(0.1, 0.2, 0.3),
            StandardGate::CX,
            StandardGate::CY,
            StandardGate::CZ,
            StandardGate::CH,
            StandardGate::Swap,
            StandardGate::ISwap,
            StandardGate::CRx(0.5),
            StandardGate::CRy(0.5),
            StandardGate::CRz(0.5),
            StandardGate::CP(0.5),
            StandardGate::CCX,
            StandardGate::CSwap,
        ];
        for gate in &gates {
            assert_unitary(gate);
        }
    }

    #[test]
    fn test_cx_matrix_control_is_first() {
        let m = StandardGate::CX.matrix();
        // |10⟩ (control set) maps to |11⟩
        assert_eq!(m[[3, 2]], ONE);
        assert_eq!(m[[2, 3]], ONE);
        // |01⟩ (control clear) is unchanged
        assert_eq!(m[[1, 1]], ONE);
    }

    #[test]
    fn test_sx_squares_to_x() {
        let sx = StandardGate::SX.matrix();
        let squared = sx.dot(&sx);
        let x = pauli_x();
        for (a, b) in squared.iter().zip(x.iter()) {
            assert!((a - b).norm() < 1e-12);
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            StandardGate::from_name("h", &[]).unwrap(),
            Some(StandardGate::H)
        );
        assert_eq!(
            StandardGate::from_name("cnot", &[]).unwrap(),
            Some(StandardGate::CX)
        );
        assert_eq!(
            StandardGate::from_name("rz", &[0.25]).unwrap(),
            Some(StandardGate::Rz(0.25))
        );
        assert_eq!(StandardGate::from_name("frobnicate", &[]).unwrap(), None);
    }

    #[test]
    fn test_from_name_wrong_param_count() {
        let err = StandardGate::from_name("rx", &[]).unwrap_err();
        assert!(matches!(
            err,
            IrError::ParameterCountMismatch {
                expected: 1,
                got: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_opaque_gate_name() {
        let g = GateKind::from(OpaqueGate::new("mystery").with_params(vec![1.0]));
        assert_eq!(g.name(), "mystery");
        assert!(g.as_standard().is_none());
    }
}
