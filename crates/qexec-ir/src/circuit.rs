//! Circuit model and builder API.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{GateKind, StandardGate};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId, Register, RegisterKind};

/// A quantum circuit: register layout plus an ordered instruction list.
///
/// Every instruction is validated against the register layout when it is
/// appended, so a `Circuit` obtained through the builder API always
/// satisfies the index invariant. Deserialized circuits should be checked
/// with [`Circuit::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Quantum registers in declaration order.
    qregs: Vec<Register>,
    /// Classical registers in declaration order.
    cregs: Vec<Register>,
    /// Instructions in program order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qregs: vec![],
            cregs: vec![],
            instructions: vec![],
        }
    }

    /// Create a circuit with one quantum register `q` and one classical
    /// register `c` of the given sizes.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        if num_qubits > 0 {
            circuit.qregs.push(Register::new("q", RegisterKind::Qubit, 0, num_qubits));
        }
        if num_clbits > 0 {
            circuit.cregs.push(Register::new("c", RegisterKind::Bit, 0, num_clbits));
        }
        circuit
    }

    /// Declare a quantum register; indices continue after the previous one.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> IrResult<Vec<QubitId>> {
        let name = name.into();
        self.ensure_unique_name(&name)?;
        let start = next_start(&self.qregs, &name, size)?;
        let reg = Register::new(name, RegisterKind::Qubit, start, size);
        let ids = reg.qubits().collect();
        self.qregs.push(reg);
        Ok(ids)
    }

    /// Declare a classical register; indices continue after the previous one.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> IrResult<Vec<ClbitId>> {
        let name = name.into();
        self.ensure_unique_name(&name)?;
        let start = next_start(&self.cregs, &name, size)?;
        let reg = Register::new(name, RegisterKind::Bit, start, size);
        let ids = reg.clbits().collect();
        self.cregs.push(reg);
        Ok(ids)
    }

    fn ensure_unique_name(&self, name: &str) -> IrResult<()> {
        if self.register(name).is_some() {
            return Err(IrError::DuplicateRegister(name.to_string()));
        }
        Ok(())
    }

    /// Append an instruction after checking it against the register layout.
    pub fn push(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.check_instruction(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    /// Check one instruction against this circuit's registers.
    fn check_instruction(&self, inst: &Instruction) -> IrResult<()> {
        let num_qubits = self.num_qubits_u32();
        let num_clbits = self.num_clbits_u32();
        let gate_name = || Some(inst.name().to_string());

        for &qubit in &inst.qubits {
            if qubit.0 >= num_qubits {
                return Err(IrError::QubitOutOfRange {
                    qubit,
                    num_qubits,
                    gate_name: gate_name(),
                });
            }
        }
        for &clbit in &inst.clbits {
            if clbit.0 >= num_clbits {
                return Err(IrError::ClbitOutOfRange {
                    clbit,
                    num_clbits,
                    gate_name: gate_name(),
                });
            }
        }

        match &inst.kind {
            InstructionKind::Gate(gate) => {
                if let Some(value) = inst.params().into_iter().find(|p| !p.is_finite()) {
                    return Err(IrError::NonFiniteParameter {
                        gate_name: inst.name().to_string(),
                        value,
                    });
                }
                if let GateKind::Standard(std_gate) = gate {
                    let expected = std_gate.num_qubits();
                    let got = u32::try_from(inst.qubits.len()).unwrap_or(u32::MAX);
                    if got != expected {
                        return Err(IrError::QubitCountMismatch {
                            gate_name: std_gate.name().to_string(),
                            expected,
                            got,
                        });
                    }
                }
                for (i, qubit) in inst.qubits.iter().enumerate() {
                    if inst.qubits[..i].contains(qubit) {
                        return Err(IrError::DuplicateQubit {
                            qubit: *qubit,
                            gate_name: gate_name(),
                        });
                    }
                }
            }
            InstructionKind::Measure => {
                if !inst.clbits.is_empty() && inst.qubits.len() != inst.clbits.len() {
                    return Err(IrError::MeasureArity {
                        qubits: inst.qubits.len(),
                        clbits: inst.clbits.len(),
                    });
                }
            }
            InstructionKind::Barrier => {}
        }
        Ok(())
    }

    /// Re-check the register layout and every instruction against it.
    ///
    /// Registers of each kind must be contiguous from index 0 and fit the
    /// 32-bit index space.
    pub fn validate(&self) -> IrResult<()> {
        check_layout(&self.qregs, RegisterKind::Qubit)?;
        check_layout(&self.cregs, RegisterKind::Bit)?;
        self.instructions
            .iter()
            .try_for_each(|inst| self.check_instruction(inst))
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply a standard gate to the given qubits.
    pub fn gate(
        &mut self,
        gate: impl Into<GateKind>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.push(Instruction::gate(gate, qubits))
    }

    /// Apply Identity gate.
    pub fn id(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::I, qubit))
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::Y, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::Z, qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::S, qubit))
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::Sdg, qubit))
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::T, qubit))
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::Tdg, qubit))
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::SX, qubit))
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::Rx(theta), qubit))
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::Ry(theta), qubit))
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::Rz(theta), qubit))
    }

    /// Apply phase gate.
    pub fn p(&mut self, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::P(lambda), qubit))
    }

    /// Apply universal single-qubit gate U(θ, φ, λ).
    pub fn u(&mut self, theta: f64, phi: f64, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(
            StandardGate::U(theta, phi, lambda),
            qubit,
        ))
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(StandardGate::CX, control, target))
    }

    /// Apply controlled-Z gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(StandardGate::CZ, control, target))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))
    }

    /// Apply controlled phase gate.
    pub fn cp(&mut self, lambda: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(
            StandardGate::CP(lambda),
            control,
            target,
        ))
    }

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::gate(StandardGate::CCX, [c1, c2, target]))
    }

    /// Apply Fredkin (CSWAP) gate.
    pub fn cswap(&mut self, control: QubitId, t1: QubitId, t2: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::gate(StandardGate::CSwap, [control, t1, t2]))
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.push(Instruction::measure(qubit, clbit))
    }

    /// Measure every qubit into the classical bit with the same index,
    /// declaring a `meas` register first if there are too few bits.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        let num_qubits = self.num_qubits_u32();
        let missing = num_qubits.saturating_sub(self.num_clbits_u32());
        if missing > 0 {
            self.add_creg("meas", missing)?;
        }
        let qubits = (0..num_qubits).map(QubitId);
        let clbits = (0..num_qubits).map(ClbitId);
        self.push(Instruction::measure_many(qubits, clbits))
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.push(Instruction::barrier(qubits))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn num_qubits_u32(&self) -> u32 {
        u32::try_from(total_size(&self.qregs)).unwrap_or(u32::MAX)
    }

    fn num_clbits_u32(&self) -> u32 {
        u32::try_from(total_size(&self.cregs)).unwrap_or(u32::MAX)
    }

    /// Get the number of qubits.
    ///
    /// Summed without overflow, so an oversized deserialized layout reports
    /// its real size.
    pub fn num_qubits(&self) -> usize {
        usize::try_from(total_size(&self.qregs)).unwrap_or(usize::MAX)
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        usize::try_from(total_size(&self.cregs)).unwrap_or(usize::MAX)
    }

    /// Quantum registers in declaration order.
    pub fn qregs(&self) -> &[Register] {
        &self.qregs
    }

    /// Classical registers in declaration order.
    pub fn cregs(&self) -> &[Register] {
        &self.cregs
    }

    /// Look up a register of either kind by name.
    pub fn register(&self, name: &str) -> Option<&Register> {
        self.qregs
            .iter()
            .chain(self.cregs.iter())
            .find(|r| r.name == name)
    }

    /// All instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// The instructions that act on the state vector, in program order.
    ///
    /// Measurements and barriers are left out: measurement outcomes are
    /// read from the final amplitudes instead of collapsing mid-circuit.
    pub fn unitary_ops(&self) -> impl Iterator<Item = &Instruction> + '_ {
        self.instructions.iter().filter(|inst| inst.is_gate())
    }

    /// Whether the circuit contains any measurement.
    pub fn has_measurements(&self) -> bool {
        self.instructions.iter().any(Instruction::is_measure)
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell state circuit.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2, 2);
        let (q0, q1) = (QubitId(0), QubitId(1));

        circuit
            .h(q0)?
            .cx(q0, q1)?
            .measure(q0, ClbitId(0))?
            .measure(q1, ClbitId(1))?;

        Ok(circuit)
    }

    /// Create a GHZ state circuit.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_size("ghz", n, n);
        if n == 0 {
            return Ok(circuit);
        }

        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }
        circuit.measure_all()?;

        Ok(circuit)
    }

    /// Create a circuit with a Hadamard on every qubit (uniform superposition).
    pub fn uniform(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_size("uniform", n, n);
        for i in 0..n {
            circuit.h(QubitId(i))?;
        }
        circuit.measure_all()?;
        Ok(circuit)
    }
}

fn total_size(registers: &[Register]) -> u64 {
    registers.iter().map(|r| u64::from(r.size)).sum()
}

/// Start index for a new register of `size` after `registers`.
fn next_start(registers: &[Register], name: &str, size: u32) -> IrResult<u32> {
    let total = total_size(registers);
    match (u32::try_from(total), u32::try_from(total + u64::from(size))) {
        (Ok(start), Ok(_)) => Ok(start),
        _ => Err(IrError::RegisterLayout {
            name: name.to_string(),
            reason: format!("{total} + {size} elements exceed the 32-bit index space"),
        }),
    }
}

/// Registers of one kind must tile `0..total` in declaration order.
fn check_layout(registers: &[Register], kind: RegisterKind) -> IrResult<()> {
    let mut expected: u64 = 0;
    for reg in registers {
        let reason = if reg.kind != kind {
            Some(format!("expected a {kind} register, found {}", reg.kind))
        } else if u64::from(reg.start) != expected {
            Some(format!("starts at {}, expected {expected}", reg.start))
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(IrError::RegisterLayout {
                name: reg.name.clone(),
                reason,
            });
        }
        expected += u64::from(reg.size);
        if expected > u64::from(u32::MAX) {
            return Err(IrError::RegisterLayout {
                name: reg.name.clone(),
                reason: format!("ends at {expected}, beyond the 32-bit index space"),
            });
        }
    }
    Ok(())
}
