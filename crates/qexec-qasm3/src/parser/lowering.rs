//! AST-to-Circuit lowering for QASM3.

use std::ops::Range;

use qexec_ir::{
    Circuit, ClbitId, GateKind, Instruction, IrError, OpaqueGate, QubitId, RegisterKind,
    StandardGate,
};
use rustc_hash::FxHashMap;

use crate::ast::{Expression, GateCall, Operand, Program, Statement};
use crate::error::{ParseError, ParseResult};

/// Upper bound on the total number of declared qubits (and, separately, bits).
///
/// Keeps whole-register broadcasts bounded; the simulator applies its own,
/// much smaller, qubit limit.
pub const MAX_DECLARED_BITS: u32 = 1 << 16;

/// Lower an AST Program to a Circuit.
pub(crate) fn lower_to_circuit(program: &Program) -> ParseResult<Circuit> {
    Lowerer::new().lower(program)
}

/// A declared register: kind and global index range.
#[derive(Debug, Clone)]
struct Symbol {
    kind: RegisterKind,
    range: Range<u32>,
}

/// An operand resolved against the symbol table.
#[derive(Debug, Clone)]
enum Resolved {
    Single(u32),
    Whole(Range<u32>),
}

impl Resolved {
    fn indices(&self) -> Range<u32> {
        match self {
            Resolved::Single(i) => *i..*i + 1,
            Resolved::Whole(range) => range.clone(),
        }
    }
}

/// Lowers AST to Circuit.
struct Lowerer {
    /// Registers of both kinds share one namespace.
    symbols: FxHashMap<String, Symbol>,
    circuit: Circuit,
}

impl Lowerer {
    fn new() -> Self {
        Self {
            symbols: FxHashMap::default(),
            circuit: Circuit::new("qasm_circuit"),
        }
    }

    fn lower(mut self, program: &Program) -> ParseResult<Circuit> {
        for stmt in &program.statements {
            self.lower_statement(stmt)?;
        }
        Ok(self.circuit)
    }

    fn lower_statement(&mut self, stmt: &Statement) -> ParseResult<()> {
        match stmt {
            Statement::Include(_) => Ok(()),

            Statement::QubitDecl { name, size } => {
                self.declare(name, RegisterKind::Qubit, size.unwrap_or(1))
            }

            Statement::BitDecl { name, size } => {
                self.declare(name, RegisterKind::Bit, size.unwrap_or(1))
            }

            Statement::Gate(call) => self.lower_gate_call(call),

            Statement::Measure { qubits, bits } => {
                let q_ids = self.flatten(qubits, RegisterKind::Qubit)?;
                let c_ids = self.flatten(bits, RegisterKind::Bit)?;
                self.circuit.push(Instruction::measure_many(
                    q_ids.into_iter().map(QubitId),
                    c_ids.into_iter().map(ClbitId),
                ))?;
                Ok(())
            }

            Statement::Reset { qubits } => {
                for q in self.flatten(qubits, RegisterKind::Qubit)? {
                    self.circuit
                        .push(Instruction::gate(OpaqueGate::new("reset"), [QubitId(q)]))?;
                }
                Ok(())
            }

            Statement::Barrier { qubits } => {
                let q_ids = if qubits.is_empty() {
                    (0..self.declared(RegisterKind::Qubit)).collect()
                } else {
                    self.flatten(qubits, RegisterKind::Qubit)?
                };
                self.circuit.barrier(q_ids.into_iter().map(QubitId))?;
                Ok(())
            }
        }
    }

    /// Total number of declared elements of one kind.
    fn declared(&self, kind: RegisterKind) -> u32 {
        match kind {
            RegisterKind::Qubit => self.circuit.qregs().iter().map(|r| r.size).sum(),
            RegisterKind::Bit => self.circuit.cregs().iter().map(|r| r.size).sum(),
        }
    }

    fn declare(&mut self, name: &str, kind: RegisterKind, size: u32) -> ParseResult<()> {
        if self.symbols.contains_key(name) {
            return Err(ParseError::DuplicateDeclaration(name.to_string()));
        }

        let start = self.declared(kind);
        let total = u64::from(start) + u64::from(size);
        if total > u64::from(MAX_DECLARED_BITS) {
            return Err(ParseError::RegisterTooLarge {
                name: name.to_string(),
                total,
                limit: MAX_DECLARED_BITS,
            });
        }

        match kind {
            RegisterKind::Qubit => {
                self.circuit.add_qreg(name, size)?;
            }
            RegisterKind::Bit => {
                self.circuit.add_creg(name, size)?;
            }
        }
        self.symbols.insert(
            name.to_string(),
            Symbol {
                kind,
                range: start..start + size,
            },
        );
        Ok(())
    }

    fn resolve(&self, operand: &Operand, kind: RegisterKind) -> ParseResult<Resolved> {
        let symbol = self
            .symbols
            .get(&operand.register)
            .ok_or_else(|| ParseError::UndefinedIdentifier(operand.register.clone()))?;

        if symbol.kind != kind {
            return Err(ParseError::RegisterKind {
                name: operand.register.clone(),
                expected: match kind {
                    RegisterKind::Qubit => "qubit",
                    RegisterKind::Bit => "bit",
                },
            });
        }

        match operand.index {
            None => Ok(Resolved::Whole(symbol.range.clone())),
            Some(index) => {
                let size = symbol.range.end - symbol.range.start;
                if index >= size {
                    return Err(ParseError::IndexOutOfBounds {
                        register: operand.register.clone(),
                        index,
                        size,
                    });
                }
                Ok(Resolved::Single(symbol.range.start + index))
            }
        }
    }

    /// Resolve operands and concatenate their indices.
    fn flatten(&self, operands: &[Operand], kind: RegisterKind) -> ParseResult<Vec<u32>> {
        let mut ids = Vec::new();
        for operand in operands {
            ids.extend(self.resolve(operand, kind)?.indices());
        }
        Ok(ids)
    }

    fn lower_gate_call(&mut self, call: &GateCall) -> ParseResult<()> {
        let params = call
            .params
            .iter()
            .map(Expression::eval)
            .collect::<ParseResult<Vec<_>>>()?;

        let gate: GateKind = match StandardGate::from_name(&call.name, &params) {
            Ok(Some(gate)) => gate.into(),
            Ok(None) => OpaqueGate::new(call.name.clone()).with_params(params).into(),
            Err(IrError::ParameterCountMismatch { expected, got, .. }) => {
                return Err(ParseError::WrongParameterCount {
                    gate: call.name.clone(),
                    expected,
                    got,
                });
            }
            Err(e) => return Err(e.into()),
        };

        let operands = call
            .qubits
            .iter()
            .map(|op| self.resolve(op, RegisterKind::Qubit))
            .collect::<ParseResult<Vec<_>>>()?;

        for qubits in broadcast(&call.name, &operands)? {
            self.circuit
                .push(Instruction::gate(gate.clone(), qubits.into_iter().map(QubitId)))?;
        }
        Ok(())
    }
}

/// Expand whole-register operands into one operand list per element.
///
/// Single-element operands are repeated; all whole-register operands must
/// have the same size.
fn broadcast(operation: &str, operands: &[Resolved]) -> ParseResult<Vec<Vec<u32>>> {
    let mut width: Option<usize> = None;
    for operand in operands {
        if let Resolved::Whole(range) = operand {
            let len = range.len();
            match width {
                Some(w) if w != len => {
                    return Err(ParseError::BroadcastMismatch {
                        operation: operation.to_string(),
                        left: w,
                        right: len,
                    });
                }
                _ => width = Some(len),
            }
        }
    }

    let pick = |operand: &Resolved, i: u32| match operand {
        Resolved::Single(q) => *q,
        Resolved::Whole(range) => range.start + i,
    };

    let width = u32::try_from(width.unwrap_or(1)).unwrap_or(u32::MAX);
    Ok((0..width)
        .map(|i| operands.iter().map(|op| pick(op, i)).collect())
        .collect())
}
