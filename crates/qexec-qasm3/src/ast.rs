//! Abstract Syntax Tree for the `OpenQASM` 3 subset.

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ParseResult};

/// A complete QASM3 program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    /// QASM version (e.g., "3.0").
    pub version: String,
    /// Statements in the program.
    pub statements: Vec<Statement>,
}

/// A statement in a QASM3 program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Statement {
    /// Include statement (ignored during lowering).
    Include(String),

    /// Qubit declaration: `qubit[n] name;`, `qubit name;` or `qreg name[n];`
    QubitDecl { name: String, size: Option<u32> },

    /// Classical bit declaration: `bit[n] name;`, `bit name;` or `creg name[n];`
    BitDecl { name: String, size: Option<u32> },

    /// Gate application.
    Gate(GateCall),

    /// Measurement: `measure q -> c;`, `c = measure q;` or `measure q;`
    Measure {
        qubits: Vec<Operand>,
        bits: Vec<Operand>,
    },

    /// Reset: `reset q;`
    Reset { qubits: Vec<Operand> },

    /// Barrier: `barrier q;` or `barrier;`
    Barrier { qubits: Vec<Operand> },
}

/// A gate call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateCall {
    /// Gate name as written.
    pub name: String,
    /// Gate parameters (angles, etc.).
    pub params: Vec<Expression>,
    /// Operands the gate acts on.
    pub qubits: Vec<Operand>,
}

/// Reference to a whole register (`q`) or one of its elements (`q[i]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operand {
    /// Register name.
    pub register: String,
    /// Element index, `None` for the whole register.
    pub index: Option<u32>,
}

impl Operand {
    /// Reference a single register element.
    pub fn single(register: impl Into<String>, index: u32) -> Self {
        Self {
            register: register.into(),
            index: Some(index),
        }
    }

    /// Reference a whole register.
    pub fn register(register: impl Into<String>) -> Self {
        Self {
            register: register.into(),
            index: None,
        }
    }
}

/// Binary operators allowed in parameter expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// A classical parameter expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Integer literal.
    Int(u64),
    /// Floating-point literal.
    Float(f64),
    /// The constant π.
    Pi,
    /// The constant τ = 2π.
    Tau,
    /// Euler's number e.
    Euler,
    /// A name; no classical variables exist, so evaluation fails.
    Identifier(String),
    /// Unary negation.
    Neg(Box<Expression>),
    /// Binary operation.
    BinOp {
        left: Box<Expression>,
        op: BinOp,
        right: Box<Expression>,
    },
    /// Parenthesized expression.
    Paren(Box<Expression>),
    /// Built-in function call, e.g. `sqrt(2)`.
    FnCall { name: String, args: Vec<Expression> },
}

impl Expression {
    /// Evaluate to a constant.
    #[allow(clippy::cast_precision_loss)]
    pub fn eval(&self) -> ParseResult<f64> {
        let value = match self {
            Expression::Int(v) => *v as f64,
            Expression::Float(v) => *v,
            Expression::Pi => std::f64::consts::PI,
            Expression::Tau => std::f64::consts::TAU,
            Expression::Euler => std::f64::consts::E,
            Expression::Identifier(name) => {
                return Err(ParseError::UndefinedIdentifier(name.clone()));
            }
            Expression::Neg(e) => -e.eval()?,
            Expression::Paren(e) => e.eval()?,
            Expression::BinOp { left, op, right } => {
                let l = left.eval()?;
                let r = right.eval()?;
                match op {
                    BinOp::Add => l + r,
                    BinOp::Sub => l - r,
                    BinOp::Mul => l * r,
                    BinOp::Div => l / r,
                    BinOp::Pow => l.powf(r),
                }
            }
            Expression::FnCall { name, args } => {
                let [arg] = args.as_slice() else {
                    return Err(ParseError::InvalidExpression(format!(
                        "{name} takes 1 argument, got {}",
                        args.len()
                    )));
                };
                let x = arg.eval()?;
                match name.as_str() {
                    "sin" => x.sin(),
                    "cos" => x.cos(),
                    "tan" => x.tan(),
                    "arcsin" => x.asin(),
                    "arccos" => x.acos(),
                    "arctan" => x.atan(),
                    "exp" => x.exp(),
                    "ln" => x.ln(),
                    "sqrt" => x.sqrt(),
                    _ => return Err(ParseError::UndefinedIdentifier(name.clone())),
                }
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(ParseError::InvalidExpression(format!(
                "expression does not evaluate to a finite number: {value}"
            )))
        }
    }
}
