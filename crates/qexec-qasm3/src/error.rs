//! Error types for the QASM3 parser.

use thiserror::Error;

/// Errors that can occur during parsing.
///
/// Any of these means the circuit text was malformed; none is raised
/// after a circuit has been produced.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Lexer error (invalid token).
    #[error("Lexer error at line {line}: {message}")]
    LexerError { line: usize, message: String },

    /// Unexpected token.
    #[error("Unexpected token at line {line}: expected {expected}, found {found}")]
    UnexpectedToken {
        line: usize,
        expected: String,
        found: String,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of input: expected {0}")]
    UnexpectedEof(String),

    /// Invalid version.
    #[error("Invalid OPENQASM version: {0} (only version 3 is supported)")]
    InvalidVersion(String),

    /// Undefined identifier.
    #[error("Undefined identifier: {0}")]
    UndefinedIdentifier(String),

    /// Duplicate declaration.
    #[error("Duplicate declaration: {0}")]
    DuplicateDeclaration(String),

    /// A bit register used where a qubit register is required, or the reverse.
    #[error("'{name}' is not a {expected} register")]
    RegisterKind { name: String, expected: &'static str },

    /// Wrong number of parameters.
    #[error("Gate '{gate}' expects {expected} parameters, got {got}")]
    WrongParameterCount {
        gate: String,
        expected: usize,
        got: usize,
    },

    /// Index out of bounds.
    #[error("Index {index} out of bounds for register '{register}' of size {size}")]
    IndexOutOfBounds {
        register: String,
        index: u32,
        size: u32,
    },

    /// Whole-register operands of different sizes.
    #[error("Cannot broadcast '{operation}' over registers of different sizes ({left} and {right})")]
    BroadcastMismatch {
        operation: String,
        left: usize,
        right: usize,
    },

    /// Declared registers exceed the parser's size cap.
    #[error("Register '{name}' would bring the total to {total}, above the limit of {limit}")]
    RegisterTooLarge { name: String, total: u64, limit: u32 },

    /// Parameter expression that cannot be evaluated to a number.
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    /// Language feature outside the accepted subset.
    #[error("Unsupported at line {line}: {feature}")]
    Unsupported { line: usize, feature: String },

    /// IR error during circuit construction.
    #[error("Circuit error: {0}")]
    CircuitError(#[from] qexec_ir::IrError),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
