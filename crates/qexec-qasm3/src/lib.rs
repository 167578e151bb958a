//! `OpenQASM` 3 Parser for qexec
//!
//! Turns circuit text submitted to the service into a [`qexec_ir::Circuit`].
//! Only the straight-line subset needed to describe a unitary circuit with
//! final measurements is accepted; anything else fails with a
//! [`ParseError`].
//!
//! # Supported Features
//!
//! | Feature | Status | Example |
//! |---------|--------|---------|
//! | Version declaration | ✅ | `OPENQASM 3;` |
//! | Includes | ✅ (ignored) | `include "stdgates.inc";` |
//! | Qubit declarations | ✅ | `qubit[5] q;`, `qreg q[5];` |
//! | Classical bits | ✅ | `bit[5] c;`, `creg c[5];` |
//! | Standard gates | ✅ | `h q[0];`, `cx q[0], q[1];` |
//! | Parameterized gates | ✅ | `rx(pi/4) q[0];` |
//! | Register broadcast | ✅ | `h q;`, `cx a, b;` |
//! | Measurements | ✅ | `c = measure q;`, `measure q -> c;` |
//! | Barriers | ✅ | `barrier q;` |
//! | Reset | parsed, rejected by the simulator | `reset q[0];` |
//! | Gate definitions, control flow | ❌ | `gate g a { ... }` |
//! | Comments | ✅ | `// comment` |
//!
//! Gate names outside the standard set are kept as opaque operations so the
//! simulator can report them as unsupported.
//!
//! # Example
//!
//! ```rust
//! use qexec_qasm3::parse;
//!
//! let qasm = r#"
//!     OPENQASM 3;
//!     include "stdgates.inc";
//!     qubit[2] q;
//!     bit[2] c;
//!     h q[0];
//!     cx q[0], q[1];
//!     c = measure q;
//! "#;
//!
//! let circuit = parse(qasm).unwrap();
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.unitary_ops().count(), 2);
//! ```

mod ast;
mod error;
mod lexer;
mod parser;

pub use error::{ParseError, ParseResult};
pub use parser::{MAX_DECLARED_BITS, parse, parse_ast};

/// AST types produced by [`parse_ast`].
pub mod syntax {
    pub use crate::ast::*;
}
