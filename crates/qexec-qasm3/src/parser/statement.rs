//! Statement parsing for QASM3.

use super::Parser;
use crate::ast::{GateCall, Operand, Statement};
use crate::error::{ParseError, ParseResult};
use crate::lexer::Token;

impl Parser {
    /// Parse a statement.
    pub(super) fn parse_statement(&mut self) -> ParseResult<Statement> {
        let token = self
            .peek()
            .cloned()
            .ok_or_else(|| ParseError::UnexpectedEof("statement".into()))?;

        match token {
            Token::Include => self.parse_include(),
            Token::Qubit => self.parse_qubit_decl(),
            Token::Bit => self.parse_bit_decl(),
            Token::Qreg => {
                let (name, size) = self.parse_legacy_decl(Token::Qreg)?;
                Ok(Statement::QubitDecl { name, size })
            }
            Token::Creg => {
                let (name, size) = self.parse_legacy_decl(Token::Creg)?;
                Ok(Statement::BitDecl { name, size })
            }
            Token::Measure => self.parse_measure(),
            Token::Reset => self.parse_reset(),
            Token::Barrier => self.parse_barrier(),
            Token::Gate => Err(self.unsupported("gate definitions")),
            Token::If => Err(self.unsupported("classical control flow (if)")),
            Token::For => Err(self.unsupported("loops (for)")),
            Token::Identifier(_) => self.parse_identifier_statement(),
            _ => Err(self.unexpected("statement", &token)),
        }
    }

    fn unsupported(&self, feature: &str) -> ParseError {
        ParseError::Unsupported {
            line: self.line(),
            feature: feature.into(),
        }
    }

    /// Parse include statement.
    fn parse_include(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Include)?;
        let path = match self.advance() {
            Some(Token::StringLiteral(s)) => s,
            Some(other) => return Err(self.unexpected("string literal", &other)),
            None => return Err(ParseError::UnexpectedEof("include path".into())),
        };
        self.expect(Token::Semicolon)?;
        Ok(Statement::Include(path))
    }

    /// Parse an optional `[n]` size designator.
    fn parse_optional_size(&mut self) -> ParseResult<Option<u32>> {
        if self.consume(&Token::LBracket) {
            let size = self.parse_u32()?;
            self.expect(Token::RBracket)?;
            Ok(Some(size))
        } else {
            Ok(None)
        }
    }

    /// Parse qubit declaration.
    fn parse_qubit_decl(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Qubit)?;
        let size = self.parse_optional_size()?;
        let name = self.parse_identifier()?;
        self.expect(Token::Semicolon)?;
        Ok(Statement::QubitDecl { name, size })
    }

    /// Parse bit declaration.
    fn parse_bit_decl(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Bit)?;
        let size = self.parse_optional_size()?;
        let name = self.parse_identifier()?;
        self.expect(Token::Semicolon)?;
        Ok(Statement::BitDecl { name, size })
    }

    /// Parse `qreg name[n];` or `creg name[n];`.
    fn parse_legacy_decl(&mut self, keyword: Token) -> ParseResult<(String, Option<u32>)> {
        self.expect(keyword)?;
        let name = self.parse_identifier()?;
        let size = self.parse_optional_size()?;
        self.expect(Token::Semicolon)?;
        Ok((name, size))
    }

    /// Parse measure statement: `measure q -> c;` or `measure q;`.
    fn parse_measure(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Measure)?;
        let qubits = self.parse_operands()?;

        let bits = if self.consume(&Token::Arrow) {
            self.parse_operands()?
        } else {
            vec![]
        };

        self.expect(Token::Semicolon)?;
        Ok(Statement::Measure { qubits, bits })
    }

    /// Parse reset statement.
    fn parse_reset(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Reset)?;
        let qubits = self.parse_operands()?;
        self.expect(Token::Semicolon)?;
        Ok(Statement::Reset { qubits })
    }

    /// Parse barrier statement.
    fn parse_barrier(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Barrier)?;
        let qubits = if self.check(&Token::Semicolon) {
            vec![]
        } else {
            self.parse_operands()?
        };
        self.expect(Token::Semicolon)?;
        Ok(Statement::Barrier { qubits })
    }

    /// Parse statement starting with identifier (gate call or measurement assignment).
    fn parse_identifier_statement(&mut self) -> ParseResult<Statement> {
        let name = self.parse_identifier()?;

        if self.check(&Token::Eq) || self.check(&Token::LBracket) {
            return self.parse_measure_assignment(name);
        }

        self.parse_gate_call(name)
    }

    /// Parse `c = measure q;` or `c[i] = measure q[j];`.
    fn parse_measure_assignment(&mut self, target: String) -> ParseResult<Statement> {
        let index = if self.consume(&Token::LBracket) {
            let idx = self.parse_u32()?;
            self.expect(Token::RBracket)?;
            Some(idx)
        } else {
            None
        };

        self.expect(Token::Eq)?;

        if !self.consume(&Token::Measure) {
            return Err(self.unsupported("classical assignment"));
        }

        let qubits = self.parse_operands()?;
        self.expect(Token::Semicolon)?;

        let bits = vec![Operand {
            register: target,
            index,
        }];
        Ok(Statement::Measure { qubits, bits })
    }

    /// Parse gate call.
    fn parse_gate_call(&mut self, name: String) -> ParseResult<Statement> {
        let params = if self.consume(&Token::LParen) {
            let p = self.parse_expression_list()?;
            self.expect(Token::RParen)?;
            p
        } else {
            vec![]
        };

        let qubits = self.parse_operands()?;
        self.expect(Token::Semicolon)?;

        Ok(Statement::Gate(GateCall {
            name,
            params,
            qubits,
        }))
    }

    /// Parse a comma-separated operand list.
    fn parse_operands(&mut self) -> ParseResult<Vec<Operand>> {
        let mut refs = vec![self.parse_operand()?];
        while self.consume(&Token::Comma) {
            refs.push(self.parse_operand()?);
        }
        Ok(refs)
    }

    /// Parse `name` or `name[i]`.
    fn parse_operand(&mut self) -> ParseResult<Operand> {
        let register = self.parse_identifier()?;

        let index = if self.consume(&Token::LBracket) {
            let index = self.parse_u32()?;
            self.expect(Token::RBracket)?;
            Some(index)
        } else {
            None
        };

        Ok(Operand { register, index })
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse_ast;
    use crate::ast::{Operand, Statement};
    use crate::error::ParseError;

    fn statements(body: &str) -> Vec<Statement> {
        parse_ast(&format!("OPENQASM 3;\n{body}")).unwrap().statements
    }

    #[test]
    fn test_declarations() {
        let stmts = statements("qubit[3] q; qubit a; bit[2] c; qreg r[4]; creg m[1];");
        assert!(matches!(&stmts[0], Statement::QubitDecl { name, size: Some(3) } if name == "q"));
        assert!(matches!(&stmts[1], Statement::QubitDecl { size: None, .. }));
        assert!(matches!(&stmts[2], Statement::BitDecl { size: Some(2), .. }));
        assert!(matches!(&stmts[3], Statement::QubitDecl { name, size: Some(4) } if name == "r"));
        assert!(matches!(&stmts[4], Statement::BitDecl { size: Some(1), .. }));
    }

    #[test]
    fn test_measure_forms() {
        let stmts = statements(
            "c[1] = measure q[0]; c = measure q; measure q -> c; measure q[0] -> c[0]; measure q;",
        );
        assert_eq!(stmts.len(), 5);

        let Statement::Measure { qubits, bits } = &stmts[0] else {
            panic!("expected measure");
        };
        assert_eq!(qubits, &vec![Operand::single("q", 0)]);
        assert_eq!(bits, &vec![Operand::single("c", 1)]);

        let Statement::Measure { bits, .. } = &stmts[1] else {
            panic!("expected measure");
        };
        assert_eq!(bits, &vec![Operand::register("c")]);

        let Statement::Measure { bits, .. } = &stmts[4] else {
            panic!("expected measure");
        };
        assert!(bits.is_empty());
    }

    #[test]
    fn test_gate_call_with_params() {
        let stmts = statements("u(pi, 0, pi/2) q[0];");
        let Statement::Gate(call) = &stmts[0] else {
            panic!("expected gate call");
        };
        assert_eq!(call.name, "u");
        assert_eq!(call.params.len(), 3);
        assert_eq!(call.qubits, vec![Operand::single("q", 0)]);
    }

    #[test]
    fn test_barrier_without_operands() {
        let stmts = statements("barrier;");
        assert!(matches!(&stmts[0], Statement::Barrier { qubits } if qubits.is_empty()));
    }

    #[test]
    fn test_unsupported_constructs() {
        let bodies = [
            "gate g a { x a; }",
            "if (c == 1) x q;",
            "for uint i in {0, 1} { x q[i]; }",
            "c = 1;",
        ];
        for body in bodies {
            let err = parse_ast(&format!("OPENQASM 3;\n{body}")).unwrap_err();
            assert!(
                matches!(err, ParseError::Unsupported { line: 2, .. }),
                "{body}: {err}"
            );
        }
    }
}
