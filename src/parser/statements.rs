//! Statement parsing implementation
//!
//! This module handles parsing of all SanskritLang statement types:
//!
//! - Print: `likh expr`
//! - Declarations: `sthapan x = expr`
//! - Control flow: `yadi (..) { } anyatha { }`, `yavat (..) { }`
//! - Functions: `karya name(a, b) { }` and `wapas [expr]`
//! - Assignments and bare expression statements
//!
//! # Grammar
//!
//! ```text
//! statement ::= print_stmt | var_decl | if_stmt | while_stmt
//!             | function_decl | return_stmt | assignment | expr_stmt
//! block     ::= '{' statement* '}'
//! ```
//!
//! A trailing `;` after any simple statement is optional.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, ParseErrorKind, Parser};

impl Parser {
    /// Parse a braced block
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let location = self.current_location();
        self.expect_token(TokenKind::LBrace, "'{'")?;
        self.enter_nesting("Block")?;

        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        self.expect_token(TokenKind::RBrace, "'}'")?;
        self.exit_nesting(1);

        Ok(Block {
            statements,
            location,
        })
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let loc = self.current_location();

        if self.match_token(TokenKind::Likh) {
            let value = self.parse_expression()?;
            self.skip_semicolon();
            return Ok(Statement::Print {
                value,
                location: loc,
            });
        }

        if self.match_token(TokenKind::Sthapan) {
            return self.parse_variable_declaration(loc);
        }

        if self.match_token(TokenKind::Yadi) {
            return self.parse_if_statement(loc);
        }

        if self.match_token(TokenKind::Yavat) {
            return self.parse_while_statement(loc);
        }

        if self.match_token(TokenKind::Karya) {
            return self.parse_function_declaration(loc);
        }

        if self.match_token(TokenKind::Wapas) {
            return self.parse_return_statement(loc);
        }

        // Otherwise, it's an assignment or an expression statement
        let expr = self.parse_expression()?;

        if self.match_token(TokenKind::Assign) {
            let target_location = expr.location();
            let Expression::Identifier(name, _) = expr else {
                return Err(ParseError {
                    kind: ParseErrorKind::InvalidAssignmentTarget,
                    message: "Invalid assignment target".to_string(),
                    location: target_location,
                });
            };
            let value = self.parse_expression()?;
            self.skip_semicolon();
            return Ok(Statement::Assignment {
                name,
                value,
                location: loc,
            });
        }

        self.skip_semicolon();
        Ok(Statement::Expression {
            expr,
            location: loc,
        })
    }

    /// Parse `sthapan name = expr`
    fn parse_variable_declaration(&mut self, loc: SourceLocation) -> Result<Statement, ParseError> {
        let name = self.expect_identifier("variable name")?;
        self.expect_token(TokenKind::Assign, "'=' after variable name")?;
        let value = self.parse_expression()?;
        self.skip_semicolon();

        Ok(Statement::VariableDeclaration {
            name,
            value,
            location: loc,
        })
    }

    /// Parse `yadi (condition) { .. } [anyatha { .. }]`
    fn parse_if_statement(&mut self, loc: SourceLocation) -> Result<Statement, ParseError> {
        self.expect_lparen("after 'yadi'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after condition")?;

        let then_branch = self.parse_block()?;

        let else_branch = if self.match_token(TokenKind::Anyatha) {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Statement::If {
            condition,
            then_branch,
            else_branch,
            location: loc,
        })
    }

    /// Parse `yavat (condition) { .. }`
    fn parse_while_statement(&mut self, loc: SourceLocation) -> Result<Statement, ParseError> {
        self.expect_lparen("after 'yavat'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after condition")?;

        let body = self.parse_block()?;

        Ok(Statement::While {
            condition,
            body,
            location: loc,
        })
    }

    /// Parse `karya name(p1, p2) { .. }`
    fn parse_function_declaration(&mut self, loc: SourceLocation) -> Result<Statement, ParseError> {
        let name = self.expect_identifier("function name")?;
        self.expect_lparen("after function name")?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                params.push(self.expect_identifier("parameter name")?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect_rparen("after parameters")?;
        let body = self.parse_block()?;

        Ok(Statement::FunctionDeclaration(FunctionDecl {
            name,
            params,
            body,
            location: loc,
        }))
    }

    /// Parse `wapas [expr]`; the value is absent before `;` or `}`
    fn parse_return_statement(&mut self, loc: SourceLocation) -> Result<Statement, ParseError> {
        let value = if self.check(TokenKind::Semicolon) || self.check(TokenKind::RBrace) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.skip_semicolon();

        Ok(Statement::Return {
            value,
            location: loc,
        })
    }
}
