//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with one token of lookahead:
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: Parsing statements (`likh`, `yadi`, `yavat`, `karya`, ...)
//! - `expressions`: Parsing expressions, one method per precedence level
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use thiserror::Error;

/// Which grammar rule was violated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A required token or expression was missing
    Expected,
    /// `=` followed something other than a plain identifier
    InvalidAssignmentTarget,
    /// Expressions or blocks nested past [`MAX_NESTING_DEPTH`]
    NestingTooDeep,
}

/// Deepest nesting of expressions and blocks accepted by the parser.
///
/// Parenthesized groups, call arguments, unary operators, every extra link of
/// a binary or call chain, and every block count as one level. Evaluation
/// and code generation recurse over the resulting tree, so this also bounds
/// their stack use.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at line {}, column {}", .location.line, .location.column)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub location: SourceLocation,
}

/// Parse a token stream into a [`Program`].
pub fn parse(tokens: Vec<Token>) -> Result<Program, ParseError> {
    Parser::new(tokens).parse_program()
}

/// Recursive descent parser for SanskritLang
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    /// Current nesting level, see [`MAX_NESTING_DEPTH`]
    pub(crate) depth: usize,
}

impl Parser {
    /// Build a parser over `tokens`. Newline tokens are dropped here; a
    /// trailing EOF token is appended if the stream lacks one.
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut tokens: Vec<Token> = tokens
            .into_iter()
            .filter(|t| t.kind != TokenKind::Newline)
            .collect();

        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let location = tokens.last().map(|t| t.location).unwrap_or_default();
            tokens.push(Token::new(TokenKind::Eof, "", location));
        }

        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Parse the entire program
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            program.body.push(self.parse_statement()?);
        }

        Ok(program)
    }

    // ===== Helper methods =====

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    /// Build an `Expected ...` error pointing at the current token
    pub(crate) fn expected(&self, what: &str) -> ParseError {
        ParseError {
            kind: ParseErrorKind::Expected,
            message: format!("Expected {}, found {}", what, self.peek()),
            location: self.current_location(),
        }
    }

    pub(crate) fn expect_token(&mut self, kind: TokenKind, what: &str) -> Result<(), ParseError> {
        if self.match_token(kind) {
            Ok(())
        } else {
            Err(self.expected(what))
        }
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::LParen, &format!("'(' {ctx}"))
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::RParen, &format!("')' {ctx}"))
    }

    pub(crate) fn expect_identifier(&mut self, what: &str) -> Result<String, ParseError> {
        if self.check(TokenKind::Identifier) {
            Ok(self.advance().text.clone())
        } else {
            Err(self.expected(what))
        }
    }

    /// Enter one nesting level; `what` names the construct in the error
    pub(crate) fn enter_nesting(&mut self, what: &str) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError {
                kind: ParseErrorKind::NestingTooDeep,
                message: format!("{what} nested too deeply"),
                location: self.current_location(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn exit_nesting(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    /// Statement terminators are optional
    pub(crate) fn skip_semicolon(&mut self) {
        self.match_token(TokenKind::Semicolon);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    fn parse_source(source: &str) -> Result<Program, ParseError> {
        parse(tokenize(source).unwrap())
    }

    #[test]
    fn test_parse_empty_program() {
        let program = parse_source("").unwrap();
        assert!(program.body.is_empty());

        let program = parse_source("\n\n  // only a comment\n").unwrap();
        assert!(program.body.is_empty());
    }

    #[test]
    fn test_parse_function_declaration() {
        let source = "karya add(a, b) {\n  wapas a + b\n}";
        let program = parse_source(source).unwrap();

        assert_eq!(program.body.len(), 1);
        match &program.body[0] {
            Statement::FunctionDeclaration(decl) => {
                assert_eq!(decl.name, "add");
                assert_eq!(decl.params, vec!["a".to_string(), "b".to_string()]);
                assert_eq!(decl.body.statements.len(), 1);
                assert!(matches!(
                    decl.body.statements[0],
                    Statement::Return { value: Some(_), .. }
                ));
            }
            other => panic!("Expected function declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_if_else() {
        let source = "yadi (age >= 18) { likh \"Adult\" } anyatha { likh \"Minor\" }";
        let program = parse_source(source).unwrap();

        match &program.body[0] {
            Statement::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                assert!(matches!(condition, Expression::Binary { op: BinOp::Ge, .. }));
                assert_eq!(then_branch.statements.len(), 1);
                assert_eq!(else_branch.as_ref().map(|b| b.statements.len()), Some(1));
            }
            other => panic!("Expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_semicolons_are_optional() {
        let with = parse_source("sthapan x = 1; likh x;").unwrap();
        let without = parse_source("sthapan x = 1\nlikh x").unwrap();
        let same_line = parse_source("sthapan x = 1 likh x").unwrap();

        assert_eq!(with.body.len(), 2);
        assert_eq!(without.body.len(), 2);
        assert_eq!(same_line.body.len(), 2);
    }

    #[test]
    fn test_invalid_assignment_target() {
        let err = parse_source("5 = 3").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidAssignmentTarget);
        assert_eq!(err.location, SourceLocation::new(1, 1));

        let err = parse_source("f(1) = 3").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidAssignmentTarget);
    }

    #[test]
    fn test_missing_brace_reports_offending_token() {
        let err = parse_source("yadi (x) likh x").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Expected);
        assert_eq!(err.location, SourceLocation::new(1, 10));
        assert_eq!(
            err.to_string(),
            "Expected '{', found 'likh' at line 1, column 10"
        );

        let err = parse_source("yavat (x) { likh x").unwrap_err();
        assert_eq!(err.message, "Expected '}', found end of file");
    }

    #[test]
    fn test_nesting_limit() {
        // The statement's own expression is the first level
        let parens = |n: usize| format!("likh {}1{}", "(".repeat(n), ")".repeat(n));
        assert!(parse_source(&parens(MAX_NESTING_DEPTH - 1)).is_ok());

        let err = parse_source(&parens(MAX_NESTING_DEPTH)).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NestingTooDeep);
        assert_eq!(err.message, "Expression nested too deeply");

        let source = "karya f() { ".repeat(MAX_NESTING_DEPTH + 1);
        let err = parse_source(&source).unwrap_err();
        assert_eq!(err.message, "Block nested too deeply");
    }

    #[test]
    fn test_depth_is_released_between_statements() {
        let line = format!("likh {}1{}\n", "(".repeat(100), ")".repeat(100));
        let source = line.repeat(5);
        assert_eq!(parse_source(&source).unwrap().body.len(), 5);
    }

    #[test]
    fn test_return_without_value() {
        let program = parse_source("karya f() { wapas }\nkarya g() { wapas; likh 1 }").unwrap();

        for stmt in &program.body {
            let Statement::FunctionDeclaration(decl) = stmt else {
                panic!("Expected function declaration");
            };
            assert!(matches!(
                decl.body.statements[0],
                Statement::Return { value: None, .. }
            ));
        }
    }
}
