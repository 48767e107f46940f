//! Expression parsing implementation
//!
//! This module handles parsing of SanskritLang expressions with one method per
//! precedence level, lowest binding first:
//!
//! ```text
//! expression := logicalOr
//! logicalOr  := logicalAnd ( ('ya' | '||') logicalAnd )*
//! logicalAnd := equality ( ('aur' | '&&') equality )*
//! equality   := comparison ( ('==' | '!=') comparison )*
//! comparison := term ( ('>' | '>=' | '<' | '<=') term )*
//! term       := factor ( ('+' | '-') factor )*
//! factor     := unary ( ('*' | '/' | '%') unary )*
//! unary      := ('nahi' | '!' | '-') unary | call
//! call       := primary ( '(' arguments ')' )*
//! primary    := NUMBER | STRING | IDENTIFIER | '(' expression ')'
//! ```
//!
//! Every binary level is left-associative: each loop iteration wraps the
//! expression built so far as the left operand of a new node.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.enter_nesting("Expression")?;
        let expr = self.parse_logical_or()?;
        self.exit_nesting(1);
        Ok(expr)
    }

    /// Parse one left-associative binary level.
    ///
    /// `ops` maps the token kinds accepted at this level to their operator;
    /// `next` parses the operands (the next-higher precedence level).
    /// Each link deepens the left spine, so it costs one nesting level.
    fn parse_binary_level(
        &mut self,
        ops: &[(TokenKind, BinOp)],
        next: fn(&mut Self) -> Result<Expression, ParseError>,
    ) -> Result<Expression, ParseError> {
        let mut left = next(self)?;
        let mut links = 0;

        loop {
            let loc = self.current_location();
            let Some(&(_, op)) = ops.iter().find(|(kind, _)| self.check(*kind)) else {
                break;
            };
            self.advance();
            self.enter_nesting("Expression")?;
            links += 1;

            let right = Box::new(next(self)?);
            left = Expression::Binary {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        self.exit_nesting(links);
        Ok(left)
    }

    /// Parse logical OR (`ya`, `||`)
    fn parse_logical_or(&mut self) -> Result<Expression, ParseError> {
        self.parse_binary_level(&[(TokenKind::Or, BinOp::Or)], Self::parse_logical_and)
    }

    /// Parse logical AND (`aur`, `&&`)
    fn parse_logical_and(&mut self) -> Result<Expression, ParseError> {
        self.parse_binary_level(&[(TokenKind::And, BinOp::And)], Self::parse_equality)
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> Result<Expression, ParseError> {
        self.parse_binary_level(
            &[(TokenKind::EqEq, BinOp::Eq), (TokenKind::NotEq, BinOp::Ne)],
            Self::parse_comparison,
        )
    }

    /// Parse comparison (> >= < <=)
    fn parse_comparison(&mut self) -> Result<Expression, ParseError> {
        self.parse_binary_level(
            &[
                (TokenKind::Gt, BinOp::Gt),
                (TokenKind::Ge, BinOp::Ge),
                (TokenKind::Lt, BinOp::Lt),
                (TokenKind::Le, BinOp::Le),
            ],
            Self::parse_term,
        )
    }

    /// Parse additive (+ -)
    fn parse_term(&mut self) -> Result<Expression, ParseError> {
        self.parse_binary_level(
            &[(TokenKind::Plus, BinOp::Add), (TokenKind::Minus, BinOp::Sub)],
            Self::parse_factor,
        )
    }

    /// Parse multiplicative (* / %)
    fn parse_factor(&mut self) -> Result<Expression, ParseError> {
        self.parse_binary_level(
            &[
                (TokenKind::Star, BinOp::Mul),
                (TokenKind::Slash, BinOp::Div),
                (TokenKind::Percent, BinOp::Mod),
            ],
            Self::parse_unary,
        )
    }

    /// Parse unary: `nahi x`, `!x`, `-x` (right-recursive)
    fn parse_unary(&mut self) -> Result<Expression, ParseError> {
        let loc = self.current_location();

        let op = if self.match_token(TokenKind::Not) {
            UnOp::Not
        } else if self.match_token(TokenKind::Minus) {
            UnOp::Neg
        } else {
            return self.parse_call();
        };

        self.enter_nesting("Expression")?;
        let operand = Box::new(self.parse_unary()?);
        self.exit_nesting(1);
        Ok(Expression::Unary {
            op,
            operand,
            location: loc,
        })
    }

    /// Parse call chains: `f(a)(b)`
    fn parse_call(&mut self) -> Result<Expression, ParseError> {
        let mut expr = self.parse_primary()?;
        let mut links = 0;

        while self.match_token(TokenKind::LParen) {
            self.enter_nesting("Expression")?;
            links += 1;
            let mut arguments = Vec::new();

            if !self.check(TokenKind::RParen) {
                loop {
                    arguments.push(self.parse_expression()?);
                    if !self.match_token(TokenKind::Comma) {
                        break;
                    }
                }
            }

            self.expect_rparen("after arguments")?;

            let location = expr.location();
            expr = Expression::Call {
                callee: Box::new(expr),
                arguments,
                location,
            };
        }

        self.exit_nesting(links);
        Ok(expr)
    }

    /// Parse primary expressions (literals, identifiers, parentheses)
    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        let loc = self.current_location();

        if self.match_token(TokenKind::Number) {
            return Ok(Expression::Number(self.previous().number_value(), loc));
        }

        if self.match_token(TokenKind::Str) {
            return Ok(Expression::Str(self.previous().text.clone(), loc));
        }

        if self.match_token(TokenKind::Identifier) {
            return Ok(Expression::Identifier(self.previous().text.clone(), loc));
        }

        if self.match_token(TokenKind::LParen) {
            let expr = self.parse_expression()?;
            self.expect_rparen("after expression")?;
            return Ok(expr);
        }

        Err(self.expected("expression"))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::parse;

    fn parse_expr(source: &str) -> Expression {
        let program = parse(tokenize(source).unwrap()).unwrap();
        match program.body.into_iter().next() {
            Some(Statement::Expression { expr, .. }) => expr,
            other => panic!("Expected expression statement, got {:?}", other),
        }
    }

    /// Render an expression fully parenthesized to check tree shape
    fn shape(expr: &Expression) -> String {
        match expr {
            Expression::Number(n, _) => format!("{}", n),
            Expression::Str(s, _) => format!("{:?}", s),
            Expression::Identifier(name, _) => name.clone(),
            Expression::Binary { op, left, right, .. } => {
                format!("({} {} {})", shape(left), op.symbol(), shape(right))
            }
            Expression::Unary { op, operand, .. } => format!("({}{})", op.symbol(), shape(operand)),
            Expression::Call {
                callee, arguments, ..
            } => {
                let args: Vec<String> = arguments.iter().map(shape).collect();
                format!("{}[{}]", shape(callee), args.join(", "))
            }
        }
    }

    #[test]
    fn test_precedence() {
        assert_eq!(shape(&parse_expr("1 + 2 * 3")), "(1 + (2 * 3))");
        assert_eq!(shape(&parse_expr("(1 + 2) * 3")), "((1 + 2) * 3)");
        assert_eq!(
            shape(&parse_expr("a < b aur c == d ya e")),
            "(((a < b) && (c == d)) || e)"
        );
        assert_eq!(shape(&parse_expr("x % 2 == 0")), "((x % 2) == 0)");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(shape(&parse_expr("10 - 4 - 3")), "((10 - 4) - 3)");
        assert_eq!(shape(&parse_expr("8 / 4 / 2")), "((8 / 4) / 2)");
        assert_eq!(shape(&parse_expr("a ya b || c")), "((a || b) || c)");
    }

    #[test]
    fn test_unary_operators() {
        assert_eq!(shape(&parse_expr("- -x")), "(-(-x))");
        assert_eq!(shape(&parse_expr("nahi a aur b")), "((!a) && b)");
        assert_eq!(shape(&parse_expr("!f(1)")), "(!f[1])");
        assert_eq!(shape(&parse_expr("-2 * 3")), "((-2) * 3)");
    }

    #[test]
    fn test_call_chains() {
        assert_eq!(shape(&parse_expr("f()")), "f[]");
        assert_eq!(shape(&parse_expr("f(1, g(2))(3)")), "f[1, g[2]][3]");
    }

    #[test]
    fn test_expected_expression() {
        let err = parse(tokenize("likh )").unwrap()).unwrap_err();
        assert_eq!(err.message, "Expected expression, found ')'");
        assert_eq!(err.location, SourceLocation::new(1, 6));

        let err = parse(tokenize("likh f(1").unwrap()).unwrap_err();
        assert_eq!(err.message, "Expected ')' after arguments, found end of file");
    }
}
