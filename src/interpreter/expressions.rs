//! Expression evaluation
//!
//! Evaluates literals, identifiers, operators and calls. Operands are
//! evaluated left to right; `aur`/`ya` evaluate the right operand only when
//! the left one does not decide the result, and yield the deciding operand
//! itself rather than a boolean.
//!
//! # Operator Typing
//!
//! | Operator          | Accepted operands                        |
//! |-------------------|------------------------------------------|
//! | `+`               | two numbers, or any pair with a string   |
//! | `- * / %`         | two numbers                              |
//! | `< <= > >=`       | two strings, or a pair without functions |
//! | `== !=`           | anything, with host-style conversion     |
//! | unary `-`         | a number                                 |
//! | `nahi` / `!`      | anything                                 |
//!
//! Mixed comparisons convert both sides with [`Value::to_number`], and `==`
//! follows [`Value::loose_equals`]. Everything else is a
//! [`RuntimeError::TypeMismatch`].

use crate::interpreter::engine::Interpreter;
use crate::interpreter::environment::Environment;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::value::Value;
use crate::parser::ast::*;
use std::rc::Rc;

impl<'p> Interpreter<'p, '_> {
    /// Evaluate an expression and return its value
    pub(crate) fn evaluate(
        &mut self,
        expr: &'p Expression,
        env: &Environment<'p>,
    ) -> Result<Value<'p>, RuntimeError> {
        match expr {
            Expression::Number(n, _) => Ok(Value::Number(*n)),

            Expression::Str(s, _) => Ok(Value::Str(Rc::from(s.as_str()))),

            Expression::Identifier(name, _) => env
                .lookup(name)
                .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.clone() }),

            Expression::Binary {
                op: BinOp::And,
                left,
                right,
                ..
            } => {
                let left = self.evaluate(left, env)?;
                if left.is_truthy() {
                    self.evaluate(right, env)
                } else {
                    Ok(left)
                }
            }

            Expression::Binary {
                op: BinOp::Or,
                left,
                right,
                ..
            } => {
                let left = self.evaluate(left, env)?;
                if left.is_truthy() {
                    Ok(left)
                } else {
                    self.evaluate(right, env)
                }
            }

            Expression::Binary {
                op, left, right, ..
            } => {
                let left = self.evaluate(left, env)?;
                let right = self.evaluate(right, env)?;
                apply_binary(*op, left, right)
            }

            Expression::Unary { op, operand, .. } => {
                let value = self.evaluate(operand, env)?;
                apply_unary(*op, value)
            }

            Expression::Call {
                callee, arguments, ..
            } => self.evaluate_call(callee, arguments, env),
        }
    }

    /// Callee first, then arguments left to right, then the callable check
    fn evaluate_call(
        &mut self,
        callee: &'p Expression,
        arguments: &'p [Expression],
        env: &Environment<'p>,
    ) -> Result<Value<'p>, RuntimeError> {
        let target = self.evaluate(callee, env)?;

        let mut args = Vec::with_capacity(arguments.len());
        for arg in arguments {
            args.push(self.evaluate(arg, env)?);
        }

        match target {
            Value::Function(function) => self.call_function(&function, args),
            _ => Err(RuntimeError::NotCallable {
                callee: describe_callee(callee),
            }),
        }
    }
}

/// Name used for a callee in "is not a function" messages
fn describe_callee(callee: &Expression) -> String {
    match callee {
        Expression::Identifier(name, _) => name.clone(),
        Expression::Call { callee, .. } => format!("{}(...)", describe_callee(callee)),
        _ => "expression".to_string(),
    }
}

/// Apply a binary operator to two evaluated operands
pub(crate) fn apply_binary<'p>(
    op: BinOp,
    left: Value<'p>,
    right: Value<'p>,
) -> Result<Value<'p>, RuntimeError> {
    let mismatch = |left: &Value, right: &Value| RuntimeError::TypeMismatch {
        op: op.symbol(),
        left: left.type_name(),
        right: right.type_name(),
    };

    match op {
        BinOp::Add => match (&left, &right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::Str(_), _) | (_, Value::Str(_)) => {
                Ok(Value::Str(Rc::from(format!("{}{}", left, right))))
            }
            _ => Err(mismatch(&left, &right)),
        },

        BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod => {
            let (Some(a), Some(b)) = (left.as_number(), right.as_number()) else {
                return Err(mismatch(&left, &right));
            };
            let result = match op {
                BinOp::Sub => a - b,
                BinOp::Mul => a * b,
                BinOp::Div => a / b,
                _ => a % b,
            };
            Ok(Value::Number(result))
        }

        BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
            // Two strings compare as text, any other pair numerically
            let ordering = match (&left, &right) {
                (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
                _ => match (left.to_number(), right.to_number()) {
                    (Some(a), Some(b)) => a.partial_cmp(&b),
                    _ => return Err(mismatch(&left, &right)),
                },
            };
            // NaN compares false against everything
            let result = ordering.is_some_and(|ordering| match op {
                BinOp::Lt => ordering.is_lt(),
                BinOp::Le => ordering.is_le(),
                BinOp::Gt => ordering.is_gt(),
                _ => ordering.is_ge(),
            });
            Ok(Value::Bool(result))
        }

        BinOp::Eq => Ok(Value::Bool(left.loose_equals(&right))),
        BinOp::Ne => Ok(Value::Bool(!left.loose_equals(&right))),

        // Reached only with both operands already evaluated
        BinOp::And => Ok(if left.is_truthy() { right } else { left }),
        BinOp::Or => Ok(if left.is_truthy() { left } else { right }),
    }
}

/// Apply a unary operator to an evaluated operand
pub(crate) fn apply_unary(op: UnOp, value: Value<'_>) -> Result<Value<'_>, RuntimeError> {
    match op {
        UnOp::Not => Ok(Value::Bool(!value.is_truthy())),
        UnOp::Neg => match value {
            Value::Number(n) => Ok(Value::Number(-n)),
            other => Err(RuntimeError::InvalidOperand {
                op: op.symbol(),
                operand: other.type_name(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Value<'static> {
        Value::Number(n)
    }

    fn text(s: &str) -> Value<'static> {
        Value::Str(Rc::from(s))
    }

    #[test]
    fn test_arithmetic() {
        let result = apply_binary(BinOp::Mod, num(7.0), num(3.0)).unwrap();
        assert_eq!(result.to_string(), "1");

        let result = apply_binary(BinOp::Div, num(1.0), num(0.0)).unwrap();
        assert_eq!(result.to_string(), "Infinity");

        let result = apply_binary(BinOp::Mod, num(1.0), num(0.0)).unwrap();
        assert_eq!(result.to_string(), "NaN");
    }

    #[test]
    fn test_string_concatenation() {
        let result = apply_binary(BinOp::Add, text("n = "), num(5.0)).unwrap();
        assert_eq!(result.to_string(), "n = 5");

        let result = apply_binary(BinOp::Add, Value::Bool(true), text("!")).unwrap();
        assert_eq!(result.to_string(), "true!");
    }

    #[test]
    fn test_type_mismatch() {
        let err = apply_binary(BinOp::Sub, text("a"), num(1.0)).unwrap_err();
        assert_eq!(err.to_string(), "cannot apply '-' to string and number");

        let err = apply_unary(UnOp::Neg, text("x")).unwrap_err();
        assert_eq!(err.to_string(), "cannot apply '-' to string");
    }

    #[test]
    fn test_comparisons() {
        let result = apply_binary(BinOp::Lt, text("apple"), text("banana")).unwrap();
        assert!(matches!(result, Value::Bool(true)));

        let result = apply_binary(BinOp::Ge, num(f64::NAN), num(1.0)).unwrap();
        assert!(matches!(result, Value::Bool(false)));

        let result = apply_binary(BinOp::Lt, num(1.0), text("2")).unwrap();
        assert!(matches!(result, Value::Bool(true)));

        let result = apply_binary(BinOp::Gt, Value::Bool(true), num(0.5)).unwrap();
        assert!(matches!(result, Value::Bool(true)));

        let result = apply_binary(BinOp::Le, Value::Undefined, num(1.0)).unwrap();
        assert!(matches!(result, Value::Bool(false)));

        let result = apply_binary(BinOp::Eq, num(5.0), text("5")).unwrap();
        assert!(matches!(result, Value::Bool(true)));

        let result = apply_binary(BinOp::Ne, text("5"), text("5.0")).unwrap();
        assert!(matches!(result, Value::Bool(true)));
    }
}
