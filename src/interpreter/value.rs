//! Runtime value representation
//!
//! This module defines the [`Value`] enum, which represents all possible
//! runtime values of a SanskritLang program. The language is untyped; every
//! operator checks the variants it receives.
//!
//! # Value Types
//!
//! - [`Value::Number`]: 64-bit float, the only numeric type
//! - [`Value::Str`]: immutable shared string
//! - [`Value::Bool`]: result of comparisons and `nahi`
//! - [`Value::Undefined`]: missing argument, function without `wapas`
//! - [`Value::Function`]: a `karya` declaration closed over its scope
//!
//! # Printing
//!
//! [`Value`]'s `Display` is the text `likh` writes. Numbers follow the usual
//! scripting-host conventions: integral values print without a fractional
//! part, magnitudes at or above `1e21` or below `1e-6` switch to exponent
//! form (`1e+21`, `1.5e-7`).

use super::environment::Environment;
use crate::parser::ast::FunctionDecl;
use std::fmt;
use std::rc::Rc;

/// Runtime values in the interpreter
#[derive(Debug, Clone)]
pub enum Value<'p> {
    Number(f64),
    Str(Rc<str>),
    Bool(bool),
    Undefined,
    Function(Rc<Function<'p>>),
}

/// A callable: the declaration plus the scope it was declared in
pub struct Function<'p> {
    pub decl: &'p FunctionDecl,
    pub closure: Environment<'p>,
}

// The closure can reach this function again; print the name only.
impl fmt::Debug for Function<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.decl.name)
            .field("params", &self.decl.params)
            .finish_non_exhaustive()
    }
}

impl<'p> Value<'p> {
    /// Falsy values: `false`, `0`, `NaN`, `""` and `undefined`
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Bool(b) => *b,
            Value::Undefined => false,
            Value::Function(_) => true,
        }
    }

    /// Type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Undefined => "undefined",
            Value::Function(_) => "function",
        }
    }

    /// `==` of the scripting host.
    ///
    /// Booleans convert to `0`/`1` and a string met by a number converts to
    /// a number; other mixes fall back to [`Value::strict_equals`].
    pub fn loose_equals(&self, other: &Value<'p>) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Str(b)) => *a == string_to_number(b),
            (Value::Str(a), Value::Number(b)) => string_to_number(a) == *b,
            (Value::Bool(a), _) => Value::Number(bool_to_number(*a)).loose_equals(other),
            (_, Value::Bool(b)) => self.loose_equals(&Value::Number(bool_to_number(*b))),
            _ => self.strict_equals(other),
        }
    }

    /// Equality without coercion: different variants are never equal
    pub fn strict_equals(&self, other: &Value<'p>) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Undefined, Value::Undefined) => true,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric conversion used by relational comparison; functions have none
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Str(s) => Some(string_to_number(s)),
            Value::Bool(b) => Some(bool_to_number(*b)),
            Value::Undefined => Some(f64::NAN),
            Value::Function(_) => None,
        }
    }
}

fn bool_to_number(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Read a string as a number the way the scripting host does.
///
/// Surrounding whitespace is ignored and a blank string is `0`. Decimal
/// literals, `Infinity` and `0x`/`0o`/`0b` integers are accepted; anything
/// else is `NaN`.
pub fn string_to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        if digits.is_empty() {
            return f64::NAN;
        }
        return digits
            .chars()
            .try_fold(0.0, |acc: f64, c| {
                c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
            })
            .unwrap_or(f64::NAN);
    }

    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if unsigned == "Infinity" {
        return if trimmed.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    // Rust also parses "inf" and "NaN"; the host does not
    let numeric = unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !numeric {
        return f64::NAN;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Undefined => f.write_str("undefined"),
            Value::Function(func) => write!(f, "[karya {}]", func.decl.name),
        }
    }
}

/// Format a number the way the scripting host prints it.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        // Covers negative zero as well
        return "0".to_string();
    }

    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{}", n);
    }

    let exp_form = format!("{:e}", n);
    match exp_form.split_once('e') {
        Some((mantissa, exponent)) if exponent.starts_with('-') => {
            format!("{}e{}", mantissa, exponent)
        }
        Some((mantissa, exponent)) => format!("{}e+{}", mantissa, exponent),
        None => exp_form,
    }
}
