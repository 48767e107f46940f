//! Runtime error types for the SanskritLang interpreter
//!
//! This module defines [`RuntimeError`], which represents all errors that can
//! occur during program execution (as opposed to lex or parse errors).
//!
//! All runtime errors are fatal: they halt execution. Output printed before
//! the fault is kept. Messages carry no source position; the interpreter
//! tracks the faulting statement separately.

use std::time::Duration;
use thiserror::Error;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Read of, or assignment to, a name with no binding in scope
    #[error("{name} is not defined")]
    UndefinedVariable { name: String },

    /// `sthapan` of a name already bound in the same scope
    #[error("Identifier '{name}' has already been declared")]
    AlreadyDeclared { name: String },

    /// Call of a value that is not a function
    #[error("{callee} is not a function")]
    NotCallable { callee: String },

    /// Binary operator applied to operands of unsupported types
    #[error("cannot apply '{op}' to {left} and {right}")]
    TypeMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    /// Unary operator applied to an operand of an unsupported type
    #[error("cannot apply '{op}' to {operand}")]
    InvalidOperand {
        op: &'static str,
        operand: &'static str,
    },

    /// The execution budget ran out
    #[error(transparent)]
    ResourceExhausted(#[from] ResourceExhausted),
}

/// Budget violations, surfaced like any other runtime error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceExhausted {
    #[error("step limit of {limit} exceeded (possible infinite loop)")]
    Steps { limit: u64 },

    #[error("maximum call depth of {limit} exceeded")]
    CallDepth { limit: usize },

    #[error("time limit of {} ms exceeded", .limit.as_millis())]
    Time { limit: Duration },
}
