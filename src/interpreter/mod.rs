//! SanskritLang tree-walking interpreter
//!
//! This module provides the core execution logic:
//! - [`engine`]: Main interpreter, execution limits and function calls
//! - [`errors`]: Runtime error types
//! - [`value`]: Runtime values and number formatting
//! - [`environment`]: Lexical scope chain
//! - [`declarations`]: Conflicting declaration check, run before execution
//!
//! # Execution Model
//!
//! The interpreter walks the AST directly. Each block gets a child scope,
//! function declarations are hoisted to the top of their block, and every
//! function value closes over the scope it was declared in.
//!
//! Statements, loop iterations and calls each consume one step of the
//! [`engine::ExecutionLimits`] budget; running out is a runtime error like
//! any other.

pub mod constants;
pub mod declarations;
pub mod engine;
pub mod environment;
pub mod errors;
pub mod value;

mod expressions;
mod loops;
mod statements;

pub use engine::{ExecutionLimits, Interpreter};
pub use errors::{ResourceExhausted, RuntimeError};
pub use value::{format_number, Value};
