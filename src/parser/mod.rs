//! SanskritLang source code parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), split across `statements` and
//!   `expressions`
//! - [`ast`]: AST node definitions
//!
//! # Language Surface
//!
//! - `likh` print, `sthapan` declare, `yadi`/`anyatha` if/else, `yavat` while
//! - `karya` function, `wapas` return
//! - `aur`/`ya`/`nahi` logical and/or/not (`&&`, `||`, `!` also accepted)
//! - Numbers, single- or double-quoted strings, `//` line comments
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one method per precedence level.
//! No external parser generator dependencies.

pub mod ast;
pub mod lexer;
pub mod parse;

mod expressions;
mod statements;

pub use lexer::tokenize;
pub use parse::parse;
