//! # Introduction
//!
//! SanskritLang is a small teaching language whose keywords are romanized
//! Sanskrit words (`likh` print, `sthapan` declare, `yadi` if, `yavat` while,
//! `karya` function, `wapas` return). This crate lexes and parses the
//! language, runs programs with a tree-walking interpreter under an execution
//! budget, and can export a program as JavaScript.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Interpreter → OutputLines
//!                               ↘ Code generator → JavaScript
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds an AST.
//! 2. [`interpreter`]: walks the AST against a chain of scopes, writing every
//!    print to an [`console::OutputSink`].
//! 3. [`codegen`]: pure JavaScript export of a parsed program.
//! 4. [`execute`]: the classified-output entry points used by front ends.
//! 5. [`gallery`]: built-in example programs.
//! 6. [`ui`]: ratatui-based terminal IDE; not part of the stable library API.
//!
//! ## Quick start
//!
//! ```
//! use sanskritlang::console::OutputKind;
//!
//! let lines = sanskritlang::execute("sthapan x = 10\nlikh x * 2");
//! assert_eq!(lines[0].text, "20");
//! assert_eq!(lines[1].kind, OutputKind::Success);
//! ```

pub mod codegen;
pub mod console;
pub mod execute;
pub mod gallery;
pub mod interpreter;
pub mod parser;
pub mod ui;

pub use execute::{
    compile, execute, execute_report, execute_with_limits, run, transpile, CompileError,
    ExecutionError, Report,
};
pub use interpreter::ExecutionLimits;
