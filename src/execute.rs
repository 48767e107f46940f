//! Run entry points
//!
//! Ties the pipeline together: lex, parse, then either interpret or export.
//!
//! [`execute`] is the contract the IDE front ends depend on: source text in,
//! an ordered list of classified [`OutputLine`]s out. It never fails; every
//! problem becomes a single `Error` line.
//!
//! ```text
//! success:        Output* Success
//! compile error:  Error
//! runtime error:  Output* Error     (prints before the fault are kept)
//! ```
//!
//! Compiling and running happen on a dedicated worker thread with a stack
//! of [`INTERPRETER_STACK_SIZE`] bytes, so input inside the call depth and
//! nesting limits never exhausts the caller's stack.

use crate::codegen::generate;
use crate::console::{Console, OutputLine, OutputSink};
use crate::interpreter::constants::INTERPRETER_STACK_SIZE;
use crate::interpreter::{ExecutionLimits, Interpreter, RuntimeError};
use crate::parser::ast::{Program, SourceLocation};
use crate::parser::lexer::{tokenize, LexError, LexErrorKind};
use crate::parser::parse::{parse, ParseError, ParseErrorKind};
use std::{io, panic, thread};
use thiserror::Error;

/// Completion message appended after a clean run
pub const SUCCESS_MESSAGE: &str = "कोड सफलतापूर्वक निष्पादित (Code executed successfully)";

/// Lex or parse failure; nothing was executed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Console heading for a compile error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Syntax,
    UnexpectedToken,
    General,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Syntax => "वाक्यविन्यास त्रुटि (Syntax Error)",
            ErrorCategory::UnexpectedToken => "अप्रत्याशित चिह्न (Unexpected Token)",
            ErrorCategory::General => "त्रुटि (Error)",
        }
    }
}

impl CompileError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CompileError::Lex(LexError {
                kind: LexErrorKind::UnexpectedCharacter(_),
                ..
            }) => ErrorCategory::UnexpectedToken,
            CompileError::Lex(_) => ErrorCategory::General,
            CompileError::Parse(ParseError {
                kind: ParseErrorKind::Expected,
                ..
            }) => ErrorCategory::Syntax,
            CompileError::Parse(_) => ErrorCategory::General,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            CompileError::Lex(err) => err.location,
            CompileError::Parse(err) => err.location,
        }
    }

    /// The text of the console's error line
    pub fn console_message(&self) -> String {
        format!("{}: {}", self.category().label(), self)
    }
}

/// Text of the console's error line for a runtime fault
pub fn runtime_message(err: &RuntimeError) -> String {
    format!("त्रुटि (Runtime Error): {}", err)
}

/// Any failure of [`run`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecutionError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Outcome of a run, with the details the IDE highlights
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub lines: Vec<OutputLine>,

    /// Where the run failed, if it did
    pub fault_location: Option<SourceLocation>,

    /// Interpreter steps consumed
    pub steps: u64,
}

impl Report {
    pub fn succeeded(&self) -> bool {
        self.fault_location.is_none()
    }
}

/// Lex and parse `source`
pub fn compile(source: &str) -> Result<Program, CompileError> {
    let tokens = tokenize(source)?;
    Ok(parse(tokens)?)
}

/// Translate `source` into JavaScript
pub fn transpile(source: &str) -> Result<String, CompileError> {
    on_interpreter_stack(|| transpile_in_place(source))
        .unwrap_or_else(|_| transpile_in_place(source))
}

fn transpile_in_place(source: &str) -> Result<String, CompileError> {
    Ok(generate(&compile(source)?))
}

/// Run `source` with the default limits
pub fn execute(source: &str) -> Vec<OutputLine> {
    execute_with_limits(source, &ExecutionLimits::default())
}

pub fn execute_with_limits(source: &str, limits: &ExecutionLimits) -> Vec<OutputLine> {
    execute_report(source, limits).lines
}

/// Run `source` and return the classified output plus fault details
pub fn execute_report(source: &str, limits: &ExecutionLimits) -> Report {
    on_interpreter_stack(|| report_in_place(source, limits))
        .unwrap_or_else(|_| report_in_place(source, limits))
}

fn report_in_place(source: &str, limits: &ExecutionLimits) -> Report {
    let program = match compile(source) {
        Ok(program) => program,
        Err(err) => {
            return Report {
                lines: vec![OutputLine::error(err.console_message())],
                fault_location: Some(err.location()),
                steps: 0,
            };
        }
    };

    let mut console = Console::new();
    let (result, location, steps) = {
        let mut interpreter = Interpreter::new(&program, &mut console, limits.clone());
        let result = interpreter.run();
        (result, interpreter.current_location(), interpreter.steps())
    };

    let mut lines: Vec<OutputLine> = console
        .into_lines()
        .into_iter()
        .map(OutputLine::output)
        .collect();

    let fault_location = match result {
        Ok(()) => {
            lines.push(OutputLine::success(SUCCESS_MESSAGE));
            None
        }
        Err(err) => {
            lines.push(OutputLine::error(runtime_message(&err)));
            Some(location)
        }
    };

    Report {
        lines,
        fault_location,
        steps,
    }
}

/// Run `source`, streaming each print to `sink` as it happens
pub fn run(
    source: &str,
    limits: &ExecutionLimits,
    sink: &mut (dyn OutputSink + Send),
) -> Result<(), ExecutionError> {
    match on_interpreter_stack(|| run_in_place(source, limits, &mut *sink)) {
        Ok(result) => result,
        Err(_) => run_in_place(source, limits, sink),
    }
}

fn run_in_place(
    source: &str,
    limits: &ExecutionLimits,
    sink: &mut dyn OutputSink,
) -> Result<(), ExecutionError> {
    let program = compile(source)?;
    let mut interpreter = Interpreter::new(&program, sink, limits.clone());
    interpreter.run()?;
    Ok(())
}

/// Run `task` to completion on a worker thread with the interpreter's stack.
///
/// A panic on the worker is resumed on the calling thread. Fails only when
/// the thread cannot be spawned; callers then run on their own stack.
fn on_interpreter_stack<T, F>(task: F) -> io::Result<T>
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    thread::scope(|scope| {
        let worker = thread::Builder::new()
            .name("sanskritlang-interpreter".to_string())
            .stack_size(INTERPRETER_STACK_SIZE)
            .spawn_scoped(scope, task)?;

        match worker.join() {
            Ok(value) => Ok(value),
            Err(payload) => panic::resume_unwind(payload),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::OutputKind;

    #[test]
    fn test_compile_error_categories() {
        let err = compile("likh @").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::UnexpectedToken);

        let err = compile("likh \"open").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::General);

        let err = compile("5 = 3").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::General);

        let err = compile("yadi x").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Syntax);
        assert_eq!(
            err.console_message(),
            "वाक्यविन्यास त्रुटि (Syntax Error): Expected '(' after 'yadi', found identifier 'x' at line 1, column 6"
        );
    }

    #[test]
    fn test_report_fault_location() {
        let report = execute_report("likh 1\n\nlikh nope", &ExecutionLimits::default());
        assert!(!report.succeeded());
        assert_eq!(report.fault_location, Some(SourceLocation::new(3, 1)));
        assert_eq!(report.lines[0], OutputLine::output("1"));
        assert_eq!(report.lines[1].kind, OutputKind::Error);
    }

    #[test]
    fn test_run_streams_into_sink() {
        let mut console = Console::new();
        let result = run("likh 1\nlikh 2", &ExecutionLimits::default(), &mut console);
        assert!(result.is_ok());
        assert_eq!(console.lines(), ["1", "2"]);
    }

    #[test]
    fn test_worker_stack_fits_deep_recursion() {
        // Far deeper than a default test thread's stack allows
        let limits = ExecutionLimits {
            max_call_depth: 2_000,
            ..ExecutionLimits::default()
        };
        let source = "karya down(n) { yadi (n <= 0) { wapas 0 } wapas 1 + down(n - 1) }\nlikh down(1500)";
        let lines = execute_with_limits(source, &limits);
        assert_eq!(lines[0], OutputLine::output("1500"));
        assert_eq!(lines[1].kind, OutputKind::Success);
    }

    #[test]
    fn test_run_compile_error_prints_nothing() {
        let mut console = Console::new();
        let result = run("likh 1\nlikh (", &ExecutionLimits::default(), &mut console);
        assert!(matches!(result, Err(ExecutionError::Compile(_))));
        assert!(console.lines().is_empty());
    }
}
