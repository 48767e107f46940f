// Execution budget defaults for the SanskritLang interpreter

/// Statements, loop iterations and calls allowed per run
pub const DEFAULT_MAX_STEPS: u64 = 1_000_000;

/// Maximum nesting of active function calls
pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

/// Stack reserved for the thread a program runs on.
/// Sized for the default call depth with every frame evaluating an
/// expression at the parser's nesting limit.
pub const INTERPRETER_STACK_SIZE: usize = 256 * 1024 * 1024;

/// After the first step, the wall clock is only consulted every this many steps
pub const TIME_CHECK_INTERVAL: u64 = 1024;
