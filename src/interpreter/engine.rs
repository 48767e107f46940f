// Execution engine for the SanskritLang interpreter

use crate::console::OutputSink;
use crate::interpreter::constants::{
    DEFAULT_MAX_CALL_DEPTH, DEFAULT_MAX_STEPS, TIME_CHECK_INTERVAL,
};
use crate::interpreter::declarations::check_program;
use crate::interpreter::environment::{Environment, WeakEnvironment};
use crate::interpreter::errors::{ResourceExhausted, RuntimeError};
use crate::interpreter::value::{Function, Value};
use crate::parser::ast::*;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Budget applied to a single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionLimits {
    /// Statements, loop iterations and calls allowed
    pub max_steps: u64,

    /// Maximum number of nested active calls
    pub max_call_depth: usize,

    /// Optional wall-clock limit.
    ///
    /// The clock is read on the first step and then every
    /// `TIME_CHECK_INTERVAL` steps, so a run can overshoot the limit by up to
    /// that many steps.
    pub time_limit: Option<Duration>,
}

impl Default for ExecutionLimits {
    fn default() -> Self {
        ExecutionLimits {
            max_steps: DEFAULT_MAX_STEPS,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            time_limit: None,
        }
    }
}

/// How a statement sequence finished
#[derive(Debug)]
pub(crate) enum ControlFlow<'p> {
    Normal,
    Return(Value<'p>),
}

/// The tree-walking interpreter for one parsed program
///
/// `'p` is the lifetime of the borrowed [`Program`]; function values point
/// straight into its declarations. `'s` is the borrow of the output sink.
pub struct Interpreter<'p, 's> {
    program: &'p Program,

    /// Receives the text of every `likh`
    sink: &'s mut dyn OutputSink,

    limits: ExecutionLimits,

    /// Program-level scope
    globals: Environment<'p>,

    /// Budget units consumed so far
    steps: u64,

    /// Number of active function calls
    call_depth: usize,

    /// Set when `run` starts
    started: Instant,

    /// Location of the statement being executed
    current_location: SourceLocation,

    /// Scopes whose functions outlived their block, released on drop
    closure_scopes: Vec<WeakEnvironment<'p>>,
}

impl<'p, 's> Interpreter<'p, 's> {
    /// Create an interpreter for `program` writing to `sink`
    pub fn new(program: &'p Program, sink: &'s mut dyn OutputSink, limits: ExecutionLimits) -> Self {
        Interpreter {
            program,
            sink,
            limits,
            globals: Environment::new(),
            steps: 0,
            call_depth: 0,
            started: Instant::now(),
            current_location: SourceLocation::new(1, 1),
            closure_scopes: Vec::new(),
        }
    }

    /// Run the program from start to finish
    ///
    /// Conflicting declarations anywhere in the program fail the run before
    /// the first statement. A top-level `wapas` ends the program normally.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        self.started = Instant::now();
        self.steps = 0;
        self.call_depth = 0;

        let program = self.program;
        if let Err(redeclaration) = check_program(program) {
            self.current_location = redeclaration.location;
            return Err(redeclaration.into());
        }

        let globals = self.globals.clone();
        match self.execute_statements(&program.body, &globals)? {
            ControlFlow::Normal | ControlFlow::Return(_) => Ok(()),
        }
    }

    /// Location of the statement executing (or last executed)
    pub fn current_location(&self) -> SourceLocation {
        self.current_location
    }

    /// Budget units consumed by the last run
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub(crate) fn set_location(&mut self, location: SourceLocation) {
        self.current_location = location;
    }

    pub(crate) fn emit(&mut self, text: String) {
        self.sink.print(text);
    }

    /// Consume one unit of the step budget
    pub(crate) fn tick(&mut self) -> Result<(), RuntimeError> {
        self.steps += 1;
        if self.steps > self.limits.max_steps {
            return Err(ResourceExhausted::Steps {
                limit: self.limits.max_steps,
            }
            .into());
        }

        if let Some(limit) = self.limits.time_limit {
            let due = self.steps == 1 || self.steps % TIME_CHECK_INTERVAL == 0;
            if due && self.started.elapsed() >= limit {
                return Err(ResourceExhausted::Time { limit }.into());
            }
        }

        Ok(())
    }

    /// Bind every function declared directly in `statements` into `env`.
    ///
    /// Runs before the first statement of a block, so functions can be
    /// called above their declaration. A later declaration of the same name
    /// replaces an earlier one. Returns whether anything was bound.
    pub(crate) fn hoist_functions(&self, statements: &'p [Statement], env: &Environment<'p>) -> bool {
        let mut hoisted = false;

        for stmt in statements {
            if let Statement::FunctionDeclaration(decl) = stmt {
                let function = Function {
                    decl,
                    closure: env.clone(),
                };
                env.define(&decl.name, Value::Function(Rc::new(function)));
                hoisted = true;
            }
        }

        hoisted
    }

    /// Called when a scope that hoisted functions has finished executing.
    ///
    /// The scope and its functions reference each other. Unless one of them
    /// escaped, the cycle is broken right away; otherwise the scope is kept
    /// for teardown. Tracked scopes that have become unreachable since are
    /// pruned whenever the list would grow.
    pub(crate) fn retire_scope(&mut self, env: &Environment<'p>) {
        if env.release_if_unreachable() {
            return;
        }

        if self.closure_scopes.len() == self.closure_scopes.capacity() {
            self.closure_scopes.retain(|weak| match weak.upgrade() {
                Some(scope) => !scope.release_if_unreachable(),
                None => false,
            });
        }
        self.closure_scopes.push(env.downgrade());
    }

    /// Invoke a function value with already-evaluated arguments
    ///
    /// Missing arguments are `undefined`; extra arguments are ignored.
    pub(crate) fn call_function(
        &mut self,
        function: &Function<'p>,
        args: Vec<Value<'p>>,
    ) -> Result<Value<'p>, RuntimeError> {
        if self.call_depth >= self.limits.max_call_depth {
            return Err(ResourceExhausted::CallDepth {
                limit: self.limits.max_call_depth,
            }
            .into());
        }
        self.tick()?;

        let decl: &'p FunctionDecl = function.decl;
        let scope = Environment::child(&function.closure);

        let mut args = args.into_iter();
        for param in &decl.params {
            scope.define(param, args.next().unwrap_or(Value::Undefined));
        }

        self.call_depth += 1;
        let result = self.execute_statements(&decl.body.statements, &scope);
        self.call_depth -= 1;

        match result? {
            ControlFlow::Return(value) => Ok(value),
            ControlFlow::Normal => Ok(Value::Undefined),
        }
    }
}

impl Drop for Interpreter<'_, '_> {
    fn drop(&mut self) {
        for weak in self.closure_scopes.drain(..) {
            if let Some(env) = weak.upgrade() {
                env.clear();
            }
        }
        self.globals.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Console;
    use crate::parser::{parse, tokenize};

    fn run_with(source: &str, limits: ExecutionLimits) -> (Vec<String>, Result<(), RuntimeError>) {
        let program = parse(tokenize(source).unwrap()).unwrap();
        let mut console = Console::new();
        let result = {
            let mut interpreter = Interpreter::new(&program, &mut console, limits);
            interpreter.run()
        };
        (console.into_lines(), result)
    }

    #[test]
    fn test_step_budget_stops_infinite_loop() {
        let limits = ExecutionLimits {
            max_steps: 500,
            ..ExecutionLimits::default()
        };
        let (_, result) = run_with("yavat (1) { }", limits);
        assert_eq!(
            result,
            Err(RuntimeError::ResourceExhausted(ResourceExhausted::Steps { limit: 500 }))
        );
    }

    #[test]
    fn test_zero_time_limit_stops_first_step() {
        let limits = ExecutionLimits {
            time_limit: Some(Duration::ZERO),
            ..ExecutionLimits::default()
        };
        let (lines, result) = run_with("likh 1\nlikh 2", limits);
        assert_eq!(
            result,
            Err(RuntimeError::ResourceExhausted(ResourceExhausted::Time {
                limit: Duration::ZERO
            }))
        );
        assert!(lines.is_empty());
    }

    #[test]
    fn test_generous_time_limit_allows_run() {
        let limits = ExecutionLimits {
            time_limit: Some(Duration::from_secs(60)),
            ..ExecutionLimits::default()
        };
        let (lines, result) = run_with("sthapan i = 0\nyavat (i < 3000) { i = i + 1 }\nlikh i", limits);
        assert!(result.is_ok());
        assert_eq!(lines, vec!["3000"]);
    }

    #[test]
    fn test_call_depth_limit() {
        let limits = ExecutionLimits {
            max_call_depth: 16,
            ..ExecutionLimits::default()
        };
        let (_, result) = run_with("karya f(n) { wapas f(n + 1) }\nf(0)", limits);
        assert_eq!(
            result,
            Err(RuntimeError::ResourceExhausted(ResourceExhausted::CallDepth { limit: 16 }))
        );
    }

    #[test]
    fn test_top_level_return_ends_program() {
        let (lines, result) = run_with("likh 1\nwapas 0\nlikh 2", ExecutionLimits::default());
        assert!(result.is_ok());
        assert_eq!(lines, vec!["1"]);
    }

    #[test]
    fn test_redeclaration_fails_before_any_output() {
        let program = parse(tokenize("likh 1\nsthapan x = 1\nsthapan x = 2").unwrap()).unwrap();
        let mut console = Console::new();
        let result = {
            let mut interpreter = Interpreter::new(&program, &mut console, ExecutionLimits::default());
            let result = interpreter.run();
            assert_eq!(interpreter.current_location(), SourceLocation::new(3, 1));
            assert_eq!(interpreter.steps(), 0);
            result
        };
        assert_eq!(
            result,
            Err(RuntimeError::AlreadyDeclared {
                name: "x".to_string()
            })
        );
        assert!(console.lines().is_empty());
    }

    #[test]
    fn test_loop_scopes_with_functions_are_released() {
        let source = "sthapan i = 0\nyavat (i < 200) {\n  karya twice(n) { wapas n * 2 }\n  likh twice(i)\n  i = i + 1\n}";
        let program = parse(tokenize(source).unwrap()).unwrap();
        let mut console = Console::new();
        let mut interpreter = Interpreter::new(&program, &mut console, ExecutionLimits::default());
        assert!(interpreter.run().is_ok());
        assert!(interpreter.closure_scopes.is_empty());
    }

    #[test]
    fn test_escaped_closures_are_pruned_once_unreachable() {
        let source = "sthapan keep = 0\nsthapan i = 0\nyavat (i < 100) {\n  karya g() { wapas i }\n  keep = g\n  i = i + 1\n}\nlikh keep()";
        let program = parse(tokenize(source).unwrap()).unwrap();
        let mut console = Console::new();
        let mut interpreter = Interpreter::new(&program, &mut console, ExecutionLimits::default());
        assert!(interpreter.run().is_ok());
        // Only the most recent scope is still reachable through `keep`
        let live = interpreter
            .closure_scopes
            .iter()
            .filter(|weak| weak.is_alive())
            .count();
        assert!(live < 100, "{} scopes still tracked", live);
        drop(interpreter);
        assert_eq!(console.lines(), ["100"]);
    }

    #[test]
    fn test_fault_location_is_tracked() {
        let program = parse(tokenize("likh 1\nlikh missing").unwrap()).unwrap();
        let mut console = Console::new();
        let mut interpreter = Interpreter::new(&program, &mut console, ExecutionLimits::default());
        assert!(interpreter.run().is_err());
        assert_eq!(interpreter.current_location(), SourceLocation::new(2, 1));
    }
}
