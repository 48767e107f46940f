//! Loop statement execution (`yavat`).
//!
//! Adds the `impl Interpreter` method for the one loop form of the language.
//! A `wapas` inside the body is reported as [`LoopBodyResult::Exit`] so the
//! loop driver unwinds and hands the return value to the enclosing call.

use crate::interpreter::engine::{ControlFlow, Interpreter};
use crate::interpreter::environment::Environment;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::value::Value;
use crate::parser::ast::{Block, Expression, SourceLocation};

/// Result returned by [`Interpreter::execute_loop_body`] to signal how the body ended.
pub(crate) enum LoopBodyResult<'p> {
    /// Body ran to completion; the loop should test its condition again.
    Continue,
    /// `wapas` was executed; the loop must unwind with this value.
    Exit(Value<'p>),
}

impl<'p> Interpreter<'p, '_> {
    /// Executes `body` once inside a fresh scope.
    pub(crate) fn execute_loop_body(
        &mut self,
        body: &'p Block,
        env: &Environment<'p>,
    ) -> Result<LoopBodyResult<'p>, RuntimeError> {
        match self.execute_block(body, env)? {
            ControlFlow::Normal => Ok(LoopBodyResult::Continue),
            ControlFlow::Return(value) => Ok(LoopBodyResult::Exit(value)),
        }
    }

    /// `yavat (condition) { body }`
    ///
    /// Every iteration costs one step on top of the statements it runs, so
    /// an empty body still exhausts the budget.
    pub(crate) fn execute_while(
        &mut self,
        condition: &'p Expression,
        body: &'p Block,
        location: SourceLocation,
        env: &Environment<'p>,
    ) -> Result<ControlFlow<'p>, RuntimeError> {
        loop {
            self.tick()?;
            self.set_location(location);

            if !self.evaluate(condition, env)?.is_truthy() {
                return Ok(ControlFlow::Normal);
            }

            if let LoopBodyResult::Exit(value) = self.execute_loop_body(body, env)? {
                return Ok(ControlFlow::Return(value));
            }
        }
    }
}
