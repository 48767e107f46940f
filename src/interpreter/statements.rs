//! Statement execution implementation
//!
//! This module handles the execution of all SanskritLang statement types:
//!
//! - `likh` print
//! - `sthapan` declarations and plain assignments
//! - `yadi`/`anyatha` conditionals (loops live in `loops`)
//! - `wapas` return and bare expression statements
//!
//! # Scoping
//!
//! Each block, loop body iteration and function call runs in a fresh child
//! scope. Function declarations are bound when their enclosing block is
//! entered, so the statement itself is a no-op when reached.
//!
//! All statement execution methods are implemented as `pub(crate)` methods
//! on the [`Interpreter`] struct.

use crate::interpreter::engine::{ControlFlow, Interpreter};
use crate::interpreter::environment::Environment;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::value::Value;
use crate::parser::ast::*;

impl<'p> Interpreter<'p, '_> {
    /// Execute statements in `env`, stopping at the first `wapas`
    pub(crate) fn execute_statements(
        &mut self,
        statements: &'p [Statement],
        env: &Environment<'p>,
    ) -> Result<ControlFlow<'p>, RuntimeError> {
        let hoisted = self.hoist_functions(statements, env);
        let result = self.execute_sequence(statements, env);
        if hoisted {
            self.retire_scope(env);
        }
        result
    }

    fn execute_sequence(
        &mut self,
        statements: &'p [Statement],
        env: &Environment<'p>,
    ) -> Result<ControlFlow<'p>, RuntimeError> {
        for stmt in statements {
            if let ControlFlow::Return(value) = self.execute_statement(stmt, env)? {
                return Ok(ControlFlow::Return(value));
            }
        }

        Ok(ControlFlow::Normal)
    }

    /// Execute a block in a new scope nested inside `parent`
    pub(crate) fn execute_block(
        &mut self,
        block: &'p Block,
        parent: &Environment<'p>,
    ) -> Result<ControlFlow<'p>, RuntimeError> {
        let scope = Environment::child(parent);
        self.execute_statements(&block.statements, &scope)
    }

    /// Execute a single statement
    pub(crate) fn execute_statement(
        &mut self,
        stmt: &'p Statement,
        env: &Environment<'p>,
    ) -> Result<ControlFlow<'p>, RuntimeError> {
        self.tick()?;
        self.set_location(stmt.location());

        match stmt {
            Statement::Print { value, .. } => {
                let value = self.evaluate(value, env)?;
                self.emit(value.to_string());
                Ok(ControlFlow::Normal)
            }

            Statement::VariableDeclaration { name, value, .. } => {
                let value = self.evaluate(value, env)?;
                env.declare(name, value)?;
                Ok(ControlFlow::Normal)
            }

            Statement::Assignment { name, value, .. } => {
                let value = self.evaluate(value, env)?;
                if env.assign(name, value) {
                    Ok(ControlFlow::Normal)
                } else {
                    Err(RuntimeError::UndefinedVariable { name: name.clone() })
                }
            }

            Statement::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => self.execute_if(condition, then_branch, else_branch.as_ref(), env),

            Statement::While {
                condition,
                body,
                location,
            } => self.execute_while(condition, body, *location, env),

            // Bound when the enclosing block was entered
            Statement::FunctionDeclaration(_) => Ok(ControlFlow::Normal),

            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr, env)?,
                    None => Value::Undefined,
                };
                Ok(ControlFlow::Return(value))
            }

            Statement::Expression { expr, .. } => {
                self.evaluate(expr, env)?;
                Ok(ControlFlow::Normal)
            }
        }
    }

    fn execute_if(
        &mut self,
        condition: &'p Expression,
        then_branch: &'p Block,
        else_branch: Option<&'p Block>,
        env: &Environment<'p>,
    ) -> Result<ControlFlow<'p>, RuntimeError> {
        if self.evaluate(condition, env)?.is_truthy() {
            self.execute_block(then_branch, env)
        } else if let Some(else_block) = else_branch {
            self.execute_block(else_block, env)
        } else {
            Ok(ControlFlow::Normal)
        }
    }
}
