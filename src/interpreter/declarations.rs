//! Conflicting declaration check
//!
//! Runs over the whole program before its first statement executes. A scope
//! may not bind one name twice with `sthapan`, nor with both `sthapan` and
//! `karya`, and a function body may not `sthapan` one of its parameters.
//! Bodies of functions that are never called are checked too.
//!
//! Two `karya` of the same name in one scope are accepted; the later one is
//! the one hoisted. A `karya` may also reuse a parameter name.

use crate::interpreter::errors::RuntimeError;
use crate::parser::ast::*;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    Variable,
    Function,
    Parameter,
}

/// A name bound twice in one scope
#[derive(Debug, Clone, PartialEq)]
pub struct Redeclaration {
    pub name: String,
    /// The second declaration
    pub location: SourceLocation,
}

impl From<Redeclaration> for RuntimeError {
    fn from(err: Redeclaration) -> Self {
        RuntimeError::AlreadyDeclared { name: err.name }
    }
}

/// Find the first conflicting declaration in source order
pub fn check_program(program: &Program) -> Result<(), Redeclaration> {
    check_scope(&program.body, &[])
}

fn check_scope(statements: &[Statement], params: &[String]) -> Result<(), Redeclaration> {
    let mut bound: FxHashMap<&str, Binding> = params
        .iter()
        .map(|param| (param.as_str(), Binding::Parameter))
        .collect();

    for stmt in statements {
        match stmt {
            Statement::VariableDeclaration { name, location, .. } => {
                if bound.insert(name, Binding::Variable).is_some() {
                    return Err(Redeclaration {
                        name: name.clone(),
                        location: *location,
                    });
                }
            }

            Statement::FunctionDeclaration(decl) => {
                if bound.get(decl.name.as_str()) == Some(&Binding::Variable) {
                    return Err(Redeclaration {
                        name: decl.name.clone(),
                        location: decl.location,
                    });
                }
                bound.insert(&decl.name, Binding::Function);
                check_scope(&decl.body.statements, &decl.params)?;
            }

            Statement::If {
                then_branch,
                else_branch,
                ..
            } => {
                check_scope(&then_branch.statements, &[])?;
                if let Some(else_block) = else_branch {
                    check_scope(&else_block.statements, &[])?;
                }
            }

            Statement::While { body, .. } => check_scope(&body.statements, &[])?,

            Statement::Print { .. }
            | Statement::Assignment { .. }
            | Statement::Return { .. }
            | Statement::Expression { .. } => {}
        }
    }

    Ok(())
}
