//! Lexical scope chain
//!
//! Every block and every function call gets its own [`Environment`] whose
//! parent is the enclosing scope. Lookups and assignments walk outward until
//! a binding is found; declarations only ever touch the innermost scope.
//!
//! Environments are shared (`Rc<RefCell<..>>`) because function values keep
//! the scope they were declared in alive after the block that created it has
//! finished executing.

use super::errors::RuntimeError;
use super::value::Value;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Bindings of a single scope
#[derive(Debug, Default)]
pub struct Scope<'p> {
    vars: FxHashMap<String, Value<'p>>,
    parent: Option<Environment<'p>>,
}

/// Shared handle to a scope
#[derive(Debug, Clone, Default)]
pub struct Environment<'p>(Rc<RefCell<Scope<'p>>>);

impl<'p> Environment<'p> {
    /// Create a root scope (the program's global scope)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scope nested inside `parent`
    pub fn child(parent: &Environment<'p>) -> Self {
        Environment(Rc::new(RefCell::new(Scope {
            vars: FxHashMap::default(),
            parent: Some(parent.clone()),
        })))
    }

    /// Bind a new name in this scope; fails if the name is already bound here
    pub fn declare(&self, name: &str, value: Value<'p>) -> Result<(), RuntimeError> {
        let mut scope = self.0.borrow_mut();
        if scope.vars.contains_key(name) {
            return Err(RuntimeError::AlreadyDeclared {
                name: name.to_string(),
            });
        }
        scope.vars.insert(name.to_string(), value);
        Ok(())
    }

    /// Bind a name in this scope, replacing any existing binding
    pub fn define(&self, name: &str, value: Value<'p>) {
        self.0.borrow_mut().vars.insert(name.to_string(), value);
    }

    /// Look up a name, innermost scope first
    pub fn lookup(&self, name: &str) -> Option<Value<'p>> {
        let mut current = self.clone();
        loop {
            let parent = {
                let scope = current.0.borrow();
                if let Some(value) = scope.vars.get(name) {
                    return Some(value.clone());
                }
                scope.parent.clone()?
            };
            current = parent;
        }
    }

    /// Rebind the nearest existing binding of `name`.
    ///
    /// Returns `false` when no scope in the chain binds the name.
    pub fn assign(&self, name: &str, value: Value<'p>) -> bool {
        let mut current = self.clone();
        loop {
            let parent = {
                let mut scope = current.0.borrow_mut();
                if let Some(slot) = scope.vars.get_mut(name) {
                    *slot = value;
                    return true;
                }
                match scope.parent.clone() {
                    Some(parent) => parent,
                    None => return false,
                }
            };
            current = parent;
        }
    }

    pub fn ptr_eq(&self, other: &Environment<'p>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Clear this scope when nothing outside it can reach it any more.
    ///
    /// The caller's handle must be the only one apart from the closures of
    /// functions stored in the scope itself. Returns whether it was cleared.
    pub fn release_if_unreachable(&self) -> bool {
        let internal = {
            let scope = self.0.borrow();
            let mut internal = 0;
            for value in scope.vars.values() {
                if let Value::Function(function) = value {
                    if Rc::strong_count(function) > 1 {
                        return false;
                    }
                    if function.closure.ptr_eq(self) {
                        internal += 1;
                    }
                }
            }
            internal
        };

        if Rc::strong_count(&self.0) != internal + 1 {
            return false;
        }
        self.clear();
        true
    }

    pub fn downgrade(&self) -> WeakEnvironment<'p> {
        WeakEnvironment(Rc::downgrade(&self.0))
    }

    /// Drop every binding and the parent link.
    ///
    /// A function stored in the scope it closes over forms a reference
    /// cycle; clearing the scope is what releases it.
    pub fn clear(&self) {
        let (vars, parent) = {
            let mut scope = self.0.borrow_mut();
            (std::mem::take(&mut scope.vars), scope.parent.take())
        };
        // Released after the borrow ends
        drop(vars);
        drop(parent);
    }
}

/// Non-owning handle, used to find closure scopes again at teardown
#[derive(Debug, Clone)]
pub struct WeakEnvironment<'p>(Weak<RefCell<Scope<'p>>>);

impl<'p> WeakEnvironment<'p> {
    pub fn upgrade(&self) -> Option<Environment<'p>> {
        self.0.upgrade().map(Environment)
    }

    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}
