// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `scope` module defines the name-to-lvalue scope stack.
//!
//! Scopes nest: the bottom scope is the module scope, a function pushes a scope for its
//! parameters and autos, and each compound statement pushes another. Lookup searches from the
//! innermost scope outward. Binding the same name twice in one scope is an error.

use std::collections::HashMap;

use crate::ir::Value;

use super::{EmitError, EmitResult};

/// A handle to a word of storage: the storage's address as a word index.
///
/// Fetching an lvalue loads from the address; storing writes to it; `&` yields the address
/// itself.
#[derive(Debug, Clone, PartialEq)]
pub struct LValue {
    pub address: Value,
}

/// The stack of name scopes. The first scope is the module scope and is never popped.
pub(super) struct ScopeStack {
    scopes: Vec<HashMap<String, LValue>>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self { scopes: vec![HashMap::new()] }
    }

    /// Enters a child scope.
    pub fn push(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Leaves the innermost scope, dropping its bindings.
    pub fn pop(&mut self) {
        debug_assert!(self.scopes.len() > 1, "the module scope is never popped");
        self.scopes.pop();
    }

    /// Binds a name in the innermost scope.
    pub fn define(&mut self, name: &str, lvalue: LValue) -> EmitResult<()> {
        let innermost = self.scopes.last_mut().expect("at least the module scope exists");

        if innermost.contains_key(name) {
            return Err(EmitError::DuplicateDefinition(name.to_string()));
        }

        innermost.insert(name.to_string(), lvalue);
        Ok(())
    }

    /// Binds a name in the module scope.
    pub fn define_module(&mut self, name: &str, lvalue: LValue) -> EmitResult<()> {
        if self.scopes[0].contains_key(name) {
            return Err(EmitError::DuplicateDefinition(name.to_string()));
        }

        self.scopes[0].insert(name.to_string(), lvalue);
        Ok(())
    }

    /// Resolves a name, searching from the innermost scope outward.
    pub fn lookup(&self, name: &str) -> Option<&LValue> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Resolves a name in the module scope only.
    pub fn lookup_module(&self, name: &str) -> Option<&LValue> {
        self.scopes[0].get(name)
    }
}
