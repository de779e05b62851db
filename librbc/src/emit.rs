// Copyright 2025-2026 Neil Henderson
//
//! The `emit` module lowers the B AST into the LLIR.
//!
//! This is where B's typeless, word-oriented semantics meet the typed world: the emitter keeps
//! a single invariant — every address is a word index — and sorts each expression into one of
//! two shapes as it walks the tree. An *lvalue* is the address of a word of storage; an
//! *rvalue* is a word. Names resolve to lvalues through the scope stack, `*e` turns any word
//! into an lvalue, `&e` turns an lvalue back into its address, and every other operator works
//! on fetched rvalues.
//!
//! Name resolution is lazy: the whole module scope is populated by a declare pass before any
//! function body is emitted, so a body may freely refer to definitions later in the file.
//!
//! Every B-visible symbol is mangled with the `b.` prefix, which is not a valid C identifier,
//! so B and C can never collide at link time. The runtime is reached purely through such
//! mangled externals.

mod definition;
mod expression;
mod scope;
mod statement;

#[cfg(test)]
mod tests;

use std::collections::{HashMap, VecDeque};

use thiserror::Error;

use crate::core::{Target, Word};
use crate::ir::{self, BlockId, Builder, GlobalInit, Linkage};
use crate::parser::ast;

use scope::ScopeStack;

/// An error produced during emission.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EmitError {
    /// The same name defined twice in one scope.
    #[error("'{0}' is defined more than once")]
    DuplicateDefinition(String),

    /// A name that no scope resolves at emit time.
    #[error("undefined name '{0}'")]
    UndefinedName(String),

    /// `&` or an assignment target applied to an expression with no storage location.
    #[error("expression does not designate a storage location")]
    NotAnLValue,

    /// `break` with no enclosing loop or switch.
    #[error("'break' outside of a loop or switch")]
    BreakOutsideLoop,

    /// `case` or `default` outside of a switch body.
    #[error("'case' outside of a switch")]
    CaseOutsideSwitch,

    /// More than one `default` in a single switch.
    #[error("more than one 'default' in a switch")]
    DuplicateDefault,

    /// `goto` whose operand names no label of the current function.
    #[error("goto target '{0}' is not a label in the current function")]
    GotoTargetUnknown(String),

    /// `goto` whose operand is not a name expression.
    #[error("goto target must be a label name")]
    GotoTargetNotAName,

    /// An emitter invariant violation.
    #[error("internal error: {0}")]
    Internal(String),
}

/// The result type returned by emission functions.
pub type EmitResult<T> = Result<T, EmitError>;

/// Mangles a B-visible global symbol. The `b.` prefix keeps the B and C namespaces disjoint;
/// this function is the only place the convention lives.
pub fn mangle(name: &str) -> String {
    format!("b.{name}")
}

/// The builtin name which evaluates to the target's bytes-per-word.
const BYTES_PER_WORD_BUILTIN: &str = "__bytes_per_word";

/// Emits a whole program into a fresh LLIR module.
///
/// Emission is two passes over the definitions: the declare pass creates every global and
/// binds every name in module scope; the emit pass then writes the function bodies. The
/// declare pass is what lets a body call a function defined later in the file.
pub fn emit_program(program: &ast::Program, target: Target, module_name: &str) -> EmitResult<ir::Module> {
    let mut emitter = Emitter::new(target, module_name);

    emitter.declare_definitions(&program.0)?;
    emitter.emit_definitions(&program.0)?;

    Ok(emitter.builder.finish())
}

/// The mutable state threaded through emission of one translation unit.
pub struct Emitter {
    builder: Builder,
    scopes: ScopeStack,

    // Anonymous string constants, deduplicated by content.
    strings: HashMap<Vec<u8>, String>,
    next_string_index: usize,

    // Per-function state: pre-created label blocks, `break` targets (innermost last), and the
    // pre-collected case queue of each switch being emitted.
    labels: HashMap<String, BlockId>,
    break_targets: Vec<BlockId>,
    switch_cases: Vec<VecDeque<(Option<Word>, BlockId)>>,
}

impl Emitter {
    fn new(target: Target, module_name: &str) -> Self {
        Self {
            builder: Builder::new(module_name, target),
            scopes: ScopeStack::new(),
            strings: HashMap::new(),
            next_string_index: 0,
            labels: HashMap::new(),
            break_targets: Vec::new(),
            switch_cases: Vec::new(),
        }
    }

    /// The word index symbol of an anonymous read-only global holding `bytes`.
    ///
    /// Identical strings share one constant.
    fn string_constant(&mut self, bytes: &[u8]) -> String {
        if let Some(symbol) = self.strings.get(bytes) {
            return symbol.clone();
        }

        let symbol = format!(".str.{}", self.next_string_index);
        self.next_string_index += 1;

        self.builder.add_global(&symbol, Linkage::Internal, GlobalInit::Bytes(bytes.to_vec()));
        self.strings.insert(bytes.to_vec(), symbol.clone());

        symbol
    }
}
