// Copyright 2025-2026 Neil Henderson
//
//! The `definition` module emits top-level definitions: global cells, global vectors, and
//! functions.
//!
//! A simple definition is one external word cell. A vector definition is an internal array of
//! cells plus an external *header* word holding the array's word index; the vector's name
//! binds to the header, so fetching the name yields the base address and `v[i]` is ordinary
//! word arithmetic, in this module and in any other that declares `extrn v`. Initializers
//! that name other globals or string literals become word-index relocations resolved at link
//! time.
//!
//! A function is lowered in two steps: collect the body's `auto` declarations and labels up
//! front, allocate parameter and auto cells in the entry block and pre-create one block per
//! label, then emit the body. Falling off the end of a function returns 0.

use crate::ir::{GlobalInit, Linkage, Value, WordInit};
use crate::parser::ast::{AutoDecl, Definition, Ival, Statement};

use super::scope::LValue;
use super::{EmitError, EmitResult, Emitter, mangle};

impl Emitter {
    /// The declare pass: creates every global and binds every top-level name in module scope,
    /// before any body is emitted. This is what allows a function to refer to a definition
    /// later in the file.
    pub(super) fn declare_definitions(&mut self, definitions: &[Definition]) -> EmitResult<()> {
        for definition in definitions {
            match definition {
                Definition::Simple { name, init } => {
                    let symbol = mangle(name);
                    self.bind_module_name(name, &symbol)?;

                    let init = match init {
                        Some(ival) => self.ival_init(ival),
                        None => WordInit::Const(0),
                    };
                    self.builder.add_global(&symbol, Linkage::External, GlobalInit::Word(init));
                }

                Definition::Vector { name, maxidx, ivals } => {
                    let symbol = mangle(name);
                    self.bind_module_name(name, &symbol)?;

                    // SCJ: the vector's size is the maximum of maxidx+1 and the number of
                    // initializers; uninitialized cells are zero.
                    let from_maxidx = maxidx.map_or(1, |m| m.max(0) as usize + 1);
                    let cell_count = ivals.len().max(from_maxidx);

                    let mut inits: Vec<WordInit> = ivals.iter().map(|ival| self.ival_init(ival)).collect();
                    inits.resize(cell_count, WordInit::Const(0));

                    let cells_symbol = format!("{symbol}.cells");
                    self.builder.add_global(&cells_symbol, Linkage::Internal, GlobalInit::Cells(inits));
                    self.builder.add_global(
                        &symbol,
                        Linkage::External,
                        GlobalInit::Word(WordInit::WordIndexOf(cells_symbol)),
                    );
                }

                Definition::Function { name, .. } => {
                    let symbol = mangle(name);
                    self.bind_module_name(name, &symbol)?;
                }
            }
        }

        Ok(())
    }

    /// The emit pass: writes every function body. Globals were fully emitted by the declare
    /// pass.
    pub(super) fn emit_definitions(&mut self, definitions: &[Definition]) -> EmitResult<()> {
        for definition in definitions {
            if let Definition::Function { name, params, body } = definition {
                self.emit_function(name, params, body)?;
            }
        }

        Ok(())
    }

    fn bind_module_name(&mut self, name: &str, symbol: &str) -> EmitResult<()> {
        self.scopes.define_module(name, LValue { address: Value::Symbol(symbol.to_string()) })
    }

    /// Lowers a definition initializer to a word initializer.
    fn ival_init(&mut self, ival: &Ival) -> WordInit {
        match ival {
            Ival::Const(value) => WordInit::Const(self.builder.target().truncate(*value)),
            Ival::Name(name) => WordInit::WordIndexOf(mangle(name)),
            Ival::Str(bytes) => WordInit::WordIndexOf(self.string_constant(bytes)),
        }
    }

    /// The lvalue for an `extrn` name: the module's own definition if there is one, otherwise
    /// an external word-cell declaration resolved at link time.
    pub(super) fn extrn_lvalue(&mut self, name: &str) -> LValue {
        if let Some(lvalue) = self.scopes.lookup_module(name) {
            return lvalue.clone();
        }

        let symbol = mangle(name);
        self.builder.declare_external(&symbol);
        LValue { address: Value::Symbol(symbol) }
    }

    fn emit_function(&mut self, name: &str, params: &[String], body: &Statement) -> EmitResult<()> {
        self.builder.begin_function(&mangle(name), params.len());
        self.scopes.push();
        self.labels.clear();

        let result = self.emit_function_body(params, body);

        self.scopes.pop();
        result
    }

    fn emit_function_body(&mut self, params: &[String], body: &Statement) -> EmitResult<()> {
        // Parameters become stack cells initialized from the incoming values, so a parameter
        // is an ordinary lvalue (`&arg` works, `arg = x` works).
        for (index, param) in params.iter().enumerate() {
            let cell = self.builder.alloca(1);
            self.builder.store(cell.clone(), Value::Param(index as u32));
            self.scopes.define(param, LValue { address: cell })?;
        }

        // Pre-pass: every auto in the body gets its cell in the entry block and its binding
        // in the function scope.
        let mut autos = Vec::new();
        collect_autos(body, &mut autos);

        for decl in autos {
            let cell = match decl.maxidx {
                None => self.builder.alloca(1),

                // An auto vector allocates maxidx+1 cells of storage plus the variable's own
                // cell, which holds the storage's word index.
                Some(maxidx) => {
                    let cells = maxidx.max(0) as usize + 1;
                    let storage = self.builder.alloca(cells);
                    let cell = self.builder.alloca(1);
                    self.builder.store(cell.clone(), storage);
                    cell
                }
            };
            self.scopes.define(&decl.name, LValue { address: cell })?;
        }

        // Pre-pass: one block per label, so forward `goto`s resolve.
        let mut label_names = Vec::new();
        collect_labels(body, &mut label_names);

        for label in label_names {
            if self.labels.contains_key(label) {
                return Err(EmitError::DuplicateDefinition(label.to_string()));
            }
            let block = self.builder.new_block(&format!("{label}."));
            self.labels.insert(label.to_string(), block);
        }

        self.emit_statement(body)?;

        // Control reaching the natural end of the body returns 0; finish_function closes any
        // remaining unreachable continuation blocks the same way.
        if !self.builder.is_terminated() {
            self.builder.ret(Value::Const(0));
        }
        self.builder.finish_function();

        Ok(())
    }
}

/// Collects every `auto` declaration in a function body, in source order.
fn collect_autos<'a>(stmt: &'a Statement, out: &mut Vec<&'a AutoDecl>) {
    match stmt {
        Statement::Auto { decls, stmt } => {
            out.extend(decls.iter());
            collect_autos(stmt, out);
        }

        Statement::Compound(stmts) => {
            for stmt in stmts {
                collect_autos(stmt, out);
            }
        }

        Statement::If { then_stmt, else_stmt, .. } => {
            collect_autos(then_stmt, out);
            if let Some(else_stmt) = else_stmt {
                collect_autos(else_stmt, out);
            }
        }

        Statement::While { body, .. } => collect_autos(body, out),

        Statement::Switch { body, .. } => collect_autos(body, out),

        Statement::Label { stmt, .. } | Statement::Case { stmt, .. } | Statement::Extrn { stmt, .. } => {
            collect_autos(stmt, out);
        }

        Statement::Return(_)
        | Statement::Break
        | Statement::Goto(_)
        | Statement::Expression(_)
        | Statement::Null => (),
    }
}

/// Collects every label declared in a function body, in source order.
fn collect_labels<'a>(stmt: &'a Statement, out: &mut Vec<&'a str>) {
    match stmt {
        Statement::Label { name, stmt } => {
            out.push(name);
            collect_labels(stmt, out);
        }

        Statement::Compound(stmts) => {
            for stmt in stmts {
                collect_labels(stmt, out);
            }
        }

        Statement::If { then_stmt, else_stmt, .. } => {
            collect_labels(then_stmt, out);
            if let Some(else_stmt) = else_stmt {
                collect_labels(else_stmt, out);
            }
        }

        Statement::While { body, .. } => collect_labels(body, out),

        Statement::Switch { body, .. } => collect_labels(body, out),

        Statement::Case { stmt, .. } | Statement::Auto { stmt, .. } | Statement::Extrn { stmt, .. } => {
            collect_labels(stmt, out);
        }

        Statement::Return(_)
        | Statement::Break
        | Statement::Goto(_)
        | Statement::Expression(_)
        | Statement::Null => (),
    }
}
