// Copyright 2025-2026 Neil Henderson
//
//! The `statement` module lowers B statements.
//!
//! Control flow becomes blocks and branches. `return`, `goto` and `break` terminate the
//! current block and emission continues in a fresh, unreachable continuation block, so the
//! statements after them still emit without disturbing the terminated block.
//!
//! A switch is emitted from a pre-pass: the case constants of its body are collected in
//! source order (not descending into nested switches), the dispatch compares the controlling
//! word against each constant in that order, and the body then emits with every case statement
//! starting its pre-created block. Nothing is inserted at case boundaries: B cases are labels,
//! and fall-through is the default.

use std::collections::VecDeque;

use crate::core::Word;
use crate::ir::{BlockId, CmpOp, Value};
use crate::parser::ast::{Expression, Statement};

use super::{EmitError, EmitResult, Emitter};

impl Emitter {
    pub(super) fn emit_statement(&mut self, stmt: &Statement) -> EmitResult<()> {
        match stmt {
            Statement::Compound(stmts) => {
                self.scopes.push();
                let result = stmts.iter().try_for_each(|stmt| self.emit_statement(stmt));
                self.scopes.pop();
                result
            }

            Statement::If { cond, then_stmt, else_stmt } => self.emit_if(cond, then_stmt, else_stmt.as_deref()),

            Statement::While { cond, body } => self.emit_while(cond, body),

            Statement::Return(value) => {
                let value = match value {
                    Some(expr) => self.rvalue(expr)?,
                    None => Value::Const(0),
                };
                self.builder.ret(value);
                self.continue_unreachable("post.return");
                Ok(())
            }

            Statement::Break => {
                let Some(target) = self.break_targets.last().copied() else {
                    return Err(EmitError::BreakOutsideLoop);
                };
                self.builder.branch(target);
                self.continue_unreachable("post.break");
                Ok(())
            }

            Statement::Goto(target) => self.emit_goto(target),

            Statement::Label { name, stmt } => {
                let Some(block) = self.labels.get(name).copied() else {
                    return Err(EmitError::Internal(format!("label '{name}' missed by the pre-pass")));
                };

                if !self.builder.is_terminated() {
                    self.builder.branch(block);
                }
                self.builder.position_at_end(block);

                self.emit_statement(stmt)
            }

            Statement::Switch { cond, body } => self.emit_switch(cond, body),

            Statement::Case { value, stmt } => self.emit_case(*value, stmt),

            // Auto storage was allocated and bound by the function pre-pass; only the body
            // remains.
            Statement::Auto { stmt, .. } => self.emit_statement(stmt),

            Statement::Extrn { names, stmt } => {
                for name in names {
                    let lvalue = self.extrn_lvalue(name);
                    self.scopes.define(name, lvalue)?;
                }
                self.emit_statement(stmt)
            }

            Statement::Expression(expr) => {
                _ = self.rvalue(expr)?;
                Ok(())
            }

            Statement::Null => Ok(()),
        }
    }

    fn emit_if(&mut self, cond: &Expression, then_stmt: &Statement, else_stmt: Option<&Statement>) -> EmitResult<()> {
        let truth = self.truth_value(cond)?;

        let then_block = self.builder.new_block("if.then");
        let end_block = self.builder.new_block("if.end");

        match else_stmt {
            None => {
                self.builder.cond_branch(truth, then_block, end_block);

                self.builder.position_at_end(then_block);
                self.emit_statement(then_stmt)?;
                if !self.builder.is_terminated() {
                    self.builder.branch(end_block);
                }
            }

            Some(else_stmt) => {
                let else_block = self.builder.new_block("if.else");
                self.builder.cond_branch(truth, then_block, else_block);

                self.builder.position_at_end(then_block);
                self.emit_statement(then_stmt)?;
                if !self.builder.is_terminated() {
                    self.builder.branch(end_block);
                }

                self.builder.position_at_end(else_block);
                self.emit_statement(else_stmt)?;
                if !self.builder.is_terminated() {
                    self.builder.branch(end_block);
                }
            }
        }

        self.builder.position_at_end(end_block);
        Ok(())
    }

    /// The header block re-evaluates the condition each iteration; `break` exits. B has no
    /// `continue`.
    fn emit_while(&mut self, cond: &Expression, body: &Statement) -> EmitResult<()> {
        let header = self.builder.new_block("while.cond");
        let body_block = self.builder.new_block("while.body");
        let exit = self.builder.new_block("while.end");

        self.builder.branch(header);

        self.builder.position_at_end(header);
        let truth = self.truth_value(cond)?;
        self.builder.cond_branch(truth, body_block, exit);

        self.builder.position_at_end(body_block);
        self.break_targets.push(exit);
        let result = self.emit_statement(body);
        self.break_targets.pop();
        result?;

        if !self.builder.is_terminated() {
            self.builder.branch(header);
        }

        self.builder.position_at_end(exit);
        Ok(())
    }

    /// The goto operand must be a name expression naming a label of the current function; the
    /// label pre-pass has already created every label's block, so forward references resolve.
    fn emit_goto(&mut self, target: &Expression) -> EmitResult<()> {
        let Expression::Name(name) = target else {
            return Err(EmitError::GotoTargetNotAName);
        };

        let Some(block) = self.labels.get(name).copied() else {
            return Err(EmitError::GotoTargetUnknown(name.clone()));
        };

        self.builder.branch(block);
        self.continue_unreachable("post.goto");
        Ok(())
    }

    fn emit_switch(&mut self, cond: &Expression, body: &Statement) -> EmitResult<()> {
        let switch_value = self.rvalue(cond)?;

        let exit = self.builder.new_block("switch.end");

        // Pre-pass: this switch's cases, in source order.
        let mut case_values = Vec::new();
        collect_cases(body, &mut case_values);

        if case_values.iter().filter(|v| v.is_none()).count() > 1 {
            return Err(EmitError::DuplicateDefault);
        }

        let cases: Vec<(Option<Word>, BlockId)> =
            case_values.into_iter().map(|value| (value, self.builder.new_block("case"))).collect();

        let default_block = cases.iter().find(|(value, _)| value.is_none()).map(|(_, block)| *block);

        // Dispatch: compare against each case constant in source order; fall back to the
        // default label, or past the switch entirely.
        for (value, block) in &cases {
            if let Some(value) = value {
                let is_match = self.builder.compare(CmpOp::Eq, switch_value.clone(), Value::Const(*value));
                let next_test = self.builder.new_block("switch.test");
                self.builder.cond_branch(is_match, *block, next_test);
                self.builder.position_at_end(next_test);
            }
        }
        self.builder.branch(default_block.unwrap_or(exit));

        // The body emits unreachable-until-dispatched; case statements branch into their
        // pre-created blocks as they appear.
        let body_block = self.builder.new_block("switch.body");
        self.builder.position_at_end(body_block);

        self.switch_cases.push(VecDeque::from(cases));
        self.break_targets.push(exit);
        let result = self.emit_statement(body);
        self.break_targets.pop();
        self.switch_cases.pop();
        result?;

        if !self.builder.is_terminated() {
            self.builder.branch(exit);
        }
        self.builder.position_at_end(exit);
        Ok(())
    }

    /// A case statement begins the block the enclosing switch pre-created for it; control
    /// falls through from the statement before it.
    fn emit_case(&mut self, value: Option<Word>, stmt: &Statement) -> EmitResult<()> {
        let Some(queue) = self.switch_cases.last_mut() else {
            return Err(EmitError::CaseOutsideSwitch);
        };

        let Some((expected, block)) = queue.pop_front() else {
            return Err(EmitError::Internal("case statement missed by the switch pre-pass".to_string()));
        };

        if expected != value {
            return Err(EmitError::Internal("case statement does not match the switch pre-pass".to_string()));
        }

        if !self.builder.is_terminated() {
            self.builder.branch(block);
        }
        self.builder.position_at_end(block);

        self.emit_statement(stmt)
    }

    /// Starts a fresh block for the statements after a terminator.
    fn continue_unreachable(&mut self, name_hint: &str) {
        let block = self.builder.new_block(name_hint);
        self.builder.position_at_end(block);
    }
}

/// Collects the case constants of one switch body in source order, without descending into
/// nested switches (whose cases are their own).
fn collect_cases(stmt: &Statement, out: &mut Vec<Option<Word>>) {
    match stmt {
        Statement::Case { value, stmt } => {
            out.push(*value);
            collect_cases(stmt, out);
        }

        Statement::Switch { .. } => (),

        Statement::Compound(stmts) => {
            for stmt in stmts {
                collect_cases(stmt, out);
            }
        }

        Statement::If { then_stmt, else_stmt, .. } => {
            collect_cases(then_stmt, out);
            if let Some(else_stmt) = else_stmt {
                collect_cases(else_stmt, out);
            }
        }

        Statement::While { body, .. } => collect_cases(body, out),

        Statement::Label { stmt, .. } | Statement::Auto { stmt, .. } | Statement::Extrn { stmt, .. } => {
            collect_cases(stmt, out);
        }

        Statement::Return(_)
        | Statement::Break
        | Statement::Goto(_)
        | Statement::Expression(_)
        | Statement::Null => (),
    }
}
