// Copyright 2025-2026 Neil Henderson
//
//! The `expression` module lowers B expressions.
//!
//! Every expression emits as one of two shapes:
//!
//! * an rvalue — a word value, or
//! * an lvalue — the word-index address of a word of storage.
//!
//! Callers pick the mode: assignment targets and `&` require an lvalue; every other context
//! fetches, turning an lvalue into the word it stores with a single load. An rvalue can never
//! be referenced, which is why `&x` works and `&(a + b)` does not.

use crate::core::Word;
use crate::ir::{BinOp, CmpOp, Value};
use crate::parser::ast::{BinaryOp, Expression, UnaryOp};

use super::scope::LValue;
use super::{BYTES_PER_WORD_BUILTIN, EmitError, EmitResult, Emitter};

/// The result of emitting one expression.
pub(super) enum Emitted {
    /// A word value.
    RValue(Value),

    /// The word-index address of the expression's storage.
    LValue(Value),
}

impl Emitter {
    /// Emits an expression in rvalue mode, fetching if it produced an lvalue.
    pub(super) fn rvalue(&mut self, expr: &Expression) -> EmitResult<Value> {
        match self.emit_expression(expr)? {
            Emitted::RValue(value) => Ok(value),
            Emitted::LValue(address) => Ok(self.builder.load(address)),
        }
    }

    /// Emits an expression in lvalue mode, failing if it has no storage location.
    pub(super) fn lvalue_address(&mut self, expr: &Expression) -> EmitResult<Value> {
        match self.emit_expression(expr)? {
            Emitted::LValue(address) => Ok(address),
            Emitted::RValue(_) => Err(EmitError::NotAnLValue),
        }
    }

    /// Emits an expression as the word 1 or 0: the truth of a word is `word != 0`.
    pub(super) fn truth_value(&mut self, expr: &Expression) -> EmitResult<Value> {
        let value = self.rvalue(expr)?;
        Ok(self.builder.compare(CmpOp::Ne, value, Value::Const(0)))
    }

    fn emit_expression(&mut self, expr: &Expression) -> EmitResult<Emitted> {
        match expr {
            Expression::Number(value) | Expression::Character(value) => {
                Ok(Emitted::RValue(Value::Const(self.builder.target().truncate(*value))))
            }

            Expression::Str(bytes) => {
                let symbol = self.string_constant(bytes);
                Ok(Emitted::RValue(Value::Symbol(symbol)))
            }

            Expression::Name(name) => self.emit_name(name),

            Expression::Unary { op, operand } => self.emit_unary(*op, operand),

            Expression::Binary { op, lhs, rhs } => {
                // Both sides always evaluate; B's `&` and `|` do not short-circuit.
                let lhs = self.rvalue(lhs)?;
                let rhs = self.rvalue(rhs)?;
                Ok(Emitted::RValue(self.binary_op_value(*op, lhs, rhs)))
            }

            Expression::Conditional { cond, then_expr, else_expr } => {
                self.emit_conditional(cond, then_expr, else_expr)
            }

            Expression::Assign { op, lhs, rhs } => self.emit_assignment(*op, lhs, rhs),

            Expression::Call { callee, args } => {
                let callee = self.rvalue(callee)?;
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.rvalue(arg)?);
                }
                Ok(Emitted::RValue(self.builder.call(callee, values)))
            }

            // `base[index]` is `*(base + index)`: word arithmetic, then an lvalue at the sum.
            Expression::Index { base, index } => {
                let base = self.rvalue(base)?;
                let index = self.rvalue(index)?;
                let address = self.builder.binary(BinOp::Add, base, index);
                Ok(Emitted::LValue(address))
            }
        }
    }

    /// A name is an lvalue found by scope lookup; the builtin word-size name is the one
    /// exception and yields a constant.
    fn emit_name(&mut self, name: &str) -> EmitResult<Emitted> {
        if name == BYTES_PER_WORD_BUILTIN {
            return Ok(Emitted::RValue(Value::Const(self.builder.target().bytes_per_word() as Word)));
        }

        match self.scopes.lookup(name) {
            Some(LValue { address }) => Ok(Emitted::LValue(address.clone())),
            None => Err(EmitError::UndefinedName(name.to_string())),
        }
    }

    fn emit_unary(&mut self, op: UnaryOp, operand: &Expression) -> EmitResult<Emitted> {
        match op {
            UnaryOp::Negate => {
                let value = self.rvalue(operand)?;
                Ok(Emitted::RValue(self.builder.binary(BinOp::Sub, Value::Const(0), value)))
            }

            UnaryOp::LogicalNot => {
                let value = self.rvalue(operand)?;
                Ok(Emitted::RValue(self.builder.compare(CmpOp::Eq, value, Value::Const(0))))
            }

            UnaryOp::BitwiseNot => {
                let value = self.rvalue(operand)?;
                Ok(Emitted::RValue(self.builder.binary(BinOp::Xor, value, Value::Const(-1))))
            }

            // `*e`: any word is the address of a word.
            UnaryOp::Deref => {
                let address = self.rvalue(operand)?;
                Ok(Emitted::LValue(address))
            }

            // `&e`: the operand must have a storage location; its address is the rvalue.
            UnaryOp::AddressOf => {
                let address = self.lvalue_address(operand)?;
                Ok(Emitted::RValue(address))
            }

            UnaryOp::PreIncrement => self.emit_increment(operand, BinOp::Add, IncrementResult::New),
            UnaryOp::PreDecrement => self.emit_increment(operand, BinOp::Sub, IncrementResult::New),
            UnaryOp::PostIncrement => self.emit_increment(operand, BinOp::Add, IncrementResult::Old),
            UnaryOp::PostDecrement => self.emit_increment(operand, BinOp::Sub, IncrementResult::Old),
        }
    }

    /// Read-modify-write for `++`/`--`; prefix forms yield the new value, postfix the old.
    fn emit_increment(&mut self, operand: &Expression, op: BinOp, result: IncrementResult) -> EmitResult<Emitted> {
        let address = self.lvalue_address(operand)?;
        let old = self.builder.load(address.clone());
        let new = self.builder.binary(op, old.clone(), Value::Const(1));
        self.builder.store(address, new.clone());

        Ok(Emitted::RValue(match result {
            IncrementResult::New => new,
            IncrementResult::Old => old,
        }))
    }

    /// Evaluates one arm of a conditional, then branches; both arms merge through a phi.
    fn emit_conditional(
        &mut self,
        cond: &Expression,
        then_expr: &Expression,
        else_expr: &Expression,
    ) -> EmitResult<Emitted> {
        let truth = self.truth_value(cond)?;

        let then_block = self.builder.new_block("ternary.then");
        let else_block = self.builder.new_block("ternary.else");
        let end_block = self.builder.new_block("ternary.end");

        self.builder.cond_branch(truth, then_block, else_block);

        self.builder.position_at_end(then_block);
        let then_value = self.rvalue(then_expr)?;
        let then_end = self.builder.current_block();
        self.builder.branch(end_block);

        self.builder.position_at_end(else_block);
        let else_value = self.rvalue(else_expr)?;
        let else_end = self.builder.current_block();
        self.builder.branch(end_block);

        self.builder.position_at_end(end_block);
        let value = self.builder.phi(vec![(then_end, then_value), (else_end, else_value)]);
        Ok(Emitted::RValue(value))
    }

    /// `L = R` stores R's value; `L =op R` fetches L, applies the operator, and stores. The
    /// assignment's value is the stored word.
    fn emit_assignment(&mut self, op: Option<BinaryOp>, lhs: &Expression, rhs: &Expression) -> EmitResult<Emitted> {
        let address = self.lvalue_address(lhs)?;

        let stored = match op {
            None => self.rvalue(rhs)?,
            Some(op) => {
                let old = self.builder.load(address.clone());
                let rhs = self.rvalue(rhs)?;
                self.binary_op_value(op, old, rhs)
            }
        };

        self.builder.store(address, stored.clone());
        Ok(Emitted::RValue(stored))
    }

    /// Applies a binary operator to two fetched words. Comparisons yield the word 1 or 0.
    pub(super) fn binary_op_value(&mut self, op: BinaryOp, lhs: Value, rhs: Value) -> Value {
        match op {
            BinaryOp::Or => self.builder.binary(BinOp::Or, lhs, rhs),
            BinaryOp::Xor => self.builder.binary(BinOp::Xor, lhs, rhs),
            BinaryOp::And => self.builder.binary(BinOp::And, lhs, rhs),
            BinaryOp::LeftShift => self.builder.binary(BinOp::Shl, lhs, rhs),
            BinaryOp::RightShift => self.builder.binary(BinOp::Shr, lhs, rhs),
            BinaryOp::Add => self.builder.binary(BinOp::Add, lhs, rhs),
            BinaryOp::Subtract => self.builder.binary(BinOp::Sub, lhs, rhs),
            BinaryOp::Multiply => self.builder.binary(BinOp::Mul, lhs, rhs),
            BinaryOp::Divide => self.builder.binary(BinOp::Div, lhs, rhs),
            BinaryOp::Remainder => self.builder.binary(BinOp::Rem, lhs, rhs),

            BinaryOp::EqualTo => self.builder.compare(CmpOp::Eq, lhs, rhs),
            BinaryOp::NotEqualTo => self.builder.compare(CmpOp::Ne, lhs, rhs),
            BinaryOp::LessThan => self.builder.compare(CmpOp::Lt, lhs, rhs),
            BinaryOp::LessThanOrEqualTo => self.builder.compare(CmpOp::Le, lhs, rhs),
            BinaryOp::GreaterThan => self.builder.compare(CmpOp::Gt, lhs, rhs),
            BinaryOp::GreaterThanOrEqualTo => self.builder.compare(CmpOp::Ge, lhs, rhs),
        }
    }
}

/// Which value a read-modify-write expression yields.
enum IncrementResult {
    New,
    Old,
}
