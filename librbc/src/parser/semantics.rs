// Copyright 2025-2026 Neil Henderson
//
//! The `semantics` module defines the [Semantics] node-factory trait through which the parser
//! constructs every AST node.
//!
//! The parser never names a concrete node type: each grammar rule calls the matching factory
//! method, bottom-up, and the factory decides what a "node" is. [AstSemantics] builds the real
//! [ast] tree that the emitter consumes; the `dump` module's factory renders a textual tree
//! instead, and tests substitute recording factories to observe exactly what the parser
//! produces.

use crate::core::Word;

use super::ast;

/// A factory for AST nodes, with one method per grammar rule.
///
/// Methods are invoked bottom-up: every child node is already built when its parent's method
/// runs. Implementations choose their own node representations via the associated types.
pub trait Semantics {
    type Program;
    type Def;
    type Stmt;
    type Expr;
    type Ival;

    fn program(&mut self, definitions: Vec<Self::Def>) -> Self::Program;

    fn simple_def(&mut self, name: String, init: Option<Self::Ival>) -> Self::Def;
    fn vector_def(&mut self, name: String, maxidx: Option<Word>, ivals: Vec<Self::Ival>) -> Self::Def;
    fn function_def(&mut self, name: String, params: Vec<String>, body: Self::Stmt) -> Self::Def;

    fn ival_constant(&mut self, value: Word) -> Self::Ival;
    fn ival_name(&mut self, name: String) -> Self::Ival;
    fn ival_string(&mut self, bytes: Vec<u8>) -> Self::Ival;

    fn compound_stmt(&mut self, stmts: Vec<Self::Stmt>) -> Self::Stmt;
    fn if_stmt(&mut self, cond: Self::Expr, then_stmt: Self::Stmt, else_stmt: Option<Self::Stmt>) -> Self::Stmt;
    fn while_stmt(&mut self, cond: Self::Expr, body: Self::Stmt) -> Self::Stmt;
    fn return_stmt(&mut self, value: Option<Self::Expr>) -> Self::Stmt;
    fn break_stmt(&mut self) -> Self::Stmt;
    fn goto_stmt(&mut self, target: Self::Expr) -> Self::Stmt;
    fn label_stmt(&mut self, name: String, stmt: Self::Stmt) -> Self::Stmt;
    fn switch_stmt(&mut self, cond: Self::Expr, body: Self::Stmt) -> Self::Stmt;
    fn case_stmt(&mut self, value: Option<Word>, stmt: Self::Stmt) -> Self::Stmt;
    fn auto_stmt(&mut self, decls: Vec<ast::AutoDecl>, stmt: Self::Stmt) -> Self::Stmt;
    fn extrn_stmt(&mut self, names: Vec<String>, stmt: Self::Stmt) -> Self::Stmt;
    fn expression_stmt(&mut self, expr: Self::Expr) -> Self::Stmt;
    fn null_stmt(&mut self) -> Self::Stmt;

    fn numeric_expr(&mut self, value: Word) -> Self::Expr;
    fn character_expr(&mut self, value: Word) -> Self::Expr;
    fn string_expr(&mut self, bytes: Vec<u8>) -> Self::Expr;
    fn name_expr(&mut self, name: String) -> Self::Expr;
    fn unary_expr(&mut self, op: ast::UnaryOp, operand: Self::Expr) -> Self::Expr;
    fn binary_expr(&mut self, op: ast::BinaryOp, lhs: Self::Expr, rhs: Self::Expr) -> Self::Expr;
    fn conditional_expr(&mut self, cond: Self::Expr, then_expr: Self::Expr, else_expr: Self::Expr) -> Self::Expr;
    fn assign_expr(&mut self, op: Option<ast::BinaryOp>, lhs: Self::Expr, rhs: Self::Expr) -> Self::Expr;
    fn call_expr(&mut self, callee: Self::Expr, args: Vec<Self::Expr>) -> Self::Expr;
    fn index_expr(&mut self, base: Self::Expr, index: Self::Expr) -> Self::Expr;
}

/// The default factory: builds the [ast] tree the emitter consumes.
#[derive(Debug, Default)]
pub struct AstSemantics;

impl Semantics for AstSemantics {
    type Program = ast::Program;
    type Def = ast::Definition;
    type Stmt = ast::Statement;
    type Expr = ast::Expression;
    type Ival = ast::Ival;

    fn program(&mut self, definitions: Vec<Self::Def>) -> Self::Program {
        ast::Program(definitions)
    }

    fn simple_def(&mut self, name: String, init: Option<Self::Ival>) -> Self::Def {
        ast::Definition::Simple { name, init }
    }

    fn vector_def(&mut self, name: String, maxidx: Option<Word>, ivals: Vec<Self::Ival>) -> Self::Def {
        ast::Definition::Vector { name, maxidx, ivals }
    }

    fn function_def(&mut self, name: String, params: Vec<String>, body: Self::Stmt) -> Self::Def {
        ast::Definition::Function { name, params, body }
    }

    fn ival_constant(&mut self, value: Word) -> Self::Ival {
        ast::Ival::Const(value)
    }

    fn ival_name(&mut self, name: String) -> Self::Ival {
        ast::Ival::Name(name)
    }

    fn ival_string(&mut self, bytes: Vec<u8>) -> Self::Ival {
        ast::Ival::Str(terminated(bytes))
    }

    fn compound_stmt(&mut self, stmts: Vec<Self::Stmt>) -> Self::Stmt {
        ast::Statement::Compound(stmts)
    }

    fn if_stmt(&mut self, cond: Self::Expr, then_stmt: Self::Stmt, else_stmt: Option<Self::Stmt>) -> Self::Stmt {
        ast::Statement::If { cond, then_stmt: Box::new(then_stmt), else_stmt: else_stmt.map(Box::new) }
    }

    fn while_stmt(&mut self, cond: Self::Expr, body: Self::Stmt) -> Self::Stmt {
        ast::Statement::While { cond, body: Box::new(body) }
    }

    fn return_stmt(&mut self, value: Option<Self::Expr>) -> Self::Stmt {
        ast::Statement::Return(value)
    }

    fn break_stmt(&mut self) -> Self::Stmt {
        ast::Statement::Break
    }

    fn goto_stmt(&mut self, target: Self::Expr) -> Self::Stmt {
        ast::Statement::Goto(target)
    }

    fn label_stmt(&mut self, name: String, stmt: Self::Stmt) -> Self::Stmt {
        ast::Statement::Label { name, stmt: Box::new(stmt) }
    }

    fn switch_stmt(&mut self, cond: Self::Expr, body: Self::Stmt) -> Self::Stmt {
        ast::Statement::Switch { cond, body: Box::new(body) }
    }

    fn case_stmt(&mut self, value: Option<Word>, stmt: Self::Stmt) -> Self::Stmt {
        ast::Statement::Case { value, stmt: Box::new(stmt) }
    }

    fn auto_stmt(&mut self, decls: Vec<ast::AutoDecl>, stmt: Self::Stmt) -> Self::Stmt {
        ast::Statement::Auto { decls, stmt: Box::new(stmt) }
    }

    fn extrn_stmt(&mut self, names: Vec<String>, stmt: Self::Stmt) -> Self::Stmt {
        ast::Statement::Extrn { names, stmt: Box::new(stmt) }
    }

    fn expression_stmt(&mut self, expr: Self::Expr) -> Self::Stmt {
        ast::Statement::Expression(expr)
    }

    fn null_stmt(&mut self) -> Self::Stmt {
        ast::Statement::Null
    }

    fn numeric_expr(&mut self, value: Word) -> Self::Expr {
        ast::Expression::Number(value)
    }

    fn character_expr(&mut self, value: Word) -> Self::Expr {
        ast::Expression::Character(value)
    }

    fn string_expr(&mut self, bytes: Vec<u8>) -> Self::Expr {
        ast::Expression::Str(terminated(bytes))
    }

    fn name_expr(&mut self, name: String) -> Self::Expr {
        ast::Expression::Name(name)
    }

    fn unary_expr(&mut self, op: ast::UnaryOp, operand: Self::Expr) -> Self::Expr {
        ast::Expression::Unary { op, operand: Box::new(operand) }
    }

    fn binary_expr(&mut self, op: ast::BinaryOp, lhs: Self::Expr, rhs: Self::Expr) -> Self::Expr {
        ast::Expression::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    fn conditional_expr(&mut self, cond: Self::Expr, then_expr: Self::Expr, else_expr: Self::Expr) -> Self::Expr {
        ast::Expression::Conditional {
            cond: Box::new(cond),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
        }
    }

    fn assign_expr(&mut self, op: Option<ast::BinaryOp>, lhs: Self::Expr, rhs: Self::Expr) -> Self::Expr {
        ast::Expression::Assign { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    fn call_expr(&mut self, callee: Self::Expr, args: Vec<Self::Expr>) -> Self::Expr {
        ast::Expression::Call { callee: Box::new(callee), args }
    }

    fn index_expr(&mut self, base: Self::Expr, index: Self::Expr) -> Self::Expr {
        ast::Expression::Index { base: Box::new(base), index: Box::new(index) }
    }
}

/// Appends B's string terminator, the EOT byte.
fn terminated(mut bytes: Vec<u8>) -> Vec<u8> {
    bytes.push(0x04);
    bytes
}
