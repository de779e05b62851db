// Copyright 2025-2026 Neil Henderson
//
//! The `dump` module defines a [Semantics] factory which renders the parse as a textual tree
//! instead of building AST nodes.
//!
//! This is both a debugging aid (the driver's `--dump-ast` option) and the demonstration that
//! the parser is independent of the node representation: nothing here shares code with the
//! real AST, yet every node kind and field the parser produces appears in the output.

use crate::core::Word;

use super::ast::{AutoDecl, BinaryOp, UnaryOp};
use super::Semantics;

/// A factory which renders every node as a line of text. The "node" type is the rendered
/// string of the node and all its children.
#[derive(Debug, Default)]
pub struct DumpSemantics;

impl Semantics for DumpSemantics {
    type Program = String;
    type Def = String;
    type Stmt = String;
    type Expr = String;
    type Ival = String;

    fn program(&mut self, definitions: Vec<String>) -> String {
        definitions.join("\n")
    }

    fn simple_def(&mut self, name: String, init: Option<String>) -> String {
        match init {
            Some(init) => format!("Simple({name}, {init})"),
            None => format!("Simple({name})"),
        }
    }

    fn vector_def(&mut self, name: String, maxidx: Option<Word>, ivals: Vec<String>) -> String {
        let maxidx = maxidx.map(|m| m.to_string()).unwrap_or_default();
        format!("Vector({name}, [{maxidx}], {{{}}})", ivals.join(", "))
    }

    fn function_def(&mut self, name: String, params: Vec<String>, body: String) -> String {
        format!("Function({name}, [{}], {body})", params.join(", "))
    }

    fn ival_constant(&mut self, value: Word) -> String {
        value.to_string()
    }

    fn ival_name(&mut self, name: String) -> String {
        format!("Name({name})")
    }

    fn ival_string(&mut self, bytes: Vec<u8>) -> String {
        format!("Str({})", quoted(&bytes))
    }

    fn compound_stmt(&mut self, stmts: Vec<String>) -> String {
        format!("Compound({{{}}})", stmts.join(", "))
    }

    fn if_stmt(&mut self, cond: String, then_stmt: String, else_stmt: Option<String>) -> String {
        match else_stmt {
            Some(else_stmt) => format!("If({cond}, {then_stmt}, {else_stmt})"),
            None => format!("If({cond}, {then_stmt})"),
        }
    }

    fn while_stmt(&mut self, cond: String, body: String) -> String {
        format!("While({cond}, {body})")
    }

    fn return_stmt(&mut self, value: Option<String>) -> String {
        match value {
            Some(value) => format!("Return({value})"),
            None => "Return".to_string(),
        }
    }

    fn break_stmt(&mut self) -> String {
        "Break".to_string()
    }

    fn goto_stmt(&mut self, target: String) -> String {
        format!("Goto({target})")
    }

    fn label_stmt(&mut self, name: String, stmt: String) -> String {
        format!("Label({name}, {stmt})")
    }

    fn switch_stmt(&mut self, cond: String, body: String) -> String {
        format!("Switch({cond}, {body})")
    }

    fn case_stmt(&mut self, value: Option<Word>, stmt: String) -> String {
        match value {
            Some(value) => format!("Case({value}, {stmt})"),
            None => format!("Default({stmt})"),
        }
    }

    fn auto_stmt(&mut self, decls: Vec<AutoDecl>, stmt: String) -> String {
        let decls: Vec<String> = decls
            .iter()
            .map(|d| match d.maxidx {
                Some(maxidx) => format!("{}[{maxidx}]", d.name),
                None => d.name.clone(),
            })
            .collect();
        format!("Auto([{}], {stmt})", decls.join(", "))
    }

    fn extrn_stmt(&mut self, names: Vec<String>, stmt: String) -> String {
        format!("Extrn([{}], {stmt})", names.join(", "))
    }

    fn expression_stmt(&mut self, expr: String) -> String {
        format!("Expr({expr})")
    }

    fn null_stmt(&mut self) -> String {
        "Null".to_string()
    }

    fn numeric_expr(&mut self, value: Word) -> String {
        format!("Number({value})")
    }

    fn character_expr(&mut self, value: Word) -> String {
        format!("Char({value})")
    }

    fn string_expr(&mut self, bytes: Vec<u8>) -> String {
        format!("Str({})", quoted(&bytes))
    }

    fn name_expr(&mut self, name: String) -> String {
        format!("Name({name})")
    }

    fn unary_expr(&mut self, op: UnaryOp, operand: String) -> String {
        format!("Unary({op}, {operand})")
    }

    fn binary_expr(&mut self, op: BinaryOp, lhs: String, rhs: String) -> String {
        format!("Binary({op}, {lhs}, {rhs})")
    }

    fn conditional_expr(&mut self, cond: String, then_expr: String, else_expr: String) -> String {
        format!("Cond({cond}, {then_expr}, {else_expr})")
    }

    fn assign_expr(&mut self, op: Option<BinaryOp>, lhs: String, rhs: String) -> String {
        match op {
            Some(op) => format!("Assign(={op}, {lhs}, {rhs})"),
            None => format!("Assign(=, {lhs}, {rhs})"),
        }
    }

    fn call_expr(&mut self, callee: String, args: Vec<String>) -> String {
        format!("Call({callee}, [{}])", args.join(", "))
    }

    fn index_expr(&mut self, base: String, index: String) -> String {
        format!("Index({base}, {index})")
    }
}

/// Renders literal bytes as a quoted string, re-escaping non-printable bytes in B notation.
fn quoted(bytes: &[u8]) -> String {
    let mut out = String::from("\"");
    for &b in bytes {
        match b {
            0 => out.push_str("*0"),
            0x04 => out.push_str("*e"),
            b'\t' => out.push_str("*t"),
            b'\n' => out.push_str("*n"),
            b'"' => out.push_str("*\""),
            b'*' => out.push_str("**"),
            b if b.is_ascii_graphic() || b == b' ' => out.push(b as char),
            b => out.push_str(&format!("*x{b:02x}")),
        }
    }
    out.push('"');
    out
}
