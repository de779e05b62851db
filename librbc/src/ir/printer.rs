// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `printer` module renders a [Module] in the LLIR's textual form, which is the artifact
//! handed to the external backend.
//!
//! Word indexing is part of the format's contract: an `@name` operand denotes the word index
//! of that symbol, a `load`/`store` address operand is a word index, and the backend performs
//! the multiply/divide by bytes-per-word when it materializes byte-oriented pointers.

use std::fmt::Write;

use super::{Block, Function, Global, GlobalInit, Instruction, Linkage, Module, Terminator, WordInit};

/// Renders the module as LLIR text.
pub fn print(module: &Module) -> String {
    let mut out = String::new();

    _ = writeln!(out, "module \"{}\" ; {} bytes/word", module.name, module.target.bytes_per_word());

    if !module.globals.is_empty() {
        _ = writeln!(out);
    }
    for global in &module.globals {
        print_global(&mut out, global);
    }

    for function in &module.functions {
        _ = writeln!(out);
        print_function(&mut out, function);
    }

    out
}

fn print_global(out: &mut String, global: &Global) {
    let linkage = match global.linkage {
        Linkage::External => "",
        Linkage::Internal => "internal ",
    };

    match &global.init {
        GlobalInit::External => {
            _ = writeln!(out, "extrn @{}", global.name);
        }
        GlobalInit::Word(init) => {
            _ = writeln!(out, "{linkage}@{} = word {}", global.name, word_init(init));
        }
        GlobalInit::Cells(inits) => {
            let rendered: Vec<String> = inits.iter().map(word_init).collect();
            _ = writeln!(out, "{linkage}@{} = cells [{}]", global.name, rendered.join(", "));
        }
        GlobalInit::Bytes(bytes) => {
            _ = writeln!(out, "{linkage}@{} = bytes \"{}\"", global.name, escaped(bytes));
        }
    }
}

fn word_init(init: &WordInit) -> String {
    match init {
        WordInit::Const(w) => w.to_string(),
        WordInit::WordIndexOf(symbol) => format!("@{symbol}"),
    }
}

fn print_function(out: &mut String, function: &Function) {
    _ = writeln!(out, "define @{}({}) {{", function.name, function.params);

    for block in &function.blocks {
        print_block(out, function, block);
    }

    _ = writeln!(out, "}}");
}

fn print_block(out: &mut String, function: &Function, block: &Block) {
    _ = writeln!(out, "{}:", block.label);

    for instruction in &block.instructions {
        print_instruction(out, function, instruction);
    }

    match &block.terminator {
        Some(Terminator::Branch(target)) => {
            _ = writeln!(out, "  br {}", label(function, *target));
        }
        Some(Terminator::CondBranch { cond, then_block, else_block }) => {
            _ = writeln!(out, "  cbr {cond}, {}, {}", label(function, *then_block), label(function, *else_block));
        }
        Some(Terminator::Return(value)) => {
            _ = writeln!(out, "  ret {value}");
        }
        None => {
            _ = writeln!(out, "  <unterminated>");
        }
    }
}

fn print_instruction(out: &mut String, function: &Function, instruction: &Instruction) {
    match instruction {
        Instruction::Alloca { dst, words } => {
            _ = writeln!(out, "  %{} = alloca {words}", dst.0);
        }
        Instruction::Load { dst, addr } => {
            _ = writeln!(out, "  %{} = load [{addr}]", dst.0);
        }
        Instruction::Store { addr, value } => {
            _ = writeln!(out, "  store {value}, [{addr}]");
        }
        Instruction::Binary { dst, op, lhs, rhs } => {
            _ = writeln!(out, "  %{} = {op} {lhs}, {rhs}", dst.0);
        }
        Instruction::Compare { dst, op, lhs, rhs } => {
            _ = writeln!(out, "  %{} = cmp {op} {lhs}, {rhs}", dst.0);
        }
        Instruction::Phi { dst, incoming } => {
            let rendered: Vec<String> =
                incoming.iter().map(|(block, value)| format!("[{}: {value}]", label(function, *block))).collect();
            _ = writeln!(out, "  %{} = phi {}", dst.0, rendered.join(", "));
        }
        Instruction::Call { dst, callee, args } => {
            let rendered: Vec<String> = args.iter().map(|a| a.to_string()).collect();
            _ = writeln!(out, "  %{} = call {callee}({})", dst.0, rendered.join(", "));
        }
    }
}

fn label(function: &Function, block: super::BlockId) -> String {
    function.blocks[block.0].label.clone()
}

/// Renders constant bytes, re-escaping non-printable bytes in B's `*` notation.
fn escaped(bytes: &[u8]) -> String {
    let mut out = String::new();
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
    out
}
