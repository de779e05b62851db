// Copyright 2025 Neil Henderson, Blue Tarp Media.


use crate::core::Target;
use crate::ir;
use crate::parser;

use super::{EmitError, emit_program};

/// Compiles the source to an LLIR module on an 8-byte-word target.
pub(super) fn emit_source(source: &str) -> ir::Module {
    let program = parser::parse(source, Target::new(8)).expect("source should parse");
    emit_program(&program, Target::new(8), "test.b").expect("source should emit")
}

/// Compiles the source and returns the emission error it produces.
pub(super) fn emit_error_of(source: &str) -> EmitError {
    let program = parser::parse(source, Target::new(8)).expect("source should parse");
    match emit_program(&program, Target::new(8), "test.b") {
        Ok(_) => panic!("expected an emit error for: {source}"),
        Err(err) => err,
    }
}
