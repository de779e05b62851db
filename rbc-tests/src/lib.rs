// Copyright 2025-2026 Neil Henderson
//
//! Shared helpers for the end-to-end tests: compile B source and execute the resulting LLIR
//! in the reference interpreter.

use librbc::core::Target;
use librbc::emit;
use librbc::ir;
use librbc::ir::interp::{self, InterpError, Run};
use librbc::parser;

/// Compiles B source to an LLIR module for the host target.
pub fn compile(source: &str) -> ir::Module {
    compile_for_target(source, Target::host())
}

/// Compiles B source to an LLIR module for the given target.
pub fn compile_for_target(source: &str, target: Target) -> ir::Module {
    let program = parser::parse(source, target).unwrap_or_else(|err| panic!("parse failed: {err}\n{source}"));
    emit::emit_program(&program, target, "test.b").unwrap_or_else(|err| panic!("emit failed: {err}\n{source}"))
}

/// Compiles and runs a program with empty standard input.
pub fn run_b(source: &str) -> Run {
    let module = compile(source);
    interp::run(&module).unwrap_or_else(|err| panic!("execution failed: {err}\n{source}"))
}

/// Compiles and runs a program with the given standard input bytes.
pub fn run_b_with_input(source: &str, stdin: &[u8]) -> Run {
    let module = compile(source);
    interp::run_with_input(&module, stdin).unwrap_or_else(|err| panic!("execution failed: {err}\n{source}"))
}

/// Compiles and runs a program, returning its standard output as text.
pub fn output_of(source: &str) -> String {
    run_b(source).stdout_text()
}

/// Compiles a program expected to execute with an error, returning that error.
pub fn run_error_of(source: &str) -> InterpError {
    let module = compile(source);
    match interp::run(&module) {
        Ok(run) => panic!("expected an execution error, got output: {:?}", run.stdout_text()),
        Err(err) => err,
    }
}
