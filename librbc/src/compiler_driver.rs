// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `compiler_driver` module orchestrates the compilation stages for the `rbc` binary:
//! read the source, lex, parse, emit, print the LLIR, and either write it out or hand it to
//! the external backend.

pub mod args;
pub mod options;

mod driver;

use thiserror::Error;

use crate::emit::EmitError;
use crate::lexer::LexError;
use crate::parser::ParseError;

pub use driver::Driver;
pub use options::DriverOptions;

/// Any error the compiler pipeline can surface to the driver. The driver prints it; there is
/// no recovery and no partial output.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("cannot read '{filename}': {source}")]
    Input { filename: String, source: std::io::Error },

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error("cannot write '{filename}': {source}")]
    Output { filename: String, source: std::io::Error },

    #[error("backend command '{command}' failed")]
    Backend { command: String },
}
