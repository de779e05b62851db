// Copyright 2025-2026 Neil Henderson
//
//! The rbc library: a compiler front end for the historical B programming language.
//!
//! The pipeline is `lexer` -> `parser` -> `emit`, producing a word-oriented low-level IR (`ir`)
//! whose textual form is handed to an external code-generation backend. The `compiler_driver`
//! module orchestrates the stages for the `rbc` binary.

#![doc(html_no_source)]

pub mod compiler_driver;
pub mod core;
pub mod emit;
pub mod ir;
pub mod lexer;
pub mod parser;
