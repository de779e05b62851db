// Copyright 2025-2026 Neil Henderson

//! main entry point for the compiler driver executable.

use std::process::ExitCode;

use librbc::compiler_driver::{Driver, args};

fn main() -> ExitCode {
    // Parse the command-line arguments into the compiler driver's options.
    let Some((source_file, options)) = args::parse_command_line_args() else {
        return ExitCode::SUCCESS;
    };

    let driver = Driver::new(&source_file, options);

    match driver.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("rbc: error: {error}");
            ExitCode::FAILURE
        }
    }
}
