// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `driver` module defines `Driver`, which runs the compiler pipeline for one source file.

use std::path::Path;
use std::process::Command;

use crate::core::Target;
use crate::ir;
use crate::lexer;
use crate::parser;
use crate::parser::dump::DumpSemantics;
use crate::emit;

use super::{CompileError, DriverOptions};

/// The rbc compiler driver.
pub struct Driver {
    source_filename: String,
    options: DriverOptions,
}

impl Driver {
    /// Creates a driver configured to compile the given source file.
    pub fn new(source_filename: &str, options: DriverOptions) -> Self {
        Self { source_filename: source_filename.to_string(), options }
    }

    /// Runs the pipeline: lex, parse, emit, and write or hand off the LLIR.
    pub fn run(&self) -> Result<(), CompileError> {
        let source = std::fs::read_to_string(&self.source_filename).map_err(|source| CompileError::Input {
            filename: self.source_filename.clone(),
            source,
        })?;

        let target = match self.options.bytes_per_word {
            Some(bytes) => Target::new(bytes),
            None => Target::host(),
        };

        if self.options.dump_ast {
            let tokens = lexer::lex(&source)?;
            let dump = parser::Parser::new(tokens, target, DumpSemantics).parse_program()?;
            println!("{dump}");
            return Ok(());
        }

        let program = parser::parse(&source, target)?;
        let module = emit::emit_program(&program, target, self.module_name())?;
        let llir_text = ir::printer::print(&module);

        let llir_path = self.llir_path();
        self.write_output(&llir_path, &llir_text)?;

        if self.options.emit_llvm {
            return Ok(());
        }

        // Native outputs are the external backend's job: hand the LLIR over, the same way a
        // C driver hands assembly to the system assembler.
        self.run_backend(&llir_path)
    }

    /// The module name recorded in the LLIR: the source file's basename.
    fn module_name(&self) -> &str {
        Path::new(&self.source_filename).file_name().and_then(|n| n.to_str()).unwrap_or(&self.source_filename)
    }

    /// Where the LLIR text is written. With `--emit-llvm` this is the requested output;
    /// otherwise it is the intermediate file given to the backend.
    fn llir_path(&self) -> String {
        if self.options.emit_llvm
            && let Some(path) = &self.options.output_file
        {
            return path.clone();
        }

        let stem = Path::new(&self.source_filename).with_extension("");
        format!("{}.ir", stem.to_string_lossy())
    }

    /// The final output path the backend should produce.
    fn backend_output_path(&self) -> String {
        if let Some(path) = &self.options.output_file {
            return path.clone();
        }

        let stem = Path::new(&self.source_filename).with_extension("");
        let stem = stem.to_string_lossy();

        if self.options.generate_object_file {
            format!("{stem}.o")
        } else if self.options.generate_assembly_file {
            format!("{stem}.s")
        } else {
            "a.out".to_string()
        }
    }

    fn write_output(&self, path: &str, text: &str) -> Result<(), CompileError> {
        std::fs::write(path, text)
            .map_err(|source| CompileError::Output { filename: path.to_string(), source })
    }

    /// Invokes the external backend on the LLIR file.
    fn run_backend(&self, llir_path: &str) -> Result<(), CompileError> {
        let mut command = Command::new(&self.options.backend);

        if self.options.generate_object_file {
            command.arg("-c");
        } else if self.options.generate_assembly_file {
            command.arg("-s");
        }

        command.arg(llir_path);
        command.arg("-o");
        command.arg(self.backend_output_path());

        let failed = || CompileError::Backend { command: self.options.backend.clone() };

        match command.status() {
            Ok(status) if status.success() => Ok(()),
            _ => Err(failed()),
        }
    }
}
