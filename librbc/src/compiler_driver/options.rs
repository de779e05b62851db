// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `options` module defines [DriverOptions], which control the compiler driver.

/// Options that control the driver.
///
/// The front end always produces textual LLIR. `--emit-llvm` writes that text as the output;
/// otherwise the driver hands the text to the external backend command, which assembles,
/// compiles or links it together with the B runtime library.
#[derive(Debug, Clone)]
pub struct DriverOptions {
    /// `-o PATH`: the output path. Defaults per output kind: `a.out` for an executable,
    /// `<stem>.o` for `-c`, `<stem>.s` for `-s`, `<stem>.ir` for `--emit-llvm`.
    pub output_file: Option<String>,

    /// `-c`: produce a relocatable object file; do not link.
    pub generate_object_file: bool,

    /// `-s`: produce assembly text.
    pub generate_assembly_file: bool,

    /// `--emit-llvm`: write the front end's textual IR instead of invoking the backend.
    pub emit_llvm: bool,

    /// `--dump-ast`: print the parsed AST and stop.
    pub dump_ast: bool,

    /// `--bytes-per-word N`: target word size in bytes (4 or 8). Defaults to the host's.
    pub bytes_per_word: Option<u32>,

    /// `--backend CMD`: the external backend command.
    pub backend: String,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            output_file: None,
            generate_object_file: false,
            generate_assembly_file: false,
            emit_llvm: false,
            dump_ast: false,
            bytes_per_word: None,
            backend: "rbc-backend".to_string(),
        }
    }
}
