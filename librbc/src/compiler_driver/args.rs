// Copyright 2025-2026 Neil Henderson
//
//! The `args` module defines the command-line argument parser.
//! Although crates like `clap` are excellent, we have a design goal to minimize dependencies
//! on third-party crates and so rbc uses a custom argument parser.

use super::DriverOptions;

/// Parses the command-line arguments into a source filename and driver options.
///
/// Returns `None` if compilation should not proceed (help was printed, or the arguments were
/// invalid and a message has been written to stderr).
pub fn parse_command_line_args() -> Option<(String, DriverOptions)> {
    parse_args(std::env::args().skip(1))
}

fn parse_args(args: impl Iterator<Item = String>) -> Option<(String, DriverOptions)> {
    let mut args = args.peekable();
    let mut options = DriverOptions::default();
    let mut source_file: Option<String> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                return None;
            }

            "-o" => options.output_file = Some(expect_value(&mut args, "-o")?),
            "-c" => options.generate_object_file = true,
            "-s" => options.generate_assembly_file = true,
            "--emit-llvm" => options.emit_llvm = true,
            "--dump-ast" => options.dump_ast = true,
            "--backend" => options.backend = expect_value(&mut args, "--backend")?,

            "--bytes-per-word" => {
                let value = expect_value(&mut args, "--bytes-per-word")?;
                match value.parse::<u32>() {
                    Ok(n) if n == 4 || n == 8 => options.bytes_per_word = Some(n),
                    _ => {
                        eprintln!("rbc: '--bytes-per-word' must be 4 or 8");
                        return None;
                    }
                }
            }

            _ if arg.starts_with('-') => {
                eprintln!("rbc: unknown option '{arg}'");
                return None;
            }

            _ => {
                if source_file.is_some() {
                    eprintln!("rbc: more than one source file given");
                    return None;
                }
                source_file = Some(arg);
            }
        }
    }

    let Some(source_file) = source_file else {
        print_help();
        return None;
    };

    Some((source_file, options))
}

fn expect_value(args: &mut std::iter::Peekable<impl Iterator<Item = String>>, option: &str) -> Option<String> {
    match args.next() {
        Some(value) => Some(value),
        None => {
            eprintln!("rbc: option '{option}' requires a value");
            None
        }
    }
}

fn print_help() {
    println!(
        "\
usage: rbc [options] file.b

options:
  -o PATH            output path
  -c                 produce a relocatable object file, do not link
  -s                 produce assembly text
  --emit-llvm        with -c or -s, write the compiler's textual IR instead
  --dump-ast         print the parsed AST and stop
  --bytes-per-word N target word size in bytes (4 or 8, default: host)
  --backend CMD      external backend command (default: rbc-backend)
  -h, --help         print this help"
    );
}
