// Copyright 2025 Neil Henderson, Blue Tarp Media.


use crate::core::Target;
use crate::lexer;

use super::dump::DumpSemantics;
use super::{AstSemantics, ParseError, Parser, ast};

/// Parses the source with the default AST factory on an 8-byte-word target.
pub(super) fn parse_source(source: &str) -> ast::Program {
    let tokens = lexer::lex(source).expect("source should lex");
    Parser::new(tokens, Target::new(8), AstSemantics).parse_program().expect("source should parse")
}

/// Parses the source with the dump factory and returns the rendered tree.
pub(super) fn dump_of(source: &str) -> String {
    let tokens = lexer::lex(source).expect("source should lex");
    Parser::new(tokens, Target::new(8), DumpSemantics).parse_program().expect("source should parse")
}

/// Parses the source and returns the error it produces.
pub(super) fn parse_error_of(source: &str) -> ParseError {
    parse_error_for_target(source, Target::new(8))
}

/// Parses the source for the given target and returns the error it produces.
pub(super) fn parse_error_for_target(source: &str, target: Target) -> ParseError {
    let tokens = lexer::lex(source).expect("source should lex");
    match Parser::new(tokens, target, AstSemantics).parse_program() {
        Ok(_) => panic!("expected a parse error for: {source}"),
        Err(err) => err,
    }
}

/// Renders the expression source by parsing it as a function body expression statement.
pub(super) fn expr_dump(expr_source: &str) -> String {
    let full = dump_of(&format!("f() {expr_source};"));
    let inner = full
        .strip_prefix("Function(f, [], Expr(")
        .and_then(|s| s.strip_suffix("))"))
        .unwrap_or_else(|| panic!("unexpected dump shape: {full}"));
    inner.to_string()
}
