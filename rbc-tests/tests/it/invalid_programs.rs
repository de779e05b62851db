// Copyright 2025-2026 Neil Henderson

//! Programs that must be rejected, and the error each one produces. The compiler does not
//! recover: the first error aborts the translation unit.

use librbc::core::Target;
use librbc::emit::{self, EmitError};
use librbc::ir::interp::InterpError;
use librbc::lexer::{self, LexError};
use librbc::parser::{self, ParseError};

use rbc_tests::run_error_of;

/// Lexes the source, expecting a lexical error.
fn lex_error_of(source: &str) -> LexError {
    lexer::lex(source).expect_err("expected a lex error")
}

/// Parses the source, expecting a syntax or literal error.
fn parse_error_of(source: &str) -> ParseError {
    let tokens = lexer::lex(source).expect("source should lex");
    parser::Parser::new(tokens, Target::host(), parser::AstSemantics)
        .parse_program()
        .expect_err("expected a parse error")
}

/// Emits the source, expecting an emission error.
fn emit_error_of(source: &str) -> EmitError {
    let program = parser::parse(source, Target::host()).expect("source should parse");
    emit::emit_program(&program, Target::host(), "test.b").expect_err("expected an emit error")
}

#[test]
fn lexical_errors() {
    assert!(matches!(lex_error_of("main() { putchar('*q'); }"), LexError::UnknownEscape { ch: 'q', .. }));
    assert!(matches!(lex_error_of("main() { /* no end "), LexError::UnterminatedComment { .. }));
    assert!(matches!(lex_error_of("main() { \"open"), LexError::UnterminatedString { .. }));
    assert!(matches!(lex_error_of("main() { # }"), LexError::BadCharacter { ch: '#', .. }));
}

#[test]
fn syntax_errors() {
    assert!(matches!(parse_error_of("main( { }"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_error_of("main() { if putnumb; }"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_error_of("main() {"), ParseError::UnexpectedEof { .. }));
}

#[test]
fn literal_errors() {
    assert!(matches!(parse_error_of("main() { putnumb('way too wide'); }"), ParseError::CharLiteralTooWide { .. }));
    assert!(matches!(
        parse_error_of("main() { putnumb(99999999999999999999); }"),
        ParseError::NumberTooLarge { .. }
    ));
}

#[test]
fn name_errors() {
    assert_eq!(emit_error_of("main() { undeclared = 1; }"), EmitError::UndefinedName("undeclared".into()));
    assert_eq!(emit_error_of("x; x;"), EmitError::DuplicateDefinition("x".into()));
}

#[test]
fn lvalue_errors() {
    assert_eq!(emit_error_of("main() { &(1+2); }"), EmitError::NotAnLValue);
    assert_eq!(emit_error_of("main() { 1 = 2; }"), EmitError::NotAnLValue);
}

#[test]
fn control_flow_errors() {
    assert_eq!(emit_error_of("main() { break; }"), EmitError::BreakOutsideLoop);
    assert_eq!(emit_error_of("main() { case 1: ; }"), EmitError::CaseOutsideSwitch);
    assert_eq!(emit_error_of("main() { goto nowhere; }"), EmitError::GotoTargetUnknown("nowhere".into()));
    assert_eq!(emit_error_of("main() { goto 3; }"), EmitError::GotoTargetNotAName);
}

#[test]
fn calling_an_unresolved_external_fails_at_run_time() {
    // The declaration compiles (it would be a link error in a native build); the call traps.
    let err = run_error_of("main() { extrn no_such_function; no_such_function(); }");
    assert_eq!(err, InterpError::NotAFunction(0));
}

#[test]
fn division_by_zero_traps() {
    assert_eq!(run_error_of("main() { extrn putnumb; putnumb(1 / 0); }"), InterpError::DivisionByZero);
}
