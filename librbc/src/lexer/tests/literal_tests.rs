// Copyright 2025 Neil Henderson, Blue Tarp Media.

use super::super::{LexError, TokenType};
use super::{lex_error, lex_types};

#[test]
fn numeric_literals_keep_their_digits() {
    assert_eq!(
        lex_types("0 25 031 18446744073709551617"),
        vec![
            TokenType::NumericLiteral("0".into()),
            TokenType::NumericLiteral("25".into()),
            TokenType::NumericLiteral("031".into()),
            TokenType::NumericLiteral("18446744073709551617".into()),
        ]
    );
}

#[test]
fn char_literals_expand_escapes() {
    assert_eq!(lex_types("'a'"), vec![TokenType::CharLiteral(vec![b'a'])]);
    assert_eq!(lex_types("'ab'"), vec![TokenType::CharLiteral(vec![b'a', b'b'])]);
    assert_eq!(lex_types("''"), vec![TokenType::CharLiteral(vec![])]);
    assert_eq!(lex_types("'*n'"), vec![TokenType::CharLiteral(vec![b'\n'])]);
    assert_eq!(lex_types("'*e'"), vec![TokenType::CharLiteral(vec![0x04])]);
    assert_eq!(lex_types("'*0'"), vec![TokenType::CharLiteral(vec![0])]);
    assert_eq!(lex_types("'*''"), vec![TokenType::CharLiteral(vec![b'\''])]);
    assert_eq!(lex_types("'**'"), vec![TokenType::CharLiteral(vec![b'*'])]);
}

#[test]
fn string_literals_expand_escapes() {
    assert_eq!(lex_types("\"hi\""), vec![TokenType::StringLiteral(b"hi".to_vec())]);
    assert_eq!(lex_types("\"hello!*n\""), vec![TokenType::StringLiteral(b"hello!\n".to_vec())]);
    assert_eq!(lex_types("\"*\"quoted*\"\""), vec![TokenType::StringLiteral(b"\"quoted\"".to_vec())]);
    assert_eq!(lex_types("\"*(*)\""), vec![TokenType::StringLiteral(b"{}".to_vec())]);
    assert_eq!(lex_types("\"\""), vec![TokenType::StringLiteral(Vec::new())]);
}

#[test]
fn string_terminator_is_not_appended_by_the_lexer() {
    // The EOT byte is an AST-level concern; the token holds the written bytes only.
    assert_eq!(lex_types("\"x\""), vec![TokenType::StringLiteral(vec![b'x'])]);
}

#[test]
fn unknown_escape_is_an_error() {
    assert!(matches!(lex_error("'*q'"), LexError::UnknownEscape { ch: 'q', .. }));
    assert!(matches!(lex_error("\"bad *z escape\""), LexError::UnknownEscape { ch: 'z', .. }));
}

#[test]
fn unterminated_literals_are_errors() {
    assert!(matches!(lex_error("'a"), LexError::UnterminatedCharLiteral { .. }));
    assert!(matches!(lex_error("\"abc"), LexError::UnterminatedString { .. }));
}
