// Copyright 2025 Neil Henderson, Blue Tarp Media.

use super::super::TokenType::{self, *};
use super::{lex_error, lex_tokens, lex_types};

use crate::core::FilePosition;

#[test]
fn punctuation() {
    assert_eq!(
        lex_types("( ) { } [ ] ; : , ?"),
        vec![
            OpenParen,
            CloseParen,
            OpenBrace,
            CloseBrace,
            OpenSqBracket,
            CloseSqBracket,
            Semicolon,
            Colon,
            Comma,
            QuestionMark
        ]
    );
}

#[test]
fn operators() {
    assert_eq!(
        lex_types("+ - * / % & | ^ ~ ! < > <= >= == != << >> ++ --"),
        vec![
            Plus,
            Minus,
            Star,
            Slash,
            Percent,
            Ampersand,
            Pipe,
            Caret,
            Tilde,
            Bang,
            LessThan,
            GreaterThan,
            LessThanOrEqualTo,
            GreaterThanOrEqualTo,
            EqualTo,
            NotEqualTo,
            LeftShift,
            RightShift,
            Increment,
            Decrement
        ]
    );
}

#[test]
fn compound_assignment_operators() {
    // Whitespace between the operators; each `=op` must stay glued together.
    assert_eq!(
        lex_types("=+ =- =* =/ =% =| =& =^ =<< =>> === =!= =< => =<= =>="),
        vec![
            AssignPlus,
            AssignMinus,
            AssignStar,
            AssignSlash,
            AssignPercent,
            AssignPipe,
            AssignAmpersand,
            AssignCaret,
            AssignLeftShift,
            AssignRightShift,
            AssignEqualTo,
            AssignNotEqualTo,
            AssignLessThan,
            AssignGreaterThan,
            AssignLessThanOrEqualTo,
            AssignGreaterThanOrEqualTo
        ]
    );
}

#[test]
fn assignment_whitespace_disambiguation() {
    // `a=-b` is a compound subtract-assign...
    assert_eq!(
        lex_types("a=-b"),
        vec![TokenType::new_identifier("a"), AssignMinus, TokenType::new_identifier("b")]
    );

    // ...but `a = -b` is a plain assignment of a negation.
    assert_eq!(
        lex_types("a = -b"),
        vec![TokenType::new_identifier("a"), Assign, Minus, TokenType::new_identifier("b")]
    );

    // `=` before `!` only munches the full `=!=` form; `a =!b` assigns `!b`.
    assert_eq!(
        lex_types("a =!b"),
        vec![TokenType::new_identifier("a"), Assign, Bang, TokenType::new_identifier("b")]
    );
    assert_eq!(
        lex_types("a =!= b"),
        vec![TokenType::new_identifier("a"), AssignNotEqualTo, TokenType::new_identifier("b")]
    );

    // Two equals form the comparison; three form the compound assignment.
    assert_eq!(
        lex_types("a == b === c"),
        vec![
            TokenType::new_identifier("a"),
            EqualTo,
            TokenType::new_identifier("b"),
            AssignEqualTo,
            TokenType::new_identifier("c")
        ]
    );
}

#[test]
fn identifiers() {
    assert_eq!(
        lex_types("main _tmp x9 put.char"),
        vec![
            TokenType::new_identifier("main"),
            TokenType::new_identifier("_tmp"),
            TokenType::new_identifier("x9"),
            TokenType::new_identifier("put.char")
        ]
    );

    // The historical backspace name character.
    assert_eq!(lex_types("m\u{8}yfunc"), vec![TokenType::new_identifier("m\u{8}yfunc")]);

    // Names must not begin with a digit; `9x` is a number followed by a name.
    assert_eq!(
        lex_types("9x"),
        vec![NumericLiteral("9".to_string()), TokenType::new_identifier("x")]
    );
}

#[test]
fn keywords_are_identifiers() {
    assert_eq!(
        lex_types("auto extrn while"),
        vec![
            TokenType::new_identifier("auto"),
            TokenType::new_identifier("extrn"),
            TokenType::new_identifier("while")
        ]
    );
}

#[test]
fn comments_are_skipped() {
    assert_eq!(
        lex_types("a /* one */ b /* two\nlines */ c /** stars **/ d"),
        vec![
            TokenType::new_identifier("a"),
            TokenType::new_identifier("b"),
            TokenType::new_identifier("c"),
            TokenType::new_identifier("d")
        ]
    );

    // `/` not followed by `*` is division.
    assert_eq!(
        lex_types("a/b"),
        vec![TokenType::new_identifier("a"), Slash, TokenType::new_identifier("b")]
    );
}

#[test]
fn unterminated_comment_is_an_error() {
    assert!(matches!(lex_error("a /* no end"), super::LexError::UnterminatedComment { .. }));
}

#[test]
fn bad_character_is_an_error() {
    assert!(matches!(lex_error("a # b"), super::LexError::BadCharacter { ch: '#', .. }));
}

#[test]
fn token_locations() {
    let tokens = lex_tokens("ab\n  cd");
    assert_eq!(tokens[0].location.pos, FilePosition::new(1, 1));
    assert_eq!(tokens[1].location.pos, FilePosition::new(2, 3));
}

#[test]
fn empty_source_has_no_tokens() {
    assert!(lex_types("").is_empty());
    assert!(lex_types("   \n\t  /* just a comment */ ").is_empty());
}
