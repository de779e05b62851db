// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `char_literal` module defines lexing functions for character and string literals.
//!
//! B's escape introducer is `*`, not backslash:
//!
//! ```text
//! *0 -> NUL    *e -> EOT (0x04)    *t -> TAB    *n -> LF
//! *' -> '      *" -> "             ** -> *      *( -> {      *) -> }
//! ```
//!
//! Both literal forms expand their escapes here and the token carries the resulting bytes.
//! A character literal may hold several characters (`'ab'`); the parser packs them into a
//! word because only it knows the target word width.

use crate::core::SourceLocation;

use super::{LexError, Lexer, Token, TokenType};

/// Makes a token for a character literal. The cursor is positioned at the opening single quote.
pub(super) fn make_char_literal(lexer: &mut Lexer) -> Result<Token, LexError> {
    let start = lexer.pos();
    lexer.bump(); // Opening quote

    let bytes = take_literal_bytes(lexer, '\'')
        .ok_or(LexError::UnterminatedCharLiteral { loc: SourceLocation::new(start, 1) })??;

    let length = bytes.len() + 2;
    Ok(Token { token_type: TokenType::CharLiteral(bytes), location: SourceLocation::new(start, length) })
}

/// Makes a token for a string literal. The cursor is positioned at the opening double quote.
///
/// The token carries the expanded bytes without a terminator; the EOT byte B strings end with
/// is appended when the AST node is built.
pub(super) fn make_string_literal(lexer: &mut Lexer) -> Result<Token, LexError> {
    let start = lexer.pos();
    lexer.bump(); // Opening quote

    let bytes = take_literal_bytes(lexer, '"')
        .ok_or(LexError::UnterminatedString { loc: SourceLocation::new(start, 1) })??;

    let length = bytes.len() + 2;
    Ok(Token { token_type: TokenType::StringLiteral(bytes), location: SourceLocation::new(start, length) })
}

/// Consumes and expands literal content up to and including the closing quote.
///
/// Returns `None` if the source ends before the closing quote.
fn take_literal_bytes(lexer: &mut Lexer, closing_quote: char) -> Option<Result<Vec<u8>, LexError>> {
    let mut bytes = Vec::new();

    loop {
        let ch_pos = lexer.pos();
        let ch = lexer.bump()?;

        if ch == closing_quote {
            return Some(Ok(bytes));
        }

        if ch == '*' {
            let escape_pos = ch_pos;
            let escaped = lexer.bump()?;

            match escape_value(escaped) {
                Some(value) => bytes.push(value),
                None => {
                    let loc = SourceLocation::new(escape_pos, 2);
                    return Some(Err(LexError::UnknownEscape { ch: escaped, loc }));
                }
            }
        } else if ch.is_ascii() {
            bytes.push(ch as u8);
        } else {
            let loc = SourceLocation::new(ch_pos, 1);
            return Some(Err(LexError::BadCharacter { ch, loc }));
        }
    }
}

/// The byte value of a `*X` escape, or `None` if `X` is not a known escape.
fn escape_value(ch: char) -> Option<u8> {
    match ch {
        '0' => Some(0),
        'e' => Some(0x04), // EOT, B's string terminator
        't' => Some(b'\t'),
        'n' => Some(b'\n'),
        '\'' => Some(b'\''),
        '"' => Some(b'"'),
        '*' => Some(b'*'),
        '(' => Some(b'{'),
        ')' => Some(b'}'),
        _ => None,
    }
}
