// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `lexer` module handles the lexical analysis of B source code and produces a vector of
//! tokens for the parser.
//!
//! Two points distinguish B from its descendants here. First, the escape introducer in character
//! and string literals is `*`, not backslash; the lexer expands escapes immediately and tokens
//! carry the expanded bytes. Second, the compound assignment operators are the historical
//! prefixed-equals forms (`=+`, `=-`, ...). An `=` immediately followed by a binary operator,
//! with no intervening whitespace, lexes as the compound operator; otherwise it is a plain
//! assignment. So `a=-b` subtracts `b` from `a`, while `a = -b` assigns the negation of `b`.
//!
//! The lexer works on the whole source at once rather than line by line: B has no preprocessor,
//! so `/* ... */` comments (which may span lines) must be skipped here.

mod char_literal;
mod tokens;


use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

use crate::core::{FilePosition, SourceLocation};

pub use tokens::{Token, TokenType};

/// An error produced during lexical analysis.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LexError {
    /// A character that cannot begin any token, or a non-ASCII character inside a literal.
    #[error("{loc}: bad character {ch:?} in input")]
    BadCharacter { ch: char, loc: SourceLocation },

    /// An unknown `*X` escape in a character or string literal.
    #[error("{loc}: unknown escape sequence '*{ch}'")]
    UnknownEscape { ch: char, loc: SourceLocation },

    /// A `/* ... */` comment with no closing `*/`.
    #[error("{loc}: unterminated comment")]
    UnterminatedComment { loc: SourceLocation },

    /// A string literal with no closing double quote.
    #[error("{loc}: unterminated string literal")]
    UnterminatedString { loc: SourceLocation },

    /// A character literal with no closing single quote.
    #[error("{loc}: unterminated character literal")]
    UnterminatedCharLiteral { loc: SourceLocation },
}

/// Performs lexical analysis of the given source text and returns the token stream.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.get_next_token()? {
        tokens.push(token);
    }

    Ok(tokens)
}

/// The `Lexer` scans the source text one character at a time.
pub struct Lexer<'a> {
    cursor: Peekable<Chars<'a>>,
    pos: FilePosition,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer over the given source text.
    pub fn new(source: &'a str) -> Self {
        Self { cursor: source.chars().peekable(), pos: FilePosition::start_of_file() }
    }

    /// The file position of the next unread character.
    pub(super) fn pos(&self) -> FilePosition {
        self.pos
    }

    /// Consumes and returns the next character, advancing the position.
    pub(super) fn bump(&mut self) -> Option<char> {
        let ch = self.cursor.next()?;
        self.pos = self.pos.advanced_past(ch);
        Some(ch)
    }

    /// Peeks at the next character without consuming it.
    pub(super) fn peek(&mut self) -> Option<char> {
        self.cursor.peek().copied()
    }

    /// Peeks at the next 2 characters without consuming them.
    fn peek_2_chars(&mut self) -> (Option<char>, Option<char>) {
        match self.cursor.peek() {
            Some(&first) => {
                // Clone the iterator state, advance the clone once, then peek the second char
                let mut clone = self.cursor.clone();
                clone.next();
                (Some(first), clone.peek().copied())
            }
            None => (None, None),
        }
    }

    /// Consumes the next character if it equals `expected`; returns whether it did.
    fn bump_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Gets the next token from the source.
    ///
    /// Returns `Ok(None)` at the end of the source.
    pub fn get_next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.consume_whitespace_and_comments()?;

        let start = self.pos;

        let Some(ch) = self.peek() else {
            return Ok(None);
        };

        if is_name_start(ch) {
            return Ok(Some(self.make_identifier()));
        }

        if ch.is_ascii_digit() {
            return Ok(Some(self.make_numeric_literal()));
        }

        if ch == '\'' {
            return char_literal::make_char_literal(self).map(Some);
        }

        if ch == '"' {
            return char_literal::make_string_literal(self).map(Some);
        }

        self.bump();

        let token_type = match ch {
            '(' => TokenType::OpenParen,
            ')' => TokenType::CloseParen,
            '{' => TokenType::OpenBrace,
            '}' => TokenType::CloseBrace,
            '[' => TokenType::OpenSqBracket,
            ']' => TokenType::CloseSqBracket,
            ';' => TokenType::Semicolon,
            ':' => TokenType::Colon,
            ',' => TokenType::Comma,
            '?' => TokenType::QuestionMark,
            '~' => TokenType::Tilde,
            '^' => TokenType::Caret,
            '%' => TokenType::Percent,
            '/' => TokenType::Slash,
            '*' => TokenType::Star,

            '+' => {
                if self.bump_if('+') { TokenType::Increment } else { TokenType::Plus }
            }
            '-' => {
                if self.bump_if('-') { TokenType::Decrement } else { TokenType::Minus }
            }
            '&' => TokenType::Ampersand,
            '|' => TokenType::Pipe,
            '!' => {
                if self.bump_if('=') { TokenType::NotEqualTo } else { TokenType::Bang }
            }
            '<' => {
                if self.bump_if('<') {
                    TokenType::LeftShift
                } else if self.bump_if('=') {
                    TokenType::LessThanOrEqualTo
                } else {
                    TokenType::LessThan
                }
            }
            '>' => {
                if self.bump_if('>') {
                    TokenType::RightShift
                } else if self.bump_if('=') {
                    TokenType::GreaterThanOrEqualTo
                } else {
                    TokenType::GreaterThan
                }
            }

            '=' => self.lex_equals(),

            ch => {
                let loc = SourceLocation::new(start, 1);
                return Err(LexError::BadCharacter { ch, loc });
            }
        };

        let length = (self.pos.column.saturating_sub(start.column)).max(1) as usize;
        Ok(Some(Token { token_type, location: SourceLocation::new(start, length) }))
    }

    /// Lexes a token beginning with `=`, which has already been consumed.
    ///
    /// The character *immediately* after the `=` decides between plain assignment, comparison
    /// and the `=op` compound assignments; whitespace has deliberately not been skipped.
    #[rustfmt::skip]
    fn lex_equals(&mut self) -> TokenType {
        match self.peek() {
            Some('+') => { self.bump(); TokenType::AssignPlus }
            Some('-') => { self.bump(); TokenType::AssignMinus }
            Some('*') => { self.bump(); TokenType::AssignStar }
            Some('/') => { self.bump(); TokenType::AssignSlash }
            Some('%') => { self.bump(); TokenType::AssignPercent }
            Some('|') => { self.bump(); TokenType::AssignPipe }
            Some('&') => { self.bump(); TokenType::AssignAmpersand }
            Some('^') => { self.bump(); TokenType::AssignCaret }

            Some('<') => {
                self.bump();
                if self.bump_if('<')      { TokenType::AssignLeftShift }
                else if self.bump_if('=') { TokenType::AssignLessThanOrEqualTo }
                else                      { TokenType::AssignLessThan }
            }

            Some('>') => {
                self.bump();
                if self.bump_if('>')      { TokenType::AssignRightShift }
                else if self.bump_if('=') { TokenType::AssignGreaterThanOrEqualTo }
                else                      { TokenType::AssignGreaterThan }
            }

            // `==` is the comparison; only a third `=` makes it the compound `===`.
            Some('=') => {
                self.bump();
                if self.bump_if('=') { TokenType::AssignEqualTo } else { TokenType::EqualTo }
            }

            // `!` alone is unary, so `=!x` is a plain assignment of `!x` while `=!=` is compound.
            Some('!') => {
                if self.peek_2_chars() == (Some('!'), Some('=')) {
                    self.bump();
                    self.bump();
                    TokenType::AssignNotEqualTo
                } else {
                    TokenType::Assign
                }
            }

            _ => TokenType::Assign,
        }
    }

    /// Creates an identifier token (which may be a keyword).
    ///
    /// B names begin with a letter, `_`, `.` or the historical backspace character, and continue
    /// with those or digits.
    fn make_identifier(&mut self) -> Token {
        let start = self.pos;
        let mut identifier = String::new();

        while let Some(ch) = self.peek() {
            if !is_name_char(ch) {
                break;
            }
            identifier.push(ch);
            self.bump();
        }

        let length = identifier.chars().count();
        Token { token_type: TokenType::Identifier(identifier), location: SourceLocation::new(start, length) }
    }

    /// Creates a numeric literal token carrying the decimal digit string.
    fn make_numeric_literal(&mut self) -> Token {
        let start = self.pos;
        let mut digits = String::new();

        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            digits.push(ch);
            self.bump();
        }

        let length = digits.len();
        Token { token_type: TokenType::NumericLiteral(digits), location: SourceLocation::new(start, length) }
    }

    /// Consumes whitespace and `/* ... */` comments. The next character will begin a token.
    fn consume_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek_2_chars() {
                (Some(ch), _) if ch.is_whitespace() => {
                    self.bump();
                }

                (Some('/'), Some('*')) => {
                    let comment_start = self.pos;
                    self.bump();
                    self.bump();
                    self.consume_comment_body(comment_start)?;
                }

                _ => return Ok(()),
            }
        }
    }

    /// Consumes a comment body up to and including the closing `*/`.
    fn consume_comment_body(&mut self, comment_start: FilePosition) -> Result<(), LexError> {
        loop {
            match self.bump() {
                Some('*') if self.peek() == Some('/') => {
                    self.bump();
                    return Ok(());
                }
                Some(_) => (),
                None => {
                    return Err(LexError::UnterminatedComment { loc: SourceLocation::new(comment_start, 2) });
                }
            }
        }
    }
}

/// Can the character begin a B name?
fn is_name_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || matches!(ch, '_' | '.' | '\u{8}')
}

/// Can the character continue a B name?
fn is_name_char(ch: char) -> bool {
    is_name_start(ch) || ch.is_ascii_digit()
}
