// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `tokens` module defines the tokens that the lexer produces.

use std::fmt;

use crate::core::SourceLocation;

/// Types of tokens produced by lexical analysis.
///
/// B's keywords (`auto`, `extrn`, `if`, ...) are lexed as ordinary identifiers and recognized
/// by the parser. Character and string literals carry their escape-expanded bytes; numeric
/// literals carry their digit string and are evaluated by the parser.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TokenType {
    // Single character tokens
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    OpenSqBracket,
    CloseSqBracket,
    Semicolon,
    Colon,
    Comma,
    QuestionMark,
    Plus,
    Minus,
    Star,  // Multiply or dereference
    Slash,
    Percent,
    Ampersand, // Bitwise-and or address-of
    Pipe,
    Caret,
    Tilde,
    Bang,
    LessThan,
    GreaterThan,
    Assign,

    // Multi-character tokens
    LessThanOrEqualTo,
    GreaterThanOrEqualTo,
    EqualTo,
    NotEqualTo,
    LeftShift,
    RightShift,
    Increment,
    Decrement,

    // The historical prefixed-equals assignment operators: `=+`, not `+=`.
    //      `=` immediately followed (no whitespace) by a binary operator is the compound form.
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
    AssignGreaterThanOrEqualTo,

    // Identifiers (which may be keywords)
    Identifier(String),

    // A numeric literal's decimal digit string, evaluated by the parser.
    NumericLiteral(String),

    // A character literal's escape-expanded bytes. Packing into a word happens in the parser,
    // which knows the target word width.
    CharLiteral(Vec<u8>),

    // A string literal's escape-expanded bytes, without the EOT terminator.
    StringLiteral(Vec<u8>),
}

impl TokenType {
    /// Makes an identifier token type with the given name.
    pub fn new_identifier(id: &str) -> TokenType {
        TokenType::Identifier(id.to_string())
    }

    /// Does the token type denote one of the `=op` compound assignment operators?
    pub fn is_compound_assignment(&self) -> bool {
        matches!(
            self,
            TokenType::AssignPlus
                | TokenType::AssignMinus
                | TokenType::AssignStar
                | TokenType::AssignSlash
                | TokenType::AssignPercent
                | TokenType::AssignPipe
                | TokenType::AssignAmpersand
                | TokenType::AssignCaret
                | TokenType::AssignLeftShift
                | TokenType::AssignRightShift
                | TokenType::AssignEqualTo
                | TokenType::AssignNotEqualTo
                | TokenType::AssignLessThan
                | TokenType::AssignGreaterThan
                | TokenType::AssignLessThanOrEqualTo
                | TokenType::AssignGreaterThanOrEqualTo
        )
    }
}

impl fmt::Display for TokenType {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenType::OpenParen                  => write!(f, "("),
            TokenType::CloseParen                 => write!(f, ")"),
            TokenType::OpenBrace                  => write!(f, "{{"),
            TokenType::CloseBrace                 => write!(f, "}}"),
            TokenType::OpenSqBracket              => write!(f, "["),
            TokenType::CloseSqBracket             => write!(f, "]"),
            TokenType::Semicolon                  => write!(f, ";"),
            TokenType::Colon                      => write!(f, ":"),
            TokenType::Comma                      => write!(f, ","),
            TokenType::QuestionMark               => write!(f, "?"),
            TokenType::Plus                       => write!(f, "+"),
            TokenType::Minus                      => write!(f, "-"),
            TokenType::Star                       => write!(f, "*"),
            TokenType::Slash                      => write!(f, "/"),
            TokenType::Percent                    => write!(f, "%"),
            TokenType::Ampersand                  => write!(f, "&"),
            TokenType::Pipe                       => write!(f, "|"),
            TokenType::Caret                      => write!(f, "^"),
            TokenType::Tilde                      => write!(f, "~"),
            TokenType::Bang                       => write!(f, "!"),
            TokenType::LessThan                   => write!(f, "<"),
            TokenType::GreaterThan                => write!(f, ">"),
            TokenType::Assign                     => write!(f, "="),

            TokenType::LessThanOrEqualTo          => write!(f, "<="),
            TokenType::GreaterThanOrEqualTo       => write!(f, ">="),
            TokenType::EqualTo                    => write!(f, "=="),
            TokenType::NotEqualTo                 => write!(f, "!="),
            TokenType::LeftShift                  => write!(f, "<<"),
            TokenType::RightShift                 => write!(f, ">>"),
            TokenType::Increment                  => write!(f, "++"),
            TokenType::Decrement                  => write!(f, "--"),

            TokenType::AssignPlus                 => write!(f, "=+"),
            TokenType::AssignMinus                => write!(f, "=-"),
            TokenType::AssignStar                 => write!(f, "=*"),
            TokenType::AssignSlash                => write!(f, "=/"),
            TokenType::AssignPercent              => write!(f, "=%"),
            TokenType::AssignPipe                 => write!(f, "=|"),
            TokenType::AssignAmpersand            => write!(f, "=&"),
            TokenType::AssignCaret                => write!(f, "=^"),
            TokenType::AssignLeftShift            => write!(f, "=<<"),
            TokenType::AssignRightShift           => write!(f, "=>>"),
            TokenType::AssignEqualTo              => write!(f, "==="),
            TokenType::AssignNotEqualTo           => write!(f, "=!="),
            TokenType::AssignLessThan             => write!(f, "=<"),
            TokenType::AssignGreaterThan          => write!(f, "=>"),
            TokenType::AssignLessThanOrEqualTo    => write!(f, "=<="),
            TokenType::AssignGreaterThanOrEqualTo => write!(f, "=>="),

            TokenType::Identifier(id)             => write!(f, "{}", id),
            TokenType::NumericLiteral(digits)     => write!(f, "{}", digits),

            TokenType::CharLiteral(bytes)         => write!(f, "'{}'", printable(bytes)),
            TokenType::StringLiteral(bytes)       => write!(f, "\"{}\"", printable(bytes)),
        }
    }
}

/// Renders literal bytes for display, re-escaping non-printable bytes in B's `*` notation.
fn printable(bytes: &[u8]) -> String {
    let mut out = String::new();
    for &b in bytes {
        match b {
            0 => out.push_str("*0"),
            0x04 => out.push_str("*e"),
            b'\t' => out.push_str("*t"),
            b'\n' => out.push_str("*n"),
            b'*' => out.push_str("**"),
            b if b.is_ascii_graphic() || b == b' ' => out.push(b as char),
            b => out.push_str(&format!("*x{b:02x}")),
        }
    }
    out
}

/// A token produced by lexical analysis.
#[derive(Debug, Clone)]
pub struct Token {
    pub token_type: TokenType,
    pub location: SourceLocation,
}

impl Token {
    /// Is the token an identifier?
    pub fn is_identifier(&self) -> bool {
        matches!(self.token_type, TokenType::Identifier(_))
    }

    /// Is the token an identifier with the given name?
    pub fn is_identifier_with_name(&self, expected_identifier: &str) -> bool {
        let TokenType::Identifier(ref id) = self.token_type else {
            return false;
        };
        id == expected_identifier
    }

    /// If the token is an identifier, returns its string. Otherwise returns `None`.
    pub fn get_identifier(&self) -> Option<&String> {
        let TokenType::Identifier(ref id) = self.token_type else {
            return None;
        };
        Some(id)
    }

    /// Does the token have the given type?
    pub fn has_type(&self, expected_type: &TokenType) -> bool {
        self.token_type == *expected_type
    }
}
