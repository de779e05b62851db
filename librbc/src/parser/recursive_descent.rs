// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `recursive_descent` module defines the parsing functions for B definitions and
//! statements.
//!
//! ```markdown
//! <program>    ::= { <definition> }
//! <definition> ::= <simple_def> | <vector_def> | <function_def>
//! <simple_def>   ::= <name> [ <ival> ] ";"
//! <vector_def>   ::= <name> "[" [ <constant> ] "]" [ <ival> { "," <ival> } ] ";"
//! <function_def> ::= <name> "(" [ <name> { "," <name> } ] ")" <statement>
//! ```
//!
//! B's keywords arrive from the lexer as ordinary identifiers; this module recognizes them by
//! name when a statement begins.

use crate::core::{SourceLocation, Target, Word};
use crate::lexer::{Token, TokenType};

use super::ast::AutoDecl;
use super::expr;
use super::{ParseError, ParseResult, Parser, Semantics};

/// The identifiers which are reserved as statement keywords.
const KEYWORDS: &[&str] =
    &["auto", "extrn", "if", "else", "while", "switch", "case", "default", "goto", "return", "break"];

/// Parses a whole program: definitions until the end of the token stream.
pub(super) fn parse_program<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Program> {
    let mut definitions = Vec::new();

    while !p.tokens.is_eof() {
        definitions.push(parse_definition(p)?);
    }

    Ok(p.semantics.program(definitions))
}

/// Parses one top-level definition. The token after the definition's name decides which kind
/// it is: `(` begins a function, `[` a vector, anything else a simple definition.
fn parse_definition<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Def> {
    let name = expect_identifier(p, "a definition name")?;

    if take_if(p, &TokenType::OpenParen) {
        let params = parse_name_list(p)?;
        let body = parse_statement(p)?;
        return Ok(p.semantics.function_def(name, params, body));
    }

    if take_if(p, &TokenType::OpenSqBracket) {
        let maxidx = if p.tokens.next_token_has_type(&TokenType::CloseSqBracket) {
            None
        } else {
            Some(parse_constant(p)?)
        };
        expect_token(p, &TokenType::CloseSqBracket)?;

        let mut ivals = Vec::new();
        if !p.tokens.next_token_has_type(&TokenType::Semicolon) {
            ivals.push(parse_ival(p)?);
            while take_if(p, &TokenType::Comma) {
                ivals.push(parse_ival(p)?);
            }
        }
        expect_token(p, &TokenType::Semicolon)?;

        return Ok(p.semantics.vector_def(name, maxidx, ivals));
    }

    let init = if p.tokens.next_token_has_type(&TokenType::Semicolon) { None } else { Some(parse_ival(p)?) };
    expect_token(p, &TokenType::Semicolon)?;

    Ok(p.semantics.simple_def(name, init))
}

/// Parses a parenthesized, comma-separated name list; the opening paren has been consumed.
fn parse_name_list<S: Semantics>(p: &mut Parser<S>) -> ParseResult<Vec<String>> {
    let mut names = Vec::new();

    if take_if(p, &TokenType::CloseParen) {
        return Ok(names);
    }

    names.push(expect_identifier(p, "a name")?);
    while take_if(p, &TokenType::Comma) {
        names.push(expect_identifier(p, "a name")?);
    }
    expect_token(p, &TokenType::CloseParen)?;

    Ok(names)
}

/// Parses a definition or case initializer constant: a numeric or character literal with an
/// optional leading minus.
fn parse_constant<S: Semantics>(p: &mut Parser<S>) -> ParseResult<Word> {
    let negate = take_if(p, &TokenType::Minus);

    let Some(token) = p.tokens.take_token() else {
        return Err(eof("a constant"));
    };

    let value = match token.token_type {
        TokenType::NumericLiteral(ref digits) => evaluate_numeric(digits, p.target, token.location)?,
        TokenType::CharLiteral(ref bytes) => pack_character(bytes, p.target, token.location)?,
        _ => return Err(unexpected("a constant", token)),
    };

    Ok(if negate { p.target.truncate(value.wrapping_neg()) } else { value })
}

/// Parses an initializer: a constant, a name, or a string literal.
fn parse_ival<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Ival> {
    let peeked = p.tokens.peek_next_token().map(|t| t.token_type.clone());

    match peeked {
        Some(TokenType::Identifier(name)) => {
            p.tokens.take_token();
            Ok(p.semantics.ival_name(name))
        }
        Some(TokenType::StringLiteral(bytes)) => {
            p.tokens.take_token();
            Ok(p.semantics.ival_string(bytes))
        }
        Some(TokenType::NumericLiteral(_)) | Some(TokenType::CharLiteral(_)) | Some(TokenType::Minus) => {
            let value = parse_constant(p)?;
            Ok(p.semantics.ival_constant(value))
        }
        Some(_) => Err(unexpected("an initializer", p.tokens.peek_next_token().unwrap())),
        None => Err(eof("an initializer")),
    }
}

/// Parses a statement.
///
/// ```markdown
/// <statement> ::= <label_stmt> | <goto_stmt> | <switch_stmt> | <case_stmt> | <break_stmt>
///               | <auto_stmt> | <extrn_stmt> | <compound_stmt> | <if_stmt> | <while_stmt>
///               | <return_stmt> | <expr_stmt> | <null_stmt>
/// ```
pub(super) fn parse_statement<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Stmt> {
    // A label is an unreserved identifier followed by a colon.
    if let (Some(t1), Some(t2)) = p.tokens.peek_next_2_tokens()
        && token_is_unreserved_identifier(t1)
        && t2.has_type(&TokenType::Colon)
    {
        let name = expect_identifier(p, "a label")?;
        expect_token(p, &TokenType::Colon)?;
        let stmt = parse_statement(p)?;
        return Ok(p.semantics.label_stmt(name, stmt));
    }

    let Some(token) = p.tokens.peek_next_token() else {
        return Err(eof("a statement"));
    };

    match token.token_type {
        TokenType::Semicolon => {
            p.tokens.take_token();
            Ok(p.semantics.null_stmt())
        }

        TokenType::OpenBrace => parse_compound_statement(p),

        TokenType::Identifier(ref id) if KEYWORDS.contains(&id.as_str()) => match id.as_str() {
            "auto" => parse_auto_statement(p),
            "extrn" => parse_extrn_statement(p),
            "if" => parse_if_statement(p),
            "while" => parse_while_statement(p),
            "switch" => parse_switch_statement(p),
            "case" => parse_case_statement(p),
            "default" => parse_default_statement(p),
            "goto" => parse_goto_statement(p),
            "return" => parse_return_statement(p),
            "break" => {
                p.tokens.take_token();
                expect_token(p, &TokenType::Semicolon)?;
                Ok(p.semantics.break_stmt())
            }
            // An `else` with no preceding `if` reaches here.
            _ => Err(unexpected("a statement", token)),
        },

        _ => {
            let expr = expr::parse_expression(p)?;
            expect_token(p, &TokenType::Semicolon)?;
            Ok(p.semantics.expression_stmt(expr))
        }
    }
}

/// Parses a `{ ... }` compound statement.
fn parse_compound_statement<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Stmt> {
    expect_token(p, &TokenType::OpenBrace)?;

    let mut stmts = Vec::new();
    loop {
        if take_if(p, &TokenType::CloseBrace) {
            return Ok(p.semantics.compound_stmt(stmts));
        }
        if p.tokens.is_eof() {
            return Err(eof("`}`"));
        }
        stmts.push(parse_statement(p)?);
    }
}

/// Parses `auto name [ "[" constant "]" ] { "," ... } ";" statement`.
///
/// The statement which follows the declarations is the auto statement's body; this is the
/// grammar's statement wrapping at work, so declarations scope over the rest of their block.
fn parse_auto_statement<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Stmt> {
    p.tokens.take_token(); // `auto`

    let mut decls = Vec::new();
    loop {
        let name = expect_identifier(p, "a name")?;
        let maxidx = if take_if(p, &TokenType::OpenSqBracket) {
            let idx = parse_constant(p)?;
            expect_token(p, &TokenType::CloseSqBracket)?;
            Some(idx)
        } else {
            None
        };
        decls.push(AutoDecl { name, maxidx });

        if !take_if(p, &TokenType::Comma) {
            break;
        }
    }
    expect_token(p, &TokenType::Semicolon)?;

    let stmt = parse_statement(p)?;
    Ok(p.semantics.auto_stmt(decls, stmt))
}

/// Parses `extrn name { "," name } ";" statement`.
fn parse_extrn_statement<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Stmt> {
    p.tokens.take_token(); // `extrn`

    let mut names = vec![expect_identifier(p, "a name")?];
    while take_if(p, &TokenType::Comma) {
        names.push(expect_identifier(p, "a name")?);
    }
    expect_token(p, &TokenType::Semicolon)?;

    let stmt = parse_statement(p)?;
    Ok(p.semantics.extrn_stmt(names, stmt))
}

/// Parses `if ( rvalue ) statement [ else statement ]`. An `else` binds to the nearest `if`.
fn parse_if_statement<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Stmt> {
    p.tokens.take_token(); // `if`

    expect_token(p, &TokenType::OpenParen)?;
    let cond = expr::parse_expression(p)?;
    expect_token(p, &TokenType::CloseParen)?;

    let then_stmt = parse_statement(p)?;

    let else_stmt = if matches!(p.tokens.peek_next_token(), Some(t) if t.is_identifier_with_name("else")) {
        p.tokens.take_token();
        Some(parse_statement(p)?)
    } else {
        None
    };

    Ok(p.semantics.if_stmt(cond, then_stmt, else_stmt))
}

/// Parses `while ( rvalue ) statement`.
fn parse_while_statement<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Stmt> {
    p.tokens.take_token(); // `while`

    expect_token(p, &TokenType::OpenParen)?;
    let cond = expr::parse_expression(p)?;
    expect_token(p, &TokenType::CloseParen)?;

    let body = parse_statement(p)?;
    Ok(p.semantics.while_stmt(cond, body))
}

/// Parses `switch rvalue statement`. The controlling expression is usually parenthesized,
/// which the expression grammar covers without a special case.
fn parse_switch_statement<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Stmt> {
    p.tokens.take_token(); // `switch`

    let cond = expr::parse_expression(p)?;
    let body = parse_statement(p)?;
    Ok(p.semantics.switch_stmt(cond, body))
}

/// Parses `case constant : statement`.
fn parse_case_statement<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Stmt> {
    p.tokens.take_token(); // `case`

    let value = parse_constant(p)?;
    expect_token(p, &TokenType::Colon)?;

    let stmt = parse_statement(p)?;
    Ok(p.semantics.case_stmt(Some(value), stmt))
}

/// Parses `default : statement`.
fn parse_default_statement<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Stmt> {
    p.tokens.take_token(); // `default`

    expect_token(p, &TokenType::Colon)?;

    let stmt = parse_statement(p)?;
    Ok(p.semantics.case_stmt(None, stmt))
}

/// Parses `goto rvalue ;`. The operand must name a label, which the emitter checks.
fn parse_goto_statement<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Stmt> {
    p.tokens.take_token(); // `goto`

    let target = expr::parse_expression(p)?;
    expect_token(p, &TokenType::Semicolon)?;
    Ok(p.semantics.goto_stmt(target))
}

/// Parses `return ;` or `return rvalue ;`. The traditional B form parenthesizes the value,
/// `return (x);`, which needs no special handling here.
fn parse_return_statement<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Stmt> {
    p.tokens.take_token(); // `return`

    let value = if p.tokens.next_token_has_type(&TokenType::Semicolon) {
        None
    } else {
        Some(expr::parse_expression(p)?)
    };
    expect_token(p, &TokenType::Semicolon)?;

    Ok(p.semantics.return_stmt(value))
}

// Token helpers
// =============

/// Is the token an identifier which is not a reserved keyword?
fn token_is_unreserved_identifier(token: &Token) -> bool {
    match token.get_identifier() {
        Some(id) => !KEYWORDS.contains(&id.as_str()),
        None => false,
    }
}

/// Consumes the next token if it has the expected type; returns whether it did.
pub(super) fn take_if<S: Semantics>(p: &mut Parser<S>, token_type: &TokenType) -> bool {
    p.tokens.take_token_if_expected(token_type).is_some()
}

/// Consumes the next token, requiring it to have the given type.
pub(super) fn expect_token<S: Semantics>(p: &mut Parser<S>, expected: &TokenType) -> ParseResult<SourceLocation> {
    match p.tokens.take_token() {
        Some(token) if token.token_type == *expected => Ok(token.location),
        Some(token) => Err(unexpected(&format!("`{expected}`"), token)),
        None => Err(eof(&format!("`{expected}`"))),
    }
}

/// Consumes the next token, requiring it to be an identifier, and returns its name.
pub(super) fn expect_identifier<S: Semantics>(p: &mut Parser<S>, expected: &str) -> ParseResult<String> {
    match p.tokens.take_token() {
        Some(token) => match token.get_identifier() {
            Some(id) => Ok(id.clone()),
            None => Err(unexpected(expected, token)),
        },
        None => Err(eof(expected)),
    }
}

/// Creates an unexpected-token error.
pub(super) fn unexpected(expected: &str, found: &Token) -> ParseError {
    ParseError::UnexpectedToken {
        expected: expected.to_string(),
        found: format!("`{}`", found.token_type),
        loc: found.location,
    }
}

/// Creates an unexpected-end-of-input error.
pub(super) fn eof(expected: &str) -> ParseError {
    ParseError::UnexpectedEof { expected: expected.to_string() }
}

// Literal evaluation
// ==================

/// Evaluates a decimal digit string into a word.
pub(super) fn evaluate_numeric(digits: &str, target: Target, loc: SourceLocation) -> ParseResult<Word> {
    let too_large = ParseError::NumberTooLarge { bits: target.bits(), loc };

    let value: u128 = digits.parse().map_err(|_| too_large.clone())?;
    if value > target.max_word() as u128 {
        return Err(too_large);
    }

    Ok(value as Word)
}

/// Packs a character literal's expanded bytes into a word.
///
/// The first character goes into the least significant byte, each subsequent character one
/// byte higher; unused high bytes are zero.
pub(super) fn pack_character(bytes: &[u8], target: Target, loc: SourceLocation) -> ParseResult<Word> {
    if bytes.len() > target.bytes_per_word() as usize {
        return Err(ParseError::CharLiteralTooWide { bytes: target.bytes_per_word(), loc });
    }

    let mut value: Word = 0;
    for (i, &b) in bytes.iter().enumerate() {
        value |= (b as Word) << (8 * i);
    }

    Ok(value)
}
