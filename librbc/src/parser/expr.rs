// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `expr` module defines the parsing functions for B expressions.
//!
//! The precedence ladder, loosest binding first:
//!
//! ```markdown
//! <assignment>  ::= <conditional> [ <assign_op> <assignment> ]          (right associative)
//! <conditional> ::= <or> [ "?" <expression> ":" <conditional> ]
//! <or>          ::= <xor>        { "|"  <xor> }
//! <xor>         ::= <and>        { "^"  <and> }
//! <and>         ::= <equality>   { "&"  <equality> }
//! <equality>    ::= <relational> { ( "==" | "!=" ) <relational> }
//! <relational>  ::= <shift>      { ( "<" | "<=" | ">" | ">=" ) <shift> }
//! <shift>       ::= <additive>   { ( "<<" | ">>" ) <additive> }
//! <additive>    ::= <mult>       { ( "+" | "-" ) <mult> }
//! <mult>        ::= <unary>      { ( "*" | "/" | "%" ) <unary> }
//! <unary>       ::= ( "-" | "!" | "~" | "*" | "&" | "++" | "--" ) <unary> | <postfix>
//! <postfix>     ::= <primary> { "(" <args> ")" | "[" <expression> "]" | "++" | "--" }
//! <primary>     ::= <name> | <number> | <char> | <string> | "(" <expression> ")"
//! ```
//!
//! `&` and `|` are eager bitwise operators; B has no short-circuit forms, so a conditional
//! context simply tests the resulting word against zero.

use crate::lexer::TokenType;

use super::ast::{BinaryOp, UnaryOp};
use super::recursive_descent::{eof, evaluate_numeric, expect_token, pack_character, take_if, unexpected};
use super::{ParseResult, Parser, Semantics};

/// Parses an expression.
pub(super) fn parse_expression<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Expr> {
    parse_assignment(p)
}

/// Parses an assignment, which is right associative: `a = b = c` assigns `c` to both.
fn parse_assignment<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Expr> {
    let lhs = parse_conditional(p)?;

    let op = match p.tokens.peek_next_token() {
        Some(token) if token.has_type(&TokenType::Assign) => None,
        Some(token) if token.token_type.is_compound_assignment() => Some(assignment_operator(&token.token_type)),
        _ => return Ok(lhs),
    };

    p.tokens.take_token();
    let rhs = parse_assignment(p)?;
    Ok(p.semantics.assign_expr(op, lhs, rhs))
}

/// Parses a conditional: `cond ? then : else`, with a right-associative else arm.
fn parse_conditional<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Expr> {
    let cond = parse_or(p)?;

    if !take_if(p, &TokenType::QuestionMark) {
        return Ok(cond);
    }

    let then_expr = parse_expression(p)?;
    expect_token(p, &TokenType::Colon)?;
    let else_expr = parse_conditional(p)?;

    Ok(p.semantics.conditional_expr(cond, then_expr, else_expr))
}

fn parse_or<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Expr> {
    parse_left_associative(p, &[(TokenType::Pipe, BinaryOp::Or)], parse_xor)
}

fn parse_xor<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Expr> {
    parse_left_associative(p, &[(TokenType::Caret, BinaryOp::Xor)], parse_and)
}

fn parse_and<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Expr> {
    parse_left_associative(p, &[(TokenType::Ampersand, BinaryOp::And)], parse_equality)
}

fn parse_equality<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Expr> {
    parse_left_associative(
        p,
        &[(TokenType::EqualTo, BinaryOp::EqualTo), (TokenType::NotEqualTo, BinaryOp::NotEqualTo)],
        parse_relational,
    )
}

fn parse_relational<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Expr> {
    parse_left_associative(
        p,
        &[
            (TokenType::LessThan, BinaryOp::LessThan),
            (TokenType::LessThanOrEqualTo, BinaryOp::LessThanOrEqualTo),
            (TokenType::GreaterThan, BinaryOp::GreaterThan),
            (TokenType::GreaterThanOrEqualTo, BinaryOp::GreaterThanOrEqualTo),
        ],
        parse_shift,
    )
}

fn parse_shift<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Expr> {
    parse_left_associative(
        p,
        &[(TokenType::LeftShift, BinaryOp::LeftShift), (TokenType::RightShift, BinaryOp::RightShift)],
        parse_additive,
    )
}

fn parse_additive<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Expr> {
    parse_left_associative(
        p,
        &[(TokenType::Plus, BinaryOp::Add), (TokenType::Minus, BinaryOp::Subtract)],
        parse_mult,
    )
}

fn parse_mult<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Expr> {
    parse_left_associative(
        p,
        &[
            (TokenType::Star, BinaryOp::Multiply),
            (TokenType::Slash, BinaryOp::Divide),
            (TokenType::Percent, BinaryOp::Remainder),
        ],
        parse_unary,
    )
}

/// Parses one left-associative precedence level: `next { op next }`.
fn parse_left_associative<S: Semantics>(
    p: &mut Parser<S>,
    operators: &[(TokenType, BinaryOp)],
    next: fn(&mut Parser<S>) -> ParseResult<S::Expr>,
) -> ParseResult<S::Expr> {
    let mut lhs = next(p)?;

    'more: loop {
        for (token_type, op) in operators {
            if take_if(p, token_type) {
                let rhs = next(p)?;
                lhs = p.semantics.binary_expr(*op, lhs, rhs);
                continue 'more;
            }
        }
        return Ok(lhs);
    }
}

/// Parses a unary expression. Prefix operators bind right to left.
fn parse_unary<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Expr> {
    let op = match p.tokens.peek_next_token().map(|t| &t.token_type) {
        Some(TokenType::Minus) => Some(UnaryOp::Negate),
        Some(TokenType::Bang) => Some(UnaryOp::LogicalNot),
        Some(TokenType::Tilde) => Some(UnaryOp::BitwiseNot),
        Some(TokenType::Star) => Some(UnaryOp::Deref),
        Some(TokenType::Ampersand) => Some(UnaryOp::AddressOf),
        Some(TokenType::Increment) => Some(UnaryOp::PreIncrement),
        Some(TokenType::Decrement) => Some(UnaryOp::PreDecrement),
        _ => None,
    };

    let Some(op) = op else {
        return parse_postfix(p);
    };

    p.tokens.take_token();
    let operand = parse_unary(p)?;
    Ok(p.semantics.unary_expr(op, operand))
}

/// Parses a postfix expression: calls, vector indexing, and post-increment/decrement, which
/// all bind left to right.
fn parse_postfix<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Expr> {
    let mut expr = parse_primary(p)?;

    loop {
        if take_if(p, &TokenType::OpenParen) {
            let mut args = Vec::new();
            if !take_if(p, &TokenType::CloseParen) {
                args.push(parse_expression(p)?);
                while take_if(p, &TokenType::Comma) {
                    args.push(parse_expression(p)?);
                }
                expect_token(p, &TokenType::CloseParen)?;
            }
            expr = p.semantics.call_expr(expr, args);
        } else if take_if(p, &TokenType::OpenSqBracket) {
            let index = parse_expression(p)?;
            expect_token(p, &TokenType::CloseSqBracket)?;
            expr = p.semantics.index_expr(expr, index);
        } else if take_if(p, &TokenType::Increment) {
            expr = p.semantics.unary_expr(UnaryOp::PostIncrement, expr);
        } else if take_if(p, &TokenType::Decrement) {
            expr = p.semantics.unary_expr(UnaryOp::PostDecrement, expr);
        } else {
            return Ok(expr);
        }
    }
}

/// Parses a primary expression: a name, a literal, or a parenthesized expression.
fn parse_primary<S: Semantics>(p: &mut Parser<S>) -> ParseResult<S::Expr> {
    let Some(token) = p.tokens.take_token() else {
        return Err(eof("an expression"));
    };

    match token.token_type {
        TokenType::Identifier(ref name) => {
            let name = name.clone();
            Ok(p.semantics.name_expr(name))
        }

        TokenType::NumericLiteral(ref digits) => {
            let value = evaluate_numeric(digits, p.target, token.location)?;
            Ok(p.semantics.numeric_expr(value))
        }

        TokenType::CharLiteral(ref bytes) => {
            let value = pack_character(bytes, p.target, token.location)?;
            Ok(p.semantics.character_expr(value))
        }

        TokenType::StringLiteral(ref bytes) => {
            let bytes = bytes.clone();
            Ok(p.semantics.string_expr(bytes))
        }

        TokenType::OpenParen => {
            let expr = parse_expression(p)?;
            expect_token(p, &TokenType::CloseParen)?;
            Ok(expr)
        }

        _ => Err(unexpected("an expression", token)),
    }
}

/// Translates an `=op` token into the binary operator it applies.
#[rustfmt::skip]
fn assignment_operator(token_type: &TokenType) -> BinaryOp {
    match token_type {
        TokenType::AssignPlus                 => BinaryOp::Add,
        TokenType::AssignMinus                => BinaryOp::Subtract,
        TokenType::AssignStar                 => BinaryOp::Multiply,
        TokenType::AssignSlash                => BinaryOp::Divide,
        TokenType::AssignPercent              => BinaryOp::Remainder,
        TokenType::AssignPipe                 => BinaryOp::Or,
        TokenType::AssignAmpersand            => BinaryOp::And,
        TokenType::AssignCaret                => BinaryOp::Xor,
        TokenType::AssignLeftShift            => BinaryOp::LeftShift,
        TokenType::AssignRightShift           => BinaryOp::RightShift,
        TokenType::AssignEqualTo              => BinaryOp::EqualTo,
        TokenType::AssignNotEqualTo           => BinaryOp::NotEqualTo,
        TokenType::AssignLessThan             => BinaryOp::LessThan,
        TokenType::AssignGreaterThan          => BinaryOp::GreaterThan,
        TokenType::AssignLessThanOrEqualTo    => BinaryOp::LessThanOrEqualTo,
        TokenType::AssignGreaterThanOrEqualTo => BinaryOp::GreaterThanOrEqualTo,
        _ => crate::ICE!("token '{token_type}' is not an assignment operator"),
    }
}
