use std::mem;

use crate::{
    ast::{
        ast::Expr,
        expressions::{
            ArrayAppendExpr, AwaitExpr, BinaryExpr, CallExpr, EnumConstructorExpr, Field,
            GroupingExpr, IfExpr, IndexExpr, InterpolationPart, LambdaExpr, ListExpr,
            LiteralExpr, LiteralValue, MemberExpr, PipelineExpr, PrefixExpr,
            StringInterpolationExpr, StructInitExpr, StructUpdateExpr, SymbolExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
};

use super::{
    lookups::BindingPower,
    parser::Parser,
    stmt::{parse_block, parse_parameters},
};

/// Parses an expression whose operators all bind tighter than `bp`.
pub fn parse_expr(parser: &mut Parser<'_>, bp: BindingPower) -> Result<Expr, Error> {
    parser.enter_nesting()?;
    let expr = parse_nested_expr(parser, bp);
    parser.leave_nesting();
    expr
}

fn parse_nested_expr(parser: &mut Parser<'_>, bp: BindingPower) -> Result<Expr, Error> {
    let token = parser.advance().clone();

    let nud = match parser.lookups().get_nud(token.kind) {
        Some(nud) => nud,
        None => return Err(expected_expression(&token)),
    };

    let left = nud(parser, token)?;
    parse_infix(parser, left, bp)
}

/// Continues an expression from an already parsed left operand.
pub fn parse_infix(parser: &mut Parser<'_>, mut left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let lookups = parser.lookups();

    // While the upcoming operator binds tighter than bp, keep extending lhs
    while parser.has_tokens() && lookups.binding_power(parser.current_token_kind()) > bp {
        let operator = parser.advance().clone();
        let operator_bp = lookups.binding_power(operator.kind);

        let led = match lookups.get_led(operator.kind) {
            Some(led) => led,
            None => return Err(Error::unexpected(&operator, "unexpected infix operator")),
        };

        left = led(parser, left, operator, operator_bp)?;
    }

    Ok(left)
}

/// Parses a full expression between brackets, where `Name::Variant {` always
/// takes a field list.
fn parse_enclosed_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    parser.with_enum_fields(true, |parser| parse_expr(parser, BindingPower::Default))
}

fn expected_expression(token: &Token) -> Error {
    match token.kind {
        TokenKind::Error | TokenKind::EOF => Error::unexpected(token, "expected an expression"),
        _ => Error::new(
            ErrorImpl::ExpectedExpression {
                token: token.value.clone(),
            },
            token.line,
        ),
    }
}

/// Builds a literal from a number, string or boolean token.
pub fn parse_literal(token: Token) -> Result<LiteralExpr, Error> {
    let value = match token.kind {
        TokenKind::Number => match token.value.parse::<f64>() {
            Ok(number) => LiteralValue::Number(number),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    token.line,
                ))
            }
        },
        TokenKind::String => LiteralValue::String(token.value.clone()),
        TokenKind::True => LiteralValue::Boolean(true),
        TokenKind::False => LiteralValue::Boolean(false),
        _ => return Err(expected_expression(&token)),
    };

    Ok(LiteralExpr { value, token })
}

pub fn parse_primary_expr(parser: &mut Parser<'_>, token: Token) -> Result<Expr, Error> {
    match token.kind {
        TokenKind::Identifier if parser.check(TokenKind::DoubleColon) => {
            parse_enum_constructor_expr(parser, token)
        }
        TokenKind::Identifier => Ok(Expr::Symbol(SymbolExpr { name: token })),
        _ => Ok(Expr::Literal(parse_literal(token)?)),
    }
}

/// `Shape::Circle { radius = 2 }` or `Shape::Point`; `enum_name` is consumed.
fn parse_enum_constructor_expr(parser: &mut Parser<'_>, enum_name: Token) -> Result<Expr, Error> {
    parser.advance();
    let variant = parser.expect_error(TokenKind::Identifier, "expected variant name after '::'")?;

    let fields = if parser.enum_fields_allowed() && parser.match_token(TokenKind::OpenCurly) {
        parse_fields(parser)?
    } else {
        vec![]
    };

    Ok(Expr::EnumConstructor(EnumConstructorExpr {
        enum_name,
        variant,
        fields,
    }))
}

fn invalid_interpolation(token: &Token, message: &str) -> Error {
    Error::new(
        ErrorImpl::InvalidInterpolation {
            message: message.to_string(),
        },
        token.line,
    )
}

/// Splits an interpolated string into text and `${...}` expressions. Braces
/// inside an embedded expression must balance.
pub fn parse_interpolation_expr(parser: &mut Parser<'_>, token: Token) -> Result<Expr, Error> {
    let mut parts = vec![];
    let mut text = String::new();
    let mut chars = token.value.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        if c != '$' || chars.peek().map(|&(_, next)| next) != Some('{') {
            text.push(c);
            continue;
        }
        chars.next();

        if !text.is_empty() {
            parts.push(InterpolationPart::Text(mem::take(&mut text)));
        }

        let start = index + 2;
        let mut open = 1;
        let mut end = None;
        for (i, c) in chars.by_ref() {
            match c {
                '{' => open += 1,
                '}' => {
                    open -= 1;
                    if open == 0 {
                        end = Some(i);
                        break;
                    }
                }
                _ => {}
            }
        }

        let end = end.ok_or_else(|| invalid_interpolation(&token, "unclosed '${'"))?;
        let source = &token.value[start..end];
        if source.trim().is_empty() {
            return Err(invalid_interpolation(&token, "empty '${}'"));
        }

        let line = token.line + token.value[..start].matches('\n').count() as u32;
        parts.push(InterpolationPart::Expr(parse_embedded_expr(parser, source, line)?));
    }

    if !text.is_empty() {
        parts.push(InterpolationPart::Text(text));
    }

    Ok(Expr::Interpolation(StringInterpolationExpr { parts, token }))
}

fn parse_embedded_expr(parser: &Parser<'_>, source: &str, line: u32) -> Result<Expr, Error> {
    let mut nested = parser.nested(Lexer::with_line(source, line));
    let expr = parse_expr(&mut nested, BindingPower::Default)?;

    let trailing = nested.current_token();
    match trailing.kind {
        TokenKind::EOF => Ok(expr),
        TokenKind::Error => Err(Error::unexpected(trailing, "")),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: trailing.value.clone(),
            },
            trailing.line,
        )),
    }
}

pub fn parse_binary_expr(
    parser: &mut Parser<'_>,
    left: Expr,
    operator: Token,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_pipeline_expr(
    parser: &mut Parser<'_>,
    left: Expr,
    _operator: Token,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Pipeline(PipelineExpr {
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser<'_>, operator: Token) -> Result<Expr, Error> {
    let rhs = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Prefix(PrefixExpr {
        operator,
        right_expr: Box::new(rhs),
    }))
}

pub fn parse_await_expr(parser: &mut Parser<'_>, _token: Token) -> Result<Expr, Error> {
    let expression = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Await(AwaitExpr {
        expression: Box::new(expression),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser<'_>, _token: Token) -> Result<Expr, Error> {
    let expression = parse_enclosed_expr(parser)?;
    parser.expect_error(TokenKind::CloseParen, "expected ')' after expression")?;

    Ok(Expr::Grouping(GroupingExpr {
        expression: Box::new(expression),
    }))
}

/// Parses expressions up to `closing`, which is consumed. Commas between
/// elements are optional.
fn parse_elements(
    parser: &mut Parser<'_>,
    closing: TokenKind,
    message: &str,
) -> Result<Vec<Expr>, Error> {
    let mut elements = vec![];

    while !parser.check(closing) && parser.has_tokens() {
        if parser.match_token(TokenKind::Comma) {
            continue;
        }
        elements.push(parse_enclosed_expr(parser)?);
    }

    parser.expect_error(closing, message)?;
    Ok(elements)
}

/// Parses `key = value` pairs up to and including the closing `}`.
fn parse_fields(parser: &mut Parser<'_>) -> Result<Vec<Field>, Error> {
    let mut fields = vec![];

    while !parser.check(TokenKind::CloseCurly) && parser.has_tokens() {
        let key = parser.expect_error(TokenKind::Identifier, "expected field name")?;
        parser.expect_error(TokenKind::Assignment, "expected '=' after field name")?;
        let value = parse_enclosed_expr(parser)?;

        fields.push(Field { key, value });

        if parser.check(TokenKind::Comma) {
            parser.advance();
        }
    }

    parser.expect_error(TokenKind::CloseCurly, "expected '}' after struct fields")?;
    Ok(fields)
}

pub fn parse_list_expr(parser: &mut Parser<'_>, _token: Token) -> Result<Expr, Error> {
    let elements = parse_elements(parser, TokenKind::CloseBracket, "expected ']' after list elements")?;

    Ok(Expr::List(ListExpr { elements }))
}

pub fn parse_struct_init_expr(parser: &mut Parser<'_>, _token: Token) -> Result<Expr, Error> {
    // { name = "Alice", age = 30 }
    let fields = parse_fields(parser)?;

    Ok(Expr::StructInit(StructInitExpr { fields }))
}

pub fn parse_call_expr(
    parser: &mut Parser<'_>,
    left: Expr,
    _operator: Token,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let limit = parser.options().max_arguments;
    let mut arguments = vec![];

    while !parser.check(TokenKind::CloseParen) && parser.has_tokens() {
        if parser.match_token(TokenKind::Comma) {
            continue;
        }

        if arguments.len() >= limit {
            return Err(Error::new(
                ErrorImpl::TooManyArguments { limit },
                parser.current_token().line,
            ));
        }
        arguments.push(parse_enclosed_expr(parser)?);
    }

    parser.expect_error(TokenKind::CloseParen, "expected ')' after arguments")?;

    Ok(Expr::Call(CallExpr {
        callee: Box::new(left),
        arguments,
    }))
}

pub fn parse_member_expr(
    parser: &mut Parser<'_>,
    left: Expr,
    _operator: Token,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let property = parser.expect_error(TokenKind::Identifier, "expected property name after '.'")?;

    Ok(Expr::Member(MemberExpr {
        object: Box::new(left),
        property,
    }))
}

pub fn parse_index_expr(
    parser: &mut Parser<'_>,
    left: Expr,
    _operator: Token,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let index = parse_enclosed_expr(parser)?;
    parser.expect_error(TokenKind::CloseBracket, "expected ']' after index")?;

    Ok(Expr::Index(IndexExpr {
        object: Box::new(left),
        index: Box::new(index),
    }))
}

/// `base <- { k = v }` updates struct fields, `base <- [e]` appends to a list.
pub fn parse_update_expr(
    parser: &mut Parser<'_>,
    left: Expr,
    _operator: Token,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::OpenCurly => {
            parser.advance();
            let fields = parse_fields(parser)?;

            Ok(Expr::StructUpdate(StructUpdateExpr {
                base: Box::new(left),
                fields,
            }))
        }
        TokenKind::OpenBracket => {
            parser.advance();
            let elements = parse_elements(parser, TokenKind::CloseBracket, "expected ']' after appended elements")?;

            Ok(Expr::ArrayAppend(ArrayAppendExpr {
                base: Box::new(left),
                elements,
            }))
        }
        _ => Err(Error::unexpected(
            parser.current_token(),
            "expected '{' or '[' after '<-'",
        )),
    }
}

/// Parses the part of a lambda after `fn`.
fn parse_lambda(parser: &mut Parser<'_>, is_async: bool) -> Result<LambdaExpr, Error> {
    parser.expect_error(TokenKind::OpenParen, "expected '(' after 'fn'")?;
    let parameters = parse_parameters(parser)?;
    parser.expect_error(TokenKind::Arrow, "expected '->' after lambda parameters")?;

    let body = if parser.check(TokenKind::OpenCurly) {
        parse_block(parser)?
    } else {
        vec![parse_expr(parser, BindingPower::Default)?.into_stmt()]
    };

    Ok(LambdaExpr {
        parameters,
        body,
        is_async,
    })
}

pub fn parse_lambda_expr(parser: &mut Parser<'_>, _token: Token) -> Result<Expr, Error> {
    Ok(Expr::Lambda(parse_lambda(parser, false)?))
}

pub fn parse_async_lambda_expr(parser: &mut Parser<'_>, _token: Token) -> Result<Expr, Error> {
    parser.expect_error(TokenKind::Fn, "expected 'fn' after 'async'")?;

    Ok(Expr::Lambda(parse_lambda(parser, true)?))
}

pub fn parse_if_expr(parser: &mut Parser<'_>, _token: Token) -> Result<Expr, Error> {
    let condition =
        parser.with_enum_fields(false, |parser| parse_expr(parser, BindingPower::Default))?;
    let then_body = parse_block(parser)?;

    let else_body = if parser.match_token(TokenKind::Else) {
        if parser.check(TokenKind::If) {
            let token = parser.advance().clone();
            Some(vec![parse_if_expr(parser, token)?.into_stmt()])
        } else {
            Some(parse_block(parser)?)
        }
    } else {
        None
    };

    Ok(Expr::If(IfExpr {
        condition: Box::new(condition),
        then_body,
        else_body,
    }))
}
