use crate::{
    ast::{
        ast::Stmt,
        statements::{
            EnumDeclStmt, EnumVariant, FnDeclStmt, ImportStmt, MatchArm, MatchStmt, Pattern,
            VarDeclStmt,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    parser::{expr::parse_expr, lookups::BindingPower},
    Span, MK_TOKEN,
};

use super::{
    expr::{parse_async_lambda_expr, parse_infix, parse_literal},
    parser::Parser,
};

/// Parses one statement and the `;` that may follow it.
pub fn parse_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    let stmt = match parser.lookups().get_stmt(parser.current_token_kind()) {
        Some(handler) => handler(parser)?,
        None => parse_expr(parser, BindingPower::Default)?.into_stmt(),
    };

    parser.match_token(TokenKind::Semicolon);
    Ok(stmt)
}

pub fn parse_var_decl_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    parser.advance();
    let is_fallible = parser.match_token(TokenKind::Not);

    let identifier =
        parser.expect_error(TokenKind::Identifier, "expected variable name after 'let'")?;
    parser.expect_error(TokenKind::Assignment, "expected '=' after variable name")?;
    let assigned_value = parse_expr(parser, BindingPower::Default)?;

    let decl = VarDeclStmt {
        identifier,
        assigned_value,
    };

    if is_fallible {
        Ok(Stmt::FallibleLet(decl))
    } else {
        Ok(Stmt::Let(decl))
    }
}

pub fn parse_import_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    parser.advance();
    let path = parser.expect_error(TokenKind::String, "expected module path string after 'import'")?;

    Ok(Stmt::Import(ImportStmt { path }))
}

/// Parses a `{ stmt* }` block, braces included.
pub fn parse_block(parser: &mut Parser<'_>) -> Result<Vec<Stmt>, Error> {
    parser.enter_nesting()?;
    let block = parser.with_enum_fields(true, parse_block_body);
    parser.leave_nesting();
    block
}

fn parse_block_body(parser: &mut Parser<'_>) -> Result<Vec<Stmt>, Error> {
    parser.expect_error(TokenKind::OpenCurly, "expected '{' before block")?;

    let mut statements = Vec::new();
    while !parser.check(TokenKind::CloseCurly) && parser.has_tokens() {
        statements.push(parse_stmt(parser)?);
    }

    parser.expect_error(TokenKind::CloseCurly, "expected '}' at end of block")?;
    Ok(statements)
}

/// Parses `name, name` up to and including `}`; the `{` is already consumed.
/// The commas are optional.
fn parse_field_names(parser: &mut Parser<'_>, message: &str) -> Result<Vec<Token>, Error> {
    let mut fields = Vec::new();

    while !parser.check(TokenKind::CloseCurly) && parser.has_tokens() {
        fields.push(parser.expect_error(TokenKind::Identifier, message)?);
        parser.match_token(TokenKind::Comma);
    }

    parser.expect_error(TokenKind::CloseCurly, "expected '}' after field names")?;
    Ok(fields)
}

/// Parses identifiers up to and including `)`; the `(` is already consumed.
pub fn parse_parameters(parser: &mut Parser<'_>) -> Result<Vec<Token>, Error> {
    let mut parameters = Vec::new();

    while !parser.check(TokenKind::CloseParen) {
        parameters.push(parser.expect_error(TokenKind::Identifier, "expected parameter name")?);

        if !parser.match_token(TokenKind::Comma) && !parser.check(TokenKind::CloseParen) {
            return Err(Error::unexpected(parser.current_token(), "expected ',' or ')'"));
        }
    }

    parser.advance();
    Ok(parameters)
}

/// Parses the part of a function declaration after `func`.
fn parse_fn_decl(parser: &mut Parser<'_>, is_async: bool) -> Result<Stmt, Error> {
    let identifier =
        parser.expect_error(TokenKind::Identifier, "expected function name after 'func'")?;
    parser.expect_error(TokenKind::OpenParen, "expected '(' after function name")?;
    let parameters = parse_parameters(parser)?;
    let body = parse_block(parser)?;

    Ok(Stmt::FnDecl(FnDeclStmt {
        identifier,
        parameters,
        body,
        is_async,
    }))
}

pub fn parse_fn_decl_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    parser.advance();
    parse_fn_decl(parser, false)
}

/// `async func` declares a function; `async fn` starts an expression.
pub fn parse_async_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    let async_token = parser.advance().clone();

    match parser.current_token_kind() {
        TokenKind::Func => {
            parser.advance();
            parse_fn_decl(parser, true)
        }
        TokenKind::Fn => {
            let lambda = parse_async_lambda_expr(parser, async_token)?;
            Ok(parse_infix(parser, lambda, BindingPower::Default)?.into_stmt())
        }
        _ => Err(Error::unexpected(
            parser.current_token(),
            "expected 'func' or 'fn' after 'async'",
        )),
    }
}

pub fn parse_enum_decl_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    parser.advance();

    let identifier = parser.expect_error(TokenKind::Identifier, "expected enum name after 'enum'")?;
    parser.expect_error(TokenKind::OpenCurly, "expected '{' after enum name")?;

    let mut variants = Vec::new();
    while !parser.check(TokenKind::CloseCurly) && parser.has_tokens() {
        let name = parser.expect_error(
            TokenKind::Identifier,
            "expected variant name in enum declaration",
        )?;

        let fields = if parser.match_token(TokenKind::OpenCurly) {
            parse_field_names(parser, "expected field name in enum variant")?
        } else {
            Vec::new()
        };
        variants.push(EnumVariant { name, fields });

        if !parser.match_token(TokenKind::Comma) && !parser.check(TokenKind::CloseCurly) {
            return Err(Error::unexpected(
                parser.current_token(),
                "expected ',' or '}' in enum declaration",
            ));
        }
    }

    parser.expect_error(TokenKind::CloseCurly, "expected '}' after enum variants")?;

    Ok(Stmt::EnumDecl(EnumDeclStmt {
        identifier,
        variants,
    }))
}

pub fn parse_match_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    parser.advance();

    let scrutinee =
        parser.with_enum_fields(false, |parser| parse_expr(parser, BindingPower::Default))?;
    parser.expect_error(TokenKind::OpenCurly, "expected '{' after match value")?;

    let mut arms = Vec::new();
    while !parser.check(TokenKind::CloseCurly) && parser.has_tokens() {
        arms.push(parse_match_arm(parser)?);
        parser.match_token(TokenKind::Comma);
    }

    parser.expect_error(TokenKind::CloseCurly, "expected '}' after match arms")?;

    Ok(Stmt::Match(MatchStmt { scrutinee, arms }))
}

fn parse_match_arm(parser: &mut Parser<'_>) -> Result<MatchArm, Error> {
    let mut patterns = vec![parse_pattern(parser)?];
    while parser.match_token(TokenKind::Pipe) {
        patterns.push(parse_pattern(parser)?);
    }

    if patterns.len() > 1
        && patterns
            .iter()
            .any(|pattern| matches!(pattern, Pattern::Struct { .. }))
    {
        return Err(Error::new(
            ErrorImpl::StructPatternInAlternation,
            parser.previous_token().line,
        ));
    }

    parser.expect_error(TokenKind::Arrow, "expected '->' after pattern in match arm")?;
    let result = parse_expr(parser, BindingPower::Default)?;

    Ok(MatchArm { patterns, result })
}

pub fn parse_pattern(parser: &mut Parser<'_>) -> Result<Pattern, Error> {
    parser.enter_nesting()?;
    let pattern = parse_nested_pattern(parser);
    parser.leave_nesting();
    pattern
}

fn parse_nested_pattern(parser: &mut Parser<'_>) -> Result<Pattern, Error> {
    let token = parser.advance().clone();

    match token.kind {
        TokenKind::Underscore => Ok(Pattern::Wildcard(token)),
        TokenKind::Number | TokenKind::String | TokenKind::True | TokenKind::False => {
            Ok(Pattern::Literal(parse_literal(token)?))
        }
        TokenKind::Dash if parser.check(TokenKind::Number) => {
            // -1, kept as a single negative literal
            let number = parser.advance().clone();
            let negated = MK_TOKEN!(
                TokenKind::Number,
                format!("-{}", number.value),
                Span {
                    start: token.span.start,
                    end: number.span.end,
                },
                token.line
            );
            Ok(Pattern::Literal(parse_literal(negated)?))
        }
        TokenKind::OpenCurly => {
            // { name, age }
            if parser.check(TokenKind::CloseCurly) {
                return Err(Error::new(ErrorImpl::EmptyStructPattern, token.line));
            }

            let fields = parse_field_names(parser, "expected field name in struct pattern")?;
            Ok(Pattern::Struct { fields })
        }
        TokenKind::Identifier if parser.check(TokenKind::DoubleColon) => {
            // Shape::Circle { radius }
            parser.advance();
            let variant =
                parser.expect_error(TokenKind::Identifier, "expected variant name in enum pattern")?;

            let fields = if parser.match_token(TokenKind::OpenCurly) {
                parse_field_names(parser, "expected field name in enum pattern")?
            } else {
                Vec::new()
            };

            Ok(Pattern::Enum {
                enum_name: token,
                variant,
                fields,
            })
        }
        TokenKind::Identifier if parser.check(TokenKind::OpenParen) => {
            // Some(x)
            parser.advance();

            let mut arguments = Vec::new();
            while !parser.check(TokenKind::CloseParen) && parser.has_tokens() {
                arguments.push(parse_pattern(parser)?);
                parser.match_token(TokenKind::Comma);
            }

            parser.expect_error(
                TokenKind::CloseParen,
                "expected ')' after constructor pattern arguments",
            )?;
            Ok(Pattern::Constructor {
                name: token,
                arguments,
            })
        }
        TokenKind::Identifier => Ok(Pattern::Binding(token)),
        TokenKind::Error | TokenKind::EOF => Err(Error::unexpected(&token, "expected a pattern")),
        _ => Err(Error::new(
            ErrorImpl::InvalidPattern {
                token: token.value.clone(),
            },
            token.line,
        )),
    }
}
