//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Operator precedence and associativity
//! - Bindings, function declarations, imports
//! - Struct literals, struct updates, lambdas and pipelines
//! - Match statements and patterns
//! - Error reporting and recovery

use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        expressions::{InterpolationPart, LiteralValue},
        statements::Pattern,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::{tokenize, Lexer},
        tokens::TokenKind,
    },
};

use super::{
    lookups::{BindingPower, LOOKUPS},
    parser::{parse, parse_with_options, ParseOptions, MAX_ARGUMENTS, MAX_DEPTH},
};

fn parse_ok(source: &str) -> Program {
    let outcome = parse(Lexer::new(source));
    assert!(
        !outcome.had_error(),
        "unexpected diagnostics for {:?}: {:?}",
        source,
        outcome.diagnostics
    );
    outcome.program
}

fn first_error(source: &str) -> Error {
    let outcome = parse(Lexer::new(source));
    assert!(outcome.had_error(), "expected a diagnostic for {:?}", source);
    outcome.diagnostics[0].clone()
}

fn printed(source: &str) -> String {
    let program = parse_ok(source);
    assert_eq!(program.len(), 1);
    program.body[0].to_string()
}

fn expression(stmt: &Stmt) -> &Expr {
    match stmt {
        Stmt::Expression(stmt) => &stmt.expression,
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

#[test]
fn test_precedence() {
    assert_eq!(printed("2 + 3 * 4"), "(2 + (3 * 4))");
    assert_eq!(printed("2 * 3 + 4"), "((2 * 3) + 4)");
    assert_eq!(printed("10 - 6 / 2 % 4"), "(10 - ((6 / 2) % 4))");
}

#[test]
fn test_left_associativity() {
    let program = parse_ok("1 - 2 - 3");

    match expression(&program.body[0]) {
        Expr::Binary(outer) => {
            assert_eq!(outer.operator.kind, TokenKind::Dash);
            assert!(matches!(*outer.left, Expr::Binary(_)));
            match &*outer.right {
                Expr::Literal(literal) => assert_eq!(literal.value, LiteralValue::Number(3.0)),
                other => panic!("unexpected right operand {:?}", other),
            }
        }
        other => panic!("expected a binary expression, got {:?}", other),
    }
    assert_eq!(program.body[0].to_string(), "((1 - 2) - 3)");
}

#[test]
fn test_grouping_round_trip() {
    let program = parse_ok("(1 + 2) * 3");

    match expression(&program.body[0]) {
        Expr::Binary(binary) => assert!(matches!(*binary.left, Expr::Grouping(_))),
        other => panic!("expected a binary expression, got {:?}", other),
    }
    assert_eq!(program.body[0].to_string(), "((1 + 2) * 3)");
}

#[test]
fn test_grouping_of_plain_operand_keeps_parens() {
    assert_eq!(printed("(a)"), "(a)");
    assert_eq!(printed("((a))"), "(a)");
}

#[test]
fn test_pipeline_chain_nests_left() {
    let program = parse_ok("a |> b |> c");

    match expression(&program.body[0]) {
        Expr::Pipeline(outer) => {
            assert!(matches!(*outer.left, Expr::Pipeline(_)));
            match &*outer.right {
                Expr::Symbol(symbol) => assert_eq!(symbol.name.value, "c"),
                other => panic!("unexpected right side {:?}", other),
            }
        }
        other => panic!("expected a pipeline, got {:?}", other),
    }
    assert_eq!(program.body[0].to_string(), "((a |> b) |> c)");
}

#[test]
fn test_pipeline_is_loosest() {
    assert_eq!(printed("x + 1 |> f"), "((x + 1) |> f)");
    assert_eq!(printed("a || b |> c"), "((a || b) |> c)");
}

#[test]
fn test_unary_operators() {
    assert_eq!(printed("-a * b"), "((-a) * b)");
    assert_eq!(printed("!done"), "(!done)");
    assert_eq!(printed("-f(x)"), "(-f(x))");
    assert_eq!(printed("--x"), "(-(-x))");
}

#[test]
fn test_comparison_and_logical_operators() {
    assert_eq!(
        printed("a < b && c == d || e"),
        "(((a < b) && (c == d)) || e)"
    );
    assert_eq!(printed("a + 1 >= b * 2"), "((a + 1) >= (b * 2))");
    assert_eq!(printed("a != b == c"), "((a != b) == c)");
}

#[test]
fn test_postfix_chain() {
    assert_eq!(printed("obj.items[0].name(1)"), "obj.items[0].name(1)");
    assert_eq!(printed("f(1)(2)"), "f(1)(2)");
}

#[test]
fn test_call_arguments() {
    let program = parse_ok("f(g(1), [1, 2], { a = 1 })");

    match expression(&program.body[0]) {
        Expr::Call(call) => {
            assert_eq!(call.arguments.len(), 3);
            assert!(matches!(call.arguments[0], Expr::Call(_)));
            assert!(matches!(call.arguments[1], Expr::List(_)));
            assert!(matches!(call.arguments[2], Expr::StructInit(_)));
        }
        other => panic!("expected a call, got {:?}", other),
    }
}

#[test]
fn test_literals() {
    let program = parse_ok("3.5; \"hi\"; true; false");

    let values: Vec<LiteralValue> = program
        .iter()
        .map(|stmt| match expression(stmt) {
            Expr::Literal(literal) => literal.value.clone(),
            other => panic!("expected a literal, got {:?}", other),
        })
        .collect();

    assert_eq!(
        values,
        vec![
            LiteralValue::Number(3.5),
            LiteralValue::String("hi".to_string()),
            LiteralValue::Boolean(true),
            LiteralValue::Boolean(false),
        ]
    );
}

#[test]
fn test_struct_literal_keeps_field_order() {
    let program = parse_ok(r#"{ name = "Alice", age = 30 }"#);

    match expression(&program.body[0]) {
        Expr::StructInit(init) => {
            let keys: Vec<&str> = init.fields.iter().map(|field| field.key.value.as_str()).collect();
            assert_eq!(keys, vec!["name", "age"]);
            assert!(matches!(
                &init.fields[1].value,
                Expr::Literal(literal) if literal.value == LiteralValue::Number(30.0)
            ));
        }
        other => panic!("expected a struct literal, got {:?}", other),
    }
    assert_eq!(program.body[0].to_string(), r#"{ name = "Alice", age = 30 }"#);
}

#[test]
fn test_empty_struct_literal() {
    assert_eq!(printed("{}"), "{}");
}

#[test]
fn test_struct_update() {
    let program = parse_ok("user <- { age = 31 }");

    match expression(&program.body[0]) {
        Expr::StructUpdate(update) => {
            assert!(matches!(&*update.base, Expr::Symbol(symbol) if symbol.name.value == "user"));
            assert_eq!(update.fields.len(), 1);
            assert_eq!(update.fields[0].key.value, "age");
        }
        other => panic!("expected a struct update, got {:?}", other),
    }
    assert_eq!(program.body[0].to_string(), "user <- { age = 31 }");
}

#[test]
fn test_update_binds_tighter_than_arithmetic() {
    assert_eq!(printed("a + b <- { x = 1 }"), "(a + b <- { x = 1 })");
}

#[test]
fn test_array_append() {
    let program = parse_ok("xs <- [4, 5]");

    match expression(&program.body[0]) {
        Expr::ArrayAppend(append) => assert_eq!(append.elements.len(), 2),
        other => panic!("expected an array append, got {:?}", other),
    }
    assert_eq!(program.body[0].to_string(), "xs <- [4, 5]");
}

#[test]
fn test_update_requires_struct_or_list() {
    let error = first_error("a <- 1");

    assert_eq!(
        error.kind(),
        &ErrorImpl::UnexpectedTokenDetailed {
            token: "1".to_string(),
            message: "expected '{' or '[' after '<-'".to_string(),
        }
    );
}

#[test]
fn test_let_and_fallible_let() {
    let program = parse_ok("let x = 1; let! y = f(x)");

    assert!(matches!(&program.body[0], Stmt::Let(decl) if decl.identifier.value == "x"));
    assert!(matches!(&program.body[1], Stmt::FallibleLet(decl) if decl.identifier.value == "y"));
    assert_eq!(program.body[1].to_string(), "let! y = f(x)");
}

#[test]
fn test_let_errors() {
    assert_eq!(
        first_error("let = 1").kind(),
        &ErrorImpl::UnexpectedTokenDetailed {
            token: "=".to_string(),
            message: "expected variable name after 'let'".to_string(),
        }
    );
    assert_eq!(
        first_error("let x 5").kind(),
        &ErrorImpl::UnexpectedTokenDetailed {
            token: "5".to_string(),
            message: "expected '=' after variable name".to_string(),
        }
    );
}

#[test]
fn test_import() {
    let program = parse_ok(r#"import "lib/math""#);

    match &program.body[0] {
        Stmt::Import(import) => assert_eq!(import.path.value, "lib/math"),
        other => panic!("expected an import, got {:?}", other),
    }

    assert!(matches!(
        first_error("import math").kind(),
        ErrorImpl::UnexpectedTokenDetailed { .. }
    ));
}

#[test]
fn test_function_declaration_round_trip() {
    let program = parse_ok("func add(a, b) { a + b }");

    match &program.body[0] {
        Stmt::FnDecl(decl) => {
            assert_eq!(decl.identifier.value, "add");
            let parameters: Vec<&str> = decl.parameters.iter().map(|p| p.value.as_str()).collect();
            assert_eq!(parameters, vec!["a", "b"]);
            assert_eq!(decl.body.len(), 1);
            assert!(!decl.is_async);
        }
        other => panic!("expected a function declaration, got {:?}", other),
    }
    assert_eq!(program.body[0].to_string(), "func add(a, b) { (a + b) }");
}

#[test]
fn test_parameter_list_errors() {
    assert_eq!(
        first_error("func f(a b) {}").kind(),
        &ErrorImpl::UnexpectedTokenDetailed {
            token: "b".to_string(),
            message: "expected ',' or ')'".to_string(),
        }
    );
    assert_eq!(
        first_error("func f(1) {}").kind(),
        &ErrorImpl::UnexpectedTokenDetailed {
            token: "1".to_string(),
            message: "expected parameter name".to_string(),
        }
    );
}

#[test]
fn test_unclosed_block() {
    let error = first_error("func f() { 1");

    assert_eq!(
        error.kind(),
        &ErrorImpl::UnexpectedEof {
            message: "expected '}' at end of block".to_string(),
        }
    );
}

#[test]
fn test_lambda_forms() {
    assert_eq!(
        printed("let add = fn(a, b) -> { a + b }"),
        "let add = fn(a, b) -> { (a + b) }"
    );
    assert_eq!(printed("fn(x) -> x * 2"), "fn(x) -> { (x * 2) }");
    assert_eq!(printed("fn() -> {}"), "fn() -> {}");
}

#[test]
fn test_lambda_requires_arrow() {
    assert_eq!(
        first_error("fn(a) { a }").kind(),
        &ErrorImpl::UnexpectedTokenDetailed {
            token: "{".to_string(),
            message: "expected '->' after lambda parameters".to_string(),
        }
    );
}

#[test]
fn test_if_expression() {
    assert_eq!(
        printed("if x > 0 { 1 } else if x < 0 { -1 } else { 0 }"),
        "if (x > 0) { 1 } else { if (x < 0) { (-1) } else { 0 } }"
    );
    assert_eq!(printed("if ok { go() }"), "if ok { go() }");
}

#[test]
fn test_async_and_await() {
    let program = parse_ok("async func load(url) { let body = await fetch(url); body }");

    match &program.body[0] {
        Stmt::FnDecl(decl) => assert!(decl.is_async),
        other => panic!("expected a function declaration, got {:?}", other),
    }
    assert_eq!(
        program.body[0].to_string(),
        "async func load(url) { let body = (await fetch(url)); body }"
    );

    let program = parse_ok("async fn(x) -> await x");
    match expression(&program.body[0]) {
        Expr::Lambda(lambda) => assert!(lambda.is_async),
        other => panic!("expected a lambda, got {:?}", other),
    }

    let program = parse_ok("let job = async fn() -> 1");
    assert_eq!(program.body[0].to_string(), "let job = async fn() -> { 1 }");
}

#[test]
fn test_async_requires_func_or_fn() {
    assert_eq!(
        first_error("async x").kind(),
        &ErrorImpl::UnexpectedTokenDetailed {
            token: "x".to_string(),
            message: "expected 'func' or 'fn' after 'async'".to_string(),
        }
    );
}

#[test]
fn test_match_with_wildcard() {
    let program = parse_ok(r#"match x { 1 -> "one", _ -> "other" }"#);

    match &program.body[0] {
        Stmt::Match(stmt) => {
            assert_eq!(stmt.arms.len(), 2);
            assert!(matches!(
                &stmt.arms[0].patterns[0],
                Pattern::Literal(literal) if literal.value == LiteralValue::Number(1.0)
            ));
            assert!(stmt.arms[1].patterns[0].is_wildcard());
        }
        other => panic!("expected a match statement, got {:?}", other),
    }
    assert_eq!(
        program.body[0].to_string(),
        r#"match x { 1 -> "one", _ -> "other" }"#
    );
}

#[test]
fn test_match_patterns() {
    let source = r#"match v { Some(x) -> x, { name, age } -> name, 1 | 2 -> "small", true -> "yes", n -> n }"#;
    let program = parse_ok(source);

    match &program.body[0] {
        Stmt::Match(stmt) => {
            assert_eq!(stmt.arms.len(), 5);
            assert!(matches!(
                &stmt.arms[0].patterns[0],
                Pattern::Constructor { name, arguments } if name.value == "Some" && arguments.len() == 1
            ));
            assert!(matches!(&stmt.arms[1].patterns[0], Pattern::Struct { fields } if fields.len() == 2));
            assert_eq!(stmt.arms[2].patterns.len(), 2);
            assert!(matches!(&stmt.arms[4].patterns[0], Pattern::Binding(name) if name.value == "n"));
        }
        other => panic!("expected a match statement, got {:?}", other),
    }
    assert_eq!(program.body[0].to_string(), source);
}

#[test]
fn test_pattern_errors() {
    assert_eq!(
        first_error("match v { {a} | _ -> 1 }").kind(),
        &ErrorImpl::StructPatternInAlternation
    );
    assert_eq!(
        first_error("match v { {} -> 1 }").kind(),
        &ErrorImpl::EmptyStructPattern
    );
    assert_eq!(
        first_error("match v { + -> 1 }").kind(),
        &ErrorImpl::InvalidPattern {
            token: "+".to_string()
        }
    );
    assert_eq!(
        first_error("match v { x 1 }").kind(),
        &ErrorImpl::UnexpectedTokenDetailed {
            token: "1".to_string(),
            message: "expected '->' after pattern in match arm".to_string(),
        }
    );
}

#[test]
fn test_empty_match() {
    assert_eq!(printed("match x {}"), "match x {}");
}

#[test]
fn test_member_requires_identifier() {
    assert_eq!(
        first_error("a.1").kind(),
        &ErrorImpl::UnexpectedTokenDetailed {
            token: "1".to_string(),
            message: "expected property name after '.'".to_string(),
        }
    );
}

#[test]
fn test_grouping_requires_close_paren() {
    assert_eq!(
        first_error("(1 + 2").kind(),
        &ErrorImpl::UnexpectedEof {
            message: "expected ')' after expression".to_string(),
        }
    );
}

#[test]
fn test_missing_expression() {
    assert_eq!(
        first_error("1 +").kind(),
        &ErrorImpl::UnexpectedEof {
            message: "expected an expression".to_string(),
        }
    );
    assert_eq!(
        first_error(")").kind(),
        &ErrorImpl::ExpectedExpression {
            token: ")".to_string(),
        }
    );
}

#[test]
fn test_unterminated_string_is_reported() {
    let outcome = parse(Lexer::new(r#"let s = "abc"#));

    assert!(outcome.had_error());
    assert!(outcome.program.is_empty());
    assert_eq!(
        outcome.diagnostics[0].kind(),
        &ErrorImpl::Lexical {
            message: "Unterminated string.".to_string(),
        }
    );
}

#[test]
fn test_error_token_in_expression() {
    assert_eq!(
        first_error("let x = @").kind(),
        &ErrorImpl::Lexical {
            message: "Unexpected character.".to_string(),
        }
    );
}

#[test]
fn test_error_containment() {
    let source = "let a = 1\nlet b = 2\nlet c = )\nlet d = 4";
    let outcome = parse(Lexer::new(source));

    assert_eq!(outcome.program.len(), 2);
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].get_line(), 3);
    assert!(outcome.clone().into_result().is_err());
}

#[test]
fn test_recovery_collects_later_statements() {
    let source = "let a = ;\nlet b = 2\nfunc (x) {}\nlet c = 3";
    let options = ParseOptions::default().with_recovery(true);
    let outcome = parse_with_options(Lexer::new(source), options);

    let names: Vec<String> = outcome
        .program
        .iter()
        .map(|stmt| match stmt {
            Stmt::Let(decl) => decl.identifier.value.clone(),
            other => panic!("expected a binding, got {:?}", other),
        })
        .collect();
    assert_eq!(names, vec!["b", "c"]);

    let lines: Vec<u32> = outcome.diagnostics.iter().map(|error| error.get_line()).collect();
    assert_eq!(lines, vec![1, 3]);
}

#[test]
fn test_recovery_off_reports_only_first_error() {
    let outcome = parse(Lexer::new("let = 1\nlet = 2"));

    assert_eq!(outcome.diagnostics.len(), 1);
}

#[test]
fn test_argument_limit() {
    let arguments = |count: usize| {
        (0..count)
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let program = parse_ok(&format!("f({})", arguments(MAX_ARGUMENTS)));
    match expression(&program.body[0]) {
        Expr::Call(call) => assert_eq!(call.arguments.len(), MAX_ARGUMENTS),
        other => panic!("expected a call, got {:?}", other),
    }

    let error = first_error(&format!("f({})", arguments(MAX_ARGUMENTS + 1)));
    assert_eq!(error.kind(), &ErrorImpl::TooManyArguments { limit: 255 });
}

#[test]
fn test_custom_argument_limit() {
    let options = ParseOptions::default().with_max_arguments(2);
    let outcome = parse_with_options(Lexer::new("f(1, 2, 3)"), options);

    assert_eq!(
        outcome.diagnostics[0].kind(),
        &ErrorImpl::TooManyArguments { limit: 2 }
    );
}

#[test]
fn test_unclosed_call() {
    assert_eq!(
        first_error("f(1, 2").kind(),
        &ErrorImpl::UnexpectedEof {
            message: "expected ')' after arguments".to_string(),
        }
    );
}

#[test]
fn test_optional_semicolons() {
    assert_eq!(parse_ok("let a = 1; let b = 2;").len(), 2);
    assert_eq!(parse_ok("let a = 1 let b = 2").len(), 2);
    assert_eq!(parse_ok("func f() { a; b; }").len(), 1);
}

#[test]
fn test_stream_without_eof_token() {
    let mut tokens = tokenize("1 + 2");
    assert_eq!(tokens.pop().map(|token| token.kind), Some(TokenKind::EOF));

    let outcome = parse(tokens);
    assert!(!outcome.had_error());
    assert_eq!(outcome.program.len(), 1);
}

#[test]
fn test_empty_sources() {
    assert!(parse_ok("").is_empty());
    assert!(parse_ok("// nothing here\n/* or here */").is_empty());
}

#[test]
fn test_binding_power_table() {
    assert_eq!(LOOKUPS.binding_power(TokenKind::Pipeline), BindingPower::Pipeline);
    assert_eq!(LOOKUPS.binding_power(TokenKind::Plus), BindingPower::Additive);
    assert_eq!(LOOKUPS.binding_power(TokenKind::Star), BindingPower::Multiplicative);
    assert_eq!(LOOKUPS.binding_power(TokenKind::OpenParen), BindingPower::Call);
    assert_eq!(LOOKUPS.binding_power(TokenKind::Dot), BindingPower::Member);
    assert_eq!(LOOKUPS.binding_power(TokenKind::UpdateArrow), BindingPower::Update);
    assert_eq!(LOOKUPS.binding_power(TokenKind::EOF), BindingPower::Default);
    assert_eq!(LOOKUPS.binding_power(TokenKind::Let), BindingPower::Default);

    assert_eq!(BindingPower::Pipeline as u8, 5);
    assert_eq!(BindingPower::Additive as u8, 10);
    assert_eq!(BindingPower::Multiplicative as u8, 20);
    assert_eq!(BindingPower::Call as u8, 30);
    assert_eq!(BindingPower::Member as u8, 40);
    assert_eq!(BindingPower::Update as u8, 50);

    assert!(LOOKUPS.get_nud(TokenKind::Number).is_some());
    assert!(LOOKUPS.get_led(TokenKind::Number).is_none());
    assert!(LOOKUPS.get_stmt(TokenKind::Match).is_some());
    assert!(LOOKUPS.get_stmt(TokenKind::Enum).is_some());
    assert!(LOOKUPS.get_nud(TokenKind::InterpolatedString).is_some());
}

#[test]
fn test_negative_number_patterns() {
    let program = parse_ok("match x { -1 -> 0, - 2.5 -> 1, 3 -> 2 }");

    match &program.body[0] {
        Stmt::Match(stmt) => {
            assert!(matches!(
                &stmt.arms[0].patterns[0],
                Pattern::Literal(literal) if literal.value == LiteralValue::Number(-1.0)
            ));
            assert!(matches!(
                &stmt.arms[1].patterns[0],
                Pattern::Literal(literal) if literal.value == LiteralValue::Number(-2.5)
            ));
        }
        other => panic!("expected a match statement, got {:?}", other),
    }
    assert_eq!(
        program.body[0].to_string(),
        "match x { -1 -> 0, -2.5 -> 1, 3 -> 2 }"
    );

    assert_eq!(
        first_error("match x { -y -> 0 }").kind(),
        &ErrorImpl::InvalidPattern {
            token: "-".to_string()
        }
    );
}

#[test]
fn test_deep_parentheses_report_nesting_error() {
    let depth = 3000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));

    assert_eq!(
        first_error(&source).kind(),
        &ErrorImpl::NestingTooDeep { limit: MAX_DEPTH }
    );
}

#[test]
fn test_long_prefix_chain_reports_nesting_error() {
    let source = format!("{}1", "- ".repeat(20_000));

    assert_eq!(
        first_error(&source).kind(),
        &ErrorImpl::NestingTooDeep { limit: MAX_DEPTH }
    );
}

#[test]
fn test_deep_blocks_and_patterns_report_nesting_error() {
    let lambdas = format!("{}1{}", "fn() -> { ".repeat(500), " }".repeat(500));
    assert_eq!(
        first_error(&lambdas).kind(),
        &ErrorImpl::NestingTooDeep { limit: MAX_DEPTH }
    );

    let patterns = format!("match v {{ {}x{} -> 1 }}", "Some(".repeat(500), ")".repeat(500));
    assert_eq!(
        first_error(&patterns).kind(),
        &ErrorImpl::NestingTooDeep { limit: MAX_DEPTH }
    );
}

#[test]
fn test_nesting_within_limit() {
    let source = format!("{}1{}", "(".repeat(MAX_DEPTH / 2), ")".repeat(MAX_DEPTH / 2));
    assert_eq!(parse_ok(&source).len(), 1);

    let options = || ParseOptions::default().with_max_depth(4);
    let outcome = parse_with_options(Lexer::new("(((1)))"), options());
    assert!(!outcome.had_error());

    let outcome = parse_with_options(Lexer::new("((((1))))"), options());
    assert_eq!(
        outcome.diagnostics[0].kind(),
        &ErrorImpl::NestingTooDeep { limit: 4 }
    );
}

#[test]
fn test_recovery_after_nesting_error() {
    let source = format!("{}1{}\nlet a = 1", "(".repeat(1000), ")".repeat(1000));
    let options = ParseOptions::default().with_recovery(true);
    let outcome = parse_with_options(Lexer::new(&source), options);

    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.program.len(), 1);
    assert!(matches!(&outcome.program.body[0], Stmt::Let(_)));
}

#[test]
fn test_enum_declaration() {
    let source = "enum Shape { Circle { radius }, Rect { w, h }, Point }";
    let program = parse_ok(source);

    match &program.body[0] {
        Stmt::EnumDecl(decl) => {
            assert_eq!(decl.identifier.value, "Shape");
            assert_eq!(decl.variants.len(), 3);
            assert_eq!(decl.variants[1].fields.len(), 2);
            assert!(decl.variants[2].fields.is_empty());
        }
        other => panic!("expected an enum declaration, got {:?}", other),
    }
    assert_eq!(program.body[0].to_string(), source);
    assert_eq!(printed("enum Empty {}"), "enum Empty {}");
    assert_eq!(printed("enum E { A, }"), "enum E { A }");
}

#[test]
fn test_enum_declaration_errors() {
    assert_eq!(
        first_error("enum E { A B }").kind(),
        &ErrorImpl::UnexpectedTokenDetailed {
            token: "B".to_string(),
            message: "expected ',' or '}' in enum declaration".to_string(),
        }
    );
    assert_eq!(
        first_error("enum { A }").kind(),
        &ErrorImpl::UnexpectedTokenDetailed {
            token: "{".to_string(),
            message: "expected enum name after 'enum'".to_string(),
        }
    );
}

#[test]
fn test_enum_constructor() {
    let program = parse_ok("let c = Shape::Circle { radius = 2 * r }");

    match &program.body[0] {
        Stmt::Let(decl) => match &decl.assigned_value {
            Expr::EnumConstructor(constructor) => {
                assert_eq!(constructor.enum_name.value, "Shape");
                assert_eq!(constructor.variant.value, "Circle");
                assert_eq!(constructor.fields.len(), 1);
            }
            other => panic!("expected an enum constructor, got {:?}", other),
        },
        other => panic!("expected a binding, got {:?}", other),
    }
    assert_eq!(
        program.body[0].to_string(),
        "let c = Shape::Circle { radius = (2 * r) }"
    );
    assert_eq!(printed("Shape::Point"), "Shape::Point");
    assert_eq!(
        first_error("Shape::1").kind(),
        &ErrorImpl::UnexpectedTokenDetailed {
            token: "1".to_string(),
            message: "expected variant name after '::'".to_string(),
        }
    );
}

#[test]
fn test_enum_constructor_before_block() {
    // the `{` opens the branch, not a field list
    let program = parse_ok("if s == Color::Red { 1 } else { 2 }");
    match expression(&program.body[0]) {
        Expr::If(if_expr) => assert_eq!(if_expr.then_body.len(), 1),
        other => panic!("expected an if expression, got {:?}", other),
    }

    let program = parse_ok("match Color::Red { Color::Red -> 1, _ -> 0 }");
    match &program.body[0] {
        Stmt::Match(stmt) => assert_eq!(stmt.arms.len(), 2),
        other => panic!("expected a match statement, got {:?}", other),
    }

    assert_eq!(
        printed("if f(Shape::Circle { radius = 1 }) { 1 }"),
        "if f(Shape::Circle { radius = 1 }) { 1 }"
    );
}

#[test]
fn test_enum_patterns() {
    let source = "match s { Shape::Circle { radius } -> radius, Shape::Point | Shape::Empty -> 0 }";
    let program = parse_ok(source);

    match &program.body[0] {
        Stmt::Match(stmt) => {
            assert!(matches!(
                &stmt.arms[0].patterns[0],
                Pattern::Enum { enum_name, variant, fields }
                    if enum_name.value == "Shape" && variant.value == "Circle" && fields.len() == 1
            ));
            assert_eq!(stmt.arms[1].patterns.len(), 2);
        }
        other => panic!("expected a match statement, got {:?}", other),
    }
    assert_eq!(program.body[0].to_string(), source);
}

#[test]
fn test_string_interpolation() {
    let program = parse_ok(r#""hello ${name}, you are ${age + 1}!""#);

    match expression(&program.body[0]) {
        Expr::Interpolation(interpolation) => {
            assert_eq!(interpolation.parts.len(), 5);
            assert_eq!(
                interpolation.parts[0],
                InterpolationPart::Text("hello ".to_string())
            );
            assert!(matches!(
                &interpolation.parts[1],
                InterpolationPart::Expr(Expr::Symbol(symbol)) if symbol.name.value == "name"
            ));
            assert!(matches!(
                &interpolation.parts[3],
                InterpolationPart::Expr(Expr::Binary(_))
            ));
            assert_eq!(interpolation.parts[4], InterpolationPart::Text("!".to_string()));
        }
        other => panic!("expected an interpolated string, got {:?}", other),
    }
    assert_eq!(
        program.body[0].to_string(),
        r#""hello ${name}, you are ${(age + 1)}!""#
    );
}

#[test]
fn test_interpolation_with_nested_braces_and_strings() {
    assert_eq!(printed(r#""${ { a = 1 }.a }""#), r#""${{ a = 1 }.a}""#);
    assert_eq!(printed(r#""${greet(\"bob\")}""#), r#""${greet(\"bob\")}""#);
    assert_eq!(printed(r#""$5 and $${x}""#), r#""$5 and $${x}""#);
}

#[test]
fn test_interpolation_errors() {
    assert_eq!(
        first_error(r#""${}""#).kind(),
        &ErrorImpl::InvalidInterpolation {
            message: "empty '${}'".to_string()
        }
    );
    assert_eq!(
        first_error(r#""${a""#).kind(),
        &ErrorImpl::InvalidInterpolation {
            message: "unclosed '${'".to_string()
        }
    );
    assert_eq!(
        first_error(r#""${a b}""#).kind(),
        &ErrorImpl::UnexpectedToken {
            token: "b".to_string()
        }
    );

    let error = first_error("let s = \"first\n${)}\"");
    assert_eq!(error.get_line(), 2);
    assert_eq!(
        error.kind(),
        &ErrorImpl::ExpectedExpression {
            token: ")".to_string()
        }
    );
}

#[test]
fn test_print_parse_fixpoint() {
    let sources = [
        "let total = items |> filter(fn(x) -> x > 2) |> sum",
        r#"user <- { age = user.age + 1 } <- { name = "Bob" }"#,
        "-(1 + 2) * 3",
        "match r { Ok(v) -> v, Err(e) | None -> 0 }",
        "if a { b } else { c }",
        "f(1)(2)[3].x",
        "xs <- [1, 2] |> len",
        r#"{ a = [1, { b = "q\"uote\n" }] }"#,
        "async fn() -> await g()",
        "import \"std/io\"\nfunc main() { let! x = read(); print(x) }\n(1 + 2)",
        "match n { -1 -> \"negative\", 0 | -0.5 -> \"small\", _ -> n }",
        "enum Shape { Circle { radius }, Point }\nlet s = Shape::Circle { radius = 1 }",
        "match s { Shape::Circle { radius } -> radius, Shape::Point -> 0 }",
        r#"let msg = "sum: ${a + b} of ${len(\"xs\")}""#,
    ];

    for source in sources {
        let first = parse_ok(source).to_string();
        let second = parse_ok(&first).to_string();
        assert_eq!(first, second, "printing is not stable for {:?}", source);
    }
}
