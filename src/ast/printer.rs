//! Canonical text form of the AST.
//!
//! Operators print fully parenthesised so the tree shape is visible at a
//! glance, and the output parses back to a tree that prints identically.

use std::fmt::{Display, Formatter, Result};

use crate::lexer::tokens::Token;

use super::{
    ast::{Expr, Program, Stmt},
    expressions::{Field, InterpolationPart, LiteralExpr, LiteralValue},
    statements::{EnumVariant, MatchArm, Pattern},
};

/// Quotes `value` and escapes the characters the scanner unescapes.
pub fn escape_string(value: &str) -> String {
    let mut result = String::with_capacity(value.len() + 2);
    result.push('"');
    escape_into(&mut result, value);
    result.push('"');
    result
}

fn escape_into(result: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\t' => result.push_str("\\t"),
            '\r' => result.push_str("\\r"),
            '\0' => result.push_str("\\0"),
            _ => result.push(c),
        }
    }
}

fn write_separated<T: Display>(f: &mut Formatter<'_>, items: &[T], separator: &str) -> Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

fn write_block(f: &mut Formatter<'_>, body: &[Stmt]) -> Result {
    if body.is_empty() {
        return f.write_str("{}");
    }
    f.write_str("{ ")?;
    write_separated(f, body, "; ")?;
    f.write_str(" }")
}

fn write_fields(f: &mut Formatter<'_>, fields: &[Field]) -> Result {
    if fields.is_empty() {
        return f.write_str("{}");
    }
    f.write_str("{ ")?;
    write_separated(f, fields, ", ")?;
    f.write_str(" }")
}

fn write_names(f: &mut Formatter<'_>, names: &[Token]) -> Result {
    f.write_str("{ ")?;
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        f.write_str(&name.value)?;
    }
    f.write_str(" }")
}

fn write_parameters(f: &mut Formatter<'_>, parameters: &[Token]) -> Result {
    f.write_str("(")?;
    for (i, parameter) in parameters.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        f.write_str(&parameter.value)?;
    }
    f.write_str(")")
}

impl Expr {
    /// Whether this node already wraps itself in parentheses when printed.
    fn prints_parenthesised(&self) -> bool {
        matches!(
            self,
            Expr::Binary(_) | Expr::Prefix(_) | Expr::Pipeline(_) | Expr::Await(_) | Expr::Grouping(_)
        )
    }
}

impl Display for LiteralExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match &self.value {
            LiteralValue::Number(_) => f.write_str(&self.token.value),
            LiteralValue::String(value) => f.write_str(&escape_string(value)),
            LiteralValue::Boolean(value) => write!(f, "{}", value),
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{} = {}", self.key.value, self.value)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Expr::Literal(literal) => write!(f, "{}", literal),
            Expr::Interpolation(interpolation) => {
                // Embedded expressions are escaped too, so string literals
                // inside `${...}` survive the outer quotes.
                let mut rendered = String::from("\"");
                for part in &interpolation.parts {
                    match part {
                        InterpolationPart::Text(text) => escape_into(&mut rendered, text),
                        InterpolationPart::Expr(expr) => {
                            rendered.push_str("${");
                            escape_into(&mut rendered, &expr.to_string());
                            rendered.push('}');
                        }
                    }
                }
                rendered.push('"');
                f.write_str(&rendered)
            }
            Expr::Symbol(symbol) => f.write_str(&symbol.name.value),
            Expr::Prefix(prefix) => write!(f, "({}{})", prefix.operator.value, prefix.right_expr),
            Expr::Binary(binary) => write!(
                f,
                "({} {} {})",
                binary.left, binary.operator.value, binary.right
            ),
            Expr::Grouping(grouping) => {
                if grouping.expression.prints_parenthesised() {
                    write!(f, "{}", grouping.expression)
                } else {
                    write!(f, "({})", grouping.expression)
                }
            }
            Expr::Member(member) => write!(f, "{}.{}", member.object, member.property.value),
            Expr::Index(index) => write!(f, "{}[{}]", index.object, index.index),
            Expr::Call(call) => {
                write!(f, "{}(", call.callee)?;
                write_separated(f, &call.arguments, ", ")?;
                f.write_str(")")
            }
            Expr::List(list) => {
                f.write_str("[")?;
                write_separated(f, &list.elements, ", ")?;
                f.write_str("]")
            }
            Expr::StructInit(init) => write_fields(f, &init.fields),
            Expr::StructUpdate(update) => {
                write!(f, "{} <- ", update.base)?;
                write_fields(f, &update.fields)
            }
            Expr::EnumConstructor(constructor) => {
                write!(f, "{}::{}", constructor.enum_name.value, constructor.variant.value)?;
                if constructor.fields.is_empty() {
                    return Ok(());
                }
                f.write_str(" ")?;
                write_fields(f, &constructor.fields)
            }
            Expr::ArrayAppend(append) => {
                write!(f, "{} <- [", append.base)?;
                write_separated(f, &append.elements, ", ")?;
                f.write_str("]")
            }
            Expr::Pipeline(pipeline) => write!(f, "({} |> {})", pipeline.left, pipeline.right),
            Expr::Lambda(lambda) => {
                if lambda.is_async {
                    f.write_str("async ")?;
                }
                f.write_str("fn")?;
                write_parameters(f, &lambda.parameters)?;
                f.write_str(" -> ")?;
                write_block(f, &lambda.body)
            }
            Expr::If(if_expr) => {
                write!(f, "if {} ", if_expr.condition)?;
                write_block(f, &if_expr.then_body)?;
                if let Some(else_body) = &if_expr.else_body {
                    f.write_str(" else ")?;
                    write_block(f, else_body)?;
                }
                Ok(())
            }
            Expr::Await(await_expr) => write!(f, "(await {})", await_expr.expression),
        }
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Pattern::Wildcard(_) => f.write_str("_"),
            Pattern::Literal(literal) => write!(f, "{}", literal),
            Pattern::Binding(name) => f.write_str(&name.value),
            Pattern::Struct { fields } => write_names(f, fields),
            Pattern::Constructor { name, arguments } => {
                write!(f, "{}(", name.value)?;
                write_separated(f, arguments, ", ")?;
                f.write_str(")")
            }
            Pattern::Enum {
                enum_name,
                variant,
                fields,
            } => {
                write!(f, "{}::{}", enum_name.value, variant.value)?;
                if fields.is_empty() {
                    return Ok(());
                }
                f.write_str(" ")?;
                write_names(f, fields)
            }
        }
    }
}

impl Display for EnumVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(&self.name.value)?;
        if self.fields.is_empty() {
            return Ok(());
        }
        f.write_str(" ")?;
        write_names(f, &self.fields)
    }
}

impl Display for MatchArm {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_separated(f, &self.patterns, " | ")?;
        write!(f, " -> {}", self.result)
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Stmt::Expression(stmt) => write!(f, "{}", stmt.expression),
            Stmt::Let(decl) => write!(f, "let {} = {}", decl.identifier.value, decl.assigned_value),
            Stmt::FallibleLet(decl) => {
                write!(f, "let! {} = {}", decl.identifier.value, decl.assigned_value)
            }
            Stmt::FnDecl(decl) => {
                if decl.is_async {
                    f.write_str("async ")?;
                }
                write!(f, "func {}", decl.identifier.value)?;
                write_parameters(f, &decl.parameters)?;
                f.write_str(" ")?;
                write_block(f, &decl.body)
            }
            Stmt::Match(stmt) => {
                write!(f, "match {} ", stmt.scrutinee)?;
                if stmt.arms.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                write_separated(f, &stmt.arms, ", ")?;
                f.write_str(" }")
            }
            Stmt::Import(stmt) => write!(f, "import {}", escape_string(&stmt.path.value)),
            Stmt::EnumDecl(decl) => {
                write!(f, "enum {} ", decl.identifier.value)?;
                if decl.variants.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                write_separated(f, &decl.variants, ", ")?;
                f.write_str(" }")
            }
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        // Newlines are not significant, so the terminator keeps a statement
        // that opens with `(` from reading as a call on the one before it.
        for stmt in &self.body {
            writeln!(f, "{};", stmt)?;
        }
        Ok(())
    }
}
