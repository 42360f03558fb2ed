use crate::lexer::tokens::Token;

use super::{
    ast::{Expr, Stmt},
    expressions::LiteralExpr,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
}

/// `let name = value` and, when used as [`Stmt::FallibleLet`], `let! name = value`.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub identifier: Token,
    pub assigned_value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportStmt {
    pub path: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub identifier: Token,
    pub parameters: Vec<Token>,
    pub body: Vec<Stmt>,
    pub is_async: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumVariant {
    pub name: Token,
    pub fields: Vec<Token>,
}

/// `enum Shape { Circle { radius }, Point }`
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDeclStmt {
    pub identifier: Token,
    pub variants: Vec<EnumVariant>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchStmt {
    pub scrutinee: Expr,
    pub arms: Vec<MatchArm>,
}

/// One `pattern -> result` arm. `patterns` holds the `|`-separated
/// alternatives and is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchArm {
    pub patterns: Vec<Pattern>,
    pub result: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// `_`, matches anything and binds nothing.
    Wildcard(Token),
    Literal(LiteralExpr),
    /// A bare name, binds the matched value.
    Binding(Token),
    /// `{ name, age }`
    Struct { fields: Vec<Token> },
    /// `Some(x)`
    Constructor { name: Token, arguments: Vec<Pattern> },
    /// `Shape::Circle { radius }`, or `Shape::Point` with no fields.
    Enum {
        enum_name: Token,
        variant: Token,
        fields: Vec<Token>,
    },
}

impl Pattern {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Pattern::Wildcard(_))
    }
}
