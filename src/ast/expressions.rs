use crate::lexer::tokens::Token;

use super::ast::{Expr, Stmt};

// LITERALS

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Number(f64),
    String(String),
    Boolean(bool),
}

/// Literal Expression
/// A number, string or boolean together with the token it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub value: LiteralValue,
    pub token: Token,
}

/// Symbol Expression
/// Represents a variable reference in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub name: Token,
}

// COMPLEX

/// Binary Expression
/// Arithmetic, comparison and logical operators.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

/// Prefix Expression
/// `-x` and `!x`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub operator: Token,
    pub right_expr: Box<Expr>,
}

/// Grouping Expression
/// A parenthesised sub-expression, kept so printing can reproduce it.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingExpr {
    pub expression: Box<Expr>,
}

/// Member Expression
/// `object.property`
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    pub object: Box<Expr>,
    pub property: Token,
}

/// Index Expression
/// `object[index]`
#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub object: Box<Expr>,
    pub index: Box<Expr>,
}

/// Call Expression
/// Represents a function call in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListExpr {
    pub elements: Vec<Expr>,
}

/// One `key = value` entry of a struct literal or struct update.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: Token,
    pub value: Expr,
}

/// Struct Literal Expression
/// `{ name = "Alice", age = 30 }`, fields kept in source order. Duplicate
/// keys are not rejected here.
#[derive(Debug, Clone, PartialEq)]
pub struct StructInitExpr {
    pub fields: Vec<Field>,
}

/// Struct Update Expression
/// `base <- { age = 31 }` produces a copy of `base` with the listed fields replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct StructUpdateExpr {
    pub base: Box<Expr>,
    pub fields: Vec<Field>,
}

/// Array Append Expression
/// `base <- [4, 5]`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayAppendExpr {
    pub base: Box<Expr>,
    pub elements: Vec<Expr>,
}

/// Pipeline Expression
/// `left |> right` feeds the value of `left` into `right`. Chains nest to the
/// left: `a |> b |> c` is `(a |> b) |> c`.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineExpr {
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

/// Lambda Expression
/// `fn(a, b) -> { ... }`, or with a single expression body `fn(a) -> a + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaExpr {
    pub parameters: Vec<Token>,
    pub body: Vec<Stmt>,
    pub is_async: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfExpr {
    pub condition: Box<Expr>,
    pub then_body: Vec<Stmt>,
    pub else_body: Option<Vec<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AwaitExpr {
    pub expression: Box<Expr>,
}

/// Enum Constructor Expression
/// `Shape::Circle { radius = 2 }`, or `Shape::Point` for a variant without fields.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumConstructorExpr {
    pub enum_name: Token,
    pub variant: Token,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InterpolationPart {
    Text(String),
    Expr(Expr),
}

/// String Interpolation Expression
/// `"hello ${name}"`. Adjacent text is merged into one part and empty text is
/// never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct StringInterpolationExpr {
    pub parts: Vec<InterpolationPart>,
    pub token: Token,
}
