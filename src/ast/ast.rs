use std::slice::Iter;

use super::{
    expressions::{
        ArrayAppendExpr, AwaitExpr, BinaryExpr, CallExpr, EnumConstructorExpr, GroupingExpr,
        IfExpr, IndexExpr, LambdaExpr, ListExpr, LiteralExpr, MemberExpr, PipelineExpr,
        PrefixExpr, StringInterpolationExpr, StructInitExpr, StructUpdateExpr, SymbolExpr,
    },
    statements::{
        EnumDeclStmt, ExpressionStmt, FnDeclStmt, ImportStmt, MatchStmt, VarDeclStmt,
    },
};

/// Expression nodes.
///
/// Every node owns its children outright through `Box` and `Vec`; there is no
/// sharing between subtrees and dropping a node drops its whole subtree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(LiteralExpr),
    Interpolation(StringInterpolationExpr),
    Symbol(SymbolExpr),
    Prefix(PrefixExpr),
    Binary(BinaryExpr),
    Grouping(GroupingExpr),
    Member(MemberExpr),
    Index(IndexExpr),
    Call(CallExpr),
    List(ListExpr),
    StructInit(StructInitExpr),
    StructUpdate(StructUpdateExpr),
    EnumConstructor(EnumConstructorExpr),
    ArrayAppend(ArrayAppendExpr),
    Pipeline(PipelineExpr),
    Lambda(LambdaExpr),
    If(IfExpr),
    Await(AwaitExpr),
}

impl Expr {
    /// Wraps the expression so it can be stored where a statement is expected.
    pub fn into_stmt(self) -> Stmt {
        Stmt::Expression(ExpressionStmt { expression: self })
    }
}

/// Statement nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(ExpressionStmt),
    Let(VarDeclStmt),
    /// `let!`, short-circuits the enclosing function on failure. Where it may
    /// appear is left to later stages.
    FallibleLet(VarDeclStmt),
    FnDecl(FnDeclStmt),
    Match(MatchStmt),
    Import(ImportStmt),
    EnumDecl(EnumDeclStmt),
}

/// The ordered top-level statements of one source buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
}

impl Program {
    pub fn new() -> Self {
        Program { body: Vec::new() }
    }

    pub fn push(&mut self, stmt: Stmt) {
        self.body.push(stmt);
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

impl IntoIterator for Program {
    type Item = Stmt;
    type IntoIter = std::vec::IntoIter<Stmt>;

    fn into_iter(self) -> Self::IntoIter {
        self.body.into_iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Stmt;
    type IntoIter = Iter<'a, Stmt>;

    fn into_iter(self) -> Self::IntoIter {
        self.body.iter()
    }
}
