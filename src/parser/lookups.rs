use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::ast::{Expr, Stmt},
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
};

use super::{expr::*, parser::Parser, stmt::*};

/// Left binding powers, loosest first. Tokens without an infix handler bind
/// at `Default`, which never exceeds the minimum power of any loop.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub enum BindingPower {
    Default = 0,
    Pipeline = 5,
    LogicalOr = 6,
    LogicalAnd = 7,
    Equality = 8,
    Relational = 9,
    Additive = 10,
    Multiplicative = 20,
    Unary = 25,
    Call = 30,
    Member = 40,
    Update = 50,
}

/// Handlers for statement keywords; they see the keyword as the current token.
pub type StmtHandler = fn(&mut Parser<'_>) -> Result<Stmt, Error>;
/// Prefix handlers receive the token that starts the expression, already consumed.
pub type NUDHandler = fn(&mut Parser<'_>, Token) -> Result<Expr, Error>;
/// Infix handlers receive the left operand, the consumed operator and its binding power.
pub type LEDHandler = fn(&mut Parser<'_>, Expr, Token, BindingPower) -> Result<Expr, Error>;

pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;

/// The grammar dispatch table: one optional prefix handler, one optional
/// infix handler and one binding power per token kind.
#[derive(Default)]
pub struct Lookups {
    stmt_lookup: StmtLookup,
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    binding_power_lookup: BPLookup,
}

impl Lookups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an infix handler together with the power it binds with.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a prefix handler. The token's binding power is left alone,
    /// since `-`, `(` and `[` also have infix roles.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    pub fn get_stmt(&self, kind: TokenKind) -> Option<StmtHandler> {
        self.stmt_lookup.get(&kind).copied()
    }

    pub fn get_nud(&self, kind: TokenKind) -> Option<NUDHandler> {
        self.nud_lookup.get(&kind).copied()
    }

    pub fn get_led(&self, kind: TokenKind) -> Option<LEDHandler> {
        self.led_lookup.get(&kind).copied()
    }

    pub fn binding_power(&self, kind: TokenKind) -> BindingPower {
        self.binding_power_lookup
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }
}

pub fn create_token_lookups(lookups: &mut Lookups) {
    lookups.led(TokenKind::Pipeline, BindingPower::Pipeline, parse_pipeline_expr);

    // Logical
    lookups.led(TokenKind::Or, BindingPower::LogicalOr, parse_binary_expr);
    lookups.led(TokenKind::And, BindingPower::LogicalAnd, parse_binary_expr);

    // Equality and relational
    lookups.led(TokenKind::Equals, BindingPower::Equality, parse_binary_expr);
    lookups.led(TokenKind::NotEquals, BindingPower::Equality, parse_binary_expr);
    lookups.led(TokenKind::Less, BindingPower::Relational, parse_binary_expr);
    lookups.led(TokenKind::LessEquals, BindingPower::Relational, parse_binary_expr);
    lookups.led(TokenKind::Greater, BindingPower::Relational, parse_binary_expr);
    lookups.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_binary_expr);

    // Additive and multiplicative
    lookups.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    lookups.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    lookups.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    lookups.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);
    lookups.led(TokenKind::Percent, BindingPower::Multiplicative, parse_binary_expr);

    lookups.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);

    // Member
    lookups.led(TokenKind::Dot, BindingPower::Member, parse_member_expr);
    lookups.led(TokenKind::OpenBracket, BindingPower::Member, parse_index_expr);

    lookups.led(TokenKind::UpdateArrow, BindingPower::Update, parse_update_expr);

    // Literals and symbols
    lookups.nud(TokenKind::Number, parse_primary_expr);
    lookups.nud(TokenKind::String, parse_primary_expr);
    lookups.nud(TokenKind::InterpolatedString, parse_interpolation_expr);
    lookups.nud(TokenKind::True, parse_primary_expr);
    lookups.nud(TokenKind::False, parse_primary_expr);
    lookups.nud(TokenKind::Identifier, parse_primary_expr);

    lookups.nud(TokenKind::Dash, parse_prefix_expr);
    lookups.nud(TokenKind::Not, parse_prefix_expr);
    lookups.nud(TokenKind::Await, parse_await_expr);
    lookups.nud(TokenKind::OpenParen, parse_grouping_expr);
    lookups.nud(TokenKind::OpenBracket, parse_list_expr);
    lookups.nud(TokenKind::OpenCurly, parse_struct_init_expr);
    lookups.nud(TokenKind::Fn, parse_lambda_expr);
    lookups.nud(TokenKind::Async, parse_async_lambda_expr);
    lookups.nud(TokenKind::If, parse_if_expr);

    // Statements
    lookups.stmt(TokenKind::Let, parse_var_decl_stmt);
    lookups.stmt(TokenKind::Import, parse_import_stmt);
    lookups.stmt(TokenKind::Func, parse_fn_decl_stmt);
    lookups.stmt(TokenKind::Match, parse_match_stmt);
    lookups.stmt(TokenKind::Async, parse_async_stmt);
    lookups.stmt(TokenKind::Enum, parse_enum_decl_stmt);
}

lazy_static! {
    /// Built on first use and never mutated afterwards.
    pub static ref LOOKUPS: Lookups = {
        let mut lookups = Lookups::new();
        create_token_lookups(&mut lookups);
        lookups
    };
}
