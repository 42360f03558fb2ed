use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{Span, MK_TOKEN};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("let", TokenKind::Let);
        map.insert("func", TokenKind::Func);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("match", TokenKind::Match);
        map.insert("fn", TokenKind::Fn);
        map.insert("async", TokenKind::Async);
        map.insert("await", TokenKind::Await);
        map.insert("throw", TokenKind::Throw);
        map.insert("try", TokenKind::Try);
        map.insert("catch", TokenKind::Catch);
        map.insert("import", TokenKind::Import);
        map.insert("enum", TokenKind::Enum);
        map.insert("_", TokenKind::Underscore);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Error,
    Number,
    String,
    /// A string containing at least one `${...}`; `value` is the unescaped text.
    InterpolatedString,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Pipe,        // |
    Pipeline,    // |>
    UpdateArrow, // <-

    Dot,
    Semicolon,
    Colon,
    DoubleColon, // ::
    Question,
    Comma,
    Arrow,
    Hash,
    Dollar,
    Caret,
    Underscore,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Let,
    Func,
    If,
    Else,
    True,
    False,
    Match,
    Fn,
    Async,
    Await,
    Throw,
    Try,
    Catch,
    Import,
    Enum,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A classified piece of source text.
///
/// `value` is an owned copy of the lexeme: the raw text for most tokens, the
/// unescaped contents for strings and the diagnostic for error tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
    pub line: u32,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_one_of_many(&[
            TokenKind::String,
            TokenKind::InterpolatedString,
            TokenKind::Identifier,
            TokenKind::Number,
            TokenKind::Error,
        ]) {
            write!(f, "{} ({}) @{}", self.kind, self.value, self.line)
        } else {
            write!(f, "{} @{}", self.kind, self.line)
        }
    }
}

impl Token {
    pub fn eof(offset: usize, line: u32) -> Self {
        MK_TOKEN!(
            TokenKind::EOF,
            String::new(),
            Span::new(offset, offset),
            line
        )
    }

    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// Returns the raw source text this token was scanned from.
    pub fn lexeme<'s>(&self, source: &'s str) -> Option<&'s str> {
        self.span.slice(source)
    }
}
