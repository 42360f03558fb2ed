use std::iter::FusedIterator;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::{Span, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

lazy_static! {
    static ref IDENTIFIER_PATTERN: Regex =
        Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").expect("identifier pattern is valid");
    static ref NUMBER_PATTERN: Regex =
        Regex::new("^[0-9]+(\\.[0-9]+)?").expect("number pattern is valid");
}

const UNTERMINATED_STRING: &str = "Unterminated string.";
const UNEXPECTED_CHARACTER: &str = "Unexpected character.";
const UNEXPECTED_AMPERSAND: &str = "Unexpected '&'.";

/// Pull-based scanner over an in-memory source buffer.
///
/// Each call to [`Lexer::next_token`] consumes exactly one token. Once the end
/// of input is reached every further call returns another `EOF` token.
/// Lexical problems never stop the scanner: they come back as
/// `TokenKind::Error` tokens carrying a fixed message.
#[derive(Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    start: usize,
    pos: usize,
    line: u32,
    start_line: u32,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Lexer<'src> {
        Lexer::with_line(source, 1)
    }

    /// Scans a fragment whose first character sits on `line` of some larger
    /// buffer, such as the expression inside a `${...}`.
    pub fn with_line(source: &'src str, line: u32) -> Lexer<'src> {
        Lexer {
            source,
            start: 0,
            pos: 0,
            line,
            start_line: line,
            finished: false,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn remainder(&self) -> &'src str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.remainder().chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        MK_TOKEN!(
            kind,
            String::from(&self.source[self.start..self.pos]),
            Span::new(self.start, self.pos),
            self.start_line
        )
    }

    fn error_token(&self, message: &str) -> Token {
        MK_TOKEN!(
            TokenKind::Error,
            String::from(message),
            Span::new(self.start, self.pos),
            self.start_line
        )
    }

    /// Skips whitespace and both comment forms. Newlines, including the ones
    /// inside block comments, bump the line counter.
    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\r' | '\t' => {
                    self.advance();
                }
                '\n' => {
                    self.line += 1;
                    self.advance();
                }
                '/' if self.peek_next() == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                '/' if self.peek_next() == Some('*') => {
                    self.advance_n(2);
                    while let Some(c) = self.peek() {
                        if c == '*' && self.peek_next() == Some('/') {
                            self.advance_n(2);
                            break;
                        }
                        if c == '\n' {
                            self.line += 1;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Consumes and returns the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();

        self.start = self.pos;
        self.start_line = self.line;

        let token = match self.advance() {
            None => Token::eof(self.pos, self.line),
            Some(c) if c.is_ascii_alphabetic() || c == '_' => self.identifier(),
            Some(c) if c.is_ascii_digit() => self.number(),
            Some('"') => self.string(),
            Some(c) => self.symbol(c),
        };

        trace!(token = %token, "scanned token");
        token
    }

    fn identifier(&mut self) -> Token {
        let length = IDENTIFIER_PATTERN
            .find(&self.source[self.start..])
            .map_or(1, |matched| matched.end());
        self.pos = self.start + length;

        let text = &self.source[self.start..self.pos];
        match RESERVED_LOOKUP.get(text) {
            Some(kind) => self.make_token(*kind),
            None => self.make_token(TokenKind::Identifier),
        }
    }

    fn number(&mut self) -> Token {
        let length = NUMBER_PATTERN
            .find(&self.source[self.start..])
            .map_or(1, |matched| matched.end());
        self.pos = self.start + length;

        self.make_token(TokenKind::Number)
    }

    fn string(&mut self) -> Token {
        loop {
            match self.peek() {
                None => return self.error_token(UNTERMINATED_STRING),
                Some('"') => break,
                Some('\\') => {
                    self.advance();
                    if let Some(escaped) = self.advance() {
                        if escaped == '\n' {
                            self.line += 1;
                        }
                    }
                }
                Some('\n') => {
                    self.line += 1;
                    self.advance();
                }
                Some(_) => {
                    self.advance();
                }
            }
        }

        self.advance(); // closing quote

        let value = unescape(&self.source[self.start + 1..self.pos - 1]);
        let kind = if value.contains("${") {
            TokenKind::InterpolatedString
        } else {
            TokenKind::String
        };

        MK_TOKEN!(
            kind,
            value,
            Span::new(self.start, self.pos),
            self.start_line
        )
    }

    fn symbol(&mut self, c: char) -> Token {
        match c {
            '(' => self.make_token(TokenKind::OpenParen),
            ')' => self.make_token(TokenKind::CloseParen),
            '{' => self.make_token(TokenKind::OpenCurly),
            '}' => self.make_token(TokenKind::CloseCurly),
            '[' => self.make_token(TokenKind::OpenBracket),
            ']' => self.make_token(TokenKind::CloseBracket),
            ',' => self.make_token(TokenKind::Comma),
            '.' => self.make_token(TokenKind::Dot),
            ';' => self.make_token(TokenKind::Semicolon),
            ':' => {
                if self.match_char(':') {
                    self.make_token(TokenKind::DoubleColon)
                } else {
                    self.make_token(TokenKind::Colon)
                }
            }
            '?' => self.make_token(TokenKind::Question),
            '#' => self.make_token(TokenKind::Hash),
            '$' => self.make_token(TokenKind::Dollar),
            '^' => self.make_token(TokenKind::Caret),
            '+' => self.make_token(TokenKind::Plus),
            '*' => self.make_token(TokenKind::Star),
            '/' => self.make_token(TokenKind::Slash),
            '%' => self.make_token(TokenKind::Percent),
            '-' => {
                if self.match_char('>') {
                    self.make_token(TokenKind::Arrow)
                } else {
                    self.make_token(TokenKind::Dash)
                }
            }
            '=' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::Equals)
                } else {
                    self.make_token(TokenKind::Assignment)
                }
            }
            '!' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::NotEquals)
                } else {
                    self.make_token(TokenKind::Not)
                }
            }
            '>' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::GreaterEquals)
                } else {
                    self.make_token(TokenKind::Greater)
                }
            }
            '<' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::LessEquals)
                } else if self.match_char('-') {
                    self.make_token(TokenKind::UpdateArrow)
                } else {
                    self.make_token(TokenKind::Less)
                }
            }
            '&' => {
                if self.match_char('&') {
                    self.make_token(TokenKind::And)
                } else {
                    self.error_token(UNEXPECTED_AMPERSAND)
                }
            }
            '|' => {
                if self.match_char('|') {
                    self.make_token(TokenKind::Or)
                } else if self.match_char('>') {
                    self.make_token(TokenKind::Pipeline)
                } else {
                    self.make_token(TokenKind::Pipe)
                }
            }
            _ => self.error_token(UNEXPECTED_CHARACTER),
        }
    }
}

/// Yields every token up to and including the first `EOF`, then stops.
impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if token.kind == TokenKind::EOF {
            self.finished = true;
        }

        Some(token)
    }
}

impl FusedIterator for Lexer<'_> {}

fn unescape(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.peek() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('0') => result.push('\0'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            _ => {
                result.push(ch); // Keep the backslash
                continue;
            }
        }
        chars.next();
    }

    result
}

/// Scans a whole source buffer. The returned stream always ends with `EOF`.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}
