//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the top-level driving
//! loop. Expressions go through the Pratt engine in `expr.rs`, statements
//! through the keyword handlers in `stmt.rs`; both are looked up in the
//! shared dispatch table from `lookups.rs`.

use std::mem;

use tracing::{debug, trace};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{
    lookups::{Lookups, LOOKUPS},
    stmt::parse_stmt,
};

/// Upper bound on the number of arguments a single call may pass.
pub const MAX_ARGUMENTS: usize = 255;

/// Default bound on how deeply expressions, blocks and patterns may nest.
pub const MAX_DEPTH: usize = 128;

/// Knobs for a single parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    /// Keep going after a syntax error: skip to the next statement boundary
    /// and collect further statements and diagnostics. Off by default, in
    /// which case the first error ends the parse.
    pub recover: bool,
    /// Call argument limit.
    pub max_arguments: usize,
    /// Nesting limit, keeps hostile input from exhausting the stack.
    pub max_depth: usize,
    /// Name of the buffer being parsed, only used to label log events.
    pub file: Option<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            recover: false,
            max_arguments: MAX_ARGUMENTS,
            max_depth: MAX_DEPTH,
            file: None,
        }
    }
}

impl ParseOptions {
    pub fn with_recovery(mut self, recover: bool) -> Self {
        self.recover = recover;
        self
    }

    pub fn with_max_arguments(mut self, max_arguments: usize) -> Self {
        self.max_arguments = max_arguments;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// The result of a parse: every statement that parsed completely, in source
/// order, and the diagnostics reported along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub program: Program,
    pub diagnostics: Vec<Error>,
}

impl ParseOutcome {
    pub fn had_error(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn into_result(self) -> Result<Program, Vec<Error>> {
        if self.diagnostics.is_empty() {
            Ok(self.program)
        } else {
            Err(self.diagnostics)
        }
    }
}

/// The main parser structure that maintains parsing state.
///
/// Tokens are pulled from the source one at a time; the parser only ever
/// looks at the current token and remembers the one before it.
pub struct Parser<'a> {
    /// The token source
    tokens: Box<dyn Iterator<Item = Token> + 'a>,
    /// The token under the cursor
    current: Token,
    /// The most recently consumed token
    previous: Token,
    /// Set once any diagnostic has been reported
    had_error: bool,
    /// Set between reporting an error and resynchronising
    panic_mode: bool,
    options: ParseOptions,
    diagnostics: Vec<Error>,
    /// Open nesting levels
    depth: usize,
    /// Whether `Enum::Variant` may take a `{ ... }` field list here
    enum_fields: bool,
    /// Grammar dispatch table
    lookups: &'static Lookups,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `tokens` with the default options.
    pub fn new<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = Token>,
        I::IntoIter: 'a,
    {
        Self::with_options(tokens, ParseOptions::default())
    }

    pub fn with_options<I>(tokens: I, options: ParseOptions) -> Self
    where
        I: IntoIterator<Item = Token>,
        I::IntoIter: 'a,
    {
        let mut tokens: Box<dyn Iterator<Item = Token> + 'a> = Box::new(tokens.into_iter());
        let current = tokens.next().unwrap_or_else(|| Token::eof(0, 1));

        Parser {
            tokens,
            previous: Token::eof(0, current.line),
            current,
            had_error: false,
            panic_mode: false,
            options,
            diagnostics: Vec::new(),
            depth: 0,
            enum_fields: true,
            lookups: &LOOKUPS,
        }
    }

    /// Creates a parser for a fragment embedded in the current source, such as
    /// the expression inside `${...}`. Options and nesting depth carry over.
    pub fn nested<'b, I>(&self, tokens: I) -> Parser<'b>
    where
        I: IntoIterator<Item = Token>,
        I::IntoIter: 'b,
    {
        let mut parser = Parser::with_options(tokens, self.options.clone());
        parser.depth = self.depth;
        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn previous_token(&self) -> &Token {
        &self.previous
    }

    /// Advances to the next token and returns the previous token.
    ///
    /// Once the end-of-input token is current it stays current; a source that
    /// runs dry without producing one gets a synthesised end-of-input token.
    pub fn advance(&mut self) -> &Token {
        let next = if self.current.kind == TokenKind::EOF {
            self.current.clone()
        } else {
            self.tokens.next().unwrap_or_else(|| {
                Token::eof(self.current.span.end as usize, self.current.line)
            })
        };

        self.previous = mem::replace(&mut self.current, next);
        &self.previous
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consumes the current token if it is of the given kind.
    pub fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects a token of the specified kind and consumes it.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    /// * `message` - What was expected, used in the error if the expectation fails
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns an Error.
    pub fn expect_error(&mut self, expected_kind: TokenKind, message: &str) -> Result<Token, Error> {
        if self.current.kind != expected_kind {
            return Err(Error::unexpected(&self.current, message));
        }

        Ok(self.advance().clone())
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current.kind != TokenKind::EOF
    }

    /// Opens one nesting level, failing once `max_depth` levels are open.
    /// Every successful call must be paired with [`Parser::leave_nesting`].
    pub fn enter_nesting(&mut self) -> Result<(), Error> {
        let limit = self.options.max_depth;
        if self.depth >= limit {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep { limit },
                self.current.line,
            ));
        }

        self.depth += 1;
        Ok(())
    }

    pub fn leave_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn enum_fields_allowed(&self) -> bool {
        self.enum_fields
    }

    /// Runs `parse` with `Enum::Variant { ... }` field lists switched on or
    /// off. They are off where a `{` opens a block or the arms of a match.
    pub fn with_enum_fields<T, F>(&mut self, allowed: bool, parse: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Self) -> Result<T, Error>,
    {
        let saved = mem::replace(&mut self.enum_fields, allowed);
        let result = parse(self);
        self.enum_fields = saved;
        result
    }

    pub fn lookups(&self) -> &'static Lookups {
        self.lookups
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Records a diagnostic. While in panic mode further reports are dropped,
    /// they are almost always fallout from the first one.
    fn report(&mut self, error: Error) {
        if self.panic_mode {
            return;
        }

        self.had_error = true;
        self.panic_mode = true;
        debug!(file = ?self.options.file, error = %error, "syntax error");
        self.diagnostics.push(error);
    }

    /// Skips tokens until a likely statement boundary: just past a `;`, or at
    /// a keyword that starts a statement.
    fn synchronize(&mut self) {
        self.panic_mode = false;
        self.depth = 0;
        self.enum_fields = true;

        while self.current.kind != TokenKind::EOF {
            if self.previous.kind == TokenKind::Semicolon {
                break;
            }

            match self.current.kind {
                TokenKind::Let
                | TokenKind::Func
                | TokenKind::Match
                | TokenKind::Import
                | TokenKind::Async
                | TokenKind::Enum => break,
                _ => {}
            }

            trace!(token = %self.current, "skipping token while resynchronising");
            self.advance();
        }
    }

    /// Parses statements until end of input, or until the first error when
    /// recovery is off.
    pub fn parse_program(mut self) -> ParseOutcome {
        let mut program = Program::new();

        while self.has_tokens() {
            match parse_stmt(&mut self) {
                Ok(stmt) => {
                    debug!(
                        file = ?self.options.file,
                        line = self.previous.line,
                        statements = program.len() + 1,
                        "parsed statement"
                    );
                    program.push(stmt);
                }
                Err(error) => {
                    self.report(error);
                    if !self.options.recover {
                        break;
                    }
                    self.synchronize();
                }
            }
        }

        debug!(
            file = ?self.options.file,
            statements = program.len(),
            had_error = self.had_error,
            "parse finished"
        );

        ParseOutcome {
            program,
            diagnostics: self.diagnostics,
        }
    }
}

/// Parses a stream of tokens into a Program with the default options.
///
/// This is the main entry point for parsing. The stream is read lazily and
/// does not need to end with an end-of-input token.
pub fn parse<'a, I>(tokens: I) -> ParseOutcome
where
    I: IntoIterator<Item = Token>,
    I::IntoIter: 'a,
{
    Parser::new(tokens).parse_program()
}

pub fn parse_with_options<'a, I>(tokens: I, options: ParseOptions) -> ParseOutcome
where
    I: IntoIterator<Item = Token>,
    I::IntoIter: 'a,
{
    Parser::with_options(tokens, options).parse_program()
}
