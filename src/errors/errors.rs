use std::fmt::Display;

use thiserror::Error;

use crate::lexer::tokens::{Token, TokenKind};

/// A diagnostic produced while scanning or parsing.
///
/// Carries the failure class and the 1-based line of the offending token;
/// that line number is the whole positional contract of this front end.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("line {line}: {internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    line: u32,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, line: u32) -> Self {
        Error {
            internal_error: error_impl,
            line,
        }
    }

    /// Builds the error reported when `token` shows up where something else
    /// was required. Error tokens from the scanner surface their own message.
    pub fn unexpected(token: &Token, message: &str) -> Self {
        let error_impl = match token.kind {
            TokenKind::Error => ErrorImpl::Lexical {
                message: token.value.clone(),
            },
            TokenKind::EOF => ErrorImpl::UnexpectedEof {
                message: message.to_string(),
            },
            _ => ErrorImpl::UnexpectedTokenDetailed {
                token: token.value.clone(),
                message: message.to_string(),
            },
        };

        Error::new(error_impl, token.line)
    }

    pub fn get_line(&self) -> u32 {
        self.line
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::Lexical { .. } => "LexicalError",
            ErrorImpl::ExpectedExpression { .. } => "ExpectedExpression",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::UnexpectedEof { .. } => "UnexpectedEof",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::TooManyArguments { .. } => "TooManyArguments",
            ErrorImpl::EmptyStructPattern => "EmptyStructPattern",
            ErrorImpl::InvalidPattern { .. } => "InvalidPattern",
            ErrorImpl::StructPatternInAlternation => "StructPatternInAlternation",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::InvalidInterpolation { .. } => "InvalidInterpolation",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            // the scanner's message is already the whole story
            ErrorImpl::Lexical { .. } => ErrorTip::None,
            ErrorImpl::ExpectedExpression { token } => {
                ErrorTip::Suggestion(format!("Expected an expression, found `{}`", token))
            }
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::UnexpectedEof { message } => {
                ErrorTip::Suggestion(format!("Reached end of input, {}", message))
            }
            ErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number: `{}`", token))
            }
            ErrorImpl::TooManyArguments { limit } => ErrorTip::Suggestion(format!(
                "A call can take at most {} arguments",
                limit
            )),
            ErrorImpl::EmptyStructPattern => ErrorTip::Suggestion(String::from(
                "Struct patterns must name at least one field",
            )),
            ErrorImpl::InvalidPattern { token } => ErrorTip::Suggestion(format!(
                "`{}` cannot start a pattern; expected a literal, `_`, a name or `{{`",
                token
            )),
            ErrorImpl::StructPatternInAlternation => ErrorTip::Suggestion(String::from(
                "Struct patterns cannot be combined with `|`",
            )),
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "Expressions and blocks can nest at most {} levels deep",
                limit
            )),
            ErrorImpl::InvalidInterpolation { message } => {
                ErrorTip::Suggestion(format!("Bad `${{...}}` in string: {}", message))
            }
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("{message}")]
    Lexical { message: String },
    #[error("expected an expression, found {token:?}")]
    ExpectedExpression { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("unexpected end of input: {message}")]
    UnexpectedEof { message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("too many arguments in call, the limit is {limit}")]
    TooManyArguments { limit: usize },
    #[error("empty struct patterns are not allowed")]
    EmptyStructPattern,
    #[error("invalid pattern starting at {token:?}")]
    InvalidPattern { token: String },
    #[error("struct patterns cannot be combined with other patterns using '|'")]
    StructPatternInAlternation,
    #[error("nesting too deep, the limit is {limit}")]
    NestingTooDeep { limit: usize },
    #[error("invalid string interpolation: {message}")]
    InvalidInterpolation { message: String },
}
