#![allow(clippy::module_inception)]

use crate::errors::errors::ErrorTip;

pub use crate::{
    errors::errors::Error,
    lexer::lexer::{tokenize, Lexer},
    parser::parser::{parse, parse_with_options, ParseOptions, ParseOutcome},
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Byte range of a token inside the source buffer.
///
/// The buffer itself is never owned by tokens or nodes; it outlives the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Offsets past `u32::MAX` saturate.
    pub fn new(start: usize, end: usize) -> Self {
        Span {
            start: u32::try_from(start).unwrap_or(u32::MAX),
            end: u32::try_from(end).unwrap_or(u32::MAX),
        }
    }

    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the slice of `source` covered by this span, if it is in range.
    pub fn slice<'s>(&self, source: &'s str) -> Option<&'s str> {
        source.get(self.start as usize..self.end as usize)
    }
}

/// Scans and parses a whole source buffer with the default options.
pub fn parse_source(source: &str) -> ParseOutcome {
    parse(Lexer::new(source))
}

/// Returns the text of the 1-based `line` in `source`, without its line break.
pub fn get_line(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source
        .split_inclusive('\n')
        .nth(line as usize - 1)
        .map(|text| text.trim_end_matches(['\n', '\r']))
}

/// Renders a diagnostic against the source it came from.
///
/// ```text
/// Error: ExpectedExpression (Expected an expression, found `)`)
///   |
/// 3 | let x = )
///   |
/// ```
pub fn display_error(error: &Error, source: &str) -> String {
    let line = error.get_line();
    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut rendered = if let ErrorTip::None = error.get_tip() {
        format!("Error: {}: {}\n", error.get_error_name(), error.kind())
    } else {
        format!("Error: {} ({})\n", error.get_error_name(), error.get_tip())
    };

    rendered.push_str(&format!("{:>padding$}\n", "|"));
    if let Some(text) = get_line(source, line) {
        rendered.push_str(&format!("{} | {}\n", line_string, text.trim()));
    } else {
        rendered.push_str(&format!("{} | {}\n", line_string, error));
    }
    rendered.push_str(&format!("{:>padding$}", "|"));

    rendered
}
