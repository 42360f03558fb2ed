//! Lexical analysis module for the front end.
//!
//! This module contains the scanner that converts source text into a stream
//! of tokens for parsing. It handles:
//!
//! - Recognition of keywords, identifiers, literals, and operators
//! - Line tracking for error reporting
//! - Comments and whitespace handling
//! - Lexical errors, which are emitted as error tokens rather than raised

pub mod lexer;
pub mod tokens;
