//! Error types and error handling for the front end.
//!
//! Lexical problems travel through the token stream as error tokens; the
//! parser turns those, and every syntax problem it finds, into an [`errors::Error`]
//! carrying the line of the offending token.

pub mod errors;
