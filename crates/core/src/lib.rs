#![allow(clippy::result_large_err)]
//! thrift-idl: backtracking parser for Apache Thrift IDL.
//!
//! Turns Thrift IDL source bytes into a [`Document`]: an insertion-ordered
//! map from construct kind to declared name to payload. The whole input either
//! parses or fails with exactly one [`ParseError`].
//!
//! # Public API
//!
//! - [`parse()`] -- parse with default [`ParseOptions`]
//! - [`parse_with()`] -- parse with explicit options
//! - [`parse_to_value()`] -- parse straight to the JSON document shape
//! - [`Document`], [`ParseError`], [`ParseOptions`], [`EscapeMode`]
//! - AST types: [`Type`], [`Value`], [`Field`], [`Function`], [`Declaration`]
//! - [`DOCUMENT_SCHEMA`] -- JSON Schema for the serialized document

pub mod ast;
pub mod document;
pub mod error;
mod lexer;
pub mod options;
mod parser;

// ── Convenience re-exports ───────────────────────────────────────────

pub use ast::{
    ContainerType, Declaration, EnumItem, Field, FieldOption, Function, MapEntry, Reference,
    Type, Value,
};
pub use document::{Document, DOCUMENT_SCHEMA};
pub use error::{ParseError, PARSE_ERROR_KIND};
pub use options::{EscapeMode, ParseOptions};

/// Parse Thrift IDL with default options.
pub fn parse(input: impl AsRef<[u8]>) -> Result<Document, ParseError> {
    parse_with(input, &ParseOptions::default())
}

/// Parse Thrift IDL. The input is read as bytes; non-UTF-8 text inside names
/// and strings is decoded lossily.
pub fn parse_with(input: impl AsRef<[u8]>, options: &ParseOptions) -> Result<Document, ParseError> {
    let input = input.as_ref();
    tracing::debug!(bytes = input.len(), "parsing thrift document");
    parser::Parser::new(input, options).parse_document()
}

/// Parse Thrift IDL with default options and serialize the document.
pub fn parse_to_value(input: impl AsRef<[u8]>) -> Result<serde_json::Value, ParseError> {
    parse(input).map(|document| document.to_json_value())
}
