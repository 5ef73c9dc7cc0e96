use serde::Serialize;

/// Error kind carried by every [`ParseError`].
pub const PARSE_ERROR_KIND: &str = "THRIFT_FILE_PARSING_ERROR";

/// Number of unconsumed input bytes copied into [`ParseError::snippet`].
pub const SNIPPET_LEN: usize = 50;

/// A fatal parse failure. The whole input either parses or yields exactly one
/// of these; no partial document is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{kind}: {message} at line {line}, column {column}")]
pub struct ParseError {
    pub kind: &'static str,
    pub message: String,
    /// Message of the furthest failure seen inside the rejected construct.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub offset: usize,
    pub line: u32,
    pub column: u32,
    pub snippet: String,
}

impl ParseError {
    pub fn new(
        message: impl Into<String>,
        detail: Option<String>,
        offset: usize,
        (line, column): (u32, u32),
        snippet: impl Into<String>,
    ) -> Self {
        ParseError {
            kind: PARSE_ERROR_KIND,
            message: message.into(),
            detail,
            offset,
            line,
            column,
            snippet: snippet.into(),
        }
    }

    /// Serialize to JSON for tooling. Unlike the derived `Serialize`, the
    /// format always includes every field (null for a missing detail).
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "column":  self.column,
            "detail":  self.detail,
            "kind":    self.kind,
            "line":    self.line,
            "message": self.message,
            "offset":  self.offset,
            "snippet": self.snippet,
        })
    }
}

/// A recoverable failure inside the parser. Backtracking combinators consume
/// these; only the top-level loop turns one into a [`ParseError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Miss {
    pub message: String,
    pub offset: usize,
}

pub(crate) type PResult<T> = Result<T, Miss>;
