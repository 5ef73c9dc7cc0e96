//! Parser configuration.
//!
//! Every field has a default, so hosts can load a
//! [`ParseOptions`] from a partial JSON or TOML table.

use serde::{Deserialize, Serialize};

/// Default bound on nested container types and collection literals.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// How backslash sequences inside quoted string values are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapeMode {
    /// Keep the backslash and the byte after it verbatim.
    #[default]
    Raw,
    /// Interpret `\n \r \t \0 \\ \" \'`; any other pair is kept verbatim.
    Decode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub escapes: EscapeMode,
    /// Deepest allowed nesting of `map`/`list`/`set` types and of `[...]` /
    /// `{...}` literals. Exceeding it fails the parse instead of recursing.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            escapes: EscapeMode::Raw,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
