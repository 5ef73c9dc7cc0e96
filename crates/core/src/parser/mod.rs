//! Backtracking recursive-descent parser for Thrift IDL.
//!
//! Every grammar rule returns `PResult<T>`. A rule that fails leaves the
//! cursor wherever it stopped; the nearest checkpoint owner
//! ([`Parser::attempt`], [`Parser::any_of`], [`Parser::repeat`]) rewinds it.
//! Only [`Parser::parse_document`] turns a failure into a [`ParseError`].
use crate::ast::Declaration;
use crate::document::Document;
use crate::error::{Miss, PResult, ParseError, SNIPPET_LEN};
use crate::lexer::Cursor;
use crate::options::ParseOptions;
use indexmap::IndexMap;

mod constructs;
mod fields;
mod types;
mod values;

/// One ordered alternative for [`Parser::any_of`].
type Alternative<'p, 'a, T> = &'p dyn Fn(&mut Parser<'a>) -> PResult<T>;

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

pub(crate) struct Parser<'a> {
    cur: Cursor<'a>,
    options: &'a ParseOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(input: &'a [u8], options: &'a ParseOptions) -> Self {
        Parser {
            cur: Cursor::new(input),
            options,
            depth: 0,
        }
    }

    // -- Backtracking combinators -------------------------------

    /// Run `rule` from a checkpoint, rewinding if it fails.
    fn attempt<T>(&mut self, rule: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        let checkpoint = self.cur.pos();
        let result = rule(self);
        if result.is_err() {
            self.cur.rewind(checkpoint);
        }
        result
    }

    fn optional<T>(&mut self, rule: impl FnOnce(&mut Self) -> PResult<T>) -> Option<T> {
        self.attempt(rule).ok()
    }

    /// First alternative that succeeds, each tried from the same checkpoint.
    fn any_of<T>(&mut self, alternatives: &[Alternative<'_, 'a, T>]) -> PResult<T> {
        let checkpoint = self.cur.pos();
        for alternative in alternatives {
            match alternative(self) {
                Ok(value) => return Ok(value),
                Err(miss) => {
                    tracing::trace!(offset = miss.offset, "alternative failed: {}", miss.message);
                    self.cur.rewind(checkpoint);
                }
            }
        }
        Err(self.cur.miss("unexpected token"))
    }

    /// Greedy repetition. Stops at the first failed iteration, rewinding to
    /// just before it; zero matches is a success. An iteration that consumes
    /// nothing also ends the loop.
    fn repeat<T>(&mut self, mut item: impl FnMut(&mut Self) -> PResult<T>) -> Vec<T> {
        let mut items = Vec::new();
        loop {
            let checkpoint = self.cur.pos();
            match item(self) {
                Ok(value) if self.cur.pos() > checkpoint => items.push(value),
                _ => {
                    self.cur.rewind(checkpoint);
                    return items;
                }
            }
        }
    }

    /// [`Parser::repeat`] collecting into an insertion-ordered map. A later
    /// item with the same key replaces the earlier one in place.
    fn repeat_keyed<T>(
        &mut self,
        item: impl FnMut(&mut Self) -> PResult<T>,
        key: impl Fn(&T) -> String,
    ) -> IndexMap<String, T> {
        let mut map = IndexMap::new();
        for value in self.repeat(item) {
            map.insert(key(&value), value);
        }
        map
    }

    /// Run `rule` one nesting level deeper, failing past `max_depth`.
    fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= self.options.max_depth {
            return Err(self.cur.miss(format!(
                "nesting deeper than {} levels",
                self.options.max_depth
            )));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    // -- Document assembly --------------------------------------

    pub(crate) fn parse_document(&mut self) -> Result<Document, ParseError> {
        self.cur.skip_trivia();
        let mut document = Document::default();
        while !self.cur.at_end() {
            self.cur.clear_furthest();
            let checkpoint = self.cur.pos();
            match self.parse_declaration() {
                Ok(declaration) => {
                    tracing::debug!(
                        kind = %declaration.kind(),
                        name = declaration.key(),
                        "parsed declaration"
                    );
                    document.insert(declaration);
                }
                Err(miss) => return Err(self.fatal(checkpoint, miss)),
            }
        }
        Ok(document)
    }

    fn parse_declaration(&mut self) -> PResult<Declaration> {
        self.any_of(&[
            &Self::parse_typedef,
            &Self::parse_const,
            &Self::parse_enum,
            &Self::parse_struct,
            &Self::parse_union,
            &Self::parse_exception,
            &Self::parse_service,
            &Self::parse_namespace,
            &Self::parse_include,
        ])
    }

    fn fatal(&self, offset: usize, miss: Miss) -> ParseError {
        let detail = self.cur.furthest().map(|f| {
            let (line, column) = self.cur.line_col(f.offset);
            format!("{} at line {}, column {}", f.message, line, column)
        });
        let error = ParseError::new(
            miss.message,
            detail,
            offset,
            self.cur.line_col(offset),
            self.cur.snippet(offset, SNIPPET_LEN),
        );
        tracing::debug!(offset, line = error.line, "thrift parse failed: {}", error.message);
        error
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
