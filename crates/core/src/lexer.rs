//! Byte-level lexical primitives over a single cursor.
//!
//! There is no token stream: the grammar reads bytes directly so that
//! ambiguous prefixes (`0x1`, `1e3`, `1.5`, `-2`) can be settled by trial
//! reads. A primitive either succeeds, leaving the cursor past the matched
//! bytes and any trailing trivia, or returns a [`Miss`]. On a miss the cursor
//! position is unspecified; whoever took the checkpoint rewinds it.

use crate::ast::Value;
use crate::error::{Miss, PResult};
use crate::options::EscapeMode;

pub(crate) struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
    furthest: Option<Miss>,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Cursor {
            buf,
            pos: 0,
            furthest: None,
        }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn rewind(&mut self, checkpoint: usize) {
        self.pos = checkpoint;
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.buf.get(self.pos + ahead).copied()
    }

    /// Consume `b` if it is next. No trivia is skipped.
    pub(crate) fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if pred(b)) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn text(&self, start: usize, end: usize) -> String {
        String::from_utf8_lossy(&self.buf[start..end]).into_owned()
    }

    // -- Failure bookkeeping ------------------------------------

    /// Build a miss at the current position and remember it if it is the
    /// furthest one seen since the last [`Cursor::clear_furthest`].
    pub(crate) fn miss(&mut self, message: impl Into<String>) -> Miss {
        let miss = Miss {
            message: message.into(),
            offset: self.pos,
        };
        if self.furthest.as_ref().map_or(true, |f| miss.offset > f.offset) {
            self.furthest = Some(miss.clone());
        }
        miss
    }

    pub(crate) fn furthest(&self) -> Option<&Miss> {
        self.furthest.as_ref()
    }

    pub(crate) fn clear_furthest(&mut self) {
        self.furthest = None;
    }

    /// 1-based line and column of a byte offset.
    pub(crate) fn line_col(&self, offset: usize) -> (u32, u32) {
        let upto = &self.buf[..offset.min(self.buf.len())];
        let line = upto.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = upto
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        (line as u32, (upto.len() - line_start + 1) as u32)
    }

    pub(crate) fn snippet(&self, offset: usize, len: usize) -> String {
        let start = offset.min(self.buf.len());
        let end = (start + len).min(self.buf.len());
        self.text(start, end)
    }

    // -- Trivia -------------------------------------------------

    /// Skip whitespace and `/* */`, `#` and `//` comments in any order.
    pub(crate) fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r' | b'\n') => self.pos += 1,
                Some(b'/') if self.peek_at(1) == Some(b'*') => self.skip_block_comment(),
                Some(b'/') if self.peek_at(1) == Some(b'/') => self.skip_line_comment(),
                Some(b'#') => self.skip_line_comment(),
                _ => return,
            }
        }
    }

    /// An unterminated block comment swallows the rest of the input.
    fn skip_block_comment(&mut self) {
        let body = self.pos + 2;
        match self.buf[body..].windows(2).position(|w| w == b"*/") {
            Some(i) => self.pos = body + i + 2,
            None => self.pos = self.buf.len(),
        }
    }

    fn skip_line_comment(&mut self) {
        self.eat_while(|b| b != b'\n' && b != b'\r');
    }

    // -- Keywords and punctuation -------------------------------

    /// Exact bytes of `word`. There is no word-boundary check, so `structure`
    /// matches `struct` and leaves `ure` behind.
    pub(crate) fn keyword(&mut self, word: &str) -> PResult<()> {
        if self.buf[self.pos.min(self.buf.len())..].starts_with(word.as_bytes()) {
            self.pos += word.len();
            self.skip_trivia();
            Ok(())
        } else {
            Err(self.miss(format!("expected '{}'", word)))
        }
    }

    pub(crate) fn byte(&mut self, b: u8) -> PResult<()> {
        if self.eat(b) {
            self.skip_trivia();
            Ok(())
        } else {
            Err(self.miss(format!("expected '{}'", b as char)))
        }
    }

    /// Optional `,` or `;` after a repeated element.
    pub(crate) fn separator(&mut self) -> bool {
        if self.eat(b',') || self.eat(b';') {
            self.skip_trivia();
            true
        } else {
            false
        }
    }

    // -- Identifiers --------------------------------------------

    pub(crate) fn name(&mut self) -> PResult<String> {
        self.word(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'_', "identifier")
    }

    /// Namespace scope: an identifier that may also contain `*`.
    pub(crate) fn scope(&mut self) -> PResult<String> {
        self.word(
            |b| b.is_ascii_alphanumeric() || b == b'.' || b == b'_' || b == b'*',
            "namespace scope",
        )
    }

    fn word(&mut self, pred: impl Fn(u8) -> bool, what: &str) -> PResult<String> {
        let start = self.pos;
        if self.eat_while(pred) == 0 {
            return Err(self.miss(format!("expected {}", what)));
        }
        let word = self.text(start, self.pos);
        self.skip_trivia();
        Ok(word)
    }

    // -- Numbers ------------------------------------------------

    /// `-`? then a run of digits and dots, coerced as one number. The run
    /// must hold a digit and must coerce. A run that does not coerce
    /// (`1.2.3`) is a miss here, so the value reader falls back to a reference.
    pub(crate) fn number(&mut self) -> PResult<Value> {
        let start = self.pos;
        self.eat(b'-');
        let run = self.pos;
        self.eat_while(|b| b.is_ascii_digit() || b == b'.');
        if !self.buf[run..self.pos].iter().any(u8::is_ascii_digit) {
            return Err(self.miss("expected number"));
        }
        let text = self.text(start, self.pos);
        let value = coerce_decimal(&text).ok_or_else(|| self.miss(format!("invalid number '{}'", text)))?;
        self.skip_trivia();
        Ok(value)
    }

    /// `-`? digits-and-dots, `e`/`E`, digits. The exponent carries no sign.
    pub(crate) fn e_notation(&mut self) -> PResult<Value> {
        let start = self.pos;
        self.eat(b'-');
        self.eat_while(|b| b.is_ascii_digit() || b == b'.');
        if !(self.eat(b'e') || self.eat(b'E')) {
            return Err(self.miss("expected exponent"));
        }
        if self.eat_while(|b| b.is_ascii_digit()) == 0 {
            return Err(self.miss("expected exponent digits"));
        }
        let text = self.text(start, self.pos);
        let value = coerce_decimal(&text).ok_or_else(|| self.miss(format!("invalid number '{}'", text)))?;
        self.skip_trivia();
        Ok(value)
    }

    /// `-`? `0x` hex digits.
    pub(crate) fn hex(&mut self) -> PResult<Value> {
        let negative = self.eat(b'-');
        if !self.eat(b'0') || !(self.eat(b'x') || self.eat(b'X')) {
            return Err(self.miss("expected hexadecimal literal"));
        }
        let start = self.pos;
        if self.eat_while(|b| b.is_ascii_hexdigit()) == 0 {
            return Err(self.miss("expected hexadecimal digits"));
        }
        let digits = self.text(start, self.pos);
        self.skip_trivia();
        let Ok(magnitude) = i128::from_str_radix(&digits, 16) else {
            // Past i128 the digits are folded into a float.
            let f = digits
                .bytes()
                .filter_map(|b| char::from(b).to_digit(16))
                .fold(0.0_f64, |acc, d| acc * 16.0 + f64::from(d));
            return Ok(Value::from_f64(if negative { -f } else { f }));
        };
        let n = if negative { -magnitude } else { magnitude };
        Ok(match i64::try_from(n) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::Float(n as f64),
        })
    }

    // -- Quoted text --------------------------------------------

    /// Include path: text up to the first matching quote, no escapes.
    /// Trailing trivia is left for the caller.
    pub(crate) fn quoted_path(&mut self) -> PResult<String> {
        let quote = self.open_quote()?;
        let start = self.pos;
        match self.buf[start..].iter().position(|&b| b == quote) {
            Some(len) => {
                self.pos = start + len + 1;
                Ok(self.text(start, start + len))
            }
            None => Err(self.miss("unterminated include path")),
        }
    }

    /// String value. A backslash always claims the byte after it, so `\'`
    /// never closes a single-quoted string.
    pub(crate) fn string_value(&mut self, escapes: EscapeMode) -> PResult<String> {
        let quote = self.open_quote()?;
        let start = self.pos;
        let mut i = start;
        loop {
            match self.buf.get(i) {
                None => return Err(self.miss("unterminated string value")),
                Some(b'\\') => i += 2,
                Some(&b) if b == quote => break,
                Some(_) => i += 1,
            }
        }
        let raw = &self.buf[start..i];
        self.pos = i + 1;
        let text = match escapes {
            EscapeMode::Raw => String::from_utf8_lossy(raw).into_owned(),
            EscapeMode::Decode => decode_escapes(raw),
        };
        self.skip_trivia();
        Ok(text)
    }

    fn open_quote(&mut self) -> PResult<u8> {
        match self.peek() {
            Some(q @ (b'"' | b'\'')) => {
                self.pos += 1;
                Ok(q)
            }
            _ => Err(self.miss("expected quoted string")),
        }
    }
}

fn coerce_decimal(text: &str) -> Option<Value> {
    if let Ok(i) = text.parse::<i64>() {
        return Some(Value::Int(i));
    }
    let f: f64 = text.parse().ok()?;
    f.is_finite().then(|| Value::from_f64(f))
}

fn decode_escapes(raw: &[u8]) -> String {
    let mut out = Vec::with_capacity(raw.len());
    let mut bytes = raw.iter().copied();
    while let Some(b) = bytes.next() {
        if b != b'\\' {
            out.push(b);
            continue;
        }
        match bytes.next() {
            Some(b'n') => out.push(b'\n'),
            Some(b'r') => out.push(b'\r'),
            Some(b't') => out.push(b'\t'),
            Some(b'0') => out.push(0),
            Some(e @ (b'\\' | b'"' | b'\'')) => out.push(e),
            Some(other) => out.extend([b'\\', other]),
            None => out.push(b'\\'),
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
