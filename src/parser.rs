// src/parser.rs
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::errors::{JpathError, Result};

/// One unit of a compiled path expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Segment {
    Child(String),      // .name
    Descendant(String), // ..name
    Index(String),      // [*], [i], [start:end]
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Child(name) => write!(f, ".{name}"),
            Segment::Descendant(name) => write!(f, "..{name}"),
            Segment::Index(spec) => write!(f, "[{spec}]"),
        }
    }
}

/// The ordered segment list a path expression compiles to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompiledPath {
    segments: Vec<Segment>,
}

impl CompiledPath {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for CompiledPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for seg in &self.segments {
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}

/// Compile `expr`, silently dropping every character that no segment grammar covers.
///
/// Never fails: an expression without recognizable segments compiles to an empty path,
/// which selects the document root.
pub fn compile(expr: &str) -> CompiledPath {
    let mut p = Parser::new(expr);
    let mut segments = Vec::new();
    while !p.eof() {
        match p.next_segment() {
            Some(seg) => segments.push(seg),
            None => p.skip_char(),
        }
    }
    debug!(expr, segments = segments.len(), "compiled path");
    CompiledPath { segments }
}

/// Like [`compile`], but rejects any uncovered character other than a leading `$`.
pub fn compile_strict(expr: &str) -> Result<CompiledPath> {
    let mut p = Parser::new(expr);
    let mut segments = Vec::new();
    p.consume_char('$');
    while let Some(found) = p.peek_char() {
        match p.next_segment() {
            Some(seg) => segments.push(seg),
            None => {
                return Err(JpathError::Syntax {
                    position: p.i,
                    found,
                })
            }
        }
    }
    debug!(expr, segments = segments.len(), "compiled path (strict)");
    Ok(CompiledPath { segments })
}

struct Parser<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Parser<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Try the three segment grammars at the current position. `..name` is tried before
    /// `.name` so a descendant segment is never split into two child segments.
    fn next_segment(&mut self) -> Option<Segment> {
        if self.peek_str("..") {
            if let Some(name) = self.word_at(self.i + 2) {
                self.i += 2 + name.len();
                return Some(Segment::Descendant(name.to_string()));
            }
        }
        if self.peek_char() == Some('.') {
            if let Some(name) = self.word_at(self.i + 1) {
                self.i += 1 + name.len();
                return Some(Segment::Child(name.to_string()));
            }
        }
        if self.peek_char() == Some('[') {
            if let Some(spec) = self.bracketed() {
                self.i += spec.len() + 2;
                return Some(Segment::Index(spec.to_string()));
            }
        }
        None
    }

    // One or more ASCII word characters starting at byte `from`.
    fn word_at(&self, from: usize) -> Option<&'a str> {
        let rest = &self.s[from..];
        let len = rest
            .bytes()
            .take_while(|b| *b == b'_' || b.is_ascii_alphanumeric())
            .count();
        (len > 0).then(|| &rest[..len])
    }

    // Content between the `[` at the cursor and the LAST `]` on the same line. At least one
    // character must sit between the brackets.
    fn bracketed(&self) -> Option<&'a str> {
        let rest = &self.s[self.i + 1..];
        let line = &rest[..rest.find('\n').unwrap_or(rest.len())];
        match line.rfind(']') {
            Some(close) if close > 0 => Some(&line[..close]),
            _ => None,
        }
    }

    pub fn consume_char(&mut self, c: char) -> bool {
        if self.peek_char() == Some(c) {
            self.i += c.len_utf8();
            true
        } else {
            false
        }
    }

    pub fn skip_char(&mut self) {
        if let Some(c) = self.peek_char() {
            self.i += c.len_utf8();
        }
    }

    pub fn peek_char(&self) -> Option<char> {
        self.s[self.i..].chars().next()
    }

    pub fn peek_str(&self, lit: &str) -> bool {
        self.s[self.i..].starts_with(lit)
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }
}
