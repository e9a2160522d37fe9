//! Template segmentation.
//!
//! A template is split into alternating literal text and placeholder
//! bodies. A `{` opens a placeholder only when it is immediately followed
//! by a known argument name, so braces in ordinary prose pass through as
//! literal text. Placeholder bodies span balanced nested braces; a `{`
//! whose matching `}` never arrives is a fatal parse error for the whole
//! call.
//!
//! Segmentation is lazy: [`segments`] returns an iterator that walks the
//! template on demand and can be recreated cheaply for another pass.

use crate::error::{FormatError, FormatResult};
use crate::value::Args;

/// One piece of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, emitted as-is
    Literal(String),
    /// The inner body of a `{...}` placeholder, outer braces stripped
    Placeholder(String),
}

/// Lazily segment `template`, treating `{` as a placeholder opener only
/// when a name from `args` follows it.
pub fn segments<'a>(template: &'a str, args: &'a Args) -> Segments<'a> {
    Segments {
        template,
        args,
        pos: 0,
        failed: false,
    }
}

/// Iterator over [`Segment`]s; see [`segments`].
pub struct Segments<'a> {
    template: &'a str,
    args: &'a Args,
    pos: usize,
    failed: bool,
}

impl<'a> Segments<'a> {
    /// Byte offset (relative to `self.pos`) of the next placeholder
    /// opener, if any.
    fn next_placeholder_start(&self) -> Option<usize> {
        let rest = &self.template[self.pos..];
        let mut search_from = 0;
        while let Some(open) = rest[search_from..].find('{') {
            let at = search_from + open;
            if self.opens_known_argument(&rest[at + 1..]) {
                return Some(at);
            }
            search_from = at + 1;
        }
        None
    }

    /// Whether the text after a `{` starts with a known argument name.
    /// End-of-string counts as a name boundary, so a known name whose
    /// `}` never arrives still opens a placeholder (and then fails as
    /// unbalanced) instead of passing through as literal text.
    fn opens_known_argument(&self, after_brace: &str) -> bool {
        let end = after_brace
            .find(['{', '}', ','])
            .unwrap_or(after_brace.len());
        if after_brace.as_bytes().get(end) == Some(&b'{') {
            return false;
        }
        let name = after_brace[..end].trim();
        !name.is_empty() && self.args.contains(name)
    }

    /// Consume a placeholder starting at absolute offset `start` (which
    /// holds `{`), returning its inner body and advancing past the
    /// matching `}`.
    fn consume_placeholder(&mut self, start: usize) -> FormatResult<Segment> {
        let mut depth = 0usize;
        for (offset, ch) in self.template[start..].char_indices() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        let body = &self.template[start + 1..start + offset];
                        self.pos = start + offset + 1;
                        return Ok(Segment::Placeholder(body.to_string()));
                    }
                }
                _ => {}
            }
        }
        self.failed = true;
        Err(FormatError::UnbalancedBraces(self.template.to_string()))
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = FormatResult<Segment>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.template.len() {
            return None;
        }
        match self.next_placeholder_start() {
            Some(0) => Some(self.consume_placeholder(self.pos)),
            Some(offset) => {
                let literal = self.template[self.pos..self.pos + offset].to_string();
                self.pos += offset;
                Some(Ok(Segment::Literal(literal)))
            }
            None => {
                let literal = self.template[self.pos..].to_string();
                self.pos = self.template.len();
                Some(Ok(Segment::Literal(literal)))
            }
        }
    }
}

/// Split a placeholder body into `(name, subformat, rest)`. A body with
/// no comma is a simple substitution; `rest` keeps any commas inside
/// nested sub-messages intact.
pub fn split_placeholder(body: &str) -> (&str, Option<&str>, &str) {
    let mut parts = body.splitn(3, ',');
    let name = parts.next().unwrap_or("").trim();
    let subformat = parts.next().map(str::trim);
    let rest = parts.next().map(str::trim).unwrap_or("");
    (name, subformat, rest)
}
