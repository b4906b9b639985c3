//! Compiled search patterns and the overlap-preserving matcher.
//!
//! Matching is Knuth–Morris–Pratt over the UTF-8 bytes of the body. After a
//! full match the automaton falls back through the failure function instead
//! of restarting past the match, so overlapping occurrences are reported
//! exactly as a naive every-position scan would report them.
//!
//! Offsets are emitted in characters, not bytes. A UTF-8 pattern can only
//! match at a character boundary, so the character count is tracked during
//! the same pass by counting non-continuation bytes.

use crate::error::SearchError;

/// A validated, preprocessed search pattern.
///
/// Compiling once and reusing the pattern across many bodies avoids
/// rebuilding the failure function per article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    text: String,
    /// `failure[i]` is the length of the longest proper prefix of
    /// `text[..=i]` that is also a suffix of it.
    failure: Vec<usize>,
    char_len: usize,
}

impl Pattern {
    /// Compiles `text` into a reusable pattern.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidArgument` if `text` is empty. An empty
    /// pattern would match at every position, which is never a useful
    /// search.
    pub fn new(text: &str) -> Result<Self, SearchError> {
        if text.is_empty() {
            return Err(SearchError::InvalidArgument(
                "search pattern must not be empty".to_string(),
            ));
        }

        Ok(Self {
            text: text.to_string(),
            failure: failure_function(text.as_bytes()),
            char_len: text.chars().count(),
        })
    }

    /// The pattern text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length of the pattern in characters.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// Returns a lazy iterator over the character offsets at which this
    /// pattern occurs in `body`, in ascending order.
    pub fn occurrences<'p, 'b>(&'p self, body: &'b str) -> Occurrences<'p, 'b> {
        Occurrences {
            pattern: self,
            body: body.as_bytes(),
            pos: 0,
            matched: 0,
            chars_seen: 0,
        }
    }
}

fn failure_function(p: &[u8]) -> Vec<usize> {
    let mut failure = vec![0; p.len()];
    let mut k = 0;
    for i in 1..p.len() {
        while k > 0 && p[i] != p[k] {
            k = failure[k - 1];
        }
        if p[i] == p[k] {
            k += 1;
        }
        failure[i] = k;
    }
    failure
}

fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Iterator over the occurrences of a [`Pattern`] in one body.
///
/// Created by [`Pattern::occurrences`]. Besides plain iteration it supports
/// bounded stepping through [`Occurrences::scan`], which lets a caller check
/// a deadline between chunks of a very long body.
#[derive(Debug, Clone)]
pub struct Occurrences<'p, 'b> {
    pattern: &'p Pattern,
    body: &'b [u8],
    /// Next byte of `body` to consume.
    pos: usize,
    /// Bytes of the pattern matched so far.
    matched: usize,
    /// Characters in `body[..pos]`.
    chars_seen: usize,
}

impl Occurrences<'_, '_> {
    /// Consumes at most `budget` more bytes of the body, appending every
    /// occurrence found to `out`.
    ///
    /// Returns `true` once the whole body has been consumed.
    pub fn scan(&mut self, budget: usize, out: &mut Vec<usize>) -> bool {
        let end = self.pos.saturating_add(budget).min(self.body.len());
        while self.pos < end {
            if let Some(offset) = self.step() {
                out.push(offset);
            }
        }
        self.is_exhausted()
    }

    /// Number of body bytes consumed so far.
    pub fn bytes_scanned(&self) -> usize {
        self.pos
    }

    /// Whether the whole body has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.body.len()
    }

    /// Feeds one byte to the automaton. Returns the start offset of a match
    /// that ends at this byte, if any.
    fn step(&mut self) -> Option<usize> {
        let needle = self.pattern.text.as_bytes();
        let byte = self.body[self.pos];
        self.pos += 1;
        if !is_continuation(byte) {
            self.chars_seen += 1;
        }

        while self.matched > 0 && byte != needle[self.matched] {
            self.matched = self.pattern.failure[self.matched - 1];
        }
        if byte == needle[self.matched] {
            self.matched += 1;
        }

        if self.matched == needle.len() {
            // Fall back rather than reset so the next occurrence may overlap.
            self.matched = self.pattern.failure[self.matched - 1];
            return Some(self.chars_seen - self.pattern.char_len);
        }
        None
    }
}

impl Iterator for Occurrences<'_, '_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while !self.is_exhausted() {
            if let Some(offset) = self.step() {
                return Some(offset);
            }
        }
        None
    }
}
