//! # Line ending normalization module
//!
//! Wraps an u8 iterator and rewrites every line ending (`\n`, `\r`, `\r\n`)
//! into a single style.

use std::iter::Peekable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineBreak {
    Crlf,
    Lf,
}

impl LineBreak {
    fn bytes(self) -> &'static [u8] {
        match self {
            LineBreak::Crlf => b"\r\n",
            LineBreak::Lf => b"\n",
        }
    }
}

/// This struct wraps an u8 iterator to normalize line endings.
pub struct Normalized<I>
where
    I: Iterator<Item = u8>,
{
    line_break: LineBreak,
    iter: Peekable<I>,
    /// Bytes of the line break currently being emitted.
    pending: &'static [u8],
}

impl<I: Iterator<Item = u8>> Normalized<I> {
    pub fn new(iter: I, line_break: LineBreak) -> Normalized<I> {
        Normalized {
            iter: iter.peekable(),
            line_break,
            pending: &[],
        }
    }
}

impl<I: Iterator<Item = u8>> Iterator for Normalized<I> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if let Some((first, rest)) = self.pending.split_first() {
            self.pending = rest;
            return Some(*first);
        }

        match self.iter.next()? {
            b'\r' => {
                // a "\r\n" pair is a single line break
                if self.iter.peek() == Some(&b'\n') {
                    self.iter.next();
                }
            }
            b'\n' => {}
            other => return Some(other),
        }

        let (first, rest) = self.line_break.bytes().split_first()?;
        self.pending = rest;
        Some(*first)
    }
}

/// Convenience wrapper returning the normalized text.
pub fn normalize(text: &str, line_break: LineBreak) -> String {
    let bytes: Vec<u8> = Normalized::new(text.bytes(), line_break).collect();
    // only ASCII line break bytes were rewritten, so the input stays valid UTF-8
    String::from_utf8(bytes).unwrap_or_default()
}
