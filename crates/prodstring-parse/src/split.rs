//! Splitting on the product-string delimiters.

use crate::Span;
use crate::span::offset_of;
use tracing::trace;

/// Separates products.
pub const PRODUCT_SEPARATOR: char = ',';
/// Separates the fields of one product.
pub const FIELD_SEPARATOR: char = ';';
/// Separates the entries of an event or eVar field.
pub const ATTRIBUTE_SEPARATOR: char = '|';
/// Separates an attribute key from its value.
pub const KEY_VALUE_SEPARATOR: char = '=';

/// A slice of the source together with its location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Piece<'src> {
    pub text: &'src str,
    pub span: Span,
}

impl<'src> Piece<'src> {
    /// The whole source as a single piece.
    pub fn root(source: &'src str) -> Self {
        Self {
            text: source,
            span: Span::new(0, offset_of(source.len())),
        }
    }

    /// Split at the first `delimiter`, if any.
    pub fn split_once(self, delimiter: char) -> (Piece<'src>, Option<Piece<'src>>) {
        match self.text.find(delimiter) {
            Some(idx) => {
                let after = idx + delimiter.len_utf8();
                let head = Piece {
                    text: &self.text[..idx],
                    span: self.span.sub(0, idx),
                };
                let tail = Piece {
                    text: &self.text[after..],
                    span: self.span.sub(after, self.text.len() - after),
                };
                (head, Some(tail))
            }
            None => (self, None),
        }
    }

    /// Iterate over the pieces separated by `delimiter`.
    pub fn split(self, delimiter: char) -> Pieces<'src> {
        Pieces {
            remaining: self.text,
            pos: self.span.start,
            delimiter,
            done: false,
        }
    }
}

/// Iterator over the pieces of a string split on one delimiter.
///
/// Behaves like `str::split`: an empty input yields one empty piece, and
/// adjacent delimiters yield an empty piece between them.
#[derive(Clone)]
pub(crate) struct Pieces<'src> {
    /// Text not yet consumed.
    remaining: &'src str,
    /// Byte position of `remaining` in the original source.
    pos: u32,
    delimiter: char,
    done: bool,
}

impl<'src> Iterator for Pieces<'src> {
    type Item = Piece<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let start = self.pos;
        let text = match self.remaining.find(self.delimiter) {
            Some(idx) => {
                let consumed = idx + self.delimiter.len_utf8();
                let text = &self.remaining[..idx];
                self.remaining = &self.remaining[consumed..];
                self.pos = self.pos.saturating_add(offset_of(consumed));
                text
            }
            None => {
                self.done = true;
                std::mem::take(&mut self.remaining)
            }
        };

        let span = Span::new(start, start.saturating_add(offset_of(text.len())));
        trace!("Piece split on {:?} at {:?}: {:?}", self.delimiter, span, text);
        Some(Piece { text, span })
    }
}
