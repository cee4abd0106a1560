//! Byte ranges into the raw product string.
//!
//! Offsets are `u32`: sources of 4 GiB or more are not supported.

/// A span representing a range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "facet", derive(facet::Facet))]
pub struct Span {
    /// Byte offset of the start (inclusive)
    pub start: u32,
    /// Byte offset of the end (exclusive)
    pub end: u32,
}

impl Span {
    /// Create a new span from start and end byte offsets.
    #[inline]
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Create an empty span at a position.
    #[inline]
    pub fn empty(pos: u32) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Smallest span covering both `self` and `other`.
    #[inline]
    pub fn cover(&self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// The sub-span of `len` bytes starting `offset` bytes into this one.
    #[inline]
    pub(crate) fn sub(&self, offset: usize, len: usize) -> Span {
        let start = self.start.saturating_add(offset_of(offset));
        Span::new(start, start.saturating_add(offset_of(len)))
    }

    /// Get the source text for this span.
    ///
    /// Returns `""` when the span does not lie on char boundaries of `source`.
    #[inline]
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source
            .get(self.start as usize..self.end as usize)
            .unwrap_or_default()
    }
}

/// Convert a byte offset to `u32`, saturating at `u32::MAX`.
#[inline]
pub(crate) fn offset_of(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl From<Span> for std::ops::Range<usize> {
    fn from(span: Span) -> Self {
        span.start as usize..span.end as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_offsets_saturate() {
        assert_eq!(offset_of(7), 7);
        assert_eq!(offset_of(usize::MAX), u32::MAX);
        assert_eq!(Span::new(u32::MAX - 1, u32::MAX - 1).sub(4, 4), Span::empty(u32::MAX));
    }

    #[test]
    fn test_slice_outside_source_is_empty() {
        assert_eq!(Span::new(2, 5).slice("abcdef"), "cde");
        assert_eq!(Span::new(3, 10).slice("abc"), "");
        // Splits the two-byte `é`.
        assert_eq!(Span::new(0, 1).slice("é"), "");
    }
}
