//! The parsed form of a whole `s.products` string.

use crate::cascade;
use crate::diagnostic::Diagnostic;
use crate::product::{Product, parse_segment};
use crate::split::{PRODUCT_SEPARATOR, Piece};
use tracing::trace;

/// A parsed product string: its products in source order plus diagnostics.
///
/// Parsing never fails. Malformed input shows up as invalid products and
/// [`Diagnostic`]s instead.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "facet", derive(facet::Facet))]
pub struct ProductString {
    /// One product per comma-separated segment.
    pub products: Vec<Product>,
    /// Problems found, ordered by product.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether a decimal comma split a price across products.
    pub cascading_error: bool,
}

impl ProductString {
    /// Parse a product string.
    ///
    /// The empty string has no products and is valid. Spans are `u32` byte
    /// offsets, so sources must be shorter than 4 GiB.
    pub fn parse(source: &str) -> Self {
        if source.is_empty() {
            return Self::default();
        }

        let mut diagnostics = Vec::new();
        let mut products: Vec<Product> = Piece::root(source)
            .split(PRODUCT_SEPARATOR)
            .enumerate()
            .map(|(index, segment)| parse_segment(index, segment, &mut diagnostics))
            .collect();

        let cascading_error = cascade::propagate(&mut products, &mut diagnostics);
        diagnostics.sort_by_key(|d| (d.product, d.span.start));

        trace!(
            "Parsed {} product(s), {} diagnostic(s)",
            products.len(),
            diagnostics.len()
        );
        Self {
            products,
            diagnostics,
            cascading_error,
        }
    }

    /// Parse input that may be absent. `None` behaves like the empty string.
    pub fn parse_optional(source: Option<&str>) -> Self {
        source.map(Self::parse).unwrap_or_default()
    }

    /// Whether every product is valid. True when there are no products.
    pub fn is_valid(&self) -> bool {
        self.products.iter().all(|p| p.is_valid)
    }

    /// Whether a decimal comma split a price across products.
    pub fn has_cascading_error(&self) -> bool {
        self.cascading_error
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether there are no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Product at `index`.
    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    /// Iterate over the products in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// All diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics concerning the product at `index`.
    pub fn diagnostics_for(&self, index: usize) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.product == index)
    }

    /// Diagnostics with error severity.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }
}

impl<'a> IntoIterator for &'a ProductString {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

impl IntoIterator for ProductString {
    type Item = Product;
    type IntoIter = std::vec::IntoIter<Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.into_iter()
    }
}
