//! Parser and validator for Adobe Analytics `s.products` strings.
//!
//! ```text
//! product-string := product ("," product)*
//! product        := category ";" item ";" quantity ";" price [";" events [";" evars]]
//! events | evars := attribute ("|" attribute)*
//! attribute      := key ["=" value]
//! ```
//!
//! Parsing is total: every input yields a [`ProductString`] whose products
//! carry validity flags, with [`Diagnostic`]s explaining what is wrong.
//!
//! ```
//! let parsed = prodstring_parse::parse("Shoes;Runner;1;59.99,Socks;Wool;2;8.50");
//! assert!(parsed.is_valid());
//! assert_eq!(parsed.len(), 2);
//!
//! // A decimal comma splits the price and invalidates the whole string.
//! let parsed = prodstring_parse::parse("Shoes;Runner;1;59,99");
//! assert!(parsed.has_cascading_error());
//! assert!(!parsed.is_valid());
//! ```

mod span;
pub use span::Span;

mod split;
pub use split::{ATTRIBUTE_SEPARATOR, FIELD_SEPARATOR, KEY_VALUE_SEPARATOR, PRODUCT_SEPARATOR};

mod attribute;
pub use attribute::{Attribute, parse_attributes};

mod diagnostic;
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};

mod product;
pub use product::{MAX_FIELDS, MIN_FIELDS, Product};

mod cascade;
pub use cascade::looks_like_price_fragment;

mod product_string;
pub use product_string::ProductString;

/// Parse a product string.
pub fn parse(source: &str) -> ProductString {
    ProductString::parse(source)
}
