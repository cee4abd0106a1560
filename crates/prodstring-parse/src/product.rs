//! A single product: `category;name;quantity;price;events;evars`.

use crate::attribute::{Attribute, attributes_in};
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::split::{FIELD_SEPARATOR, Piece};
use crate::Span;
use tracing::trace;

const CATEGORY: usize = 0;
const NAME: usize = 1;
const QUANTITY: usize = 2;
const PRICE: usize = 3;
const EVENTS: usize = 4;
const EVARS: usize = 5;

/// Fields a product needs to be valid.
pub const MIN_FIELDS: usize = 4;
/// Fields beyond this are ignored.
pub const MAX_FIELDS: usize = 6;

/// One parsed product of a product string.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "facet", derive(facet::Facet))]
pub struct Product {
    /// Category, possibly empty.
    pub category: String,
    /// Item name, possibly empty (which makes the product invalid).
    pub name: String,
    /// Quantity; 0 when missing or not a number.
    pub quantity: f64,
    /// Unit price; 0 when missing or not a number.
    pub price: f64,
    /// Entries of the events field.
    pub events: Vec<Attribute>,
    /// Entries of the eVars (merchandising) field.
    pub evars: Vec<Attribute>,
    /// Whether the product is well-formed and untouched by a cascading error.
    pub is_valid: bool,
    /// Whether this product's category looks like a split-off price fraction.
    pub cascade_suspect: bool,
    /// Number of `;`-separated fields in the segment, including ignored ones.
    pub field_count: usize,
    /// Source span of the whole segment.
    pub span: Span,
    /// Source spans of the kept fields, in order.
    pub fields: Vec<Span>,
}

impl Product {
    /// Span of the category field.
    pub fn category_span(&self) -> Option<Span> {
        self.fields.get(CATEGORY).copied()
    }

    /// Span of the name field.
    pub fn name_span(&self) -> Option<Span> {
        self.fields.get(NAME).copied()
    }

    /// Span of the quantity field.
    pub fn quantity_span(&self) -> Option<Span> {
        self.fields.get(QUANTITY).copied()
    }

    /// Span of the price field.
    pub fn price_span(&self) -> Option<Span> {
        self.fields.get(PRICE).copied()
    }

    /// First event with the given key.
    pub fn event(&self, key: &str) -> Option<&Attribute> {
        self.events.iter().find(|a| a.key == key)
    }

    /// First eVar with the given key.
    pub fn evar(&self, key: &str) -> Option<&Attribute> {
        self.evars.iter().find(|a| a.key == key)
    }
}

/// Parse one comma-separated segment. Problems are pushed to `diagnostics`.
pub(crate) fn parse_segment(
    index: usize,
    segment: Piece<'_>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Product {
    trace!("Parsing product {} at {:?}: {:?}", index, segment.span, segment.text);

    let mut fields: Vec<Piece<'_>> = Vec::with_capacity(MAX_FIELDS);
    let mut field_count = 0;
    let mut ignored: Option<Span> = None;
    for field in segment.split(FIELD_SEPARATOR) {
        field_count += 1;
        if fields.len() < MAX_FIELDS {
            fields.push(field);
        } else {
            ignored = Some(ignored.map_or(field.span, |span| span.cover(field.span)));
        }
    }

    let text = |i: usize| fields.get(i).map_or("", |f| f.text);
    let mut is_valid = true;

    if fields.len() < MIN_FIELDS {
        is_valid = false;
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::TooFewFields {
                found: fields.len(),
            },
            segment.span,
            index,
        ));
    }

    if let Some(span) = ignored {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::ExtraFields {
                discarded: field_count - MAX_FIELDS,
            },
            span,
            index,
        ));
    }

    if text(NAME).trim().is_empty() {
        is_valid = false;
        let span = fields
            .get(NAME)
            .map_or(Span::empty(segment.span.end), |f| f.span);
        diagnostics.push(Diagnostic::new(DiagnosticKind::MissingName, span, index));
    }

    let quantity = match fields.get(QUANTITY) {
        Some(field) => parse_quantity(field.text).unwrap_or_else(|| {
            if !field.text.trim().is_empty() {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::NonNumericQuantity {
                        text: field.text.to_string(),
                    },
                    field.span,
                    index,
                ));
            }
            0.0
        }),
        None => 0.0,
    };

    let price = match fields.get(PRICE) {
        Some(field) => match parse_price(field.text) {
            Ok(price) => price,
            Err(error) => {
                is_valid = false;
                let text = field.text.to_string();
                let (kind, price) = match error {
                    PriceError::NotANumber => (DiagnosticKind::InvalidPrice { text }, 0.0),
                    PriceError::Negative(price) => (DiagnosticKind::NegativePrice { text }, price),
                };
                diagnostics.push(Diagnostic::new(kind, field.span, index));
                price
            }
        },
        None => 0.0,
    };

    let events = fields.get(EVENTS).map_or_else(Vec::new, |f| attributes_in(*f));
    let evars = fields.get(EVARS).map_or_else(Vec::new, |f| attributes_in(*f));

    Product {
        category: text(CATEGORY).to_string(),
        name: text(NAME).to_string(),
        quantity,
        price,
        events,
        evars,
        is_valid,
        cascade_suspect: false,
        field_count,
        span: segment.span,
        fields: fields.iter().map(|f| f.span).collect(),
    }
}

/// Read a quantity. `None` when the text is not a finite number.
pub(crate) fn parse_quantity(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|quantity| quantity.is_finite())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum PriceError {
    NotANumber,
    Negative(f64),
}

/// Read a price, accepting a comma in place of the first decimal point.
pub(crate) fn parse_price(text: &str) -> Result<f64, PriceError> {
    let normalized = text.replacen(',', ".", 1);
    let price = normalized
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .ok_or(PriceError::NotANumber)?;
    if price < 0.0 {
        return Err(PriceError::Negative(price));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    fn parse_one(source: &str) -> (Product, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        let product = parse_segment(0, Piece::root(source), &mut diagnostics);
        (product, diagnostics)
    }

    fn codes(diagnostics: &[Diagnostic]) -> Vec<&'static str> {
        diagnostics.iter().map(|d| d.kind.code()).collect()
    }

    #[test]
    fn test_four_fields() {
        let (product, diagnostics) = parse_one("Example category;Example product;1;3.50");
        assert_eq!(product.category, "Example category");
        assert_eq!(product.name, "Example product");
        assert_eq!(product.quantity, 1.0);
        assert_eq!(product.price, 3.50);
        assert!(product.events.is_empty());
        assert!(product.evars.is_empty());
        assert!(product.is_valid);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_all_six_fields() {
        let (product, diagnostics) =
            parse_one("Shoes;Runner;2;59.99;event1=4.99|event2;eVar1=Summer|eVar3=blue");
        assert!(product.is_valid);
        assert_eq!(product.events.len(), 2);
        assert_eq!(product.event("event1").and_then(|a| a.value()), Some("4.99"));
        assert_eq!(product.event("event2").map(|a| a.value()), Some(None));
        assert_eq!(product.evar("eVar3").and_then(|a| a.value()), Some("blue"));
        assert!(product.evar("eVar2").is_none());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_three_fields_is_too_few() {
        let (product, diagnostics) = parse_one("Cat;Name;1");
        assert!(!product.is_valid);
        assert_eq!(product.price, 0.0);
        assert_eq!(product.quantity, 1.0);
        assert_eq!(codes(&diagnostics), vec!["too-few-fields"]);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::TooFewFields { found: 3 }
        );
    }

    #[test]
    fn test_missing_name() {
        let (product, diagnostics) = parse_one("Cat;;1;5.00");
        assert!(!product.is_valid);
        assert_eq!(codes(&diagnostics), vec!["missing-name"]);
        assert_eq!(diagnostics[0].span, Span::new(4, 4));

        let (product, _) = parse_one("Cat;   ;1;5.00");
        assert!(!product.is_valid);
    }

    #[test]
    fn test_empty_segment() {
        let (product, diagnostics) = parse_one("");
        assert!(!product.is_valid);
        assert_eq!(product.field_count, 1);
        assert_eq!(codes(&diagnostics), vec!["too-few-fields", "missing-name"]);
    }

    #[test]
    fn test_invalid_and_negative_price() {
        let (product, diagnostics) = parse_one("Cat;Name;1;free");
        assert!(!product.is_valid);
        assert_eq!(product.price, 0.0);
        assert_eq!(codes(&diagnostics), vec!["invalid-price"]);

        let (product, diagnostics) = parse_one("Cat;Name;1;-2.50");
        assert!(!product.is_valid);
        assert_eq!(product.price, -2.5);
        assert_eq!(codes(&diagnostics), vec!["negative-price"]);

        let (product, diagnostics) = parse_one("Cat;Name;1;");
        assert!(!product.is_valid);
        assert_eq!(diagnostics[0].kind.to_string(), "missing price");
    }

    #[test]
    fn test_non_numeric_quantity_defaults_to_zero() {
        let (product, diagnostics) = parse_one("Cat;Name;lots;1.00");
        assert!(product.is_valid);
        assert_eq!(product.quantity, 0.0);
        assert_eq!(codes(&diagnostics), vec!["non-numeric-quantity"]);

        let (product, diagnostics) = parse_one("Cat;Name;;1.00");
        assert!(product.is_valid);
        assert_eq!(product.quantity, 0.0);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let source = "Cat;Name;1;1.00;event1;eVar1=x;junk;more";
        let (product, diagnostics) = parse_one(source);
        assert!(product.is_valid);
        assert_eq!(product.field_count, 8);
        assert_eq!(product.fields.len(), MAX_FIELDS);
        assert_eq!(codes(&diagnostics), vec!["extra-fields"]);
        assert_eq!(diagnostics[0].span.slice(source), "junk;more");
    }

    #[test]
    fn test_field_spans() {
        let source = "Cat;Name;1;2.00";
        let (product, _) = parse_one(source);
        assert_eq!(product.category_span().map(|s| s.slice(source)), Some("Cat"));
        assert_eq!(product.name_span().map(|s| s.slice(source)), Some("Name"));
        assert_eq!(product.quantity_span().map(|s| s.slice(source)), Some("1"));
        assert_eq!(product.price_span().map(|s| s.slice(source)), Some("2.00"));
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("3.50"), Ok(3.5));
        assert_eq!(parse_price(" 3.50 "), Ok(3.5));
        assert_eq!(parse_price("3,50"), Ok(3.5));
        assert_eq!(parse_price("0"), Ok(0.0));
        assert_eq!(parse_price("1,000,5"), Err(PriceError::NotANumber));
        assert_eq!(parse_price("inf"), Err(PriceError::NotANumber));
        assert_eq!(parse_price("NaN"), Err(PriceError::NotANumber));
        assert_eq!(parse_price("-1"), Err(PriceError::Negative(-1.0)));
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("2"), Some(2.0));
        assert_eq!(parse_quantity(" 3 "), Some(3.0));
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("two"), None);
        assert_eq!(parse_quantity("infinity"), None);
    }
}
