//! Cascading-error detection.
//!
//! A price written with a decimal comma (`3,50`) is split by the product
//! separator before the price field is ever read. The fraction (`50`) then
//! shows up as the category of a phantom next product. Any category that is
//! nothing but such a fraction marks the whole string as collided, and every
//! product in it is invalid.
//!
//! The check is a literal heuristic. A numeric SKU used as a category
//! (`12345`) triggers it, and a collision whose fraction is followed by other
//! text in the category does not.

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::product::Product;
use crate::Span;
use tracing::debug;

/// Whether a category looks like the fractional half of a split price.
///
/// Matches (after trimming) either digits followed by `.` or `,` and optional
/// digits, or digits alone.
pub fn looks_like_price_fragment(category: &str) -> bool {
    let category = category.trim();
    is_decimal(category) || is_integer(category)
}

fn is_integer(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn is_decimal(text: &str) -> bool {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return false;
    }
    match text.as_bytes()[digits..].split_first() {
        Some((b'.' | b',', fraction)) => fraction.iter().all(u8::is_ascii_digit),
        _ => false,
    }
}

/// Flag suspect products and demote every product if any was flagged.
///
/// Returns whether a cascading error was found.
pub(crate) fn propagate(products: &mut [Product], diagnostics: &mut Vec<Diagnostic>) -> bool {
    let mut found = false;

    for (index, product) in products.iter_mut().enumerate() {
        if !looks_like_price_fragment(&product.category) {
            continue;
        }
        debug!(
            "Product {} category {:?} looks like a split price",
            index, product.category
        );
        product.cascade_suspect = true;
        found = true;

        // The segment starts right after the product separator.
        let separator = (index > 0).then(|| Span::new(product.span.start - 1, product.span.start));
        let span = product.category_span().unwrap_or(product.span);
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::CascadingCollision { separator },
            span,
            index,
        ));
    }

    if found {
        let demoted = products.iter().filter(|p| p.is_valid).count();
        debug!("Cascading error: demoting {} valid product(s)", demoted);
        for product in products.iter_mut() {
            product.is_valid = false;
        }
    }

    found
}
