//! JSON form of a parse result.

use prodstring_parse::{Attribute, Diagnostic, Product, ProductString};
use serde_json::json;

/// Convert a parse result to JSON.
///
/// ```text
/// { "valid", "cascadingError", "products": [...], "diagnostics": [...] }
/// ```
pub fn to_json(parsed: &ProductString) -> serde_json::Value {
    json!({
        "valid": parsed.is_valid(),
        "cascadingError": parsed.has_cascading_error(),
        "products": parsed.iter().map(product_to_json).collect::<Vec<_>>(),
        "diagnostics": parsed.diagnostics().iter().map(diagnostic_to_json).collect::<Vec<_>>(),
    })
}

fn product_to_json(product: &Product) -> serde_json::Value {
    json!({
        "category": product.category,
        "name": product.name,
        "quantity": product.quantity,
        "price": product.price,
        "events": attributes_to_json(&product.events),
        "evars": attributes_to_json(&product.evars),
        "isValid": product.is_valid,
    })
}

fn attributes_to_json(attributes: &[Attribute]) -> serde_json::Value {
    attributes
        .iter()
        .map(|a| json!({ "key": a.key, "value": a.value }))
        .collect()
}

fn diagnostic_to_json(diagnostic: &Diagnostic) -> serde_json::Value {
    json!({
        "severity": diagnostic.severity().as_str(),
        "code": diagnostic.kind.code(),
        "message": diagnostic.kind.to_string(),
        "product": diagnostic.product,
        "start": diagnostic.span.start,
        "end": diagnostic.span.end,
    })
}
