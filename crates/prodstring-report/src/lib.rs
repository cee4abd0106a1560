//! Output helpers for parsed product strings.
//!
//! Consumers read parse results through these instead of re-reading the raw
//! string: [`RenderDiagnostic`] turns a diagnostic into an annotated source
//! report with a remediation hint, and [`to_json`] gives the result's JSON form.

mod diagnostic;
mod json;

pub use diagnostic::{RenderDiagnostic, render_all};
pub use json::to_json;
