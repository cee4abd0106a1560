//! Diagnostics reported alongside a parse result.

use crate::Span;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "facet", derive(facet::Facet))]
#[repr(u8)]
pub enum Severity {
    /// The product (and therefore the string) is invalid.
    Error,
    /// Input was coerced or ignored; validity is unaffected.
    Warning,
}

impl Severity {
    /// Lowercase name, as used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// What a diagnostic is about.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "facet", derive(facet::Facet))]
#[repr(u8)]
pub enum DiagnosticKind {
    /// Segment has fewer than the four required fields.
    TooFewFields {
        /// Number of `;`-separated fields present.
        found: usize,
    },
    /// Item name is empty or whitespace.
    MissingName,
    /// Price field is not a number.
    InvalidPrice {
        /// Raw price field text.
        text: String,
    },
    /// Price field is a negative number.
    NegativePrice {
        /// Raw price field text.
        text: String,
    },
    /// Category looks like the fractional half of a price that was split on
    /// a decimal comma. Every product of the string is invalid.
    CascadingCollision {
        /// The product separator that most likely was meant as a decimal
        /// comma. `None` for the first product.
        separator: Option<Span>,
    },
    /// Fields beyond the sixth were ignored.
    ExtraFields {
        /// How many fields were dropped.
        discarded: usize,
    },
    /// Quantity text is not a number and was read as 0.
    NonNumericQuantity {
        /// Raw quantity field text.
        text: String,
    },
}

impl DiagnosticKind {
    /// Severity of this kind.
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::ExtraFields { .. } | DiagnosticKind::NonNumericQuantity { .. } => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }

    /// Stable machine-readable name.
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::TooFewFields { .. } => "too-few-fields",
            DiagnosticKind::MissingName => "missing-name",
            DiagnosticKind::InvalidPrice { .. } => "invalid-price",
            DiagnosticKind::NegativePrice { .. } => "negative-price",
            DiagnosticKind::CascadingCollision { .. } => "cascading-collision",
            DiagnosticKind::ExtraFields { .. } => "extra-fields",
            DiagnosticKind::NonNumericQuantity { .. } => "non-numeric-quantity",
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::TooFewFields { found } => {
                write!(f, "expected at least 4 fields, found {found}")
            }
            DiagnosticKind::MissingName => write!(f, "missing product name"),
            DiagnosticKind::InvalidPrice { text } if text.trim().is_empty() => {
                write!(f, "missing price")
            }
            DiagnosticKind::InvalidPrice { text } => write!(f, "price `{text}` is not a number"),
            DiagnosticKind::NegativePrice { text } => write!(f, "price `{text}` is negative"),
            DiagnosticKind::CascadingCollision { .. } => {
                write!(f, "comma used as decimal separator in a price")
            }
            DiagnosticKind::ExtraFields { discarded } => {
                write!(f, "{discarded} field(s) after eVars ignored")
            }
            DiagnosticKind::NonNumericQuantity { text } => {
                write!(f, "quantity `{text}` is not a number, read as 0")
            }
        }
    }
}

/// A problem found in one product of a product string.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "facet", derive(facet::Facet))]
pub struct Diagnostic {
    /// What went wrong.
    pub kind: DiagnosticKind,
    /// Where in the source.
    pub span: Span,
    /// Index of the product this concerns.
    pub product: usize,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(kind: DiagnosticKind, span: Span, product: usize) -> Self {
        Self {
            kind,
            span,
            product,
        }
    }

    /// Severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    /// Whether this makes the product invalid.
    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} in product {} at offset {}",
            self.kind,
            self.product + 1,
            self.span.start
        )
    }
}

impl std::error::Error for Diagnostic {}
