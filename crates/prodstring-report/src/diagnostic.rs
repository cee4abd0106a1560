//! Diagnostic rendering with source context.

use std::ops::Range;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use prodstring_parse::{Diagnostic, DiagnosticKind, Severity};

/// Render diagnostics as annotated source reports.
pub trait RenderDiagnostic {
    /// Render with colors into a string.
    fn render(&self, filename: &str, source: &str) -> String {
        let mut output = Vec::new();
        self.write_report(filename, source, true, &mut output);
        String::from_utf8_lossy(&output).into_owned()
    }

    /// Write the report to a writer.
    fn write_report<W: std::io::Write>(&self, filename: &str, source: &str, color: bool, writer: W);
}

impl RenderDiagnostic for Diagnostic {
    fn write_report<W: std::io::Write>(
        &self,
        filename: &str,
        source: &str,
        color: bool,
        writer: W,
    ) {
        let config = Config::default()
            .with_color(color)
            .with_index_type(IndexType::Byte);
        let _ = build_report(self, filename)
            .with_config(config)
            .finish()
            .write((filename, Source::from(source)), writer);
    }
}

fn build_report<'a>(
    diagnostic: &Diagnostic,
    filename: &'a str,
) -> ariadne::ReportBuilder<'static, (&'a str, Range<usize>)> {
    let range: Range<usize> = diagnostic.span.into();
    let kind = match diagnostic.severity() {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
    };
    let product = diagnostic.product + 1;
    let report = Report::build(kind, (filename, range.clone()))
        .with_code(diagnostic.kind.code())
        .with_message(diagnostic.kind.to_string());

    match &diagnostic.kind {
        DiagnosticKind::TooFewFields { .. } => report
            .with_label(
                Label::new((filename, range))
                    .with_message(format!("product {product} ends here"))
                    .with_color(Color::Red),
            )
            .with_help("a product needs category;name;quantity;price"),

        DiagnosticKind::MissingName => report
            .with_label(
                Label::new((filename, range))
                    .with_message("name expected here")
                    .with_color(Color::Red),
            )
            .with_help("the second field of each product is the item name and cannot be empty"),

        DiagnosticKind::InvalidPrice { .. } => report
            .with_label(
                Label::new((filename, range))
                    .with_message("not a number")
                    .with_color(Color::Red),
            )
            .with_help("prices are plain numbers such as 3.50"),

        DiagnosticKind::NegativePrice { .. } => report
            .with_label(
                Label::new((filename, range))
                    .with_message("negative price")
                    .with_color(Color::Red),
            )
            .with_help("prices cannot be below zero"),

        DiagnosticKind::CascadingCollision { separator } => {
            let report = report.with_label(
                Label::new((filename, range))
                    .with_message("this looks like the decimal part of a price")
                    .with_color(Color::Red),
            );
            let report = match separator {
                Some(separator) => report.with_label(
                    Label::new((filename, Range::<usize>::from(*separator)))
                        .with_message("this comma was read as a product separator")
                        .with_color(Color::Blue),
                ),
                None => report,
            };
            report
                .with_help("use '.' as the decimal separator in prices: 3.50, not 3,50")
                .with_note("a comma inside a price splits the string, so every product in it is invalid")
        }

        DiagnosticKind::ExtraFields { .. } => report
            .with_label(
                Label::new((filename, range))
                    .with_message("ignored")
                    .with_color(Color::Yellow),
            )
            .with_help("a product has at most six fields: category;name;quantity;price;events;evars"),

        DiagnosticKind::NonNumericQuantity { .. } => report
            .with_label(
                Label::new((filename, range))
                    .with_message("read as 0")
                    .with_color(Color::Yellow),
            )
            .with_help("quantities are whole numbers such as 1"),
    }
}

/// Render every diagnostic of a parse result, errors and warnings alike.
pub fn render_all(diagnostics: &[Diagnostic], filename: &str, source: &str, color: bool) -> String {
    let mut output = Vec::new();
    for diagnostic in diagnostics {
        diagnostic.write_report(filename, source, color, &mut output);
    }
    String::from_utf8_lossy(&output).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    fn strip(rendered: String) -> String {
        String::from_utf8(strip_ansi_escapes::strip(rendered)).unwrap()
    }

    fn render_first(source: &str, code: &str) -> String {
        let parsed = prodstring_parse::parse(source);
        let diagnostic = parsed
            .diagnostics()
            .iter()
            .find(|d| d.kind.code() == code)
            .unwrap_or_else(|| panic!("no {code} diagnostic for {source:?}"));
        strip(diagnostic.render("products.txt", source))
    }

    #[test]
    fn test_cascading_collision_report() {
        let rendered = render_first("Cat;Name;1;3,50", "cascading-collision");
        assert!(rendered.contains("comma used as decimal separator in a price"));
        assert!(rendered.contains("this looks like the decimal part of a price"));
        assert!(rendered.contains("this comma was read as a product separator"));
        assert!(rendered.contains("use '.' as the decimal separator in prices"));
        assert!(rendered.contains("products.txt"));
    }

    #[test]
    fn test_collision_in_first_product_has_no_separator_label() {
        let rendered = render_first("12345;Name;1;2.00", "cascading-collision");
        assert!(rendered.contains("this looks like the decimal part of a price"));
        assert!(!rendered.contains("product separator"));
    }

    #[test]
    fn test_missing_name_report() {
        let rendered = render_first("Cat;;1;5.00", "missing-name");
        assert!(rendered.contains("Error"));
        assert!(rendered.contains("missing product name"));
        assert!(rendered.contains("name expected here"));
    }

    #[test]
    fn test_warning_report() {
        let rendered = render_first("Cat;Name;some;5.00", "non-numeric-quantity");
        assert!(rendered.contains("Warning"));
        assert!(rendered.contains("quantity `some` is not a number, read as 0"));
    }

    #[test]
    fn test_non_ascii_source() {
        let rendered = render_first("Café;;1;5.00", "missing-name");
        assert!(rendered.contains("Café;;1;5.00"));
    }

    #[test]
    fn test_plain_output_has_no_escapes() {
        let source = "Cat;Name;1";
        let parsed = prodstring_parse::parse(source);
        let rendered = render_all(parsed.diagnostics(), "<input>", source, false);
        assert!(!rendered.contains('\u{1b}'));
        assert!(rendered.contains("expected at least 4 fields, found 3"));
    }

    #[test]
    fn test_render_all_includes_every_diagnostic() {
        let source = "Cat;;1;x";
        let parsed = prodstring_parse::parse(source);
        let rendered = strip(render_all(parsed.diagnostics(), "<input>", source, true));
        assert!(rendered.contains("missing product name"));
        assert!(rendered.contains("price `x` is not a number"));
    }
}
