//! Zoning label annotation for land-parcel drawings.
//!
//! Labels like `"r"` are normalized to `"1R"`, terrain labels are forced to
//! the `1` prefix (`"7T"` → `"1T"`), and compound labels like `"R/C"` are
//! split into two labels, the second displaced along the text direction.
//!
//! The decision logic ([`annotate`], [`normalize`], [`resolve_combination`])
//! is pure. [`annotate_drawing`] applies it to anything implementing
//! [`Drawing`], such as the in-memory [`Sheet`].

use pest_derive::Parser;

pub mod annotate;
pub mod classify;
pub mod combination;
pub mod defaults;
pub mod drawing;
pub mod errors;
pub mod log;
pub mod normalize;
pub mod pipeline;
pub mod placement;
pub mod rules;
pub mod sheet;
pub mod types;
pub mod zoning;

pub use annotate::{Annotation, SplitFallback, annotate};
pub use combination::{Combination, NotCombination, Side, resolve_combination};
pub use drawing::{Drawing, NewText, TextEntity};
pub use errors::{ConfigError, DrawingError, InvariantError, LabelError, SheetError};
pub use normalize::{normalize, normalize_code, normalize_terrain};
pub use pipeline::{Settings, Summary, annotate_drawing};
pub use rules::{Rules, TagSet};
pub use sheet::Sheet;
pub use types::{Angle, Height, OffsetFactor};
pub use zoning::{Label, NormalizedLabel, SplitPart, SplitResult, ZoningType};

#[derive(Parser)]
#[grammar = "sheet.pest"]
pub struct SheetParser;

/// Annotate a raw label with the reference rules.
///
/// Returns `Ok(None)` for blank input.
pub fn annotate_str(raw: &str) -> Result<Option<Annotation>, InvariantError> {
    match Label::new(raw) {
        Some(label) => annotate(&label, &Rules::default(), SplitFallback::default()).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pest::Parser;

    #[test]
    fn parse_minimal_entity() {
        let input = r#"text "R" at (1, 2) height 0.5"#;
        let result = SheetParser::parse(Rule::sheet, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_all_attributes() {
        let input = concat!(
            r#"text "2R/3C" at (1, 2, 3) height 0.5 rotation -1.5e0"#,
            r#" layer "L" style "S" handle "1F""#,
        );
        let result = SheetParser::parse(Rule::sheet, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_attributes_in_any_order() {
        let input = r#"text "C" at (0, 0) height 1 handle "X" layer "L" rotation 0"#;
        let result = SheetParser::parse(Rule::sheet, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_comments_and_blank_lines() {
        let input = "# header\n\n   \ntext \"R\" at (0, 0) height 1 # note\n\n";
        let result = SheetParser::parse(Rule::sheet, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_empty_sheet() {
        assert!(SheetParser::parse(Rule::sheet, "").is_ok());
    }

    #[test]
    fn reject_missing_height() {
        assert!(SheetParser::parse(Rule::sheet, r#"text "R" at (0, 0)"#).is_err());
    }

    #[test]
    fn reject_two_entities_on_one_line() {
        let input = r#"text "R" at (0, 0) height 1 text "C" at (0, 0) height 1"#;
        assert!(SheetParser::parse(Rule::sheet, input).is_err());
    }

    #[test]
    fn reject_unterminated_string() {
        assert!(SheetParser::parse(Rule::sheet, "text \"R at (0, 0) height 1\n").is_err());
    }

    #[test]
    fn annotate_str_reference_rules() {
        assert_eq!(annotate_str("  "), Ok(None));
        let Some(Annotation::Split(split)) = annotate_str("C/R").unwrap() else {
            panic!("expected a split");
        };
        assert_eq!(split.pairs(), [("1C", 0.0), ("1R", 1.5)]);
    }
}
