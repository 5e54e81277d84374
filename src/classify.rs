//! Ordered classification tables.
//!
//! A label is classified by walking a table top to bottom and taking the
//! first rule whose predicate holds. "TC" contains both "T" and "C", so the
//! more specific tag has to come first.

use crate::rules::Rules;
use crate::zoning::{Label, ZoningType};

/// `zoning` applies when the label contains the tag of `requires` and, if
/// set, does not contain the tag of `excludes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassRule {
    pub zoning: ZoningType,
    pub requires: ZoningType,
    pub excludes: Option<ZoningType>,
}

impl ClassRule {
    const fn present(zoning: ZoningType) -> Self {
        ClassRule {
            zoning,
            requires: zoning,
            excludes: None,
        }
    }

    const fn unless(zoning: ZoningType, excludes: ZoningType) -> Self {
        ClassRule {
            zoning,
            requires: zoning,
            excludes: Some(excludes),
        }
    }

    pub fn matches(&self, label: &Label, rules: &Rules) -> bool {
        label.contains(rules.tag(self.requires))
            && self
                .excludes
                .is_none_or(|excluded| !label.contains(rules.tag(excluded)))
    }
}

/// Precedence for a standalone label.
pub const LABEL_PRECEDENCE: [ClassRule; 4] = [
    ClassRule::present(ZoningType::TerrainCommercial),
    ClassRule::present(ZoningType::Terrain),
    ClassRule::present(ZoningType::Residential),
    ClassRule::present(ZoningType::Commercial),
];

/// Precedence for one half of a combination. Terrain never takes part in a
/// combination.
pub const COMBINATION_PART_PRECEDENCE: [ClassRule; 2] = [
    ClassRule::unless(ZoningType::Residential, ZoningType::Commercial),
    ClassRule::unless(ZoningType::Commercial, ZoningType::TerrainCommercial),
];

/// First matching rule of `table`, if any.
pub fn classify_with(table: &[ClassRule], label: &Label, rules: &Rules) -> Option<ZoningType> {
    table
        .iter()
        .find(|rule| rule.matches(label, rules))
        .map(|rule| rule.zoning)
}

pub fn classify_label(label: &Label, rules: &Rules) -> Option<ZoningType> {
    classify_with(&LABEL_PRECEDENCE, label, rules)
}

pub fn classify_part(part: &Label, rules: &Rules) -> Option<ZoningType> {
    classify_with(&COMBINATION_PART_PRECEDENCE, part, rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(s: &str) -> Label {
        Label::new(s).unwrap()
    }

    #[test]
    fn standalone_labels() {
        let rules = Rules::default();
        let cases = [
            ("R", Some(ZoningType::Residential)),
            ("5c", Some(ZoningType::Commercial)),
            ("2T", Some(ZoningType::Terrain)),
            ("TC", Some(ZoningType::TerrainCommercial)),
            ("7tc", Some(ZoningType::TerrainCommercial)),
            ("XYZ", None),
            ("42", None),
        ];
        for (input, expected) in cases {
            assert_eq!(classify_label(&label(input), &rules), expected, "input {input:?}");
        }
    }

    #[test]
    fn terrain_commercial_is_never_terrain_or_commercial() {
        let rules = Rules::default();
        for input in ["TC", "1TC", "3TC", " tc "] {
            assert_eq!(
                classify_label(&label(input), &rules),
                Some(ZoningType::TerrainCommercial),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn terrain_wins_over_residential() {
        // Terrain is checked before residential, so "TR" is terrain.
        let rules = Rules::default();
        assert_eq!(classify_label(&label("TR"), &rules), Some(ZoningType::Terrain));
    }

    #[test]
    fn combination_parts() {
        let rules = Rules::default();
        let cases = [
            ("R", Some(ZoningType::Residential)),
            ("2R", Some(ZoningType::Residential)),
            ("C", Some(ZoningType::Commercial)),
            ("RC", Some(ZoningType::Commercial)),
            ("TC", None),
            ("T", None),
            ("Z", None),
        ];
        for (input, expected) in cases {
            assert_eq!(classify_part(&label(input), &rules), expected, "input {input:?}");
        }
    }

    #[test]
    fn tables_are_ordered_most_specific_first() {
        assert_eq!(LABEL_PRECEDENCE[0].zoning, ZoningType::TerrainCommercial);
        assert_eq!(LABEL_PRECEDENCE[1].zoning, ZoningType::Terrain);
        assert!(
            COMBINATION_PART_PRECEDENCE
                .iter()
                .all(|rule| !rule.zoning.is_terrain())
        );
    }
}
