//! Per-label decision: split, normalize, or leave alone.

use crate::classify::classify_label;
use crate::combination::{Combination, NotCombination, resolve_combination};
use crate::errors::InvariantError;
use crate::normalize::normalize;
use crate::rules::Rules;
use crate::zoning::{Label, NormalizedLabel, SplitResult};

/// What to do with a label that contains the delimiter but does not resolve
/// into a combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitFallback {
    /// Treat it as a single label
    #[default]
    Normalize,
    /// Leave it as it is
    Untouched,
}

/// Decision for one label
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// Replace the label with two labels
    Split(SplitResult),
    /// Replace the label text (possibly with identical text)
    Normalized {
        label: NormalizedLabel,
        rejected: Option<NotCombination>,
    },
    /// No zoning rule applies
    NoRule { rejected: Option<NotCombination> },
}

impl Annotation {
    /// Why a delimiter-bearing label was not split, if it was not.
    pub fn rejected_split(&self) -> Option<&NotCombination> {
        match self {
            Annotation::Split(_) => None,
            Annotation::Normalized { rejected, .. } | Annotation::NoRule { rejected } => {
                rejected.as_ref()
            }
        }
    }

    /// True when applying this annotation changes `label`.
    pub fn changes(&self, label: &Label) -> bool {
        match self {
            Annotation::Split(_) => true,
            Annotation::Normalized {
                label: normalized, ..
            } => normalized.as_str() != label.as_str(),
            Annotation::NoRule { .. } => false,
        }
    }
}

/// Resolve combinations first, then fall through to single-label handling.
pub fn annotate(
    label: &Label,
    rules: &Rules,
    fallback: SplitFallback,
) -> Result<Annotation, InvariantError> {
    let rejected = match resolve_combination(label, rules)? {
        Combination::Split(split) => return Ok(Annotation::Split(split)),
        Combination::Rejected(NotCombination::NoDelimiter) => None,
        Combination::Rejected(reason) => Some(reason),
    };

    if rejected.is_some() && fallback == SplitFallback::Untouched {
        return Ok(Annotation::NoRule { rejected });
    }

    match classify_label(label, rules) {
        Some(zoning) => Ok(Annotation::Normalized {
            label: normalize(label, zoning, rules)?,
            rejected,
        }),
        None => Ok(Annotation::NoRule { rejected }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combination::Side;

    fn run(s: &str, fallback: SplitFallback) -> Annotation {
        annotate(&Label::new(s).unwrap(), &Rules::default(), fallback).unwrap()
    }

    fn normalized(s: &str) -> String {
        match run(s, SplitFallback::Normalize) {
            Annotation::Normalized { label, .. } => label.into_string(),
            other => panic!("{s:?} was not normalized: {other:?}"),
        }
    }

    #[test]
    fn single_labels_dispatch_by_precedence() {
        assert_eq!(normalized("r"), "1R");
        assert_eq!(normalized("5C"), "5C");
        assert_eq!(normalized("2T"), "1T");
        assert_eq!(normalized("7TC"), "1TC");
        assert_eq!(normalized(" tc "), "1TC");
    }

    #[test]
    fn combination_takes_priority() {
        let Annotation::Split(split) = run("2R/3C", SplitFallback::Normalize) else {
            panic!("expected a split");
        };
        assert_eq!(split.pairs(), [("2R", 0.0), ("3C", 1.5)]);
    }

    #[test]
    fn no_rule_for_unknown_labels() {
        assert_eq!(
            run("A-12", SplitFallback::Normalize),
            Annotation::NoRule { rejected: None }
        );
    }

    #[test]
    fn rejected_combination_falls_through() {
        let annotation = run("T/Z", SplitFallback::Normalize);
        let Annotation::Normalized { label, rejected } = &annotation else {
            panic!("expected a normalization, got {annotation:?}");
        };
        assert_eq!(label, "1T");
        assert_eq!(
            rejected,
            &Some(NotCombination::Unclassifiable {
                side: Side::First,
                part: "T".to_string(),
            })
        );
    }

    #[test]
    fn rejected_combination_can_be_left_untouched() {
        let annotation = run("T/Z", SplitFallback::Untouched);
        assert!(matches!(annotation, Annotation::NoRule { rejected: Some(_) }));
        assert!(!annotation.changes(&Label::new("T/Z").unwrap()));
    }

    #[test]
    fn untouched_does_not_affect_plain_labels() {
        assert!(matches!(
            run("c", SplitFallback::Untouched),
            Annotation::Normalized { rejected: None, .. }
        ));
    }

    #[test]
    fn canonical_labels_are_not_changes() {
        let label = Label::new("1R").unwrap();
        let annotation = annotate(&label, &Rules::default(), SplitFallback::Normalize).unwrap();
        assert!(!annotation.changes(&label));

        let bare = Label::new("R").unwrap();
        let annotation = annotate(&bare, &Rules::default(), SplitFallback::Normalize).unwrap();
        assert!(annotation.changes(&bare));
    }
}
