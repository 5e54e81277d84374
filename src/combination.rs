//! Combination Resolver: decompose "R/C"-style labels into two labels.
//!
//! Resolution runs in stages: split on the delimiter, classify each half,
//! normalize each half, assign offsets by position, and accept only if both
//! halves survived. A rejected combination is an ordinary outcome, reported
//! with the reason it was rejected.

use std::fmt;

use crate::classify::classify_part;
use crate::errors::InvariantError;
use crate::normalize::normalize;
use crate::rules::Rules;
use crate::types::OffsetFactor;
use crate::zoning::{Label, SplitPart, SplitResult};

/// Which half of a combination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => f.write_str("first"),
            Side::Second => f.write_str("second"),
        }
    }
}

/// Why a label is not a combination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotCombination {
    /// The delimiter does not occur at all
    NoDelimiter,
    /// The delimiter occurs more than once
    TooManyParts { parts: usize },
    /// One half is empty or carries neither a residential nor a commercial tag
    Unclassifiable { side: Side, part: String },
}

impl fmt::Display for NotCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotCombination::NoDelimiter => f.write_str("no delimiter"),
            NotCombination::TooManyParts { parts } => {
                write!(f, "expected 2 parts, found {parts}")
            }
            NotCombination::Unclassifiable { side, part } => {
                write!(f, "{side} part {part:?} is neither residential nor commercial")
            }
        }
    }
}

/// Outcome of [`resolve_combination`]
#[derive(Debug, Clone, PartialEq)]
pub enum Combination {
    Split(SplitResult),
    Rejected(NotCombination),
}

impl Combination {
    pub fn split(self) -> Option<SplitResult> {
        match self {
            Combination::Split(split) => Some(split),
            Combination::Rejected(_) => None,
        }
    }

    pub fn is_split(&self) -> bool {
        matches!(self, Combination::Split(_))
    }
}

/// Decompose a two-part combination label.
///
/// The first half stays in place (offset 0); the second half gets the
/// configured displacement. Assignment is positional: "C/R" yields the
/// commercial label first.
///
/// Only an internal inconsistency between classification and normalization
/// produces an `Err`; malformed input always yields
/// `Ok(Combination::Rejected(_))`.
pub fn resolve_combination(label: &Label, rules: &Rules) -> Result<Combination, InvariantError> {
    let halves: Vec<&str> = label.as_str().split(rules.delimiter()).collect();
    let [first, second] = halves.as_slice() else {
        let reason = if halves.len() == 1 {
            NotCombination::NoDelimiter
        } else {
            NotCombination::TooManyParts {
                parts: halves.len(),
            }
        };
        return Ok(Combination::Rejected(reason));
    };

    let first = match resolve_part(first, Side::First, OffsetFactor::ZERO, rules)? {
        Ok(part) => part,
        Err(reason) => return Ok(Combination::Rejected(reason)),
    };
    let second = match resolve_part(second, Side::Second, rules.displacement(), rules)? {
        Ok(part) => part,
        Err(reason) => return Ok(Combination::Rejected(reason)),
    };

    Ok(Combination::Split(SplitResult::new(first, second)))
}

fn resolve_part(
    raw: &str,
    side: Side,
    offset: OffsetFactor,
    rules: &Rules,
) -> Result<Result<SplitPart, NotCombination>, InvariantError> {
    let unclassifiable = || NotCombination::Unclassifiable {
        side,
        part: raw.trim().to_string(),
    };
    let Some(part) = Label::new(raw) else {
        return Ok(Err(unclassifiable()));
    };
    let Some(zoning) = classify_part(&part, rules) else {
        return Ok(Err(unclassifiable()));
    };
    let label = normalize(&part, zoning, rules)?;
    Ok(Ok(SplitPart { label, offset }))
}
