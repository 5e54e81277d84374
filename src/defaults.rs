//! Reference configuration for the zoning vocabulary.
//!
//! These are the values `Rules::default()` is built from. Override them via
//! `Rules::new` rather than editing the decision logic.

use crate::types::OffsetFactor;

/// Separator between the two halves of a combination label ("R/C").
pub const DELIMITER: char = '/';

pub const RESIDENTIAL_TAG: &str = "R";
pub const COMMERCIAL_TAG: &str = "C";
pub const TERRAIN_TAG: &str = "T";
pub const TERRAIN_COMMERCIAL_TAG: &str = "TC";

/// Displacement of the second half of a split, in label heights.
pub const DISPLACEMENT: OffsetFactor = OffsetFactor::new_unchecked(1.5);

/// Prefix substituted when a label carries no numeric run.
pub const DEFAULT_PREFIX: &str = "1";

/// Optional numeric run immediately followed by a tag. `{tag}` is replaced by
/// the escaped tag text.
pub const PREFIX_PATTERN: &str = r"(\d*)({tag})";
