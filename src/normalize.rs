//! Label Normalizer: one label + one zoning type → one canonical label.
//!
//! Residential and commercial labels keep their numeric prefix ("5C" stays
//! "5C", a bare "C" becomes "1C"). Terrain labels always collapse to the unit
//! prefix: "7T" becomes "1T".

use enum_dispatch::enum_dispatch;

use crate::defaults;
use crate::errors::InvariantError;
use crate::rules::Rules;
use crate::zoning::{Label, NormalizedLabel, ZoningType};

/// How the numeric prefix of a label is carried into its canonical form
#[enum_dispatch]
pub trait PrefixRule {
    fn apply(
        &self,
        label: &Label,
        zoning: ZoningType,
        rules: &Rules,
    ) -> Result<NormalizedLabel, InvariantError>;
}

/// Keep the digits directly in front of the first occurrence of the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepPrefix;

impl PrefixRule for KeepPrefix {
    fn apply(
        &self,
        label: &Label,
        zoning: ZoningType,
        rules: &Rules,
    ) -> Result<NormalizedLabel, InvariantError> {
        let tag = rules.tag(zoning);
        let caps = rules
            .prefix_pattern(zoning)
            .captures(label.as_str())
            .ok_or_else(|| InvariantError::TagAbsent {
                label: label.to_string(),
                zoning,
                tag: tag.to_string(),
            })?;
        let digits = caps.get(1).map_or("", |m| m.as_str());
        let prefix = if digits.is_empty() {
            defaults::DEFAULT_PREFIX
        } else {
            digits
        };
        Ok(NormalizedLabel::new(prefix, tag, zoning))
    }
}

/// Discard whatever prefix the label has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitPrefix;

impl PrefixRule for UnitPrefix {
    fn apply(
        &self,
        _label: &Label,
        zoning: ZoningType,
        rules: &Rules,
    ) -> Result<NormalizedLabel, InvariantError> {
        Ok(NormalizedLabel::new(
            defaults::DEFAULT_PREFIX,
            rules.tag(zoning),
            zoning,
        ))
    }
}

#[enum_dispatch(PrefixRule)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixPolicy {
    KeepPrefix,
    UnitPrefix,
}

impl ZoningType {
    pub fn prefix_policy(self) -> PrefixPolicy {
        if self.is_terrain() {
            UnitPrefix.into()
        } else {
            KeepPrefix.into()
        }
    }
}

/// Normalize a residential or commercial label, preserving its numeric
/// prefix (or `1` when there is none).
///
/// The caller must already know the tag occurs in `label`; if it does not,
/// this fails with [`InvariantError::TagAbsent`] instead of guessing.
pub fn normalize_code(
    label: &Label,
    zoning: ZoningType,
    rules: &Rules,
) -> Result<NormalizedLabel, InvariantError> {
    if zoning.is_terrain() {
        return Err(InvariantError::WrongNormalizer {
            zoning,
            normalizer: "code",
        });
    }
    KeepPrefix.apply(label, zoning, rules)
}

/// Normalize a terrain or terrain-commercial label: always `1<tag>`.
pub fn normalize_terrain(
    label: &Label,
    zoning: ZoningType,
    rules: &Rules,
) -> Result<NormalizedLabel, InvariantError> {
    if !zoning.is_terrain() {
        return Err(InvariantError::WrongNormalizer {
            zoning,
            normalizer: "terrain",
        });
    }
    UnitPrefix.apply(label, zoning, rules)
}

/// Normalize with whichever policy `zoning` calls for.
pub fn normalize(
    label: &Label,
    zoning: ZoningType,
    rules: &Rules,
) -> Result<NormalizedLabel, InvariantError> {
    zoning.prefix_policy().apply(label, zoning, rules)
}
