//! Zoning vocabulary and the label value types
//!
//! Every type here is a plain value: built once per classification call and
//! never mutated afterwards.

use std::fmt;

use crate::defaults;
use crate::types::OffsetFactor;

/// The four zoning assignments a parcel label can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoningType {
    Residential,
    Commercial,
    Terrain,
    TerrainCommercial,
}

impl ZoningType {
    pub const ALL: [ZoningType; 4] = [
        ZoningType::Residential,
        ZoningType::Commercial,
        ZoningType::Terrain,
        ZoningType::TerrainCommercial,
    ];

    /// Canonical tag in the reference configuration.
    pub fn default_tag(self) -> &'static str {
        match self {
            ZoningType::Residential => defaults::RESIDENTIAL_TAG,
            ZoningType::Commercial => defaults::COMMERCIAL_TAG,
            ZoningType::Terrain => defaults::TERRAIN_TAG,
            ZoningType::TerrainCommercial => defaults::TERRAIN_COMMERCIAL_TAG,
        }
    }

    /// Terrain labels always collapse to the unit prefix.
    pub fn is_terrain(self) -> bool {
        matches!(self, ZoningType::Terrain | ZoningType::TerrainCommercial)
    }

    pub(crate) fn index(self) -> usize {
        match self {
            ZoningType::Residential => 0,
            ZoningType::Commercial => 1,
            ZoningType::Terrain => 2,
            ZoningType::TerrainCommercial => 3,
        }
    }
}

impl fmt::Display for ZoningType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ZoningType::Residential => "residential",
            ZoningType::Commercial => "commercial",
            ZoningType::Terrain => "terrain",
            ZoningType::TerrainCommercial => "terrain-commercial",
        };
        f.write_str(name)
    }
}

/// A trimmed, upper-cased label as it appears in the drawing. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    /// Trim and upper-case `raw`. Returns `None` for blank input.
    pub fn new(raw: &str) -> Option<Label> {
        let text = raw.trim().to_uppercase();
        if text.is_empty() { None } else { Some(Label(text)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `<digits><tag>`: a numeric prefix followed by exactly one zoning tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedLabel {
    text: String,
    zoning: ZoningType,
}

impl NormalizedLabel {
    /// `prefix` must be a non-empty run of ASCII digits.
    pub(crate) fn new(prefix: &str, tag: &str, zoning: ZoningType) -> Self {
        debug_assert!(!prefix.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit()));
        NormalizedLabel {
            text: format!("{prefix}{tag}"),
            zoning,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn zoning(&self) -> ZoningType {
        self.zoning
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for NormalizedLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq<str> for NormalizedLabel {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for NormalizedLabel {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

/// One half of a split combination
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPart {
    pub label: NormalizedLabel,
    pub offset: OffsetFactor,
}

/// The two labels a combination decomposes into, in input order.
///
/// Holding exactly two parts is structural: there is no way to build a
/// one-sided split.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitResult {
    parts: [SplitPart; 2],
}

impl SplitResult {
    pub(crate) fn new(first: SplitPart, second: SplitPart) -> Self {
        SplitResult {
            parts: [first, second],
        }
    }

    /// Left of the delimiter; stays at the source position.
    pub fn first(&self) -> &SplitPart {
        &self.parts[0]
    }

    /// Right of the delimiter; displaced along the source rotation.
    pub fn second(&self) -> &SplitPart {
        &self.parts[1]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SplitPart> {
        self.parts.iter()
    }

    /// `(text, factor)` pairs, convenient for comparisons and logging.
    pub fn pairs(&self) -> [(&str, f64); 2] {
        [
            (self.parts[0].label.as_str(), self.parts[0].offset.raw()),
            (self.parts[1].label.as_str(), self.parts[1].offset.raw()),
        ]
    }
}

impl<'a> IntoIterator for &'a SplitResult {
    type Item = &'a SplitPart;
    type IntoIter = std::slice::Iter<'a, SplitPart>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}

impl IntoIterator for SplitResult {
    type Item = SplitPart;
    type IntoIter = std::array::IntoIter<SplitPart, 2>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.into_iter()
    }
}
