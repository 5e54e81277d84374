//! Zoning vocabulary and split configuration.

use regex_lite::Regex;

use crate::defaults;
use crate::errors::ConfigError;
use crate::types::OffsetFactor;
use crate::zoning::ZoningType;

/// The canonical tag of each zoning type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSet {
    pub residential: String,
    pub commercial: String,
    pub terrain: String,
    pub terrain_commercial: String,
}

impl TagSet {
    pub fn get(&self, zoning: ZoningType) -> &str {
        match zoning {
            ZoningType::Residential => &self.residential,
            ZoningType::Commercial => &self.commercial,
            ZoningType::Terrain => &self.terrain,
            ZoningType::TerrainCommercial => &self.terrain_commercial,
        }
    }

    fn get_mut(&mut self, zoning: ZoningType) -> &mut String {
        match zoning {
            ZoningType::Residential => &mut self.residential,
            ZoningType::Commercial => &mut self.commercial,
            ZoningType::Terrain => &mut self.terrain,
            ZoningType::TerrainCommercial => &mut self.terrain_commercial,
        }
    }
}

impl Default for TagSet {
    fn default() -> Self {
        TagSet {
            residential: ZoningType::Residential.default_tag().to_string(),
            commercial: ZoningType::Commercial.default_tag().to_string(),
            terrain: ZoningType::Terrain.default_tag().to_string(),
            terrain_commercial: ZoningType::TerrainCommercial.default_tag().to_string(),
        }
    }
}

/// Validated configuration shared by the normalizer and the resolver.
#[derive(Debug, Clone)]
pub struct Rules {
    delimiter: char,
    tags: TagSet,
    displacement: OffsetFactor,
    /// Indexed by `ZoningType::index`
    patterns: [Regex; 4],
}

impl Rules {
    /// Validate a vocabulary. Tags are trimmed and upper-cased to match the
    /// way labels are.
    pub fn new(
        delimiter: char,
        mut tags: TagSet,
        displacement: f64,
    ) -> Result<Rules, ConfigError> {
        // Labels are upper-cased before splitting, so a delimiter that
        // changes under upper-casing would never match.
        if delimiter.is_ascii_digit()
            || delimiter.is_whitespace()
            || !delimiter.to_uppercase().eq([delimiter])
        {
            return Err(ConfigError::InvalidDelimiter { delimiter });
        }
        let displacement = OffsetFactor::try_new(displacement)
            .map_err(|source| ConfigError::InvalidDisplacement { source })?;

        for zoning in ZoningType::ALL {
            let tag = tags.get_mut(zoning);
            *tag = tag.trim().to_uppercase();
            if tag.is_empty() {
                return Err(ConfigError::EmptyTag { zoning });
            }
            if tag.chars().any(|c| c.is_ascii_digit()) {
                return Err(ConfigError::DigitInTag {
                    zoning,
                    tag: tag.clone(),
                });
            }
            if tag.contains(delimiter) {
                return Err(ConfigError::DelimiterInTag {
                    zoning,
                    tag: tag.clone(),
                    delimiter,
                });
            }
        }

        for (i, first) in ZoningType::ALL.into_iter().enumerate() {
            for second in ZoningType::ALL.into_iter().skip(i + 1) {
                if tags.get(first) == tags.get(second) {
                    return Err(ConfigError::DuplicateTag {
                        first,
                        second,
                        tag: tags.get(first).to_string(),
                    });
                }
            }
        }

        let patterns = [
            compile_prefix_pattern(&tags, ZoningType::Residential)?,
            compile_prefix_pattern(&tags, ZoningType::Commercial)?,
            compile_prefix_pattern(&tags, ZoningType::Terrain)?,
            compile_prefix_pattern(&tags, ZoningType::TerrainCommercial)?,
        ];

        Ok(Rules {
            delimiter,
            tags,
            displacement,
            patterns,
        })
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn tag(&self, zoning: ZoningType) -> &str {
        self.tags.get(zoning)
    }

    /// Offset factor given to the right-hand half of a split.
    pub fn displacement(&self) -> OffsetFactor {
        self.displacement
    }

    /// `(\d*)(<tag>)` for the given zoning type.
    pub fn prefix_pattern(&self, zoning: ZoningType) -> &Regex {
        &self.patterns[zoning.index()]
    }
}

impl Default for Rules {
    fn default() -> Self {
        Rules::new(
            defaults::DELIMITER,
            TagSet::default(),
            defaults::DISPLACEMENT.raw(),
        )
        .expect("reference vocabulary is valid")
    }
}

fn compile_prefix_pattern(tags: &TagSet, zoning: ZoningType) -> Result<Regex, ConfigError> {
    let pattern = defaults::PREFIX_PATTERN.replace("{tag}", &regex_lite::escape(tags.get(zoning)));
    Regex::new(&pattern).map_err(|source| ConfigError::Pattern { zoning, source })
}
