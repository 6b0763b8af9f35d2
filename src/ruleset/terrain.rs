use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::tile_component::{Feature, TerrainType};

use super::Name;

/// A ruleset terrain: a base terrain, a terrain feature or a natural wonder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Terrain {
    pub name: String,
    pub r#type: TerrainType,
    /// For features: the terrains this feature can be added to.
    #[serde(default)]
    pub occurs_on: Vec<String>,
    #[serde(default)]
    pub impassable: bool,
    #[serde(default)]
    pub uniques: Vec<String>,
}

impl Name for Terrain {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Terrain {
    pub fn has_unique(&self, unique: &str) -> bool {
        self.uniques.iter().any(|x| x == unique)
    }

    pub fn is_rare_feature(&self) -> bool {
        self.r#type == TerrainType::TerrainFeature && self.has_unique(Feature::RARE_FEATURE_UNIQUE)
    }

    /// Returns the climate ranges declared by the uniques of this terrain.
    pub fn climate_ranges(&self) -> impl Iterator<Item = ClimateRange> + '_ {
        self.uniques
            .iter()
            .filter_map(|unique| ClimateRange::parse(unique))
    }
}

/// A declared temperature and humidity range in which a terrain occurs.
///
/// Both ranges are open at the lower end and closed at the upper end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateRange {
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub min_humidity: f64,
    pub max_humidity: f64,
}

static CLIMATE_RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^Occurs at temperature between \[(-?[0-9.]+)\] and \[(-?[0-9.]+)\] and humidity between \[(-?[0-9.]+)\] and \[(-?[0-9.]+)\]$",
    )
    .expect("climate range pattern is a valid regex")
});

impl ClimateRange {
    /// Parses a unique of the form
    /// `Occurs at temperature between [A] and [B] and humidity between [C] and [D]`.
    pub fn parse(unique: &str) -> Option<Self> {
        let captures = CLIMATE_RANGE_PATTERN.captures(unique)?;
        let number = |index: usize| captures.get(index)?.as_str().parse::<f64>().ok();
        Some(Self {
            min_temperature: number(1)?,
            max_temperature: number(2)?,
            min_humidity: number(3)?,
            max_humidity: number(4)?,
        })
    }

    pub fn contains(&self, temperature: f64, humidity: f64) -> bool {
        self.min_temperature < temperature
            && temperature <= self.max_temperature
            && self.min_humidity < humidity
            && humidity <= self.max_humidity
    }
}

#[cfg(test)]
mod tests {
    use super::ClimateRange;

    #[test]
    fn parse_climate_range() {
        let range = ClimateRange::parse(
            "Occurs at temperature between [-1] and [-0.4] and humidity between [0.5] and [1]",
        )
        .unwrap();
        assert_eq!(-1.0, range.min_temperature);
        assert_eq!(-0.4, range.max_temperature);
        assert_eq!(0.5, range.min_humidity);
        assert_eq!(1.0, range.max_humidity);
        assert_eq!(None, ClimateRange::parse("Rare feature"));
    }

    #[test]
    fn climate_range_is_open_below_and_closed_above() {
        let range = ClimateRange {
            min_temperature: 0.0,
            max_temperature: 0.5,
            min_humidity: 0.0,
            max_humidity: 1.0,
        };
        assert!(range.contains(0.5, 1.0));
        assert!(!range.contains(0.0, 0.5));
        assert!(!range.contains(0.25, 0.0));
        assert!(!range.contains(0.6, 0.5));
    }
}
