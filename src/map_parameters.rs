use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// The configuration of one generation run.
///
/// Every stage reads it, none writes it. The only exception is [`MapParameters::assign_seed_if_unset`],
/// which the top-level generation call runs once before anything else.
///
/// All fields have defaults, so a partial JSON document is a valid configuration:
///
/// ```rust
/// use hex_map_generator::map_parameters::{MapParameters, MapType};
///
/// let map_parameters: MapParameters =
///     serde_json::from_str(r#"{ "mapType": "Perlin", "seed": 42 }"#).unwrap();
/// assert_eq!(map_parameters.map_type, MapType::Perlin);
/// assert_eq!(map_parameters.tiles_per_biome_area, 6);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapParameters {
    pub shape: MapShape,
    pub map_size: MapSize,
    pub map_type: MapType,
    /// The seed of the random number generator. `0` means unset.
    pub seed: u64,
    /// The scale of the humidity and temperature noise. Larger values make larger biomes.
    pub tiles_per_biome_area: u32,
    /// The maximum number of steps an ocean tile may be from land and still become coast.
    pub max_coast_extension: u32,
    /// Biases elevation towards extremes: with higher values, more mountains and fewer plains.
    pub elevation_exponent: f64,
    /// Biases temperature towards extremes: with higher values, more snow and more desert.
    pub temperature_extremeness: f64,
    pub vegetation_richness: f64,
    pub rare_features_richness: f64,
    pub resource_richness: f64,
    /// The elevation below which the landmass generators place water.
    pub water_threshold: f64,
    pub no_ruins: bool,
    pub no_natural_wonders: bool,
    pub world_wrap: bool,
}

impl MapParameters {
    /// Replaces an unset seed (`0`) with the current time in milliseconds.
    pub fn assign_seed_if_unset(&mut self) {
        if self.seed == 0 {
            self.seed = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|duration| duration.as_millis() as u64)
                .unwrap_or(1)
                .max(1);
        }
    }
}

impl Default for MapParameters {
    fn default() -> Self {
        Self {
            shape: MapShape::Hexagonal,
            map_size: MapSize::from(WorldSize::Medium),
            map_type: MapType::Pangaea,
            seed: 0,
            tiles_per_biome_area: 6,
            max_coast_extension: 2,
            elevation_exponent: 0.7,
            temperature_extremeness: 0.6,
            vegetation_richness: 0.4,
            rare_features_richness: 0.05,
            resource_richness: 0.1,
            water_threshold: 0.0,
            no_ruins: false,
            no_natural_wonders: false,
            world_wrap: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapShape {
    Hexagonal,
    Rectangular,
}

/// Which landmass generator produces the initial land/water split.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapType {
    Pangaea,
    Continents,
    Perlin,
    Archipelago,
    /// A water-only map. No generation stage runs.
    Empty,
}

/// Predefined map sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorldSize {
    Tiny,
    Small,
    Medium,
    Large,
    Huge,
}

/// The dimensions of a map. Hexagonal maps use `radius`, rectangular maps use `width` and `height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSize {
    pub radius: u32,
    pub width: u32,
    pub height: u32,
}

impl MapSize {
    /// Creates a size for a map with the given radius, the rectangular dimensions cover about the same area.
    pub fn from_radius(radius: u32) -> Self {
        let width = 2 * radius + 1;
        let height = (width * 2).div_ceil(3);
        Self {
            radius,
            width,
            height,
        }
    }

    /// Creates a size for a rectangular map, the radius is the one of a hexagonal map with about the same area.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        Self {
            radius: Self::hexagonal_radius_for_area(width * height),
            width,
            height,
        }
    }

    /// Returns the radius of the hexagonal map whose tile count `3 * r * (r + 1) + 1` is closest to `area`.
    pub fn hexagonal_radius_for_area(area: u32) -> u32 {
        if area <= 1 {
            return 0;
        }
        let radius = ((12.0 * area as f64 - 3.0).sqrt() - 3.0) / 6.0;
        radius.round() as u32
    }
}

impl From<WorldSize> for MapSize {
    fn from(world_size: WorldSize) -> Self {
        let (radius, width, height) = match world_size {
            WorldSize::Tiny => (10, 23, 15),
            WorldSize::Small => (15, 33, 21),
            WorldSize::Medium => (20, 44, 29),
            WorldSize::Large => (30, 66, 43),
            WorldSize::Huge => (40, 87, 57),
        };
        Self {
            radius,
            width,
            height,
        }
    }
}
