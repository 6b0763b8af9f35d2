use tracing::warn;

use crate::{
    map_parameters::MapParameters,
    randomness::{MapRandomness, NoiseSettings, skew_towards_extremes},
    ruleset::Ruleset,
    tile::Tile,
    tile_component::BaseTerrain,
    tile_map::TileMap,
};

impl TileMap {
    /// Assigns a biome base terrain to every flat land tile from humidity and temperature.
    ///
    /// Water, mountains and hills keep their base terrain. Humidity is the humidity channel mapped to `[0, 1]`.
    /// Temperature weighs the latitude term 5:1 against the temperature channel and is then skewed by
    /// [`MapParameters::temperature_extremeness`].
    ///
    /// If any terrain of the ruleset declares a climate range, the first terrain whose range contains the sample is used,
    /// or the first-defined terrain when none does. Otherwise fixed thresholds apply, see [`legacy_base_terrain`].
    pub fn apply_humidity_and_temperature(
        &mut self,
        map_parameters: &MapParameters,
        ruleset: &Ruleset,
        randomness: &mut MapRandomness,
    ) {
        let humidity_channel = randomness.new_noise_channel();
        let temperature_channel = randomness.new_noise_channel();

        let noise_settings = NoiseSettings::new(1, map_parameters.tiles_per_biome_area as f64);
        let use_climate_ranges = ruleset.has_climate_ranges();

        for tile in self.all_tiles() {
            if tile.is_water(self) || tile.is_mountain(self) || tile.is_hill(self) {
                continue;
            }

            let position = tile.world_position(self);
            let humidity = humidity_channel.normalized_noise(position, noise_settings);
            let random_temperature = temperature_channel.coherent_noise(position, noise_settings);
            let temperature = skew_towards_extremes(
                (5.0 * self.latitude_temperature(tile) + random_temperature) / 6.0,
                map_parameters.temperature_extremeness,
            );

            let base_terrain = if use_climate_ranges {
                let matching_terrain = ruleset.terrains.iter().find(|terrain| {
                    terrain
                        .climate_ranges()
                        .any(|range| range.contains(temperature, humidity))
                });
                match matching_terrain.or_else(|| ruleset.terrains.first()) {
                    Some(terrain) => {
                        if matching_terrain.is_none() {
                            warn!(
                                temperature,
                                humidity,
                                "No terrain declares this climate, using `{}`",
                                terrain.name
                            );
                        }
                        terrain.name.as_str()
                    }
                    None => continue,
                }
            } else {
                legacy_base_terrain(temperature, humidity).name()
            };

            tile.set_base_terrain(self, base_terrain, ruleset);
        }
    }

    /// Returns `1.0` on the equator, falling linearly to `-1.0` at the most extreme latitude of the map.
    pub fn latitude_temperature(&self, tile: Tile) -> f64 {
        1.0 - 2.0 * tile.latitude(self).abs() / self.max_latitude
    }
}

/// The fixed climate thresholds used by rulesets that declare no climate ranges.
///
/// | temperature   | humidity below threshold | otherwise |
/// |---------------|--------------------------|-----------|
/// | `< -0.4`      | snow (`< 0.5`)           | tundra    |
/// | `< 0.8`       | plains (`< 0.5`)         | grassland |
/// | `<= 1.0`      | desert (`< 0.7`)         | plains    |
///
/// Any other temperature yields a lake.
pub fn legacy_base_terrain(temperature: f64, humidity: f64) -> BaseTerrain {
    if temperature < -0.4 {
        if humidity < 0.5 {
            BaseTerrain::Snow
        } else {
            BaseTerrain::Tundra
        }
    } else if temperature < 0.8 {
        if humidity < 0.5 {
            BaseTerrain::Plains
        } else {
            BaseTerrain::Grassland
        }
    } else if temperature <= 1.0 {
        if humidity < 0.7 {
            BaseTerrain::Desert
        } else {
            BaseTerrain::Plains
        }
    } else {
        warn!(temperature, "Temperature out of range, using lakes");
        BaseTerrain::Lake
    }
}

#[cfg(test)]
mod tests {
    use super::legacy_base_terrain;
    use crate::{
        map_parameters::{MapParameters, MapSize},
        randomness::MapRandomness,
        ruleset::{Ruleset, RulesetJson},
        tile_component::{BaseTerrain, Feature},
        tile_map::TileMap,
    };

    const CLIMATE_TERRAINS: &str = r#"[
        { "name": "Ocean", "type": "Water" },
        { "name": "Frost", "type": "Land", "uniques": ["Occurs at temperature between [-1] and [0] and humidity between [0] and [1]"] },
        { "name": "Savanna", "type": "Land", "uniques": ["Occurs at temperature between [0] and [0.2] and humidity between [0] and [1]"] },
        { "name": "Mountain", "type": "Land", "impassable": true },
        { "name": "Hill", "type": "TerrainFeature" }
    ]"#;

    fn land_map(map_parameters: &MapParameters, ruleset: &Ruleset) -> TileMap {
        let mut tile_map = TileMap::new(map_parameters);
        tile_map.generate_land_from_elevation(0.0, ruleset, |_, _| 1.0);
        tile_map
    }

    #[test]
    fn legacy_thresholds() {
        assert_eq!(BaseTerrain::Snow, legacy_base_terrain(-0.9, 0.2));
        assert_eq!(BaseTerrain::Tundra, legacy_base_terrain(-0.5, 0.5));
        assert_eq!(BaseTerrain::Plains, legacy_base_terrain(-0.4, 0.1));
        assert_eq!(BaseTerrain::Grassland, legacy_base_terrain(0.79, 0.9));
        assert_eq!(BaseTerrain::Desert, legacy_base_terrain(0.8, 0.69));
        assert_eq!(BaseTerrain::Plains, legacy_base_terrain(1.0, 0.7));
        assert_eq!(BaseTerrain::Lake, legacy_base_terrain(1.5, 0.1));
    }

    #[test]
    fn hills_and_mountains_keep_their_terrain() {
        let ruleset = Ruleset::default();
        let map_parameters = MapParameters {
            map_size: MapSize::from_radius(6),
            ..Default::default()
        };
        let mut tile_map = land_map(&map_parameters, &ruleset);
        let [hill, mountain] = [tile_map.all_tiles().nth(0), tile_map.all_tiles().nth(1)]
            .map(Option::unwrap);
        hill.add_feature(&mut tile_map, Feature::Hill.name());
        mountain.set_base_terrain(&mut tile_map, BaseTerrain::Mountain.name(), &ruleset);

        let mut randomness = MapRandomness::new(11);
        tile_map.apply_humidity_and_temperature(&map_parameters, &ruleset, &mut randomness);

        assert!(hill.base_terrain_is(&tile_map, BaseTerrain::Grassland));
        assert!(mountain.is_mountain(&tile_map));
        let legacy = [
            BaseTerrain::Snow,
            BaseTerrain::Tundra,
            BaseTerrain::Plains,
            BaseTerrain::Grassland,
            BaseTerrain::Desert,
        ];
        assert!(tile_map.all_tiles().skip(2).all(|tile| legacy
            .iter()
            .any(|&base_terrain| tile.base_terrain_is(&tile_map, base_terrain))));
    }

    #[test]
    fn declared_climate_ranges_replace_the_thresholds() {
        let ruleset = Ruleset::from_json(RulesetJson {
            terrains: CLIMATE_TERRAINS,
            ..RulesetJson::BUILT_IN
        })
        .unwrap();
        assert!(ruleset.has_climate_ranges());

        let map_parameters = MapParameters {
            map_size: MapSize::from_radius(8),
            temperature_extremeness: 0.0,
            ..Default::default()
        };
        let mut tile_map = land_map(&map_parameters, &ruleset);
        let mut randomness = MapRandomness::new(5);
        tile_map.apply_humidity_and_temperature(&map_parameters, &ruleset, &mut randomness);

        for tile in tile_map.all_tiles() {
            let base_terrain = tile.base_terrain(&tile_map);
            assert!(
                ["Frost", "Savanna", "Ocean"].contains(&base_terrain),
                "{base_terrain}"
            );
        }
        // The equator is too warm for both declared ranges, so it falls back to the first terrain.
        let equator = tile_map.tile_at(crate::grid::Hex::ORIGIN).unwrap();
        assert_eq!("Ocean", equator.base_terrain(&tile_map));
        assert!(equator.is_water(&tile_map));
    }
}
