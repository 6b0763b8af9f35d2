use std::collections::HashSet;

use rand::{Rng, seq::IndexedRandom};
use tracing::{debug, warn};

use crate::{
    map_parameters::MapParameters,
    randomness::{MapRandomness, NoiseSettings, skew_towards_extremes},
    ruleset::{Ruleset, terrain::Terrain},
    tile_component::{BaseTerrain, Feature},
    tile_map::TileMap,
};

impl TileMap {
    /// Adds forest or jungle where the vegetation channel is at most [`MapParameters::vegetation_richness`].
    ///
    /// A tile qualifies when both its base terrain and its top terrain are terrains some vegetation occurs on.
    /// The vegetation is chosen uniformly among the ones that occur on the top terrain.
    pub fn spawn_vegetation(
        &mut self,
        map_parameters: &MapParameters,
        ruleset: &Ruleset,
        randomness: &mut MapRandomness,
    ) {
        const VEGETATION_NOISE: NoiseSettings = NoiseSettings::new(1, 3.0);

        let vegetation_channel = randomness.new_noise_channel();

        let vegetation_list: Vec<&Terrain> = Feature::VEGETATION
            .iter()
            .filter_map(|feature| match ruleset.terrain(feature.name()) {
                Ok(terrain) => Some(terrain),
                Err(error) => {
                    warn!("{error}, no {} is spawned", feature.name());
                    None
                }
            })
            .collect();

        let candidate_terrains: HashSet<&str> = vegetation_list
            .iter()
            .flat_map(|terrain| terrain.occurs_on.iter().map(String::as_str))
            .collect();

        for tile in self.all_tiles() {
            if !candidate_terrains.contains(tile.base_terrain(self))
                || !candidate_terrains.contains(tile.last_terrain(self))
            {
                continue;
            }

            let vegetation =
                vegetation_channel.normalized_noise(tile.world_position(self), VEGETATION_NOISE);
            if vegetation > map_parameters.vegetation_richness {
                continue;
            }

            let last_terrain = tile.last_terrain(self);
            let possible_vegetation: Vec<&str> = vegetation_list
                .iter()
                .filter(|terrain| terrain.occurs_on.iter().any(|x| x == last_terrain))
                .map(|terrain| terrain.name.as_str())
                .collect();

            if let Some(&vegetation) = possible_vegetation.choose(randomness) {
                tile.add_feature(self, vegetation);
            }
        }
    }

    /// Adds a rare feature to featureless tiles with probability [`MapParameters::rare_features_richness`].
    ///
    /// The feature is chosen uniformly among the rare features that occur on the base terrain of the tile.
    pub fn spawn_rare_features(
        &mut self,
        map_parameters: &MapParameters,
        ruleset: &Ruleset,
        randomness: &mut MapRandomness,
    ) {
        let rare_features: Vec<&Terrain> = ruleset
            .terrains
            .iter()
            .filter(|terrain| terrain.is_rare_feature())
            .collect();

        let mut rare_feature_count = 0;

        for tile in self.all_tiles() {
            if !tile.terrain_features(self).is_empty() {
                continue;
            }

            if randomness.random::<f64>() > map_parameters.rare_features_richness {
                continue;
            }

            let base_terrain = tile.base_terrain(self);
            let is_hill = tile.is_hill(self);
            let possible_features: Vec<&str> = rare_features
                .iter()
                .filter(|terrain| {
                    terrain.occurs_on.iter().any(|x| x == base_terrain)
                        && (!is_hill || terrain.occurs_on.iter().any(|x| x == Feature::Hill.name()))
                })
                .map(|terrain| terrain.name.as_str())
                .collect();

            if let Some(&feature) = possible_features.choose(randomness) {
                tile.add_feature(self, feature);
                rare_feature_count += 1;
            }
        }

        debug!(rare_feature_count, "Rare features spawned");
    }

    /// Adds ice to cold sea tiles without features.
    ///
    /// The temperature averages the latitude term and the ice channel, and is skewed like the climate temperature.
    /// Ice is added below `-0.8`.
    pub fn spawn_ice(&mut self, map_parameters: &MapParameters, randomness: &mut MapRandomness) {
        let ice_channel = randomness.new_noise_channel();
        let noise_settings = NoiseSettings::new(1, map_parameters.tiles_per_biome_area as f64);

        for tile in self.all_tiles() {
            let is_sea = tile.base_terrain_is(self, BaseTerrain::Ocean)
                || tile.base_terrain_is(self, BaseTerrain::Coast);
            if !is_sea || !tile.terrain_features(self).is_empty() {
                continue;
            }

            let random_temperature =
                ice_channel.coherent_noise(tile.world_position(self), noise_settings);
            let temperature = skew_towards_extremes(
                (self.latitude_temperature(tile) + random_temperature) / 2.0,
                map_parameters.temperature_extremeness,
            );

            if temperature < -0.8 {
                tile.add_feature(self, Feature::Ice.name());
            }
        }
    }
}
