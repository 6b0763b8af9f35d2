//! This module defines the `Generator` trait for map generation and provides the built-in landmass generators.

use tracing::debug;

use crate::{
    map_parameters::MapParameters, randomness::MapRandomness, ruleset::Ruleset, tile_map::TileMap,
};

pub mod archipelago;
pub mod continents;
pub mod pangaea;
pub mod perlin;

/// A trait that allows for the generation of a tile map.
///
/// If you want to create a new map generator, you need to implement this trait.
/// Only [`Generator::generate_land`] is required, every other stage has a default implementation.
pub trait Generator {
    fn new(map_parameters: &MapParameters) -> Self;

    fn into_inner(self) -> TileMap;

    fn tile_map_mut(&mut self) -> &mut TileMap;

    /// Splits the map into land and water. Land tiles should be grassland and water tiles ocean.
    fn generate_land(
        &mut self,
        map_parameters: &MapParameters,
        ruleset: &Ruleset,
        randomness: &mut MapRandomness,
    );

    fn raise_mountains_and_hills(
        &mut self,
        map_parameters: &MapParameters,
        ruleset: &Ruleset,
        randomness: &mut MapRandomness,
    ) {
        self.tile_map_mut()
            .raise_mountains_and_hills(map_parameters, ruleset, randomness);
    }

    fn cellular_mountain_ranges(&mut self, ruleset: &Ruleset, randomness: &mut MapRandomness) {
        self.tile_map_mut()
            .cellular_mountain_ranges(ruleset, randomness);
    }

    fn cellular_hills(&mut self, randomness: &mut MapRandomness) {
        self.tile_map_mut().cellular_hills(randomness);
    }

    fn apply_humidity_and_temperature(
        &mut self,
        map_parameters: &MapParameters,
        ruleset: &Ruleset,
        randomness: &mut MapRandomness,
    ) {
        self.tile_map_mut()
            .apply_humidity_and_temperature(map_parameters, ruleset, randomness);
    }

    fn spawn_lakes_and_coasts(
        &mut self,
        map_parameters: &MapParameters,
        ruleset: &Ruleset,
        randomness: &mut MapRandomness,
    ) {
        self.tile_map_mut()
            .spawn_lakes_and_coasts(map_parameters, ruleset, randomness);
    }

    fn spawn_vegetation(
        &mut self,
        map_parameters: &MapParameters,
        ruleset: &Ruleset,
        randomness: &mut MapRandomness,
    ) {
        self.tile_map_mut()
            .spawn_vegetation(map_parameters, ruleset, randomness);
    }

    fn spawn_rare_features(
        &mut self,
        map_parameters: &MapParameters,
        ruleset: &Ruleset,
        randomness: &mut MapRandomness,
    ) {
        self.tile_map_mut()
            .spawn_rare_features(map_parameters, ruleset, randomness);
    }

    fn spawn_ice(&mut self, map_parameters: &MapParameters, randomness: &mut MapRandomness) {
        self.tile_map_mut().spawn_ice(map_parameters, randomness);
    }

    /// Places natural wonders. Does nothing by default.
    ///
    /// Skipped when [`MapParameters::no_natural_wonders`] is set.
    fn place_natural_wonders(
        &mut self,
        _map_parameters: &MapParameters,
        _ruleset: &Ruleset,
        _randomness: &mut MapRandomness,
    ) {
    }

    /// Adds rivers, usually through [`TileMap::add_river_edge`]. Does nothing by default.
    fn add_rivers(
        &mut self,
        _map_parameters: &MapParameters,
        _ruleset: &Ruleset,
        _randomness: &mut MapRandomness,
    ) {
    }

    fn spread_resources(
        &mut self,
        map_parameters: &MapParameters,
        ruleset: &Ruleset,
        randomness: &mut MapRandomness,
    ) {
        self.tile_map_mut()
            .spread_resources(map_parameters, ruleset, randomness);
    }

    fn spread_ancient_ruins(
        &mut self,
        map_parameters: &MapParameters,
        ruleset: &Ruleset,
        randomness: &mut MapRandomness,
    ) {
        self.tile_map_mut()
            .spread_ancient_ruins(map_parameters, ruleset, randomness);
    }

    fn generate(
        map_parameters: &MapParameters,
        ruleset: &Ruleset,
        randomness: &mut MapRandomness,
    ) -> TileMap
    where
        Self: Sized,
    {
        let mut map = Self::new(map_parameters);
        // The order of the following methods is important. Do not change it.
        // Every stage draws from `randomness`, so reordering them changes the map of a seed.

        /********** Process 1: Generate Land, Elevation and Climate **********/
        map.generate_land(map_parameters, ruleset, randomness);

        map.raise_mountains_and_hills(map_parameters, ruleset, randomness);

        map.cellular_mountain_ranges(ruleset, randomness);

        map.cellular_hills(randomness);

        map.apply_humidity_and_temperature(map_parameters, ruleset, randomness);
        /********** The End of Process 1 **********/

        /********** Process 2: Add Water Bodies and Features **********/
        map.spawn_lakes_and_coasts(map_parameters, ruleset, randomness);

        map.spawn_vegetation(map_parameters, ruleset, randomness);

        map.spawn_rare_features(map_parameters, ruleset, randomness);

        map.spawn_ice(map_parameters, randomness);

        if !map_parameters.no_natural_wonders {
            map.place_natural_wonders(map_parameters, ruleset, randomness);
        }

        map.add_rivers(map_parameters, ruleset, randomness);
        /********** The End of Process 2 **********/

        /********** Process 3: Place Resources and Ruins **********/
        map.spread_resources(map_parameters, ruleset, randomness);

        map.spread_ancient_ruins(map_parameters, ruleset, randomness);
        /********** The End of Process 3 **********/

        debug!(seed = map_parameters.seed, "Map generated");

        map.into_inner()
    }
}

/// Generates common methods for a struct.
///
/// This macro generates the following methods:
/// - `new`: Creates a new instance of the struct with the given `MapParameters`.
/// - `into_inner`: Consumes the struct and returns the inner `TileMap`.
/// - `tile_map_mut`: Provides a mutable reference to the inner `TileMap`.
#[macro_export]
macro_rules! generate_common_methods {
    () => {
        /// Creates a new instance of the struct with the given `MapParameters`.
        fn new(map_parameters: &MapParameters) -> Self {
            Self(TileMap::new(map_parameters))
        }

        /// Consumes the struct and returns the inner `TileMap`.
        fn into_inner(self) -> TileMap {
            self.0
        }

        /// Provides a mutable reference to the inner `TileMap`.
        fn tile_map_mut(&mut self) -> &mut TileMap {
            &mut self.0
        }
    };
}
