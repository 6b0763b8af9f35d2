use rand::Rng;
use tracing::debug;

use crate::{
    map_parameters::MapParameters,
    randomness::{MapRandomness, NoiseSettings, skew_towards_extremes},
    ruleset::Ruleset,
    tile::Tile,
    tile_component::{BaseTerrain, Feature},
    tile_map::TileMap,
};

/// A transient mark set on a tile during one relaxation iteration and consumed in the same iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElevationMark {
    Rising,
    Lowering,
}

impl TileMap {
    /// Seeds elevation from coherent noise.
    ///
    /// Every land tile samples the elevation channel once. The sample is skewed by
    /// [`MapParameters::elevation_exponent`] and then bucketed:
    /// - `<= 0.5`: the base terrain becomes plains.
    /// - `<= 0.7`: the tile gets a hill.
    /// - otherwise: the base terrain becomes mountain.
    pub fn raise_mountains_and_hills(
        &mut self,
        map_parameters: &MapParameters,
        ruleset: &Ruleset,
        randomness: &mut MapRandomness,
    ) {
        const ELEVATION_NOISE: NoiseSettings = NoiseSettings::new(6, 2.0);

        let elevation_channel = randomness.new_noise_channel();

        for tile in self.all_tiles() {
            if tile.is_water(self) {
                continue;
            }

            let noise = elevation_channel.coherent_noise(tile.world_position(self), ELEVATION_NOISE);
            let elevation = skew_towards_extremes(noise, map_parameters.elevation_exponent);

            if elevation <= 0.5 {
                tile.set_base_terrain(self, BaseTerrain::Plains.name(), ruleset);
            } else if elevation <= 0.7 {
                tile.add_feature(self, Feature::Hill.name());
            } else {
                tile.set_base_terrain(self, BaseTerrain::Mountain.name(), ruleset);
            }
        }
    }

    /// Relaxes the mountains towards one mountain per 20 land tiles, in 5 cellular iterations.
    ///
    /// In each iteration every land tile is marked by the number of its neighbors that are mountains:
    /// - an isolated mountain lowers with probability 1/4,
    /// - a tile next to exactly 1 mountain rises with probability 1/10,
    /// - a tile next to exactly 3 mountains lowers with probability 1/2,
    /// - a tile next to more than 3 mountains always lowers.
    ///
    /// Then the marks are applied. A rising tile becomes a mountain only while the mountain count is below the target.
    /// A lowering tile always becomes grassland with a hill.
    pub fn cellular_mountain_ranges(&mut self, ruleset: &Ruleset, randomness: &mut MapRandomness) {
        let land_tiles: Vec<Tile> = self.all_tiles().filter(|tile| !tile.is_water(self)).collect();
        let target_mountains = land_tiles.len() / 20;

        debug!(
            target_mountains,
            mountains = self.mountain_count(),
            "Relaxing mountain ranges"
        );

        let mut marks = vec![None; self.tile_count()];

        for _ in 0..5 {
            let mut total_mountains = self.mountain_count();

            for &tile in &land_tiles {
                let adjacent_mountains = tile
                    .neighbor_tiles(self)
                    .filter(|neighbor| neighbor.is_mountain(self))
                    .count();

                marks[tile.index()] = if adjacent_mountains == 0 && tile.is_mountain(self) {
                    randomness.random_ratio(1, 4).then_some(ElevationMark::Lowering)
                } else if adjacent_mountains == 1 {
                    randomness.random_ratio(1, 10).then_some(ElevationMark::Rising)
                } else if adjacent_mountains == 3 {
                    randomness.random_ratio(1, 2).then_some(ElevationMark::Lowering)
                } else if adjacent_mountains > 3 {
                    Some(ElevationMark::Lowering)
                } else {
                    None
                };
            }

            for &tile in &land_tiles {
                match marks[tile.index()].take() {
                    Some(ElevationMark::Rising) if total_mountains < target_mountains => {
                        tile.remove_feature(self, Feature::Hill.name());
                        if !tile.is_mountain(self) {
                            tile.set_base_terrain(self, BaseTerrain::Mountain.name(), ruleset);
                            total_mountains += 1;
                        }
                    }
                    Some(ElevationMark::Lowering) => {
                        if tile.is_mountain(self) {
                            total_mountains -= 1;
                        }
                        tile.set_base_terrain(self, BaseTerrain::Grassland.name(), ruleset);
                        tile.add_feature(self, Feature::Hill.name());
                    }
                    _ => {}
                }
            }
        }

        debug!(mountains = self.mountain_count(), "Mountain ranges relaxed");
    }

    /// Relaxes the hills towards the hill count at the start of this step, in 5 cellular iterations.
    ///
    /// Only land tiles that are not mountains take part. A tile is marked by the number of neighboring hills and mountains:
    /// - at most 1 neighboring hill and no neighboring mountain: lowers with probability 1/2,
    /// - otherwise more than 3 neighboring hills and no neighboring mountain: lowers with probability 1/2,
    /// - otherwise 2 or 3 neighboring hills and mountains combined: rises with probability 1/2.
    ///
    /// A rising tile gets a hill while the hill count is at most the target,
    /// a lowering tile loses its hill while the hill count is at least 90% of the target.
    /// Both gates are skipped in the first iteration.
    pub fn cellular_hills(&mut self, randomness: &mut MapRandomness) {
        let target_hills = self.hill_count();

        debug!(target_hills, "Relaxing hills");

        let candidate_tiles: Vec<Tile> = self
            .all_tiles()
            .filter(|tile| !tile.is_water(self) && !tile.is_mountain(self))
            .collect();
        let mut marks = vec![None; self.tile_count()];

        for iteration in 1..=5 {
            let mut total_hills = self.hill_count();

            for &tile in &candidate_tiles {
                let (adjacent_hills, adjacent_mountains) = tile.neighbor_tiles(self).fold(
                    (0, 0),
                    |(hills, mountains), neighbor| {
                        (
                            hills + neighbor.is_hill(self) as usize,
                            mountains + neighbor.is_mountain(self) as usize,
                        )
                    },
                );

                marks[tile.index()] = if adjacent_hills <= 1
                    && adjacent_mountains == 0
                    && randomness.random_ratio(1, 2)
                {
                    Some(ElevationMark::Lowering)
                } else if adjacent_hills > 3
                    && adjacent_mountains == 0
                    && randomness.random_ratio(1, 2)
                {
                    Some(ElevationMark::Lowering)
                } else if (2..=3).contains(&(adjacent_hills + adjacent_mountains))
                    && randomness.random_ratio(1, 2)
                {
                    Some(ElevationMark::Rising)
                } else {
                    None
                };
            }

            let first_iteration = iteration == 1;

            for &tile in &candidate_tiles {
                match marks[tile.index()].take() {
                    Some(ElevationMark::Rising)
                        if (total_hills <= target_hills || first_iteration)
                            && !tile.is_hill(self) =>
                    {
                        tile.add_feature(self, Feature::Hill.name());
                        total_hills += 1;
                    }
                    Some(ElevationMark::Lowering)
                        if (total_hills as f64 >= target_hills as f64 * 0.9 || first_iteration)
                            && tile.is_hill(self) =>
                    {
                        tile.remove_feature(self, Feature::Hill.name());
                        total_hills -= 1;
                    }
                    _ => {}
                }
            }
        }

        debug!(hills = self.hill_count(), "Hills relaxed");
    }

    fn mountain_count(&self) -> usize {
        self.all_tiles().filter(|tile| tile.is_mountain(self)).count()
    }

    fn hill_count(&self) -> usize {
        self.all_tiles().filter(|tile| tile.is_hill(self)).count()
    }
}
