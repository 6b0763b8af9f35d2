//! Seeded randomness for one generation run.
//!
//! [`MapRandomness`] owns the only random stream of a run. Every stage that needs randomness receives it
//! by mutable reference, so the sequence of draws, and therefore the map, is fixed by the seed and the
//! order of the stages.

use glam::DVec2;
use noise::{NoiseFn, Perlin};
use rand::{Rng, RngCore, SeedableRng, seq::IndexedRandom};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::{tile::Tile, tile_map::TileMap};

/// The random stream of one generation run.
///
/// It implements [`RngCore`], so all [`Rng`] methods are available on it directly.
/// ChaCha8 produces the same stream on every platform.
#[derive(Clone, Debug)]
pub struct MapRandomness {
    random_number_generator: ChaCha8Rng,
}

impl MapRandomness {
    pub fn new(seed: u64) -> Self {
        Self {
            random_number_generator: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Restarts the stream from `seed`.
    pub fn seed(&mut self, seed: u64) {
        self.random_number_generator = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Draws a seed from the stream and creates a noise channel from it.
    pub fn new_noise_channel(&mut self) -> NoiseChannel {
        NoiseChannel::new(self.random_number_generator.random())
    }

    /// Picks up to `number` tiles of `tiles` that are pairwise more than `distance` steps apart.
    ///
    /// `distance` starts at `initial_distance` (at least 1) and is decreased by one whenever fewer than `number`
    /// tiles could be picked. Picks are spread over base terrains: the next pick always comes from the base terrain
    /// with the fewest picks that still has available tiles, ties going to the terrain that appears first in `tiles`.
    /// After each pick, every tile within `distance` of it is no longer available.
    ///
    /// Returns the picked tiles and the distance they were picked with. At distance 1 the result is accepted
    /// even if it has fewer than `number` tiles.
    pub fn choose_spread_out_locations(
        &mut self,
        number: usize,
        tiles: &[Tile],
        initial_distance: u32,
        tile_map: &TileMap,
    ) -> (Vec<Tile>, u32) {
        let mut distance = initial_distance.max(1);

        loop {
            let mut available_tiles = tiles.to_vec();
            let mut chosen_tiles = Vec::with_capacity(number);

            let mut base_terrain_and_chosen_count: Vec<(&str, usize)> = Vec::new();
            for tile in tiles {
                let base_terrain = tile.base_terrain(tile_map);
                if !base_terrain_and_chosen_count
                    .iter()
                    .any(|&(name, _)| name == base_terrain)
                {
                    base_terrain_and_chosen_count.push((base_terrain, 0));
                }
            }

            while chosen_tiles.len() < number && !available_tiles.is_empty() {
                let mut order: Vec<usize> = (0..base_terrain_and_chosen_count.len()).collect();
                order.sort_by_key(|&index| base_terrain_and_chosen_count[index].1);

                let Some(terrain_index) = order.into_iter().find(|&index| {
                    let base_terrain = base_terrain_and_chosen_count[index].0;
                    available_tiles
                        .iter()
                        .any(|tile| tile.base_terrain(tile_map) == base_terrain)
                }) else {
                    break;
                };

                let base_terrain = base_terrain_and_chosen_count[terrain_index].0;
                let candidates: Vec<Tile> = available_tiles
                    .iter()
                    .copied()
                    .filter(|tile| tile.base_terrain(tile_map) == base_terrain)
                    .collect();
                let Some(&chosen_tile) = candidates.choose(self) else {
                    break;
                };

                available_tiles.retain(|tile| tile.distance_to(chosen_tile, tile_map) > distance);
                chosen_tiles.push(chosen_tile);
                base_terrain_and_chosen_count[terrain_index].1 += 1;
            }

            if chosen_tiles.len() == number || distance == 1 {
                return (chosen_tiles, distance);
            }

            trace!(
                distance,
                chosen = chosen_tiles.len(),
                number,
                "Not enough spread out locations, reducing the distance"
            );
            distance -= 1;
        }
    }
}

impl RngCore for MapRandomness {
    fn next_u32(&mut self) -> u32 {
        self.random_number_generator.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.random_number_generator.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.random_number_generator.fill_bytes(dst)
    }
}

/// Octave parameters of a coherent noise sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseSettings {
    pub octaves: u32,
    /// The amplitude factor between successive octaves.
    pub persistence: f64,
    /// The frequency factor between successive octaves.
    pub lacunarity: f64,
    /// Larger scales stretch the noise over more world units.
    pub scale: f64,
}

impl NoiseSettings {
    /// Settings with `persistence = 0.5` and `lacunarity = 2.0`.
    pub const fn new(octaves: u32, scale: f64) -> Self {
        Self {
            octaves,
            persistence: 0.5,
            lacunarity: 2.0,
            scale,
        }
    }
}

/// One independent field of coherent noise, e.g. humidity or elevation.
#[derive(Clone)]
pub struct NoiseChannel {
    perlin: Perlin,
}

impl NoiseChannel {
    pub fn new(channel_seed: u32) -> Self {
        Self {
            perlin: Perlin::new(channel_seed),
        }
    }

    /// Samples multi-octave Perlin noise at a world-space position.
    ///
    /// Octave `i` is sampled at `position * lacunarity^i / scale` and weighted by `persistence^i`.
    /// The weighted sum is divided by the total weight, so the result is in `[-1, 1]`.
    ///
    /// # Panics
    ///
    /// Panics if `octaves` is 0, or if `scale`, `persistence` or `lacunarity` is not positive.
    pub fn coherent_noise(&self, position: DVec2, settings: NoiseSettings) -> f64 {
        let NoiseSettings {
            octaves,
            persistence,
            lacunarity,
            scale,
        } = settings;
        assert!(octaves > 0, "coherent noise needs at least one octave");
        assert!(scale > 0.0, "coherent noise scale must be positive, got {scale}");
        assert!(
            persistence > 0.0 && lacunarity > 0.0,
            "coherent noise persistence and lacunarity must be positive"
        );

        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut total = 0.0;
        let mut total_amplitude = 0.0;

        for _ in 0..octaves {
            let sample_position = position * frequency / scale;
            total += amplitude * self.perlin.get(sample_position.to_array());
            total_amplitude += amplitude;
            frequency *= lacunarity;
            amplitude *= persistence;
        }

        (total / total_amplitude).clamp(-1.0, 1.0)
    }

    /// Same as [`NoiseChannel::coherent_noise`] but mapped to `[0, 1]`.
    pub fn normalized_noise(&self, position: DVec2, settings: NoiseSettings) -> f64 {
        (self.coherent_noise(position, settings) + 1.0) / 2.0
    }
}

/// Skews `value` in `[-1, 1]` towards the extremes: `|value|^(1 - exponent) * sign(value)`.
pub fn skew_towards_extremes(value: f64, exponent: f64) -> f64 {
    if value == 0.0 {
        return 0.0;
    }
    value.abs().powf(1.0 - exponent) * value.signum()
}

#[cfg(test)]
mod tests {
    use glam::DVec2;
    use rand::Rng;

    use super::{MapRandomness, NoiseChannel, NoiseSettings, skew_towards_extremes};
    use crate::{
        map_parameters::{MapParameters, MapSize},
        ruleset::Ruleset,
        tile::Tile,
        tile_component::BaseTerrain,
        tile_map::TileMap,
    };

    fn grassland_map(radius: u32) -> TileMap {
        let ruleset = Ruleset::default();
        let mut tile_map = TileMap::new(&MapParameters {
            map_size: MapSize::from_radius(radius),
            ..Default::default()
        });
        tile_map.generate_land_from_elevation(0.0, &ruleset, |_, _| 1.0);
        tile_map
    }

    fn assert_spread_out(tiles: &[Tile], distance: u32, tile_map: &TileMap) {
        for (i, a) in tiles.iter().enumerate() {
            for b in &tiles[i + 1..] {
                assert!(a.distance_to(*b, tile_map) > distance, "{a:?} and {b:?}");
            }
        }
    }

    #[test]
    fn spread_out_locations_keep_their_distance() {
        let tile_map = grassland_map(10);
        let tiles: Vec<Tile> = tile_map.all_tiles().collect();
        let mut randomness = MapRandomness::new(42);

        let (chosen, distance) = randomness.choose_spread_out_locations(5, &tiles, 4, &tile_map);
        assert_eq!(5, chosen.len());
        assert_eq!(4, distance);
        assert_spread_out(&chosen, distance, &tile_map);
    }

    #[test]
    fn spread_out_locations_relax_the_distance() {
        let tile_map = grassland_map(3);
        let tiles: Vec<Tile> = tile_map.all_tiles().collect();
        let mut randomness = MapRandomness::new(1);

        // No two tiles of a radius-3 map are more than 6 steps apart.
        let (chosen, distance) = randomness.choose_spread_out_locations(3, &tiles, 6, &tile_map);
        assert!(distance < 6);
        assert_spread_out(&chosen, distance, &tile_map);
        assert!(chosen.len() == 3 || distance == 1);

        let (chosen, distance) = randomness.choose_spread_out_locations(100, &tiles, 3, &tile_map);
        assert_eq!(1, distance);
        assert!(chosen.len() < 100);
        assert_spread_out(&chosen, 1, &tile_map);
    }

    #[test]
    fn spread_out_locations_balance_base_terrains() {
        let ruleset = Ruleset::default();
        let mut tile_map = grassland_map(8);
        let tiles: Vec<Tile> = tile_map.all_tiles().collect();
        for tile in tiles.iter().filter(|tile| tile.index() % 10 == 0) {
            tile.set_base_terrain(&mut tile_map, BaseTerrain::Desert.name(), &ruleset);
        }

        let mut randomness = MapRandomness::new(3);
        let (chosen, _) = randomness.choose_spread_out_locations(4, &tiles, 1, &tile_map);
        let deserts = chosen
            .iter()
            .filter(|tile| tile.base_terrain_is(&tile_map, BaseTerrain::Desert))
            .count();
        assert_eq!(2, deserts);

        let (chosen, distance) = randomness.choose_spread_out_locations(0, &tiles, 0, &tile_map);
        assert!(chosen.is_empty());
        assert_eq!(1, distance);
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = MapRandomness::new(42);
        let mut b = MapRandomness::new(42);
        let draws_a: Vec<u32> = (0..16).map(|_| a.random_range(0..1000)).collect();
        let draws_b: Vec<u32> = (0..16).map(|_| b.random_range(0..1000)).collect();
        assert_eq!(draws_a, draws_b);

        a.seed(7);
        let mut c = MapRandomness::new(7);
        assert_eq!(a.random::<u64>(), c.random::<u64>());
    }

    #[test]
    fn coherent_noise_is_deterministic_and_bounded() {
        let settings = NoiseSettings::new(6, 2.0);
        let channel = NoiseChannel::new(1234);
        let same_channel = NoiseChannel::new(1234);
        for i in 0..200 {
            let position = DVec2::new(i as f64 * 0.37 - 20.0, i as f64 * 0.73 - 50.0);
            let value = channel.coherent_noise(position, settings);
            assert!((-1.0..=1.0).contains(&value));
            assert_eq!(value, same_channel.coherent_noise(position, settings));
            let normalized = channel.normalized_noise(position, settings);
            assert!((0.0..=1.0).contains(&normalized));
        }
    }

    #[test]
    fn noise_is_smooth() {
        let settings = NoiseSettings::new(1, 10.0);
        let channel = NoiseChannel::new(99);
        let a = channel.coherent_noise(DVec2::new(3.3, 4.4), settings);
        let b = channel.coherent_noise(DVec2::new(3.31, 4.4), settings);
        assert!((a - b).abs() < 0.05);
    }

    #[test]
    #[should_panic]
    fn zero_octaves_fail_fast() {
        NoiseChannel::new(1).coherent_noise(DVec2::ZERO, NoiseSettings::new(0, 1.0));
    }

    #[test]
    fn skew_keeps_sign_and_pushes_outwards() {
        assert_eq!(0.0, skew_towards_extremes(0.0, 0.7));
        let skewed = skew_towards_extremes(0.25, 0.5);
        assert!((skewed - 0.5).abs() < 1e-12);
        assert!((skew_towards_extremes(-0.25, 0.5) + 0.5).abs() < 1e-12);
        assert_eq!(1.0, skew_towards_extremes(1.0, 0.3));
    }
}
