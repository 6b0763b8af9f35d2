use glam::DVec2;

use crate::{
    generate_common_methods,
    map_parameters::MapParameters,
    randomness::MapRandomness,
    ruleset::Ruleset,
    tile_map::{TileMap, elliptic_falloff},
};

use super::{Generator, perlin::Perlin};

/// Two continents, one in the west and one in the east, separated by water along the center line.
pub struct Continents(TileMap);

impl Continents {
    /// Tiles whose relative `x` is smaller than this in magnitude are always water.
    const GAP_HALF_WIDTH: f64 = 0.08;
}

impl Generator for Continents {
    generate_common_methods!();

    fn generate_land(
        &mut self,
        map_parameters: &MapParameters,
        ruleset: &Ruleset,
        randomness: &mut MapRandomness,
    ) {
        let landmass_channel = randomness.new_noise_channel();
        let radii = DVec2::new(0.45, 0.7);

        self.tile_map_mut().generate_land_from_elevation(
            map_parameters.water_threshold,
            ruleset,
            |position, relative_position| {
                if relative_position.x.abs() < Self::GAP_HALF_WIDTH {
                    return -1.0;
                }

                let noise = landmass_channel.coherent_noise(position, Perlin::LANDMASS_NOISE);
                let falloff = elliptic_falloff(relative_position, DVec2::new(-0.45, 0.0), radii)
                    .max(elliptic_falloff(relative_position, DVec2::new(0.45, 0.0), radii));
                (noise + falloff) / 2.0
            },
        );
    }
}
