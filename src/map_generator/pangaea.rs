use glam::DVec2;

use crate::{
    generate_common_methods,
    map_parameters::MapParameters,
    randomness::MapRandomness,
    ruleset::Ruleset,
    tile_map::{TileMap, elliptic_falloff},
};

use super::{Generator, perlin::Perlin};

/// One large continent around the center of the map.
pub struct Pangaea(TileMap);

impl Generator for Pangaea {
    generate_common_methods!();

    fn generate_land(
        &mut self,
        map_parameters: &MapParameters,
        ruleset: &Ruleset,
        randomness: &mut MapRandomness,
    ) {
        let landmass_channel = randomness.new_noise_channel();

        self.tile_map_mut().generate_land_from_elevation(
            map_parameters.water_threshold,
            ruleset,
            |position, relative_position| {
                let noise = landmass_channel.coherent_noise(position, Perlin::LANDMASS_NOISE);
                let falloff =
                    elliptic_falloff(relative_position, DVec2::ZERO, DVec2::new(0.75, 0.75));
                (noise + falloff) / 2.0
            },
        );
    }
}
