use crate::{
    generate_common_methods,
    map_parameters::MapParameters,
    randomness::{MapRandomness, NoiseSettings},
    ruleset::Ruleset,
    tile_map::TileMap,
};

use super::Generator;

/// Many small islands.
pub struct Archipelago(TileMap);

impl Archipelago {
    const LANDMASS_NOISE: NoiseSettings = NoiseSettings::new(3, 4.0);
    /// Added to [`MapParameters::water_threshold`].
    const THRESHOLD_RAISE: f64 = 0.15;
}

impl Generator for Archipelago {
    generate_common_methods!();

    fn generate_land(
        &mut self,
        map_parameters: &MapParameters,
        ruleset: &Ruleset,
        randomness: &mut MapRandomness,
    ) {
        let landmass_channel = randomness.new_noise_channel();

        self.tile_map_mut().generate_land_from_elevation(
            map_parameters.water_threshold + Self::THRESHOLD_RAISE,
            ruleset,
            |position, _| landmass_channel.coherent_noise(position, Self::LANDMASS_NOISE),
        );
    }
}
