use crate::{
    generate_common_methods,
    map_parameters::MapParameters,
    randomness::{MapRandomness, NoiseSettings},
    ruleset::Ruleset,
    tile_map::TileMap,
};

use super::Generator;

/// Land wherever the landmass noise is above [`MapParameters::water_threshold`].
pub struct Perlin(TileMap);

impl Perlin {
    pub(crate) const LANDMASS_NOISE: NoiseSettings = NoiseSettings::new(6, 10.0);
}

impl Generator for Perlin {
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
            |position, _| landmass_channel.coherent_noise(position, Self::LANDMASS_NOISE),
        );
    }
}
