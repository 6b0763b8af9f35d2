//! Seeded generation of hexagonal world maps and of the starting tiles of the civilizations playing on them.
//!
//! ```rust
//! use hex_map_generator::{
//!     civilization::CivilizationPlacement,
//!     generate_map_and_starting_tiles,
//!     map_parameters::{MapParameters, MapSize},
//!     ruleset::Ruleset,
//! };
//!
//! let mut map_parameters = MapParameters {
//!     map_size: MapSize::from_radius(12),
//!     seed: 7,
//!     ..Default::default()
//! };
//! let civilizations = [CivilizationPlacement::new("Rome"), CivilizationPlacement::new("Greece")];
//!
//! let (tile_map, starting_tiles) =
//!     generate_map_and_starting_tiles(&mut map_parameters, &Ruleset::default(), &civilizations).unwrap();
//! assert_eq!(469, tile_map.tile_count());
//! assert_eq!(2, starting_tiles.tiles.len());
//! ```

pub mod civilization;
pub mod error;
pub mod grid;
pub mod map_generator;
pub mod map_parameters;
pub mod randomness;
pub mod ruleset;
pub mod tile;
pub mod tile_component;
pub mod tile_map;

use civilization::CivilizationPlacement;
use error::MapGenerationError;
use map_generator::{
    Generator, archipelago::Archipelago, continents::Continents, pangaea::Pangaea, perlin::Perlin,
};
use map_parameters::{MapParameters, MapType};
use randomness::MapRandomness;
use ruleset::Ruleset;
use tile_map::{StartingTiles, TileMap};
use tracing::info;

/// Generates a map.
///
/// An unset seed in `map_parameters` is replaced by the current time first, so the seed of the run can be read back.
pub fn generate_map(map_parameters: &mut MapParameters, ruleset: &Ruleset) -> TileMap {
    let mut randomness = seeded_randomness(map_parameters);
    generate_map_with(map_parameters, ruleset, &mut randomness)
}

/// Generates a map, then chooses the starting tiles of `civilizations` on it.
///
/// The starting tiles are drawn from the same random stream as the map, so the seed fixes both.
///
/// # Errors
///
/// Returns [`MapGenerationError::CannotGenerateStartingTiles`] if the map does not have enough viable land
/// for `civilizations`.
pub fn generate_map_and_starting_tiles(
    map_parameters: &mut MapParameters,
    ruleset: &Ruleset,
    civilizations: &[CivilizationPlacement],
) -> Result<(TileMap, StartingTiles), MapGenerationError> {
    let mut randomness = seeded_randomness(map_parameters);
    let tile_map = generate_map_with(map_parameters, ruleset, &mut randomness);
    let starting_tiles =
        tile_map.choose_civilization_starting_tiles(civilizations, ruleset, &mut randomness)?;
    Ok((tile_map, starting_tiles))
}

fn seeded_randomness(map_parameters: &mut MapParameters) -> MapRandomness {
    map_parameters.assign_seed_if_unset();
    info!(
        seed = map_parameters.seed,
        map_type = ?map_parameters.map_type,
        "Generating map"
    );
    MapRandomness::new(map_parameters.seed)
}

fn generate_map_with(
    map_parameters: &MapParameters,
    ruleset: &Ruleset,
    randomness: &mut MapRandomness,
) -> TileMap {
    match map_parameters.map_type {
        MapType::Pangaea => Pangaea::generate(map_parameters, ruleset, randomness),
        MapType::Continents => Continents::generate(map_parameters, ruleset, randomness),
        MapType::Perlin => Perlin::generate(map_parameters, ruleset, randomness),
        MapType::Archipelago => Archipelago::generate(map_parameters, ruleset, randomness),
        MapType::Empty => TileMap::new(map_parameters),
    }
}
