mod add_features;
mod apply_humidity_and_temperature;
mod choose_civilization_starting_tiles;
mod generate_land;
mod raise_mountains_and_hills;
mod spawn_lakes_and_coasts;
mod spread_resources;

pub use choose_civilization_starting_tiles::StartingTiles;
pub use generate_land::elliptic_falloff;
