//! This module contains the components of the tile in the map.
//! The built-in terrains, features and improvements the generator reasons about are closed enums here.
//! Everything else a ruleset defines is addressed by name, see [`crate::ruleset::Ruleset`].

pub mod base_terrain;
pub mod feature;
pub mod improvement;
pub mod resource;
pub mod terrain_type;

pub use base_terrain::BaseTerrain;
pub use feature::Feature;
pub use improvement::Improvement;
pub use resource::ResourceType;
pub use terrain_type::TerrainType;
