use enum_map::Enum;
use serde::{Deserialize, Serialize};

/// The class of a ruleset terrain definition.
#[derive(Enum, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize, Debug)]
pub enum TerrainType {
    Land,
    Water,
    TerrainFeature,
    NaturalWonder,
}
