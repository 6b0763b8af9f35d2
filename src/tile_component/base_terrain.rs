use serde::{Deserialize, Serialize};

/// The base terrains the generation stages assign directly.
///
/// A tile stores its base terrain by name, so a ruleset may define further base terrains
/// (the data-driven climate rules can pick any of them).
#[derive(PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize, Debug)]
pub enum BaseTerrain {
    Ocean,
    Coast,
    Lake,
    Grassland,
    Plains,
    Desert,
    Tundra,
    Snow,
    Mountain,
}

impl BaseTerrain {
    pub const fn name(&self) -> &'static str {
        match self {
            BaseTerrain::Ocean => "Ocean",
            BaseTerrain::Coast => "Coast",
            BaseTerrain::Lake => "Lakes",
            BaseTerrain::Grassland => "Grassland",
            BaseTerrain::Plains => "Plains",
            BaseTerrain::Desert => "Desert",
            BaseTerrain::Tundra => "Tundra",
            BaseTerrain::Snow => "Snow",
            BaseTerrain::Mountain => "Mountain",
        }
    }
}
