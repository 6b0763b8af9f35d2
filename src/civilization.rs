//! Placement constraints the starting location solver assigns civilizations under.

use crate::{ruleset::nation::Nation, tile::Tile, tile_map::TileMap};

/// A preference of a civilization for the terrain around its starting tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StartBias {
    /// Keep tiles next to a coast tile.
    Coast,
    /// Keep tiles whose base terrain or features include the terrain.
    Prefer(String),
    /// Drop tiles whose base terrain or features include the terrain.
    Avoid(String),
}

impl StartBias {
    /// Parses a bias in ruleset notation: `Coast`, `Avoid [Tundra]` or a plain terrain name such as `Desert`.
    pub fn parse(bias: &str) -> Self {
        if bias == "Coast" {
            return StartBias::Coast;
        }

        match bias.strip_prefix("Avoid ") {
            Some(terrain) => {
                let terrain = terrain
                    .strip_prefix('[')
                    .and_then(|terrain| terrain.strip_suffix(']'))
                    .unwrap_or(terrain);
                StartBias::Avoid(terrain.to_owned())
            }
            None => StartBias::Prefer(bias.to_owned()),
        }
    }

    /// Whether `tile` passes this bias.
    pub fn keeps(&self, tile: Tile, tile_map: &TileMap) -> bool {
        match self {
            StartBias::Coast => tile.is_coastal(tile_map),
            StartBias::Prefer(terrain) => has_terrain(tile, tile_map, terrain),
            StartBias::Avoid(terrain) => !has_terrain(tile, tile_map, terrain),
        }
    }
}

fn has_terrain(tile: Tile, tile_map: &TileMap, terrain: &str) -> bool {
    tile.base_terrain(tile_map) == terrain || tile.has_feature(tile_map, terrain)
}

/// How strictly a civilization is constrained. Stricter civilizations are placed first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlacementPriority {
    /// The map carries a pre-authored starting location for the civilization.
    Preset,
    /// The civilization has at least one start bias.
    Biased,
    Unconstrained,
}

/// The constraint set of one civilization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CivilizationPlacement {
    pub name: String,
    /// Applied in order, each one filtering the tiles the previous ones kept.
    pub start_biases: Vec<StartBias>,
}

impl CivilizationPlacement {
    /// Creates an unconstrained civilization.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start_biases: Vec::new(),
        }
    }

    pub fn with_start_biases(mut self, start_biases: impl IntoIterator<Item = StartBias>) -> Self {
        self.start_biases = start_biases.into_iter().collect();
        self
    }

    pub fn from_nation(nation: &Nation) -> Self {
        Self {
            name: nation.name.clone(),
            start_biases: nation
                .start_bias
                .iter()
                .map(|bias| StartBias::parse(bias))
                .collect(),
        }
    }

    /// Returns the placement priority, given whether `tile_map` carries a preset starting tile for this civilization.
    pub fn priority(&self, has_preset_tile: bool) -> PlacementPriority {
        if has_preset_tile {
            PlacementPriority::Preset
        } else if !self.start_biases.is_empty() {
            PlacementPriority::Biased
        } else {
            PlacementPriority::Unconstrained
        }
    }

    /// Filters `tiles` by every start bias in turn. Returns an empty list if some bias keeps nothing.
    pub fn preferred_tiles(&self, tiles: &[Tile], tile_map: &TileMap) -> Vec<Tile> {
        let mut preferred_tiles = tiles.to_vec();
        for start_bias in &self.start_biases {
            preferred_tiles.retain(|&tile| start_bias.keeps(tile, tile_map));
        }
        preferred_tiles
    }
}

#[cfg(test)]
mod tests {
    use super::{CivilizationPlacement, PlacementPriority, StartBias};
    use crate::{
        map_parameters::{MapParameters, MapSize},
        ruleset::Ruleset,
        tile_component::{BaseTerrain, Feature},
        tile_map::TileMap,
    };

    #[test]
    fn parse_ruleset_notation() {
        assert_eq!(StartBias::Coast, StartBias::parse("Coast"));
        assert_eq!(
            StartBias::Avoid("Tundra".to_owned()),
            StartBias::parse("Avoid [Tundra]")
        );
        assert_eq!(
            StartBias::Avoid("Jungle".to_owned()),
            StartBias::parse("Avoid Jungle")
        );
        assert_eq!(
            StartBias::Prefer("Desert".to_owned()),
            StartBias::parse("Desert")
        );
    }

    #[test]
    fn priority_follows_the_constraints() {
        let unconstrained = CivilizationPlacement::new("Rome");
        let biased = CivilizationPlacement::new("Egypt")
            .with_start_biases([StartBias::Prefer("Desert".to_owned())]);

        assert_eq!(PlacementPriority::Preset, biased.priority(true));
        assert_eq!(PlacementPriority::Biased, biased.priority(false));
        assert_eq!(PlacementPriority::Unconstrained, unconstrained.priority(false));
        assert!(PlacementPriority::Preset < PlacementPriority::Biased);
        assert!(PlacementPriority::Biased < PlacementPriority::Unconstrained);
    }

    #[test]
    fn nations_carry_their_biases() {
        let ruleset = Ruleset::default();
        let biased_nation = ruleset
            .nations
            .iter()
            .find(|nation| !nation.start_bias.is_empty())
            .unwrap();

        let placement = CivilizationPlacement::from_nation(biased_nation);
        assert_eq!(biased_nation.name, placement.name);
        assert_eq!(biased_nation.start_bias.len(), placement.start_biases.len());
    }

    #[test]
    fn biases_filter_in_sequence() {
        let ruleset = Ruleset::default();
        let map_parameters = MapParameters {
            map_size: MapSize::from_radius(3),
            ..Default::default()
        };
        let mut tile_map = TileMap::new(&map_parameters);
        let tiles: Vec<_> = tile_map.all_tiles().collect();
        for (index, &tile) in tiles.iter().enumerate() {
            let base_terrain = if index % 2 == 0 {
                BaseTerrain::Desert
            } else {
                BaseTerrain::Plains
            };
            tile.set_base_terrain(&mut tile_map, base_terrain.name(), &ruleset);
            if index % 3 == 0 {
                tile.add_feature(&mut tile_map, Feature::Hill.name());
            }
        }

        let placement = CivilizationPlacement::new("Arabia").with_start_biases([
            StartBias::Prefer("Desert".to_owned()),
            StartBias::Avoid("Hill".to_owned()),
        ]);
        let preferred_tiles = placement.preferred_tiles(&tiles, &tile_map);

        assert!(!preferred_tiles.is_empty());
        for tile in &tiles {
            let expected = tile.base_terrain_is(&tile_map, BaseTerrain::Desert) && !tile.is_hill(&tile_map);
            assert_eq!(expected, preferred_tiles.contains(tile));
        }

        let coastal = CivilizationPlacement::new("Carthage").with_start_biases([StartBias::Coast]);
        assert!(coastal.preferred_tiles(&tiles, &tile_map).is_empty());
    }
}
