use std::collections::HashMap;

use rand::seq::IndexedRandom;
use tracing::{debug, trace};

use crate::{
    civilization::CivilizationPlacement,
    error::MapGenerationError,
    randomness::MapRandomness,
    ruleset::Ruleset,
    tile::Tile,
    tile_component::Improvement,
    tile_map::TileMap,
};

/// The starting tiles chosen for a set of civilizations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartingTiles {
    /// The minimum distance between starting tiles the placement succeeded with.
    /// `0` only guarantees that the tiles are distinct.
    pub min_distance: u32,
    /// Civilization names with their starting tiles, in placement order.
    pub tiles: Vec<(String, Tile)>,
}

impl StartingTiles {
    /// Returns the starting tile of the civilization named `civilization`.
    pub fn tile_of(&self, civilization: &str) -> Option<Tile> {
        self.tiles
            .iter()
            .find(|(name, _)| name == civilization)
            .map(|&(_, tile)| tile)
    }
}

impl TileMap {
    /// A land component needs more than this many tiles to hold starting tiles.
    pub const MIN_VIABLE_LAND_SIZE: usize = 20;

    /// Returns the land tiles that can hold a starting tile.
    ///
    /// Those are the tiles of the connected components of passable land (land whose base terrain is not impassable)
    /// with more than [`TileMap::MIN_VIABLE_LAND_SIZE`] tiles. The tiles are returned in index order.
    pub fn viable_land_tiles(&self, ruleset: &Ruleset) -> Vec<Tile> {
        let is_passable_land =
            |tile: Tile| tile.is_land(self) && !tile.is_base_terrain_impassable(self, ruleset);

        let mut visited = vec![false; self.tile_count()];
        let mut viable_land_tiles = Vec::new();

        for start in self.all_tiles() {
            if visited[start.index()] || !is_passable_land(start) {
                continue;
            }

            visited[start.index()] = true;
            let mut component = vec![start];
            let mut next_index = 0;

            while let Some(&tile) = component.get(next_index) {
                next_index += 1;
                for neighbor in tile.neighbor_tiles(self) {
                    if !visited[neighbor.index()] && is_passable_land(neighbor) {
                        visited[neighbor.index()] = true;
                        component.push(neighbor);
                    }
                }
            }

            if component.len() > Self::MIN_VIABLE_LAND_SIZE {
                viable_land_tiles.extend(component);
            }
        }

        viable_land_tiles.sort_unstable();
        viable_land_tiles
    }

    /// Assigns every civilization a starting tile.
    ///
    /// Civilizations are placed in order of [`PlacementPriority`](crate::civilization::PlacementPriority),
    /// keeping the given order among equals. A civilization with a tile carrying its
    /// [`Improvement::StartingLocation`] starts there. Any other civilization starts on a random viable land tile
    /// at least `min_distance` steps from the map edge, preferring tiles its start biases keep.
    /// After each assignment, the tiles within `min_distance` of the starting tile are no longer available.
    ///
    /// `min_distance` starts at a third of the characteristic radius of the map and is decreased whenever
    /// some civilization runs out of tiles.
    ///
    /// # Errors
    ///
    /// Returns [`MapGenerationError::CannotGenerateStartingTiles`] if the civilizations cannot be placed
    /// even with `min_distance` 0.
    pub fn choose_civilization_starting_tiles(
        &self,
        civilizations: &[CivilizationPlacement],
        ruleset: &Ruleset,
        randomness: &mut MapRandomness,
    ) -> Result<StartingTiles, MapGenerationError> {
        self.choose_civilization_starting_tiles_from(
            civilizations,
            ruleset,
            randomness,
            self.characteristic_radius() / 3,
        )
    }

    /// Same as [`TileMap::choose_civilization_starting_tiles`], with `min_distance` starting at `initial_min_distance`.
    ///
    /// # Errors
    ///
    /// Returns [`MapGenerationError::CannotGenerateStartingTiles`] if the civilizations cannot be placed
    /// even with `min_distance` 0.
    pub fn choose_civilization_starting_tiles_from(
        &self,
        civilizations: &[CivilizationPlacement],
        ruleset: &Ruleset,
        randomness: &mut MapRandomness,
        initial_min_distance: u32,
    ) -> Result<StartingTiles, MapGenerationError> {
        let viable_land_tiles = self.viable_land_tiles(ruleset);

        let mut preset_tiles: HashMap<String, Tile> = HashMap::new();
        for tile in self.all_tiles() {
            if let Some(Improvement::StartingLocation(civilization)) =
                tile.improvement(self).and_then(Improvement::from_name)
            {
                preset_tiles.entry(civilization.to_owned()).or_insert(tile);
            }
        }

        let mut civilizations: Vec<&CivilizationPlacement> = civilizations.iter().collect();
        civilizations.sort_by_key(|civilization| {
            civilization.priority(preset_tiles.contains_key(&civilization.name))
        });

        debug!(
            civilizations = civilizations.len(),
            viable_land_tiles = viable_land_tiles.len(),
            presets = preset_tiles.len(),
            initial_min_distance,
            "Choosing civilization starting tiles"
        );

        for min_distance in (0..=initial_min_distance).rev() {
            let mut free_tiles: Vec<Tile> = viable_land_tiles
                .iter()
                .copied()
                .filter(|&tile| self.distance_to_edge(tile) >= min_distance)
                .collect();

            let mut starting_tiles = Vec::with_capacity(civilizations.len());

            for civilization in &civilizations {
                let starting_tile = match preset_tiles.get(&civilization.name) {
                    Some(&tile) => tile,
                    None => {
                        let preferred_tiles = civilization.preferred_tiles(&free_tiles, self);
                        let pool = if preferred_tiles.is_empty() {
                            &free_tiles
                        } else {
                            &preferred_tiles
                        };
                        match pool.choose(randomness) {
                            Some(&tile) => tile,
                            None => break,
                        }
                    }
                };

                starting_tiles.push((civilization.name.clone(), starting_tile));
                let blocked_tiles = self.tiles_in_distance(starting_tile, min_distance);
                free_tiles.retain(|tile| !blocked_tiles.contains(tile));
            }

            if starting_tiles.len() == civilizations.len() {
                debug!(min_distance, "Civilization starting tiles chosen");
                return Ok(StartingTiles {
                    min_distance,
                    tiles: starting_tiles,
                });
            }

            trace!(
                min_distance,
                placed = starting_tiles.len(),
                "Not every civilization could be placed, relaxing the minimum distance"
            );
        }

        Err(MapGenerationError::CannotGenerateStartingTiles {
            civilization_num: civilizations.len(),
            viable_land_tile_num: viable_land_tiles.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        civilization::{CivilizationPlacement, StartBias},
        error::MapGenerationError,
        grid::Hex,
        map_parameters::{MapParameters, MapSize},
        randomness::MapRandomness,
        ruleset::Ruleset,
        tile::Tile,
        tile_component::{BaseTerrain, Improvement},
        tile_map::TileMap,
    };

    /// A hexagonal map whose tiles within `land_radius` of the origin are grassland.
    fn island_map(radius: u32, land_radius: i32, ruleset: &Ruleset) -> TileMap {
        let map_parameters = MapParameters {
            map_size: MapSize::from_radius(radius),
            ..Default::default()
        };
        let mut tile_map = TileMap::new(&map_parameters);
        for tile in tile_map.all_tiles() {
            if tile.position(&tile_map).length() <= land_radius {
                tile.set_base_terrain(&mut tile_map, BaseTerrain::Grassland.name(), ruleset);
            }
        }
        tile_map
    }

    fn civilizations(number: usize) -> Vec<CivilizationPlacement> {
        (0..number)
            .map(|index| CivilizationPlacement::new(format!("Civilization {index}")))
            .collect()
    }

    #[test]
    fn small_islands_and_mountains_are_not_viable() {
        let ruleset = Ruleset::default();
        let mut tile_map = island_map(12, 3, &ruleset);
        // A separate 7-tile island.
        let islet = tile_map.tile_at(Hex::new(9, -4)).unwrap();
        for tile in islet.tiles_in_distance(1, &tile_map) {
            tile.set_base_terrain(&mut tile_map, BaseTerrain::Plains.name(), &ruleset);
        }
        let peak = tile_map.tile_at(Hex::ORIGIN).unwrap();
        peak.set_base_terrain(&mut tile_map, BaseTerrain::Mountain.name(), &ruleset);

        let viable_land_tiles = tile_map.viable_land_tiles(&ruleset);
        assert_eq!(36, viable_land_tiles.len());
        assert!(!viable_land_tiles.contains(&peak));
        assert!(!viable_land_tiles.contains(&islet));
        assert!(viable_land_tiles.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn starting_tiles_keep_their_distance() {
        let ruleset = Ruleset::default();
        let tile_map = island_map(12, 9, &ruleset);
        let mut randomness = MapRandomness::new(42);

        let starting_tiles = tile_map
            .choose_civilization_starting_tiles(&civilizations(4), &ruleset, &mut randomness)
            .unwrap();

        assert_eq!(4, starting_tiles.tiles.len());
        assert!(starting_tiles.min_distance <= 4);
        for (index, &(_, a)) in starting_tiles.tiles.iter().enumerate() {
            assert!(a.is_land(&tile_map));
            assert!(tile_map.distance_to_edge(a) >= starting_tiles.min_distance);
            for &(_, b) in &starting_tiles.tiles[index + 1..] {
                assert!(a.distance_to(b, &tile_map) > starting_tiles.min_distance);
            }
        }
    }

    #[test]
    fn distance_relaxes_until_everyone_fits() {
        let ruleset = Ruleset::default();
        let tile_map = island_map(9, 3, &ruleset);
        let mut randomness = MapRandomness::new(3);

        let starting_tiles = tile_map
            .choose_civilization_starting_tiles(&civilizations(20), &ruleset, &mut randomness)
            .unwrap();
        assert_eq!(0, starting_tiles.min_distance);

        let mut tiles: Vec<Tile> = starting_tiles.tiles.iter().map(|&(_, tile)| tile).collect();
        tiles.sort();
        tiles.dedup();
        assert_eq!(20, tiles.len());
    }

    #[test]
    fn smaller_initial_distances_never_fail_where_larger_ones_succeed() {
        let ruleset = Ruleset::default();
        let tile_map = island_map(12, 9, &ruleset);
        let civilizations = civilizations(4);

        let default_start = tile_map
            .choose_civilization_starting_tiles(&civilizations, &ruleset, &mut MapRandomness::new(42))
            .unwrap();
        let explicit_start = tile_map
            .choose_civilization_starting_tiles_from(
                &civilizations,
                &ruleset,
                &mut MapRandomness::new(42),
                tile_map.characteristic_radius() / 3,
            )
            .unwrap();
        assert_eq!(default_start, explicit_start);

        for initial_min_distance in (0..=8).rev() {
            let starting_tiles = tile_map
                .choose_civilization_starting_tiles_from(
                    &civilizations,
                    &ruleset,
                    &mut MapRandomness::new(42),
                    initial_min_distance,
                )
                .unwrap();
            let min_distance = starting_tiles.min_distance;
            assert!(min_distance <= initial_min_distance);
            // Every island tile is at least 3 steps from the edge and 4 blocked disks of radius 3 leave room.
            if initial_min_distance <= 3 {
                assert_eq!(initial_min_distance, min_distance);
            }

            for (index, &(_, a)) in starting_tiles.tiles.iter().enumerate() {
                assert!(tile_map.distance_to_edge(a) >= min_distance);
                for &(_, b) in &starting_tiles.tiles[index + 1..] {
                    assert!(a.distance_to(b, &tile_map) > min_distance);
                }
            }
        }
    }

    #[test]
    fn presets_and_biases_are_honored() {
        let ruleset = Ruleset::default();
        let mut tile_map = island_map(12, 8, &ruleset);
        let preset = tile_map.tile_at(Hex::new(2, 1)).unwrap();
        let preset_improvement = Improvement::StartingLocation("Rome").name();
        preset.set_improvement(&mut tile_map, Some(preset_improvement.as_str()));
        for tile in tile_map.all_tiles() {
            if tile.position(&tile_map).x() < -4 && tile.is_land(&tile_map) {
                tile.set_base_terrain(&mut tile_map, BaseTerrain::Desert.name(), &ruleset);
            }
        }

        let civilizations = vec![
            CivilizationPlacement::new("Greece"),
            CivilizationPlacement::new("Egypt")
                .with_start_biases([StartBias::Prefer("Desert".to_owned())]),
            CivilizationPlacement::new("Rome"),
        ];
        let mut randomness = MapRandomness::new(8);
        let starting_tiles = tile_map
            .choose_civilization_starting_tiles(&civilizations, &ruleset, &mut randomness)
            .unwrap();

        let order: Vec<&str> = starting_tiles
            .tiles
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(vec!["Rome", "Egypt", "Greece"], order);
        assert_eq!(Some(preset), starting_tiles.tile_of("Rome"));
        let egypt = starting_tiles.tile_of("Egypt").unwrap();
        assert!(egypt.base_terrain_is(&tile_map, BaseTerrain::Desert));
    }

    #[test]
    fn unsatisfiable_bias_falls_back_to_any_tile() {
        let ruleset = Ruleset::default();
        let tile_map = island_map(10, 6, &ruleset);
        let civilizations = vec![
            CivilizationPlacement::new("Russia")
                .with_start_biases([StartBias::Prefer("Tundra".to_owned())]),
        ];
        let mut randomness = MapRandomness::new(1);

        let starting_tiles = tile_map
            .choose_civilization_starting_tiles(&civilizations, &ruleset, &mut randomness)
            .unwrap();
        assert!(starting_tiles.tiles[0].1.is_land(&tile_map));
    }

    #[test]
    fn too_many_civilizations_is_an_error() {
        let ruleset = Ruleset::default();
        let tile_map = island_map(8, 3, &ruleset);
        let mut randomness = MapRandomness::new(5);

        let error = tile_map
            .choose_civilization_starting_tiles(&civilizations(38), &ruleset, &mut randomness)
            .unwrap_err();
        assert!(matches!(
            error,
            MapGenerationError::CannotGenerateStartingTiles {
                civilization_num: 38,
                viable_land_tile_num: 37,
            }
        ));
    }
}
