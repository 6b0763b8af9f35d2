use rand::Rng;
use tracing::debug;

use crate::{
    map_parameters::MapParameters,
    randomness::MapRandomness,
    ruleset::Ruleset,
    tile::Tile,
    tile_component::BaseTerrain,
    tile_map::TileMap,
};

impl TileMap {
    /// The largest connected water body that becomes a lake.
    pub const MAX_LAKE_SIZE: usize = 10;

    /// Turns small water bodies into lakes, then turns ocean near land into coast.
    ///
    /// - Every connected water component of at most [`TileMap::MAX_LAKE_SIZE`] tiles becomes lakes.
    /// - Every ocean tile draws a coast length in `[1, max(1, max_coast_extension)]` and becomes coast
    ///   if any land tile is within that many steps.
    pub fn spawn_lakes_and_coasts(
        &mut self,
        map_parameters: &MapParameters,
        ruleset: &Ruleset,
        randomness: &mut MapRandomness,
    ) {
        let lake_tiles: Vec<Tile> = self
            .water_components()
            .into_iter()
            .filter(|component| component.len() <= Self::MAX_LAKE_SIZE)
            .flatten()
            .collect();

        debug!(lake_tiles = lake_tiles.len(), "Spawning lakes");

        for tile in lake_tiles {
            tile.set_base_terrain(self, BaseTerrain::Lake.name(), ruleset);
        }

        let max_coast_extension = map_parameters.max_coast_extension.max(1);
        let ocean_tiles: Vec<Tile> = self
            .all_tiles()
            .filter(|tile| tile.base_terrain_is(self, BaseTerrain::Ocean))
            .collect();

        let coast_tiles: Vec<Tile> = ocean_tiles
            .into_iter()
            .filter(|&tile| {
                let coast_length = randomness.random_range(1..=max_coast_extension);
                self.tiles_in_distance(tile, coast_length)
                    .into_iter()
                    .any(|nearby| nearby.is_land(self))
            })
            .collect();

        for tile in coast_tiles {
            tile.set_base_terrain(self, BaseTerrain::Coast.name(), ruleset);
        }
    }

    /// Returns the connected components of water tiles, each found by flood fill from its lowest-index tile.
    pub fn water_components(&self) -> Vec<Vec<Tile>> {
        let mut visited = vec![false; self.tile_count()];
        let mut components = Vec::new();

        for start in self.all_tiles() {
            if visited[start.index()] || !start.is_water(self) {
                continue;
            }

            visited[start.index()] = true;
            let mut component = vec![start];
            let mut tiles_to_check = vec![start];

            while let Some(tile) = tiles_to_check.pop() {
                for neighbor in tile.neighbor_tiles(self) {
                    if !visited[neighbor.index()] && neighbor.is_water(self) {
                        visited[neighbor.index()] = true;
                        component.push(neighbor);
                        tiles_to_check.push(neighbor);
                    }
                }
            }

            components.push(component);
        }

        components
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        grid::Hex,
        map_parameters::{MapParameters, MapSize},
        randomness::MapRandomness,
        ruleset::Ruleset,
        tile_component::BaseTerrain,
        tile_map::TileMap,
    };

    /// Land everywhere except a 7-tile pond around the origin and the outer ring.
    fn pond_map(ruleset: &Ruleset) -> (MapParameters, TileMap) {
        let map_parameters = MapParameters {
            map_size: MapSize::from_radius(6),
            max_coast_extension: 1,
            ..Default::default()
        };
        let mut tile_map = TileMap::new(&map_parameters);
        for tile in tile_map.all_tiles() {
            let distance = tile.position(&tile_map).length();
            if (2..6).contains(&distance) {
                tile.set_base_terrain(&mut tile_map, BaseTerrain::Grassland.name(), ruleset);
            }
        }
        (map_parameters, tile_map)
    }

    #[test]
    fn small_water_bodies_become_lakes() {
        let ruleset = Ruleset::default();
        let (map_parameters, mut tile_map) = pond_map(&ruleset);

        let mut sizes: Vec<usize> = tile_map
            .water_components()
            .iter()
            .map(Vec::len)
            .collect();
        sizes.sort();
        assert_eq!(vec![7, 36], sizes);

        let mut randomness = MapRandomness::new(1);
        tile_map.spawn_lakes_and_coasts(&map_parameters, &ruleset, &mut randomness);

        for tile in tile_map.all_tiles() {
            let distance = tile.position(&tile_map).length();
            let base_terrain = tile.base_terrain(&tile_map);
            match distance {
                0..=1 => assert_eq!("Lakes", base_terrain),
                6 => assert_eq!("Coast", base_terrain),
                _ => assert_eq!("Grassland", base_terrain),
            }
        }
        assert!(tile_map.tile_at(Hex::ORIGIN).unwrap().is_water(&tile_map));
    }

    #[test]
    fn only_water_bodies_up_to_the_lake_size_become_lakes() {
        let ruleset = Ruleset::default();
        let map_parameters = MapParameters {
            map_size: MapSize::from_radius(8),
            max_coast_extension: 1,
            ..Default::default()
        };
        let mut tile_map = TileMap::new(&map_parameters);
        for tile in tile_map.all_tiles() {
            tile.set_base_terrain(&mut tile_map, BaseTerrain::Grassland.name(), &ruleset);
        }
        // Two straight channels, one of 10 tiles and one of 11 tiles, separated by land.
        let channel = |q_range: std::ops::RangeInclusive<i32>, r: i32, tile_map: &TileMap| {
            q_range
                .map(|q| tile_map.tile_at(Hex::new(q, r)).unwrap())
                .collect::<Vec<_>>()
        };
        let lake_channel = channel(-4..=5, -3, &tile_map);
        let sea_channel = channel(-6..=4, 3, &tile_map);
        for &tile in lake_channel.iter().chain(&sea_channel) {
            tile.set_base_terrain(&mut tile_map, BaseTerrain::Ocean.name(), &ruleset);
        }

        let mut randomness = MapRandomness::new(4);
        tile_map.spawn_lakes_and_coasts(&map_parameters, &ruleset, &mut randomness);

        assert!(lake_channel
            .iter()
            .all(|tile| tile.base_terrain_is(&tile_map, BaseTerrain::Lake)));
        assert!(sea_channel
            .iter()
            .all(|tile| tile.base_terrain_is(&tile_map, BaseTerrain::Coast)));

        for component in tile_map.water_components() {
            let is_sea = component.iter().any(|tile| {
                tile.base_terrain_is(&tile_map, BaseTerrain::Ocean)
                    || tile.base_terrain_is(&tile_map, BaseTerrain::Coast)
            });
            assert_eq!(is_sea, component.len() > TileMap::MAX_LAKE_SIZE);
        }
    }

    #[test]
    fn coast_only_reaches_as_far_as_the_extension() {
        let ruleset = Ruleset::default();
        let map_parameters = MapParameters {
            map_size: MapSize::from_radius(8),
            max_coast_extension: 2,
            ..Default::default()
        };
        let mut tile_map = TileMap::new(&map_parameters);
        let center = tile_map.tile_at(Hex::ORIGIN).unwrap();
        center.set_base_terrain(&mut tile_map, BaseTerrain::Grassland.name(), &ruleset);

        let mut randomness = MapRandomness::new(9);
        tile_map.spawn_lakes_and_coasts(&map_parameters, &ruleset, &mut randomness);

        for tile in tile_map.all_tiles() {
            let distance = tile.distance_to(center, &tile_map);
            match distance {
                0 => assert!(tile.is_land(&tile_map)),
                1 => assert!(tile.base_terrain_is(&tile_map, BaseTerrain::Coast)),
                2 => assert!(!tile.base_terrain_is(&tile_map, BaseTerrain::Lake)),
                _ => assert!(tile.base_terrain_is(&tile_map, BaseTerrain::Ocean)),
            }
        }
    }
}
