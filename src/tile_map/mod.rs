//! This module defines the [`TileMap`] struct and its associated methods.
//! It provides the storage of every tile attribute and the grid queries the generation stages share.
//! Its method contains 2 parts:
//! 1. The common methods for map generation, included in the `mod.rs` file.
//! 2. The map generating methods are defined in the [`impls`] module ( which is the submodule of this module).

use std::collections::{HashMap, HashSet};

use arrayvec::ArrayVec;

use crate::{
    grid::{Hex, HexGrid},
    map_parameters::MapParameters,
    tile::Tile,
    tile_component::{BaseTerrain, TerrainType},
};

mod impls;
pub mod river_edge;

pub use impls::{StartingTiles, elliptic_falloff};
use river_edge::{RiverEdgeCoordinate, RiverEdgeCorner};

#[derive(PartialEq, Clone, Debug)]
pub struct TileMap {
    /// World grid of the map.
    pub world_grid: HexGrid,
    /// Hex coordinate of each tile. The index of the hex is equal to [`Tile::index()`].
    pub position_list: Vec<Hex>,
    /// Look-up from a canonical hex coordinate to its tile.
    tile_by_position: HashMap<Hex, Tile>,
    /// Neighbors of each tile. The index of the neighbors is equal to [`Tile::index()`].
    pub neighbor_list: Vec<ArrayVec<Tile, 6>>,
    /// The largest absolute latitude of any tile, at least `1.0`.
    pub max_latitude: f64,
    /// Terrain type of each tile, derived from its base terrain. The index of the terrain type is equal to [`Tile::index()`].
    pub terrain_type_list: Vec<TerrainType>,
    /// Base terrain name of each tile. The index of the base terrain is equal to [`Tile::index()`].
    pub base_terrain_list: Vec<String>,
    /// Terrain features of each tile, in the order they were added. The index of the features is equal to [`Tile::index()`].
    pub terrain_feature_list: Vec<Vec<String>>,
    /// Natural wonder of each tile. The index of the natural wonder is equal to [`Tile::index()`].
    pub natural_wonder_list: Vec<Option<String>>,
    /// Resource of each tile. The index of the resource is equal to [`Tile::index()`].
    pub resource_list: Vec<Option<String>>,
    /// Improvement of each tile. The index of the improvement is equal to [`Tile::index()`].
    pub improvement_list: Vec<Option<String>>,
    /// River corners owned by each tile. The index of the corners is equal to [`Tile::index()`].
    river_edge_list: Vec<ArrayVec<RiverEdgeCorner, 2>>,
}

impl TileMap {
    /// Creates a map where every tile is ocean, with the grid described by `map_parameters`.
    pub fn new(map_parameters: &MapParameters) -> Self {
        let world_grid = HexGrid::new(
            map_parameters.shape,
            map_parameters.map_size,
            map_parameters.world_wrap,
        );

        let position_list = world_grid.hexes();
        let size = position_list.len();

        let tile_by_position: HashMap<Hex, Tile> = position_list
            .iter()
            .enumerate()
            .map(|(index, &hex)| (hex, Tile::new(index)))
            .collect();

        let neighbor_list = position_list
            .iter()
            .map(|&hex| {
                world_grid
                    .neighbors(hex)
                    .into_iter()
                    .map(|neighbor| tile_by_position[&neighbor])
                    .collect()
            })
            .collect();

        let max_latitude = position_list
            .iter()
            .map(|&hex| world_grid.latitude(hex).abs())
            .max()
            .filter(|&latitude| latitude > 0)
            .unwrap_or(1) as f64;

        Self {
            world_grid,
            position_list,
            tile_by_position,
            neighbor_list,
            max_latitude,
            terrain_type_list: vec![TerrainType::Water; size],
            base_terrain_list: vec![BaseTerrain::Ocean.name().to_owned(); size],
            terrain_feature_list: vec![Vec::new(); size],
            natural_wonder_list: vec![None; size],
            resource_list: vec![None; size],
            improvement_list: vec![None; size],
            river_edge_list: vec![ArrayVec::new(); size],
        }
    }

    /// Returns an iterator over all tiles in the map.
    #[must_use = "iterators are lazy and do nothing unless consumed"]
    pub fn all_tiles(&self) -> impl Iterator<Item = Tile> + use<> {
        (0..self.position_list.len()).map(Tile::new)
    }

    /// Returns the number of tiles in the map.
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.position_list.len()
    }

    /// Returns the tile at `hex`, or `None` if the hex is outside the map.
    ///
    /// On a wrapping map, hexes beyond the seam address the tile they wrap onto.
    pub fn tile_at(&self, hex: Hex) -> Option<Tile> {
        self.world_grid
            .normalize(hex)
            .and_then(|hex| self.tile_by_position.get(&hex).copied())
    }

    /// Returns the tiles within `distance` steps of `center`, including `center`. Each tile is listed once.
    pub fn tiles_in_distance(&self, center: Tile, distance: u32) -> Vec<Tile> {
        let mut seen = HashSet::new();
        center
            .position(self)
            .hexes_in_distance(distance)
            .into_iter()
            .filter_map(|hex| self.tile_at(hex))
            .filter(|tile| seen.insert(*tile))
            .collect()
    }

    pub fn distance(&self, a: Tile, b: Tile) -> u32 {
        a.distance_to(b, self)
    }

    /// See [`HexGrid::characteristic_radius`].
    pub fn characteristic_radius(&self) -> u32 {
        self.world_grid.characteristic_radius()
    }

    /// Returns how many steps `tile` is away from the outer edge of the map.
    pub fn distance_to_edge(&self, tile: Tile) -> u32 {
        self.world_grid.distance_to_edge(tile.position(self))
    }

    /// Resets every tile to plain ocean without features, resource, improvement or river.
    pub fn fill_with_ocean(&mut self) {
        let size = self.tile_count();
        self.terrain_type_list = vec![TerrainType::Water; size];
        self.base_terrain_list = vec![BaseTerrain::Ocean.name().to_owned(); size];
        self.terrain_feature_list = vec![Vec::new(); size];
        self.natural_wonder_list = vec![None; size];
        self.resource_list = vec![None; size];
        self.improvement_list = vec![None; size];
        self.river_edge_list = vec![ArrayVec::new(); size];
    }

    /// Adds a river along `edge`, returns `false` if the tile owning the edge is not in the map.
    pub fn add_river_edge(&mut self, edge: RiverEdgeCoordinate) -> bool {
        let Some(tile) = self.tile_at(edge.position) else {
            return false;
        };
        let corners = &mut self.river_edge_list[tile.index()];
        if !corners.contains(&edge.corner) {
            corners.push(edge.corner);
        }
        true
    }

    pub fn has_river_edge(&self, edge: RiverEdgeCoordinate) -> bool {
        self.tile_at(edge.position)
            .is_some_and(|tile| self.river_edge_list[tile.index()].contains(&edge.corner))
    }

    /// Returns every river edge of the map, ordered by owning tile.
    pub fn river_edges(&self) -> impl Iterator<Item = RiverEdgeCoordinate> + '_ {
        self.river_edge_list
            .iter()
            .enumerate()
            .flat_map(move |(index, corners)| {
                corners
                    .iter()
                    .map(move |&corner| RiverEdgeCoordinate::new(self.position_list[index], corner))
            })
    }

    /// Returns the edges adjacent to `edge` whose owning tile exists in the map, in canonical coordinates.
    pub fn adjacent_river_edges(&self, edge: RiverEdgeCoordinate) -> ArrayVec<RiverEdgeCoordinate, 3> {
        edge.adjacent_edges()
            .into_iter()
            .filter_map(|adjacent| {
                self.tile_at(adjacent.position)
                    .map(|tile| RiverEdgeCoordinate::new(tile.position(self), adjacent.corner))
            })
            .collect()
    }
}
