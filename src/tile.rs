use glam::DVec2;
use tracing::warn;

use crate::{
    error::RulesetError,
    grid::Hex,
    ruleset::{Ruleset, terrain::Terrain, tile_resource::TileResource},
    tile_component::{BaseTerrain, Feature, TerrainType},
    tile_map::TileMap,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// `Tile` represents a tile on the map, where the `usize` is the index of the current tile.
///
/// All tile data lives in the [`TileMap`], `Tile` is only the handle used to read and write it.
pub struct Tile(usize);

impl Tile {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the index of the tile.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0
    }

    /// Returns the hex coordinate of the tile.
    #[inline]
    pub fn position(&self, tile_map: &TileMap) -> Hex {
        tile_map.position_list[self.0]
    }

    /// Returns the position of the tile in the plane where coherent noise is sampled.
    pub fn world_position(&self, tile_map: &TileMap) -> DVec2 {
        tile_map.world_grid.world_position(self.position(tile_map))
    }

    /// Returns the latitude of the tile.
    ///
    /// The latitude is `0.0` on the equator row and its absolute value grows towards the poles,
    /// up to [`TileMap::max_latitude`].
    pub fn latitude(&self, tile_map: &TileMap) -> f64 {
        tile_map.world_grid.latitude(self.position(tile_map)) as f64
    }

    /// Returns the name of the base terrain of the tile.
    #[inline]
    pub fn base_terrain<'a>(&self, tile_map: &'a TileMap) -> &'a str {
        &tile_map.base_terrain_list[self.0]
    }

    /// Returns the ruleset definition of the base terrain of the tile.
    pub fn base_terrain_info<'a>(
        &self,
        tile_map: &TileMap,
        ruleset: &'a Ruleset,
    ) -> Result<&'a Terrain, RulesetError> {
        ruleset.terrain(self.base_terrain(tile_map))
    }

    /// Returns the terrain type of the base terrain. It is kept in sync by [`Tile::set_base_terrain`].
    #[inline]
    pub fn terrain_type(&self, tile_map: &TileMap) -> TerrainType {
        tile_map.terrain_type_list[self.0]
    }

    pub fn is_water(&self, tile_map: &TileMap) -> bool {
        self.terrain_type(tile_map) == TerrainType::Water
    }

    pub fn is_land(&self, tile_map: &TileMap) -> bool {
        self.terrain_type(tile_map) == TerrainType::Land
    }

    pub fn base_terrain_is(&self, tile_map: &TileMap, base_terrain: BaseTerrain) -> bool {
        self.base_terrain(tile_map) == base_terrain.name()
    }

    pub fn is_mountain(&self, tile_map: &TileMap) -> bool {
        self.base_terrain_is(tile_map, BaseTerrain::Mountain)
    }

    pub fn is_hill(&self, tile_map: &TileMap) -> bool {
        self.has_feature(tile_map, Feature::Hill.name())
    }

    /// Returns the terrain features of the tile, in the order they were added.
    #[inline]
    pub fn terrain_features<'a>(&self, tile_map: &'a TileMap) -> &'a [String] {
        &tile_map.terrain_feature_list[self.0]
    }

    pub fn has_feature(&self, tile_map: &TileMap, feature: &str) -> bool {
        self.terrain_features(tile_map).iter().any(|x| x == feature)
    }

    #[inline]
    pub fn natural_wonder<'a>(&self, tile_map: &'a TileMap) -> Option<&'a str> {
        tile_map.natural_wonder_list[self.0].as_deref()
    }

    /// Returns the terrain on top of the tile: the most recently added feature,
    /// else the natural wonder, else the base terrain.
    pub fn last_terrain<'a>(&self, tile_map: &'a TileMap) -> &'a str {
        self.terrain_features(tile_map)
            .last()
            .map(String::as_str)
            .or_else(|| self.natural_wonder(tile_map))
            .unwrap_or_else(|| self.base_terrain(tile_map))
    }

    /// Whether units cannot enter the tile, decided by the terrain on top of it.
    ///
    /// A terrain unknown to the ruleset counts as passable.
    pub fn is_impassable(&self, tile_map: &TileMap, ruleset: &Ruleset) -> bool {
        ruleset
            .terrain(self.last_terrain(tile_map))
            .is_ok_and(|terrain| terrain.impassable)
    }

    /// Whether the base terrain itself is impassable, ignoring features.
    pub fn is_base_terrain_impassable(&self, tile_map: &TileMap, ruleset: &Ruleset) -> bool {
        self.base_terrain_info(tile_map, ruleset)
            .is_ok_and(|terrain| terrain.impassable)
    }

    #[inline]
    pub fn resource<'a>(&self, tile_map: &'a TileMap) -> Option<&'a str> {
        tile_map.resource_list[self.0].as_deref()
    }

    /// Returns the ruleset definition of the resource, `Ok(None)` if the tile has no resource.
    pub fn resource_info<'a>(
        &self,
        tile_map: &TileMap,
        ruleset: &'a Ruleset,
    ) -> Result<Option<&'a TileResource>, RulesetError> {
        self.resource(tile_map)
            .map(|resource| ruleset.tile_resource(resource))
            .transpose()
    }

    #[inline]
    pub fn improvement<'a>(&self, tile_map: &'a TileMap) -> Option<&'a str> {
        tile_map.improvement_list[self.0].as_deref()
    }

    /// Returns an iterator over the neighboring tiles of the current tile.
    pub fn neighbor_tiles<'a>(&self, tile_map: &'a TileMap) -> impl Iterator<Item = Tile> + 'a {
        tile_map.neighbor_list[self.0].iter().copied()
    }

    /// Returns the tiles within `distance` steps of the current tile, including the current tile.
    pub fn tiles_in_distance(&self, distance: u32, tile_map: &TileMap) -> Vec<Tile> {
        tile_map.tiles_in_distance(*self, distance)
    }

    /// Returns the number of steps between the current tile and `other`.
    pub fn distance_to(&self, other: Tile, tile_map: &TileMap) -> u32 {
        tile_map
            .world_grid
            .distance(self.position(tile_map), other.position(tile_map))
    }

    /// Whether the tile is next to a coast tile.
    pub fn is_coastal(&self, tile_map: &TileMap) -> bool {
        self.neighbor_tiles(tile_map)
            .any(|neighbor| neighbor.base_terrain_is(tile_map, BaseTerrain::Coast))
    }

    /// Sets the base terrain and refreshes the terrain type derived from it.
    ///
    /// A base terrain the ruleset does not define is treated as land.
    pub fn set_base_terrain(&self, tile_map: &mut TileMap, base_terrain: &str, ruleset: &Ruleset) {
        let terrain_type = match ruleset.terrain(base_terrain) {
            Ok(terrain) => terrain.r#type,
            Err(error) => {
                warn!("{error}, treating it as land");
                TerrainType::Land
            }
        };
        tile_map.base_terrain_list[self.0] = base_terrain.to_owned();
        tile_map.terrain_type_list[self.0] = terrain_type;
    }

    /// Adds a terrain feature unless the tile already has it.
    pub fn add_feature(&self, tile_map: &mut TileMap, feature: &str) {
        if !self.has_feature(tile_map, feature) {
            tile_map.terrain_feature_list[self.0].push(feature.to_owned());
        }
    }

    pub fn remove_feature(&self, tile_map: &mut TileMap, feature: &str) {
        tile_map.terrain_feature_list[self.0].retain(|x| x != feature);
    }

    pub fn set_natural_wonder(&self, tile_map: &mut TileMap, natural_wonder: Option<&str>) {
        tile_map.natural_wonder_list[self.0] = natural_wonder.map(str::to_owned);
    }

    pub fn set_resource(&self, tile_map: &mut TileMap, resource: Option<&str>) {
        tile_map.resource_list[self.0] = resource.map(str::to_owned);
    }

    pub fn set_improvement(&self, tile_map: &mut TileMap, improvement: Option<&str>) {
        tile_map.improvement_list[self.0] = improvement.map(str::to_owned);
    }
}
