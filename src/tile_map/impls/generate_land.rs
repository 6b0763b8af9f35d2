use glam::DVec2;

use crate::{
    ruleset::Ruleset,
    tile_component::BaseTerrain,
    tile_map::TileMap,
};

impl TileMap {
    /// Splits the map into land and water.
    ///
    /// `elevation` is called once per tile with the world-space position of the tile and its position relative
    /// to the extent of the map (each axis in `[-1, 1]`). Tiles whose elevation is above `water_threshold`
    /// become grassland, the others ocean. Features, resources and improvements are cleared.
    pub fn generate_land_from_elevation<F>(
        &mut self,
        water_threshold: f64,
        ruleset: &Ruleset,
        mut elevation: F,
    ) where
        F: FnMut(DVec2, DVec2) -> f64,
    {
        let world_positions: Vec<DVec2> = self
            .all_tiles()
            .map(|tile| tile.world_position(self))
            .collect();
        let extent = world_positions
            .iter()
            .fold(DVec2::ZERO, |extent, position| extent.max(position.abs()))
            .max(DVec2::ONE);

        let elevation_list: Vec<f64> = world_positions
            .iter()
            .map(|&position| elevation(position, position / extent))
            .collect();

        self.fill_with_ocean();
        for tile in self.all_tiles() {
            if elevation_list[tile.index()] > water_threshold {
                tile.set_base_terrain(self, BaseTerrain::Grassland.name(), ruleset);
            }
        }
    }
}

/// Returns `1.0` at `center`, `0.0` at about 70% of the way to the ellipse with half-axes `radii`,
/// and falls to `-1.0` at the ellipse and beyond.
pub fn elliptic_falloff(position: DVec2, center: DVec2, radii: DVec2) -> f64 {
    let distance = ((position - center) / radii).length();
    (1.0 - 2.0 * distance * distance).max(-1.0)
}
