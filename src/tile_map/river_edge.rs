use crate::grid::{Direction, Hex};

/// One of the two river corners owned by a tile.
///
/// Clock positions refer to the flat-topped layout of the grid, with north at 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiverEdgeCorner {
    /// The corner at 7 o'clock.
    BottomLeft,
    /// The corner at 5 o'clock.
    BottomRight,
}

/// A node of the river network: a tile corner, addressed by the tile that owns it.
///
/// Every corner of the hex tessellation is owned by exactly one tile as its bottom-left or
/// bottom-right corner, so `(position, corner)` addresses each corner once. Rivers run along tile edges,
/// i.e. from a corner to one of its three adjacent corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RiverEdgeCoordinate {
    pub position: Hex,
    pub corner: RiverEdgeCorner,
}

impl RiverEdgeCoordinate {
    pub const fn new(position: Hex, corner: RiverEdgeCorner) -> Self {
        Self { position, corner }
    }

    /// Returns the three corners connected to `self` by a tile edge.
    ///
    /// - The bottom-left corner connects to the bottom-right corner of the same tile,
    ///   of its north-west neighbor and of its south-west neighbor.
    /// - The bottom-right corner connects to the bottom-left corner of the same tile,
    ///   of its north-east neighbor and of its south-east neighbor.
    ///
    /// The relation is symmetric. Some of the returned corners may belong to tiles outside the map,
    /// see [`crate::tile_map::TileMap::adjacent_river_edges`].
    pub fn adjacent_edges(&self) -> [RiverEdgeCoordinate; 3] {
        let position = self.position;
        match self.corner {
            RiverEdgeCorner::BottomLeft => [
                Self::new(position, RiverEdgeCorner::BottomRight),
                Self::new(
                    position.neighbor(Direction::NorthWest),
                    RiverEdgeCorner::BottomRight,
                ),
                Self::new(
                    position.neighbor(Direction::SouthWest),
                    RiverEdgeCorner::BottomRight,
                ),
            ],
            RiverEdgeCorner::BottomRight => [
                Self::new(position, RiverEdgeCorner::BottomLeft),
                Self::new(
                    position.neighbor(Direction::NorthEast),
                    RiverEdgeCorner::BottomLeft,
                ),
                Self::new(
                    position.neighbor(Direction::SouthEast),
                    RiverEdgeCorner::BottomLeft,
                ),
            ],
        }
    }
}
