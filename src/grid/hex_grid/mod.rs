use arrayvec::ArrayVec;
use glam::DVec2;
use hex::{Hex, HexLayout};
use tracing::warn;

use crate::{
    grid::offset_coordinate::OffsetCoordinate,
    map_parameters::{MapShape, MapSize},
};

pub mod hex;

/// The cell set of a map: which hexes exist, how they neighbor each other and where they sit in world space.
///
/// A [`MapShape::Hexagonal`] grid contains every hex within `radius` of the origin.
/// A [`MapShape::Rectangular`] grid contains `width * height` hexes laid out in offset space,
/// with columns and rows centred on the origin. Only rectangular grids can wrap; their columns wrap around.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HexGrid {
    pub shape: MapShape,
    pub size: MapSize,
    pub layout: HexLayout,
    world_wrap: bool,
}

impl HexGrid {
    /// The layout used for world-space positions. Neighbor centers are `sqrt(3)` apart.
    pub const LAYOUT: HexLayout = HexLayout::new(DVec2::ONE, DVec2::ZERO);

    pub fn new(shape: MapShape, size: MapSize, world_wrap: bool) -> Self {
        let world_wrap = match shape {
            MapShape::Hexagonal if world_wrap => {
                warn!("World wrap is only supported on rectangular maps, the hexagonal map keeps hard edges.");
                false
            }
            _ => world_wrap,
        };

        // Offset rows shift with the column parity, so a seam only lines up after an even number of columns.
        let size = if world_wrap && size.width % 2 == 1 {
            warn!(
                width = size.width,
                "Wrapping maps need an even width, adding one column"
            );
            MapSize {
                width: size.width + 1,
                ..size
            }
        } else {
            size
        };

        Self {
            shape,
            size,
            layout: Self::LAYOUT,
            world_wrap,
        }
    }

    #[inline]
    pub fn wrap_x(&self) -> bool {
        self.world_wrap
    }

    /// Returns every hex of the grid, in a fixed order.
    ///
    /// Hexagonal grids are listed ring by ring from the origin, rectangular grids row by row.
    pub fn hexes(&self) -> Vec<Hex> {
        match self.shape {
            MapShape::Hexagonal => {
                let radius = self.size.radius;
                let mut hex_list = Vec::with_capacity((3 * radius * (radius + 1) + 1) as usize);
                hex_list.push(Hex::ORIGIN);
                for distance in 1..=radius {
                    hex_list.extend(Hex::ORIGIN.hexes_at_distance(distance));
                }
                hex_list
            }
            MapShape::Rectangular => {
                let (min_col, min_row) = self.min_offset();
                let (width, height) = (self.size.width as i32, self.size.height as i32);
                (min_row..min_row + height)
                    .flat_map(|row| {
                        (min_col..min_col + width).map(move |col| {
                            Hex::from_offset(OffsetCoordinate::new(col, row))
                        })
                    })
                    .collect()
            }
        }
    }

    /// Maps `hex` onto the canonical coordinate of a grid cell.
    ///
    /// Returns `None` if the hex lies outside the grid. On a wrapping grid, hexes beyond the
    /// left or right edge are folded back into the column range.
    pub fn normalize(&self, hex: Hex) -> Option<Hex> {
        match self.shape {
            MapShape::Hexagonal => (hex.length() <= self.size.radius as i32).then_some(hex),
            MapShape::Rectangular => {
                let [col, row] = self.hex_to_offset(hex).to_array();
                let (min_col, min_row) = self.min_offset();
                let (width, height) = (self.size.width as i32, self.size.height as i32);

                if row < min_row || row >= min_row + height {
                    return None;
                }

                if (min_col..min_col + width).contains(&col) {
                    Some(hex)
                } else if self.wrap_x() {
                    let col = (col - min_col).rem_euclid(width) + min_col;
                    Some(self.offset_to_hex(OffsetCoordinate::new(col, row)))
                } else {
                    None
                }
            }
        }
    }

    /// Returns the canonical coordinates of the existing neighbors of `hex`.
    pub fn neighbors(&self, hex: Hex) -> ArrayVec<Hex, 6> {
        hex.neighbors()
            .into_iter()
            .filter_map(|neighbor| self.normalize(neighbor))
            .filter(|&neighbor| neighbor != hex)
            .collect()
    }

    /// Returns the number of steps between two cells of the grid, going across the seam if the grid wraps.
    pub fn distance(&self, start: Hex, dest: Hex) -> u32 {
        let direct = start.distance_to(dest);
        if !self.wrap_x() {
            return direct as u32;
        }

        let width = self.size.width as i32;
        let [dest_col, dest_row] = self.hex_to_offset(dest).to_array();
        [-width, width]
            .into_iter()
            .map(|shift| {
                let shifted = self.offset_to_hex(OffsetCoordinate::new(dest_col + shift, dest_row));
                start.distance_to(shifted)
            })
            .fold(direct, i32::min) as u32
    }

    /// Returns how many steps `hex` is away from the outer edge of the grid.
    ///
    /// Radius-based grids measure it from the geometric center. A wrapping grid has no left or right edge.
    pub fn distance_to_edge(&self, hex: Hex) -> u32 {
        match self.shape {
            MapShape::Hexagonal => (self.size.radius as i32 - hex.length()).max(0) as u32,
            MapShape::Rectangular => {
                let [col, row] = self.hex_to_offset(hex).to_array();
                let (min_col, min_row) = self.min_offset();
                let max_col = min_col + self.size.width as i32 - 1;
                let max_row = min_row + self.size.height as i32 - 1;

                let row_margin = (row - min_row).min(max_row - row);
                let margin = if self.wrap_x() {
                    row_margin
                } else {
                    row_margin.min(col - min_col).min(max_col - col)
                };
                margin.max(0) as u32
            }
        }
    }

    /// The radius of the map, or for rectangular maps the radius of a hexagonal map with about the same tile count.
    pub fn characteristic_radius(&self) -> u32 {
        match self.shape {
            MapShape::Hexagonal => self.size.radius,
            MapShape::Rectangular => {
                MapSize::hexagonal_radius_for_area(self.size.width * self.size.height)
            }
        }
    }

    /// Returns the world-space position of `hex`, the plane in which coherent noise is sampled.
    pub fn world_position(&self, hex: Hex) -> DVec2 {
        self.layout.hex_to_world(hex)
    }

    /// Returns the latitude of `hex`: `0` on the equator row, positive to the north.
    pub fn latitude(&self, hex: Hex) -> i32 {
        hex.to_doubled_coordinate().y
    }

    fn hex_to_offset(&self, hex: Hex) -> OffsetCoordinate {
        hex.to_offset()
    }

    fn offset_to_hex(&self, offset_coordinate: OffsetCoordinate) -> Hex {
        Hex::from_offset(offset_coordinate)
    }

    fn min_offset(&self) -> (i32, i32) {
        (
            -(self.size.width as i32 / 2),
            -(self.size.height as i32 / 2),
        )
    }
}
