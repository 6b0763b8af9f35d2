pub mod direction;
pub mod hex_grid;
pub mod offset_coordinate;

pub use direction::Direction;
pub use hex_grid::{
    HexGrid,
    hex::{Hex, HexLayout},
};
pub use offset_coordinate::OffsetCoordinate;
