use std::{
    cmp::{max, min},
    ops::{Add, Sub},
};

use glam::{DMat2, DVec2, IVec2};

use crate::grid::{direction::Direction, offset_coordinate::OffsetCoordinate};

pub const SQRT_3: f64 = 1.732_050_807_568_877_2_f64;

/// An axial hexagonal coordinate. The implicit third cube component is `z = -x - y`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Hex(IVec2);

impl Hex {
    /// Hexagon neighbor coordinates array, following [`Hex::EDGE_DIRECTIONS`] order
    pub const HEX_DIRECTIONS: [Self; 6] = [
        Self::new(1, 0),
        Self::new(1, -1),
        Self::new(0, -1),
        Self::new(-1, 0),
        Self::new(-1, 1),
        Self::new(0, 1),
    ];

    /// The directions of the edges of a flat-topped `Hex` relative to its center.
    ///
    /// ```txt
    ///                 ________
    ///                /        \
    ///               /          \
    ///      ________/     5      \________
    ///     /        \   North    /        \
    ///    /    4     \          /    0     \
    ///   /  NorthWest \________/ NorthEast  \
    ///   \            /        \            /
    ///    \          /          \          /
    ///     \________/   Hex-A    \________/
    ///     /        \            /        \
    ///    /    3     \          /    1     \
    ///   /  SouthWest \________/ SouthEast  \
    ///   \            /        \            /
    ///    \          /    2     \          /
    ///     \________/   South    \________/
    ///              \            /
    ///               \          /
    ///                \________/
    /// ```
    pub const EDGE_DIRECTIONS: [Direction; 6] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::NorthWest,
        Direction::North,
    ];

    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self(IVec2::new(x, y))
    }

    /// Creates a new [`Hex`] from an even-q [`OffsetCoordinate`], where odd columns sit half a row lower.
    pub const fn from_offset(offset_coordinate: OffsetCoordinate) -> Self {
        let [col, row] = offset_coordinate.to_array();
        Hex::new(col, row - (col + (col & 1)) / 2)
    }

    pub const fn x(self) -> i32 {
        self.0.x
    }

    pub const fn y(self) -> i32 {
        self.0.y
    }

    pub const fn z(self) -> i32 {
        -self.0.x - self.0.y
    }

    pub const fn into_inner(self) -> IVec2 {
        self.0
    }

    /// Returns the even-q [`OffsetCoordinate`] of `self`.
    pub fn to_offset(self) -> OffsetCoordinate {
        OffsetCoordinate::new(self.0.x, self.0.y + (self.0.x + (self.0.x & 1)) / 2)
    }

    /// Returns the doubled coordinate of `self`.
    ///
    /// The second component is the doubled row, which grows by 2 for every step north
    /// and by 1 for every step north-east or north-west.
    pub fn to_doubled_coordinate(self) -> IVec2 {
        IVec2::new(self.0.x, 2 * self.0.y + self.0.x)
    }

    /// Get the hex at the given `direction` from `self`.
    pub fn neighbor(self, direction: Direction) -> Hex {
        self + Self::HEX_DIRECTIONS[Self::edge_index(direction)]
    }

    /// Get the index of `direction` in [`Hex::EDGE_DIRECTIONS`] and [`Hex::HEX_DIRECTIONS`].
    #[inline]
    pub const fn edge_index(direction: Direction) -> usize {
        match direction {
            Direction::NorthEast => 0,
            Direction::SouthEast => 1,
            Direction::South => 2,
            Direction::SouthWest => 3,
            Direction::NorthWest => 4,
            Direction::North => 5,
        }
    }

    /// Returns the 6 hexes adjacent to `self`, in [`Hex::HEX_DIRECTIONS`] order.
    pub fn neighbors(self) -> [Hex; 6] {
        Self::HEX_DIRECTIONS.map(|direction| self + direction)
    }

    #[inline]
    /// Computes coordinates length as a signed integer.
    /// The length of a [`Hex`] coordinate is equal to its distance from the origin.
    pub const fn length(self) -> i32 {
        (self.0.x.abs() + self.0.y.abs() + self.z().abs()) / 2
    }

    #[inline]
    /// Computes the distance from `self` to `rhs` in hexagonal space as a signed integer.
    pub fn distance_to(self, rhs: Self) -> i32 {
        (self - rhs).length()
    }

    /// Return a [`Vec<Hex>`] containing all [`Hex`] which are exactly at a given `distance` from `self`.
    /// If `distance` = 0 the [`Vec<Hex>`] will be empty. \
    /// The number of returned hexes is equal to `6 * distance`.
    pub fn hexes_at_distance(self, distance: u32) -> Vec<Hex> {
        if distance == 0 {
            return Vec::new();
        }

        let mut hex_list = Vec::with_capacity((6 * distance) as usize);
        let radius = distance as i32;

        // Walk the ring, starting from the corner reached by going `radius` steps along direction 4.
        let mut hex = Hex(self.0 + Self::HEX_DIRECTIONS[4].0 * radius);
        for hex_direction in Self::HEX_DIRECTIONS {
            for _ in 0..radius {
                hex_list.push(hex);
                hex = hex + hex_direction;
            }
        }

        hex_list
    }

    /// Return a [`Vec<Hex>`] containing all [`Hex`] around `self` in a given `distance`, including `self`. \
    /// The number of returned hexes is equal to `3 * distance * (distance + 1) + 1`.
    pub fn hexes_in_distance(self, distance: u32) -> Vec<Hex> {
        let mut hex_list = Vec::with_capacity((3 * distance * (distance + 1) + 1) as usize);
        let radius = distance as i32;
        for q in -radius..=radius {
            for r in max(-radius, -q - radius)..=min(radius, -q + radius) {
                hex_list.push(self + Hex::new(q, r));
            }
        }
        hex_list
    }
}

impl Add for Hex {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Hex {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl From<[i32; 2]> for Hex {
    #[inline]
    fn from(a: [i32; 2]) -> Self {
        Self(a.into())
    }
}

/// Maps flat-topped hexes to a continuous 2D plane.
///
/// The generator samples its coherent noise at these positions, so the layout has to stay fixed
/// for a given map to be reproducible.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct HexLayout {
    pub size: DVec2,
    pub origin: DVec2,
}

impl HexLayout {
    /// Matrix used to compute hexagonal coordinates to world coordinates
    const FORWARD_MATRIX: DMat2 = DMat2::from_cols_array(&[3.0 / 2.0, SQRT_3 / 2.0, 0.0, SQRT_3]);

    pub const fn new(size: DVec2, origin: DVec2) -> Self {
        Self { size, origin }
    }

    pub fn hex_to_world(self, hex: Hex) -> DVec2 {
        Self::FORWARD_MATRIX * hex.0.as_dvec2() * self.size + self.origin
    }
}
