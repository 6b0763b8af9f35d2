use glam::IVec2;

/// A coordinate in the offset coordinate system.
///
/// Rectangular maps are defined in offset space: `x` is the column and `y` is the row.
/// The map centres its columns and rows on the origin, so both components can be negative.
///
/// When the map wraps horizontally a column has multiple representations, e.g. `(0, 0) ≡ (width, 0)`.
/// The grid normalizes columns back into its column range before looking up tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetCoordinate(pub IVec2);

impl OffsetCoordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self(IVec2::new(x, y))
    }

    pub const fn into_inner(self) -> IVec2 {
        self.0
    }

    pub const fn to_array(self) -> [i32; 2] {
        [self.0.x, self.0.y]
    }
}
