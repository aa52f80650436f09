use std::num::NonZero;

use ndarray::Ix;

/// One coordinate of a [`Location`]; signed so anchors can sit at -1.
pub type Coord = isize;
/// Side length of a square board.
pub type Dimension = NonZero<usize>;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(x, y)` on or around a board. The top left cell is `Location(0, 0)`.
///
/// Coordinates may fall one step outside the board; anchors live there.
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// This location moved by `(dx, dy)`.
    pub fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0 + rhs.0, self.1 + rhs.1)
    }

    /// Whether this location is a cell of an `size`×`size` board.
    pub fn is_within(&self, size: Dimension) -> bool {
        let range = 0..size.get() as Coord;
        range.contains(&self.0) && range.contains(&self.1)
    }

    /// The `(row, column)` array index of this location, if it lies on the board.
    pub(crate) fn as_index(&self, size: Dimension) -> Option<(Ix, Ix)> {
        self.is_within(size).then(|| (self.1 as Ix, self.0 as Ix))
    }

    /// Reflect this location through the centre of an `size`×`size` board.
    pub fn mirror(&self, size: Dimension) -> Self {
        let max = size.get() as Coord - 1;
        Self(max - self.0, max - self.1)
    }

    /// The nearest cell of the board; locations already on the board are returned unchanged.
    pub fn clamp_into(&self, size: Dimension) -> Self {
        let max = size.get() as Coord - 1;
        Self(self.0.clamp(0, max), self.1.clamp(0, max))
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1 as Coord, value.0 as Coord)
    }
}
