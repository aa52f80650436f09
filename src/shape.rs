//! Sides of a square cell and the sets of sides a pipe opens through.

use std::fmt::{Debug, Formatter};

use strum::VariantArray;

use crate::location::Location;

/// The four sides of a square cell, listed clockwise from the top.
///
/// The discriminants double as bit positions in [`Openings`] and as quarter-turn counts from [`Top`](Direction::Top),
/// so rotating a direction clockwise is addition modulo 4.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Direction {
    /// Towards row 0.
    Top = 0,
    /// Towards higher columns.
    Right = 1,
    /// Towards higher rows.
    Bottom = 2,
    /// Towards column 0.
    Left = 3,
}

/// The axis a [`Direction`] moves along.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Axis {
    /// Left and right.
    Horizontal,
    /// Top and bottom.
    Vertical,
}

impl Direction {
    /// The "forward" directions; stepping in one of these from a cell reaches a cell indexed higher in row-major order.
    ///
    /// Visiting every cell and stepping only forward touches each pair of neighbors exactly once.
    pub const FORWARD_VARIANTS: &'static [Self] = &[Self::Right, Self::Bottom];

    /// Unit `(dx, dy)` offset of one step in this direction.
    pub const fn delta(&self) -> (isize, isize) {
        match self {
            Self::Top => (0, -1),
            Self::Right => (1, 0),
            Self::Bottom => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    /// Step from `location` in this direction.
    pub fn attempt_from(&self, location: Location) -> Location {
        location.offset_by(self.delta())
    }

    /// The opposite side.
    pub const fn invert(&self) -> Self {
        self.rotated(2)
    }

    /// This direction turned clockwise by `quarter_turns` right angles.
    pub const fn rotated(&self, quarter_turns: u8) -> Self {
        match (*self as u8 + quarter_turns % 4) % 4 {
            0 => Self::Top,
            1 => Self::Right,
            2 => Self::Bottom,
            _ => Self::Left,
        }
    }

    /// The axis this direction moves along.
    pub const fn axis(&self) -> Axis {
        match self {
            Self::Top | Self::Bottom => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    /// Determine the direction from `a` to `b`, or [`None`] if they are not orthogonal neighbors.
    pub fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }

    const fn bit(&self) -> u8 {
        1 << (*self as u8)
    }
}

/// The set of sides through which an oriented pipe connects.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Openings(u8);

impl Openings {
    /// Closed on every side.
    pub const NONE: Self = Self(0);
    /// Open on every side.
    pub const ALL: Self = Self(0b1111);

    /// The set holding exactly `directions`.
    pub const fn of(directions: &[Direction]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < directions.len() {
            bits |= directions[i].bit();
            i += 1;
        }

        Self(bits)
    }

    /// Whether this set opens towards `direction`.
    pub const fn contains(&self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Turn every opening clockwise by `quarter_turns` right angles.
    pub const fn rotated(&self, quarter_turns: u8) -> Self {
        let k = quarter_turns % 4;
        Self(((self.0 << k) | (self.0 >> (4 - k))) & Self::ALL.0)
    }

    /// The open sides, clockwise from the top.
    pub fn iter(&self) -> impl Iterator<Item=Direction> {
        let openings = *self;
        Direction::VARIANTS.iter().copied().filter(move |dir| openings.contains(*dir))
    }
}

impl Debug for Openings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
