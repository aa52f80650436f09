//! Pipes, their orientations, and the anchors a puzzle runs between.

use strum::{Display, EnumString, IntoStaticStr, VariantArray};

use crate::location::{Dimension, Location};
use crate::shape::{Direction, Openings};

/// Identifier of a cell, unique within one board and stable across rotations.
pub type PipeId = usize;

/// The kinds of pipe a puzzle is made of.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, VariantArray, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum PipeKind {
    /// The start anchor, open on every side.
    Start = 0,
    /// The end anchor, open on every side.
    End = 1,
    /// Opens through two opposite sides.
    Straight = 2,
    /// Opens through two adjacent sides.
    Elbow = 3,
}

impl PipeKind {
    /// Kinds that may appear on the board and turn when clicked.
    pub const ROTATABLE: &'static [Self] = &[Self::Straight, Self::Elbow];

    /// Openings at a rotation of 0°.
    pub const fn base_openings(&self) -> Openings {
        match self {
            Self::Start | Self::End => Openings::ALL,
            Self::Straight => Openings::of(&[Direction::Top, Direction::Bottom]),
            Self::Elbow => Openings::of(&[Direction::Top, Direction::Right]),
        }
    }

    /// Whether clicking turns this kind of pipe.
    pub const fn is_rotatable(&self) -> bool {
        matches!(self, Self::Straight | Self::Elbow)
    }

    /// Openings of this kind of pipe turned to `rotation`.
    pub const fn openings(&self, rotation: Rotation) -> Openings {
        CONNECTION_RULES[*self as usize][rotation as usize]
    }
}

/// Clockwise orientation of a pipe in quarter turns.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd, VariantArray)]
pub enum Rotation {
    #[default]
    /// As drawn: a straight runs top to bottom, an elbow joins top and right.
    Deg0 = 0,
    /// One quarter turn.
    Deg90 = 1,
    /// Two quarter turns.
    Deg180 = 2,
    /// Three quarter turns.
    Deg270 = 3,
}

impl Rotation {
    /// Normalise an angle in degrees, modulo 360.
    ///
    /// Angles that are not a multiple of 90° have no orientation and fall back to [`Deg0`](Rotation::Deg0).
    pub const fn from_degrees(degrees: i64) -> Self {
        match degrees.rem_euclid(360) {
            90 => Self::Deg90,
            180 => Self::Deg180,
            270 => Self::Deg270,
            _ => Self::Deg0,
        }
    }

    /// This orientation in degrees clockwise: 0, 90, 180 or 270.
    pub const fn degrees(&self) -> u16 {
        *self as u16 * 90
    }

    /// The next orientation clockwise, wrapping from 270° to 0°.
    pub const fn next(&self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }
}

const fn build_rules() -> [[Openings; 4]; 4] {
    let kinds = [PipeKind::Start, PipeKind::End, PipeKind::Straight, PipeKind::Elbow];
    let mut rules = [[Openings::NONE; 4]; 4];

    let mut k = 0;
    while k < kinds.len() {
        let base = kinds[k].base_openings();
        let mut turns = 0;
        while turns < 4 {
            rules[k][turns] = base.rotated(turns as u8);
            turns += 1;
        }
        k += 1;
    }

    rules
}

/// Openings per `[kind][rotation]`, derived from each kind's 0° openings.
const CONNECTION_RULES: [[Openings; 4]; 4] = build_rules();

/// One cell of a board.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Pipe {
    id: PipeId,
    kind: PipeKind,
    location: Location,
    pub(crate) rotation: Rotation,
}

impl Pipe {
    pub(crate) fn new(id: PipeId, kind: PipeKind, location: Location, rotation: Rotation) -> Self {
        Self { id, kind, location, rotation }
    }

    /// Row-major index of this cell, unique within its board.
    pub fn id(&self) -> PipeId {
        self.id
    }

    /// [`Straight`](PipeKind::Straight) or [`Elbow`](PipeKind::Elbow).
    pub fn kind(&self) -> PipeKind {
        self.kind
    }

    /// Where this cell sits; fixed for the life of the board.
    pub fn location(&self) -> Location {
        self.location
    }

    /// The current orientation; the only thing about a pipe that changes during play.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// The sides this pipe currently connects through.
    pub fn openings(&self) -> Openings {
        self.kind.openings(self.rotation)
    }

    /// This pipe turned a further 90° clockwise; nothing else changes.
    pub fn rotated(self) -> Self {
        Self { rotation: self.rotation.next(), ..self }
    }
}

/// A fixed entry or exit just outside the board, next to exactly one boundary cell.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Anchor {
    kind: PipeKind,
    location: Location,
}

impl Anchor {
    pub(crate) fn start(location: Location) -> Self {
        Self { kind: PipeKind::Start, location }
    }

    pub(crate) fn end(location: Location) -> Self {
        Self { kind: PipeKind::End, location }
    }

    /// [`PipeKind::Start`] or [`PipeKind::End`].
    pub fn kind(&self) -> PipeKind {
        self.kind
    }

    /// Where this anchor sits, one step outside the board.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Anchors connect on every side; only the side facing the board ever matters.
    pub fn openings(&self) -> Openings {
        self.kind.openings(Rotation::Deg0)
    }

    /// The board cell this anchor feeds into.
    pub fn entry_cell(&self, size: Dimension) -> Location {
        self.location.clamp_into(size)
    }

    /// The direction from this anchor onto the board.
    pub fn facing(&self, size: Dimension) -> Option<Direction> {
        Direction::direction_to(self.location, self.entry_cell(size))
    }
}

/// The start and end anchors of one puzzle.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Anchors {
    /// Where the route enters the board.
    pub start: Anchor,
    /// Where the route leaves the board; the mirror image of the start for random puzzles.
    pub end: Anchor,
}

impl Anchors {
    pub(crate) fn new(start: Location, end: Location) -> Self {
        Self { start: Anchor::start(start), end: Anchor::end(end) }
    }
}
