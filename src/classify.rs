//! Typing the cells of a carved path.

use itertools::Itertools;
use strum::VariantArray;

use crate::builder::GenerationFailure;
use crate::location::Location;
use crate::pipe::{Anchors, PipeKind, Rotation};
use crate::shape::{Direction, Openings};

/// One cell of a carved path, typed by how the path moves through it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PathSegment {
    /// The cell this segment occupies.
    pub location: Location,
    /// [`Straight`](PipeKind::Straight) if the path passes straight through, [`Elbow`](PipeKind::Elbow) if it turns.
    pub kind: PipeKind,
    /// Side facing the previous cell (or the start anchor).
    pub entry: Direction,
    /// Side facing the next cell (or the end anchor).
    pub exit: Direction,
}

impl PathSegment {
    /// The sides this cell must open through for the path to run.
    pub fn openings(&self) -> Openings {
        Openings::of(&[self.entry, self.exit])
    }

    /// The first orientation of this segment's kind that lines it up with its neighbors on the path.
    pub fn aligned_rotation(&self) -> Option<Rotation> {
        Rotation::VARIANTS.iter()
            .find(|rotation| self.kind.openings(**rotation) == self.openings())
            .copied()
    }
}

/// Type every cell of `path` as [`Straight`](PipeKind::Straight) or [`Elbow`](PipeKind::Elbow).
///
/// The anchors are treated as the path's outer neighbors, so the first and last cells are typed by how the path leaves
/// and enters the board. A cell is straight if the path enters and leaves it along the same axis.
pub fn classify(path: &[Location], anchors: &Anchors) -> Result<Vec<PathSegment>, GenerationFailure> {
    if path.is_empty() {
        return Err(GenerationFailure::EmptyPath);
    }

    let full = [anchors.start.location()].into_iter()
        .chain(path.iter().copied())
        .chain([anchors.end.location()])
        .collect_vec();

    full.iter()
        .tuple_windows()
        .map(|(&previous, &current, &next)| {
            let entry = Direction::direction_to(current, previous).ok_or(GenerationFailure::Disjoint(previous, current))?;
            let exit = Direction::direction_to(current, next).ok_or(GenerationFailure::Disjoint(current, next))?;

            // moving in along one axis and out along the same axis is passing straight through
            let kind = if entry.axis() == exit.axis() { PipeKind::Straight } else { PipeKind::Elbow };

            Ok(PathSegment { location: current, kind, entry, exit })
        })
        .collect()
}
