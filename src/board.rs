use std::fmt::{Display, Formatter};

use ndarray::Array2;

use crate::classify::PathSegment;
use crate::location::{Coord, Dimension, Location};
use crate::pipe::{Anchors, Pipe, PipeId, Rotation};
use crate::shape::{Direction, Openings};
use crate::solver::{RotationSolver, SolverFailure};
use crate::validator;

/// An `n`×`n` board of rotatable pipes between a start and an end anchor.
///
/// [`Board`]s are generated by a [`PuzzleBuilder`](crate::builder::PuzzleBuilder) or [`generate_puzzle`](crate::generate_puzzle).
/// Cells are stored row-major and ids count up from 0 in the same order.
/// After generation only rotations change; see [`Board::rotate_cell`].
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) size: Dimension,
    // indexed [y][x]
    pub(crate) cells: Array2<Pipe>,
    pub(crate) anchors: Anchors,
    pub(crate) path: Vec<PathSegment>,
}

impl Board {
    /// Number of cells along each side.
    pub fn size(&self) -> Dimension {
        self.size
    }

    /// The start and end anchors.
    pub fn anchors(&self) -> &Anchors {
        &self.anchors
    }

    /// The path the board was generated around, from the start anchor's cell to the end anchor's cell.
    pub fn carved_path(&self) -> &[PathSegment] {
        &self.path
    }

    /// The cell at `location`, or [`None`] off the board.
    pub fn get(&self, location: Location) -> Option<&Pipe> {
        location.as_index(self.size).and_then(|index| self.cells.get(index))
    }

    /// The cell with `id`, if there is one.
    pub fn pipe(&self, id: PipeId) -> Option<&Pipe> {
        let n = self.size.get();
        self.cells.get((id / n, id % n)).filter(|pipe| pipe.id() == id)
    }

    /// All cells in row-major order.
    pub fn pipes(&self) -> impl Iterator<Item=&Pipe> {
        self.cells.iter()
    }

    /// Turn the cell with `id` a further 90° clockwise.
    ///
    /// Returns `false` and leaves the board untouched if no cell has this id.
    pub fn rotate_cell(&mut self, id: PipeId) -> bool {
        match self.pipe(id).map(Pipe::location) {
            Some(location) => self.rotate_at(location),
            None => false,
        }
    }

    /// Turn the cell at `location` a further 90° clockwise, if there is one.
    pub fn rotate_at(&mut self, location: Location) -> bool {
        let Some(pipe) = location.as_index(self.size).and_then(|index| self.cells.get_mut(index)) else {
            return false;
        };

        *pipe = pipe.rotated();
        true
    }

    pub(crate) fn set_rotation(&mut self, location: Location, rotation: Rotation) -> bool {
        let Some(pipe) = location.as_index(self.size).and_then(|index| self.cells.get_mut(index)) else {
            return false;
        };

        pipe.rotation = rotation;
        true
    }

    /// Openings of whatever sits at `location`: a cell, an anchor, or nothing.
    pub fn openings_at(&self, location: Location) -> Option<Openings> {
        if let Some(pipe) = self.get(location) {
            return Some(pipe.openings());
        }

        [self.anchors.start, self.anchors.end].into_iter()
            .find(|anchor| anchor.location() == location)
            .map(|anchor| anchor.openings())
    }

    /// Whether the pipe at `location` and its neighbor in `direction` open towards each other.
    pub fn connects(&self, location: Location, direction: Direction) -> bool {
        let neighbor = direction.attempt_from(location);

        match (self.openings_at(location), self.openings_at(neighbor)) {
            (Some(here), Some(there)) => here.contains(direction) && there.contains(direction.invert()),
            _ => false,
        }
    }

    /// Whether a chain of mutually connected pipes runs from the start anchor to the end anchor.
    pub fn validate(&self) -> bool {
        validator::validate(self)
    }

    /// Solves this board, deferring to a [`RotationSolver`] and turning the pipes on its route accordingly.
    /// Cells off the route keep their orientation.
    ///
    /// Returns according to the result of [`RotationSolver::solve`].
    pub fn solve(mut self) -> Result<Self, SolverFailure> {
        let solution = RotationSolver::from(&self).solve()?;
        for (location, rotation) in solution.rotations {
            self.set_rotation(location, rotation);
        }

        Ok(self)
    }
}

fn glyph(openings: Openings) -> char {
    let sides = (
        openings.contains(Direction::Top),
        openings.contains(Direction::Right),
        openings.contains(Direction::Bottom),
        openings.contains(Direction::Left),
    );

    match sides {
        (true, false, true, false) => '│',
        (false, true, false, true) => '─',
        (true, true, false, false) => '└',
        (false, true, true, false) => '┌',
        (false, false, true, true) => '┐',
        (true, false, false, true) => '┘',
        (true, true, true, true) => '┼',
        _ => '?',
    }
}

impl Display for Board {
    /// Draws the board inside a one-cell frame holding the anchors, `S` for start and `E` for end.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let n = self.size.get();
        let mut canvas = Array2::from_elem((n + 2, n + 2), ' ');

        for pipe in self.pipes() {
            let Location(x, y) = pipe.location();
            canvas[((y + 1) as usize, (x + 1) as usize)] = glyph(pipe.openings());
        }
        for (anchor, mark) in [(self.anchors.start, 'S'), (self.anchors.end, 'E')] {
            let Location(x, y) = anchor.location().offset_by((1, 1));
            if (0..(n + 2) as Coord).contains(&x) && (0..(n + 2) as Coord).contains(&y) {
                canvas[(y as usize, x as usize)] = mark;
            }
        }

        for row in canvas.rows() {
            let line = row.iter().collect::<String>();
            writeln!(f, "{}", line.trim_end())?;
        }

        Ok(())
    }
}
