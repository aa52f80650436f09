//! Building boards: choosing anchors, carving a path between them and filling the rest with decoys.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use strum::VariantArray;
use thiserror::Error;

use crate::board::Board;
use crate::carve::carve;
use crate::classify::{classify, PathSegment};
use crate::endpoints::{is_boundary_anchor, select_anchors};
use crate::location::{Dimension, Location};
use crate::pipe::{Anchors, Pipe, PipeKind, Rotation};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// An anchor was placed somewhere other than directly outside a boundary cell.
    AnchorOffBoundary(Location),
    /// Both anchors were placed at the same location.
    AnchorsCoincide,
    /// A path was supplied without anchors to run between.
    PathWithoutAnchors,
    /// A path cell lies outside the board.
    PathOffBoard(Location),
    /// A path visits this cell more than once.
    PathRevisits(Location),
    /// A path does not begin at the start anchor's cell or does not finish at the end anchor's cell.
    PathMisanchored,
}

/// Reasons no puzzle could be produced.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum GenerationFailure {
    /// A grid size of 0 was asked for.
    #[error("a puzzle needs a grid of at least 1x1")]
    EmptyGrid,
    /// An explicit path had no cells.
    #[error("there is no path to lay pipes along")]
    EmptyPath,
    /// A path was asked to start or finish off the board.
    #[error("{0:?} is not on the board")]
    OffBoard(Location),
    /// Two consecutive path cells, or a path end and its anchor, do not touch.
    #[error("{0:?} and {1:?} are not neighbors")]
    Disjoint(Location, Location),
    /// Carving ran out of cells before reaching this one.
    #[error("every branch was exhausted without reaching {0:?}")]
    Exhausted(Location),
    /// The builder was invalid for these reasons.
    #[error("invalid builder: {0:?}")]
    InvalidBuilder(Vec<BuilderInvalidReason>),
}

const DEFAULT_SIZE: Dimension = match Dimension::new(7) {
    Some(size) => size,
    None => Dimension::MIN,
};

/// A builder for puzzles on square boards.
///
/// By default both anchors and the path between them are random; either can be pinned down instead.
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
#[derive(Clone, Debug)]
pub struct PuzzleBuilder {
    size: Dimension,
    seed: Option<u64>,
    anchors: Option<Anchors>,
    path: Option<Vec<Location>>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for PuzzleBuilder {
    fn default() -> Self {
        Self::with_size(DEFAULT_SIZE)
    }
}

impl PuzzleBuilder {
    /// Construct a new [`Self`] for an `size`×`size` board.
    pub fn with_size(size: Dimension) -> Self {
        Self {
            size,
            seed: None,
            anchors: None,
            path: None,
            invalid_reasons: Default::default(),
        }
    }

    /// Draw every random choice from a generator seeded with `seed`, making [`Self::build`] reproducible.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    /// Fix the anchors rather than picking a mirrored pair at random.
    ///
    /// May cause the builder to enter an [`AnchorOffBoundary`](BuilderInvalidReason::AnchorOffBoundary) invalid state
    /// if either location is not directly outside a boundary cell,
    /// or an [`AnchorsCoincide`](BuilderInvalidReason::AnchorsCoincide) invalid state if they are equal.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn anchors(&mut self, start: Location, end: Location) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        for location in [start, end] {
            if !is_boundary_anchor(location, self.size) {
                self.invalid_reasons.push(BuilderInvalidReason::AnchorOffBoundary(location));
                return self;
            }
        }

        if start == end {
            self.invalid_reasons.push(BuilderInvalidReason::AnchorsCoincide);
            return self;
        }

        self.anchors = Some(Anchors::new(start, end));
        self
    }

    /// Lay the pipes along `path` instead of carving one.
    ///
    /// The path is checked against the anchors when building;
    /// it must run from the cell next to the start anchor to the cell next to the end anchor without revisiting a cell.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn path(&mut self, path: Vec<Location>) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        self.path = Some(path);
        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    fn check_path(&self, path: &[Location], anchors: &Anchors) -> Vec<BuilderInvalidReason> {
        let mut reasons = Vec::new();

        if let Some(off_board) = path.iter().find(|location| !location.is_within(self.size)) {
            reasons.push(BuilderInvalidReason::PathOffBoard(*off_board));
        }

        let mut seen = HashSet::with_capacity(path.len());
        if let Some(revisited) = path.iter().find(|location| !seen.insert(**location)) {
            reasons.push(BuilderInvalidReason::PathRevisits(*revisited));
        }

        if path.first() != Some(&anchors.start.entry_cell(self.size)) || path.last() != Some(&anchors.end.entry_cell(self.size)) {
            reasons.push(BuilderInvalidReason::PathMisanchored);
        }

        reasons
    }

    /// Convert the state of this builder into a [`Board`]: choose anchors, carve a path between them,
    /// type the path's pipes and surround them with decoys, all turned at random.
    ///
    /// If the builder is invalid for any reason, [`GenerationFailure::InvalidBuilder`] will indicate why.
    pub fn build(&self) -> Result<Board, GenerationFailure> {
        if !self.invalid_reasons.is_empty() {
            return Err(GenerationFailure::InvalidBuilder(self.invalid_reasons.clone()));
        }

        let mut rng = StdRng::seed_from_u64(self.seed.unwrap_or_else(rand::random));
        let anchors = match self.anchors {
            Some(anchors) => anchors,
            None => select_anchors(self.size, &mut rng),
        };

        let path = match &self.path {
            Some(path) => {
                if self.anchors.is_none() {
                    return Err(GenerationFailure::InvalidBuilder(vec![BuilderInvalidReason::PathWithoutAnchors]));
                }
                if path.is_empty() {
                    return Err(GenerationFailure::EmptyPath);
                }

                let reasons = self.check_path(path, &anchors);
                if !reasons.is_empty() {
                    return Err(GenerationFailure::InvalidBuilder(reasons));
                }

                path.clone()
            }
            None => carve(
                self.size,
                anchors.start.entry_cell(self.size),
                anchors.end.entry_cell(self.size),
                &mut rng,
            )?,
        };

        let segments = classify(&path, &anchors)?;
        let cells = fill(self.size, &segments, &mut rng);
        debug!(
            "built {0}x{0} board with {1} path cells ({2} elbows)",
            self.size.get(),
            segments.len(),
            segments.iter().filter(|segment| segment.kind == PipeKind::Elbow).count(),
        );

        Ok(Board {
            size: self.size,
            cells,
            anchors,
            path: segments,
        })
    }
}

fn random_rotation<R: Rng + ?Sized>(rng: &mut R) -> Rotation {
    Rotation::VARIANTS.choose(rng).copied().unwrap_or_default()
}

/// Fill an `size`×`size` board: cells on `path` get the segment's kind, all others a random rotatable kind.
/// Every cell is turned to a random orientation, so the path is almost never laid out already.
///
/// Ids are assigned in row-major order, starting from 0.
pub(crate) fn fill<R: Rng + ?Sized>(size: Dimension, path: &[PathSegment], rng: &mut R) -> Array2<Pipe> {
    let n = size.get();
    let kinds: HashMap<Location, PipeKind> = path.iter()
        .map(|segment| (segment.location, segment.kind))
        .collect();

    Array2::from_shape_fn((n, n), |index| {
        let location = Location::from(index);
        let kind = match kinds.get(&location) {
            Some(kind) => *kind,
            None => PipeKind::ROTATABLE.choose(rng).copied().unwrap_or(PipeKind::Straight),
        };

        Pipe::new(index.0 * n + index.1, kind, location, random_rotation(rng))
    })
}

/// Generate a fresh random puzzle on a `grid_size`×`grid_size` board.
pub fn generate_puzzle(grid_size: usize) -> Result<Board, GenerationFailure> {
    let size = Dimension::new(grid_size).ok_or(GenerationFailure::EmptyGrid)?;

    PuzzleBuilder::with_size(size)
        .build()
        .inspect_err(|failure| warn!("no puzzle generated for size {grid_size}: {failure}"))
}
