use itertools::Itertools;
use log::{debug, trace};
use ndarray::Array2;
use rand::seq::IndexedRandom;
use rand::Rng;
use strum::VariantArray;

use crate::builder::GenerationFailure;
use crate::location::{Dimension, Location};
use crate::shape::Direction;

/// Carve a random self-avoiding path between two cells of an `size`×`size` board.
///
/// This is a depth-first walk: from the current frontier, step to a random unvisited neighbor,
/// or, at a dead end, drop the frontier from the path and resume from the cell before it.
/// Cells are visited at most once, so the walk ends after at most `2 * size²` steps,
/// and since the board is connected, backtracking exhausts every branch before giving up on `to`.
///
/// Returns the cells from `from` to `to`, both inclusive.
pub fn carve<R: Rng + ?Sized>(size: Dimension, from: Location, to: Location, rng: &mut R) -> Result<Vec<Location>, GenerationFailure> {
    let (Some(from_index), Some(_)) = (from.as_index(size), to.as_index(size)) else {
        return Err(GenerationFailure::OffBoard(if from.is_within(size) { to } else { from }));
    };

    let mut visited = Array2::from_elem((size.get(), size.get()), false);
    visited[from_index] = true;

    let mut path = vec![from];
    if from == to {
        return Ok(path);
    }

    let mut frontier = Some(from);
    while let Some(current) = frontier {
        let options = Direction::VARIANTS.iter()
            .map(|dir| dir.attempt_from(current))
            .filter(|next| next.as_index(size).is_some_and(|index| !visited[index]))
            .collect_vec();

        match options.choose(rng) {
            Some(&next) => {
                if let Some(index) = next.as_index(size) {
                    visited[index] = true;
                }
                path.push(next);

                if next == to {
                    debug!("carved a path of {} cells from {from:?} to {to:?}", path.len());
                    return Ok(path);
                }
                frontier = Some(next);
            }
            None => {
                trace!("dead end at {current:?}, backtracking");
                path.pop();
                frontier = path.last().copied();
            }
        }
    }

    Err(GenerationFailure::Exhausted(to))
}
