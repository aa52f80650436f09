use itertools::Itertools;
use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::location::{Coord, Dimension, Location};
use crate::pipe::Anchors;

/// Every location an anchor may occupy: one step outside each boundary cell, on the side facing away from the board.
///
/// Corners are excluded, so each candidate touches exactly one cell.
pub fn boundary_anchors(size: Dimension) -> Vec<Location> {
    let n = size.get() as Coord;

    (0..n).flat_map(|i| [Location(i, -1), Location(i, n)])
        .chain((0..n).flat_map(|i| [Location(-1, i), Location(n, i)]))
        .collect_vec()
}

/// Whether `location` is one of the [`boundary_anchors`] of an `size`×`size` board.
pub fn is_boundary_anchor(location: Location, size: Dimension) -> bool {
    let n = size.get() as Coord;
    let on_edge = |c: Coord| c == -1 || c == n;
    let on_board = |c: Coord| (0..n).contains(&c);

    (on_edge(location.0) && on_board(location.1)) || (on_board(location.0) && on_edge(location.1))
}

/// Pick a start anchor uniformly among the [`boundary_anchors`] and place the end anchor at its mirror image.
///
/// The mirror of a boundary anchor lies on the opposite side of the board, so the two never coincide.
pub fn select_anchors<R: Rng + ?Sized>(size: Dimension, rng: &mut R) -> Anchors {
    let options = boundary_anchors(size);
    // never empty since the size is nonzero
    let start = options.choose(rng).copied().unwrap_or(Location(0, -1));
    let end = start.mirror(size);

    debug!("anchors for {0}x{0} board: start {start:?}, end {end:?}", size.get());
    Anchors::new(start, end)
}
