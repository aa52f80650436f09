#![warn(missing_docs)]

//! # `spigot`
//!
//! Generation and validation for rotating-pipe puzzles: pipes are scattered over a square board, each turned to a random
//! orientation, and the player turns cells a quarter at a time until a chain of pipes joins a start anchor on one edge of
//! the board to an end anchor on the opposite edge.
//!
//! Begin with [`generate_puzzle`] or, for reproducible or hand-made boards, a [`PuzzleBuilder`].
//! Turn cells with [`Board::rotate_cell`] and ask [`Board::validate`] whether the anchors are joined.
//! A [`Game`](game::Game) wraps a board with a countdown and a win/lose state, and [`layout`] maps boards onto a canvas.
//!
//! # Internals
//! Every generated board is solvable by construction. A board is made in four steps:
//!
//! 1. Pick a start anchor just outside a random boundary cell; the end anchor is its mirror image through the centre.
//! 2. Carve a random self-avoiding path between the cells the anchors feed into, by a depth-first walk with backtracking.
//! 3. Type each path cell as straight or elbow by comparing the axes the path enters and leaves it along.
//! 4. Fill the rest of the board with random decoys and turn every cell to a random orientation.
//!
//! Validation is a breadth-first search from the start anchor over the undirected graph of mutual connections,
//! i.e. neighbors whose current openings face each other. The board is solved iff the end anchor is reachable.
//!
//! Independently of the carved path, [`Board::solve`] finds orientations joining the anchors by expressing the board as a
//! Boolean satisfiability problem (a "SAT"): every cell takes exactly one orientation, a link used by the route forces
//! both of its ends to open towards each other, and every cell on the route has exactly two used links.

pub use board::Board;
pub use builder::{generate_puzzle, GenerationFailure, PuzzleBuilder};
pub use location::{Coord, Dimension, Location};

pub(crate) mod board;
mod tests;
pub mod builder;
pub(crate) mod carve;
pub mod classify;
pub(crate) mod endpoints;
pub mod game;
pub mod layout;
pub(crate) mod location;
pub(crate) mod logic;
pub mod pipe;
pub mod shape;
pub mod solver;
pub mod validator;
#[cfg(feature = "wasm")]
pub mod wasm;
