//! Whether the current orientations join the start anchor to the end anchor.

use std::collections::HashSet;

use log::trace;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;
use strum::VariantArray;

use crate::board::Board;
use crate::location::Location;
use crate::shape::Direction;

/// The board as an undirected graph whose edges are mutual connections between orthogonal neighbors.
///
/// Both anchors are always present as vertices. Each edge carries the direction from its lower-indexed end
/// (or from the anchor onto the board).
pub fn connection_graph(board: &Board) -> UnGraphMap<Location, Direction> {
    let n = board.size().get();
    let mut graph = UnGraphMap::with_capacity(
        n * n + 2,
        // "horizontal" and "vertical" neighbor pairs, plus the two anchor links
        2 * n * (n - 1) + 2,
    );

    for pipe in board.pipes() {
        let location = pipe.location();
        graph.add_node(location);

        for direction in Direction::FORWARD_VARIANTS {
            if board.get(direction.attempt_from(location)).is_some() && board.connects(location, *direction) {
                graph.add_edge(location, direction.attempt_from(location), *direction);
            }
        }
    }

    for anchor in [board.anchors().start, board.anchors().end] {
        graph.add_node(anchor.location());

        // anchors open everywhere, but only one side ever faces a cell
        for direction in Direction::VARIANTS {
            let neighbor = direction.attempt_from(anchor.location());
            if board.get(neighbor).is_some() && board.connects(anchor.location(), *direction) {
                graph.add_edge(anchor.location(), neighbor, *direction);
            }
        }
    }

    graph
}

/// Everything connected to the start anchor, the anchor included, in breadth-first order.
pub fn reachable(board: &Board) -> Vec<Location> {
    let graph = connection_graph(board);
    let mut bfs = Bfs::new(&graph, board.anchors().start.location());

    let mut order = Vec::new();
    while let Some(location) = bfs.next(&graph) {
        order.push(location);
    }

    order
}

/// Whether the start and end anchors are joined by a chain of mutually connected pipes.
///
/// The end anchor counts as reached through whichever neighboring cell connects to it,
/// no matter where that cell falls in the search order.
pub fn validate(board: &Board) -> bool {
    let end = board.anchors().end.location();
    let reached: HashSet<Location> = reachable(board).into_iter().collect();

    trace!("{} locations reachable from the start anchor", reached.len());
    reached.contains(&end)
}
