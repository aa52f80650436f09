//! Finding orientations that join the anchors, via SAT.

use std::collections::{HashMap, HashSet};
use std::convert::identity;

use itertools::Itertools;
use log::debug;
use strum::VariantArray;
use thiserror::Error;
use unordered_pair::UnorderedPair;
use varisat::{CnfFormula, Lit, Solver, Var};

use crate::board::Board;
use crate::location::Location;
use crate::logic::{exactly_one, none_or_exactly_two};
use crate::pipe::Rotation;
use crate::shape::Direction;

/// Reasons a [`RotationSolver`] may fail.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum SolverFailure {
    /// The SAT solver detected a logical inconsistency, i.e. no way of turning the pipes joins the anchors.
    #[error("no orientation of the pipes connects the anchors")]
    Inconsistent,
    /// The SAT solver left some cell on the route without an orientation.
    /// This should probably never happen.
    #[error("a cell on the route was left without an orientation")]
    NoRotationFound,
}

/// A pair of orthogonal neighbors, either two cells or an anchor and the cell it feeds into.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
struct Link {
    ends: UnorderedPair<Location>,
    // from ends.0 towards ends.1
    direction: Direction,
}

/// Orientations found by [`RotationSolver::solve`].
#[derive(Clone, Default)]
pub struct Solution {
    /// Orientation of every cell on the route; other cells are free to stay as they are.
    pub rotations: HashMap<Location, Rotation>,
    /// Neighbor pairs the route runs through, anchors included.
    pub links: HashSet<UnorderedPair<Location>>,
}

/// Finds orientations for the pipes of a [`Board`] that join its anchors.
/// Use [`Self::solve`] to attempt to find a solution.
pub struct RotationSolver<'a> {
    board: &'a Board,
    links: Vec<Link>,
    anchor_links: Vec<usize>,
}

impl<'a> From<&'a Board> for RotationSolver<'a> {
    fn from(board: &'a Board) -> Self {
        let n = board.size().get();
        let mut links = Vec::with_capacity(2 * n * (n - 1) + 2);

        for pipe in board.pipes() {
            for direction in Direction::FORWARD_VARIANTS {
                let neighbor = direction.attempt_from(pipe.location());
                if board.get(neighbor).is_some() {
                    links.push(Link { ends: UnorderedPair(pipe.location(), neighbor), direction: *direction });
                }
            }
        }

        let mut anchor_links = Vec::with_capacity(2);
        for anchor in [board.anchors().start, board.anchors().end] {
            if let Some(direction) = anchor.facing(board.size()) {
                anchor_links.push(links.len());
                links.push(Link { ends: UnorderedPair(anchor.location(), anchor.entry_cell(board.size())), direction });
            }
        }

        Self { board, links, anchor_links }
    }
}

impl RotationSolver<'_> {
    #[inline]
    fn cell_count(&self) -> usize {
        self.board.size().get().pow(2)
    }

    #[inline]
    fn rotation_var(&self, cell: usize, rotation: Rotation) -> Var {
        Var::from_index(cell * Rotation::VARIANTS.len() + rotation as usize)
    }

    #[inline]
    fn on_route_var(&self, cell: usize) -> Var {
        Var::from_index(self.cell_count() * Rotation::VARIANTS.len() + cell)
    }

    #[inline]
    fn link_var(&self, link: usize) -> Var {
        Var::from_index(self.cell_count() * (Rotation::VARIANTS.len() + 1) + link)
    }

    /// Search for orientations joining the anchors, returning [`Ok`] with the [`Solution`] or [`Err`] with a [`SolverFailure`] reason.
    ///
    /// # Logical setup
    /// Every cell C takes exactly one orientation, and may or may not lie on the route.
    /// Every link L between neighbors may or may not be used by the route.
    ///
    /// ## Links
    /// If L is used, each cell at either end of L has an orientation opening towards the other end.
    /// Anchors open everywhere, so they need no such clause. The two anchor links are assumed to be used.
    ///
    /// ## Cells
    /// A cell on the route has exactly two used links, and a cell off the route has none.
    ///
    /// Each anchor then has exactly one used link and every route cell exactly two,
    /// so following used links from the start anchor can only stop at the end anchor.
    /// Any closed loops elsewhere are harmless: they are mutually connected too.
    pub fn solve(&self) -> Result<Solution, SolverFailure> {
        let mut formulae: Vec<CnfFormula> = Vec::new();
        let mut incident: HashMap<usize, Vec<Lit>> = HashMap::with_capacity(self.cell_count());

        for pipe in self.board.pipes() {
            // this cell C has exactly one orientation
            formulae.push(CnfFormula::from(exactly_one(
                Rotation::VARIANTS.iter()
                    .map(|rotation| self.rotation_var(pipe.id(), *rotation).positive())
                    .collect_vec()
            )));
        }

        for (index, link) in self.links.iter().enumerate() {
            let used = self.link_var(index);
            let UnorderedPair(a, b) = link.ends;

            for (location, side) in [(a, link.direction), (b, link.direction.invert())] {
                let Some(pipe) = self.board.get(location) else {
                    continue;
                };
                incident.entry(pipe.id()).or_default().push(used.positive());

                // L being used implies C takes one of the orientations opening towards the other end
                // !L + R_1 + R_2 + ...
                let mut terms = vec![used.negative()];
                terms.extend(Rotation::VARIANTS.iter()
                    .filter(|rotation| pipe.kind().openings(**rotation).contains(side))
                    .map(|rotation| self.rotation_var(pipe.id(), *rotation).positive()));
                formulae.push(CnfFormula::from(vec![terms]));
            }
        }

        for pipe in self.board.pipes() {
            let links = incident.get(&pipe.id()).map(Vec::as_slice).unwrap_or_default();
            formulae.push(CnfFormula::from(none_or_exactly_two(self.on_route_var(pipe.id()).positive(), links)));
        }

        if self.anchor_links.len() != 2 {
            return Err(SolverFailure::Inconsistent);
        }
        let assumptions = self.anchor_links.iter()
            .map(|link| self.link_var(*link).positive())
            .collect_vec();

        let mut solver = Solver::new();
        formulae.iter().for_each(|formula| solver.add_formula(formula));
        solver.assume(&assumptions);
        if !solver.solve().is_ok_and(identity) {
            return Err(SolverFailure::Inconsistent);
        }
        let model = solver.model().ok_or(SolverFailure::Inconsistent)?;
        let truths: HashSet<Var> = model.into_iter()
            .filter(|lit| lit.is_positive())
            .map(|lit| lit.var())
            .collect();

        let mut solution = Solution::default();
        for pipe in self.board.pipes() {
            if !truths.contains(&self.on_route_var(pipe.id())) {
                continue;
            }

            let rotation = Rotation::VARIANTS.iter()
                .find(|rotation| truths.contains(&self.rotation_var(pipe.id(), **rotation)))
                .ok_or(SolverFailure::NoRotationFound)?;
            solution.rotations.insert(pipe.location(), *rotation);
        }

        solution.links.extend(self.links.iter().enumerate()
            .filter(|(index, _)| truths.contains(&self.link_var(*index)))
            .map(|(_, link)| link.ends));

        debug!("solved route through {} cells", solution.rotations.len());
        Ok(solution)
    }
}
