#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::num::NonZero;
    use std::str::FromStr;
    use std::time::Duration;

    use ndarray::Array2;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use strum::VariantArray;
    use unordered_pair::UnorderedPair;

    use crate::board::Board;
    use crate::builder::{generate_puzzle, BuilderInvalidReason, GenerationFailure, PuzzleBuilder};
    use crate::carve::carve;
    use crate::classify::classify;
    use crate::endpoints::{boundary_anchors, is_boundary_anchor, select_anchors};
    use crate::game::{Difficulty, Game, GameState, Notice};
    use crate::layout::{anchor_marker, cell_at, pipe_sprite, Rect};
    use crate::location::{Coord, Dimension, Location};
    use crate::pipe::{Anchor, Anchors, Pipe, PipeKind, Rotation};
    use crate::shape::{Direction, Openings};
    use crate::solver::{RotationSolver, SolverFailure};
    use crate::validator::reachable;

    fn dim(n: usize) -> Dimension {
        NonZero::new(n).unwrap()
    }

    /// Builds a board from rows of box-drawing glyphs; `┼` stands for a cell open on every side.
    fn board_from(rows: &[&str], start: Location, end: Location) -> Board {
        let size = dim(rows.len());
        let glyphs: Vec<Vec<char>> = rows.iter().map(|row| row.chars().collect()).collect();

        let cells = Array2::from_shape_fn((size.get(), size.get()), |(row, col)| {
            let (kind, rotation) = match glyphs[row][col] {
                '│' => (PipeKind::Straight, Rotation::Deg0),
                '─' => (PipeKind::Straight, Rotation::Deg90),
                '└' => (PipeKind::Elbow, Rotation::Deg0),
                '┌' => (PipeKind::Elbow, Rotation::Deg90),
                '┐' => (PipeKind::Elbow, Rotation::Deg180),
                '┘' => (PipeKind::Elbow, Rotation::Deg270),
                '┼' => (PipeKind::Start, Rotation::Deg0),
                other => panic!("unknown glyph {other:?}"),
            };
            Pipe::new(row * size.get() + col, kind, Location::from((row, col)), rotation)
        });

        Board { size, cells, anchors: Anchors::new(start, end), path: Vec::new() }
    }

    /// Turns every cell of the carved path until it lines up with its neighbors.
    fn align(board: &mut Board) {
        for segment in board.carved_path().to_vec() {
            let target = segment.aligned_rotation().unwrap();
            let id = board.get(segment.location).unwrap().id();
            while board.get(segment.location).unwrap().rotation() != target {
                assert!(board.rotate_cell(id));
            }
        }
    }

    /// Turns the cell next to the start anchor so that it faces away from the anchor.
    fn cut_off_start(board: &mut Board) {
        let start = board.anchors().start;
        let entry = start.entry_cell(board.size());
        let towards_anchor = Direction::direction_to(entry, start.location()).unwrap();
        let kind = board.get(entry).unwrap().kind();

        let rotation = Rotation::VARIANTS.iter()
            .find(|rotation| !kind.openings(**rotation).contains(towards_anchor))
            .copied()
            .unwrap();
        assert!(board.set_rotation(entry, rotation));
    }

    #[test]
    fn connection_rules() {
        assert_eq!(PipeKind::Straight.openings(Rotation::Deg0), Openings::of(&[Direction::Top, Direction::Bottom]));
        assert_eq!(PipeKind::Straight.openings(Rotation::Deg90), Openings::of(&[Direction::Left, Direction::Right]));
        assert_eq!(PipeKind::Straight.openings(Rotation::Deg180), PipeKind::Straight.openings(Rotation::Deg0));
        assert_eq!(PipeKind::Straight.openings(Rotation::Deg270), PipeKind::Straight.openings(Rotation::Deg90));

        assert_eq!(PipeKind::Elbow.openings(Rotation::Deg0), Openings::of(&[Direction::Top, Direction::Right]));
        assert_eq!(PipeKind::Elbow.openings(Rotation::Deg90), Openings::of(&[Direction::Right, Direction::Bottom]));
        assert_eq!(PipeKind::Elbow.openings(Rotation::Deg180), Openings::of(&[Direction::Bottom, Direction::Left]));
        assert_eq!(PipeKind::Elbow.openings(Rotation::Deg270), Openings::of(&[Direction::Left, Direction::Top]));

        for rotation in Rotation::VARIANTS {
            assert_eq!(PipeKind::Start.openings(*rotation), Openings::ALL);
            assert_eq!(PipeKind::End.openings(*rotation), Openings::ALL);
        }
        assert!(!PipeKind::Start.is_rotatable());
        assert!(PipeKind::Elbow.is_rotatable());
    }

    #[test]
    fn rotation_normalisation() {
        assert_eq!(Rotation::from_degrees(0), Rotation::Deg0);
        assert_eq!(Rotation::from_degrees(450), Rotation::Deg90);
        assert_eq!(Rotation::from_degrees(-90), Rotation::Deg270);
        assert_eq!(Rotation::from_degrees(360), Rotation::Deg0);
        assert_eq!(Rotation::from_degrees(45), Rotation::Deg0);
        assert_eq!(Rotation::from_degrees(-180), Rotation::Deg180);

        assert_eq!(Rotation::Deg270.next(), Rotation::Deg0);
        assert_eq!(Rotation::Deg180.degrees(), 180);
    }

    #[test]
    fn directions() {
        for direction in Direction::VARIANTS {
            assert_eq!(direction.invert().invert(), *direction);
            assert_ne!(direction.invert(), *direction);
            assert_eq!(direction.rotated(4), *direction);
            assert_eq!(direction.invert().axis(), direction.axis());
        }

        assert_eq!(Direction::Top.rotated(1), Direction::Right);
        assert_eq!(Direction::Left.rotated(1), Direction::Top);
        assert_eq!(Direction::direction_to(Location(2, 2), Location(2, 1)), Some(Direction::Top));
        assert_eq!(Direction::direction_to(Location(2, 2), Location(3, 3)), None);
    }

    #[test]
    fn anchors_are_mirrored() {
        for n in 1..=9 {
            let size = dim(n);
            assert_eq!(boundary_anchors(size).len(), 4 * n);

            for seed in 0..50 {
                let anchors = select_anchors(size, &mut StdRng::seed_from_u64(seed));
                let (start, end) = (anchors.start.location(), anchors.end.location());

                assert_eq!(end, start.mirror(size));
                assert_eq!(end.mirror(size), start);
                assert_ne!(start, end);
                assert!(is_boundary_anchor(start, size));
                assert!(is_boundary_anchor(end, size));
                assert!(!start.is_within(size));
                assert!(anchors.start.facing(size).is_some());
            }
        }
    }

    #[test]
    fn boundary_anchor_candidates() {
        let size = dim(3);

        assert!(is_boundary_anchor(Location(0, -1), size));
        assert!(is_boundary_anchor(Location(3, 2), size));
        assert!(!is_boundary_anchor(Location(-1, -1), size));
        assert!(!is_boundary_anchor(Location(1, 1), size));
        assert!(!is_boundary_anchor(Location(0, -2), size));

        assert_eq!(Anchor::start(Location(3, 2)).entry_cell(size), Location(2, 2));
        assert_eq!(Anchor::start(Location(3, 2)).facing(size), Some(Direction::Left));
        assert_eq!(Anchor::end(Location(1, -1)).entry_cell(size), Location(1, 0));
        assert_eq!(Anchor::end(Location(1, -1)).facing(size), Some(Direction::Bottom));
    }

    #[test]
    fn carved_paths_are_self_avoiding() {
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);

        for n in 1..=9 {
            let size = dim(n);
            for _ in 0..40 {
                let mut cell = || Location(rng.random_range(0..n as i64) as Coord, rng.random_range(0..n as i64) as Coord);
                let (from, to) = (cell(), cell());
                let path = carve(size, from, to, &mut rng).unwrap();

                assert_eq!(path.first(), Some(&from));
                assert_eq!(path.last(), Some(&to));
                assert!(path.iter().all(|location| location.is_within(size)));
                assert_eq!(path.iter().collect::<HashSet<_>>().len(), path.len());
                for pair in path.windows(2) {
                    assert!(Direction::direction_to(pair[0], pair[1]).is_some(), "{:?} and {:?} are not neighbors", pair[0], pair[1]);
                }
            }
        }
    }

    #[test]
    fn carve_edge_cases() {
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(carve(dim(4), Location(2, 3), Location(2, 3), &mut rng), Ok(vec![Location(2, 3)]));
        assert_eq!(carve(dim(1), Location(0, 0), Location(0, 0), &mut rng), Ok(vec![Location(0, 0)]));
        assert_eq!(carve(dim(4), Location(0, 0), Location(4, 0), &mut rng), Err(GenerationFailure::OffBoard(Location(4, 0))));
        assert_eq!(carve(dim(4), Location(-1, 0), Location(0, 0), &mut rng), Err(GenerationFailure::OffBoard(Location(-1, 0))));
    }

    #[test]
    fn classification() {
        let anchors = Anchors::new(Location(0, -1), Location(2, 3));
        let path = [Location(0, 0), Location(0, 1), Location(1, 1), Location(2, 1), Location(2, 2)];
        let segments = classify(&path, &anchors).unwrap();

        assert_eq!(segments.len(), path.len());
        assert_eq!(
            segments.iter().map(|segment| segment.kind).collect::<Vec<_>>(),
            vec![PipeKind::Straight, PipeKind::Elbow, PipeKind::Straight, PipeKind::Elbow, PipeKind::Straight],
        );
        assert_eq!((segments[1].entry, segments[1].exit), (Direction::Top, Direction::Right));
        assert_eq!(segments[1].aligned_rotation(), Some(Rotation::Deg0));
        assert_eq!(segments[3].aligned_rotation(), Some(Rotation::Deg180));
        assert_eq!(segments[2].aligned_rotation(), Some(Rotation::Deg90));

        assert_eq!(classify(&[], &anchors), Err(GenerationFailure::EmptyPath));
        assert_eq!(
            classify(&[Location(0, 0), Location(0, 2)], &anchors),
            Err(GenerationFailure::Disjoint(Location(0, 0), Location(0, 2))),
        );
    }

    #[test]
    fn classification_follows_axes() {
        for n in 1..=9 {
            for seed in 0..20 {
                let board = PuzzleBuilder::with_size(dim(n)).seed(seed).build().unwrap();
                let path = board.carved_path();

                assert_eq!(path.first().map(|segment| segment.location), Some(board.anchors().start.entry_cell(board.size())));
                assert_eq!(path.last().map(|segment| segment.location), Some(board.anchors().end.entry_cell(board.size())));
                for segment in path {
                    assert_ne!(segment.entry, segment.exit);
                    let straight = segment.entry.axis() == segment.exit.axis();
                    assert_eq!(segment.kind == PipeKind::Straight, straight);
                    assert_eq!(board.get(segment.location).unwrap().kind(), segment.kind);
                }
            }
        }
    }

    #[test]
    fn ids_are_row_major() {
        for n in 1..=9 {
            let board = generate_puzzle(n).unwrap();
            let pipes = board.pipes().collect::<Vec<_>>();

            assert_eq!(pipes.len(), n * n);
            for (index, pipe) in pipes.iter().enumerate() {
                assert_eq!(pipe.id(), index);
                assert_eq!(pipe.location(), Location((index % n) as Coord, (index / n) as Coord));
                assert!(pipe.kind().is_rotatable());
                assert_eq!(board.pipe(index), Some(*pipe));
            }
            assert_eq!(board.pipe(n * n), None);
        }
    }

    #[test]
    fn empty_grid() {
        assert_eq!(generate_puzzle(0).unwrap_err(), GenerationFailure::EmptyGrid);
    }

    #[test]
    fn seeds_reproduce_boards() {
        let first = PuzzleBuilder::with_size(dim(6)).seed(42).build().unwrap();
        let second = PuzzleBuilder::with_size(dim(6)).seed(42).build().unwrap();

        assert_eq!(format!("{}", first), format!("{}", second));
        assert_eq!(first.carved_path(), second.carved_path());
    }

    #[test]
    fn aligned_path_validates() {
        for n in 1..=9 {
            for seed in 0..25 {
                let mut board = PuzzleBuilder::with_size(dim(n)).seed(seed).build().unwrap();
                align(&mut board);

                assert!(board.validate(), "aligned {n}x{n} board (seed {seed}) does not validate:\n{board}");
                assert!(reachable(&board).contains(&board.anchors().end.location()));
            }
        }
    }

    #[test]
    fn cut_off_start_does_not_validate() {
        for n in 1..=9 {
            for seed in 0..25 {
                let mut board = PuzzleBuilder::with_size(dim(n)).seed(seed).build().unwrap();
                align(&mut board);
                cut_off_start(&mut board);

                assert!(!board.validate(), "{n}x{n} board (seed {seed}) validates without its start:\n{board}");
                assert_eq!(reachable(&board), vec![board.anchors().start.location()]);
            }
        }
    }

    #[test]
    fn validation_is_deterministic() {
        for seed in 0..30 {
            let board = PuzzleBuilder::with_size(dim(5)).seed(seed).build().unwrap();
            let verdict = board.validate();

            for _ in 0..3 {
                assert_eq!(board.validate(), verdict);
            }
        }
    }

    #[test]
    fn four_rotations_change_nothing() {
        let mut board = PuzzleBuilder::with_size(dim(4)).seed(9).build().unwrap();
        let before = format!("{}", board);
        let verdict = board.validate();

        for id in 0..16 {
            let rotation = board.pipe(id).unwrap().rotation();
            for _ in 0..4 {
                assert!(board.rotate_cell(id));
            }
            assert_eq!(board.pipe(id).unwrap().rotation(), rotation);
        }

        assert_eq!(format!("{}", board), before);
        assert_eq!(board.validate(), verdict);
    }

    #[test]
    fn rotating_unknown_cells() {
        let mut board = PuzzleBuilder::with_size(dim(3)).seed(3).build().unwrap();
        let before = format!("{}", board);

        assert!(!board.rotate_cell(9));
        assert!(!board.rotate_cell(usize::MAX));
        assert!(!board.rotate_at(Location(-1, 0)));
        assert!(!board.rotate_at(Location(0, 3)));
        assert_eq!(format!("{}", board), before);

        let rotation = board.pipe(4).unwrap().rotation();
        assert!(board.rotate_cell(4));
        assert_eq!(board.pipe(4).unwrap().rotation(), rotation.next());
    }

    #[test]
    fn straight_column() {
        let column = (0..5).map(|y| Location(2, y)).collect::<Vec<_>>();
        let mut board = PuzzleBuilder::with_size(dim(5))
            .seed(5)
            .anchors(Location(2, -1), Location(2, 5))
            .path(column)
            .build()
            .unwrap();

        assert!(board.carved_path().iter().all(|segment| segment.kind == PipeKind::Straight));
        align(&mut board);
        assert!(board.validate());

        // a quarter turn in the middle breaks the only way through
        assert!(board.rotate_at(Location(2, 2)));
        assert!(!board.validate());
        assert!(!reachable(&board).contains(&Location(2, 2)));

        assert!(board.rotate_at(Location(2, 2)));
        assert!(board.validate());
    }

    #[test]
    fn single_cell() {
        for seed in 0..20 {
            let mut board = PuzzleBuilder::with_size(dim(1)).seed(seed).build().unwrap();

            assert_eq!(board.pipes().count(), 1);
            assert_eq!(board.carved_path().len(), 1);
            assert_eq!(board.carved_path()[0].kind, PipeKind::Straight);

            align(&mut board);
            assert!(board.validate());
            assert!(board.rotate_cell(0));
            assert!(!board.validate());
        }

        let through = board_from(&["│"], Location(0, -1), Location(0, 1));
        assert!(through.validate());
        let corner = board_from(&["└"], Location(0, -1), Location(1, 0));
        assert!(corner.validate());
        let corner = board_from(&["┌"], Location(0, -1), Location(1, 0));
        assert!(!corner.validate());
    }

    #[test]
    fn end_found_through_any_neighbor() {
        // the branch to the right is explored after the end anchor has been reached
        let board = board_from(&[
            "│┼─┐",
            "││││",
            "││││",
            "││││",
        ], Location(1, -1), Location(1, 4));

        let order = reachable(&board);
        let end = board.anchors().end;
        let last_cell = order.iter().filter(|location| location.is_within(board.size())).last().copied();

        assert_eq!(last_cell, Some(Location(3, 3)));
        assert_ne!(last_cell, Some(end.entry_cell(board.size())));
        assert!(board.validate());
    }

    #[test]
    fn display() {
        let board = board_from(&[
            "│┼─┐",
            "││││",
            "││││",
            "││││",
        ], Location(1, -1), Location(1, 4));

        assert_eq!(format!("{}", board), "  S
 │┼─┐
 ││││
 ││││
 ││││
  E
");

        let board = board_from(&[
            "┌─┐",
            "│┘└",
            "└─┘",
        ], Location(-1, 0), Location(3, 2));

        assert_eq!(format!("{}", board), "
S┌─┐
 │┘└
 └─┘E

");
        assert!(!board.validate());

        let board = board_from(&["─"], Location(-1, 0), Location(1, 0));
        assert_eq!(format!("{}", board), "
S─E

");
        assert!(board.validate());
    }

    #[test]
    fn display_frames_generated_boards() {
        for n in 1..=9 {
            let board = generate_puzzle(n).unwrap();
            let text = format!("{}", board);

            assert_eq!(text.lines().count(), n + 2);
            assert_eq!(text.matches('S').count(), 1);
            assert_eq!(text.matches('E').count(), 1);
            assert!(!text.contains('?'));
        }
    }

    #[test]
    fn builder_invalid_reasons() {
        let size = dim(3);

        let mut builder = PuzzleBuilder::with_size(size);
        builder.anchors(Location(1, 1), Location(1, 3));
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::AnchorOffBoundary(Location(1, 1))]));
        assert_eq!(
            builder.build().unwrap_err(),
            GenerationFailure::InvalidBuilder(vec![BuilderInvalidReason::AnchorOffBoundary(Location(1, 1))]),
        );

        let mut builder = PuzzleBuilder::with_size(size);
        builder.anchors(Location(-1, -1), Location(1, 3));
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::AnchorOffBoundary(Location(-1, -1))]));

        let mut builder = PuzzleBuilder::with_size(size);
        builder.anchors(Location(1, 3), Location(1, 3));
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::AnchorsCoincide]));

        assert_eq!(
            PuzzleBuilder::with_size(size).path(vec![Location(0, 0)]).build().unwrap_err(),
            GenerationFailure::InvalidBuilder(vec![BuilderInvalidReason::PathWithoutAnchors]),
        );

        let mut anchored = PuzzleBuilder::with_size(size);
        anchored.anchors(Location(1, -1), Location(1, 3));
        assert_eq!(anchored.is_valid(), None);

        assert_eq!(anchored.clone().path(Vec::new()).build().unwrap_err(), GenerationFailure::EmptyPath);
        assert_eq!(
            anchored.clone().path(vec![Location(1, 0), Location(1, 1), Location(1, 0), Location(1, 1), Location(1, 2)]).build().unwrap_err(),
            GenerationFailure::InvalidBuilder(vec![BuilderInvalidReason::PathRevisits(Location(1, 0))]),
        );
        assert_eq!(
            anchored.clone().path(vec![Location(1, 0), Location(1, 1)]).build().unwrap_err(),
            GenerationFailure::InvalidBuilder(vec![BuilderInvalidReason::PathMisanchored]),
        );
        assert_eq!(
            anchored.clone().path(vec![Location(1, 0), Location(1, 1), Location(1, 2), Location(1, 3)]).build().unwrap_err(),
            GenerationFailure::InvalidBuilder(vec![BuilderInvalidReason::PathOffBoard(Location(1, 3)), BuilderInvalidReason::PathMisanchored]),
        );
        assert_eq!(
            anchored.clone().path(vec![Location(1, 0), Location(1, 2)]).build().unwrap_err(),
            GenerationFailure::Disjoint(Location(1, 0), Location(1, 2)),
        );

        // an invalid builder ignores further calls
        let mut builder = PuzzleBuilder::with_size(size);
        builder.anchors(Location(1, 1), Location(1, 3)).anchors(Location(1, -1), Location(1, 3));
        assert_eq!(builder.is_valid().map(Vec::len), Some(1));
    }

    #[test]
    fn solve_generated() {
        for n in 1..=6 {
            for seed in 0..10 {
                let board = PuzzleBuilder::with_size(dim(n)).seed(seed).build().unwrap();
                let solved = board.solve().unwrap();
                assert!(solved.validate(), "solver output for {n}x{n} (seed {seed}) does not validate:\n{solved}");
            }
        }
    }

    #[test]
    fn solve_hand_made() {
        let board = board_from(&[
            "┐─┌",
            "│─│",
            "┘─└",
        ], Location(1, -1), Location(1, 3));
        assert!(!board.validate());

        let column = (-1..=3).map(|y| Location(1, y)).collect::<Vec<_>>();
        let solution = RotationSolver::from(&board).solve().unwrap();
        let links: HashSet<UnorderedPair<Location>> = column.windows(2)
            .map(|pair| UnorderedPair(pair[0], pair[1]))
            .collect();
        assert!(solution.links == links);
        assert_eq!(
            solution.rotations.keys().copied().collect::<HashSet<_>>(),
            column[1..4].iter().copied().collect::<HashSet<_>>(),
        );

        let solved = board.solve().unwrap();
        assert!(solved.validate());
        // only the middle column lies on the route
        assert_eq!(format!("{}", solved), "  S
 ┐│┌
 │││
 ┘│└
  E
");
    }

    #[test]
    fn solve_inconsistent() {
        let board = board_from(&["└"], Location(0, -1), Location(0, 1));
        assert_eq!(board.solve().err(), Some(SolverFailure::Inconsistent));

        let board = board_from(&["─"], Location(0, -1), Location(1, 0));
        assert_eq!(board.solve().err(), Some(SolverFailure::Inconsistent));
    }

    #[test]
    fn difficulty_presets() {
        assert_eq!(Difficulty::default(), Difficulty::Normal);
        assert_eq!(Difficulty::Easy.grid_size().get(), 5);
        assert_eq!(Difficulty::Hard.grid_size().get(), 9);
        assert_eq!(Difficulty::Easy.time_limit(), Duration::from_secs(90));
        assert_eq!(Difficulty::Hard.time_limit(), Duration::from_secs(30));

        assert_eq!(Difficulty::from_str("hard"), Ok(Difficulty::Hard));
        assert!(Difficulty::from_str("impossible").is_err());
        assert_eq!(Difficulty::Easy.to_string(), "easy");
        assert_eq!(Difficulty::for_grid_size(7), Some(Difficulty::Normal));
        assert_eq!(Difficulty::for_grid_size(6), None);
    }

    #[test]
    fn game_won() {
        let mut game = Game::with_seed(Difficulty::Easy, 11);
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.board().map(Board::size), Some(dim(5)));
        assert_eq!(game.countdown().remaining(), Duration::from_secs(90));
        assert!(game.countdown().is_running());

        if let Some(board) = game.board.as_mut() {
            align(board);
            cut_off_start(board);
        }
        assert_eq!(game.check(), Some(Notice::NotValid));
        assert_eq!(Notice::NotValid.to_string(), "Grid is not valid, try again!");
        assert_eq!(game.state(), GameState::Playing);

        if let Some(board) = game.board.as_mut() {
            align(board);
        }
        game.tick();
        assert_eq!(game.check(), None);
        assert_eq!(game.state(), GameState::Won);
        assert_eq!(game.state().banner(), Some("YOU WON"));
        assert!(!game.countdown().is_running());
        assert_eq!(game.countdown().remaining(), Duration::from_secs(89));

        // the board is frozen once won
        let before = game.board().map(|board| format!("{}", board));
        assert!(!game.rotate(0));
        assert!(!game.rotate_at(Location(0, 0)));
        assert_eq!(game.board().map(|board| format!("{}", board)), before);

        game.tick();
        assert_eq!(game.countdown().remaining(), Duration::from_secs(89));
        assert_eq!(game.check(), None);
        assert_eq!(game.state(), GameState::Won);
    }

    #[test]
    fn game_lost() {
        let mut game = Game::with_seed(Difficulty::Normal, 5);

        for _ in 0..59 {
            game.tick();
        }
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.countdown().remaining(), Duration::from_secs(1));
        assert!(game.rotate(0));

        game.tick();
        assert_eq!(game.state(), GameState::Lost);
        assert_eq!(game.state().banner(), Some("You Lost"));
        assert!(!game.countdown().is_running());
        assert!(!game.rotate(0));
        assert_eq!(game.check(), None);

        game.tick();
        assert_eq!(game.state(), GameState::Lost);
        assert_eq!(game.countdown().remaining(), Duration::ZERO);
    }

    #[test]
    fn game_restart_and_resize() {
        let mut game = Game::with_seed(Difficulty::Normal, 8);
        for _ in 0..60 {
            game.tick();
        }
        assert_eq!(game.state(), GameState::Lost);

        let notice = game.restart();
        assert_eq!(notice, Notice::Restarted);
        assert_eq!(notice.to_string(), "Game restarted");
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.state().banner(), None);
        assert_eq!(game.countdown().remaining(), Duration::from_secs(60));
        assert!(game.countdown().is_running());

        let notice = game.set_difficulty(Difficulty::Hard);
        assert_eq!(notice, Notice::GridResized(9));
        assert_eq!(notice.to_string(), "Grid size changed to: 9x9");
        assert_eq!(game.difficulty(), Difficulty::Hard);
        assert_eq!(game.board().map(|board| board.pipes().count()), Some(81));
        assert_eq!(game.countdown().remaining(), Duration::from_secs(30));
    }

    #[test]
    fn game_resize_by_grid_size() {
        let mut game = Game::with_seed(Difficulty::Normal, 4);

        assert_eq!(game.resize(5), Some(Notice::GridResized(5)));
        assert_eq!(game.difficulty(), Difficulty::Easy);
        assert_eq!(game.board().map(Board::size), Some(dim(5)));
        assert_eq!(game.countdown().remaining(), Duration::from_secs(90));

        assert_eq!(game.resize(6), None);
        assert_eq!(game.difficulty(), Difficulty::Easy);
        assert_eq!(game.board().map(Board::size), Some(dim(5)));
    }

    #[test]
    fn game_without_board() {
        let mut game = Game::with_seed(Difficulty::Easy, 2);
        game.board = None;

        assert_eq!(game.check(), Some(Notice::NotValid));
        assert!(!game.rotate(0));
        assert!(!game.rotate_at(Location(0, 0)));
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn clicks_map_to_cells() {
        let size = dim(5);

        assert_eq!(cell_at(50.0, 50.0, size), Some(Location(0, 0)));
        assert_eq!(cell_at(219.9, 50.0, size), Some(Location(0, 0)));
        assert_eq!(cell_at(220.0, 50.0, size), Some(Location(1, 0)));
        assert_eq!(cell_at(899.0, 899.0, size), Some(Location(4, 4)));
        assert_eq!(cell_at(400.0, 650.0, size), Some(Location(2, 3)));

        assert_eq!(cell_at(49.0, 60.0, size), None);
        assert_eq!(cell_at(60.0, 10.0, size), None);
        assert_eq!(cell_at(900.0, 100.0, size), None);
        assert_eq!(cell_at(f64::NAN, 100.0, size), None);
    }

    #[test]
    fn sprites() {
        let size = dim(5);
        let straight = Pipe::new(11, PipeKind::Straight, Location(1, 2), Rotation::Deg90);
        let sprite = pipe_sprite(&straight, size);

        assert_eq!(sprite.centre, (305.0, 475.0));
        assert!((sprite.angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(sprite.rects, vec![Rect { x: -21.25, y: -85.0, width: 42.5, height: 170.0 }]);

        let elbow = Pipe::new(0, PipeKind::Elbow, Location(0, 0), Rotation::Deg0);
        let sprite = pipe_sprite(&elbow, size);
        assert_eq!(sprite.centre, (135.0, 135.0));
        assert_eq!(sprite.angle, 0.0);
        assert_eq!(sprite.rects.len(), 2);
    }

    #[test]
    fn anchor_markers() {
        let size = dim(5);
        let marker = |anchor: Anchor| anchor_marker(&anchor, size);

        assert_eq!(marker(Anchor::start(Location(2, -1))), Rect { x: 450.0, y: 0.0, width: 50.0, height: 50.0 });
        assert_eq!(marker(Anchor::end(Location(2, 5))), Rect { x: 450.0, y: 900.0, width: 50.0, height: 50.0 });
        assert_eq!(marker(Anchor::start(Location(-1, 3))), Rect { x: 0.0, y: 620.0, width: 50.0, height: 50.0 });
        assert_eq!(marker(Anchor::end(Location(5, 1))), Rect { x: 900.0, y: 280.0, width: 50.0, height: 50.0 });
    }
}
