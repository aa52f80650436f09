//! A timed play session around one board at a time.

use std::fmt::{Display, Formatter};
use std::time::Duration;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strum::{Display as StrumDisplay, EnumString, VariantArray};

use crate::board::Board;
use crate::builder::PuzzleBuilder;
use crate::location::{Dimension, Location};
use crate::pipe::PipeId;

/// Grid size and time limit presets.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, VariantArray, StrumDisplay, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// 5×5 in 90 seconds.
    Easy,
    /// 7×7 in 60 seconds.
    #[default]
    Normal,
    /// 9×9 in 30 seconds.
    Hard,
}

impl Difficulty {
    /// Side length of the board.
    pub const fn grid_size(&self) -> Dimension {
        let size = match self {
            Self::Easy => Dimension::new(5),
            Self::Normal => Dimension::new(7),
            Self::Hard => Dimension::new(9),
        };

        match size {
            Some(size) => size,
            None => Dimension::MIN,
        }
    }

    /// Time allowed to connect the board before the game is lost.
    pub const fn time_limit(&self) -> Duration {
        match self {
            Self::Easy => Duration::from_secs(90),
            Self::Normal => Duration::from_secs(60),
            Self::Hard => Duration::from_secs(30),
        }
    }

    /// The preset played on an `size`×`size` grid, if any.
    pub fn for_grid_size(size: usize) -> Option<Self> {
        Self::VARIANTS.iter().find(|difficulty| difficulty.grid_size().get() == size).copied()
    }
}

/// Where a [`Game`] stands.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum GameState {
    /// Rotations and checks are accepted.
    #[default]
    Playing,
    /// Terminal until restarted.
    Won,
    /// Terminal until restarted.
    Lost,
}

impl GameState {
    /// The end-of-game banner, if the game is over.
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            Self::Playing => None,
            Self::Won => Some("YOU WON"),
            Self::Lost => Some("You Lost"),
        }
    }
}

/// Short-lived messages for the player.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Notice {
    /// A check found the anchors unconnected, or there was no board to check.
    NotValid,
    /// A fresh board was dealt at the same size.
    Restarted,
    /// A fresh board was dealt at this new side length.
    GridResized(usize),
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotValid => write!(f, "Grid is not valid, try again!"),
            Self::Restarted => write!(f, "Game restarted"),
            Self::GridResized(size) => write!(f, "Grid size changed to: {size}x{size}"),
        }
    }
}

/// A one-second countdown driven by [`Countdown::tick`].
///
/// There is only ever one per game: restarting resets it in place.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Countdown {
    remaining: Duration,
    running: bool,
}

impl Countdown {
    const STEP: Duration = Duration::from_secs(1);

    fn started(limit: Duration) -> Self {
        Self { remaining: limit, running: true }
    }

    fn stopped(limit: Duration) -> Self {
        Self { remaining: limit, running: false }
    }

    /// Time left on the clock.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Whether [`Game::tick`] still counts down.
    pub fn is_running(&self) -> bool {
        self.running
    }

    fn stop(&mut self) {
        self.running = false;
    }

    /// Count down one second. Returns `true` when this tick runs the clock out.
    fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }

        self.remaining = self.remaining.saturating_sub(Self::STEP);
        if self.remaining.is_zero() {
            self.running = false;
            return true;
        }

        false
    }
}

/// One play session: the board, the clock and the outcome.
pub struct Game {
    pub(crate) difficulty: Difficulty,
    pub(crate) board: Option<Board>,
    pub(crate) state: GameState,
    pub(crate) countdown: Countdown,
    rng: StdRng,
}

impl Game {
    /// Start a game at `difficulty` with fresh randomness.
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_seed(difficulty, rand::random())
    }

    /// Start a game whose every board is drawn from a generator seeded with `seed`.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        let mut game = Self {
            difficulty,
            board: None,
            state: GameState::Playing,
            countdown: Countdown::stopped(difficulty.time_limit()),
            rng: StdRng::seed_from_u64(seed),
        };
        game.deal();
        game
    }

    /// Replace the board and reset the clock, or leave no board and a stopped clock if generation fails.
    fn deal(&mut self) {
        let board = PuzzleBuilder::with_size(self.difficulty.grid_size())
            .seed(self.rng.random())
            .build();

        self.state = GameState::Playing;
        match board {
            Ok(board) => {
                self.board = Some(board);
                self.countdown = Countdown::started(self.difficulty.time_limit());
            }
            Err(failure) => {
                warn!("no {} puzzle dealt: {failure}", self.difficulty);
                self.board = None;
                self.countdown = Countdown::stopped(self.difficulty.time_limit());
            }
        }
    }

    /// The preset the current board was dealt at.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The board in play, or [`None`] if the last deal failed.
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Whether the game is on, won or lost.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// The clock for the current board.
    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Turn the cell with `id`, if the game is still on and such a cell exists.
    pub fn rotate(&mut self, id: PipeId) -> bool {
        match (&mut self.board, self.state) {
            (Some(board), GameState::Playing) => board.rotate_cell(id),
            _ => false,
        }
    }

    /// Turn the cell at `location`, if the game is still on and the location is on the board.
    pub fn rotate_at(&mut self, location: Location) -> bool {
        match (&mut self.board, self.state) {
            (Some(board), GameState::Playing) => board.rotate_at(location),
            _ => false,
        }
    }

    /// Validate the board as it stands. A connected board wins the game and stops the clock;
    /// anything else, including having no board at all, earns a [`Notice::NotValid`].
    pub fn check(&mut self) -> Option<Notice> {
        if self.state != GameState::Playing {
            return None;
        }

        let Some(board) = &self.board else {
            warn!("validation requested with no board dealt");
            return Some(Notice::NotValid);
        };

        if board.validate() {
            info!("board connected with {:?} to spare", self.countdown.remaining());
            self.countdown.stop();
            self.state = GameState::Won;
            None
        } else {
            Some(Notice::NotValid)
        }
    }

    /// Advance the clock by one second; running out loses the game.
    pub fn tick(&mut self) {
        if self.state != GameState::Playing {
            self.countdown.stop();
            return;
        }

        if self.countdown.tick() {
            info!("time ran out on a {} board", self.difficulty);
            self.state = GameState::Lost;
        }
    }

    /// Deal a new board at the current difficulty.
    pub fn restart(&mut self) -> Notice {
        self.deal();
        Notice::Restarted
    }

    /// Switch presets and deal a new board at the new size.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Notice {
        self.difficulty = difficulty;
        self.deal();
        Notice::GridResized(difficulty.grid_size().get())
    }

    /// Switch to the preset played on a `grid_size`×`grid_size` board.
    ///
    /// Sizes without a preset are ignored and return [`None`].
    pub fn resize(&mut self, grid_size: usize) -> Option<Notice> {
        match Difficulty::for_grid_size(grid_size) {
            Some(difficulty) => Some(self.set_difficulty(difficulty)),
            None => {
                warn!("no preset for a {grid_size}x{grid_size} grid");
                None
            }
        }
    }
}
