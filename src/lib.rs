//! Connect-N referee with incremental win detection.
//!
//! Games are played on boards of arbitrary width and height; chips are
//! dropped into columns and the first player to line up `line_length`
//! chips vertically, horizontally or diagonally wins. Instead of scanning
//! the board after every move, the [`Engine`] keeps per-cell run lengths
//! along each axis and merges them when a chip is placed, so a move costs
//! a constant number of lookups and writes no matter how big the board or
//! how long the winning line is.
//!
//! The crate is layered like this:
//! - [`engine`]: run-length bookkeeping and win detection for resolved moves
//! - [`game`]: gravity, column validation and player alternation
//! - [`input`]: the game description file format
//! - [`outcome`]: mapping of a whole game to its result code
//! - [`render`]: debug text output
//! - [`generator`]: synthetic games for performance runs

#![deny(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::must_use_candidate,
    // clippy::restriction,
    // clippy::pedantic
)]
// now allow a few rules which are denied by the above statement
#![allow(
    clippy::suboptimal_flops,
    clippy::redundant_pub_crate,
    clippy::multiple_crate_versions,
    clippy::cargo_common_metadata
)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::all)]

pub mod engine;
pub mod game;
pub mod generator;
pub mod input;
pub mod outcome;
pub mod render;

pub use engine::{Axis, DirectionStatus, Engine, EngineError};
pub use game::{Game, GameError};
pub use input::{GameDescription, InputError};
pub use outcome::{Outcome, evaluate, evaluate_game, evaluate_path, evaluate_path_with_game};

use core::fmt;

/// One of the two players. Player 1 always moves first.
#[derive(Copy, Clone, PartialOrd, PartialEq, Eq, Hash, Debug)]
pub enum Player {
    Player1,
    Player2,
}

impl Player {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player1 => Self::Player2,
            Self::Player2 => Self::Player1,
        }
    }

    /// 1 for [`Player::Player1`], 2 for [`Player::Player2`].
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Player1 => 1,
            Self::Player2 => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.number())
    }
}

/// Board size and the length of the line needed to win.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Dimensions {
    pub columns: usize,
    pub rows: usize,
    pub line_length: usize,
}

impl Dimensions {
    #[must_use]
    pub const fn new(columns: usize, rows: usize, line_length: usize) -> Self {
        Self {
            columns,
            rows,
            line_length,
        }
    }

    /// Number of cells, i.e., the number of moves that fill the board.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.columns * self.rows
    }

    /// Whether a line of `line_length` fits on the board at all.
    ///
    /// Diagonals are never longer than the shorter side, so the longer side
    /// decides.
    #[must_use]
    pub fn is_winnable(&self) -> bool {
        self.line_length <= self.columns.max(self.rows)
    }

    #[must_use]
    pub const fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.column < self.columns && coordinate.row < self.rows
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.columns, self.rows, self.line_length)
    }
}

/// Cell position, 0-based. `(column=0, row=0)` is the bottom left cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Coordinate {
    pub column: usize,
    pub row: usize,
}

impl Coordinate {
    #[must_use]
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// Moves `steps` times by `(d_column, d_row)`.
    ///
    /// Returns `None` if the result leaves the board.
    #[must_use]
    pub fn offset(
        self,
        (d_column, d_row): (isize, isize),
        steps: usize,
        dimensions: &Dimensions,
    ) -> Option<Self> {
        let steps = isize::try_from(steps).ok()?;
        let column = self
            .column
            .checked_add_signed(d_column.checked_mul(steps)?)?;
        let row = self.row.checked_add_signed(d_row.checked_mul(steps)?)?;
        let target = Self::new(column, row);
        dimensions.contains(target).then_some(target)
    }
}

/// A chip placed by `player` at an already resolved position.
///
/// The row must be the lowest free row of the column; [`Game`] takes care
/// of that before handing moves to the [`Engine`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Move {
    pub column: usize,
    pub row: usize,
    pub player: Player,
}

impl Move {
    #[must_use]
    pub const fn new(column: usize, row: usize, player: Player) -> Self {
        Self {
            column,
            row,
            player,
        }
    }

    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.column, self.row)
    }
}
