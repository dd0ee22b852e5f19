//! Result of a whole game and its numeric code.

use crate::game::{Game, GameError};
use crate::input::{GameDescription, InputError};
use crate::Player;
use core::fmt::{self, Formatter};
use std::path::Path;
use tracing::{debug, instrument};

/// Verdict for a game description. The discriminant is the printed code.
#[derive(Debug, PartialOrd, PartialEq, Clone, Copy, Eq, Hash)]
pub enum Outcome {
    /// The board is full without a winner.
    Draw = 0,
    PlayerOneWins = 1,
    PlayerTwoWins = 2,
    /// Moves ran out before anybody won or the board filled up.
    Incomplete = 3,
    /// A move followed the winning move.
    IllegalContinue = 4,
    /// A move was made into a full column.
    IllegalRow = 5,
    /// A move named a column that is not on the board.
    IllegalColumn = 6,
    /// No line of the requested length fits on the board.
    IllegalGame = 7,
    /// The file contents could not be parsed.
    InvalidFile = 8,
    /// The file could not be opened.
    FileError = 9,
}

impl Outcome {
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn win_for(player: Player) -> Self {
        match player {
            Player::Player1 => Self::PlayerOneWins,
            Player::Player2 => Self::PlayerTwoWins,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<GameError> for Outcome {
    fn from(err: GameError) -> Self {
        match err {
            GameError::ColumnFull(_) => Self::IllegalRow,
            GameError::InvalidColumn(_) => Self::IllegalColumn,
            GameError::IllegalContinuation(_) => Self::IllegalContinue,
        }
    }
}

impl From<&InputError> for Outcome {
    fn from(err: &InputError) -> Self {
        match err {
            InputError::Open(_) => Self::FileError,
            InputError::Malformed { .. } => Self::InvalidFile,
        }
    }
}

/// Plays all moves of `description` and judges the result.
#[must_use]
pub fn evaluate(description: &GameDescription) -> Outcome {
    evaluate_game(description).0
}

/// Like [`evaluate`], but also hands back the game as it stood when the
/// verdict was reached.
#[must_use]
pub fn evaluate_game(description: &GameDescription) -> (Outcome, Option<Game>) {
    if !description.is_winnable() {
        debug!(dimensions = %description.dimensions, "line can never be completed");
        return (Outcome::IllegalGame, None);
    }

    let mut game = Game::new(description.dimensions);
    for &column in &description.moves {
        // 1-based in the file; anything that doesn't map to an index is off the board.
        let index = usize::try_from(column)
            .ok()
            .and_then(|column| column.checked_sub(1))
            .unwrap_or(usize::MAX);
        if let Err(err) = game.insert_chip(index) {
            debug!(%err, round = game.round(), "illegal move");
            return (Outcome::from(err), Some(game));
        }
    }

    let outcome = match game.winner() {
        Some(player) => Outcome::win_for(player),
        None if game.is_full() => Outcome::Draw,
        None => Outcome::Incomplete,
    };
    debug!(%outcome, rounds = game.round(), "game evaluated");
    (outcome, Some(game))
}

/// Reads and evaluates a game file.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn evaluate_path(path: impl AsRef<Path>) -> Outcome {
    evaluate_path_with_game(path).0
}

/// Like [`evaluate_path`], but also hands back the game if the file could be
/// parsed and the game is winnable.
pub fn evaluate_path_with_game(path: impl AsRef<Path>) -> (Outcome, Option<Game>) {
    match GameDescription::from_path(path) {
        Ok(description) => evaluate_game(&description),
        Err(err) => {
            debug!(%err, "rejected game file");
            (Outcome::from(&err), None)
        }
    }
}
