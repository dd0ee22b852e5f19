//! Game state around the [`Engine`]: gravity, column validation and turns.

use crate::engine::{Engine, EngineError};
use crate::{Dimensions, Move, Player};
use core::error::Error;
use tracing::debug;

#[derive(Debug, PartialOrd, PartialEq, Clone, Copy, Eq, derive_more::Display)]
pub enum GameError {
    /// Column is full.
    #[display("column {} is full", _0)]
    ColumnFull(usize),
    #[display("column {} is not on the board", _0)]
    InvalidColumn(usize),
    /// The game was already won.
    #[display("{} already won the game", _0)]
    IllegalContinuation(Player),
}

impl Error for GameError {}

impl From<EngineError> for GameError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::IllegalContinuation(winner) => Self::IllegalContinuation(winner),
        }
    }
}

/// Game with all its state.
#[derive(Debug, Clone)]
pub struct Game {
    engine: Engine,
    /// Chips per column, i.e., the row the next chip in that column lands in.
    heights: Vec<usize>,
    round: usize,
    next_player: Player,
}

impl Game {
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            engine: Engine::new(dimensions),
            heights: vec![0; dimensions.columns],
            round: 0,
            next_player: Player::Player1,
        }
    }

    /// Drops a chip of the player to move into `column_index`.
    ///
    /// Returns the player if this move won the game.
    pub fn insert_chip(&mut self, column_index: usize) -> Result<Option<Player>, GameError> {
        if let Some(winner) = self.engine.winner() {
            return Err(GameError::IllegalContinuation(winner));
        }

        let dimensions = *self.engine.dimensions();
        let height = self
            .heights
            .get_mut(column_index)
            .ok_or(GameError::InvalidColumn(column_index))?;
        if *height >= dimensions.rows {
            return Err(GameError::ColumnFull(column_index));
        }

        let player = self.next_player;
        let won = self.engine.apply(Move::new(column_index, *height, player))?;
        *height += 1;
        self.round += 1;
        self.next_player = player.opponent();

        if won {
            debug!(%player, round = self.round, "game won");
            return Ok(Some(player));
        }
        Ok(None)
    }

    #[must_use]
    pub const fn dimensions(&self) -> &Dimensions {
        self.engine.dimensions()
    }

    #[must_use]
    pub const fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Number of moves played so far.
    #[must_use]
    pub const fn round(&self) -> usize {
        self.round
    }

    #[must_use]
    pub const fn winner(&self) -> Option<Player> {
        self.engine.winner()
    }

    #[must_use]
    pub const fn next_player(&self) -> Player {
        self.next_player
    }

    /// Number of chips in the given column.
    #[must_use]
    pub fn height_of(&self, column: usize) -> Option<usize> {
        self.heights.get(column).copied()
    }

    /// Returns whether there are no legal moves left.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.round == self.engine.dimensions().capacity()
    }
}
