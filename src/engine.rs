//! Incremental win detection.
//!
//! Every occupied cell stores one [`DirectionStatus`] per [`Axis`]. When a
//! chip lands, only its direct neighbors along each axis are consulted.
//! Their records carry the length of the run they terminate, which is all
//! that is needed to compute the length of the run through the new chip and
//! to locate the far endpoints of the runs being joined. At most three cells
//! are written per axis, so a move costs O(1) regardless of board size or
//! line length.
//!
//! Invariant: a cell that ends a run and still borders an empty cell on the
//! outside holds the full length of its run, and its `complete` flag is only
//! set if the opposite end of the run can never grow. Interior cells may keep
//! stale lengths; they are never read again.

use crate::{Coordinate, Dimensions, Move, Player};
use core::error::Error;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Direction along which lines are counted.
#[derive(Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash, Debug)]
pub enum Axis {
    /// Bottom to top.
    Vertical,
    /// Left to right.
    Horizontal,
    /// Bottom left to top right (`/`).
    DiagonalA,
    /// Top left to bottom right (`\`).
    DiagonalB,
}

impl Axis {
    pub const ALL: [Self; 4] = [
        Self::Vertical,
        Self::Horizontal,
        Self::DiagonalA,
        Self::DiagonalB,
    ];

    /// Offset `(column, row)` towards the positive side of the axis. The
    /// negative side is the negated offset.
    #[must_use]
    pub const fn step(self) -> (isize, isize) {
        match self {
            Self::Vertical => (0, 1),
            Self::Horizontal => (1, 0),
            Self::DiagonalA => (1, 1),
            Self::DiagonalB => (1, -1),
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Run bookkeeping of one cell along one axis.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct DirectionStatus {
    /// Owner of the run.
    pub player: Player,
    /// Number of consecutive chips of `player` this record accounts for.
    pub n: usize,
    /// Set if the run can't grow on the side facing away from the reader,
    /// i.e., it hit the board edge or an opponent chip there.
    pub complete: bool,
}

impl DirectionStatus {
    #[must_use]
    pub const fn new(player: Player, n: usize, complete: bool) -> Self {
        Self {
            player,
            n,
            complete,
        }
    }
}

/// Errors reported by the [`Engine`].
#[derive(Debug, PartialOrd, PartialEq, Clone, Copy, Eq, derive_more::Display)]
pub enum EngineError {
    /// A move was applied after the game was already won.
    #[display("{} already won, no further moves are accepted", _0)]
    IllegalContinuation(Player),
}

impl Error for EngineError {}

/// What the engine sees in a neighboring position.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Neighbor {
    Edge,
    Empty,
    Occupied(DirectionStatus),
}

/// A neighbor classified from the point of view of the player moving.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Flank {
    /// Nothing there yet. A later chip may extend the run on this side.
    Open,
    /// Board edge or opponent chip.
    Capped,
    /// A run of the moving player. `capped` refers to its far end.
    Run { n: usize, capped: bool },
}

impl Flank {
    fn classify(neighbor: Neighbor, mover: Player) -> Self {
        match neighbor {
            Neighbor::Edge => Self::Capped,
            Neighbor::Empty => Self::Open,
            Neighbor::Occupied(status) if status.player == mover => Self::Run {
                n: status.n,
                capped: status.complete,
            },
            Neighbor::Occupied(_) => Self::Capped,
        }
    }

    /// Number of own chips contributed by this side.
    const fn run(self) -> usize {
        match self {
            Self::Run { n, .. } => n,
            Self::Open | Self::Capped => 0,
        }
    }

    /// Whether the merged run can never grow on this side.
    const fn capped(self) -> bool {
        match self {
            Self::Open => false,
            Self::Capped => true,
            Self::Run { capped, .. } => capped,
        }
    }
}

/// Sparse per-cell storage. Only occupied cells have an entry.
#[derive(Debug, Clone, Default)]
struct RunStore {
    cells: HashMap<usize, [DirectionStatus; 4]>,
}

impl RunStore {
    fn get(&self, key: usize, axis: Axis) -> Option<DirectionStatus> {
        self.cells.get(&key).map(|statuses| statuses[axis.index()])
    }

    fn set(&mut self, key: usize, axis: Axis, status: DirectionStatus) {
        // Endpoints are occupied, hence always present.
        if let Some(statuses) = self.cells.get_mut(&key) {
            statuses[axis.index()] = status;
        }
    }

    fn insert(&mut self, key: usize, statuses: [DirectionStatus; 4]) {
        self.cells.insert(key, statuses);
    }

    fn len(&self) -> usize {
        self.cells.len()
    }
}

/// Incremental win detector for one game.
///
/// Moves must be valid: inside the board, on top of their column and with
/// alternating players. The engine trusts its caller on all of this.
#[derive(Debug, Clone)]
pub struct Engine {
    dimensions: Dimensions,
    store: RunStore,
    winner: Option<Player>,
}

impl Engine {
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            store: RunStore::default(),
            winner: None,
        }
    }

    #[must_use]
    pub const fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    #[must_use]
    pub const fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Number of chips applied so far.
    #[must_use]
    pub fn chips(&self) -> usize {
        self.store.len()
    }

    /// Stored record of `coordinate` along `axis`, `None` for empty cells.
    ///
    /// Only run endpoints are guaranteed to hold the full run length.
    #[must_use]
    pub fn status(&self, coordinate: Coordinate, axis: Axis) -> Option<DirectionStatus> {
        if !self.dimensions.contains(coordinate) {
            return None;
        }
        self.store.get(self.key(coordinate), axis)
    }

    /// Owner of the chip at `coordinate`.
    #[must_use]
    pub fn player_at(&self, coordinate: Coordinate) -> Option<Player> {
        self.status(coordinate, Axis::Vertical)
            .map(|status| status.player)
    }

    /// Places the chip and returns whether it completes a line.
    pub fn apply(&mut self, mv: Move) -> Result<bool, EngineError> {
        if let Some(winner) = self.winner {
            return Err(EngineError::IllegalContinuation(winner));
        }
        debug_assert!(self.dimensions.contains(mv.coordinate()));
        debug_assert!(self.player_at(mv.coordinate()).is_none());

        let statuses = [
            self.update_vertical(mv),
            self.update_line(mv, Axis::Horizontal),
            self.update_line(mv, Axis::DiagonalA),
            self.update_line(mv, Axis::DiagonalB),
        ];
        let key = self.key(mv.coordinate());
        self.store.insert(key, statuses);

        let line_length = self.dimensions.line_length;
        let won = statuses.iter().any(|status| status.n >= line_length);
        if won {
            debug!(
                player = %mv.player,
                column = mv.column,
                row = mv.row,
                "winning move"
            );
            self.winner = Some(mv.player);
        }
        Ok(won)
    }

    /// Chips only land on top of their column, so there is never anything
    /// above the new chip to merge with.
    fn update_vertical(&self, mv: Move) -> DirectionStatus {
        let below = self.neighbor(mv.coordinate(), Axis::Vertical, -1);
        let n = match Flank::classify(below, mv.player) {
            Flank::Run { n, .. } => n + 1,
            Flank::Open | Flank::Capped => 1,
        };
        DirectionStatus::new(mv.player, n, true)
    }

    /// Joins the new chip with the runs on both sides of it along `axis`.
    ///
    /// Returns the record for the new chip itself; far endpoints that may
    /// still be extended are updated in place.
    fn update_line(&mut self, mv: Move, axis: Axis) -> DirectionStatus {
        let at = mv.coordinate();
        let step = axis.step();
        let left = Flank::classify(self.neighbor(at, axis, -1), mv.player);
        let right = Flank::classify(self.neighbor(at, axis, 1), mv.player);

        let n = left.run() + 1 + right.run();

        // The new chip is read from whichever side is not its own run, so its
        // flag describes the opposite end.
        let complete = match (left, right) {
            (Flank::Run { .. }, Flank::Run { .. }) => true,
            (Flank::Run { capped, .. }, _) | (_, Flank::Run { capped, .. }) => capped,
            (_, _) => left.capped() || right.capped(),
        };

        // An endpoint with a capped outside is never looked at again.
        if let Flank::Run { n: len, capped: false } = left {
            let status = DirectionStatus::new(mv.player, n, right.capped());
            self.write_endpoint(at, (-step.0, -step.1), len, axis, status);
        }
        if let Flank::Run { n: len, capped: false } = right {
            let status = DirectionStatus::new(mv.player, n, left.capped());
            self.write_endpoint(at, step, len, axis, status);
        }

        DirectionStatus::new(mv.player, n, complete)
    }

    fn write_endpoint(
        &mut self,
        from: Coordinate,
        direction: (isize, isize),
        distance: usize,
        axis: Axis,
        status: DirectionStatus,
    ) {
        let endpoint = from.offset(direction, distance, &self.dimensions);
        debug_assert!(endpoint.is_some(), "run endpoint outside of the board");
        let Some(endpoint) = endpoint else {
            return;
        };
        trace!(?axis, ?endpoint, n = status.n, "updating run endpoint");
        let key = self.key(endpoint);
        self.store.set(key, axis, status);
    }

    /// Looks at the adjacent cell on the `sign` side of `axis`.
    fn neighbor(&self, at: Coordinate, axis: Axis, sign: isize) -> Neighbor {
        let (d_column, d_row) = axis.step();
        match at.offset((d_column * sign, d_row * sign), 1, &self.dimensions) {
            None => Neighbor::Edge,
            Some(coordinate) => self
                .store
                .get(self.key(coordinate), axis)
                .map_or(Neighbor::Empty, Neighbor::Occupied),
        }
    }

    const fn key(&self, coordinate: Coordinate) -> usize {
        coordinate.row * self.dimensions.columns + coordinate.column
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, DirectionStatus, Engine, EngineError};
    use crate::{Coordinate, Dimensions, Move, Player};

    /// Applies moves given as `(column, row)` with alternating players,
    /// starting with player 1, and returns the win flags.
    fn play(engine: &mut Engine, moves: &[(usize, usize)]) -> Vec<bool> {
        let mut player = Player::Player1;
        let mut results = Vec::new();
        for &(column, row) in moves {
            results.push(engine.apply(Move::new(column, row, player)).unwrap());
            player = player.opponent();
        }
        results
    }

    /// Places chips of one player without alternation.
    fn place(engine: &mut Engine, player: Player, cells: &[(usize, usize)]) -> Vec<bool> {
        cells
            .iter()
            .map(|&(column, row)| engine.apply(Move::new(column, row, player)).unwrap())
            .collect()
    }

    fn n_at(engine: &Engine, column: usize, row: usize, axis: Axis) -> usize {
        engine
            .status(Coordinate::new(column, row), axis)
            .map_or(0, |status| status.n)
    }

    #[test]
    fn test_vertical_win() {
        let mut engine = Engine::new(Dimensions::new(4, 4, 3));
        let results = play(&mut engine, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        assert_eq!(results, [false, false, false, false, true]);
        assert_eq!(n_at(&engine, 0, 2, Axis::Vertical), 3);
        assert_eq!(engine.winner(), Some(Player::Player1));
    }

    #[test]
    fn test_vertical_interrupted() {
        let mut engine = Engine::new(Dimensions::new(1, 6, 3));
        place(&mut engine, Player::Player1, &[(0, 0), (0, 1)]);
        place(&mut engine, Player::Player2, &[(0, 2)]);
        let results = place(&mut engine, Player::Player1, &[(0, 3), (0, 4)]);
        assert_eq!(results, [false, false]);
        assert_eq!(n_at(&engine, 0, 4, Axis::Vertical), 2);
    }

    #[test]
    fn test_horizontal_blocked_by_opponent() {
        let mut engine = Engine::new(Dimensions::new(4, 4, 3));
        place(&mut engine, Player::Player1, &[(0, 0), (1, 0)]);
        let results = place(&mut engine, Player::Player2, &[(2, 0)]);
        assert_eq!(results, [false]);
        assert_eq!(n_at(&engine, 1, 0, Axis::Horizontal), 2);
        assert_eq!(n_at(&engine, 2, 0, Axis::Horizontal), 1);
    }

    #[test]
    fn test_horizontal_gap_filled() {
        let mut engine = Engine::new(Dimensions::new(4, 4, 3));
        assert_eq!(place(&mut engine, Player::Player1, &[(0, 0), (2, 0)]), [false, false]);
        assert_eq!(place(&mut engine, Player::Player1, &[(1, 0)]), [true]);
        assert_eq!(n_at(&engine, 1, 0, Axis::Horizontal), 3);
    }

    #[test]
    fn test_merge_length() {
        // runs of 2 and 3, joined by the chip in column 2
        let mut engine = Engine::new(Dimensions::new(9, 1, 9));
        place(&mut engine, Player::Player1, &[(0, 0), (1, 0), (3, 0), (4, 0), (5, 0)]);
        assert_eq!(n_at(&engine, 1, 0, Axis::Horizontal), 2);
        assert_eq!(n_at(&engine, 3, 0, Axis::Horizontal), 3);

        place(&mut engine, Player::Player1, &[(2, 0)]);
        assert_eq!(n_at(&engine, 2, 0, Axis::Horizontal), 2 + 3 + 1);
        // the open end on the right knows the full length
        assert_eq!(n_at(&engine, 5, 0, Axis::Horizontal), 6);

        // extending from the open end keeps counting
        let results = place(&mut engine, Player::Player1, &[(6, 0), (7, 0), (8, 0)]);
        assert_eq!(results, [false, false, true]);
        assert_eq!(n_at(&engine, 8, 0, Axis::Horizontal), 9);
    }

    #[test]
    fn test_merge_of_open_runs_updates_both_ends() {
        let mut engine = Engine::new(Dimensions::new(9, 1, 9));
        place(&mut engine, Player::Player1, &[(2, 0), (3, 0), (5, 0), (6, 0)]);
        place(&mut engine, Player::Player1, &[(4, 0)]);
        assert_eq!(n_at(&engine, 2, 0, Axis::Horizontal), 5);
        assert_eq!(n_at(&engine, 6, 0, Axis::Horizontal), 5);

        place(&mut engine, Player::Player1, &[(1, 0)]);
        assert_eq!(n_at(&engine, 1, 0, Axis::Horizontal), 6);
        place(&mut engine, Player::Player1, &[(7, 0)]);
        assert_eq!(n_at(&engine, 7, 0, Axis::Horizontal), 7);
    }

    #[test]
    fn test_grows_monotonically() {
        let mut engine = Engine::new(Dimensions::new(10, 1, 10));
        let mut last = 0;
        for column in [4, 5, 3, 6, 2, 7, 1, 8, 0] {
            place(&mut engine, Player::Player1, &[(column, 0)]);
            let n = n_at(&engine, column, 0, Axis::Horizontal);
            assert!(n > last);
            last = n;
        }
        assert_eq!(last, 9);
    }

    #[test]
    fn test_diagonal_a_win() {
        let mut engine = Engine::new(Dimensions::new(4, 4, 3));
        let results = place(&mut engine, Player::Player1, &[(0, 0), (1, 1), (2, 2)]);
        assert_eq!(results, [false, false, true]);
        assert_eq!(n_at(&engine, 2, 2, Axis::DiagonalA), 3);
        assert_eq!(n_at(&engine, 2, 2, Axis::DiagonalB), 1);
    }

    #[test]
    fn test_diagonal_b_win() {
        let mut engine = Engine::new(Dimensions::new(4, 4, 3));
        let results = place(&mut engine, Player::Player1, &[(0, 2), (1, 1), (2, 0)]);
        assert_eq!(results, [false, false, true]);
        assert_eq!(n_at(&engine, 2, 0, Axis::DiagonalB), 3);
        assert_eq!(n_at(&engine, 2, 0, Axis::DiagonalA), 1);
    }

    #[test]
    fn test_diagonal_mirror_symmetry() {
        let dims = Dimensions::new(6, 5, 5);
        let cells = [(0, 0), (2, 2), (3, 3), (1, 1), (4, 1), (5, 0)];

        let mut engine = Engine::new(dims);
        let mut mirrored = Engine::new(dims);
        let results = place(&mut engine, Player::Player1, &cells);
        let mirrored_cells: Vec<_> = cells
            .iter()
            .map(|&(column, row)| (dims.columns - 1 - column, row))
            .collect();
        let mirrored_results = place(&mut mirrored, Player::Player1, &mirrored_cells);

        assert_eq!(results, mirrored_results);
        for &(column, row) in &cells {
            let mirrored_column = dims.columns - 1 - column;
            assert_eq!(
                n_at(&engine, column, row, Axis::DiagonalA),
                n_at(&mirrored, mirrored_column, row, Axis::DiagonalB)
            );
            assert_eq!(
                n_at(&engine, column, row, Axis::DiagonalB),
                n_at(&mirrored, mirrored_column, row, Axis::DiagonalA)
            );
        }
    }

    #[test]
    fn test_blocked_run_never_wins() {
        // O X X O X X, line length 3
        let mut engine = Engine::new(Dimensions::new(6, 1, 3));
        place(&mut engine, Player::Player2, &[(0, 0), (3, 0)]);
        let results = place(&mut engine, Player::Player1, &[(1, 0), (2, 0), (4, 0), (5, 0)]);
        assert_eq!(results, [false, false, false, false]);
        assert_eq!(n_at(&engine, 2, 0, Axis::Horizontal), 2);
        assert_eq!(n_at(&engine, 5, 0, Axis::Horizontal), 2);
    }

    #[test]
    fn test_opponent_in_gap_separates_runs() {
        let mut engine = Engine::new(Dimensions::new(5, 1, 4));
        place(&mut engine, Player::Player1, &[(0, 0), (1, 0), (3, 0), (4, 0)]);
        assert_eq!(place(&mut engine, Player::Player2, &[(2, 0)]), [false]);
        assert_eq!(n_at(&engine, 2, 0, Axis::Horizontal), 1);
        assert_eq!(engine.winner(), None);
    }

    #[test]
    fn test_complete_flag() {
        let mut engine = Engine::new(Dimensions::new(5, 1, 5));
        // both sides empty: still open
        place(&mut engine, Player::Player1, &[(2, 0)]);
        assert_eq!(
            engine.status(Coordinate::new(2, 0), Axis::Horizontal),
            Some(DirectionStatus::new(Player::Player1, 1, false))
        );
        // board edge caps the left side
        place(&mut engine, Player::Player2, &[(0, 0)]);
        assert_eq!(
            engine.status(Coordinate::new(0, 0), Axis::Horizontal),
            Some(DirectionStatus::new(Player::Player2, 1, true))
        );
        // vertical records are always capped below
        assert_eq!(
            engine.status(Coordinate::new(0, 0), Axis::Vertical),
            Some(DirectionStatus::new(Player::Player2, 1, true))
        );
    }

    #[test]
    fn test_illegal_continuation() {
        let mut engine = Engine::new(Dimensions::new(3, 1, 1));
        assert!(engine.apply(Move::new(0, 0, Player::Player1)).unwrap());
        assert_eq!(
            engine.apply(Move::new(1, 0, Player::Player2)),
            Err(EngineError::IllegalContinuation(Player::Player1))
        );
        assert_eq!(engine.chips(), 1);
        assert_eq!(engine.player_at(Coordinate::new(1, 0)), None);
    }

    #[test]
    fn test_deterministic() {
        let moves = [(3, 0), (3, 1), (2, 0), (4, 0), (1, 0), (0, 0), (2, 1), (4, 1)];
        let mut first = Engine::new(Dimensions::new(7, 6, 4));
        let mut second = Engine::new(Dimensions::new(7, 6, 4));
        assert_eq!(play(&mut first, &moves), play(&mut second, &moves));
    }
}
