//! Text output of a board for debugging.

use crate::engine::Axis;
use crate::{Coordinate, Game, Player};
use core::fmt::Write;

const fn symbol(player: Option<Player>) -> char {
    match player {
        None => ' ',
        Some(Player::Player1) => 'X',
        Some(Player::Player2) => 'O',
    }
}

/// Renders the chips, top row first, followed by the column labels.
#[must_use]
pub fn board(game: &Game) -> String {
    let engine = game.engine();
    render_grid(game, |coordinate| {
        symbol(engine.player_at(coordinate)).to_string()
    })
}

/// Renders the stored run length of every cell along `axis`.
///
/// Only run endpoints carry the full length; interior cells show whatever was
/// last written to them.
#[must_use]
pub fn runs(game: &Game, axis: Axis) -> String {
    let engine = game.engine();
    render_grid(game, |coordinate| {
        engine
            .status(coordinate, axis)
            .map_or_else(|| ".".to_string(), |status| status.n.to_string())
    })
}

fn render_grid(game: &Game, cell: impl Fn(Coordinate) -> String) -> String {
    let dimensions = game.dimensions();
    let mut out = String::new();

    // Print rows reverted so that it appears naturally.
    for row in (0..dimensions.rows).rev() {
        for column in 0..dimensions.columns {
            let _ = write!(out, "{},", cell(Coordinate::new(column, row)));
        }
        out.push('\n');
    }

    for _ in 0..dimensions.columns {
        out.push_str("--");
    }
    out.push('\n');

    for col_id in (0..dimensions.columns).map(|i| i + 1) {
        let _ = write!(out, "{col_id},");
    }
    out.push('\n');
    out
}
