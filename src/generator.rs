//! Synthetic games for performance runs.
//!
//! The board is tiled with blocks of four columns and two rows. Each block is
//! filled in the order `1 3 2 4 3 1 4 2`, which with alternating players
//! leaves
//!
//! ```text
//! O O X X
//! X X O O
//! ```
//!
//! so no run is ever longer than two, on any axis. A board whose width is a
//! multiple of four and whose height is a multiple of two fills up to a draw;
//! leftover columns and rows stay empty.

use crate::Dimensions;
use derive_more::{Display, Error, From};
use std::io::{self, Write};

/// Move order inside one block, 1-based relative to its first column.
const BLOCK: [usize; 8] = [1, 3, 2, 4, 3, 1, 4, 2];
const BLOCK_COLUMNS: usize = 4;
const BLOCK_ROWS: usize = 2;

#[derive(Debug, Display, Error, From)]
pub enum GeneratorError {
    /// Shorter lines would be completed by the block pattern itself.
    #[display("line length must be 3 or bigger, got {}", _0)]
    #[from(ignore)]
    LineTooShort(#[error(not(source))] usize),
    #[display("cannot write game: {}", _0)]
    Io(io::Error),
}

/// 1-based column of every move of the generated game.
pub fn moves(dimensions: Dimensions) -> Result<impl Iterator<Item = usize>, GeneratorError> {
    if dimensions.line_length < 3 {
        return Err(GeneratorError::LineTooShort(dimensions.line_length));
    }

    let blocks_per_row = dimensions.columns / BLOCK_COLUMNS;
    let block_rows = dimensions.rows / BLOCK_ROWS;

    Ok((0..block_rows).flat_map(move |_| {
        (0..blocks_per_row).flat_map(|block| {
            let start_column = block * BLOCK_COLUMNS;
            BLOCK.iter().map(move |column| column + start_column)
        })
    }))
}

/// Writes a complete game description. Returns the number of moves.
pub fn write_game(mut writer: impl Write, dimensions: Dimensions) -> Result<usize, GeneratorError> {
    let moves = moves(dimensions)?;
    writeln!(writer, "{dimensions}")?;

    let mut count = 0;
    for column in moves {
        writeln!(writer, "{column}")?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}
