//! Game description files.
//!
//! ```text
//! 7 6 4
//! 4
//! 3
//! ```
//!
//! The first line holds `columns rows line_length`, every following line the
//! 1-based column of the next move.

use crate::Dimensions;
use derive_more::{Display, Error, From};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::instrument;

#[derive(Debug, Display, Error, From)]
pub enum InputError {
    /// The file could not be opened.
    #[display("cannot open game file: {}", _0)]
    Open(io::Error),
    /// The contents are not a valid game description.
    #[display("line {}: {}", line, reason)]
    #[from(ignore)]
    Malformed {
        line: usize,
        reason: &'static str,
    },
}

impl InputError {
    const fn malformed(line: usize, reason: &'static str) -> Self {
        Self::Malformed { line, reason }
    }
}

/// Parsed but not yet played game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDescription {
    pub dimensions: Dimensions,
    /// Columns as written in the file, i.e., 1-based and not range checked.
    pub moves: Vec<i64>,
}

impl GameDescription {
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let file = File::open(path.as_ref())?;
        Self::parse(BufReader::new(file))
    }

    pub fn parse(reader: impl BufRead) -> Result<Self, InputError> {
        let mut lines = reader.lines().enumerate();

        let (_, header) = lines
            .next()
            .ok_or_else(|| InputError::malformed(1, "missing dimensions"))?;
        let header = header.map_err(|_| InputError::malformed(1, "unreadable line"))?;
        let dimensions = parse_dimensions(&header)?;

        let mut moves = Vec::new();
        for (index, line) in lines {
            let number = index + 1;
            let line = line.map_err(|_| InputError::malformed(number, "unreadable line"))?;
            let column = line
                .trim()
                .parse::<i64>()
                .map_err(|_| InputError::malformed(number, "expected a single column number"))?;
            moves.push(column);
        }

        Ok(Self { dimensions, moves })
    }

    #[must_use]
    pub fn is_winnable(&self) -> bool {
        self.dimensions.is_winnable()
    }
}

fn parse_dimensions(line: &str) -> Result<Dimensions, InputError> {
    let values = line
        .split_ascii_whitespace()
        .map(str::parse::<usize>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| InputError::malformed(1, "dimensions must be non-negative integers"))?;

    let &[columns, rows, line_length] = values.as_slice() else {
        return Err(InputError::malformed(1, "expected `columns rows line_length`"));
    };
    if columns == 0 || rows == 0 || line_length == 0 {
        return Err(InputError::malformed(1, "dimensions must not be zero"));
    }
    if columns.checked_mul(rows).is_none() {
        return Err(InputError::malformed(1, "board is too large"));
    }

    Ok(Dimensions::new(columns, rows, line_length))
}
