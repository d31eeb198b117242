//
// Hashiwokakero logic engine
//
// Copyright 2021 Simon Frankau
//

use thiserror::Error;

// Problems with a puzzle definition. These are caught when the board is
// built, so a Board that exists is always well-formed.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum PuzzleError {
    #[error("Non-empty puzzle expected")]
    Empty,
    #[error("Row {row} has {found} cells, expected {expected}. Rectangular input expected.")]
    NotRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Negative value {value} at ({row}, {col})")]
    NegativeCell { row: usize, col: usize, value: i32 },
    #[error("Island at ({row}, {col}) requires {value} bridges, at most 8 are possible")]
    DegreeTooLarge { row: usize, col: usize, value: i32 },
    #[error("Puzzle contains no islands")]
    NoIslands,
    #[error("Unexpected character in input: '{0}'")]
    UnexpectedChar(char),
}

// Two islands that can't be joined by a single straight, unobstructed line.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("No straight path between islands")]
pub struct NoStraightPath;
