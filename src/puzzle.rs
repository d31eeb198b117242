//
// Hashiwokakero logic engine
//
// Copyright 2021 Simon Frankau
//

use std::str::FromStr;

use crate::board::Board;
use crate::error::PuzzleError;

////////////////////////////////////////////////////////////////////////
// Parser
//

// Text puzzles: one line per row, '.' or '0' for an empty cell, a digit
// for an island. '#' starts a comment; blank lines are skipped.
fn cell_from_char(c: char) -> Result<i32, PuzzleError> {
    match c {
        '.' => Ok(0),
        d if d.is_ascii_digit() => Ok(d as i32 - '0' as i32),
        _ => Err(PuzzleError::UnexpectedChar(c)),
    }
}

/// Turn puzzle text into the integer matrix accepted by [`Board::new`].
/// Shape and value checks are left to the board.
pub fn read_matrix<'a, Iter: Iterator<Item = &'a str>>(
    lines: Iter,
) -> Result<Vec<Vec<i32>>, PuzzleError> {
    lines
        // Trim comments and whitespace
        .map(|s| s.find('#').map_or(s, |idx| &s[..idx]).trim())
        // Filter empty lines
        .filter(|s| !s.is_empty())
        // Convert a single line
        .map(|s| s.chars().map(cell_from_char).collect::<Result<Vec<_>, _>>())
        .collect()
}

impl FromStr for Board {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Board, PuzzleError> {
        Board::new(&read_matrix(s.lines())?)
    }
}

////////////////////////////////////////////////////////////////////////
// Built-in puzzles
//

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

pub const ALL_DIFFICULTIES: &[Difficulty] = &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

const EASY: &[&[i32]] = &[
    &[0, 3, 0, 0, 1],
    &[0, 0, 0, 0, 0],
    &[0, 3, 0, 2, 0],
    &[0, 0, 0, 0, 0],
    &[0, 0, 0, 2, 0],
    &[0, 0, 0, 0, 0],
    &[1, 0, 0, 2, 0],
];

const MEDIUM: &[&[i32]] = &[
    &[0, 0, 0, 0, 0, 0, 0],
    &[0, 0, 2, 0, 2, 0, 0],
    &[0, 0, 0, 0, 0, 0, 0],
    &[0, 0, 3, 0, 3, 0, 2],
    &[0, 0, 0, 0, 0, 0, 0],
    &[0, 0, 2, 0, 0, 0, 1],
    &[0, 0, 2, 0, 3, 0, 0],
];

const HARD: &[&[i32]] = &[
    &[2, 0, 0, 0, 0, 4, 0, 5, 0, 0, 4],
    &[0, 4, 0, 4, 0, 0, 0, 0, 0, 1, 0],
    &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    &[0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 3],
    &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    &[0, 2, 0, 0, 0, 0, 0, 2, 0, 0, 2],
    &[0, 0, 0, 4, 0, 6, 0, 0, 0, 4, 0],
    &[3, 0, 0, 0, 0, 0, 2, 0, 0, 0, 1],
    &[0, 0, 2, 0, 0, 0, 0, 0, 0, 3, 0],
];

impl Difficulty {
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn matrix(&self) -> Vec<Vec<i32>> {
        let rows = match self {
            Difficulty::Easy => EASY,
            Difficulty::Medium => MEDIUM,
            Difficulty::Hard => HARD,
        };
        rows.iter().map(|row| row.to_vec()).collect()
    }

    pub fn board(&self) -> Result<Board, PuzzleError> {
        Board::new(&self.matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completely_empty_fails() {
        let input: &[&str] = &[];
        let matrix = read_matrix(input.iter().cloned()).unwrap();
        assert_eq!(Board::new(&matrix), Err(PuzzleError::Empty));
    }

    #[test]
    fn test_only_comments_fails() {
        assert_eq!("  # Test\n# Also test\n    \n".parse::<Board>(), Err(PuzzleError::Empty));
    }

    #[test]
    fn test_unequal_lines_fails() {
        assert!(matches!(
            ".1\n1..".parse::<Board>(),
            Err(PuzzleError::NotRectangular { .. })
        ));
    }

    #[test]
    fn test_unexpected_chars_fails() {
        assert_eq!(".x.".parse::<Board>(), Err(PuzzleError::UnexpectedChar('x')));
        assert!(matches!(
            ".9.".parse::<Board>(),
            Err(PuzzleError::DegreeTooLarge { .. })
        ));
    }

    #[test]
    fn test_small_parse() {
        let input = "1.7\n#TEST\n0.2 # trailing\n";
        assert_eq!(
            read_matrix(input.lines()).unwrap(),
            vec![vec![1, 0, 7], vec![0, 0, 2]]
        );
    }

    #[test]
    fn test_parse_print_round_trip() {
        let input = "......\n.1..2.\n......\n.3..4.";
        let board: Board = input.parse().unwrap();
        assert_eq!(board.to_string(), input);
    }

    #[test]
    fn test_difficulties_build() {
        for difficulty in ALL_DIFFICULTIES.iter() {
            let board = difficulty.board().unwrap();
            let matrix = difficulty.matrix();
            assert_eq!(board.height(), matrix.len());
            assert_eq!(board.width(), matrix[0].len());
        }
        assert_eq!(Difficulty::Hard.board().unwrap().islands().len(), 20);
    }
}
