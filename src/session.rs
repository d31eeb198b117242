//
// Hashiwokakero logic engine
//
// Copyright 2021 Simon Frankau
//

use log::debug;

use crate::board::{Board, IslandId};
use crate::error::PuzzleError;
use crate::hint::Hint;
use crate::moves::{ToggleOutcome, Tone};
use crate::puzzle::Difficulty;
use crate::solver::{SolveOutcome, SolverConfig};

// Size of a grid cell in pixels, for mapping clicks onto the board.
pub const DEFAULT_CELL_SIZE: usize = 80;

const WELCOME: &str = "Click islands to connect with bridges!";

/// The line of text a front end shows under the board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Status {
    pub message: String,
    pub tone: Tone,
}

/// What a click did to the selection.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ClickEvent {
    Selected(IslandId),
    Cancelled,
    Toggled(ToggleOutcome),
    // Clicked somewhere without an island.
    Cleared,
}

/// One attempt at one puzzle. Build a new session to start another.
#[derive(Clone, Debug)]
pub struct Session {
    board: Board,
    difficulty: Option<Difficulty>,
    cell_size: usize,
    config: SolverConfig,
    selected: Option<IslandId>,
    status: Status,
}

impl Status {
    fn new(message: impl Into<String>, tone: Tone) -> Status {
        Status {
            message: message.into(),
            tone,
        }
    }
}

impl Session {
    pub fn new(board: Board) -> Session {
        Session {
            board,
            difficulty: None,
            cell_size: DEFAULT_CELL_SIZE,
            config: SolverConfig::default(),
            selected: None,
            status: Status::new(WELCOME, Tone::Neutral),
        }
    }

    pub fn from_difficulty(difficulty: Difficulty) -> Result<Session, PuzzleError> {
        let mut session = Session::new(difficulty.board()?);
        session.difficulty = Some(difficulty);
        Ok(session)
    }

    pub fn with_cell_size(mut self, cell_size: usize) -> Session {
        self.cell_size = cell_size;
        self
    }

    pub fn with_solver_config(mut self, config: SolverConfig) -> Session {
        self.config = config;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn selected(&self) -> Option<IslandId> {
        self.selected
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_won(&self) -> bool {
        self.board.check_win()
    }

    pub fn click_pixel(&mut self, x: usize, y: usize) -> ClickEvent {
        let target = self.board.island_at_pixel(x, y, self.cell_size);
        self.click_island(target)
    }

    pub fn click(&mut self, row: usize, col: usize) -> ClickEvent {
        let target = self.board.island_at(row, col);
        self.click_island(target)
    }

    // First click selects, clicking the selection again cancels it, and
    // clicking a second island tries to bridge the two.
    fn click_island(&mut self, target: Option<IslandId>) -> ClickEvent {
        let clicked = match target {
            Some(id) => id,
            None => {
                self.selected = None;
                return ClickEvent::Cleared;
            }
        };

        match self.selected.take() {
            None => {
                let (row, col) = self.board.island(clicked).position();
                self.selected = Some(clicked);
                self.status = Status::new(
                    format!("Island selected at ({}, {})", row, col),
                    Tone::Neutral,
                );
                ClickEvent::Selected(clicked)
            }
            Some(first) if first == clicked => {
                self.status = Status::new("Selection cancelled", Tone::Neutral);
                ClickEvent::Cancelled
            }
            Some(first) => ClickEvent::Toggled(self.toggle(first, clicked)),
        }
    }

    pub fn toggle(&mut self, a: IslandId, b: IslandId) -> ToggleOutcome {
        let outcome = self.board.toggle_bridge(a, b);
        self.status = if outcome.is_accepted() && self.board.check_win() {
            Status::new("Puzzle solved!", Tone::Success)
        } else {
            Status::new(outcome.message(), outcome.tone())
        };
        outcome
    }

    pub fn hint(&mut self) -> Option<Hint> {
        let hint = self.board.hint();
        self.status = match hint {
            Some(Hint { island, candidate }) => {
                let (from, to) = (self.board.island(island), self.board.island(candidate));
                Status::new(
                    format!(
                        "Hint: connect ({}, {}) to ({}, {})",
                        from.row, from.col, to.row, to.col
                    ),
                    Tone::Neutral,
                )
            }
            None => Status::new("No hint available", Tone::Failure),
        };
        hint
    }

    pub fn solve(&mut self) -> SolveOutcome {
        self.selected = None;
        let outcome = self.board.solve(&self.config);
        debug!("session solve: {:?}", outcome);
        self.status = match outcome {
            SolveOutcome::Solved(_) => Status::new("Puzzle solved!", Tone::Success),
            SolveOutcome::Partial(_) => Status::new("Could not finish the puzzle", Tone::Failure),
        };
        outcome
    }

    pub fn reset(&mut self) {
        self.board.reset();
        self.selected = None;
        self.status = Status::new(WELCOME, Tone::Neutral);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_flow() {
        let mut session = Session::new(Board::new(&[vec![2, 0, 2], vec![0, 0, 0]]).unwrap());

        assert_eq!(session.click(0, 0), ClickEvent::Selected(0));
        assert_eq!(session.selected(), Some(0));
        assert_eq!(session.status().message, "Island selected at (0, 0)");

        assert_eq!(session.click(0, 0), ClickEvent::Cancelled);
        assert_eq!(session.selected(), None);

        session.click(0, 0);
        assert_eq!(session.click(1, 1), ClickEvent::Cleared);
        assert_eq!(session.selected(), None);

        session.click(0, 0);
        assert_eq!(session.click(0, 2), ClickEvent::Toggled(ToggleOutcome::Added));
        assert_eq!(session.selected(), None);
        assert_eq!(session.status().message, "Bridge added (1)");
        assert_eq!(session.status().tone, Tone::Success);

        session.click(0, 2);
        assert_eq!(session.click(0, 0), ClickEvent::Toggled(ToggleOutcome::Doubled));
        assert_eq!(session.status().message, "Puzzle solved!");
        assert!(session.is_won());
    }

    #[test]
    fn test_click_pixel() {
        let mut session =
            Session::new(Board::new(&[vec![1, 1]]).unwrap()).with_cell_size(40);
        assert_eq!(session.click_pixel(10, 10), ClickEvent::Selected(0));
        assert_eq!(
            session.click_pixel(45, 39),
            ClickEvent::Toggled(ToggleOutcome::Added)
        );
        assert!(session.is_won());
    }

    #[test]
    fn test_rejection_message() {
        let mut session = Session::new(Board::new(&[vec![1, 1, 1]]).unwrap());
        assert_eq!(session.toggle(0, 2), ToggleOutcome::InvalidPath);
        assert_eq!(session.status().tone, Tone::Failure);
        assert_eq!(
            session.status().message,
            "Invalid bridge: must be horizontal/vertical with no islands between"
        );
    }

    #[test]
    fn test_hint_solve_reset() {
        let mut session = Session::from_difficulty(Difficulty::Easy).unwrap();
        assert_eq!(session.difficulty(), Some(Difficulty::Easy));

        let hint = session.hint().unwrap();
        assert_eq!(session.board().island(hint.island).position(), (0, 4));
        assert_eq!(session.status().message, "Hint: connect (0, 4) to (0, 1)");
        assert_eq!(session.board().bridges().count(), 0);

        assert!(session.solve().is_solved());
        assert!(session.is_won());
        assert_eq!(session.status().tone, Tone::Success);
        assert_eq!(session.hint(), None);

        session.reset();
        assert_eq!(session.board().bridges().count(), 0);
        assert!(!session.is_won());
        assert_eq!(session.status().message, WELCOME);
    }

    #[test]
    fn test_solve_gives_up() {
        let board: Board = ".1.".parse().unwrap();
        let config = SolverConfig {
            max_steps: 10,
            ..SolverConfig::default()
        };
        let mut session = Session::new(board).with_solver_config(config);
        assert!(!session.solve().is_solved());
        assert_eq!(session.status().message, "Could not finish the puzzle");
    }
}
