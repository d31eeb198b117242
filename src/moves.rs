//
// Hashiwokakero logic engine
//
// Copyright 2021 Simon Frankau
//

use log::debug;

use crate::board::{Board, IslandId};

/// What a call to [`Board::toggle_bridge`] did.
///
/// The first four variants are accepted moves, the rest are rejections
/// that leave the board untouched.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ToggleOutcome {
    // 0 -> 1
    Added,
    // 1 -> 2
    Doubled,
    // 1 -> 0, because a second bridge would exceed a requirement.
    RemovedSaturated,
    // 2 -> 0
    RemovedFull,
    InvalidPath,
    CrossingViolation,
    DegreeExceeded,
}

/// How a front end should present an outcome.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Tone {
    Neutral,
    Success,
    Failure,
    Removal,
}

impl ToggleOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(
            self,
            ToggleOutcome::Added
                | ToggleOutcome::Doubled
                | ToggleOutcome::RemovedSaturated
                | ToggleOutcome::RemovedFull
        )
    }

    pub fn message(&self) -> &'static str {
        match self {
            ToggleOutcome::Added => "Bridge added (1)",
            ToggleOutcome::Doubled => "Double bridge (2)",
            ToggleOutcome::RemovedSaturated => "Bridge removed (0)",
            ToggleOutcome::RemovedFull => "All bridges removed (0)",
            ToggleOutcome::InvalidPath => {
                "Invalid bridge: must be horizontal/vertical with no islands between"
            }
            ToggleOutcome::CrossingViolation => "Bridges cannot cross!",
            ToggleOutcome::DegreeExceeded => "Cannot add bridge: degree constraint violated",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            ToggleOutcome::Added | ToggleOutcome::Doubled => Tone::Success,
            ToggleOutcome::RemovedSaturated | ToggleOutcome::RemovedFull => Tone::Removal,
            _ => Tone::Failure,
        }
    }
}

impl Board {
    // Both ends can take another bridge.
    pub(crate) fn has_headroom(&self, a: IslandId, b: IslandId) -> bool {
        !self.is_satisfied(a) && !self.is_satisfied(b)
    }

    /// Cycle the bridges between two islands: none, single, double, none.
    ///
    /// A single bridge that can't be doubled because either end is
    /// already satisfied is removed instead.
    pub fn toggle_bridge(&mut self, a: IslandId, b: IslandId) -> ToggleOutcome {
        let outcome = match self.multiplicity(a, b) {
            0 => {
                if self.line_between(a, b).is_err() {
                    ToggleOutcome::InvalidPath
                } else if self.check_bridge_crossing(a, b) {
                    ToggleOutcome::CrossingViolation
                } else if !self.has_headroom(a, b) {
                    ToggleOutcome::DegreeExceeded
                } else {
                    self.add_units(a, b, 1);
                    ToggleOutcome::Added
                }
            }
            1 => {
                if self.has_headroom(a, b) {
                    self.add_units(a, b, 1);
                    ToggleOutcome::Doubled
                } else {
                    self.remove_units(a, b, 1);
                    ToggleOutcome::RemovedSaturated
                }
            }
            m => {
                self.remove_units(a, b, m);
                ToggleOutcome::RemovedFull
            }
        };

        debug!(
            "toggle {:?} -> {:?}: {:?}",
            self.island(a).position(),
            self.island(b).position(),
            outcome
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(board: &Board, cells: &[(usize, usize)]) -> Vec<IslandId> {
        cells
            .iter()
            .map(|&(row, col)| board.island_at(row, col).unwrap())
            .collect()
    }

    #[test]
    fn test_single_bridge_wins() {
        let mut board = Board::new(&[vec![1, 1]]).unwrap();
        assert_eq!(board.toggle_bridge(0, 1), ToggleOutcome::Added);
        assert_eq!(board.degree(0), 1);
        assert_eq!(board.degree(1), 1);
        assert!(board.check_win());
    }

    #[test]
    fn test_full_cycle() {
        let mut board = Board::new(&[vec![2, 0, 2]]).unwrap();
        let start = board.clone();
        assert_eq!(board.toggle_bridge(0, 1), ToggleOutcome::Added);
        assert_eq!(board.multiplicity(1, 0), 1);
        assert_eq!(board.toggle_bridge(1, 0), ToggleOutcome::Doubled);
        assert_eq!(board.multiplicity(0, 1), 2);
        assert_eq!(board.toggle_bridge(0, 1), ToggleOutcome::RemovedFull);
        assert_eq!(board, start);
    }

    #[test]
    fn test_saturated_single_is_removed() {
        let mut board = Board::new(&[vec![1, 1]]).unwrap();
        assert_eq!(board.toggle_bridge(0, 1), ToggleOutcome::Added);
        assert_eq!(board.toggle_bridge(0, 1), ToggleOutcome::RemovedSaturated);
        assert_eq!(board.multiplicity(0, 1), 0);
        assert_eq!(board.bridges().count(), 0);
        assert_eq!(board.degree(0), 0);
    }

    #[test]
    fn test_blocked_path() {
        let mut board = Board::new(&[vec![1, 1, 1]]).unwrap();
        assert_eq!(board.toggle_bridge(0, 2), ToggleOutcome::InvalidPath);
        assert_eq!(board.bridges().count(), 0);
    }

    #[test]
    fn test_diagonal_path() {
        let mut board = Board::new(&[vec![1, 0], vec![0, 1]]).unwrap();
        let before = board.clone();
        assert_eq!(board.toggle_bridge(0, 1), ToggleOutcome::InvalidPath);
        assert!(!ToggleOutcome::InvalidPath.is_accepted());
        assert_eq!(board, before);
    }

    #[test]
    fn test_crossing_rejected() {
        let mut board: Board = ".1.
                                1.1
                                .1."
            .parse()
            .unwrap();
        let v = ids(&board, &[(0, 1), (1, 0), (1, 2), (2, 1)]);
        let (north, west, east, south) = (v[0], v[1], v[2], v[3]);

        assert_eq!(board.toggle_bridge(west, east), ToggleOutcome::Added);
        assert_eq!(board.toggle_bridge(north, south), ToggleOutcome::CrossingViolation);
        assert_eq!(board.multiplicity(west, east), 1);
        assert_eq!(board.multiplicity(north, south), 0);
        assert_eq!(ToggleOutcome::CrossingViolation.tone(), Tone::Failure);
    }

    #[test]
    fn test_degree_exceeded() {
        let mut board = Board::new(&[vec![1, 1, 1]]).unwrap();
        assert_eq!(board.toggle_bridge(0, 1), ToggleOutcome::Added);
        assert_eq!(board.toggle_bridge(1, 2), ToggleOutcome::DegreeExceeded);
        assert_eq!(board.multiplicity(1, 2), 0);
        assert_eq!(board.degree(2), 0);
    }

    #[test]
    fn test_invariants_hold_over_many_toggles() {
        let mut board: Board = "2.3.1
                                .....
                                4.4.2
                                .1...
                                2.2.1"
            .parse()
            .unwrap();
        let n = board.islands().len();

        // Walk every pair a few times round the cycle and check the
        // board never goes into a bad state.
        for round in 0..3 {
            for a in 0..n {
                for b in 0..n {
                    if (a + b + round) % 2 == 0 || a == b {
                        continue;
                    }
                    board.toggle_bridge(a, b);

                    for id in 0..n {
                        assert!(board.degree(id) <= board.island(id).required);
                    }
                    let placed = board.bridges().collect::<Vec<_>>();
                    for &(x, y, m) in placed.iter() {
                        assert!(m == 1 || m == 2);
                        assert_eq!(board.multiplicity(y, x), m);
                        assert!(board.line_between(x, y).is_ok());
                        for &(p, q, _) in placed.iter() {
                            assert!(!board.segment(x, y).crosses(&board.segment(p, q)));
                        }
                    }
                }
            }
        }
    }
}
