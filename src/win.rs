//
// Hashiwokakero logic engine
//
// Copyright 2021 Simon Frankau
//

use std::collections::VecDeque;

use crate::board::{Board, IslandId};

impl Board {
    /// Can every island be reached from the first by following bridges?
    pub fn is_connected(&self) -> bool {
        let n = self.islands().len();
        if n == 0 {
            return true;
        }

        let mut adjacent: Vec<Vec<IslandId>> = vec![Vec::new(); n];
        for (a, b, _) in self.bridges() {
            adjacent[a].push(b);
            adjacent[b].push(a);
        }

        let mut seen = vec![false; n];
        let mut queue = VecDeque::new();
        seen[0] = true;
        queue.push_back(0);
        let mut reached = 1;
        while let Some(id) = queue.pop_front() {
            for &next in adjacent[id].iter() {
                if !seen[next] {
                    seen[next] = true;
                    reached += 1;
                    queue.push_back(next);
                }
            }
        }

        reached == n
    }

    // A win needs both: satisfied islands can still form several
    // separate groups.
    pub fn check_win(&self) -> bool {
        (0..self.islands().len()).all(|id| self.degree(id) == self.island(id).required)
            && self.is_connected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_board_not_won() {
        let board = Board::new(&[vec![1, 1]]).unwrap();
        assert!(!board.is_connected());
        assert!(!board.check_win());
    }

    #[test]
    fn test_single_island_connected() {
        let board = Board::new(&[vec![0, 1, 0]]).unwrap();
        assert!(board.is_connected());
        // Connected, but still needs a bridge it can never have.
        assert!(!board.check_win());
    }

    #[test]
    fn test_two_components_not_won() {
        let mut board: Board = "1.1
                                ...
                                1.1"
            .parse()
            .unwrap();
        board.add_units(0, 1, 1);
        board.add_units(2, 3, 1);
        assert!((0..4).all(|id| board.is_satisfied(id)));
        assert!(!board.is_connected());
        assert!(!board.check_win());
    }

    #[test]
    fn test_connected_but_unsatisfied() {
        let mut board = Board::new(&[vec![2, 0, 2, 0, 1]]).unwrap();
        board.add_units(0, 1, 1);
        board.add_units(1, 2, 1);
        assert!(board.is_connected());
        assert!(!board.check_win());
        board.reset();
        board.add_units(0, 1, 1);
        assert!(!board.is_connected());
    }
}
