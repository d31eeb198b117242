//
// Hashiwokakero logic engine
//
// Copyright 2021 Simon Frankau
//

use crate::board::{Board, IslandId};

/// A bridge the player is forced to build: `island` has only one
/// neighbour left that can take a bridge from it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Hint {
    pub island: IslandId,
    pub candidate: IslandId,
}

impl Board {
    /// The first island, in construction order, with exactly one valid
    /// candidate. Doesn't touch the board.
    pub fn hint(&self) -> Option<Hint> {
        (0..self.islands().len())
            .filter(|&id| !self.is_satisfied(id))
            .find_map(|id| match self.valid_candidates(id).as_slice() {
                [candidate] => Some(Hint {
                    island: id,
                    candidate: *candidate,
                }),
                _ => None,
            })
    }
}
