//
// Hashiwokakero logic engine
//
// Copyright 2021 Simon Frankau
//

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{NoStraightPath, PuzzleError};

////////////////////////////////////////////////////////////////////////
// Data structures / problem representation
//

// Islands are addressed by their index in construction (row-major)
// order. Everything that refers to an island goes through this index,
// so islands never hold references to each other.
pub type IslandId = usize;

// Most bridges allowed between a single pair of islands.
pub const MAX_BRIDGES: usize = 2;

// An island has at most 4 neighbours, each with at most MAX_BRIDGES.
pub const MAX_DEGREE: usize = 4 * MAX_BRIDGES;

// There are 4 directions from an island.
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum Direction {
    North = 0,
    South = 1,
    West = 2,
    East = 3,
}

pub const ALL_DIRS: &[Direction] = &[
    Direction::North,
    Direction::South,
    Direction::West,
    Direction::East,
];

// The (row, col) steps to move N S W E respectively.
const DIRECTION_STEPS: &[(isize, isize)] = &[(-1, 0), (1, 0), (0, -1), (0, 1)];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A puzzle node. Position and requirement are fixed once the board is
/// built; the bridges touching it live in the owning [`Board`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Island {
    pub row: usize,
    pub col: usize,
    pub required: usize,
}

/// A straight line between two grid cells, given as (row, col) pairs.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Segment {
    pub from: (usize, usize),
    pub to: (usize, usize),
}

/// All islands of one puzzle, plus the bridges currently placed.
///
/// Bridges are keyed by the (lower, higher) pair of island ids, so the
/// multiplicity seen from either end is the same entry. Entries with
/// multiplicity 0 are removed rather than stored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    height: usize,
    width: usize,
    islands: Vec<Island>,
    // Row-major coordinate index.
    cells: Vec<Option<IslandId>>,
    bridges: BTreeMap<(IslandId, IslandId), usize>,
    degrees: Vec<usize>,
}

fn edge_key(a: IslandId, b: IslandId) -> (IslandId, IslandId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl Direction {
    fn step(&self) -> (isize, isize) {
        DIRECTION_STEPS[*self as usize]
    }
}

impl Island {
    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}

impl Segment {
    pub fn new(from: (usize, usize), to: (usize, usize)) -> Segment {
        Segment { from, to }
    }

    // None for diagonal lines, and for a "line" from a cell to itself.
    pub fn orientation(&self) -> Option<Orientation> {
        if self.from.0 == self.to.0 && self.from.1 != self.to.1 {
            Some(Orientation::Horizontal)
        } else if self.from.1 == self.to.1 && self.from.0 != self.to.0 {
            Some(Orientation::Vertical)
        } else {
            None
        }
    }

    /// True if a horizontal and a vertical segment meet at a point
    /// strictly inside both. Segments sharing an endpoint never cross.
    pub fn crosses(&self, other: &Segment) -> bool {
        let (horiz, vert) = match (self.orientation(), other.orientation()) {
            (Some(Orientation::Horizontal), Some(Orientation::Vertical)) => (self, other),
            (Some(Orientation::Vertical), Some(Orientation::Horizontal)) => (other, self),
            _ => return false,
        };

        let row = horiz.from.0;
        let col = vert.from.1;
        let (min_col, max_col) = ordered(horiz.from.1, horiz.to.1);
        let (min_row, max_row) = ordered(vert.from.0, vert.to.0);

        min_row < row && row < max_row && min_col < col && col < max_col
    }
}

////////////////////////////////////////////////////////////////////////
// Construction
//

impl Board {
    /// Build a board from a rectangular matrix: 0 is an empty cell, and
    /// n > 0 an island needing n bridges.
    pub fn new(matrix: &[Vec<i32>]) -> Result<Board, PuzzleError> {
        let height = matrix.len();
        let width = matrix.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(PuzzleError::Empty);
        }

        let mut islands = Vec::new();
        let mut cells = Vec::with_capacity(height * width);
        for (row, line) in matrix.iter().enumerate() {
            if line.len() != width {
                return Err(PuzzleError::NotRectangular {
                    row,
                    expected: width,
                    found: line.len(),
                });
            }
            for (col, &value) in line.iter().enumerate() {
                if value < 0 {
                    return Err(PuzzleError::NegativeCell { row, col, value });
                }
                if value as usize > MAX_DEGREE {
                    return Err(PuzzleError::DegreeTooLarge { row, col, value });
                }
                if value == 0 {
                    cells.push(None);
                } else {
                    cells.push(Some(islands.len()));
                    islands.push(Island {
                        row,
                        col,
                        required: value as usize,
                    });
                }
            }
        }

        if islands.is_empty() {
            return Err(PuzzleError::NoIslands);
        }

        let degrees = vec![0; islands.len()];
        Ok(Board {
            height,
            width,
            islands,
            cells,
            bridges: BTreeMap::new(),
            degrees,
        })
    }

    /// Remove every bridge, leaving the islands as they were built.
    pub fn reset(&mut self) {
        self.bridges.clear();
        for degree in self.degrees.iter_mut() {
            *degree = 0;
        }
    }
}

////////////////////////////////////////////////////////////////////////
// Queries
//

impl Board {
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    pub fn island(&self, id: IslandId) -> &Island {
        &self.islands[id]
    }

    pub fn island_at(&self, row: usize, col: usize) -> Option<IslandId> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.cells[row * self.width + col]
    }

    /// Map a pixel position onto the grid, given the size of a cell in
    /// pixels, and return the island drawn there.
    pub fn island_at_pixel(&self, x: usize, y: usize, cell_size: usize) -> Option<IslandId> {
        if cell_size == 0 {
            return None;
        }
        self.island_at(y / cell_size, x / cell_size)
    }

    pub fn multiplicity(&self, a: IslandId, b: IslandId) -> usize {
        self.bridges.get(&edge_key(a, b)).copied().unwrap_or(0)
    }

    pub fn degree(&self, id: IslandId) -> usize {
        self.degrees[id]
    }

    // Bridges still needed before the island is satisfied.
    pub fn remaining(&self, id: IslandId) -> usize {
        self.islands[id].required.saturating_sub(self.degrees[id])
    }

    pub fn is_satisfied(&self, id: IslandId) -> bool {
        self.degrees[id] >= self.islands[id].required
    }

    /// Every placed bridge as (lower id, higher id, multiplicity), in a
    /// stable order.
    pub fn bridges(&self) -> impl Iterator<Item = (IslandId, IslandId, usize)> + '_ {
        self.bridges.iter().map(|(&(a, b), &m)| (a, b, m))
    }

    // The islands joined to `id`, with multiplicities.
    pub fn bridges_of(&self, id: IslandId) -> impl Iterator<Item = (IslandId, usize)> + '_ {
        self.bridges.iter().filter_map(move |(&(a, b), &m)| {
            if a == id {
                Some((b, m))
            } else if b == id {
                Some((a, m))
            } else {
                None
            }
        })
    }

    pub fn segment(&self, a: IslandId, b: IslandId) -> Segment {
        Segment::new(self.islands[a].position(), self.islands[b].position())
    }

    pub fn find_neighbour(&self, id: IslandId, dir: Direction) -> Option<IslandId> {
        let isle = &self.islands[id];
        let (mut row, mut col) = (isle.row as isize, isle.col as isize);
        let (step_row, step_col) = dir.step();
        loop {
            row += step_row;
            col += step_col;
            if row < 0 || col < 0 {
                return None;
            }
            let (r, c) = (row as usize, col as usize);
            if r >= self.height || c >= self.width {
                return None;
            }
            if let Some(other) = self.island_at(r, c) {
                return Some(other);
            }
        }
    }

    /// The nearest island in each direction. Bridges already placed do
    /// not hide an island here, only other islands do.
    pub fn possible_neighbors(&self, id: IslandId) -> Vec<IslandId> {
        ALL_DIRS
            .iter()
            .filter_map(|dir| self.find_neighbour(id, *dir))
            .collect()
    }

    /// The orientation of a bridge between `a` and `b`, if they share
    /// exactly one of row or column with no island in between.
    pub fn line_between(&self, a: IslandId, b: IslandId) -> Result<Orientation, NoStraightPath> {
        let (from, to) = (self.islands[a], self.islands[b]);
        let orientation = self.segment(a, b).orientation().ok_or(NoStraightPath)?;

        let blocked = match orientation {
            Orientation::Horizontal => {
                let (lo, hi) = ordered(from.col, to.col);
                (lo + 1..hi).any(|col| self.island_at(from.row, col).is_some())
            }
            Orientation::Vertical => {
                let (lo, hi) = ordered(from.row, to.row);
                (lo + 1..hi).any(|row| self.island_at(row, from.col).is_some())
            }
        };

        if blocked {
            Err(NoStraightPath)
        } else {
            Ok(orientation)
        }
    }

    /// Would a bridge between `a` and `b` cross any bridge already placed?
    pub fn check_bridge_crossing(&self, a: IslandId, b: IslandId) -> bool {
        let candidate = self.segment(a, b);
        self.bridges
            .keys()
            .any(|&(x, y)| candidate.crosses(&self.segment(x, y)))
    }
}

////////////////////////////////////////////////////////////////////////
// Raw mutation
//
// These keep the two ends of a bridge in step, but do no validation
// beyond debug assertions: callers check legality first.
//

impl Board {
    pub(crate) fn add_units(&mut self, a: IslandId, b: IslandId, units: usize) {
        debug_assert!(a != b);
        debug_assert!(self.multiplicity(a, b) + units <= MAX_BRIDGES);
        debug_assert!(units <= self.remaining(a) && units <= self.remaining(b));
        if units == 0 {
            return;
        }
        *self.bridges.entry(edge_key(a, b)).or_insert(0) += units;
        self.degrees[a] += units;
        self.degrees[b] += units;
    }

    pub(crate) fn remove_units(&mut self, a: IslandId, b: IslandId, units: usize) {
        let key = edge_key(a, b);
        let current = self.bridges.get(&key).copied().unwrap_or(0);
        debug_assert!(units <= current);
        let left = current.saturating_sub(units);
        if left == 0 {
            self.bridges.remove(&key);
        } else {
            self.bridges.insert(key, left);
        }
        let removed = current - left;
        self.degrees[a] -= removed;
        self.degrees[b] -= removed;
    }
}

////////////////////////////////////////////////////////////////////////
// Printer
//

// Lossy, like the input format: islands show their requirement, and
// bridges are painted over the cells they span.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut grid = vec![vec!['.'; self.width]; self.height];

        for isle in self.islands.iter() {
            grid[isle.row][isle.col] =
                std::char::from_digit(isle.required as u32, 10).unwrap_or('?');
        }

        for (a, b, n_bridges) in self.bridges() {
            let (from, to) = (self.islands[a], self.islands[b]);
            match self.segment(a, b).orientation() {
                Some(Orientation::Horizontal) => {
                    let brush = if n_bridges == 1 { '-' } else { '=' };
                    let (lo, hi) = ordered(from.col, to.col);
                    for col in lo + 1..hi {
                        grid[from.row][col] = brush;
                    }
                }
                Some(Orientation::Vertical) => {
                    let brush = if n_bridges == 1 { '|' } else { 'H' };
                    let (lo, hi) = ordered(from.row, to.row);
                    for row in lo + 1..hi {
                        grid[row][from.col] = brush;
                    }
                }
                None => (),
            }
        }

        let lines = grid
            .iter()
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>();
        write!(f, "{}", lines.join("\n"))
    }
}

////////////////////////////////////////////////////////////////////////
// Tests
//
