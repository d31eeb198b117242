//
// Hashiwokakero logic engine
//
// Copyright 2021 Simon Frankau
//

use std::collections::VecDeque;
use std::fmt;

use log::{debug, info, trace};

use crate::board::{Board, IslandId, MAX_BRIDGES};

////////////////////////////////////////////////////////////////////////
// Configuration and results
//

/// Bounds on how much work [`Board::solve`] may do.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SolverConfig {
    /// Propagation passes over the whole board.
    pub max_iterations: usize,
    /// Decisions held open at once during the search.
    pub max_depth: usize,
    /// Search steps in total, each decision tried or undone counting one.
    pub max_steps: usize,
}

impl Default for SolverConfig {
    fn default() -> SolverConfig {
        SolverConfig {
            max_iterations: 100,
            max_depth: 1000,
            max_steps: 1_000_000,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SolvedBy {
    Propagation,
    Search,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PartialReason {
    // Some branch was cut off by `max_depth`, and nothing else worked.
    DepthLimit,
    StepLimit,
    // Every branch was tried.
    Exhausted,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SolveOutcome {
    Solved(SolvedBy),
    Partial(PartialReason),
}

impl fmt::Display for PartialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PartialReason::DepthLimit => "search depth limit reached",
            PartialReason::StepLimit => "search step limit reached",
            PartialReason::Exhausted => "no solution from this position",
        };
        f.write_str(text)
    }
}

impl SolveOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved(_))
    }
}

/// What a propagation run did.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Propagation {
    pub passes: usize,
    pub forced: usize,
}

////////////////////////////////////////////////////////////////////////
// Candidates
//

impl Board {
    /// Neighbours of `id` that could take one more bridge from it right
    /// now: not yet doubled, not crossing anything, and with both ends
    /// still short of their requirement.
    pub fn valid_candidates(&self, id: IslandId) -> Vec<IslandId> {
        if self.is_satisfied(id) {
            return Vec::new();
        }
        self.possible_neighbors(id)
            .into_iter()
            .filter(|&other| {
                let existing = self.multiplicity(id, other);
                existing < MAX_BRIDGES
                    && !self.is_satisfied(other)
                    && (existing > 0 || !self.check_bridge_crossing(id, other))
            })
            .collect()
    }

    // How many more bridges `other` could take from `id`, ignoring what
    // `id` itself still needs.
    fn residual(&self, id: IslandId, other: IslandId) -> usize {
        (MAX_BRIDGES - self.multiplicity(id, other)).min(self.remaining(other))
    }
}

////////////////////////////////////////////////////////////////////////
// Propagation
//

impl Board {
    // Apply the first forcing rule that fires for this island, returning
    // the number of bridges placed.
    //
    // 1. A single candidate must take everything it can.
    // 2. If the candidates can take exactly what's needed between them,
    //    they must all be filled.
    fn force_island(&mut self, id: IslandId) -> Option<usize> {
        let need = self.remaining(id);
        if need == 0 {
            return None;
        }

        let candidates = self.valid_candidates(id);
        if candidates.len() == 1 {
            let only = candidates[0];
            let units = self.residual(id, only).min(need);
            trace!(
                "forced {} onto {:?} -> {:?} (only candidate)",
                units,
                self.island(id).position(),
                self.island(only).position()
            );
            self.add_units(id, only, units);
            return Some(units);
        }

        let residuals = candidates
            .iter()
            .map(|&other| (other, self.residual(id, other)))
            .collect::<Vec<_>>();
        let capacity: usize = residuals.iter().map(|&(_, units)| units).sum();
        if residuals.is_empty() || capacity != need {
            return None;
        }

        for (other, units) in residuals {
            trace!(
                "forced {} onto {:?} -> {:?} (exact capacity)",
                units,
                self.island(id).position(),
                self.island(other).position()
            );
            self.add_units(id, other, units);
        }
        Some(capacity)
    }

    /// Place forced bridges until a whole pass changes nothing, or
    /// `max_iterations` passes have run.
    pub fn propagate(&mut self, max_iterations: usize) -> Propagation {
        let mut report = Propagation::default();

        while report.passes < max_iterations {
            report.passes += 1;
            let mut progress = false;

            for id in 0..self.islands().len() {
                // Keep working on an island while the rules still fire.
                while let Some(forced) = self.force_island(id) {
                    report.forced += forced;
                    progress = true;
                }
            }

            if !progress {
                break;
            }
        }

        report
    }
}

////////////////////////////////////////////////////////////////////////
// Search
//
// Islands are visited in construction order. At each unsatisfied
// island we may add 1 or 2 bridges to one of its candidates and stay on
// the same island, or skip it and hope later islands complete it.
//
// Decisions live on an explicit stack, each holding the options not yet
// tried and the one currently on the board, so undoing a decision is
// just removing exactly what it added.
//

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Choice {
    Bridge { to: IslandId, units: usize },
    Skip,
}

struct Frame {
    island: IslandId,
    options: VecDeque<Choice>,
    applied: Option<Choice>,
}

// Where the search goes next. Bridges from the same island are added in
// increasing order of the far end, starting at `floor`, so each set of
// bridges is only tried once.
#[derive(Copy, Clone, Debug)]
struct Cursor {
    island: IslandId,
    floor: IslandId,
}

enum Step {
    Enter(Cursor),
    NextOption,
}

impl Board {
    fn skip_satisfied(&self, mut cursor: Cursor) -> Cursor {
        while cursor.island < self.islands().len() && self.is_satisfied(cursor.island) {
            cursor = Cursor {
                island: cursor.island + 1,
                floor: 0,
            };
        }
        cursor
    }

    // Islands before `index` won't be visited again, so any that are
    // short must still have a candidate at or after `index`. Candidates
    // only ever shrink as bridges are added.
    fn is_dead_end(&self, index: IslandId) -> bool {
        (0..index).any(|id| {
            !self.is_satisfied(id) && self.valid_candidates(id).iter().all(|&other| other < index)
        })
    }

    fn options(&self, cursor: Cursor) -> VecDeque<Choice> {
        let id = cursor.island;
        let mut candidates = self.valid_candidates(id);
        candidates.sort_unstable();

        let mut options = VecDeque::new();
        for &to in candidates.iter().filter(|&&other| other >= cursor.floor) {
            let most = (MAX_BRIDGES - self.multiplicity(id, to))
                .min(self.remaining(id))
                .min(self.remaining(to));
            for units in 1..=most {
                options.push_back(Choice::Bridge { to, units });
            }
        }
        // Only worth skipping if a later island could still finish it.
        if candidates.iter().any(|&other| other > id) {
            options.push_back(Choice::Skip);
        }
        options
    }

    fn unwind(&mut self, stack: &mut Vec<Frame>) {
        while let Some(frame) = stack.pop() {
            if let Some(Choice::Bridge { to, units }) = frame.applied {
                self.remove_units(frame.island, to, units);
            }
        }
    }

    // On success the board is left solved. On failure every bridge the
    // search added has been removed again.
    fn search(&mut self, config: &SolverConfig) -> Result<(), PartialReason> {
        let n = self.islands().len();
        let mut stack: Vec<Frame> = Vec::new();
        let mut steps = 0;
        let mut depth_limited = false;
        let mut step = Step::Enter(Cursor {
            island: 0,
            floor: 0,
        });

        loop {
            steps += 1;
            if steps > config.max_steps {
                self.unwind(&mut stack);
                return Err(PartialReason::StepLimit);
            }

            step = match step {
                Step::Enter(cursor) => {
                    let cursor = self.skip_satisfied(cursor);
                    if cursor.island == n {
                        if self.check_win() {
                            debug!("search solved after {} steps", steps);
                            return Ok(());
                        }
                    } else if stack.len() >= config.max_depth {
                        depth_limited = true;
                    } else if !self.is_dead_end(cursor.island) {
                        stack.push(Frame {
                            island: cursor.island,
                            options: self.options(cursor),
                            applied: None,
                        });
                    }
                    Step::NextOption
                }
                Step::NextOption => {
                    let frame = match stack.last_mut() {
                        Some(frame) => frame,
                        None if depth_limited => return Err(PartialReason::DepthLimit),
                        None => return Err(PartialReason::Exhausted),
                    };

                    if let Some(Choice::Bridge { to, units }) = frame.applied.take() {
                        self.remove_units(frame.island, to, units);
                    }

                    match frame.options.pop_front() {
                        Some(choice) => {
                            trace!("island {}: trying {:?}", frame.island, choice);
                            frame.applied = Some(choice);
                            match choice {
                                Choice::Bridge { to, units } => {
                                    self.add_units(frame.island, to, units);
                                    Step::Enter(Cursor {
                                        island: frame.island,
                                        floor: to + 1,
                                    })
                                }
                                Choice::Skip => Step::Enter(Cursor {
                                    island: frame.island + 1,
                                    floor: 0,
                                }),
                            }
                        }
                        None => {
                            stack.pop();
                            Step::NextOption
                        }
                    }
                }
            };
        }
    }
}

////////////////////////////////////////////////////////////////////////
// Main entry point
//

impl Board {
    /// Solve from the current position: propagate forced bridges, then
    /// search if that wasn't enough. A partial result leaves the board
    /// as propagation left it.
    pub fn solve(&mut self, config: &SolverConfig) -> SolveOutcome {
        let report = self.propagate(config.max_iterations);
        debug!(
            "propagation placed {} bridges in {} passes",
            report.forced, report.passes
        );

        let outcome = if self.check_win() {
            SolveOutcome::Solved(SolvedBy::Propagation)
        } else {
            match self.search(config) {
                Ok(()) => SolveOutcome::Solved(SolvedBy::Search),
                Err(reason) => SolveOutcome::Partial(reason),
            }
        };

        info!("solve finished: {:?}", outcome);
        outcome
    }
}

////////////////////////////////////////////////////////////////////////
// Tests
//
