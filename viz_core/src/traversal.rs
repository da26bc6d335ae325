// traversal.rs - BFS and DFS as step-by-step walks over a captured grid
//
// Each call to `next` advances the walk to the next visible mutation and
// returns a snapshot of the whole grid at that point.

use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::error::PreconditionError;
use crate::grid::{CellState, DIRECTIONS, Grid, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalKind {
    Bfs,
    Dfs,
}

impl TraversalKind {
    pub const ALL: [TraversalKind; 2] = [TraversalKind::Bfs, TraversalKind::Dfs];

    pub fn name(self) -> &'static str {
        match self {
            TraversalKind::Bfs => "BFS",
            TraversalKind::Dfs => "DFS",
        }
    }
}

impl fmt::Display for TraversalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    /// A cell joined the visited set.
    Visited(Position),
    /// The end cell was discovered. Always the last step of a run.
    Reached(Position),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridStep {
    pub event: GridEvent,
    pub snapshot: Grid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOutcome {
    Found,
    NotFound,
}

#[derive(Debug, Clone)]
enum Walk {
    Breadth {
        frontier: VecDeque<Position>,
        // cell being expanded and the next direction to try
        current: Option<(Position, usize)>,
    },
    Depth {
        stack: Vec<(Position, usize)>,
        // cell about to be entered
        pending: Option<Position>,
        visited: HashSet<Position>,
    },
}

/// One traversal over its own copy of the grid.
#[derive(Debug, Clone)]
pub struct TraversalRun {
    kind: TraversalKind,
    grid: Grid,
    end: Position,
    walk: Walk,
    outcome: Option<TraversalOutcome>,
    steps: usize,
}

impl TraversalRun {
    pub fn new(
        kind: TraversalKind,
        mut grid: Grid,
        start: Position,
        end: Position,
    ) -> Result<Self, PreconditionError> {
        for pos in [start, end] {
            if !grid.contains(pos) {
                return Err(PreconditionError::OutOfBounds {
                    pos,
                    rows: grid.rows(),
                    cols: grid.cols(),
                });
            }
        }
        if start == end {
            return Err(PreconditionError::StartIsEnd(start));
        }

        grid.set(start, CellState::Start);
        grid.set(end, CellState::End);

        let walk = match kind {
            TraversalKind::Bfs => Walk::Breadth {
                frontier: VecDeque::from([start]),
                current: None,
            },
            TraversalKind::Dfs => Walk::Depth {
                stack: Vec::new(),
                pending: Some(start),
                visited: grid
                    .positions()
                    .filter(|&pos| grid.get(pos) == Some(CellState::Visited))
                    .collect(),
            },
        };

        debug!(%kind, %start, %end, rows = grid.rows(), cols = grid.cols(), "traversal run created");
        Ok(Self {
            kind,
            grid,
            end,
            walk,
            outcome: None,
            steps: 0,
        })
    }

    pub fn bfs(grid: Grid, start: Position, end: Position) -> Result<Self, PreconditionError> {
        Self::new(TraversalKind::Bfs, grid, start, end)
    }

    pub fn dfs(grid: Grid, start: Position, end: Position) -> Result<Self, PreconditionError> {
        Self::new(TraversalKind::Dfs, grid, start, end)
    }

    pub fn kind(&self) -> TraversalKind {
        self.kind
    }

    /// `None` while the walk is still in progress.
    pub fn outcome(&self) -> Option<TraversalOutcome> {
        self.outcome
    }

    /// Current state of the working copy.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    fn finish(&mut self, outcome: TraversalOutcome) {
        debug!(kind = %self.kind, ?outcome, steps = self.steps, "traversal run finished");
        self.outcome = Some(outcome);
    }

    fn emit(&mut self, event: GridEvent) -> GridStep {
        self.steps += 1;
        trace!(kind = %self.kind, ?event, step = self.steps, "grid step");
        GridStep {
            event,
            snapshot: self.grid.clone(),
        }
    }

    fn next_breadth(&mut self) -> Option<GridStep> {
        let Walk::Breadth { frontier, current } = &mut self.walk else {
            return None;
        };
        loop {
            let (pos, dir) = match current.take() {
                Some(expanding) => expanding,
                None => match frontier.pop_front() {
                    Some(pos) => (pos, 0),
                    None => break,
                },
            };
            if dir == DIRECTIONS.len() {
                continue;
            }
            *current = Some((pos, dir + 1));

            let Some(next) = self.grid.neighbour(pos, DIRECTIONS[dir]) else {
                continue;
            };
            // Marked at enqueue time so a cell is never queued twice
            if self.grid.get(next) == Some(CellState::Empty) {
                self.grid.set(next, CellState::Visited);
                frontier.push_back(next);
                return Some(self.emit(GridEvent::Visited(next)));
            }
            if next == self.end {
                self.grid.set(next, CellState::End);
                let step = self.emit(GridEvent::Reached(next));
                self.finish(TraversalOutcome::Found);
                return Some(step);
            }
        }
        self.finish(TraversalOutcome::NotFound);
        None
    }

    fn next_depth(&mut self) -> Option<GridStep> {
        let Walk::Depth {
            stack,
            pending,
            visited,
        } = &mut self.walk
        else {
            return None;
        };
        loop {
            if let Some(pos) = pending.take() {
                if !visited.insert(pos) {
                    continue;
                }
                if self.grid.get(pos) == Some(CellState::Empty) {
                    self.grid.set(pos, CellState::Visited);
                }
                if pos == self.end {
                    let step = self.emit(GridEvent::Reached(pos));
                    self.finish(TraversalOutcome::Found);
                    return Some(step);
                }
                stack.push((pos, 0));
                return Some(self.emit(GridEvent::Visited(pos)));
            }

            let Some((pos, dir)) = stack.last_mut() else {
                break;
            };
            if *dir == DIRECTIONS.len() {
                stack.pop();
                continue;
            }
            let delta = DIRECTIONS[*dir];
            *dir += 1;
            *pending = self.grid.neighbour(*pos, delta);
        }
        self.finish(TraversalOutcome::NotFound);
        None
    }
}

impl Iterator for TraversalRun {
    type Item = GridStep;

    fn next(&mut self) -> Option<GridStep> {
        // Once the end is found or the walk is exhausted nothing else is published
        if self.outcome.is_some() {
            return None;
        }
        match self.kind {
            TraversalKind::Bfs => self.next_breadth(),
            TraversalKind::Dfs => self.next_depth(),
        }
    }
}

impl FusedIterator for TraversalRun {}

#[cfg(test)]
#[path = "tests/traversal_tests.rs"]
mod tests;
