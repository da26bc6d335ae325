// grid.rs - Grid types for the traversal visualizer

use std::fmt;

use crate::error::PreconditionError;
use crate::traversal::{TraversalKind, TraversalRun};

// Default board size, overridable through VizConfig
pub const GRID_ROWS: usize = 25;
pub const GRID_COLS: usize = 25;

/// Neighbor expansion order shared by BFS and DFS: up, left, right, down.
pub const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Empty,
    Visited,
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Row-major matrix of cell states. Clones of it are the snapshots handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellState::Empty; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn get(&self, pos: Position) -> Option<CellState> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Writes `state` at `pos`. Returns false (and writes nothing) when out of bounds.
    pub fn set(&mut self, pos: Position, state: CellState) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.cells[i] = state;
                true
            }
            None => false,
        }
    }

    /// The in-bounds cell one step from `pos` in direction `delta`.
    pub fn neighbour(&self, pos: Position, (dr, dc): (isize, isize)) -> Option<Position> {
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        let next = Position::new(row, col);
        self.contains(next).then_some(next)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position::new(row, col)))
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    pub fn clear(&mut self) {
        self.cells.fill(CellState::Empty);
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos).then(|| pos.row * self.cols + pos.col)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GRID_ROWS, GRID_COLS)
    }
}

/// The interactive grid between runs: click placement of start and end, reset.
#[derive(Debug, Clone, Default)]
pub struct GridBoard {
    grid: Grid,
    start: Option<Position>,
    end: Option<Position>,
}

impl GridBoard {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            grid: Grid::new(rows, cols),
            start: None,
            end: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Option<Position> {
        self.start
    }

    pub fn end(&self) -> Option<Position> {
        self.end
    }

    pub fn is_ready(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// First click places Start, a second click on a different cell places End.
    /// Anything after that is ignored. Returns the marker that was placed.
    pub fn select(&mut self, pos: Position) -> Option<CellState> {
        if !self.grid.contains(pos) {
            return None;
        }
        match (self.start, self.end) {
            (None, _) => {
                self.start = Some(pos);
                self.grid.set(pos, CellState::Start);
                Some(CellState::Start)
            }
            (Some(start), None) if start != pos => {
                self.end = Some(pos);
                self.grid.set(pos, CellState::End);
                Some(CellState::End)
            }
            _ => None,
        }
    }

    /// Replaces the displayed grid with a snapshot published by a run.
    pub fn apply(&mut self, snapshot: Grid) {
        if snapshot.rows() == self.grid.rows() && snapshot.cols() == self.grid.cols() {
            self.grid = snapshot;
        }
    }

    pub fn reset(&mut self) {
        self.start = None;
        self.end = None;
        self.grid.clear();
    }

    /// Captures the current grid into a new run.
    pub fn traversal(&self, kind: TraversalKind) -> Result<TraversalRun, PreconditionError> {
        let start = self.start.ok_or(PreconditionError::MissingStart)?;
        let end = self.end.ok_or(PreconditionError::MissingEnd)?;
        TraversalRun::new(kind, self.grid.clone(), start, end)
    }
}

#[cfg(test)]
#[path = "tests/grid_tests.rs"]
mod tests;
