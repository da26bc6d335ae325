use super::{GridEvent, GridStep, TraversalKind, TraversalOutcome, TraversalRun};
use crate::error::PreconditionError;
use crate::grid::{CellState, Grid, Position};

fn p(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

fn events(steps: &[GridStep]) -> Vec<GridEvent> {
    steps.iter().map(|step| step.event).collect()
}

/// 3x3 grid whose middle column is already visited, splitting left from right.
fn split_grid() -> Grid {
    let mut grid = Grid::new(3, 3);
    for row in 0..3 {
        grid.set(p(row, 1), CellState::Visited);
    }
    grid
}

#[test]
fn bfs_three_by_three_publishes_eight_snapshots() {
    let mut run = TraversalRun::bfs(Grid::new(3, 3), p(0, 0), p(2, 2)).expect("valid run");
    let steps: Vec<GridStep> = run.by_ref().collect();

    assert_eq!(steps.len(), 8);
    assert_eq!(
        events(&steps),
        vec![
            GridEvent::Visited(p(0, 1)),
            GridEvent::Visited(p(1, 0)),
            GridEvent::Visited(p(0, 2)),
            GridEvent::Visited(p(1, 1)),
            GridEvent::Visited(p(2, 0)),
            GridEvent::Visited(p(1, 2)),
            GridEvent::Visited(p(2, 1)),
            GridEvent::Reached(p(2, 2)),
        ]
    );
    assert_eq!(run.outcome(), Some(TraversalOutcome::Found));

    for step in &steps {
        assert_eq!(step.snapshot.get(p(0, 0)), Some(CellState::Start));
        assert_eq!(step.snapshot.get(p(2, 2)), Some(CellState::End));
    }
    let last = &steps[7].snapshot;
    assert_eq!(last.count(CellState::Visited), 7);
    assert_eq!(last.count(CellState::Empty), 0);
}

#[test]
fn bfs_snapshots_grow_one_cell_at_a_time() {
    let run = TraversalRun::bfs(Grid::new(4, 5), p(1, 1), p(3, 4)).expect("valid run");
    for (i, step) in run.enumerate() {
        if let GridEvent::Visited(pos) = step.event {
            assert_eq!(step.snapshot.get(pos), Some(CellState::Visited));
            assert_eq!(step.snapshot.count(CellState::Visited), i + 1);
        }
    }
}

#[test]
fn bfs_disconnected_end_is_not_found() {
    let mut run = TraversalRun::bfs(split_grid(), p(0, 0), p(0, 2)).expect("valid run");
    assert_eq!(run.outcome(), None);

    let steps: Vec<GridStep> = run.by_ref().collect();

    assert_eq!(
        events(&steps),
        vec![GridEvent::Visited(p(1, 0)), GridEvent::Visited(p(2, 0))]
    );
    assert_eq!(run.outcome(), Some(TraversalOutcome::NotFound));
    assert_eq!(run.next(), None);
}

#[test]
fn bfs_adjacent_end_is_found_without_visiting() {
    let mut run = TraversalRun::bfs(Grid::new(2, 2), p(0, 0), p(0, 1)).expect("valid run");
    // up and left are off the grid, right is the end
    let steps: Vec<GridStep> = run.by_ref().collect();
    assert_eq!(events(&steps), vec![GridEvent::Reached(p(0, 1))]);
    assert_eq!(steps[0].snapshot.count(CellState::Visited), 0);
    assert_eq!(run.outcome(), Some(TraversalOutcome::Found));
}

#[test]
fn dfs_follows_up_left_right_down_order() {
    let mut run = TraversalRun::dfs(Grid::new(3, 3), p(0, 0), p(2, 2)).expect("valid run");
    let steps: Vec<GridStep> = run.by_ref().collect();

    assert_eq!(
        events(&steps),
        vec![
            GridEvent::Visited(p(0, 0)),
            GridEvent::Visited(p(0, 1)),
            GridEvent::Visited(p(0, 2)),
            GridEvent::Visited(p(1, 2)),
            GridEvent::Visited(p(1, 1)),
            GridEvent::Visited(p(1, 0)),
            GridEvent::Visited(p(2, 0)),
            GridEvent::Visited(p(2, 1)),
            GridEvent::Reached(p(2, 2)),
        ]
    );
    assert_eq!(run.outcome(), Some(TraversalOutcome::Found));
    assert_eq!(steps[0].snapshot.get(p(0, 0)), Some(CellState::Start));
}

#[test]
fn dfs_publishes_nothing_after_end() {
    let mut run = TraversalRun::dfs(Grid::new(6, 6), p(0, 0), p(0, 3)).expect("valid run");
    let steps: Vec<GridStep> = run.by_ref().collect();

    let reached = steps
        .iter()
        .position(|step| matches!(step.event, GridEvent::Reached(_)))
        .expect("end reached");
    assert_eq!(reached, steps.len() - 1);
    assert_eq!(run.next(), None);
    assert_eq!(run.next(), None);
}

#[test]
fn dfs_disconnected_visits_each_reachable_cell_once() {
    let mut run = TraversalRun::dfs(split_grid(), p(0, 0), p(0, 2)).expect("valid run");
    let steps: Vec<GridStep> = run.by_ref().collect();

    assert_eq!(
        events(&steps),
        vec![
            GridEvent::Visited(p(0, 0)),
            GridEvent::Visited(p(1, 0)),
            GridEvent::Visited(p(2, 0)),
        ]
    );
    assert_eq!(run.outcome(), Some(TraversalOutcome::NotFound));
}

#[test]
fn rejects_bad_endpoints() {
    let grid = Grid::new(3, 3);
    assert_eq!(
        TraversalRun::bfs(grid.clone(), p(1, 1), p(1, 1)).err(),
        Some(PreconditionError::StartIsEnd(p(1, 1)))
    );
    assert_eq!(
        TraversalRun::new(TraversalKind::Dfs, grid, p(0, 0), p(3, 0)).err(),
        Some(PreconditionError::OutOfBounds {
            pos: p(3, 0),
            rows: 3,
            cols: 3,
        })
    );
}

#[test]
fn run_leaves_the_callers_grid_untouched() {
    let grid = Grid::new(3, 3);
    let run = TraversalRun::bfs(grid.clone(), p(0, 0), p(2, 2)).expect("valid run");
    assert_eq!(run.count(), 8);
    assert_eq!(grid.count(CellState::Empty), 9);
}
