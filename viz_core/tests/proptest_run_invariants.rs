//! Property-based invariant tests for traversal and sorting runs.
//!
//! 1. Every sort ends ascending and every snapshot is a permutation of the input.
//! 2. Lomuto partition leaves smaller values left of the pivot, the rest right.
//! 3. Merge sort is stable.
//! 4. BFS on an open grid always reaches the end within R*C snapshots.
//! 5. BFS on a walled-off grid reports NotFound after one snapshot per reachable cell.
//! 6. DFS never publishes after the end is reached.
//! 7. Shuffle preserves the multiset.

use std::collections::{HashSet, VecDeque};

use proptest::prelude::*;
use viz_core::grid::DIRECTIONS;
use viz_core::shuffle::shuffle_with_seed;
use viz_core::sorting::partition;
use viz_core::{
    CellState, Grid, GridEvent, Position, SortAlgorithm, SortRun, TraversalOutcome, TraversalRun,
};

// ── Helpers ─────────────────────────────────────────────────────────────

fn permutation_strategy() -> impl Strategy<Value = Vec<u32>> {
    (1u32..=40).prop_flat_map(|n| Just((1..=n).collect::<Vec<u32>>()).prop_shuffle())
}

fn algorithm_strategy() -> impl Strategy<Value = SortAlgorithm> {
    prop::sample::select(SortAlgorithm::ALL.to_vec())
}

/// Grid size plus two distinct cells inside it.
fn endpoints_strategy() -> impl Strategy<Value = (usize, usize, Position, Position)> {
    (2usize..=8, 2usize..=8).prop_flat_map(|(rows, cols)| {
        (0..rows * cols, 0..rows * cols - 1).prop_map(move |(a, b)| {
            let b = if b >= a { b + 1 } else { b };
            (
                rows,
                cols,
                Position::new(a / cols, a % cols),
                Position::new(b / cols, b % cols),
            )
        })
    })
}

/// Empty cells reachable from `start`, not counting `start` itself.
fn reachable_empty(grid: &Grid, start: Position) -> usize {
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    let mut count = 0;
    while let Some(pos) = queue.pop_front() {
        for delta in DIRECTIONS {
            if let Some(next) = grid.neighbour(pos, delta) {
                if grid.get(next) == Some(CellState::Empty) && seen.insert(next) {
                    count += 1;
                    queue.push_back(next);
                }
            }
        }
    }
    count
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Sorting ends ascending through permutations only
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn sort_ends_ascending(values in permutation_strategy(), algorithm in algorithm_strategy()) {
        let expected: Vec<u32> = (1..=values.len() as u32).collect();
        let run = SortRun::new(algorithm, &values).expect("non-empty input");
        let mut last = values.clone();
        for step in run {
            let mut seen = step.snapshot.clone();
            seen.sort_unstable();
            prop_assert_eq!(&seen, &expected, "{} published a non-permutation", algorithm);
            last = step.snapshot;
        }
        prop_assert_eq!(last, expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Lomuto partition postcondition
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn partition_splits_around_pivot(mut values in prop::collection::vec(0u32..20, 1..30)) {
        let high = values.len() - 1;
        let pivot = values[high];
        let index = partition(&mut values, 0, high);
        prop_assert_eq!(values[index], pivot);
        prop_assert!(values[..index].iter().all(|&v| v < pivot));
        prop_assert!(values[index..].iter().all(|&v| v >= pivot));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Merge sort stability
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn merge_sort_is_stable(keys in prop::collection::vec(0u32..5, 1..40)) {
        // ordered by key only; origin remembers the input position
        #[derive(Debug, Clone, Copy)]
        struct Item { key: u32, origin: usize }
        impl PartialEq for Item { fn eq(&self, o: &Self) -> bool { self.key == o.key } }
        impl Eq for Item {}
        impl PartialOrd for Item {
            fn partial_cmp(&self, o: &Self) -> Option<std::cmp::Ordering> { Some(self.cmp(o)) }
        }
        impl Ord for Item {
            fn cmp(&self, o: &Self) -> std::cmp::Ordering { self.key.cmp(&o.key) }
        }

        let items: Vec<Item> = keys.iter().enumerate().map(|(origin, &key)| Item { key, origin }).collect();
        let last = SortRun::new(SortAlgorithm::Merge, &items)
            .expect("non-empty input")
            .last()
            .map(|step| step.snapshot)
            .unwrap_or(items);
        for pair in last.windows(2) {
            prop_assert!(pair[0].key <= pair[1].key);
            if pair[0].key == pair[1].key {
                prop_assert!(pair[0].origin < pair[1].origin);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. BFS on an open grid
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn bfs_reaches_end_on_open_grid((rows, cols, start, end) in endpoints_strategy()) {
        let mut run = TraversalRun::bfs(Grid::new(rows, cols), start, end).expect("valid run");
        let steps: Vec<_> = run.by_ref().collect();
        prop_assert_eq!(run.outcome(), Some(TraversalOutcome::Found));
        prop_assert!(steps.len() <= rows * cols);
        prop_assert_eq!(steps.last().map(|s| s.event), Some(GridEvent::Reached(end)));
        for step in &steps {
            prop_assert_eq!(step.snapshot.get(start), Some(CellState::Start));
            prop_assert_eq!(step.snapshot.count(CellState::Start), 1);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. BFS with the end walled off
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn bfs_reports_not_found_when_end_is_walled_off(
        rows in 3usize..=8,
        cols in 3usize..=8,
        start_row in 0usize..8,
        end_row in 0usize..8,
    ) {
        // column 1 is a wall of already visited cells
        let mut grid = Grid::new(rows, cols);
        for row in 0..rows {
            grid.set(Position::new(row, 1), CellState::Visited);
        }
        let start = Position::new(start_row % rows, 0);
        let end = Position::new(end_row % rows, cols - 1);

        let expected = reachable_empty(&grid, start);
        let mut run = TraversalRun::bfs(grid, start, end).expect("valid run");
        let steps = run.by_ref().count();

        prop_assert_eq!(run.outcome(), Some(TraversalOutcome::NotFound));
        prop_assert_eq!(steps, expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. DFS stops promptly
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn dfs_publishes_nothing_after_end((rows, cols, start, end) in endpoints_strategy()) {
        let mut run = TraversalRun::dfs(Grid::new(rows, cols), start, end).expect("valid run");
        let steps: Vec<_> = run.by_ref().collect();
        prop_assert_eq!(run.outcome(), Some(TraversalOutcome::Found));
        let reached = steps.iter().filter(|s| matches!(s.event, GridEvent::Reached(_))).count();
        prop_assert_eq!(reached, 1);
        prop_assert_eq!(steps.last().map(|s| s.event), Some(GridEvent::Reached(end)));
        prop_assert!(run.next().is_none());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Shuffle preserves the multiset
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn shuffle_preserves_multiset(mut values in prop::collection::vec(0u32..10, 0..60), seed in any::<u64>()) {
        let mut before = values.clone();
        shuffle_with_seed(&mut values, seed);
        let mut after = values;
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }
}
