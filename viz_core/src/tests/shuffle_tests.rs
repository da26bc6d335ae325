use super::{SortBoard, shuffle_with_seed};
use crate::sorting::SortAlgorithm;

fn sorted_copy(values: &[u32]) -> Vec<u32> {
    let mut copy = values.to_vec();
    copy.sort_unstable();
    copy
}

#[test]
fn new_board_is_ascending() {
    let board = SortBoard::new(5);
    assert_eq!(board.values(), &[1, 2, 3, 4, 5]);
    assert!(board.is_sorted());
}

#[test]
fn shuffle_keeps_the_multiset() {
    let mut board = SortBoard::new(100);
    for seed in 0..20 {
        board.shuffle_with_seed(seed);
        assert_eq!(sorted_copy(board.values()), (1..=100).collect::<Vec<u32>>());
    }
    board.shuffle();
    assert_eq!(sorted_copy(board.values()), (1..=100).collect::<Vec<u32>>());
}

#[test]
fn shuffle_with_duplicates_keeps_counts() {
    let mut values = vec![1, 1, 2, 2, 2, 9];
    shuffle_with_seed(&mut values, 42);
    assert_eq!(sorted_copy(&values), vec![1, 1, 2, 2, 2, 9]);
}

#[test]
fn same_seed_same_order() {
    let mut a = SortBoard::new(30);
    let mut b = SortBoard::new(30);
    a.shuffle_with_seed(7);
    b.shuffle_with_seed(7);
    assert_eq!(a, b);
    assert!(!a.is_sorted());
}

#[test]
fn reset_restores_ascending_order() {
    let mut board = SortBoard::new(10);
    board.shuffle_with_seed(3);
    board.reset();
    assert!(board.is_sorted());
    assert_eq!(board.len(), 10);
}

#[test]
fn apply_replaces_values_wholesale() {
    let mut board = SortBoard::new(3);
    board.apply(vec![3, 2, 1]);
    assert_eq!(board.values(), &[3, 2, 1]);
    board.apply(vec![1]);
    assert_eq!(board.values(), &[3, 2, 1]);
}

#[test]
fn run_sorts_a_copy_of_the_board() {
    let mut board = SortBoard::new(12);
    board.shuffle_with_seed(11);
    let before = board.values().to_vec();
    let last = board
        .run(SortAlgorithm::Quick)
        .expect("non-empty board")
        .last()
        .expect("shuffled input needs steps");
    assert!(last.snapshot.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(board.values(), before.as_slice());
}

#[test]
fn empty_board_cannot_run() {
    let board = SortBoard::new(0);
    assert!(board.is_empty());
    assert!(board.run(SortAlgorithm::Merge).is_err());
}
