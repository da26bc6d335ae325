// sorting.rs - The five sorting algorithms as resumable, step-by-step runs
//
// Every algorithm is an explicit state machine over the run's own copy of
// the array. Each call to `next` resumes it until the next visible write, so
// no work happens ahead of the renderer and a run can be dropped between any
// two snapshots.

use std::fmt;
use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::error::PreconditionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortAlgorithm {
    Merge,
    Quick,
    Bubble,
    Selection,
    Insertion,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 5] = [
        SortAlgorithm::Merge,
        SortAlgorithm::Quick,
        SortAlgorithm::Bubble,
        SortAlgorithm::Selection,
        SortAlgorithm::Insertion,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SortAlgorithm::Merge => "Merge Sort",
            SortAlgorithm::Quick => "Quick Sort",
            SortAlgorithm::Bubble => "Bubble Sort",
            SortAlgorithm::Selection => "Selection Sort",
            SortAlgorithm::Insertion => "Insertion Sort",
        }
    }

    /// Bubble, selection and insertion close with a snapshot of the sorted array.
    fn ends_with_final_snapshot(self) -> bool {
        matches!(
            self,
            SortAlgorithm::Bubble | SortAlgorithm::Selection | SortAlgorithm::Insertion
        )
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What one resumption of a [`Partition`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionSwap {
    /// A value below the pivot was swapped into this slot.
    Low(usize),
    /// The pivot was swapped into its final slot; the partition is done.
    Pivot(usize),
}

/// Lomuto partition of `[low, high]` around the value at `high`, one swap per step.
///
/// When done the pivot sits at index `p`: everything in `[low, p)` is less
/// than it and everything in `(p, high]` is greater or equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    low: usize,
    high: usize,
    // next slot of the "< pivot" region
    store: usize,
    scan: usize,
}

impl Partition {
    pub fn new(low: usize, high: usize) -> Self {
        Self {
            low,
            high,
            store: low,
            scan: low,
        }
    }

    pub fn range(&self) -> (usize, usize) {
        (self.low, self.high)
    }

    /// Runs to the next swap. Calling again after `Pivot` is a no-op that
    /// reports the pivot index again.
    pub fn step<T: Ord + Copy>(&mut self, values: &mut [T]) -> PartitionSwap {
        // the pivot stays at `high` until the final swap
        let pivot = values[self.high];
        while self.scan < self.high {
            let j = self.scan;
            self.scan += 1;
            if values[j] < pivot {
                let slot = self.store;
                values.swap(slot, j);
                self.store += 1;
                return PartitionSwap::Low(slot);
            }
        }
        if self.scan == self.high {
            values.swap(self.store, self.high);
            self.scan += 1;
        }
        PartitionSwap::Pivot(self.store)
    }
}

/// Partitions `values[low..=high]` in one go and returns the pivot's index.
pub fn partition<T: Ord + Copy>(values: &mut [T], low: usize, high: usize) -> usize {
    let mut part = Partition::new(low, high);
    loop {
        if let PartitionSwap::Pivot(index) = part.step(values) {
            return index;
        }
    }
}

/// Merge of `[left, mid]` and `[mid + 1, right]`, filling output position `k`.
///
/// `[next, mid]` is what is left of the left run and `[j, right]` of the
/// right run. Taking from the right run rotates that element into place, so
/// the array stays a permutation of the input throughout.
#[derive(Debug, Clone)]
struct Merge {
    next: usize,
    mid: usize,
    j: usize,
    right: usize,
    k: usize,
}

impl Merge {
    fn new(left: usize, mid: usize, right: usize) -> Self {
        Self {
            next: left,
            mid,
            j: mid + 1,
            right,
            k: left,
        }
    }

    fn step<T: Ord + Copy>(&mut self, values: &mut [T]) -> Option<usize> {
        if self.k > self.right {
            return None;
        }
        if self.next <= self.mid && self.j <= self.right {
            // `<=` keeps equal elements in left-run order
            if values[self.next] > values[self.j] {
                values[self.next..=self.j].rotate_right(1);
                self.mid += 1;
                self.j += 1;
            }
            self.next += 1;
        }
        let k = self.k;
        self.k += 1;
        Some(k)
    }
}

#[derive(Debug, Clone)]
enum Cursor {
    Merge {
        // (left, right, halves already sorted)
        stack: Vec<(usize, usize, bool)>,
        merging: Option<Merge>,
    },
    Quick {
        ranges: Vec<(usize, usize)>,
        partition: Option<Partition>,
    },
    Bubble {
        pass: usize,
        j: usize,
        swapped: bool,
    },
    Selection {
        i: usize,
    },
    Insertion {
        i: usize,
    },
}

impl Cursor {
    fn new(algorithm: SortAlgorithm, len: usize) -> Self {
        let last = len.saturating_sub(1);
        match algorithm {
            SortAlgorithm::Merge => Cursor::Merge {
                stack: vec![(0, last, false)],
                merging: None,
            },
            SortAlgorithm::Quick => Cursor::Quick {
                ranges: vec![(0, last)],
                partition: None,
            },
            SortAlgorithm::Bubble => Cursor::Bubble {
                pass: 0,
                j: 0,
                swapped: false,
            },
            SortAlgorithm::Selection => Cursor::Selection { i: 0 },
            SortAlgorithm::Insertion => Cursor::Insertion { i: 1 },
        }
    }

    /// Resumes the algorithm up to its next visible write and returns the
    /// index whose value is sounded, or `None` once the algorithm is done.
    fn advance<T: Ord + Copy>(&mut self, values: &mut [T]) -> Option<usize> {
        let n = values.len();
        match self {
            Cursor::Merge { stack, merging } => loop {
                if let Some(merge) = merging {
                    if let Some(k) = merge.step(values) {
                        return Some(k);
                    }
                    *merging = None;
                }
                let (left, right, sorted) = stack.pop()?;
                if left >= right {
                    continue;
                }
                let mid = (left + right) / 2;
                if sorted {
                    *merging = Some(Merge::new(left, mid, right));
                } else {
                    // left half comes off the stack first
                    stack.push((left, right, true));
                    stack.push((mid + 1, right, false));
                    stack.push((left, mid, false));
                }
            },
            Cursor::Quick { ranges, partition } => loop {
                if let Some(part) = partition {
                    match part.step(values) {
                        PartitionSwap::Low(slot) => return Some(slot),
                        PartitionSwap::Pivot(pivot) => {
                            let (low, high) = part.range();
                            *partition = None;
                            ranges.push((pivot + 1, high));
                            if pivot > low {
                                ranges.push((low, pivot - 1));
                            }
                            return Some(pivot);
                        }
                    }
                }
                let (low, high) = ranges.pop()?;
                if low < high {
                    *partition = Some(Partition::new(low, high));
                }
            },
            Cursor::Bubble { pass, j, swapped } => {
                while *pass + 1 < n {
                    while *j + 1 < n - *pass {
                        let at = *j;
                        *j += 1;
                        if values[at] > values[at + 1] {
                            values.swap(at, at + 1);
                            *swapped = true;
                            return Some(at);
                        }
                    }
                    // a pass without swaps means every later pass is one too
                    if !*swapped {
                        return None;
                    }
                    *pass += 1;
                    *j = 0;
                    *swapped = false;
                }
                None
            }
            Cursor::Selection { i } => {
                while *i + 1 < n {
                    let at = *i;
                    *i += 1;
                    let mut min_index = at;
                    for j in at + 1..n {
                        if values[j] < values[min_index] {
                            min_index = j;
                        }
                    }
                    if min_index != at {
                        values.swap(at, min_index);
                        return Some(at);
                    }
                }
                None
            }
            Cursor::Insertion { i } => {
                if *i >= n {
                    return None;
                }
                let key = values[*i];
                let mut slot = *i;
                while slot > 0 && values[slot - 1] > key {
                    values[slot] = values[slot - 1];
                    slot -= 1;
                }
                values[slot] = key;
                *i += 1;
                Some(slot)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortStep<T = u32> {
    pub snapshot: Vec<T>,
    /// Value most recently written or placed; drives the tone for this step.
    pub tone: T,
}

/// One sort over its own copy of the array.
#[derive(Debug, Clone)]
pub struct SortRun<T = u32> {
    algorithm: SortAlgorithm,
    values: Vec<T>,
    // `None` once the last step has been yielded
    cursor: Option<Cursor>,
    taken: usize,
}

impl<T: Ord + Copy> SortRun<T> {
    pub fn new(algorithm: SortAlgorithm, values: &[T]) -> Result<Self, PreconditionError> {
        if values.is_empty() {
            return Err(PreconditionError::EmptyArray);
        }
        debug!(%algorithm, len = values.len(), "sort run created");
        Ok(Self {
            algorithm,
            values: values.to_vec(),
            cursor: Some(Cursor::new(algorithm, values.len())),
            taken: 0,
        })
    }

    pub fn algorithm(&self) -> SortAlgorithm {
        self.algorithm
    }

    /// Current state of the working copy.
    pub fn snapshot(&self) -> &[T] {
        &self.values
    }

    /// Steps yielded so far.
    pub fn steps_taken(&self) -> usize {
        self.taken
    }

    pub fn is_finished(&self) -> bool {
        self.cursor.is_none()
    }
}

impl<T: Ord + Copy> Iterator for SortRun<T> {
    type Item = SortStep<T>;

    fn next(&mut self) -> Option<SortStep<T>> {
        let cursor = self.cursor.as_mut()?;
        let tone_at = match cursor.advance(&mut self.values) {
            Some(index) => index,
            None => {
                self.cursor = None;
                debug!(algorithm = %self.algorithm, steps = self.taken, "sort run finished");
                if !self.algorithm.ends_with_final_snapshot() {
                    return None;
                }
                self.values.len() - 1
            }
        };
        self.taken += 1;
        trace!(algorithm = %self.algorithm, step = self.taken, "sort step");
        Some(SortStep {
            snapshot: self.values.clone(),
            tone: self.values[tone_at],
        })
    }
}

impl<T: Ord + Copy> FusedIterator for SortRun<T> {}

#[cfg(test)]
#[path = "tests/sorting_tests.rs"]
mod tests;
