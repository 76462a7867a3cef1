//! Greedy first-fit slot packing.

use serde::{Deserialize, Serialize};

/// Closed interval `[lo, hi]` over node ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub lo: usize,
    pub hi: usize,
}

impl Interval {
    /// Creates an interval, swapping the bounds if needed.
    pub fn new(lo: usize, hi: usize) -> Self {
        if lo <= hi {
            Self { lo, hi }
        } else {
            Self { lo: hi, hi: lo }
        }
    }

    /// Whether two closed intervals share at least one point.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.lo <= other.hi && other.lo <= self.hi
    }

    /// Number of ranks covered.
    pub fn len(&self) -> usize {
        self.hi - self.lo + 1
    }

    /// Always false; a closed interval covers at least one rank.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Places every item into the first slot whose items it does not overlap,
/// opening a new slot when none accepts it.
///
/// Slots are scanned in creation order, so the result depends on the item
/// order. No input yields a single empty slot.
pub fn first_fit_by<T, I, F>(items: I, mut overlaps: F) -> Vec<Vec<T>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T, &T) -> bool,
{
    let mut slots: Vec<Vec<T>> = Vec::new();
    for item in items {
        let fit = slots
            .iter()
            .position(|slot| !slot.iter().any(|placed| overlaps(placed, &item)));
        match fit {
            Some(index) => slots[index].push(item),
            None => slots.push(vec![item]),
        }
    }
    if slots.is_empty() {
        slots.push(Vec::new());
    }
    slots
}

/// [`first_fit_by`] with the closed-interval overlap test.
pub fn first_fit<T, I>(items: I) -> Vec<Vec<(T, Interval)>>
where
    I: IntoIterator<Item = (T, Interval)>,
{
    first_fit_by(items, |(_, a), (_, b)| a.overlaps(b))
}
