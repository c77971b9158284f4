//! Weighted choice and shuffling over a seeded stream.
use crate::env::{RngStream, WeightedEntry};

/// Anything with a sampling weight.
pub trait Weighted {
    fn weight(&self) -> f64;
}

impl Weighted for WeightedEntry {
    fn weight(&self) -> f64 {
        self.weight
    }
}

impl<T: Weighted> Weighted for &T {
    fn weight(&self) -> f64 {
        (**self).weight()
    }
}

/// Effective weight: negative and non-finite weights count as zero.
fn effective(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// Picks one entry with probability proportional to its weight.
///
/// Draws `next_float() * total` and subtracts weights in list order until
/// the running value is non-positive; the last entry absorbs any rounding
/// remainder. When the total weight is not positive the first entry is
/// returned without consuming a draw. Empty input yields `None`.
pub fn pick_weighted<'a, T: Weighted>(rng: &mut dyn RngStream, entries: &'a [T]) -> Option<&'a T> {
    let first = entries.first()?;
    let total: f64 = entries.iter().map(|entry| effective(entry.weight())).sum();
    if !(total.is_finite() && total > 0.0) {
        return Some(first);
    }

    let mut remaining = rng.next_float() * total;
    for entry in entries {
        remaining -= effective(entry.weight());
        if remaining <= 0.0 {
            return Some(entry);
        }
    }
    entries.last()
}

/// Seeded Fisher-Yates shuffle, walking from the end.
pub fn shuffle<T>(rng: &mut dyn RngStream, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.next_int(0, i as i64) as usize;
        items.swap(i, j);
    }
}
