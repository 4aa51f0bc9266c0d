//! Frequency counting used by the reporters.
//!
//! Ties are always broken by first appearance in input order, so results are
//! stable for a given dataset.

use std::collections::HashMap;
use std::hash::Hash;

// ── FrequencyTable ────────────────────────────────────────────────────────────

/// Occurrence counts that remember the order in which values first appeared.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    index: HashMap<K, usize>,
    counts: Vec<(K, usize)>,
}

impl<K: Eq + Hash + Clone> FrequencyTable<K> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            counts: Vec::new(),
        }
    }

    /// Count one occurrence of `value`.
    pub fn add(&mut self, value: K) {
        match self.index.get(&value) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.index.insert(value.clone(), self.counts.len());
                self.counts.push((value, 1));
            }
        }
    }

    /// The most frequent value and its count.
    pub fn mode(&self) -> Option<(&K, usize)> {
        let mut best: Option<(&K, usize)> = None;
        for (value, count) in &self.counts {
            match best {
                Some((_, best_count)) if *count <= best_count => {}
                _ => best = Some((value, *count)),
            }
        }
        best
    }

    /// All `(value, count)` pairs, most frequent first.
    pub fn into_sorted(self) -> Vec<(K, usize)> {
        let mut counts = self.counts;
        // Stable sort keeps first-seen order among equal counts.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

impl<K: Eq + Hash + Clone> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        for value in iter {
            table.add(value);
        }
        table
    }
}

// ── Free functions ────────────────────────────────────────────────────────────

/// Most frequent value of `values`, or `None` when empty.
///
/// ```
/// use bikeshare_core::calculations::most_frequent;
///
/// assert_eq!(most_frequent([3, 1, 3, 2]), Some(3));
/// assert_eq!(most_frequent([2, 1, 1, 2]), Some(2));
/// assert_eq!(most_frequent(Vec::<u8>::new()), None);
/// ```
pub fn most_frequent<K, I>(values: I) -> Option<K>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let table: FrequencyTable<K> = values.into_iter().collect();
    table.mode().map(|(value, _)| value.clone())
}

/// Count every distinct value, most frequent first.
pub fn value_counts<K, I>(values: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    values.into_iter().collect::<FrequencyTable<K>>().into_sorted()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
