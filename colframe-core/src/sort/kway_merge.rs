//! K-way merge of per-buffer sorted runs.

use std::cmp::{Ordering, Reverse};
use std::collections::BTreeMap;

use crate::sort::SortedRun;
use crate::storage::PrimitiveColumn;
use crate::traits::Element;

/// Orders element values by `Element::total_cmp` so they can key a `BTreeMap`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SortKey<T: Element>(pub(crate) T);

impl<T: Element> PartialEq for SortKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Element> Eq for SortKey<T> {}

impl<T: Element> PartialOrd for SortKey<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Element> Ord for SortKey<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Appends the global indices of every valid slot to `out`, in sorted order.
pub(crate) fn merge_runs<T: Element>(
    column: &PrimitiveColumn<T>,
    runs: &[SortedRun],
    ascending: bool,
    out: &mut Vec<usize>,
) {
    if ascending {
        merge_with(column, runs, out, SortKey);
    } else {
        merge_with(column, runs, out, |v| Reverse(SortKey(v)));
    }
}

fn merge_with<T, K, F>(column: &PrimitiveColumn<T>, runs: &[SortedRun], out: &mut Vec<usize>, key: F)
where
    T: Element,
    K: Ord,
    F: Fn(T) -> K,
{
    let buffers = column.buffers();
    let head_key = |b: usize, position: usize| -> Option<K> {
        runs[b]
            .valid
            .get(position)
            .map(|&offset| key(buffers[b].values()[offset]))
    };

    // Head value -> (position in run, buffer id) of every run currently headed
    // by that value. Runs that share a head value are emitted together.
    let mut heads: BTreeMap<K, Vec<(usize, usize)>> = BTreeMap::new();
    for b in 0..runs.len() {
        if let Some(k) = head_key(b, 0) {
            heads.entry(k).or_default().push((0, b));
        }
    }

    while let Some((_, entries)) = heads.pop_first() {
        for (position, b) in entries {
            out.push(column.buffer_start(b) + runs[b].valid[position]);
            if let Some(k) = head_key(b, position + 1) {
                heads.entry(k).or_default().push((position + 1, b));
            }
        }
    }
}
