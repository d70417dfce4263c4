// In: src/sort/mod.rs

//! Multi-chunk sort.
//!
//! Produces the permutation that orders a column without ever concatenating its
//! buffers:
//! 1. every buffer sorts a local index array on its own;
//! 2. null slots are pulled out of each local order into a per-buffer null list;
//! 3. the per-buffer runs are merged through an ordered map keyed by head value
//!    (`kway_merge`);
//! 4. the null lists are appended in buffer order.
//!
//! Values are ordered with `Element::total_cmp`, so floats (NaN included) sort
//! deterministically. Ties are not stable across buffers.

mod kway_merge;


use crate::storage::{Buffer, PrimitiveColumn};
use crate::traits::Element;

/// One buffer's locally sorted valid offsets plus the offsets of its nulls.
#[derive(Debug, Default)]
pub(crate) struct SortedRun {
    pub(crate) valid: Vec<usize>,
    pub(crate) nulls: Vec<usize>,
}

/// The permutation that orders `column`: valid values ascending (or
/// descending), then every null index.
pub fn sort_permutation<T: Element>(column: &PrimitiveColumn<T>, ascending: bool) -> Vec<usize> {
    let runs: Vec<SortedRun> = column
        .buffers()
        .iter()
        .map(|buffer| sort_buffer(buffer, ascending))
        .collect();

    let valid_total: usize = runs.iter().map(|run| run.valid.len()).sum();
    log::debug!(
        "sorting '{}': {} rows in {} buffers ({} valid, {} null), ascending={}",
        column.name(),
        column.len(),
        runs.len(),
        valid_total,
        column.len() - valid_total,
        ascending
    );

    let mut permutation = Vec::with_capacity(column.len());
    kway_merge::merge_runs(column, &runs, ascending, &mut permutation);
    for (b, run) in runs.iter().enumerate() {
        let start = column.buffer_start(b);
        permutation.extend(run.nulls.iter().map(|&offset| start + offset));
    }
    permutation
}

/// Local sort followed by null extraction. Null slots hold an unspecified
/// payload, so they sort to arbitrary positions and are then pulled out in the
/// order the local sort left them.
fn sort_buffer<T: Element>(buffer: &Buffer<T>, ascending: bool) -> SortedRun {
    let values = buffer.values();
    let mut order: Vec<usize> = (0..buffer.len()).collect();
    if ascending {
        order.sort_unstable_by(|&a, &b| values[a].total_cmp(&values[b]));
    } else {
        order.sort_unstable_by(|&a, &b| values[b].total_cmp(&values[a]));
    }

    let mut run = SortedRun {
        valid: Vec::with_capacity(order.len()),
        nulls: Vec::with_capacity(buffer.null_count()),
    };
    for offset in order {
        if buffer.is_valid(offset) {
            run.valid.push(offset);
        } else {
            run.nulls.push(offset);
        }
    }
    run
}
