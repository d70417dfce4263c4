// In: src/window/rolling.rs

//! Single-pass rolling aggregates over a `PrimitiveColumn`.
//!
//! The window ending at row `i` covers rows `[max(0, i - W + 1), i]`. Every
//! aggregate here yields null for rows `i < W - 1`, i.e. until the window has
//! seen `W` rows; the threshold is the same for all of them.

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::error::ColframeError;
use crate::storage::PrimitiveColumn;
use crate::traits::Element;
use crate::window::RingBuffer;

/// A window of `window` rows sliding over `column`.
#[derive(Debug, Clone, Copy)]
pub struct RollingWindow<'a, T: Element> {
    column: &'a PrimitiveColumn<T>,
    window: usize,
}

impl<'a, T: Element> RollingWindow<'a, T> {
    pub fn new(column: &'a PrimitiveColumn<T>, window: usize) -> Result<Self, ColframeError> {
        if window == 0 {
            return Err(ColframeError::InvalidWindowSize(window));
        }
        Ok(Self { column, window })
    }

    /// For callers that have already rejected a zero window.
    pub(crate) fn from_validated(column: &'a PrimitiveColumn<T>, window: usize) -> Self {
        Self {
            column,
            window: window.max(1),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    #[inline]
    fn is_filled(&self, index: usize) -> bool {
        index + 1 >= self.window
    }

    //==============================================================================
    // 1. Count
    //==============================================================================

    /// Number of non-null values in each window.
    pub fn count(&self) -> PrimitiveColumn<i64> {
        log::debug!(
            "rolling count over '{}' ({} rows, window {})",
            self.column.name(),
            self.column.len(),
            self.window
        );
        // Validity of the rows currently inside the window, so an exiting row
        // can be subtracted without reading the column again.
        let mut inside = RingBuffer::with_preallocation(self.window, self.column.len());
        let mut count: i64 = 0;
        self.column.apply(|value, index| {
            if inside.push(value.is_some()) == Some(true) {
                count -= 1;
            }
            if value.is_some() {
                count += 1;
            }
            self.is_filled(index).then_some(count)
        })
    }

    //==============================================================================
    // 2. Min / Max (monotonic deque)
    //==============================================================================

    pub fn min(&self) -> PrimitiveColumn<T> {
        self.extreme(Ordering::Less)
    }

    pub fn max(&self) -> PrimitiveColumn<T> {
        self.extreme(Ordering::Greater)
    }

    /// `keep` is the ordering an older entry must have against a newer one to
    /// stay in the deque: `Less` for min, `Greater` for max. A null ranks below
    /// every value for both, so it only survives until the next non-null row.
    fn extreme(&self, keep: Ordering) -> PrimitiveColumn<T> {
        log::debug!(
            "rolling {} over '{}' ({} rows, window {})",
            if keep == Ordering::Less { "min" } else { "max" },
            self.column.name(),
            self.column.len(),
            self.window
        );
        // The deque never holds more than `min(W, len)` entries.
        let mut deque: VecDeque<(Option<T>, usize)> =
            VecDeque::with_capacity(self.window.min(self.column.len()));
        self.column.apply(|value, index| {
            while let Some(&(back, _)) = deque.back() {
                if survives(back, value, keep) {
                    break;
                }
                deque.pop_back();
            }
            deque.push_back((value, index));

            while let Some(&(_, front_index)) = deque.front() {
                if index - front_index < self.window {
                    break;
                }
                deque.pop_front();
            }
            // A lone null means the window holds no values at all.
            if deque.len() == 1 && deque.front().map_or(false, |(v, _)| v.is_none()) {
                deque.pop_front();
            }

            if self.is_filled(index) {
                deque.front().and_then(|&(v, _)| v)
            } else {
                None
            }
        })
    }

    //==============================================================================
    // 3. Generic Apply and Typed Helpers
    //==============================================================================

    /// Calls `f` once per row, in order, with the window contents (oldest to
    /// newest, nulls included) and the row index. Whatever `f` returns,
    /// including `None`, becomes that row's output.
    pub fn apply<O, F>(&self, mut f: F) -> PrimitiveColumn<O>
    where
        O: Element,
        F: FnMut(&RingBuffer<Option<T>>, usize) -> Option<O>,
    {
        let mut ring = RingBuffer::with_preallocation(self.window, self.column.len());
        self.column.apply(|value, index| {
            ring.push(value);
            f(&ring, index)
        })
    }

    /// Sum of the non-null values in each window, as `f64`. Null before the
    /// window fills and for windows without any value.
    pub fn sum(&self) -> PrimitiveColumn<f64> {
        let window = self.window;
        self.apply(move |values, index| {
            if index + 1 < window {
                return None;
            }
            values
                .iter()
                .flatten()
                .map(Element::to_f64)
                .fold(None, |acc, v| Some(acc.unwrap_or(0.0) + v))
        })
    }

    /// Mean of the non-null values in each window, as `f64`.
    pub fn mean(&self) -> PrimitiveColumn<f64> {
        let window = self.window;
        self.apply(move |values, index| {
            if index + 1 < window {
                return None;
            }
            let (total, n) = values
                .iter()
                .flatten()
                .fold((0.0, 0usize), |(total, n), v| (total + v.to_f64(), n + 1));
            (n > 0).then(|| total / n as f64)
        })
    }
}

/// Whether `older` stays in the deque once `newer` is pushed behind it.
fn survives<T: Element>(older: Option<T>, newer: Option<T>, keep: Ordering) -> bool {
    match (older, newer) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(o), Some(n)) => o.total_cmp(&n) == keep,
    }
}
