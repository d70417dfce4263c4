//! Rolling windows over an untyped `Column`.

use crate::column::Column;
use crate::error::ColframeError;
use crate::storage::PrimitiveColumn;
use crate::traits::Element;
use crate::types::Scalar;
use crate::window::RollingWindow;

/// Handle returned by `Column::rolling`. The window size has already been
/// validated, so every aggregate is infallible.
#[derive(Debug, Clone, Copy)]
pub struct ColumnRolling<'a> {
    column: &'a Column,
    window: usize,
}

impl<'a> ColumnRolling<'a> {
    pub(crate) fn new(column: &'a Column, window: usize) -> Result<Self, ColframeError> {
        if window == 0 {
            return Err(ColframeError::InvalidWindowSize(window));
        }
        Ok(Self { column, window })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    fn typed<T: Element>(&self, column: &'a PrimitiveColumn<T>) -> RollingWindow<'a, T> {
        RollingWindow::from_validated(column, self.window)
    }

    /// An `Int64` column of non-null counts.
    pub fn count(&self) -> Column {
        dispatch!(self.column, c => Column::from(self.typed(c).count()))
    }

    /// A column of the receiver's type.
    pub fn min(&self) -> Column {
        dispatch!(self.column, c => Column::from(self.typed(c).min()))
    }

    pub fn max(&self) -> Column {
        dispatch!(self.column, c => Column::from(self.typed(c).max()))
    }

    pub fn sum(&self) -> Column {
        dispatch!(self.column, c => Column::from(self.typed(c).sum()))
    }

    pub fn mean(&self) -> Column {
        dispatch!(self.column, c => Column::from(self.typed(c).mean()))
    }

    /// Untyped generic apply: `f` receives the window contents as `Scalar`s
    /// (oldest to newest, `Scalar::Null` for nulls) and the row index, and its
    /// return value becomes that row of an `O` column.
    pub fn apply<O, F>(&self, mut f: F) -> Column
    where
        O: Element,
        F: FnMut(&[Scalar], usize) -> Option<O>,
    {
        let mut scratch: Vec<Scalar> = Vec::with_capacity(self.window.min(self.column.len()));
        dispatch!(self.column, c => {
            Column::from(self.typed(c).apply(|window, index| {
                scratch.clear();
                scratch.extend(window.iter().map(|v| v.map_or(Scalar::Null, Element::into_scalar)));
                f(&scratch, index)
            }))
        })
    }
}
