//! Ordered `pulls → desired copies → value` mapping produced by grid evaluation.
//!
//! Rows and cells keep the order in which the pull amounts and desired-copies
//! values were configured, so presenters can lay out tables without sorting or
//! re-validating the shape.

use smallvec::SmallVec;

/// One row of the grid: every configured desired-copies value for a pull amount.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow<T> {
    pub pulls: u64,
    pub cells: SmallVec<[(u64, T); 8]>,
}

impl<T> GridRow<T> {
    pub fn get(&self, desired_copies: u64) -> Option<&T> {
        self.cells
            .iter()
            .find(|(copies, _)| *copies == desired_copies)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &T)> {
        self.cells.iter().map(|(copies, value)| (*copies, value))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultGrid<T> {
    rows: Vec<GridRow<T>>,
}

impl<T> Default for ResultGrid<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T> ResultGrid<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(rows: usize) -> Self {
        Self {
            rows: Vec::with_capacity(rows),
        }
    }

    pub fn push_row<I>(&mut self, pulls: u64, cells: I)
    where
        I: IntoIterator<Item = (u64, T)>,
    {
        self.rows.push(GridRow {
            pulls,
            cells: cells.into_iter().collect(),
        });
    }

    pub fn rows(&self) -> &[GridRow<T>] {
        &self.rows
    }

    /// First row evaluated for `pulls`.
    pub fn row(&self, pulls: u64) -> Option<&GridRow<T>> {
        self.rows.iter().find(|row| row.pulls == pulls)
    }

    pub fn get(&self, pulls: u64, desired_copies: u64) -> Option<&T> {
        self.row(pulls).and_then(|row| row.get(desired_copies))
    }

    pub fn pull_amounts(&self) -> impl Iterator<Item = u64> + '_ {
        self.rows.iter().map(|row| row.pulls)
    }

    /// Column keys, taken from the first row (every row shares them).
    pub fn desired_copies(&self) -> Vec<u64> {
        self.rows
            .first()
            .map(|row| row.cells.iter().map(|(copies, _)| *copies).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Transform every cell while keeping the shape.
    pub fn map<U, F>(&self, mut f: F) -> ResultGrid<U>
    where
        F: FnMut(&T) -> U,
    {
        ResultGrid {
            rows: self
                .rows
                .iter()
                .map(|row| GridRow {
                    pulls: row.pulls,
                    cells: row
                        .cells
                        .iter()
                        .map(|(copies, value)| (*copies, f(value)))
                        .collect(),
                })
                .collect(),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::{GridRow, ResultGrid};
    use serde::ser::{Serialize, SerializeMap, Serializer};

    impl<T: Serialize> Serialize for GridRow<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.cells.len()))?;
            for (copies, value) in &self.cells {
                map.serialize_entry(copies, value)?;
            }
            map.end()
        }
    }

    impl<T: Serialize> Serialize for ResultGrid<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.rows.len()))?;
            for row in &self.rows {
                map.serialize_entry(&row.pulls, row)?;
            }
            map.end()
        }
    }
}
