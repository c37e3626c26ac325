//! Per-column running state for one packing pass.
//!
//! `ColumnState` only lives for the duration of a single `compute_layout`
//! call. It tracks how tall each column has grown and which item was placed
//! last in it, so short columns can be bottom-padded afterwards.

use smallvec::SmallVec;

/// Inline capacity for column bookkeeping. Grids rarely exceed 8 columns.
const COLUMN_INLINE_CAP: usize = 8;

/// Running heights and last-placed items of every column.
#[derive(Debug, Clone)]
pub struct ColumnState {
    heights: SmallVec<[f64; COLUMN_INLINE_CAP]>,
    last_item: SmallVec<[Option<usize>; COLUMN_INLINE_CAP]>,
}

impl ColumnState {
    /// Creates `columns` empty columns.
    #[must_use]
    pub fn new(columns: usize) -> Self {
        Self {
            heights: SmallVec::from_elem(0.0, columns),
            last_item: SmallVec::from_elem(None, columns),
        }
    }

    /// Returns the column with the smallest accumulated height.
    ///
    /// Ties resolve to the lowest column index.
    #[must_use]
    pub fn shortest(&self) -> usize {
        let mut best = 0;
        for (column, &height) in self.heights.iter().enumerate().skip(1) {
            if height < self.heights[best] {
                best = column;
            }
        }
        best
    }

    /// Stacks an item of `height` onto `column` and returns its y offset.
    pub fn place(&mut self, column: usize, height: f64, item_index: usize) -> f64 {
        let y = self.heights[column];
        self.heights[column] += height;
        self.last_item[column] = Some(item_index);
        y
    }

    /// Height of the tallest column.
    #[must_use]
    pub fn max_height(&self) -> f64 { self.heights.iter().copied().fold(0.0_f64, f64::max) }

    /// Accumulated height of every column.
    #[must_use]
    pub fn heights(&self) -> &[f64] { &self.heights }

    /// Yields `(item_index, extra_height)` for every column whose last item
    /// must grow so the column ends at the tallest column's baseline.
    pub fn bottom_padding(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        let max_height = self.max_height();
        self.last_item.iter().zip(self.heights.iter()).filter_map(move |(last, &height)| {
            let extra = max_height - height;
            match last {
                Some(index) if extra > 0.0 => Some((*index, extra)),
                _ => None,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(heights: &[f64]) -> ColumnState {
        let mut state = ColumnState::new(heights.len());
        for (column, &height) in heights.iter().enumerate() {
            state.place(column, height, column);
        }
        state
    }

    #[test]
    fn test_shortest_picks_lowest_column() {
        assert_eq!(state_with(&[10.0, 10.0, 5.0]).shortest(), 2);
    }

    #[test]
    fn test_shortest_breaks_ties_leftmost() {
        assert_eq!(state_with(&[10.0, 10.0, 10.0]).shortest(), 0);
        assert_eq!(state_with(&[10.0, 4.0, 4.0]).shortest(), 1);
        assert_eq!(ColumnState::new(4).shortest(), 0);
    }

    #[test]
    fn test_place_returns_previous_height() {
        let mut state = ColumnState::new(2);
        assert!((state.place(1, 120.0, 0) - 0.0).abs() < f64::EPSILON);
        assert!((state.place(1, 80.0, 1) - 120.0).abs() < f64::EPSILON);
        assert_eq!(state.heights(), &[0.0, 200.0]);
    }

    #[test]
    fn test_bottom_padding_skips_tallest_and_empty_columns() {
        let mut state = ColumnState::new(3);
        state.place(0, 300.0, 0);
        state.place(1, 100.0, 1);
        // Column 2 never receives an item.

        let padding: Vec<_> = state.bottom_padding().collect();
        assert_eq!(padding, vec![(1, 200.0)]);
        assert!((state.max_height() - 300.0).abs() < f64::EPSILON);
    }
}
