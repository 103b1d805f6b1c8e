//! Bar sequence and bar/split counts

use crate::error::{GridError, Result};

pub const INITIAL_BAR_COUNT: usize = 4;
pub const MAX_BAR_COUNT: usize = 16;
pub const MIN_BAR_COUNT: usize = 1;
pub const INITIAL_SPLIT_COUNT: usize = 2;
pub const MAX_SPLIT_COUNT: usize = 8;
pub const MIN_SPLIT_COUNT: usize = 1;

/// Value given to bars created by growing the sequence
pub const DEFAULT_BAR_VALUE: f32 = 0.5;

/// True for powers of two within `[min, max]`
pub fn is_valid_count(count: usize, min: usize, max: usize) -> bool {
    count.is_power_of_two() && (min..=max).contains(&count)
}

/// Cyclic sequence of normalized bar values
#[derive(Debug, Clone, PartialEq)]
pub struct GridState {
    bars: Vec<f32>,
    bar_count: usize,
    /// Snap/grid-line subdivision, never persisted
    split_count: usize,
    min_value: f32,
    max_value: f32,
}

impl Default for GridState {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

impl GridState {
    pub fn new(min_value: f32, max_value: f32) -> Self {
        Self {
            bars: vec![DEFAULT_BAR_VALUE; INITIAL_BAR_COUNT],
            bar_count: INITIAL_BAR_COUNT,
            split_count: INITIAL_SPLIT_COUNT,
            min_value,
            max_value,
        }
    }

    pub fn bar_count(&self) -> usize {
        self.bar_count
    }

    /// Change the bar count and resize the sequence to match.
    /// Bounds are checked by the callers (resize commands, state decoder).
    pub fn set_bar_count(&mut self, count: usize) {
        self.bar_count = count;
        self.reconcile_size();
    }

    pub fn split_count(&self) -> usize {
        self.split_count
    }

    pub fn set_split_count(&mut self, count: usize) {
        self.split_count = count;
    }

    pub fn min_value(&self) -> f32 {
        self.min_value
    }

    pub fn max_value(&self) -> f32 {
        self.max_value
    }

    pub fn bars(&self) -> &[f32] {
        &self.bars
    }

    pub fn value_at(&self, index: usize) -> Result<f32> {
        self.bars.get(index).copied().ok_or(GridError::OutOfRange {
            index,
            len: self.bars.len(),
        })
    }

    pub fn set_value_at(&mut self, index: usize, value: f32) -> Result<()> {
        let len = self.bars.len();
        let bar = self
            .bars
            .get_mut(index)
            .ok_or(GridError::OutOfRange { index, len })?;
        *bar = value;
        Ok(())
    }

    /// Bar value mapped onto the output scale
    pub fn scaled_value_at(&self, index: usize) -> Result<f32> {
        Ok((self.max_value - self.min_value) * self.value_at(index)?)
    }

    /// Truncate or pad (with 0.5) so the sequence holds exactly `bar_count` bars
    pub fn reconcile_size(&mut self) {
        self.bars.resize(self.bar_count, DEFAULT_BAR_VALUE);
    }

    /// Replace the whole sequence; the bar count follows its length
    pub fn replace_bars(&mut self, bars: Vec<f32>) {
        self.bar_count = bars.len();
        self.bars = bars;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_has_initial_bars() {
        let grid = GridState::new(0.0, 1.0);
        assert_eq!(grid.bar_count(), INITIAL_BAR_COUNT);
        assert_eq!(grid.split_count(), INITIAL_SPLIT_COUNT);
        assert_eq!(grid.bars(), &[0.5, 0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_set_bar_count_resizes_with_padding() {
        for count in [1, 2, 4, 8, 16] {
            let mut grid = GridState::default();
            for i in 0..grid.bar_count() {
                grid.set_value_at(i, i as f32 * 0.1).unwrap();
            }
            let before = grid.bars().to_vec();

            grid.set_bar_count(count);

            assert_eq!(grid.bars().len(), count);
            let kept = before.len().min(count);
            assert_eq!(&grid.bars()[..kept], &before[..kept]);
            assert!(grid.bars()[kept..].iter().all(|&v| v == DEFAULT_BAR_VALUE));
        }
    }

    #[test]
    fn test_reconcile_size_is_idempotent() {
        let mut grid = GridState::default();
        grid.set_bar_count(8);
        grid.set_value_at(7, 0.9).unwrap();
        grid.reconcile_size();
        grid.reconcile_size();
        assert_eq!(grid.bars().len(), 8);
        assert_eq!(grid.value_at(7).unwrap(), 0.9);
    }

    #[test]
    fn test_value_access_out_of_range() {
        let mut grid = GridState::default();
        assert!(matches!(
            grid.value_at(4),
            Err(GridError::OutOfRange { index: 4, len: 4 })
        ));
        assert!(matches!(
            grid.set_value_at(10, 0.1),
            Err(GridError::OutOfRange { index: 10, len: 4 })
        ));
        assert_eq!(grid.bars(), &[0.5; 4]);
    }

    #[test]
    fn test_scaled_value_uses_range_width() {
        let mut grid = GridState::new(-1.0, 3.0);
        grid.set_value_at(2, 0.25).unwrap();
        assert_eq!(grid.scaled_value_at(2).unwrap(), 1.0);
    }

    #[test]
    fn test_replace_bars_sets_count() {
        let mut grid = GridState::default();
        grid.replace_bars(vec![0.1, 0.2]);
        assert_eq!(grid.bar_count(), 2);
        assert_eq!(grid.bars(), &[0.1, 0.2]);
    }

    #[test]
    fn test_valid_counts() {
        assert!(is_valid_count(16, MIN_BAR_COUNT, MAX_BAR_COUNT));
        assert!(!is_valid_count(32, MIN_BAR_COUNT, MAX_BAR_COUNT));
        assert!(!is_valid_count(3, MIN_BAR_COUNT, MAX_BAR_COUNT));
        assert!(!is_valid_count(0, MIN_BAR_COUNT, MAX_BAR_COUNT));
    }
}
