//! Musical time to active bar and smoothed output value

use crate::error::Result;
use crate::grid::GridState;

/// Quantization steps per quarter note
pub const STEPS_PER_QUARTER: i64 = 100;
/// Quarter notes in one pattern cycle (one bar of 4/4)
pub const CYCLE_QUARTERS: i64 = 4;
/// Quantized positions per cycle
pub const CYCLE_STEPS: i64 = STEPS_PER_QUARTER * CYCLE_QUARTERS;
/// Weight of the new value in the one-pole smoother
pub const VALUE_MIX: f32 = 0.75;

/// Quantized cycle position in `[0, CYCLE_STEPS)`
pub fn cycle_position(musical_time: f64) -> usize {
    // half-up rounding keeps ties periodic for negative (pre-roll) times;
    // `as` saturates and maps NaN to 0
    let steps = (musical_time * STEPS_PER_QUARTER as f64 + 0.5).floor() as i64;
    steps.rem_euclid(CYCLE_STEPS) as usize
}

/// Bar aligned with `musical_time` for a grid of `bar_count` bars
pub fn active_index(musical_time: f64, bar_count: usize) -> usize {
    let bar_count = bar_count.max(1);
    let bucket = (CYCLE_STEPS as usize / bar_count).max(1);
    (cycle_position(musical_time) / bucket).min(bar_count - 1)
}

/// One-pole exponential smoother
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoother {
    mix: f32,
    value: f32,
}

impl Default for Smoother {
    fn default() -> Self {
        Self::new(VALUE_MIX)
    }
}

impl Smoother {
    pub fn new(mix: f32) -> Self {
        Self {
            mix: mix.clamp(0.0, 1.0),
            value: 0.0,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn next(&mut self, target: f32) -> f32 {
        self.value = self.mix * target + (1.0 - self.mix) * self.value;
        self.value
    }
}

/// Result of one timing tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncFrame {
    pub active_index: usize,
    pub raw_value: f32,
    pub value: f32,
}

/// Tracks the active bar and the damped output across ticks
#[derive(Debug, Clone, Default)]
pub struct SyncEngine {
    smoother: Smoother,
    active_index: usize,
}

impl SyncEngine {
    pub fn new(mix: f32) -> Self {
        Self {
            smoother: Smoother::new(mix),
            active_index: 0,
        }
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn value(&self) -> f32 {
        self.smoother.value()
    }

    /// Advance one tick. The grid must already be reconciled to its bar count.
    pub fn tick(&mut self, grid: &GridState, musical_time: f64) -> Result<SyncFrame> {
        let index = active_index(musical_time, grid.bar_count());
        let raw_value = grid.scaled_value_at(index)?;
        self.active_index = index;
        let value = self.smoother.next(raw_value);
        Ok(SyncFrame {
            active_index: index,
            raw_value,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(bars: &[f32]) -> GridState {
        let mut grid = GridState::new(0.0, 1.0);
        grid.replace_bars(bars.to_vec());
        grid
    }

    #[test]
    fn test_cycle_position_wraps() {
        assert_eq!(cycle_position(0.0), 0);
        assert_eq!(cycle_position(1.0), 100);
        assert_eq!(cycle_position(3.994), 399);
        assert_eq!(cycle_position(3.996), 0); // rounds up to 400
        assert_eq!(cycle_position(5.25), 125);
        assert_eq!(cycle_position(-0.25), 375);
        assert_eq!(cycle_position(-0.125), cycle_position(3.875));
        assert_eq!(cycle_position(f64::NAN), 0);
    }

    #[test]
    fn test_bar_counts_divide_cycle() {
        for count in [1usize, 2, 4, 8, 16] {
            assert_eq!(CYCLE_STEPS as usize % count, 0);
        }
    }

    #[test]
    fn test_active_index_in_range_and_periodic() {
        for count in [1usize, 2, 4, 8, 16] {
            for step in -1000..1000 {
                let t = step as f64 * 0.0625;
                let index = active_index(t, count);
                assert!(index < count);
                assert_eq!(index, active_index(t + 4.0, count));
            }
        }
    }

    #[test]
    fn test_active_index_bucket_boundaries() {
        assert_eq!(active_index(0.99, 4), 0);
        assert_eq!(active_index(1.0, 4), 1);
        assert_eq!(active_index(3.75, 16), 15);
        assert_eq!(active_index(2.0, 1), 0);
    }

    #[test]
    fn test_tick_scenario_quarter_note() {
        let grid = grid_with(&[0.2, 0.4, 0.6, 0.8]);
        let mut engine = SyncEngine::new(VALUE_MIX);

        let frame = engine.tick(&grid, 1.0).unwrap();
        assert_eq!(cycle_position(1.0), 100);
        assert_eq!(frame.active_index, 1);
        assert_eq!(frame.raw_value, 0.4);
        assert!((frame.value - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_smoother_converges() {
        let mut smoother = Smoother::new(VALUE_MIX);
        let first = smoother.next(1.0);
        assert!((first - 0.75).abs() < 1e-6);
        let second = smoother.next(1.0);
        assert!((second - 0.9375).abs() < 1e-6);
        for _ in 0..32 {
            smoother.next(1.0);
        }
        assert!((smoother.value() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_tick_follows_bar_count_change() {
        let mut grid = grid_with(&[0.0, 1.0]);
        let mut engine = SyncEngine::default();
        assert_eq!(engine.tick(&grid, 2.5).unwrap().active_index, 1);

        grid.set_bar_count(16);
        let frame = engine.tick(&grid, 3.9).unwrap();
        assert_eq!(frame.active_index, 15);
        assert_eq!(frame.raw_value, 0.5);
        assert_eq!(engine.active_index(), 15);
    }
}
