//! Grid configuration

use serde::{Deserialize, Serialize};

use crate::interaction::SNAP_RANGE;
use crate::sync::VALUE_MIX;

/// Scale, snap and smoothing settings for one grid control
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Lower bound of the output scale
    pub min_value: f32,
    /// Upper bound of the output scale
    pub max_value: f32,
    /// Snap tolerance in pixels
    pub snap_range: f32,
    /// Weight of the new bar value per tick (0..=1)
    pub value_mix: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_value: 0.0,
            max_value: 1.0,
            snap_range: SNAP_RANGE,
            value_mix: VALUE_MIX,
        }
    }
}
