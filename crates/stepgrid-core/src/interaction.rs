//! Pointer editing with snapping, and the resize/split commands

use serde::{Deserialize, Serialize};

use crate::grid::{
    GridState, MAX_BAR_COUNT, MAX_SPLIT_COUNT, MIN_BAR_COUNT, MIN_SPLIT_COUNT,
};

/// Default snap tolerance in pixels
pub const SNAP_RANGE: f32 = 10.0;

/// Pointer position in editor coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Rectangle holding the bars
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BarArea {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl BarArea {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x < self.right()
            && point.y >= self.top
            && point.y < self.bottom()
    }

    pub fn clamp(&self, point: Point) -> Point {
        Point {
            x: point.x.clamp(self.left, self.right()),
            y: point.y.clamp(self.top, self.bottom()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Snap a bar height (pixels from the bottom) to the nearest split line
/// when within `snap_range` of it.
pub fn snap_height(bar_height: f32, snap_unit: f32, snap_range: f32) -> f32 {
    if snap_unit <= 0.0 {
        return bar_height;
    }
    let below = bar_height.rem_euclid(snap_unit);
    if below < snap_range {
        return bar_height - below;
    }
    let above = (bar_height + snap_range).rem_euclid(snap_unit);
    if above < snap_range {
        return bar_height + snap_range - above;
    }
    bar_height
}

/// Bar under the pointer's x coordinate, clamped to the grid
pub fn bar_index_at(area: &BarArea, x: f32, bar_count: usize) -> usize {
    let bar_count = bar_count.max(1);
    let bar_width = area.width / bar_count as f32;
    if bar_width <= 0.0 {
        return 0;
    }
    let index = ((x - area.left) / bar_width).floor();
    if index <= 0.0 {
        return 0;
    }
    (index as usize).min(bar_count - 1)
}

/// A single snapped value write
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEdit {
    pub index: usize,
    pub value: f32,
}

/// Compute the edit a pointer at `point` makes. The point is clamped into the area.
pub fn pointer_edit(
    area: &BarArea,
    point: Point,
    bar_count: usize,
    split_count: usize,
    snap_range: f32,
) -> Option<PointerEdit> {
    if area.is_empty() {
        return None;
    }
    let point = area.clamp(point);
    let index = bar_index_at(area, point.x, bar_count);
    let bar_height = area.bottom() - point.y;
    let snap_unit = area.height / split_count.max(1) as f32;
    let snapped = snap_height(bar_height, snap_unit, snap_range);
    Some(PointerEdit {
        index,
        value: (snapped / area.height).clamp(0.0, 1.0),
    })
}

/// Resize and split transitions triggered by the grid buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridCommand {
    DoubleBars,
    HalveBars,
    DoubleSplit,
    HalveSplit,
}

impl GridCommand {
    pub fn label(self) -> &'static str {
        match self {
            GridCommand::DoubleBars | GridCommand::DoubleSplit => "+",
            GridCommand::HalveBars | GridCommand::HalveSplit => "-",
        }
    }

    /// Apply to the grid. Returns false when already at the bound.
    pub fn apply(self, grid: &mut GridState) -> bool {
        match self {
            GridCommand::DoubleBars => {
                if grid.bar_count() >= MAX_BAR_COUNT {
                    return false;
                }
                grid.set_bar_count(grid.bar_count() * 2);
            }
            GridCommand::HalveBars => {
                if grid.bar_count() <= MIN_BAR_COUNT {
                    return false;
                }
                grid.set_bar_count(grid.bar_count() / 2);
            }
            GridCommand::DoubleSplit => {
                if grid.split_count() >= MAX_SPLIT_COUNT {
                    return false;
                }
                grid.set_split_count(grid.split_count() * 2);
            }
            GridCommand::HalveSplit => {
                if grid.split_count() <= MIN_SPLIT_COUNT {
                    return false;
                }
                grid.set_split_count(grid.split_count() / 2);
            }
        }
        true
    }
}
