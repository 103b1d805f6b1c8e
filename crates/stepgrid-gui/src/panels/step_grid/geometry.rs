use egui::{Color32, Pos2, Rect, pos2};
use stepgrid_core::{BarArea, Point};

use super::types::ACTIVE_DARKEN;

pub(super) fn to_point(pos: Pos2) -> Point {
    Point::new(pos.x, pos.y)
}

pub(super) fn to_bar_area(rect: Rect) -> BarArea {
    BarArea::new(rect.left(), rect.top(), rect.width(), rect.height())
}

/// Filled rectangle of bar `index` at normalized height `value`
pub(super) fn bar_rect(field: Rect, index: usize, bar_count: usize, value: f32) -> Rect {
    let bar_width = field.width() / bar_count.max(1) as f32;
    let height = field.height() * value.clamp(0.0, 1.0);
    let x = field.left() + bar_width * index as f32;
    Rect::from_min_max(pos2(x, field.bottom() - height), pos2(x + bar_width, field.bottom()))
}

/// Colour of bar `index`: stepped from `left` towards `right`, one step per bar
pub(super) fn bar_color(left: Color32, right: Color32, index: usize, bar_count: usize) -> Color32 {
    let t = index as f32 / bar_count.max(1) as f32;
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8;
    Color32::from_rgb(
        mix(left.r(), right.r()),
        mix(left.g(), right.g()),
        mix(left.b(), right.b()),
    )
}

pub(super) fn darken(color: Color32) -> Color32 {
    Color32::from_rgb(
        color.r().saturating_sub(ACTIVE_DARKEN),
        color.g().saturating_sub(ACTIVE_DARKEN),
        color.b().saturating_sub(ACTIVE_DARKEN),
    )
}

/// x positions of the separators between bars
pub(super) fn vertical_lines(field: Rect, bar_count: usize) -> Vec<f32> {
    let bar_width = field.width() / bar_count.max(1) as f32;
    (1..bar_count).map(|i| field.left() + bar_width * i as f32).collect()
}

/// y positions of the split lines, top to bottom
pub(super) fn horizontal_lines(field: Rect, split_count: usize) -> Vec<f32> {
    let split_height = field.height() / split_count.max(1) as f32;
    (1..split_count).map(|i| field.top() + split_height * i as f32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Rect {
        Rect::from_min_max(pos2(10.0, 20.0), pos2(410.0, 220.0))
    }

    #[test]
    fn test_bar_rect_grows_from_bottom() {
        let rect = bar_rect(field(), 1, 4, 0.25);
        assert_eq!(rect.left(), 110.0);
        assert_eq!(rect.right(), 210.0);
        assert_eq!(rect.bottom(), 220.0);
        assert_eq!(rect.top(), 170.0);
    }

    #[test]
    fn test_gradient_starts_at_left_colour() {
        let left = Color32::from_rgb(66, 245, 66);
        let right = Color32::from_rgb(66, 245, 200);
        assert_eq!(bar_color(left, right, 0, 4), left);
        assert_eq!(bar_color(left, right, 2, 4), Color32::from_rgb(66, 245, 133));
        // last bar stops one step short of the right colour
        assert_eq!(bar_color(left, right, 3, 4).b(), 167);
    }

    #[test]
    fn test_darken_saturates_at_zero() {
        assert_eq!(darken(Color32::from_rgb(66, 245, 150)), Color32::from_rgb(0, 145, 50));
    }

    #[test]
    fn test_grid_lines_skip_edges() {
        assert_eq!(vertical_lines(field(), 4), vec![110.0, 210.0, 310.0]);
        assert!(vertical_lines(field(), 1).is_empty());
        assert_eq!(horizontal_lines(field(), 2), vec![120.0]);
    }

    #[test]
    fn test_bar_area_matches_rect() {
        let area = to_bar_area(field());
        assert_eq!(area.left, 10.0);
        assert_eq!(area.top, 20.0);
        assert_eq!(area.width, 400.0);
        assert_eq!(area.height, 200.0);
    }
}
