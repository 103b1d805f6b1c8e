use egui::{Painter, Rect, Stroke, StrokeKind, pos2};
use stepgrid_services::GridView;

use super::geometry::{bar_color, bar_rect, darken, horizontal_lines, vertical_lines};
use super::StepGridPanel;

impl StepGridPanel {
    pub(super) fn draw(&self, painter: &Painter, outer: Rect, field: Rect, view: &GridView<'_>) {
        self.draw_background(painter, outer, field);
        self.draw_bars(painter, field, view);
        self.draw_vertical_lines(painter, field, view.bar_count);
        self.draw_horizontal_lines(painter, field, view.split_count);
    }

    fn draw_background(&self, painter: &Painter, outer: Rect, field: Rect) {
        painter.rect_filled(outer, 0.0, self.colors.frame);
        painter.rect_filled(field, 0.0, self.colors.field);
    }

    fn draw_bars(&self, painter: &Painter, field: Rect, view: &GridView<'_>) {
        for (index, &value) in view.bars.iter().enumerate().take(view.bar_count) {
            let mut color = bar_color(self.colors.left, self.colors.right, index, view.bar_count);
            if index == view.active_index {
                color = darken(color);
            }
            painter.rect_filled(bar_rect(field, index, view.bar_count, value), 0.0, color);
        }
    }

    fn draw_vertical_lines(&self, painter: &Painter, field: Rect, bar_count: usize) {
        let stroke = Stroke::new(2.0, self.colors.line);
        for x in vertical_lines(field, bar_count) {
            painter.line_segment([pos2(x, field.top()), pos2(x, field.bottom())], stroke);
        }
    }

    fn draw_horizontal_lines(&self, painter: &Painter, field: Rect, split_count: usize) {
        let stroke = Stroke::new(1.0, self.colors.line);
        for y in horizontal_lines(field, split_count) {
            painter.line_segment([pos2(field.left(), y), pos2(field.right(), y)], stroke);
        }
        painter.rect_stroke(field, 0.0, stroke, StrokeKind::Outside);
    }
}
