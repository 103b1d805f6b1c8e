//! Step grid panel: bar display and pointer editing

mod drawing;
mod geometry;
mod input;
mod types;

pub use types::{GridColors, StepGridAction};

use egui::{Sense, Ui, Vec2};
use stepgrid_services::GridControl;

pub struct StepGridPanel {
    colors: GridColors,
    /// Gap between the panel edge and the bar field
    padding: f32,
    min_field_size: Vec2,
}

impl StepGridPanel {
    pub fn new(colors: GridColors) -> Self {
        Self {
            colors,
            padding: 12.0,
            min_field_size: Vec2::new(200.0, 120.0),
        }
    }

    /// Draw and edit the grid. Expects `GridControl::tick` to have run
    /// earlier in the frame.
    pub fn ui(&mut self, ui: &mut Ui, control: &mut GridControl) -> StepGridAction {
        let mut action = StepGridAction::None;

        let pressed = ui.horizontal(|ui| self.toolbar(ui, &control.view())).inner;
        if let Some(command) = pressed {
            if control.dispatch(command) {
                action = StepGridAction::Resized(command);
            }
        }

        let size = ui.available_size().max(self.min_field_size);
        let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
        let field = response.rect.shrink(self.padding);
        control.set_bar_area(geometry::to_bar_area(field));

        if self.handle_pointer(ui, &response, control) {
            action = StepGridAction::EditFinished;
        }

        self.draw(&painter, response.rect, field, &control.view());
        action
    }
}
