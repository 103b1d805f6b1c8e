use egui::{Key, Pos2, Response, RichText, Ui};
use stepgrid_core::GridCommand;
use stepgrid_services::{GridControl, GridView, PointerButtons, PointerEvent};

use super::geometry::to_point;
use super::StepGridPanel;

impl StepGridPanel {
    /// Resize/split buttons. Returns the pressed command, if any.
    pub(super) fn toolbar(&self, ui: &mut Ui, view: &GridView<'_>) -> Option<GridCommand> {
        let mut pressed = None;
        ui.spacing_mut().item_spacing.x = 4.0;

        ui.label("Bars");
        pressed = pressed.or(command_button(ui, GridCommand::HalveBars));
        ui.monospace(format!("{:>2}", view.bar_count));
        pressed = pressed.or(command_button(ui, GridCommand::DoubleBars));

        ui.separator();

        ui.label("Splits");
        pressed = pressed.or(command_button(ui, GridCommand::HalveSplit));
        ui.monospace(format!("{:>2}", view.split_count));
        pressed = pressed.or(command_button(ui, GridCommand::DoubleSplit));

        pressed
    }

    /// Feed this frame's pointer input to the control.
    /// Returns true when an edit session ended.
    pub(super) fn handle_pointer(
        &mut self,
        ui: &Ui,
        response: &Response,
        control: &mut GridControl,
    ) -> bool {
        let mut finished = false;
        let input = PointerInput::read(ui, response);
        for event in pointer_events(input, control.is_editing()) {
            let was_editing = control.is_editing();
            control.on_pointer(event);
            finished |= was_editing && !control.is_editing();
        }
        if control.is_editing() || response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeVertical);
        }
        finished
    }
}

fn command_button(ui: &mut Ui, command: GridCommand) -> Option<GridCommand> {
    let hover = match command {
        GridCommand::DoubleBars => "Double the bar count",
        GridCommand::HalveBars => "Halve the bar count",
        GridCommand::DoubleSplit => "Double the snap divisions",
        GridCommand::HalveSplit => "Halve the snap divisions",
    };
    ui.button(RichText::new(command.label()).size(18.0))
        .on_hover_text(hover)
        .clicked()
        .then_some(command)
}

/// Pointer and key state read from egui for one frame
#[derive(Debug, Clone, Copy, Default)]
struct PointerInput {
    pos: Option<Pos2>,
    primary_pressed: bool,
    secondary_pressed: bool,
    primary_released: bool,
    moving: bool,
    escape: bool,
    /// Pointer is over the grid response
    hovered: bool,
}

impl PointerInput {
    fn read(ui: &Ui, response: &Response) -> Self {
        ui.input(|i| Self {
            pos: i.pointer.interact_pos(),
            primary_pressed: i.pointer.primary_pressed(),
            secondary_pressed: i.pointer.secondary_pressed(),
            primary_released: i.pointer.primary_released(),
            moving: i.pointer.is_moving(),
            escape: i.key_pressed(Key::Escape),
            hovered: response.hovered(),
        })
    }
}

fn pointer_events(input: PointerInput, editing: bool) -> Vec<PointerEvent> {
    let mut events = Vec::new();

    let Some(pos) = input.pos else {
        // pointer left the window mid-drag
        if editing {
            events.push(PointerEvent::Cancel);
        }
        return events;
    };
    let pos = to_point(pos);

    let pressed = input.primary_pressed || input.secondary_pressed;
    if pressed && input.hovered {
        let buttons = PointerButtons {
            primary: input.primary_pressed,
            secondary: input.secondary_pressed,
        };
        events.push(PointerEvent::Down { pos, buttons });
    } else if editing && input.moving {
        events.push(PointerEvent::Move { pos });
    }

    if input.primary_released {
        events.push(PointerEvent::Up { pos });
    } else if editing && input.escape {
        events.push(PointerEvent::Cancel);
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;
    use stepgrid_core::Point;

    fn at(x: f32, y: f32) -> PointerInput {
        PointerInput {
            pos: Some(pos2(x, y)),
            hovered: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_press_over_grid_is_down() {
        let input = PointerInput {
            primary_pressed: true,
            ..at(10.0, 20.0)
        };
        assert_eq!(
            pointer_events(input, false),
            vec![PointerEvent::Down {
                pos: Point::new(10.0, 20.0),
                buttons: PointerButtons::PRIMARY,
            }]
        );
    }

    #[test]
    fn test_press_elsewhere_is_ignored() {
        let input = PointerInput {
            primary_pressed: true,
            hovered: false,
            ..at(10.0, 20.0)
        };
        assert!(pointer_events(input, false).is_empty());
    }

    #[test]
    fn test_click_in_one_frame_is_down_then_up() {
        let input = PointerInput {
            primary_pressed: true,
            primary_released: true,
            ..at(5.0, 5.0)
        };
        let events = pointer_events(input, false);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], PointerEvent::Down { .. }));
        assert!(matches!(events[1], PointerEvent::Up { .. }));
    }

    #[test]
    fn test_moves_only_while_editing() {
        let input = PointerInput {
            moving: true,
            hovered: false,
            ..at(30.0, 40.0)
        };
        assert!(pointer_events(input, false).is_empty());
        assert_eq!(
            pointer_events(input, true),
            vec![PointerEvent::Move {
                pos: Point::new(30.0, 40.0),
            }]
        );
    }

    #[test]
    fn test_escape_or_lost_pointer_cancels_session() {
        let escape = PointerInput {
            escape: true,
            ..at(0.0, 0.0)
        };
        assert_eq!(pointer_events(escape, true), vec![PointerEvent::Cancel]);
        assert!(pointer_events(escape, false).is_empty());

        let gone = PointerInput::default();
        assert_eq!(pointer_events(gone, true), vec![PointerEvent::Cancel]);
        assert!(pointer_events(gone, false).is_empty());
    }
}
