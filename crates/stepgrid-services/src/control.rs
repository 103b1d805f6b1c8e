//! Editor-side grid control: pointer edit sessions and resize commands

use stepgrid_core::interaction::pointer_edit;
use stepgrid_core::{BarArea, GridCommand, Point, Result, SyncFrame};
use tracing::{debug, warn};

use crate::controller::GridController;
use crate::listener::EditEvent;

/// Mouse/pen button state delivered with pointer events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerButtons {
    pub primary: bool,
    pub secondary: bool,
}

impl PointerButtons {
    pub const PRIMARY: PointerButtons = PointerButtons {
        primary: true,
        secondary: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { pos: Point, buttons: PointerButtons },
    Move { pos: Point },
    Up { pos: Point },
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerResponse {
    Handled,
    NotHandled,
}

/// Read-only snapshot for renderers
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    pub bars: &'a [f32],
    pub bar_count: usize,
    pub split_count: usize,
    pub active_index: usize,
    pub min_value: f32,
    pub max_value: f32,
    pub value: f32,
    pub bar_area: BarArea,
}

/// The step grid control. Owns its controller; all grid mutation goes
/// through here on the editor thread.
pub struct GridControl {
    tag: u32,
    controller: GridController,
    bar_area: BarArea,
    snap_range: f32,
    editing: bool,
}

impl GridControl {
    pub fn new(tag: u32, controller: GridController, snap_range: f32) -> Self {
        Self {
            tag,
            controller,
            bar_area: BarArea::default(),
            snap_range,
            editing: false,
        }
    }

    pub fn controller(&self) -> &GridController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut GridController {
        &mut self.controller
    }

    /// Layout hook; the renderer reports where the bars are drawn
    pub fn set_bar_area(&mut self, area: BarArea) {
        self.bar_area = area;
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Bring the bar sequence in line with the bar count. The only
    /// reconciliation point; runs at the top of every frame via `tick`,
    /// before any draw or edit.
    pub fn prepare_frame(&mut self) {
        self.controller.grid_mut().reconcile_size();
    }

    /// Frame entry point: reconcile, then run the controller's timer tick
    pub fn tick(&mut self) -> Result<SyncFrame> {
        self.prepare_frame();
        self.controller.timer_process()
    }

    pub fn view(&self) -> GridView<'_> {
        let grid = self.controller.grid();
        GridView {
            bars: grid.bars(),
            bar_count: grid.bar_count(),
            split_count: grid.split_count(),
            active_index: self.controller.current_index(),
            min_value: grid.min_value(),
            max_value: grid.max_value(),
            value: self.controller.value(),
            bar_area: self.bar_area,
        }
    }

    /// Single handler for the resize/split buttons
    pub fn dispatch(&mut self, command: GridCommand) -> bool {
        let grid = self.controller.grid_mut();
        let changed = command.apply(grid);
        debug!(
            ?command,
            changed,
            bars = grid.bar_count(),
            splits = grid.split_count(),
            "Grid command"
        );
        changed
    }

    pub fn on_pointer(&mut self, event: PointerEvent) -> PointerResponse {
        match event {
            PointerEvent::Down { pos, buttons } => self.on_pointer_down(pos, buttons),
            PointerEvent::Move { pos } => self.on_pointer_move(pos),
            PointerEvent::Up { .. } | PointerEvent::Cancel => self.end_session(),
        }
    }

    fn on_pointer_down(&mut self, pos: Point, buttons: PointerButtons) -> PointerResponse {
        if !buttons.primary || !self.bar_area.contains(pos) {
            return PointerResponse::NotHandled;
        }
        if !self.editing {
            self.editing = true;
            self.controller.emit(self.tag, EditEvent::Begin);
            debug!(tag = self.tag, "Grid edit started");
        }
        self.edit_at(pos);
        PointerResponse::Handled
    }

    fn on_pointer_move(&mut self, pos: Point) -> PointerResponse {
        if self.editing {
            self.edit_at(pos);
        }
        PointerResponse::Handled
    }

    fn end_session(&mut self) -> PointerResponse {
        if self.editing {
            self.editing = false;
            self.controller.emit(self.tag, EditEvent::End);
            debug!(tag = self.tag, "Grid edit finished");
        }
        PointerResponse::Handled
    }

    fn edit_at(&mut self, pos: Point) {
        let grid = self.controller.grid();
        let Some(edit) = pointer_edit(
            &self.bar_area,
            pos,
            grid.bar_count(),
            grid.split_count(),
            self.snap_range,
        ) else {
            return;
        };
        if let Err(e) = self.controller.grid_mut().set_value_at(edit.index, edit.value) {
            warn!("Pointer edit rejected: {}", e);
            return;
        }
        self.controller.emit(self.tag, EditEvent::Changed(edit.value));
    }
}
