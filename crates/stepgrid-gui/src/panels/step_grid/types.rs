use egui::Color32;
use stepgrid_core::GridCommand;

/// Actions the step grid panel hands back to the app
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepGridAction {
    None,
    /// A resize or split button was pressed and changed the grid
    Resized(GridCommand),
    /// A pointer edit session finished
    EditFinished,
}

/// Amount subtracted from each channel of the active bar
pub(super) const ACTIVE_DARKEN: u8 = 100;

#[derive(Debug, Clone, Copy)]
pub struct GridColors {
    pub left: Color32,
    pub right: Color32,
    pub frame: Color32,
    pub field: Color32,
    pub line: Color32,
}

impl GridColors {
    pub fn from_rgb(left: [u8; 3], right: [u8; 3]) -> Self {
        Self {
            left: Color32::from_rgb(left[0], left[1], left[2]),
            right: Color32::from_rgb(right[0], right[1], right[2]),
            ..Self::default()
        }
    }
}

impl Default for GridColors {
    fn default() -> Self {
        Self {
            left: Color32::from_rgb(66, 245, 66),
            right: Color32::from_rgb(66, 245, 200),
            frame: Color32::from_gray(30),
            field: Color32::from_gray(50),
            line: Color32::from_gray(30),
        }
    }
}
