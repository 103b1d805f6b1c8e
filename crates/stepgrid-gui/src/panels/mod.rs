//! UI panels

mod step_grid;
mod transport;

pub use step_grid::{GridColors, StepGridAction, StepGridPanel};
pub use transport::{TransportAction, TransportPanel};
