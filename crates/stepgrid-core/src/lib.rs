//! stepgrid-core: Grid state, sync and interaction logic for the step grid control

pub mod config;
mod error;
pub mod grid;
pub mod interaction;
pub mod persistence;
pub mod sync;
mod transport;

pub use config::GridConfig;
pub use error::{GridError, Result};
pub use grid::{
    GridState, INITIAL_BAR_COUNT, INITIAL_SPLIT_COUNT, MAX_BAR_COUNT, MAX_SPLIT_COUNT,
    MIN_BAR_COUNT, MIN_SPLIT_COUNT,
};
pub use interaction::{BarArea, GridCommand, Point, PointerEdit, SNAP_RANGE};
pub use persistence::{read_state, write_state};
pub use sync::{SyncEngine, SyncFrame, VALUE_MIX};
pub use transport::{Transport, TransportState};
