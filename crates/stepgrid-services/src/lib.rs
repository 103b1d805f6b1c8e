//! stepgrid-services: Controller, processor and cross-thread plumbing for the step grid

pub mod audio_io;
pub mod channel;
pub mod control;
pub mod controller;
pub mod listener;
pub mod message;
pub mod processor;
mod shared_value;

pub use audio_io::{AudioOutputError, RealtimeOutputStream, SimulatedOutputStream};
pub use channel::{message_channel, MessageReceiver, MessageSender};
pub use control::{GridControl, GridView, PointerButtons, PointerEvent, PointerResponse};
pub use controller::GridController;
pub use listener::{EditEvent, EditListener, NullListener, TracingListener};
pub use message::{host_info_message, HostMessage, GRID_CONTROL_MSG, PROJECT_TIME_MUSIC};
pub use processor::{GridProcessor, HostTransport};
pub use shared_value::SharedValue;
