//! Controller-side grid: timer tick, host notifications and state I/O

use std::io::{Read, Write};
use std::sync::Arc;

use stepgrid_core::{persistence, GridConfig, GridState, Result, SyncEngine, SyncFrame};
use tracing::{debug, info, trace, warn};

use crate::channel::MessageReceiver;
use crate::listener::{EditEvent, EditListener, NullListener};
use crate::message::{decode_host_info, HostMessage};
use crate::shared_value::SharedValue;

/// Owns the grid state and turns the last known transport position into
/// the control's output value once per timer tick.
pub struct GridController {
    tag: u32,
    grid: GridState,
    sync: SyncEngine,
    /// Last delivered position in quarter notes
    project_time_music: f64,
    value: Arc<SharedValue>,
    listener: Box<dyn EditListener>,
}

impl GridController {
    pub fn new(tag: u32, config: &GridConfig) -> Self {
        Self {
            tag,
            grid: GridState::new(config.min_value, config.max_value),
            sync: SyncEngine::new(config.value_mix),
            project_time_music: 0.0,
            value: Arc::new(SharedValue::default()),
            listener: Box::new(NullListener),
        }
    }

    pub fn with_listener(mut self, listener: Box<dyn EditListener>) -> Self {
        self.listener = listener;
        self
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut GridState {
        &mut self.grid
    }

    pub fn bar_count(&self) -> usize {
        self.grid.bar_count()
    }

    pub fn current_index(&self) -> usize {
        self.sync.active_index()
    }

    /// Current output value
    pub fn value(&self) -> f32 {
        self.sync.value()
    }

    /// Cell the audio thread reads the output value from
    pub fn shared_value(&self) -> Arc<SharedValue> {
        self.value.clone()
    }

    pub fn project_time_music(&self) -> f64 {
        self.project_time_music
    }

    pub fn set_project_time_music(&mut self, quarters: f64) {
        self.project_time_music = quarters;
    }

    pub(crate) fn emit(&mut self, tag: u32, event: EditEvent) {
        self.listener.on_edit(tag, event);
    }

    /// One timing tick: pick the active bar for the last known position and
    /// smooth its value into the output, as one edit transaction.
    /// Expects the bars already reconciled to the bar count.
    pub fn timer_process(&mut self) -> Result<SyncFrame> {
        let frame = self.sync.tick(&self.grid, self.project_time_music)?;

        let tag = self.tag;
        self.emit(tag, EditEvent::Begin);
        self.value.store(frame.value);
        self.emit(tag, EditEvent::Changed(frame.value));
        self.emit(tag, EditEvent::End);

        trace!(
            position = self.project_time_music,
            index = frame.active_index,
            value = frame.value,
            "Grid tick"
        );
        Ok(frame)
    }

    /// Handle one host message. Returns whether it was a position notification.
    pub fn notify(&mut self, message: &HostMessage) -> Result<bool> {
        let Some(position) = decode_host_info(message)? else {
            return Ok(false);
        };
        self.project_time_music = position;
        Ok(true)
    }

    /// Drain all queued messages, keeping the newest position.
    /// Returns how many position notifications were applied.
    pub fn notify_pending(&mut self, receiver: &MessageReceiver) -> usize {
        let mut handled = 0;
        for message in receiver.drain() {
            match self.notify(&message) {
                Ok(true) => handled += 1,
                Ok(false) => trace!(id = message.id(), "Ignoring host message"),
                Err(e) => warn!("Dropping host message: {}", e),
            }
        }
        handled
    }

    /// Restore bars from a saved state stream. The grid is unchanged on error.
    pub fn set_state<R: Read>(&mut self, reader: &mut R) -> Result<()> {
        persistence::read_state(&mut self.grid, reader)?;
        info!(bars = self.grid.bar_count(), "Grid state restored");
        Ok(())
    }

    pub fn get_state<W: Write>(&self, writer: &mut W) -> Result<()> {
        persistence::write_state(&self.grid, writer)?;
        debug!(bars = self.grid.bar_count(), "Grid state written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Mutex;

    use stepgrid_core::GridError;

    use crate::channel::message_channel;
    use crate::message::host_info_message;

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<(u32, EditEvent)>>>);

    impl EditListener for Recorder {
        fn on_edit(&mut self, tag: u32, event: EditEvent) {
            self.0.lock().unwrap().push((tag, event));
        }
    }

    fn controller_with_bars(bars: &[f32]) -> GridController {
        let mut controller = GridController::new(7, &GridConfig::default());
        controller.grid_mut().replace_bars(bars.to_vec());
        controller
    }

    #[test]
    fn test_timer_process_uses_last_position() {
        let mut controller = controller_with_bars(&[0.2, 0.4, 0.6, 0.8]);
        controller.set_project_time_music(1.0);

        let frame = controller.timer_process().unwrap();
        assert_eq!(frame.active_index, 1);
        assert_eq!(frame.raw_value, 0.4);
        assert_eq!(controller.current_index(), 1);
        assert_eq!(controller.shared_value().load(), frame.value);

        // no new position: same bar, value keeps converging
        let next = controller.timer_process().unwrap();
        assert_eq!(next.active_index, 1);
        assert!(next.value > frame.value);
    }

    #[test]
    fn test_timer_process_brackets_value_with_edit_events() {
        let recorder = Recorder::default();
        let mut controller = controller_with_bars(&[1.0]).with_listener(Box::new(recorder.clone()));

        controller.timer_process().unwrap();

        let events = recorder.0.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                (7, EditEvent::Begin),
                (7, EditEvent::Changed(0.75)),
                (7, EditEvent::End),
            ]
        );
    }

    #[test]
    fn test_notify_copies_position() {
        let mut controller = GridController::new(1, &GridConfig::default());
        let message = host_info_message(2.5);
        assert!(controller.notify(&message).unwrap());
        drop(message);
        assert_eq!(controller.project_time_music(), 2.5);

        assert!(!controller.notify(&HostMessage::new("Other")).unwrap());
        assert!(matches!(
            controller.notify(&HostMessage::new(crate::message::GRID_CONTROL_MSG)),
            Err(GridError::MalformedMessage(_))
        ));
        assert_eq!(controller.project_time_music(), 2.5);
    }

    #[test]
    fn test_notify_pending_keeps_newest() {
        let (tx, rx) = message_channel(8);
        tx.send(host_info_message(1.0));
        tx.send(HostMessage::new("Other"));
        tx.send(host_info_message(3.0));

        let mut controller = GridController::new(1, &GridConfig::default());
        assert_eq!(controller.notify_pending(&rx), 2);
        assert_eq!(controller.project_time_music(), 3.0);
        assert_eq!(controller.notify_pending(&rx), 0);
        assert_eq!(controller.project_time_music(), 3.0);
    }

    #[test]
    fn test_state_round_trip_through_controller() {
        let source = controller_with_bars(&[0.1, 0.9]);
        let mut bytes = Vec::new();
        source.get_state(&mut bytes).unwrap();

        let mut target = GridController::new(2, &GridConfig::default());
        target.set_state(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(target.grid().bars(), &[0.1, 0.9]);
        assert_eq!(target.bar_count(), 2);
    }

    #[test]
    fn test_set_state_failure_keeps_grid() {
        let mut controller = controller_with_bars(&[0.3, 0.3]);
        let mut bytes = 4i16.to_le_bytes().to_vec();
        bytes.extend_from_slice(&0.5f32.to_le_bytes());
        assert!(controller.set_state(&mut Cursor::new(bytes)).is_err());
        assert_eq!(controller.grid().bars(), &[0.3, 0.3]);
    }
}
