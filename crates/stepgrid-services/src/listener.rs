//! Edit notifications for host automation observers

/// One step of an edit transaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditEvent {
    Begin,
    Changed(f32),
    End,
}

/// Receives edit transactions for a control tag
pub trait EditListener: Send {
    fn on_edit(&mut self, tag: u32, event: EditEvent);
}

/// Ignores every notification
#[derive(Debug, Default)]
pub struct NullListener;

impl EditListener for NullListener {
    fn on_edit(&mut self, _tag: u32, _event: EditEvent) {}
}

/// Forwards notifications to `tracing` at trace level
#[derive(Debug, Default)]
pub struct TracingListener;

impl EditListener for TracingListener {
    fn on_edit(&mut self, tag: u32, event: EditEvent) {
        tracing::trace!(tag, ?event, "Control edit");
    }
}
