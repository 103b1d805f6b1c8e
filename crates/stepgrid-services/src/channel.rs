//! Fire-and-forget message channel from the audio thread to the controller

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use crate::message::HostMessage;

/// Create a bounded channel holding at most `capacity` undelivered messages
pub fn message_channel(capacity: usize) -> (MessageSender, MessageReceiver) {
    let (tx, rx) = bounded(capacity.max(1));
    (MessageSender { tx }, MessageReceiver { rx })
}

/// Sending half, safe to use from the audio callback (never blocks)
#[derive(Clone)]
pub struct MessageSender {
    tx: Sender<HostMessage>,
}

impl MessageSender {
    /// Send without waiting. Returns false if the message was dropped.
    pub fn send(&self, message: HostMessage) -> bool {
        match self.tx.try_send(message) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::trace!("Message channel full, dropping message");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Receiving half, drained on the controller side
pub struct MessageReceiver {
    rx: Receiver<HostMessage>,
}

impl MessageReceiver {
    /// Take every message currently queued
    pub fn drain(&self) -> impl Iterator<Item = HostMessage> + '_ {
        self.rx.try_iter()
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::host_info_message;

    #[test]
    fn test_full_channel_drops_without_blocking() {
        let (tx, rx) = message_channel(2);
        assert!(tx.send(host_info_message(0.0)));
        assert!(tx.send(host_info_message(1.0)));
        assert!(!tx.send(host_info_message(2.0)));
        assert_eq!(rx.len(), 2);
        assert_eq!(rx.drain().count(), 2);
        assert!(rx.is_empty());
    }

    #[test]
    fn test_send_after_receiver_dropped() {
        let (tx, rx) = message_channel(4);
        drop(rx);
        assert!(!tx.send(host_info_message(0.0)));
    }
}
