//! Host messages carrying the transport position to the controller

use std::collections::HashMap;

use stepgrid_core::{GridError, Result};

/// Message id of the transport position notification
pub const GRID_CONTROL_MSG: &str = "GridControlMsg";
/// Attribute holding the position in quarter notes
pub const PROJECT_TIME_MUSIC: &str = "project_time_music";

/// Tagged message with named binary attributes. Payloads are owned copies.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HostMessage {
    id: String,
    attributes: HashMap<String, Vec<u8>>,
}

impl HostMessage {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: HashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_binary(&mut self, key: impl Into<String>, data: &[u8]) {
        self.attributes.insert(key.into(), data.to_vec());
    }

    pub fn binary(&self, key: &str) -> Option<&[u8]> {
        self.attributes.get(key).map(Vec::as_slice)
    }
}

/// Build the position notification sent from the processing side
pub fn host_info_message(project_time_music: f64) -> HostMessage {
    let mut message = HostMessage::new(GRID_CONTROL_MSG);
    message.set_binary(PROJECT_TIME_MUSIC, &project_time_music.to_ne_bytes());
    message
}

/// Extract the position from a notification.
/// Returns `Ok(None)` for messages with another id.
pub fn decode_host_info(message: &HostMessage) -> Result<Option<f64>> {
    if message.id() != GRID_CONTROL_MSG {
        return Ok(None);
    }
    let data = message.binary(PROJECT_TIME_MUSIC).ok_or_else(|| {
        GridError::MalformedMessage(format!("missing '{PROJECT_TIME_MUSIC}' attribute"))
    })?;
    let bytes: [u8; 8] = data.try_into().map_err(|_| {
        GridError::MalformedMessage(format!("expected 8 byte position, got {}", data.len()))
    })?;
    Ok(Some(f64::from_ne_bytes(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_info_round_trip() {
        let message = host_info_message(13.75);
        assert_eq!(message.id(), GRID_CONTROL_MSG);
        assert_eq!(decode_host_info(&message).unwrap(), Some(13.75));
    }

    #[test]
    fn test_other_ids_are_ignored() {
        let mut message = HostMessage::new("SomethingElse");
        message.set_binary(PROJECT_TIME_MUSIC, &1.0f64.to_ne_bytes());
        assert_eq!(decode_host_info(&message).unwrap(), None);
    }

    #[test]
    fn test_bad_payloads_are_malformed() {
        let missing = HostMessage::new(GRID_CONTROL_MSG);
        assert!(matches!(decode_host_info(&missing), Err(GridError::MalformedMessage(_))));

        let mut short = HostMessage::new(GRID_CONTROL_MSG);
        short.set_binary(PROJECT_TIME_MUSIC, &1.0f32.to_ne_bytes());
        assert!(matches!(decode_host_info(&short), Err(GridError::MalformedMessage(_))));
    }
}
