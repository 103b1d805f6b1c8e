//! Host transport clock in samples and quarter notes

use serde::{Deserialize, Serialize};

/// Transport playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransportState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Transport position and tempo as seen by the processing side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transport {
    pub state: TransportState,
    /// Current position in samples
    pub position_samples: u64,
    /// Sample rate for time conversion
    pub sample_rate: u32,
    /// Tempo in BPM
    pub bpm: f64,
}

impl Default for Transport {
    fn default() -> Self {
        Self {
            state: TransportState::Stopped,
            position_samples: 0,
            sample_rate: 44100,
            bpm: 120.0,
        }
    }
}

impl Transport {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..Default::default()
        }
    }

    pub fn play(&mut self) {
        self.state = TransportState::Playing;
    }

    pub fn stop(&mut self) {
        self.state = TransportState::Stopped;
        self.position_samples = 0;
    }

    pub fn pause(&mut self) {
        self.state = TransportState::Paused;
    }

    pub fn is_playing(&self) -> bool {
        self.state == TransportState::Playing
    }

    pub fn set_bpm(&mut self, bpm: f64) {
        if bpm.is_finite() && bpm > 0.0 {
            self.bpm = bpm;
        }
    }

    /// Advance position by given samples while playing
    pub fn advance(&mut self, samples: u64) {
        if self.is_playing() {
            self.position_samples += samples;
        }
    }

    /// Samples per quarter note at current tempo
    pub fn samples_per_beat(&self) -> f64 {
        self.sample_rate as f64 * 60.0 / self.bpm
    }

    /// Quarter notes elapsed since transport start
    pub fn musical_time(&self) -> f64 {
        self.position_samples as f64 / self.samples_per_beat()
    }

    /// Move to a position given in quarter notes
    pub fn set_musical_time(&mut self, quarters: f64) {
        self.position_samples = (quarters.max(0.0) * self.samples_per_beat()) as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_musical_time_from_samples() {
        let mut transport = Transport::new(48000);
        transport.play();
        transport.advance(24000);
        assert_eq!(transport.samples_per_beat(), 24000.0);
        assert_eq!(transport.musical_time(), 1.0);
    }

    #[test]
    fn test_advance_only_while_playing() {
        let mut transport = Transport::new(48000);
        transport.advance(1000);
        assert_eq!(transport.position_samples, 0);
        transport.play();
        transport.advance(1000);
        transport.pause();
        transport.advance(1000);
        assert_eq!(transport.position_samples, 1000);
        transport.stop();
        assert_eq!(transport.position_samples, 0);
    }

    #[test]
    fn test_set_bpm_ignores_invalid() {
        let mut transport = Transport::default();
        transport.set_bpm(0.0);
        transport.set_bpm(f64::NAN);
        assert_eq!(transport.bpm, 120.0);
        transport.set_bpm(90.0);
        assert_eq!(transport.bpm, 90.0);
    }
}
