//! Audio-side processor: advances the transport, reports its position and
//! applies the grid's output value as a gate

use std::f32::consts::TAU;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use stepgrid_core::Transport;

use crate::channel::MessageSender;
use crate::message::host_info_message;
use crate::shared_value::SharedValue;

/// Transport controls written by the UI and read by the audio thread
pub struct HostTransport {
    playing: AtomicBool,
    rewind: AtomicBool,
    bpm_bits: AtomicU64,
    /// Published position in samples
    position: AtomicU64,
    /// Published position in quarter notes (f64 bits)
    musical_time_bits: AtomicU64,
}

impl HostTransport {
    pub fn new(bpm: f64) -> Self {
        Self {
            playing: AtomicBool::new(false),
            rewind: AtomicBool::new(false),
            bpm_bits: AtomicU64::new(bpm.to_bits()),
            position: AtomicU64::new(0),
            musical_time_bits: AtomicU64::new(0.0f64.to_bits()),
        }
    }

    pub fn play(&self) {
        self.playing.store(true, Ordering::SeqCst);
    }

    pub fn pause(&self) {
        self.playing.store(false, Ordering::SeqCst);
    }

    /// Pause and return to the start
    pub fn stop(&self) {
        self.playing.store(false, Ordering::SeqCst);
        self.rewind.store(true, Ordering::SeqCst);
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    pub fn bpm(&self) -> f64 {
        f64::from_bits(self.bpm_bits.load(Ordering::Relaxed))
    }

    pub fn set_bpm(&self, bpm: f64) {
        self.bpm_bits.store(bpm.to_bits(), Ordering::Relaxed);
    }

    pub fn position(&self) -> u64 {
        self.position.load(Ordering::Relaxed)
    }

    pub fn musical_time(&self) -> f64 {
        f64::from_bits(self.musical_time_bits.load(Ordering::Relaxed))
    }

    fn publish(&self, transport: &Transport) {
        self.position.store(transport.position_samples, Ordering::Relaxed);
        self.musical_time_bits
            .store(transport.musical_time().to_bits(), Ordering::Relaxed);
    }
}

impl Default for HostTransport {
    fn default() -> Self {
        Self::new(120.0)
    }
}

/// Test tone gated by the control value
const TONE_HZ: f32 = 220.0;
const TONE_LEVEL: f32 = 0.2;

/// Runs inside the audio callback. Never blocks: messages are sent with
/// `try_send` and the control value is a relaxed atomic load.
pub struct GridProcessor {
    transport: Transport,
    host: Arc<HostTransport>,
    sender: MessageSender,
    control_value: Arc<SharedValue>,
    phase: f32,
}

impl GridProcessor {
    pub fn new(
        sample_rate: u32,
        host: Arc<HostTransport>,
        sender: MessageSender,
        control_value: Arc<SharedValue>,
    ) -> Self {
        let mut transport = Transport::new(sample_rate);
        transport.set_bpm(host.bpm());
        Self {
            transport,
            host,
            sender,
            control_value,
            phase: 0.0,
        }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Send the current position to the controller (fire-and-forget)
    pub fn send_host_info(&self) -> bool {
        self.sender.send(host_info_message(self.transport.musical_time()))
    }

    /// Process one interleaved block
    pub fn process(&mut self, buffer: &mut [f32], sample_rate: u32, channels: u16) {
        let channels = channels.max(1) as usize;
        let frames = buffer.len() / channels;

        self.sync_transport(sample_rate);
        self.send_host_info();

        if !self.transport.is_playing() {
            buffer.fill(0.0);
            self.host.publish(&self.transport);
            return;
        }

        let gain = self.control_value.load().clamp(0.0, 1.0);
        let step = TAU * TONE_HZ / self.transport.sample_rate as f32;
        for frame in buffer.chunks_mut(channels) {
            let sample = self.phase.sin() * TONE_LEVEL * gain;
            frame.fill(sample);
            self.phase = (self.phase + step) % TAU;
        }

        self.transport.advance(frames as u64);
        self.host.publish(&self.transport);
    }

    fn sync_transport(&mut self, sample_rate: u32) {
        if sample_rate > 0 && sample_rate != self.transport.sample_rate {
            // keep the musical position across a rate change
            let quarters = self.transport.musical_time();
            self.transport.sample_rate = sample_rate;
            self.transport.set_musical_time(quarters);
        }
        if self.host.rewind.swap(false, Ordering::SeqCst) {
            self.transport.stop();
            self.phase = 0.0;
        }
        let bpm = self.host.bpm();
        if bpm.is_finite() && bpm > 0.0 && bpm != self.transport.bpm {
            let quarters = self.transport.musical_time();
            self.transport.set_bpm(bpm);
            self.transport.set_musical_time(quarters);
        }
        match (self.host.is_playing(), self.transport.is_playing()) {
            (true, false) => self.transport.play(),
            (false, true) => self.transport.pause(),
            _ => {}
        }
    }
}
