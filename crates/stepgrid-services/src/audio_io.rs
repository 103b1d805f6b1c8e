//! Audio output: a cpal stream, or a timer thread standing in for the host

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::StreamConfig;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum AudioOutputError {
    #[error("No audio output devices found")]
    NoDevices,
    #[error("Failed to get default output config: {0}")]
    ConfigError(String),
    #[error("Failed to build output stream: {0}")]
    StreamError(String),
    #[error("Failed to spawn host thread: {0}")]
    ThreadError(String),
}

pub struct RealtimeOutputStream {
    stop_flag: Arc<AtomicBool>,
    sample_rate: u32,
    _stream: cpal::Stream,
}

impl RealtimeOutputStream {
    /// Start a real-time output stream that pulls samples from a callback
    pub fn start<F>(sample_callback: F) -> Result<Self, AudioOutputError>
    where
        F: FnMut(&mut [f32], u32, u16) + Send + 'static,
    {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioOutputError::NoDevices)?;

        let supported_config = device
            .default_output_config()
            .map_err(|e| AudioOutputError::ConfigError(e.to_string()))?;

        let sample_rate = supported_config.sample_rate().0;
        let channels = supported_config.channels();

        let stop_flag = Arc::new(AtomicBool::new(false));
        let stop_clone = stop_flag.clone();

        let config: StreamConfig = supported_config.into();
        let callback = Arc::new(Mutex::new(sample_callback));

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    if stop_clone.load(Ordering::SeqCst) {
                        data.fill(0.0);
                        return;
                    }
                    let Ok(mut cb) = callback.lock() else {
                        data.fill(0.0);
                        return;
                    };
                    cb(data, sample_rate, channels);
                },
                move |err| error!("Output stream error: {}", err),
                None,
            )
            .map_err(|e| AudioOutputError::StreamError(e.to_string()))?;

        stream.play().map_err(|e| AudioOutputError::StreamError(e.to_string()))?;

        info!(sample_rate, channels, "Started realtime output stream");

        Ok(Self {
            stop_flag,
            sample_rate,
            _stream: stream,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }
}

impl Drop for RealtimeOutputStream {
    fn drop(&mut self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }
}

/// Calls the block callback at real-time pace from a plain thread and
/// discards the output. Used when no audio device is available.
pub struct SimulatedOutputStream {
    stop_flag: Arc<AtomicBool>,
    sample_rate: u32,
    handle: Option<JoinHandle<()>>,
}

impl SimulatedOutputStream {
    pub fn start<F>(
        sample_rate: u32,
        channels: u16,
        block_frames: usize,
        mut sample_callback: F,
    ) -> Result<Self, AudioOutputError>
    where
        F: FnMut(&mut [f32], u32, u16) + Send + 'static,
    {
        let sample_rate = sample_rate.max(1);
        let block_frames = block_frames.max(1);
        let stop_flag = Arc::new(AtomicBool::new(false));
        let stop_clone = stop_flag.clone();
        let block_duration = Duration::from_secs_f64(block_frames as f64 / sample_rate as f64);

        let handle = thread::Builder::new()
            .name("stepgrid-host".into())
            .spawn(move || {
                let mut buffer = vec![0.0f32; block_frames * channels.max(1) as usize];
                let mut next_block = Instant::now();
                while !stop_clone.load(Ordering::SeqCst) {
                    sample_callback(&mut buffer, sample_rate, channels);
                    next_block += block_duration;
                    let now = Instant::now();
                    if next_block > now {
                        thread::sleep(next_block - now);
                    } else {
                        next_block = now;
                    }
                }
            })
            .map_err(|e| AudioOutputError::ThreadError(e.to_string()))?;

        info!(sample_rate, channels, block_frames, "Started simulated host");

        Ok(Self {
            stop_flag,
            sample_rate,
            handle: Some(handle),
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SimulatedOutputStream {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_simulated_stream_calls_back_until_stopped() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let mut stream = SimulatedOutputStream::start(48000, 2, 48, move |buffer, rate, channels| {
            assert_eq!(buffer.len(), 96);
            assert_eq!(rate, 48000);
            assert_eq!(channels, 2);
            calls_clone.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        thread::sleep(Duration::from_millis(20));
        stream.stop();
        let seen = calls.load(Ordering::SeqCst);
        assert!(seen > 0);
        thread::sleep(Duration::from_millis(5));
        assert_eq!(calls.load(Ordering::SeqCst), seen);
    }
}
