use std::sync::Arc;

use stepgrid_services::{
    GridProcessor, HostTransport, MessageSender, RealtimeOutputStream, SharedValue,
    SimulatedOutputStream,
};

use super::config::HostConfig;
use super::StepGridApp;

/// Where processor blocks are pulled from
pub(super) enum HostOutput {
    Realtime(RealtimeOutputStream),
    Simulated(SimulatedOutputStream),
}

impl HostOutput {
    pub(super) fn sample_rate(&self) -> u32 {
        match self {
            HostOutput::Realtime(stream) => stream.sample_rate(),
            HostOutput::Simulated(stream) => stream.sample_rate(),
        }
    }

    pub(super) fn name(&self) -> &'static str {
        match self {
            HostOutput::Realtime(_) => "Audio",
            HostOutput::Simulated(_) => "Simulated",
        }
    }

    fn stop(&mut self) {
        match self {
            HostOutput::Realtime(stream) => stream.stop(),
            HostOutput::Simulated(stream) => stream.stop(),
        }
    }
}

/// Open the default audio device, falling back to a simulated host thread
pub(super) fn start_output(
    config: &HostConfig,
    host: &Arc<HostTransport>,
    sender: &MessageSender,
    value: &Arc<SharedValue>,
) -> Option<HostOutput> {
    let processor = || {
        GridProcessor::new(config.fallback_sample_rate, host.clone(), sender.clone(), value.clone())
    };

    let mut realtime = processor();
    match RealtimeOutputStream::start(move |buffer, sample_rate, channels| {
        realtime.process(buffer, sample_rate, channels);
    }) {
        Ok(stream) => return Some(HostOutput::Realtime(stream)),
        Err(e) => tracing::warn!("Audio output unavailable, using simulated host: {}", e),
    }

    let mut simulated = processor();
    match SimulatedOutputStream::start(
        config.fallback_sample_rate,
        2,
        config.block_size,
        move |buffer, sample_rate, channels| simulated.process(buffer, sample_rate, channels),
    ) {
        Ok(stream) => Some(HostOutput::Simulated(stream)),
        Err(e) => {
            tracing::error!("Failed to start simulated host: {}", e);
            None
        }
    }
}

impl StepGridApp {
    pub(super) fn stop_output(&mut self) {
        if let Some(mut output) = self.output.take() {
            output.stop();
            tracing::info!("Stopped {} output", output.name());
        }
    }
}
