//! Lock-free scalar shared between the controller and the audio thread

use std::sync::atomic::{AtomicU32, Ordering};

/// `f32` stored as raw bits in an atomic
pub struct SharedValue {
    raw: AtomicU32,
}

impl SharedValue {
    pub fn new(value: f32) -> Self {
        Self {
            raw: AtomicU32::new(value.to_bits()),
        }
    }

    pub fn load(&self) -> f32 {
        f32::from_bits(self.raw.load(Ordering::Relaxed))
    }

    pub fn store(&self, value: f32) {
        self.raw.store(value.to_bits(), Ordering::Relaxed);
    }
}

impl Default for SharedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}
