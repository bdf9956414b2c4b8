//! Host-less output driven by the caller.
//!
//! Stands in for a device in tests and offline tools: whoever holds the
//! [`ManualPump`] decides when a block is "due" and gets the samples back.

use std::sync::{Arc, Mutex, PoisonError};

use crate::traits::{AudioError, AudioOutput, RenderCallback};

type Slot = Arc<Mutex<Option<RenderCallback>>>;

/// An [`AudioOutput`] with no device behind it.
pub struct ManualOutput {
    sample_rate: u32,
    channels: u16,
    slot: Slot,
}

/// Caller side of a [`ManualOutput`]: pulls blocks through the callback.
#[derive(Clone)]
pub struct ManualPump {
    channels: u16,
    slot: Slot,
}

impl ManualOutput {
    pub fn new(sample_rate: u32, channels: u16) -> (Self, ManualPump) {
        let slot: Slot = Arc::new(Mutex::new(None));
        let pump = ManualPump {
            channels,
            slot: slot.clone(),
        };
        (
            Self {
                sample_rate,
                channels,
                slot,
            },
            pump,
        )
    }
}

impl AudioOutput for ManualOutput {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn start(&mut self, render: RenderCallback) -> Result<(), AudioError> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return Err(AudioError::AlreadyStarted);
        }
        *slot = Some(render);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).take();
        Ok(())
    }
}

impl ManualPump {
    /// Pull `frames` interleaved frames. Silence when not started.
    pub fn pull(&self, frames: usize) -> Vec<f32> {
        let mut block = vec![0.0; frames * self.channels as usize];
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(render) = slot.as_mut() {
            render(&mut block, self.channels as usize);
        }
        block
    }

    /// Whether a callback is registered.
    pub fn is_running(&self) -> bool {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}
