//! Audio output trait and error types.

use thiserror::Error;

/// Error type for audio operations.
#[derive(Debug, Error)]
pub enum AudioError {
    /// No audio device available
    #[error("no audio output device available")]
    NoDevice,
    /// Failed to query or configure the device
    #[error("device init error: {0}")]
    DeviceInit(String),
    /// Failed to create audio stream
    #[error("stream create error: {0}")]
    StreamCreate(String),
    /// Playback error
    #[error("playback error: {0}")]
    Playback(String),
    /// `start` called on an output that is already running
    #[error("output already started")]
    AlreadyStarted,
}

/// Fills an interleaved `f32` block; the second argument is the channel count.
///
/// Runs on the device's real-time thread.
pub type RenderCallback = Box<dyn FnMut(&mut [f32], usize) + Send + 'static>;

/// Trait for audio output backends.
///
/// The output pulls audio by invoking the render callback once per device
/// block; nothing is pushed from the caller's side.
pub trait AudioOutput {
    /// Get the sample rate.
    fn sample_rate(&self) -> u32;

    /// Number of interleaved channels the callback must fill.
    fn channels(&self) -> u16;

    /// Register the render callback and start pulling blocks.
    fn start(&mut self, render: RenderCallback) -> Result<(), AudioError>;

    /// Stop pulling blocks and drop the callback.
    fn stop(&mut self) -> Result<(), AudioError>;
}
