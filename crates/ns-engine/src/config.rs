//! Engine construction parameters.

use crate::voice_pool::MAX_VOICES;

/// Sample rate used until a device reports its own.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Construction parameters for [`crate::Engine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Render rate in Hz. Replaced by the device rate on start.
    pub sample_rate: u32,
    /// Voice cap, at most [`MAX_VOICES`].
    pub max_voices: usize,
    /// Seed for randomized pan/detune.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            max_voices: MAX_VOICES,
            seed: 0x5EED_0F_5A4E,
        }
    }
}
