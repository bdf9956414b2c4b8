//! Audio frame type and output limiter.

/// A stereo audio frame, nominally in `-1.0..=1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Frame {
    pub left: f32,
    pub right: f32,
}

impl Frame {
    /// Create a silent frame.
    pub const fn silence() -> Self {
        Self { left: 0.0, right: 0.0 }
    }

    /// Create a mono frame (same value for both channels).
    pub const fn mono(value: f32) -> Self {
        Self { left: value, right: value }
    }

    /// Average of both channels, for single-channel devices.
    pub fn downmix(&self) -> f32 {
        (self.left + self.right) * 0.5
    }

    /// Convert to 16-bit PCM (left, right).
    pub fn to_i16(&self) -> (i16, i16) {
        let conv = |s: f32| (s * 32767.0).clamp(-32768.0, 32767.0) as i16;
        (conv(self.left), conv(self.right))
    }
}

/// Soft limiter applied once per channel at the end of the mix.
///
/// Never exceeds 0.9 in magnitude.
pub fn soft_clip(x: f64) -> f64 {
    libm::tanh(x * 0.8) * 0.9
}
