//! Stateless oscillator shapes and the noise generator.
//!
//! Phase is in radians and kept in `[0, 2π)` by [`advance_phase`].

use core::f64::consts::{FRAC_PI_2, PI, TAU};

/// Seed of the noise generator at engine start.
pub const NOISE_SEED: u64 = 0x1234_5678_9ABC_DEF0;

pub fn sine(phase: f64) -> f64 {
    libm::sin(phase)
}

/// Exact triangle by folding a sine through `asin`.
pub fn triangle(phase: f64) -> f64 {
    libm::asin(libm::sin(phase)) / FRAC_PI_2
}

/// Equal blend of a naive rising saw and a sine.
pub fn soft_saw(phase: f64) -> f64 {
    let saw = 2.0 * (phase / TAU) - 1.0;
    saw * 0.5 + libm::sin(phase) * 0.5
}

/// Advance `phase` by one sample at `frequency`, wrapping into `[0, 2π)`.
///
/// Negative frequencies run the phase backwards.
pub fn advance_phase(phase: f64, frequency: f64, sample_rate: f64) -> f64 {
    let next = phase + 2.0 * PI * frequency / sample_rate;
    if (0.0..TAU).contains(&next) {
        return next;
    }
    let wrapped = libm::fmod(next, TAU);
    let wrapped = if wrapped < 0.0 { wrapped + TAU } else { wrapped };
    // A tiny negative remainder rounds up to exactly 2π.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// 64-bit LCG white noise in `[-1, 1]`.
#[derive(Clone, Debug)]
pub struct NoiseSource {
    state: u64,
}

impl NoiseSource {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    /// Next noise sample.
    pub fn next_sample(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1);
        let u = ((self.state >> 33) & 0xFFFF) as f64 / 0xFFFF as f64;
        u * 2.0 - 1.0
    }
}

impl Default for NoiseSource {
    fn default() -> Self {
        Self::new(NOISE_SEED)
    }
}
