//! Voice: one sounding note in the pool.

use ns_ir::{NoteSpec, Waveform};

use crate::envelope::envelope;
use crate::oscillator::{advance_phase, sine, soft_saw, triangle, NoiseSource};

/// Floor for the duration used to normalize attack/release (seconds).
const MIN_NORMALIZE_DURATION: f64 = 0.001;

/// A single note instance, in sample units.
#[derive(Clone, Debug, PartialEq)]
pub struct Voice {
    pub waveform: Waveform,
    /// Absolute clock index at which the voice becomes audible.
    pub start_sample: u64,
    /// Total lifetime in samples, at least 1.
    pub duration_samples: u64,
    /// Samples rendered so far.
    pub elapsed_samples: u64,
    /// Oscillator phase in radians, `[0, 2π)`.
    pub phase: f64,
    pub freq_start: f64,
    pub freq_end: f64,
    pub amplitude: f64,
    /// Attack as a fraction of the lifetime.
    pub attack: f64,
    /// Release as a fraction of the lifetime.
    pub release: f64,
    /// Stereo position, `-1.0..=1.0`.
    pub pan: f64,
}

impl Voice {
    /// Build a voice from a note request issued at clock index `now`.
    ///
    /// Malformed values are clamped rather than rejected: negative or NaN
    /// durations become one sample, offsets never point into the past.
    pub fn from_spec(spec: &NoteSpec, now: u64, sample_rate: f64) -> Self {
        let offset = (finite_or_zero(spec.start_offset).max(0.0) * sample_rate) as u64;
        let duration_samples = ((finite_or_zero(spec.duration) * sample_rate) as u64).max(1);
        let norm = finite_or_zero(spec.duration).max(MIN_NORMALIZE_DURATION);
        Self {
            waveform: spec.waveform,
            start_sample: now.saturating_add(offset),
            duration_samples,
            elapsed_samples: 0,
            phase: 0.0,
            freq_start: finite_or_zero(spec.freq_start),
            freq_end: finite_or_zero(spec.freq_end),
            amplitude: finite_or_zero(spec.amplitude),
            attack: finite_or_zero(spec.attack) / norm,
            release: finite_or_zero(spec.release) / norm,
            pan: finite_or_zero(spec.pan).clamp(-1.0, 1.0),
        }
    }

    /// Not yet audible at clock index `now`.
    pub fn is_pending(&self, now: u64) -> bool {
        now < self.start_sample
    }

    /// Lifetime fully rendered.
    pub fn is_finished(&self) -> bool {
        self.elapsed_samples >= self.duration_samples
    }

    /// Fraction of the lifetime already rendered.
    pub fn progress(&self) -> f64 {
        self.elapsed_samples as f64 / self.duration_samples as f64
    }

    /// Left/right bus weights for this voice's pan.
    pub fn pan_weights(&self) -> (f64, f64) {
        ((1.0 - self.pan) * 0.5, (1.0 + self.pan) * 0.5)
    }

    /// Render one mono sample and advance the voice by one sample.
    pub fn next_sample(&mut self, sample_rate: f64, noise: &mut NoiseSource) -> f64 {
        let progress = self.progress();
        let env = envelope(progress, self.attack, self.release);
        let freq = self.freq_start + (self.freq_end - self.freq_start) * progress;

        let osc = match self.waveform {
            Waveform::Noise => noise.next_sample(),
            shape => {
                self.phase = advance_phase(self.phase, freq, sample_rate);
                match shape {
                    Waveform::Triangle => triangle(self.phase),
                    Waveform::SoftSaw => soft_saw(self.phase),
                    _ => sine(self.phase),
                }
            }
        };

        self.elapsed_samples += 1;
        osc * env * self.amplitude
    }
}

fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}
