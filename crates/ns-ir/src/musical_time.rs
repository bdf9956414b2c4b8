//! Beat-grid position derived from absolute time.
//!
//! The backing track has no transport of its own: every position is
//! recomputed from the render clock, so seeking or restarting the clock
//! needs no extra state.

/// Fixed tempo of the backing track.
pub const BPM: f64 = 76.0;

/// Beats per bar (one chord per bar).
pub const BEATS_PER_BAR: f64 = 4.0;

/// Where a point in time falls on the beat grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeatPosition {
    /// Beats since time zero.
    pub beats: f64,
    /// Whole bars since time zero.
    pub bar: i64,
    /// Position within the bar, `0.0..4.0` beats.
    pub beat_in_bar: f64,
    /// Whole eighth notes since time zero.
    pub eighth: i64,
    /// Position within the current eighth note, `0.0..1.0`.
    pub eighth_phase: f64,
}

impl BeatPosition {
    /// Grid position at `seconds`.
    pub fn at(seconds: f64) -> Self {
        let beats = seconds * BPM / 60.0;
        let eighths = beats * 2.0;
        Self {
            beats,
            bar: libm::floor(beats / BEATS_PER_BAR) as i64,
            beat_in_bar: libm::fmod(beats, BEATS_PER_BAR),
            eighth: libm::floor(eighths) as i64,
            eighth_phase: libm::fmod(eighths, 1.0),
        }
    }

    /// Grid position at an absolute sample index.
    pub fn at_sample(sample: u64, sample_rate: f64) -> Self {
        Self::at(sample as f64 / sample_rate)
    }
}
