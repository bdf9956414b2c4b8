//! Procedural backing track: a breathing two-partial pad plus an
//! eighth-note arpeggio over a four-bar chord loop.
//!
//! Pure function of time and session key; holds no state of its own.

use core::f64::consts::TAU;

use ns_ir::pattern::{step, ARP_DEGREES};
use ns_ir::{chord_root, degree_offset, midi_to_hz, BeatPosition};

/// Backing-track bus gain in the final mix.
pub fn background_gain(gameplay: bool) -> f64 {
    if gameplay {
        0.95
    } else {
        0.8
    }
}

/// Backing-track sample at `time` seconds, before bus gain and limiting.
pub fn background_sample(time: f64, root_midi: i32, gameplay: bool) -> f64 {
    let pos = BeatPosition::at(time);
    let root = chord_root(root_midi, pos.bar);
    pad(time, root, gameplay) + arpeggio(time, root, &pos, gameplay)
}

/// Root and fifth, each under its own slow amplitude wobble.
fn pad(time: f64, root: i32, gameplay: bool) -> f64 {
    let root_hz = midi_to_hz(root);
    let fifth_hz = midi_to_hz(root + 7);
    let amp = if gameplay { 0.018 } else { 0.024 };

    let root_lfo = 0.78 + 0.22 * libm::sin(time * TAU * 0.11);
    let fifth_lfo = 0.9 - 0.2 * libm::cos(time * TAU * 0.07);

    libm::sin(TAU * root_hz * time) * amp * root_lfo
        + libm::sin(TAU * fifth_hz * time) * (amp * 0.55) * fifth_lfo
}

/// One decaying blip per eighth note, accented on the downbeat.
fn arpeggio(time: f64, root: i32, pos: &BeatPosition, gameplay: bool) -> f64 {
    let degree = step(&ARP_DEGREES, pos.eighth.max(0) as usize);
    let hz = midi_to_hz(root + 12 + degree_offset(degree));
    let gate = libm::exp(-pos.eighth_phase * 4.4);
    let accent = if pos.beat_in_bar < 0.01 { 1.08 } else { 1.0 };
    let amp = (if gameplay { 0.009 } else { 0.012 }) * gate * accent;
    libm::sin(TAU * hz * time) * amp
}

#[cfg(test)]
mod tests {
    use super::*;
    use ns_ir::BPM;

    #[test]
    fn silent_at_time_zero() {
        assert_eq!(background_sample(0.0, 45, false), 0.0);
    }

    #[test]
    fn bounded_by_layer_amplitudes() {
        // pad 0.024*1.0 + 0.0132*1.1, arp 0.012*1.08
        let bound = 0.024 + 0.024 * 0.55 * 1.1 + 0.012 * 1.08;
        for i in 0..44_100 {
            let t = i as f64 / 4410.0;
            assert!(background_sample(t, 45, false).abs() <= bound + 1e-12);
        }
    }

    #[test]
    fn gameplay_mode_is_quieter() {
        let energy = |gameplay: bool| -> f64 {
            (0..44_100)
                .map(|i| background_sample(i as f64 / 44_100.0, 45, gameplay).powi(2))
                .sum()
        };
        assert!(energy(true) < energy(false));
    }

    #[test]
    fn key_changes_output() {
        let t = 1.2345;
        assert_ne!(background_sample(t, 45, false), background_sample(t, 48, false));
    }

    #[test]
    fn deterministic() {
        let t = 12.5;
        assert_eq!(background_sample(t, 45, true), background_sample(t, 45, true));
    }

    #[test]
    fn chord_changes_every_bar() {
        // Same offset into bar 0 and bar 1 hits different chords.
        let bar_seconds = 4.0 * 60.0 / BPM;
        let a = pad(0.3, chord_root(45, 0), false);
        let b = pad(0.3, chord_root(45, 1), false);
        assert_ne!(a, b);
        assert_eq!(chord_root(45, BeatPosition::at(bar_seconds + 0.3).bar), 50);
    }

    #[test]
    fn gain_depends_on_mode() {
        assert_eq!(background_gain(true), 0.95);
        assert_eq!(background_gain(false), 0.8);
    }
}
