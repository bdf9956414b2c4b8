//! Scale, chord progression and pitch conversion.

/// Major pentatonic, as semitone offsets from the chord root.
pub const SCALE: [i32; 5] = [0, 2, 4, 7, 9];

/// Four-bar chord loop, as semitone offsets from the session root.
pub const PROGRESSION: [i32; 4] = [0, 5, 7, 2];

/// Lowest session root; the theme hue adds up to ten semitones on top.
const HUE_ROOT_BASE: i32 = 43;

/// Semitone offset of a scale degree. Degrees wrap around the scale.
pub fn degree_offset(degree: usize) -> i32 {
    SCALE[degree % SCALE.len()]
}

/// Chord root (MIDI) for a given bar of the progression.
pub fn chord_root(root_midi: i32, bar: i64) -> i32 {
    let idx = bar.rem_euclid(PROGRESSION.len() as i64) as usize;
    root_midi + PROGRESSION[idx]
}

/// Session root (MIDI) derived from a theme hue in `0.0..=1.0`.
pub fn root_for_hue(hue: f64) -> i32 {
    HUE_ROOT_BASE + libm::round(hue.clamp(0.0, 1.0) * 10.0) as i32
}

/// Equal-tempered MIDI note to frequency, A4 (69) = 440 Hz.
pub fn midi_to_hz(midi: i32) -> f64 {
    440.0 * libm::pow(2.0, (midi as f64 - 69.0) / 12.0)
}
