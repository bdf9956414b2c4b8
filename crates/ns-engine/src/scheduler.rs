//! Gameplay-event scheduling.
//!
//! Turns a [`GameEvent`] into the short figure of notes it should play,
//! reading the fixed pattern tables through the session counters.

use heapless::Vec;
use ns_ir::pattern::{
    step, BASS_DEGREES, LEAD_DEGREES, MAX_NOTES_PER_EVENT, SELF_BITE_DEGREES,
    SPECIAL_FOOD_DEGREES, STARVED_OFFSETS, WALL_CRASH_NOTES, WIN_DEGREES,
};
use ns_ir::{degree_offset, midi_to_hz, GameEvent, NoteSpec, Waveform, SCALE};
use rand::Rng;

/// Notes produced by one event.
pub type EventNotes = Vec<NoteSpec, MAX_NOTES_PER_EVENT>;

/// Move interval (seconds) at which the bass is quietest.
const SLOWEST_MOVE: f64 = 0.22;
/// Move interval (seconds) at which the bass is loudest.
const FASTEST_MOVE: f64 = 0.085;

/// Pattern positions for the counter-driven events.
///
/// Reset together whenever the theme (and so the key) changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionCounters {
    pub moves: usize,
    pub foods: usize,
    pub turns: usize,
}

impl SessionCounters {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Build the notes for `event` against the current chord root.
///
/// Advances the counter belonging to the event, if any.
pub fn schedule_event<R: Rng>(
    event: GameEvent,
    chord_root: i32,
    counters: &mut SessionCounters,
    rng: &mut R,
) -> EventNotes {
    let mut notes = EventNotes::new();
    match event {
        GameEvent::MoveTick { speed } => {
            schedule_move(speed, chord_root, counters.moves, &mut notes);
            counters.moves = counters.moves.wrapping_add(1);
        }
        GameEvent::Turn { combo } => {
            schedule_turn(combo, chord_root, counters.turns, &mut notes);
            counters.turns = counters.turns.wrapping_add(1);
        }
        GameEvent::Food => {
            schedule_food(chord_root, counters.foods, &mut notes);
            counters.foods = counters.foods.wrapping_add(1);
        }
        GameEvent::SpecialFood => schedule_special_food(chord_root, rng, &mut notes),
        GameEvent::WallCrash => schedule_wall_crash(chord_root, &mut notes),
        GameEvent::SelfBite => schedule_self_bite(chord_root, &mut notes),
        GameEvent::Starved => schedule_starved(chord_root, rng, &mut notes),
        GameEvent::Win => schedule_win(chord_root, &mut notes),
    }
    notes
}

fn emit(notes: &mut EventNotes, note: NoteSpec) {
    // Every figure fits in MAX_NOTES_PER_EVENT.
    let _ = notes.push(note);
}

/// 0.0 at the slowest move interval, 1.0 at the fastest.
fn speed_factor(speed: f64) -> f64 {
    if !speed.is_finite() {
        return 0.0;
    }
    ((SLOWEST_MOVE - speed) / (SLOWEST_MOVE - FASTEST_MOVE)).clamp(0.0, 1.0)
}

fn schedule_move(speed: f64, root: i32, counter: usize, notes: &mut EventNotes) {
    let degree = step(&BASS_DEGREES, counter);
    // Low octave for the first half of every eight-step cycle.
    let octave = if counter % 8 >= 4 { 0 } else { -12 };
    let hz = midi_to_hz(root + degree_offset(degree) + octave);
    let amp = 0.028 + speed_factor(speed) * 0.014;
    emit(
        notes,
        NoteSpec::new(Waveform::Triangle, hz, amp, 0.12)
            .envelope(0.008, 0.08)
            .pan(-0.08),
    );
}

fn schedule_turn(combo: u32, root: i32, counter: usize, notes: &mut EventNotes) {
    let degree = counter.wrapping_add(combo.saturating_sub(1) as usize) % SCALE.len();
    let hz = midi_to_hz(root + degree_offset(degree) + 12);
    let boost = (combo as f64 * 0.12).min(1.0);
    emit(
        notes,
        NoteSpec::new(Waveform::Triangle, hz, 0.026 + boost * 0.012, 0.11)
            .glide_to(hz * (1.0 + 0.004 + boost * 0.008))
            .envelope(0.006, 0.08)
            .pan(0.08),
    );
}

fn schedule_food(root: i32, counter: usize, notes: &mut EventNotes) {
    let base = root + 12;
    let first = step(&LEAD_DEGREES, counter);
    let offsets = [
        degree_offset(first),
        degree_offset(first + 2),
        degree_offset(first + 4) + 12,
    ];
    for (i, offset) in offsets.into_iter().enumerate() {
        let hz = midi_to_hz(base + offset);
        emit(
            notes,
            NoteSpec::new(Waveform::Sine, hz, 0.05 - i as f64 * 0.008, 0.16)
                .glide_to(hz * 1.01)
                .envelope(0.01, 0.11)
                .pan((i as f64 - 1.0) * 0.09)
                .delayed(i as f64 * 0.05),
        );
    }
}

fn schedule_special_food<R: Rng>(root: i32, rng: &mut R, notes: &mut EventNotes) {
    let base = root + 19;
    for (i, &degree) in SPECIAL_FOOD_DEGREES.iter().enumerate() {
        let lift = if i >= 3 { 12 } else { 0 };
        let hz = midi_to_hz(base + degree_offset(degree) + lift);
        emit(
            notes,
            NoteSpec::new(Waveform::Triangle, hz, 0.06 - i as f64 * 0.006, 0.12)
                .glide_to(hz * 1.008)
                .envelope(0.008, 0.08)
                .pan(rng.gen_range(-0.18..=0.18))
                .delayed(i as f64 * 0.04),
        );
    }
}

fn schedule_wall_crash(root: i32, notes: &mut EventNotes) {
    for i in 0..WALL_CRASH_NOTES {
        let hz = midi_to_hz(root + 5 - i as i32 * 2);
        emit(
            notes,
            NoteSpec::new(Waveform::Sine, hz, 0.05 - i as f64 * 0.006, 0.14)
                .glide_to((hz * 0.86).max(55.0))
                .envelope(0.006, 0.1)
                .pan(-0.06 + i as f64 * 0.03)
                .delayed(i as f64 * 0.045),
        );
    }
}

fn schedule_self_bite(root: i32, notes: &mut EventNotes) {
    for (i, &degree) in SELF_BITE_DEGREES.iter().enumerate() {
        let hz = midi_to_hz(root + 12 + degree_offset(degree));
        let (bend, pan) = if i % 2 == 0 { (0.992, -0.12) } else { (1.006, 0.12) };
        emit(
            notes,
            NoteSpec::new(Waveform::Triangle, hz, 0.044, 0.12)
                .glide_to(hz * bend)
                .envelope(0.006, 0.09)
                .pan(pan)
                .delayed(i as f64 * 0.04),
        );
    }
}

fn schedule_starved<R: Rng>(root: i32, rng: &mut R, notes: &mut EventNotes) {
    for (i, &offset) in STARVED_OFFSETS.iter().enumerate() {
        let hz = midi_to_hz(root - 5 + offset);
        let detune = 1.0 + rng.gen_range(-0.012..=0.012);
        emit(
            notes,
            NoteSpec::new(Waveform::Sine, hz * detune, 0.036, 0.2)
                .glide_to(hz * 0.95)
                .envelope(0.012, 0.14)
                .pan(rng.gen_range(-0.15..=0.15))
                .delayed(i as f64 * 0.07),
        );
    }
}

fn schedule_win(root: i32, notes: &mut EventNotes) {
    for (i, &degree) in WIN_DEGREES.iter().enumerate() {
        let lift = if i >= 3 { 12 } else { 0 };
        let hz = midi_to_hz(root + 12 + degree_offset(degree) + lift);
        let side = if i % 2 == 0 { -1.0 } else { 1.0 };
        emit(
            notes,
            NoteSpec::new(Waveform::Sine, hz, 0.052, 0.17)
                .glide_to(hz * 1.01)
                .envelope(0.01, 0.12)
                .pan(side * 0.12)
                .delayed(i as f64 * 0.055),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const ROOT: i32 = 45;

    fn run(event: GameEvent, counters: &mut SessionCounters) -> EventNotes {
        let mut rng = Pcg32::seed_from_u64(7);
        schedule_event(event, ROOT, counters, &mut rng)
    }

    fn strictly_decreasing(values: impl Iterator<Item = f64>) -> bool {
        let v: std::vec::Vec<f64> = values.collect();
        v.windows(2).all(|w| w[1] < w[0])
    }

    #[test]
    fn note_counts_per_event() {
        let mut c = SessionCounters::default();
        assert_eq!(run(GameEvent::MoveTick { speed: 0.12 }, &mut c).len(), 1);
        assert_eq!(run(GameEvent::Turn { combo: 1 }, &mut c).len(), 1);
        assert_eq!(run(GameEvent::Food, &mut c).len(), 3);
        assert_eq!(run(GameEvent::SpecialFood, &mut c).len(), 6);
        assert_eq!(run(GameEvent::WallCrash, &mut c).len(), 5);
        assert_eq!(run(GameEvent::SelfBite, &mut c).len(), 4);
        assert_eq!(run(GameEvent::Starved, &mut c).len(), 4);
        assert_eq!(run(GameEvent::Win, &mut c).len(), 6);
    }

    #[test]
    fn counters_advance_only_for_their_event() {
        let mut c = SessionCounters::default();
        run(GameEvent::MoveTick { speed: 0.12 }, &mut c);
        run(GameEvent::MoveTick { speed: 0.12 }, &mut c);
        run(GameEvent::Turn { combo: 0 }, &mut c);
        run(GameEvent::Food, &mut c);
        run(GameEvent::Win, &mut c);
        run(GameEvent::WallCrash, &mut c);
        assert_eq!(c, SessionCounters { moves: 2, foods: 1, turns: 1 });
        c.reset();
        assert_eq!(c, SessionCounters::default());
    }

    #[test]
    fn food_is_staggered_and_fading() {
        let mut c = SessionCounters::default();
        let notes = run(GameEvent::Food, &mut c);
        let offsets: std::vec::Vec<f64> = notes.iter().map(|n| n.start_offset).collect();
        assert_eq!(offsets, [0.0, 0.05, 0.1]);
        assert!(strictly_decreasing(notes.iter().map(|n| n.amplitude)));
        assert!(notes.iter().all(|n| n.waveform == Waveform::Sine));
    }

    #[test]
    fn food_follows_lead_pattern() {
        let mut c = SessionCounters::default();
        let first = run(GameEvent::Food, &mut c);
        // Lead degree 2 → scale offset 4, an octave above the chord root.
        assert!((first[0].freq_start - midi_to_hz(ROOT + 12 + 4)).abs() < 1e-9);
        // Top note is the (degree + 4) offset, lifted another octave.
        assert!((first[2].freq_start - midi_to_hz(ROOT + 12 + degree_offset(6) + 12)).abs() < 1e-9);
    }

    #[test]
    fn move_bass_octave_and_pattern() {
        let mut c = SessionCounters::default();
        let first = run(GameEvent::MoveTick { speed: 0.12 }, &mut c);
        assert!((first[0].freq_start - midi_to_hz(ROOT - 12)).abs() < 1e-9);
        c.moves = 4;
        let fifth = run(GameEvent::MoveTick { speed: 0.12 }, &mut c);
        assert!((fifth[0].freq_start - midi_to_hz(ROOT)).abs() < 1e-9);
        assert_eq!(fifth[0].waveform, Waveform::Triangle);
    }

    #[test]
    fn faster_moves_are_louder() {
        let mut c = SessionCounters::default();
        let slow = run(GameEvent::MoveTick { speed: 0.3 }, &mut c)[0].amplitude;
        let fast = run(GameEvent::MoveTick { speed: 0.05 }, &mut c)[0].amplitude;
        let mid = run(GameEvent::MoveTick { speed: 0.15 }, &mut c)[0].amplitude;
        assert!((slow - 0.028).abs() < 1e-12);
        assert!((fast - 0.042).abs() < 1e-12);
        assert!(slow < mid && mid < fast);
    }

    #[test]
    fn bad_speed_is_quiet_not_nan() {
        let mut c = SessionCounters::default();
        let n = run(GameEvent::MoveTick { speed: f64::NAN }, &mut c);
        assert!((n[0].amplitude - 0.028).abs() < 1e-12);
    }

    #[test]
    fn combo_boosts_turn() {
        let mut c = SessionCounters::default();
        let plain = run(GameEvent::Turn { combo: 1 }, &mut c)[0];
        let mut c = SessionCounters::default();
        let combo = run(GameEvent::Turn { combo: 5 }, &mut c)[0];
        assert!(combo.amplitude > plain.amplitude);
        assert!(combo.freq_end / combo.freq_start > plain.freq_end / plain.freq_start);
        assert!(plain.freq_end > plain.freq_start);
    }

    #[test]
    fn turn_boost_saturates() {
        let mut c = SessionCounters::default();
        let big = run(GameEvent::Turn { combo: 100 }, &mut c)[0];
        assert!((big.amplitude - 0.038).abs() < 1e-12);
    }

    #[test]
    fn special_food_pan_in_range() {
        let mut c = SessionCounters::default();
        for _ in 0..20 {
            for n in run(GameEvent::SpecialFood, &mut c) {
                assert!(n.pan.abs() <= 0.18);
            }
        }
    }

    #[test]
    fn wall_crash_glides_down_with_floor() {
        let mut c = SessionCounters::default();
        let notes = run(GameEvent::WallCrash, &mut c);
        assert!(strictly_decreasing(notes.iter().map(|n| n.amplitude)));
        for n in &notes {
            assert!(n.freq_end < n.freq_start || n.freq_end == 55.0);
            assert!(n.freq_end >= 55.0);
        }
        // Very low roots hit the 55 Hz floor.
        let low = schedule_event(GameEvent::WallCrash, 20, &mut c, &mut Pcg32::seed_from_u64(1));
        assert!(low.iter().any(|n| n.freq_end == 55.0));
    }

    #[test]
    fn self_bite_alternates() {
        let mut c = SessionCounters::default();
        let notes = run(GameEvent::SelfBite, &mut c);
        for (i, n) in notes.iter().enumerate() {
            if i % 2 == 0 {
                assert!(n.pan < 0.0 && n.freq_end < n.freq_start);
            } else {
                assert!(n.pan > 0.0 && n.freq_end > n.freq_start);
            }
        }
    }

    #[test]
    fn starved_detune_is_slight() {
        let mut c = SessionCounters::default();
        let notes = run(GameEvent::Starved, &mut c);
        for (n, &offset) in notes.iter().zip(STARVED_OFFSETS.iter()) {
            let hz = midi_to_hz(ROOT - 5 + offset);
            assert!((n.freq_start / hz - 1.0).abs() <= 0.012 + 1e-12);
            assert!((n.freq_end - hz * 0.95).abs() < 1e-9);
            assert!(n.pan.abs() <= 0.15);
        }
    }

    #[test]
    fn win_alternates_pan_and_climbs_an_octave() {
        let mut c = SessionCounters::default();
        let notes = run(GameEvent::Win, &mut c);
        for (i, n) in notes.iter().enumerate() {
            assert_eq!(n.pan, if i % 2 == 0 { -0.12 } else { 0.12 });
        }
        assert!(notes[3].freq_start > notes[0].freq_start * 1.9);
    }

    #[test]
    fn random_figures_repeat_with_same_seed() {
        let mut c = SessionCounters::default();
        assert_eq!(run(GameEvent::SpecialFood, &mut c), run(GameEvent::SpecialFood, &mut c));
    }
}
