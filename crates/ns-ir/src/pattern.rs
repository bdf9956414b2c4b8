//! Fixed pattern tables.
//!
//! Degree tables index into [`crate::SCALE`]; offset tables are raw
//! semitones. Counter-driven tables are read cyclically with
//! `counter % len`.

/// Move-tick bass line, stepped by the move counter.
pub const BASS_DEGREES: [usize; 8] = [0, 2, 1, 3, 0, 2, 4, 1];

/// Food arpeggio starting degree, stepped by the food counter.
pub const LEAD_DEGREES: [usize; 8] = [2, 4, 3, 1, 4, 2, 0, 3];

/// Backing-track arpeggio, one step per eighth note.
pub const ARP_DEGREES: [usize; 8] = [0, 2, 4, 2, 1, 3, 4, 1];

/// Bonus food sparkle.
pub const SPECIAL_FOOD_DEGREES: [usize; 6] = [0, 2, 4, 2, 4, 0];

/// Self-bite swirl, descending.
pub const SELF_BITE_DEGREES: [usize; 4] = [4, 2, 1, 0];

/// Starvation run, semitones below the starting note.
pub const STARVED_OFFSETS: [i32; 4] = [0, -2, -5, -7];

/// Win fanfare; the second half jumps an octave.
pub const WIN_DEGREES: [usize; 6] = [0, 2, 3, 4, 2, 4];

/// Number of notes in the wall-crash run.
pub const WALL_CRASH_NOTES: usize = 5;

/// Largest number of notes any single event produces.
pub const MAX_NOTES_PER_EVENT: usize = 6;

/// Read a cyclic table at `counter`.
pub fn step<T: Copy>(table: &[T], counter: usize) -> T {
    table[counter % table.len()]
}
