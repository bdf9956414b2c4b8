//! Core IR types for the neonsnake audio engine.
//!
//! This crate defines the musical vocabulary shared by the engine and its
//! callers: waveforms, note requests, gameplay events, the pentatonic scale
//! model and the fixed pattern tables every sound is built from.
//!
//! Designed to be `no_std` compatible.

#![cfg_attr(not(feature = "std"), no_std)]

mod event;
mod musical_time;
mod note;
pub mod pattern;
mod scale;

pub use event::GameEvent;
pub use musical_time::{BeatPosition, BPM, BEATS_PER_BAR};
pub use note::{NoteSpec, Waveform};
pub use scale::{chord_root, degree_offset, midi_to_hz, root_for_hue, PROGRESSION, SCALE};
