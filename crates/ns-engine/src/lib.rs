//! Real-time procedural music engine for neonsnake.
//!
//! Mixes a procedural backing track with short event-triggered voices,
//! one sample at a time. The render and event paths never allocate.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod background;
mod config;
pub mod envelope;
mod frame;
mod mixer;
pub mod oscillator;
pub mod scheduler;
mod voice;
mod voice_pool;

pub use config::{EngineConfig, DEFAULT_SAMPLE_RATE};
pub use frame::{soft_clip, Frame};
pub use mixer::Engine;
pub use oscillator::NoiseSource;
pub use scheduler::SessionCounters;
pub use voice::Voice;
pub use voice_pool::{VoicePool, MAX_VOICES};
