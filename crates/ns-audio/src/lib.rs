//! Audio output backends for the neonsnake music engine.

mod cpal_backend;
mod manual;
mod traits;

pub use cpal_backend::CpalOutput;
pub use manual::{ManualOutput, ManualPump};
pub use traits::{AudioError, AudioOutput, RenderCallback};
