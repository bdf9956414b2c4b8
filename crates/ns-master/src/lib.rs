//! Headless controller for the neonsnake music engine.
//!
//! Owns the audio output and hands out [`EngineHandle`]s to gameplay code,
//! so the game and the offline tools share one API.

mod handle;
mod offline;
mod wav;

use log::{info, warn};
use ns_audio::{AudioOutput, CpalOutput};

// Re-export common types so callers don't need ns-ir/ns-engine directly.
pub use handle::EngineHandle;
pub use ns_engine::{EngineConfig, Frame};
pub use ns_ir::{GameEvent, NoteSpec, Waveform};
pub use offline::OfflineRenderer;
pub use wav::{frames_to_wav, interleaved_to_frames, write_wav};

/// Gain of the host mixer stage after the engine's limiter.
pub const DEFAULT_OUTPUT_GAIN: f32 = 0.62;

/// Configuration for a [`MusicEngine`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MasterConfig {
    pub engine: EngineConfig,
    pub output_gain: f32,
}

impl Default for MasterConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            output_gain: DEFAULT_OUTPUT_GAIN,
        }
    }
}

/// The game's music engine: one engine plus the output it renders into.
///
/// Audio is optional. If no output can be started, every event stays a
/// silent no-op and gameplay carries on.
pub struct MusicEngine {
    handle: EngineHandle,
    output: Option<Box<dyn AudioOutput>>,
    output_gain: f32,
}

impl MusicEngine {
    pub fn new(config: MasterConfig) -> Self {
        Self {
            handle: EngineHandle::new(config.engine),
            output: None,
            output_gain: config.output_gain,
        }
    }

    /// A handle for gameplay code; all clones drive this engine.
    pub fn handle(&self) -> EngineHandle {
        self.handle.clone()
    }

    // --- Output lifecycle ---

    /// Start on the default audio device unless already running.
    ///
    /// Failures are logged and swallowed; call again later to retry.
    /// Returns whether the engine is running afterwards.
    pub fn start_if_needed(&mut self) -> bool {
        if self.is_started() {
            return true;
        }
        match CpalOutput::new() {
            Ok(output) => self.start_with(output),
            Err(e) => {
                warn!("music disabled: {}", e);
                false
            }
        }
    }

    /// Start rendering into `output` unless already running.
    pub fn start_with(&mut self, mut output: impl AudioOutput + 'static) -> bool {
        if self.is_started() {
            return true;
        }
        let sample_rate = output.sample_rate();
        self.handle.start(sample_rate);

        match output.start(self.handle.render_callback(self.output_gain)) {
            Ok(()) => {
                info!("music started at {} Hz, {} channels", sample_rate, output.channels());
                self.output = Some(Box::new(output));
                true
            }
            Err(e) => {
                warn!("music disabled: {}", e);
                self.handle.stop();
                false
            }
        }
    }

    /// Stop the output; events become no-ops until the next start.
    pub fn stop(&mut self) {
        if let Some(mut output) = self.output.take() {
            if let Err(e) = output.stop() {
                warn!("stopping audio output: {}", e);
            }
        }
        self.handle.stop();
    }

    pub fn is_started(&self) -> bool {
        self.output.is_some() && self.handle.is_started()
    }

    // --- Configuration and events ---

    pub fn set_theme_hue(&self, hue: f64) {
        self.handle.set_theme_hue(hue);
    }

    pub fn set_gameplay_mode(&self, gameplay: bool) {
        self.handle.set_gameplay_mode(gameplay);
    }

    pub fn play_move_bass(&self, speed: f64) {
        self.handle.play_move_bass(speed);
    }

    pub fn play_turn(&self, combo: u32) {
        self.handle.play_turn(combo);
    }

    pub fn play_food(&self) {
        self.handle.play_food();
    }

    pub fn play_special_food(&self) {
        self.handle.play_special_food();
    }

    pub fn play_wall_crash(&self) {
        self.handle.play_wall_crash();
    }

    pub fn play_self_bite(&self) {
        self.handle.play_self_bite();
    }

    pub fn play_starved(&self) {
        self.handle.play_starved();
    }

    pub fn play_win(&self) {
        self.handle.play_win();
    }
}

impl Default for MusicEngine {
    fn default() -> Self {
        Self::new(MasterConfig::default())
    }
}

impl Drop for MusicEngine {
    fn drop(&mut self) {
        self.stop();
    }
}
