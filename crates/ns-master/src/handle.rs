//! Shared engine handle: the event and configuration API.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::warn;
use ns_audio::RenderCallback;
use ns_engine::{Engine, EngineConfig};
use ns_ir::{GameEvent, NoteSpec};

/// Cheap, clonable handle to one engine.
///
/// Every method takes the engine lock for a few voice appends at most, so
/// it is safe to call from gameplay code on any thread while the audio
/// callback renders. None of them can fail; before the engine is started
/// the `play_*` methods do nothing.
#[derive(Clone)]
pub struct EngineHandle {
    engine: Arc<Mutex<Engine>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            engine: Arc::new(Mutex::new(Engine::new(config))),
        }
    }

    /// A panicking caller must not take the music down with it.
    fn lock(&self) -> MutexGuard<'_, Engine> {
        self.engine.lock().unwrap_or_else(|poisoned| {
            warn!("engine lock poisoned; recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    // --- Configuration ---

    /// New session key from the theme hue (`0.0..=1.0`); restarts all patterns.
    pub fn set_theme_hue(&self, hue: f64) {
        self.lock().set_theme_hue(hue);
    }

    /// Menu (false) or in-game (true) ambience balance.
    pub fn set_gameplay_mode(&self, gameplay: bool) {
        self.lock().set_gameplay_mode(gameplay);
    }

    // --- Events ---

    /// Snake moved; `speed` is the move interval in seconds.
    pub fn play_move_bass(&self, speed: f64) {
        self.trigger(GameEvent::MoveTick { speed });
    }

    pub fn play_turn(&self, combo: u32) {
        self.trigger(GameEvent::Turn { combo });
    }

    pub fn play_food(&self) {
        self.trigger(GameEvent::Food);
    }

    pub fn play_special_food(&self) {
        self.trigger(GameEvent::SpecialFood);
    }

    pub fn play_wall_crash(&self) {
        self.trigger(GameEvent::WallCrash);
    }

    pub fn play_self_bite(&self) {
        self.trigger(GameEvent::SelfBite);
    }

    pub fn play_starved(&self) {
        self.trigger(GameEvent::Starved);
    }

    pub fn play_win(&self) {
        self.trigger(GameEvent::Win);
    }

    pub fn trigger(&self, event: GameEvent) {
        self.lock().trigger(event);
    }

    /// Add a custom note. Unlike the events this works before start, but
    /// starting clears the pool.
    pub fn add_voice(&self, spec: &NoteSpec) {
        self.lock().add_voice(spec);
    }

    // --- Lifecycle (driven by `MusicEngine`) ---

    pub fn is_started(&self) -> bool {
        self.lock().is_started()
    }

    pub(crate) fn start(&self, sample_rate: u32) {
        self.lock().start(sample_rate);
    }

    pub(crate) fn stop(&self) {
        self.lock().stop();
    }

    /// Callback for an output device: renders under the lock, then applies
    /// `output_gain` outside it.
    pub(crate) fn render_callback(&self, output_gain: f32) -> RenderCallback {
        let engine = self.engine.clone();
        Box::new(move |data: &mut [f32], channels: usize| {
            {
                let mut engine = engine.lock().unwrap_or_else(PoisonError::into_inner);
                engine.render_block(data, channels);
            }
            for sample in data.iter_mut() {
                *sample *= output_gain;
            }
        })
    }

    /// Read-only access to the engine, for inspection.
    pub fn with_engine<R>(&self, f: impl FnOnce(&Engine) -> R) -> R {
        f(&self.lock())
    }
}

impl Default for EngineHandle {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
