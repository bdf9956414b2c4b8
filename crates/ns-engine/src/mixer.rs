//! Main render engine: session state, event entry point and per-sample mix.

use log::{debug, trace};
use ns_ir::pattern::MAX_NOTES_PER_EVENT;
use ns_ir::{chord_root, root_for_hue, BeatPosition, GameEvent, NoteSpec};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::background::{background_gain, background_sample};
use crate::config::EngineConfig;
use crate::frame::{soft_clip, Frame};
use crate::oscillator::NoiseSource;
use crate::scheduler::{schedule_event, SessionCounters};
use crate::voice::Voice;
use crate::voice_pool::VoicePool;

/// Theme hue of a fresh session.
const DEFAULT_HUE: f64 = 0.52;
/// Session root of a fresh session (before any theme is applied).
const DEFAULT_ROOT_MIDI: i32 = 45;

/// The music engine.
///
/// Owns every piece of mutable session state. Hosts share it between the
/// audio callback and gameplay code behind a single lock; nothing in here
/// blocks or allocates.
pub struct Engine {
    /// Audio sample rate (e.g., 44100)
    sample_rate: f64,
    /// Samples rendered since start; the only time reference
    clock: u64,
    /// Sounding and pending voices
    pool: VoicePool,
    /// Event methods are no-ops until the host has started output
    started: bool,
    /// In-game (true) or menu (false) mix balance
    gameplay: bool,
    theme_hue: f64,
    root_midi: i32,
    counters: SessionCounters,
    noise: NoiseSource,
    /// Randomized pan/detune
    rng: Pcg32,
}

impl Engine {
    /// Create a stopped engine.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            sample_rate: config.sample_rate.max(1) as f64,
            clock: 0,
            pool: VoicePool::new(config.max_voices),
            started: false,
            gameplay: false,
            theme_hue: DEFAULT_HUE,
            root_midi: DEFAULT_ROOT_MIDI,
            counters: SessionCounters::default(),
            noise: NoiseSource::default(),
            rng: Pcg32::seed_from_u64(config.seed),
        }
    }

    /// Mark output as running at `sample_rate`. Clears voices and restarts the clock.
    pub fn start(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate.max(1) as f64;
        self.pool.clear();
        self.clock = 0;
        self.started = true;
    }

    /// Mark output as gone. Event methods become no-ops again.
    pub fn stop(&mut self) {
        self.started = false;
        self.pool.clear();
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Change the key for a new session and restart every pattern.
    pub fn set_theme_hue(&mut self, hue: f64) {
        let hue = if hue.is_finite() { hue.clamp(0.0, 1.0) } else { 0.0 };
        self.theme_hue = hue;
        self.root_midi = root_for_hue(hue);
        self.counters.reset();
        debug!("theme hue {:.3} -> root midi {}", hue, self.root_midi);
    }

    /// Switch between menu and in-game mix balance.
    pub fn set_gameplay_mode(&mut self, gameplay: bool) {
        if self.gameplay != gameplay {
            debug!("gameplay mode {}", gameplay);
        }
        self.gameplay = gameplay;
    }

    /// Schedule the notes for a gameplay event.
    ///
    /// Returns the number of voices added; zero when not started.
    pub fn trigger(&mut self, event: GameEvent) -> usize {
        if !self.started {
            return 0;
        }
        let root = self.current_chord_root();
        let notes = schedule_event(event, root, &mut self.counters, &mut self.rng);
        trace!("{} -> {} notes at clock {}", event.name(), notes.len(), self.clock);
        let voices: heapless::Vec<Voice, MAX_NOTES_PER_EVENT> = notes
            .iter()
            .map(|note| Voice::from_spec(note, self.clock, self.sample_rate))
            .collect();
        self.pool.push_batch(&voices);
        notes.len()
    }

    /// Add a voice starting `spec.start_offset` seconds from now.
    pub fn add_voice(&mut self, spec: &NoteSpec) {
        let voice = Voice::from_spec(spec, self.clock, self.sample_rate);
        self.pool.push(voice);
    }

    /// Chord root of the bar the render clock is in.
    pub fn current_chord_root(&self) -> i32 {
        let pos = BeatPosition::at_sample(self.clock, self.sample_rate);
        chord_root(self.root_midi, pos.bar)
    }

    /// Generate one frame of audio.
    pub fn render_frame(&mut self) -> Frame {
        let now = self.clock;
        let t = now as f64 / self.sample_rate;

        let bed = background_sample(t, self.root_midi, self.gameplay) * background_gain(self.gameplay);
        let (left, right) = self.pool.mix(now, self.sample_rate, &mut self.noise);

        self.clock += 1;

        Frame {
            left: soft_clip(bed + left) as f32,
            right: soft_clip(bed + right) as f32,
        }
    }

    /// Fill an interleaved block of `channels`-wide frames.
    ///
    /// Channel 0 gets the left bus and channel 1 the right; extra channels are
    /// zeroed and a mono device gets the average of both.
    pub fn render_block(&mut self, data: &mut [f32], channels: usize) {
        #[cfg(feature = "alloc_check")]
        assert_no_alloc::assert_no_alloc(|| self.fill_block(data, channels));
        #[cfg(not(feature = "alloc_check"))]
        self.fill_block(data, channels);
    }

    fn fill_block(&mut self, data: &mut [f32], channels: usize) {
        if channels == 0 {
            return;
        }
        for chunk in data.chunks_mut(channels) {
            let frame = self.render_frame();
            if channels == 1 {
                chunk[0] = frame.downmix();
                continue;
            }
            for (i, sample) in chunk.iter_mut().enumerate() {
                *sample = match i {
                    0 => frame.left,
                    1 => frame.right,
                    _ => 0.0,
                };
            }
        }
    }

    // --- Inspection ---

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Samples rendered since start.
    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn theme_hue(&self) -> f64 {
        self.theme_hue
    }

    pub fn root_midi(&self) -> i32 {
        self.root_midi
    }

    pub fn is_gameplay_mode(&self) -> bool {
        self.gameplay
    }

    pub fn counters(&self) -> SessionCounters {
        self.counters
    }

    /// Voices currently held, oldest first.
    pub fn voices(&self) -> &[Voice] {
        self.pool.voices()
    }

    pub fn voice_count(&self) -> usize {
        self.pool.len()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ns_ir::{Waveform, BPM};

    const SR: u32 = 44_100;

    fn started() -> Engine {
        let mut e = Engine::default();
        e.start(SR);
        e
    }

    #[test]
    fn events_ignored_before_start() {
        let mut e = Engine::default();
        assert_eq!(e.trigger(GameEvent::Win), 0);
        assert_eq!(e.trigger(GameEvent::Food), 0);
        assert_eq!(e.voice_count(), 0);
        assert_eq!(e.counters(), SessionCounters::default());
    }

    #[test]
    fn events_ignored_after_stop() {
        let mut e = started();
        e.trigger(GameEvent::Win);
        e.stop();
        assert_eq!(e.voice_count(), 0);
        assert_eq!(e.trigger(GameEvent::Win), 0);
    }

    #[test]
    fn start_resets_clock_and_voices() {
        let mut e = started();
        e.trigger(GameEvent::Win);
        for _ in 0..100 {
            e.render_frame();
        }
        e.start(48_000);
        assert_eq!(e.clock(), 0);
        assert_eq!(e.voice_count(), 0);
        assert_eq!(e.sample_rate(), 48_000.0);
    }

    #[test]
    fn theme_hue_sets_root_and_resets_counters() {
        let mut e = started();
        e.trigger(GameEvent::MoveTick { speed: 0.1 });
        e.trigger(GameEvent::Food);
        e.trigger(GameEvent::Turn { combo: 2 });
        assert_ne!(e.counters(), SessionCounters::default());
        e.set_theme_hue(0.5);
        assert_eq!(e.root_midi(), 48);
        assert_eq!(e.counters(), SessionCounters::default());
        assert_eq!(e.theme_hue(), 0.5);
    }

    #[test]
    fn theme_hue_sanitizes_input() {
        let mut e = Engine::default();
        e.set_theme_hue(f64::NAN);
        assert_eq!(e.root_midi(), 43);
        e.set_theme_hue(4.0);
        assert_eq!(e.theme_hue(), 1.0);
    }

    #[test]
    fn food_adds_three_staggered_voices() {
        let mut e = started();
        assert_eq!(e.trigger(GameEvent::Food), 3);
        let starts: std::vec::Vec<u64> = e.voices().iter().map(|v| v.start_sample).collect();
        assert_eq!(starts, [0, 2205, 4410]);
        let amps: std::vec::Vec<f64> = e.voices().iter().map(|v| v.amplitude).collect();
        assert!(amps[0] > amps[1] && amps[1] > amps[2]);
    }

    #[test]
    fn offsets_count_from_current_clock() {
        let mut e = started();
        for _ in 0..1000 {
            e.render_frame();
        }
        e.trigger(GameEvent::Food);
        assert_eq!(e.voices()[0].start_sample, 1000);
        assert_eq!(e.voices()[1].start_sample, 1000 + 2205);
    }

    #[test]
    fn chord_root_follows_clock() {
        let mut e = started();
        assert_eq!(e.current_chord_root(), 45);
        let bar_samples = (4.0 * 60.0 / BPM * SR as f64) as u64 + 1;
        for _ in 0..bar_samples {
            e.render_frame();
        }
        assert_eq!(e.current_chord_root(), 50);
    }

    #[test]
    fn clock_advances_per_frame() {
        let mut e = started();
        let mut buf = [0.0f32; 512];
        e.render_block(&mut buf, 2);
        assert_eq!(e.clock(), 256);
        e.render_block(&mut buf, 1);
        assert_eq!(e.clock(), 768);
    }

    #[test]
    fn silent_pool_renders_limited_background() {
        let mut e = started();
        e.set_gameplay_mode(true);
        for n in 0..2048u64 {
            let f = e.render_frame();
            let t = n as f64 / SR as f64;
            let expected = soft_clip(background_sample(t, 45, true) * background_gain(true)) as f32;
            assert_eq!(f.left, expected);
            assert_eq!(f.right, expected);
        }
    }

    #[test]
    fn voices_drain_after_their_lifetime() {
        let mut e = started();
        e.trigger(GameEvent::Win);
        // Longest note: 0.17 s, last starts at 5 * 0.055 s.
        let frames = ((0.17 + 5.0 * 0.055) * SR as f64) as usize + 10;
        for _ in 0..frames {
            e.render_frame();
        }
        assert_eq!(e.voice_count(), 0);
    }

    #[test]
    fn extra_channels_are_zeroed() {
        let mut e = started();
        e.trigger(GameEvent::Food);
        let mut buf = [1.0f32; 4 * 64];
        e.render_block(&mut buf, 4);
        for chunk in buf.chunks(4) {
            assert_eq!(chunk[2], 0.0);
            assert_eq!(chunk[3], 0.0);
        }
    }

    #[test]
    fn mono_block_is_downmix() {
        let mut a = started();
        let mut b = started();
        a.trigger(GameEvent::SelfBite);
        b.trigger(GameEvent::SelfBite);
        let mut mono = [0.0f32; 300];
        a.render_block(&mut mono, 1);
        for m in mono {
            assert_eq!(m, b.render_frame().downmix());
        }
    }

    #[test]
    fn output_never_exceeds_limiter() {
        let mut e = started();
        for i in 0..128 {
            e.add_voice(&NoteSpec::new(Waveform::SoftSaw, 100.0 + i as f64, 1.0, 0.5));
        }
        for _ in 0..4410 {
            let f = e.render_frame();
            assert!(f.left.abs() <= 0.9 && f.right.abs() <= 0.9);
        }
    }

    #[test]
    fn add_voice_respects_cap() {
        let mut e = Engine::new(EngineConfig { max_voices: 16, ..EngineConfig::default() });
        e.start(SR);
        for _ in 0..10 {
            e.trigger(GameEvent::Win);
        }
        assert_eq!(e.voice_count(), 16);
    }

    #[test]
    fn event_into_full_pool_evicts_oldest() {
        let mut e = started();
        for i in 0..128 {
            e.add_voice(&NoteSpec::new(Waveform::Sine, 100.0 + i as f64, 0.1, 5.0));
        }
        let added = e.trigger(GameEvent::Win);
        assert_eq!(added, 6);
        assert_eq!(e.voice_count(), 128);
        assert_eq!(e.voices()[0].freq_start, 106.0);
        assert!(e.voices()[..122].iter().all(|v| v.amplitude == 0.1));
        assert!(e.voices()[122..].iter().all(|v| v.amplitude == 0.052));
    }
}
