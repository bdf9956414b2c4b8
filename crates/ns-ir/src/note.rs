//! Note requests and oscillator shapes.

/// Oscillator shape of a voice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Waveform {
    #[default]
    Sine,
    /// Exact triangle via sine folding.
    Triangle,
    /// Half naive saw, half sine.
    SoftSaw,
    /// White noise; ignores phase and frequency.
    Noise,
}

/// A request for one sounding note, in wall-clock units.
///
/// The engine converts this into a `Voice` (sample units, normalized
/// envelope fractions) when it is added to the pool.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoteSpec {
    pub waveform: Waveform,
    /// Frequency at the start of the note (Hz).
    pub freq_start: f64,
    /// Frequency at the end of the note (Hz). Linear glide in between.
    pub freq_end: f64,
    /// Peak linear gain.
    pub amplitude: f64,
    /// Lifetime in seconds.
    pub duration: f64,
    /// Attack ramp in seconds.
    pub attack: f64,
    /// Release ramp in seconds.
    pub release: f64,
    /// Stereo position, -1 (left) to 1 (right).
    pub pan: f64,
    /// Delay before the note becomes audible, in seconds.
    pub start_offset: f64,
}

impl NoteSpec {
    /// A constant-pitch note centered in the stereo field.
    pub fn new(waveform: Waveform, freq: f64, amplitude: f64, duration: f64) -> Self {
        Self {
            waveform,
            freq_start: freq,
            freq_end: freq,
            amplitude,
            duration,
            attack: 0.0,
            release: 0.0,
            pan: 0.0,
            start_offset: 0.0,
        }
    }

    pub fn glide_to(mut self, freq_end: f64) -> Self {
        self.freq_end = freq_end;
        self
    }

    pub fn envelope(mut self, attack: f64, release: f64) -> Self {
        self.attack = attack;
        self.release = release;
        self
    }

    pub fn pan(mut self, pan: f64) -> Self {
        self.pan = pan;
        self
    }

    pub fn delayed(mut self, start_offset: f64) -> Self {
        self.start_offset = start_offset;
        self
    }
}
