//! VoicePool: fixed-capacity storage and mixing of sounding voices.

use heapless::Vec;

use crate::oscillator::NoiseSource;
use crate::voice::Voice;

/// Maximum number of simultaneous voices.
pub const MAX_VOICES: usize = 128;

/// Voices in insertion order, oldest first.
///
/// Storage is inline, so neither adding nor mixing allocates. When the
/// pool is full the oldest voice is dropped to make room.
#[derive(Clone, Debug)]
pub struct VoicePool {
    voices: Vec<Voice, MAX_VOICES>,
    limit: usize,
}

impl VoicePool {
    /// Create an empty pool holding at most `limit` voices (capped at [`MAX_VOICES`]).
    pub fn new(limit: usize) -> Self {
        Self {
            voices: Vec::new(),
            limit: limit.clamp(1, MAX_VOICES),
        }
    }

    /// Append a voice, evicting the oldest one if the pool is full.
    /// Returns how many voices were evicted.
    pub fn push(&mut self, voice: Voice) -> usize {
        self.push_batch(core::slice::from_ref(&voice))
    }

    /// Append voices in order, evicting the oldest beyond the limit.
    ///
    /// Survivors are shifted once per batch, however many are evicted.
    /// Returns how many voices were evicted, counting any from `batch` itself.
    pub fn push_batch(&mut self, batch: &[Voice]) -> usize {
        let skipped = batch.len().saturating_sub(self.limit);
        let batch = &batch[skipped..];

        let overflow = (self.voices.len() + batch.len()).saturating_sub(self.limit);
        if overflow > 0 {
            self.voices.rotate_left(overflow);
            self.voices.truncate(self.voices.len() - overflow);
        }
        for voice in batch {
            // Room was made above, so this cannot fail.
            let _ = self.voices.push(voice.clone());
        }
        overflow + skipped
    }

    /// Mix every audible voice at clock index `now` into a (left, right) pair.
    ///
    /// Finished voices are dropped in the same pass; survivors are compacted
    /// in place and keep their order.
    pub fn mix(&mut self, now: u64, sample_rate: f64, noise: &mut NoiseSource) -> (f64, f64) {
        let mut left = 0.0;
        let mut right = 0.0;
        let mut keep = 0;

        for idx in 0..self.voices.len() {
            let voice = &mut self.voices[idx];
            if !voice.is_pending(now) {
                if voice.is_finished() {
                    continue;
                }
                let (wl, wr) = voice.pan_weights();
                let sample = voice.next_sample(sample_rate, noise);
                left += sample * wl;
                right += sample * wr;
            }
            if keep != idx {
                self.voices.swap(keep, idx);
            }
            keep += 1;
        }
        self.voices.truncate(keep);

        (left, right)
    }

    /// Drop every voice.
    pub fn clear(&mut self) {
        self.voices.clear();
    }

    /// Voices currently held, oldest first.
    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for VoicePool {
    fn default() -> Self {
        Self::new(MAX_VOICES)
    }
}
