//! Faster-than-real-time rendering through the same callback path a
//! device would use.

use ns_audio::{ManualOutput, ManualPump};
use ns_engine::Frame;

use crate::handle::EngineHandle;
use crate::wav::interleaved_to_frames;
use crate::{MasterConfig, MusicEngine};

/// A started [`MusicEngine`] on a [`ManualOutput`].
pub struct OfflineRenderer {
    music: MusicEngine,
    pump: ManualPump,
    sample_rate: u32,
}

impl OfflineRenderer {
    pub fn new(config: MasterConfig, sample_rate: u32) -> Self {
        let mut music = MusicEngine::new(config);
        let (output, pump) = ManualOutput::new(sample_rate, 2);
        music.start_with(output);
        Self {
            music,
            pump,
            sample_rate,
        }
    }

    pub fn handle(&self) -> EngineHandle {
        self.music.handle()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Render the next `frames` stereo frames.
    pub fn render(&mut self, frames: usize) -> Vec<Frame> {
        interleaved_to_frames(&self.pump.pull(frames))
    }

    /// Render up to absolute frame index `until`, appending to `out`.
    pub fn render_until(&mut self, until: u64, out: &mut Vec<Frame>) {
        let now = self.music.handle().with_engine(|e| e.clock());
        if until > now {
            out.extend(self.render((until - now) as usize));
        }
    }
}
