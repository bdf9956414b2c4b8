//! neonsnake: plays a scripted snake session through the music engine,
//! live or rendered to WAV.
//!
//! Usage:
//!   neonsnake play --seconds 30 --hue 0.7
//!   neonsnake render --out session.wav --ending crash

mod session;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use ns_master::{frames_to_wav, EngineConfig, MasterConfig, MusicEngine, OfflineRenderer};

use session::{apply, demo_script, Cue, Ending};

#[derive(Parser, Debug)]
#[command(name = "neonsnake", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play the demo session on the default output device.
    Play(SessionArgs),
    /// Render the demo session to a 16-bit stereo WAV file.
    Render {
        #[command(flatten)]
        session: SessionArgs,
        /// Output path.
        #[arg(short, long)]
        out: PathBuf,
        /// Sample rate of the rendered file.
        #[arg(long, default_value_t = 44_100)]
        sample_rate: u32,
    },
}

#[derive(Args, Debug)]
struct SessionArgs {
    /// Session length in seconds.
    #[arg(short, long, default_value_t = 30.0)]
    seconds: f64,
    /// Theme hue in [0, 1]; picks the root note.
    #[arg(long, default_value_t = 0.52)]
    hue: f64,
    /// Seed for note randomization.
    #[arg(long)]
    seed: Option<u64>,
    /// How the game ends.
    #[arg(long, value_enum, default_value_t = Ending::Win)]
    ending: Ending,
}

impl SessionArgs {
    fn config(&self) -> MasterConfig {
        let mut config = MasterConfig::default();
        if let Some(seed) = self.seed {
            config.engine = EngineConfig { seed, ..config.engine };
        }
        config
    }

    fn script(&self) -> Vec<Cue> {
        demo_script(self.seconds, self.hue, self.ending)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Play(args) => play(&args),
        Command::Render {
            session,
            out,
            sample_rate,
        } => render(&session, &out, sample_rate),
    }
}

fn play(args: &SessionArgs) -> Result<()> {
    let mut music = MusicEngine::new(args.config());
    if !music.start_if_needed() {
        bail!("no audio output available");
    }
    let handle = music.handle();
    println!("Playing {:.1}s session...", args.seconds);

    let started = Instant::now();
    for cue in args.script() {
        let due = Duration::from_secs_f64(cue.at.max(0.0));
        if let Some(wait) = due.checked_sub(started.elapsed()) {
            thread::sleep(wait);
        }
        apply(&handle, cue.action);
        print!("\r{:6.2}s  voices: {:3}", cue.at, handle.with_engine(|e| e.voice_count()));
        let _ = std::io::stdout().flush();
    }

    let total = Duration::from_secs_f64(args.seconds.max(0.0));
    if let Some(wait) = total.checked_sub(started.elapsed()) {
        thread::sleep(wait);
    }
    music.stop();
    println!("\rDone.                    ");
    Ok(())
}

fn render(args: &SessionArgs, out: &Path, sample_rate: u32) -> Result<()> {
    let mut renderer = OfflineRenderer::new(args.config(), sample_rate);
    let handle = renderer.handle();
    let to_frame = |seconds: f64| (seconds.max(0.0) * sample_rate as f64) as u64;

    info!("rendering {:.1}s at {} Hz", args.seconds, sample_rate);
    let mut frames = Vec::with_capacity(to_frame(args.seconds) as usize);
    for cue in args.script() {
        renderer.render_until(to_frame(cue.at), &mut frames);
        apply(&handle, cue.action);
    }
    renderer.render_until(to_frame(args.seconds), &mut frames);

    let wav = frames_to_wav(&frames, sample_rate).context("encoding WAV")?;
    fs::write(out, &wav).with_context(|| format!("writing {}", out.display()))?;
    println!(
        "Wrote {} ({} frames, {:.1}s)",
        out.display(),
        frames.len(),
        frames.len() as f64 / sample_rate as f64
    );
    Ok(())
}
