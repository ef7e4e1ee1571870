use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use pinch_rhythm::app::Controller;
use pinch_rhythm::config::SessionConfig;
use pinch_rhythm::game::Session;
use pinch_rhythm::model::{RhythmTrack, Side};
use pinch_rhythm::render::CommandRecorder;
use pinch_rhythm::replay::Recording;
use pinch_rhythm::traits::audio::PulseCounter;
use pinch_rhythm::traits::time::{ManualTimeProvider, SystemTimeProvider, TimeProvider};
use pinch_rhythm::util::logging::init_logging;

/// Replay a recorded hand-tracking session against a rhythm track.
#[derive(Debug, Parser)]
#[command(name = "pinch-rhythm", version, about)]
struct Args {
    /// Rhythm track: whitespace separated note divisions (negative = rest).
    #[arg(long)]
    track: PathBuf,

    /// Recorded session in JSON lines.
    #[arg(long)]
    recording: PathBuf,

    /// Session config (JSON). Defaults apply when absent.
    #[arg(long, env = "PINCH_RHYTHM_CONFIG", default_value = "pinch-rhythm.json")]
    config: PathBuf,

    /// Also write logs to a daily rolling file in this directory.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Pace the replay on the wall clock instead of jumping between events.
    #[arg(long)]
    realtime: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = init_logging(args.log_dir.as_deref(), args.verbose)?;

    let config = SessionConfig::load_from(&args.config)?;
    let track = RhythmTrack::load(&args.track)
        .with_context(|| format!("cannot start session with track {}", args.track.display()))?;
    let recording = Recording::load(&args.recording)?;
    info!(
        entries = track.entries().len(),
        events = recording.events().len(),
        "session loaded"
    );

    let (inputs, detector) = recording.into_replay();
    let session = Session::new(config, track);
    let mut controller = Controller::new(
        session,
        detector,
        CommandRecorder::with_capacity(1),
        PulseCounter::new(),
    );

    let clock: Box<dyn TimeProvider> = if args.realtime {
        Box::new(SystemTimeProvider::new())
    } else {
        Box::new(ManualTimeProvider::new())
    };
    controller.run(inputs, clock.as_ref())?;

    for report in controller.reports() {
        println!(
            "cycle {}: left {} / right {}",
            report.cycle, report.left, report.right
        );
    }
    let session = controller.session();
    println!("{}", session.accuracy_label(Side::Left));
    println!("{}", session.accuracy_label(Side::Right));
    Ok(())
}
