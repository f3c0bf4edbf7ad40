use anyhow::{ensure, Context, Result};
use clap::Parser;
use glam::Vec3;
use log::{debug, info, Level};
use neontrail::{
    CarState, DirectionalInput, DriveRecorder, DriveRecording, Playback, RibbonMesh, Sandbox,
    SandboxConfig, WanderDriver, WheelIndex,
};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "neontrail-headless",
    version,
    about = "Drive the trail sandbox without a window"
)]
struct Opts {
    /// Sandbox config (.json); defaults apply to anything left out
    #[arg(long)]
    config: Option<PathBuf>,

    /// Replay a recorded drive instead of wandering
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Save the drive that was run
    #[arg(long)]
    record: Option<PathBuf>,

    /// Wander duration in seconds
    #[arg(long, default_value_t = 30.0)]
    seconds: f32,

    /// Fixed step for wandering
    #[arg(long, default_value_t = 1.0 / 60.0)]
    tick: f32,

    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Write the final trails and ribbons as JSON
    #[arg(long)]
    dump: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

type Inputs = Box<dyn Iterator<Item = DirectionalInput>>;

#[derive(Serialize)]
struct TrailDump<'a> {
    wheel: WheelIndex,
    points: Vec<Vec3>,
    ribbon: &'a RibbonMesh,
}

#[derive(Serialize)]
struct Dump<'a> {
    ticks: u64,
    car: CarState,
    trails: Vec<TrailDump<'a>>,
}

fn dump(sandbox: &Sandbox, path: &Path) -> Result<()> {
    let trails = WheelIndex::ALL
        .iter()
        .map(|&wheel| TrailDump {
            wheel,
            points: sandbox.trails().points(wheel).iter().copied().collect(),
            ribbon: sandbox.trails().ribbon(wheel),
        })
        .collect();
    let dump = Dump {
        ticks: sandbox.ticks(),
        car: sandbox.car().state(),
        trails,
    };

    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &dump)?;
    info!("wrote trails to {}", path.display());
    Ok(())
}

fn wander_ticks(seconds: f32, tick: f32) -> Result<usize> {
    ensure!(
        tick.is_finite() && tick > 0.0,
        "--tick must be a positive number of seconds, got {}",
        tick
    );
    ensure!(
        seconds.is_finite() && seconds >= 0.0,
        "--seconds must be zero or more, got {}",
        seconds
    );
    Ok((seconds / tick).ceil() as usize)
}

fn main() -> Result<()> {
    let opt = Opts::parse();
    simple_logger::init_with_level(if opt.verbose {
        Level::Debug
    } else {
        Level::Info
    })?;

    let config = match &opt.config {
        Some(path) => SandboxConfig::load_json(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SandboxConfig::default(),
    };

    let (tick, inputs): (f32, Inputs) = match &opt.replay {
        Some(path) => {
            let recording = DriveRecording::load_json(path)
                .with_context(|| format!("loading {}", path.display()))?;
            info!(
                "replaying {} ticks ({:.1}s) from {}",
                recording.tick_count(),
                recording.duration_secs(),
                path.display()
            );
            let inputs: Inputs = Box::new(Playback::new(&recording));
            (recording.tick_seconds, inputs)
        }
        None => {
            let tick = opt.tick;
            let ticks = wander_ticks(opt.seconds, tick)?;
            let mut wander = WanderDriver::new(opt.seed);
            info!("wandering for {} ticks with seed {}", ticks, opt.seed);
            let inputs: Inputs = Box::new((0..ticks).map(move |_| wander.next_input(tick)));
            (tick, inputs)
        }
    };

    let mut sandbox = Sandbox::new(config);
    let mut recorder = DriveRecorder::new(tick);
    let report_every = (1.0 / tick).round().max(1.0) as u64;

    for input in inputs {
        recorder.record(input);
        let report = sandbox.tick(tick, input);
        if sandbox.ticks() % report_every == 0 {
            debug!(
                "t={:.1}s pos=({:.2}, {:.2}) speed={:.2} trails={:?}",
                sandbox.elapsed_secs(),
                report.car.position.x,
                report.car.position.z,
                report.car.speed,
                sandbox.trail_lengths()
            );
        }
    }

    let state = sandbox.car().state();
    info!(
        "{} ticks, car at ({:.2}, {:.2}) heading {:.2} speed {:.2}",
        sandbox.ticks(),
        state.position.x,
        state.position.z,
        state.heading,
        state.speed
    );
    for wheel in WheelIndex::ALL.iter().copied() {
        info!(
            "{:?}: {} points, {} ribbon segments",
            wheel,
            sandbox.trails().points(wheel).len(),
            sandbox.trails().ribbon(wheel).segment_count()
        );
    }

    if let Some(path) = &opt.dump {
        dump(&sandbox, path)?;
    }
    if let Some(path) = &opt.record {
        recorder
            .finish()
            .save_json(path)
            .with_context(|| format!("saving {}", path.display()))?;
        info!("saved drive to {}", path.display());
    }

    sandbox.dispose();
    Ok(())
}
