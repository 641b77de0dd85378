// Headless runtime - drives the playground without a headset or a window
//
// Builds the default scene on a rapier simulation, feeds it a scripted controller
// track at a fixed frame rate and logs every effect the session reports.

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Context, Result, ensure};
use clap::Parser;
use engine::logging::init_logging;
use tracing::info;
use vrplayground::{
    Effect, FrameClock, Session, SessionOptions, scenes::PlaygroundBuilder,
};

mod script;

use script::ControllerScript;

#[derive(Parser)]
#[command(name = "headless_runtime")]
#[command(about = "Run the VR playground with a scripted controller track")]
struct Args {
    /// Number of frames to simulate (at least the length of the script)
    #[arg(long, default_value = "240")]
    frames: u32,

    /// Simulated frame rate
    #[arg(long, default_value = "72")]
    fps: u32,

    /// Seed for the box layout
    #[arg(long, default_value = "0")]
    seed: u64,

    /// JSON file with session options
    #[arg(long)]
    options: Option<PathBuf>,
}

fn load_options(path: Option<&PathBuf>) -> Result<SessionOptions> {
    let Some(path) = path else {
        return Ok(SessionOptions::default());
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading options from {}", path.display()))?;
    SessionOptions::from_json_str(&json)
        .with_context(|| format!("parsing options in {}", path.display()))
}

fn main() -> Result<()> {
    init_logging("VRPLAYGROUND_LOG");

    let args = Args::parse();
    ensure!(args.fps > 0, "--fps must be positive");

    let options = load_options(args.options.as_ref())?;
    let mut session = Session::with_rapier(options, 2);
    let playground = PlaygroundBuilder::new()
        .with_seed(args.seed)
        .build(&mut session);
    info!(
        "Playground ready: {} spheres, {} boxes",
        playground.spheres.len(),
        playground.boxes.len()
    );

    let frame_duration = Duration::from_secs_f64(1.0 / args.fps as f64);
    let frames = args.frames.max(ControllerScript::length());
    let start = Instant::now();
    let mut clock = FrameClock::new();
    let mut script = ControllerScript::new();
    let mut state = session.render_state();

    for frame in 0..frames {
        let time = clock.tick(start + frame_duration * frame);
        let input = script.input_for_frame(frame, &state);

        let effects = engine::profile!("headless.update", session.update(&time, &input));
        for effect in effects {
            log_effect(frame, &effect);
        }

        state = session.render_state();
    }

    info!(
        "Finished {} frames: {} objects left, reference offset {:?}",
        frames,
        state.objects.len(),
        state.reference_offset.position
    );

    Ok(())
}

fn log_effect(frame: u32, effect: &Effect) {
    match effect {
        Effect::ObjectGrabbed {
            controller,
            entity_id,
        } => info!("[{}] {} grabbed {:?}", frame, controller, entity_id),
        Effect::ObjectReleased {
            controller,
            entity_id,
            velocity,
        } => info!(
            "[{}] {} threw {:?} at {:?}",
            frame, controller, entity_id, velocity
        ),
        Effect::ObjectCulled {
            entity_id,
            position,
        } => info!("[{}] culled {:?} at {:?}", frame, entity_id, position),
        Effect::Teleported {
            controller,
            target,
            ..
        } => info!("[{}] {} teleported to {:?}", frame, controller, target),
    }
}
