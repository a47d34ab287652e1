//! Twin Pong entry point
//!
//! Loads settings and the splash image, then runs the frame loop on the
//! terminal (or headless with `--headless <frames>`).
//!
//! Usage:
//!   twin-pong [--config settings.json] [--seed N] [--fps N] [--splash FILE]
//!   twin-pong --headless 600 --seed 7

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use twin_pong::Settings;
use twin_pong::platform::{self, Headless, Terminal};
use twin_pong::renderer::Image;
use twin_pong::sim::GameWorld;

#[derive(Parser)]
#[command(name = "twin-pong")]
#[command(about = "Two-paddle Pong in the terminal")]
struct Args {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Target frames per second
    #[arg(long)]
    fps: Option<u32>,
    /// Splash screen image (text file)
    #[arg(long)]
    splash: Option<PathBuf>,
    /// Run this many frames without a terminal and print the final state as JSON
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u64>,
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(fps) = args.fps {
        settings.fps = fps.max(1);
    }
    if let Some(splash) = &args.splash {
        settings.splash_path = splash.clone();
    }
    Ok(settings)
}

fn run(args: Args) -> Result<()> {
    let settings = load_settings(&args)?;
    let splash = Image::load(&settings.splash_path).context("cannot draw splash screen")?;
    let mut world = GameWorld::new(settings.resolve_seed());

    match args.headless {
        Some(frames) => {
            let mut headless = Headless::new(frames);
            platform::run(&mut headless, &mut world, &splash)?;
            log::info!(
                "Headless run finished: {} frames, {} draw calls",
                headless.frames_presented(),
                headless.draw_calls()
            );
            let json = serde_json::to_string_pretty(&world.snapshot())?;
            println!("{json}");
        }
        None => {
            let mut terminal = Terminal::new(&settings).context("failed to initialise terminal")?;
            platform::run(&mut terminal, &mut world, &splash)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("twin-pong: {e:#}");
            ExitCode::FAILURE
        }
    }
}
