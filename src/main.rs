//! `funnel-canvas` -- replay recorded input against a funnel.
//!
//! Loads a funnel and a JSON array of input events, feeds the events through
//! a board, and prints the resulting funnel and/or scene as JSON on stdout.
//! Logs go to stderr; set `RUST_LOG=funnel_canvas=debug` for gesture traces.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use funnel_canvas::perf::{TARGET_FRAME_MS, measure_and_log};
use funnel_canvas::{Board, CanvasSettings, Funnel, InputEvent, NullCapture, Size};
use serde_json::json;
use std::cell::Cell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Output {
    Funnel,
    Scene,
    Both,
}

/// Replay canvas input events against a funnel
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the funnel JSON file
    funnel_path: PathBuf,
    /// Path to a JSON array of input events
    events_path: PathBuf,

    /// Canvas settings file (defaults to the user settings, or built-ins)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Viewport width in screen pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in screen pixels
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// What to print when the replay finishes
    #[arg(short, long, value_enum, default_value_t = Output::Both)]
    output: Output,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "funnel_canvas=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => CanvasSettings::load_from(path)
            .with_context(|| format!("Failed to load settings from '{}'", path.display()))?,
        None => CanvasSettings::load(),
    };

    let funnel_json = fs::read_to_string(&cli.funnel_path)
        .with_context(|| format!("Failed to read funnel file '{}'", cli.funnel_path.display()))?;
    let funnel: Funnel =
        serde_json::from_str(&funnel_json).context("Failed to parse funnel JSON")?;

    let events_json = fs::read_to_string(&cli.events_path)
        .with_context(|| format!("Failed to read events file '{}'", cli.events_path.display()))?;
    let events: Vec<InputEvent> =
        serde_json::from_str(&events_json).context("Failed to parse events JSON")?;

    info!(
        funnel = %funnel.id,
        nodes = funnel.nodes.len(),
        edges = funnel.edges.len(),
        events = events.len(),
        "Replaying"
    );

    let changes = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&changes);
    let mut board = Board::new(funnel, settings, move |_: &Funnel| {
        counter.set(counter.get() + 1);
    });
    board.set_viewport(Size::new(cli.width, cli.height));

    let mut capture = NullCapture;
    for (i, event) in events.iter().enumerate() {
        let response = measure_and_log("handle", TARGET_FRAME_MS, || {
            board.handle(event, &mut capture)
        });
        debug!(index = i, ?response, "Handled event");
    }

    info!(changes = changes.get(), zoom = board.zoom_percent(), "Replay finished");

    let out = match cli.output {
        Output::Funnel => serde_json::to_value(board.funnel())?,
        Output::Scene => {
            let scene = measure_and_log("scene", TARGET_FRAME_MS, || board.scene());
            serde_json::to_value(scene)?
        }
        Output::Both => {
            let scene = measure_and_log("scene", TARGET_FRAME_MS, || board.scene());
            json!({
                "funnel": serde_json::to_value(board.funnel())?,
                "scene": serde_json::to_value(scene)?,
            })
        }
    };
    println!("{}", serde_json::to_string_pretty(&out)?);

    Ok(())
}
