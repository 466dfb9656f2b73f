use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use mapsketch::config::FileConfig;
use mapsketch::control::{Clipboard, FileClipboard, MemoryClipboard, StderrNotifier};
use mapsketch::game::{GameCoord, Plane};
use mapsketch::polygon::{EdgeMetric, PolygonOptions};
use mapsketch::session::{Action, Session, SessionReport, SessionScript};

/// Sketch a region on a game world map and read back its vertices in game coordinates
///
/// Examples:
///   # Default triangle around the configured viewport
///   mapsketch
///
///   # Default triangle around a game tile on the first floor
///   mapsketch --center-x 3200 --center-y 3200 --plane 1
///
///   # Replay recorded edits and copy the vertex list to a file
///   mapsketch --script edits.toml --clipboard-file region.json
#[derive(Parser, Debug)]
#[command(name = "mapsketch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches mapsketch.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Session script to replay (TOML list of actions)
    #[arg(short = 's', long)]
    script: Option<PathBuf>,

    /// Map plane (floor) 0-3
    #[arg(short = 'p', long, value_parser = clap::value_parser!(i64).range(0..=3))]
    plane: Option<i64>,

    /// Zoom level of the viewport
    #[arg(short = 'z', long, allow_hyphen_values = true)]
    zoom: Option<i32>,

    /// Game x coordinate to centre the viewport on (use with --center-y)
    #[arg(long, requires = "center_y", allow_hyphen_values = true)]
    center_x: Option<i64>,

    /// Game y coordinate to centre the viewport on (use with --center-x)
    #[arg(long, requires = "center_x", allow_hyphen_values = true)]
    center_y: Option<i64>,

    /// Space used to find the nearest edge when inserting a vertex
    #[arg(long, value_enum)]
    edge_metric: Option<EdgeMetric>,

    /// Write copied text to this file instead of printing it
    #[arg(long)]
    clipboard_file: Option<PathBuf>,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            Some(FileConfig::from_path(config_path)?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };
    let file_config = file_config.unwrap_or_default();

    let verbose = args.verbose || file_config.verbose;
    init_tracing(verbose);

    let script_path = args.script.clone().or_else(|| file_config.script.clone());
    let script = match script_path {
        Some(ref path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read session script: {:?}", path))?;
            SessionScript::from_toml(&contents)
                .with_context(|| format!("Invalid session script: {:?}", path))?
        }
        None => SessionScript {
            actions: vec![Action::Expand],
            ..Default::default()
        },
    };

    let mut viewport = script
        .viewport
        .clone()
        .unwrap_or_else(|| file_config.viewport.clone());
    if let Some(p) = args.plane {
        viewport.plane = Plane::new(p)?;
    }
    if let Some(z) = args.zoom {
        viewport.zoom = z;
    }
    if let (Some(x), Some(y)) = (args.center_x, args.center_y) {
        viewport.center = GameCoord::new(x, y).to_display(viewport.plane);
    }

    let edge_metric = args
        .edge_metric
        .or(script.edge_metric)
        .unwrap_or(file_config.edge_metric);
    let clipboard_file = args
        .clipboard_file
        .clone()
        .or_else(|| file_config.clipboard_file.clone());

    tracing::debug!(?viewport, ?edge_metric, "starting session");

    let mut session = Session::new(&viewport, PolygonOptions { edge_metric });
    let mut notifier = StderrNotifier;

    let report = match clipboard_file {
        Some(path) => {
            let mut clipboard = FileClipboard::new(path);
            run_session(&mut session, &script, &mut clipboard, &mut notifier)?
        }
        None => {
            let mut clipboard = MemoryClipboard::new();
            run_session(&mut session, &script, &mut clipboard, &mut notifier)?
        }
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    } else {
        print_report(&report);
    }

    Ok(())
}

fn run_session(
    session: &mut Session,
    script: &SessionScript,
    clipboard: &mut dyn Clipboard,
    notifier: &mut StderrNotifier,
) -> Result<SessionReport> {
    session
        .run(&script.actions, clipboard, notifier)
        .context("Session replay failed")
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_report(report: &SessionReport) {
    println!("Control: {:?}", report.state);
    println!("Plane:   {}", report.plane);
    println!("Vertices ({}):", report.vertex_count);
    for (i, v) in report.vertices.iter().enumerate() {
        println!("  {:>3}: [{}, {}]", i, v.x, v.y);
    }
    for alert in &report.alerts {
        println!("Alert:   {}", alert);
    }
    for entry in &report.copied {
        println!("Copied:  {}", entry);
    }
    if !report.vertices_text.is_empty() {
        println!();
        println!("{}", report.vertices_text);
    }
}
