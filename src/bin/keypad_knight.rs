use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use keypad_knight::config::{GraphSource, RunConfig};
use keypad_knight::count::{MoveCounter, Strategy};
use keypad_knight::keypad::graph::MoveGraph;
use keypad_knight::keypad::layout::KeypadLayout;
use keypad_knight::render::ascii::{to_ascii, AsciiSurface};
use keypad_knight::render::frame_loop::FrameLoop;
use keypad_knight::render::scene::Scene;
use keypad_knight::render::svg::to_svg;
use keypad_knight::render::terminal::{TerminalClose, TerminalSession};
use keypad_knight::Key;

#[derive(Parser)]
#[command(name = "keypad_knight", version, about = "Knight moves on a phone keypad")]
struct Cli {
    /// JSON run configuration; flags below override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Sequence length in keys visited.
    #[arg(long, global = true)]
    moves: Option<u64>,
    #[arg(long, global = true, value_enum)]
    strategy: Option<Strategy>,
    /// Build the graph from knight steps over the layout instead of the table.
    #[arg(long, global = true)]
    derived: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print sequence counts as JSON
    Count {
        /// Only report this start key
        #[arg(long)]
        start: Option<i64>,
    },
    /// Print the move graph as JSON
    Graph,
    /// Draw one frame
    Draw {
        #[arg(long, value_enum, default_value_t = Format::Ascii)]
        format: Format,
    },
    /// Redraw the keypad at a fixed rate; close with `q`, `Esc` or `Ctrl+C`
    Watch {
        #[arg(long)]
        fps: Option<u32>,
        #[arg(long)]
        frames: Option<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Ascii,
    Svg,
}

#[derive(Serialize)]
struct GraphOutput<'a> {
    #[serde(flatten)]
    graph: &'a MoveGraph,
    edges: usize,
    asymmetric: Vec<(Key, Key)>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<RunConfig> {
    let mut cfg = match &cli.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(m) = cli.moves {
        cfg.moves = m;
    }
    if let Some(s) = cli.strategy {
        cfg.strategy = s;
    }
    if cli.derived {
        cfg.graph = GraphSource::Derived;
    }
    if let Commands::Watch { fps, frames } = &cli.command {
        if let Some(f) = fps {
            cfg.fps = *f;
        }
        if frames.is_some() {
            cfg.frames = *frames;
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let cfg = load_config(&cli)?;
    let layout = KeypadLayout::phone();
    let graph = cfg.build_graph(&layout)?;
    let counter = MoveCounter::new(&graph).with_strategy(cfg.strategy);

    match &cli.command {
        Commands::Count { start } => {
            let mut report = counter.report(cfg.moves)?;
            if let Some(s) = start {
                let key = Key::new(*s)?;
                report.per_start.retain(|c| c.key == key);
            }
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Graph => {
            let out = GraphOutput {
                graph: &graph,
                edges: graph.out_degree_sum(),
                asymmetric: graph.asymmetric_pairs(),
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Draw { format } => {
            let report = counter.report(cfg.moves)?;
            let scene = Scene::build(&layout, &graph, &report, cfg.canvas);
            match format {
                Format::Ascii => print!("{}", to_ascii(&scene)),
                Format::Svg => print!("{}", to_svg(&scene)),
            }
        }
        Commands::Watch { .. } => {
            // The count does not change between frames; compute it once.
            let report = counter.report(cfg.moves)?;
            let scene = Scene::build(&layout, &graph, &report, cfg.canvas);

            let _session = TerminalSession::enter().context("terminal setup failed")?;
            let mut surface = AsciiSurface::new(io::stdout()).with_clear(true);
            let frames = FrameLoop::new(cfg.fps)
                .with_max_frames(cfg.frames)
                .run(&mut surface, &scene, &TerminalClose)
                .context("frame loop failed")?;
            info!(frames, "watch finished");
        }
    }
    Ok(())
}
