//! sampl - lazy sampler pipelines from the command line
//!
//! Loads an image as a sampler, chains combinators over it and renders the
//! result back to pixels.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "sampl")]
#[command(author, version, about = "Lazy sampler pipelines over images")]
#[command(long_about = "
Reads images as lazy samplers, chains coordinate and value transforms over
them, and renders the result back to PNG. Nothing is resampled until the
final render.

Examples:
  sampl info image.png                        # Size and channel stats
  sampl render in.png -o out.png --rotate right
  sampl render in.png -o out.png --angle 30 --interpolate
  sampl render in.png -o big.png --scale 2 --width 512 --height 512
  sampl run --pipeline steps.yaml             # Steps from a YAML file
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Display image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Transform an image with flags and render it
    #[command(visible_alias = "r")]
    Render(RenderArgs),

    /// Run a YAML pipeline file
    Run(RunArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Show per-channel statistics
    #[arg(short, long)]
    stats: bool,
}

/// Arguments for the `render` command.
///
/// Transforms apply in a fixed order: crop, flips, quarter turn, angle,
/// scale, wrap.
#[derive(Args)]
struct RenderArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Crop region X,Y,W,H
    #[arg(long)]
    crop: Option<String>,

    /// Flip horizontal
    #[arg(long)]
    flip_h: bool,

    /// Flip vertical
    #[arg(long)]
    flip_v: bool,

    /// Quarter turn: left, right or over
    #[arg(short, long)]
    rotate: Option<String>,

    /// Rotation angle in degrees (clockwise)
    #[arg(short, long)]
    angle: Option<f64>,

    /// Uniform scale factor
    #[arg(short, long)]
    scale: Option<f64>,

    /// Tile the result instead of leaving its outside empty
    #[arg(long)]
    wrap: bool,

    /// Output width (default: transformed width)
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Output height (default: transformed height)
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Bilinear reads from the input image
    #[arg(short, long)]
    interpolate: bool,

    /// Color outside the image R,G,B,A in 0..1
    #[arg(long, default_value = "0,0,0,0")]
    oob: String,

    /// Render sampling offset
    #[arg(long, default_value = "0.5")]
    offset: f64,
}

#[derive(Args)]
struct RunArgs {
    /// Pipeline file (YAML)
    #[arg(short, long)]
    pipeline: PathBuf,

    /// Override the pipeline's input image
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Override the pipeline's output image
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Render(args) => commands::render::run(args, cli.verbose),
        Commands::Run(args) => commands::run::run(args, cli.verbose),
    }
}
