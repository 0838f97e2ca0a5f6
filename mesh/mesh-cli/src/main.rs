//! Mesh subdivision from the command line.
//!
//! # Commands
//!
//! - `mesh-subdivide subdivide <INPUT> <OUTPUT>` - Refine a mesh file
//! - `mesh-subdivide inspect <INPUT>` - Print topology statistics
//!
//! Input and output formats follow the file extension (`.stl`, `.obj`).
//! `-v` shows progress, `-vv` per-pass counts, `-vvv` per-scheme detail.
//! `RUST_LOG` overrides the verbosity flags.

mod inspect;
mod points;
mod subdivide;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use mesh_subdivide::SubdivisionMethod;
use tracing_subscriber::EnvFilter;

/// Loop, Catmull-Clark, Kobbelt √3 and Butterfly subdivision for STL/OBJ meshes
#[derive(Parser)]
#[command(name = "mesh-subdivide")]
#[command(about = "Subdivide triangle meshes", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Subdivide a mesh file and write the result
    Subdivide(SubdivideArgs),

    /// Print vertex, edge and face statistics of a mesh file
    Inspect {
        /// Mesh to inspect (.stl or .obj)
        #[arg(name = "INPUT")]
        input: PathBuf,
    },
}

#[derive(Args, Debug)]
struct SubdivideArgs {
    /// Mesh to read (.stl or .obj)
    #[arg(name = "INPUT")]
    input: PathBuf,

    /// Where to write the result (.stl or .obj)
    #[arg(name = "OUTPUT")]
    output: PathBuf,

    /// Scheme: loop, catmull-clark, kobbelt or butterfly
    #[arg(short, long)]
    method: Option<SubdivisionMethod>,

    /// Number of passes
    #[arg(short, long)]
    iterations: Option<u32>,

    /// Refuse to run when the result would exceed this many triangles
    #[arg(long)]
    max_faces: Option<usize>,

    /// JSON file with subdivision parameters; flags override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the points computed in every pass to this JSON file
    #[arg(long)]
    points: Option<PathBuf>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Subdivide(args) => subdivide::run(&args),
        Commands::Inspect { input } => inspect::run(&input),
    }
}
