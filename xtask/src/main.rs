// Host tooling crate: unwrap/expect/panic are acceptable here.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod calibration;
mod check;
mod doc;
mod render;
mod specs;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "SLM hologram development tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the workspace builds, including slm-specs without std
    Check,
    /// Run all tests (unit, integration, and doc)
    Test {
        /// Run only unit tests
        #[arg(long)]
        unit: bool,
        /// Run only integration tests
        #[arg(long)]
        integration: bool,
    },
    /// Build and optionally open documentation
    Doc {
        /// Open documentation in browser
        #[arg(long)]
        open: bool,
    },
    /// List the shipped SLM device templates
    Specs {
        /// Show one device in detail, with its calibration preview
        #[arg(long)]
        device: Option<String>,
    },
    /// Render a request to a grayscale PNG
    Render {
        /// Render request JSON ({"screen": .., "mode": .., "encoder": ..})
        #[arg(long)]
        request: PathBuf,
        /// Calibration file: .cmap (r g b rows), two-column `phase gray`, or JSON
        #[arg(long)]
        cmap: Option<PathBuf>,
        /// Device template id sizing the screen (default: generic-1080p)
        #[arg(long)]
        spec: Option<String>,
        /// Renderer configuration JSON
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output PNG
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check => check::run(),
        Commands::Test { unit, integration } => test::run(unit, integration),
        Commands::Doc { open } => doc::run(open),
        Commands::Specs { device } => specs::run(device.as_deref()),
        Commands::Render {
            request,
            cmap,
            spec,
            config,
            out,
        } => render::run(&render::RenderArgs {
            request,
            cmap,
            spec,
            config,
            out,
        }),
    }
}
