//! Binary entrypoint for picpickr.
//!
//! Parses arguments and delegates to the library crate.

use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use picpickr::config::{Configuration, Layout};
use picpickr::error::Error;
use picpickr::listing::write_listing;
use picpickr::photos::PhotoList;
use picpickr::render::gpu::GpuTexture;
use picpickr::render::window::run_viewer;

#[derive(Debug, Parser)]
#[command(name = "picpickr", version, about = "Browse the photos in a folder")]
struct Cli {
    /// Folder to scan for photos
    #[arg(value_name = "FOLDER")]
    folder: PathBuf,

    /// Print the photos found and exit without opening a window
    #[arg(short, long)]
    list: bool,

    /// Show one centered photo without the thumbnail strip
    #[arg(long)]
    centered: bool,

    /// Sort photos by file name instead of directory order
    #[arg(long)]
    sort: bool,

    /// Path to YAML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn parse_cli() -> Cli {
    Cli::try_parse().unwrap_or_else(|err| {
        if matches!(
            err.kind(),
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
        ) {
            err.exit();
        }
        // usage errors exit 1, not clap's default 2
        let _ = err.print();
        process::exit(1);
    })
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("picpickr={level}").parse()?)
        .add_directive("wgpu=warn".parse()?)
        .add_directive("winit=warn".parse()?);
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = parse_cli();
    init_tracing(cli.verbose)?;

    let mut cfg = match &cli.config {
        Some(path) => Configuration::from_yaml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Configuration::default(),
    };
    if cli.centered {
        cfg.layout = Layout::Centered;
    }
    if cli.sort {
        cfg.sort_by_name = true;
    }
    let cfg = cfg.validated().context("validating configuration")?;
    let opts = cfg.scan_options();

    if cli.list {
        let photos = PhotoList::<()>::scan(&cli.folder, &opts)?;
        write_listing(&mut io::stdout().lock(), &photos).context("writing photo list")?;
        return Ok(());
    }

    let photos = PhotoList::<GpuTexture>::scan(&cli.folder, &opts)?;
    if photos.is_empty() {
        return Err(Error::EmptyScan { path: cli.folder }.into());
    }
    info!(count = photos.len(), layout = ?cfg.layout, "opening viewer");
    run_viewer(photos, &cfg)?;
    Ok(())
}
