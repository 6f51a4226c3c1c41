//! # Stippler CLI
//!
//! Command-line interface for 1-bit stipple conversion.
//!
//! ## Usage
//!
//! ```bash
//! # Convert photo.png, writing photo_shaded.png next to it
//! stippler photo.png
//!
//! # Prompt for the input path (drag-and-drop friendly)
//! stippler
//!
//! # Explicit output plus the grayscale intermediate
//! stippler photo.png --output out.png --gray gray.png
//!
//! # Show the darkness levels and their patterns
//! stippler --list-levels
//! ```

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stippler::{
    Darkness, StippleConfig, StipplerError,
    codec::encode,
    pipeline::Pipeline,
};

/// Stippler - convert images to 1-bit stipple halftones
#[derive(Parser, Debug)]
#[command(name = "stippler")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input image (prompted for when omitted)
    input: Option<PathBuf>,

    /// Output path (defaults to the input path with the suffix inserted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Suffix inserted before the extension of the default output path
    #[arg(long)]
    suffix: Option<String>,

    /// Also write the grayscale intermediate to this path
    #[arg(long, value_name = "FILE")]
    gray: Option<PathBuf>,

    /// JSON config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Stipple on a single thread
    #[arg(long)]
    serial: bool,

    /// List darkness levels and exit
    #[arg(long)]
    list_levels: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), StipplerError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.list_levels {
        print_levels();
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => StippleConfig::load(path)?,
        None => StippleConfig::default(),
    };
    if let Some(suffix) = cli.suffix {
        config.suffix = suffix;
    }
    if cli.serial {
        config.parallel = false;
    }

    let input = match cli.input {
        Some(path) => path,
        None => prompt_input_path()?,
    };
    let output = cli
        .output
        .unwrap_or_else(|| encode::output_path(&input, &config.suffix));

    info!("Working on {}", input.display());

    let mut pipeline = Pipeline::new(config).on_progress(|stage| info!("{}", stage));
    let (width, height) = pipeline.run(&input, &output, cli.gray.as_deref())?;

    info!("Wrote {}x{} image to {}", width, height, output.display());
    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "stippler=info",
        1 => "stippler=debug",
        _ => "stippler=trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Read the input path from stdin.
fn prompt_input_path() -> Result<PathBuf, StipplerError> {
    print!("Enter image file path: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    let path = strip_quotes(line.trim());
    if path.is_empty() {
        return Err(StipplerError::Decode("No input path given".to_string()));
    }
    Ok(Path::new(path).to_path_buf())
}

/// Drop one pair of surrounding double quotes, as added by drag-and-drop
/// on some terminals.
fn strip_quotes(path: &str) -> &str {
    let path = path.strip_prefix('"').unwrap_or(path);
    path.strip_suffix('"').unwrap_or(path)
}

fn print_levels() {
    println!("Darkness levels:");
    for darkness in Darkness::ALL {
        let (rows, cols) = darkness.period();
        println!(
            "  {} {:<11} {:>5.1}% black  ({}x{} tile)",
            darkness.level(),
            darkness.name(),
            darkness.coverage() * 100.0,
            rows,
            cols
        );
    }
}
