//! imgsign: stamp a text label onto an image file.
//!
//! imgsign loads a raster image, draws a short text label at a given
//! position and size, and writes the result to a new file. It is meant for
//! build pipelines that mark icons or screenshots with a version, a brand
//! or a "DRAFT" banner.
//!
//! # Modules
//!
//! - [`sign`]: The load, draw, save operation and its report
//! - [`label`]: Label description ([`LabelSpec`]) and argument validation
//! - [`codec`]: Decoding, output format selection and atomic writes
//! - [`render`]: The embedded font, text measurement and drawing
//! - [`geom`]: Typed positions and pixel extents
//! - [`error`]: Error types for imgsign operations
//!
//! # Example
//!
//! ```no_run
//! let report = imgsign::sign("photo.png", "photo_signed.png", "DRAFT", 10.0, 10.0, 24.0)?;
//! assert_eq!((report.width, report.height), (800, 600));
//! # Ok::<(), imgsign::SignError>(())
//! ```

pub mod codec;
pub mod error;
pub mod geom;
pub mod label;
pub mod render;
pub mod sign;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

pub use error::SignError;
pub use label::{Color, LabelSpec, Origin};
pub use sign::{sign, sign_with, SignReport};

/// The imgsign CLI application.
#[derive(Parser)]
#[command(name = "imgsign")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace). IMGSIGN_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Draw a label onto an image and write the result.
    Sign(SignArgs),
    /// Print the pixel size a label would take up.
    Measure(MeasureArgs),
}

/// Arguments for the sign subcommand.
#[derive(clap::Args)]
struct SignArgs {
    /// Image to read.
    input: PathBuf,

    /// Where to write the signed image. The extension picks the format
    /// (PNG if unknown).
    output: PathBuf,

    /// Text to draw.
    #[arg(short, long)]
    label: String,

    /// Horizontal position in pixels.
    #[arg(short = 'x', long, default_value_t = 0.0, allow_negative_numbers = true)]
    x: f64,

    /// Vertical position in pixels, measured from the chosen origin.
    #[arg(short = 'y', long, default_value_t = 0.0, allow_negative_numbers = true)]
    y: f64,

    /// Text size in pixels.
    #[arg(short, long, env = "IMGSIGN_SIZE", default_value_t = crate::label::DEFAULT_TEXT_SIZE)]
    size: f32,

    /// Corner the position is measured from ('top-left' or 'bottom-left').
    #[arg(long, env = "IMGSIGN_ORIGIN", default_value = "top-left")]
    origin: Origin,

    /// Fill color as RRGGBB or RRGGBBAA hex.
    #[arg(long, env = "IMGSIGN_COLOR", default_value = "ffffff")]
    color: Color,

    /// Report format.
    #[arg(long, value_enum, default_value = "text")]
    report: ReportFormat,

    /// Print the resolved settings as JSON and exit without touching files.
    #[arg(long)]
    dump_config: bool,
}

/// Arguments for the measure subcommand.
#[derive(clap::Args)]
struct MeasureArgs {
    /// Text to measure.
    label: String,

    /// Text size in pixels.
    #[arg(short, long, env = "IMGSIGN_SIZE", default_value_t = crate::label::DEFAULT_TEXT_SIZE)]
    size: f32,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

/// Settings printed by `--dump-config`.
#[derive(Serialize)]
struct ResolvedConfig<'a> {
    input: &'a PathBuf,
    output: &'a PathBuf,
    format: &'static str,
    font: &'static str,
    label: &'a LabelSpec,
}

/// Run the imgsign CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), SignError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Sign(args)) => run_sign(args),
        Some(Commands::Measure(args)) => run_measure(args),
        None => {
            println!("imgsign {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Stamp a text label onto an image file.");
            println!();
            println!("Run 'imgsign --help' for usage information.");
            Ok(())
        }
    }
}

/// Installs the stderr log subscriber.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("IMGSIGN_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("imgsign={}", level)));

    // A subscriber may already be installed when embedded in another tool.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

/// Execute the sign subcommand.
fn run_sign(args: SignArgs) -> Result<(), SignError> {
    let spec = LabelSpec::new(args.label, args.x, args.y, args.size)
        .with_origin(args.origin)
        .with_color(args.color);

    if args.dump_config {
        let resolved = ResolvedConfig {
            input: &args.input,
            output: &args.output,
            format: codec::select_output_format(&args.output).name(),
            font: render::DEFAULT_FONT_NAME,
            label: &spec,
        };
        println!("{}", serde_json::to_string_pretty(&resolved)?);
        return Ok(());
    }

    let report = sign_with(&args.input, &args.output, &spec)?;

    match args.report {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        ReportFormat::Text => print!("{}", report),
    }

    Ok(())
}

/// Execute the measure subcommand.
fn run_measure(args: MeasureArgs) -> Result<(), SignError> {
    LabelSpec::new(args.label.as_str(), 0.0, 0.0, args.size).validate()?;

    let font = render::default_font()?;
    let metrics = render::measure(&font, &args.label, args.size);
    println!("{}x{}", metrics.width, metrics.height);
    Ok(())
}
