//! Marching-squares contour extraction CLI.
//!
//! Reads a pixmap, extracts iso-contours with a fixed pool of worker threads
//! and writes the contour image as a pixmap.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use contour_common::{ContourError, MarchingConfig};
use marching::WorkerCoordinator;
use raster::{read_ppm, write_ppm, ContourTileSet};

#[derive(Parser, Debug)]
#[command(name = "marching-squares")]
#[command(about = "Extract iso-contours from a pixmap using parallel marching squares")]
struct Args {
    /// Input pixmap
    input_file: PathBuf,

    /// Output pixmap
    output_file: PathBuf,

    /// Number of worker threads
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    thread_count: u16,

    /// Directory holding the contour tiles 0.ppm .. 15.ppm
    #[arg(long, default_value = "./contours")]
    contours_dir: PathBuf,

    /// Grid cell and tile edge in pixels
    #[arg(long, default_value_t = MarchingConfig::default().step)]
    step: usize,

    /// Luminance cutoff; brighter cells are background
    #[arg(long, default_value_t = MarchingConfig::default().sigma)]
    sigma: u8,

    /// Canvas width bound
    #[arg(long, default_value_t = MarchingConfig::default().max_canvas_width)]
    max_width: usize,

    /// Canvas height bound
    #[arg(long, default_value_t = MarchingConfig::default().max_canvas_height)]
    max_height: usize,

    /// Write a JSON run report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn config(&self) -> MarchingConfig {
        MarchingConfig {
            step: self.step,
            sigma: self.sigma,
            max_canvas_width: self.max_width,
            max_canvas_height: self.max_height,
        }
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            // Usage errors exit with status 1, not clap's default of 2.
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    if let Err(e) = init_tracing(&args.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::from(1);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{:#}", e), "{}", failure_message(&e));
            ExitCode::from(1)
        }
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_names(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Log headline for a failed run. Resource exhaustion aborts the same way as
/// bad input but is reported separately.
fn failure_message(err: &anyhow::Error) -> &'static str {
    let exhausted = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<ContourError>())
        .any(ContourError::is_resource_exhaustion);

    if exhausted {
        "Out of resources, aborting"
    } else {
        "Contour extraction failed"
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.config();
    config.validate().context("invalid configuration")?;

    // Everything is loaded and allocated before any output is written, so a
    // failed run leaves no partial file behind.
    let source = read_ppm(&args.input_file)
        .with_context(|| format!("failed to read {}", args.input_file.display()))?;

    let tiles = ContourTileSet::load(&args.contours_dir, config.step).with_context(|| {
        format!(
            "failed to load contour tiles from {}",
            args.contours_dir.display()
        )
    })?;

    let coordinator = WorkerCoordinator::new(args.thread_count as usize, config)
        .context("failed to start workers")?;
    let output = coordinator.run(&source, &tiles)?;

    write_ppm(&output.canvas, &args.output_file)
        .with_context(|| format!("failed to write {}", args.output_file.display()))?;

    info!(
        output = %args.output_file.display(),
        width = output.canvas.width(),
        height = output.canvas.height(),
        "Wrote contour image"
    );

    if let Some(path) = &args.report {
        write_report(path, &output.report)?;
    }

    Ok(())
}

fn write_report(path: &Path, report: &marching::PipelineReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report {}", path.display()))?;
    info!(path = %path.display(), "Wrote run report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{solid_image, synthetic_tile_dir, vertical_split_image, WHITE};

    fn parse(argv: &[&str]) -> std::result::Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("marching-squares").chain(argv.iter().copied()))
    }

    #[test]
    fn test_three_positionals_required() {
        assert!(parse(&["in.ppm", "out.ppm"]).is_err());
        assert!(parse(&[]).is_err());

        let args = parse(&["in.ppm", "out.ppm", "4"]).unwrap();
        assert_eq!(args.thread_count, 4);
        assert_eq!(args.contours_dir, PathBuf::from("./contours"));
        assert_eq!(args.config(), MarchingConfig::default());
    }

    #[test]
    fn test_thread_count_must_be_positive_integer() {
        assert!(parse(&["in.ppm", "out.ppm", "0"]).is_err());
        assert!(parse(&["in.ppm", "out.ppm", "four"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let args = parse(&[
            "in.ppm", "out.ppm", "2", "--step", "4", "--sigma", "128", "--max-width", "512",
        ])
        .unwrap();
        let config = args.config();
        assert_eq!(config.step, 4);
        assert_eq!(config.sigma, 128);
        assert_eq!(config.max_canvas_width, 512);
        assert_eq!(config.max_canvas_height, 2048);
    }

    #[test]
    fn test_run_writes_output_and_report() {
        let tiles = synthetic_tile_dir(8);
        let work = tempfile::tempdir().unwrap();
        let input = work.path().join("in.ppm");
        let output = work.path().join("out.ppm");
        let report = work.path().join("report.json");
        write_ppm(&vertical_split_image(32, 32, 16), &input).unwrap();

        let args = parse(&[
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "3",
            "--contours-dir",
            tiles.path().to_str().unwrap(),
            "--report",
            report.to_str().unwrap(),
        ])
        .unwrap();
        run(&args).unwrap();

        let canvas = read_ppm(&output).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (32, 32));

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
        assert_eq!(json["workers"], 3);
    }

    #[test]
    fn test_missing_tiles_leave_no_output() {
        let work = tempfile::tempdir().unwrap();
        let input = work.path().join("in.ppm");
        let output = work.path().join("out.ppm");
        write_ppm(&solid_image(16, 16, WHITE), &input).unwrap();

        let args = parse(&[
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "1",
            "--contours-dir",
            work.path().join("nowhere").to_str().unwrap(),
        ])
        .unwrap();

        let err = run(&args).unwrap_err();
        assert_eq!(failure_message(&err), "Contour extraction failed");
        assert!(!output.exists());
    }

    #[test]
    fn test_resource_exhaustion_reported_through_context() {
        let failed: std::result::Result<(), ContourError> = Err(ContourError::Allocation {
            what: "canvas",
            bytes: 1 << 40,
        });
        let err = failed.context("failed to start workers").unwrap_err();
        assert_eq!(failure_message(&err), "Out of resources, aborting");

        let err = anyhow::Error::from(ContourError::WorkerPool("no threads".into()));
        assert_eq!(failure_message(&err), "Out of resources, aborting");
    }
}
