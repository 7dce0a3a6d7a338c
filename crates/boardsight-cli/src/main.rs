use std::path::{Path, PathBuf};
use std::process::ExitCode;

use boardsight::io::{FrameInput, FrameReport, IoError};
use boardsight::{any_overlap, BoardReader, BoundingBox, ParamsError};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, LevelFilter};
use nalgebra::Point2;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "boardsight", version, about = "Read chessboard occupancy from frame JSON")]
struct Cli {
    /// Log verbosity on stderr.
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read the board from a frame file and print its rows and placement.
    Read {
        frame: PathBuf,
        /// Also write a JSON report here.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the grid-line intersections and outer border of a frame as JSON.
    Grid { frame: PathBuf },
    /// Print whether any of the given `x1,y1,x2,y2` boxes overlap.
    Overlap {
        #[arg(required = true, value_parser = parse_box)]
        boxes: Vec<BoundingBox>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid params: {0}")]
    Params(#[from] ParamsError),
}

fn parse_box(s: &str) -> Result<BoundingBox, String> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<f32>().map_err(|e| format!("{v:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match values[..] {
        [x1, y1, x2, y2] => Ok(BoundingBox::new(x1, y1, x2, y2)),
        _ => Err(format!("expected x1,y1,x2,y2, got {s:?}")),
    }
}

/// Exit status for a frame that produced no board.
const EXIT_NO_BOARD: u8 = 1;
/// Exit status for a frame that broke the input contract.
const EXIT_BAD_INPUT: u8 = 2;

fn run_read(frame_path: &Path, output: Option<&Path>) -> Result<ExitCode, CliError> {
    let frame = FrameInput::load_json(frame_path)?;
    let reader = BoardReader::new(frame.params.clone())?;
    let mut report = FrameReport::new(&frame, frame_path);

    let code = match reader.read(&frame.corner_points(), &frame.detections) {
        Ok(reading) => {
            println!("{}", reading.board);
            println!("{}", reading.board.fen_placement());
            report.set_reading(&reading);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("no board available: {err}");
            report.set_error(&err);
            if err.is_transient() {
                ExitCode::from(EXIT_NO_BOARD)
            } else {
                ExitCode::from(EXIT_BAD_INPUT)
            }
        }
    };

    if let Some(path) = output {
        report.write_json(path)?;
        info!("wrote report to {}", path.display());
    }
    Ok(code)
}

#[derive(Serialize)]
struct GridOutput<'a> {
    points: &'a [Vec<Point2<f32>>],
    border: Option<[Point2<f32>; 4]>,
}

fn run_grid(frame_path: &Path) -> Result<ExitCode, CliError> {
    let frame = FrameInput::load_json(frame_path)?;
    let reader = BoardReader::new(frame.params.clone())?;
    match reader.geometry(&frame.corner_points()) {
        Ok(geometry) => {
            let out = GridOutput {
                points: geometry.grid.rows(),
                border: geometry.grid.border(),
            };
            println!("{}", serde_json::to_string(&out)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("no board available: {err}");
            Ok(ExitCode::from(EXIT_NO_BOARD))
        }
    }
}

#[cfg(feature = "tracing")]
fn init_logging(_level: LogLevel) {
    // BOARDSIGHT_LOG / RUST_LOG drive the tracing subscriber.
    boardsight_core::init_tracing(false);
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: LogLevel) {
    if let Err(err) = boardsight_core::init_with_level(level.into()) {
        eprintln!("logger init failed: {err}");
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let result = match &cli.command {
        Command::Read { frame, output } => run_read(frame, output.as_deref()),
        Command::Grid { frame } => run_grid(frame),
        Command::Overlap { boxes } => {
            println!("{}", any_overlap(boxes));
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(EXIT_BAD_INPUT)
        }
    }
}
