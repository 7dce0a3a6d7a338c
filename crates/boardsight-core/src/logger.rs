//! Stderr logging for the `boardsight` binaries.
//!
//! Lines look like `[  0.012s DEBUG pipeline] message`, with the elapsed time
//! since the logger was installed and the module path below the crate root.
//! Only `boardsight*` targets follow the requested level; everything else is
//! capped at `warn` so a `--log-level trace` run stays about frames, not
//! about dependencies. Libraries use the `log` macros and never install a
//! logger themselves.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, fmt::format::FmtSpan, util::SubscriberInitExt, EnvFilter};

const OWN_TARGET: &str = "boardsight";

/// Env var read by [`init_tracing`] before falling back to `RUST_LOG`.
#[cfg(feature = "tracing")]
pub const LOG_ENV: &str = "BOARDSIGHT_LOG";

struct FrameLogger {
    own: LevelFilter,
    foreign: LevelFilter,
    started: Instant,
}

impl FrameLogger {
    fn new(level: LevelFilter) -> Self {
        Self {
            own: level,
            foreign: level.min(LevelFilter::Warn),
            started: Instant::now(),
        }
    }

    fn filter_for(&self, target: &str) -> LevelFilter {
        if target.starts_with(OWN_TARGET) {
            self.own
        } else {
            self.foreign
        }
    }
}

/// `boardsight::pipeline` -> `pipeline`, `boardsight_core::grid` -> `grid`.
fn short_target(target: &str) -> &str {
    match target.split_once("::") {
        Some((krate, rest)) if krate.starts_with(OWN_TARGET) => rest,
        _ => target,
    }
}

impl Log for FrameLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter_for(metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{:7.3}s {:>5} {}] {}\n",
            self.started.elapsed().as_secs_f64(),
            record.level(),
            short_target(record.target()),
            record.args()
        );
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<FrameLogger> = OnceLock::new();

/// Install the stderr logger; later calls keep the first level.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let mut installed_now = false;
    let logger = LOGGER.get_or_init(|| {
        installed_now = true;
        FrameLogger::new(level)
    });
    if installed_now {
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Install a `tracing` subscriber with span-close timings.
///
/// The filter comes from [`LOG_ENV`], then `RUST_LOG`, then defaults to
/// `boardsight=info,boardsight_core=info,warn`. `json` switches to one flat
/// JSON object per event.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("boardsight=info,boardsight_core=info,warn"));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder.with_target(false).finish().try_init()
    };
}
