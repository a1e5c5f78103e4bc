use std::str::FromStr;

use log::{LevelFilter, Metadata, Record, SetLoggerError};

pub const LOG_ENV: &str = "SCHED_MODEL_LOG";

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{} - {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Installs the stderr logger. The level comes from `SCHED_MODEL_LOG`
/// (`off`, `error`, `warn`, `info`, `debug`, `trace`), defaulting to `warn`.
pub fn init() -> Result<(), SetLoggerError> {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|raw| LevelFilter::from_str(&raw).ok())
        .unwrap_or(LevelFilter::Warn);

    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}
