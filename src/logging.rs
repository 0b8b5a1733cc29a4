#![cfg(feature = "std")]

use log::{self, LevelFilter, Metadata, Record};
use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

/// Writes records to a file; the terminal itself belongs to the UI.
struct FileLogger {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut sink) = self.sink.lock() {
                let _ = writeln!(sink, "{} - {}", record.level(), record.args());
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            let _ = sink.flush();
        }
    }
}

static LOGGER: OnceLock<FileLogger> = OnceLock::new();

/// Initialize logging with a level taken from the `ARTILLERY_LOG` environment
/// variable, defaulting to `info`. Records go to `log_file`; without one they
/// are discarded.
pub fn init_logging(log_file: Option<&Path>) -> std::io::Result<()> {
    let level = env::var("ARTILLERY_LOG")
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(LevelFilter::Info);
    let (sink, level): (Box<dyn Write + Send>, _) = match log_file {
        Some(path) => (Box::new(File::create(path)?), level),
        None => (Box::new(std::io::sink()), LevelFilter::Off),
    };
    let logger = LOGGER.get_or_init(|| FileLogger { sink: Mutex::new(sink) });
    let _ = log::set_logger(logger).map(|()| log::set_max_level(level));
    Ok(())
}
