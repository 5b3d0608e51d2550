//! JSON-lines file logger.
//!
//! The terminal is owned by the alternate screen while playing, so log
//! records go to a file instead of stderr.

use clap::ValueEnum;
use log::{LevelFilter, Log, Metadata, Record};
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Verbosity accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Serialize)]
struct LogLine<'a> {
    ts_ms: u128,
    level: &'a str,
    target: &'a str,
    message: String,
}

pub struct FileLogger {
    level: LevelFilter,
    writer: Mutex<BufWriter<File>>,
}

impl FileLogger {
    pub fn open(path: &Path, level: LevelFilter) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            level,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    fn format(record: &Record) -> Option<String> {
        let line = LogLine {
            ts_ms: current_ms(),
            level: record.level().as_str(),
            target: record.target(),
            message: record.args().to_string(),
        };
        serde_json::to_string(&line).ok()
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Some(line) = Self::format(record) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }

    fn flush(&self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

/// Install the file logger as the global `log` backend
pub fn init(path: &Path, level: LogLevel) -> io::Result<()> {
    let filter = LevelFilter::from(level);
    if filter == LevelFilter::Off {
        return Ok(());
    }
    let logger = FileLogger::open(path, filter)?;
    log::set_logger(Box::leak(Box::new(logger)))
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    log::set_max_level(filter);
    Ok(())
}

fn current_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
