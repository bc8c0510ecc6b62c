//! Logging initialization for records_app.
//!
//! The terminal carries the UI, so logs go to `./records.log` unless
//! `RECORDS_LOG` asks for `terminal` or `both`.

use std::fs::File;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{CombinedLogger, Config, SharedLogger, WriteLogger};

pub const LOG_VAR: &str = "RECORDS_LOG";

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to ./records.log in current directory.
    File,
    /// Write to the terminal.
    Terminal,
    /// Write to both file and terminal.
    Both,
}

impl LogDestination {
    pub fn from_env() -> Self {
        Self::parse(std::env::var(LOG_VAR).ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("terminal") => LogDestination::Terminal,
            Some(v) if v.eq_ignore_ascii_case("both") => LogDestination::Both,
            _ => LogDestination::File,
        }
    }
}

/// Initialize the logger with the specified destination.
pub fn initialize(destination: LogDestination) {
    let level = LevelFilter::Info;

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if matches!(destination, LogDestination::Terminal | LogDestination::Both) {
        loggers.push(fetch_logging::terminal_logger(level));
    }
    if matches!(destination, LogDestination::File | LogDestination::Both) {
        if let Some(file_logger) = create_file_logger(level, fetch_logging::build_config()) {
            loggers.push(file_logger);
        }
    }
    if loggers.is_empty() {
        return;
    }

    let _ = CombinedLogger::init(loggers);
}

fn create_file_logger(level: LevelFilter, config: Config) -> Option<Box<WriteLogger<File>>> {
    let log_path = PathBuf::from("./records.log");
    match File::create(&log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_defaults_to_file() {
        assert_eq!(LogDestination::parse(None), LogDestination::File);
        assert_eq!(LogDestination::parse(Some("nonsense")), LogDestination::File);
        assert_eq!(LogDestination::parse(Some(" Terminal ")), LogDestination::Terminal);
        assert_eq!(LogDestination::parse(Some("BOTH")), LogDestination::Both);
    }
}
