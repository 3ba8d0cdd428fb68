//! Logging setup
//!
//! Everything logs through the `log` facade. CLI commands write to stderr;
//! the TUI owns the terminal, so it logs to a file in the data directory.
//! `RUST_LOG` overrides the configured level.

use std::fs::OpenOptions;
use std::path::Path;

use log::LevelFilter;

use crate::error::{DashError, DashResult};

/// Level from the `-v` count, falling back to the configured one
pub fn resolve_level(configured: &str, verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => configured.parse().unwrap_or(LevelFilter::Info),
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn builder(level: LevelFilter) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    // quieten the HTTP stack unless asked for explicitly
    builder.filter_module("reqwest", LevelFilter::Warn);
    builder.filter_module("hyper", LevelFilter::Warn);
    builder.parse_env("RUST_LOG");
    builder
}

/// Log to stderr
pub fn init_stderr(level: LevelFilter) {
    let _ = builder(level).format_timestamp(None).try_init();
}

/// Log to `path`, appending
pub fn init_file(path: &Path, level: LevelFilter) -> DashResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| DashError::Io(format!("Failed to open log file {}: {}", path.display(), e)))?;

    let _ = builder(level)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_level() {
        assert_eq!(resolve_level("warn", 0), LevelFilter::Warn);
        assert_eq!(resolve_level("nonsense", 0), LevelFilter::Info);
        assert_eq!(resolve_level("warn", 1), LevelFilter::Debug);
        assert_eq!(resolve_level("warn", 3), LevelFilter::Trace);
    }
}
