// Tracing setup.
// Logs go to a file; stdout and stderr belong to the terminal UI.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::error::{PujiError, Result};

/// Filter directive for the configured level, raised by each `-v`.
///
/// `-v` never lowers a plain level. A configured directive such as
/// `puji=trace` is kept as is unless `-v` is given.
pub fn directive(level: &str, verbose: u8) -> String {
    let requested = match verbose {
        0 => return level.to_string(),
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    match level.parse::<Level>() {
        Ok(configured) => configured.max(requested).as_str().to_lowercase(),
        Err(_) => requested.as_str().to_lowercase(),
    }
}

/// Install the global subscriber writing to `path`. `RUST_LOG` wins over
/// `level` and `verbose`.
pub fn init(path: &Path, level: &str, verbose: u8) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive(level, verbose)))
        .map_err(|e| PujiError::Logging(format!("invalid log level {level:?}: {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| PujiError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_verbosity() {
        assert_eq!(directive("warn", 0), "warn");
        assert_eq!(directive("warn", 1), "debug");
        assert_eq!(directive("warn", 4), "trace");
        assert_eq!(directive("puji=debug", 0), "puji=debug");
    }

    #[test]
    fn test_verbose_never_lowers_configured_level() {
        assert_eq!(directive("trace", 1), "trace");
        assert_eq!(directive("TRACE", 1), "trace");
        assert_eq!(directive("debug", 1), "debug");
        assert_eq!(directive("info", 2), "trace");
    }

    #[test]
    fn test_init_creates_log_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("puji.log");

        // Another test may already own the global subscriber
        let _ = init(&path, "info", 0);
        assert!(path.exists());
    }
}
