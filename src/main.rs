// puji: terminal health-monitoring dashboard.
// Parses arguments, loads settings and fixtures, then runs the TUI.

mod app;
mod config;
mod error;
mod fixtures;
mod logging;
mod state;
mod ui;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use crate::app::{App, Tab};
use crate::config::{Settings, paths};
use crate::error::{PujiError, Result};

/// Health-monitoring dashboard with simulated vitals, sleep and TCM data.
#[derive(Parser, Debug)]
#[command(name = "puji", version, about)]
struct Args {
    /// Settings file [default: <config dir>/puji/config.toml]
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON file replacing the built-in mock data
    #[arg(long, value_name = "PATH")]
    fixtures: Option<PathBuf>,

    /// Tab shown at startup
    #[arg(long, value_enum)]
    tab: Option<Tab>,

    /// Log file [default: <data dir>/puji/puji.log]
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("puji: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_settings(args: &Args) -> Result<Settings> {
    let settings = match &args.config {
        Some(path) if !path.exists() => {
            return Err(PujiError::Config {
                path: path.clone(),
                message: "file not found".to_string(),
            });
        }
        Some(path) => Settings::load(path)?,
        None => match paths::config_path() {
            Some(path) => Settings::load(&path)?,
            None => Settings::default(),
        },
    };
    Ok(settings.with_overrides(args.tab, args.fixtures.clone()))
}

fn run(args: Args) -> Result<()> {
    let settings = load_settings(&args)?;

    let log_path = args
        .log_file
        .clone()
        .or_else(paths::log_path)
        .ok_or_else(|| PujiError::Logging("no data directory for the log file".to_string()))?;
    logging::init(&log_path, &settings.log_level, args.verbose)?;

    let fixtures = fixtures::load(settings.fixtures.as_deref())?;
    info!(log = %log_path.display(), tab = ?settings.default_tab, "puji starting");

    // Restore the terminal before printing a panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let mut app = App::new(settings, fixtures, Instant::now());
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.map_err(PujiError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "puji", "--tab", "tcm", "--fixtures", "data.json", "-vv",
        ])
        .unwrap();
        assert_eq!(args.tab, Some(Tab::Tcm));
        assert_eq!(args.fixtures, Some(PathBuf::from("data.json")));
        assert_eq!(args.verbose, 2);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_unknown_tab_rejected() {
        assert!(Args::try_parse_from(["puji", "--tab", "settings"]).is_err());
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_tab = \"monitor\"\ntransition_ms = 50\n").unwrap();

        let args = Args::try_parse_from([
            "puji",
            "--config",
            path.to_str().unwrap(),
            "--tab",
            "profile",
        ])
        .unwrap();
        let settings = load_settings(&args).unwrap();
        assert_eq!(settings.default_tab, Tab::Profile);
        assert_eq!(settings.transition_ms, 50);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let args = Args::try_parse_from(["puji", "--config", "/nonexistent/puji.toml"]).unwrap();
        assert!(matches!(
            load_settings(&args),
            Err(PujiError::Config { .. })
        ));
    }
}
