// Filesystem locations.
// Resolves the config file and log file under the platform's project directories.

use std::path::PathBuf;

use directories::ProjectDirs;

const APP_NAME: &str = "puji";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

/// Base config directory (~/.config/puji on Linux).
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Path to the settings file.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Base data directory (~/.local/share/puji on Linux).
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Default log file. The terminal belongs to the UI, so logs go here.
pub fn log_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(format!("{}.log", APP_NAME)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        // Path construction only, nothing touches the filesystem
        let config = config_path().unwrap();
        assert!(config.ends_with("config.toml"));
        assert!(config.starts_with(config_dir().unwrap()));

        let log = log_path().unwrap();
        assert!(log.ends_with("puji.log"));
        assert!(log.starts_with(data_dir().unwrap()));
    }
}
