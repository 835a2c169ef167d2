//! Locating and loading the layout configuration.
//!
//! A run uses at most one configuration file. [`locate_config`] decides which
//! one, and [`load_config`] reads it and checks that its grid can be built
//! before any events are laid out.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use timegrid::{TimeGridError, config::AppConfig};

/// File name looked up in each configuration directory.
const CONFIG_FILE: &str = "config.toml";

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for TimeGridError {
    fn from(err: ConfigError) -> Self {
        TimeGridError::Config(err.to_string())
    }
}

/// Where the configuration of a run comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path given with `--config`; it must exist.
    Explicit(PathBuf),
    /// `timegrid/config.toml` under the working directory.
    Local(PathBuf),
    /// `config.toml` in the platform configuration directory.
    System(PathBuf),
    /// No file; built-in defaults.
    Default,
}

impl ConfigSource {
    /// Returns the file to read, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(path) | Self::Local(path) | Self::System(path) => Some(path),
            Self::Default => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) => write!(f, "explicit {}", path.display()),
            Self::Local(path) => write!(f, "local {}", path.display()),
            Self::System(path) => write!(f, "system {}", path.display()),
            Self::Default => f.write_str("defaults"),
        }
    }
}

/// Pick the configuration source for a run.
///
/// An explicit path always wins, even if it does not exist. Otherwise the
/// first existing file among `<cwd>/timegrid/config.toml` and the platform
/// configuration directory is used.
pub fn locate_config(explicit_path: Option<&Path>, cwd: &Path) -> ConfigSource {
    if let Some(path) = explicit_path {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    let local = cwd.join("timegrid").join(CONFIG_FILE);
    if local.is_file() {
        return ConfigSource::Local(local);
    }

    match ProjectDirs::from("com", "timegrid", "timegrid") {
        Some(dirs) => {
            let system = dirs.config_dir().join(CONFIG_FILE);
            if system.is_file() {
                return ConfigSource::System(system);
            }
            debug!(path = system.display().to_string(); "No system configuration file");
        }
        None => debug!("Platform configuration directory unavailable"),
    }

    ConfigSource::Default
}

/// Load the configuration for a run and validate its grid.
///
/// # Errors
///
/// Returns [`TimeGridError::Config`] if an explicit file is missing, the
/// file is not valid configuration TOML, or its `[grid]` table describes no
/// usable slats.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, TimeGridError> {
    let explicit_path: Option<&Path> = explicit_path.as_ref().map(|path| path.as_ref());
    let source = locate_config(explicit_path, Path::new("."));
    info!(source:% = source; "Using configuration");

    let config = match source.path() {
        Some(path) => read_config(path)?,
        None => AppConfig::default(),
    };

    config.grid().slat_coords()?;

    Ok(config)
}

fn read_config(path: &Path) -> Result<AppConfig, TimeGridError> {
    if !path.is_file() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    toml::from_str(&content).map_err(|err| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_explicit_config_is_loaded() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[layout]\nresource_columns = true\n\n[grid]\nslat_height = 40.0\n",
        )
        .expect("Failed to write config");

        let config = load_config(Some(&path)).expect("config should load");

        assert!(config.layout().resource_columns());
        assert!(config.grid().slat_coords().is_ok());
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("absent.toml");

        let result = load_config(Some(&path));

        assert!(matches!(result, Err(TimeGridError::Config(msg)) if msg.contains("Missing")));
    }

    #[test]
    fn test_unusable_grid_is_rejected_on_load() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[grid]\nslot_duration_minutes = 0\n").expect("Failed to write config");

        let result = load_config(Some(&path));

        assert!(matches!(result, Err(TimeGridError::Config(_))));
    }

    #[test]
    fn test_explicit_path_wins_even_if_missing() {
        let dir = tempdir().expect("Failed to create temp directory");
        let explicit = dir.path().join("absent.toml");
        fs::create_dir_all(dir.path().join("timegrid")).expect("Failed to create dir");
        fs::write(dir.path().join("timegrid").join(CONFIG_FILE), "").expect("Failed to write");

        let source = locate_config(Some(explicit.as_path()), dir.path());

        assert_eq!(source, ConfigSource::Explicit(explicit));
    }

    #[test]
    fn test_local_config_is_found_under_cwd() {
        let dir = tempdir().expect("Failed to create temp directory");
        let local = dir.path().join("timegrid").join(CONFIG_FILE);
        fs::create_dir_all(dir.path().join("timegrid")).expect("Failed to create dir");
        fs::write(&local, "").expect("Failed to write config");

        let source = locate_config(None, dir.path());

        assert_eq!(source.path(), Some(local.as_path()));
        assert!(source.to_string().starts_with("local "));
    }

    #[test]
    fn test_invalid_config_is_parse_error() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[layout]\nevent_max_stack = \"lots\"\n").expect("Failed to write config");

        let result = load_config(Some(&path));

        assert!(matches!(result, Err(TimeGridError::Config(msg)) if msg.contains("parse")));
    }
}
