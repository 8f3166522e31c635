use crate::config::schema::{PdfModConfig, ValidationError};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "pdfmod.toml";

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// No file; built-in defaults.
    Defaults,
    /// `pdfmod.toml` found in the working directory.
    Discovered(PathBuf),
    /// Path given with `--config`.
    Explicit(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Defaults => f.write_str("built-in defaults"),
            ConfigSource::Discovered(path) => write!(f, "{} (discovered)", path.display()),
            ConfigSource::Explicit(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML{}: {source}", origin(.path))]
    Toml {
        path: Option<PathBuf>,
        #[source]
        source: toml_edit::de::Error,
    },

    #[error("invalid config{}: {source}", origin(.path))]
    Validation {
        path: Option<PathBuf>,
        #[source]
        source: ValidationError,
    },
}

fn origin(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" ({})", p.display()))
        .unwrap_or_default()
}

impl ConfigError {
    /// Path of the offending file, when the input came from disk.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Io { path, .. } => Some(path),
            ConfigError::Toml { path, .. } | ConfigError::Validation { path, .. } => {
                path.as_deref()
            }
        }
    }

    fn at(mut self, file: &Path) -> Self {
        if let ConfigError::Toml { path, .. } | ConfigError::Validation { path, .. } = &mut self {
            path.get_or_insert_with(|| file.to_path_buf());
        }
        self
    }
}

/// Parse and validate configuration text.
pub fn load_from_str(input: &str) -> Result<PdfModConfig, ConfigError> {
    let config: PdfModConfig = toml_edit::de::from_str(input)
        .map_err(|source| ConfigError::Toml { path: None, source })?;
    config
        .validate()
        .map_err(|source| ConfigError::Validation { path: None, source })?;
    Ok(config)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<PdfModConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents).map_err(|error| error.at(path))
}

/// Load `explicit` if given, else `<dir>/pdfmod.toml` if present, else defaults.
///
/// An explicit path must exist; a missing discovered file is not an error.
pub fn load_or_default(
    explicit: Option<&Path>,
    dir: &Path,
) -> Result<(PdfModConfig, ConfigSource), ConfigError> {
    let source = match explicit {
        Some(path) => ConfigSource::Explicit(path.to_path_buf()),
        None => {
            let candidate = dir.join(DEFAULT_CONFIG_FILE);
            if candidate.is_file() {
                ConfigSource::Discovered(candidate)
            } else {
                ConfigSource::Defaults
            }
        }
    };

    let config = match &source {
        ConfigSource::Defaults => PdfModConfig::default(),
        ConfigSource::Discovered(path) | ConfigSource::Explicit(path) => load_from_path(path)?,
    };
    debug!(source = %source, "configuration loaded");
    Ok((config, source))
}
