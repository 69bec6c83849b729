//! Configuration loading from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::HostConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("config file {} not found: {source}", .path.display())]
    NotFound { path: PathBuf, source: io::Error },

    #[error("cannot read config file {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("cannot parse config file {}: {source}", .path.display())]
    Parse { path: PathBuf, source: ParseError },

    #[error("invalid config file {}: {}", .path.display(), join_errors(.errors))]
    Invalid {
        path: PathBuf,
        errors: Vec<ValidationError>,
    },
}

impl LoadError {
    /// True for the missing/inaccessible source class of failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound { .. } | LoadError::Io { .. })
    }
}

/// Syntactic failure while decoding a document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("document is empty")]
    Empty,

    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// Document syntax, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Toml,
}

impl Format {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Format::Toml,
            _ => Format::Yaml,
        }
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Decode a document without validating it.
pub fn parse_config(content: &str, format: Format) -> Result<HostConfig, ParseError> {
    if content.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let config: HostConfig = match format {
        Format::Yaml => serde_yaml::from_str(content)?,
        Format::Toml => toml::from_str(content)?,
    };
    Ok(config)
}

/// Load and validate configuration from a YAML or TOML file.
///
/// Never touches the live store; publishing is up to the caller.
pub fn load_config(path: &Path) -> Result<HostConfig, LoadError> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => LoadError::NotFound {
            path: path.to_path_buf(),
            source,
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let parse_error = |source: ParseError| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    };
    let content = String::from_utf8(bytes).map_err(|e| parse_error(e.into()))?;
    let config = parse_config(&content, Format::from_path(path)).map_err(parse_error)?;

    validate_config(&config).map_err(|errors| LoadError::Invalid {
        path: path.to_path_buf(),
        errors,
    })?;

    Ok(config)
}
