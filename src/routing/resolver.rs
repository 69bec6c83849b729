//! Host-to-directory resolution.
//!
//! # Responsibilities
//! - Pick the mapped directory for a host, or the default directory
//! - In strict mode, confirm the requested file exists before serving
//! - Treat a directory without `index.html` as missing
//!
//! # Design Decisions
//! - The snapshot is released before any disk I/O
//! - Mapped and default directories go through the same strict checks
//! - Only "does not exist" errors count as missing; anything else is left to
//!   the file responder

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use percent_encoding::percent_decode_str;

use crate::config::ConfigStore;

const INDEX_FILE: &str = "index.html";

/// Where the served directory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorySource {
    /// The host had a mapping.
    Host,
    /// No mapping; the default directory was used.
    Default,
}

impl DirectorySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectorySource::Host => "host",
            DirectorySource::Default => "default",
        }
    }
}

/// Per-request routing decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Hand the request to the file responder rooted at `directory`.
    Serve {
        directory: PathBuf,
        source: DirectorySource,
        /// Whether existence was confirmed on disk first.
        checked: bool,
    },
    /// Strict mode found nothing to serve.
    NotFound { directory: PathBuf },
}

impl Resolution {
    pub fn directory(&self) -> &Path {
        match self {
            Resolution::Serve { directory, .. } | Resolution::NotFound { directory } => directory,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Resolution::NotFound { .. })
    }
}

/// Maps `(host, path)` to a [`Resolution`] using the live config.
#[derive(Debug, Clone)]
pub struct Resolver {
    store: ConfigStore,
    default_dir: Arc<PathBuf>,
    strict: bool,
}

impl Resolver {
    pub fn new(store: ConfigStore, default_dir: impl Into<PathBuf>, strict: bool) -> Self {
        Self {
            store,
            default_dir: Arc::new(default_dir.into()),
            strict,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn default_dir(&self) -> &Path {
        &self.default_dir
    }

    /// Resolve a request. Blocking in strict mode (stats the file system).
    pub fn resolve(&self, host: &str, request_path: &str) -> Resolution {
        let (directory, source) = self.target_directory(host);

        if !self.strict {
            return Resolution::Serve {
                directory,
                source,
                checked: false,
            };
        }

        if exists_for_serving(&directory, request_path) {
            Resolution::Serve {
                directory,
                source,
                checked: true,
            }
        } else {
            Resolution::NotFound { directory }
        }
    }

    fn target_directory(&self, host: &str) -> (PathBuf, DirectorySource) {
        let snapshot = self.store.get();
        match snapshot.directory_for(host) {
            Some(dir) => (dir.to_path_buf(), DirectorySource::Host),
            None => (self.default_dir.to_path_buf(), DirectorySource::Default),
        }
    }
}

/// Join a URL path onto `base`, refusing anything that escapes it.
pub fn disk_path(base: &Path, request_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(request_path).decode_utf8().ok()?;
    let mut path = base.to_path_buf();

    for component in Path::new(decoded.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(path)
}

fn exists_for_serving(base: &Path, request_path: &str) -> bool {
    let Some(path) = disk_path(base, request_path) else {
        return false;
    };

    match fs::metadata(&path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Ok(meta) if meta.is_dir() => match fs::metadata(path.join(INDEX_FILE)) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            _ => true,
        },
        _ => true,
    }
}
