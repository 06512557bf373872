use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use crate::config::Config;

/// Read-only state shared by every handler.
///
/// Built once at startup and handed to connections behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RouteContext {
    /// Root for /files/ reads and writes
    pub base_dir: PathBuf,
    /// Upper bound on a single file operation
    pub io_timeout: Duration,
}

impl RouteContext {
    pub fn new(base_dir: impl Into<PathBuf>, io_timeout: Duration) -> Self {
        Self {
            base_dir: base_dir.into(),
            io_timeout,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.files.directory.clone(), cfg.io_timeout())
    }

    /// Joins a client-supplied file name onto the base directory.
    ///
    /// Empty and `.` segments are dropped. Names containing `..`, or that
    /// are empty once cleaned, are rejected so every resolved path stays
    /// under `base_dir`.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let mut relative = PathBuf::new();

        for segment in name.split('/') {
            if segment.is_empty() || segment == "." {
                continue;
            }
            if segment == ".." || segment.contains('\\') {
                return None;
            }

            // A segment may still parse as a prefix or root on some platforms.
            match Path::new(segment).components().next() {
                Some(Component::Normal(_)) => relative.push(segment),
                _ => return None,
            }
        }

        if relative.as_os_str().is_empty() {
            return None;
        }

        Some(self.base_dir.join(relative))
    }
}
