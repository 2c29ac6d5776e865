//! Diagnostic sink handed to recipes and to schema extraction.
//!
//! Every message is emitted as a `tracing` event. A sink built with a log
//! path also appends `LEVEL:label:message` lines to that file, for the
//! lifetime of the sink only.

use crate::error::Result;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        };
        f.write_str(s)
    }
}

#[derive(Clone)]
pub struct Diagnostics {
    label: Arc<str>,
    log: Option<(PathBuf, Arc<Mutex<File>>)>,
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("label", &self.label)
            .field("log", &self.log.as_ref().map(|(path, _)| path))
            .finish()
    }
}

impl Diagnostics {
    pub fn new(label: &str) -> Self {
        Self {
            label: Arc::from(label),
            log: None,
        }
    }

    /// A sink that also appends to `path`, creating the file if needed.
    pub fn with_log_file(label: &str, path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            label: Arc::from(label),
            log: Some((path.to_path_buf(), Arc::new(Mutex::new(file)))),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.log.as_ref().map(|(path, _)| path.as_path())
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.emit(Level::Debug, message.as_ref());
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.emit(Level::Info, message.as_ref());
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.emit(Level::Warning, message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.emit(Level::Error, message.as_ref());
    }

    fn emit(&self, level: Level, message: &str) {
        let label = &*self.label;
        match level {
            Level::Debug => tracing::debug!(target: "patchbay", label, "{message}"),
            Level::Info => tracing::info!(target: "patchbay", label, "{message}"),
            Level::Warning => tracing::warn!(target: "patchbay", label, "{message}"),
            Level::Error => tracing::error!(target: "patchbay", label, "{message}"),
        }

        if let Some((path, file)) = &self.log {
            // Losing a diagnostic line must never fail the caller.
            let written = file
                .lock()
                .map_err(|e| e.to_string())
                .and_then(|mut f| writeln!(f, "{level}:{label}:{message}").map_err(|e| e.to_string()));
            if let Err(e) = written {
                tracing::warn!("failed to append to {}: {}", path.display(), e);
            }
        }
    }
}
