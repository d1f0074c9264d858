//! Diagnostic channel for soft failures.

use crate::Error;
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::path::PathBuf;

/// Kind of soft failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Manifest file or cache directory absent.
    MissingInput,
    /// JSON that fails to parse, or a field of the wrong shape.
    MalformedInput,
    /// A named package absent from the cache.
    LookupMiss,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::MissingInput => "missing-input",
            DiagnosticKind::MalformedInput => "malformed-input",
            DiagnosticKind::LookupMiss => "lookup-miss",
        };
        f.write_str(name)
    }
}

/// A non-fatal problem encountered while building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// What went wrong.
    pub kind: DiagnosticKind,
    /// Human-readable message. Not a stable format.
    pub message: String,
    /// File or directory involved, if any.
    pub path: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a diagnostic without an associated path.
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: None,
        }
    }

    /// Attach the path involved.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Classify an internal error.
    pub fn from_error(error: &Error) -> Self {
        match error {
            Error::ManifestNotFound(path) | Error::CacheNotFound(path) => {
                Self::new(DiagnosticKind::MissingInput, error.to_string()).with_path(path)
            }
            Error::Json { file, .. } | Error::InvalidFormat(file, _) => {
                Self::new(DiagnosticKind::MalformedInput, error.to_string()).with_path(file)
            }
            Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Self::new(DiagnosticKind::MissingInput, error.to_string())
            }
            Error::Io(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                Self::new(DiagnosticKind::MalformedInput, error.to_string())
            }
            Error::Io(_) | Error::Other(_) => {
                Self::new(DiagnosticKind::MissingInput, error.to_string())
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Receiver of diagnostics.
pub trait DiagnosticSink {
    /// Record one diagnostic.
    fn report(&self, diagnostic: Diagnostic);
}

/// Emits every diagnostic as a `tracing` warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        tracing::warn!(
            kind = %diagnostic.kind,
            path = ?diagnostic.path,
            "{}",
            diagnostic.message
        );
    }
}

/// Keeps diagnostics in memory and forwards them to `tracing`.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl CollectingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Number of diagnostics reported so far.
    pub fn len(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    /// Whether nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }

    /// Drain all diagnostics.
    pub fn take(&self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        TracingSink.report(diagnostic.clone());
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}
