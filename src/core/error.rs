//! Purpose: Shared error type for discovery, binding, and file-open failures.
//! Exports: `Error`, `ErrorKind`, `to_exit_code`.
//! Role: Single failure vocabulary for the locator, the bridge, and the CLI.
//! Invariants: Every failure kind maps to the tool's contractual exit code -1.
//! Invariants: "Source absent" discovery failures stay distinct from I/O faults.
use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    /// No usable install location: env var unset, registry key absent, or the
    /// recorded path is not a directory.
    Discovery,
    /// The install directory exists but the core library could not be loaded
    /// or is missing a required entry point.
    Bind,
    /// The library raised a failure while opening the input file.
    Open,
    /// The library recognized no format for the input file.
    UnknownFormat,
    Io,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    path: Option<PathBuf>,
    hint: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            path: None,
            hint: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

/// The bootstrap contract exposes exactly two exit codes: 0 on success, -1 on
/// any failure. Kinds stay distinct in-process; they collapse only here.
pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal
        | ErrorKind::Usage
        | ErrorKind::Discovery
        | ErrorKind::Bind
        | ErrorKind::Open
        | ErrorKind::UnknownFormat
        | ErrorKind::Io => -1,
    }
}
