use std::path::PathBuf;

use thiserror::Error;

/// Errors returned while configuring, running or reading back CFinder.
#[derive(Debug, Error)]
pub enum CFinderError {
    /// Bad or conflicting options, or missing environment configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The external tool could not be started or exited unsuccessfully.
    #[error("external tool failed (exit code {}): {}", display_code(.code), .args.join(" "))]
    ExternalTool { code: Option<i32>, args: Vec<String> },

    /// An expected output directory or file is absent.
    #[error("not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// A file's content does not match the shape expected for its kind.
    #[error("format error in {}: {reason}", .path.display())]
    Format { path: PathBuf, reason: String },

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, CFinderError>;

impl CFinderError {
    pub(crate) fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Maps `NotFound` i/o failures onto [`CFinderError::NotFound`].
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "none".to_string(),
    }
}
