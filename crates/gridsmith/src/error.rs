//! Error types for gridsmith

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or saving a workbook
#[derive(Debug, Error)]
pub enum Error {
    /// The in-memory model rejected a cell, merge or sheet name
    #[error(transparent)]
    Core(#[from] gridsmith_core::Error),

    /// Writing the XLSX container failed
    #[cfg(feature = "xlsx")]
    #[error("failed to save {}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: gridsmith_xlsx::XlsxError,
    },

    /// Reading an XLSX file back failed
    #[cfg(feature = "xlsx")]
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: gridsmith_xlsx::XlsxError,
    },

    /// Filesystem error outside the XLSX writer
    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Built without the `xlsx` feature
    #[error("XLSX support is not compiled in (rebuild with `--features xlsx`)")]
    XlsxUnavailable,

    /// Unknown workbook slug
    #[error("unknown workbook '{0}' (expected one of: financial-model, data-analysis, inventory-tracking)")]
    UnknownWorkbook(String),

    /// Builder asked to start above the first row
    #[error("start row must be 1 or greater, got {0}")]
    InvalidStartRow(u32),
}
