//! # Export Error Types
//!
//! Failures in the render → raster → package pipeline. Deliberately separate
//! from checkout errors: by the time an export runs, the sale is already
//! finalized, so nothing here may touch sale state.

use thiserror::Error;

/// Failures in document export or printing.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The document model violated a layout invariant (cell widths, bad
    /// oversampling factor, oversized surface).
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// Rasterization failed.
    #[error("raster failure: {0}")]
    Raster(String),

    /// PDF packaging failed.
    #[error("pdf packaging failure: {0}")]
    Pdf(String),

    /// The platform print facility refused the job.
    #[error("print failure: {0}")]
    Print(String),

    /// Writing the exported file failed.
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for export results.
pub type ExportResult<T> = Result<T, ExportError>;
