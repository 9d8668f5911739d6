//! # Export Pipeline
//!
//! The full delivery path for a finalized sale:
//!
//! render layout → mount isolated surface → rasterize at [`OVERSAMPLE`] →
//! size the page from the document kind → package a single-page PDF →
//! name the file deterministically from the sale id.
//!
//! Thermal exports are 80mm wide with height proportional to content
//! (minimum 100mm); A4 exports are a fixed 210x297mm page. A failure at any
//! stage surfaces as [`ExportError`](crate::ExportError), distinct from
//! checkout errors and harmless to the already-finalized sale, and the
//! isolated surface is torn down regardless.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use banca_core::{Sale, SettingsMap};

use crate::document::{render, short_id, DocumentKind};
use crate::error::ExportResult;
use crate::pdf::package_pdf;
use crate::raster::{rasterize, PX_PER_MM};

/// Fixed oversampling factor for PDF exports (≈300 dpi).
pub const OVERSAMPLE: u32 = 3;

/// A packaged PDF ready for download.
#[derive(Debug, Clone)]
pub struct PdfExport {
    /// Deterministic name: `recibo-<id8>.pdf` / `fatura-<id8>.pdf`.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PdfExport {
    /// Writes the file into `dir` under its deterministic name.
    pub fn save_to(&self, dir: &Path) -> ExportResult<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        info!(path = %path.display(), bytes = self.bytes.len(), "pdf saved");
        Ok(path)
    }
}

/// Exports one layout of a sale as a single-page PDF.
pub fn export_pdf(
    kind: DocumentKind,
    sale: &Sale,
    settings: &SettingsMap,
) -> ExportResult<PdfExport> {
    let doc = render(kind, Some(sale), settings);

    // The surface lives entirely inside `rasterize`: mounted there, consumed
    // into the bitmap on success, dropped on failure.
    let raster = rasterize(&doc, OVERSAMPLE)?;
    for warning in &raster.warnings {
        debug!(kind = ?kind, warning = %warning, "raster degradation");
    }

    let bytes = package_pdf(&raster, PX_PER_MM * OVERSAMPLE)?;
    let file_name = format!("{}-{}.pdf", kind.file_prefix(), short_id(&sale.id));

    info!(
        file = %file_name,
        width_px = raster.width,
        height_px = raster.height,
        bytes = bytes.len(),
        "pdf export ready"
    );

    Ok(PdfExport { file_name, bytes })
}
