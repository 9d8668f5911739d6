//! # banca-receipt: Document Rendering & Export
//!
//! Renders a finalized [`Sale`](banca_core::Sale) into two layouts and
//! delivers them as a print job or a downloadable PDF.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Sale + SettingsMap                                                    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   ReceiptData::prepare ── one shared step: merchant defaults,           │
//! │        │                  currency strings, payment labels, dates       │
//! │        ├────────────────┬──────────────────────────────                 │
//! │        ▼                ▼                                               │
//! │   thermal layout     A4 layout        (line/cell document model)        │
//! │        │                │                                               │
//! │        ├── to_html ─────┤──────────► PrintTarget (platform print)       │
//! │        │                │                                               │
//! │        ▼                ▼                                               │
//! │   Surface (isolated, registered) ◄── rasterize @ OVERSAMPLE             │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   package_pdf ──► PdfExport { recibo-<id8>.pdf / fatura-<id8>.pdf }     │
//! │                                                                         │
//! │   Surface teardown is guaranteed on every exit path (RAII), and the     │
//! │   live-surface registry makes leaks observable in tests.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering is a pure function of its inputs: no hidden state, no ambient
//! styling, no clock reads. Export failures surface as [`ExportError`] and
//! never affect the already-finalized sale.

pub mod a4;
pub mod document;
pub mod error;
pub mod export;
pub mod font;
pub mod html;
pub mod pdf;
pub mod raster;
pub mod surface;
pub mod thermal;

pub use document::{render, DocumentKind, ReceiptData, RenderedDocument};
pub use error::ExportError;
pub use export::{export_pdf, PdfExport, OVERSAMPLE};
pub use html::{print_document, to_html, PrintJob, PrintTarget};
pub use surface::{live_surfaces, Surface};
