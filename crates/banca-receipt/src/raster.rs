//! # Document Rasterizer
//!
//! Draws a [`RenderedDocument`] into an isolated [`Surface`] with the
//! embedded 5×7 font, at a fixed oversampling factor for print-quality
//! sharpness.
//!
//! ## Geometry
//! Base density is [`PX_PER_MM`] (≈100 dpi); the default oversampling factor
//! of 3 yields ≈300 dpi. Text sizes scale the glyph pixel: a Normal
//! character cell is 1.5mm wide, Large 3mm, Title 4.5mm, close to what the
//! 12px/14px/18px styles of the HTML path produce on paper.
//!
//! ## Failure & Teardown
//! Layout violations (cell widths over budget) abort with an error. The
//! surface is owned by this function, so every exit path (success via
//! `into_raster`, failure via early return) tears it down; the registry in
//! [`crate::surface`] proves it.

use crate::document::{Align, Cell, DocLine, DocumentKind, RenderedDocument, TextSize};
use crate::error::{ExportError, ExportResult};
use crate::font::glyph_for;
use crate::surface::{Raster, Surface};

/// Base pixel density before oversampling.
pub const PX_PER_MM: u32 = 4;

/// Minimum height of a thermal export. Shorter receipts are padded with
/// white so the output never degenerates into a sliver.
pub const THERMAL_MIN_HEIGHT_MM: u32 = 100;

const fn size_scale(size: TextSize) -> u32 {
    match size {
        TextSize::Normal => 1,
        TextSize::Large => 2,
        TextSize::Title => 3,
    }
}

const fn margin_mm(kind: DocumentKind) -> u32 {
    match kind {
        DocumentKind::Thermal => 4,
        DocumentKind::A4 => 10,
    }
}

/// Rasterizes a document into a grayscale bitmap.
pub fn rasterize(doc: &RenderedDocument, oversample: u32) -> ExportResult<Raster> {
    if !(1..=8).contains(&oversample) {
        return Err(ExportError::InvalidLayout(format!(
            "oversampling factor must be between 1 and 8, got {}",
            oversample
        )));
    }

    let px_per_mm = PX_PER_MM * oversample;
    let width = doc.kind.width_mm() * px_per_mm;
    let margin = margin_mm(doc.kind) * px_per_mm;
    let content_w = width - 2 * margin;

    let advance = |line: &DocLine| -> u32 {
        match line {
            DocLine::Blank => 10 * oversample,
            DocLine::Rule { .. } => 4 * oversample,
            DocLine::Row { size, .. } => 10 * oversample * size_scale(*size),
        }
    };

    // Height pre-pass: thermal grows with content (padded to the minimum),
    // A4 is a fixed page that clips overflow.
    let content_h: u32 = doc.lines().iter().map(advance).sum();
    let height = match doc.kind {
        DocumentKind::Thermal => (content_h + 2 * margin).max(THERMAL_MIN_HEIGHT_MM * px_per_mm),
        DocumentKind::A4 => 297 * px_per_mm,
    };

    let mut surface = Surface::new(width, height)?;
    let mut warnings = Vec::new();

    let mut y = margin;
    for line in doc.lines() {
        if y + advance(line) + margin > height {
            warnings.push("content exceeds the page; remainder clipped".to_string());
            break;
        }

        match line {
            DocLine::Blank => {}
            DocLine::Rule { dashed } => {
                draw_rule(&mut surface, margin, y, content_w, *dashed, oversample)
            }
            DocLine::Row { cells, size } => {
                let budget: u32 = cells.iter().map(|c| c.width as u32).sum();
                if budget > 100 {
                    // Error path: `surface` drops here, so the isolated
                    // buffer is torn down even though the export failed.
                    return Err(ExportError::InvalidLayout(format!(
                        "row cell widths sum to {}%",
                        budget
                    )));
                }

                let p = oversample * size_scale(*size);
                let mut x = margin;
                for cell in cells {
                    let region_w = content_w * cell.width as u32 / 100;
                    draw_text(&mut surface, cell, x, y, region_w, p, &mut warnings);
                    x += region_w;
                }
            }
        }
        y += advance(line);
    }

    let mut raster = surface.into_raster();
    raster.warnings = warnings;
    Ok(raster)
}

fn draw_text(
    surface: &mut Surface,
    cell: &Cell,
    x0: u32,
    y0: u32,
    region_w: u32,
    p: u32,
    warnings: &mut Vec<String>,
) {
    let char_advance = 6 * p;
    let max_chars = (region_w / char_advance) as usize;
    if max_chars == 0 {
        if !cell.text.is_empty() {
            warnings.push(format!("cell too narrow for '{}'", cell.text));
        }
        return;
    }

    let chars: Vec<char> = cell.text.chars().collect();
    if chars.len() > max_chars {
        warnings.push(format!(
            "truncated '{}' to {} characters",
            cell.text, max_chars
        ));
    }
    let visible = &chars[..chars.len().min(max_chars)];

    let text_w = visible.len() as u32 * char_advance;
    let x_start = match cell.align {
        Align::Left => x0,
        Align::Center => x0 + (region_w - text_w) / 2,
        Align::Right => x0 + region_w - text_w,
    };

    for (i, c) in visible.iter().enumerate() {
        let (glyph, substituted) = glyph_for(*c);
        if substituted {
            let note = format!("no glyph for {:?}, substituted '?'", c);
            if !warnings.contains(&note) {
                warnings.push(note);
            }
        }

        let gx = x_start + i as u32 * char_advance;
        for (col, bits) in glyph.iter().enumerate() {
            for row in 0..7u32 {
                if bits >> row & 1 == 1 {
                    let px = gx + col as u32 * p;
                    let py = y0 + row * p;
                    surface.fill_rect(px, py, p, p, 0x00);
                    if cell.bold {
                        // Double-strike with a half-pixel offset.
                        surface.fill_rect(px + (p / 2).max(1), py, p, p, 0x00);
                    }
                }
            }
        }
    }
}

fn draw_rule(surface: &mut Surface, x0: u32, y: u32, w: u32, dashed: bool, oversample: u32) {
    let thickness = oversample.max(1);
    let y_line = y + oversample;

    if !dashed {
        surface.fill_rect(x0, y_line, w, thickness, 0x00);
        return;
    }

    let on = 6 * oversample;
    let off = 4 * oversample;
    let mut x = x0;
    while x < x0 + w {
        let segment = on.min(x0 + w - x);
        surface.fill_rect(x, y_line, segment, thickness, 0x00);
        x += on + off;
    }
}
