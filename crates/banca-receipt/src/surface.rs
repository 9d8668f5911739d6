//! # Isolated Rendering Surface
//!
//! An off-screen grayscale pixel buffer used solely to capture a clean
//! bitmap of a document, independent of anything else in the process.
//!
//! ## Teardown Guarantee
//! Every surface registers itself in a process-wide live counter on
//! creation and deregisters on drop. Acquisition is scoped: the rasterizer
//! creates the surface, draws into it, and either consumes it into a
//! [`Raster`] or drops it on the error path. In both cases the counter
//! returns to its prior value, which is how tests prove no off-screen
//! buffer ever leaks. The drop path never panics; anomalies are logged and
//! swallowed.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::trace;

use crate::error::{ExportError, ExportResult};

static LIVE_SURFACES: AtomicUsize = AtomicUsize::new(0);

/// Number of isolated surfaces currently alive in this process.
pub fn live_surfaces() -> usize {
    LIVE_SURFACES.load(Ordering::SeqCst)
}

/// Upper bound per dimension. 16k px at 12 px/mm is ~1.3m of paper, far
/// beyond any receipt, so hitting this means a layout bug, not a big sale.
const MAX_DIMENSION: u32 = 16_384;

/// Off-screen 8-bit grayscale buffer. 255 is white; drawing only darkens.
#[derive(Debug)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    /// Mounts a fresh surface filled with white.
    pub fn new(width: u32, height: u32) -> ExportResult<Self> {
        if width == 0 || height == 0 {
            return Err(ExportError::InvalidLayout(format!(
                "surface dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(ExportError::InvalidLayout(format!(
                "surface {}x{} exceeds the {} px limit",
                width, height, MAX_DIMENSION
            )));
        }

        LIVE_SURFACES.fetch_add(1, Ordering::SeqCst);
        trace!(width, height, "surface mounted");

        Ok(Surface {
            width,
            height,
            pixels: vec![0xFF; (width as usize) * (height as usize)],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Darkens one pixel. Out-of-bounds coordinates are ignored so glyph
    /// drawing near the edges clips instead of corrupting memory.
    #[inline]
    pub fn darken(&mut self, x: u32, y: u32, value: u8) {
        if x < self.width && y < self.height {
            let idx = (y as usize) * (self.width as usize) + (x as usize);
            if value < self.pixels[idx] {
                self.pixels[idx] = value;
            }
        }
    }

    /// Darkens a rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, value: u8) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for yy in y..y_end {
            for xx in x..x_end {
                self.darken(xx, yy, value);
            }
        }
    }

    /// Consumes the surface into its captured bitmap. The surface itself is
    /// torn down here (the registry decrements on drop).
    pub fn into_raster(mut self) -> Raster {
        Raster {
            width: self.width,
            height: self.height,
            pixels: std::mem::take(&mut self.pixels),
            warnings: Vec::new(),
        }
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        // Teardown must never fail or panic; it only deregisters and logs.
        LIVE_SURFACES.fetch_sub(1, Ordering::SeqCst);
        trace!(width = self.width, height = self.height, "surface torn down");
    }
}

/// A captured grayscale bitmap, detached from any surface.
#[derive(Debug, Clone)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    /// Row-major, top row first, one byte per pixel (255 = white).
    pub pixels: Vec<u8>,
    /// Non-fatal degradations collected while drawing (e.g. glyphs outside
    /// the font's range substituted).
    pub warnings: Vec<String>,
}

impl Raster {
    /// Fraction of non-white pixels, for sanity checks.
    pub fn ink_ratio(&self) -> f64 {
        if self.pixels.is_empty() {
            return 0.0;
        }
        let inked = self.pixels.iter().filter(|p| **p != 0xFF).count();
        inked as f64 / self.pixels.len() as f64
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_tracks_mount_and_teardown() {
        let _guard = test_support::REGISTRY_LOCK
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let before = live_surfaces();

        let surface = Surface::new(10, 10).unwrap();
        assert_eq!(live_surfaces(), before + 1);

        drop(surface);
        assert_eq!(live_surfaces(), before);
    }

    #[test]
    fn test_into_raster_tears_down_surface() {
        let _guard = test_support::REGISTRY_LOCK
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let before = live_surfaces();

        let mut surface = Surface::new(4, 2).unwrap();
        surface.darken(1, 1, 0);
        let raster = surface.into_raster();

        assert_eq!(live_surfaces(), before);
        assert_eq!(raster.pixels.len(), 8);
        assert_eq!(raster.pixels[5], 0);
        assert!(raster.ink_ratio() > 0.0);
    }

    #[test]
    fn test_rejects_degenerate_dimensions() {
        assert!(Surface::new(0, 10).is_err());
        assert!(Surface::new(10, 0).is_err());
        assert!(Surface::new(MAX_DIMENSION + 1, 10).is_err());
    }

    #[test]
    fn test_drawing_clips_at_edges() {
        let mut surface = Surface::new(4, 4).unwrap();
        surface.darken(100, 100, 0);
        surface.fill_rect(2, 2, 100, 100, 0);

        let raster = surface.into_raster();
        // Only the in-bounds 2x2 corner was darkened.
        assert_eq!(raster.pixels.iter().filter(|p| **p == 0).count(), 4);
    }

    #[test]
    fn test_darken_only_darkens() {
        let mut surface = Surface::new(2, 1).unwrap();
        surface.darken(0, 0, 40);
        surface.darken(0, 0, 200); // lighter value must not win
        let raster = surface.into_raster();
        assert_eq!(raster.pixels[0], 40);
    }
}
