//! # PDF Packaging
//!
//! Assembles a single-page PDF embedding a grayscale raster as an image
//! XObject. Written directly against the PDF 1.4 object model; a full
//! generation library would be overkill for one page with one image.
//!
//! ## Layout
//! The page's media box matches the raster's physical size exactly, and the
//! image is scaled to fill it, so 1 raster pixel maps to 1/px_per_mm of
//! paper. Pixels are 8-bit DeviceGray, top row first, exactly as the
//! surface captured them (PDF images draw their first sample row at the top
//! of the placement rectangle).

use crate::error::{ExportError, ExportResult};
use crate::surface::Raster;

const MM_TO_PT: f64 = 72.0 / 25.4;

/// Packages a raster into a single-page PDF sized `raster / px_per_mm`
/// millimetres.
pub fn package_pdf(raster: &Raster, px_per_mm: u32) -> ExportResult<Vec<u8>> {
    if raster.width == 0 || raster.height == 0 || raster.pixels.is_empty() {
        return Err(ExportError::Pdf("empty raster".to_string()));
    }
    if raster.pixels.len() != (raster.width as usize) * (raster.height as usize) {
        return Err(ExportError::Pdf(format!(
            "raster buffer is {} bytes, expected {}",
            raster.pixels.len(),
            raster.width as usize * raster.height as usize
        )));
    }
    if px_per_mm == 0 {
        return Err(ExportError::Pdf("pixel density must be positive".to_string()));
    }

    let page_w_pt = raster.width as f64 / px_per_mm as f64 * MM_TO_PT;
    let page_h_pt = raster.height as f64 / px_per_mm as f64 * MM_TO_PT;

    let mut writer = PdfWriter::new();

    writer.object(1, b"<< /Type /Catalog /Pages 2 0 R >>");
    writer.object(2, b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>");
    writer.object(
        3,
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
             /Resources << /ProcSet [/PDF /ImageB] /XObject << /Im0 5 0 R >> >> \
             /Contents 4 0 R >>",
            page_w_pt, page_h_pt
        )
        .as_bytes(),
    );

    let content = format!(
        "q\n{:.2} 0 0 {:.2} 0 0 cm\n/Im0 Do\nQ\n",
        page_w_pt, page_h_pt
    );
    writer.stream_object(4, b"", content.as_bytes());

    let image_dict = format!(
        "/Type /XObject /Subtype /Image /Width {} /Height {} \
         /ColorSpace /DeviceGray /BitsPerComponent 8",
        raster.width, raster.height
    );
    writer.stream_object(5, image_dict.as_bytes(), &raster.pixels);

    Ok(writer.finish(1))
}

/// Byte-level PDF writer tracking object offsets for the xref table.
struct PdfWriter {
    buf: Vec<u8>,
    /// Offset of each object, indexed by object id (0 unused).
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"%PDF-1.4\n");
        // Binary-content marker recommended for files carrying image data.
        buf.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");
        PdfWriter {
            buf,
            offsets: vec![0],
        }
    }

    fn begin_object(&mut self, id: usize) {
        debug_assert_eq!(id, self.offsets.len());
        self.offsets.push(self.buf.len());
        self.buf.extend_from_slice(format!("{} 0 obj\n", id).as_bytes());
    }

    fn object(&mut self, id: usize, body: &[u8]) {
        self.begin_object(id);
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
    }

    fn stream_object(&mut self, id: usize, dict_extra: &[u8], data: &[u8]) {
        self.begin_object(id);
        self.buf.extend_from_slice(b"<< ");
        if !dict_extra.is_empty() {
            self.buf.extend_from_slice(dict_extra);
            self.buf.push(b' ');
        }
        self.buf
            .extend_from_slice(format!("/Length {} >>\nstream\n", data.len()).as_bytes());
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\nendstream\nendobj\n");
    }

    fn finish(mut self, root_id: usize) -> Vec<u8> {
        let xref_offset = self.buf.len();
        let count = self.offsets.len();

        self.buf
            .extend_from_slice(format!("xref\n0 {}\n", count).as_bytes());
        self.buf.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &self.offsets[1..] {
            self.buf
                .extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }

        self.buf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root {} 0 R >>\nstartxref\n{}\n%%EOF\n",
                count, root_id, xref_offset
            )
            .as_bytes(),
        );
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster(width: u32, height: u32) -> Raster {
        Raster {
            width,
            height,
            pixels: vec![0xFF; (width * height) as usize],
            warnings: Vec::new(),
        }
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack
            .windows(needle.len())
            .position(|window| window == needle)
    }

    #[test]
    fn test_header_and_eof() {
        let pdf = package_pdf(&raster(96, 120), 12).unwrap();
        assert!(pdf.starts_with(b"%PDF-1.4\n"));
        assert!(pdf.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn test_media_box_matches_physical_size() {
        // 960x1200 px at 12 px/mm = 80x100 mm = 226.77 x 283.46 pt.
        let pdf = package_pdf(&raster(960, 1200), 12).unwrap();
        assert!(find(&pdf, b"/MediaBox [0 0 226.77 283.46]").is_some());
        assert!(find(&pdf, b"/Width 960").is_some());
        assert!(find(&pdf, b"/Height 1200").is_some());
        assert!(find(&pdf, b"/ColorSpace /DeviceGray").is_some());
    }

    #[test]
    fn test_image_stream_length_and_payload() {
        let mut r = raster(4, 2);
        r.pixels = vec![0, 64, 128, 192, 255, 1, 2, 3];
        let pdf = package_pdf(&r, 4).unwrap();

        assert!(find(&pdf, b"/Length 8 >>").is_some());
        assert!(find(&pdf, &r.pixels).is_some());
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let pdf = package_pdf(&raster(8, 8), 4).unwrap();

        // startxref points at the xref table...
        let sx = find(&pdf, b"startxref\n").unwrap() + "startxref\n".len();
        let rest = std::str::from_utf8(&pdf[sx..]).unwrap();
        let xref_offset: usize = rest.lines().next().unwrap().parse().unwrap();
        assert!(pdf[xref_offset..].starts_with(b"xref\n"));

        // ...and each in-use entry points at its object header.
        let table = std::str::from_utf8(&pdf[xref_offset..]).unwrap();
        for (i, line) in table.lines().skip(3).take(5).enumerate() {
            let offset: usize = line[..10].parse().unwrap();
            let expected = format!("{} 0 obj", i + 1);
            assert!(
                pdf[offset..].starts_with(expected.as_bytes()),
                "object {} offset mismatch",
                i + 1
            );
        }
    }

    #[test]
    fn test_rejects_inconsistent_raster() {
        let mut bad = raster(4, 4);
        bad.pixels.truncate(3);
        assert!(matches!(
            package_pdf(&bad, 4),
            Err(ExportError::Pdf(_))
        ));

        assert!(package_pdf(&raster(0, 4), 4).is_err());
        assert!(package_pdf(&raster(4, 4), 0).is_err());
    }
}
