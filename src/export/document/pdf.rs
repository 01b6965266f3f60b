//! Minimal PDF writer
//!
//! Produces PDF 1.4 using the two standard Helvetica faces with
//! WinAnsiEncoding, so no fonts are embedded. Only filled/stroked rectangles
//! and single-line text runs are supported, which is all the layout engine
//! draws.

use std::io::Write;

use crate::error::{ReportError, ReportResult};

use super::surface::{Color, DrawingSurface, RectStyle, SurfaceFactory, TextStyle};

const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";

/// Helvetica advance widths for ASCII 32..=126, in 1/1000 em
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for ASCII 32..=126, in 1/1000 em
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Advance width of one character in 1/1000 em
fn glyph_width(c: char, bold: bool) -> u16 {
    match c {
        ' '..='~' => {
            let table = if bold {
                &HELVETICA_BOLD_WIDTHS
            } else {
                &HELVETICA_WIDTHS
            };
            table[c as usize - 32]
        }
        '—' => 1000,
        '–' => 556,
        '•' => 350,
        _ => 556,
    }
}

/// Map a character to its WinAnsiEncoding byte
///
/// Characters outside the encoding become `?`.
fn win_ansi(c: char) -> u8 {
    match c {
        '€' => 0x80,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => c as u32 as u8,
        _ => b'?',
    }
}

/// Encode text as a PDF literal string body
fn encode_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match win_ansi(c) {
            b'(' => out.extend_from_slice(b"\\("),
            b')' => out.extend_from_slice(b"\\)"),
            b'\\' => out.extend_from_slice(b"\\\\"),
            byte => out.push(byte),
        }
    }
    out
}

fn color_op(color: Color, op: &str) -> String {
    let (r, g, b) = color.unit();
    format!("{:.3} {:.3} {:.3} {}", r, g, b, op)
}

/// Drawing surface that renders to PDF bytes
#[derive(Debug)]
pub struct PdfSurface {
    width: f64,
    height: f64,
    title: String,
    pages: Vec<Vec<u8>>,
}

impl PdfSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            title: String::new(),
            pages: vec![Vec::new()],
        }
    }

    /// Set the document title stored in the info dictionary
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn current(&mut self) -> &mut Vec<u8> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn build(&self) -> Result<Vec<u8>, std::io::Error> {
        let mut out: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = Vec::new();

        out.write_all(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n")?;

        let page_count = self.pages.len();
        // 1 catalog, 2 pages, 3 regular font, 4 bold font, 5 info,
        // then a page object and a content stream per page
        let first_page_id = 6;
        let kids: Vec<String> = (0..page_count)
            .map(|i| format!("{} 0 R", first_page_id + 2 * i))
            .collect();

        offsets.push(out.len());
        write!(out, "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n")?;

        offsets.push(out.len());
        write!(
            out,
            "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
            kids.join(" "),
            page_count
        )?;

        offsets.push(out.len());
        write!(
            out,
            "3 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>\nendobj\n"
        )?;

        offsets.push(out.len());
        write!(
            out,
            "4 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>\nendobj\n"
        )?;

        offsets.push(out.len());
        out.write_all(b"5 0 obj\n<< /Producer (finreport) /Title (")?;
        out.write_all(&encode_text(&self.title))?;
        out.write_all(b") >>\nendobj\n")?;

        for (i, content) in self.pages.iter().enumerate() {
            let page_id = first_page_id + 2 * i;
            let content_id = page_id + 1;

            offsets.push(out.len());
            write!(
                out,
                "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Resources << /Font << /{} 3 0 R /{} 4 0 R >> >> /Contents {} 0 R >>\nendobj\n",
                page_id, self.width, self.height, FONT_REGULAR, FONT_BOLD, content_id
            )?;

            offsets.push(out.len());
            write!(
                out,
                "{} 0 obj\n<< /Length {} >>\nstream\n",
                content_id,
                content.len()
            )?;
            out.write_all(content)?;
            out.write_all(b"\nendstream\nendobj\n")?;
        }

        let xref_offset = out.len();
        write!(out, "xref\n0 {}\n", offsets.len() + 1)?;
        out.write_all(b"0000000000 65535 f \n")?;
        for offset in &offsets {
            write!(out, "{:010} 00000 n \n", offset)?;
        }
        write!(
            out,
            "trailer\n<< /Size {} /Root 1 0 R /Info 5 0 R >>\nstartxref\n{}\n%%EOF\n",
            offsets.len() + 1,
            xref_offset
        )?;

        Ok(out)
    }
}

impl DrawingSurface for PdfSurface {
    fn page_width(&self) -> f64 {
        self.width
    }

    fn page_height(&self) -> f64 {
        self.height
    }

    fn text_width(&self, text: &str, style: &TextStyle) -> f64 {
        let units: u32 = text
            .chars()
            .map(|c| u32::from(glyph_width(c, style.bold)))
            .sum();
        f64::from(units) * style.size / 1000.0
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        // PDF origin is bottom-left and text sits on its baseline
        let baseline = self.height - y - style.size;
        let font = if style.bold { FONT_BOLD } else { FONT_REGULAR };
        let fill = color_op(style.color, "rg");
        let encoded = encode_text(text);

        let prefix = format!(
            "BT /{} {:.2} Tf {} 1 0 0 1 {:.2} {:.2} Tm (",
            font, style.size, fill, x, baseline
        );

        let content = self.current();
        content.extend_from_slice(prefix.as_bytes());
        content.extend_from_slice(&encoded);
        content.extend_from_slice(b") Tj ET\n");
    }

    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: &RectStyle) {
        let bottom = self.height - y - height;
        let mut ops = String::from("q ");
        if let Some(fill) = style.fill {
            ops.push_str(&color_op(fill, "rg"));
            ops.push(' ');
        }
        if let Some(stroke) = style.stroke {
            ops.push_str(&color_op(stroke, "RG"));
            ops.push_str(&format!(" {:.2} w ", style.line_width));
        }
        let paint = match (style.fill.is_some(), style.stroke.is_some()) {
            (true, true) => "B",
            (true, false) => "f",
            (false, true) => "S",
            (false, false) => "n",
        };
        ops.push_str(&format!(
            "{:.2} {:.2} {:.2} {:.2} re {} Q\n",
            x, bottom, width, height, paint
        ));

        self.current().extend_from_slice(ops.as_bytes());
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
    }

    fn save(&mut self) -> ReportResult<Vec<u8>> {
        self.build()
            .map_err(|e| ReportError::Render(format!("Failed to assemble PDF: {}", e)))
    }
}

/// Creates `PdfSurface`s
#[derive(Debug, Clone, Default)]
pub struct PdfSurfaceFactory {
    title: String,
}

impl PdfSurfaceFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl SurfaceFactory for PdfSurfaceFactory {
    fn create(&self, width: f64, height: f64) -> ReportResult<Box<dyn DrawingSurface>> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ReportError::RenderingUnavailable(format!(
                "Cannot create a {} x {} page",
                width, height
            )));
        }
        Ok(Box::new(
            PdfSurface::new(width, height).with_title(self.title.clone()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(surface: &mut PdfSurface) -> Vec<u8> {
        surface.save().unwrap()
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_document_structure() {
        let mut surface = PdfSurface::new(595.28, 841.89).with_title("Report");
        surface.draw_text("Hello", 48.0, 72.0, &TextStyle::regular(10.0));
        surface.new_page();
        surface.draw_rect(48.0, 100.0, 200.0, 20.0, &RectStyle::filled(Color::PANEL));
        let bytes = render(&mut surface);

        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        assert!(contains(&bytes, b"/Count 2"));
        assert!(contains(&bytes, b"(Hello) Tj"));
        assert!(contains(&bytes, b"/BaseFont /Helvetica-Bold"));
        assert!(contains(&bytes, b"re f Q"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let mut surface = PdfSurface::new(200.0, 200.0);
        surface.draw_text("x", 0.0, 0.0, &TextStyle::bold(12.0));
        let bytes = render(&mut surface);

        let xref_at = bytes.windows(5).position(|w| w == b"xref\n").unwrap();
        let table = String::from_utf8(bytes[xref_at..].to_vec()).unwrap();
        let entries: Vec<usize> = table
            .lines()
            .skip(3)
            .take_while(|l| l.ends_with(" n "))
            .map(|l| l[..10].parse().unwrap())
            .collect();
        assert_eq!(entries.len(), 7);
        for (i, offset) in entries.iter().enumerate() {
            let expected = format!("{} 0 obj", i + 1);
            assert!(bytes[*offset..].starts_with(expected.as_bytes()));
        }

        let startxref: usize = table
            .lines()
            .skip_while(|l| *l != "startxref")
            .nth(1)
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(startxref, xref_at);
    }

    #[test]
    fn test_text_encoding() {
        assert_eq!(encode_text("a(b)c\\"), b"a\\(b\\)c\\\\".to_vec());
        assert_eq!(encode_text("—•"), vec![0x97, 0x95]);
        assert_eq!(encode_text("漢"), b"?".to_vec());
        assert_eq!(encode_text("café"), vec![b'c', b'a', b'f', 0xE9]);
    }

    #[test]
    fn test_y_axis_is_flipped() {
        let mut surface = PdfSurface::new(200.0, 300.0);
        surface.draw_text("top", 10.0, 20.0, &TextStyle::regular(10.0));
        let bytes = render(&mut surface);
        assert!(contains(&bytes, b"1 0 0 1 10.00 270.00 Tm (top) Tj"));
    }

    #[test]
    fn test_helvetica_metrics() {
        let surface = PdfSurface::new(200.0, 200.0);
        let style = TextStyle::regular(10.0);
        assert_eq!(surface.text_width("0", &style), 5.56);
        assert!(
            surface.text_width("W", &TextStyle::bold(10.0)) > surface.text_width("i", &style)
        );
    }

    #[test]
    fn test_factory_rejects_bad_pages() {
        let factory = PdfSurfaceFactory::new();
        let err = factory.create(0.0, 100.0).err().unwrap();
        assert!(err.is_rendering_unavailable());
        assert!(factory.create(595.28, 841.89).is_ok());
    }
}
