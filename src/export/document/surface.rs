//! Drawing surface abstraction
//!
//! The layout engine only needs to measure text, draw text and rectangles,
//! start pages and finally collect bytes. Coordinates are in points with the
//! origin at the top-left corner of the page; `y` grows downwards and names
//! the top of the drawn element.

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::ReportResult;

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to `0.0..=1.0`
    pub fn unit(&self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    pub const BLACK: Color = Color::rgb(33, 37, 41);
    pub const MUTED: Color = Color::rgb(108, 117, 125);
    pub const ACCENT: Color = Color::rgb(31, 111, 235);
    pub const PANEL: Color = Color::rgb(241, 244, 248);
    pub const BORDER: Color = Color::rgb(206, 212, 218);
}

/// How text is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub bold: bool,
    pub color: Color,
}

impl TextStyle {
    pub fn regular(size: f64) -> Self {
        Self {
            size,
            bold: false,
            color: Color::BLACK,
        }
    }

    pub fn bold(size: f64) -> Self {
        Self {
            bold: true,
            ..Self::regular(size)
        }
    }

    pub fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }
}

/// How a rectangle is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub line_width: f64,
}

impl RectStyle {
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
            line_width: 0.0,
        }
    }

    pub fn outlined(fill: Color, stroke: Color, line_width: f64) -> Self {
        Self {
            fill: Some(fill),
            stroke: Some(stroke),
            line_width,
        }
    }
}

/// The capabilities the layout engine draws with
pub trait DrawingSurface: Send {
    fn page_width(&self) -> f64;

    fn page_height(&self) -> f64;

    /// Advance width of `text` set in `style`
    fn text_width(&self, text: &str, style: &TextStyle) -> f64;

    /// Break `text` into lines no wider than `max_width`
    ///
    /// Words are never split; a single word wider than `max_width` gets a
    /// line of its own. Explicit newlines always break.
    fn measure_wrapped_lines(&self, text: &str, max_width: f64, style: &TextStyle) -> Vec<String> {
        wrap_text(text, max_width, |candidate| self.text_width(candidate, style))
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle);

    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: &RectStyle);

    /// Start a new page; later drawing lands on it
    fn new_page(&mut self);

    /// Finish the document and return its bytes
    fn save(&mut self) -> ReportResult<Vec<u8>>;
}

/// Creates a fresh surface for each document export
pub trait SurfaceFactory: Send + Sync {
    /// # Errors
    ///
    /// Returns `RenderingUnavailable` when no surface can be created.
    fn create(&self, width: f64, height: f64) -> ReportResult<Box<dyn DrawingSurface>>;
}

/// Greedy word wrap
pub fn wrap_text<F>(text: &str, max_width: f64, width_of: F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{} {}", current, word);
            if width_of(&candidate) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        lines.push(current);
    }

    lines
}

/// One recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        page: usize,
        text: String,
        x: f64,
        y: f64,
        size: f64,
        bold: bool,
    },
    Rect {
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    NewPage {
        page: usize,
    },
}

impl DrawOp {
    pub fn page(&self) -> usize {
        match self {
            Self::Text { page, .. } | Self::Rect { page, .. } | Self::NewPage { page } => *page,
        }
    }
}

/// Shared view of the operations a `MemorySurface` recorded
#[derive(Debug, Clone, Default)]
pub struct SurfaceLog(Arc<Mutex<Vec<DrawOp>>>);

impl SurfaceLog {
    fn push(&self, op: DrawOp) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(op);
    }

    /// Every recorded operation, in order
    pub fn ops(&self) -> Vec<DrawOp> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drawn text with the page it landed on
    pub fn texts(&self) -> Vec<(usize, String)> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                DrawOp::Text { page, text, .. } => Some((page, text)),
                _ => None,
            })
            .collect()
    }

    /// Pages on which `text` was drawn, in drawing order
    pub fn pages_of(&self, text: &str) -> Vec<usize> {
        self.texts()
            .into_iter()
            .filter(|(_, t)| t == text)
            .map(|(page, _)| page)
            .collect()
    }

    /// Number of pages, counting the first
    pub fn page_count(&self) -> usize {
        1 + self
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::NewPage { .. }))
            .count()
    }
}

/// A surface that records operations instead of rendering
///
/// Every glyph is `size * 0.5` points wide, so layouts are exact and easy to
/// reason about.
#[derive(Debug)]
pub struct MemorySurface {
    width: f64,
    height: f64,
    page: usize,
    log: SurfaceLog,
}

impl MemorySurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            page: 1,
            log: SurfaceLog::default(),
        }
    }

    /// Handle for inspecting what gets drawn
    pub fn log(&self) -> SurfaceLog {
        self.log.clone()
    }
}

impl DrawingSurface for MemorySurface {
    fn page_width(&self) -> f64 {
        self.width
    }

    fn page_height(&self) -> f64 {
        self.height
    }

    fn text_width(&self, text: &str, style: &TextStyle) -> f64 {
        text.chars().count() as f64 * style.size * 0.5
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.log.push(DrawOp::Text {
            page: self.page,
            text: text.to_string(),
            x,
            y,
            size: style.size,
            bold: style.bold,
        });
    }

    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, _style: &RectStyle) {
        self.log.push(DrawOp::Rect {
            page: self.page,
            x,
            y,
            width,
            height,
        });
    }

    fn new_page(&mut self) {
        self.page += 1;
        self.log.push(DrawOp::NewPage { page: self.page });
    }

    fn save(&mut self) -> ReportResult<Vec<u8>> {
        let transcript: Vec<String> = self
            .log
            .texts()
            .into_iter()
            .map(|(page, text)| format!("{}\t{}", page, text))
            .collect();
        Ok(transcript.join("\n").into_bytes())
    }
}

/// Factory handing out `MemorySurface`s that all report to one log
#[derive(Debug, Clone, Default)]
pub struct MemorySurfaceFactory {
    log: SurfaceLog,
}

impl MemorySurfaceFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log shared by every surface this factory creates
    pub fn log(&self) -> SurfaceLog {
        self.log.clone()
    }
}

impl SurfaceFactory for MemorySurfaceFactory {
    fn create(&self, width: f64, height: f64) -> ReportResult<Box<dyn DrawingSurface>> {
        let mut surface = MemorySurface::new(width, height);
        surface.log = self.log.clone();
        Ok(Box::new(surface))
    }
}
