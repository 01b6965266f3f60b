//! Cursor-based pagination
//!
//! The paginator owns the drawing surface and a vertical cursor inside the
//! content band `[margin_top, height - margin_bottom]`. Blocks ask for space
//! before drawing; `ensure_space` is the only place a page ever breaks.

use crate::config::PageSettings;
use crate::error::{ReportError, ReportResult};

use super::surface::{Color, DrawingSurface, RectStyle, TextStyle};

/// Vertical gap added after every block
pub const BLOCK_SPACING: f64 = 10.0;

/// Page size and margins in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin_x: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
}

impl PageGeometry {
    /// Check that the geometry leaves a usable content band
    pub fn validate(&self) -> ReportResult<()> {
        let values = [
            self.width,
            self.height,
            self.margin_x,
            self.margin_top,
            self.margin_bottom,
        ];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ReportError::Render(format!(
                "Page geometry must be finite and non-negative: {:?}",
                self
            )));
        }
        if self.content_width() <= 0.0 || self.content_bottom() <= self.margin_top {
            return Err(ReportError::Render(format!(
                "Margins leave no room for content: {:?}",
                self
            )));
        }
        Ok(())
    }

    /// Width between the side margins
    pub fn content_width(&self) -> f64 {
        self.width - 2.0 * self.margin_x
    }

    /// Lowest `y` content may reach
    pub fn content_bottom(&self) -> f64 {
        self.height - self.margin_bottom
    }
}

impl From<PageSettings> for PageGeometry {
    fn from(page: PageSettings) -> Self {
        Self {
            width: page.width,
            height: page.height,
            margin_x: page.margin_x,
            margin_top: page.margin_top,
            margin_bottom: page.margin_bottom,
        }
    }
}

/// Repeating page header and footer
#[derive(Debug, Clone, PartialEq)]
pub struct PageChrome {
    /// Left side of the header
    pub title: String,
    /// Right side of the header
    pub subtitle: String,
    /// Left side of the footer
    pub footer_note: String,
}

impl PageChrome {
    fn draw_header(&self, surface: &mut dyn DrawingSurface, geometry: &PageGeometry) {
        let band = geometry.margin_top;
        let title_style = TextStyle::bold(11.0).with_color(Color::ACCENT);
        let subtitle_style = TextStyle::regular(9.0).with_color(Color::MUTED);
        let text_y = band / 2.0 - 8.0;

        surface.draw_text(&self.title, geometry.margin_x, text_y, &title_style);

        let subtitle_width = surface.text_width(&self.subtitle, &subtitle_style);
        let subtitle_x = geometry.width - geometry.margin_x - subtitle_width;
        surface.draw_text(&self.subtitle, subtitle_x, text_y + 2.0, &subtitle_style);

        surface.draw_rect(
            geometry.margin_x,
            band / 2.0 + 8.0,
            geometry.content_width(),
            0.75,
            &RectStyle::filled(Color::BORDER),
        );
    }

    fn draw_footer(&self, surface: &mut dyn DrawingSurface, geometry: &PageGeometry, page: usize) {
        let style = TextStyle::regular(8.0).with_color(Color::MUTED);
        let y = geometry.content_bottom() + geometry.margin_bottom / 2.0 - 4.0;

        surface.draw_text(&self.footer_note, geometry.margin_x, y, &style);

        let label = format!("Page {}", page);
        let width = surface.text_width(&label, &style);
        surface.draw_text(&label, geometry.width - geometry.margin_x - width, y, &style);
    }
}

/// A unit of content that knows its height and how to draw itself
pub trait Block {
    /// Total height of the block when drawn without a page break
    ///
    /// Must not change any state.
    fn measure(&self, surface: &dyn DrawingSurface, width: f64) -> f64;

    /// Height of the leading part that must share a page
    ///
    /// Atomic blocks return their full height. Splittable blocks return the
    /// height of their first unit.
    fn lead_height(&self, surface: &dyn DrawingSurface, width: f64) -> f64 {
        self.measure(surface, width)
    }

    /// Draw at the cursor, advancing it by the rendered height
    ///
    /// Splittable blocks call `ensure_space` for each unit they draw.
    fn draw(&self, page: &mut Paginator);
}

/// Page-breaking cursor over a drawing surface
pub struct Paginator {
    surface: Box<dyn DrawingSurface>,
    geometry: PageGeometry,
    chrome: PageChrome,
    cursor: f64,
    page: usize,
}

impl Paginator {
    /// Start the first page, with its header, and put the cursor at the top
    pub fn new(
        mut surface: Box<dyn DrawingSurface>,
        geometry: PageGeometry,
        chrome: PageChrome,
    ) -> ReportResult<Self> {
        geometry.validate()?;
        chrome.draw_header(surface.as_mut(), &geometry);

        Ok(Self {
            surface,
            cursor: geometry.margin_top,
            geometry,
            chrome,
            page: 1,
        })
    }

    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    pub fn page_number(&self) -> usize {
        self.page
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Left edge of the content band
    pub fn left(&self) -> f64 {
        self.geometry.margin_x
    }

    pub fn content_width(&self) -> f64 {
        self.geometry.content_width()
    }

    /// Space left on the current page
    pub fn remaining(&self) -> f64 {
        self.geometry.content_bottom() - self.cursor
    }

    pub fn surface(&self) -> &dyn DrawingSurface {
        self.surface.as_ref()
    }

    /// Break the page if `height` does not fit below the cursor
    ///
    /// Never breaks when the cursor is already at the top of a page, so
    /// content taller than the band is drawn rather than looping. Returns
    /// whether a break happened.
    pub fn ensure_space(&mut self, height: f64) -> bool {
        let fits = self.cursor + height <= self.geometry.content_bottom();
        if fits || self.cursor <= self.geometry.margin_top {
            return false;
        }
        self.break_page();
        true
    }

    fn break_page(&mut self) {
        self.chrome
            .draw_footer(self.surface.as_mut(), &self.geometry, self.page);
        self.surface.new_page();
        self.page += 1;
        self.chrome.draw_header(self.surface.as_mut(), &self.geometry);
        self.cursor = self.geometry.margin_top;
    }

    /// Move the cursor down, never past the bottom of the band
    pub fn advance(&mut self, height: f64) {
        self.cursor = (self.cursor + height).min(self.geometry.content_bottom());
    }

    pub fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.surface.draw_text(text, x, y, style);
    }

    pub fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: &RectStyle) {
        self.surface.draw_rect(x, y, width, height, style);
    }

    /// Lay out one block followed by the standard spacing
    pub fn draw_block(&mut self, block: &dyn Block) {
        let width = self.content_width();
        let lead = block.lead_height(self.surface(), width);
        self.ensure_space(lead);
        block.draw(self);
        self.advance(BLOCK_SPACING);
    }

    /// Draw the last footer and hand back the finished document
    pub fn finish(mut self) -> ReportResult<Vec<u8>> {
        self.chrome
            .draw_footer(self.surface.as_mut(), &self.geometry, self.page);
        self.surface.save()
    }
}
