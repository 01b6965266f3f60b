//! Content blocks
//!
//! Each block has a deterministic height formula. Titles, key-value rows,
//! card rows, bullet items and table rows never split across pages;
//! paragraphs may break between lines.

use super::layout::{Block, Paginator};
use super::surface::{Color, DrawingSurface, RectStyle, TextStyle};

/// Body text size
pub const BODY_SIZE: f64 = 10.0;
/// Line advance for body text
pub const LINE_HEIGHT: f64 = 14.0;

pub const TITLE_SIZE: f64 = 16.0;
pub const TITLE_HEIGHT: f64 = 22.0;
pub const SUBTITLE_HEIGHT: f64 = 14.0;
pub const RULE_GAP: f64 = 4.0;
pub const RULE_THICKNESS: f64 = 2.0;

/// Share of the content width taken by key-value labels
pub const LABEL_RATIO: f64 = 0.35;
pub const COLUMN_GAP: f64 = 8.0;
pub const KEY_VALUE_PADDING: f64 = 4.0;

pub const CARD_HEIGHT: f64 = 58.0;
pub const CARD_GAP: f64 = 10.0;

pub const BULLET: &str = "•";
pub const BULLET_INDENT: f64 = 14.0;
pub const BULLET_GAP: f64 = 3.0;

pub const TABLE_TEXT_SIZE: f64 = 9.0;
pub const TABLE_LINE_HEIGHT: f64 = 12.0;
pub const TABLE_HEADER_HEIGHT: f64 = 20.0;
pub const CELL_PADDING: f64 = 4.0;

fn body_style() -> TextStyle {
    TextStyle::regular(BODY_SIZE)
}

/// Line advance for text of `size`
pub fn line_height(size: f64) -> f64 {
    if size == BODY_SIZE {
        LINE_HEIGHT
    } else {
        size * 1.4
    }
}

/// Section heading with an optional subtitle and an accent rule beneath
#[derive(Debug, Clone, PartialEq)]
pub struct SectionTitle {
    pub title: String,
    pub subtitle: Option<String>,
}

impl SectionTitle {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
        }
    }

    pub fn with_subtitle(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: Some(subtitle.into()),
        }
    }

    fn text_height(&self) -> f64 {
        TITLE_HEIGHT + self.subtitle.as_ref().map_or(0.0, |_| SUBTITLE_HEIGHT)
    }
}

impl Block for SectionTitle {
    fn measure(&self, _surface: &dyn DrawingSurface, _width: f64) -> f64 {
        self.text_height() + RULE_GAP + RULE_THICKNESS
    }

    /// A title keeps two body lines of what follows on its page
    fn lead_height(&self, surface: &dyn DrawingSurface, width: f64) -> f64 {
        self.measure(surface, width) + 2.0 * LINE_HEIGHT
    }

    fn draw(&self, page: &mut Paginator) {
        let x = page.left();
        let y = page.cursor();
        let width = page.content_width();

        page.draw_text(&self.title, x, y, &TextStyle::bold(TITLE_SIZE));
        if let Some(subtitle) = &self.subtitle {
            let style = body_style().with_color(Color::MUTED);
            page.draw_text(subtitle, x, y + TITLE_HEIGHT, &style);
        }
        page.draw_rect(
            x,
            y + self.text_height() + RULE_GAP,
            width,
            RULE_THICKNESS,
            &RectStyle::filled(Color::ACCENT),
        );

        let height = self.measure(page.surface(), width);
        page.advance(height);
    }
}

/// A label and its value side by side
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    pub label: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    fn columns(width: f64) -> (f64, f64) {
        let label_width = width * LABEL_RATIO;
        (label_width, width - label_width)
    }

    fn lines(&self, surface: &dyn DrawingSurface, width: f64) -> (Vec<String>, Vec<String>) {
        let (label_width, value_width) = Self::columns(width);
        let label_style = TextStyle::bold(BODY_SIZE);
        (
            surface.measure_wrapped_lines(&self.label, label_width - COLUMN_GAP, &label_style),
            surface.measure_wrapped_lines(&self.value, value_width, &body_style()),
        )
    }
}

impl Block for KeyValue {
    fn measure(&self, surface: &dyn DrawingSurface, width: f64) -> f64 {
        let (label, value) = self.lines(surface, width);
        label.len().max(value.len()) as f64 * LINE_HEIGHT + KEY_VALUE_PADDING
    }

    fn draw(&self, page: &mut Paginator) {
        let width = page.content_width();
        let (label_lines, value_lines) = self.lines(page.surface(), width);
        let height = self.measure(page.surface(), width);
        let (label_width, _) = Self::columns(width);
        let x = page.left();
        let y = page.cursor();

        let label_style = TextStyle::bold(BODY_SIZE).with_color(Color::MUTED);
        for (i, line) in label_lines.iter().enumerate() {
            page.draw_text(line, x, y + i as f64 * LINE_HEIGHT, &label_style);
        }
        for (i, line) in value_lines.iter().enumerate() {
            page.draw_text(line, x + label_width, y + i as f64 * LINE_HEIGHT, &body_style());
        }

        page.advance(height);
    }
}

/// Wrapped text that may break between lines
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub size: f64,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self::sized(text, BODY_SIZE)
    }

    pub fn sized(text: impl Into<String>, size: f64) -> Self {
        Self {
            text: text.into(),
            size,
        }
    }

    fn style(&self) -> TextStyle {
        TextStyle::regular(self.size)
    }
}

impl Block for Paragraph {
    fn measure(&self, surface: &dyn DrawingSurface, width: f64) -> f64 {
        let lines = surface.measure_wrapped_lines(&self.text, width, &self.style());
        lines.len() as f64 * line_height(self.size)
    }

    fn lead_height(&self, _surface: &dyn DrawingSurface, _width: f64) -> f64 {
        line_height(self.size)
    }

    fn draw(&self, page: &mut Paginator) {
        let style = self.style();
        let step = line_height(self.size);
        let lines = page
            .surface()
            .measure_wrapped_lines(&self.text, page.content_width(), &style);

        for line in lines {
            page.ensure_space(step);
            let (x, y) = (page.left(), page.cursor());
            page.draw_text(&line, x, y, &style);
            page.advance(step);
        }
    }
}

/// One headline number
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    pub caption: Option<String>,
}

impl MetricCard {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

/// Fixed-height cards laid out row-major
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCardGrid {
    pub cards: Vec<MetricCard>,
    pub columns: usize,
}

impl MetricCardGrid {
    pub fn new(cards: Vec<MetricCard>) -> Self {
        Self { cards, columns: 2 }
    }

    fn columns(&self) -> usize {
        self.columns.max(1)
    }

    fn rows(&self) -> usize {
        self.cards.len().div_ceil(self.columns())
    }

    fn draw_card(page: &mut Paginator, card: &MetricCard, x: f64, width: f64) {
        let y = page.cursor();
        page.draw_rect(
            x,
            y,
            width,
            CARD_HEIGHT,
            &RectStyle::outlined(Color::PANEL, Color::BORDER, 0.75),
        );
        page.draw_text(
            &card.label,
            x + 10.0,
            y + 8.0,
            &TextStyle::regular(8.0).with_color(Color::MUTED),
        );
        page.draw_text(&card.value, x + 10.0, y + 21.0, &TextStyle::bold(16.0));
        if let Some(caption) = &card.caption {
            page.draw_text(
                caption,
                x + 10.0,
                y + 42.0,
                &TextStyle::regular(8.0).with_color(Color::MUTED),
            );
        }
    }
}

impl Block for MetricCardGrid {
    fn measure(&self, _surface: &dyn DrawingSurface, _width: f64) -> f64 {
        match self.rows() {
            0 => 0.0,
            rows => rows as f64 * CARD_HEIGHT + (rows - 1) as f64 * CARD_GAP,
        }
    }

    fn lead_height(&self, _surface: &dyn DrawingSurface, _width: f64) -> f64 {
        if self.cards.is_empty() {
            0.0
        } else {
            CARD_HEIGHT
        }
    }

    fn draw(&self, page: &mut Paginator) {
        let columns = self.columns();
        let card_width =
            (page.content_width() - CARD_GAP * (columns - 1) as f64) / columns as f64;

        for (index, row) in self.cards.chunks(columns).enumerate() {
            if index > 0 {
                page.advance(CARD_GAP);
            }
            // The whole row is reserved before any card is drawn
            page.ensure_space(CARD_HEIGHT);
            for (column, card) in row.iter().enumerate() {
                let x = page.left() + column as f64 * (card_width + CARD_GAP);
                Self::draw_card(page, card, x, card_width);
            }
            page.advance(CARD_HEIGHT);
        }
    }
}

/// Bulleted items, each kept whole on one page
#[derive(Debug, Clone, PartialEq)]
pub struct BulletList {
    pub items: Vec<String>,
}

impl BulletList {
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    fn item_lines(surface: &dyn DrawingSurface, item: &str, width: f64) -> Vec<String> {
        surface.measure_wrapped_lines(item, width - BULLET_INDENT, &body_style())
    }

    fn item_height(lines: usize) -> f64 {
        lines as f64 * LINE_HEIGHT + BULLET_GAP
    }
}

impl Block for BulletList {
    fn measure(&self, surface: &dyn DrawingSurface, width: f64) -> f64 {
        self.items
            .iter()
            .map(|item| Self::item_height(Self::item_lines(surface, item, width).len()))
            .sum()
    }

    fn lead_height(&self, surface: &dyn DrawingSurface, width: f64) -> f64 {
        self.items
            .first()
            .map(|item| Self::item_height(Self::item_lines(surface, item, width).len()))
            .unwrap_or(0.0)
    }

    fn draw(&self, page: &mut Paginator) {
        let width = page.content_width();
        let glyph_style = body_style().with_color(Color::ACCENT);

        for item in &self.items {
            let lines = Self::item_lines(page.surface(), item, width);
            page.ensure_space(Self::item_height(lines.len()));

            let (x, y) = (page.left(), page.cursor());
            page.draw_text(BULLET, x, y, &glyph_style);
            for (i, line) in lines.iter().enumerate() {
                page.draw_text(line, x + BULLET_INDENT, y + i as f64 * LINE_HEIGHT, &body_style());
            }
            page.advance(Self::item_height(lines.len()));
        }
    }
}

/// Horizontal alignment of a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A table column; widths are shared out by weight
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub title: String,
    pub weight: f64,
    pub align: Align,
}

impl Column {
    pub fn left(title: impl Into<String>, weight: f64) -> Self {
        Self {
            title: title.into(),
            weight,
            align: Align::Left,
        }
    }

    pub fn right(title: impl Into<String>, weight: f64) -> Self {
        Self {
            title: title.into(),
            weight,
            align: Align::Right,
        }
    }
}

/// Header band plus rows; a row moves whole to the next page and the header
/// is repeated there
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    fn widths(&self, width: f64) -> Vec<f64> {
        let total: f64 = self.columns.iter().map(|c| c.weight.max(0.0)).sum();
        self.columns
            .iter()
            .map(|c| {
                if total > 0.0 {
                    width * c.weight.max(0.0) / total
                } else {
                    width / self.columns.len() as f64
                }
            })
            .collect()
    }

    fn cell_lines(
        surface: &dyn DrawingSurface,
        row: &[String],
        widths: &[f64],
    ) -> Vec<Vec<String>> {
        let style = TextStyle::regular(TABLE_TEXT_SIZE);
        widths
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let text = row.get(i).map(String::as_str).unwrap_or("");
                surface.measure_wrapped_lines(text, width - 2.0 * CELL_PADDING, &style)
            })
            .collect()
    }

    fn row_height(cells: &[Vec<String>]) -> f64 {
        let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
        lines as f64 * TABLE_LINE_HEIGHT + 2.0 * CELL_PADDING
    }

    fn draw_header(&self, page: &mut Paginator, widths: &[f64]) {
        let (left, y) = (page.left(), page.cursor());
        page.draw_rect(
            left,
            y,
            page.content_width(),
            TABLE_HEADER_HEIGHT,
            &RectStyle::filled(Color::PANEL),
        );

        let style = TextStyle::bold(TABLE_TEXT_SIZE);
        let text_y = y + (TABLE_HEADER_HEIGHT - TABLE_TEXT_SIZE) / 2.0;
        let mut x = left;
        for (column, width) in self.columns.iter().zip(widths) {
            let text_x = aligned_x(page.surface(), &column.title, column.align, x, *width, &style);
            page.draw_text(&column.title, text_x, text_y, &style);
            x += width;
        }
        page.advance(TABLE_HEADER_HEIGHT);
    }
}

fn aligned_x(
    surface: &dyn DrawingSurface,
    text: &str,
    align: Align,
    x: f64,
    width: f64,
    style: &TextStyle,
) -> f64 {
    match align {
        Align::Left => x + CELL_PADDING,
        Align::Right => x + width - CELL_PADDING - surface.text_width(text, style),
    }
}

impl Block for Table {
    fn measure(&self, surface: &dyn DrawingSurface, width: f64) -> f64 {
        let widths = self.widths(width);
        TABLE_HEADER_HEIGHT
            + self
                .rows
                .iter()
                .map(|row| Self::row_height(&Self::cell_lines(surface, row, &widths)))
                .sum::<f64>()
    }

    fn lead_height(&self, surface: &dyn DrawingSurface, width: f64) -> f64 {
        let widths = self.widths(width);
        TABLE_HEADER_HEIGHT
            + self
                .rows
                .first()
                .map(|row| Self::row_height(&Self::cell_lines(surface, row, &widths)))
                .unwrap_or(0.0)
    }

    fn draw(&self, page: &mut Paginator) {
        let width = page.content_width();
        let widths = self.widths(width);
        let style = TextStyle::regular(TABLE_TEXT_SIZE);

        self.draw_header(page, &widths);

        for (index, row) in self.rows.iter().enumerate() {
            let cells = Self::cell_lines(page.surface(), row, &widths);
            let height = Self::row_height(&cells);

            if page.ensure_space(height) {
                self.draw_header(page, &widths);
            }

            let (left, y) = (page.left(), page.cursor());
            if index % 2 == 1 {
                page.draw_rect(left, y, width, height, &RectStyle::filled(Color::PANEL));
            }

            let mut x = left;
            for ((column, lines), cell_width) in self.columns.iter().zip(&cells).zip(&widths) {
                for (i, line) in lines.iter().enumerate() {
                    let text_x = aligned_x(page.surface(), line, column.align, x, *cell_width, &style);
                    let text_y = y + CELL_PADDING + i as f64 * TABLE_LINE_HEIGHT;
                    page.draw_text(line, text_x, text_y, &style);
                }
                x += cell_width;
            }
            page.advance(height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::document::layout::{PageChrome, PageGeometry};
    use crate::export::document::surface::{MemorySurface, SurfaceLog};

    // Content band is 260 wide and 300 tall: y in [50, 350]
    fn paginator() -> (Paginator, SurfaceLog) {
        let surface = MemorySurface::new(300.0, 400.0);
        let log = surface.log();
        let geometry = PageGeometry {
            width: 300.0,
            height: 400.0,
            margin_x: 20.0,
            margin_top: 50.0,
            margin_bottom: 50.0,
        };
        let chrome = PageChrome {
            title: "Header".to_string(),
            subtitle: "Sub".to_string(),
            footer_note: "Note".to_string(),
        };
        let page = Paginator::new(Box::new(surface), geometry, chrome).unwrap();
        (page, log)
    }

    #[test]
    fn test_section_title_height_by_subtitle() {
        let (page, _) = paginator();
        let plain = SectionTitle::new("Debts");
        let with_sub = SectionTitle::with_subtitle("Debts", "Top balances");

        assert_eq!(plain.measure(page.surface(), 260.0), 28.0);
        assert_eq!(with_sub.measure(page.surface(), 260.0), 42.0);
    }

    #[test]
    fn test_key_value_wraps_value_column() {
        let (page, _) = paginator();
        // Value column is 169 wide: 33 glyphs of 5 points
        let short = KeyValue::new("Name", "Ada");
        let long = KeyValue::new("Note", "lorem ipsum dolor sit amet consectetur adipiscing elit");

        assert_eq!(short.measure(page.surface(), 260.0), 18.0);
        assert_eq!(long.measure(page.surface(), 260.0), 32.0);
    }

    #[test]
    fn test_paragraph_breaks_between_lines() {
        let (mut page, log) = paginator();
        // 10 words of 4 letters fit one 260-point line
        let text = vec!["word"; 30].join(" ");
        let paragraph = Paragraph::new(text);
        assert_eq!(paragraph.measure(page.surface(), 260.0), 42.0);

        page.advance(280.0); // 20 points left: room for one line
        page.draw_block(&paragraph);

        let pages: Vec<usize> = log
            .texts()
            .into_iter()
            .filter(|(_, t)| t.starts_with("word"))
            .map(|(p, _)| p)
            .collect();
        assert_eq!(pages, vec![1, 2, 2]);
    }

    #[test]
    fn test_card_row_never_splits() {
        let (mut page, log) = paginator();
        let grid = MetricCardGrid::new(
            ["A", "B", "C", "D"]
                .iter()
                .map(|l| MetricCard::new(*l, "—"))
                .collect(),
        );
        assert_eq!(grid.measure(page.surface(), 260.0), 126.0);

        // First row fits at 250..308, second would end at 376
        page.advance(200.0);
        page.draw_block(&grid);

        assert_eq!(log.pages_of("A"), vec![1]);
        assert_eq!(log.pages_of("B"), vec![1]);
        assert_eq!(log.pages_of("C"), vec![2]);
        assert_eq!(log.pages_of("D"), vec![2]);
    }

    #[test]
    fn test_bullet_item_moves_whole() {
        let (mut page, log) = paginator();
        let long_item = vec!["alpha"; 24].join(" ");
        let list = BulletList::new(vec!["short".to_string(), long_item]);

        // "short" takes 17 points; the long item needs 45 but only 33 remain
        page.advance(250.0);
        page.draw_block(&list);

        assert_eq!(log.pages_of("short"), vec![1]);
        let alpha_pages: Vec<usize> = log
            .texts()
            .into_iter()
            .filter(|(_, t)| t.starts_with("alpha"))
            .map(|(p, _)| p)
            .collect();
        assert_eq!(alpha_pages, vec![2, 2, 2]);
    }

    #[test]
    fn test_table_rows_atomic_and_header_repeats() {
        let (mut page, log) = paginator();
        let rows: Vec<Vec<String>> = (0..30)
            .map(|i| vec![format!("Row {}", i), format!("{}", i * 10 + 5)])
            .collect();
        let table = Table::new(vec![Column::left("Name", 2.0), Column::right("Amount", 1.0)], rows);
        assert_eq!(table.measure(page.surface(), 260.0), 20.0 + 30.0 * 20.0);

        page.draw_block(&table);

        // 14 rows per page after the header
        assert_eq!(log.pages_of("Name"), vec![1, 2, 3]);
        for i in 0..30 {
            let name_pages = log.pages_of(&format!("Row {}", i));
            let value_pages = log.pages_of(&format!("{}", i * 10 + 5));
            assert_eq!(name_pages.len(), 1);
            assert_eq!(name_pages, value_pages, "row {} split", i);
        }
        assert_eq!(log.pages_of("Row 13"), vec![1]);
        assert_eq!(log.pages_of("Row 14"), vec![2]);
        assert_eq!(log.pages_of("Row 29"), vec![3]);
    }

    #[test]
    fn test_empty_blocks_draw_nothing() {
        let (mut page, log) = paginator();
        let before = log.ops().len();
        page.draw_block(&MetricCardGrid::new(Vec::new()));
        page.draw_block(&BulletList::new(Vec::new()));
        assert_eq!(log.ops().len(), before);
    }
}
