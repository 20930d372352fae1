//! Renders a composed treemap to a single-page PDF.

use crate::chart::palette::{Palette, Rgb};
use crate::chart::treemap::{self, Rect, Tile};
use crate::error::Res;
use crate::model::VizRow;
use chrono::{DateTime, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use tracing::{debug, trace};

pub const DEFAULT_TITLE: &str = "Mit jelent egy milliárd forint?";
pub const PAGE_WIDTH: f32 = 1600.0;
pub const PAGE_HEIGHT: f32 = 700.0;

const MARGIN: f32 = 20.0;
const TILE_PADDING: f32 = 8.0;
const BORDER_WIDTH: f32 = 2.0;
/// Helvetica glyphs average a little over half an em.
const AVG_GLYPH_EM: f32 = 0.55;

/// Fixed export settings.
#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub font_size: f32,
    pub title_font_size: f32,
    pub created: DateTime<Utc>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            font_size: 18.0,
            title_font_size: 24.0,
            created: Utc::now(),
        }
    }
}

impl ChartOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// The area below the title that the tiles occupy.
    pub fn plot_area(&self) -> Rect {
        let top = MARGIN + self.title_font_size * 2.0;
        Rect::new(
            MARGIN as f64,
            top as f64,
            (self.width - 2.0 * MARGIN).max(0.0) as f64,
            (self.height - top - MARGIN).max(0.0) as f64,
        )
    }
}

/// Renders `rows` as a treemap and returns the bytes of the PDF file.
pub fn render(rows: &[VizRow], palette: &Palette, options: &ChartOptions) -> Res<Vec<u8>> {
    let tiles = treemap::layout(rows, options.plot_area());
    debug!("Rendering {} tiles for {} rows", tiles.len(), rows.len());

    let mut page = PageContext::new(options.height);
    page.draw_text(
        &options.title,
        MARGIN,
        MARGIN + options.title_font_size,
        options.title_font_size,
        Rgb::new(0x20, 0x20, 0x20),
    );
    for tile in &tiles {
        let Some(row) = rows.get(tile.index) else {
            continue;
        };
        page.draw_tile(tile, row, palette.color(row.category()), options.font_size);
    }

    let mut document = Document::with_version("1.7");
    let pages_id = document.new_object_id();
    let font_id = document.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = document.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let content = page.finish().encode()?;
    let content_id = document.add_object(Stream::new(Dictionary::new(), content));
    let page_id = document.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), options.width.into(), options.height.into()],
        "Contents" => content_id,
        "Resources" => resources_id,
    });
    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::from(page_id)],
            "Count" => 1,
        }),
    );

    let catalog_id = document.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    document.trailer.set("Root", catalog_id);
    let info_id = info(&mut document, options);
    document.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    document.save_to(&mut bytes)?;
    Ok(bytes)
}

fn info(document: &mut Document, options: &ChartOptions) -> ObjectId {
    let created = options.created.format("D:%Y%m%d%H%M%SZ").to_string();
    document.add_object(dictionary! {
        "Title" => Object::string_literal(win_ansi(&options.title)),
        "Producer" => Object::string_literal("forint-o-meter"),
        "CreationDate" => Object::string_literal(created),
    })
}

struct PageContext {
    page_height: f32,
    content: Content,
}

impl PageContext {
    fn new(page_height: f32) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
        }
    }

    fn finish(self) -> Content {
        self.content
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn draw_tile(&mut self, tile: &Tile, row: &VizRow, color: Rgb, font_size: f32) {
        let x = tile.rect.x as f32;
        let w = tile.rect.w as f32;
        let h = tile.rect.h as f32;
        let y = self.page_height - (tile.rect.y as f32 + h);
        trace!("Tile '{}' at ({x}, {y}) {w}x{h}", row.display_label());

        let [r, g, b] = color.unit();
        self.push("rg", vec![r.into(), g.into(), b.into()]);
        self.push("re", vec![x.into(), y.into(), w.into(), h.into()]);
        self.push("f", vec![]);

        self.push("w", vec![BORDER_WIDTH.into()]);
        self.push("RG", vec![1.0f32.into(), 1.0f32.into(), 1.0f32.into()]);
        self.push("re", vec![x.into(), y.into(), w.into(), h.into()]);
        self.push("S", vec![]);

        let text_color = if color.is_dark() {
            Rgb::new(0xFF, 0xFF, 0xFF)
        } else {
            Rgb::new(0x20, 0x20, 0x20)
        };
        let top = tile.rect.y as f32 + TILE_PADDING;
        let lines = [row.display_label(), row.amount_display()];
        let mut size = font_size;
        while size > 6.0 && h < lines.len() as f32 * size * 1.3 + TILE_PADDING {
            size -= 2.0;
        }
        if h < lines.len() as f32 * size * 1.3 + TILE_PADDING {
            return;
        }
        let max_chars = ((w - 2.0 * TILE_PADDING) / (size * AVG_GLYPH_EM)).floor() as usize;
        if max_chars < 2 {
            return;
        }
        for (ix, line) in lines.iter().enumerate() {
            let baseline = top + size + ix as f32 * size * 1.3;
            let text = fit(line, max_chars);
            self.draw_text(&text, x + TILE_PADDING, baseline, size, text_color);
        }
    }

    /// Draws a line of text. `baseline` is measured from the top of the page.
    fn draw_text(&mut self, text: &str, x: f32, baseline: f32, size: f32, color: Rgb) {
        if text.trim().is_empty() {
            return;
        }
        let [r, g, b] = color.unit();
        self.push("BT", vec![]);
        self.push("Tf", vec![Object::Name(b"F1".to_vec()), size.into()]);
        self.push("rg", vec![r.into(), g.into(), b.into()]);
        let pdf_y = self.page_height - baseline;
        self.push("Td", vec![x.into(), pdf_y.into()]);
        self.push("Tj", vec![Object::string_literal(win_ansi(text))]);
        self.push("ET", vec![]);
    }
}

/// Shortens `text` to at most `max_chars` characters, marking the cut with a period.
fn fit(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('.');
    out
}

/// Encodes text for the standard Helvetica font with WinAnsiEncoding.
///
/// The Hungarian double-acute letters have no WinAnsi code point and are replaced by their
/// umlaut counterparts. Anything else that cannot be encoded becomes `?`.
pub(crate) fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            'ő' => 0xF6,
            'ű' => 0xFC,
            'Ő' => 0xD6,
            'Ű' => 0xDC,
            '€' => 0x80,
            '–' => 0x96,
            '—' => 0x97,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}
