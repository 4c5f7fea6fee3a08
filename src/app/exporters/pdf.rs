//! Minimal paginated PDF writer on top of lopdf.
//!
//! Lays out lines of text top to bottom on A4 pages, starting a new page when
//! the cursor reaches the bottom margin, and draws the status pie chart as
//! vector paths. Text uses the standard Type1 fonts with WinAnsi encoding.

use crate::domain::model::StatusValue;
use crate::utils::error::Result;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};

pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;
pub const MARGIN: f32 = 50.0;

const LINE_SPACING: f32 = 1.4;
// Average Helvetica glyph width relative to the font size, for wrapping and centering.
const AVG_GLYPH_WIDTH: f32 = 0.5;
const MONO_GLYPH_WIDTH: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
    Italic,
    Mono,
}

impl Font {
    const ALL: [Font; 4] = [Font::Regular, Font::Bold, Font::Italic, Font::Mono];

    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
            Font::Italic => "F3",
            Font::Mono => "F4",
        }
    }

    fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
            Font::Italic => "Helvetica-Oblique",
            Font::Mono => "Courier",
        }
    }

    fn glyph_width(self) -> f32 {
        match self {
            Font::Mono => MONO_GLYPH_WIDTH,
            _ => AVG_GLYPH_WIDTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Encodes to single-byte WinAnsi; characters outside Latin-1 become `?`.
pub fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

/// Greedy word wrap on character count.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn real(value: f32) -> Object {
    Object::Real(value)
}

pub struct PdfWriter {
    title: String,
    pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    cursor_y: f32,
}

impl PdfWriter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            pages: Vec::new(),
            current: Vec::new(),
            cursor_y: PAGE_HEIGHT - MARGIN,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len() + 1
    }

    pub fn new_page(&mut self) {
        let finished = std::mem::take(&mut self.current);
        self.pages.push(finished);
        self.cursor_y = PAGE_HEIGHT - MARGIN;
    }

    /// Starts a new page unless `height` points fit above the bottom margin.
    pub fn ensure_space(&mut self, height: f32) {
        if self.cursor_y - height < MARGIN {
            self.new_page();
        }
    }

    pub fn skip(&mut self, height: f32) {
        self.cursor_y -= height;
    }

    /// Writes `text`, wrapped to the page width, advancing the cursor.
    pub fn line(&mut self, font: Font, size: f32, align: Align, text: &str) {
        let usable = PAGE_WIDTH - 2.0 * MARGIN;
        let max_chars = (usable / (size * font.glyph_width())).floor().max(1.0) as usize;
        let line_height = size * LINE_SPACING;

        for chunk in wrap(text, max_chars) {
            self.ensure_space(line_height);
            self.cursor_y -= line_height;
            let x = match align {
                Align::Left => MARGIN,
                Align::Center => {
                    let width = chunk.chars().count() as f32 * size * font.glyph_width();
                    ((PAGE_WIDTH - width) / 2.0).max(MARGIN)
                }
            };
            self.text_at(font, size, x, self.cursor_y, &chunk);
        }
    }

    fn text_at(&mut self, font: Font, size: f32, x: f32, y: f32, text: &str) {
        self.current.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![Object::Name(font.resource().as_bytes().to_vec()), real(size)],
            ),
            Operation::new("Td", vec![real(x), real(y)]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_text(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
    }

    fn fill_color(&mut self, status: StatusValue) {
        let (r, g, b) = status.rgb();
        self.current
            .push(Operation::new("rg", vec![real(r), real(g), real(b)]));
    }

    /// Draws a pie of the non-zero slices with a legend listing every status.
    /// Slices start at 140° and run counter-clockwise.
    pub fn pie_chart(&mut self, title: &str, series: &[(StatusValue, usize)]) {
        const RADIUS: f32 = 110.0;
        const STEP_DEGREES: f32 = 3.0;
        const START_DEGREES: f32 = 140.0;
        let height = 2.0 * RADIUS + 60.0;

        self.ensure_space(height);
        self.line(Font::Bold, 12.0, Align::Center, title);

        let total: usize = series.iter().map(|(_, count)| count).sum();
        let cx = MARGIN + RADIUS + 10.0;
        let cy = self.cursor_y - RADIUS - 20.0;

        let mut start = START_DEGREES;
        for &(status, count) in series.iter().filter(|(_, count)| *count > 0) {
            let sweep = count as f32 / total as f32 * 360.0;
            let end = start + sweep;

            self.fill_color(status);
            self.current.push(Operation::new("RG", vec![real(1.0), real(1.0), real(1.0)]));
            self.current.push(Operation::new("w", vec![real(1.0)]));
            self.current.push(Operation::new("m", vec![real(cx), real(cy)]));
            let mut angle = start;
            loop {
                let rad = angle.to_radians();
                self.current.push(Operation::new(
                    "l",
                    vec![real(cx + RADIUS * rad.cos()), real(cy + RADIUS * rad.sin())],
                ));
                if angle >= end {
                    break;
                }
                angle = (angle + STEP_DEGREES).min(end);
            }
            self.current.push(Operation::new("h", vec![]));
            self.current.push(Operation::new("B", vec![]));

            let pct = count as f32 / total as f32 * 100.0;
            if pct >= 3.0 {
                let mid = (start + sweep / 2.0).to_radians();
                let lx = cx + RADIUS * 0.65 * mid.cos() - 10.0;
                let ly = cy + RADIUS * 0.65 * mid.sin() - 3.0;
                self.current.push(Operation::new("rg", vec![real(0.0), real(0.0), real(0.0)]));
                self.text_at(Font::Regular, 8.0, lx, ly, &format!("{:.1}%", pct));
            }
            start = end;
        }

        // Legend keeps every status so the colours read the same across reports.
        let legend_x = cx + RADIUS + 40.0;
        let mut legend_y = cy + RADIUS - 10.0;
        for &(status, count) in series {
            self.fill_color(status);
            self.current.push(Operation::new(
                "re",
                vec![real(legend_x), real(legend_y), real(10.0), real(10.0)],
            ));
            self.current.push(Operation::new("f", vec![]));
            self.current.push(Operation::new("rg", vec![real(0.0), real(0.0), real(0.0)]));
            self.text_at(
                Font::Regular,
                10.0,
                legend_x + 16.0,
                legend_y + 1.0,
                &format!("{} ({})", status.label(), count),
            );
            legend_y -= 18.0;
        }

        self.cursor_y = cy - RADIUS - 20.0;
    }

    /// Assembles the document in memory.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.new_page();
        }

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for font in Font::ALL {
            let mut dict = Dictionary::new();
            dict.set("Type", Object::Name(b"Font".to_vec()));
            dict.set("Subtype", Object::Name(b"Type1".to_vec()));
            dict.set("BaseFont", Object::Name(font.base_font().as_bytes().to_vec()));
            dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
            let font_id = doc.add_object(Object::Dictionary(dict));
            fonts.set(font.resource(), Object::Reference(font_id));
        }
        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(fonts));
        let resources_id = doc.add_object(Object::Dictionary(resources));

        let mut page_ids: Vec<ObjectId> = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let content = Content { operations }.encode()?;
            let content_id = doc.add_object(Object::Stream(Stream::new(Dictionary::new(), content)));

            let mut page = Dictionary::new();
            page.set("Type", Object::Name(b"Page".to_vec()));
            page.set("Parent", Object::Reference(pages_id));
            page.set("Contents", Object::Reference(content_id));
            page.set("Resources", Object::Reference(resources_id));
            page.set(
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    real(PAGE_WIDTH),
                    real(PAGE_HEIGHT),
                ]),
            );
            page_ids.push(doc.add_object(Object::Dictionary(page)));
        }

        let mut pages = Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set("Count", Object::Integer(page_ids.len() as i64));
        pages.set(
            "Kids",
            Object::Array(page_ids.into_iter().map(Object::Reference).collect()),
        );
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = doc.add_object(Object::Dictionary(catalog));

        let mut info = Dictionary::new();
        info.set(
            "Title",
            Object::String(encode_text(&self.title), StringFormat::Literal),
        );
        info.set(
            "Producer",
            Object::String(b"sgsi-status".to_vec(), StringFormat::Literal),
        );
        let info_id = doc.add_object(Object::Dictionary(info));

        doc.trailer.set("Root", Object::Reference(catalog_id));
        doc.trailer.set("Info", Object::Reference(info_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_maps_latin1_and_replaces_the_rest() {
        assert_eq!(encode_text("Métricas"), b"M\xe9tricas".to_vec());
        assert_eq!(encode_text("a→b"), b"a?b".to_vec());
    }

    #[test]
    fn wrap_breaks_on_words() {
        let lines = wrap("uno dos tres cuatro", 8);
        assert_eq!(lines, vec!["uno dos", "tres", "cuatro"]);
        assert_eq!(wrap("", 10), vec![String::new()]);
    }

    #[test]
    fn long_documents_paginate() {
        let mut writer = PdfWriter::new("test");
        for i in 0..200 {
            writer.line(Font::Regular, 12.0, Align::Left, &format!("línea {}", i));
        }
        assert!(writer.page_count() > 1);

        let bytes = writer.finish().unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() >= 5);
    }

    #[test]
    fn empty_writer_still_produces_one_page() {
        let bytes = PdfWriter::new("empty").finish().unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}
