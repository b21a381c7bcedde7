pub mod flow;
pub mod layout;

use pdf_writer::{Content, Filter, Name, Pdf, Rect as PdfRect, Ref, Str};

use crate::fonts::{self, FontStyle, register_fonts, to_winansi_bytes};
use crate::model::Rect;

/// Drawing surface for cards. Coordinates are in points with the origin at
/// the page's bottom-left corner and `y` growing upward.
pub trait Canvas {
    /// Finish the current page and continue on a fresh one.
    fn start_new_page(&mut self);

    fn stroke_rect(&mut self, rect: Rect, line_width: f32);

    fn line(&mut self, from: (f32, f32), to: (f32, f32), line_width: f32);

    /// Draw one line of text with its baseline starting at `(x, baseline)`.
    fn show_text(&mut self, text: &str, x: f32, baseline: f32, style: FontStyle, font_size: f32);

    fn text_width(&self, text: &str, _style: FontStyle, font_size: f32) -> f32 {
        fonts::text_width(text, font_size)
    }
}

/// Canvas that writes a PDF document, one content stream per page.
pub struct PdfCanvas {
    page_width: f32,
    page_height: f32,
    pages: Vec<Content>,
}

impl PdfCanvas {
    /// Start a document with one empty page.
    pub fn new(page_width: f32, page_height: f32) -> Self {
        Self {
            page_width,
            page_height,
            pages: vec![Content::new()],
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn current(&mut self) -> &mut Content {
        // `pages` is never empty: `new` seeds the first page.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub fn finish(self) -> Vec<u8> {
        let t0 = std::time::Instant::now();
        let mut pdf = Pdf::new();
        let mut next_id = 1i32;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();
        let font_pairs = register_fonts(&mut pdf, &mut alloc);

        let n = self.pages.len();
        let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

        for (i, c) in self.pages.into_iter().enumerate() {
            let raw = c.finish();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
        }

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(n as i32);

        for i in 0..n {
            let mut page = pdf.page(page_ids[i]);
            page.media_box(PdfRect::new(0.0, 0.0, self.page_width, self.page_height))
                .parent(pages_id)
                .contents(content_ids[i]);
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            for (name, font_ref) in &font_pairs {
                fonts.pair(Name(name.as_bytes()), *font_ref);
            }
        }

        let bytes = pdf.finish();
        log::debug!(
            "PDF assembly: {} pages, {} bytes, {:.1}ms",
            n,
            bytes.len(),
            t0.elapsed().as_secs_f64() * 1000.0,
        );
        bytes
    }
}

impl Canvas for PdfCanvas {
    fn start_new_page(&mut self) {
        self.pages.push(Content::new());
    }

    fn stroke_rect(&mut self, rect: Rect, line_width: f32) {
        let content = self.current();
        content.save_state();
        content.set_line_width(line_width);
        content.rect(rect.x, rect.y, rect.width, rect.height);
        content.stroke();
        content.restore_state();
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), line_width: f32) {
        let content = self.current();
        content.save_state();
        content.set_line_width(line_width);
        content.move_to(from.0, from.1);
        content.line_to(to.0, to.1);
        content.stroke();
        content.restore_state();
    }

    fn show_text(&mut self, text: &str, x: f32, baseline: f32, style: FontStyle, font_size: f32) {
        if text.is_empty() {
            return;
        }
        let bytes = to_winansi_bytes(text);
        let content = self.current();
        content.begin_text();
        content.set_font(Name(style.pdf_name().as_bytes()), font_size);
        content.next_line(x, baseline);
        content.show(Str(&bytes));
        content.end_text();
    }
}
