use crate::fonts::{DEFAULT_FONT_SIZE, FontStyle, ascender, line_height};
use crate::model::Rect;
use crate::pdf::Canvas;
use crate::pdf::layout::fit_text;

/// Size and placement of one text box, relative to the flow's region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxOptions {
    pub width: f32,
    pub height: f32,
    pub x_offset: f32,
    pub style: FontStyle,
}

impl BoxOptions {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            x_offset: 0.0,
            style: FontStyle::Normal,
        }
    }

    pub fn at_x(mut self, x_offset: f32) -> Self {
        self.x_offset = x_offset;
        self
    }

    pub fn italic(mut self) -> Self {
        self.style = FontStyle::Italic;
        self
    }
}

/// A text box as drawn: where it was anchored and what ended up in it.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedBox {
    /// Top-left corner relative to the region's bottom-left.
    pub at: (f32, f32),
    pub width: f32,
    pub height: f32,
    pub font_size: f32,
    pub style: FontStyle,
    pub lines: Vec<String>,
    pub truncated: bool,
}

impl RenderedBox {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.is_empty())
    }
}

/// Stacks text boxes top to bottom inside a region. The cursor starts at the
/// region's top edge and moves down after every box by the box height plus
/// half the font size.
pub struct TextFlowBox<'c, C: Canvas + ?Sized> {
    canvas: &'c mut C,
    region: Rect,
    y: f32,
    font_size: f32,
}

impl<'c, C: Canvas + ?Sized> TextFlowBox<'c, C> {
    pub fn new(canvas: &'c mut C, region: Rect) -> Self {
        Self {
            canvas,
            region,
            y: region.height,
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    /// Cursor height above the region's bottom edge.
    pub fn cursor(&self) -> f32 {
        self.y
    }

    pub fn reset_cursor(&mut self) {
        self.y = self.region.height;
    }

    pub fn width(&self) -> f32 {
        self.region.width
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Line height of the current font size.
    pub fn font_height(&self) -> f32 {
        line_height(self.font_size)
    }

    pub fn width_of(&self, text: &str) -> f32 {
        self.canvas.text_width(text, FontStyle::Normal, self.font_size)
    }

    /// Run `f` with the font size set to `size`. The previous size is back in
    /// place when this returns, whatever `f` returned.
    pub fn with_font_size<R>(&mut self, size: f32, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous = std::mem::replace(&mut self.font_size, size);
        let out = f(self);
        self.font_size = previous;
        out
    }

    /// Draw `text` in a box anchored at `(x_offset, cursor)` and advance the
    /// cursor. Text that overflows the box is cut with an ellipsis.
    pub fn place(&mut self, text: &str, opts: BoxOptions) -> RenderedBox {
        let size = self.font_size;
        let canvas = &*self.canvas;
        let fitted = fit_text(text, opts.width, opts.height, size, |s| {
            canvas.text_width(s, opts.style, size)
        });

        let x = self.region.x + opts.x_offset;
        let top = self.region.y + self.y;
        let line_h = line_height(size);
        for (i, line) in fitted.lines.iter().enumerate() {
            let baseline = top - ascender(size) - i as f32 * line_h;
            self.canvas.show_text(line, x, baseline, opts.style, size);
        }

        let rendered = RenderedBox {
            at: (opts.x_offset, self.y),
            width: opts.width,
            height: opts.height,
            font_size: size,
            style: opts.style,
            lines: fitted.lines,
            truncated: fitted.truncated,
        };
        self.y -= opts.height + size / 2.0;
        rendered
    }

    /// Horizontal rule across the region at the cursor, then move down `gap`.
    pub fn rule(&mut self, gap: f32, line_width: f32) {
        let y = self.region.y + self.y;
        self.canvas.line(
            (self.region.x, y),
            (self.region.x + self.region.width, y),
            line_width,
        );
        self.y -= gap;
    }
}
