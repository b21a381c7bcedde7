use pdf_writer::{Name, Pdf, Ref};

/// Card text uses the standard Helvetica faces, which every PDF reader
/// provides, so nothing is embedded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Normal,
    Italic,
}

impl FontStyle {
    pub(crate) const ALL: [FontStyle; 2] = [FontStyle::Normal, FontStyle::Italic];

    pub(crate) fn pdf_name(self) -> &'static str {
        match self {
            FontStyle::Normal => "F1",
            FontStyle::Italic => "F2",
        }
    }

    fn base_font(self) -> &'static [u8] {
        match self {
            FontStyle::Normal => b"Helvetica",
            FontStyle::Italic => b"Helvetica-Oblique",
        }
    }
}

pub const DEFAULT_FONT_SIZE: f32 = 12.0;

// Helvetica AFM: ascender 718, descender -207, line gap 231 (1000 units/em).
const ASCENDER_1000: f32 = 718.0;
const LINE_HEIGHT_1000: f32 = 1156.0;

/// Distance between baselines of consecutive lines.
pub fn line_height(font_size: f32) -> f32 {
    LINE_HEIGHT_1000 * font_size / 1000.0
}

pub fn ascender(font_size: f32) -> f32 {
    ASCENDER_1000 * font_size / 1000.0
}

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007E => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
/// Characters outside the code page print as '?'.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .filter(|c| !c.is_control())
        .map(|c| match char_to_winansi(c) {
            0 => b'?',
            b => b,
        })
        .collect()
}

/// Helvetica advance widths at 1000 units/em for printable ASCII.
const ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // digits
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n..z
    334, 260, 334, 584, // '{'..'~'
];

fn char_width_1000(ch: char) -> f32 {
    match char_to_winansi(ch) {
        b @ 0x20..=0x7E => ASCII_WIDTHS[(b - 0x20) as usize] as f32,
        0x85 | 0x97 | 0x89 | 0x99 => 1000.0, // ellipsis, em dash, per mille, trademark
        0x91 | 0x92 | 0x82 => 222.0,
        0x93 | 0x94 | 0x84 => 333.0,
        0x95 => 350.0,
        _ => 556.0, // also '?', which replaces unmappable chars
    }
}

/// Width of `text` in points. Oblique shares the upright advance widths.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars()
        .filter(|c| !c.is_control())
        .map(|ch| char_width_1000(ch) * font_size / 1000.0)
        .sum()
}

/// Write one Type1 font object per style. Returns (resource name, ref) pairs
/// for the page resource dictionaries.
pub(crate) fn register_fonts(
    pdf: &mut Pdf,
    alloc: &mut impl FnMut() -> Ref,
) -> Vec<(&'static str, Ref)> {
    FontStyle::ALL
        .iter()
        .map(|&style| {
            let font_ref = alloc();
            pdf.type1_font(font_ref)
                .base_font(Name(style.base_font()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            (style.pdf_name(), font_ref)
        })
        .collect()
}
