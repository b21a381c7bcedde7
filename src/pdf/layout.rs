use crate::fonts::line_height;

pub const ELLIPSIS: char = '\u{2026}';

/// Lines of a text box after wrapping and truncation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FittedText {
    pub lines: Vec<String>,
    /// Some text did not fit and the last kept line ends in an ellipsis.
    pub truncated: bool,
}

// Slack for box heights computed as exact multiples of the line height.
const HEIGHT_EPSILON: f32 = 0.01;

/// Lines of `font_size` text that fit a box `height` tall.
pub fn lines_that_fit(height: f32, font_size: f32) -> usize {
    let line_h = line_height(font_size);
    if line_h <= 0.0 || height <= 0.0 {
        return 0;
    }
    ((height + HEIGHT_EPSILON) / line_h).floor() as usize
}

/// Split a word wider than the box into pieces that fit, char by char.
fn break_long_word(word: &str, max_width: f32, measure: &impl Fn(&str) -> f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for ch in word.chars() {
        current.push(ch);
        if measure(&current) > max_width && current.chars().count() > 1 {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(ch);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Greedy word wrap. Hard line breaks in `text` always start a new line.
pub fn wrap_lines(text: &str, max_width: f32, measure: &impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let proposed = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if measure(&proposed) <= max_width {
                current = proposed;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if measure(word) <= max_width {
                current = word.to_string();
            } else {
                let mut pieces = break_long_word(word, max_width, measure);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }
        lines.push(current);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// Shorten `line` until it plus an ellipsis fits `max_width`.
fn ellipsize(line: &str, max_width: f32, measure: &impl Fn(&str) -> f32) -> String {
    let mut kept: String = line.trim_end().to_string();
    loop {
        let candidate = format!("{kept}{ELLIPSIS}");
        if kept.is_empty() || measure(&candidate) <= max_width {
            return candidate;
        }
        kept.pop();
        kept.truncate(kept.trim_end().len());
    }
}

/// Wrap `text` into a `width` x `height` box. Overflow keeps as many lines as
/// fit and marks the last one with an ellipsis; a box with room for no line
/// at all gets a lone ellipsis.
pub fn fit_text(
    text: &str,
    width: f32,
    height: f32,
    font_size: f32,
    measure: impl Fn(&str) -> f32,
) -> FittedText {
    let mut lines = wrap_lines(text, width, &measure);
    let max_lines = lines_that_fit(height, font_size);
    if lines.len() <= max_lines {
        return FittedText {
            lines,
            truncated: false,
        };
    }

    // Too short for a single line: the cut still has to show.
    if max_lines == 0 {
        return FittedText {
            lines: vec![ELLIPSIS.to_string()],
            truncated: true,
        };
    }

    lines.truncate(max_lines);
    if let Some(last) = lines.last_mut() {
        *last = ellipsize(last, width, &measure);
    }
    FittedText {
        lines,
        truncated: true,
    }
}
