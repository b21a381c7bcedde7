//! Dimension strings to canonical lengths.
//!
//! The canonical length is the PDF point (1/72 inch). Strings follow a tiny
//! grammar: a decimal number (exponents allowed) followed by an optional unit
//! suffix. A bare number is already in points.

use crate::error::Error;

pub const POINTS_PER_INCH: f32 = 72.0;
pub const POINTS_PER_MM: f32 = POINTS_PER_INCH / 25.4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    Millimeter,
    Centimeter,
    Inch,
    Point,
}

impl Unit {
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        [
            ("mm", Unit::Millimeter),
            ("cm", Unit::Centimeter),
            ("in", Unit::Inch),
            ("pt", Unit::Point),
        ]
        .into_iter()
        .find(|(s, _)| suffix.eq_ignore_ascii_case(s))
        .map(|(_, unit)| unit)
    }

    pub fn points_per_unit(self) -> f32 {
        match self {
            Unit::Millimeter => POINTS_PER_MM,
            Unit::Centimeter => POINTS_PER_MM * 10.0,
            Unit::Inch => POINTS_PER_INCH,
            Unit::Point => 1.0,
        }
    }

    pub fn to_points(self, value: f32) -> f32 {
        value * self.points_per_unit()
    }
}

pub fn mm(value: f32) -> f32 {
    Unit::Millimeter.to_points(value)
}

/// Split `"12.5mm"` into `("12.5", "mm")`. The suffix is the trailing run of
/// ASCII letters, so an exponent like `1e3mm` keeps its `e` in the number.
fn split_suffix(s: &str) -> (&str, &str) {
    let split_at = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphabetic())
        .last()
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    (s[..split_at].trim_end(), &s[split_at..])
}

pub fn parse_length(s: &str) -> Result<f32, Error> {
    let trimmed = s.trim();
    let (number, suffix) = split_suffix(trimmed);
    let unit = if suffix.is_empty() {
        Unit::Point
    } else {
        Unit::from_suffix(suffix).ok_or_else(|| Error::InvalidUnit(s.to_string()))?
    };
    let value: f32 = number
        .parse()
        .map_err(|_| Error::InvalidUnit(s.to_string()))?;
    if !value.is_finite() {
        return Err(Error::InvalidUnit(s.to_string()));
    }
    Ok(unit.to_points(value))
}

/// `None` means "no value", which callers resolve to their own default.
pub fn parse_optional_length(s: Option<&str>) -> Result<Option<f32>, Error> {
    s.map(parse_length).transpose()
}

/// Store form of a canonical length. `f32`'s Display is the shortest string
/// that parses back to the same value, so this round-trips exactly.
pub fn format_length(points: f32) -> String {
    format!("{points}pt")
}
