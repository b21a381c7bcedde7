use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::paper::paper_dimensions;
use crate::units::mm;

/// Axis-aligned box in page coordinates. Origin is the page's bottom-left
/// corner and `y` grows upward, so `(x, y)` is the box's bottom-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Shrink by `margin` on every side.
    pub fn inset(&self, margin: f32) -> Self {
        Self {
            x: self.x + margin,
            y: self.y + margin,
            width: self.width - 2.0 * margin,
            height: self.height - 2.0 * margin,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateSource {
    #[serde(rename = "user-defined")]
    UserDefined,
    #[serde(rename = "ingested", alias = "glabel")]
    Ingested,
}

/// Label-cell geometry as read from a catalog, before the paper size is
/// resolved. All lengths in points.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelGeometry {
    pub top_margin: f32,
    pub left_margin: f32,
    pub vertical_pitch: f32,
    pub horizontal_pitch: f32,
    pub width: f32,
    pub height: f32,
    pub across: u32,
    pub down: u32,
    pub inner_margin: Option<f32>, // None = default 1mm
}

/// One brand/part of adhesive label sheet. All lengths in points.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelTemplate {
    pub paper_size_name: String,
    pub paper_width: f32,
    pub paper_height: f32,
    pub top_margin: f32,
    pub left_margin: f32,
    pub vertical_pitch: f32,
    pub horizontal_pitch: f32,
    pub width: f32,
    pub height: f32,
    pub across: u32,
    pub down: u32,
    pub inner_margin: f32,
    pub source: TemplateSource,
}

pub const DEFAULT_INNER_MARGIN_MM: f32 = 1.0;

impl LabelTemplate {
    pub fn new(
        paper_size_name: &str,
        geometry: LabelGeometry,
        source: TemplateSource,
    ) -> Result<Self, Error> {
        let (paper_width, paper_height) = paper_dimensions(paper_size_name)
            .ok_or_else(|| Error::UnsupportedPaperSize(paper_size_name.to_string()))?;

        let template = Self {
            paper_size_name: paper_size_name.to_string(),
            paper_width,
            paper_height,
            top_margin: geometry.top_margin,
            left_margin: geometry.left_margin,
            vertical_pitch: geometry.vertical_pitch,
            horizontal_pitch: geometry.horizontal_pitch,
            width: geometry.width,
            height: geometry.height,
            across: geometry.across,
            down: geometry.down,
            inner_margin: geometry
                .inner_margin
                .unwrap_or_else(|| mm(DEFAULT_INNER_MARGIN_MM)),
            source,
        };
        template.validate()?;
        Ok(template)
    }

    /// Replace the named sheet's dimensions with explicit ones.
    pub fn with_paper_dimensions(mut self, width: f32, height: f32) -> Result<Self, Error> {
        self.paper_width = width;
        self.paper_height = height;
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), Error> {
        let lengths = [
            ("paper_width", self.paper_width),
            ("paper_height", self.paper_height),
            ("top_margin", self.top_margin),
            ("left_margin", self.left_margin),
            ("vertical_pitch", self.vertical_pitch),
            ("horizontal_pitch", self.horizontal_pitch),
            ("width", self.width),
            ("height", self.height),
            ("inner_margin", self.inner_margin),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidTemplate(format!(
                    "{name} must be a non-negative length, got {value}"
                )));
            }
        }
        if self.across == 0 || self.down == 0 {
            return Err(Error::InvalidTemplate(format!(
                "grid must have at least one cell, got {}x{}",
                self.across, self.down
            )));
        }
        Ok(())
    }

    pub fn cells_per_page(&self) -> usize {
        self.across as usize * self.down as usize
    }

    /// Sheet dimensions of the named paper size. Fails if the name is not a
    /// known physical sheet.
    pub fn resolve_paper_size(&self) -> Result<(f32, f32), Error> {
        paper_dimensions(&self.paper_size_name)
            .ok_or_else(|| Error::UnsupportedPaperSize(self.paper_size_name.clone()))
    }
}

/// One hop of an ancestry chain, e.g. `("Story", 12)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestryHop {
    pub tracker: String,
    pub id: u32,
}

/// A story or task as supplied by the work-item provider.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkItem {
    pub id: u32,
    pub subject: String,
    pub description: Option<String>,
    pub estimated_hours: Option<f32>,
    pub story_points: Option<f32>,
    pub category: Option<String>,
    pub fixed_version: Option<String>,
    pub ancestry: Vec<AncestryHop>, // root first, ends with the item itself
    pub position: Option<u32>,      // None = not prioritized
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardKind {
    Task,
    Story,
}
