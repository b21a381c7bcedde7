use std::path::Path;

use serde::Deserialize;

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelKey {
    Hours,
    Points,
    Category,
    NotPrioritized,
    ProductBacklog,
}

/// Resolves display strings for card labels. Returned strings are printed
/// verbatim.
pub trait Localizer {
    fn label(&self, key: LabelKey) -> String;
}

/// Label strings for one language. Missing keys in a labels file fall back
/// to English.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub label_hours: String,
    pub label_points: String,
    pub field_category: String,
    pub label_not_prioritized: String,
    pub product_backlog: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            label_hours: "hours".into(),
            label_points: "points".into(),
            field_category: "Category".into(),
            label_not_prioritized: "not prioritized".into(),
            product_backlog: "Product backlog".into(),
        }
    }
}

impl Labels {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&text)
            .map_err(|e| Error::Store(format!("{}: {e}", path.display())))
    }
}

impl Localizer for Labels {
    fn label(&self, key: LabelKey) -> String {
        match key {
            LabelKey::Hours => &self.label_hours,
            LabelKey::Points => &self.label_points,
            LabelKey::Category => &self.field_category,
            LabelKey::NotPrioritized => &self.label_not_prioritized,
            LabelKey::ProductBacklog => &self.product_backlog,
        }
        .clone()
    }
}
