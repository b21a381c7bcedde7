use std::path::PathBuf;

use crate::catalog::fetch::DEFAULT_TEMPLATE_URL;

pub const DEFAULT_STORE: &str = "labels.yaml";

/// Settings read from `TASKCARDS_*` environment variables. The CLI
/// overrides individual fields from its flags.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Template store file.
    pub store_path: PathBuf,
    /// Catalog key of the label sheet to print on.
    pub card_spec: Option<String>,
    /// Base URL the glabels catalog documents are fetched from.
    pub template_url: String,
    /// YAML file overriding the English card labels.
    pub labels_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE),
            card_spec: None,
            template_url: DEFAULT_TEMPLATE_URL.to_string(),
            labels_path: None,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(non_empty_var)
    }

    /// Build settings from any variable lookup; `from_env` passes the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            store_path: lookup("TASKCARDS_STORE")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            card_spec: lookup("TASKCARDS_CARD_SPEC"),
            template_url: lookup("TASKCARDS_TEMPLATE_URL").unwrap_or(defaults.template_url),
            labels_path: lookup("TASKCARDS_LABELS").map(PathBuf::from),
        }
    }
}
