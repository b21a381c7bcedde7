pub mod fetch;
pub mod glabels;

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;
use crate::model::{LabelGeometry, LabelTemplate, TemplateSource};
use crate::units::{format_length, parse_length, parse_optional_length};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    Inserted,
    Replaced,
    Unchanged,
    /// A user-defined entry kept its key.
    Protected,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub inserted: usize,
    pub replaced: usize,
    pub unchanged: usize,
    pub protected: usize,
}

impl MergeStats {
    pub fn record(&mut self, outcome: MergeOutcome) {
        match outcome {
            MergeOutcome::Inserted => self.inserted += 1,
            MergeOutcome::Replaced => self.replaced += 1,
            MergeOutcome::Unchanged => self.unchanged += 1,
            MergeOutcome::Protected => self.protected += 1,
        }
    }

    pub fn absorb(&mut self, other: MergeStats) {
        self.inserted += other.inserted;
        self.replaced += other.replaced;
        self.unchanged += other.unchanged;
        self.protected += other.protected;
    }
}

/// Label templates keyed by `"<brand> <part>"`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TemplateCatalog {
    entries: BTreeMap<String, LabelTemplate>,
    selected: Option<String>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LabelTemplate)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn lookup(&self, key: &str) -> Result<&LabelTemplate, Error> {
        self.entries
            .get(key)
            .ok_or_else(|| Error::TemplateNotFound(key.to_string()))
    }

    /// Unconditional insert, for curated templates.
    pub fn insert(&mut self, key: impl Into<String>, template: LabelTemplate) {
        self.entries.insert(key.into(), template);
    }

    pub fn remove(&mut self, key: &str) -> Option<LabelTemplate> {
        self.entries.remove(key)
    }

    pub fn select(&mut self, key: Option<String>) {
        self.selected = key;
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The template named by the configured key.
    pub fn selected_default(&self) -> Result<&LabelTemplate, Error> {
        let key = self.selected.as_deref().ok_or(Error::NoLabelSelected)?;
        let template = self.lookup(key)?;
        template.resolve_paper_size()?;
        Ok(template)
    }

    /// Merge one incoming template. An existing entry is replaced only when it
    /// was itself ingested; user-defined entries are never overwritten.
    pub fn merge_entry(&mut self, key: &str, template: LabelTemplate) -> MergeOutcome {
        match self.entries.get(key) {
            None => {
                self.entries.insert(key.to_string(), template);
                MergeOutcome::Inserted
            }
            Some(existing) if existing.source == TemplateSource::UserDefined => {
                log::debug!("Keeping user-defined template '{key}'");
                MergeOutcome::Protected
            }
            Some(existing) if *existing == template => MergeOutcome::Unchanged,
            Some(_) => {
                self.entries.insert(key.to_string(), template);
                MergeOutcome::Replaced
            }
        }
    }

    pub fn merge(
        &mut self,
        incoming: impl IntoIterator<Item = (String, LabelTemplate)>,
    ) -> MergeStats {
        let mut stats = MergeStats::default();
        for (key, template) in incoming {
            stats.record(self.merge_entry(&key, template));
        }
        stats
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, Error> {
        let records: BTreeMap<String, TemplateRecord> =
            serde_yaml::from_str(text).map_err(|e| Error::Store(e.to_string()))?;
        let mut entries = BTreeMap::new();
        for (key, record) in records {
            let template = record.into_template().map_err(|e| match e {
                Error::InvalidUnit(_) | Error::InvalidTemplate(_) => {
                    Error::Store(format!("'{key}': {e}"))
                }
                other => other,
            })?;
            entries.insert(key, template);
        }
        Ok(Self {
            entries,
            selected: None,
        })
    }

    pub fn to_yaml_string(&self) -> Result<String, Error> {
        let records: BTreeMap<&str, TemplateRecord> = self
            .entries
            .iter()
            .map(|(k, t)| (k.as_str(), TemplateRecord::from_template(t)))
            .collect();
        serde_yaml::to_string(&records).map_err(|e| Error::Store(e.to_string()))
    }

    /// Read the store at `path`. A missing file is an empty catalog.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            log::info!("No template store at {}, starting empty", path.display());
            return Ok(Self::new());
        }
        let text = std::fs::read_to_string(path)?;
        let catalog = Self::from_yaml_str(&text)?;
        log::info!("Loaded {} label templates from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn persist(&self, path: &Path) -> Result<(), Error> {
        let text = self.to_yaml_string()?;
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, text)?;
        log::info!("Wrote {} label templates to {}", self.len(), path.display());
        Ok(())
    }
}

/// On-disk form of a template: lengths as unit-suffixed strings. Bare
/// numbers in hand-written stores read as points.
#[derive(Debug, Serialize, Deserialize)]
struct TemplateRecord {
    papersize: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_length_text"
    )]
    paper_width: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_length_text"
    )]
    paper_height: Option<String>,
    #[serde(deserialize_with = "length_text")]
    top_margin: String,
    #[serde(deserialize_with = "length_text")]
    left_margin: String,
    #[serde(deserialize_with = "length_text")]
    vertical_pitch: String,
    #[serde(deserialize_with = "length_text")]
    horizontal_pitch: String,
    #[serde(deserialize_with = "length_text")]
    width: String,
    #[serde(deserialize_with = "length_text")]
    height: String,
    across: u32,
    down: u32,
    #[serde(default, deserialize_with = "optional_length_text")]
    inner_margin: Option<String>,
    source: TemplateSource,
}

fn length_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected a length, got {other:?}"))),
    }
}

fn optional_length_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::Null => Ok(None),
        serde_yaml::Value::String(s) => Ok(Some(s)),
        serde_yaml::Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(D::Error::custom(format!("expected a length, got {other:?}"))),
    }
}

impl TemplateRecord {
    fn from_template(t: &LabelTemplate) -> Self {
        Self {
            papersize: t.paper_size_name.clone(),
            paper_width: Some(format_length(t.paper_width)),
            paper_height: Some(format_length(t.paper_height)),
            top_margin: format_length(t.top_margin),
            left_margin: format_length(t.left_margin),
            vertical_pitch: format_length(t.vertical_pitch),
            horizontal_pitch: format_length(t.horizontal_pitch),
            width: format_length(t.width),
            height: format_length(t.height),
            across: t.across,
            down: t.down,
            inner_margin: Some(format_length(t.inner_margin)),
            source: t.source,
        }
    }

    fn into_template(self) -> Result<LabelTemplate, Error> {
        let geometry = LabelGeometry {
            top_margin: parse_length(&self.top_margin)?,
            left_margin: parse_length(&self.left_margin)?,
            vertical_pitch: parse_length(&self.vertical_pitch)?,
            horizontal_pitch: parse_length(&self.horizontal_pitch)?,
            width: parse_length(&self.width)?,
            height: parse_length(&self.height)?,
            across: self.across,
            down: self.down,
            inner_margin: parse_optional_length(self.inner_margin.as_deref())?,
        };
        let template = LabelTemplate::new(&self.papersize, geometry, self.source)?;
        match (
            parse_optional_length(self.paper_width.as_deref())?,
            parse_optional_length(self.paper_height.as_deref())?,
        ) {
            (Some(w), Some(h)) => template.with_paper_dimensions(w, h),
            (None, None) => Ok(template),
            _ => Err(Error::InvalidTemplate(
                "paper_width and paper_height must be given together".into(),
            )),
        }
    }
}
