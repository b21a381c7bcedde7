use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::catalog::glabels::ingest_document;
use crate::catalog::{MergeStats, TemplateCatalog};
use crate::error::Error;

pub const DEFAULT_TEMPLATE_URL: &str = "https://gitlab.gnome.org/GNOME/glabels/-/raw/master/templates/";

/// glabels catalog documents, in ingestion order. Later documents win
/// conflicts between ingested entries.
pub const GLABELS_TEMPLATES: [&str; 13] = [
    "avery-iso-templates.xml",
    "avery-other-templates.xml",
    "avery-us-templates.xml",
    "brother-other-templates.xml",
    "dymo-other-templates.xml",
    "maco-us-templates.xml",
    "misc-iso-templates.xml",
    "misc-other-templates.xml",
    "misc-us-templates.xml",
    "pearl-iso-templates.xml",
    "uline-us-templates.xml",
    "worldlabel-us-templates.xml",
    "zweckform-iso-templates.xml",
];

/// Where catalog documents come from.
pub trait CatalogSource {
    fn fetch(&self, name: &str) -> Result<Vec<u8>, Error>;
}

/// Documents in a local directory, e.g. a glabels checkout's `templates/`.
pub struct LocalSource {
    dir: PathBuf,
}

impl LocalSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl CatalogSource for LocalSource {
    fn fetch(&self, name: &str) -> Result<Vec<u8>, Error> {
        let path = self.dir.join(name);
        std::fs::read(&path).map_err(|e| Error::Fetch {
            source_name: name.to_string(),
            reason: format!("{}: {e}", path.display()),
        })
    }
}

/// Documents served under one base URL.
#[cfg(feature = "fetch")]
pub struct HttpSource {
    base_url: String,
    client: reqwest::blocking::Client,
}

#[cfg(feature = "fetch")]
impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| Error::Fetch {
                source_name: base_url.to_string(),
                reason: e.to_string(),
            })?;
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        Ok(Self { base_url, client })
    }
}

#[cfg(feature = "fetch")]
impl CatalogSource for HttpSource {
    fn fetch(&self, name: &str) -> Result<Vec<u8>, Error> {
        let url = format!("{}{}", self.base_url, name);
        let fetch_err = |reason: String| Error::Fetch {
            source_name: name.to_string(),
            reason,
        };
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| fetch_err(format!("{url}: {e}")))?;
        if !response.status().is_success() {
            return Err(fetch_err(format!("{url}: HTTP {}", response.status())));
        }
        let bytes = response
            .bytes()
            .map_err(|e| fetch_err(format!("{url}: {e}")))?;
        Ok(bytes.to_vec())
    }
}

pub struct SourceOutcome {
    pub name: String,
    pub result: Result<MergeStats, Error>,
}

#[derive(Default)]
pub struct IngestReport {
    pub sources: Vec<SourceOutcome>,
}

impl IngestReport {
    pub fn totals(&self) -> MergeStats {
        let mut totals = MergeStats::default();
        for stats in self.sources.iter().filter_map(|s| s.result.as_ref().ok()) {
            totals.absorb(*stats);
        }
        totals
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &Error)> {
        self.sources
            .iter()
            .filter_map(|s| s.result.as_ref().err().map(|e| (s.name.as_str(), e)))
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Fetch and merge each named document in order. A failing document is
/// recorded in the report and the run moves on to the next one.
pub fn ingest_sources(
    catalog: &mut TemplateCatalog,
    source: &dyn CatalogSource,
    names: &[&str],
) -> IngestReport {
    let mut report = IngestReport::default();
    for &name in names {
        let t0 = Instant::now();
        let result = source
            .fetch(name)
            .and_then(|bytes| ingest_document(catalog, name, &bytes));
        match &result {
            Ok(stats) => log::info!(
                "Ingested {name}: {} new, {} replaced, {} unchanged, {} protected ({:.1}ms)",
                stats.inserted,
                stats.replaced,
                stats.unchanged,
                stats.protected,
                t0.elapsed().as_secs_f64() * 1000.0,
            ),
            Err(e) => log::warn!("Skipping {name}: {e}"),
        }
        report.sources.push(SourceOutcome {
            name: name.to_string(),
            result,
        });
    }
    report
}

/// Ingest every glabels document and write the catalog to `store`.
pub fn refresh_catalog(
    catalog: &mut TemplateCatalog,
    source: &dyn CatalogSource,
    store: &Path,
) -> Result<IngestReport, Error> {
    let report = ingest_sources(catalog, source, &GLABELS_TEMPLATES);
    catalog.persist(store)?;
    Ok(report)
}
