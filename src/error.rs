use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid length '{0}': expected <number>[mm|cm|in|pt]")]
    InvalidUnit(String),

    #[error("no label template selected")]
    NoLabelSelected,

    #[error("label template '{0}' not found in catalog")]
    TemplateNotFound(String),

    #[error("paper size '{0}' not supported")]
    UnsupportedPaperSize(String),

    #[error("invalid label template: {0}")]
    InvalidTemplate(String),

    #[error("malformed template document '{source_name}': {reason}")]
    MalformedTemplateDocument { source_name: String, reason: String },

    #[error("failed to fetch '{source_name}': {reason}")]
    Fetch { source_name: String, reason: String },

    #[error("store error: {0}")]
    Store(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(source_name: &str, reason: impl Into<String>) -> Self {
        Error::MalformedTemplateDocument {
            source_name: source_name.to_string(),
            reason: reason.into(),
        }
    }
}
