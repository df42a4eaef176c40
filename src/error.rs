use thiserror::Error;

pub(crate) const MISSING_PROCESS: &str = "Process";
pub(crate) const MISSING_POOLS: &str = "Package.Pools";

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading a document or deriving views from it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("bad attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("bad escape sequence: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// A required nested field was absent where the document schema demands it.
    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid value in field {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Annotation text lookup failed. Contained locally during note
    /// extraction, where the raw text is used instead.
    #[error("could not resolve annotation text: {0}")]
    Annotation(String),
}
