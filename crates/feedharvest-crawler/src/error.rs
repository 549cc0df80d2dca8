use feedharvest_browser::BrowserError;
use feedharvest_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// A node the page layout guarantees is missing.
    #[error("required field `{field}` not found (selector `{selector}`)")]
    StructuralExtraction {
        field: &'static str,
        selector: String,
    },

    #[error("invalid selector for `{field}`: {reason}")]
    InvalidSelector { field: &'static str, reason: String },

    #[error("invalid link `{href}`: {reason}")]
    InvalidLink { href: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CrawlError {
    pub(crate) fn missing(field: &'static str, selector: &str) -> Self {
        Self::StructuralExtraction {
            field,
            selector: selector.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CrawlError>;
