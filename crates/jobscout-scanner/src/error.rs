//! Error types for listing enumeration and record extraction.

use thiserror::Error;

/// Errors that can occur while scanning the job site.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The first results page has no usable pagination control
    #[error("pagination control not found on {url}; the search may have no results or the selectors are outdated")]
    PaginationMissing {
        /// Search URL that was loaded
        url: String,
    },

    /// A selector in the site definition does not parse
    #[error("invalid selector for {field}: {reason}")]
    InvalidSelector {
        /// Field the selector belongs to
        field: String,
        /// Parser message
        reason: String,
    },

    /// The site definition override file does not parse
    #[error("failed to parse site definition {path}: {source}")]
    SiteDefinitionParse {
        /// Path of the override file
        path: String,
        /// TOML parse error
        #[source]
        source: toml::de::Error,
    },

    /// The site definition is structurally incomplete
    #[error("invalid site definition: {0}")]
    InvalidSiteDefinition(String),

    /// Identifier file content problems
    #[error("invalid identifier file {path}: {reason}")]
    IdFile {
        /// Path of the identifier file
        path: String,
        /// What is wrong with it
        reason: String,
    },

    /// Browser failure (navigation, snapshot)
    #[error("Browser error: {0}")]
    Browser(#[from] jobscout_browser::BrowserError),

    /// I/O error reading or writing scan files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;
