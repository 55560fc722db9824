//! Jobscout Core - Foundation crate for the jobscout job-posting collector.
//!
//! This crate provides shared types, error handling and configuration
//! management that all other jobscout crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared newtypes (`PostingId`, `SearchQuery`, `Timestamp`)
//!
//! # Example
//!
//! ```rust
//! use jobscout_core::{AppConfig, SearchQuery};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert_eq!(config.scraping.page_size, 25);
//!
//! let query = SearchQuery::new("engineer", "remote", 2)?;
//! assert_eq!(query.effective_pages(40), 2);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, BrowserConfig, PathsConfig, ScrapingConfig};
pub use error::{ConfigError, ConfigResult, JobscoutError};
pub use types::{PostingId, SearchQuery, Timestamp};
