//! Browser automation session for JavaScript-heavy job listing pages.
//!
//! Provides a single headless Chrome page behind the [`BrowserActions`]
//! trait, with readiness polling instead of blind sleeps.

pub mod actions;
pub mod engine;
pub mod error;
pub mod launch;

pub use actions::BrowserActions;
pub use engine::BrowserEngine;
pub use error::{BrowserError, Result};
pub use launch::LaunchOptions;
