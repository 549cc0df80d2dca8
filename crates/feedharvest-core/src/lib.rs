//! Feedharvest Core - Foundation crate for the feedharvest crawler.
//!
//! This crate provides the configuration layer, error types and the record
//! model that the browser and crawler crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Configuration error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`types`] - Feed items and their enrichment (`FeedItem`, `EnrichedRecord`)
//!
//! # Example
//!
//! ```rust
//! use feedharvest_core::AppConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! config.validate()?;
//! assert_eq!(config.crawl.max_scroll_passes, 25);
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
pub use config::{
    AppConfig, BrowserSettings, CrawlConfig, DelayConfig, DelayRange, SelectorConfig,
};
pub use error::{ConfigError, ConfigResult};
pub use types::{AuthorProfile, EnrichedRecord, FeedItem, NoteDetail};
