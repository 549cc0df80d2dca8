//! Feedharvest Crawler - Two-phase feed crawl.
//!
//! This crate opens a search feed in a browser, scrolls it to gather note
//! cards, deduplicates them by note link, then visits each note's author and
//! note pages. A full CSV snapshot is written after every enriched item, so an
//! interrupted run still leaves a well-formed file behind.
//!
//! # Phases
//!
//! - [`FeedCollector`] - fixed number of scroll passes over the search feed
//! - [`deduplicate`] - last occurrence of a note link wins
//! - [`DetailEnricher`] - author and note pages, tolerant of navigation timeouts
//! - [`IncrementalWriter`] - UTF-8 (BOM) CSV snapshot after each item
//!
//! # Example
//!
//! ```rust,ignore
//! use feedharvest_browser::{BrowserEngine, EngineOptions};
//! use feedharvest_core::AppConfig;
//! use feedharvest_crawler::CrawlOrchestrator;
//!
//! let orchestrator = CrawlOrchestrator::new(AppConfig::load_with_env()?)?;
//! let browser = BrowserEngine::launch(EngineOptions::default()).await?;
//!
//! orchestrator.start_session(&browser).await?;
//! let summary = orchestrator.run(&browser).await?;
//! println!("{} records in {}", summary.unique, summary.output.display());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[allow(missing_docs)]
pub mod collector;
pub mod delay;
#[allow(missing_docs)]
pub mod enricher;
#[allow(missing_docs)]
pub mod error;
pub mod orchestrator;
#[allow(missing_docs)]
pub mod parser;
#[allow(missing_docs)]
pub mod url_builder;
#[allow(missing_docs)]
pub mod writer;

// Re-export commonly used types
pub use collector::{deduplicate, FeedCollector};
pub use enricher::DetailEnricher;
pub use error::{CrawlError, Result};
pub use orchestrator::{CrawlOrchestrator, CrawlSummary};
pub use parser::{clean_tag, Field, FieldExtractor};
pub use url_builder::{build_search_url, encode_keyword};
pub use writer::IncrementalWriter;
