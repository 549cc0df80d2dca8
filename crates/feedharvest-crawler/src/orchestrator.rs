//! Crawl orchestrator for the two-phase pipeline.
//!
//! This module provides the `CrawlOrchestrator`, which collects the search
//! feed, deduplicates it, then enriches items one at a time and writes a full
//! snapshot after each.

use crate::collector::{deduplicate, FeedCollector};
use crate::delay::pause;
use crate::enricher::DetailEnricher;
use crate::error::Result;
use crate::parser::FieldExtractor;
use crate::writer::IncrementalWriter;
use feedharvest_browser::{load_cookies, BrowserActions};
use feedharvest_core::{AppConfig, EnrichedRecord};
use std::path::PathBuf;

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Feed items seen across all passes, duplicates included
    pub scanned: usize,
    /// Items left after deduplication
    pub unique: usize,
    /// Items whose author and note pages both loaded
    pub enriched: usize,
    /// Author pages skipped after a navigation timeout
    pub author_timeouts: usize,
    /// Note pages skipped after a navigation timeout
    pub note_timeouts: usize,
    /// Where the final snapshot was written
    pub output: PathBuf,
}

/// Runs collection and enrichment against one browser page.
pub struct CrawlOrchestrator {
    config: AppConfig,
    extractor: FieldExtractor,
    writer: IncrementalWriter,
}

impl CrawlOrchestrator {
    /// Validate `config` and compile its selectors.
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let extractor = FieldExtractor::new(&config.selectors, &config.crawl.base_url)?;
        let writer = IncrementalWriter::new(config.crawl.output_path());

        Ok(Self {
            config,
            extractor,
            writer,
        })
    }

    /// Configuration this orchestrator runs with.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Install the exported session cookies on the browser page.
    pub async fn start_session<B: BrowserActions + ?Sized>(&self, browser: &B) -> Result<()> {
        let cookies = load_cookies(&self.config.crawl.cookies_path)?;
        browser.set_cookies(&cookies).await?;
        Ok(())
    }

    /// Run the full pipeline.
    ///
    /// A structural extraction failure stops the run; the snapshot written
    /// after the last completed item stays on disk.
    pub async fn run<B: BrowserActions + ?Sized>(&self, browser: &B) -> Result<CrawlSummary> {
        let crawl = &self.config.crawl;

        let collector = FeedCollector::new(&self.extractor, &self.config);
        let scanned = collector
            .collect(browser, &crawl.keyword, crawl.max_scroll_passes)
            .await?;
        let scanned_count = scanned.len();

        let mut records: Vec<EnrichedRecord> = deduplicate(scanned)
            .into_iter()
            .map(EnrichedRecord::from)
            .collect();
        tracing::info!(
            scanned = scanned_count,
            unique = records.len(),
            "deduplicated feed items"
        );
        pause(self.config.delays.settle).await;

        let enricher = DetailEnricher::new(&self.extractor, &self.config);
        let total = records.len();
        let mut summary = CrawlSummary {
            scanned: scanned_count,
            unique: total,
            enriched: 0,
            author_timeouts: 0,
            note_timeouts: 0,
            output: self.writer.destination().to_path_buf(),
        };

        for index in 0..total {
            let record = records[index].clone();
            tracing::info!(
                item = index + 1,
                total,
                title = %record.item.title,
                "enriching"
            );

            let record = enricher.enrich(browser, record).await?;
            if record.author.is_none() {
                summary.author_timeouts += 1;
            }
            if record.note.is_none() {
                summary.note_timeouts += 1;
            }
            if record.is_fully_enriched() {
                summary.enriched += 1;
            }
            records[index] = record;

            self.writer.write(&records)?;
            tracing::info!(item = index + 1, total, "progress saved");
        }

        Ok(summary)
    }
}
