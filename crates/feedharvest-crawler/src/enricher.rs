//! Per-item enrichment from the author and note pages.
//!
//! Only a navigation timeout is tolerated: the page's fields stay unset and
//! the item moves on. Everything else, including a missing required node,
//! propagates and ends the run.

use crate::collector::container_html;
use crate::delay::pause;
use crate::error::Result;
use crate::parser::FieldExtractor;
use feedharvest_browser::BrowserActions;
use feedharvest_core::{AppConfig, DelayRange, EnrichedRecord};
use std::time::Duration;

/// Visits an item's author and note pages and fills in their fields.
pub struct DetailEnricher<'a> {
    extractor: &'a FieldExtractor,
    author_container: String,
    note_container: String,
    navigation_timeout: Duration,
    detail_delay: DelayRange,
}

impl<'a> DetailEnricher<'a> {
    pub fn new(extractor: &'a FieldExtractor, config: &AppConfig) -> Self {
        Self {
            extractor,
            author_container: config.selectors.author_container.clone(),
            note_container: config.selectors.note_container.clone(),
            navigation_timeout: Duration::from_millis(config.browser.navigation_timeout_ms),
            detail_delay: config.delays.detail,
        }
    }

    /// Navigate to `url`; `Ok(false)` means the page timed out and was skipped.
    async fn open<B: BrowserActions + ?Sized>(
        &self,
        browser: &B,
        page: &'static str,
        url: &str,
    ) -> Result<bool> {
        match browser.navigate_within(url, self.navigation_timeout).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_timeout() => {
                tracing::warn!(page, url, error = %e, "page timed out, leaving its fields unset");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Enrich one record, returning the updated copy.
    pub async fn enrich<B: BrowserActions + ?Sized>(
        &self,
        browser: &B,
        record: EnrichedRecord,
    ) -> Result<EnrichedRecord> {
        let mut record = record;

        let author_link = record.item.author_link.clone();
        if self.open(browser, "author", &author_link).await? {
            let html = container_html(browser, "author_container", &self.author_container).await?;
            let author = self.extractor.author_profile(&html)?;
            record = record.with_author(author);
        }
        pause(self.detail_delay).await;

        let note_link = record.note_link().to_string();
        if self.open(browser, "note", &note_link).await? {
            let html = container_html(browser, "note_container", &self.note_container).await?;
            let note = self.extractor.note_detail(&html)?;
            record = record.with_note(note);
        }
        pause(self.detail_delay).await;

        Ok(record)
    }
}
