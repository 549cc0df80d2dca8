//! Scroll-driven feed collection.

use crate::delay::pause;
use crate::error::{CrawlError, Result};
use crate::parser::FieldExtractor;
use crate::url_builder::build_search_url;
use feedharvest_browser::{BrowserActions, BrowserError};
use feedharvest_core::{AppConfig, DelayConfig, FeedItem};
use std::collections::HashMap;

/// Inner HTML of a container the page layout guarantees.
///
/// A container that never renders is a structural failure, not a browser one.
pub(crate) async fn container_html<B: BrowserActions + ?Sized>(
    browser: &B,
    field: &'static str,
    selector: &str,
) -> Result<String> {
    match browser.inner_html(selector).await {
        Ok(html) => Ok(html),
        Err(BrowserError::SelectorNotFound(_)) => Err(CrawlError::missing(field, selector)),
        Err(e) => Err(e.into()),
    }
}

/// Collapse items sharing a `note_link`.
///
/// The last occurrence of each link supplies the values; the position is
/// that of its first occurrence.
pub fn deduplicate(items: Vec<FeedItem>) -> Vec<FeedItem> {
    let mut index: HashMap<String, usize> = HashMap::with_capacity(items.len());
    let mut unique: Vec<FeedItem> = Vec::with_capacity(items.len());

    for item in items {
        match index.get(&item.note_link) {
            Some(&position) => unique[position] = item,
            None => {
                index.insert(item.note_link.clone(), unique.len());
                unique.push(item);
            }
        }
    }

    unique
}

/// Scrolls the search feed and gathers every card it renders.
pub struct FeedCollector<'a> {
    extractor: &'a FieldExtractor,
    base_url: String,
    feed_container: String,
    delays: DelayConfig,
}

impl<'a> FeedCollector<'a> {
    pub fn new(extractor: &'a FieldExtractor, config: &AppConfig) -> Self {
        Self {
            extractor,
            base_url: config.crawl.base_url.clone(),
            feed_container: config.selectors.feed_container.clone(),
            delays: config.delays.clone(),
        }
    }

    /// Open the search page for `query` and run exactly `max_passes` feed passes.
    ///
    /// Items come back in discovery order with duplicates left in; see
    /// [`deduplicate`].
    pub async fn collect<B: BrowserActions + ?Sized>(
        &self,
        browser: &B,
        query: &str,
        max_passes: u32,
    ) -> Result<Vec<FeedItem>> {
        let url = build_search_url(&self.base_url, query);
        tracing::info!(query, %url, max_passes, "opening search feed");
        browser.navigate(&url).await?;
        pause(self.delays.settle).await;

        let mut items = Vec::new();
        for pass in 1..=max_passes {
            let html = container_html(browser, "feed_container", &self.feed_container).await?;
            let found = self.extractor.feed_items(&html)?;
            tracing::debug!(pass, found = found.len(), total = items.len() + found.len(), "feed pass");
            items.extend(found);

            browser.scroll_to_bottom().await?;
            pause(self.delays.scroll).await;
        }

        tracing::info!(scanned = items.len(), "feed collection finished");
        Ok(items)
    }
}
