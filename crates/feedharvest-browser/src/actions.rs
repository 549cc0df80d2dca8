use crate::error::Result;
use crate::session::SessionCookie;
use std::time::Duration;

/// Script for a smooth scroll to the bottom of the document.
pub const SCROLL_TO_BOTTOM: &str =
    "window.scrollTo({ top: document.body.scrollHeight, behavior: 'smooth' });";

/// Page-level operations the crawler needs from a browser.
///
/// All operations act on one shared page; callers drive them sequentially.
#[async_trait::async_trait]
pub trait BrowserActions: Send + Sync {
    /// Install session cookies before the first navigation
    async fn set_cookies(&self, cookies: &[SessionCookie]) -> Result<()>;

    /// Navigate to a URL and wait for the load to finish
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Navigate, failing with [`crate::BrowserError::Timeout`] past `timeout`
    async fn navigate_within(&self, url: &str, timeout: Duration) -> Result<()>;

    /// Wait for a selector to appear
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// Rendered inner HTML of the first element matching `selector`
    async fn inner_html(&self, selector: &str) -> Result<String>;

    /// Scroll to the bottom of the page so the feed loads more items
    async fn scroll_to_bottom(&self) -> Result<()>;
}
