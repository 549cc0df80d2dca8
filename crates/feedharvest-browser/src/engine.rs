use crate::actions::{BrowserActions, SCROLL_TO_BOTTOM};
use crate::error::{BrowserError, Result};
use crate::fingerprint::FingerprintConfig;
use crate::session::SessionCookie;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetTimezoneOverrideParams;
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// How often `wait_for_selector` re-checks the DOM.
const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Launch options for [`BrowserEngine`].
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Run without a visible window
    pub headless: bool,
    /// Upper bound used by `navigate_within`; CDP requests get a little more
    pub navigation_timeout: Duration,
    /// How long `inner_html` waits for its element to render
    pub element_wait: Duration,
    /// Fixed user agent instead of a randomized one
    pub user_agent: Option<String>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            headless: false,
            navigation_timeout: Duration::from_secs(60),
            element_wait: Duration::from_secs(30),
            user_agent: None,
        }
    }
}

/// Browser automation engine owning one Chromium instance and one page.
pub struct BrowserEngine {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    fingerprint: FingerprintConfig,
    element_wait: Duration,
}

impl BrowserEngine {
    /// Launch Chromium and open a blank page.
    pub async fn launch(options: EngineOptions) -> Result<Self> {
        let mut fingerprint = FingerprintConfig::randomized();
        if let Some(user_agent) = &options.user_agent {
            fingerprint = fingerprint.with_user_agent(user_agent.clone());
        }

        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(fingerprint.window_width, fingerprint.window_height)
            .viewport(None)
            .request_timeout(options.navigation_timeout + Duration::from_secs(5))
            .args(fingerprint.launch_args());
        if !options.headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(BrowserError::ChromiumError)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        // The handler drives every CDP exchange; it must run for the page to respond
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        page.execute(SetTimezoneOverrideParams::new(fingerprint.timezone.clone()))
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        tracing::info!(
            headless = options.headless,
            user_agent = %fingerprint.user_agent,
            width = fingerprint.window_width,
            height = fingerprint.window_height,
            "browser launched"
        );

        Ok(Self {
            browser,
            page,
            handler,
            fingerprint,
            element_wait: options.element_wait,
        })
    }

    /// Identity this session presents.
    pub fn fingerprint(&self) -> &FingerprintConfig {
        &self.fingerprint
    }

    /// Close the browser and wait for the CDP handler to finish.
    pub async fn close(mut self) -> Result<()> {
        self.browser
            .close()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        if let Err(e) = self.browser.wait().await {
            tracing::debug!("browser process wait failed: {}", e);
        }
        if let Err(e) = self.handler.await {
            tracing::debug!("CDP handler task ended abnormally: {}", e);
        }
        tracing::info!("browser closed");
        Ok(())
    }
}

fn navigation_error(url: &str, err: CdpError) -> BrowserError {
    match err {
        CdpError::Timeout => BrowserError::Timeout(url.to_string()),
        other => BrowserError::NavigationError(format!("{url}: {other}")),
    }
}

#[async_trait::async_trait]
impl BrowserActions for BrowserEngine {
    async fn set_cookies(&self, cookies: &[SessionCookie]) -> Result<()> {
        let params = cookies.iter().map(SessionCookie::to_param).collect();
        self.page
            .set_cookies(params)
            .await
            .map_err(|e| BrowserError::ChromiumError(format!("setting cookies: {e}")))?;
        tracing::debug!(count = cookies.len(), "session cookies installed");
        Ok(())
    }

    async fn navigate(&self, url: &str) -> Result<()> {
        tracing::debug!(url, "navigating");
        self.page
            .goto(url)
            .await
            .map_err(|e| navigation_error(url, e))?;
        Ok(())
    }

    async fn navigate_within(&self, url: &str, timeout: Duration) -> Result<()> {
        match tokio::time::timeout(timeout, self.navigate(url)).await {
            Ok(result) => result,
            Err(_) => Err(BrowserError::Timeout(format!(
                "{url} did not load within {}ms",
                timeout.as_millis()
            ))),
        }
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(BrowserError::SelectorNotFound(selector.to_string()));
            }
            tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
        }
    }

    async fn inner_html(&self, selector: &str) -> Result<String> {
        self.wait_for_selector(selector, self.element_wait).await?;

        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;

        element
            .inner_html()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?
            .ok_or_else(|| BrowserError::SelectorNotFound(selector.to_string()))
    }

    async fn scroll_to_bottom(&self) -> Result<()> {
        self.page
            .evaluate(SCROLL_TO_BOTTOM)
            .await
            .map_err(|e| BrowserError::ChromiumError(format!("scroll failed: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdp_timeout_maps_to_timeout() {
        let err = navigation_error("https://example.com", CdpError::Timeout);
        assert!(err.is_timeout());
    }

    #[test]
    fn test_default_options() {
        let options = EngineOptions::default();
        assert!(!options.headless);
        assert_eq!(options.navigation_timeout, Duration::from_secs(60));
        assert!(options.user_agent.is_none());
    }
}
