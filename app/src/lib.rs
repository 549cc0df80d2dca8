//! Feedharvest application shell
//!
//! Loads configuration, drives one browser through a full crawl, and reports
//! the outcome. The pipeline itself lives in the `crates/` directory.

use anyhow::Context;
use feedharvest_browser::{BrowserEngine, EngineOptions};
use feedharvest_core::{AppConfig, BrowserSettings};
use feedharvest_crawler::{CrawlOrchestrator, CrawlSummary};
use std::time::Duration;
use tracing::{error, info};

/// Initialize tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,feedharvest=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

/// Browser launch options for the configured settings.
#[must_use]
pub fn engine_options(settings: &BrowserSettings) -> EngineOptions {
    EngineOptions {
        headless: settings.headless,
        navigation_timeout: Duration::from_millis(settings.navigation_timeout_ms),
        element_wait: Duration::from_millis(settings.element_wait_ms),
        user_agent: settings.user_agent.clone(),
    }
}

async fn crawl(
    orchestrator: &CrawlOrchestrator,
    browser: &BrowserEngine,
) -> anyhow::Result<CrawlSummary> {
    orchestrator
        .start_session(browser)
        .await
        .context("failed to start the browsing session")?;
    let summary = orchestrator.run(browser).await.context("crawl stopped")?;
    Ok(summary)
}

/// Run one full crawl with the configuration from disk and environment.
pub async fn run() -> anyhow::Result<()> {
    info!("Starting feedharvest v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load_with_env().context("failed to load configuration")?;
    let options = engine_options(&config.browser);
    let orchestrator = CrawlOrchestrator::new(config).context("invalid crawl configuration")?;

    let browser = BrowserEngine::launch(options)
        .await
        .context("failed to launch browser")?;

    let outcome = crawl(&orchestrator, &browser).await;

    if let Err(e) = browser.close().await {
        error!("failed to close browser: {}", e);
    }

    let summary = outcome?;
    info!(
        scanned = summary.scanned,
        unique = summary.unique,
        enriched = summary.enriched,
        author_timeouts = summary.author_timeouts,
        note_timeouts = summary.note_timeouts,
        output = %summary.output.display(),
        "crawl finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_options_from_settings() {
        let settings = BrowserSettings {
            headless: true,
            navigation_timeout_ms: 1_500,
            element_wait_ms: 250,
            user_agent: Some("feedharvest-test".to_string()),
        };

        let options = engine_options(&settings);
        assert!(options.headless);
        assert_eq!(options.navigation_timeout, Duration::from_millis(1_500));
        assert_eq!(options.element_wait, Duration::from_millis(250));
        assert_eq!(options.user_agent.as_deref(), Some("feedharvest-test"));
    }

    #[test]
    fn test_default_settings_run_headful() {
        let options = engine_options(&BrowserSettings::default());
        assert!(!options.headless);
        assert_eq!(options.navigation_timeout, Duration::from_secs(60));
    }
}
