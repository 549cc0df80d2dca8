//! Configuration management for feedharvest.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. Every section has defaults matching the
//! target site's current layout, so a missing config file is not an error.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/feedharvest/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// What to search for and where to write results
    pub crawl: CrawlConfig,
    /// Browser automation settings
    pub browser: BrowserSettings,
    /// Randomized pause ranges
    pub delays: DelayConfig,
    /// CSS selectors used to pull fields out of rendered pages
    pub selectors: SelectorConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path.
    ///
    /// Unlike [`AppConfig::load`], a missing file is an error here.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides, then validate.
    ///
    /// Supports the following environment variables:
    /// - `FEEDHARVEST_KEYWORD`: Override the search keyword
    /// - `FEEDHARVEST_SCROLL_PASSES`: Override the number of feed passes
    /// - `FEEDHARVEST_OUTPUT`: Override the output CSV path
    /// - `FEEDHARVEST_COOKIES`: Override the cookie file path
    /// - `FEEDHARVEST_HEADLESS`: Override browser headless mode (true/false)
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment).
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(keyword) = lookup("FEEDHARVEST_KEYWORD") {
            tracing::debug!("Override crawl.keyword from env: {}", keyword);
            self.crawl.keyword = keyword;
        }

        if let Some(val) = lookup("FEEDHARVEST_SCROLL_PASSES") {
            if let Ok(passes) = val.parse() {
                self.crawl.max_scroll_passes = passes;
                tracing::debug!("Override crawl.max_scroll_passes from env: {}", passes);
            }
        }

        if let Some(val) = lookup("FEEDHARVEST_OUTPUT") {
            tracing::debug!("Override crawl.output_path from env: {}", val);
            self.crawl.output_path = Some(PathBuf::from(val));
        }

        if let Some(val) = lookup("FEEDHARVEST_COOKIES") {
            tracing::debug!("Override crawl.cookies_path from env: {}", val);
            self.crawl.cookies_path = PathBuf::from(val);
        }

        if let Some(val) = lookup("FEEDHARVEST_HEADLESS") {
            if let Ok(headless) = val.parse() {
                self.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }
    }

    /// Check values that would otherwise fail deep inside a run.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.crawl.keyword.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "crawl.keyword".to_string(),
                reason: "keyword cannot be empty".to_string(),
            });
        }

        if self.crawl.max_scroll_passes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "crawl.max_scroll_passes".to_string(),
                reason: "at least one feed pass is required".to_string(),
            });
        }

        self.delays.settle.validate("delays.settle")?;
        self.delays.scroll.validate("delays.scroll")?;
        self.delays.detail.validate("delays.detail")?;

        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/feedharvest/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "feedharvest", "feedharvest")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// What to crawl and where the results go.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Search keyword, double percent-encoded into the search URL
    pub keyword: String,
    /// Site origin; relative links found in the feed are resolved against it
    pub base_url: String,
    /// Number of scroll-and-extract passes over the feed
    pub max_scroll_passes: u32,
    /// JSON cookie export loaded into the browser before the first navigation
    pub cookies_path: PathBuf,
    /// CSV destination; `df_{keyword}.csv` in the working directory when unset
    pub output_path: Option<PathBuf>,
}

impl CrawlConfig {
    /// Resolve the CSV destination.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("df_{}.csv", self.keyword)))
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            keyword: "mac软件".to_string(),
            base_url: "https://www.xiaohongshu.com".to_string(),
            max_scroll_passes: 25,
            cookies_path: PathBuf::from("cookies.json"),
            output_path: None,
        }
    }
}

/// Browser automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Run browser in headless mode
    pub headless: bool,
    /// Upper bound for author and note page navigations, in milliseconds
    pub navigation_timeout_ms: u64,
    /// How long to wait for a container element to render, in milliseconds
    pub element_wait_ms: u64,
    /// Fixed user agent; a randomized fingerprint is used when unset
    pub user_agent: Option<String>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: false,
            navigation_timeout_ms: 60_000,
            element_wait_ms: 30_000,
            user_agent: None,
        }
    }
}

/// Inclusive range for a randomized pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    /// Lower bound in milliseconds
    pub min_ms: u64,
    /// Upper bound in milliseconds
    pub max_ms: u64,
}

impl DelayRange {
    /// Create a new range.
    #[must_use]
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// A range that never pauses.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0, 0)
    }

    fn validate(&self, field: &str) -> ConfigResult<()> {
        if self.min_ms > self.max_ms {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                reason: format!(
                    "min_ms ({}) exceeds max_ms ({})",
                    self.min_ms, self.max_ms
                ),
            });
        }
        Ok(())
    }
}

/// Pause ranges between page interactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayConfig {
    /// After opening the search page, and again after deduplication
    pub settle: DelayRange,
    /// After each scroll-to-bottom
    pub scroll: DelayRange,
    /// After each author and note page
    pub detail: DelayRange,
}

impl DelayConfig {
    /// No pauses at all. Useful for tests and offline replays.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            settle: DelayRange::zero(),
            scroll: DelayRange::zero(),
            detail: DelayRange::zero(),
        }
    }
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            settle: DelayRange::new(5_000, 10_000),
            scroll: DelayRange::new(2_000, 5_000),
            detail: DelayRange::new(5_000, 10_000),
        }
    }
}

/// CSS selectors for every field the crawler reads.
///
/// Container selectors are resolved against the live page; the rest are
/// applied to the container's inner HTML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Search results container
    pub feed_container: String,
    /// One feed card inside the container
    pub feed_item: String,
    /// Card title (optional on the page)
    pub title: String,
    /// Author display name
    pub author_name: String,
    /// Anchor pointing at the author profile
    pub author_link: String,
    /// Anchor pointing at the note detail page
    pub cover_link: String,

    /// Author profile container
    pub author_container: String,
    /// Author self description (optional on the page)
    pub author_desc: String,
    /// Follows counter
    pub author_follows: String,
    /// Following counter
    pub author_following: String,
    /// Likes-and-collects counter
    pub author_likes_and_collects: String,

    /// Note interaction container
    pub note_container: String,
    /// Collect counter
    pub note_collects: String,
    /// Comment counter
    pub note_comments: String,
    /// Like counter
    pub note_likes: String,
    /// Attribute marking a counter whose real value is hidden
    pub disabled_marker: String,
    /// Publication date
    pub note_date: String,
    /// Body text
    pub note_content: String,
    /// Topic tag anchors
    pub note_tags: String,
    /// Boilerplate appended to every topic tag
    pub tag_boilerplate: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            feed_container: "#global > div.main-container > div.with-side-bar.main-content > div > div.feeds-container".to_string(),
            feed_item: ".note-item[data-width]".to_string(),
            title: ".title > span".to_string(),
            author_name: ".name".to_string(),
            author_link: ".author".to_string(),
            cover_link: ".cover".to_string(),

            author_container: "#userPageContainer > div.user > div".to_string(),
            author_desc: ".user-desc".to_string(),
            author_follows: ".user-interactions div:nth-child(1) .count".to_string(),
            author_following: ".user-interactions div:nth-child(2) .count".to_string(),
            author_likes_and_collects: ".user-interactions div:nth-child(3) .count".to_string(),

            note_container: "#noteContainer > div.interaction-container".to_string(),
            note_collects: ".collect-wrapper .count".to_string(),
            note_comments: ".chat-wrapper .count".to_string(),
            note_likes: ".like-wrapper.like-active .count".to_string(),
            disabled_marker: "selected-disabled-search".to_string(),
            note_date: ".bottom-container .date".to_string(),
            note_content: "#detail-desc > span".to_string(),
            note_tags: "#detail-desc .tag".to_string(),
            tag_boilerplate: "话题可以点击搜索啦~".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.crawl.keyword, "mac软件");
        assert_eq!(config.crawl.max_scroll_passes, 25);
        assert!(!config.browser.headless);
        assert_eq!(config.browser.navigation_timeout_ms, 60_000);
        assert_eq!(config.delays.scroll, DelayRange::new(2_000, 5_000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_output_path_uses_keyword() {
        let crawl = CrawlConfig::default();
        assert_eq!(crawl.output_path(), PathBuf::from("df_mac软件.csv"));

        let crawl = CrawlConfig {
            output_path: Some(PathBuf::from("/tmp/out.csv")),
            ..CrawlConfig::default()
        };
        assert_eq!(crawl.output_path(), PathBuf::from("/tmp/out.csv"));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[crawl]"));
        assert!(toml_str.contains("[delays.scroll]"));
        assert!(toml_str.contains("[selectors]"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.crawl.keyword, config.crawl.keyword);
        assert_eq!(parsed.selectors.feed_item, config.selectors.feed_item);
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");

        let mut config = AppConfig::default();
        config.crawl.keyword = "露营".to_string();
        config.crawl.max_scroll_passes = 3;

        let contents = toml::to_string_pretty(&config).expect("serialize config");
        fs::write(&config_path, contents).expect("write config file");

        let loaded = AppConfig::load_from(&config_path).expect("load config");
        assert_eq!(loaded.crawl.keyword, "露营");
        assert_eq!(loaded.crawl.max_scroll_passes, 3);
    }

    #[test]
    fn test_load_from_missing_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let result = AppConfig::load_from(&tmp.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("FEEDHARVEST_KEYWORD", "咖啡"),
            ("FEEDHARVEST_SCROLL_PASSES", "4"),
            ("FEEDHARVEST_HEADLESS", "true"),
            ("FEEDHARVEST_OUTPUT", "out/coffee.csv"),
        ]);

        let mut config = AppConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.crawl.keyword, "咖啡");
        assert_eq!(config.crawl.max_scroll_passes, 4);
        assert!(config.browser.headless);
        assert_eq!(config.crawl.output_path(), PathBuf::from("out/coffee.csv"));
        assert_eq!(config.crawl.cookies_path, PathBuf::from("cookies.json"));
    }

    #[test]
    fn test_unparseable_override_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| {
            (key == "FEEDHARVEST_SCROLL_PASSES").then(|| "many".to_string())
        });
        assert_eq!(config.crawl.max_scroll_passes, 25);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[crawl]
keyword = "键盘"

[delays.detail]
min_ms = 100
max_ms = 200
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.crawl.keyword, "键盘");
        assert_eq!(config.delays.detail, DelayRange::new(100, 200));
        // These should be defaults
        assert_eq!(config.delays.settle, DelayRange::new(5_000, 10_000));
        assert_eq!(config.crawl.max_scroll_passes, 25);
        assert_eq!(config.selectors.disabled_marker, "selected-disabled-search");
    }

    #[test]
    fn test_validate_rejects_inverted_delay() {
        let mut config = AppConfig::default();
        config.delays.scroll = DelayRange::new(5_000, 2_000);

        let err = config.validate().expect_err("inverted range must be rejected");
        assert!(err.to_string().contains("delays.scroll"));
    }

    #[test]
    fn test_validate_rejects_zero_passes_and_empty_keyword() {
        let mut config = AppConfig::default();
        config.crawl.max_scroll_passes = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.crawl.keyword = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
