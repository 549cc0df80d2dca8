//! Browser session for the feedharvest crawler.
//!
//! Launches Chromium with a randomized fingerprint, installs exported
//! session cookies, and exposes the page operations the crawler drives
//! through the [`BrowserActions`] trait.

pub mod actions;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod session;

pub use actions::BrowserActions;
pub use engine::{BrowserEngine, EngineOptions};
pub use error::{BrowserError, Result};
pub use session::{load_cookies, SessionCookie};
