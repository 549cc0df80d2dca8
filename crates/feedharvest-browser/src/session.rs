//! Cookie bootstrap for an authenticated browsing session.
//!
//! The cookie file is a JSON array as written by Playwright's
//! `context.cookies()` or by common browser cookie-export extensions.

use crate::error::{BrowserError, Result};
use chromiumoxide::cdp::browser_protocol::network::{CookieParam, CookieSameSite, TimeSinceEpoch};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single cookie from the exported session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Seconds since the Unix epoch; `-1` or absent means a session cookie
    #[serde(default, alias = "expirationDate")]
    pub expires: Option<f64>,
    #[serde(default)]
    pub http_only: Option<bool>,
    #[serde(default)]
    pub secure: Option<bool>,
    #[serde(default)]
    pub same_site: Option<String>,
}

impl SessionCookie {
    /// Convert into the CDP parameter accepted by `Network.setCookies`.
    #[must_use]
    pub fn to_param(&self) -> CookieParam {
        let mut param = CookieParam::new(self.name.clone(), self.value.clone());
        param.url = self.url.clone();
        param.domain = self.domain.clone();
        param.path = self.path.clone();
        param.secure = self.secure;
        param.http_only = self.http_only;
        param.same_site = self.same_site.as_deref().and_then(parse_same_site);
        param.expires = self
            .expires
            .filter(|secs| *secs > 0.0)
            .map(TimeSinceEpoch::new);
        param
    }
}

fn parse_same_site(value: &str) -> Option<CookieSameSite> {
    match value.to_ascii_lowercase().as_str() {
        "strict" => Some(CookieSameSite::Strict),
        "lax" => Some(CookieSameSite::Lax),
        "none" | "no_restriction" => Some(CookieSameSite::None),
        _ => None,
    }
}

/// Read and parse a cookie export.
///
/// A missing, unreadable or malformed file is reported as
/// [`BrowserError::CookieFile`], as is a cookie without a name.
pub fn load_cookies(path: &Path) -> Result<Vec<SessionCookie>> {
    let cookie_error = |reason: String| BrowserError::CookieFile {
        path: path.display().to_string(),
        reason,
    };

    let contents = std::fs::read_to_string(path).map_err(|e| cookie_error(e.to_string()))?;
    let cookies: Vec<SessionCookie> =
        serde_json::from_str(&contents).map_err(|e| cookie_error(e.to_string()))?;

    if let Some(position) = cookies.iter().position(|c| c.name.is_empty()) {
        return Err(cookie_error(format!("cookie #{position} has an empty name")));
    }

    tracing::info!(
        count = cookies.len(),
        path = %path.display(),
        "loaded session cookies"
    );

    Ok(cookies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PLAYWRIGHT_EXPORT: &str = r#"[
        {
            "name": "web_session",
            "value": "0400697f",
            "domain": ".xiaohongshu.com",
            "path": "/",
            "expires": 1767225600,
            "httpOnly": true,
            "secure": true,
            "sameSite": "Lax"
        },
        {
            "name": "a1",
            "value": "18f2c",
            "domain": ".xiaohongshu.com",
            "path": "/",
            "expires": -1,
            "httpOnly": false,
            "secure": false,
            "sameSite": "None"
        }
    ]"#;

    fn write_file(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("cookies.json");
        std::fs::write(&path, contents).expect("write cookie file");
        path
    }

    #[test]
    fn test_load_playwright_export() {
        let dir = TempDir::new().expect("create temp dir");
        let path = write_file(&dir, PLAYWRIGHT_EXPORT);

        let cookies = load_cookies(&path).expect("load cookies");
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies[0].name, "web_session");
        assert_eq!(cookies[0].http_only, Some(true));
        assert_eq!(cookies[1].same_site.as_deref(), Some("None"));
    }

    #[test]
    fn test_extension_export_fields() {
        let dir = TempDir::new().expect("create temp dir");
        let path = write_file(
            &dir,
            r#"[{"name": "id", "value": "x", "domain": "example.com",
                 "expirationDate": 1800000000.5, "hostOnly": true,
                 "sameSite": "no_restriction", "storeId": "0"}]"#,
        );

        let cookies = load_cookies(&path).expect("load cookies");
        assert_eq!(cookies[0].expires, Some(1_800_000_000.5));

        let param = cookies[0].to_param();
        assert_eq!(param.same_site, Some(CookieSameSite::None));
        assert!(param.expires.is_some());
    }

    #[test]
    fn test_to_param_session_cookie_has_no_expiry() {
        let dir = TempDir::new().expect("create temp dir");
        let path = write_file(&dir, PLAYWRIGHT_EXPORT);
        let cookies = load_cookies(&path).expect("load cookies");

        let param = cookies[1].to_param();
        assert_eq!(param.name, "a1");
        assert_eq!(param.domain.as_deref(), Some(".xiaohongshu.com"));
        assert!(param.expires.is_none());

        let param = cookies[0].to_param();
        assert_eq!(param.same_site, Some(CookieSameSite::Lax));
        assert_eq!(param.http_only, Some(true));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().expect("create temp dir");
        let err = load_cookies(&dir.path().join("absent.json")).expect_err("missing file");
        assert!(matches!(err, BrowserError::CookieFile { .. }));
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().expect("create temp dir");
        let path = write_file(&dir, "{ not json");
        assert!(load_cookies(&path).is_err());

        let path = write_file(&dir, r#"[{"name": "", "value": "x"}]"#);
        let err = load_cookies(&path).expect_err("empty name");
        assert!(err.to_string().contains("empty name"));
    }
}
