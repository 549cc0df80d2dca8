use crate::error::{CrawlError, Result};
use url::Url;

/// Percent-encode like Python's `urllib.parse.quote`: `/` stays literal.
fn quote(value: &str) -> String {
    value
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Encode a search keyword the way the site's search URL expects.
///
/// The keyword is percent-encoded from UTF-8, then that string is
/// percent-encoded again as GB2312. The first pass only emits ASCII, which
/// GB2312 maps byte-for-byte, so the second pass reduces to a plain
/// percent-encode that turns every `%` into `%25`.
pub fn encode_keyword(keyword: &str) -> String {
    let utf8_pass = quote(keyword);
    quote(&utf8_pass)
}

/// Search results URL for `keyword` on the site at `base_url`.
pub fn build_search_url(base_url: &str, keyword: &str) -> String {
    format!(
        "{}/search_result?keyword={}&source=web_explore_feed",
        base_url.trim_end_matches('/'),
        encode_keyword(keyword)
    )
}

/// Resolve an `href` found on a page against the site origin.
pub fn resolve_link(base: &Url, href: &str) -> Result<String> {
    base.join(href)
        .map(String::from)
        .map_err(|e| CrawlError::InvalidLink {
            href: href.to_string(),
            reason: e.to_string(),
        })
}
