// src/crawl/links.rs
// =============================================================================
// This module finds the same-domain links on a page.
//
// For every <a href> (and <area href>) on the page we:
// 1. Resolve the href against the page URL (so "/about" becomes absolute)
// 2. Drop anything that isn't http/https or lives on another host
// 3. Normalize it: no query string, no fragment, no credentials
// 4. Collect it into a set, so duplicates disappear automatically
//
// This function never fails. Broken hrefs are skipped one by one, and if the
// page can't be understood at all we just return an empty set.
//
// Rust concepts:
// - BTreeSet: a sorted set, so iteration order is the same on every run
// - Option + `?`: bail out of a helper early when a step doesn't apply
// =============================================================================

use scraper::{Html, Selector};
use std::collections::BTreeSet;
use url::Url;

// Extracts normalized same-domain links from one page
//
// Parameters:
//   page_url: the URL the HTML was fetched from (for resolving relative links)
//   html: the raw markup
//   domain: the host every returned link must have
//
// Returns: sorted set of normalized absolute URLs
//
// Example:
//   page_url = "https://example.com/"
//   html = "<a href='/about'>About</a><a href='https://other.com/'>x</a>"
//   result = {"https://example.com/about"}
pub fn extract_links(page_url: &Url, html: &str, domain: &str) -> BTreeSet<String> {
    let mut links = BTreeSet::new();

    let Ok(selector) = Selector::parse("a[href], area[href]") else {
        return links;
    };

    let document = Html::parse_document(html);

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(absolute) = resolve_link(page_url, href) else {
            continue;
        };

        if is_crawlable(&absolute) && absolute.host_str() == Some(domain) {
            links.insert(normalize(&absolute).to_string());
        }
    }

    links
}

/// Strips the parts of a URL that don't identify a different page.
///
/// Scheme, host, port and path survive; query, fragment and userinfo are
/// dropped, so `https://x.com/a?b=1#frag` and `https://x.com/a` are the same
/// page as far as the crawler is concerned.
pub fn normalize(url: &Url) -> Url {
    let mut normalized = url.clone();
    normalized.set_query(None);
    normalized.set_fragment(None);
    // Only fails for URLs that cannot carry credentials, which have none to drop.
    let _ = normalized.set_username("");
    let _ = normalized.set_password(None);
    normalized
}

/// String convenience around [`normalize`]; `None` if the input isn't a URL.
pub fn normalize_str(raw: &str) -> Option<String> {
    Url::parse(raw).ok().map(|url| normalize(&url).to_string())
}

/// True for the schemes we know how to fetch.
pub fn is_crawlable(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

// Resolves a link (possibly relative) to an absolute URL
fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    // In-page anchors and non-navigational schemes never lead to a new page
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    // Url::join handles both cases: absolute hrefs replace the base entirely,
    // relative ones are resolved against it like a browser would
    base.join(href).ok()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does `let ... else` do?
//    - let Some(x) = opt else { continue; };
//    - Binds x if the pattern matches, otherwise runs the else block
//    - The else block must leave the scope (return, continue, break)
//
// 2. Why host_str() and not domain()?
//    - domain() is None for IP addresses like 127.0.0.1
//    - host_str() works for both names and IPs
//
// 3. Why `let _ =` on set_username?
//    - It returns Result<(), ()>; ignoring it explicitly tells the compiler
//      (and readers) that the failure case doesn't matter here
// -----------------------------------------------------------------------------
