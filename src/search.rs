//! Web search client: turn a lyrics snippet into candidate page URLs.
//!
//! Scrapes the DuckDuckGo HTML endpoint (no API key needed) and keeps only
//! hits on known lyrics hosts.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use crate::error::{LyrseekError, Result};
use crate::fetch::{http_agent, ACCEPT_LANGUAGE, USER_AGENT};

const SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// Allow-list of lyrics-hosting domains. Matched against the full URL.
/// No scraping of TOS-restricted hosts behind auth or paywalls.
static LYRICS_HOST_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"genius\.com",
        r"azlyrics\.com",
        r"lyrics\.com",
        r"lyricfind\.com",
        r"songmeanings\.com",
        r"songfacts\.com",
        r"musixmatch\.com",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid lyrics host pattern"))
    .collect()
});

/// One raw search hit: page title and resolved URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
}

/// Produces ranked candidate pages for a query. Each call issues a fresh
/// search; results are finite and non-restartable.
pub trait SearchProvider {
    /// Return up to `max_results` lyrics-host hits, in provider order.
    /// Fails with `SearchUnavailable` when the backend cannot be reached.
    fn search_lyrics_pages(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>>;
}

/// Build the search query: the snippet wrapped in quotes (internal quotes
/// stripped) with a literal " lyrics" suffix.
pub fn build_query(snippet: &str) -> String {
    format!("\"{}\" lyrics", snippet.trim().replace('"', ""))
}

/// Check a URL against the lyrics-host allow-list
pub fn is_lyrics_host(url: &str) -> bool {
    LYRICS_HOST_PATTERNS.iter().any(|p| p.is_match(url))
}

/// DuckDuckGo HTML search backend
#[derive(Debug, Default)]
pub struct DuckDuckGo;

impl SearchProvider for DuckDuckGo {
    fn search_lyrics_pages(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        let response = http_agent()
            .post(SEARCH_ENDPOINT)
            .header("User-Agent", USER_AGENT)
            .header("Accept-Language", ACCEPT_LANGUAGE)
            .header("Accept", "text/html")
            .send_form([("q", query)])
            .map_err(|e| LyrseekError::SearchUnavailable(e.to_string()))?;

        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| LyrseekError::SearchUnavailable(e.to_string()))?;

        Ok(parse_results(&body, max_results))
    }
}

/// Parse the DDG HTML results page into filtered hits.
///
/// Reads up to twice `max_results` raw hits to compensate for allow-list
/// filtering, dedupes URLs, and stops once enough hits qualify.
fn parse_results(body: &str, max_results: usize) -> Vec<SearchHit> {
    let document = Html::parse_document(body);

    let Ok(result_sel) = Selector::parse(".result") else {
        return Vec::new();
    };
    let Ok(link_sel) = Selector::parse("a.result__a") else {
        return Vec::new();
    };

    let mut hits = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for result in document.select(&result_sel).take(max_results * 2) {
        let Some(link) = result.select(&link_sel).next() else {
            continue;
        };
        let title = link.text().collect::<String>().trim().to_string();
        let href = link.value().attr("href").unwrap_or("");
        let url = resolve_ddg_url(href);

        if url.is_empty() || !url.starts_with("http") || url::Url::parse(&url).is_err() {
            continue;
        }
        if !is_lyrics_host(&url) {
            continue;
        }
        if !seen.insert(url.clone()) {
            continue;
        }

        hits.push(SearchHit { title, url });
        if hits.len() >= max_results {
            break;
        }
    }

    hits
}

/// DDG wraps result URLs in redirect links like
/// `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`.
/// Extract and percent-decode the actual destination.
fn resolve_ddg_url(href: &str) -> String {
    if let Some(pos) = href.find("uddg=") {
        let start = pos + 5;
        let end = href[start..]
            .find('&')
            .map(|i| start + i)
            .unwrap_or(href.len());
        let encoded = &href[start..end];
        if !encoded.is_empty() {
            if let Ok(decoded) = urlencoding::decode(encoded) {
                return decoded.into_owned();
            }
        }
    }
    href.to_string()
}
