use std::time::Duration;

use once_cell::sync::Lazy;

/// Default HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Desktop browser user-agent. Many lyrics sites serve different markup to,
/// or outright block, default library clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// English-preferring Accept-Language, matching what lyrics hosts expect
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Shared HTTP agent for connection pooling
static HTTP_AGENT: Lazy<ureq::Agent> = Lazy::new(|| {
    ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)))
        .build()
        .into()
});

pub(crate) fn http_agent() -> &'static ureq::Agent {
    &HTTP_AGENT
}

/// Retrieves raw HTML for candidate pages.
///
/// Trait seam so the pipeline can run against a fake in tests.
pub trait PageFetcher {
    /// Fetch a page body. `None` on any network error, timeout, or
    /// non-success status; a miss just drops that candidate.
    fn fetch(&self, url: &str) -> Option<String>;
}

/// Blocking HTTP fetcher with browser-like headers.
#[derive(Debug, Default)]
pub struct HttpFetcher;

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Option<String> {
        let response = HTTP_AGENT
            .get(url)
            .header("User-Agent", USER_AGENT)
            .header("Accept-Language", ACCEPT_LANGUAGE)
            .call()
            .ok()?;
        response.into_body().read_to_string().ok()
    }
}
