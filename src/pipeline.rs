//! Candidate ranking pipeline: search, fetch, extract, score, rank.
//!
//! Everything here is sequential by design. Pages are fetched one at a
//! time with a politeness delay between them to avoid hammering hosts; any
//! parallel rework must keep an equivalent per-host pacing policy.

use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::Result;
use crate::extract::extract_lyrics;
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::score::{best_matching_line, score_match};
use crate::search::{build_query, DuckDuckGo, SearchProvider};
use crate::title::infer_title_artist;

/// Default politeness delay between page fetches, in milliseconds
pub const DEFAULT_DELAY_MS: u64 = 800;

/// Default number of candidate pages to scan
pub const DEFAULT_MAX_PAGES: usize = 8;

/// How many runner-up candidates the tool report carries
const MAX_ALTERNATIVES: usize = 4;

/// One scraped and scored page. Immutable once built; a candidate is only
/// constructed after lyrics extraction succeeded and the score is known.
#[derive(Debug, Clone, Serialize)]
pub struct SongCandidate {
    /// Inferred song title (falls back to the raw page title)
    pub title: String,
    /// Inferred artist, when the page title could be parsed
    pub artist: Option<String>,
    /// Source page URL, unique within one search's results
    pub url: String,
    /// Best single lyrics line matching the snippet
    pub matched_fragment: Option<String>,
    /// Blended similarity score in [0, 100]
    pub score: f64,
}

/// JSON summary of one candidate, as exposed by the callable tool
#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub title: String,
    pub artist: Option<String>,
    pub url: String,
    /// Rounded to 2 decimals
    pub score: f64,
    #[serde(rename = "match")]
    pub fragment: Option<String>,
}

impl From<&SongCandidate> for MatchSummary {
    fn from(c: &SongCandidate) -> Self {
        Self {
            title: c.title.clone(),
            artist: c.artist.clone(),
            url: c.url.clone(),
            score: (c.score * 100.0).round() / 100.0,
            fragment: c.matched_fragment.clone(),
        }
    }
}

/// Tool-shaped output: the best match plus up to four alternatives
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub best: Option<MatchSummary>,
    pub alternatives: Vec<MatchSummary>,
}

impl MatchReport {
    /// Build the report from a ranked candidate list (best first)
    pub fn from_ranked(candidates: &[SongCandidate]) -> Self {
        Self {
            best: candidates.first().map(MatchSummary::from),
            alternatives: candidates
                .iter()
                .skip(1)
                .take(MAX_ALTERNATIVES)
                .map(MatchSummary::from)
                .collect(),
        }
    }
}

/// The end-to-end identification pipeline. Holds its collaborators behind
/// trait objects so tests can swap in fakes for the network seams.
pub struct Pipeline {
    search: Box<dyn SearchProvider>,
    fetcher: Box<dyn PageFetcher>,
    delay: Duration,
    /// Optional bound on the whole scan, so a run of slow hosts cannot
    /// stall indefinitely
    deadline: Option<Duration>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Box::new(DuckDuckGo), Box::new(HttpFetcher))
    }
}

impl Pipeline {
    pub fn new(search: Box<dyn SearchProvider>, fetcher: Box<dyn PageFetcher>) -> Self {
        Self {
            search,
            fetcher,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            deadline: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Scan up to `max_pages` candidate pages for the snippet and return
    /// them ranked by score, best first. Empty on no match; search backend
    /// failure also yields an empty list rather than an error.
    pub fn find_song_from_snippet(&self, snippet: &str, max_pages: usize) -> Vec<SongCandidate> {
        let query = build_query(snippet);
        let pages = match self.search.search_lyrics_pages(&query, max_pages) {
            Ok(pages) => pages,
            Err(_) => return Vec::new(),
        };

        let started = Instant::now();
        let mut candidates: Vec<SongCandidate> = Vec::new();

        for (i, hit) in pages.iter().enumerate() {
            if let Some(deadline) = self.deadline {
                if started.elapsed() >= deadline {
                    break;
                }
            }

            if let Some(candidate) = self.scan_page(snippet, &hit.title, &hit.url) {
                candidates.push(candidate);
            }

            // Politeness delay between fetches, skipped after the last page
            if i + 1 < pages.len() {
                thread::sleep(self.delay);
            }
        }

        // Stable sort keeps discovery order on ties
        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates
    }

    /// Fetch, extract, and score one page. Any miss drops the candidate.
    fn scan_page(&self, snippet: &str, page_title: &str, url: &str) -> Option<SongCandidate> {
        let html = self.fetcher.fetch(url)?;
        let lyrics = extract_lyrics(&html)?;

        let score = score_match(snippet, &lyrics);
        let (title, artist) = infer_title_artist(page_title);
        let matched_fragment = best_matching_line(snippet, &lyrics);

        Some(SongCandidate {
            title,
            artist,
            url: url.to_string(),
            matched_fragment,
            score,
        })
    }

    /// The single callable tool entry point: ranked scan folded into the
    /// `{best, alternatives}` report shape.
    pub fn identify(&self, snippet: &str, max_pages: usize) -> MatchReport {
        let ranked = self.find_song_from_snippet(snippet, max_pages);
        MatchReport::from_ranked(&ranked)
    }
}

/// Identify a song with the default network collaborators.
pub fn identify_snippet(snippet: &str, max_pages: usize) -> Result<MatchReport> {
    Ok(Pipeline::default().identify(snippet, max_pages))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_rounding_and_shape() {
        let candidates = vec![
            SongCandidate {
                title: "Song A".into(),
                artist: Some("Artist".into()),
                url: "https://genius.com/a".into(),
                matched_fragment: Some("a line".into()),
                score: 91.23456,
            },
            SongCandidate {
                title: "Song B".into(),
                artist: None,
                url: "https://genius.com/b".into(),
                matched_fragment: None,
                score: 70.0,
            },
        ];
        let report = MatchReport::from_ranked(&candidates);
        let best = report.best.unwrap();
        assert_eq!(best.score, 91.23);
        assert_eq!(report.alternatives.len(), 1);
        assert_eq!(report.alternatives[0].url, "https://genius.com/b");
    }

    #[test]
    fn test_report_caps_alternatives_at_four() {
        let candidates: Vec<SongCandidate> = (0..7)
            .map(|i| SongCandidate {
                title: format!("Song {}", i),
                artist: None,
                url: format!("https://genius.com/{}", i),
                matched_fragment: None,
                score: 90.0 - i as f64,
            })
            .collect();
        let report = MatchReport::from_ranked(&candidates);
        assert_eq!(report.alternatives.len(), 4);
    }

    #[test]
    fn test_report_empty() {
        let report = MatchReport::from_ranked(&[]);
        assert!(report.best.is_none());
        assert!(report.alternatives.is_empty());
    }

    #[test]
    fn test_match_field_serialized_name() {
        let summary = MatchSummary {
            title: "T".into(),
            artist: None,
            url: "u".into(),
            score: 90.0,
            fragment: Some("line".into()),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["match"], "line");
        assert!(json.get("fragment").is_none());
    }
}
