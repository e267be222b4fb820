//! End-to-end pipeline tests with fake search and fetch collaborators

use std::collections::HashMap;
use std::time::Duration;

use lyrseek::error::{LyrseekError, Result};
use lyrseek::fetch::PageFetcher;
use lyrseek::pipeline::{MatchReport, Pipeline};
use lyrseek::search::{SearchHit, SearchProvider};

// ============================================================================
// Fakes for the network seams
// ============================================================================

struct FakeSearch {
    hits: Vec<SearchHit>,
    unavailable: bool,
}

impl FakeSearch {
    fn with_hits(hits: Vec<SearchHit>) -> Self {
        Self {
            hits,
            unavailable: false,
        }
    }

    fn unavailable() -> Self {
        Self {
            hits: Vec::new(),
            unavailable: true,
        }
    }
}

impl SearchProvider for FakeSearch {
    fn search_lyrics_pages(&self, _query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        if self.unavailable {
            return Err(LyrseekError::SearchUnavailable("backend down".into()));
        }
        Ok(self.hits.iter().take(max_results).cloned().collect())
    }
}

struct FakeFetcher {
    pages: HashMap<String, String>,
}

impl FakeFetcher {
    fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, html)| (url.to_string(), html.to_string()))
                .collect(),
        }
    }

    fn failing() -> Self {
        Self::new(&[])
    }
}

impl PageFetcher for FakeFetcher {
    fn fetch(&self, url: &str) -> Option<String> {
        self.pages.get(url).cloned()
    }
}

fn hit(title: &str, url: &str) -> SearchHit {
    SearchHit {
        title: title.to_string(),
        url: url.to_string(),
    }
}

fn pipeline(search: FakeSearch, fetcher: FakeFetcher) -> Pipeline {
    // No politeness delay in tests
    Pipeline::new(Box::new(search), Box::new(fetcher)).with_delay(Duration::ZERO)
}

// ============================================================================
// Page fixtures
// ============================================================================

const GENIUS_PAGE: &str = r#"
<!DOCTYPE html>
<html>
<head><title>Harry Styles - As It Was Lyrics | Genius</title></head>
<body>
    <nav>Home Charts Community</nav>
    <div data-lyrics-container="true">
        holdin' me back<br>
        gravity's holdin' me back<br>
        we were only getting older baby<br>
        and i was thinking about it lately
    </div>
    <footer>About Terms Privacy</footer>
</body>
</html>
"#;

const UNRELATED_PAGE: &str = r#"
<!DOCTYPE html>
<html>
<head><title>Other Artist - Different Song Lyrics | Genius</title></head>
<body>
    <div data-lyrics-container="true">
        completely unrelated words about sunshine rivers mountains<br>
        nothing in common with the query at all here<br>
        more filler text to pad this lyric block out properly
    </div>
</body>
</html>
"#;

const NO_LYRICS_PAGE: &str = r#"
<!DOCTYPE html>
<html>
<head><title>Some Page</title></head>
<body><p>short</p></body>
</html>
"#;

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn exact_phrase_on_one_page_scores_high() {
    let search = FakeSearch::with_hits(vec![hit(
        "Harry Styles - As It Was Lyrics | Genius",
        "https://genius.com/as-it-was-lyrics",
    )]);
    let fetcher = FakeFetcher::new(&[("https://genius.com/as-it-was-lyrics", GENIUS_PAGE)]);

    let results = pipeline(search, fetcher)
        .find_song_from_snippet("we were only getting older baby", 8);

    assert_eq!(results.len(), 1);
    let best = &results[0];
    assert!(best.score >= 90.0, "score was {}", best.score);
    assert_eq!(best.title, "As It Was");
    assert_eq!(best.artist.as_deref(), Some("Harry Styles"));
    assert!(best
        .matched_fragment
        .as_deref()
        .unwrap()
        .contains("we were only getting older baby"));
}

#[test]
fn no_qualifying_urls_yields_empty_report() {
    let search = FakeSearch::with_hits(vec![]);
    let fetcher = FakeFetcher::failing();

    let p = pipeline(search, fetcher);
    let results = p.find_song_from_snippet("some snippet", 8);
    assert!(results.is_empty());

    let report = p.identify("some snippet", 8);
    assert!(report.best.is_none());
    assert!(report.alternatives.is_empty());

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["best"], serde_json::Value::Null);
    assert_eq!(json["alternatives"], serde_json::json!([]));
}

#[test]
fn all_fetches_failing_is_not_an_error() {
    let search = FakeSearch::with_hits(vec![
        hit("A Lyrics", "https://genius.com/a-lyrics"),
        hit("B Lyrics", "https://genius.com/b-lyrics"),
    ]);
    let fetcher = FakeFetcher::failing();

    let results = pipeline(search, fetcher).find_song_from_snippet("anything at all", 8);
    assert!(results.is_empty());
}

#[test]
fn search_unavailable_is_treated_as_zero_candidates() {
    let results = pipeline(FakeSearch::unavailable(), FakeFetcher::failing())
        .find_song_from_snippet("anything", 8);
    assert!(results.is_empty());
}

#[test]
fn extraction_failure_drops_only_that_candidate() {
    let search = FakeSearch::with_hits(vec![
        hit("Boilerplate Page", "https://genius.com/boilerplate"),
        hit(
            "Harry Styles - As It Was Lyrics | Genius",
            "https://genius.com/as-it-was-lyrics",
        ),
    ]);
    let fetcher = FakeFetcher::new(&[
        ("https://genius.com/boilerplate", NO_LYRICS_PAGE),
        ("https://genius.com/as-it-was-lyrics", GENIUS_PAGE),
    ]);

    let results = pipeline(search, fetcher)
        .find_song_from_snippet("we were only getting older baby", 8);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, "https://genius.com/as-it-was-lyrics");
}

#[test]
fn results_sorted_descending_and_urls_come_from_search() {
    let urls = [
        "https://genius.com/different-song-lyrics",
        "https://genius.com/as-it-was-lyrics",
    ];
    let search = FakeSearch::with_hits(vec![
        hit("Other Artist - Different Song Lyrics | Genius", urls[0]),
        hit("Harry Styles - As It Was Lyrics | Genius", urls[1]),
    ]);
    let fetcher = FakeFetcher::new(&[(urls[0], UNRELATED_PAGE), (urls[1], GENIUS_PAGE)]);

    let results = pipeline(search, fetcher)
        .find_song_from_snippet("we were only getting older baby", 8);

    assert_eq!(results.len(), 2);
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    // The match containing the phrase outranks the unrelated page
    assert_eq!(results[0].url, urls[1]);
    // Every candidate URL came from the search output
    for candidate in &results {
        assert!(urls.contains(&candidate.url.as_str()));
    }
}

#[test]
fn report_exposes_ranks_two_to_five() {
    let hits: Vec<SearchHit> = (0..6)
        .map(|i| {
            hit(
                "Other Artist - Different Song Lyrics | Genius",
                &format!("https://genius.com/song-{}-lyrics", i),
            )
        })
        .collect();
    let pages: Vec<(String, String)> = (0..6)
        .map(|i| {
            (
                format!("https://genius.com/song-{}-lyrics", i),
                UNRELATED_PAGE.to_string(),
            )
        })
        .collect();
    let page_refs: Vec<(&str, &str)> = pages
        .iter()
        .map(|(u, h)| (u.as_str(), h.as_str()))
        .collect();

    let search = FakeSearch::with_hits(hits);
    let fetcher = FakeFetcher::new(&page_refs);

    let report: MatchReport = pipeline(search, fetcher).identify("sunshine rivers mountains", 6);
    assert!(report.best.is_some());
    assert_eq!(report.alternatives.len(), 4);
}
