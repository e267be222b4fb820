//! The `identify` command: one snippet in, ranked matches out.

use std::time::Duration;

use colored::Colorize;

use lyrseek::agent;
use lyrseek::config::Config;
use lyrseek::error::Result;
use lyrseek::pipeline::{MatchReport, MatchSummary, Pipeline};

use crate::utils::{parse_duration, seed_snippet, truncate_str, SNIPPET_SEED_CHARS};

pub fn cmd_identify(
    snippet_words: Vec<String>,
    max_pages: Option<usize>,
    deadline: Option<String>,
    no_agent: bool,
    json: bool,
) -> Result<()> {
    let config = Config::load()?;
    let snippet = seed_snippet(&snippet_words.join(" "), SNIPPET_SEED_CHARS);
    let max_pages = max_pages.unwrap_or(config.max_pages);

    let deadline = match deadline {
        Some(ref s) => {
            let secs = parse_duration(s).ok_or_else(|| {
                lyrseek::LyrseekError::ConfigError(format!(
                    "Invalid deadline '{}'. Use format like 30s, 2m",
                    s
                ))
            })?;
            Some(Duration::from_secs(secs))
        }
        None => None,
    };

    let pipeline = Pipeline::default()
        .with_delay(Duration::from_millis(config.request_delay_ms))
        .with_deadline(deadline);

    if !json {
        println!(
            "\n{} \"{}\" ({} pages max)\n",
            "Searching for".cyan().bold(),
            truncate_str(&snippet, 80),
            max_pages
        );
    }

    let use_agent = config.use_agent && !no_agent;
    let outcome = agent::run(&pipeline, &snippet, max_pages, use_agent);

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    print_report(&outcome.result);
    if let Some(ref verdict) = outcome.verdict {
        println!("\n  {} {}", "Agent:".blue(), verdict);
    }
    if outcome.backend != agent::BACKEND_DIRECT {
        println!("  {} reviewed by {}", "Note:".dimmed(), outcome.backend);
    }

    Ok(())
}

pub(crate) fn print_report(report: &MatchReport) {
    match report.best {
        Some(ref best) => {
            println!("  {} {}", "Best match:".green().bold(), format_summary(best));
            if let Some(ref fragment) = best.fragment {
                println!("  {} \"{}\"", "Matched line:".green(), fragment);
            }
        }
        None => {
            println!("  {}", "No match found.".yellow());
            return;
        }
    }

    if !report.alternatives.is_empty() {
        println!("\n  Alternatives:");
        for alt in &report.alternatives {
            println!("    {}", format_summary(alt));
        }
    }
}

fn format_summary(s: &MatchSummary) -> String {
    let artist = s.artist.as_deref().unwrap_or("unknown artist");
    format!(
        "{} - {} | score={:.2} | {}",
        s.title.bold(),
        artist,
        s.score,
        s.url.dimmed()
    )
}
