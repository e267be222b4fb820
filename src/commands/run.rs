//! The `run` command: transcribe a folder, identify each transcript, and
//! persist one aggregated JSON results file.

use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use colored::Colorize;
use serde::Serialize;

use lyrseek::agent::{self, RunOutcome};
use lyrseek::config::Config;
use lyrseek::error::{LyrseekError, Result};
use lyrseek::pipeline::Pipeline;
use lyrseek::transcribe::{check_whisper, read_transcripts_from_dir, Transcriber};

use crate::commands::transcribe::transcribe_with_progress;
use crate::utils::{seed_snippet, truncate_str, SNIPPET_SEED_CHARS};

/// Name of the aggregated results file, written next to the transcripts
const RESULTS_FILE: &str = "search_results.json";

/// One record per transcribed file in the aggregated results
#[derive(Debug, Serialize)]
struct FileResult {
    file: String,
    query_snippet: String,
    result: RunOutcome,
}

#[derive(Debug, Serialize)]
struct RunResults {
    generated_at: String,
    results: Vec<FileResult>,
}

pub fn cmd_run(
    folder: String,
    model: Option<String>,
    language: Option<String>,
    out_dir: String,
    max_pages: Option<usize>,
    no_agent: bool,
) -> Result<()> {
    let config = Config::load()?;
    let out_path = Path::new(&out_dir);

    // 1) Transcribe all .mp3 files in the folder
    let status = check_whisper();
    if !status.is_ready() {
        return Err(LyrseekError::WhisperNotInstalled(
            status.install_instructions().to_string(),
        ));
    }
    let transcriber = Transcriber::new(
        model.unwrap_or_else(|| config.whisper_model.clone()),
        language.or_else(|| config.language.clone()),
    );
    transcribe_with_progress(&transcriber, Path::new(&folder), out_path)?;

    // 2) Collect transcripts (including any from earlier runs) and search
    let transcripts = read_transcripts_from_dir(out_path);
    if transcripts.is_empty() {
        println!("{}", "No transcripts found to search.".yellow());
        return Ok(());
    }

    let pipeline = Pipeline::default()
        .with_delay(Duration::from_millis(config.request_delay_ms));
    let max_pages = max_pages.unwrap_or(config.max_pages);
    let use_agent = config.use_agent && !no_agent;

    let mut all_results = Vec::new();
    for transcript in &transcripts {
        let snippet = seed_snippet(&transcript.text, SNIPPET_SEED_CHARS);
        println!(
            "\n{} {} ({})",
            "Searching for".cyan().bold(),
            transcript.file,
            truncate_str(&snippet, 120)
        );

        let outcome = agent::run(&pipeline, &snippet, max_pages, use_agent);
        print_summary_line(&outcome);

        all_results.push(FileResult {
            file: transcript.file.clone(),
            query_snippet: snippet,
            result: outcome,
        });
    }

    // 3) Save aggregated results; this is the run's terminal error if it
    // fails
    let results_path = out_path.join(RESULTS_FILE);
    let payload = RunResults {
        generated_at: Utc::now().to_rfc3339(),
        results: all_results,
    };
    let json = serde_json::to_string_pretty(&payload)?;
    std::fs::write(&results_path, json).map_err(|e| LyrseekError::PersistenceError {
        path: results_path.display().to_string(),
        reason: e.to_string(),
    })?;

    println!(
        "\n{} all search results to {}",
        "Saved".green().bold(),
        results_path.display()
    );
    Ok(())
}

fn print_summary_line(outcome: &RunOutcome) {
    match outcome.result.best {
        Some(ref best) => {
            let artist = best.artist.as_deref().unwrap_or("unknown artist");
            println!(
                "  {} {} - {} | score={:.2} | {}",
                "Best match:".green(),
                best.title,
                artist,
                best.score,
                best.url.dimmed()
            );
        }
        None => println!("  {} No best match returned", "!".yellow()),
    }
}
