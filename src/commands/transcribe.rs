//! The `transcribe` command: batch Whisper transcription of a folder.

use std::path::Path;

use colored::Colorize;

use lyrseek::config::Config;
use lyrseek::error::Result;
use lyrseek::transcribe::{check_whisper, Transcriber};

pub fn cmd_transcribe(
    folder: String,
    model: Option<String>,
    language: Option<String>,
    out_dir: String,
) -> Result<()> {
    let config = Config::load()?;

    let status = check_whisper();
    if !status.is_ready() {
        return Err(lyrseek::LyrseekError::WhisperNotInstalled(
            status.install_instructions().to_string(),
        ));
    }

    let transcriber = Transcriber::new(
        model.unwrap_or(config.whisper_model),
        language.or(config.language),
    );

    let transcripts = transcribe_with_progress(&transcriber, Path::new(&folder), Path::new(&out_dir))?;

    if transcripts.is_empty() {
        println!("{} No .mp3 files transcribed in {}", "!".yellow(), folder);
    } else {
        println!(
            "\n{} {} transcript(s) written to {}",
            "Done:".green().bold(),
            transcripts.len(),
            out_dir
        );
    }
    Ok(())
}

pub(crate) fn transcribe_with_progress(
    transcriber: &Transcriber,
    folder: &Path,
    out_dir: &Path,
) -> Result<Vec<lyrseek::transcribe::Transcript>> {
    transcriber.transcribe_folder(folder, out_dir, |file, err| {
        eprintln!("  {} Error transcribing {}: {}", "!".red(), file, err);
    })
}
