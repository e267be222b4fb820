//! Speech-to-text collaborator: shells out to the Whisper CLI.
//!
//! A [`Transcriber`] is built once per run and holds the model and
//! language choices; the engine itself stays a black box behind the CLI.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{LyrseekError, Result};

/// One transcribed audio file: source name and transcript text
#[derive(Debug, Clone)]
pub struct Transcript {
    pub file: String,
    pub text: String,
}

/// Owned handle to the external Whisper CLI
pub struct Transcriber {
    model: String,
    language: Option<String>,
}

impl Transcriber {
    pub fn new(model: impl Into<String>, language: Option<String>) -> Self {
        Self {
            model: model.into(),
            language,
        }
    }

    /// Transcribe a single audio file, writing `<stem>.txt` under `out_dir`
    /// and returning the transcript text.
    pub fn transcribe_file(&self, audio: &Path, out_dir: &Path) -> Result<String> {
        let mut cmd = Command::new("whisper");
        cmd.arg(audio)
            .args(["--model", &self.model])
            .args(["--output_format", "txt"])
            .arg("--output_dir")
            .arg(out_dir);
        if let Some(ref lang) = self.language {
            cmd.args(["--language", lang]);
        }

        let output = cmd.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LyrseekError::WhisperNotInstalled(e.to_string())
            } else {
                LyrseekError::WhisperFailed(e.to_string())
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LyrseekError::WhisperFailed(stderr.trim().to_string()));
        }

        let transcript_path = transcript_path(audio, out_dir);
        let text = std::fs::read_to_string(&transcript_path)?;
        Ok(text.trim().to_string())
    }

    /// Transcribe every .mp3 file in a folder. Per-file failures are
    /// reported through `on_error` and skipped; one bad file never aborts
    /// the batch. Returns transcripts in filename order.
    pub fn transcribe_folder(
        &self,
        folder: &Path,
        out_dir: &Path,
        mut on_error: impl FnMut(&str, &LyrseekError),
    ) -> Result<Vec<Transcript>> {
        std::fs::create_dir_all(out_dir)?;

        let mut files: Vec<PathBuf> = std::fs::read_dir(folder)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("mp3"))
            })
            .collect();
        files.sort();

        let mut transcripts = Vec::new();
        for path in files {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            match self.transcribe_file(&path, out_dir) {
                Ok(text) if !text.is_empty() => transcripts.push(Transcript { file: name, text }),
                Ok(_) => {}
                Err(e) => on_error(&name, &e),
            }
        }
        Ok(transcripts)
    }
}

/// Where the Whisper CLI writes the transcript for a given input file
fn transcript_path(audio: &Path, out_dir: &Path) -> PathBuf {
    let stem = audio
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    out_dir.join(format!("{}.txt", stem))
}

/// Read previously written transcripts back from an output directory, in
/// filename order. Unreadable or empty files are skipped.
pub fn read_transcripts_from_dir(out_dir: &Path) -> Vec<Transcript> {
    let Ok(entries) = std::fs::read_dir(out_dir) else {
        return Vec::new();
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
        })
        .collect();
    paths.sort();

    let mut transcripts = Vec::new();
    for path in paths {
        let Ok(content) = std::fs::read_to_string(&path) else {
            continue;
        };
        let text = content.trim().to_string();
        if text.is_empty() {
            continue;
        }
        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        transcripts.push(Transcript { file, text });
    }
    transcripts
}

/// Status of the Whisper CLI installation
#[derive(Debug, Clone, PartialEq)]
pub enum WhisperStatus {
    Ready,
    Missing,
}

impl WhisperStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, WhisperStatus::Ready)
    }

    pub fn install_instructions(&self) -> &'static str {
        match self {
            WhisperStatus::Ready => "Whisper CLI is ready",
            WhisperStatus::Missing => "Install with: pip install openai-whisper (requires ffmpeg)",
        }
    }
}

/// Check if the Whisper CLI is available
pub fn check_whisper() -> WhisperStatus {
    let available = Command::new("whisper")
        .arg("--help")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);

    if available {
        WhisperStatus::Ready
    } else {
        WhisperStatus::Missing
    }
}
