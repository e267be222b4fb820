use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lyrseek")]
#[command(author, version, about = "Identify songs from noisy lyrics snippets", long_about = None)]
#[command(after_help = r#"Examples:
  lyrseek identify "we were only getting older baby"     Find the song for a snippet
  lyrseek identify "..." --json                          Machine-readable output
  lyrseek transcribe --folder ./voices                   Transcribe .mp3 files with Whisper
  lyrseek run --folder ./voices                          Transcribe, then identify each file
  lyrseek doctor                                         Check external tools

The snippet can be rough: it is usually speech-to-text output, and matching
is fuzzy by design.
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the most likely song for a lyrics snippet
    Identify {
        /// The lyrics snippet (words are joined with spaces)
        #[arg(value_name = "SNIPPET", required = true, num_args = 1..)]
        snippet: Vec<String>,

        /// How many lyrics pages to scan
        #[arg(long)]
        max_pages: Option<usize>,

        /// Bound the whole scan (e.g. 30s, 2m); unbounded by default
        #[arg(long)]
        deadline: Option<String>,

        /// Skip the Claude CLI review even when installed
        #[arg(long)]
        no_agent: bool,

        /// Output the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Transcribe every .mp3 in a folder with the Whisper CLI
    Transcribe {
        /// Folder containing .mp3 files
        #[arg(long)]
        folder: String,

        /// Whisper model size (tiny, base, small, medium, large)
        #[arg(long)]
        model: Option<String>,

        /// Force a language (e.g. "en")
        #[arg(long)]
        language: Option<String>,

        /// Where to write the .txt transcripts
        #[arg(long, default_value = "./transcriptions")]
        out_dir: String,
    },

    /// Transcribe a folder, then identify the song for each transcript
    Run {
        /// Folder containing .mp3 files
        #[arg(long)]
        folder: String,

        /// Whisper model size (tiny, base, small, medium, large)
        #[arg(long)]
        model: Option<String>,

        /// Force a language (e.g. "en")
        #[arg(long)]
        language: Option<String>,

        /// Where to write transcripts and the aggregated results file
        #[arg(long, default_value = "./transcriptions")]
        out_dir: String,

        /// Max lyrics pages to scan per search
        #[arg(long)]
        max_pages: Option<usize>,

        /// Skip the Claude CLI review even when installed
        #[arg(long)]
        no_agent: bool,
    },

    /// Check that external tools (whisper, claude) are available
    Doctor,
}
