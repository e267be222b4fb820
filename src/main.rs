//! lyrseek - identify songs from noisy lyrics snippets

use clap::Parser;

use lyrseek::cli::{Cli, Commands};
use lyrseek::error::Result;

mod commands;
mod utils;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.hint() {
            eprintln!("\n{}", hint);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Identify {
            snippet,
            max_pages,
            deadline,
            no_agent,
            json,
        } => commands::cmd_identify(snippet, max_pages, deadline, no_agent, json),

        Commands::Transcribe {
            folder,
            model,
            language,
            out_dir,
        } => commands::cmd_transcribe(folder, model, language, out_dir),

        Commands::Run {
            folder,
            model,
            language,
            out_dir,
            max_pages,
            no_agent,
        } => commands::cmd_run(folder, model, language, out_dir, max_pages, no_agent),

        Commands::Doctor => commands::cmd_doctor(),
    }
}
