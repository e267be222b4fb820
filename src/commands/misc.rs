//! Miscellaneous commands: doctor.

use colored::Colorize;

use lyrseek::agent::check_claude;
use lyrseek::config::Config;
use lyrseek::error::Result;
use lyrseek::transcribe::check_whisper;

pub fn cmd_doctor() -> Result<()> {
    println!("\n{}\n", "lyrseek doctor".bold());

    let whisper = check_whisper();
    if whisper.is_ready() {
        println!("  {} whisper CLI found", "ok".green().bold());
    } else {
        println!("  {} whisper CLI missing", "--".yellow().bold());
        println!("     {}", whisper.install_instructions());
        println!("     (only needed for `transcribe` and `run`)");
    }

    if check_claude() {
        println!("  {} claude CLI found (agent review available)", "ok".green().bold());
    } else {
        println!("  {} claude CLI missing (identification still works directly)", "--".yellow().bold());
    }

    match Config::config_path() {
        Ok(path) if path.exists() => {
            println!("  {} config at {}", "ok".green().bold(), path.display());
        }
        Ok(path) => {
            println!("  {} no config file (defaults in use); would be at {}", "--".dimmed(), path.display());
        }
        Err(e) => {
            println!("  {} config path unavailable: {}", "!!".red().bold(), e);
        }
    }

    Ok(())
}
