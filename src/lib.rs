pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod pipeline;
pub mod score;
pub mod search;
pub mod title;
pub mod transcribe;

pub use error::{LyrseekError, Result};
