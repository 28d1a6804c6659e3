//! Command-line configuration.

use clap::Parser;
use crimewatch_core::ProgramOptions;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "crimewatch")]
#[command(about = "Terminal feed of community-reported crime incidents")]
#[command(version)]
pub struct Cli {
    /// API base URL; incidents are read from `{base_url}/api/crimes`
    #[arg(long, default_value = "http://localhost:8000")]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "10")]
    pub timeout: u64,

    /// Read the response body from a JSON file instead of the network
    #[arg(long)]
    pub fixture: Option<PathBuf>,

    /// Where to write logs (the terminal belongs to the UI)
    #[arg(long, default_value = "crimewatch.log")]
    pub log_file: PathBuf,

    /// Redraw rate in frames per second
    #[arg(long, default_value = "30")]
    pub fps: u32,

    /// Draw in the main screen instead of the alternate screen
    #[arg(long)]
    pub inline: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("base URL must not be empty")]
    EmptyBaseUrl,
    #[error("base URL must start with http:// or https://, got {0:?}")]
    UnsupportedScheme(String),
    #[error("fps must be between 1 and 120, got {0}")]
    FpsOutOfRange(u32),
    #[error("timeout must be at least one second")]
    ZeroTimeout,
}

impl Cli {
    /// Reject settings the runtime cannot use. Skips the base URL when a
    /// fixture replaces the network.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fixture.is_none() {
            let url = self.base_url.trim();
            if url.is_empty() {
                return Err(ConfigError::EmptyBaseUrl);
            }
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::UnsupportedScheme(url.to_string()));
            }
        }
        if !(1..=120).contains(&self.fps) {
            return Err(ConfigError::FpsOutOfRange(self.fps));
        }
        if self.timeout == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn program_options(&self) -> ProgramOptions {
        ProgramOptions {
            fps: self.fps,
            alt_screen: !self.inline,
            title: Some("crimewatch".to_string()),
            ..ProgramOptions::default()
        }
    }
}
