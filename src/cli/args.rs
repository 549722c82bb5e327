//! CLI argument definitions
//!
//! Global options and configuration merging logic. Invoked with no flags
//! (and no config file) the binary uses the built-in endpoint and writes
//! `usage.tsv` in the working directory.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::consts;

#[derive(Parser)]
#[command(name = "glamtrack")]
#[command(about = "Record Wikimedia project usage of tracked Commons files", version)]
pub(crate) struct Cli {
    /// Endpoint URL (defaults to the deployment's GLAMorous query)
    #[arg(long, value_name = "URL")]
    pub(crate) url: Option<String>,

    /// Log file path (defaults to usage.tsv in the working directory)
    #[arg(short, long, value_name = "PATH")]
    pub(crate) output: Option<PathBuf>,

    /// Timezone for the row date (e.g. "UTC", "Europe/Berlin")
    #[arg(long, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Suppress the success message and config chatter
    #[arg(short, long)]
    pub(crate) quiet: bool,

    /// Enable debug output (show parsed usage counts)
    #[arg(long)]
    pub(crate) debug: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        // For boolean flags, config only applies if CLI is false (default)
        if !self.quiet && config.quiet {
            self.quiet = true;
        }
        if !self.debug && config.debug {
            self.debug = true;
        }
        if self.url.is_none() {
            self.url = config.url.clone();
        }
        if self.output.is_none() {
            self.output = config.output.clone();
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        self
    }

    pub(crate) fn endpoint(&self) -> &str {
        self.url.as_deref().unwrap_or(consts::XML_URL)
    }

    pub(crate) fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(consts::OUTPUT_FILE))
    }
}
