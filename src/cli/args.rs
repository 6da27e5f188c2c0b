//! CLI argument definitions
//!
//! Every input can come from a flag or its environment variable; the config
//! file fills in whatever is still unset.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::Config;

#[derive(Parser, Debug, Default)]
#[command(name = "mood-notify")]
#[command(about = "Post a daily mood record to Slack, one thread per day", version)]
pub(crate) struct Cli {
    /// Slack user token
    #[arg(long, env = "SLACK_USER_TOKEN", hide_env_values = true)]
    pub(crate) token: Option<String>,

    /// Target Slack channel ID
    #[arg(long, env = "SLACK_CHANNEL_ID")]
    pub(crate) channel: Option<String>,

    /// Mood score (non-numeric values are posted with an unknown indicator)
    #[arg(long, env = "INPUT_SCORE", allow_hyphen_values = true)]
    pub(crate) score: Option<String>,

    /// Optional note attached to the record
    #[arg(long, env = "INPUT_NOTE")]
    pub(crate) note: Option<String>,

    /// Display date of the record (defaults to today in JST)
    #[arg(long, env = "INPUT_DATE")]
    pub(crate) date: Option<String>,

    /// Also show thread replies in the channel (1/0, true/false, yes/no, on/off)
    #[arg(
        long,
        env = "REPLY_BROADCAST",
        value_name = "BOOL",
        action = ArgAction::Set,
        value_parser = parse_switch
    )]
    pub(crate) reply_broadcast: Option<bool>,

    /// State file remembering today's thread
    #[arg(long, value_name = "PATH")]
    pub(crate) state_file: Option<PathBuf>,

    /// Glob pattern for chart images in the working directory
    #[arg(long, value_name = "GLOB")]
    pub(crate) chart_pattern: Option<String>,

    /// Upload this chart image instead of searching for one
    #[arg(long, value_name = "PATH")]
    pub(crate) chart: Option<PathBuf>,

    /// Slack Web API root
    #[arg(long, env = "SLACK_API_BASE", value_name = "URL")]
    pub(crate) api_base: Option<String>,

    /// Lookups of the uploaded file's message before giving up
    #[arg(long, value_name = "N")]
    pub(crate) poll_retries: Option<u32>,

    /// Base delay between lookups, doubled after each attempt
    #[arg(long, value_name = "MS")]
    pub(crate) poll_delay_ms: Option<u64>,

    /// Print what would be posted as JSON without calling Slack
    #[arg(long)]
    pub(crate) dry_run: bool,

    /// Suppress progress output on stderr
    #[arg(short, long)]
    pub(crate) quiet: bool,

    /// Enable debug output (show request details)
    #[arg(long)]
    pub(crate) debug: bool,
}

/// Lenient boolean: "1", "true", "yes", "on" are true, anything else false.
pub(crate) fn parse_switch(value: &str) -> Result<bool, String> {
    Ok(matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    ))
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.quiet && config.quiet {
            self.quiet = true;
        }
        if !self.debug && config.debug {
            self.debug = true;
        }

        if self.channel.is_none() {
            self.channel = config.channel_id.clone();
        }
        if self.reply_broadcast.is_none() {
            self.reply_broadcast = config.reply_broadcast;
        }
        if self.state_file.is_none() {
            self.state_file = config.state_file.clone();
        }
        if self.chart_pattern.is_none() {
            self.chart_pattern = config.chart_pattern.clone();
        }
        if self.api_base.is_none() {
            self.api_base = config.api_base.clone();
        }
        if self.poll_retries.is_none() {
            self.poll_retries = config.poll_retries;
        }
        if self.poll_delay_ms.is_none() {
            self.poll_delay_ms = config.poll_delay_ms;
        }

        self
    }
}
