use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::chart::{ChartImage, find_latest_chart};
use crate::cli::Cli;
use crate::consts::{DEFAULT_API_BASE, DEFAULT_CHART_PATTERN, DEFAULT_STATE_FILE};
use crate::error::AppError;
use crate::message::{MoodEntry, MoodMessage};
use crate::notifier::{Notifier, NotifyOptions, Outcome, PollPolicy, Publication, decide, is_first_of_day};
use crate::slack::SlackClient;
use crate::state::{NotificationState, StateStore};
use crate::utils::today_string;

/// Where the first post of the day gets its chart from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ChartSource {
    /// Newest file matching a glob pattern in a directory
    Search { dir: PathBuf, pattern: String },
    /// A specific file
    Path(PathBuf),
}

impl ChartSource {
    fn locate(&self) -> Option<PathBuf> {
        match self {
            ChartSource::Search { dir, pattern } => find_latest_chart(dir, pattern),
            ChartSource::Path(path) => Some(path.clone()),
        }
    }
}

/// Fully resolved inputs for one run.
#[derive(Debug, Clone)]
pub(crate) struct RunSettings {
    pub(crate) token: String,
    pub(crate) channel: String,
    pub(crate) entry: MoodEntry,
    pub(crate) today: String,
    pub(crate) state_file: PathBuf,
    pub(crate) chart: ChartSource,
    pub(crate) api_base: String,
    pub(crate) options: NotifyOptions,
    pub(crate) dry_run: bool,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl RunSettings {
    /// Check preconditions and fill defaults. Fails before any network call.
    pub(crate) fn resolve(cli: Cli, now: DateTime<Utc>) -> Result<Self, AppError> {
        let token = non_empty(cli.token).ok_or(AppError::MissingInput {
            name: "Slack token",
            flag: "token",
            env: "SLACK_USER_TOKEN",
        })?;
        let channel = non_empty(cli.channel).ok_or(AppError::MissingInput {
            name: "Slack channel ID",
            flag: "channel",
            env: "SLACK_CHANNEL_ID",
        })?;

        let today = today_string(now);
        let date = non_empty(cli.date).unwrap_or_else(|| today.clone());
        let entry = MoodEntry::new(date, cli.score.unwrap_or_default(), cli.note);

        let chart = match cli.chart {
            Some(path) => ChartSource::Path(path),
            None => ChartSource::Search {
                dir: PathBuf::from("."),
                pattern: cli
                    .chart_pattern
                    .unwrap_or_else(|| DEFAULT_CHART_PATTERN.to_string()),
            },
        };

        let defaults = PollPolicy::default();
        let poll = PollPolicy {
            max_retries: cli.poll_retries.unwrap_or(defaults.max_retries),
            base_delay: cli
                .poll_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.base_delay),
        };

        Ok(Self {
            token,
            channel,
            entry,
            today,
            state_file: cli
                .state_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE)),
            chart,
            api_base: non_empty(cli.api_base).unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            options: NotifyOptions {
                reply_broadcast: cli.reply_broadcast.unwrap_or(true),
                poll,
                quiet: cli.quiet,
            },
            dry_run: cli.dry_run,
        })
    }
}

pub(crate) fn run(settings: &RunSettings) -> Result<(), AppError> {
    let store = StateStore::new(&settings.state_file);
    let state = store.load()?;
    let message = MoodMessage::build(&settings.entry);

    if settings.dry_run {
        print_dry_run(settings, &state, &message);
        return Ok(());
    }

    let client = SlackClient::new(&settings.api_base, settings.token.as_str());
    let mut notifier = Notifier::new(
        &client,
        &settings.channel,
        settings.options,
        std::thread::sleep,
    );
    let outcome = notifier.publish(&state, &settings.today, &message, || {
        settings
            .chart
            .locate()
            .map(|path| ChartImage::read(&path))
            .transpose()
    })?;

    let quiet = settings.options.quiet;
    match outcome {
        Outcome::NewThread { state, chart } => {
            store.save(&state)?;
            if !quiet {
                let via = chart.map_or_else(|| "message".to_string(), |name| format!("chart {name}"));
                match state.thread_id() {
                    Some(ts) => eprintln!("Started thread {ts} for {} ({via})", settings.today),
                    None => eprintln!("Posted {via} for {} without a thread id", settings.today),
                }
                eprintln!("Saved state to {}", store.path().display());
            }
        }
        Outcome::Reply { thread_id } => {
            if !quiet {
                let broadcast = if settings.options.reply_broadcast {
                    " (broadcast)"
                } else {
                    ""
                };
                eprintln!("Replied in thread {thread_id}{broadcast}");
            }
        }
    }
    Ok(())
}

fn print_dry_run(settings: &RunSettings, state: &NotificationState, message: &MoodMessage) {
    let (action, thread_ts, chart) = match decide(state, &settings.today) {
        Publication::Reply { thread_id } => ("reply", Some(thread_id.to_string()), None),
        Publication::FirstOfDay => (
            "new_thread",
            None,
            settings.chart.locate().map(|p| p.display().to_string()),
        ),
    };
    let out = json!({
        "today": settings.today,
        "action": action,
        "first_of_day": is_first_of_day(state, &settings.today),
        "channel": settings.channel,
        "thread_ts": thread_ts,
        "reply_broadcast": action == "reply" && settings.options.reply_broadcast,
        "chart": chart,
        "text": message.text,
        "blocks": message.blocks,
    });
    match serde_json::to_string_pretty(&out) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to render dry run: {e}"),
    }
}
