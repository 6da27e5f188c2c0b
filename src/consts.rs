/// Standard date format used throughout the codebase: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Day boundary for thread rollover is fixed at UTC+9 (JST)
pub(crate) const DAY_BOUNDARY_OFFSET_SECS: i32 = 9 * 60 * 60;

pub(crate) const DEFAULT_STATE_FILE: &str = "public/data/latest-slack-update.json";

pub(crate) const DEFAULT_CHART_PATTERN: &str = "*_mood_chart.png";

pub(crate) const DEFAULT_API_BASE: &str = "https://slack.com/api";

/// Thread timestamp lookup after a file upload
pub(crate) const DEFAULT_POLL_RETRIES: u32 = 6;
pub(crate) const DEFAULT_POLL_DELAY_MS: u64 = 500;

pub(crate) const HTTP_TIMEOUT_SECS: u64 = 30;

/// Alt text attached to the uploaded chart
pub(crate) const CHART_ALT_TEXT: &str = "今日の気分記録";
