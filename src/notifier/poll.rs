use std::time::Duration;

use crate::consts::{DEFAULT_POLL_DELAY_MS, DEFAULT_POLL_RETRIES};
use crate::error::AppError;
use crate::slack::SlackApi;
use crate::utils::debug_enabled;

/// Bounded exponential backoff for resolving a shared file's message ts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PollPolicy {
    pub(crate) max_retries: u32,
    pub(crate) base_delay: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_POLL_RETRIES,
            base_delay: Duration::from_millis(DEFAULT_POLL_DELAY_MS),
        }
    }
}

impl PollPolicy {
    /// Delay after the `attempt`-th lookup (0-based): `base * 2^attempt`.
    pub(crate) fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    /// Upper bound on cumulative sleep: `base * (2^retries - 1)`.
    pub(crate) fn max_total_wait(&self) -> Duration {
        (0..self.max_retries).map(|i| self.delay_for(i)).sum()
    }
}

/// Poll `files.info` until the file shows up as shared in `channel`.
///
/// Not-ok API responses count as "not yet"; transport failures abort.
/// Returns `Ok(None)` once the retry budget is spent.
pub(crate) fn resolve_share_ts<A, S>(
    api: &A,
    file_id: &str,
    channel: &str,
    policy: PollPolicy,
    sleep: &mut S,
) -> Result<Option<String>, AppError>
where
    A: SlackApi + ?Sized,
    S: FnMut(Duration),
{
    for attempt in 0..policy.max_retries {
        match api.file_info(file_id) {
            Ok(info) => {
                if let Some(ts) = info.share_ts(channel) {
                    return Ok(Some(ts.to_string()));
                }
            }
            Err(e) if e.is_api_error() => {
                if debug_enabled() {
                    eprintln!("[debug] files.info attempt {}: {e}", attempt + 1);
                }
            }
            Err(e) => return Err(e),
        }
        sleep(policy.delay_for(attempt));
    }
    Ok(None)
}
