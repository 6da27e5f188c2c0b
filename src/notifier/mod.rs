//! Daily thread notifier
//!
//! Decides between starting today's thread and replying into it, then
//! drives the Slack calls for that choice.

pub(crate) mod decision;
pub(crate) mod poll;

use std::time::Duration;

pub(crate) use decision::{Publication, decide, is_first_of_day};
pub(crate) use poll::{PollPolicy, resolve_share_ts};

use crate::chart::ChartImage;
use crate::consts::CHART_ALT_TEXT;
use crate::error::AppError;
use crate::message::MoodMessage;
use crate::slack::{PostMessage, SlackApi};
use crate::state::NotificationState;

#[derive(Debug, Clone, Copy)]
pub(crate) struct NotifyOptions {
    pub(crate) reply_broadcast: bool,
    pub(crate) poll: PollPolicy,
    pub(crate) quiet: bool,
}

impl Default for NotifyOptions {
    fn default() -> Self {
        Self {
            reply_broadcast: true,
            poll: PollPolicy::default(),
            quiet: true,
        }
    }
}

/// Result of a successful publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// A new root message was created; `state` should be persisted.
    NewThread {
        state: NotificationState,
        chart: Option<String>,
    },
    /// Replied into an existing thread; state is unchanged.
    Reply { thread_id: String },
}

pub(crate) struct Notifier<'a, A: ?Sized, S> {
    api: &'a A,
    channel: &'a str,
    options: NotifyOptions,
    sleep: S,
}

impl<'a, A, S> Notifier<'a, A, S>
where
    A: SlackApi + ?Sized,
    S: FnMut(Duration),
{
    pub(crate) fn new(api: &'a A, channel: &'a str, options: NotifyOptions, sleep: S) -> Self {
        Self {
            api,
            channel,
            options,
            sleep,
        }
    }

    /// Post `message` for `today`. `chart` is only read on the first post of the day.
    pub(crate) fn publish<F>(
        &mut self,
        state: &NotificationState,
        today: &str,
        message: &MoodMessage,
        chart: F,
    ) -> Result<Outcome, AppError>
    where
        F: FnOnce() -> Result<Option<ChartImage>, AppError>,
    {
        match decide(state, today) {
            Publication::Reply { thread_id } => {
                self.reply(thread_id, message)?;
                Ok(Outcome::Reply {
                    thread_id: thread_id.to_string(),
                })
            }
            Publication::FirstOfDay => {
                let (thread_id, chart_name) = match chart()? {
                    Some(image) => {
                        let ts = self.start_thread_with_chart(&image, message)?;
                        (ts, Some(image.filename))
                    }
                    None => (Some(self.start_thread(message)?), None),
                };
                Ok(Outcome::NewThread {
                    state: NotificationState::new(today, thread_id),
                    chart: chart_name,
                })
            }
        }
    }

    fn start_thread(&self, message: &MoodMessage) -> Result<String, AppError> {
        let post = PostMessage::new(self.channel, &message.text, &message.blocks);
        self.api.post_message(&post)
    }

    /// Upload, share with blocks, then look up the message that carries the file.
    fn start_thread_with_chart(
        &mut self,
        image: &ChartImage,
        message: &MoodMessage,
    ) -> Result<Option<String>, AppError> {
        if !self.options.quiet {
            eprintln!(
                "Uploading {} ({} bytes)...",
                image.filename,
                image.bytes.len()
            );
        }
        let target =
            self.api
                .get_upload_url(&image.filename, image.bytes.len(), Some(CHART_ALT_TEXT))?;
        self.api
            .upload_bytes(&target.upload_url, &image.bytes, image.content_type())?;
        self.api.complete_upload(
            &target.file_id,
            &image.filename,
            self.channel,
            &message.blocks,
        )?;

        let ts = resolve_share_ts(
            self.api,
            &target.file_id,
            self.channel,
            self.options.poll,
            &mut self.sleep,
        )?;
        if ts.is_none() && !self.options.quiet {
            eprintln!(
                "Warning: could not resolve the message for file {} after {} attempts; \
                 the next post will start a new thread",
                target.file_id, self.options.poll.max_retries
            );
        }
        Ok(ts)
    }

    fn reply(&self, thread_id: &str, message: &MoodMessage) -> Result<String, AppError> {
        let post = PostMessage::new(self.channel, &message.text, &message.blocks)
            .in_thread(Some(thread_id), self.options.reply_broadcast);
        self.api.post_message(&post)
    }
}
