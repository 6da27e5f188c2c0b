use crate::state::NotificationState;

/// What today's invocation should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Publication<'a> {
    /// Start a new thread (first post of the day, or no usable thread id).
    FirstOfDay,
    /// Reply into the thread started earlier today.
    Reply { thread_id: &'a str },
}

pub(crate) fn decide<'a>(state: &'a NotificationState, today: &str) -> Publication<'a> {
    match (state.date.as_deref(), state.thread_id()) {
        (Some(date), Some(thread_id)) if date == today => Publication::Reply { thread_id },
        _ => Publication::FirstOfDay,
    }
}

pub(crate) fn is_first_of_day(state: &NotificationState, today: &str) -> bool {
    decide(state, today) == Publication::FirstOfDay
}
