//! Slack Web API access
//!
//! `SlackApi` is the seam between the notifier and the network; `SlackClient`
//! is the ureq-backed implementation.

pub(crate) mod client;
pub(crate) mod types;

pub(crate) use client::SlackClient;
pub(crate) use types::{FileInfo, PostMessage, UploadTarget};

use crate::error::AppError;
use crate::message::Block;

pub(crate) trait SlackApi {
    /// `files.getUploadURLExternal`
    fn get_upload_url(
        &self,
        filename: &str,
        length: usize,
        alt_text: Option<&str>,
    ) -> Result<UploadTarget, AppError>;

    /// Raw byte transfer to the URL issued by `get_upload_url`.
    fn upload_bytes(&self, upload_url: &str, bytes: &[u8], content_type: &str)
    -> Result<(), AppError>;

    /// `files.completeUploadExternal`, sharing the file into `channel` with `blocks`.
    fn complete_upload(
        &self,
        file_id: &str,
        title: &str,
        channel: &str,
        blocks: &[Block],
    ) -> Result<(), AppError>;

    /// `chat.postMessage`; returns the new message's `ts`.
    fn post_message(&self, message: &PostMessage<'_>) -> Result<String, AppError>;

    /// `files.info`
    fn file_info(&self, file_id: &str) -> Result<FileInfo, AppError>;
}
