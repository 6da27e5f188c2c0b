use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::message::Block;

/// Where to send the bytes of a pending upload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct UploadTarget {
    pub(crate) upload_url: String,
    pub(crate) file_id: String,
}

/// `chat.postMessage` request body.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct PostMessage<'a> {
    pub(crate) channel: &'a str,
    pub(crate) text: &'a str,
    pub(crate) blocks: &'a [Block],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) thread_ts: Option<&'a str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub(crate) reply_broadcast: bool,
}

impl<'a> PostMessage<'a> {
    pub(crate) fn new(channel: &'a str, text: &'a str, blocks: &'a [Block]) -> Self {
        Self {
            channel,
            text,
            blocks,
            thread_ts: None,
            reply_broadcast: false,
        }
    }

    /// Reply into `thread_ts`. Broadcast only applies to threaded replies.
    pub(crate) fn in_thread(mut self, thread_ts: Option<&'a str>, broadcast: bool) -> Self {
        self.thread_ts = thread_ts.filter(|ts| !ts.is_empty());
        self.reply_broadcast = broadcast && self.thread_ts.is_some();
        self
    }
}

/// `files.completeUploadExternal` request body.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CompleteUpload<'a> {
    pub(crate) files: Vec<UploadedFile<'a>>,
    pub(crate) channel_id: &'a str,
    pub(crate) blocks: &'a [Block],
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct UploadedFile<'a> {
    pub(crate) id: &'a str,
    pub(crate) title: &'a str,
}

/// Subset of the `files.info` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct FileInfo {
    #[serde(default)]
    pub(crate) shares: FileShares,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct FileShares {
    #[serde(default)]
    pub(crate) public: HashMap<String, Vec<ShareRecord>>,
    #[serde(default)]
    pub(crate) private: HashMap<String, Vec<ShareRecord>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ShareRecord {
    #[serde(default)]
    pub(crate) ts: Option<String>,
}

impl FileInfo {
    /// Timestamp of the latest share of this file in `channel`, public shares first.
    pub(crate) fn share_ts(&self, channel: &str) -> Option<&str> {
        [&self.shares.public, &self.shares.private]
            .into_iter()
            .find_map(|scope| {
                scope
                    .get(channel)?
                    .last()?
                    .ts
                    .as_deref()
                    .filter(|ts| !ts.is_empty())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn file_info(v: serde_json::Value) -> FileInfo {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn share_ts_takes_last_public_entry() {
        let info = file_info(json!({
            "id": "F1",
            "shares": {"public": {"C1": [{"ts": "1.0"}, {"ts": "2.0"}]}}
        }));
        assert_eq!(info.share_ts("C1"), Some("2.0"));
    }

    #[test]
    fn share_ts_falls_back_to_private() {
        let info = file_info(json!({
            "shares": {
                "public": {"C_OTHER": [{"ts": "9.0"}]},
                "private": {"G1": [{"ts": "3.0"}]}
            }
        }));
        assert_eq!(info.share_ts("G1"), Some("3.0"));
        assert_eq!(info.share_ts("C1"), None);
    }

    #[test]
    fn share_ts_ignores_entries_without_ts() {
        let info = file_info(json!({
            "shares": {
                "public": {"C1": [{"ts": "1.0"}, {"reply_count": 0}]},
                "private": {"C1": [{"ts": "4.0"}]}
            }
        }));
        assert_eq!(info.share_ts("C1"), Some("4.0"));
    }

    #[test]
    fn share_ts_none_without_shares() {
        assert_eq!(file_info(json!({"id": "F1"})).share_ts("C1"), None);
        assert_eq!(
            file_info(json!({"shares": {"public": {"C1": []}}})).share_ts("C1"),
            None
        );
    }

    #[test]
    fn post_message_top_level_omits_thread_fields() {
        let blocks = [Block::Divider];
        let msg = PostMessage::new("C1", "hi", &blocks);
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"channel": "C1", "text": "hi", "blocks": [{"type": "divider"}]})
        );
    }

    #[test]
    fn post_message_reply_with_broadcast() {
        let blocks: [Block; 0] = [];
        let msg = PostMessage::new("C1", "hi", &blocks).in_thread(Some("1.5"), true);
        let v = serde_json::to_value(&msg).unwrap();
        assert_eq!(v["thread_ts"], "1.5");
        assert_eq!(v["reply_broadcast"], true);
    }

    #[test]
    fn broadcast_ignored_without_thread() {
        let blocks: [Block; 0] = [];
        let msg = PostMessage::new("C1", "hi", &blocks).in_thread(None, true);
        let v = serde_json::to_value(&msg).unwrap();
        assert!(v.get("thread_ts").is_none());
        assert!(v.get("reply_broadcast").is_none());

        let msg = PostMessage::new("C1", "hi", &blocks).in_thread(Some(""), true);
        assert!(!msg.reply_broadcast);
    }

    #[test]
    fn reply_without_broadcast_omits_flag() {
        let blocks: [Block; 0] = [];
        let msg = PostMessage::new("C1", "hi", &blocks).in_thread(Some("1.5"), false);
        let v = serde_json::to_value(&msg).unwrap();
        assert_eq!(v["thread_ts"], "1.5");
        assert!(v.get("reply_broadcast").is_none());
    }

    #[test]
    fn complete_upload_body_shape() {
        let blocks = [Block::header("x")];
        let body = CompleteUpload {
            files: vec![UploadedFile {
                id: "F1",
                title: "a_mood_chart.png",
            }],
            channel_id: "C1",
            blocks: &blocks,
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["files"], json!([{"id": "F1", "title": "a_mood_chart.png"}]));
        assert_eq!(v["channel_id"], "C1");
        assert_eq!(v["blocks"][0]["type"], "header");
    }
}
