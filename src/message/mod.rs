//! Mood message formatting
//!
//! Turns a mood entry into Block Kit blocks plus a plain-text fallback.

pub(crate) mod block;
pub(crate) mod mood;

use serde::Serialize;

pub(crate) use block::{Block, Text};
pub(crate) use mood::MoodIndicator;

/// One mood record as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MoodEntry {
    pub(crate) date: String,
    pub(crate) score: String,
    pub(crate) note: Option<String>,
}

impl MoodEntry {
    pub(crate) fn new(date: impl Into<String>, score: impl Into<String>, note: Option<String>) -> Self {
        Self {
            date: date.into(),
            score: score.into(),
            note: note.filter(|n| !n.is_empty()),
        }
    }

    pub(crate) fn indicator(&self) -> MoodIndicator {
        MoodIndicator::from_score(&self.score)
    }
}

/// Rendered message: fallback text plus the structured blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct MoodMessage {
    pub(crate) text: String,
    pub(crate) blocks: Vec<Block>,
}

impl MoodMessage {
    pub(crate) fn build(entry: &MoodEntry) -> Self {
        Self {
            text: fallback_text(entry),
            blocks: build_blocks(entry),
        }
    }
}

pub(crate) fn build_blocks(entry: &MoodEntry) -> Vec<Block> {
    let emoji = entry.indicator().emoji();
    let mut blocks = vec![
        Block::header("新しい気分記録"),
        Block::context(format!("*記録日*: {}（JST）", entry.date)),
        Block::section_fields(vec![Text::mrkdwn(format!(
            "*スコア*\n{} {}",
            entry.score, emoji
        ))]),
    ];
    if let Some(note) = &entry.note {
        blocks.push(Block::Divider);
        blocks.push(Block::section_text(format!("*メモ*\n>{note}")));
    }
    blocks
}

pub(crate) fn fallback_text(entry: &MoodEntry) -> String {
    let mut text = format!("新しい気分記録: {}\nスコア: {}", entry.date, entry.score);
    if let Some(note) = &entry.note {
        text.push_str(&format!("\nメモ: {note}"));
    }
    text
}
