//! Chart image discovery

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::AppError;

/// A chart image ready to be uploaded.
#[derive(Debug, Clone)]
pub(crate) struct ChartImage {
    pub(crate) path: PathBuf,
    pub(crate) filename: String,
    pub(crate) bytes: Vec<u8>,
}

impl ChartImage {
    pub(crate) fn read(path: &Path) -> Result<Self, AppError> {
        let bytes = fs::read(path).map_err(|source| AppError::ChartRead {
            path: path.to_path_buf(),
            source,
        })?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            path: path.to_path_buf(),
            filename,
            bytes,
        })
    }

    pub(crate) fn content_type(&self) -> &'static str {
        content_type_for(&self.path)
    }
}

/// Newest file in `dir` matching `pattern`, by modification time.
pub(crate) fn find_latest_chart(dir: &Path, pattern: &str) -> Option<PathBuf> {
    let full = format!("{}/{}", glob::Pattern::escape(&dir.to_string_lossy()), pattern);
    let entries = glob::glob(&full).ok()?;

    let mut latest: Option<(SystemTime, PathBuf)> = None;
    for path in entries.flatten() {
        if !path.is_file() {
            continue;
        }
        let Ok(modified) = fs::metadata(&path).and_then(|m| m.modified()) else {
            continue;
        };
        if latest.as_ref().is_none_or(|(best, _)| modified > *best) {
            latest = Some((modified, path));
        }
    }
    latest.map(|(_, path)| path)
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
