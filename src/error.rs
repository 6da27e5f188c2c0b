use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Missing required input: {name} (set --{flag} or {env})")]
    MissingInput {
        name: &'static str,
        flag: &'static str,
        env: &'static str,
    },

    #[error("HTTP {status} from {target}: {body}")]
    Http {
        target: String,
        status: u16,
        body: String,
    },

    #[error("Slack API error ({method}): {error} {payload}")]
    Api {
        method: String,
        error: String,
        payload: String,
    },

    #[error("Slack API response for {method} is missing \"{field}\"")]
    MissingField { method: String, field: &'static str },

    #[error("Request to {target} failed: {source}")]
    Transport {
        target: String,
        #[source]
        source: ureq::Error,
    },

    #[error("Failed to read state file {}: {source}", .path.display())]
    StateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse state file {}: {source}", .path.display())]
    StateParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write state file {}: {source}", .path.display())]
    StateWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read chart image {}: {source}", .path.display())]
    ChartRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    /// Application-level "not ok" responses, as opposed to transport failures.
    pub(crate) fn is_api_error(&self) -> bool {
        matches!(self, AppError::Api { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_names_flag_and_env() {
        let e = AppError::MissingInput {
            name: "Slack token",
            flag: "token",
            env: "SLACK_USER_TOKEN",
        };
        assert_eq!(
            e.to_string(),
            "Missing required input: Slack token (set --token or SLACK_USER_TOKEN)"
        );
    }

    #[test]
    fn api_error_includes_payload() {
        let e = AppError::Api {
            method: "chat.postMessage".to_string(),
            error: "channel_not_found".to_string(),
            payload: r#"{"ok":false,"error":"channel_not_found"}"#.to_string(),
        };
        let msg = e.to_string();
        assert!(msg.starts_with("Slack API error (chat.postMessage): channel_not_found"));
        assert!(msg.contains(r#""ok":false"#));
        assert!(e.is_api_error());
    }

    #[test]
    fn http_error_display() {
        let e = AppError::Http {
            target: "upload".to_string(),
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(e.to_string(), "HTTP 500 from upload: boom");
        assert!(!e.is_api_error());
    }

    #[test]
    fn missing_field_display() {
        let e = AppError::MissingField {
            method: "files.getUploadURLExternal".to_string(),
            field: "upload_url",
        };
        assert_eq!(
            e.to_string(),
            r#"Slack API response for files.getUploadURLExternal is missing "upload_url""#
        );
    }

    #[test]
    fn state_write_mentions_path() {
        let e = AppError::StateWrite {
            path: PathBuf::from("public/data/state.json"),
            source: std::io::Error::other("disk full"),
        };
        let msg = e.to_string();
        assert!(msg.contains("public/data/state.json"));
        assert!(msg.contains("disk full"));
    }
}
