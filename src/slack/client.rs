use std::time::{Duration, Instant};

use serde_json::Value;
use ureq::http::Response;
use ureq::{Agent, Body};

use super::types::{CompleteUpload, FileInfo, PostMessage, UploadTarget, UploadedFile};
use super::SlackApi;
use crate::consts::HTTP_TIMEOUT_SECS;
use crate::error::AppError;
use crate::message::Block;
use crate::utils::debug_enabled;

/// Longest slice of an error body carried into error messages
const ERROR_BODY_LIMIT: usize = 200;

/// Blocking Slack Web API client authenticated with a bearer token.
pub(crate) struct SlackClient {
    agent: Agent,
    api_base: String,
    token: String,
}

impl SlackClient {
    pub(crate) fn new(api_base: &str, token: impl Into<String>) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(HTTP_TIMEOUT_SECS)))
            .http_status_as_error(false)
            .build();
        Self {
            agent: Agent::new_with_config(config),
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{}", self.api_base, method)
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Check transport status and the `ok` flag, returning the parsed body.
    fn read_api_response(
        method: &str,
        result: Result<Response<Body>, ureq::Error>,
        started: Instant,
    ) -> Result<Value, AppError> {
        let (status, text) = read_response(method, result)?;
        if debug_enabled() {
            eprintln!(
                "[debug] {method} -> HTTP {status} ({:.2}ms)",
                started.elapsed().as_secs_f64() * 1000.0
            );
        }
        if !(200..300).contains(&status) {
            return Err(AppError::Http {
                target: method.to_string(),
                status,
                body: truncate(&text),
            });
        }

        let value: Value = serde_json::from_str(&text).map_err(|_| AppError::Api {
            method: method.to_string(),
            error: "invalid_response".to_string(),
            payload: truncate(&text),
        })?;
        if value.get("ok").and_then(Value::as_bool) != Some(true) {
            let error = value
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string();
            return Err(AppError::Api {
                method: method.to_string(),
                error,
                payload: text,
            });
        }
        Ok(value)
    }
}

fn read_response(
    target: &str,
    result: Result<Response<Body>, ureq::Error>,
) -> Result<(u16, String), AppError> {
    let transport = |source: ureq::Error| AppError::Transport {
        target: target.to_string(),
        source,
    };
    let response = result.map_err(transport)?;
    let status = response.status().as_u16();
    let text = response.into_body().read_to_string().map_err(transport)?;
    Ok((status, text))
}

fn truncate(text: &str) -> String {
    text.chars().take(ERROR_BODY_LIMIT).collect()
}

fn required_str(value: &Value, method: &str, field: &'static str) -> Result<String, AppError> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| AppError::MissingField {
            method: method.to_string(),
            field,
        })
}

impl SlackApi for SlackClient {
    fn get_upload_url(
        &self,
        filename: &str,
        length: usize,
        alt_text: Option<&str>,
    ) -> Result<UploadTarget, AppError> {
        const METHOD: &str = "files.getUploadURLExternal";
        let mut form = vec![("filename", filename.to_string()), ("length", length.to_string())];
        if let Some(alt) = alt_text {
            form.push(("alt_txt", alt.to_string()));
        }

        let started = Instant::now();
        let result = self
            .agent
            .post(self.url(METHOD))
            .header("Authorization", self.auth_header())
            .send_form(form);
        let value = Self::read_api_response(METHOD, result, started)?;

        Ok(UploadTarget {
            upload_url: required_str(&value, METHOD, "upload_url")?,
            file_id: required_str(&value, METHOD, "file_id")?,
        })
    }

    fn upload_bytes(
        &self,
        upload_url: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<(), AppError> {
        let started = Instant::now();
        let result = self
            .agent
            .post(upload_url)
            .header("Content-Type", content_type)
            .send(bytes);
        let (status, text) = read_response("upload", result)?;
        if debug_enabled() {
            eprintln!(
                "[debug] upload {} bytes -> HTTP {status} ({:.2}ms)",
                bytes.len(),
                started.elapsed().as_secs_f64() * 1000.0
            );
        }
        if status != 200 {
            return Err(AppError::Http {
                target: "upload".to_string(),
                status,
                body: truncate(&text),
            });
        }
        Ok(())
    }

    fn complete_upload(
        &self,
        file_id: &str,
        title: &str,
        channel: &str,
        blocks: &[Block],
    ) -> Result<(), AppError> {
        const METHOD: &str = "files.completeUploadExternal";
        let body = CompleteUpload {
            files: vec![UploadedFile { id: file_id, title }],
            channel_id: channel,
            blocks,
        };

        let started = Instant::now();
        let result = self
            .agent
            .post(self.url(METHOD))
            .header("Authorization", self.auth_header())
            .send_json(&body);
        Self::read_api_response(METHOD, result, started)?;
        Ok(())
    }

    fn post_message(&self, message: &PostMessage<'_>) -> Result<String, AppError> {
        const METHOD: &str = "chat.postMessage";
        let started = Instant::now();
        let result = self
            .agent
            .post(self.url(METHOD))
            .header("Authorization", self.auth_header())
            .send_json(message);
        let value = Self::read_api_response(METHOD, result, started)?;
        required_str(&value, METHOD, "ts")
    }

    fn file_info(&self, file_id: &str) -> Result<FileInfo, AppError> {
        const METHOD: &str = "files.info";
        let started = Instant::now();
        let result = self
            .agent
            .get(self.url(METHOD))
            .header("Authorization", self.auth_header())
            .query("file", file_id)
            .call();
        let mut value = Self::read_api_response(METHOD, result, started)?;

        let file = value.get_mut("file").map(Value::take).unwrap_or(Value::Null);
        if file.is_null() {
            return Ok(FileInfo::default());
        }
        serde_json::from_value(file).map_err(|e| AppError::Api {
            method: METHOD.to_string(),
            error: "invalid_response".to_string(),
            payload: e.to_string(),
        })
    }
}
