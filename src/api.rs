// API client module: a small blocking HTTP client that talks to the
// Moltbook REST API. One invocation performs at most one request, so the
// client stays synchronous and holds no state beyond its configuration.

use crate::config::Config;
use crate::error::CliError;
use anyhow::anyhow;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, trace};

/// API client that holds a reqwest blocking client, the base URL of the
/// API and the bearer token sent with every call.
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
    show_progress: bool,
}

impl ApiClient {
    pub fn new(config: Config) -> Result<Self, CliError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| anyhow!(e).context("Failed to build HTTP client"))?;
        Ok(ApiClient {
            client,
            base_url: config.base_url,
            token: config.token,
            show_progress: config.show_progress,
        })
    }

    fn auth_headers(&self) -> Result<HeaderMap, CliError> {
        let mut headers = HeaderMap::new();
        let val = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|_| anyhow!("API key contains characters not allowed in a header"))?;
        headers.insert(AUTHORIZATION, val);
        Ok(headers)
    }

    fn host(&self) -> String {
        Url::parse(&self.base_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| self.base_url.clone())
    }

    /// Issue one authenticated request and decode the JSON body.
    ///
    /// 404, 401 and 403 become their own error kinds. Every other status
    /// returns the body as-is; callers decide what `success: false` means.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: &[(&str, String)],
    ) -> Result<Value, CliError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "sending request");

        let mut headers = self.auth_headers()?;
        let mut req = self.client.request(method, &url).query(query);
        if let Some(b) = body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            req = req.body(b.to_string());
        }
        req = req.headers(headers);

        let spinner = self.spinner();
        let result = req.send();
        if let Some(s) = &spinner {
            s.finish_and_clear();
        }
        let res = result.map_err(|e| self.transport_error(e))?;

        let status = res.status();
        debug!(%status, "response received");
        match status {
            StatusCode::NOT_FOUND => return Err(CliError::NotFound),
            StatusCode::UNAUTHORIZED => return Err(CliError::AuthFailed),
            StatusCode::FORBIDDEN => return Err(CliError::PermissionDenied),
            _ => {}
        }

        let text = res.text().map_err(|e| self.transport_error(e))?;
        trace!(body = %text, "response body");
        parse_body(&text)
    }

    pub fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, CliError> {
        self.request(Method::GET, path, None, query)
    }

    pub fn post(&self, path: &str, body: Option<&Value>) -> Result<Value, CliError> {
        self.request(Method::POST, path, body, &[])
    }

    pub fn delete(&self, path: &str) -> Result<Value, CliError> {
        self.request(Method::DELETE, path, None, &[])
    }

    fn transport_error(&self, e: reqwest::Error) -> CliError {
        debug!(error = %e, "transport failure");
        if e.is_timeout() {
            CliError::Timeout
        } else if e.is_decode() {
            CliError::Decode
        } else {
            CliError::Connection { host: self.host() }
        }
    }

    fn spinner(&self) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            pb.set_style(style);
        }
        pb.set_message("Contacting Moltbook...");
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}

/// Parse a response body without serde_json's nesting limit. Reply
/// threads nest two JSON levels per comment, so the default limit would
/// reject threads the server happily serves.
fn parse_body(text: &str) -> Result<Value, CliError> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))
        .map_err(|e| {
            debug!(error = %e, "malformed response body");
            CliError::Decode
        })?;
    de.end().map_err(|_| CliError::Decode)?;
    Ok(value)
}

/// Fail with `CliError::Api` when the body is an explicit `success: false`
/// envelope. A missing `success` field counts as success, and the other
/// envelope fields are read leniently one at a time.
pub fn handle_error(data: &Value) -> Result<(), CliError> {
    if data.get("success").and_then(Value::as_bool) != Some(false) {
        return Ok(());
    }
    Err(CliError::Api {
        message: field_text(data, "error").unwrap_or_else(|| "Unknown error".into()),
        hint: field_text(data, "hint"),
        retry_after_minutes: field_text(data, "retry_after_minutes"),
    })
}

/// Text of an envelope field; absent, null, false, empty and zero read as
/// `None`.
fn field_text(data: &Value, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Decode a response body into its typed shape; a mismatch is a protocol
/// error like a malformed body.
pub fn decode<T: DeserializeOwned>(data: Value) -> Result<T, CliError> {
    T::deserialize(serde_stacker::Deserializer::new(data)).map_err(|e| {
        debug!(error = %e, "unexpected response shape");
        CliError::Decode
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failure_envelope_becomes_api_error() {
        let data = json!({"success": false, "error": "E", "hint": "H", "retry_after_minutes": 5});
        match handle_error(&data) {
            Err(CliError::Api {
                message,
                hint,
                retry_after_minutes,
            }) => {
                assert_eq!(message, "E");
                assert_eq!(hint.as_deref(), Some("H"));
                assert_eq!(retry_after_minutes.as_deref(), Some("5"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn missing_success_field_is_success() {
        assert!(handle_error(&json!({"posts": []})).is_ok());
        assert!(handle_error(&json!({"success": true})).is_ok());
    }

    #[test]
    fn missing_error_text_defaults() {
        let err = handle_error(&json!({"success": false})).unwrap_err();
        assert_eq!(err.to_string(), "Unknown error");
    }

    #[test]
    fn odd_field_types_still_fail_the_call() {
        let data = json!({"success": false, "error": "Rate limited", "retry_after_minutes": "soon"});
        match handle_error(&data) {
            Err(CliError::Api {
                message,
                hint,
                retry_after_minutes,
            }) => {
                assert_eq!(message, "Rate limited");
                assert!(hint.is_none());
                assert_eq!(retry_after_minutes.as_deref(), Some("soon"));
            }
            other => panic!("unexpected: {:?}", other),
        }

        let err = handle_error(&json!({"success": false, "error": {"code": 7}, "hint": 3})).unwrap_err();
        assert_eq!(err.to_string(), r#"{"code":7}"#);
    }

    #[test]
    fn empty_and_zero_fields_are_dropped() {
        let data = json!({"success": false, "error": "E", "hint": "", "retry_after_minutes": 0});
        match handle_error(&data) {
            Err(CliError::Api {
                hint,
                retry_after_minutes,
                ..
            }) => {
                assert!(hint.is_none());
                assert!(retry_after_minutes.is_none());
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn bodies_nest_past_default_limit() {
        let depth = 500;
        let text = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
        assert!(serde_json::from_str::<Value>(&text).is_err());
        let mut value = parse_body(&text).unwrap();
        for _ in 0..depth - 1 {
            value = value[0].take();
        }
        assert_eq!(value, json!([]));
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(matches!(parse_body(r#"{"a": 1} x"#), Err(CliError::Decode)));
        assert!(matches!(parse_body("<html>"), Err(CliError::Decode)));
    }

    #[test]
    fn decode_mismatch_is_protocol_error() {
        #[derive(Deserialize, Debug)]
        struct Shape {
            #[allow(dead_code)]
            n: u32,
        }
        let res: Result<Shape, _> = decode(json!({"n": "x"}));
        assert!(matches!(res, Err(CliError::Decode)));
    }
}
