//! Normalized response record kept as the session's "last response".
//!
//! # Design
//! The body is a tagged union rather than an untyped value: `Json` when the
//! server declared a JSON content type and the body parsed, `Text`
//! otherwise. A body that claims JSON but fails to parse is kept as text so
//! the caller can still inspect what the server sent.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::http::HttpResponse;

pub const NETWORK_ERROR_STATUS_TEXT: &str = "Network Error";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(v) => Some(v),
            ResponseBody::Text(_) => None,
        }
    }
}

/// Outcome of one dispatched call.
///
/// A `status` of 0 marks the transport-failure sentinel built by
/// [`ApiResponse::network_error`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub data: ResponseBody,
    pub status: u16,
    pub status_text: String,
    pub headers: BTreeMap<String, String>,
}

impl ApiResponse {
    pub fn from_http(response: HttpResponse) -> Self {
        let declares_json = response
            .header("content-type")
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"));

        let data = if declares_json {
            match serde_json::from_str(&response.body) {
                Ok(value) => ResponseBody::Json(value),
                Err(e) => {
                    warn!(
                        status = response.status,
                        error = %e,
                        "response declared JSON but body did not parse; keeping raw text"
                    );
                    ResponseBody::Text(response.body)
                }
            }
        } else {
            ResponseBody::Text(response.body)
        };

        let mut headers: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in response.headers {
            headers
                .entry(name)
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert(value);
        }

        Self {
            data,
            status: response.status,
            status_text: response.status_text,
            headers,
        }
    }

    /// Sentinel for a call that never got an HTTP response.
    pub fn network_error(message: &str) -> Self {
        Self {
            data: ResponseBody::Json(serde_json::json!({ "error": message })),
            status: 0,
            status_text: NETWORK_ERROR_STATUS_TEXT.to_string(),
            headers: BTreeMap::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Status: {} {}", self.status, self.status_text)?;
        let headers = serde_json::to_string_pretty(&self.headers).map_err(|_| fmt::Error)?;
        writeln!(f, "Headers:\n{headers}")?;
        match &self.data {
            ResponseBody::Text(text) => write!(f, "Body:\n{text}"),
            ResponseBody::Json(value) => {
                let pretty = serde_json::to_string_pretty(value).map_err(|_| fmt::Error)?;
                write!(f, "Body:\n{pretty}")
            }
        }
    }
}
