//! Request dispatcher for the crypto API.
//!
//! # Design
//! `ApiClient` owns the session state, a `Transport`, and a
//! `NotificationSink`. A call is split the same way every time:
//! `build_request` produces plain data, the transport executes it, and
//! `ApiResponse::from_http` normalizes the result. Only a missing base URL,
//! bad input, or an unserializable body surface as `Err`; HTTP error
//! statuses and transport failures come back as responses, with a notice.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::base_url::BaseUrl;
use crate::catalog::EndpointDescriptor;
use crate::error::{ApiError, ValidationError};
use crate::http::{HttpMethod, HttpRequest};
use crate::notify::{Notice, NotificationSink, TracingSink};
use crate::response::ApiResponse;
use crate::session::Session;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::ConfigValue;

/// Build the request for `method` on `base_url + path`.
///
/// `body` is attached as JSON only for methods that carry one; for any other
/// method it is dropped and no content type is set.
pub fn build_request(
    base_url: &BaseUrl,
    method: HttpMethod,
    path: &str,
    body: Option<&Value>,
) -> Result<HttpRequest, ApiError> {
    let (headers, body) = match body {
        Some(value) if method.sends_body() => {
            let json = serde_json::to_string(value)
                .map_err(|e| ApiError::SerializationError(e.to_string()))?;
            (vec![("content-type".to_string(), "application/json".to_string())], Some(json))
        }
        _ => (Vec::new(), None),
    };
    Ok(HttpRequest {
        method,
        url: base_url.join(path),
        headers,
        body,
    })
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "/"
    } else {
        path
    }
}

pub struct ApiClient<T, N = TracingSink> {
    session: Arc<Session>,
    transport: T,
    sink: N,
}

impl ApiClient<ReqwestTransport, TracingSink> {
    /// Client over the real network, reporting notices through `tracing`.
    pub fn over_http() -> Self {
        Self::new(ReqwestTransport::new(), TracingSink)
    }
}

impl<T: Transport, N: NotificationSink> ApiClient<T, N> {
    pub fn new(transport: T, sink: N) -> Self {
        Self::with_session(Arc::new(Session::new()), transport, sink)
    }

    pub fn with_session(session: Arc<Session>, transport: T, sink: N) -> Self {
        Self {
            session,
            transport,
            sink,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn is_loading(&self) -> bool {
        self.session.is_loading()
    }

    pub async fn base_url(&self) -> Option<BaseUrl> {
        self.session.base_url().await
    }

    pub async fn last_response(&self) -> Option<ApiResponse> {
        self.session.last_response().await
    }

    /// Validate and store the base URL, notifying the user either way.
    pub async fn configure_base_url(&self, input: &str) -> Result<BaseUrl, ApiError> {
        match self.session.configure_base_url(input).await {
            Ok(url) => {
                info!(base_url = %url, "base URL configured");
                self.sink.notify(Notice::success(format!("API base URL configured: {url}")));
                Ok(url)
            }
            Err(err) => {
                let message = match &err {
                    ValidationError::EmptyUrl => "Enter a URL".to_string(),
                    _ => "Invalid URL. Include the protocol (http:// or https://)".to_string(),
                };
                self.sink.notify(Notice::error(message));
                Err(err.into())
            }
        }
    }

    /// Issue `method` against `base_url + path`.
    ///
    /// The returned response also becomes the session's last response.
    pub async fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ApiError> {
        let Some(base_url) = self.session.base_url().await else {
            self.sink.notify(Notice::error("Set the API base URL first"));
            return Err(ApiError::Configuration);
        };

        let _in_flight = self.session.begin_call();
        let request = build_request(&base_url, method, path, body)?;
        let url = request.url.clone();
        info!(%method, %url, "dispatching");

        let response = match self.transport.execute(request).await {
            Ok(http) => {
                let response = ApiResponse::from_http(http);
                let shown = display_path(path);
                let status = response.status;
                if response.is_success() {
                    let message = format!("{method} {shown} - Success ({status})");
                    self.sink.notify(Notice::success(message));
                } else {
                    let message = format!("{method} {shown} - Error ({status})");
                    self.sink.notify(Notice::error(message));
                }
                response
            }
            Err(err) => {
                warn!(%url, error = %err, "transport failure");
                self.sink.notify(Notice::error(format!("Failed to reach {url}: {err}")));
                ApiResponse::network_error(&err.message)
            }
        };

        self.session.set_last_response(response.clone()).await;
        Ok(response)
    }

    pub async fn call_endpoint(
        &self,
        endpoint: &EndpointDescriptor,
    ) -> Result<ApiResponse, ApiError> {
        self.dispatch(HttpMethod::Get, endpoint.path, None).await
    }

    pub async fn fetch_config(&self, key: &str) -> Result<ApiResponse, ApiError> {
        self.dispatch(HttpMethod::Get, &format!("/config/{key}"), None).await
    }

    /// POST `{"value": value}` to `/config/<key>`. Empty values are refused
    /// without a call.
    pub async fn update_config(&self, key: &str, value: &str) -> Result<ApiResponse, ApiError> {
        if value.is_empty() {
            self.sink.notify(Notice::error("Enter a value first"));
            return Err(ValidationError::EmptyValue.into());
        }
        let body = serde_json::to_value(ConfigValue::new(value))
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        self.dispatch(HttpMethod::Post, &format!("/config/{key}"), Some(&body)).await
    }
}
