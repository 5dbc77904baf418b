//! Client core for the crypto REST API.
//!
//! # Overview
//! A user configures a base URL, then issues calls against a fixed catalog
//! of named endpoints (prices, config, stats, orders). Each call's outcome is
//! normalized into an `ApiResponse` and kept as the session's last response.
//!
//! # Design
//! - `ApiClient` is the dispatcher. It owns a `Session` (base URL, in-flight
//!   counter, last response), a `Transport`, and a `NotificationSink`.
//! - Requests are built as plain data (`build_request`) and executed by the
//!   transport, so all decision logic is testable without a network.
//! - HTTP error statuses and transport failures are data, not `Err`.
//! - The catalog is static and carries no behavior beyond lookups.

pub mod base_url;
pub mod catalog;
pub mod client;
pub mod error;
pub mod http;
pub mod notify;
pub mod response;
pub mod session;
pub mod transport;
pub mod types;

pub use base_url::BaseUrl;
pub use catalog::{Category, EndpointDescriptor, EndpointGroup};
pub use client::{build_request, ApiClient};
pub use error::{ApiError, TransportError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use notify::{MemorySink, Notice, NoticeLevel, NotificationSink, TracingSink};
pub use response::{ApiResponse, ResponseBody};
pub use session::Session;
pub use transport::{ReqwestTransport, Transport};
pub use types::ConfigValue;
