//! Per-session state: base URL, in-flight call count, last response.
//!
//! # Design
//! The state is an explicit container owned by the client instead of ambient
//! globals. Calls may overlap, so loading is tracked as a counter of
//! outstanding calls rather than a boolean that the first finisher would
//! clear. The last response is last-write-wins in completion order.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::RwLock;

use crate::base_url::BaseUrl;
use crate::error::ValidationError;
use crate::response::ApiResponse;

#[derive(Debug, Default)]
pub struct Session {
    base_url: RwLock<Option<BaseUrl>>,
    in_flight: AtomicUsize,
    last_response: RwLock<Option<ApiResponse>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a new base URL. On rejection the previous value is
    /// left untouched.
    pub async fn configure_base_url(&self, input: &str) -> Result<BaseUrl, ValidationError> {
        let url = BaseUrl::parse(input)?;
        *self.base_url.write().await = Some(url.clone());
        Ok(url)
    }

    pub async fn base_url(&self) -> Option<BaseUrl> {
        self.base_url.read().await.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight() > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub async fn last_response(&self) -> Option<ApiResponse> {
        self.last_response.read().await.clone()
    }

    pub(crate) async fn set_last_response(&self, response: ApiResponse) {
        *self.last_response.write().await = Some(response);
    }

    /// Mark a call as started; the returned guard marks it finished on drop.
    pub(crate) fn begin_call(&self) -> InFlightGuard<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        InFlightGuard { session: self }
    }
}

#[derive(Debug)]
pub(crate) struct InFlightGuard<'a> {
    session: &'a Session,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.session.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
