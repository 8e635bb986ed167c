//! Shared application state for axum handlers.

use std::sync::Arc;

use fieldlink_app::ports::{DeviceRepository, RequestLogStore};
use fieldlink_app::services::pairing_service::PairingService;
use fieldlink_app::services::request_log_service::RequestLogService;

/// State of the pairing service router.
///
/// Generic over the repository type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository itself does not need
/// to be `Clone` — only the `Arc` wrapper is cloned.
pub struct PairingState<R> {
    /// Registration and ingestion use-cases.
    pub pairing_service: Arc<PairingService<R>>,
}

impl<R> Clone for PairingState<R> {
    fn clone(&self) -> Self {
        Self {
            pairing_service: Arc::clone(&self.pairing_service),
        }
    }
}

impl<R> PairingState<R>
where
    R: DeviceRepository + Send + Sync + 'static,
{
    /// Create a new state from a service instance.
    pub fn new(pairing_service: PairingService<R>) -> Self {
        Self {
            pairing_service: Arc::new(pairing_service),
        }
    }
}

/// State of the test harness router.
pub struct HarnessState<S> {
    /// Bounded log of every request the harness has seen.
    pub request_log: Arc<RequestLogService<S>>,
    /// Auto-refresh interval of the dashboard page.
    pub refresh_seconds: u32,
}

impl<S> Clone for HarnessState<S> {
    fn clone(&self) -> Self {
        Self {
            request_log: Arc::clone(&self.request_log),
            refresh_seconds: self.refresh_seconds,
        }
    }
}

impl<S> HarnessState<S>
where
    S: RequestLogStore + Send + Sync + 'static,
{
    /// Create a new state from a service instance.
    pub fn new(request_log: RequestLogService<S>, refresh_seconds: u32) -> Self {
        Self {
            request_log: Arc::new(request_log),
            refresh_seconds,
        }
    }
}
