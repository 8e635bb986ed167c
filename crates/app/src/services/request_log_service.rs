//! Request log service — records raw inbound requests for the debug dashboard.

use fieldlink_domain::error::FieldlinkError;
use fieldlink_domain::request_log::{LogEntry, RequestMetadata};
use fieldlink_domain::time;

use crate::ports::RequestLogStore;

/// Application service over a [`RequestLogStore`].
pub struct RequestLogService<S> {
    store: S,
}

impl<S: RequestLogStore> RequestLogService<S> {
    /// Create a new service backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stamp and record an inbound request. No validation is applied.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn record(&self, meta: RequestMetadata) -> Result<LogEntry, FieldlinkError> {
        let entry = LogEntry::new(meta, time::now());
        tracing::info!(
            id = %entry.id,
            method = %entry.method,
            path = %entry.path,
            origin = entry.origin.as_deref().unwrap_or("unknown"),
            "request received"
        );
        self.store.append(entry).await
    }

    /// Recorded requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn recent(&self) -> Result<Vec<LogEntry>, FieldlinkError> {
        self.store.recent().await
    }

    /// Forget every recorded request.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    #[tracing::instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), FieldlinkError> {
        self.store.clear().await
    }
}
