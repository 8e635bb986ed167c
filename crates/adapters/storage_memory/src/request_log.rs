//! In-memory implementation of [`RequestLogStore`].

use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use fieldlink_app::ports::RequestLogStore;
use fieldlink_domain::error::FieldlinkError;
use fieldlink_domain::request_log::{LogEntry, RequestLog};

use crate::error::StorageError;

/// Request log backed by the domain's bounded [`RequestLog`].
#[derive(Debug, Default)]
pub struct InMemoryRequestLog {
    log: Mutex<RequestLog>,
}

impl InMemoryRequestLog {
    /// Create an empty log holding at most `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            log: Mutex::new(RequestLog::with_capacity(capacity)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, RequestLog>, StorageError> {
        self.log
            .lock()
            .map_err(|_| StorageError::Poisoned("request log"))
    }
}

impl RequestLogStore for InMemoryRequestLog {
    fn append(
        &self,
        entry: LogEntry,
    ) -> impl Future<Output = Result<LogEntry, FieldlinkError>> + Send {
        let result = self.lock().map(|mut log| {
            if let Some(evicted) = log.push(entry.clone()) {
                tracing::trace!(id = %evicted.id, "evicted oldest request");
            }
            entry
        });
        async { result.map_err(FieldlinkError::from) }
    }

    fn recent(&self) -> impl Future<Output = Result<Vec<LogEntry>, FieldlinkError>> + Send {
        let result = self.lock().map(|log| log.iter().cloned().collect());
        async { result.map_err(FieldlinkError::from) }
    }

    fn clear(&self) -> impl Future<Output = Result<(), FieldlinkError>> + Send {
        let result = self.lock().map(|mut log| log.clear());
        async { result.map_err(FieldlinkError::from) }
    }
}
