//! Request log port — bounded storage of raw inbound requests.

use std::future::Future;
use std::sync::Arc;

use fieldlink_domain::error::FieldlinkError;
use fieldlink_domain::request_log::LogEntry;

/// Bounded, newest-first store of [`LogEntry`]s.
///
/// Implementations must hold the capacity invariant after every append,
/// not just eventually.
pub trait RequestLogStore {
    /// Insert at the head, evicting the oldest entry when over capacity.
    fn append(&self, entry: LogEntry)
    -> impl Future<Output = Result<LogEntry, FieldlinkError>> + Send;

    /// All entries, newest first.
    fn recent(&self) -> impl Future<Output = Result<Vec<LogEntry>, FieldlinkError>> + Send;

    /// Drop every entry.
    fn clear(&self) -> impl Future<Output = Result<(), FieldlinkError>> + Send;
}

impl<S: RequestLogStore + Send + Sync> RequestLogStore for Arc<S> {
    fn append(
        &self,
        entry: LogEntry,
    ) -> impl Future<Output = Result<LogEntry, FieldlinkError>> + Send {
        (**self).append(entry)
    }

    fn recent(&self) -> impl Future<Output = Result<Vec<LogEntry>, FieldlinkError>> + Send {
        (**self).recent()
    }

    fn clear(&self) -> impl Future<Output = Result<(), FieldlinkError>> + Send {
        (**self).clear()
    }
}
