//! Request log — raw records of inbound requests, kept for connectivity debugging.
//!
//! [`RequestLog`] is a bounded buffer ordered newest first: every push goes to
//! the head, and a push that exceeds the capacity evicts exactly one entry
//! from the tail.

use std::collections::{BTreeMap, VecDeque};

use serde::Serialize;
use serde_json::Value;

use crate::id::RequestId;
use crate::time::Timestamp;

/// Number of entries kept when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 50;

/// What the transport layer knows about a request before it is logged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestMetadata {
    pub method: String,
    pub path: String,
    pub origin: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
    /// Decoded body: an object for JSON or form payloads, a string for plain
    /// text, `null` when empty.
    pub body: Value,
}

/// A logged request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub id: RequestId,
    pub timestamp: Timestamp,
    pub method: String,
    pub path: String,
    pub origin: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
    pub body: Value,
}

impl LogEntry {
    /// Stamp request metadata with its capture time.
    #[must_use]
    pub fn new(meta: RequestMetadata, timestamp: Timestamp) -> Self {
        Self {
            id: RequestId::from_timestamp(timestamp),
            timestamp,
            method: meta.method,
            path: meta.path,
            origin: meta.origin,
            headers: meta.headers,
            query: meta.query,
            body: meta.body,
        }
    }

    /// Render the body for display: strings verbatim, anything else as
    /// pretty-printed JSON, nothing for `null`.
    #[must_use]
    pub fn body_text(&self) -> String {
        match &self.body {
            Value::Null => String::new(),
            Value::String(text) => text.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_default(),
        }
    }
}

/// Bounded newest-first log.
#[derive(Debug, Clone)]
pub struct RequestLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl Default for RequestLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl RequestLog {
    /// Create an empty log holding at most `capacity` entries.
    ///
    /// A zero capacity is raised to one so the latest entry is always kept.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Insert at the head, evicting the oldest entry when over capacity.
    ///
    /// Returns the evicted entry, if any.
    pub fn push(&mut self, entry: LogEntry) -> Option<LogEntry> {
        self.entries.push_front(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_back()
        } else {
            None
        }
    }

    /// Iterate newest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
