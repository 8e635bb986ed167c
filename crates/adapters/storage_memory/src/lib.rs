//! # fieldlink-adapter-storage-memory
//!
//! Storage adapter keeping all state in process memory.
//!
//! ## Responsibilities
//! - Implement `DeviceRepository` over a `HashMap` keyed by device id
//! - Implement `RequestLogStore` over the domain's bounded `RequestLog`
//!
//! Every port call takes a short lock and never holds it across an `.await`,
//! so each mutation is atomic with respect to concurrent requests. All state
//! is discarded when the process exits.

mod error;

pub mod device_repo;
pub mod request_log;

pub use device_repo::InMemoryDeviceRepository;
pub use error::StorageError;
pub use request_log::InMemoryRequestLog;
