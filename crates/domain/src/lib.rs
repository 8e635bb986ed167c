//! # fieldlink-domain
//!
//! Pure domain model for the fieldlink device ingestion endpoint.
//!
//! ## Responsibilities
//! - Foundational types: identifiers, error conventions, timestamps
//! - Define **Devices** (paired field modules and their telemetry history)
//! - Define **Submissions** (sensor readings and alerts sent by a device)
//! - Define **Request log entries** and the bounded, newest-first log holding them
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod device;
pub mod request_log;
pub mod submission;
