//! # fieldlink-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceRepository` — keyed storage of paired devices
//!   - `RequestLogStore` — bounded newest-first log of raw requests
//! - Define **driving/inbound ports** as use-case structs:
//!   - `PairingService` — register devices, ingest sensor data and alerts
//!   - `RequestLogService` — record and list raw requests
//! - Orchestrate domain objects without knowing *how* storage or IO works
//!
//! ## Dependency rule
//! Depends on `fieldlink-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
