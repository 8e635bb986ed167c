//! # fieldlink-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! Two routers are exposed, one per service:
//!
//! - **Pairing** ([`router::pairing`]): the JSON API field devices use to
//!   register (`POST /api/register`) and push sensor data or alerts
//!   (`POST /api/data`). Unknown routes get axum's default 404.
//! - **Harness** ([`router::harness`]): a catch-all test endpoint for
//!   GSM/GPRS modules. Every request is recorded in a bounded log and echoed
//!   back; `GET /` renders that log as an HTML dashboard that works with
//!   **zero JavaScript** (`<meta http-equiv="refresh">` for live updates).
//!
//! Bodies are accepted as JSON, URL-encoded forms, or plain text.
//!
//! ## Dependency rule
//! Depends on `fieldlink-app` (for port traits and services) and
//! `fieldlink-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod body;
pub mod dashboard;
pub mod error;
pub mod harness;
pub mod router;
pub mod state;
