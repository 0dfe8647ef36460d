// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Bankfeed Store
//!
//! SQLite-backed append-only store for raw provider payloads.
//!
//! Every provider response the pipeline archives lands in one table,
//! `raw_events`, keyed by an auto-increment id with a source label, an
//! insert timestamp, and the opaque JSON payload. Rows are never updated
//! or deleted; amendment happens by inserting a new event.
//!
//! ## Usage
//!
//! ```ignore
//! use bankfeed_store::EventStore;
//! use serde_json::json;
//!
//! let store = EventStore::open(&bankfeed_store::default_db_path())?;
//! store.ensure_schema()?;
//! let id = store.insert_event("plaid.auth", &json!({ "accounts": [] }))?;
//! ```

pub mod error;
pub mod event_store;

pub use error::StoreError;
pub use event_store::{default_db_path, EventStore};
