// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Bankfeed Core
//!
//! Core types and models for the bankfeed pipeline.
//!
//! This crate provides the foundational types used across all other
//! bankfeed crates:
//!
//! - [`ProductKind`] - Enum of the financial data products the pipeline pulls
//! - [`RawRecord`] - One `(source, payload)` pair emitted by a product fetcher
//! - [`ArchivedEvent`] - One persisted raw provider response
//!
//! Source labels (`plaid.assets`, `plaid.auth`, ...) are declared next to
//! the fetchers that emit them; this crate only carries the shapes they
//! travel in.

pub mod models;

pub use models::{ArchivedEvent, ProductKind, RawRecord, UnknownProductError};
