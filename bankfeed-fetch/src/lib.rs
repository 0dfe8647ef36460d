// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Bankfeed Fetch
//!
//! Upstream HTTP dispatch and readiness polling for the bankfeed pipeline.
//!
//! This crate provides the infrastructure every product fetcher builds on:
//!
//! - [`ApiClient`] - POST-only JSON client with credential injection and two
//!   calling conventions: strict ([`ApiClient::post`]) and lenient
//!   ([`ApiClient::post_allow_error`])
//! - [`ApiConfig`] - explicit configuration constructed once at process start
//! - [`PollPolicy`] / [`poll_until_ready`] - fixed-count, fixed-sleep polling
//!   of asynchronous report endpoints
//! - [`ProductFetcher`] - the trait each product's pull protocol implements
//!
//! Retry policy is deliberately absent from the client: which error codes
//! are retryable, how many attempts to make, and what payload to resend are
//! all product-specific, so they live with the fetchers.

pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod readiness;

pub use client::ApiClient;
pub use config::{ApiConfig, DEFAULT_BASE_URL};
pub use error::FetchError;
pub use fetcher::ProductFetcher;
pub use readiness::{
    classify, poll_until_ready, PollPolicy, PollStep, INCOME_VERIFICATION_NOT_FOUND,
    PRODUCT_NOT_READY,
};
