//! Product fetcher trait.

use async_trait::async_trait;
use bankfeed_core::{ProductKind, RawRecord};

use crate::client::ApiClient;
use crate::error::FetchError;

/// One product's multi-step pull protocol.
///
/// Implementations own their public and access tokens for the duration of
/// a single `fetch` call; tokens are never reused across invocations or
/// persisted. The returned records are archived by the pipeline runner in
/// the order they appear.
#[async_trait]
pub trait ProductFetcher: Send + Sync {
    /// The product this fetcher pulls.
    fn kind(&self) -> ProductKind;

    /// CLI selector name, derived from the product kind.
    fn name(&self) -> &'static str {
        self.kind().cli_name()
    }

    /// Runs the full pull protocol and returns the records to archive.
    async fn fetch(&self, client: &ApiClient) -> Result<Vec<RawRecord>, FetchError>;
}
