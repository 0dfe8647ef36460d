//! The pull command: run the selected fetchers and archive their output.

use std::path::Path;

use anyhow::{Context, Result};

use bankfeed_fetch::{ApiClient, ApiConfig};
use bankfeed_products::{PipelineRunner, ProductSelector};
use bankfeed_store::{default_db_path, EventStore};

/// Runs the selected products end to end and prints one confirmation line
/// per archived event.
pub async fn run(selector: ProductSelector, db: Option<&Path>) -> Result<()> {
    let config = ApiConfig::from_env().context("reading provider credentials")?;
    let client = ApiClient::new(config)?;

    let db_path = db.map_or_else(default_db_path, Path::to_path_buf);
    let store = EventStore::open(&db_path)
        .with_context(|| format!("opening event store at {}", db_path.display()))?;
    store.ensure_schema()?;

    let runner = PipelineRunner::new(&client, &store);
    let stored = runner.run(selector).await?;

    for event in &stored {
        println!("[{}] saved raw event id={}", event.source, event.id);
    }

    Ok(())
}
