//! Sandbox item linking shared by the product fetchers.
//!
//! Every product except payroll income starts the same way: create a
//! sandbox public token scoped to the product, then exchange it for an
//! access token bound to one simulated item. Both tokens live only for
//! the duration of the fetch call.

use serde_json::{json, Value};

use bankfeed_fetch::{ApiClient, FetchError};

/// Sandbox institution every link request targets.
pub const SANDBOX_INSTITUTION_ID: &str = "ins_109508";

const LINK_PATH: &str = "/sandbox/public_token/create";
const EXCHANGE_PATH: &str = "/item/public_token/exchange";

/// Extracts a required string field from a response body.
pub(crate) fn string_field(
    body: &Value,
    path: &'static str,
    field: &'static str,
) -> Result<String, FetchError> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| FetchError::MissingField {
            path: path.to_string(),
            field,
        })
}

/// Creates a sandbox public token scoped to `products`.
///
/// Some products embed extra options in the link request (statements
/// carry their date range here).
pub async fn create_sandbox_public_token(
    client: &ApiClient,
    products: &[&str],
    options: Option<Value>,
) -> Result<String, FetchError> {
    let mut body = json!({
        "institution_id": SANDBOX_INSTITUTION_ID,
        "initial_products": products,
    });
    if let Some(options) = options {
        body["options"] = options;
    }
    let response = client.post(LINK_PATH, body).await?;
    string_field(&response, LINK_PATH, "public_token")
}

/// Exchanges a public token for an access token bound to one item.
pub async fn exchange_public_token(
    client: &ApiClient,
    public_token: &str,
) -> Result<String, FetchError> {
    let response = client
        .post(EXCHANGE_PATH, json!({ "public_token": public_token }))
        .await?;
    string_field(&response, EXCHANGE_PATH, "access_token")
}

/// Links `products` against the sandbox institution and returns the
/// access token.
pub async fn link_sandbox_item(
    client: &ApiClient,
    products: &[&str],
    options: Option<Value>,
) -> Result<String, FetchError> {
    let public_token = create_sandbox_public_token(client, products, options).await?;
    exchange_public_token(client, &public_token).await
}

// ============================================================================
// Tests
// ============================================================================
