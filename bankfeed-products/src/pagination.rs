//! Offset pagination for transaction-style endpoints.
//!
//! Once a product has signaled readiness, the remaining pages are fetched
//! with strict calls: any error past that point is permanent, never a
//! "not ready" condition.

use serde_json::Value;
use tracing::debug;

use bankfeed_fetch::{ApiClient, FetchError};

/// Page size every paginated endpoint requests.
pub(crate) const PAGE_SIZE: u64 = 100;

/// Field names that drive pagination for one endpoint.
pub(crate) struct PageSpec {
    /// Array field holding the paged records.
    pub records: &'static str,
    /// Field declaring the total record count.
    pub total: &'static str,
    /// Fields overwritten by each later page (e.g. `item`, `securities`).
    pub carry: &'static [&'static str],
}

/// Fetches the pages after `first` and merges everything into one payload.
///
/// Records are concatenated in page-retrieval order; carried fields take
/// the last page's value; the rest of the first page is kept as-is. The
/// call count is capped at `total / PAGE_SIZE + 1` so an inconsistent
/// upstream total fails loudly instead of looping forever.
pub(crate) async fn collect_pages(
    client: &ApiClient,
    path: &str,
    base_payload: &Value,
    first: Value,
    spec: &PageSpec,
) -> Result<Value, FetchError> {
    let mut merged = first;
    if !merged.is_object() {
        return Ok(merged);
    }

    let mut records = match merged.get_mut(spec.records).map(Value::take) {
        Some(Value::Array(records)) => records,
        _ => Vec::new(),
    };
    let total = merged
        .get(spec.total)
        .and_then(Value::as_u64)
        .unwrap_or(records.len() as u64);

    let max_calls = total / PAGE_SIZE + 1;
    let mut calls = 0u64;
    let mut offset = 0u64;

    while (records.len() as u64) < total {
        if calls == max_calls {
            return Err(FetchError::Pagination {
                path: path.to_string(),
                expected: total,
                got: records.len() as u64,
            });
        }
        calls += 1;

        let mut payload = base_payload.clone();
        payload["options"]["count"] = PAGE_SIZE.into();
        payload["options"]["offset"] = (offset + PAGE_SIZE).into();
        let page = client.post(path, payload).await?;
        debug!(path, offset = offset + PAGE_SIZE, "fetched page");

        if let Some(Value::Array(next)) = page.get(spec.records) {
            records.extend(next.iter().cloned());
        }
        for field in spec.carry {
            if let Some(value) = page.get(*field) {
                merged[*field] = value.clone();
            }
        }
        offset += PAGE_SIZE;
    }

    merged[spec.records] = Value::Array(records);
    Ok(merged)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_client;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SPEC: PageSpec = PageSpec {
        records: "transactions",
        total: "total_transactions",
        carry: &["item"],
    };

    fn page(from: u64, count: u64, total: u64) -> Value {
        let transactions: Vec<Value> = (from..from + count)
            .map(|i| json!({ "transaction_id": format!("t{i}") }))
            .collect();
        json!({
            "transactions": transactions,
            "total_transactions": total,
            "item": { "item_id": "item-1", "cursor": from },
        })
    }

    #[tokio::test]
    async fn test_single_page_needs_no_calls() {
        let server = MockServer::start().await;
        // No mocks mounted: any request would fail the test.
        let client = test_client(&server);
        let merged = collect_pages(&client, "/transactions/get", &json!({}), page(0, 40, 40), &SPEC)
            .await
            .unwrap();
        assert_eq!(merged["transactions"].as_array().unwrap().len(), 40);
    }

    #[tokio::test]
    async fn test_collects_pages_until_declared_total() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transactions/get"))
            .and(body_partial_json(json!({ "options": { "offset": 100 } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(100, 100, 250)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/transactions/get"))
            .and(body_partial_json(json!({ "options": { "offset": 200 } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(200, 50, 250)))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let base = json!({ "access_token": "access-sandbox-test", "options": { "count": 100, "offset": 0 } });
        let merged = collect_pages(&client, "/transactions/get", &base, page(0, 100, 250), &SPEC)
            .await
            .unwrap();

        let records = merged["transactions"].as_array().unwrap();
        assert_eq!(records.len(), 250);
        assert_eq!(records[0]["transaction_id"], "t0");
        assert_eq!(records[149]["transaction_id"], "t149");
        assert_eq!(records[249]["transaction_id"], "t249");
        // Carried fields take the last page's value.
        assert_eq!(merged["item"]["cursor"], 200);
        assert_eq!(merged["total_transactions"], 250);
    }

    #[tokio::test]
    async fn test_inconsistent_total_hits_the_cap() {
        let server = MockServer::start().await;
        // Every follow-up page is empty, so the declared total is never met.
        Mock::given(method("POST"))
            .and(path("/transactions/get"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "transactions": [],
                "total_transactions": 250,
                "item": {},
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let base = json!({ "options": { "count": 100, "offset": 0 } });
        let err = collect_pages(&client, "/transactions/get", &base, page(0, 100, 250), &SPEC)
            .await
            .unwrap_err();
        match err {
            FetchError::Pagination { expected, got, .. } => {
                assert_eq!(expected, 250);
                assert_eq!(got, 100);
            }
            other => panic!("expected Pagination error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_pagination_error_is_not_retried_as_transient() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transactions/get"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error_code": "PRODUCT_NOT_READY",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let base = json!({ "options": { "count": 100, "offset": 0 } });
        // Readiness was already signaled; a transient code here is permanent.
        let err = collect_pages(&client, "/transactions/get", &base, page(0, 100, 250), &SPEC)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Api { .. }));
    }
}
