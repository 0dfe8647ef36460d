//! End-to-end pipeline tests against a fully stubbed provider.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bankfeed_fetch::{
    ApiClient, ApiConfig, PollPolicy, ProductFetcher, INCOME_VERIFICATION_NOT_FOUND,
};
use bankfeed_products::{PayrollIncomeFetcher, PipelineRunner, ProductSelector};
use bankfeed_store::EventStore;

fn test_client(server: &MockServer) -> ApiClient {
    let config = ApiConfig::new("test-client-id", "test-secret").with_base_url(server.uri());
    ApiClient::new(config).unwrap()
}

fn test_store() -> EventStore {
    let store = EventStore::open_in_memory().unwrap();
    store.ensure_schema().unwrap();
    store
}

async fn mount(server: &MockServer, endpoint: &str, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Stubs every endpoint the nine products touch, all ready on the first poll.
async fn mount_happy_provider(server: &MockServer) {
    mount(server, "/sandbox/public_token/create", json!({ "public_token": "public-sandbox-test" })).await;
    mount(server, "/item/public_token/exchange", json!({ "access_token": "access-sandbox-test" })).await;

    // Assets
    mount(server, "/asset_report/create", json!({ "asset_report_token": "assets-token" })).await;
    mount(server, "/asset_report/get", json!({ "report": { "items": [] } })).await;

    // Auth + recurring's account discovery
    mount(server, "/accounts/get", json!({ "accounts": [{ "account_id": "a1" }] })).await;
    mount(server, "/auth/get", json!({ "numbers": { "ach": [] } })).await;

    // Transactions: a single page, no pagination needed
    mount(
        server,
        "/transactions/get",
        json!({
            "transactions": [{ "transaction_id": "t0" }],
            "total_transactions": 1,
            "item": {},
        }),
    )
    .await;
    mount(server, "/transactions/recurring/get", json!({ "inflow_streams": [], "outflow_streams": [] })).await;

    mount(server, "/statements/list", json!({ "accounts": [] })).await;
    mount(server, "/identity/get", json!({ "accounts": [] })).await;
    mount(server, "/liabilities/get", json!({ "liabilities": {} })).await;

    // Investments: a single page plus holdings
    mount(
        server,
        "/investments/transactions/get",
        json!({
            "investment_transactions": [{ "investment_transaction_id": "it0" }],
            "total_investment_transactions": 1,
            "securities": [],
            "item": {},
        }),
    )
    .await;
    mount(server, "/investments/holdings/get", json!({ "holdings": [] })).await;

    // Payroll income
    mount(server, "/user/create", json!({ "user_token": "user-token-test" })).await;
    mount(server, "/credit/payroll_income/get", json!({ "items": [] })).await;
    mount(server, "/credit/employment/get", json!({ "items": [] })).await;
}

#[tokio::test]
async fn test_run_all_archives_one_event_per_source() {
    let server = MockServer::start().await;
    mount_happy_provider(&server).await;

    let client = test_client(&server);
    let store = test_store();
    let runner = PipelineRunner::new(&client, &store);

    let stored = runner.run(ProductSelector::All).await.unwrap();

    let sources: Vec<&str> = stored.iter().map(|event| event.source.as_str()).collect();
    assert_eq!(
        sources,
        vec![
            "plaid.assets",
            "plaid.accounts",
            "plaid.auth",
            "plaid.transactions",
            "plaid.recurring",
            "plaid.statements",
            "plaid.identity",
            "plaid.liabilities",
            "plaid.investments.holdings",
            "plaid.investments.transactions",
            "plaid.income.payroll",
            "plaid.income.employment",
        ]
    );

    // Ids are distinct and strictly increasing.
    let ids: Vec<i64> = stored.iter().map(|event| event.id).collect();
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(store.event_count().unwrap(), 12);
}

#[tokio::test]
async fn test_run_single_product() {
    let server = MockServer::start().await;
    mount_happy_provider(&server).await;

    let client = test_client(&server);
    let store = test_store();
    let runner = PipelineRunner::new(&client, &store);

    let selector: ProductSelector = "identity".parse().unwrap();
    let stored = runner.run(selector).await.unwrap();

    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].source, "plaid.identity");
    assert_eq!(store.event_count().unwrap(), 1);

    let event = store.event(stored[0].id).unwrap();
    assert_eq!(event.payload, json!({ "accounts": [] }));
}

#[tokio::test]
async fn test_payroll_never_ready_skips_without_failing() {
    let server = MockServer::start().await;
    mount(&server, "/user/create", json!({ "user_token": "user-token-test" })).await;
    Mock::given(method("POST"))
        .and(path("/credit/payroll_income/get"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error_code": INCOME_VERIFICATION_NOT_FOUND,
        })))
        .expect(15)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let store = test_store();
    let runner = PipelineRunner::new(&client, &store);

    let fetcher = PayrollIncomeFetcher::new().with_policy(
        PollPolicy::new(15)
            .with_delay(Duration::ZERO)
            .with_transient_code(INCOME_VERIFICATION_NOT_FOUND),
    );
    let fetchers: Vec<&dyn ProductFetcher> = vec![&fetcher];
    let stored = runner.run_fetchers(&fetchers).await.unwrap();

    assert!(stored.is_empty());
    assert_eq!(store.event_count().unwrap(), 0);
}

#[tokio::test]
async fn test_batch_halts_on_unrecovered_failure() {
    let server = MockServer::start().await;
    // Only the link endpoint exists; the exchange endpoint 404s with an
    // error body, so the very first product aborts the batch.
    mount(&server, "/sandbox/public_token/create", json!({ "public_token": "public-sandbox-test" })).await;
    Mock::given(method("POST"))
        .and(path("/item/public_token/exchange"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error_code": "INVALID_PUBLIC_TOKEN",
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let store = test_store();
    let runner = PipelineRunner::new(&client, &store);

    let err = runner.run(ProductSelector::All).await.unwrap_err();
    assert!(matches!(
        err,
        bankfeed_products::RunnerError::Fetch(bankfeed_fetch::FetchError::Api { .. })
    ));
    assert_eq!(store.event_count().unwrap(), 0);
}
