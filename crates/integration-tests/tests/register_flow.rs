//! Integration tests for the purchase entry session over real HTTP.
//!
//! Each test starts its own mock backend, so they can run in parallel.

use axum::http::StatusCode;
use serde_json::json;

use pos_register::{PosApiClient, PosBackend, PurchaseEntry, RegisterConfig, RegisterError};
use pos_register_core::{NOT_FOUND_MESSAGE, Price, Product, ProductCode, ProductLookup};
use pos_register_integration_tests::{MockBackend, PurchaseMode, unreachable_base_url};

async fn shop() -> MockBackend {
    MockBackend::start([
        (
            "4901234567894",
            json!({"NAME": "おにぎり", "PRICE": 100, "CODE": "4901234567894"}),
        ),
        (
            "4909876543210",
            json!({"NAME": "お弁当", "PRICE": "250", "CODE": "4909876543210"}),
        ),
        (
            "4900000000001",
            json!({"NAME": "試供品", "PRICE": "-", "CODE": "4900000000001"}),
        ),
    ])
    .await
}

async fn scan(entry: &mut PurchaseEntry<PosApiClient>, code: &str) {
    assert!(entry.update_code(code));
    let lookup = entry.lookup_product().await.expect("lookup failed");
    assert!(lookup.is_addable(), "{code} should be found");
    entry.add_to_list().expect("add failed");
}

// =============================================================================
// Lookup Tests
// =============================================================================

#[tokio::test]
async fn test_lookup_sends_code_as_query() {
    let mock = shop().await;
    let mut entry = PurchaseEntry::new(mock.client());

    entry.update_code("4901234567894");
    let lookup = entry.lookup_product().await.expect("lookup failed").clone();

    assert_eq!(
        lookup,
        ProductLookup::Found(Product::new("4901234567894", "おにぎり", Price::new(100)))
    );
    assert_eq!(mock.product_queries(), ["4901234567894"]);
}

#[tokio::test]
async fn test_lookup_empty_code_never_hits_network() {
    let mock = shop().await;
    let mut entry = PurchaseEntry::new(mock.client());

    let result = entry.lookup_product().await;

    assert!(matches!(result, Err(RegisterError::EmptyCode)));
    assert!(mock.product_queries().is_empty());
}

#[tokio::test]
async fn test_lookup_404_is_not_found() {
    let mock = shop().await;
    let mut entry = PurchaseEntry::new(mock.client());

    entry.update_code("1234567890123");
    let lookup = entry.lookup_product().await.expect("lookup failed");

    assert_eq!(lookup.code(), "1234567890123");
    assert_eq!(lookup.display_name(), NOT_FOUND_MESSAGE);
    assert!(!lookup.is_addable());
}

#[tokio::test]
async fn test_lookup_network_error_is_not_found() {
    let base_url = unreachable_base_url().await;
    let config = RegisterConfig::from_vars(|key| (key == "POS_API_URL").then(|| base_url.clone()))
        .expect("config");
    let client = PosApiClient::new(&config).expect("client");
    let mut entry = PurchaseEntry::new(client);

    entry.update_code("4901234567894");
    let lookup = entry.lookup_product().await.expect("lookup failed");

    assert_eq!(
        lookup,
        &ProductLookup::NotFound {
            code: ProductCode::parse("4901234567894").expect("valid code"),
        }
    );
}

#[tokio::test]
async fn test_lookup_malformed_body_is_not_found() {
    let mock = MockBackend::start([("42", json!({"NAME": {"nested": true}, "PRICE": 1}))]).await;
    let mut entry = PurchaseEntry::new(mock.client());

    entry.update_code("42");
    let lookup = entry.lookup_product().await.expect("lookup failed");

    assert_eq!(lookup.display_name(), NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn test_client_fetch_product_reports_status() {
    let mock = shop().await;
    let client = mock.client();

    let err = client
        .fetch_product(&ProductCode::parse("999").expect("valid code"))
        .await
        .expect_err("unknown code should fail");

    assert_eq!(err.to_string(), "Unexpected status 404 from api/product");
}

// =============================================================================
// Checkout Tests
// =============================================================================

#[tokio::test]
async fn test_checkout_posts_items_and_clears() {
    let mock = shop().await;
    let mut entry = PurchaseEntry::new(mock.client());

    scan(&mut entry, "4901234567894").await;
    scan(&mut entry, "4909876543210").await;
    scan(&mut entry, "4900000000001").await;

    let receipt = entry.checkout().await.expect("checkout failed");

    assert_eq!(receipt.totals.total_amount, Price::new(350));
    assert_eq!(receipt.totals.tax_included_amount, Price::new(385));
    assert!(entry.purchases().is_empty());
    assert!(entry.code().is_empty());
    assert!(entry.product().is_none());

    assert_eq!(
        mock.purchases(),
        [json!({
            "items": [
                {"NAME": "おにぎり", "QUANTITY": 1, "PRICE": 100, "TOTAL": 100},
                {"NAME": "お弁当", "QUANTITY": 1, "PRICE": 250, "TOTAL": 250},
                {"NAME": "試供品", "QUANTITY": 1, "PRICE": 0, "TOTAL": 0},
            ]
        })]
    );
}

#[tokio::test]
async fn test_checkout_empty_list_never_hits_network() {
    let mock = shop().await;
    let mut entry = PurchaseEntry::new(mock.client());

    let result = entry.checkout().await;

    assert!(matches!(result, Err(RegisterError::EmptyPurchaseList)));
    assert!(mock.purchases().is_empty());
}

#[tokio::test]
async fn test_checkout_rejected_keeps_state() {
    let mock = shop().await;
    mock.set_purchase_mode(PurchaseMode::Reject(StatusCode::INTERNAL_SERVER_ERROR));
    let mut entry = PurchaseEntry::new(mock.client());

    scan(&mut entry, "4901234567894").await;
    entry.update_code("4909876543210");
    entry.lookup_product().await.expect("lookup failed");

    let list_before = entry.purchases().clone();
    let product_before = entry.product().cloned();

    let result = entry.checkout().await;

    assert!(matches!(result, Err(RegisterError::CheckoutFailed(_))));
    assert_eq!(entry.purchases(), &list_before);
    assert_eq!(entry.product().cloned(), product_before);
    assert_eq!(entry.code().as_str(), "4909876543210");
    assert_eq!(mock.purchases().len(), 1);
}

#[tokio::test]
async fn test_checkout_retry_after_failure() {
    let mock = shop().await;
    mock.set_purchase_mode(PurchaseMode::Reject(StatusCode::SERVICE_UNAVAILABLE));
    let mut entry = PurchaseEntry::new(mock.client());

    scan(&mut entry, "4901234567894").await;
    assert!(entry.checkout().await.is_err());

    mock.set_purchase_mode(PurchaseMode::Accept);
    let receipt = entry.checkout().await.expect("retry failed");

    assert_eq!(receipt.totals.tax_included_amount, Price::new(110));
    assert_eq!(mock.purchases().len(), 2);
    assert!(entry.purchases().is_empty());
}
