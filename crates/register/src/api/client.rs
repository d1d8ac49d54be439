//! HTTP client for the product/purchase API.

use pos_register_core::{LineItem, Product, ProductCode};
use serde::Serialize;
use tracing::{debug, instrument};

use super::{ApiError, PosBackend};
use crate::config::RegisterConfig;

const PRODUCT_ENDPOINT: &str = "api/product";
const PURCHASE_ENDPOINT: &str = "api/purchase";

/// Body of `POST /api/purchase`.
#[derive(Debug, Serialize)]
struct PurchaseRequest<'a> {
    items: &'a [LineItem],
}

/// Product/purchase API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct PosApiClient {
    client: reqwest::Client,
    product_url: String,
    purchase_url: String,
}

impl PosApiClient {
    /// Create a new client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (e.g. the TLS
    /// backend fails to initialize).
    pub fn new(config: &RegisterConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            client,
            product_url: config.endpoint(PRODUCT_ENDPOINT),
            purchase_url: config.endpoint(PURCHASE_ENDPOINT),
        })
    }

    /// Full URL of the product lookup endpoint.
    #[must_use]
    pub fn product_url(&self) -> &str {
        &self.product_url
    }

    /// Full URL of the purchase endpoint.
    #[must_use]
    pub fn purchase_url(&self) -> &str {
        &self.purchase_url
    }
}

impl PosBackend for PosApiClient {
    #[instrument(skip(self, code), fields(code = %code))]
    async fn fetch_product(&self, code: &ProductCode) -> Result<Product, ApiError> {
        let response = self
            .client
            .get(&self.product_url)
            .query(&[("code", code.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: PRODUCT_ENDPOINT,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let product: Product = serde_json::from_slice(&body)?;

        debug!(name = %product.name, "Product found");

        Ok(product)
    }

    #[instrument(skip(self, items), fields(items = items.len()))]
    async fn submit_purchase(&self, items: &[LineItem]) -> Result<(), ApiError> {
        let response = self
            .client
            .post(&self.purchase_url)
            .json(&PurchaseRequest { items })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: PURCHASE_ENDPOINT,
                status: status.as_u16(),
            });
        }

        debug!(status = status.as_u16(), "Purchase accepted");

        Ok(())
    }
}
