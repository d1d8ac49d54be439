//! Product/purchase API.
//!
//! The register consumes two endpoints of an external backend:
//!
//! - `GET {base}/api/product?code=<digits>` answers a single product
//! - `POST {base}/api/purchase` accepts `{"items": [...]}`
//!
//! [`PosBackend`] is the seam between the purchase entry session and the
//! transport; [`PosApiClient`] is the HTTP implementation.

pub mod client;

pub use client::PosApiClient;

use std::future::Future;

use pos_register_core::{LineItem, Product, ProductCode};
use thiserror::Error;

/// Errors that can occur when calling the product/purchase API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the connection failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Unexpected status {status} from {endpoint}")]
    Status {
        /// Endpoint path that was called.
        endpoint: &'static str,
        /// HTTP status code returned.
        status: u16,
    },

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Backend consumed by the purchase entry session.
pub trait PosBackend {
    /// Look a product up by its code.
    fn fetch_product(
        &self,
        code: &ProductCode,
    ) -> impl Future<Output = Result<Product, ApiError>> + Send;

    /// Submit a completed purchase.
    fn submit_purchase(
        &self,
        items: &[LineItem],
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}
