//! User-facing errors of the purchase entry session.
//!
//! There are two kinds, and both end the operation that raised them:
//!
//! - precondition failures (nothing entered, nothing to add, nothing to buy),
//!   which never touch the network
//! - remote failures, where the backend could not complete the request
//!
//! The `Display` text of each variant is the notice shown to the cashier.

use thiserror::Error;

use crate::api::ApiError;

/// Error returned by a purchase entry operation.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// Lookup requested with an empty code field.
    #[error("商品コードを入力してください。")]
    EmptyCode,

    /// Add requested without a found product.
    #[error("有効な商品を検索してから追加してください。")]
    NoValidProduct,

    /// Checkout requested with an empty purchase list.
    #[error("購入リストに商品がありません。")]
    EmptyPurchaseList,

    /// The backend rejected or never received the purchase.
    #[error("購入処理中にエラーが発生しました。")]
    CheckoutFailed(#[source] ApiError),
}

impl RegisterError {
    /// Whether this error is a precondition failure rather than a remote one.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::EmptyCode | Self::NoValidProduct | Self::EmptyPurchaseList
        )
    }
}
