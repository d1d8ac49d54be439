//! Purchase entry session.
//!
//! [`PurchaseEntry`] owns all register state for one cashier session: the
//! code field, the product currently on display and the purchase list.
//! Every operation runs to completion before the next one can start, since
//! each takes `&mut self`.
//!
//! # State
//!
//! | operation        | code field | product      | purchase list |
//! |------------------|------------|--------------|---------------|
//! | `update_code`    | replaced   | -            | -             |
//! | `lookup_product` | -          | replaced     | -             |
//! | `add_to_list`    | cleared    | cleared      | one appended  |
//! | `checkout` (ok)  | cleared    | cleared      | cleared       |
//!
//! A failed operation changes nothing.

use chrono::{DateTime, Utc};
use pos_register_core::{CodeInput, LineItem, ProductLookup, PurchaseList, PurchaseTotals};
use tracing::{debug, error, info, warn};

use crate::api::PosBackend;
use crate::error::RegisterError;

/// Result of a successful checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    pub totals: PurchaseTotals,
    pub completed_at: DateTime<Utc>,
}

/// State container for one register session.
#[derive(Debug)]
pub struct PurchaseEntry<B> {
    backend: B,
    code: CodeInput,
    product: Option<ProductLookup>,
    purchases: PurchaseList,
}

impl<B: PosBackend> PurchaseEntry<B> {
    /// Start an empty session against `backend`.
    pub const fn new(backend: B) -> Self {
        Self {
            backend,
            code: CodeInput::new(),
            product: None,
            purchases: PurchaseList::new(),
        }
    }

    /// Replace the code field with the digits of `raw`.
    ///
    /// Input longer than 13 digits is ignored and the field keeps its
    /// previous value. Returns `true` if the field was replaced.
    pub fn update_code(&mut self, raw: &str) -> bool {
        let accepted = self.code.update(raw);
        if !accepted {
            debug!(len = raw.len(), "Code input rejected");
        }
        accepted
    }

    /// Reset the code field without touching anything else.
    pub fn clear_code(&mut self) {
        self.code.clear();
    }

    /// Look up the product for the current code.
    ///
    /// Any backend failure is reported as [`ProductLookup::NotFound`] for
    /// the entered code rather than as an error.
    ///
    /// # Errors
    ///
    /// Returns [`RegisterError::EmptyCode`] without calling the backend if
    /// the code field is empty.
    pub async fn lookup_product(&mut self) -> Result<&ProductLookup, RegisterError> {
        let code = self.code.to_code().ok_or(RegisterError::EmptyCode)?;

        let lookup = match self.backend.fetch_product(&code).await {
            Ok(product) => ProductLookup::Found(product),
            Err(e) => {
                warn!(code = %code, error = %e, "Product lookup failed");
                ProductLookup::NotFound { code }
            }
        };

        Ok(&*self.product.insert(lookup))
    }

    /// Append one unit of the displayed product to the purchase list.
    ///
    /// On success the code field and the product display are cleared and
    /// the new line item is returned.
    ///
    /// # Errors
    ///
    /// Returns [`RegisterError::NoValidProduct`] if no product is displayed,
    /// the lookup found nothing, or the product has no name.
    pub fn add_to_list(&mut self) -> Result<LineItem, RegisterError> {
        let product = self
            .product
            .as_ref()
            .filter(|lookup| lookup.is_addable())
            .and_then(ProductLookup::product)
            .ok_or(RegisterError::NoValidProduct)?;

        let item = LineItem::from_product(product);
        self.purchases.push(item.clone());
        self.code.clear();
        self.product = None;

        info!(
            name = %item.name(),
            total = item.line_total().yen(),
            items = self.purchases.len(),
            "Added to purchase list"
        );

        Ok(item)
    }

    /// Submit the purchase list and start over.
    ///
    /// On success the code field, product display and purchase list are all
    /// cleared. On failure nothing changes, so the cashier can try again.
    ///
    /// # Errors
    ///
    /// Returns [`RegisterError::EmptyPurchaseList`] without calling the
    /// backend if nothing has been added, or
    /// [`RegisterError::CheckoutFailed`] if the backend call fails.
    pub async fn checkout(&mut self) -> Result<Receipt, RegisterError> {
        if self.purchases.is_empty() {
            return Err(RegisterError::EmptyPurchaseList);
        }

        let totals = self.purchases.summary();

        self.backend
            .submit_purchase(self.purchases.items())
            .await
            .map_err(|e| {
                error!(error = %e, items = totals.item_count, "Checkout failed");
                RegisterError::CheckoutFailed(e)
            })?;

        self.code.clear();
        self.product = None;
        self.purchases.clear();

        let receipt = Receipt {
            totals,
            completed_at: Utc::now(),
        };

        info!(
            items = totals.item_count,
            total = totals.total_amount.yen(),
            tax_included = totals.tax_included_amount.yen(),
            completed_at = %receipt.completed_at,
            "Checkout complete"
        );

        Ok(receipt)
    }
}

impl<B> PurchaseEntry<B> {
    /// Current contents of the code field.
    #[must_use]
    pub const fn code(&self) -> &CodeInput {
        &self.code
    }

    /// Product currently on display, if any.
    #[must_use]
    pub const fn product(&self) -> Option<&ProductLookup> {
        self.product.as_ref()
    }

    /// Purchase list so far.
    #[must_use]
    pub const fn purchases(&self) -> &PurchaseList {
        &self.purchases
    }

    /// The backend this session talks to.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }
}
