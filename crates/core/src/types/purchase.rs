//! Purchase list and its line items.

use serde::Serialize;

use super::price::{Price, tax_included};
use super::product::Product;

/// One product entry in the purchase list.
///
/// Serializes to the purchase API's `{NAME, QUANTITY, PRICE, TOTAL}` shape.
/// Line items cannot be edited once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    #[serde(rename = "NAME")]
    name: String,
    #[serde(rename = "QUANTITY")]
    quantity: u32,
    #[serde(rename = "PRICE")]
    unit_price: Price,
    #[serde(rename = "TOTAL")]
    line_total: Price,
}

impl LineItem {
    /// Quantity of every line item. The register sells one unit per scan.
    pub const QUANTITY: u32 = 1;

    /// Build a line item for one unit of `product`.
    ///
    /// A product without a price is rung up at zero.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        let unit_price = product.price.unwrap_or(Price::ZERO);
        Self {
            name: product.name.clone(),
            quantity: Self::QUANTITY,
            unit_price,
            line_total: unit_price.times(Self::QUANTITY),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.unit_price
    }

    #[must_use]
    pub const fn line_total(&self) -> Price {
        self.line_total
    }
}

/// Totals computed over a purchase list at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseTotals {
    /// Number of line items.
    pub item_count: usize,
    /// Sum of unit prices, before tax.
    pub total_amount: Price,
    /// `total_amount` with consumption tax, rounded to whole yen.
    pub tax_included_amount: Price,
}

/// Ordered, append-only list of line items.
///
/// Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseList {
    items: Vec<LineItem>,
}

impl PurchaseList {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a line item to the end of the list.
    pub fn push(&mut self, item: LineItem) {
        self.items.push(item);
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every line item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of unit prices over all items.
    #[must_use]
    pub fn total_amount(&self) -> Price {
        self.items.iter().map(LineItem::unit_price).sum()
    }

    /// Total with consumption tax applied.
    #[must_use]
    pub fn tax_included_amount(&self) -> Price {
        tax_included(self.total_amount())
    }

    #[must_use]
    pub fn summary(&self) -> PurchaseTotals {
        let total_amount = self.total_amount();
        PurchaseTotals {
            item_count: self.items.len(),
            total_amount,
            tax_included_amount: tax_included(total_amount),
        }
    }
}

impl<'a> IntoIterator for &'a PurchaseList {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
