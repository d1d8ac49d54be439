//! Text rendering of the register view.
//!
//! Mirrors the register screen: the code field, the product name and unit
//! price panels (with placeholders while empty) and the purchase table.

use core::fmt;

use pos_register_core::{LineItem, ProductLookup, PurchaseList};

use crate::session::{PurchaseEntry, Receipt};

/// Placeholder for the product name panel.
pub const NAME_PLACEHOLDER: &str = "商品名称";
/// Placeholder for the unit price panel.
pub const PRICE_PLACEHOLDER: &str = "単価";
/// Unit price panel text when there is no price to show.
pub const UNPRICED: &str = "-円";
/// Placeholder for the code field.
pub const CODE_PLACEHOLDER: &str = "商品コード13桁を入力";
/// Shown instead of the table when nothing has been added.
pub const EMPTY_LIST: &str = "リストが空です";

const RECEIPT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

const TABLE_HEADERS: [&str; 4] = ["商品名", "個数", "単価", "合計額"];

/// Name panel text.
#[must_use]
pub fn product_name(lookup: Option<&ProductLookup>) -> &str {
    match lookup {
        Some(lookup) if !lookup.display_name().is_empty() => lookup.display_name(),
        _ => NAME_PLACEHOLDER,
    }
}

/// Unit price panel text.
///
/// A product without a price, or a failed lookup, shows `-円`.
#[must_use]
pub fn unit_price(lookup: Option<&ProductLookup>) -> String {
    match lookup {
        None => PRICE_PLACEHOLDER.to_string(),
        Some(lookup) => lookup
            .product()
            .and_then(|p| p.price)
            .map_or_else(|| UNPRICED.to_string(), |price| price.to_string()),
    }
}

/// Notice shown after a line item is added.
#[must_use]
pub fn added_message(item: &LineItem) -> String {
    format!("「{}」を購入リストに追加しました。", item.name())
}

/// Notice shown after a successful checkout, stamped with the completion time.
#[must_use]
pub fn completion_message(receipt: &Receipt) -> String {
    format!(
        "購入完了！合計金額(税込): {} ({})",
        receipt.totals.tax_included_amount,
        receipt.completed_at.format(RECEIPT_TIME_FORMAT)
    )
}

/// Purchase table, one line per item in insertion order.
#[must_use]
pub fn purchase_table(list: &PurchaseList) -> String {
    if list.is_empty() {
        return EMPTY_LIST.to_string();
    }

    let rows: Vec<[String; 4]> = list
        .items()
        .iter()
        .map(|item| {
            [
                item.name().to_string(),
                item.quantity().to_string(),
                item.unit_price().to_string(),
                item.line_total().to_string(),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(display_width);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(display_width(cell));
        }
    }

    let mut out = String::new();
    push_row(&mut out, &TABLE_HEADERS, &widths);
    let rule_len = widths.iter().sum::<usize>() + 3 * 3;
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    // drop the trailing newline
    out.pop();
    out
}

/// Terminal column width, counting non-ASCII characters as double width.
fn display_width(s: &str) -> usize {
    s.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum()
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S; 4], widths: &[usize; 4]) {
    let mut first = true;
    for (cell, width) in cells.iter().zip(widths) {
        if !first {
            out.push_str(" | ");
        }
        first = false;
        let cell = cell.as_ref();
        out.push_str(cell);
        out.push_str(&" ".repeat(width.saturating_sub(display_width(cell))));
    }
    // no padding after the last column
    let trimmed = out.trim_end_matches(' ').len();
    out.truncate(trimmed);
    out.push('\n');
}

/// Borrowed snapshot of a session, rendered with `Display`.
#[derive(Debug, Clone, Copy)]
pub struct RegisterView<'a> {
    code: &'a str,
    product: Option<&'a ProductLookup>,
    purchases: &'a PurchaseList,
}

impl<B> PurchaseEntry<B> {
    /// Snapshot the session for rendering.
    #[must_use]
    pub fn view(&self) -> RegisterView<'_> {
        RegisterView {
            code: self.code().as_str(),
            product: self.product(),
            purchases: self.purchases(),
        }
    }
}

impl fmt::Display for RegisterView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = if self.code.is_empty() {
            CODE_PLACEHOLDER
        } else {
            self.code
        };
        writeln!(f, "[コード] {code}")?;
        writeln!(f, "[{NAME_PLACEHOLDER}] {}", product_name(self.product))?;
        writeln!(f, "[{PRICE_PLACEHOLDER}] {}", unit_price(self.product))?;
        writeln!(f)?;
        writeln!(f, "購入リスト")?;
        write!(f, "{}", purchase_table(self.purchases))
    }
}
