//! One-shot product lookup.
//!
//! # Usage
//!
//! ```bash
//! pos lookup 4901234567894
//! ```
//!
//! Prints the code, name and unit price panels. A code the backend does not
//! know is shown with the not-found marker, like in the register.

use std::io::{self, Write};

use pos_register::{PosApiClient, PurchaseEntry, RegisterConfig, display};

use super::CommandError;

/// Look `code` up and print the product panels.
///
/// # Errors
///
/// Returns an error if the code is empty or longer than 13 digits, or the
/// HTTP client cannot be created.
pub async fn run(config: &RegisterConfig, code: &str) -> Result<(), CommandError> {
    let client = PosApiClient::new(config)?;
    tracing::debug!(url = %client.product_url(), "Looking product up");

    let mut entry = PurchaseEntry::new(client);
    if !entry.update_code(code) {
        return Err(CommandError::CodeTooLong);
    }

    let lookup = entry.lookup_product().await?;

    let mut out = io::stdout().lock();
    writeln!(out, "[コード] {}", lookup.code())?;
    writeln!(
        out,
        "[{}] {}",
        display::NAME_PLACEHOLDER,
        display::product_name(Some(lookup))
    )?;
    writeln!(
        out,
        "[{}] {}",
        display::PRICE_PLACEHOLDER,
        display::unit_price(Some(lookup))
    )?;

    Ok(())
}
