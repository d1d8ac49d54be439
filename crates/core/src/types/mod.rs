//! Core types for the POS register.
//!
//! This module provides type-safe wrappers for the register's domain concepts.

pub mod code;
pub mod price;
pub mod product;
pub mod purchase;

pub use code::{CodeInput, ProductCode, ProductCodeError};
pub use price::{Price, TAX_RATE, tax_included};
pub use product::{NOT_FOUND_MESSAGE, Product, ProductLookup};
pub use purchase::{LineItem, PurchaseList, PurchaseTotals};
