//! POS Register Core - Shared types library.
//!
//! This crate provides the domain types used by every register component:
//! - `register` - Purchase entry session and backend API client
//! - `cli` - Interactive terminal register
//!
//! # Architecture
//!
//! The core crate contains only types and pure arithmetic - no I/O, no HTTP
//! clients. This keeps it lightweight and trivially testable.
//!
//! # Modules
//!
//! - [`types`] - Product codes, prices, products, line items and the purchase list

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
