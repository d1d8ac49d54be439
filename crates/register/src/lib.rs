//! POS register library.
//!
//! This crate provides the register's behavior as a library, independent of
//! any particular front end, so it can be driven by the terminal client and
//! exercised directly by tests.
//!
//! # Modules
//!
//! - [`api`] - Client for the external product/purchase API
//! - [`config`] - Configuration loaded from the environment
//! - [`display`] - Text rendering of the register view
//! - [`error`] - User-facing error taxonomy
//! - [`session`] - The purchase entry state container and its operations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod session;

pub use api::{ApiError, PosApiClient, PosBackend};
pub use config::{ConfigError, RegisterConfig};
pub use display::RegisterView;
pub use error::RegisterError;
pub use session::{PurchaseEntry, Receipt};
