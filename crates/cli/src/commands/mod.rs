//! CLI subcommands.

pub mod lookup;
pub mod register;

use pos_register::{ApiError, RegisterError};
use pos_register_core::ProductCode;
use thiserror::Error;

/// Errors that end a CLI command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The HTTP client could not be created.
    #[error("API client error: {0}")]
    Api(#[from] ApiError),

    /// A register operation failed its precondition.
    #[error("{0}")]
    Register(#[from] RegisterError),

    /// The code given on the command line does not fit the code field.
    #[error("Product code must be at most {} digits", ProductCode::MAX_LENGTH)]
    CodeTooLong,

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
