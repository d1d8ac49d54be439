//! Product code types.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ProductCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductCodeError {
    /// The input string is empty.
    #[error("product code cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("product code must be at most {max} digits")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains something other than ASCII digits.
    #[error("product code must contain only digits")]
    NonDigit,
}

/// A catalog product code (JAN/EAN style).
///
/// ## Constraints
///
/// - Length: 1-13 characters
/// - ASCII digits only
///
/// ## Examples
///
/// ```
/// use pos_register_core::ProductCode;
///
/// assert!(ProductCode::parse("4901234567894").is_ok());
/// assert!(ProductCode::parse("12").is_ok());
///
/// assert!(ProductCode::parse("").is_err());               // empty
/// assert!(ProductCode::parse("49012345678940").is_err()); // 14 digits
/// assert!(ProductCode::parse("49-01").is_err());          // non-digit
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ProductCode(String);

impl ProductCode {
    /// Maximum number of digits in a product code.
    pub const MAX_LENGTH: usize = 13;

    /// Parse a `ProductCode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 13 characters,
    /// or contains anything other than ASCII digits.
    pub fn parse(s: &str) -> Result<Self, ProductCodeError> {
        if s.is_empty() {
            return Err(ProductCodeError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(ProductCodeError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ProductCodeError::NonDigit);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The editable product code field of the register.
///
/// Holds only ASCII digits and never more than [`ProductCode::MAX_LENGTH`]
/// of them. Input that would exceed the limit is rejected as a whole, so
/// the previous value stays in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeInput(String);

impl CodeInput {
    /// Create an empty code input.
    #[must_use]
    pub const fn new() -> Self {
        Self(String::new())
    }

    /// Replace the field with the digits of `raw`.
    ///
    /// Non-digit characters are discarded first, then the result is accepted
    /// only if it fits in 13 digits. Returns `true` if the value was replaced.
    pub fn update(&mut self, raw: &str) -> bool {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.len() > ProductCode::MAX_LENGTH {
            return false;
        }
        self.0 = digits;
        true
    }

    /// Reset the field to empty.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns the current field contents.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if nothing has been entered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the field as a [`ProductCode`], or `None` if it is empty.
    #[must_use]
    pub fn to_code(&self) -> Option<ProductCode> {
        ProductCode::parse(&self.0).ok()
    }
}

impl fmt::Display for CodeInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_codes() {
        assert!(ProductCode::parse("1").is_ok());
        assert!(ProductCode::parse("4901234567894").is_ok());
        assert!(ProductCode::parse("0000000000000").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(ProductCode::parse(""), Err(ProductCodeError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        assert!(matches!(
            ProductCode::parse("12345678901234"),
            Err(ProductCodeError::TooLong { max: 13 })
        ));
    }

    #[test]
    fn test_parse_non_digit() {
        assert_eq!(ProductCode::parse("12a4"), Err(ProductCodeError::NonDigit));
        assert_eq!(ProductCode::parse("１２３"), Err(ProductCodeError::NonDigit));
    }

    #[test]
    fn test_update_strips_non_digits() {
        let mut input = CodeInput::new();
        assert!(input.update("49-0123 4abc"));
        assert_eq!(input.as_str(), "4901234");
    }

    #[test]
    fn test_update_passes_digits_through() {
        let mut input = CodeInput::new();
        assert!(input.update("4901234567894"));
        assert_eq!(input.as_str(), "4901234567894");
    }

    #[test]
    fn test_update_rejects_fourteenth_digit() {
        let mut input = CodeInput::new();
        input.update("4901234567894");
        assert!(!input.update("49012345678941"));
        assert_eq!(input.as_str(), "4901234567894");
    }

    #[test]
    fn test_update_strips_before_length_check() {
        // 13 digits padded with separators is still accepted
        let mut input = CodeInput::new();
        assert!(input.update("490-1234-5678-94"));
        assert_eq!(input.as_str(), "4901234567894");
    }

    #[test]
    fn test_update_only_noise_empties_field() {
        let mut input = CodeInput::new();
        input.update("123");
        assert!(input.update("abc"));
        assert!(input.is_empty());
    }

    #[test]
    fn test_to_code() {
        let mut input = CodeInput::new();
        assert!(input.to_code().is_none());
        input.update("4901");
        assert_eq!(input.to_code().unwrap().as_str(), "4901");
    }

    #[test]
    fn test_clear() {
        let mut input = CodeInput::new();
        input.update("4901");
        input.clear();
        assert!(input.is_empty());
    }
}
