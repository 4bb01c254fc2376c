//! Money amounts with a fixed two-digit fraction.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use catalog_core::{DomainError, DomainResult, ValueObject};

/// Decimal amount normalised to two fraction digits (`10` is stored as `10.00`).
///
/// Used for price values, shipping costs, rebates and tax rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Amount(Decimal);

impl Amount {
    pub const SCALE: u32 = 2;

    pub fn zero() -> Self {
        Self(Decimal::new(0, Self::SCALE))
    }

    /// Round `value` to two fraction digits.
    ///
    /// Fails for magnitudes too large to carry two fraction digits.
    pub fn new(value: Decimal) -> DomainResult<Self> {
        let mut value = value.round_dp(Self::SCALE);
        value.rescale(Self::SCALE);
        if value.scale() != Self::SCALE {
            return Err(DomainError::validation(format!("amount '{value}' is out of range")));
        }
        Ok(Self(value))
    }

    /// Parse a submitted amount; blank input is zero.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Self::zero());
        }

        let value = Decimal::from_str(input)
            .map_err(|e| DomainError::validation(format!("invalid amount '{input}': {e}")))?;
        Self::new(value)
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

impl core::fmt::Display for Amount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Amount {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Amount {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Amount> for String {
    fn from(value: Amount) -> Self {
        value.to_string()
    }
}

impl ValueObject for Amount {}
