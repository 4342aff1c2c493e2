use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Serialize, Serializer};
use std::str::FromStr;

/// A strictly positive monetary amount requested against a contract.
///
/// The value is kept exactly as entered; rounding to cents only happens when
/// the amount is displayed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(Decimal);

/// A positive number read from an amount field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmountInput {
    Exact(Amount),
    /// Larger than any decimal, so larger than any contract balance.
    AboveRange,
}

impl Amount {
    /// Smallest positive decimal (`1e-28`).
    pub const SMALLEST: Amount = Amount(Decimal::from_parts(1, 0, 0, false, 28));

    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::InvalidAmount)
        }
    }

    /// Reads the raw text of an amount input field.
    ///
    /// Any finite number above zero is accepted, including scientific
    /// notation. Blank, non-numeric, zero and negative inputs, non-finite
    /// values and digit-group underscores are all `InvalidAmount`. A positive
    /// number too small for a decimal is carried as [`Amount::SMALLEST`].
    pub fn read(input: &str) -> Result<AmountInput> {
        let input = input.trim();
        if input.is_empty() || input.contains('_') {
            return Err(PaymentError::InvalidAmount);
        }
        let number: f64 = input.parse().map_err(|_| PaymentError::InvalidAmount)?;
        if !number.is_finite() || number <= 0.0 {
            return Err(PaymentError::InvalidAmount);
        }

        let exact = Decimal::from_str(input)
            .or_else(|_| Decimal::from_scientific(input))
            .ok()
            .or_else(|| Decimal::from_f64(number));
        match exact {
            Some(value) if value > Decimal::ZERO => Ok(AmountInput::Exact(Self(value))),
            _ if number >= 1.0 => Ok(AmountInput::AboveRange),
            _ => Ok(AmountInput::Exact(Self::SMALLEST)),
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

// The API expects a JSON number, not the string form rust_decimal uses by default.
impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}
