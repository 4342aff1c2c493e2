use super::amount::{Amount, AmountInput};
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::Serialize;

pub const DEFAULT_DESCRIPTION: &str = "Payment request";

/// Longest description the API accepts.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// A validated request for payment, ready to send.
///
/// Serializes to the exact body the payments endpoint expects:
/// `{"amount": <number>, "description": <string>}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRequest {
    pub amount: Amount,
    pub description: String,
}

impl PaymentRequest {
    /// Validates raw form input against the contract balance.
    ///
    /// Checks run in order and stop at the first failure: the amount must be
    /// a positive number, it must not exceed `contract_balance`, and the
    /// trimmed description must fit the API limit. A blank description is
    /// replaced with [`DEFAULT_DESCRIPTION`].
    ///
    /// A number too large for a decimal always exceeds the balance and is
    /// reported with `amount` saturated at `Decimal::MAX`.
    pub fn validate(amount: &str, description: &str, contract_balance: Decimal) -> Result<Self> {
        let amount = match Amount::read(amount)? {
            AmountInput::Exact(amount) if amount.value() <= contract_balance => amount,
            AmountInput::Exact(amount) => {
                return Err(PaymentError::ExceedsBalance {
                    amount: amount.value(),
                    balance: contract_balance,
                });
            }
            AmountInput::AboveRange => {
                return Err(PaymentError::ExceedsBalance {
                    amount: Decimal::MAX,
                    balance: contract_balance,
                });
            }
        };

        let description = description.trim();
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(PaymentError::DescriptionTooLong {
                max: MAX_DESCRIPTION_LEN,
            });
        }
        let description = if description.is_empty() {
            DEFAULT_DESCRIPTION.to_string()
        } else {
            description.to_string()
        };

        Ok(Self {
            amount,
            description,
        })
    }
}
