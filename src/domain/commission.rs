use super::amount::Amount;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Platform cut taken from every payment request.
pub const COMMISSION_RATE: Decimal = dec!(0.15);

/// How a gross amount divides between the platform and the professional.
///
/// The server computes the authoritative split; this one is shown to the
/// user before they confirm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommissionSplit {
    pub gross: Decimal,
    pub commission: Decimal,
    pub net: Decimal,
}

impl CommissionSplit {
    /// Commission at currency precision, as displayed.
    pub fn commission_cents(&self) -> Decimal {
        to_cents(self.commission)
    }

    pub fn net_cents(&self) -> Decimal {
        to_cents(self.net)
    }

    /// Rate expressed as a whole percentage, e.g. `15` for `0.15`.
    pub fn rate_percent(rate: Decimal) -> Decimal {
        (rate * dec!(100)).normalize()
    }
}

pub fn split(amount: Amount, rate: Decimal) -> CommissionSplit {
    let gross = amount.value();
    let commission = gross * rate;
    CommissionSplit {
        gross,
        commission,
        net: gross - commission,
    }
}

pub(crate) fn to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
