use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Balance snapshot for a contract, as reported by `/contracts/{id}/balance/`.
///
/// `contract_balance` is what remains available to request payments against.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ContractBalance {
    pub contract_balance: Decimal,
    pub contract_value: Decimal,
    pub total_paid: Decimal,
    pub client_pending_balance: Decimal,
    pub professional_current_balance: Decimal,
    pub professional_pending_balance: Decimal,
    pub total_pending_payments: Decimal,
    pub can_request_payment: bool,
    pub can_approve_payment: bool,
}

impl ContractBalance {
    /// Share of the contract value already paid out, capped at 100.
    pub fn paid_percentage(&self) -> Decimal {
        if self.contract_value.is_zero() {
            return Decimal::ZERO;
        }
        (self.total_paid / self.contract_value * dec!(100)).min(dec!(100))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_missing_fields() {
        let json = r#"{"contract_balance": 750.5, "contract_value": 1000, "can_request_payment": true}"#;
        let balance: ContractBalance = serde_json::from_str(json).unwrap();
        assert_eq!(balance.contract_balance, dec!(750.5));
        assert_eq!(balance.total_paid, Decimal::ZERO);
        assert!(balance.can_request_payment);
        assert!(!balance.can_approve_payment);
    }

    #[test]
    fn test_paid_percentage() {
        let mut balance = ContractBalance {
            contract_value: dec!(2000),
            total_paid: dec!(500),
            ..Default::default()
        };
        assert_eq!(balance.paid_percentage(), dec!(25));

        balance.total_paid = dec!(2500);
        assert_eq!(balance.paid_percentage(), dec!(100));

        balance.contract_value = Decimal::ZERO;
        assert_eq!(balance.paid_percentage(), Decimal::ZERO);
    }
}
