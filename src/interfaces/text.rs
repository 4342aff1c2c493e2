use crate::application::flow::{FlowState, PaymentRequestFlow};
use crate::domain::commission::{COMMISSION_RATE, CommissionSplit, to_cents};
use crate::domain::contract::ContractBalance;
use rust_decimal::Decimal;

pub const RELEASE_NOTICE: &str =
    "Payment will be available in your wallet 3 days after client approval";

/// Formats an amount the way `en-US` currency formatting does: `$1,234.56`.
pub fn format_usd(value: Decimal) -> String {
    let cents = to_cents(value);
    let sign = if cents.is_sign_negative() && !cents.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", cents.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{fraction}")
}

/// Gross / commission / net lines shown before the user confirms.
pub fn render_split(split: &CommissionSplit) -> String {
    format!(
        "Gross Amount: {}\nPlatform Commission ({}%): -{}\nNet Amount (You receive): {}\n",
        format_usd(split.gross),
        CommissionSplit::rate_percent(COMMISSION_RATE),
        format_usd(split.commission),
        format_usd(split.net),
    )
}

/// Renders the flow as plain text for whichever state it is in.
pub fn render(flow: &PaymentRequestFlow) -> String {
    let mut lines = vec!["Request Payment".to_string()];
    match flow.state() {
        FlowState::Collapsed => {
            lines.push(format!(
                "Available Contract Balance: {}",
                format_usd(flow.contract_balance())
            ));
            if !flow.can_open() {
                lines.push("No funds available in contract balance".to_string());
            }
        }
        FlowState::Expanded | FlowState::Submitting => {
            lines.extend(flow.error_message().map(|e| format!("Error: {e}")));
            lines.push(format!("Payment Amount: {}", flow.amount()));
            lines.push(format!("Maximum: {}", format_usd(flow.contract_balance())));
            lines.extend(flow.preview().map(|split| render_split(&split).trim_end().to_string()));
            if !flow.description().is_empty() {
                lines.push(format!("Description: {}", flow.description()));
            }
            lines.push(RELEASE_NOTICE.to_string());
            if flow.state() == FlowState::Submitting {
                lines.push("Requesting...".to_string());
            }
        }
    }
    lines.push(String::new());
    lines.join("\n")
}

pub fn render_balance(balance: &ContractBalance) -> String {
    format!(
        "Contract Balance: {}\nContract Value: {} ({}% paid)\nTotal Paid: {}\nPending Payments: {}\n",
        format_usd(balance.contract_balance),
        format_usd(balance.contract_value),
        balance.paid_percentage().round_dp(0),
        format_usd(balance.total_paid),
        format_usd(balance.total_pending_payments),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::flow::FlowConfig;
    use crate::infrastructure::credentials::StaticCredentials;
    use crate::infrastructure::in_memory::InMemoryPaymentGateway;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(dec!(0)), "$0.00");
        assert_eq!(format_usd(dec!(5)), "$5.00");
        assert_eq!(format_usd(dec!(999.999)), "$1,000.00");
        assert_eq!(format_usd(dec!(1234.5)), "$1,234.50");
        assert_eq!(format_usd(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_usd(dec!(1.005)), "$1.01");
        assert_eq!(format_usd(dec!(-42.1)), "-$42.10");
        assert_eq!(format_usd(dec!(-0.001)), "$0.00");
    }

    fn flow(balance: Decimal) -> PaymentRequestFlow {
        PaymentRequestFlow::new(
            FlowConfig {
                contract_id: 1,
                contract_balance: balance,
            },
            Box::new(InMemoryPaymentGateway::new()),
            Box::new(StaticCredentials::anonymous()),
            || {},
        )
    }

    #[test]
    fn test_render_collapsed() {
        let text = render(&flow(dec!(1500)));
        assert!(text.contains("Available Contract Balance: $1,500.00"));
        assert!(!text.contains("No funds"));

        let text = render(&flow(dec!(0)));
        assert!(text.contains("No funds available in contract balance"));
    }

    #[test]
    fn test_render_expanded_with_preview() {
        let mut f = flow(dec!(1000));
        f.open().unwrap();
        f.set_amount("200");
        let text = render(&f);
        assert!(text.contains("Maximum: $1,000.00"));
        assert!(text.contains("Gross Amount: $200.00"));
        assert!(text.contains("Platform Commission (15%): -$30.00"));
        assert!(text.contains("Net Amount (You receive): $170.00"));
        assert!(text.contains(RELEASE_NOTICE));
    }

    #[test]
    fn test_render_balance() {
        let balance = ContractBalance {
            contract_balance: dec!(750),
            contract_value: dec!(1000),
            total_paid: dec!(250),
            ..Default::default()
        };
        let text = render_balance(&balance);
        assert!(text.contains("Contract Balance: $750.00"));
        assert!(text.contains("Contract Value: $1,000.00 (25% paid)"));
        assert!(text.ends_with("Pending Payments: $0.00\n"));
    }

    #[test]
    fn test_render_expanded_lines_in_order() {
        let mut f = flow(dec!(1000));
        f.open().unwrap();
        f.set_amount("1500");
        f.set_description("Roofing");
        f.validate().unwrap_err();
        let text = render(&f);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Request Payment");
        assert_eq!(lines[1], "Error: Amount cannot exceed contract balance");
        assert_eq!(lines[2], "Payment Amount: 1500");
        assert_eq!(lines[3], "Maximum: $1,000.00");
        assert_eq!(lines[4], "Gross Amount: $1,500.00");
        assert_eq!(lines[7], "Description: Roofing");
        assert_eq!(lines[8], RELEASE_NOTICE);
        assert!(text.ends_with('\n'));
    }
}
