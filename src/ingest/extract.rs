//! Field extraction from SMS bodies
//!
//! Amounts, counterparties, and timestamps are pulled out with the same
//! patterns the provider's message formats follow. All extraction is
//! best-effort: a non-matching body yields `None`, never an error.

use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;

use super::classify::TransactionKind;

fn amount_grouped() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{1,3}(?:,\d{3})*)\s*RWF").unwrap())
}

fn amount_plain() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s*RWF").unwrap())
}

fn received_from() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)from\s+([A-Za-z\s]+?)(?:\s+\(|\son|\.)").unwrap())
}

fn transfer_to() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?:to|transferred to)\s+([A-Za-z\s]+?)(?:\s+\(|\s+\d|\.|$)").unwrap()
    })
}

fn withdrawal_agent() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)agent:\s*([A-Za-z\s]+?)(?:,|\))").unwrap())
}

fn merchant_by() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)by\s+([A-Za-z\s]+?(?:LTD|INC|Co\.)?)(?:\s+on|$)").unwrap())
}

/// Extract the transaction amount in RWF from an SMS body.
///
/// Prefers comma-grouped amounts (`1,000 RWF`), then falls back to bare
/// digits (`2000 RWF`).
pub fn extract_amount(body: &str) -> Option<i64> {
    if let Some(caps) = amount_grouped().captures(body) {
        return caps[1].replace(',', "").parse().ok();
    }
    amount_plain()
        .captures(body)
        .and_then(|caps| caps[1].parse().ok())
}

/// Extract (sender, receiver) for a classified body.
///
/// Counterparty kinds capture the name out of the body; utility-style kinds
/// use fixed parties. Agent names are tagged with an ` (Agent)` suffix.
pub fn extract_parties(
    body: &str,
    kind: TransactionKind,
) -> (Option<String>, Option<String>) {
    match kind {
        TransactionKind::MoneyReceived => {
            let sender = received_from()
                .captures(body)
                .map(|caps| caps[1].trim().to_string());
            (sender, Some("You".to_string()))
        }
        TransactionKind::MoneyTransfer | TransactionKind::PaymentToPerson => {
            let receiver = transfer_to()
                .captures(body)
                .map(|caps| caps[1].trim().to_string());
            (Some("You".to_string()), receiver)
        }
        TransactionKind::CashWithdrawal => {
            let receiver = withdrawal_agent()
                .captures(body)
                .map(|caps| format!("{} (Agent)", caps[1].trim()));
            (Some("You".to_string()), receiver)
        }
        TransactionKind::BankDeposit => (Some("Bank".to_string()), Some("You".to_string())),
        TransactionKind::AirtimePurchase => {
            (Some("You".to_string()), Some("MTN Airtime".to_string()))
        }
        TransactionKind::CashPower => {
            (Some("You".to_string()), Some("Utility Company".to_string()))
        }
        TransactionKind::DataBundle => {
            (Some("You".to_string()), Some("MTN Data Services".to_string()))
        }
        TransactionKind::MerchantPayment => {
            let receiver = merchant_by()
                .captures(body)
                .map(|caps| caps[1].trim().to_string());
            (Some("You".to_string()), receiver)
        }
        TransactionKind::ServiceDeduction => {
            (Some("You".to_string()), Some("Service Provider".to_string()))
        }
        TransactionKind::Other => (Some("Unknown".to_string()), Some("Unknown".to_string())),
    }
}

/// Convert a human-readable SMS date to a sortable ISO-8601 timestamp.
///
/// Accepts `10 May 2024 4:30:58 PM` and the 24-hour variant. An
/// unparseable non-empty date is passed through unchanged so the record
/// keeps whatever the source had; an empty date yields `None`.
pub fn parse_timestamp(readable_date: &str) -> Option<String> {
    if readable_date.is_empty() {
        return None;
    }

    for format in ["%d %b %Y %I:%M:%S %p", "%d %b %Y %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(readable_date, format) {
            return Some(dt.format("%Y-%m-%dT%H:%M:%S").to_string());
        }
    }

    Some(readable_date.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_with_thousands_separator() {
        assert_eq!(
            extract_amount("You have received 2,000 RWF from Jane"),
            Some(2000)
        );
        assert_eq!(extract_amount("payment of 1,250,000 RWF to"), Some(1250000));
    }

    #[test]
    fn test_amount_without_separator() {
        assert_eq!(extract_amount("A transaction of 2000 RWF by"), Some(2000));
    }

    #[test]
    fn test_amount_absent() {
        assert_eq!(extract_amount("Dear customer, welcome!"), None);
    }

    #[test]
    fn test_parties_money_received() {
        let body = "You have received 2,000 RWF from Jane Smith (250791111111) on your account.";
        let (sender, receiver) = extract_parties(body, TransactionKind::MoneyReceived);
        assert_eq!(sender.as_deref(), Some("Jane Smith"));
        assert_eq!(receiver.as_deref(), Some("You"));
    }

    #[test]
    fn test_parties_transfer() {
        let body = "*165*S*10,000 RWF transferred to Samuel Carter (250791666666) from 36521838";
        let (sender, receiver) = extract_parties(body, TransactionKind::MoneyTransfer);
        assert_eq!(sender.as_deref(), Some("You"));
        assert_eq!(receiver.as_deref(), Some("Samuel Carter"));
    }

    #[test]
    fn test_parties_withdrawal_tags_agent() {
        let body = "You have withdrawn 20,000 RWF via agent: Agent Sophia (250790777777)";
        let (sender, receiver) = extract_parties(body, TransactionKind::CashWithdrawal);
        assert_eq!(sender.as_deref(), Some("You"));
        assert_eq!(receiver.as_deref(), Some("Agent Sophia (Agent)"));
    }

    #[test]
    fn test_parties_fixed_kinds() {
        let (sender, receiver) = extract_parties("", TransactionKind::BankDeposit);
        assert_eq!(sender.as_deref(), Some("Bank"));
        assert_eq!(receiver.as_deref(), Some("You"));

        let (sender, receiver) = extract_parties("", TransactionKind::DataBundle);
        assert_eq!(sender.as_deref(), Some("You"));
        assert_eq!(receiver.as_deref(), Some("MTN Data Services"));
    }

    #[test]
    fn test_parties_merchant() {
        let body = "A transaction of 2000 RWF by DIRECT PAYMENT LTD on your MOMO account";
        let (_, receiver) = extract_parties(body, TransactionKind::MerchantPayment);
        assert_eq!(receiver.as_deref(), Some("DIRECT PAYMENT LTD"));
    }

    #[test]
    fn test_timestamp_twelve_hour() {
        assert_eq!(
            parse_timestamp("10 May 2024 4:30:58 PM").as_deref(),
            Some("2024-05-10T16:30:58")
        );
    }

    #[test]
    fn test_timestamp_twenty_four_hour() {
        assert_eq!(
            parse_timestamp("10 May 2024 16:30:58").as_deref(),
            Some("2024-05-10T16:30:58")
        );
    }

    #[test]
    fn test_timestamp_unparseable_passes_through() {
        assert_eq!(
            parse_timestamp("sometime last week").as_deref(),
            Some("sometime last week")
        );
        assert_eq!(parse_timestamp(""), None);
    }
}
