//! Transaction kind detection
//!
//! Kinds are detected from marker phrases in the SMS body, checked in order
//! of specificity. The markers track one mobile-money provider's message
//! formats; anything unrecognized is `Other` and gets dropped downstream.

use std::fmt;

/// The closed set of transaction kinds the pipeline recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    MoneyReceived,
    BankDeposit,
    CashWithdrawal,
    MoneyTransfer,
    AirtimePurchase,
    CashPower,
    DataBundle,
    PaymentToPerson,
    MerchantPayment,
    ServiceDeduction,
    /// Unrecognized body; skipped by the transform stage
    Other,
}

impl TransactionKind {
    /// The snake_case name stored in the `transaction_type` field
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::MoneyReceived => "money_received",
            TransactionKind::BankDeposit => "bank_deposit",
            TransactionKind::CashWithdrawal => "cash_withdrawal",
            TransactionKind::MoneyTransfer => "money_transfer",
            TransactionKind::AirtimePurchase => "airtime_purchase",
            TransactionKind::CashPower => "cash_power",
            TransactionKind::DataBundle => "data_bundle",
            TransactionKind::PaymentToPerson => "payment_to_person",
            TransactionKind::MerchantPayment => "merchant_payment",
            TransactionKind::ServiceDeduction => "service_deduction",
            TransactionKind::Other => "other",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Detect the transaction kind from an SMS body.
///
/// Checks run in order of specificity; the first match wins.
pub fn detect_kind(body: &str) -> TransactionKind {
    let body = body.to_lowercase();

    if body.contains("you have received") {
        return TransactionKind::MoneyReceived;
    }

    if body.contains("*113*r*a bank deposit") {
        return TransactionKind::BankDeposit;
    }

    if body.contains("withdrawn") && body.contains("via agent") {
        return TransactionKind::CashWithdrawal;
    }

    if body.contains("*165*s*") && body.contains("transferred") {
        return TransactionKind::MoneyTransfer;
    }

    if body.contains("txid:") && body.contains("your payment of") {
        if body.contains("to airtime") {
            return TransactionKind::AirtimePurchase;
        }
        if body.contains("to mtn cash power") {
            return TransactionKind::CashPower;
        }
        if body.contains("to bundles and packs") {
            return TransactionKind::DataBundle;
        }
        if body.contains("to ") {
            return TransactionKind::PaymentToPerson;
        }
        return TransactionKind::Other;
    }

    if body.contains("*164*s*y'ello,a transaction of") {
        return TransactionKind::MerchantPayment;
    }

    if body.contains("direct payment ltd") {
        return TransactionKind::ServiceDeduction;
    }

    if body.contains("by ") && body.contains(" on your momo account") {
        return TransactionKind::MerchantPayment;
    }

    TransactionKind::Other
}
