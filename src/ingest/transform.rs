//! Raw SMS to transaction transform
//!
//! The batch stage of the pipeline: filter out non-financial messages,
//! classify and extract the rest, and emit transaction field maps ready for
//! the engine (ids are assigned at insert/import time, not here).

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::store::Transaction;

use super::classify::{detect_kind, TransactionKind};
use super::extract::{extract_amount, extract_parties, parse_timestamp};

/// Description field length cap
const DESCRIPTION_MAX_CHARS: usize = 150;

/// One raw SMS as exported from a phone backup.
///
/// Only the body and the readable date matter to the transform; the rest of
/// the export's fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSms {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub readable_date: String,
}

/// Returns whether the body is a non-financial message to skip outright
fn is_noise(body_lower: &str) -> bool {
    if body_lower.contains("one-time password") || body_lower.contains("dear customer") {
        return true;
    }
    // Promotional messages
    if body_lower.contains("kanda") && body_lower.contains("poromosiyo") {
        return true;
    }
    // Standalone data bundle confirmations
    if body_lower.contains("yello!") && body_lower.contains("umaze kugura") {
        return true;
    }
    false
}

/// Transform one raw SMS into a transaction field map.
///
/// Returns `None` for noise, unrecognized kinds, and bodies with no
/// extractable (non-zero) amount.
pub fn transform_one(sms: &RawSms) -> Option<Transaction> {
    let body_lower = sms.body.to_lowercase();
    if is_noise(&body_lower) {
        return None;
    }

    let kind = detect_kind(&sms.body);
    if kind == TransactionKind::Other {
        return None;
    }

    let amount = match extract_amount(&sms.body) {
        Some(amount) if amount != 0 => amount,
        _ => return None,
    };

    let (sender, receiver) = extract_parties(&sms.body, kind);

    let mut fields = Map::new();
    fields.insert(
        "transaction_type".to_string(),
        Value::from(kind.as_str()),
    );
    fields.insert("amount".to_string(), Value::from(amount));
    fields.insert("currency".to_string(), Value::from("RWF"));
    fields.insert("sender".to_string(), option_value(sender));
    fields.insert("receiver".to_string(), option_value(receiver));
    fields.insert(
        "timestamp".to_string(),
        option_value(parse_timestamp(&sms.readable_date)),
    );
    fields.insert(
        "description".to_string(),
        Value::from(truncate_description(&sms.body)),
    );
    fields.insert(
        "original_sms_date".to_string(),
        Value::from(sms.readable_date.clone()),
    );

    Some(Transaction::from_fields(fields))
}

/// Transform a raw SMS dump into transaction records, preserving order
pub fn transform_sms(raw: &[RawSms]) -> Vec<Transaction> {
    raw.iter().filter_map(transform_one).collect()
}

fn option_value(value: Option<String>) -> Value {
    value.map(Value::from).unwrap_or(Value::Null)
}

fn truncate_description(body: &str) -> String {
    if body.chars().count() > DESCRIPTION_MAX_CHARS {
        let mut truncated: String = body.chars().take(DESCRIPTION_MAX_CHARS).collect();
        truncated.push_str("...");
        truncated
    } else {
        body.to_string()
    }
}
