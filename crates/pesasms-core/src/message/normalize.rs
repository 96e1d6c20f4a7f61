//! Turns a [`RawMatch`] into a clean [`TransactionRecord`].
//!
//! Every transformation here has a fallback instead of an error path:
//! unparseable numbers become zero and an unparseable date/time pair
//! is kept as raw strings on the record. Nothing in this module
//! returns an error for a field it processes.

use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::debug;

use super::registry::RawMatch;
use crate::models::message::{
    Language, MshwariDirection, TransactionDetails, TransactionRecord, TransactionType,
};

/// Clean a captured amount string and parse it as a decimal.
///
/// Thousands-separator commas and embedded spaces are removed and a
/// trailing stray decimal point is stripped (the templates capture
/// greedily, so a sentence-ending dot often rides along). An absent,
/// empty, or unparseable value yields zero, not an error. Cleaning is
/// idempotent.
pub fn clean_amount(raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    let cleaned = cleaned.trim_end_matches('.');

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(cleaned).unwrap_or(Decimal::ZERO)
}

/// Combine captured `date` (day/month/2-digit-year) and `time`
/// (12-hour clock) strings into one timestamp.
///
/// Returns `None` when the pair does not form a valid moment despite
/// matching the capture grammar (e.g. 31/2/25); callers degrade to
/// keeping the raw strings.
pub fn combine_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%d/%m/%y %I:%M %p").ok()
}

/// Resolve the winning transaction type and assemble the final record.
///
/// Dispatch is the ordered walk over `order`: the first type whose
/// marker group participated in the match wins and its marker field is
/// consumed. Returns `None` only when no marker group is present,
/// which the caller reports as an unrecognized format.
pub(crate) fn normalize(
    language: Language,
    order: &[TransactionType],
    mut raw: RawMatch,
) -> Option<TransactionRecord> {
    let ty = *order.iter().find(|ty| raw.contains(ty.name()))?;
    raw.take(ty.name());

    let amount = raw
        .take(&ty.group("amount"))
        .map(|s| clean_amount(&s))
        .unwrap_or(Decimal::ZERO);

    let mpesa_balance = raw.take("mpesa_balance").map(|s| clean_amount(&s));
    let transaction_cost = raw.take("transaction_cost").map(|s| clean_amount(&s));
    let daily_limit = raw.take("daily_limit").map(|s| clean_amount(&s));

    let (timestamp, raw_date, raw_time) =
        match (raw.take(&ty.group("date")), raw.take(&ty.group("time"))) {
            (Some(date), Some(time)) => match combine_timestamp(&date, &time) {
                Some(ts) => (Some(ts), None, None),
                None => {
                    debug!(%date, %time, "date/time matched but did not combine; keeping raw");
                    (None, Some(date), Some(time))
                }
            },
            _ => (None, None, None),
        };

    let details = build_details(ty, &mut raw);

    Some(TransactionRecord {
        transaction_id: raw.take("transaction_id"),
        language,
        amount,
        timestamp,
        raw_date,
        raw_time,
        mpesa_balance,
        transaction_cost,
        daily_limit,
        details,
    })
}

/// Consume a field the template always populates for a participating
/// alternative; the empty-string fallback keeps the normalizer
/// infallible if a template is ever edited out of sync.
fn required(raw: &mut RawMatch, ty: TransactionType, field: &str) -> String {
    raw.take(&ty.group(field)).unwrap_or_default()
}

fn build_details(ty: TransactionType, raw: &mut RawMatch) -> TransactionDetails {
    match ty {
        TransactionType::Received => TransactionDetails::Received {
            sender: required(raw, ty, "sender"),
            phone: raw.take(&ty.group("phone")),
        },
        TransactionType::Paid => TransactionDetails::Paid {
            payee: required(raw, ty, "payee"),
        },
        TransactionType::Sent => TransactionDetails::Sent {
            recipient: required(raw, ty, "recipient"),
            account: raw.take(&ty.group("account")),
            phone: raw.take(&ty.group("phone")),
        },
        TransactionType::Mshwari => TransactionDetails::Mshwari {
            direction: MshwariDirection::parse(&required(raw, ty, "direction")),
        },
        TransactionType::Airtime => TransactionDetails::Airtime {
            phone: raw.take(&ty.group("phone")),
        },
        TransactionType::Withdraw => TransactionDetails::Withdraw {
            agent: required(raw, ty, "agent"),
        },
        TransactionType::BalanceCheck => TransactionDetails::BalanceCheck,
        TransactionType::Kutuma => TransactionDetails::Kutuma {
            recipient: required(raw, ty, "recipient"),
            phone: required(raw, ty, "phone"),
        },
        TransactionType::Kupokea => TransactionDetails::Kupokea {
            sender: required(raw, ty, "sender"),
            phone: required(raw, ty, "phone"),
        },
        TransactionType::Salio => TransactionDetails::Salio,
        TransactionType::KulipaTill => TransactionDetails::KulipaTill {
            merchant: required(raw, ty, "merchant"),
        },
        TransactionType::Data => TransactionDetails::Data,
        TransactionType::Mjazo => TransactionDetails::Mjazo,
        TransactionType::Paybill => TransactionDetails::Paybill {
            name: required(raw, ty, "name"),
            account: required(raw, ty, "account"),
        },
        TransactionType::KupokeaBank => TransactionDetails::KupokeaBank {
            bank: required(raw, ty, "name"),
            account: required(raw, ty, "account"),
        },
        TransactionType::PochiLaBiashara => TransactionDetails::PochiLaBiashara {
            recipient: required(raw, ty, "recipient"),
        },
    }
}
