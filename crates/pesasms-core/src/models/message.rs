//! Typed result records for parsed M-PESA notification messages.

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Language variant of the notification template family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Language {
    English,
    Swahili,
}

impl Language {
    /// Pick the template set to use for a raw message.
    ///
    /// A case-insensitive `confirmed` token marks the English variant;
    /// everything else is treated as Swahili. This is a binary, lossy
    /// heuristic: a mismatch surfaces later as an unrecognized format,
    /// not here.
    pub fn detect(text: &str) -> Self {
        if text.to_lowercase().contains("confirmed") {
            Language::English
        } else {
            Language::Swahili
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => write!(f, "ENGLISH"),
            Language::Swahili => write!(f, "SWAHILI"),
        }
    }
}

/// Closed set of notification categories across both languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    // English templates
    Received,
    Paid,
    Sent,
    Mshwari,
    Airtime,
    Withdraw,
    BalanceCheck,
    // Swahili templates
    Kutuma,
    Kupokea,
    Salio,
    KulipaTill,
    Data,
    Mjazo,
    Paybill,
    KupokeaBank,
    PochiLaBiashara,
}

impl TransactionType {
    /// Canonical identifier, also used as the marker capture-group
    /// name in the combined matcher.
    pub fn name(&self) -> &'static str {
        match self {
            TransactionType::Received => "RECEIVED",
            TransactionType::Paid => "PAID",
            TransactionType::Sent => "SENT",
            TransactionType::Mshwari => "MSHWARI",
            TransactionType::Airtime => "AIRTIME",
            TransactionType::Withdraw => "WITHDRAW",
            TransactionType::BalanceCheck => "BALANCE_CHECK",
            TransactionType::Kutuma => "KUTUMA",
            TransactionType::Kupokea => "KUPOKEA",
            TransactionType::Salio => "SALIO",
            TransactionType::KulipaTill => "KULIPA_TILL",
            TransactionType::Data => "DATA",
            TransactionType::Mjazo => "MJAZO",
            TransactionType::Paybill => "PAYBILL",
            TransactionType::KupokeaBank => "KUPOKEA_BANK",
            TransactionType::PochiLaBiashara => "POCHI_LA_BIASHARA",
        }
    }

    /// Language whose template family defines this type.
    pub fn language(&self) -> Language {
        match self {
            TransactionType::Received
            | TransactionType::Paid
            | TransactionType::Sent
            | TransactionType::Mshwari
            | TransactionType::Airtime
            | TransactionType::Withdraw
            | TransactionType::BalanceCheck => Language::English,
            _ => Language::Swahili,
        }
    }

    /// Capture-group name for a typed field of this transaction,
    /// e.g. `kutuma_amount` or `received_sender`.
    pub(crate) fn group(&self, field: &str) -> String {
        format!("{}_{}", self.name().to_ascii_lowercase(), field)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction of an M-Shwari transfer relative to the M-PESA account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MshwariDirection {
    /// Money moved from M-Shwari into M-PESA.
    From,
    /// Money moved from M-PESA into M-Shwari.
    To,
}

impl MshwariDirection {
    pub(crate) fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("from") {
            MshwariDirection::From
        } else {
            MshwariDirection::To
        }
    }
}

/// Type-specific fields of a successful transaction.
///
/// Tagged by transaction type so each category declares exactly the
/// fields its template captures; shared values (amount, timestamp,
/// balances, fees) live on the [`TransactionRecord`] envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "transaction_type")]
pub enum TransactionDetails {
    #[serde(rename = "RECEIVED")]
    Received {
        sender: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        phone: Option<String>,
    },
    #[serde(rename = "PAID")]
    Paid { payee: String },
    #[serde(rename = "SENT")]
    Sent {
        recipient: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        account: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        phone: Option<String>,
    },
    #[serde(rename = "MSHWARI")]
    Mshwari { direction: MshwariDirection },
    #[serde(rename = "AIRTIME")]
    Airtime {
        #[serde(skip_serializing_if = "Option::is_none")]
        phone: Option<String>,
    },
    #[serde(rename = "WITHDRAW")]
    Withdraw { agent: String },
    #[serde(rename = "BALANCE_CHECK")]
    BalanceCheck,
    #[serde(rename = "KUTUMA")]
    Kutuma { recipient: String, phone: String },
    #[serde(rename = "KUPOKEA")]
    Kupokea { sender: String, phone: String },
    #[serde(rename = "SALIO")]
    Salio,
    #[serde(rename = "KULIPA_TILL")]
    KulipaTill { merchant: String },
    #[serde(rename = "DATA")]
    Data,
    #[serde(rename = "MJAZO")]
    Mjazo,
    #[serde(rename = "PAYBILL")]
    Paybill { name: String, account: String },
    #[serde(rename = "KUPOKEA_BANK")]
    KupokeaBank { bank: String, account: String },
    #[serde(rename = "POCHI_LA_BIASHARA")]
    PochiLaBiashara { recipient: String },
}

impl TransactionDetails {
    /// The transaction type this detail variant belongs to.
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            TransactionDetails::Received { .. } => TransactionType::Received,
            TransactionDetails::Paid { .. } => TransactionType::Paid,
            TransactionDetails::Sent { .. } => TransactionType::Sent,
            TransactionDetails::Mshwari { .. } => TransactionType::Mshwari,
            TransactionDetails::Airtime { .. } => TransactionType::Airtime,
            TransactionDetails::Withdraw { .. } => TransactionType::Withdraw,
            TransactionDetails::BalanceCheck => TransactionType::BalanceCheck,
            TransactionDetails::Kutuma { .. } => TransactionType::Kutuma,
            TransactionDetails::Kupokea { .. } => TransactionType::Kupokea,
            TransactionDetails::Salio => TransactionType::Salio,
            TransactionDetails::KulipaTill { .. } => TransactionType::KulipaTill,
            TransactionDetails::Data => TransactionType::Data,
            TransactionDetails::Mjazo => TransactionType::Mjazo,
            TransactionDetails::Paybill { .. } => TransactionType::Paybill,
            TransactionDetails::KupokeaBank { .. } => TransactionType::KupokeaBank,
            TransactionDetails::PochiLaBiashara { .. } => TransactionType::PochiLaBiashara,
        }
    }
}

/// A successfully extracted transaction.
///
/// Constructed fresh per parse call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// 10-character confirmation code, when the marker was present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,

    /// Language variant the message was classified as.
    pub language: Language,

    /// Transaction amount; zero when the template carried no amount.
    pub amount: Decimal,

    /// Combined date + time, when both fields were captured and parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDateTime>,

    /// Raw date string, retained only when timestamp assembly failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_date: Option<String>,

    /// Raw time string, retained only when timestamp assembly failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_time: Option<String>,

    /// Running M-PESA balance, when the message reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mpesa_balance: Option<Decimal>,

    /// Fee charged for the transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_cost: Option<Decimal>,

    /// Remaining daily transaction limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_limit: Option<Decimal>,

    /// Type-specific fields, tagged with the transaction type.
    #[serde(flatten)]
    pub details: TransactionDetails,
}

impl TransactionRecord {
    /// Transaction type resolved by the ordered dispatch.
    pub fn transaction_type(&self) -> TransactionType {
        self.details.transaction_type()
    }
}

/// A recognized notification of a transaction that did not complete.
///
/// This is a classified business outcome, not a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureNotice {
    /// Language variant the message was classified as.
    pub language: Language,

    /// The exact failure phrase that matched.
    pub reason: String,

    /// The message as supplied by the caller.
    pub original_message: String,
}

/// Outcome of parsing one notification message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ParsedSms {
    /// A successful transaction with an extracted record.
    #[serde(rename = "SUCCESS")]
    Success(TransactionRecord),

    /// A recognized failed-transaction notification.
    #[serde(rename = "FAILED")]
    Failed(FailureNotice),
}

impl ParsedSms {
    /// The extracted record, when the message described a success.
    pub fn record(&self) -> Option<&TransactionRecord> {
        match self {
            ParsedSms::Success(record) => Some(record),
            ParsedSms::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ParsedSms::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_language_detection() {
        assert_eq!(Language::detect("ABC123 Confirmed. Ksh50 sent"), Language::English);
        assert_eq!(Language::detect("abc confirmed."), Language::English);
        assert_eq!(Language::detect("ABC CONFIRMED."), Language::English);
        assert_eq!(Language::detect("ABC123 Imethibitishwa"), Language::Swahili);
        assert_eq!(Language::detect(""), Language::Swahili);
    }

    #[test]
    fn test_type_group_names() {
        assert_eq!(TransactionType::Kutuma.group("amount"), "kutuma_amount");
        assert_eq!(
            TransactionType::PochiLaBiashara.group("recipient"),
            "pochi_la_biashara_recipient"
        );
        assert_eq!(TransactionType::BalanceCheck.group("amount"), "balance_check_amount");
    }

    #[test]
    fn test_success_serialization_shape() {
        let record = TransactionRecord {
            transaction_id: Some("TAD62EDKVQ".to_string()),
            language: Language::Swahili,
            amount: "1.00".parse().unwrap(),
            timestamp: NaiveDate::from_ymd_opt(2025, 1, 13)
                .unwrap()
                .and_hms_opt(17, 44, 0),
            raw_date: None,
            raw_time: None,
            mpesa_balance: Some("263.47".parse().unwrap()),
            transaction_cost: Some("0.00".parse().unwrap()),
            daily_limit: None,
            details: TransactionDetails::Kutuma {
                recipient: "John Doe".to_string(),
                phone: "0769641937".to_string(),
            },
        };

        let json = serde_json::to_value(ParsedSms::Success(record)).unwrap();
        assert_eq!(json["status"], "SUCCESS");
        assert_eq!(json["transaction_type"], "KUTUMA");
        assert_eq!(json["recipient"], "John Doe");
        assert_eq!(json["language"], "SWAHILI");
        // Degraded-timestamp fields are omitted entirely on success.
        assert!(json.get("raw_date").is_none());
    }

    #[test]
    fn test_failed_serialization_shape() {
        let parsed = ParsedSms::Failed(FailureNotice {
            language: Language::Swahili,
            reason: "Hakuna pesa za kutosha".to_string(),
            original_message: "Hakuna pesa za kutosha katika akaunti yako".to_string(),
        });

        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["status"], "FAILED");
        assert_eq!(json["reason"], "Hakuna pesa za kutosha");
    }

    #[test]
    fn test_roundtrip() {
        let parsed = ParsedSms::Failed(FailureNotice {
            language: Language::English,
            reason: "Failed. You do not have enough money".to_string(),
            original_message: "...".to_string(),
        });

        let json = serde_json::to_string(&parsed).unwrap();
        let back: ParsedSms = serde_json::from_str(&json).unwrap();
        assert_eq!(back, parsed);
    }
}
