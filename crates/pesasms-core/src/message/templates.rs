//! Canonical template data for both notification languages.
//!
//! Everything the registry compiles lives here as plain data: the
//! confirmation markers, the ordered transaction templates, the
//! cross-cutting additional-info templates, and the failure markers.
//! Template order is load-bearing: the combined matcher's alternation
//! and the normalizer's type dispatch both follow it, so the first
//! template in a table takes precedence over later ones.
//!
//! Capture-group naming convention: each transaction template wraps a
//! `<type>_amount` group plus `<type>_<field>` groups for its typed
//! fields; Swahili templates also capture `<type>_date` / `<type>_time`.

use crate::models::message::{Language, TransactionType};

/// Confirmation marker opening a successful English notification.
/// Also captures the 10-character transaction code.
pub const ENGLISH_MARKER: &str = r"(?P<transaction_id>[A-Z0-9]{10})\s+Confirmed\.?\s*";

/// Confirmation marker opening a successful Swahili notification.
pub const SWAHILI_MARKER: &str = r"(?P<transaction_id>[A-Z0-9]{10})\s+Imethibitishwa\.?\s*";

/// English transaction templates, in dispatch order.
pub const ENGLISH_TRANSACTIONS: &[(TransactionType, &str)] = &[
    (
        TransactionType::Received,
        r"You\shave\sreceived\sKsh(?P<received_amount>[\d,.]+)\sfrom\s(?P<received_sender>[^0-9]+?)(?:\s(?P<received_phone>\d+))?",
    ),
    (
        TransactionType::Paid,
        r"Ksh(?P<paid_amount>[\d,.]+)\spaid\sto\s(?P<paid_payee>[^.]+)",
    ),
    (
        TransactionType::Sent,
        r"Ksh(?P<sent_amount>[\d,.]+)\ssent\sto\s(?P<sent_recipient>[^0-9]+?)(?:\sfor\saccount\s(?P<sent_account>[^\s]+))?(?:\s(?P<sent_phone>\d+))?",
    ),
    (
        TransactionType::Mshwari,
        r"Ksh(?P<mshwari_amount>[\d,.]+)\stransferred\s(?P<mshwari_direction>(?:from|to))\sM-Shwari\saccount",
    ),
    (
        TransactionType::Airtime,
        r"You\sbought\sKsh(?P<airtime_amount>[\d,.]+)\sof\sairtime(?:\sfor\s(?P<airtime_phone>\d+))?",
    ),
    (
        TransactionType::Withdraw,
        r"(?:(?:on\s[^.]+?)?\s*Withdraw\s*Ksh(?P<withdraw_amount>[\d,.]+)\sfrom\s(?P<withdraw_agent>[^.]+))",
    ),
    (
        TransactionType::BalanceCheck,
        r"Your\saccount\sbalance\swas:\sM-PESA\sAccount\s:\sKsh(?P<balance_check_amount>[\d,.]+)",
    ),
];

/// Swahili transaction templates, in dispatch order.
pub const SWAHILI_TRANSACTIONS: &[(TransactionType, &str)] = &[
    (
        TransactionType::Kutuma,
        r"Ksh(?P<kutuma_amount>[\d,.]+)\simetumwa\skwa\s(?P<kutuma_recipient>[^0-9]+?)\s(?P<kutuma_phone>\d{10})\s(?:tarehe|siku)\s(?P<kutuma_date>\d{1,2}/\d{1,2}/\d{2})\ssaa\s(?P<kutuma_time>\d{1,2}:\d{2}\s*[AP]M)",
    ),
    (
        TransactionType::Kupokea,
        r"Umepokea\sKsh(?P<kupokea_amount>[\d,.]+)\skutoka\s(?P<kupokea_sender>[^0-9]+?)\s(?P<kupokea_phone>\d{10})\smnamo\s(?P<kupokea_date>\d{1,2}/\d{1,2}/\d{2})\ssaa\s(?P<kupokea_time>\d{1,2}:\d{2}\s*[AP]M)",
    ),
    (
        TransactionType::Salio,
        r"Baki\syako\sni:\sAkaunti\sya\sM-PESA\s:\sKsh(?P<salio_amount>[\d,.]+)\starehe\s(?P<salio_date>\d{1,2}/\d{1,2}/\d{2})\ssaa\s(?P<salio_time>\d{1,2}:\d{2}\s*[AP]M)",
    ),
    (
        TransactionType::KulipaTill,
        r"Umelipa\sKsh(?P<kulipa_till_amount>[\d,.]+)\skwa\s(?P<kulipa_till_merchant>[^0-9]+?)\s(?P<kulipa_till_date>\d{1,2}/\d{1,2}/\d{2})\s(?P<kulipa_till_time>\d{1,2}:\d{2}\s*[AP]M)",
    ),
    (
        TransactionType::Data,
        r"Ksh(?P<data_amount>[\d,.]+)\szimetumwa\skwa\sSAFARICOM\sDATA\sBUNDLES(?:\skwa\sakaunti\sSAFARICOM\sDATA\sBUNDLES)?\smnamo\s(?P<data_date>\d{1,2}/\d{1,2}/\d{2})\ssaa\s(?P<data_time>\d{1,2}:\d{2}\s*[AP]M)",
    ),
    (
        TransactionType::Mjazo,
        r"Umenunua\sKsh(?P<mjazo_amount>[\d,.]+)\sya\smjazo\s(?:siku|tarehe)\s(?P<mjazo_date>\d{1,2}/\d{1,2}/\d{2})\ssaa\s(?P<mjazo_time>\d{1,2}:\d{2}\s*[AP]M)",
    ),
    (
        TransactionType::Paybill,
        r"Ksh(?P<paybill_amount>[\d,.]+)\simetumwa\skwa\s(?P<paybill_name>[^k]+?)\skwa\sakaunti\snambari\s(?P<paybill_account>\d+)",
    ),
    (
        TransactionType::KupokeaBank,
        r"Umepokea\sKsh(?P<kupokea_bank_amount>[\d,.]+)\skutoka\s(?P<kupokea_bank_name>[^0-9]+?)\s(?P<kupokea_bank_account>\d+)\smnamo\s(?P<kupokea_bank_date>\d{1,2}/\d{1,2}/\d{2})\ssaa\s(?P<kupokea_bank_time>\d{1,2}:\d{2}\s*[AP]M)",
    ),
    (
        TransactionType::PochiLaBiashara,
        r"Ksh(?P<pochi_la_biashara_amount>[\d,.]+)\simetumwa\skwa\s(?P<pochi_la_biashara_recipient>[^0-9]+?)\s(?:tarehe|siku)\s(?P<pochi_la_biashara_date>\d{1,2}/\d{1,2}/\d{2})\ssaa\s(?P<pochi_la_biashara_time>\d{1,2}:\d{2}\s*[AP]M)",
    ),
];

/// Cross-cutting additional-info templates.
///
/// These may appear in a message of any transaction type and are
/// matched independently of the transaction alternation. The source
/// template family phrases them in Swahili for both languages.
pub const ADDITIONAL_TEMPLATES: &[(&str, &str)] = &[
    (
        "mpesa_balance",
        r"Baki\s(?:yako|mpya)(?:\sya|\smpya\skatika|\skatika)\sM-PESA\sni\sKsh(?P<mpesa_balance>[\d,.]+)",
    ),
    (
        "transaction_cost",
        r"Gharama\sya\s(?:kutuma|kununua|matumizi|kulipa)\sni\sKsh(?P<transaction_cost>[\d,.]+)",
    ),
    (
        "daily_limit",
        r"Kiwango\scha\sPesa\sunachoweza\skutuma\skwa\ssiku\sni\s(?P<daily_limit>[\d,.]+)",
    ),
];

/// English failure-marker template.
pub const ENGLISH_FAILURE: &str = concat!(
    r"Failed\.\s",
    r"(?:",
    r"(?:You\sdo\snot\shave\senough\smoney)|",
    r"(?:Insufficient\sfunds\sin\syour\sM-PESA\saccount)|",
    r"(?:You\shave\sinsufficient\sfunds)|",
    r"(?:Insufficient\sfunds\sin\syour\sM-PESA\saccount\sas\swell\sas\sFuliza\sM-PESA)|",
    r"(?:You\shave\sinsufficient\sfunds\sin\syour\sM-Shwari\saccount)|",
    r"(?:You\shave\sreached\syour\sFuliza\sM-PESA\slimit)|",
    r"(?:Your\sFuliza\sM-PESA\slimit\sis\snot\savailable\sat\sthis\stime)",
    r")",
);

/// Swahili failure-marker template.
pub const SWAHILI_FAILURE: &str = concat!(
    r"(?:",
    r"Hakuna\spesa\sza\skutosha|",
    r"Imefeli|",
    r"Umekataa\skuidhinisha\samali|",
    r"Huduma\shi\shaipatikani",
    r")",
);

/// Confirmation marker for a language.
pub fn confirmation_marker(language: Language) -> &'static str {
    match language {
        Language::English => ENGLISH_MARKER,
        Language::Swahili => SWAHILI_MARKER,
    }
}

/// Ordered transaction templates for a language.
pub fn transaction_templates(language: Language) -> &'static [(TransactionType, &'static str)] {
    match language {
        Language::English => ENGLISH_TRANSACTIONS,
        Language::Swahili => SWAHILI_TRANSACTIONS,
    }
}

/// Failure-marker template for a language.
pub fn failure_template(language: Language) -> &'static str {
    match language {
        Language::English => ENGLISH_FAILURE,
        Language::Swahili => SWAHILI_FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_match_their_language() {
        for (ty, _) in ENGLISH_TRANSACTIONS {
            assert_eq!(ty.language(), Language::English, "{ty}");
        }
        for (ty, _) in SWAHILI_TRANSACTIONS {
            assert_eq!(ty.language(), Language::Swahili, "{ty}");
        }
    }

    #[test]
    fn test_dispatch_order_is_stable() {
        // The precedence rule is the table order; a reordering is a
        // behavior change and must be deliberate.
        let english: Vec<_> = ENGLISH_TRANSACTIONS.iter().map(|(ty, _)| ty.name()).collect();
        assert_eq!(
            english,
            ["RECEIVED", "PAID", "SENT", "MSHWARI", "AIRTIME", "WITHDRAW", "BALANCE_CHECK"]
        );

        let swahili: Vec<_> = SWAHILI_TRANSACTIONS.iter().map(|(ty, _)| ty.name()).collect();
        assert_eq!(
            swahili,
            [
                "KUTUMA",
                "KUPOKEA",
                "SALIO",
                "KULIPA_TILL",
                "DATA",
                "MJAZO",
                "PAYBILL",
                "KUPOKEA_BANK",
                "POCHI_LA_BIASHARA"
            ]
        );
    }

    #[test]
    fn test_every_template_captures_its_amount() {
        for (ty, pattern) in ENGLISH_TRANSACTIONS.iter().chain(SWAHILI_TRANSACTIONS) {
            let group = format!("(?P<{}>", ty.group("amount"));
            assert!(pattern.contains(&group), "{ty} template misses {group}");
        }
    }
}
