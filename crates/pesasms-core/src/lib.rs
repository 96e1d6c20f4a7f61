//! Core library for parsing M-PESA notification messages.
//!
//! This crate provides:
//! - A compiled, immutable template registry for the English and
//!   Swahili notification template families
//! - Language classification and failed-transaction detection
//! - Field extraction via one combined matcher per language
//! - Normalization into typed transaction records (decimal amounts,
//!   combined timestamps, per-type detail fields)
//!
//! ```
//! use pesasms_core::{ParsedSms, SmsParser};
//!
//! let parser = SmsParser::new().expect("built-in templates compile");
//! let parsed = parser
//!     .parse("Hakuna pesa za kutosha katika akaunti yako ya M-PESA.")
//!     .unwrap();
//! assert!(matches!(parsed, ParsedSms::Failed(_)));
//! ```

pub mod error;
pub mod message;
pub mod models;

pub use error::{ParseError, RegistryError};
pub use message::{
    CombinedMatcher, RawMatch, SmsParser, TemplateRegistry, TemplateSet, clean_amount,
    combine_timestamp,
};
pub use models::message::{
    FailureNotice, Language, MshwariDirection, ParsedSms, TransactionDetails, TransactionRecord,
    TransactionType,
};
