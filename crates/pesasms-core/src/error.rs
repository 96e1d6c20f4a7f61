//! Error types for the pesasms-core library.

use thiserror::Error;

use crate::models::message::Language;

/// Errors raised while building the template registry.
///
/// These are construction-time faults: a registry that fails to build
/// means the template data itself is broken, not that a particular
/// message is malformed.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// An individual template failed to compile.
    #[error("failed to compile {name} template for {language}: {source}")]
    Pattern {
        language: Language,
        name: String,
        #[source]
        source: regex::Error,
    },
}

/// Terminal per-message conditions.
///
/// A recognized notification of a failed transaction is *not* an
/// error; it is returned as [`crate::models::message::ParsedSms::Failed`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input was not text (e.g. bytes that are not valid UTF-8).
    #[error("message is not valid UTF-8 text")]
    InvalidInput,

    /// No template of the classified language matched the message.
    #[error("message format not recognized ({language})")]
    UnrecognizedFormat {
        /// Language the classifier selected before matching failed.
        language: Language,
    },
}
