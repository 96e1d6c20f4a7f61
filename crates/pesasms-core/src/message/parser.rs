//! The extraction pipeline: classify language, detect failure
//! notifications, run the combined matcher, normalize.

use tracing::debug;

use super::normalize::normalize;
use super::registry::TemplateRegistry;
use crate::error::{ParseError, RegistryError};
use crate::models::message::{FailureNotice, Language, ParsedSms};

/// Parser over an immutable [`TemplateRegistry`].
///
/// Parsing is a synchronous pure function of the input text, so one
/// parser instance can be shared across threads without locking.
#[derive(Debug)]
pub struct SmsParser {
    registry: TemplateRegistry,
}

impl SmsParser {
    /// Build a parser with a freshly compiled registry.
    pub fn new() -> Result<Self, RegistryError> {
        Ok(Self::with_registry(TemplateRegistry::new()?))
    }

    /// Build a parser around an already-compiled registry.
    pub fn with_registry(registry: TemplateRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Parse one notification message.
    ///
    /// The failure check runs before the success-path matcher and
    /// takes priority wherever both could apply: a multi-part message
    /// carrying both a success-shaped prefix and an embedded failure
    /// phrase is classified as failed.
    pub fn parse(&self, message: &str) -> Result<ParsedSms, ParseError> {
        let language = Language::detect(message);
        let set = self.registry.template_set(language);

        if let Some(failure) = set.failure_pattern().find(message) {
            debug!(%language, reason = failure.as_str(), "failure marker matched");
            return Ok(ParsedSms::Failed(FailureNotice {
                language,
                reason: failure.as_str().to_string(),
                original_message: message.to_string(),
            }));
        }

        let raw = set
            .matcher()
            .extract(message)
            .ok_or(ParseError::UnrecognizedFormat { language })?;

        debug!(%language, fields = raw.len(), "combined matcher fired");

        normalize(language, set.transaction_order(), raw)
            .map(ParsedSms::Success)
            .ok_or(ParseError::UnrecognizedFormat { language })
    }

    /// Parse a raw byte payload, rejecting non-text input.
    pub fn parse_bytes(&self, raw: &[u8]) -> Result<ParsedSms, ParseError> {
        let message = std::str::from_utf8(raw).map_err(|_| ParseError::InvalidInput)?;
        self.parse(message)
    }
}
