//! Compiled template registry shared across parse calls.
//!
//! The registry is built once from the data in [`super::templates`]
//! and is immutable afterwards, so one instance can be shared freely
//! across threads. Construction fails fast: a template that does not
//! compile is a registry-authoring error, reported before any message
//! is parsed.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use tracing::debug;

use super::templates;
use crate::error::RegistryError;
use crate::models::message::{Language, TransactionType};

/// All named fields captured by one application of a combined matcher.
///
/// Non-participating optional groups are absent from the map, never
/// represented as empty strings. Values are trimmed of surrounding
/// whitespace on insertion.
#[derive(Debug, Clone, Default)]
pub struct RawMatch {
    fields: HashMap<String, String>,
}

impl RawMatch {
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Remove and return a field, marking it consumed.
    pub fn take(&mut self, key: &str) -> Option<String> {
        self.fields.remove(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One compiled pattern covering a whole language: optional
/// confirmation marker, the transaction alternation (each alternative
/// named by its transaction type), and every additional-info template
/// wrapped as independently optional.
#[derive(Debug)]
pub struct CombinedMatcher {
    regex: Regex,
}

impl CombinedMatcher {
    fn build(language: Language) -> Result<Self, RegistryError> {
        let marker = templates::confirmation_marker(language);

        let alternation = templates::transaction_templates(language)
            .iter()
            .map(|(ty, pattern)| format!("(?P<{}>{})", ty.name(), pattern))
            .collect::<Vec<_>>()
            .join("|");

        let trailing: String = templates::ADDITIONAL_TEMPLATES
            .iter()
            .map(|(_, pattern)| format!("(?:.*?{pattern})?"))
            .collect();

        // The marker is optional so that messages missing it (the
        // source templates do emit some without one) still dispatch
        // on the transaction alternation.
        let full = format!("(?:{marker})?({alternation}){trailing}");

        let regex = RegexBuilder::new(&full)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|source| RegistryError::Pattern {
                language,
                name: "combined".to_string(),
                source,
            })?;

        Ok(Self { regex })
    }

    /// Run a single unanchored search and collect every populated
    /// named capture group.
    pub fn extract(&self, text: &str) -> Option<RawMatch> {
        let caps = self.regex.captures(text)?;

        let mut fields = HashMap::new();
        for name in self.regex.capture_names().flatten() {
            if let Some(m) = caps.name(name) {
                fields.insert(name.to_string(), m.as_str().trim().to_string());
            }
        }

        Some(RawMatch { fields })
    }
}

/// Compiled template set for one language.
#[derive(Debug)]
pub struct TemplateSet {
    language: Language,
    order: Vec<TransactionType>,
    matcher: CombinedMatcher,
    failure: Regex,
}

impl TemplateSet {
    fn build(language: Language) -> Result<Self, RegistryError> {
        let order = templates::transaction_templates(language)
            .iter()
            .map(|(ty, _)| *ty)
            .collect();

        let matcher = CombinedMatcher::build(language)?;

        // Failure phrases keep the source template casing; they are
        // matched verbatim so the reason text is the exact phrase.
        let failure = RegexBuilder::new(templates::failure_template(language))
            .dot_matches_new_line(true)
            .build()
            .map_err(|source| RegistryError::Pattern {
                language,
                name: "failure".to_string(),
                source,
            })?;

        Ok(Self {
            language,
            order,
            matcher,
            failure,
        })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Transaction types in dispatch order; the first type whose
    /// marker group participated in a match wins.
    pub fn transaction_order(&self) -> &[TransactionType] {
        &self.order
    }

    pub fn matcher(&self) -> &CombinedMatcher {
        &self.matcher
    }

    pub fn failure_pattern(&self) -> &Regex {
        &self.failure
    }
}

/// Immutable registry holding one compiled [`TemplateSet`] per
/// supported language. Build it once at startup and pass it by
/// reference into every parse call.
#[derive(Debug)]
pub struct TemplateRegistry {
    english: TemplateSet,
    swahili: TemplateSet,
}

impl TemplateRegistry {
    /// Compile both template sets, failing on the first bad template.
    pub fn new() -> Result<Self, RegistryError> {
        let registry = Self {
            english: TemplateSet::build(Language::English)?,
            swahili: TemplateSet::build(Language::Swahili)?,
        };
        debug!(
            english_templates = registry.english.order.len(),
            swahili_templates = registry.swahili.order.len(),
            "template registry compiled"
        );
        Ok(registry)
    }

    pub fn template_set(&self, language: Language) -> &TemplateSet {
        match language {
            Language::English => &self.english,
            Language::Swahili => &self.swahili,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One message per template family, used to pin down registry
    // behavior and to prove the templates do not overlap in practice.
    const SAMPLE_CORPUS: &[&str] = &[
        "TA22OI958I Confirmed.Ksh50.00 transferred from M-Shwari account on 2/1/25 at 11:00 AM. \
         M-Shwari balance is Ksh925.46 .M-PESA balance is Ksh359.50 .Transaction cost Ksh.0.00",
        "TA27OIFCSZ Confirmed.on 2/1/25 at 11:01 AMWithdraw Ksh300.00 from 343595 - Anzal Express \
         Ltdlongonot farm along moi south lake Agg New M-PESA balance is Ksh30.50. Transaction \
         cost, Ksh29.00. Amount you can transact within the day is 498,710.00.",
        "TA22OPE6TO confirmed.You bought Ksh10.00 of airtime for 0113169506 on 2/1/25 at 11:54 AM.\
         New  balance is Ksh20.50. Transaction cost, Ksh0.00.",
        "TAD62EDKVQ Imethibitishwa Ksh1.00 imetumwa kwa John Doe 0769641937 tarehe 13/1/25 saa \
         5:44 PM. Baki yako ya M-PESA ni Ksh263.47. Gharama ya kutuma ni Ksh0.00.",
        "TAD72CZ6J3 Imethibitishwa. Baki yako ni: Akaunti ya M-PESA : Ksh263.47 Tarehe 13/1/25 \
         saa 5:36 PM. Gharama ya matumizi ni Ksh0.00.",
        "TAF5BV0XRN Umenunua Ksh5.00 ya mjazo siku 15/1/25 saa 8:44 PM.Baki mpya ya M-PESA ni \
         Ksh38.47.",
    ];

    #[test]
    fn test_registry_builds() {
        let registry = TemplateRegistry::new().unwrap();
        assert_eq!(registry.template_set(Language::English).transaction_order().len(), 7);
        assert_eq!(registry.template_set(Language::Swahili).transaction_order().len(), 9);
    }

    #[test]
    fn test_order_follows_template_tables() {
        let registry = TemplateRegistry::new().unwrap();
        let expected: Vec<_> = templates::transaction_templates(Language::Swahili)
            .iter()
            .map(|(ty, _)| *ty)
            .collect();
        assert_eq!(registry.template_set(Language::Swahili).transaction_order(), expected);
    }

    #[test]
    fn test_extract_collects_only_populated_groups() {
        let registry = TemplateRegistry::new().unwrap();
        let set = registry.template_set(Language::Swahili);

        let raw = set.matcher().extract(SAMPLE_CORPUS[3]).unwrap();
        assert!(raw.contains("KUTUMA"));
        assert_eq!(raw.get("kutuma_amount"), Some("1.00"));
        assert_eq!(raw.get("kutuma_recipient"), Some("John Doe"));
        assert_eq!(raw.get("kutuma_phone"), Some("0769641937"));
        assert_eq!(raw.get("transaction_id"), Some("TAD62EDKVQ"));
        assert_eq!(raw.get("mpesa_balance"), Some("263.47"));
        // Groups for other alternatives must be absent, not empty.
        assert!(!raw.contains("KUPOKEA"));
        assert!(!raw.contains("paybill_account"));
        assert!(!raw.contains("daily_limit"));
    }

    #[test]
    fn test_marker_is_optional() {
        let registry = TemplateRegistry::new().unwrap();
        let set = registry.template_set(Language::Swahili);

        let raw = set.matcher().extract(SAMPLE_CORPUS[5]).unwrap();
        assert!(raw.contains("MJAZO"));
        assert!(!raw.contains("transaction_id"));
        assert_eq!(raw.get("mpesa_balance"), Some("38.47"));
    }

    #[test]
    fn test_no_match_yields_none() {
        let registry = TemplateRegistry::new().unwrap();
        let set = registry.template_set(Language::Swahili);
        assert!(set.matcher().extract("completely unrelated text").is_none());
    }

    /// The templates are written to be mutually exclusive but nothing
    /// in the combined alternation enforces that; assert it on the
    /// corpus so an overlapping new template fails loudly here instead
    /// of silently losing to dispatch order.
    #[test]
    fn test_corpus_templates_never_co_match() {
        for message in SAMPLE_CORPUS {
            let language = Language::detect(message);
            let matching: Vec<_> = templates::transaction_templates(language)
                .iter()
                .filter(|(_, pattern)| {
                    RegexBuilder::new(pattern)
                        .case_insensitive(true)
                        .dot_matches_new_line(true)
                        .build()
                        .unwrap()
                        .is_match(message)
                })
                .map(|(ty, _)| *ty)
                .collect();

            assert!(
                matching.len() <= 1,
                "templates {matching:?} co-match message: {message}"
            );
        }
    }
}
