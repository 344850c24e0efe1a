//! Patient identity extraction from recognized text.
//!
//! Each field is an ordered priority list of patterns: try alternative 1,
//! else 2, else 3, else the documented placeholder. Within one pattern,
//! the leftmost match in document order wins (regex default semantics).
//! This is deliberate and matches the production behavior: a stray 10-digit
//! lab value appearing before the labeled phone number WILL be picked up as
//! the phone (see Scenario D test below). The contract is "first plausible
//! pattern match", not "semantically verified field".

use regex::Regex;
use std::sync::LazyLock;

use crate::config::PipelineConfig;

/// Placeholder used when no name pattern matches.
pub const DEFAULT_NAME: &str = "Mr/Ms";
/// Placeholder used when no age or phone pattern matches.
pub const DEFAULT_MISSING: &str = "N/A";

/// Patient identity fields. Every field is always populated; defaults are
/// substituted when no pattern matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    pub name: String,
    pub age: String,
    pub phone: String,
}

impl ExtractedFields {
    /// The fixed field set used on the degraded path.
    pub fn degraded() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            age: DEFAULT_MISSING.to_string(),
            phone: DEFAULT_MISSING.to_string(),
        }
    }
}

// Name alternative 1: explicit label (English or Devanagari) or a titled
// prefix like "Mr." / "Dr." followed by a period.
static NAME_LABELED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\b(?:patient\s*name|name|नाम)\b[:\- ]+|\b(?:mr|mrs|ms|dr)\.\s*)([A-Za-z][A-Za-z .]{1,39})",
    )
    .unwrap()
});

// Name alternative 2: alphabetic run immediately before an Age label.
static NAME_BEFORE_AGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([A-Za-z][A-Za-z .]{1,39}?)\s+(?:age|उम्र)\b").unwrap()
});

// Name alternative 3 (configurable): any standalone alphabetic run.
static NAME_STANDALONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Za-z]{3,20})\b").unwrap());

// Keywords that terminate a captured name run. OCR output rarely breaks
// lines where the layout does, so "Name: Harish Age: 45" arrives as one run.
static NAME_STOPWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:age|sex|gender|dob|date|mobile|phone|contact|lab|report|years|yrs)\b")
        .unwrap()
});

// Age alternative 1: label-prefixed 1-3 digit number.
static AGE_LABELED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:age|उम्र)\b[:\- ]*(\d{1,3})\b").unwrap()
});

// Age alternative 2: bare number immediately followed by a years marker.
static AGE_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,3})\s*(?:years|yrs)\b").unwrap());

// Phone: single alternation so that the leftmost 10-digit run in document
// order wins whether or not it carries a label.
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:phone|mobile|contact|मोबाइल)\b(?:\s*(?:no|number)\.?)?[:\- ]*(\d{10})\b|\b(\d{10})\b",
    )
    .unwrap()
});

/// Extracts name, age, and phone from recognized text. Never fails; each
/// field independently falls back to its placeholder. Pure function of the
/// input text and config.
pub fn extract_fields(text: &str, cfg: &PipelineConfig) -> ExtractedFields {
    ExtractedFields {
        name: extract_name(text, cfg).unwrap_or_else(|| DEFAULT_NAME.to_string()),
        age: extract_age(text).unwrap_or_else(|| DEFAULT_MISSING.to_string()),
        phone: extract_phone(text).unwrap_or_else(|| DEFAULT_MISSING.to_string()),
    }
}

fn extract_name(text: &str, cfg: &PipelineConfig) -> Option<String> {
    if let Some(caps) = NAME_LABELED.captures(text) {
        if let Some(name) = clean_name(&caps[1]) {
            return Some(name);
        }
    }

    if let Some(caps) = NAME_BEFORE_AGE.captures(text) {
        if let Some(name) = clean_name(&caps[1]) {
            return Some(name);
        }
    }

    if cfg.standalone_name_fallback {
        if let Some(caps) = NAME_STANDALONE.captures(text) {
            return Some(caps[1].to_string());
        }
    }

    None
}

/// Cuts a captured name run at the first field keyword and strips stray
/// punctuation. Returns None when nothing name-like remains.
fn clean_name(raw: &str) -> Option<String> {
    let cut = match NAME_STOPWORDS.find(raw) {
        Some(m) => &raw[..m.start()],
        None => raw,
    };
    let cleaned = cut.trim_matches(|c: char| c.is_whitespace() || c == '.' || c == '-');
    if cleaned.chars().filter(|c| c.is_alphabetic()).count() >= 2 {
        Some(cleaned.to_string())
    } else {
        None
    }
}

fn extract_age(text: &str) -> Option<String> {
    if let Some(caps) = AGE_LABELED.captures(text) {
        return Some(caps[1].to_string());
    }
    if let Some(caps) = AGE_BARE.captures(text) {
        return Some(caps[1].to_string());
    }
    None
}

fn extract_phone(text: &str) -> Option<String> {
    PHONE.captures(text).map(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> PipelineConfig {
        PipelineConfig::default()
    }

    #[test]
    fn test_scenario_a_full_header() {
        let text = "Name: Harish Age: 45 Years Mobile: 9876543210 Hemoglobin: 13.5 g/dL";
        let fields = extract_fields(text, &cfg());
        assert_eq!(fields.name, "Harish");
        assert_eq!(fields.age, "45");
        assert_eq!(fields.phone, "9876543210");
    }

    #[test]
    fn test_all_fields_default_on_empty_text() {
        let fields = extract_fields("", &cfg());
        assert_eq!(fields.name, "Mr/Ms");
        assert_eq!(fields.age, "N/A");
        assert_eq!(fields.phone, "N/A");
    }

    #[test]
    fn test_devanagari_labels() {
        let text = "नाम: Ramesh Kumar उम्र: 62 मोबाइल: 9812345678";
        let fields = extract_fields(text, &cfg());
        assert_eq!(fields.name, "Ramesh Kumar");
        assert_eq!(fields.age, "62");
        assert_eq!(fields.phone, "9812345678");
    }

    #[test]
    fn test_titled_name_without_label() {
        let text = "Mr. Suresh Patel\nFasting Glucose: 110 mg/dL";
        let fields = extract_fields(text, &cfg());
        assert_eq!(fields.name, "Suresh Patel");
    }

    #[test]
    fn test_name_before_age_label() {
        let text = "Sunita Devi Age: 38 Years";
        let fields = extract_fields(text, &cfg());
        assert_eq!(fields.name, "Sunita Devi");
        assert_eq!(fields.age, "38");
    }

    #[test]
    fn test_standalone_name_fallback_toggle() {
        let text = "Hemoglobin 13.5";
        let fields = extract_fields(text, &cfg());
        // Known limitation of the fallback: the first alphabetic run wins,
        // even when it is a test name
        assert_eq!(fields.name, "Hemoglobin");

        let mut strict = cfg();
        strict.standalone_name_fallback = false;
        let fields = extract_fields(text, &strict);
        assert_eq!(fields.name, "Mr/Ms");
    }

    #[test]
    fn test_age_bare_years_fallback() {
        let fields = extract_fields("Patient is 67 years old", &cfg());
        assert_eq!(fields.age, "67");
    }

    #[test]
    fn test_age_not_taken_from_arbitrary_number() {
        let fields = extract_fields("Glucose: 110 mg/dL", &cfg());
        assert_eq!(fields.age, "N/A");
    }

    #[test]
    fn test_scenario_d_leftmost_unlabeled_phone_wins() {
        // A free-standing 10-digit lab/accession number appears before the
        // labeled phone number. Leftmost-match policy picks the earlier one.
        let text = "Sample ID 1234567890 collected.\nPhone: 9876543210";
        let fields = extract_fields(text, &cfg());
        assert_eq!(fields.phone, "1234567890");
    }

    #[test]
    fn test_labeled_phone_matches() {
        let fields = extract_fields("Mobile No: 9876543210", &cfg());
        assert_eq!(fields.phone, "9876543210");
    }

    #[test]
    fn test_phone_ignores_short_runs() {
        let fields = extract_fields("Phone: 12345", &cfg());
        assert_eq!(fields.phone, "N/A");
    }

    #[test]
    fn test_idempotent() {
        let text = "Name: Harish Age: 45 Mobile: 9876543210";
        assert_eq!(extract_fields(text, &cfg()), extract_fields(text, &cfg()));
    }
}
