//! Personal info — email, phone, name, location.
//!
//! Each sub-field is its own pure function so one heuristic can be replaced
//! without touching the others. None of them fail: no match means `None`.

use std::sync::LazyLock;

use regex::Regex;

use crate::parser::record::PersonalInfo;
use crate::parser::tagger::{EntityLabel, EntitySpan};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

/// Optional 1–3 digit country code, then 3-3-4 digit groups, each optionally
/// preceded by a space, hyphen or dot.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+?\d{1,3})?[-\s.]?(\d{3})[-\s.]?(\d{3})[-\s.]?(\d{4})")
        .expect("valid phone regex")
});

pub fn extract_personal_info(text: &str, spans: &[EntitySpan]) -> PersonalInfo {
    PersonalInfo {
        name: extract_name(spans),
        email: extract_email(text),
        phone: extract_phone(text),
        location: extract_location(text),
    }
}

/// First email-shaped substring in document order, case preserved.
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

/// First phone match with separators dropped. A `+` on the country code is kept.
pub fn extract_phone(text: &str) -> Option<String> {
    let caps = PHONE_RE.captures(text)?;
    Some(
        caps.iter()
            .skip(1)
            .flatten()
            .map(|group| group.as_str())
            .collect(),
    )
}

/// First PERSON span from the tagger.
pub fn extract_name(spans: &[EntitySpan]) -> Option<String> {
    spans
        .iter()
        .find(|span| span.label == EntityLabel::Person)
        .map(|span| span.text.clone())
}

/// Second `|` segment of the first line (`Name | Location | ...`).
///
/// Positional only: whatever sits in that slot is returned.
pub fn extract_location(text: &str) -> Option<String> {
    let first_line = text.trim().lines().next()?;
    let mut segments = first_line.split('|').map(str::trim);
    segments.next()?;
    segments.next().map(str::to_string)
}
