use std::sync::LazyLock;

use regex::Regex;

use crate::parser::record::EducationEntry;

/// Text before the first pipe is the degree, the rest of the line the institution.
static EDUCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.*?)\s*\|\s*(.*)").expect("valid education regex"));

/// One entry per pipe-bearing line, anywhere in the document.
///
/// Not scoped to an Education section: the header line and every
/// work-experience line also produce entries. Callers that need precision
/// must filter downstream.
pub fn extract_education(text: &str) -> Vec<EducationEntry> {
    EDUCATION_RE
        .captures_iter(text)
        .map(|caps| EducationEntry {
            degree: caps[1].trim().to_string(),
            institution: caps[2].trim().to_string(),
        })
        .collect()
}
