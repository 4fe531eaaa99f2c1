use std::sync::LazyLock;

use regex::Regex;

use crate::parser::record::WorkExperienceEntry;

/// `<title> | <company> | <Word YYYY> - <Word[ YYYY]>`
///
/// The date words are any alphabetic token, not validated months, so
/// `Spring 2019 - Fall 2020` matches too. The end year is optional so that
/// ongoing ranges (`January 2020 - Present`) are captured.
static EXPERIENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(.*?)\s*\|\s*(.*?)\s*\|\s*([A-Za-z]+\s+\d{4}\s*-\s*[A-Za-z]+(?:[ \t]+\d{4})?)",
    )
    .expect("valid experience regex")
});

/// Every non-overlapping match anywhere in the text, in document order.
pub fn extract_work_experience(text: &str) -> Vec<WorkExperienceEntry> {
    EXPERIENCE_RE
        .captures_iter(text)
        .map(|caps| WorkExperienceEntry {
            job_title: caps[1].trim().to_string(),
            company: caps[2].trim().to_string(),
            duration: caps[3].trim().to_string(),
        })
        .collect()
}
