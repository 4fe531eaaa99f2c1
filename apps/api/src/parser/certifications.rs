use std::sync::LazyLock;

use regex::Regex;

/// A `- ` bullet whose text contains the case-sensitive word `Certified`.
static CERTIFICATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*- (.*?Certified.*)$").expect("valid certification regex")
});

/// Bullet text after the dash, in document order.
pub fn extract_certifications(text: &str) -> Vec<String> {
    CERTIFICATION_RE
        .captures_iter(text)
        .map(|caps| caps[1].trim_end().to_string())
        .collect()
}
