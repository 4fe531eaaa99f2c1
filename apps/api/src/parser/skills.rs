use std::collections::HashSet;

/// Built-in skill catalogue. Overridable at startup via `SKILLS_CATALOGUE`.
pub const DEFAULT_SKILL_CATALOGUE: &[&str] = &[
    "python",
    "java",
    "machine learning",
    "ai",
    "tensorflow",
    "pytorch",
    "javascript",
    "react",
    "sql",
    "git",
];

pub fn default_catalogue() -> Vec<String> {
    DEFAULT_SKILL_CATALOGUE.iter().map(|s| s.to_string()).collect()
}

/// Lower-cases, trims and de-duplicates catalogue terms, dropping empties.
pub fn normalize_catalogue<I, S>(terms: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    terms
        .into_iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .collect()
}

/// Catalogue terms occurring anywhere in `text`, case-insensitively.
///
/// Plain substring test: `ai` also matches inside `maintained`, and
/// `java` inside `javascript`. No synonyms or stemming.
pub fn extract_skills(text: &str, catalogue: &[String]) -> Vec<String> {
    let haystack = text.to_lowercase();
    let mut seen = HashSet::new();
    catalogue
        .iter()
        .filter(|skill| haystack.contains(skill.to_lowercase().as_str()))
        .filter(|skill| seen.insert(skill.as_str()))
        .cloned()
        .collect()
}
