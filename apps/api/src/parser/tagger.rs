//! Entity tagger — the named-entity capability the parser consumes as a black box.
//!
//! `ResumeParser` holds an `Arc<dyn EntityTagger>` built once in `main` and
//! shared read-only by every parse call.
//!
//! Backends:
//! - `RuleTagger` (default): offline gazetteer + capitalisation heuristics.
//! - `LlmTagger`: asks the hosted model for labelled spans via `LlmClient`.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use tracing::debug;

use crate::llm_client::prompts::{ENTITY_TAG_PROMPT_TEMPLATE, ENTITY_TAG_SYSTEM};
use crate::llm_client::LlmClient;

/// Label attached to a tagged span. Serialised with the conventional NER tag names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityLabel {
    Person,
    Org,
    Location,
    Date,
    Other(String),
}

impl EntityLabel {
    pub fn as_tag(&self) -> &str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Org => "ORG",
            EntityLabel::Location => "GPE",
            EntityLabel::Date => "DATE",
            EntityLabel::Other(tag) => tag,
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "PERSON" | "PER" => EntityLabel::Person,
            "ORG" | "ORGANIZATION" => EntityLabel::Org,
            "GPE" | "LOC" | "LOCATION" => EntityLabel::Location,
            "DATE" => EntityLabel::Date,
            _ => EntityLabel::Other(tag.trim().to_string()),
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl Serialize for EntityLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

impl<'de> Deserialize<'de> for EntityLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(EntityLabel::from_tag(&tag))
    }
}

/// A labelled span of the source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: EntityLabel,
}

impl EntitySpan {
    pub fn new(text: impl Into<String>, label: EntityLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// The one failure the parser surfaces instead of degrading silently:
/// without a tagger, name extraction is impossible.
#[derive(Debug, Error)]
pub enum TaggerError {
    #[error("Entity tagger unavailable: {0}")]
    Unavailable(String),

    #[error("Entity tagger timed out after {0:?}")]
    TimedOut(Duration),
}

#[async_trait]
pub trait EntityTagger: Send + Sync {
    /// Returns labelled spans in document order.
    async fn tag(&self, text: &str) -> Result<Vec<EntitySpan>, TaggerError>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// RuleTagger — offline default
// ────────────────────────────────────────────────────────────────────────────

const MIN_NAME_WORDS: usize = 2;
const MAX_NAME_WORDS: usize = 3;

/// Capitalised words that never form part of a person name.
const NON_NAME_WORDS: &[&str] = &[
    // months and ranges
    "january", "february", "march", "april", "may", "june", "july", "august",
    "september", "october", "november", "december", "present", "current",
    // section headings
    "resume", "curriculum", "vitae", "summary", "profile", "objective", "contact",
    "experience", "work", "employment", "history", "education", "skills",
    "technical", "projects", "project", "certifications", "certification",
    "awards", "publications", "languages", "interests", "references",
    // job titles
    "senior", "junior", "lead", "principal", "staff", "chief", "head", "intern",
    "engineer", "developer", "scientist", "analyst", "manager", "director",
    "consultant", "architect", "designer", "administrator", "specialist",
    "software", "data", "machine", "learning", "research", "product", "full",
    "stack", "backend", "frontend", "web", "cloud", "security",
    // degrees and institutions
    "bachelor", "bachelors", "master", "masters", "doctor", "science", "arts",
    "engineering", "computer", "business", "administration", "university",
    "college", "institute", "school", "academy",
    // organisations
    "inc", "llc", "ltd", "corp", "corporation", "company", "technologies",
    "technology", "solutions", "systems", "labs", "group", "partners",
    "services", "consulting", "analytics", "certified", "professional",
    // places
    "new", "san", "los", "las", "santa", "north", "south", "east", "west",
    "united", "states", "kingdom", "city", "remote",
];

/// Trailing words that mark a segment as an organisation.
const ORG_SUFFIXES: &[&str] = &[
    "inc", "llc", "ltd", "corp", "corporation", "company", "technologies",
    "technology", "solutions", "systems", "labs", "group", "university",
    "college", "institute", "school", "academy", "analytics", "consulting",
];

const SEGMENT_SEPARATORS: &[char] = &['|', ',', ';', '\t', '•', '·'];

/// Heuristic tagger: a delimited segment made only of 2–3 capitalised
/// alphabetic words outside the stop-word gazetteer is a PERSON; a segment
/// ending in an organisation suffix is an ORG.
pub struct RuleTagger {
    non_name_words: HashSet<&'static str>,
    org_suffixes: HashSet<&'static str>,
}

impl RuleTagger {
    pub fn new() -> Self {
        Self {
            non_name_words: NON_NAME_WORDS.iter().copied().collect(),
            org_suffixes: ORG_SUFFIXES.iter().copied().collect(),
        }
    }

    /// Synchronous tagging pass; `tag` wraps this.
    pub fn tag_sync(&self, text: &str) -> Vec<EntitySpan> {
        let mut spans = Vec::new();
        for line in text.lines() {
            let line = strip_markup(line);
            for segment in line.split(SEGMENT_SEPARATORS) {
                let segment = segment.trim();
                if segment.is_empty() {
                    continue;
                }
                if self.is_person_name(segment) {
                    spans.push(EntitySpan::new(segment, EntityLabel::Person));
                } else if self.is_org_name(segment) {
                    spans.push(EntitySpan::new(segment, EntityLabel::Org));
                }
            }
        }
        spans
    }

    fn is_person_name(&self, segment: &str) -> bool {
        let words: Vec<&str> = segment.split_whitespace().collect();
        (MIN_NAME_WORDS..=MAX_NAME_WORDS).contains(&words.len())
            && words.iter().all(|w| {
                is_capitalised_word(w)
                    && !self
                        .non_name_words
                        .contains(w.trim_end_matches('.').to_lowercase().as_str())
            })
    }

    fn is_org_name(&self, segment: &str) -> bool {
        let words: Vec<&str> = segment.split_whitespace().collect();
        if words.len() < 2 || !words.iter().all(|w| starts_uppercase(w)) {
            return false;
        }
        words
            .last()
            .map(|w| {
                let w = w.trim_end_matches('.').to_lowercase();
                self.org_suffixes.contains(w.as_str())
            })
            .unwrap_or(false)
    }
}

impl Default for RuleTagger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntityTagger for RuleTagger {
    async fn tag(&self, text: &str) -> Result<Vec<EntitySpan>, TaggerError> {
        Ok(self.tag_sync(text))
    }

    fn backend(&self) -> &'static str {
        "rules"
    }
}

/// Drops markdown heading/bullet markers and emphasis from a line.
fn strip_markup(line: &str) -> String {
    line.trim_start()
        .trim_start_matches(['#', '-', '*', '>', '+'])
        .replace(['*', '_'], "")
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().map(|c| c.is_uppercase()).unwrap_or(false)
}

/// `Jane`, `O'Neil`, `Smith-Jones`, `J.` — but not `NY` or `iOS`.
fn is_capitalised_word(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_uppercase() {
        return false;
    }
    let rest: Vec<char> = chars.collect();
    if rest == ['.'] {
        return true;
    }
    rest.iter().any(|c| c.is_lowercase())
        && rest
            .iter()
            .all(|c| c.is_alphabetic() || *c == '\'' || *c == '-')
}

// ────────────────────────────────────────────────────────────────────────────
// LlmTagger — hosted model backend
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct LlmEntities {
    #[serde(default)]
    entities: Vec<EntitySpan>,
}

pub struct LlmTagger {
    llm: LlmClient,
}

impl LlmTagger {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl EntityTagger for LlmTagger {
    async fn tag(&self, text: &str) -> Result<Vec<EntitySpan>, TaggerError> {
        let prompt = ENTITY_TAG_PROMPT_TEMPLATE.replace("{resume_text}", text);
        let response: LlmEntities = self
            .llm
            .call_json(&prompt, ENTITY_TAG_SYSTEM)
            .await
            .map_err(|e| TaggerError::Unavailable(e.to_string()))?;

        let total = response.entities.len();
        let spans = order_by_document_position(text, response.entities);
        debug!(
            returned = total,
            kept = spans.len(),
            "LLM tagger returned entities"
        );
        Ok(spans)
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

/// Drops spans that do not occur in `text` and sorts the rest by first occurrence.
fn order_by_document_position(text: &str, spans: Vec<EntitySpan>) -> Vec<EntitySpan> {
    let mut located: Vec<(usize, EntitySpan)> = spans
        .into_iter()
        .filter_map(|span| {
            let needle = span.text.trim();
            if needle.is_empty() {
                return None;
            }
            text.find(needle).map(|pos| {
                (
                    pos,
                    EntitySpan {
                        text: needle.to_string(),
                        label: span.label,
                    },
                )
            })
        })
        .collect();
    located.sort_by_key(|(pos, _)| *pos);
    located.into_iter().map(|(_, span)| span).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persons(spans: &[EntitySpan]) -> Vec<&str> {
        spans
            .iter()
            .filter(|s| s.label == EntityLabel::Person)
            .map(|s| s.text.as_str())
            .collect()
    }

    #[test]
    fn test_rule_tagger_finds_name_on_header_line() {
        let tagger = RuleTagger::new();
        let spans = tagger.tag_sync("Jane Doe | New York, NY | jane@x.com | 555-123-4567\n");
        assert_eq!(persons(&spans), vec!["Jane Doe"]);
    }

    #[test]
    fn test_rule_tagger_strips_markdown_heading() {
        let tagger = RuleTagger::new();
        let spans = tagger.tag_sync("# John Q. Public\n## Experience\n");
        assert_eq!(persons(&spans), vec!["John Q. Public"]);
    }

    #[test]
    fn test_rule_tagger_ignores_titles_and_dates() {
        let tagger = RuleTagger::new();
        let spans = tagger.tag_sync(
            "Senior Data Scientist | ABC Technologies | January 2020 - Present\nWork Experience\n",
        );
        assert!(persons(&spans).is_empty());
    }

    #[test]
    fn test_rule_tagger_labels_organisations() {
        let tagger = RuleTagger::new();
        let spans = tagger.tag_sync("Senior Data Scientist | ABC Technologies | 2020\n");
        assert!(spans
            .iter()
            .any(|s| s.label == EntityLabel::Org && s.text == "ABC Technologies"));
    }

    #[test]
    fn test_rule_tagger_rejects_all_caps_and_long_runs() {
        let tagger = RuleTagger::new();
        assert!(tagger.tag_sync("AWS GCP\n").is_empty());
        assert!(persons(&tagger.tag_sync("Alice Bob Carol Dave\n")).is_empty());
    }

    #[test]
    fn test_rule_tagger_keeps_document_order() {
        let tagger = RuleTagger::new();
        let spans = tagger.tag_sync("Jane Doe\nReferences: John Smith\n");
        assert_eq!(persons(&spans), vec!["Jane Doe"]);
        let spans = tagger.tag_sync("Jane Doe\nJohn Smith\n");
        assert_eq!(persons(&spans), vec!["Jane Doe", "John Smith"]);
    }

    #[test]
    fn test_label_tags_round_trip() {
        for label in [
            EntityLabel::Person,
            EntityLabel::Org,
            EntityLabel::Location,
            EntityLabel::Date,
            EntityLabel::Other("NORP".to_string()),
        ] {
            assert_eq!(EntityLabel::from_tag(label.as_tag()), label);
        }
        assert_eq!(EntityLabel::from_tag("per"), EntityLabel::Person);
    }

    #[test]
    fn test_span_deserializes_from_llm_json() {
        let json = r#"{"entities": [{"text": "Jane Doe", "label": "PERSON"}, {"text": "Acme", "label": "ORG"}]}"#;
        let parsed: LlmEntities = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.entities[0].label, EntityLabel::Person);
        assert_eq!(parsed.entities[1].label, EntityLabel::Org);
    }

    #[test]
    fn test_order_by_document_position_drops_hallucinated_spans() {
        let text = "Built at Acme for Jane Doe";
        let spans = vec![
            EntitySpan::new("Jane Doe", EntityLabel::Person),
            EntitySpan::new("Nobody Here", EntityLabel::Person),
            EntitySpan::new(" Acme ", EntityLabel::Org),
        ];
        let ordered = order_by_document_position(text, spans);
        assert_eq!(ordered.len(), 2);
        assert_eq!(ordered[0].text, "Acme");
        assert_eq!(ordered[1].text, "Jane Doe");
    }

    #[tokio::test]
    async fn test_rule_tagger_trait_object() {
        let tagger: Box<dyn EntityTagger> = Box::new(RuleTagger::default());
        let spans = tagger.tag("Jane Doe\n").await.unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(tagger.backend(), "rules");
    }

    #[tokio::test]
    async fn test_llm_tagger_reports_unreachable_endpoint_as_unavailable() {
        let llm = LlmClient::new("test-key".to_string(), Duration::from_secs(2))
            .unwrap()
            .with_endpoint("http://127.0.0.1:9/v1/messages");
        let tagger = LlmTagger::new(llm);

        let err = tagger.tag("Jane Doe\n").await.unwrap_err();
        assert!(matches!(err, TaggerError::Unavailable(_)));
        assert_eq!(tagger.backend(), "llm");
    }
}
