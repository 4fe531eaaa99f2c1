//! ResumeParser — runs the tagger once, then every field extractor, and
//! assembles one `ResumeRecord`.
//!
//! Extractors are independent pure functions over the same text; none sees
//! another's output. Only the tagger call can fail, and that failure is
//! returned to the caller, which decides whether a record without a name is
//! acceptable.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info_span, Instrument};
use uuid::Uuid;

use crate::parser::certifications::extract_certifications;
use crate::parser::education::extract_education;
use crate::parser::experience::extract_work_experience;
use crate::parser::personal::extract_personal_info;
use crate::parser::projects::extract_projects;
use crate::parser::record::ResumeRecord;
use crate::parser::skills::{default_catalogue, extract_skills};
use crate::parser::tagger::{EntitySpan, EntityTagger, TaggerError};

pub struct ResumeParser {
    tagger: Arc<dyn EntityTagger>,
    skill_catalogue: Vec<String>,
    tagger_timeout: Option<Duration>,
}

impl ResumeParser {
    pub fn new(tagger: Arc<dyn EntityTagger>) -> Self {
        Self {
            tagger,
            skill_catalogue: default_catalogue(),
            tagger_timeout: None,
        }
    }

    pub fn with_skill_catalogue(mut self, catalogue: Vec<String>) -> Self {
        self.skill_catalogue = catalogue;
        self
    }

    pub fn with_tagger_timeout(mut self, timeout: Duration) -> Self {
        self.tagger_timeout = Some(timeout);
        self
    }

    pub fn tagger_backend(&self) -> &'static str {
        self.tagger.backend()
    }

    /// Tags the text once, then assembles the record.
    pub async fn parse(&self, text: &str) -> Result<ResumeRecord, TaggerError> {
        let span = info_span!("parse_resume", parse_id = %Uuid::new_v4(), chars = text.len());
        async {
            let spans = self.tag(text).await?;
            Ok::<_, TaggerError>(self.assemble(text, &spans))
        }
        .instrument(span)
        .await
    }

    /// Runs the six extractors over `text` with pre-computed entity spans.
    pub fn assemble(&self, text: &str, spans: &[EntitySpan]) -> ResumeRecord {
        let record = ResumeRecord {
            personal_info: extract_personal_info(text, spans),
            skills: extract_skills(text, &self.skill_catalogue),
            work_experience: extract_work_experience(text),
            education: extract_education(text),
            projects: extract_projects(text),
            certifications: extract_certifications(text),
        };
        debug!(summary = ?record.summary(), "Resume record assembled");
        record
    }

    async fn tag(&self, text: &str) -> Result<Vec<EntitySpan>, TaggerError> {
        let spans = match self.tagger_timeout {
            Some(limit) => tokio::time::timeout(limit, self.tagger.tag(text))
                .await
                .map_err(|_| TaggerError::TimedOut(limit))??,
            None => self.tagger.tag(text).await?,
        };
        debug!(
            backend = self.tagger.backend(),
            spans = spans.len(),
            "Entity tagging complete"
        );
        Ok(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::parser::record::{PersonalInfo, ProjectEntry, WorkExperienceEntry};
    use crate::parser::tagger::{EntityLabel, RuleTagger};

    const SAMPLE_RESUME: &str = "\
Jane Doe | New York, NY | jane@x.com | 555-123-4567

## Summary
Data scientist with 6 years of Python and SQL.

## Experience
Senior Data Scientist | ABC Technologies | January 2020 - Present
- Built machine learning pipelines in TensorFlow

## Projects
### Churn Predictor
Gradient boosted model
for telecom churn.
### Resume Parser
Regex pipeline.

## Education
M.S. Computer Science | Stanford University

## Certifications
- AWS Certified Solutions Architect
";

    struct FixedTagger(Vec<EntitySpan>);

    #[async_trait]
    impl EntityTagger for FixedTagger {
        async fn tag(&self, _text: &str) -> Result<Vec<EntitySpan>, TaggerError> {
            Ok(self.0.clone())
        }

        fn backend(&self) -> &'static str {
            "fixed"
        }
    }

    struct DownTagger;

    #[async_trait]
    impl EntityTagger for DownTagger {
        async fn tag(&self, _text: &str) -> Result<Vec<EntitySpan>, TaggerError> {
            Err(TaggerError::Unavailable("model not loaded".to_string()))
        }

        fn backend(&self) -> &'static str {
            "down"
        }
    }

    struct SlowTagger;

    #[async_trait]
    impl EntityTagger for SlowTagger {
        async fn tag(&self, _text: &str) -> Result<Vec<EntitySpan>, TaggerError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Vec::new())
        }

        fn backend(&self) -> &'static str {
            "slow"
        }
    }

    fn jane_tagger() -> Arc<dyn EntityTagger> {
        Arc::new(FixedTagger(vec![
            EntitySpan::new("ABC Technologies", EntityLabel::Org),
            EntitySpan::new("Jane Doe", EntityLabel::Person),
        ]))
    }

    #[tokio::test]
    async fn test_parse_full_resume() {
        let parser = ResumeParser::new(jane_tagger());
        let record = parser.parse(SAMPLE_RESUME).await.unwrap();

        assert_eq!(
            record.personal_info,
            PersonalInfo {
                name: Some("Jane Doe".to_string()),
                email: Some("jane@x.com".to_string()),
                phone: Some("5551234567".to_string()),
                location: Some("New York, NY".to_string()),
            }
        );
        assert_eq!(
            record.work_experience,
            vec![WorkExperienceEntry {
                job_title: "Senior Data Scientist".to_string(),
                company: "ABC Technologies".to_string(),
                duration: "January 2020 - Present".to_string(),
            }]
        );
        assert_eq!(
            record.projects,
            vec![
                ProjectEntry {
                    name: "Churn Predictor".to_string(),
                    description: "Gradient boosted model for telecom churn.".to_string(),
                },
                ProjectEntry {
                    name: "Resume Parser".to_string(),
                    description: "Regex pipeline.".to_string(),
                },
            ]
        );
        assert_eq!(record.certifications, vec!["AWS Certified Solutions Architect"]);
        for skill in ["python", "sql", "machine learning", "tensorflow"] {
            assert!(record.skills.contains(&skill.to_string()), "missing {skill}");
        }
    }

    #[tokio::test]
    async fn test_education_over_matches_all_pipe_lines() {
        let parser = ResumeParser::new(jane_tagger());
        let record = parser.parse(SAMPLE_RESUME).await.unwrap();
        let degrees: Vec<&str> = record.education.iter().map(|e| e.degree.as_str()).collect();
        assert_eq!(
            degrees,
            vec!["Jane Doe", "Senior Data Scientist", "M.S. Computer Science"]
        );
        assert_eq!(
            record.education[1].institution,
            "ABC Technologies | January 2020 - Present"
        );
    }

    #[tokio::test]
    async fn test_tagger_failure_is_surfaced() {
        let parser = ResumeParser::new(Arc::new(DownTagger));
        let err = parser.parse(SAMPLE_RESUME).await.unwrap_err();
        assert!(matches!(err, TaggerError::Unavailable(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tagger_timeout_is_surfaced() {
        let parser =
            ResumeParser::new(Arc::new(SlowTagger)).with_tagger_timeout(Duration::from_secs(1));
        let err = parser.parse("Jane Doe").await.unwrap_err();
        assert!(matches!(err, TaggerError::TimedOut(d) if d == Duration::from_secs(1)));
    }

    #[test]
    fn test_assemble_without_spans_degrades_name_only() {
        let parser = ResumeParser::new(jane_tagger());
        let record = parser.assemble(SAMPLE_RESUME, &[]);
        assert_eq!(record.personal_info.name, None);
        assert_eq!(record.personal_info.email.as_deref(), Some("jane@x.com"));
        assert_eq!(record.certifications.len(), 1);
    }

    #[test]
    fn test_assemble_empty_text_yields_fully_keyed_empty_record() {
        let parser = ResumeParser::new(jane_tagger());
        assert_eq!(parser.assemble("", &[]), ResumeRecord::default());
    }

    #[test]
    fn test_custom_skill_catalogue() {
        let parser = ResumeParser::new(jane_tagger())
            .with_skill_catalogue(vec!["rust".to_string(), "go".to_string()]);
        let record = parser.assemble("Rust services", &[]);
        assert_eq!(record.skills, vec!["rust"]);
    }

    #[tokio::test]
    async fn test_rule_tagger_end_to_end() {
        let parser = ResumeParser::new(Arc::new(RuleTagger::new()));
        let record = parser.parse(SAMPLE_RESUME).await.unwrap();
        assert_eq!(record.personal_info.name.as_deref(), Some("Jane Doe"));
        assert_eq!(parser.tagger_backend(), "rules");
    }

    #[tokio::test]
    async fn test_record_round_trips_through_json() {
        let parser = ResumeParser::new(jane_tagger());
        let record = parser.parse(SAMPLE_RESUME).await.unwrap();
        let json = serde_json::to_string_pretty(&record).unwrap();
        let back: ResumeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
