use serde::{Deserialize, Serialize};

/// The complete structured output for one resume.
///
/// Field order is the serialisation order: personal_info, skills,
/// work_experience, education, projects, certifications. Every key is always
/// present; absence is an empty list or a null sub-field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub personal_info: PersonalInfo,
    pub skills: Vec<String>,
    pub work_experience: Vec<WorkExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExperienceEntry {
    pub job_title: String,
    pub company: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
}

impl ResumeRecord {
    /// Per-field counts, safe to log (no resume content).
    pub fn summary(&self) -> RecordSummary {
        let info = &self.personal_info;
        RecordSummary {
            personal_fields: [&info.name, &info.email, &info.phone, &info.location]
                .iter()
                .filter(|f| f.is_some())
                .count(),
            skills: self.skills.len(),
            work_experience: self.work_experience.len(),
            education: self.education.len(),
            projects: self.projects.len(),
            certifications: self.certifications.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSummary {
    pub personal_fields: usize,
    pub skills: usize,
    pub work_experience: usize,
    pub education: usize,
    pub projects: usize,
    pub certifications: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ResumeRecord {
        ResumeRecord {
            personal_info: PersonalInfo {
                name: Some("Jane Doe".to_string()),
                email: Some("jane@x.com".to_string()),
                phone: Some("5551234567".to_string()),
                location: Some("New York, NY".to_string()),
            },
            skills: vec!["python".to_string(), "sql".to_string()],
            work_experience: vec![WorkExperienceEntry {
                job_title: "Senior Data Scientist".to_string(),
                company: "ABC Technologies".to_string(),
                duration: "January 2020 - Present".to_string(),
            }],
            education: vec![EducationEntry {
                degree: "M.S. Computer Science".to_string(),
                institution: "Stanford University".to_string(),
            }],
            projects: vec![ProjectEntry {
                name: "Churn Model".to_string(),
                description: "Predicted churn with gradient boosting.".to_string(),
            }],
            certifications: vec!["AWS Certified Solutions Architect".to_string()],
        }
    }

    #[test]
    fn test_record_json_round_trip_is_identical() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let back: ResumeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_top_level_key_order_is_fixed() {
        let json = serde_json::to_string(&sample_record()).unwrap();
        let positions: Vec<usize> = [
            "\"personal_info\"",
            "\"skills\"",
            "\"work_experience\"",
            "\"education\"",
            "\"projects\"",
            "\"certifications\"",
        ]
        .iter()
        .map(|k| json.find(k).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_record_keeps_every_key() {
        let value = serde_json::to_value(ResumeRecord::default()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 6);
        assert!(obj["personal_info"]["name"].is_null());
        assert!(obj["personal_info"]["location"].is_null());
        assert_eq!(obj["skills"], serde_json::json!([]));
        assert_eq!(obj["certifications"], serde_json::json!([]));
    }

    #[test]
    fn test_summary_counts_fields() {
        let summary = sample_record().summary();
        assert_eq!(summary.personal_fields, 4);
        assert_eq!(summary.skills, 2);
        assert_eq!(summary.work_experience, 1);
        assert_eq!(summary.certifications, 1);
    }
}
