use serde::{Deserialize, Serialize};

use super::{AdminCollection, EntityId};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum JobStatus {
    Active,
    #[default]
    Inactive,
}

/// Employment type of a posting.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Internship,
}

/// A job posting. The public site addresses postings by `slug`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub company: String,
    #[serde(default, alias = "careerArea")]
    pub department: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type", default)]
    pub job_type: JobType,
    #[serde(default)]
    pub experience: String,
    #[serde(default, alias = "jobDescription")]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub applications: u32,
}

impl AdminCollection for Job {
    const PATH: &'static str = "jobs";
    const NOUN: &'static str = "job";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_sends_only_changed_fields() {
        let patch = JobPatch {
            title: Some("Motion Designer".into()),
            job_type: Some(JobType::PartTime),
            requirements: Some(vec!["After Effects".into(), "Figma".into()]),
            ..JobPatch::default()
        };
        insta::assert_json_snapshot!(patch, @r#"
        {
          "title": "Motion Designer",
          "type": "part-time",
          "requirements": [
            "After Effects",
            "Figma"
          ]
        }
        "#);
    }

    #[test]
    fn job_accepts_legacy_field_names() {
        let job: Job = serde_json::from_str(
            r#"{
                "id": 7,
                "title": "SEO Lead",
                "slug": "seo-lead",
                "careerArea": "Marketing",
                "type": "contract",
                "jobDescription": "Own organic growth.",
                "status": "active"
            }"#,
        )
        .unwrap_or_default();
        insta::assert_json_snapshot!(job, @r#"
        {
          "id": 7,
          "title": "SEO Lead",
          "slug": "seo-lead",
          "company": "",
          "department": "Marketing",
          "location": "",
          "type": "contract",
          "experience": "",
          "description": "Own organic growth.",
          "requirements": [],
          "status": "active",
          "applications": 0
        }
        "#);
    }
}
