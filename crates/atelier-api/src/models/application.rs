use chrono::{DateTime, Utc};
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
pub enum ApplicationType {
    #[default]
    Interested,
    Referral,
}

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
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewed,
    Shortlisted,
    Rejected,
}

/// A job application. List rows may omit contact details; the detail
/// endpoint always carries them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    #[serde(default)]
    pub id: EntityId,
    pub job: EntityId,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub application_type: ApplicationType,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub friend_first_name: Option<String>,
    #[serde(default)]
    pub friend_last_name: Option<String>,
    #[serde(default)]
    pub friend_email: Option<String>,
    #[serde(default)]
    pub friend_phone: Option<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default, alias = "resume")]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl JobApplication {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    /// List rows sometimes arrive without contact details.
    pub fn is_partial(&self) -> bool {
        self.email.is_empty() || self.phone.is_empty()
    }
}

impl AdminCollection for JobApplication {
    const PATH: &'static str = "job-applications";
    const NOUN: &'static str = "application";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobApplicationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
}

/// Body of the public application / referral form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub job: EntityId,
    pub application_type: ApplicationType,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friend_first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friend_last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friend_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friend_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
}
