use chrono::NaiveDate;
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
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// A client testimonial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default = "default_rating")]
    pub rating: u8,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub status: ReviewStatus,
}

impl Default for Review {
    fn default() -> Self {
        Self {
            id: EntityId::NEW,
            name: String::new(),
            company: String::new(),
            rating: default_rating(),
            review: String::new(),
            date: None,
            status: ReviewStatus::default(),
        }
    }
}

fn default_rating() -> u8 {
    5
}

impl AdminCollection for Review {
    const PATH: &'static str = "reviews";
    const NOUN: &'static str = "review";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReviewStatus>,
}
