use serde::{Deserialize, Serialize};

/// Aggregate counters shown on the back-office dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default, alias = "totalBlogs")]
    pub total_blogs: u64,
    #[serde(default, alias = "totalServices")]
    pub total_services: u64,
    #[serde(default, alias = "totalEnquiries")]
    pub total_enquiries: u64,
    #[serde(default, alias = "totalReviews")]
    pub total_reviews: u64,
    #[serde(default, alias = "totalCareers", alias = "total_jobs")]
    pub total_careers: u64,
    #[serde(default, alias = "totalApplications")]
    pub total_applications: u64,
}
