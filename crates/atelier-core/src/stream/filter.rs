// ── List filtering ──
//
// Search + status predicates applied to store snapshots on every read.

use crate::model::{Job, Resource};

/// Search term plus optional status filter for one list view.
#[derive(Debug, Clone)]
pub struct Query<S> {
    pub search: String,
    pub status: Option<S>,
}

impl<S> Default for Query<S> {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: None,
        }
    }
}

impl<S: Copy + Eq> Query<S> {
    /// `true` when either the search term or the status filter narrows the
    /// list, i.e. visible indices no longer match server order.
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.status.is_some()
    }

    pub fn matches<T>(&self, entity: &T) -> bool
    where
        T: Resource<Status = S>,
    {
        if let Some(status) = self.status {
            if entity.status() != status {
                return false;
            }
        }
        contains_term(&entity.search_fields(), &self.search)
    }
}

/// Public careers search: title, location, type or department.
pub fn career_matches(job: &Job, term: &str) -> bool {
    let job_type = job.job_type.to_string();
    contains_term(
        &[
            job.title.as_str(),
            job.location.as_str(),
            job_type.as_str(),
            job.department.as_str(),
        ],
        term,
    )
}

fn contains_term(fields: &[&str], term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    fields.iter().any(|f| f.to_lowercase().contains(&term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Blog, BlogStatus, JobType};

    fn blog(title: &str, author: &str, status: BlogStatus) -> Blog {
        Blog {
            title: title.into(),
            author: author.into(),
            status,
            ..Blog::default()
        }
    }

    #[test]
    fn empty_query_matches_everything() {
        let q = Query::<BlogStatus>::default();
        assert!(!q.is_active());
        assert!(q.matches(&blog("", "", BlogStatus::Draft)));
    }

    #[test]
    fn search_is_case_insensitive_over_search_fields() {
        let q = Query {
            search: "MARKETING".into(),
            status: None,
        };
        assert!(q.matches(&blog("Digital marketing trends", "Admin", BlogStatus::Draft)));
        assert!(!q.matches(&Blog {
            excerpt: "marketing".into(),
            ..blog("SEO tips", "Admin", BlogStatus::Draft)
        }));
    }

    #[test]
    fn status_filter_intersects_search() {
        let q = Query {
            search: "admin".into(),
            status: Some(BlogStatus::Published),
        };
        assert!(q.is_active());
        assert!(q.matches(&blog("A", "Admin", BlogStatus::Published)));
        assert!(!q.matches(&blog("A", "Admin", BlogStatus::Draft)));
    }

    #[test]
    fn careers_match_type_and_location() {
        let job = Job {
            title: "Frontend Developer".into(),
            location: "Bangalore".into(),
            department: "Engineering".into(),
            job_type: JobType::PartTime,
            ..Job::default()
        };
        assert!(career_matches(&job, "part-time"));
        assert!(career_matches(&job, "bangalore"));
        assert!(career_matches(&job, "  "));
        assert!(!career_matches(&job, "design"));
    }
}
