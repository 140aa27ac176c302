//! Resource curation and study-plan generation
//!
//! Both are pluggable behind async traits so a remote service can replace
//! the built-in generators:
//! - `LinkCurator`: search links for a subject across five resource kinds
//! - `WeeklyPlanner`: phased week-by-week plan with even hours
//!
//! `RateLimiter` caps how often a user may invoke either, and `TopicClaims`
//! keeps concurrent requests for one topic from curating it twice.

mod claims;
mod links;
mod planner;
mod rate_limit;

pub use claims::{TopicClaim, TopicClaims};
pub use links::LinkCurator;
pub use planner::{validate_plan_request, PlanPhase, WeeklyPlanner, MAX_HOURS_PER_WEEK, MAX_WEEKS};
pub use rate_limit::{retry_after_secs, RateLimiter};

use crate::storage::{PlanWeek, ResourceLink};
use async_trait::async_trait;

/// Longest accepted subject, in characters
pub const MAX_SUBJECT_LEN: usize = 100;

/// Produces curated links for a subject
#[async_trait]
pub trait Curator: Send + Sync {
    /// Unique name for this curator
    fn name(&self) -> &str;

    /// Build the resource set for `subject`
    async fn curate(&self, subject: &str) -> Result<Vec<ResourceLink>, CurationError>;
}

/// Produces a week-by-week study plan
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    /// Unique name for this generator
    fn name(&self) -> &str;

    async fn generate(&self, request: &PlanRequest) -> Result<Vec<PlanWeek>, CurationError>;
}

/// Input to plan generation
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub subject: String,
    pub goal: Option<String>,
    pub hours_per_week: u32,
    pub weeks: u32,
}

/// Errors from curation or planning
#[derive(Debug, thiserror::Error)]
pub enum CurationError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("Generator unavailable: {0}")]
    Unavailable(String),
}

/// Trim and check a subject line
pub fn normalize_subject(subject: &str) -> Result<String, CurationError> {
    let subject = subject.trim();
    if subject.is_empty() {
        return Err(CurationError::InvalidRequest("subject is required".to_string()));
    }
    if subject.chars().count() > MAX_SUBJECT_LEN {
        return Err(CurationError::InvalidRequest(format!(
            "subject must be at most {} characters",
            MAX_SUBJECT_LEN
        )));
    }
    Ok(subject.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_subject() {
        assert_eq!(normalize_subject("  Rust  ").unwrap(), "Rust");
        assert!(matches!(
            normalize_subject("   "),
            Err(CurationError::InvalidRequest(_))
        ));
        assert!(normalize_subject(&"x".repeat(MAX_SUBJECT_LEN + 1)).is_err());
        assert!(normalize_subject(&"x".repeat(MAX_SUBJECT_LEN)).is_ok());
    }
}
