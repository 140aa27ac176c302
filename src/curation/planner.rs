//! Built-in plan generator: phased weekly plan
//!
//! The last week (for plans of two weeks or more) is always review. The
//! remaining weeks are split into thirds: fundamentals, practice, projects.
//! Every week gets the full `hours_per_week`.

use super::{normalize_subject, CurationError, PlanGenerator, PlanRequest};
use crate::storage::PlanWeek;
use async_trait::async_trait;

pub const MAX_WEEKS: u32 = 52;
pub const MAX_HOURS_PER_WEEK: u32 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanPhase {
    Fundamentals,
    Practice,
    Projects,
    Review,
}

impl PlanPhase {
    pub fn title(self) -> &'static str {
        match self {
            PlanPhase::Fundamentals => "Fundamentals",
            PlanPhase::Practice => "Practice",
            PlanPhase::Projects => "Projects",
            PlanPhase::Review => "Review",
        }
    }

    /// Phase for 0-based week `index` of a `total`-week plan
    pub fn for_week(index: u32, total: u32) -> Self {
        if total >= 2 && index == total - 1 {
            return PlanPhase::Review;
        }
        let span = total.saturating_sub(1).max(1);
        match index * 3 / span {
            0 => PlanPhase::Fundamentals,
            1 => PlanPhase::Practice,
            _ => PlanPhase::Projects,
        }
    }

    fn tasks(self, subject: &str, goal: Option<&str>) -> Vec<String> {
        match self {
            PlanPhase::Fundamentals => vec![
                format!("Survey the core concepts of {}", subject),
                format!("Read an introductory guide to {}", subject),
                "Write summary notes for each concept".to_string(),
            ],
            PlanPhase::Practice => vec![
                format!("Work through practice problems in {}", subject),
                "Revisit notes for concepts that felt shaky".to_string(),
                "Time one focused session on the hardest topic".to_string(),
            ],
            PlanPhase::Projects => vec![
                format!("Build a small project using {}", subject),
                match goal {
                    Some(goal) => format!("Apply what you learned toward: {}", goal),
                    None => "Apply what you learned to a real problem".to_string(),
                },
                "Document what worked and what didn't".to_string(),
            ],
            PlanPhase::Review => vec![
                format!("Review all {} notes", subject),
                "Redo the problems you got wrong".to_string(),
                "Self-test without references".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WeeklyPlanner;

impl WeeklyPlanner {
    pub fn new() -> Self {
        Self
    }
}

/// Check subject, week count and weekly hours; returns the trimmed subject
pub fn validate_plan_request(request: &PlanRequest) -> Result<String, CurationError> {
    let subject = normalize_subject(&request.subject)?;

    if request.weeks == 0 || request.weeks > MAX_WEEKS {
        return Err(CurationError::InvalidRequest(format!(
            "weeks must be between 1 and {}",
            MAX_WEEKS
        )));
    }
    if request.hours_per_week == 0 || request.hours_per_week > MAX_HOURS_PER_WEEK {
        return Err(CurationError::InvalidRequest(format!(
            "hoursPerWeek must be between 1 and {}",
            MAX_HOURS_PER_WEEK
        )));
    }

    Ok(subject)
}

#[async_trait]
impl PlanGenerator for WeeklyPlanner {
    fn name(&self) -> &str {
        "weekly"
    }

    async fn generate(&self, request: &PlanRequest) -> Result<Vec<PlanWeek>, CurationError> {
        let subject = validate_plan_request(request)?;
        let goal = request.goal.as_deref().map(str::trim).filter(|g| !g.is_empty());

        let weeks = (0..request.weeks)
            .map(|index| {
                let phase = PlanPhase::for_week(index, request.weeks);
                PlanWeek {
                    week: index + 1,
                    focus: format!("{}: {}", phase.title(), subject),
                    tasks: phase.tasks(&subject, goal),
                    hours: request.hours_per_week,
                }
            })
            .collect();

        tracing::debug!(subject = %subject, weeks = request.weeks, "Generated study plan");

        Ok(weeks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(weeks: u32, hours_per_week: u32) -> PlanRequest {
        PlanRequest {
            subject: "Statistics".to_string(),
            goal: Some("pass the final".to_string()),
            hours_per_week,
            weeks,
        }
    }

    fn phases(total: u32) -> Vec<PlanPhase> {
        (0..total).map(|i| PlanPhase::for_week(i, total)).collect()
    }

    #[test]
    fn test_phase_layout() {
        use PlanPhase::*;
        assert_eq!(phases(1), vec![Fundamentals]);
        assert_eq!(phases(2), vec![Fundamentals, Review]);
        assert_eq!(phases(4), vec![Fundamentals, Practice, Projects, Review]);
        assert_eq!(
            phases(10),
            vec![
                Fundamentals, Fundamentals, Fundamentals, Practice, Practice, Practice, Projects,
                Projects, Projects, Review
            ]
        );
    }

    #[tokio::test]
    async fn test_generate_assigns_even_hours() {
        let weeks = WeeklyPlanner::new().generate(&request(6, 8)).await.unwrap();

        assert_eq!(weeks.len(), 6);
        assert!(weeks.iter().all(|w| w.hours == 8));
        assert_eq!(weeks.iter().map(|w| w.week).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(weeks[0].focus, "Fundamentals: Statistics");
        assert_eq!(weeks[5].focus, "Review: Statistics");
        assert!(weeks
            .iter()
            .any(|w| w.tasks.iter().any(|t| t.contains("pass the final"))));
    }

    #[tokio::test]
    async fn test_generate_rejects_out_of_range() {
        let planner = WeeklyPlanner::new();
        assert!(planner.generate(&request(0, 5)).await.is_err());
        assert!(planner.generate(&request(53, 5)).await.is_err());
        assert!(planner.generate(&request(4, 0)).await.is_err());
        assert!(planner.generate(&request(4, 81)).await.is_err());
        assert!(planner.generate(&request(52, 80)).await.is_ok());
    }
}
