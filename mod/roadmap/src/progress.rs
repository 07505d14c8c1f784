//! Milestone-progress aggregation.
//!
//! The single place that turns a milestone checklist into its stored
//! percentage. Every mutation path calls this — inlining the formula at
//! call sites is exactly how rounding drifts between endpoints.

use crate::model::Milestone;

/// Percentage of completed milestones, rounded to the nearest whole
/// percent. An empty checklist is 0%, not a division error.
pub fn milestone_progress(milestones: &[Milestone]) -> u8 {
    if milestones.is_empty() {
        return 0;
    }
    let completed = milestones.iter().filter(|m| m.completed).count();
    (100.0 * completed as f64 / milestones.len() as f64).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milestones(flags: &[bool]) -> Vec<Milestone> {
        flags
            .iter()
            .map(|&completed| Milestone {
                title: "step".to_string(),
                description: None,
                completed,
                due_date: None,
                skills: Vec::new(),
            })
            .collect()
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(milestone_progress(&[]), 0);
    }

    #[test]
    fn test_exact_quarters() {
        assert_eq!(milestone_progress(&milestones(&[true, true, true, false])), 75);
        assert_eq!(milestone_progress(&milestones(&[true, false])), 50);
        assert_eq!(milestone_progress(&milestones(&[true, true])), 100);
        assert_eq!(milestone_progress(&milestones(&[false, false])), 0);
    }

    #[test]
    fn test_rounding_to_nearest() {
        // 1/3 = 33.33 rounds down, 2/3 = 66.67 rounds up.
        assert_eq!(milestone_progress(&milestones(&[true, false, false])), 33);
        assert_eq!(milestone_progress(&milestones(&[true, true, false])), 67);
    }
}
