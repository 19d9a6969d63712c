//! Processing order for tasks and candidates.
//!
//! Tasks are taken most urgent first: by priority rank, then by start date.
//! The sort is stable, so tasks that tie keep their input order.
//!
//! Candidates are taken in ascending employee id order. With team-first
//! ordering, employees from the task's department move to the front; both
//! groups keep id order and nobody is dropped.

use std::cmp::Ordering;

use crate::models::{EmployeeProfile, SkillTable, Task};

/// Overall-risk difference below which two candidates count as tied.
pub const TIE_EPSILON: f64 = 1e-9;

/// Task indices in processing order.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use u_staffing::models::{Priority, Task};
/// use u_staffing::scheduler::task_order;
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// let tasks = vec![
///     Task::new("later", day, day).with_priority(Priority::Low),
///     Task::new("first", day, day).with_priority(Priority::Critical),
/// ];
/// assert_eq!(task_order(&tasks), vec![1, 0]);
/// ```
pub fn task_order(tasks: &[Task]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..tasks.len()).collect();
    indices.sort_by_key(|&i| (tasks[i].priority.rank(), tasks[i].start_date));
    indices
}

/// Employees to consider for a task in `department`.
pub fn candidate_order<'a>(
    table: &'a SkillTable,
    department: &str,
    team_first: bool,
) -> Vec<&'a EmployeeProfile> {
    let mut candidates: Vec<&EmployeeProfile> = table.iter().collect();
    if team_first && !department.is_empty() {
        // stable: id order is kept inside each group
        candidates.sort_by_key(|e| !e.in_department(department));
    }
    candidates
}

/// Compares a challenger against the current best by
/// `(overall_risk, expected_delay_days)`.
///
/// Risks within [`TIE_EPSILON`] are equal. Returns [`Ordering::Less`] only
/// when the challenger is strictly better, so the first candidate seen wins
/// a full tie.
pub fn compare_candidates(
    challenger_risk: f64,
    challenger_delay: u32,
    best_risk: f64,
    best_delay: u32,
) -> Ordering {
    if (challenger_risk - best_risk).abs() > TIE_EPSILON {
        return challenger_risk
            .partial_cmp(&best_risk)
            .unwrap_or(Ordering::Equal);
    }
    challenger_delay.cmp(&best_delay)
}
