//! Input validation for staffing problems.
//!
//! Checks structural integrity of tasks and skill rows before planning.
//! Detects:
//! - Duplicate task IDs
//! - An empty skill table (nobody to assign)
//! - Too many skill requirements on a task
//! - Importance, effort, or skill-row values outside their domains
//! - Windows that end before they start
//! - Blank or reserved identifiers
//!
//! Only an empty skill table stops a planning run. Every other problem is
//! per record: the engine logs it, skips unusable skill rows, and records
//! unplannable tasks as unassigned. Degenerate capacity (`fte <= 0`) is not
//! a problem at all; the ledger substitutes a minimal capacity.

use std::collections::HashSet;
use thiserror::Error;

use crate::models::{PersonSkillRecord, Task, MAX_REQUIRED_SKILLS, UNASSIGNED};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Lowest expected skill importance.
pub const MIN_IMPORTANCE: f64 = 1.0;
/// Highest expected skill importance.
pub const MAX_IMPORTANCE: f64 = 5.0;

/// A validation error.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two tasks share the same ID.
    DuplicateId,
    /// No usable skill rows were supplied.
    EmptyRoster,
    /// A task lists more than [`MAX_REQUIRED_SKILLS`] skills.
    TooManySkills,
    /// A skill importance is non-finite or outside 1-5.
    InvalidImportance,
    /// A task effort is non-finite or negative.
    InvalidEffort,
    /// A task ends before it starts.
    InvalidWindow,
    /// A skill row carries a non-finite number.
    InvalidRecord,
    /// An ID or skill name is blank.
    MissingIdentifier,
    /// An employee ID collides with the [`UNASSIGNED`] sentinel.
    ReservedIdentifier,
}

impl ValidationErrorKind {
    /// Whether the problem prevents planning altogether.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::EmptyRoster)
    }
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn empty_roster() -> Self {
        Self::new(
            ValidationErrorKind::EmptyRoster,
            "No usable employee skill records supplied",
        )
    }
}

/// Validates the input data for a staffing problem.
///
/// Checks:
/// 1. No duplicate or blank task IDs
/// 2. At most [`MAX_REQUIRED_SKILLS`] requirements per task, each named and
///    with importance in [`MIN_IMPORTANCE`]..=[`MAX_IMPORTANCE`]
/// 3. Finite, non-negative effort
/// 4. `end_date >= start_date`
/// 5. At least one skill row, each with a non-reserved employee ID, a skill
///    name, and finite proficiency, job level, and fte
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(tasks: &[Task], records: &[PersonSkillRecord]) -> ValidationResult {
    let mut errors = validate_tasks(tasks);

    if records.is_empty() {
        errors.push(ValidationError::empty_roster());
    }
    for (row, rec) in records.iter().enumerate() {
        errors.extend(validate_record(row, rec));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Problems with individual tasks, in input order.
pub fn validate_tasks(tasks: &[Task]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut task_ids = HashSet::new();
    for task in tasks {
        check_task(task, &mut task_ids, &mut errors);
    }
    errors
}

/// Problems with one skill row (`row` is its position, for messages).
pub fn validate_record(row: usize, rec: &PersonSkillRecord) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if rec.employee_id.trim().is_empty() || rec.skill.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingIdentifier,
            format!("Skill row {row} has a blank employee ID or skill name"),
        ));
    } else if rec.employee_id == UNASSIGNED {
        errors.push(ValidationError::new(
            ValidationErrorKind::ReservedIdentifier,
            format!("Skill row {row} uses the reserved employee ID '{UNASSIGNED}'"),
        ));
    }
    if !(rec.proficiency.is_finite() && rec.job_level.is_finite() && rec.fte.is_finite()) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidRecord,
            format!(
                "Skill row {row} ({}/{}) has a non-finite value",
                rec.employee_id, rec.skill
            ),
        ));
    }
    errors
}

/// Whether risk and load math stay meaningful for a task.
///
/// Requires finite, non-negative effort and finite, named requirements.
/// Out-of-range but finite importances (e.g. 0) are plannable as weights.
pub fn is_plannable(task: &Task) -> bool {
    task.work_size_num.is_finite()
        && task.work_size_num >= 0.0
        && task
            .required_skills
            .iter()
            .all(|s| s.importance.is_finite() && !s.name.trim().is_empty())
}

fn check_task<'a>(task: &'a Task, seen: &mut HashSet<&'a str>, errors: &mut Vec<ValidationError>) {
    if task.id.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingIdentifier,
            "Task with blank ID",
        ));
    } else if !seen.insert(task.id.as_str()) {
        errors.push(ValidationError::new(
            ValidationErrorKind::DuplicateId,
            format!("Duplicate task ID: {}", task.id),
        ));
    }

    if task.required_skills.len() > MAX_REQUIRED_SKILLS {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooManySkills,
            format!(
                "Task '{}' lists {} skills (max {MAX_REQUIRED_SKILLS})",
                task.id,
                task.required_skills.len()
            ),
        ));
    }

    for skill in &task.required_skills {
        if skill.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingIdentifier,
                format!("Task '{}' has a skill with a blank name", task.id),
            ));
        }
        if !skill.importance.is_finite()
            || !(MIN_IMPORTANCE..=MAX_IMPORTANCE).contains(&skill.importance)
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidImportance,
                format!(
                    "Task '{}' skill '{}' has importance {} outside {MIN_IMPORTANCE}-{MAX_IMPORTANCE}",
                    task.id, skill.name, skill.importance
                ),
            ));
        }
    }

    if !task.work_size_num.is_finite() || task.work_size_num < 0.0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidEffort,
            format!("Task '{}' has effort {}", task.id, task.work_size_num),
        ));
    }

    if task.end_date < task.start_date {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidWindow,
            format!(
                "Task '{}' ends ({}) before it starts ({})",
                task.id, task.end_date, task.start_date
            ),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RequiredSkill;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, day).unwrap()
    }

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task::new("T1", d(1), d(5)).with_skill("Rust", 4.0),
            Task::new("T2", d(2), d(3)).with_skill("SQL", 2.5).with_skill("Docs", 1.0),
        ]
    }

    fn sample_records() -> Vec<PersonSkillRecord> {
        vec![
            PersonSkillRecord::new("E1", "Rust", 4.0),
            PersonSkillRecord::new("E2", "SQL", 3.0).with_fte(0.0),
        ]
    }

    fn kinds(tasks: &[Task], records: &[PersonSkillRecord]) -> Vec<ValidationErrorKind> {
        validate_input(tasks, records)
            .unwrap_err()
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_tasks(), &sample_records()).is_ok());
    }

    #[test]
    fn test_no_tasks_is_valid() {
        assert!(validate_input(&[], &sample_records()).is_ok());
    }

    #[test]
    fn test_duplicate_task_id() {
        let mut tasks = sample_tasks();
        tasks.push(Task::new("T1", d(1), d(1)));
        let errors = validate_input(&tasks, &sample_records()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("T1")));
    }

    #[test]
    fn test_empty_roster() {
        assert_eq!(kinds(&sample_tasks(), &[]), vec![ValidationErrorKind::EmptyRoster]);
    }

    #[test]
    fn test_too_many_skills() {
        let mut task = Task::new("T9", d(1), d(1));
        task.required_skills = (0..4).map(|i| RequiredSkill::new(format!("S{i}"), 2.0)).collect();
        assert!(kinds(&[task], &sample_records()).contains(&ValidationErrorKind::TooManySkills));
    }

    #[test]
    fn test_invalid_importance() {
        let high = Task::new("T1", d(1), d(1)).with_skill("Rust", 7.0);
        let nan = Task::new("T2", d(1), d(1)).with_skill("Rust", f64::NAN);
        let errs = kinds(&[high, nan], &sample_records());
        assert_eq!(
            errs.iter()
                .filter(|k| **k == ValidationErrorKind::InvalidImportance)
                .count(),
            2
        );
    }

    #[test]
    fn test_invalid_effort_and_window() {
        let mut task = Task::new("T1", d(5), d(6)).with_effort(-1.0);
        task.end_date = d(4);
        let errs = kinds(&[task], &sample_records());
        assert!(errs.contains(&ValidationErrorKind::InvalidEffort));
        assert!(errs.contains(&ValidationErrorKind::InvalidWindow));
    }

    #[test]
    fn test_invalid_record() {
        let records = vec![
            PersonSkillRecord::new("E1", "Rust", f64::INFINITY),
            PersonSkillRecord::new("", "Rust", 1.0),
        ];
        let errs = kinds(&sample_tasks(), &records);
        assert!(errs.contains(&ValidationErrorKind::InvalidRecord));
        assert!(errs.contains(&ValidationErrorKind::MissingIdentifier));
    }

    #[test]
    fn test_multiple_errors() {
        let tasks = vec![
            Task::new("", d(1), d(1)),
            Task::new("T1", d(1), d(1)).with_skill("Rust", 0.0),
        ];
        let errors = validate_input(&tasks, &[]).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_reserved_employee_id() {
        let errors = validate_record(0, &PersonSkillRecord::new(UNASSIGNED, "Rust", 3.0));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::ReservedIdentifier);
        assert!(validate_record(1, &PersonSkillRecord::new("unassigned", "Rust", 3.0)).is_empty());
    }

    #[test]
    fn test_only_empty_roster_is_fatal() {
        assert!(ValidationErrorKind::EmptyRoster.is_fatal());
        assert!(!ValidationErrorKind::DuplicateId.is_fatal());
        assert!(!ValidationErrorKind::InvalidImportance.is_fatal());
    }

    #[test]
    fn test_plannable_tasks() {
        assert!(is_plannable(&Task::new("T1", d(1), d(1)).with_skill("Docs", 0.0)));
        assert!(is_plannable(&Task::new("T2", d(1), d(1)).with_skill("Docs", 9.0)));
        assert!(!is_plannable(&Task::new("T3", d(1), d(1)).with_skill("Docs", f64::NAN)));
        assert!(!is_plannable(&Task::new("T4", d(1), d(1)).with_effort(-2.0)));
        assert!(!is_plannable(&Task::new("T5", d(1), d(1)).with_effort(f64::INFINITY)));
        assert!(!is_plannable(&Task::new("T6", d(1), d(1)).with_skill("  ", 3.0)));
    }
}
