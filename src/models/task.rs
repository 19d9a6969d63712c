//! Task (work item) model.
//!
//! A task is a unit of work with a date window, an effort size, and up to
//! [`MAX_REQUIRED_SKILLS`] weighted skill requirements.
//!
//! # Effort
//! Effort is measured in FTE-days and resolved from an ordinal size code
//! through a fixed lookup (see [`effort_for_size`]).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::DateWindow;

/// Maximum number of skill requirements per task.
pub const MAX_REQUIRED_SKILLS: usize = 3;

/// Phase label used when none is given.
pub const DEFAULT_PHASE: &str = "Uncategorized";

/// Effort (FTE-days) used for unrecognised size codes.
pub const DEFAULT_EFFORT_DAYS: f64 = 2.0;

/// Resolves a work size code to effort in FTE-days.
///
/// Text codes (case-insensitive): XS=0.5, S=1, M=2, L=4, XL=8.
/// Numeric codes use their integer part: 1=0.5, 2=1, 3=2, 4=4, 5=8.
/// Anything else resolves to [`DEFAULT_EFFORT_DAYS`].
///
/// # Example
/// ```
/// use u_staffing::models::effort_for_size;
///
/// assert_eq!(effort_for_size("xl"), 8.0);
/// assert_eq!(effort_for_size("4"), 4.0);
/// assert_eq!(effort_for_size("huge"), 2.0);
/// ```
pub fn effort_for_size(code: &str) -> f64 {
    let code = code.trim().to_uppercase();
    match code.as_str() {
        "XS" => return 0.5,
        "S" => return 1.0,
        "M" => return 2.0,
        "L" => return 4.0,
        "XL" => return 8.0,
        _ => {}
    }

    match code.parse::<f64>().map(f64::trunc) {
        Ok(n) if n == 1.0 => 0.5,
        Ok(n) if n == 2.0 => 1.0,
        Ok(n) if n == 3.0 => 2.0,
        Ok(n) if n == 4.0 => 4.0,
        Ok(n) if n == 5.0 => 8.0,
        _ => DEFAULT_EFFORT_DAYS,
    }
}

/// Task priority.
///
/// Ordering follows processing order: `Critical < High < Medium < Low`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Parses a priority label, case-insensitively.
    ///
    /// Unknown labels map to `Medium`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "critical" => Self::Critical,
            "high" => Self::High,
            "low" => Self::Low,
            _ => Self::Medium,
        }
    }

    /// Processing rank (0 = first).
    pub fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    /// Display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A weighted skill requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredSkill {
    /// Skill name (matched exactly against person skill rows).
    pub name: String,
    /// Importance on a 1-5 scale.
    pub importance: f64,
}

impl RequiredSkill {
    /// Creates a requirement. The name is trimmed.
    pub fn new(name: impl Into<String>, importance: f64) -> Self {
        Self {
            name: name.into().trim().to_string(),
            importance,
        }
    }
}

/// A task to be staffed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Owning department (used for team-first candidate ordering).
    pub department: String,
    /// Scheduling priority.
    pub priority: Priority,
    /// Free-text grouping label.
    pub phase: String,
    /// Ordinal size code as given (e.g. "M", "3").
    pub work_size: String,
    /// Effort in FTE-days.
    pub work_size_num: f64,
    /// First day of the target window.
    pub start_date: NaiveDate,
    /// Last day of the target window (never before `start_date`).
    pub end_date: NaiveDate,
    /// Ordered skill requirements (at most [`MAX_REQUIRED_SKILLS`]).
    pub required_skills: Vec<RequiredSkill>,
}

impl Task {
    /// Creates a medium-sized, medium-priority task.
    ///
    /// `end_date` is clamped to `start_date` if it precedes it.
    pub fn new(id: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            department: String::new(),
            priority: Priority::Medium,
            phase: DEFAULT_PHASE.to_string(),
            work_size: "M".to_string(),
            work_size_num: DEFAULT_EFFORT_DAYS,
            start_date,
            end_date: end_date.max(start_date),
            required_skills: Vec::new(),
        }
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the phase. Blank or placeholder labels fall back to [`DEFAULT_PHASE`].
    pub fn with_phase(mut self, phase: impl AsRef<str>) -> Self {
        self.phase = normalize_phase(Some(phase.as_ref()));
        self
    }

    /// Sets the size code and resolves its effort.
    pub fn with_work_size(mut self, code: impl Into<String>) -> Self {
        self.work_size = code.into();
        self.work_size_num = effort_for_size(&self.work_size);
        self
    }

    /// Overrides the effort (FTE-days) directly.
    pub fn with_effort(mut self, effort_days: f64) -> Self {
        self.work_size_num = effort_days;
        self
    }

    /// Adds a skill requirement.
    ///
    /// Requirements past [`MAX_REQUIRED_SKILLS`] are ignored.
    pub fn with_skill(mut self, name: impl Into<String>, importance: f64) -> Self {
        if self.required_skills.len() < MAX_REQUIRED_SKILLS {
            self.required_skills.push(RequiredSkill::new(name, importance));
        }
        self
    }

    /// The target window `[start_date, end_date]`.
    pub fn window(&self) -> DateWindow {
        DateWindow::new(self.start_date, self.end_date)
    }

    /// Inclusive day count (>= 1).
    pub fn duration_days(&self) -> usize {
        self.window().len_days()
    }

    /// Σ(importance × effort) over required skills.
    pub fn required_total(&self) -> f64 {
        self.required_skills
            .iter()
            .map(|s| s.importance * self.work_size_num)
            .sum()
    }

    /// Names of the required skills, in order.
    pub fn skill_names(&self) -> Vec<String> {
        self.required_skills.iter().map(|s| s.name.clone()).collect()
    }

    /// Aggregates raw per-skill rows into tasks.
    ///
    /// Rows are grouped by task id in first-seen order. The window spans the
    /// earliest start to the latest end across the group; a group without
    /// any end date is dropped, and a missing start takes the end date.
    /// Name, department, priority, phase and size come from the first row.
    /// Rows without a skill name or importance add no requirement.
    pub fn aggregate_rows(rows: &[TaskRow]) -> Vec<Task> {
        let mut order: Vec<&str> = Vec::new();
        let mut groups: HashMap<&str, Vec<&TaskRow>> = HashMap::new();
        for row in rows {
            let id = row.task_id.as_str();
            groups
                .entry(id)
                .or_insert_with(|| {
                    order.push(id);
                    Vec::new()
                })
                .push(row);
        }

        order
            .into_iter()
            .filter_map(|id| build_from_group(id, &groups[id]))
            .collect()
    }
}

/// One raw task row as produced by ingestion: a task plus at most one skill.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskRow {
    pub task_id: String,
    pub task_name: String,
    pub department: String,
    pub priority: Option<String>,
    pub phase: Option<String>,
    pub work_size: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub skill: Option<String>,
    pub importance: Option<f64>,
}

fn build_from_group(id: &str, rows: &[&TaskRow]) -> Option<Task> {
    let first = rows.first()?;
    let end = rows.iter().filter_map(|r| r.end_date).max()?;
    let start = rows.iter().filter_map(|r| r.start_date).min().unwrap_or(end);

    let mut task = Task::new(id, start, end)
        .with_name(first.task_name.clone())
        .with_department(first.department.clone())
        .with_priority(
            first
                .priority
                .as_deref()
                .map(Priority::from_label)
                .unwrap_or_default(),
        )
        .with_work_size(first.work_size.clone());
    task.phase = normalize_phase(first.phase.as_deref());

    for row in rows {
        if let (Some(skill), Some(importance)) = (&row.skill, row.importance) {
            if !skill.trim().is_empty() {
                task = task.with_skill(skill.as_str(), importance);
            }
        }
    }
    Some(task)
}

fn normalize_phase(phase: Option<&str>) -> String {
    match phase.map(str::trim) {
        Some(p) if !p.is_empty() && !matches!(p.to_lowercase().as_str(), "nan" | "none") => {
            p.to_string()
        }
        _ => DEFAULT_PHASE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn row(id: &str, skill: Option<(&str, f64)>) -> TaskRow {
        TaskRow {
            task_id: id.into(),
            task_name: format!("Task {id}"),
            department: "Eng".into(),
            work_size: "L".into(),
            start_date: Some(d(2)),
            end_date: Some(d(4)),
            skill: skill.map(|(s, _)| s.to_string()),
            importance: skill.map(|(_, i)| i),
            ..Default::default()
        }
    }

    #[test]
    fn test_effort_text_codes() {
        assert!((effort_for_size("XS") - 0.5).abs() < 1e-10);
        assert!((effort_for_size(" s ") - 1.0).abs() < 1e-10);
        assert!((effort_for_size("m") - 2.0).abs() < 1e-10);
        assert!((effort_for_size("L") - 4.0).abs() < 1e-10);
        assert!((effort_for_size("Xl") - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_effort_numeric_codes() {
        assert!((effort_for_size("1") - 0.5).abs() < 1e-10);
        assert!((effort_for_size("3.0") - 2.0).abs() < 1e-10);
        assert!((effort_for_size("5") - 8.0).abs() < 1e-10);
        assert!((effort_for_size("2.9") - 1.0).abs() < 1e-10); // integer part
    }

    #[test]
    fn test_effort_fallback() {
        assert!((effort_for_size("") - 2.0).abs() < 1e-10);
        assert!((effort_for_size("6") - 2.0).abs() < 1e-10);
        assert!((effort_for_size("XXL") - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!(Priority::from_label("CRITICAL"), Priority::Critical);
        assert_eq!(Priority::from_label(" high"), Priority::High);
        assert_eq!(Priority::from_label("Low"), Priority::Low);
        assert_eq!(Priority::from_label("urgent"), Priority::Medium);
        assert_eq!(Priority::default(), Priority::Medium);
        assert!(Priority::Critical < Priority::Low);
        assert_eq!(Priority::Low.rank(), 3);
    }

    #[test]
    fn test_task_builder() {
        let t = Task::new("T1", d(1), d(3))
            .with_name("Design review")
            .with_department("Eng")
            .with_priority(Priority::High)
            .with_work_size("L")
            .with_skill("Systems", 5.0)
            .with_skill("Writing", 2.0);

        assert_eq!(t.duration_days(), 3);
        assert!((t.work_size_num - 4.0).abs() < 1e-10);
        // 5*4 + 2*4
        assert!((t.required_total() - 28.0).abs() < 1e-10);
        assert_eq!(t.skill_names(), vec!["Systems", "Writing"]);
        assert_eq!(t.phase, DEFAULT_PHASE);
    }

    #[test]
    fn test_task_clamps_window() {
        let t = Task::new("T1", d(5), d(2));
        assert_eq!(t.end_date, d(5));
        assert_eq!(t.duration_days(), 1);
    }

    #[test]
    fn test_skill_cap() {
        let t = Task::new("T1", d(1), d(1))
            .with_skill("a", 1.0)
            .with_skill("b", 1.0)
            .with_skill("c", 1.0)
            .with_skill("d", 1.0);
        assert_eq!(t.required_skills.len(), MAX_REQUIRED_SKILLS);
    }

    #[test]
    fn test_phase_normalization() {
        assert_eq!(Task::new("T", d(1), d(1)).with_phase("nan").phase, DEFAULT_PHASE);
        assert_eq!(Task::new("T", d(1), d(1)).with_phase("  ").phase, DEFAULT_PHASE);
        assert_eq!(Task::new("T", d(1), d(1)).with_phase(" Build ").phase, "Build");
    }

    #[test]
    fn test_aggregate_rows_groups_skills() {
        let rows = vec![
            row("T2", Some(("Rust", 4.0))),
            row("T1", Some(("SQL", 3.0))),
            row("T2", Some(("Docs", 2.0))),
        ];
        let tasks = Task::aggregate_rows(&rows);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, "T2"); // first-seen order
        assert_eq!(tasks[0].skill_names(), vec!["Rust", "Docs"]);
        assert!((tasks[0].required_total() - 24.0).abs() < 1e-10); // (4+2)*4
    }

    #[test]
    fn test_aggregate_rows_window_span() {
        let mut a = row("T1", Some(("Rust", 4.0)));
        a.start_date = Some(d(3));
        a.end_date = Some(d(5));
        let mut b = row("T1", Some(("SQL", 2.0)));
        b.start_date = Some(d(1));
        b.end_date = Some(d(9));

        let tasks = Task::aggregate_rows(&[a, b]);
        assert_eq!(tasks[0].start_date, d(1));
        assert_eq!(tasks[0].end_date, d(9));
    }

    #[test]
    fn test_aggregate_rows_missing_dates() {
        let mut no_end = row("T1", None);
        no_end.end_date = None;
        let mut no_start = row("T2", Some(("Rust", 3.0)));
        no_start.start_date = None;

        let tasks = Task::aggregate_rows(&[no_end, no_start]);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "T2");
        assert_eq!(tasks[0].start_date, tasks[0].end_date);
    }

    #[test]
    fn test_aggregate_rows_defaults() {
        let mut r = row("T1", None);
        r.priority = Some("HIGH".into());
        r.phase = Some("None".into());
        let tasks = Task::aggregate_rows(&[r]);
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[0].phase, DEFAULT_PHASE);
        assert!(tasks[0].required_skills.is_empty());
    }
}
