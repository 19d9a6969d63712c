//! Plan (solution) model.
//!
//! A plan holds one [`Assignment`] per task: who does it (or nobody), how
//! risky that choice is, and when it is expected to finish.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{Priority, Task};
use crate::risk::{RiskBand, MAX_RISK};

/// Sentinel label for tasks nobody could take.
pub const UNASSIGNED: &str = "UNASSIGNED";

/// Who a task went to.
///
/// Serialized as the employee id, or [`UNASSIGNED`]. An employee whose id is
/// literally [`UNASSIGNED`] would not survive a round trip, so validation
/// rejects that id and the engine never plans with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Assignee {
    /// Committed to an employee.
    Employee(String),
    /// No employee passed every gate.
    Unassigned,
}

impl Assignee {
    /// Employee id, if assigned.
    pub fn employee_id(&self) -> Option<&str> {
        match self {
            Self::Employee(id) => Some(id.as_str()),
            Self::Unassigned => None,
        }
    }

    /// Whether the task went to someone.
    pub fn is_assigned(&self) -> bool {
        matches!(self, Self::Employee(_))
    }

    /// Employee id or [`UNASSIGNED`].
    pub fn as_str(&self) -> &str {
        match self {
            Self::Employee(id) => id.as_str(),
            Self::Unassigned => UNASSIGNED,
        }
    }
}

impl fmt::Display for Assignee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Assignee {
    fn from(s: String) -> Self {
        if s == UNASSIGNED {
            Self::Unassigned
        } else {
            Self::Employee(s)
        }
    }
}

impl From<Assignee> for String {
    fn from(a: Assignee) -> Self {
        match a {
            Assignee::Employee(id) => id,
            Assignee::Unassigned => UNASSIGNED.to_string(),
        }
    }
}

/// The staffing decision for one task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub task_id: String,
    pub task_name: String,
    pub department: String,
    pub phase: String,
    pub priority: Priority,
    pub work_size: String,
    pub assignee: Assignee,
    /// Σ(importance × effort) the task asks for.
    pub skill_required_total: f64,
    /// Σ(proficiency output × importance) the assignee brings.
    pub skill_allocated_total: f64,
    /// Required skills the assignee has no record of.
    pub missing_skills: Vec<String>,
    pub coverage_risk: f64,
    pub gap_skill_risk: f64,
    /// max(gap, coverage).
    pub skill_risk: f64,
    pub schedule_risk: f64,
    /// max(skill, schedule), 0-100.
    pub overall_risk: f64,
    pub risk_band: RiskBand,
    pub expected_delay_days: u32,
    pub target_start: NaiveDate,
    pub target_end: NaiveDate,
    pub planned_start: NaiveDate,
    /// `target_end` pushed out by `expected_delay_days`.
    pub planned_finish: NaiveDate,
}

impl Assignment {
    /// An unassigned record: every risk at the maximum, band `Critical`, every
    /// required skill listed as missing.
    ///
    /// `expected_delay_days` is a diagnostic only; nothing is scheduled.
    pub fn unassigned(task: &Task, expected_delay_days: u32) -> Self {
        let window = task.window();
        Self {
            task_id: task.id.clone(),
            task_name: task.name.clone(),
            department: task.department.clone(),
            phase: task.phase.clone(),
            priority: task.priority,
            work_size: task.work_size.clone(),
            assignee: Assignee::Unassigned,
            skill_required_total: task.required_total(),
            skill_allocated_total: 0.0,
            missing_skills: task.skill_names(),
            coverage_risk: MAX_RISK,
            gap_skill_risk: MAX_RISK,
            skill_risk: MAX_RISK,
            schedule_risk: MAX_RISK,
            overall_risk: MAX_RISK,
            risk_band: RiskBand::Critical,
            expected_delay_days,
            target_start: window.start,
            target_end: window.end,
            planned_start: window.start,
            planned_finish: add_days(window.end, expected_delay_days),
        }
    }

    /// allocated − required.
    pub fn skill_delta(&self) -> f64 {
        self.skill_allocated_total - self.skill_required_total
    }

    /// Whether the planned finish slips past the target end.
    pub fn is_delayed(&self) -> bool {
        self.expected_delay_days > 0
    }
}

/// `day + days`, saturating at the last representable date.
pub(crate) fn add_days(day: NaiveDate, days: u32) -> NaiveDate {
    day.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

/// The set of staffing decisions from one planning run, in processing order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Plan {
    pub assignments: Vec<Assignment>,
}

impl Plan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a decision.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Finds the decision for a task.
    pub fn assignment_for_task(&self, task_id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.task_id == task_id)
    }

    /// All tasks committed to an employee.
    pub fn assignments_for_employee(&self, employee_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.assignee.employee_id() == Some(employee_id))
            .collect()
    }

    /// Tasks nobody could take.
    pub fn unassigned(&self) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| !a.assignee.is_assigned())
            .collect()
    }

    /// Assigned tasks with a projected slip.
    pub fn delayed(&self) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.assignee.is_assigned() && a.is_delayed())
            .collect()
    }

    /// Number of assigned tasks.
    pub fn assigned_count(&self) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.assignee.is_assigned())
            .count()
    }

    /// Number of decisions.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Decisions per risk band (every band present, possibly zero).
    pub fn count_by_band(&self) -> BTreeMap<RiskBand, usize> {
        let mut counts: BTreeMap<RiskBand, usize> =
            RiskBand::ALL.iter().map(|b| (*b, 0)).collect();
        for a in &self.assignments {
            *counts.entry(a.risk_band).or_insert(0) += 1;
        }
        counts
    }

    /// Latest planned finish across all decisions.
    pub fn latest_finish(&self) -> Option<NaiveDate> {
        self.assignments.iter().map(|a| a.planned_finish).max()
    }
}
