//! Greedy skill- and capacity-aware assignment engine.
//!
//! # Algorithm
//!
//! 1. Order tasks by priority rank, then start date.
//! 2. For each task, walk the candidates (team-first if configured) and drop
//!    anyone who lacks a mandatory skill, covers too little of the required
//!    skills, or would exceed the utilization limit in the task window.
//! 3. Score the survivors: skill risk from the gap and coverage, schedule
//!    risk from the peak utilization and estimated delay.
//! 4. Pick the lowest overall risk (lower delay breaks ties), record the
//!    assignment, then commit the task's effort to the winner's calendar.
//! 5. With no survivor, record the task as unassigned and commit nothing.
//!
//! Every candidate for a task is probed against the same ledger state; the
//! single commit happens after the choice is made.
//!
//! # Complexity
//! O(t * e * d) where t=tasks, e=employees, d=window days (plus the bounded
//! delay scan for survivors).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, info, instrument, warn};

use super::ordering::{candidate_order, compare_candidates, task_order};
use crate::capacity::CapacityLedger;
use crate::config::PlannerConfig;
use crate::error::{PlanError, Result};
use crate::matcher::{allocated_skill_score, has_minimum_skill_coverage, missing_mandatory_skill};
use crate::models::{
    add_days, Assignee, Assignment, DateWindow, EmployeeProfile, PersonSkillRecord, Plan,
    SkillTable, Task,
};
use crate::risk::{coverage_risk, overall_risk, schedule_risk, skill_gap_risk, skill_risk, RiskBand};
use crate::validation::{is_plannable, validate_record, validate_tasks, ValidationError};

/// Why a candidate was dropped before scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Rejection {
    /// No record of a skill at or above the mandatory threshold.
    MissingMandatorySkill(String),
    /// Too little of the required skill weight is covered, or the
    /// candidate's skills add nothing to a task that needs skills.
    NoSkillCoverage,
    /// Taking the task would push a day past the utilization limit.
    OverCapacity { peak_utilization: f64 },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingMandatorySkill(skill) => write!(f, "missing mandatory skill '{skill}'"),
            Self::NoSkillCoverage => f.write_str("insufficient skill coverage"),
            Self::OverCapacity { peak_utilization } => {
                write!(f, "over capacity (peak utilization {peak_utilization:.2})")
            }
        }
    }
}

/// Risk breakdown for a candidate that passed every gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub allocated_total: f64,
    pub missing_skills: Vec<String>,
    pub coverage_risk: f64,
    pub gap_skill_risk: f64,
    pub skill_risk: f64,
    pub schedule_risk: f64,
    pub overall_risk: f64,
    /// Peak utilization in the task window with the task added.
    pub peak_utilization: f64,
    pub expected_delay_days: u32,
}

/// Outcome of evaluating one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CandidateVerdict {
    Eligible(CandidateScore),
    Rejected(Rejection),
}

/// One candidate's verdict for a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateEvaluation {
    pub employee_id: String,
    pub verdict: CandidateVerdict,
}

impl CandidateEvaluation {
    /// The score, if the candidate passed every gate.
    pub fn score(&self) -> Option<&CandidateScore> {
        match &self.verdict {
            CandidateVerdict::Eligible(score) => Some(score),
            CandidateVerdict::Rejected(_) => None,
        }
    }

    /// Whether the candidate passed the skill gates (capacity aside).
    pub fn skill_qualified(&self) -> bool {
        matches!(
            self.verdict,
            CandidateVerdict::Eligible(_)
                | CandidateVerdict::Rejected(Rejection::OverCapacity { .. })
        )
    }
}

/// Result of a planning run: the decisions and the calendar they produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningRun {
    pub plan: Plan,
    pub ledger: CapacityLedger,
}

/// Greedy staffing engine.
///
/// Holds the configuration and the employee skill table. Each [`run`](Self::run)
/// builds its own [`CapacityLedger`], so runs never share state.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_staffing::config::PlannerConfig;
/// use u_staffing::models::{PersonSkillRecord, Task};
/// use u_staffing::scheduler::AssignmentEngine;
///
/// let day = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
/// let tasks = vec![Task::new("T1", day, day).with_work_size("S").with_skill("Rust", 4.0)];
/// let records = vec![PersonSkillRecord::new("E1", "Rust", 4.0)];
///
/// let engine = AssignmentEngine::new(PlannerConfig::default(), &records).unwrap();
/// let run = engine.run(&tasks).unwrap();
/// let a = run.plan.assignment_for_task("T1").unwrap();
/// assert_eq!(a.assignee.as_str(), "E1");
/// assert_eq!(a.expected_delay_days, 0);
/// ```
#[derive(Debug, Clone)]
pub struct AssignmentEngine {
    config: PlannerConfig,
    table: SkillTable,
}

impl AssignmentEngine {
    /// Creates an engine over the given skill rows.
    ///
    /// Rows that fail validation (blank or reserved ids, non-finite numbers)
    /// are logged and left out of the skill table.
    ///
    /// # Errors
    /// [`PlanError::InvalidConfig`] if the configuration fails validation.
    pub fn new(config: PlannerConfig, records: &[PersonSkillRecord]) -> Result<Self> {
        config.validate()?;

        let mut usable = Vec::with_capacity(records.len());
        for (row, rec) in records.iter().enumerate() {
            let problems = validate_record(row, rec);
            if problems.is_empty() {
                usable.push(rec.clone());
            } else {
                for problem in &problems {
                    warn!(kind = ?problem.kind, "skipping skill row: {problem}");
                }
            }
        }

        Ok(Self {
            config,
            table: SkillTable::from_records(&usable),
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// The employee skill table.
    pub fn skill_table(&self) -> &SkillTable {
        &self.table
    }

    /// A fresh ledger tracking every day any task touches.
    pub fn new_ledger(&self, tasks: &[Task]) -> CapacityLedger {
        let horizon = tasks
            .iter()
            .map(Task::window)
            .reduce(|acc, w| DateWindow::span(&acc, &w));
        CapacityLedger::new(&self.table, horizon).with_delay_horizon(self.config.delay_horizon_days)
    }

    /// Plans every task.
    ///
    /// Problems with individual tasks never stop the run: they are logged,
    /// and a task whose effort or requirements cannot be scored comes back
    /// unassigned with nothing committed. Tasks nobody can take likewise
    /// come back as unassigned records.
    ///
    /// # Errors
    /// [`PlanError::InvalidInput`] if the skill table has no usable employee.
    #[instrument(skip_all, fields(tasks = tasks.len(), employees = self.table.len()))]
    pub fn run(&self, tasks: &[Task]) -> Result<PlanningRun> {
        if self.table.is_empty() {
            return Err(PlanError::InvalidInput(vec![ValidationError::empty_roster()]));
        }
        for problem in validate_tasks(tasks) {
            warn!(kind = ?problem.kind, "{problem}");
        }

        let mut ledger = self.new_ledger(tasks);
        let mut plan = Plan::new();
        for idx in task_order(tasks) {
            let task = &tasks[idx];
            let assignment = if is_plannable(task) {
                self.assign(task, &mut ledger)
            } else {
                warn!(task_id = %task.id, "task cannot be scored; recording it unassigned");
                Assignment::unassigned(task, 0)
            };
            plan.add_assignment(assignment);
        }

        info!(
            assigned = plan.assigned_count(),
            unassigned = plan.unassigned().len(),
            delayed = plan.delayed().len(),
            "planning run complete"
        );
        Ok(PlanningRun { plan, ledger })
    }

    /// Candidates for a task, in evaluation order.
    pub fn candidates(&self, task: &Task) -> Vec<&EmployeeProfile> {
        candidate_order(&self.table, &task.department, self.config.team_first)
    }

    /// Gates and scores every candidate against the current ledger.
    ///
    /// Read-only: the ledger is not touched.
    pub fn evaluate_candidates(&self, task: &Task, ledger: &CapacityLedger) -> Vec<CandidateEvaluation> {
        self.candidates(task)
            .into_iter()
            .map(|employee| {
                let verdict = self.evaluate(task, employee, ledger);
                if let CandidateVerdict::Rejected(reason) = &verdict {
                    debug!(task_id = %task.id, employee_id = %employee.id, %reason, "candidate rejected");
                }
                CandidateEvaluation {
                    employee_id: employee.id.clone(),
                    verdict,
                }
            })
            .collect()
    }

    /// Decides one task and commits its load if someone takes it.
    pub fn assign(&self, task: &Task, ledger: &mut CapacityLedger) -> Assignment {
        let evaluations = self.evaluate_candidates(task, ledger);

        let Some((employee_id, score)) = select_best(&evaluations) else {
            let delay = self.unassigned_delay(task, ledger, &evaluations);
            warn!(
                task_id = %task.id,
                candidates = evaluations.len(),
                probe_delay_days = delay,
                "no candidate can take task"
            );
            return Assignment::unassigned(task, delay);
        };

        let window = task.window();
        let assignment = Assignment {
            task_id: task.id.clone(),
            task_name: task.name.clone(),
            department: task.department.clone(),
            phase: task.phase.clone(),
            priority: task.priority,
            work_size: task.work_size.clone(),
            assignee: Assignee::Employee(employee_id.to_string()),
            skill_required_total: task.required_total(),
            skill_allocated_total: score.allocated_total,
            missing_skills: score.missing_skills.clone(),
            coverage_risk: score.coverage_risk,
            gap_skill_risk: score.gap_skill_risk,
            skill_risk: score.skill_risk,
            schedule_risk: score.schedule_risk,
            overall_risk: score.overall_risk,
            risk_band: RiskBand::from_score(score.overall_risk),
            expected_delay_days: score.expected_delay_days,
            target_start: window.start,
            target_end: window.end,
            planned_start: window.start,
            planned_finish: add_days(window.end, score.expected_delay_days),
        };

        debug!(
            task_id = %task.id,
            employee_id,
            overall_risk = score.overall_risk,
            delay_days = score.expected_delay_days,
            "task assigned"
        );
        ledger.commit_load(employee_id, &window, task.work_size_num);
        assignment
    }

    fn evaluate(&self, task: &Task, employee: &EmployeeProfile, ledger: &CapacityLedger) -> CandidateVerdict {
        let required = &task.required_skills;
        let threshold = f64::from(self.config.mandatory_threshold);

        if let Some(skill) = missing_mandatory_skill(employee, required, threshold) {
            return CandidateVerdict::Rejected(Rejection::MissingMandatorySkill(skill.to_string()));
        }

        let required_total = task.required_total();
        let allocated_total = allocated_skill_score(employee, required);
        if !has_minimum_skill_coverage(employee, required, self.config.min_skill_coverage)
            || (required_total > 0.0 && allocated_total <= 0.0)
        {
            return CandidateVerdict::Rejected(Rejection::NoSkillCoverage);
        }

        let window = task.window();
        let probe = ledger.simulate_capacity(
            &employee.id,
            &window,
            task.work_size_num,
            self.config.max_utilization,
        );
        if !probe.fits {
            return CandidateVerdict::Rejected(Rejection::OverCapacity {
                peak_utilization: probe.peak_utilization,
            });
        }

        let gap = skill_gap_risk(required_total, allocated_total);
        let coverage = coverage_risk(employee, required);
        let skill = skill_risk(gap, coverage.risk);
        let delay = ledger.estimate_delay_days(&employee.id, &window, task.work_size_num);
        let schedule = schedule_risk(probe.peak_utilization, delay);

        CandidateVerdict::Eligible(CandidateScore {
            allocated_total,
            missing_skills: coverage.missing_skills,
            coverage_risk: coverage.risk,
            gap_skill_risk: gap,
            skill_risk: skill,
            schedule_risk: schedule,
            overall_risk: overall_risk(skill, schedule),
            peak_utilization: probe.peak_utilization,
            expected_delay_days: delay,
        })
    }

    /// Shift to report for an unassigned task: the configured shift if some
    /// skill-qualified candidate could fit the task that much later, else 0.
    fn unassigned_delay(
        &self,
        task: &Task,
        ledger: &CapacityLedger,
        evaluations: &[CandidateEvaluation],
    ) -> u32 {
        let shift = self.config.unassigned_probe_shift_days;
        let shifted = task.window().shifted(shift);
        let fits_later = evaluations
            .iter()
            .filter(|e| e.skill_qualified())
            .any(|e| {
                ledger
                    .simulate_capacity(
                        &e.employee_id,
                        &shifted,
                        task.work_size_num,
                        self.config.max_utilization,
                    )
                    .fits
            });
        if fits_later {
            shift
        } else {
            0
        }
    }
}

/// Lowest overall risk, then lowest delay; the first candidate wins a full tie.
fn select_best(evaluations: &[CandidateEvaluation]) -> Option<(&str, &CandidateScore)> {
    let mut best: Option<(&str, &CandidateScore)> = None;
    for eval in evaluations {
        let Some(score) = eval.score() else {
            continue;
        };
        let better = match best {
            None => true,
            Some((_, b)) => {
                compare_candidates(
                    score.overall_risk,
                    score.expected_delay_days,
                    b.overall_risk,
                    b.expected_delay_days,
                ) == Ordering::Less
            }
        };
        if better {
            best = Some((eval.employee_id.as_str(), score));
        }
    }
    best
}
