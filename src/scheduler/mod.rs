//! Greedy staffing engine and KPI evaluation.
//!
//! # Algorithm
//!
//! `AssignmentEngine` walks tasks most urgent first and gives each one to
//! the lowest-risk candidate that has the mandatory skills and the capacity
//! to take it. It is not optimal, but it is deterministic and explains every
//! rejection.
//!
//! # KPI
//!
//! `PlanKpi` summarizes a run: assignment and delay counts, risk bands, and
//! per-employee utilization.

mod engine;
mod kpi;
mod ordering;

pub use engine::{
    AssignmentEngine, CandidateEvaluation, CandidateScore, CandidateVerdict, PlanningRun,
    Rejection,
};
pub use kpi::{EmployeeWorkload, PlanKpi, OVERLOAD_THRESHOLD, UNDERUTILIZED_THRESHOLD};
pub use ordering::{candidate_order, compare_candidates, task_order, TIE_EPSILON};
