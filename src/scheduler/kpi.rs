//! Plan quality metrics (KPIs).
//!
//! Computes staffing indicators from a completed planning run: how many
//! tasks landed, how many slip, and how evenly the load is spread.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Assigned / Unassigned | Tasks with / without an owner |
//! | Delayed | Assigned tasks with `expected_delay_days > 0` |
//! | Avg Utilization | Mean of per-employee average daily utilization |
//! | Overloaded | Employees whose peak daily utilization exceeds 100% |
//! | Underutilized | Employees averaging below 50% |
//! | Band Counts | Decisions per risk band |
//!
//! Utilization is measured over the plan window: earliest planned start to
//! latest planned finish, across all decisions. It uses the ledger's
//! effective capacity, the same figure the capacity gate checks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::PlanningRun;
use crate::capacity::CapacityLedger;
use crate::models::DateWindow;
use crate::risk::RiskBand;

/// Peak daily utilization above which an employee counts as overloaded.
pub const OVERLOAD_THRESHOLD: f64 = 1.0;

/// Average utilization below which an employee counts as underutilized.
pub const UNDERUTILIZED_THRESHOLD: f64 = 0.5;

/// Load summary for one employee over the plan window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeWorkload {
    pub employee_id: String,
    /// Raw capacity from the skill table.
    pub fte: f64,
    /// Mean daily utilization across the plan window.
    pub avg_utilization: f64,
    /// Highest single-day utilization.
    pub max_utilization: f64,
    /// FTE-days committed over the whole ledger.
    pub total_load: f64,
}

impl EmployeeWorkload {
    fn measure(ledger: &CapacityLedger, employee_id: &str, window: Option<DateWindow>) -> Self {
        let daily: Vec<f64> = window
            .map(|w| w.days())
            .unwrap_or_default()
            .into_iter()
            .map(|day| ledger.utilization(employee_id, day))
            .collect();

        let avg_utilization = if daily.is_empty() {
            0.0
        } else {
            daily.iter().sum::<f64>() / daily.len() as f64
        };

        Self {
            employee_id: employee_id.to_string(),
            fte: ledger.capacity(employee_id).unwrap_or(0.0),
            avg_utilization,
            max_utilization: daily.iter().copied().fold(0.0, f64::max),
            total_load: ledger.total_load(employee_id),
        }
    }

    /// Whether the busiest day exceeds capacity.
    pub fn is_overloaded(&self) -> bool {
        self.max_utilization > OVERLOAD_THRESHOLD
    }

    /// Whether the employee averages under half load.
    pub fn is_underutilized(&self) -> bool {
        self.avg_utilization < UNDERUTILIZED_THRESHOLD
    }
}

/// Plan performance indicators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanKpi {
    pub total_tasks: usize,
    pub assigned: usize,
    pub unassigned: usize,
    /// Assigned tasks expected to finish late.
    pub delayed: usize,
    /// Mean of the per-employee average utilizations (0 with no employees).
    pub avg_utilization: f64,
    pub overloaded: usize,
    pub underutilized: usize,
    pub band_counts: BTreeMap<RiskBand, usize>,
    /// Per-employee breakdown, in employee id order.
    pub workloads: Vec<EmployeeWorkload>,
}

impl PlanKpi {
    /// Computes KPIs from a planning run.
    pub fn calculate(run: &PlanningRun) -> Self {
        let plan = &run.plan;
        let window = plan
            .assignments
            .iter()
            .map(|a| DateWindow::new(a.planned_start, a.planned_finish))
            .reduce(|acc, w| DateWindow::span(&acc, &w));

        let workloads: Vec<EmployeeWorkload> = run
            .ledger
            .employees()
            .map(|id| EmployeeWorkload::measure(&run.ledger, id, window))
            .collect();

        let avg_utilization = if workloads.is_empty() {
            0.0
        } else {
            workloads.iter().map(|w| w.avg_utilization).sum::<f64>() / workloads.len() as f64
        };

        Self {
            total_tasks: plan.assignment_count(),
            assigned: plan.assigned_count(),
            unassigned: plan.unassigned().len(),
            delayed: plan.delayed().len(),
            avg_utilization,
            overloaded: workloads.iter().filter(|w| w.is_overloaded()).count(),
            underutilized: workloads.iter().filter(|w| w.is_underutilized()).count(),
            band_counts: plan.count_by_band(),
            workloads,
        }
    }

    /// Share of tasks that found an owner (1.0 for an empty plan).
    pub fn assignment_rate(&self) -> f64 {
        if self.total_tasks == 0 {
            1.0
        } else {
            self.assigned as f64 / self.total_tasks as f64
        }
    }

    /// Whether the plan meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_unassigned: usize, max_overloaded: usize) -> bool {
        self.unassigned <= max_unassigned && self.overloaded <= max_overloaded
    }
}
