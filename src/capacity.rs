//! Daily load ledger and capacity model.
//!
//! [`CapacityLedger`] tracks, per employee and calendar day, the effort
//! (FTE-days) already committed. It separates read-only probes from the one
//! mutating operation:
//!
//! | Operation | Access |
//! |-----------|--------|
//! | [`simulate_capacity`](CapacityLedger::simulate_capacity) | `&self` |
//! | [`peak_utilization_in_window`](CapacityLedger::peak_utilization_in_window) | `&self` |
//! | [`estimate_delay_days`](CapacityLedger::estimate_delay_days) | `&self` |
//! | [`commit_load`](CapacityLedger::commit_load) | `&mut self` |
//!
//! # Load Distribution
//! Effort is front-loaded: day weights decline linearly from 2.0 to 0.5 across
//! a window and are rescaled so the window receives exactly the task's effort.
//! Probing and committing share the same weights.
//!
//! # Capacity
//! An employee's capacity is their `fte`. Non-positive capacities are treated
//! as [`MIN_CAPACITY`]; employees unknown to the ledger get
//! [`DEFAULT_CAPACITY`] and no load.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::models::{DateWindow, SkillTable};

/// Capacity substituted for non-positive `fte`.
pub const MIN_CAPACITY: f64 = 0.01;

/// Capacity assumed for employees the ledger does not track.
pub const DEFAULT_CAPACITY: f64 = 1.0;

/// Default bound on days scanned past a window's end when estimating delay.
pub const DEFAULT_DELAY_HORIZON_DAYS: u32 = 365;

/// Remaining effort below which work counts as finished.
const EFFORT_EPSILON: f64 = 1e-9;

/// Front-loaded day weights for an `n`-day window.
///
/// Raw weights fall linearly from 2.0 on the first day to 0.5 on the last
/// and are rescaled to sum to `n`. Returns an empty vector for `n == 0`.
///
/// # Example
/// ```
/// use u_staffing::capacity::front_loaded_weights;
///
/// let w = front_loaded_weights(4);
/// assert!(w[0] > w[3]);
/// assert!((w.iter().sum::<f64>() - 4.0).abs() < 1e-10);
/// ```
pub fn front_loaded_weights(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let denom = n.saturating_sub(1).max(1) as f64;
    let raw: Vec<f64> = (0..n).map(|i| 2.0 - 1.5 * i as f64 / denom).collect();
    let total: f64 = raw.iter().sum();
    if total <= 0.0 {
        return raw;
    }
    raw.into_iter().map(|w| w * n as f64 / total).collect()
}

/// Outcome of a capacity probe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityProbe {
    /// Whether the peak stays within the utilization limit.
    pub fits: bool,
    /// Highest load/capacity ratio in the window with the task added.
    pub peak_utilization: f64,
}

/// Per-employee, per-day committed load.
///
/// Created fresh for each planning run. Only [`commit_load`](Self::commit_load)
/// mutates it, and load never decreases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityLedger {
    horizon: Option<DateWindow>,
    capacity: BTreeMap<String, f64>,
    load: HashMap<String, BTreeMap<NaiveDate, f64>>,
    delay_horizon_days: u32,
}

impl CapacityLedger {
    /// Creates a ledger tracking `horizon` for every employee in the table.
    ///
    /// All tracked days start at zero load. `None` tracks no days: probes
    /// still work, commits are dropped.
    pub fn new(table: &SkillTable, horizon: Option<DateWindow>) -> Self {
        let capacity: BTreeMap<String, f64> =
            table.iter().map(|e| (e.id.clone(), e.fte)).collect();

        let days = horizon.map(|h| h.days()).unwrap_or_default();
        let load = capacity
            .keys()
            .map(|id| {
                let row: BTreeMap<NaiveDate, f64> = days.iter().map(|d| (*d, 0.0)).collect();
                (id.clone(), row)
            })
            .collect();

        Self {
            horizon,
            capacity,
            load,
            delay_horizon_days: DEFAULT_DELAY_HORIZON_DAYS,
        }
    }

    /// Sets the bound on days scanned past a window when estimating delay.
    pub fn with_delay_horizon(mut self, days: u32) -> Self {
        self.delay_horizon_days = days;
        self
    }

    /// The tracked date range.
    pub fn horizon(&self) -> Option<DateWindow> {
        self.horizon
    }

    /// Tracked employee ids in ascending order.
    pub fn employees(&self) -> impl Iterator<Item = &str> {
        self.capacity.keys().map(String::as_str)
    }

    /// Raw capacity (`fte`) of an employee, if tracked.
    pub fn capacity(&self, employee_id: &str) -> Option<f64> {
        self.capacity.get(employee_id).copied()
    }

    /// Capacity used for utilization math (never below [`MIN_CAPACITY`]).
    pub fn effective_capacity(&self, employee_id: &str) -> f64 {
        match self.capacity(employee_id) {
            Some(c) if c > 0.0 => c,
            Some(_) => MIN_CAPACITY,
            None => DEFAULT_CAPACITY,
        }
    }

    /// Committed load on a day (0 for untracked employees or days).
    pub fn load(&self, employee_id: &str, day: NaiveDate) -> f64 {
        self.load
            .get(employee_id)
            .and_then(|row| row.get(&day))
            .copied()
            .unwrap_or(0.0)
    }

    /// Committed load / effective capacity on a day.
    pub fn utilization(&self, employee_id: &str, day: NaiveDate) -> f64 {
        self.load(employee_id, day) / self.effective_capacity(employee_id)
    }

    /// Sum of committed load over the whole horizon.
    pub fn total_load(&self, employee_id: &str) -> f64 {
        self.load
            .get(employee_id)
            .map(|row| row.values().sum())
            .unwrap_or(0.0)
    }

    /// Read-only probe: would adding `total_effort` over `window` keep the
    /// employee's peak utilization at or below `max_utilization`?
    pub fn simulate_capacity(
        &self,
        employee_id: &str,
        window: &DateWindow,
        total_effort: f64,
        max_utilization: f64,
    ) -> CapacityProbe {
        let cap = self.effective_capacity(employee_id);
        let days = window.days();
        let n = days.len();
        let weights = front_loaded_weights(n);

        let peak_utilization = days
            .iter()
            .zip(&weights)
            .map(|(day, w)| {
                let added = total_effort * w / n as f64;
                (self.load(employee_id, *day) + added) / cap
            })
            .fold(0.0, f64::max);

        CapacityProbe {
            fits: peak_utilization <= max_utilization,
            peak_utilization,
        }
    }

    /// Adds `total_effort` over `window` with front-loaded weights.
    ///
    /// Days outside the tracked horizon and untracked employees are skipped.
    pub fn commit_load(&mut self, employee_id: &str, window: &DateWindow, total_effort: f64) {
        let Some(row) = self.load.get_mut(employee_id) else {
            return;
        };
        let days = window.days();
        let n = days.len();
        let weights = front_loaded_weights(n);

        for (day, w) in days.iter().zip(&weights) {
            if let Some(slot) = row.get_mut(day) {
                *slot += total_effort * w / n as f64;
            }
        }
    }

    /// Highest committed load/capacity ratio in `window`.
    pub fn peak_utilization_in_window(&self, employee_id: &str, window: &DateWindow) -> f64 {
        window
            .days()
            .into_iter()
            .map(|day| self.utilization(employee_id, day))
            .fold(0.0, f64::max)
    }

    /// Days past `window.end` needed to absorb `total_effort` in the
    /// employee's remaining daily slack.
    ///
    /// Slack inside the window is consumed first; if it absorbs everything,
    /// the delay is 0. Otherwise days after the window are consumed one at a
    /// time, up to the ledger's delay horizon. A result equal to the horizon
    /// means the effort could not be absorbed and is an extreme estimate, not
    /// a forecast.
    pub fn estimate_delay_days(
        &self,
        employee_id: &str,
        window: &DateWindow,
        total_effort: f64,
    ) -> u32 {
        let cap = self.effective_capacity(employee_id);
        let mut remaining = total_effort;

        for day in window.days() {
            remaining -= self.slack(employee_id, day, cap).min(remaining);
            if remaining <= EFFORT_EPSILON {
                return 0;
            }
        }

        let mut delay = 0;
        for day in window.end.iter_days().skip(1).take(self.delay_horizon_days as usize) {
            remaining -= self.slack(employee_id, day, cap).min(remaining);
            delay += 1;
            if remaining <= EFFORT_EPSILON {
                return delay;
            }
        }

        tracing::warn!(
            employee_id,
            total_effort,
            horizon_days = self.delay_horizon_days,
            "delay estimate hit its horizon"
        );
        delay
    }

    fn slack(&self, employee_id: &str, day: NaiveDate, cap: f64) -> f64 {
        (cap - self.load(employee_id, day)).max(0.0)
    }
}
