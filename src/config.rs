//! Planner configuration.
//!
//! Operator-tunable knobs for a planning run. Every field has a default, so
//! a partial JSON document (or `{}`) is a valid configuration.
//!
//! # Example
//! ```
//! use u_staffing::config::PlannerConfig;
//!
//! let config = PlannerConfig::from_json_str(r#"{ "mandatory_threshold": 4 }"#).unwrap();
//! assert_eq!(config.mandatory_threshold, 4);
//! assert!(config.team_first);
//! ```

use serde::{Deserialize, Serialize};

use crate::capacity::DEFAULT_DELAY_HORIZON_DAYS;
use crate::error::{PlanError, Result};
use crate::matcher::DEFAULT_MIN_COVERAGE;

/// Default importance at which a required skill becomes mandatory.
pub const DEFAULT_MANDATORY_THRESHOLD: u8 = 3;

/// Default shift used to probe whether an unassigned task could fit later.
pub const DEFAULT_UNASSIGNED_PROBE_SHIFT_DAYS: u32 = 30;

/// Settings for a planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Skills with importance >= this are mandatory (1-5).
    pub mandatory_threshold: u8,
    /// Try employees from the task's department first.
    pub team_first: bool,
    /// Highest per-day utilization a commitment may reach.
    pub max_utilization: f64,
    /// Minimum importance-weighted share of required skills a candidate
    /// must have any record of.
    pub min_skill_coverage: f64,
    /// Days scanned past a window's end when estimating delay.
    pub delay_horizon_days: u32,
    /// How far later an unassigned task is probed for a diagnostic delay.
    pub unassigned_probe_shift_days: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            mandatory_threshold: DEFAULT_MANDATORY_THRESHOLD,
            team_first: true,
            max_utilization: 1.0,
            min_skill_coverage: DEFAULT_MIN_COVERAGE,
            delay_horizon_days: DEFAULT_DELAY_HORIZON_DAYS,
            unassigned_probe_shift_days: DEFAULT_UNASSIGNED_PROBE_SHIFT_DAYS,
        }
    }
}

impl PlannerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the mandatory-skill threshold.
    pub fn with_mandatory_threshold(mut self, threshold: u8) -> Self {
        self.mandatory_threshold = threshold;
        self
    }

    /// Enables or disables team-first candidate ordering.
    pub fn with_team_first(mut self, team_first: bool) -> Self {
        self.team_first = team_first;
        self
    }

    /// Sets the utilization limit.
    pub fn with_max_utilization(mut self, max_utilization: f64) -> Self {
        self.max_utilization = max_utilization;
        self
    }

    /// Sets the minimum skill coverage fraction.
    pub fn with_min_skill_coverage(mut self, fraction: f64) -> Self {
        self.min_skill_coverage = fraction;
        self
    }

    /// Sets the delay estimation horizon.
    pub fn with_delay_horizon_days(mut self, days: u32) -> Self {
        self.delay_horizon_days = days;
        self
    }

    /// Sets the unassigned-task probe shift.
    pub fn with_unassigned_probe_shift_days(mut self, days: u32) -> Self {
        self.unassigned_probe_shift_days = days;
        self
    }

    /// Checks every field against its domain.
    pub fn validate(&self) -> Result<()> {
        if !(1..=5).contains(&self.mandatory_threshold) {
            return Err(PlanError::InvalidConfig(format!(
                "mandatory_threshold must be 1-5, got {}",
                self.mandatory_threshold
            )));
        }
        if !self.max_utilization.is_finite() || self.max_utilization <= 0.0 {
            return Err(PlanError::InvalidConfig(format!(
                "max_utilization must be positive, got {}",
                self.max_utilization
            )));
        }
        if !(0.0..=1.0).contains(&self.min_skill_coverage) {
            return Err(PlanError::InvalidConfig(format!(
                "min_skill_coverage must be within 0-1, got {}",
                self.min_skill_coverage
            )));
        }
        if self.delay_horizon_days == 0 {
            return Err(PlanError::InvalidConfig(
                "delay_horizon_days must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
