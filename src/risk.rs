//! Risk scoring.
//!
//! Pure functions that turn skill and capacity judgments into 0-100 risk
//! scores, and the step function that maps a score to a [`RiskBand`].
//!
//! # Dimensions
//!
//! | Score | Measures |
//! |-------|----------|
//! | Gap | Aggregate proficiency shortfall vs. the task's required total |
//! | Coverage | Importance-weighted share of required skills with no record |
//! | Skill | `max(gap, coverage)` |
//! | Schedule | Over-utilization and projected delay |
//! | Overall | `max(skill, schedule)` |

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{EmployeeProfile, RequiredSkill};

/// Risk score carried by every unassigned task.
pub const MAX_RISK: f64 = 100.0;

/// Utilization tolerance below which a window counts as within capacity.
const UTILIZATION_EPSILON: f64 = 1e-6;
/// Maximum points from over-utilization (reached at 200% utilization).
const UTILIZATION_WEIGHT: f64 = 60.0;
/// Maximum points from delay (reached at [`DELAY_SATURATION_DAYS`]).
const DELAY_WEIGHT: f64 = 40.0;
const DELAY_SATURATION_DAYS: f64 = 20.0;

/// Clamps to [0, 1].
#[inline]
pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Categorical risk level.
///
/// Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskBand {
    /// Score <= 20.
    Low,
    /// Score in (20, 50].
    Medium,
    /// Score in (50, 70].
    High,
    /// Score > 70.
    Critical,
}

impl RiskBand {
    /// All bands, least severe first.
    pub const ALL: [RiskBand; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Maps a 0-100 score to a band.
    ///
    /// # Example
    /// ```
    /// use u_staffing::risk::RiskBand;
    ///
    /// assert_eq!(RiskBand::from_score(20.0), RiskBand::Low);
    /// assert_eq!(RiskBand::from_score(20.5), RiskBand::Medium);
    /// assert_eq!(RiskBand::from_score(100.0), RiskBand::Critical);
    /// ```
    pub fn from_score(score: f64) -> Self {
        if score <= 20.0 {
            Self::Low
        } else if score <= 50.0 {
            Self::Medium
        } else if score <= 70.0 {
            Self::High
        } else {
            Self::Critical
        }
    }

    /// Display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a coverage check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    /// Required skills the employee has no record for, in requirement order.
    pub missing_skills: Vec<String>,
    /// Importance-weighted missing share, 0-100.
    pub risk: f64,
}

/// Risk from an aggregate proficiency shortfall.
///
/// Zero when nothing is required or the allocation meets the requirement.
pub fn skill_gap_risk(required_total: f64, allocated_total: f64) -> f64 {
    if required_total <= 0.0 || allocated_total >= required_total {
        return 0.0;
    }
    clamp01((required_total - allocated_total) / required_total) * 100.0
}

/// Risk from required skills the employee has no record of.
pub fn coverage_risk(employee: &EmployeeProfile, required: &[RequiredSkill]) -> Coverage {
    let mut total_weight = 0.0;
    let mut missing_weight = 0.0;
    let mut missing_skills = Vec::new();

    for skill in required {
        total_weight += skill.importance;
        if !employee.has_skill(&skill.name) {
            missing_weight += skill.importance;
            missing_skills.push(skill.name.clone());
        }
    }

    if total_weight <= 0.0 {
        return Coverage::default();
    }
    Coverage {
        missing_skills,
        risk: clamp01(missing_weight / total_weight) * 100.0,
    }
}

/// Combined skill risk: the worse of gap and coverage.
#[inline]
pub fn skill_risk(gap_risk: f64, coverage_risk: f64) -> f64 {
    gap_risk.max(coverage_risk)
}

/// Risk from over-utilization and projected delay, 0-100.
///
/// - Utilization contributes up to 60 points, linearly from 100% to 200%.
/// - Delay contributes up to 40 points, linearly from 0 to 20 days.
pub fn schedule_risk(peak_utilization: f64, delay_days: u32) -> f64 {
    if peak_utilization <= 1.0 + UTILIZATION_EPSILON && delay_days == 0 {
        return 0.0;
    }

    let utilization_component = clamp01(peak_utilization - 1.0) * UTILIZATION_WEIGHT;
    let delay_component = clamp01(f64::from(delay_days) / DELAY_SATURATION_DAYS) * DELAY_WEIGHT;

    (utilization_component + delay_component).clamp(0.0, MAX_RISK)
}

/// Overall risk: the weakest dimension.
#[inline]
pub fn overall_risk(skill_risk: f64, schedule_risk: f64) -> f64 {
    skill_risk.max(schedule_risk)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(skills: &[&str]) -> EmployeeProfile {
        skills
            .iter()
            .fold(EmployeeProfile::new("E1", 1.0), |e, s| e.with_skill(*s, 3.0))
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(RiskBand::from_score(0.0), RiskBand::Low);
        assert_eq!(RiskBand::from_score(20.0), RiskBand::Low);
        assert_eq!(RiskBand::from_score(20.01), RiskBand::Medium);
        assert_eq!(RiskBand::from_score(50.0), RiskBand::Medium);
        assert_eq!(RiskBand::from_score(50.01), RiskBand::High);
        assert_eq!(RiskBand::from_score(70.0), RiskBand::High);
        assert_eq!(RiskBand::from_score(70.01), RiskBand::Critical);
        assert_eq!(RiskBand::from_score(100.0), RiskBand::Critical);
    }

    #[test]
    fn test_band_monotonic() {
        let mut prev = RiskBand::Low;
        for i in 0..=1000 {
            let band = RiskBand::from_score(f64::from(i) / 10.0);
            assert!(band >= prev, "band dropped at score {}", f64::from(i) / 10.0);
            prev = band;
        }
        assert_eq!(prev, RiskBand::Critical);
    }

    #[test]
    fn test_gap_risk_zero_cases() {
        assert_eq!(skill_gap_risk(0.0, 0.0), 0.0);
        assert_eq!(skill_gap_risk(0.0, 50.0), 0.0);
        assert_eq!(skill_gap_risk(-5.0, 0.0), 0.0);
        for r in [1.0, 10.0, 250.0] {
            assert_eq!(skill_gap_risk(r, r), 0.0);
            assert_eq!(skill_gap_risk(r, r * 2.0), 0.0);
        }
    }

    #[test]
    fn test_gap_risk_partial() {
        assert!((skill_gap_risk(10.0, 7.5) - 25.0).abs() < 1e-10);
        assert!((skill_gap_risk(10.0, 0.0) - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_coverage_risk_weighted() {
        let e = employee(&["Rust"]);
        let required = vec![RequiredSkill::new("Rust", 3.0), RequiredSkill::new("SQL", 1.0)];
        let c = coverage_risk(&e, &required);
        assert_eq!(c.missing_skills, vec!["SQL"]);
        assert!((c.risk - 25.0).abs() < 1e-10);
    }

    #[test]
    fn test_coverage_risk_no_weight() {
        let e = employee(&[]);
        assert_eq!(coverage_risk(&e, &[]), Coverage::default());

        let zero = vec![RequiredSkill::new("Rust", 0.0)];
        let c = coverage_risk(&e, &zero);
        assert!(c.missing_skills.is_empty());
        assert_eq!(c.risk, 0.0);
    }

    #[test]
    fn test_schedule_risk_zero_at_capacity() {
        assert_eq!(schedule_risk(1.0, 0), 0.0);
        assert_eq!(schedule_risk(0.3, 0), 0.0);
        assert_eq!(schedule_risk(1.0 + 1e-7, 0), 0.0);
    }

    #[test]
    fn test_schedule_risk_components() {
        assert!((schedule_risk(1.5, 0) - 30.0).abs() < 1e-10);
        assert!((schedule_risk(1.0, 10) - 20.0).abs() < 1e-10);
        assert!((schedule_risk(0.5, 20) - 40.0).abs() < 1e-10);
        assert!((schedule_risk(3.0, 365) - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_schedule_risk_monotonic_and_bounded() {
        let utils = [0.0, 0.5, 1.0, 1.2, 1.8, 2.0, 5.0];
        let delays = [0, 1, 5, 19, 20, 400];
        for &u in &utils {
            let mut prev = -1.0;
            for &dly in &delays {
                let r = schedule_risk(u, dly);
                assert!((0.0..=100.0).contains(&r));
                assert!(r >= prev);
                prev = r;
            }
        }
        for &dly in &delays {
            let mut prev = -1.0;
            for &u in &utils {
                let r = schedule_risk(u, dly);
                assert!(r >= prev);
                prev = r;
            }
        }
    }

    #[test]
    fn test_combinators() {
        assert_eq!(skill_risk(10.0, 40.0), 40.0);
        assert_eq!(overall_risk(40.0, 15.0), 40.0);
    }
}
