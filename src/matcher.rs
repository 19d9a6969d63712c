//! Skill matching.
//!
//! Judges how well one employee's skill records fit a task's requirements:
//! a weighted proficiency score plus two hard gates (mandatory skills and
//! minimum coverage) used to drop candidates before scoring.

use crate::models::{EmployeeProfile, RequiredSkill};

/// Default minimum share of required importance an employee must cover.
pub const DEFAULT_MIN_COVERAGE: f64 = 0.01;

/// Σ proficiency_output × importance over the required skills.
///
/// Skills the employee has no record of contribute 0.
pub fn allocated_skill_score(employee: &EmployeeProfile, required: &[RequiredSkill]) -> f64 {
    required
        .iter()
        .filter_map(|s| employee.proficiency_output(&s.name).map(|p| p * s.importance))
        .sum()
}

/// First mandatory skill (importance >= `threshold`) the employee lacks.
pub fn missing_mandatory_skill<'a>(
    employee: &EmployeeProfile,
    required: &'a [RequiredSkill],
    threshold: f64,
) -> Option<&'a str> {
    required
        .iter()
        .find(|s| s.importance >= threshold && !employee.has_skill(&s.name))
        .map(|s| s.name.as_str())
}

/// Whether the employee has every mandatory skill.
pub fn has_mandatory_skills(
    employee: &EmployeeProfile,
    required: &[RequiredSkill],
    threshold: f64,
) -> bool {
    missing_mandatory_skill(employee, required, threshold).is_none()
}

/// Whether the employee covers at least `min_fraction` of the required
/// importance with skills they have any record of.
///
/// Always true when nothing (or only zero-weight skills) is required.
pub fn has_minimum_skill_coverage(
    employee: &EmployeeProfile,
    required: &[RequiredSkill],
    min_fraction: f64,
) -> bool {
    if required.is_empty() {
        return true;
    }
    let total: f64 = required.iter().map(|s| s.importance).sum();
    if total <= 0.0 {
        return true;
    }
    let matched: f64 = required
        .iter()
        .filter(|s| employee.has_skill(&s.name))
        .map(|s| s.importance)
        .sum();
    matched / total >= min_fraction
}
