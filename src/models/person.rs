//! People and skills.
//!
//! Skill data arrives as one [`PersonSkillRecord`] per (employee, skill)
//! pair. [`SkillTable`] indexes those rows into one [`EmployeeProfile`] per
//! employee, which is what the matcher, risk scoring, and capacity ledger
//! read from.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// One (employee, skill) row of reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonSkillRecord {
    /// Employee identifier.
    pub employee_id: String,
    /// Skill name.
    pub skill: String,
    /// Raw proficiency score.
    pub proficiency: f64,
    /// Raw job level score.
    pub job_level: f64,
    /// Daily capacity (1.0 = one person-day per day).
    pub fte: f64,
    /// Department listed on this row, if any.
    #[serde(default)]
    pub department: Option<String>,
}

impl PersonSkillRecord {
    /// Creates a row with job level 1.0, fte 1.0 and no department.
    pub fn new(employee_id: impl Into<String>, skill: impl Into<String>, proficiency: f64) -> Self {
        Self {
            employee_id: employee_id.into(),
            skill: skill.into(),
            proficiency,
            job_level: 1.0,
            fte: 1.0,
            department: None,
        }
    }

    /// Sets the job level.
    pub fn with_job_level(mut self, job_level: f64) -> Self {
        self.job_level = job_level;
        self
    }

    /// Sets the daily capacity.
    pub fn with_fte(mut self, fte: f64) -> Self {
        self.fte = fte;
        self
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// proficiency × job_level.
    #[inline]
    pub fn proficiency_output(&self) -> f64 {
        self.proficiency * self.job_level
    }
}

/// Everything known about one employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Employee identifier.
    pub id: String,
    /// Daily capacity: the maximum `fte` across the employee's rows.
    pub fte: f64,
    /// Departments seen on the employee's rows.
    pub departments: BTreeSet<String>,
    /// Skill name → proficiency output (first row wins on duplicates).
    pub skills: HashMap<String, f64>,
}

impl EmployeeProfile {
    /// Creates a profile with no skills or departments.
    pub fn new(id: impl Into<String>, fte: f64) -> Self {
        Self {
            id: id.into(),
            fte,
            departments: BTreeSet::new(),
            skills: HashMap::new(),
        }
    }

    /// Adds a skill with its proficiency output.
    pub fn with_skill(mut self, name: impl Into<String>, proficiency_output: f64) -> Self {
        self.skills.insert(name.into(), proficiency_output);
        self
    }

    /// Adds a department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.departments.insert(department.into());
        self
    }

    /// Whether the employee has any record for a skill.
    pub fn has_skill(&self, name: &str) -> bool {
        self.skills.contains_key(name)
    }

    /// Proficiency output for a skill, if recorded.
    pub fn proficiency_output(&self, name: &str) -> Option<f64> {
        self.skills.get(name).copied()
    }

    /// Whether the employee belongs to a department.
    pub fn in_department(&self, department: &str) -> bool {
        self.departments.contains(department)
    }
}

/// Per-employee index over skill rows, ordered by employee id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillTable {
    employees: BTreeMap<String, EmployeeProfile>,
}

impl SkillTable {
    /// Builds the table from raw rows.
    pub fn from_records(records: &[PersonSkillRecord]) -> Self {
        let mut employees: BTreeMap<String, EmployeeProfile> = BTreeMap::new();

        for rec in records {
            let profile = employees
                .entry(rec.employee_id.clone())
                .or_insert_with(|| EmployeeProfile::new(&rec.employee_id, rec.fte));

            profile.fte = profile.fte.max(rec.fte);
            profile
                .skills
                .entry(rec.skill.trim().to_string())
                .or_insert_with(|| rec.proficiency_output());
            if let Some(dept) = rec.department.as_deref().map(str::trim) {
                if !dept.is_empty() {
                    profile.departments.insert(dept.to_string());
                }
            }
        }

        Self { employees }
    }

    /// Looks up an employee.
    pub fn get(&self, employee_id: &str) -> Option<&EmployeeProfile> {
        self.employees.get(employee_id)
    }

    /// All employees in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &EmployeeProfile> {
        self.employees.values()
    }

    /// Employee ids in ascending order.
    pub fn employee_ids(&self) -> Vec<&str> {
        self.employees.keys().map(String::as_str).collect()
    }

    /// Number of employees.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Whether the table has no employees.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proficiency_output() {
        let r = PersonSkillRecord::new("E1", "Rust", 4.0).with_job_level(1.5);
        assert!((r.proficiency_output() - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_table_uses_max_fte() {
        let table = SkillTable::from_records(&[
            PersonSkillRecord::new("E1", "Rust", 3.0).with_fte(0.5),
            PersonSkillRecord::new("E1", "SQL", 2.0).with_fte(0.8),
        ]);
        let e1 = table.get("E1").unwrap();
        assert!((e1.fte - 0.8).abs() < 1e-10);
        assert!(e1.has_skill("Rust"));
        assert!(e1.has_skill("SQL"));
        assert!(!e1.has_skill("Go"));
    }

    #[test]
    fn test_first_duplicate_row_wins() {
        let table = SkillTable::from_records(&[
            PersonSkillRecord::new("E1", "Rust", 3.0),
            PersonSkillRecord::new("E1", "Rust", 5.0),
        ]);
        assert_eq!(table.get("E1").unwrap().proficiency_output("Rust"), Some(3.0));
    }

    #[test]
    fn test_employees_sorted_by_id() {
        let table = SkillTable::from_records(&[
            PersonSkillRecord::new("E3", "a", 1.0),
            PersonSkillRecord::new("E1", "a", 1.0),
            PersonSkillRecord::new("E2", "a", 1.0),
        ]);
        assert_eq!(table.employee_ids(), vec!["E1", "E2", "E3"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_departments_collected() {
        let table = SkillTable::from_records(&[
            PersonSkillRecord::new("E1", "a", 1.0).with_department("Eng"),
            PersonSkillRecord::new("E1", "b", 1.0).with_department(" Ops "),
            PersonSkillRecord::new("E1", "c", 1.0).with_department(""),
        ]);
        let e1 = table.get("E1").unwrap();
        assert!(e1.in_department("Eng"));
        assert!(e1.in_department("Ops"));
        assert_eq!(e1.departments.len(), 2);
    }

    #[test]
    fn test_empty_table() {
        let table = SkillTable::from_records(&[]);
        assert!(table.is_empty());
        assert!(table.get("E1").is_none());
    }
}
