//! Skill- and capacity-aware task staffing.
//!
//! Assigns project tasks to employees one at a time, most urgent first,
//! checking each candidate's skills against the task's requirements and
//! their day-by-day load against their capacity. Every decision carries a
//! 0-100 risk score and a band so planners can see where the plan is thin.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `PersonSkillRecord`, `SkillTable`,
//!   `DateWindow`, `Assignment`, `Plan`
//! - **`capacity`**: Per-employee daily load ledger with front-loaded effort
//! - **`matcher`**: Skill scores and the mandatory/coverage gates
//! - **`risk`**: Skill, schedule, and overall risk with risk bands
//! - **`scheduler`**: The greedy `AssignmentEngine` and plan KPIs
//! - **`validation`**: Input integrity checks (duplicate IDs, domains, windows)
//! - **`config`**: `PlannerConfig` with JSON loading
//! - **`logging`**: `tracing` subscriber setup
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use u_staffing::config::PlannerConfig;
//! use u_staffing::models::{PersonSkillRecord, Priority, Task};
//! use u_staffing::scheduler::{AssignmentEngine, PlanKpi};
//!
//! let day = |d| NaiveDate::from_ymd_opt(2025, 3, d).unwrap();
//! let tasks = vec![
//!     Task::new("API", day(3), day(7))
//!         .with_priority(Priority::High)
//!         .with_work_size("M")
//!         .with_skill("Rust", 4.0),
//!     Task::new("Docs", day(3), day(4)).with_work_size("S").with_skill("Writing", 2.0),
//! ];
//! let records = vec![
//!     PersonSkillRecord::new("ana", "Rust", 4.0).with_job_level(1.2),
//!     PersonSkillRecord::new("ana", "Writing", 2.0),
//!     PersonSkillRecord::new("bo", "Writing", 4.0),
//! ];
//!
//! let engine = AssignmentEngine::new(PlannerConfig::default(), &records)?;
//! let run = engine.run(&tasks)?;
//! assert_eq!(run.plan.assignment_for_task("API").unwrap().assignee.as_str(), "ana");
//!
//! let kpi = PlanKpi::calculate(&run);
//! assert_eq!(kpi.unassigned, 0);
//! # Ok::<(), u_staffing::PlanError>(())
//! ```
//!
//! # Architecture
//!
//! The engine owns no calendar state between runs: every `run` builds a
//! fresh `CapacityLedger`. Candidate probes take `&CapacityLedger` and the
//! single commit per task takes `&mut CapacityLedger`.

pub mod capacity;
pub mod config;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod models;
pub mod risk;
pub mod scheduler;
pub mod validation;

pub use error::{PlanError, Result};
