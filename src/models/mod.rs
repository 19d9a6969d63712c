//! Staffing domain models.
//!
//! Provides the input records (tasks, person skill rows), the calendar
//! window type, and the output plan.
//!
//! # Domain Mappings
//!
//! | u-staffing | Project Office | Consulting | Field Service |
//! |------------|----------------|------------|---------------|
//! | Task | Work package | Engagement | Work order |
//! | PersonSkillRecord | Skills matrix row | Consultant profile | Technician cert |
//! | Assignment | Owner + forecast | Staffing decision | Dispatch |
//! | Plan | Resource plan | Bench plan | Route sheet |

mod calendar;
mod person;
mod plan;
mod task;

pub use calendar::{inclusive_date_range, DateWindow};
pub use person::{EmployeeProfile, PersonSkillRecord, SkillTable};
pub use plan::{Assignee, Assignment, Plan, UNASSIGNED};
pub(crate) use plan::add_days;
pub use task::{
    effort_for_size, Priority, RequiredSkill, Task, TaskRow, DEFAULT_EFFORT_DAYS, DEFAULT_PHASE,
    MAX_REQUIRED_SKILLS,
};
