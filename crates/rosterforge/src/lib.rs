//! RosterForge - volunteer duty scheduling
//!
//! Turns roles, volunteers, availabilities, friend links and previously
//! decided placements into an assignment of volunteers to role seats and
//! time slots that maximizes weighted coverage.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rosterforge::prelude::*;
//!
//! let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//! let at = |h| day.and_hms_opt(h, 0, 0).unwrap();
//!
//! let window = ScheduleWindow::tile(chrono::Duration::hours(1), at(8), at(12)).unwrap();
//! let bar = Role::new(RoleId(1), "Bar", Interval::new(at(8), at(12)).unwrap());
//! let alice = Volunteer::new(VolunteerId(1), "Alice")
//!     .with_availability(Interval::new(at(8), at(12)).unwrap());
//!
//! let problem = EventProblem::new(window, vec![bar], vec![alice]);
//! let mut scheduler = Scheduler::new(problem);
//! assert!(scheduler.is_valid().unwrap());
//! assert!(scheduler.missing().unwrap().values().all(|slots| slots.is_empty()));
//! ```

pub mod demand;
pub mod eligibility;
pub mod model_builder;
pub mod problem;
pub mod result;
pub mod scheduler;

#[cfg(feature = "console")]
pub use rosterforge_console as console;

pub use demand::DemandModel;
pub use eligibility::{accepts_category, Eligibility, FriendPair};
pub use model_builder::ScheduleModel;
pub use problem::EventProblem;
pub use result::{Assignment, Missing, Schedule, ScheduleResult};
pub use scheduler::Scheduler;

pub use rosterforge_config::{FriendMode, SchedulerConfig};
pub use rosterforge_core::{
    FixedPlacement, Interval, Result, Role, RoleId, RoleOccurrence, RosterError, ScheduleRow,
    ScheduleWindow, Volunteer, VolunteerId,
};
pub use rosterforge_solver::{
    BranchAndBoundSolver, MicroLpSolver, MilpSolver, SolveLimits, SolveStatus,
};

pub mod prelude {
    pub use super::{
        EventProblem, FixedPlacement, FriendMode, Interval, Role, RoleId, RoleOccurrence,
        RosterError, Schedule, ScheduleResult, ScheduleRow, ScheduleWindow, Scheduler,
        SchedulerConfig, SolveStatus, Volunteer, VolunteerId,
    };
}
