//! Core of the academic planner.
//!
//! This crate holds everything the CLI and the HTTP server share:
//! - `import`: the ICS import pipeline (parse, classify, match, normalize, store)
//! - `model` and `store`: persisted records and the storage trait
//! - `tasks` and `overview`: task actions and the grouped/dashboard/Gantt views

pub mod classify;
pub mod config;
pub mod course_match;
pub mod error;
pub mod event;
pub mod ics;
pub mod import;
pub mod model;
pub mod normalize;
pub mod overview;
pub mod store;
pub mod tasks;

pub use classify::TaskType;
pub use error::{PlannerError, PlannerResult};
pub use import::{ImportOutcome, import_calendar};
pub use model::{Course, NewCourse, NewTask, Task, User};
pub use store::{JsonStore, PlannerStore};
