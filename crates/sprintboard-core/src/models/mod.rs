//! Data models for sprintboard

pub mod de;
pub mod project;
pub mod snapshot;
pub mod sprint;
pub mod task;
pub mod user;

pub use project::{Project, ProjectStatus};
pub use snapshot::DashboardSnapshot;
pub use sprint::{BurndownSample, Sprint, SprintStatus};
pub use task::{Task, TaskPriority, TaskStatus};
pub use user::{UserProfile, UserRef};
