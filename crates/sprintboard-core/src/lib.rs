//! sprintboard-core - Core library for sprintboard
//!
//! Provides entity models, the dashboard metrics engine, snapshot loading
//! and configuration for project/task/sprint dashboards.

pub mod config;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod models;

pub use config::DashboardConfig;
pub use error::{CoreError, LoadReport};
pub use loader::SnapshotLoader;
pub use metrics::{
    DashboardStats, DashboardView, bucket_by_priority, bucket_by_status, build_burndown,
    compute_stats, project_progress_rows, team_workload_rows,
};
pub use models::DashboardSnapshot;
