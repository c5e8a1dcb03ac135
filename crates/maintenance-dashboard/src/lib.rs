/*
[INPUT]:  Public API exports for the maintenance-dashboard crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod dashboard;
pub mod logging;

// Re-export main types for convenience
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardError, DashboardState, MachineDraft, TaskDraft};
