/*
[INPUT]:  MaintenanceApi, user intents
[OUTPUT]: Dashboard controller, state snapshot, form drafts
[POS]:    Dashboard layer root
[UPDATE]: When adding dashboard submodules
*/

pub mod controller;
pub mod draft;
pub mod error;
pub mod invalidation;
pub mod state;

pub use controller::Dashboard;
pub use draft::{DueDateZone, MachineDraft, TaskDraft};
pub use error::{DashboardError, Result};
pub use invalidation::{Mutation, Query};
pub use state::{DashboardState, Notification, NotificationLevel, Operation, TaskTicket};
