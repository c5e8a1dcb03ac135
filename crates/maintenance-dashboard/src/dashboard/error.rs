/*
[INPUT]:  Draft validation failures and adapter errors
[OUTPUT]: DashboardError returned by every dashboard operation
[POS]:    Dashboard layer - error taxonomy
[UPDATE]: When adding operations with new failure modes
*/

use maintenance_adapter::MaintenanceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("no machine selected")]
    NoMachineSelected,

    #[error("invalid due date {value:?}: {reason}")]
    InvalidDueDate { value: String, reason: String },

    #[error(transparent)]
    Api(#[from] MaintenanceError),
}

impl DashboardError {
    /// Rejected locally, before any request was sent
    pub fn is_validation(&self) -> bool {
        !matches!(self, DashboardError::Api(_))
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
