/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::TaskStatus;
use super::models::serde_helpers;

/// Body of `POST machines/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMachineRequest {
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Body of `PUT machines/{id}`; only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMachineRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Body of `POST tasks/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(with = "serde_helpers::datetime")]
    pub due_date: DateTime<Utc>,
    pub machine_id: String,
}

/// Body of `PUT tasks/{id}`; only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::datetime_option"
    )]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl UpdateTaskRequest {
    /// A status-only update.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.status.is_none()
    }
}

/// Query string of `GET tasks/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine_id: Option<String>,
    #[serde(rename = "status_filter", skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskQuery {
    pub fn for_machine(machine_id: impl Into<String>) -> Self {
        Self {
            machine_id: Some(machine_id.into()),
            status: None,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_status_update_sends_only_status() {
        let body = serde_json::to_value(UpdateTaskRequest::status(TaskStatus::Completed)).unwrap();
        assert_eq!(body, json!({ "status": "completed" }));
    }

    #[test]
    fn test_create_machine_keeps_null_fields() {
        let body = serde_json::to_value(CreateMachineRequest {
            name: "Lathe 1".to_string(),
            location: None,
            description: None,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({ "name": "Lathe 1", "location": null, "description": null })
        );
    }

    #[test]
    fn test_create_task_due_date_is_utc_iso() {
        let body = serde_json::to_value(CreateTaskRequest {
            title: "Oil change".to_string(),
            description: None,
            due_date: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
            machine_id: "m1".to_string(),
        })
        .unwrap();
        assert_eq!(body["due_date"], "2024-06-01T08:00:00.000Z");
        assert_eq!(body["machine_id"], "m1");
    }
}
