/*
[INPUT]:  Raw form field values typed by the user
[OUTPUT]: Validated create requests with due dates resolved to UTC
[POS]:    Dashboard layer - machine and task form drafts
[UPDATE]: When form fields or accepted date formats change
*/

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};
use maintenance_adapter::{CreateMachineRequest, CreateTaskRequest};
use serde::{Deserialize, Serialize};

use super::error::{DashboardError, Result};

const LOCAL_INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Uncommitted values of the machine form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineDraft {
    pub name: String,
    pub location: String,
    pub description: String,
}

impl MachineDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn to_request(&self) -> Result<CreateMachineRequest> {
        Ok(CreateMachineRequest {
            name: required(&self.name, "name")?,
            location: optional(&self.location),
            description: optional(&self.description),
        })
    }
}

/// Uncommitted values of the task form; `due_date` is a local date-time
/// such as `2024-06-01T10:00`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: String,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, due_date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            due_date: due_date.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn to_request(&self, machine_id: &str, zone: &DueDateZone) -> Result<CreateTaskRequest> {
        let title = required(&self.title, "title")?;
        let raw_due = required(&self.due_date, "due date")?;
        Ok(CreateTaskRequest {
            title,
            description: optional(&self.description),
            due_date: zone.to_utc(&raw_due)?,
            machine_id: machine_id.to_string(),
        })
    }
}

/// Zone in which typed due dates are read and shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DueDateZone {
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl DueDateZone {
    pub fn from_offset(offset: Option<FixedOffset>) -> Self {
        offset.map(DueDateZone::Fixed).unwrap_or_default()
    }

    /// Resolve a local date-time input to an absolute instant.
    ///
    /// Ambiguous local times take the earlier instant; skipped ones are rejected.
    pub fn to_utc(self, raw: &str) -> Result<DateTime<Utc>> {
        let naive = parse_local_input(raw)?;
        match self {
            DueDateZone::Local => resolve(&Local, naive, raw),
            DueDateZone::Fixed(offset) => resolve(&offset, naive, raw),
        }
    }

    pub fn format(self, value: &DateTime<Utc>) -> String {
        match self {
            DueDateZone::Local => value.with_timezone(&Local).format(DISPLAY_FORMAT).to_string(),
            DueDateZone::Fixed(offset) => {
                value.with_timezone(&offset).format(DISPLAY_FORMAT).to_string()
            }
        }
    }
}

fn parse_local_input(raw: &str) -> Result<NaiveDateTime> {
    LOCAL_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| DashboardError::InvalidDueDate {
            value: raw.to_string(),
            reason: "expected YYYY-MM-DDTHH:MM".to_string(),
        })
}

fn resolve<Tz: TimeZone>(zone: &Tz, naive: NaiveDateTime, raw: &str) -> Result<DateTime<Utc>> {
    zone.from_local_datetime(&naive)
        .earliest()
        .map(|value| value.with_timezone(&Utc))
        .ok_or_else(|| DashboardError::InvalidDueDate {
            value: raw.to_string(),
            reason: "time does not exist in this zone".to_string(),
        })
}

fn required(value: &str, field: &'static str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DashboardError::MissingField { field });
    }
    Ok(trimmed.to_string())
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn plus_two() -> DueDateZone {
        DueDateZone::Fixed(FixedOffset::east_opt(2 * 3600).unwrap())
    }

    #[test]
    fn test_machine_draft_name_only() {
        let request = MachineDraft::named("Lathe 1").to_request().unwrap();
        assert_eq!(request.name, "Lathe 1");
        assert_eq!(request.location, None);
        assert_eq!(request.description, None);
    }

    #[test]
    fn test_machine_draft_blank_name_rejected() {
        let draft = MachineDraft {
            name: "   ".to_string(),
            location: "Hall A".to_string(),
            description: String::new(),
        };
        assert!(matches!(
            draft.to_request(),
            Err(DashboardError::MissingField { field: "name" })
        ));
    }

    #[rstest]
    #[case("2024-06-01T10:00")]
    #[case("2024-06-01T10:00:00")]
    #[case("2024-06-01 10:00")]
    #[case(" 2024-06-01T10:00 ")]
    fn test_task_draft_converts_local_input(#[case] due: &str) {
        let request = TaskDraft::new("Oil change", due)
            .to_request("m1", &plus_two())
            .unwrap();
        assert_eq!(
            request.due_date,
            Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
        );
        assert_eq!(request.machine_id, "m1");
    }

    #[test]
    fn test_task_draft_requires_title_and_due_date() {
        let missing_title = TaskDraft::new("", "2024-06-01T10:00").to_request("m1", &plus_two());
        assert!(matches!(
            missing_title,
            Err(DashboardError::MissingField { field: "title" })
        ));

        let missing_due = TaskDraft::new("Oil change", "").to_request("m1", &plus_two());
        assert!(matches!(
            missing_due,
            Err(DashboardError::MissingField { field: "due date" })
        ));
    }

    #[test]
    fn test_task_draft_rejects_unparseable_due_date() {
        let result = TaskDraft::new("Oil change", "tomorrow").to_request("m1", &plus_two());
        assert!(matches!(result, Err(DashboardError::InvalidDueDate { .. })));
    }

    #[test]
    fn test_local_zone_matches_chrono_local() {
        let expected = Local
            .from_local_datetime(
                &NaiveDateTime::parse_from_str("2024-06-01T10:00", "%Y-%m-%dT%H:%M").unwrap(),
            )
            .earliest()
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(DueDateZone::Local.to_utc("2024-06-01T10:00").unwrap(), expected);
    }

    #[test]
    fn test_format_uses_zone() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        assert_eq!(plus_two().format(&instant), "2024-06-01 10:00");
    }
}
