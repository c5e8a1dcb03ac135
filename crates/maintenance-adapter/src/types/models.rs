/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
[UPDATE]: 2026-10-02 accept naive date-times from the backend as UTC
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::TaskStatus;

/// A physical asset subject to maintenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

/// A scheduled maintenance action against a machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceTask {
    pub id: String,
    pub machine_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "serde_helpers::datetime")]
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::datetime_option"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::datetime_option"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_is_active() -> bool {
    true
}

pub(crate) mod serde_helpers {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

    /// Parses RFC 3339 date-times, falling back to naive ISO 8601 read as UTC.
    pub fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Ok(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
            .map(|naive| naive.and_utc())
            .map_err(|err| format!("invalid date-time {raw:?}: {err}"))
    }

    pub fn format_datetime(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub mod datetime {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(&super::format_datetime(value))
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = String::deserialize(deserializer)?;
            super::parse_datetime(&raw).map_err(serde::de::Error::custom)
        }
    }

    pub mod datetime_option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(value) => serializer.serialize_str(&super::format_datetime(value)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            match raw {
                Some(raw) if !raw.trim().is_empty() => super::parse_datetime(&raw)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
                _ => Ok(None),
            }
        }
    }
}
