//! Task field rules, priority/status enums, and recurrence configuration.

use std::fmt;

use chrono::Utc;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use validator::ValidationError;

use crate::types::Timestamp;

pub const TITLE_MIN_LEN: u64 = 3;
pub const TITLE_MAX_LEN: u64 = 100;
pub const DESCRIPTION_MAX_LEN: u64 = 1000;

/// Estimated effort bounds in minutes (5 minutes to one day).
pub const ESTIMATE_MIN_MINUTES: i32 = 5;
pub const ESTIMATE_MAX_MINUTES: i32 = 1440;

pub const RECURRENCE_INTERVAL_MAX: u16 = 365;
pub const RECURRENCE_OCCURRENCES_MAX: u32 = 1000;

/// Error returned when a stored discriminant does not map to an enum value.
#[derive(Debug, thiserror::Error)]
#[error("unknown {kind} value {value}")]
pub struct UnknownDiscriminant {
    pub kind: &'static str,
    pub value: i16,
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Task priority. Stored as `0 = low`, `1 = medium`, `2 = high`.
///
/// Serialized by name. Deserialization also accepts the numeric storage
/// value, either as a JSON number or as a digit string in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_i16(self) -> i16 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
        }
    }
}

const PRIORITY_NAMES: &[&str] = &["low", "medium", "high"];

struct PriorityVisitor;

impl PriorityVisitor {
    fn from_code<E: de::Error>(code: i64) -> Result<Priority, E> {
        i16::try_from(code)
            .ok()
            .and_then(|c| Priority::try_from(c).ok())
            .ok_or_else(|| E::invalid_value(de::Unexpected::Signed(code), &"0, 1 or 2"))
    }
}

impl<'de> Visitor<'de> for PriorityVisitor {
    type Value = Priority;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a priority name (low, medium, high) or code (0, 1, 2)")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Priority, E> {
        match v {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => match v.parse::<i64>() {
                Ok(code) => Self::from_code(code),
                Err(_) => Err(E::unknown_variant(v, PRIORITY_NAMES)),
            },
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Priority, E> {
        Self::from_code(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Priority, E> {
        match i64::try_from(v) {
            Ok(code) => Self::from_code(code),
            Err(_) => Err(E::invalid_value(de::Unexpected::Unsigned(v), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriorityVisitor)
    }
}

impl TryFrom<i16> for Priority {
    type Error = UnknownDiscriminant;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Priority::Low),
            1 => Ok(Priority::Medium),
            2 => Ok(Priority::High),
            _ => Err(UnknownDiscriminant {
                kind: "priority",
                value,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Task workflow status. Stored as `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    pub fn as_i16(self) -> i16 {
        match self {
            TaskStatus::Pending => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Completed => 2,
            TaskStatus::Cancelled => 3,
        }
    }
}

impl TryFrom<i16> for TaskStatus {
    type Error = UnknownDiscriminant;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TaskStatus::Pending),
            1 => Ok(TaskStatus::InProgress),
            2 => Ok(TaskStatus::Completed),
            3 => Ok(TaskStatus::Cancelled),
            _ => Err(UnknownDiscriminant {
                kind: "status",
                value,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Recurrence
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecurrenceType {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// When a recurring task stops repeating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RecurrenceEnd {
    Never,
    OnDate { date: Timestamp },
    AfterOccurrences { count: u32 },
}

/// Recurrence settings persisted as a JSON column on the task.
///
/// ```json
/// { "type": "weekly", "interval": 2, "end": { "type": "afterOccurrences", "count": 10 } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceConfig {
    #[serde(rename = "type")]
    pub kind: RecurrenceType,
    pub interval: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<RecurrenceEnd>,
}

/// `validator` custom rule for task titles: the trimmed title must hold
/// between [`TITLE_MIN_LEN`] and [`TITLE_MAX_LEN`] characters.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let len = title.trim().chars().count() as u64;
    if !(TITLE_MIN_LEN..=TITLE_MAX_LEN).contains(&len) {
        return Err(ValidationError::new("title_length").with_message(
            format!("Title must be between {TITLE_MIN_LEN} and {TITLE_MAX_LEN} characters")
                .into(),
        ));
    }
    Ok(())
}

/// New tasks may not be due before the moment they are created.
pub fn validate_due_date(due: &Timestamp) -> Result<(), ValidationError> {
    if *due < Utc::now() {
        return Err(ValidationError::new("due_date_in_past")
            .with_message("Due date cannot be in the past".into()));
    }
    Ok(())
}

/// `validator` custom rule for [`RecurrenceConfig`].
pub fn validate_recurrence(config: &RecurrenceConfig) -> Result<(), ValidationError> {
    if config.interval == 0 || config.interval > RECURRENCE_INTERVAL_MAX {
        return Err(ValidationError::new("recurrence_interval").with_message(
            format!("Interval must be between 1 and {RECURRENCE_INTERVAL_MAX}").into(),
        ));
    }

    if let Some(RecurrenceEnd::AfterOccurrences { count }) = config.end {
        if count == 0 || count > RECURRENCE_OCCURRENCES_MAX {
            return Err(ValidationError::new("recurrence_count").with_message(
                format!("Occurrence count must be between 1 and {RECURRENCE_OCCURRENCES_MAX}")
                    .into(),
            ));
        }
    }

    Ok(())
}
