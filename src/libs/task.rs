//! Task domain model shared by the service client, the store and the views.
//!
//! A [`Task`] is the only entity the service knows about. Tasks are created
//! from a [`NewTask`], changed through a partial [`TaskPatch`] and removed by
//! id. The scoring fields (`importance_score`, `importance_explanation`,
//! `insights`, `analysis_time`) are attached by the server's optimize action
//! and are treated as one all-or-nothing group.
//!
//! ## Wire format
//!
//! Field names match the service's JSON exactly. Timestamps are written as
//! RFC 3339 and read either with an offset or naive (the service stores naive
//! UTC values), see [`timestamp`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest title the service accepts.
pub const MAX_TITLE_LEN: usize = 200;

/// Upper edges (inclusive) of the low and medium score bands.
const LOW_SCORE_CEIL: f64 = 0.4;
const MEDIUM_SCORE_CEIL: f64 = 0.7;

/// Task priority as understood by the service.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Maps an importance score onto the service's priority bands.
    pub fn from_score(score: f64) -> Self {
        if score <= LOW_SCORE_CEIL {
            Priority::Low
        } else if score <= MEDIUM_SCORE_CEIL {
            Priority::Medium
        } else {
            Priority::High
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority '{}', expected low, medium or high", other)),
        }
    }
}

/// A task as returned by the service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, with = "timestamp::option")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub importance_score: Option<f64>,
    #[serde(default)]
    pub importance_explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance_category: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<Vec<String>>,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub analysis_time: Option<DateTime<Utc>>,
}

impl Task {
    /// True once the optimize action has scored this task.
    pub fn is_analyzed(&self) -> bool {
        self.importance_score.is_some()
    }

    /// Checks that the scoring fields are absent whenever the score is absent.
    pub fn analysis_consistent(&self) -> bool {
        self.importance_score.is_some()
            || (self.importance_explanation.is_none()
                && self.insights.is_none()
                && self.analysis_time.is_none()
                && self.importance_category.is_none())
    }

    /// Drops scoring fields that arrived without a score.
    pub fn normalized(mut self) -> Self {
        if !self.analysis_consistent() {
            tracing::warn!(task_id = self.id, "dropping scoring fields of a task without importance score");
            self.importance_explanation = None;
            self.insights = None;
            self.analysis_time = None;
            self.importance_category = None;
        }
        self
    }

    /// Category reported by the service, or derived from the score.
    pub fn importance_category(&self) -> Option<Priority> {
        self.importance_category.or_else(|| self.importance_score.map(Priority::from_score))
    }

    /// Score as a rounded percentage, e.g. `0.734` gives `73`.
    pub fn importance_percent(&self) -> Option<u8> {
        self.importance_score.map(|score| (score.clamp(0.0, 1.0) * 100.0).round() as u8)
    }
}

/// Validates a task title the way the service does.
pub fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title cannot be empty".to_string());
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(format!("Title cannot be longer than {} characters", MAX_TITLE_LEN));
    }
    Ok(())
}

/// Payload for creating a task: everything except the id.
///
/// `created_at` is sent along when the caller sets it, but the server's value
/// in the response is the only one the client keeps.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    #[serde(with = "timestamp::option")]
    pub deadline: Option<DateTime<Utc>>,
    pub completed: bool,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl NewTask {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: String::new(),
            priority: Priority::default(),
            deadline: None,
            completed: false,
            created_at: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<DateTime<Utc>>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_title(&self.title)
    }
}

/// Partial update of a task. Only fields that are `Some` are sent.
///
/// `deadline` has three states: `None` leaves it alone, `Some(None)` clears
/// it and `Some(Some(ts))` sets it.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "timestamp::serialize_patch")]
    pub deadline: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.is_empty() {
            return Err("Nothing to update".to_string());
        }
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Serde helpers for the service's timestamps.
pub mod timestamp {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Parses RFC 3339, a naive ISO-8601 date-time (read as UTC) or a plain date.
    pub fn parse(value: &str) -> Option<DateTime<Utc>> {
        let value = value.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
            return Some(ts.with_timezone(&Utc));
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
                return Some(naive.and_utc());
            }
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{}'", raw)))
    }

    pub(super) fn serialize_patch<S: Serializer>(
        value: &Option<Option<DateTime<Utc>>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        option::serialize(&(*value).flatten(), serializer)
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(ts: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error> {
            match ts {
                Some(ts) => serializer.serialize_str(&super::format(ts)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid timestamp '{}'", raw))),
            }
        }
    }
}
