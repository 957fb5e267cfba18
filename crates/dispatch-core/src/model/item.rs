use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The three kinds of schedulable work.
///
/// The kind tags an item's provenance and decides how the bucketer reads its
/// dates: work orders and recurring jobs are point events, projects span a
/// range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    Project,
    WorkOrder,
    RecurringJob,
}

impl ItemKind {
    /// The serialized kebab-case name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::WorkOrder => "work-order",
            Self::RecurringJob => "recurring-job",
        }
    }

    /// Returns `true` for kinds whose presence on a date is exact-date
    /// equality rather than interval overlap.
    #[must_use]
    pub const fn is_point_event(self) -> bool {
        matches!(self, Self::WorkOrder | Self::RecurringJob)
    }
}

/// The unified schedule entry produced by the normalizer.
///
/// A `WorkItem` is a derived value: it is rebuilt from the source collections
/// on every run and never stored or mutated. `id` is unique within one source
/// collection only; two items of different kinds may share an id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkItem {
    pub id: String,
    pub kind: ItemKind,
    pub title: String,
    pub customer: String,
    /// Free-form status label; the vocabulary is source-defined and not
    /// unified across kinds.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    pub assigned_to: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// `None` when the source date string failed to parse; such an item
    /// silently matches no calendar bucket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "project" => Ok(Self::Project),
            "work-order" | "workorder" => Ok(Self::WorkOrder),
            "recurring-job" | "recurring" => Ok(Self::RecurringJob),
            _ => Err(ParseEnumError {
                expected: "kind",
                got: s.to_string(),
            }),
        }
    }
}
