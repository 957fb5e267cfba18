//! Raw source records as they appear in the data files.
//!
//! The three collections come from an upstream system that exports camelCase
//! JSON. Dates stay as strings here: the normalizer parses them leniently and
//! drops unparseable values rather than failing the whole load.

use serde::{Deserialize, Serialize};

/// A project: a duration of work spanning a start and (optionally) end date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub customer: String,
    pub status: String,
    pub priority: Option<String>,
    pub assigned_to: Vec<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub estimated_hours: Option<f64>,
    pub description: Option<String>,
}

/// A work order: a single scheduled visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkOrder {
    pub id: String,
    pub title: String,
    pub customer: String,
    pub status: String,
    pub priority: Option<String>,
    pub assigned_to: Vec<String>,
    /// Role placeholders ("electrician", "crew-b") scheduled alongside named
    /// people. The normalizer concatenates these after `assigned_to`.
    pub assigned_roles: Vec<String>,
    pub location: Option<String>,
    pub scheduled_date: String,
    pub completed_date: Option<String>,
    pub estimated_hours: Option<f64>,
    pub description: Option<String>,
}

/// A recurring service series, represented by its next occurrence.
///
/// Note the missing status field: a recurring series has no lifecycle state
/// of its own in this model, and the normalizer stamps every occurrence
/// `"active"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RecurringTask {
    pub id: String,
    pub name: String,
    pub customer: String,
    /// Maps to `WorkItem::priority`.
    pub activity_level: Option<String>,
    pub assigned_to: Vec<String>,
    pub location: Option<String>,
    /// Cadence label ("weekly", "monthly"). Informational only; occurrences
    /// are not expanded, the upstream system supplies `next_occurrence`.
    pub frequency: Option<String>,
    pub next_occurrence: String,
    pub end_date: Option<String>,
    pub estimated_hours: Option<f64>,
    pub description: Option<String>,
}
