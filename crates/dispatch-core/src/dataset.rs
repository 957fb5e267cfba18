//! Source data loading.
//!
//! A dispatch data root holds `.dispatch/` with the project config and three
//! JSON collection files. A missing file is not an error — the upstream
//! export simply has nothing of that kind — but a file that exists and fails
//! to parse is reported with its path.

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use crate::config::DataConfig;
use crate::error::DispatchError;
use crate::model::source::{Project, RecurringTask, WorkOrder};

pub const DISPATCH_DIR: &str = ".dispatch";
pub const PROJECTS_FILE: &str = "projects.json";
pub const WORK_ORDERS_FILE: &str = "work-orders.json";
pub const RECURRING_FILE: &str = "recurring.json";

/// The three source collections, as loaded from disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub projects: Vec<Project>,
    pub work_orders: Vec<WorkOrder>,
    pub recurring: Vec<RecurringTask>,
}

impl Dataset {
    /// Load all three collections from `<root>/.dispatch/`, using the file
    /// names from `data` (the config `[data]` section, defaulting to the
    /// `*_FILE` constants).
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NotInitialized`] when `.dispatch/` does not
    /// exist, or [`DispatchError::DataFileParse`] when a collection file is
    /// present but not valid JSON for its record type.
    pub fn load(root: &Path, data: &DataConfig) -> Result<Self> {
        let dir = root.join(DISPATCH_DIR);
        if !dir.exists() {
            return Err(DispatchError::NotInitialized {
                root: root.to_path_buf(),
            }
            .into());
        }

        let dataset = Self {
            projects: load_collection(&dir.join(&data.projects_file))?,
            work_orders: load_collection(&dir.join(&data.work_orders_file))?,
            recurring: load_collection(&dir.join(&data.recurring_file))?,
        };

        tracing::debug!(
            root = %root.display(),
            projects = dataset.projects.len(),
            work_orders = dataset.work_orders.len(),
            recurring = dataset.recurring.len(),
            "loaded dataset"
        );

        Ok(dataset)
    }

    /// Write the three collection files under `<root>/.dispatch/`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any file write fails.
    pub fn write(&self, root: &Path, data: &DataConfig) -> Result<()> {
        let dir = root.join(DISPATCH_DIR);
        write_collection(&dir.join(&data.projects_file), &self.projects)?;
        write_collection(&dir.join(&data.work_orders_file), &self.work_orders)?;
        write_collection(&dir.join(&data.recurring_file), &self.recurring)?;
        Ok(())
    }

    /// A small demo dataset with dates pinned around `today`, used to seed
    /// newly initialized data roots.
    #[must_use]
    pub fn sample(today: NaiveDate) -> Self {
        let day = |offset: i64| {
            let shifted = if offset < 0 {
                today.checked_sub_days(Days::new(offset.unsigned_abs()))
            } else {
                today.checked_add_days(Days::new(offset.unsigned_abs()))
            };
            shifted.unwrap_or(today).format("%Y-%m-%d").to_string()
        };

        Self {
            projects: vec![
                Project {
                    id: "proj-1001".to_string(),
                    name: "Warehouse lighting retrofit".to_string(),
                    customer: "Acme Foods".to_string(),
                    status: "in-progress".to_string(),
                    priority: Some("high".to_string()),
                    assigned_to: vec!["marta".to_string(), "jon".to_string()],
                    start_date: day(-2),
                    end_date: Some(day(5)),
                    estimated_hours: Some(120.0),
                    description: Some("Swap fixtures across bays 1-6".to_string()),
                },
                Project {
                    id: "proj-1002".to_string(),
                    name: "Parking lot resurfacing".to_string(),
                    customer: "Riverside Mall".to_string(),
                    status: "planned".to_string(),
                    priority: Some("medium".to_string()),
                    assigned_to: vec!["crew-b".to_string()],
                    start_date: day(10),
                    end_date: Some(day(14)),
                    estimated_hours: Some(80.0),
                    description: None,
                },
            ],
            work_orders: vec![
                WorkOrder {
                    id: "wo-2001".to_string(),
                    title: "Replace walk-in freezer compressor".to_string(),
                    customer: "Acme Foods".to_string(),
                    status: "scheduled".to_string(),
                    priority: Some("high".to_string()),
                    assigned_to: vec!["marta".to_string()],
                    assigned_roles: vec!["refrigeration-tech".to_string()],
                    location: Some("12 River Rd, Dockside".to_string()),
                    scheduled_date: day(0),
                    completed_date: None,
                    estimated_hours: Some(4.0),
                    description: Some("Unit short-cycling since Friday".to_string()),
                },
                WorkOrder {
                    id: "wo-2002".to_string(),
                    title: "Quarterly sprinkler inspection".to_string(),
                    customer: "Harbor Gym".to_string(),
                    status: "scheduled".to_string(),
                    priority: Some("low".to_string()),
                    assigned_to: vec!["jon".to_string()],
                    assigned_roles: Vec::new(),
                    location: Some("4 Pier Ave".to_string()),
                    scheduled_date: day(2),
                    completed_date: None,
                    estimated_hours: Some(2.0),
                    description: None,
                },
            ],
            recurring: vec![RecurringTask {
                id: "rt-3001".to_string(),
                name: "Monthly HVAC filter service".to_string(),
                customer: "Riverside Mall".to_string(),
                activity_level: Some("medium".to_string()),
                assigned_to: vec!["crew-a".to_string()],
                location: Some("88 Market St".to_string()),
                frequency: Some("monthly".to_string()),
                next_occurrence: day(1),
                end_date: None,
                estimated_hours: Some(3.0),
                description: Some("Filters and belt check, all rooftop units".to_string()),
            }],
        }
    }
}

fn load_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&content)
        .map_err(|source| {
            DispatchError::DataFileParse {
                path: PathBuf::from(path),
                source,
            }
            .into()
        })
}

fn write_collection<T: serde::Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(records).context("serialize collection")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
