//! Command handlers for the `dsp` binary.

pub mod completions;
pub mod init;
pub mod list;
pub mod schedule;
pub mod show;
pub mod stats;

use clap::Args;
use std::path::Path;

use dispatch_core::config::{self, ProjectConfig};
use dispatch_core::dataset::Dataset;
use dispatch_core::error::DispatchError;
use dispatch_core::model::item::WorkItem;
use dispatch_core::schedule::{ScheduleFilter, SourceToggles, normalize};

use crate::output::{CliError, OutputMode, render_error};

/// Filter flags shared by `schedule` and `list`.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Free-text search over id, title, customer, and description.
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by exact status label.
    #[arg(long)]
    pub status: Option<String>,

    /// Filter by exact priority label.
    #[arg(long)]
    pub priority: Option<String>,

    /// Filter by exact customer name.
    #[arg(long)]
    pub customer: Option<String>,

    /// Filter by assigned person or role (exact match).
    #[arg(long)]
    pub assignee: Option<String>,

    /// Filter by location substring (case-insensitive).
    #[arg(long)]
    pub location: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> ScheduleFilter {
        ScheduleFilter {
            search: self.search.clone(),
            status: self.status.clone(),
            priority: self.priority.clone(),
            customer: self.customer.clone(),
            assignee: self.assignee.clone(),
            location: self.location.clone(),
        }
    }
}

/// Source toggle flags shared by `schedule`, `list`, and `stats`.
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Hide projects.
    #[arg(long)]
    pub no_projects: bool,

    /// Hide work orders.
    #[arg(long)]
    pub no_work_orders: bool,

    /// Hide recurring jobs.
    #[arg(long)]
    pub no_recurring: bool,
}

impl SourceArgs {
    /// Apply the negative flags on top of the configured defaults.
    pub const fn apply(&self, base: SourceToggles) -> SourceToggles {
        SourceToggles {
            projects: base.projects && !self.no_projects,
            work_orders: base.work_orders && !self.no_work_orders,
            recurring: base.recurring && !self.no_recurring,
        }
    }
}

/// Load config and dataset, normalize, and filter in one step.
///
/// This is the read path every query command shares.
pub(crate) fn load_filtered_items(
    root: &Path,
    sources: &SourceArgs,
    filter: &FilterArgs,
) -> anyhow::Result<(ProjectConfig, Vec<WorkItem>)> {
    let project_config = config::load_project_config(root)?;
    let dataset = Dataset::load(root, &project_config.data)?;

    let toggles = sources.apply(project_config.sources.toggles());
    let items = normalize(
        &dataset.projects,
        &dataset.work_orders,
        &dataset.recurring,
        toggles,
    );
    let items = filter.to_filter().apply(&items);

    Ok((project_config, items))
}

/// Report an error on stderr in the active output mode, then pass it on.
pub(crate) fn report(output: OutputMode, err: anyhow::Error) -> anyhow::Error {
    let cli_error = err.downcast_ref::<DispatchError>().map_or_else(
        || CliError::new(err.to_string()),
        std::convert::Into::into,
    );
    let _ = render_error(output, &cli_error);
    err
}
