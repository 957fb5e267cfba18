//! Normalizer: maps the three source collections into one flat [`WorkItem`]
//! sequence.
//!
//! Output order is fixed: included projects first (source order), then work
//! orders, then recurring jobs. The normalizer has no error path — missing
//! optional fields stay absent, and malformed date strings become `None`
//! instead of failing.

use chrono::NaiveDate;

use crate::model::item::{ItemKind, WorkItem};
use crate::model::source::{Project, RecurringTask, WorkOrder};

/// Status stamped on every recurring occurrence. The source recurring-task
/// type has no lifecycle field of its own to map from.
pub const RECURRING_STATUS: &str = "active";

/// Which source collections contribute to the normalized sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceToggles {
    pub projects: bool,
    pub work_orders: bool,
    pub recurring: bool,
}

impl Default for SourceToggles {
    fn default() -> Self {
        Self {
            projects: true,
            work_orders: true,
            recurring: true,
        }
    }
}

impl SourceToggles {
    /// All three sources enabled.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }
}

/// Parse a source date string leniently.
///
/// Accepts `YYYY-MM-DD`, or a longer ISO datetime whose first ten characters
/// form a valid date. Anything else yields `None`; callers treat such items
/// as matching no calendar date.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    let prefix = trimmed.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

fn parse_opt_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(parse_date)
}

/// Produce the unified schedule sequence from the three source collections.
#[must_use]
pub fn normalize(
    projects: &[Project],
    work_orders: &[WorkOrder],
    recurring: &[RecurringTask],
    toggles: SourceToggles,
) -> Vec<WorkItem> {
    let mut items = Vec::new();

    if toggles.projects {
        items.extend(projects.iter().map(project_item));
    }
    if toggles.work_orders {
        items.extend(work_orders.iter().map(work_order_item));
    }
    if toggles.recurring {
        items.extend(recurring.iter().map(recurring_item));
    }

    tracing::debug!(
        projects = projects.len(),
        work_orders = work_orders.len(),
        recurring = recurring.len(),
        normalized = items.len(),
        "normalized schedule sources"
    );

    items
}

fn project_item(project: &Project) -> WorkItem {
    WorkItem {
        id: project.id.clone(),
        kind: ItemKind::Project,
        title: project.name.clone(),
        customer: project.customer.clone(),
        status: project.status.clone(),
        priority: project.priority.clone(),
        assigned_to: project.assigned_to.clone(),
        location: None,
        start_date: parse_date(&project.start_date),
        end_date: parse_opt_date(project.end_date.as_deref()),
        estimated_hours: project.estimated_hours,
        description: project.description.clone(),
    }
}

fn work_order_item(order: &WorkOrder) -> WorkItem {
    // People first, then role placeholders. Duplicates are kept as-is.
    let mut assigned = order.assigned_to.clone();
    assigned.extend(order.assigned_roles.iter().cloned());

    WorkItem {
        id: order.id.clone(),
        kind: ItemKind::WorkOrder,
        title: order.title.clone(),
        customer: order.customer.clone(),
        status: order.status.clone(),
        priority: order.priority.clone(),
        assigned_to: assigned,
        location: order.location.clone(),
        start_date: parse_date(&order.scheduled_date),
        end_date: parse_opt_date(order.completed_date.as_deref()),
        estimated_hours: order.estimated_hours,
        description: order.description.clone(),
    }
}

fn recurring_item(task: &RecurringTask) -> WorkItem {
    WorkItem {
        id: task.id.clone(),
        kind: ItemKind::RecurringJob,
        title: task.name.clone(),
        customer: task.customer.clone(),
        status: RECURRING_STATUS.to_string(),
        priority: task.activity_level.clone(),
        assigned_to: task.assigned_to.clone(),
        location: task.location.clone(),
        start_date: parse_date(&task.next_occurrence),
        end_date: parse_opt_date(task.end_date.as_deref()),
        estimated_hours: task.estimated_hours,
        description: task.description.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn project(id: &str) -> Project {
        Project {
            id: id.to_string(),
            name: format!("Project {id}"),
            customer: "Acme Foods".to_string(),
            status: "planned".to_string(),
            assigned_to: vec!["marta".to_string()],
            start_date: "2025-01-01".to_string(),
            end_date: Some("2025-01-10".to_string()),
            ..Project::default()
        }
    }

    fn work_order(id: &str) -> WorkOrder {
        WorkOrder {
            id: id.to_string(),
            title: format!("Order {id}"),
            customer: "Riverside Mall".to_string(),
            status: "scheduled".to_string(),
            assigned_to: vec!["jon".to_string()],
            assigned_roles: vec!["electrician".to_string()],
            location: Some("12 River Rd".to_string()),
            scheduled_date: "2025-01-03".to_string(),
            ..WorkOrder::default()
        }
    }

    fn recurring(id: &str) -> RecurringTask {
        RecurringTask {
            id: id.to_string(),
            name: format!("Series {id}"),
            customer: "Harbor Gym".to_string(),
            activity_level: Some("high".to_string()),
            next_occurrence: "2025-01-05".to_string(),
            ..RecurringTask::default()
        }
    }

    #[test]
    fn all_sources_concatenate_in_order() {
        let items = normalize(
            &[project("p1"), project("p2")],
            &[work_order("w1")],
            &[recurring("r1")],
            SourceToggles::all(),
        );

        assert_eq!(items.len(), 4);
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["p1", "p2", "w1", "r1"]);
        assert_eq!(items[0].kind, ItemKind::Project);
        assert_eq!(items[2].kind, ItemKind::WorkOrder);
        assert_eq!(items[3].kind, ItemKind::RecurringJob);
    }

    #[test]
    fn toggles_exclude_exactly_one_source() {
        let projects = [project("p1")];
        let orders = [work_order("w1")];
        let series = [recurring("r1")];

        let without_projects = normalize(
            &projects,
            &orders,
            &series,
            SourceToggles {
                projects: false,
                ..SourceToggles::all()
            },
        );
        assert_eq!(without_projects.len(), 2);
        assert!(
            without_projects
                .iter()
                .all(|item| item.kind != ItemKind::Project)
        );

        let without_orders = normalize(
            &projects,
            &orders,
            &series,
            SourceToggles {
                work_orders: false,
                ..SourceToggles::all()
            },
        );
        assert_eq!(without_orders.len(), 2);
        assert!(
            without_orders
                .iter()
                .all(|item| item.kind != ItemKind::WorkOrder)
        );

        let without_recurring = normalize(
            &projects,
            &orders,
            &series,
            SourceToggles {
                recurring: false,
                ..SourceToggles::all()
            },
        );
        assert_eq!(without_recurring.len(), 2);
        assert!(
            without_recurring
                .iter()
                .all(|item| item.kind != ItemKind::RecurringJob)
        );
    }

    #[test]
    fn work_order_concatenates_people_and_roles_without_dedup() {
        let mut order = work_order("w1");
        order.assigned_to = vec!["jon".to_string(), "electrician".to_string()];
        order.assigned_roles = vec!["electrician".to_string()];

        let items = normalize(&[], &[order], &[], SourceToggles::all());
        assert_eq!(items[0].assigned_to, ["jon", "electrician", "electrician"]);
    }

    #[test]
    fn project_has_no_location() {
        let items = normalize(&[project("p1")], &[], &[], SourceToggles::all());
        assert!(items[0].location.is_none());
    }

    #[test]
    fn recurring_status_is_always_active() {
        let items = normalize(&[], &[], &[recurring("r1")], SourceToggles::all());
        assert_eq!(items[0].status, "active");
        assert_eq!(items[0].priority.as_deref(), Some("high"));
    }

    #[test]
    fn work_order_dates_map_scheduled_and_completed() {
        let mut order = work_order("w1");
        order.completed_date = Some("2025-01-04".to_string());

        let items = normalize(&[], &[order], &[], SourceToggles::all());
        assert_eq!(items[0].start_date, NaiveDate::from_ymd_opt(2025, 1, 3));
        assert_eq!(items[0].end_date, NaiveDate::from_ymd_opt(2025, 1, 4));
    }

    #[test]
    fn parse_date_accepts_plain_and_datetime_forms() {
        assert_eq!(
            parse_date("2025-01-03"),
            NaiveDate::from_ymd_opt(2025, 1, 3)
        );
        assert_eq!(
            parse_date("2025-01-03T08:30:00Z"),
            NaiveDate::from_ymd_opt(2025, 1, 3)
        );
        assert_eq!(
            parse_date("  2025-01-03  "),
            NaiveDate::from_ymd_opt(2025, 1, 3)
        );
    }

    #[test]
    fn parse_date_rejects_garbage_silently() {
        assert!(parse_date("").is_none());
        assert!(parse_date("next tuesday").is_none());
        assert!(parse_date("2025-13-40").is_none());
        assert!(parse_date("01/03/2025").is_none());
    }

    #[test]
    fn malformed_start_date_yields_none_not_error() {
        let mut order = work_order("w1");
        order.scheduled_date = "not a date".to_string();

        let items = normalize(&[], &[order], &[], SourceToggles::all());
        assert_eq!(items.len(), 1);
        assert!(items[0].start_date.is_none());
    }
}
