//! End-to-end pipeline tests: sources -> normalize -> filter -> bucket.

use chrono::NaiveDate;
use dispatch_core::model::item::ItemKind;
use dispatch_core::model::source::{Project, RecurringTask, WorkOrder};
use dispatch_core::schedule::{
    Granularity, ScheduleFilter, SourceToggles, bucket, normalize,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

fn fixture() -> (Vec<Project>, Vec<WorkOrder>, Vec<RecurringTask>) {
    let projects = vec![Project {
        id: "proj-1".to_string(),
        name: "Warehouse retrofit".to_string(),
        customer: "Acme Foods".to_string(),
        status: "in-progress".to_string(),
        assigned_to: vec!["marta".to_string()],
        start_date: "2025-01-01".to_string(),
        end_date: Some("2025-01-10".to_string()),
        ..Project::default()
    }];

    let work_orders = vec![WorkOrder {
        id: "wo-1".to_string(),
        title: "Compressor swap".to_string(),
        customer: "Acme Foods".to_string(),
        status: "scheduled".to_string(),
        assigned_to: vec!["jon".to_string()],
        location: Some("12 River Rd".to_string()),
        scheduled_date: "2025-01-05".to_string(),
        ..WorkOrder::default()
    }];

    let recurring = vec![RecurringTask {
        id: "rt-1".to_string(),
        name: "HVAC filter service".to_string(),
        customer: "Riverside Mall".to_string(),
        activity_level: Some("medium".to_string()),
        next_occurrence: "2025-01-05".to_string(),
        ..RecurringTask::default()
    }];

    (projects, work_orders, recurring)
}

#[test]
fn all_three_sources_land_on_a_shared_day() {
    let (projects, work_orders, recurring) = fixture();
    let items = normalize(&projects, &work_orders, &recurring, SourceToggles::all());
    assert_eq!(items.len(), 3);

    // 2025-01-05 falls inside the project range and on both point events.
    let buckets = bucket(&items, date(2025, 1, 5), Granularity::Day);
    assert_eq!(buckets.len(), 1);
    let day = &buckets[&date(2025, 1, 5)];
    assert_eq!(day.len(), 3);
    let kinds: Vec<ItemKind> = day.iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        [ItemKind::Project, ItemKind::WorkOrder, ItemKind::RecurringJob]
    );

    // The next day only the project survives.
    let buckets = bucket(&items, date(2025, 1, 6), Granularity::Day);
    let day = &buckets[&date(2025, 1, 6)];
    assert_eq!(day.len(), 1);
    assert_eq!(day[0].id, "proj-1");
}

#[test]
fn week_view_buckets_the_working_week_only() {
    let (projects, work_orders, recurring) = fixture();
    let items = normalize(&projects, &work_orders, &recurring, SourceToggles::all());

    // Week containing Sunday 2025-01-05: Mon 2024-12-30 .. Fri 2025-01-03.
    // The point events on Jan 5 (a Sunday) are invisible in this week view.
    let buckets = bucket(&items, date(2025, 1, 5), Granularity::Week);
    let keys: Vec<NaiveDate> = buckets.keys().copied().collect();
    assert_eq!(
        keys,
        vec![
            date(2024, 12, 30),
            date(2024, 12, 31),
            date(2025, 1, 1),
            date(2025, 1, 2),
            date(2025, 1, 3),
        ]
    );

    assert!(buckets[&date(2024, 12, 31)].is_empty());
    assert_eq!(buckets[&date(2025, 1, 1)].len(), 1);
    assert_eq!(buckets[&date(2025, 1, 3)].len(), 1);
    assert!(buckets.values().flatten().all(|i| i.id == "proj-1"));
}

#[test]
fn month_view_shows_weekend_point_events() {
    let (projects, work_orders, recurring) = fixture();
    let items = normalize(&projects, &work_orders, &recurring, SourceToggles::all());

    let buckets = bucket(&items, date(2025, 1, 15), Granularity::Month);
    assert_eq!(buckets.len(), 42);

    let sunday = &buckets[&date(2025, 1, 5)];
    let ids: Vec<&str> = sunday.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["proj-1", "wo-1", "rt-1"]);

    // Project present on every day of its range, nothing outside it.
    for offset in 1..=10 {
        assert!(
            buckets[&date(2025, 1, offset)]
                .iter()
                .any(|i| i.id == "proj-1"),
            "project missing on Jan {offset}"
        );
    }
    assert!(
        buckets[&date(2025, 1, 11)]
            .iter()
            .all(|i| i.id != "proj-1")
    );
}

#[test]
fn filters_narrow_before_bucketing() {
    let (projects, work_orders, recurring) = fixture();
    let items = normalize(&projects, &work_orders, &recurring, SourceToggles::all());

    let filter = ScheduleFilter {
        customer: Some("Acme Foods".to_string()),
        ..ScheduleFilter::default()
    };
    let narrowed = filter.apply(&items);
    assert_eq!(narrowed.len(), 2);

    let buckets = bucket(&narrowed, date(2025, 1, 5), Granularity::Day);
    let ids: Vec<&str> = buckets[&date(2025, 1, 5)]
        .iter()
        .map(|i| i.id.as_str())
        .collect();
    assert_eq!(ids, ["proj-1", "wo-1"]);
}

#[test]
fn assignee_filter_sees_roles_from_work_orders() {
    let (projects, mut work_orders, recurring) = fixture();
    work_orders[0].assigned_roles = vec!["refrigeration-tech".to_string()];

    let items = normalize(&projects, &work_orders, &recurring, SourceToggles::all());
    let filter = ScheduleFilter {
        assignee: Some("refrigeration-tech".to_string()),
        ..ScheduleFilter::default()
    };

    let narrowed = filter.apply(&items);
    assert_eq!(narrowed.len(), 1);
    assert_eq!(narrowed[0].id, "wo-1");
}

#[test]
fn cross_type_id_collisions_pass_through_untouched() {
    let (mut projects, mut work_orders, _) = fixture();
    projects[0].id = "shared-1".to_string();
    work_orders[0].id = "shared-1".to_string();
    work_orders[0].scheduled_date = "2025-01-02".to_string();

    let items = normalize(&projects, &work_orders, &[], SourceToggles::all());
    assert_eq!(items.len(), 2);

    // Both land in the Jan 2 bucket; nothing dedups on id.
    let buckets = bucket(&items, date(2025, 1, 2), Granularity::Day);
    let day = &buckets[&date(2025, 1, 2)];
    assert_eq!(day.len(), 2);
    assert_ne!(day[0].kind, day[1].kind);
}
