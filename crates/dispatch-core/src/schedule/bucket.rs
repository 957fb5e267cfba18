//! Calendar bucketer: groups filtered items under the visible date range.
//!
//! Work orders and recurring occurrences are point events (exact start-date
//! equality); projects are range events (inclusive start..=end overlap, with
//! a missing end treated as the start date).

use anyhow::{Result, bail};
use chrono::{Datelike, Days, NaiveDate};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::model::item::WorkItem;

/// Days shown per week view: Monday through Friday. Weekend work still shows
/// up in the month grid.
const WEEKDAYS_SHOWN: u64 = 5;

/// Cells in the 6x7 month display grid.
const MONTH_GRID_DAYS: u64 = 42;

/// The calendar view mode, controlling date-range construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    Day,
    #[default]
    Week,
    Month,
}

impl Granularity {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => bail!("unknown view '{other}': expected one of day, week, month"),
        }
    }
}

/// The dates a view displays for `selected`, in ascending order.
///
/// - `Day`: just `selected`.
/// - `Week`: Monday through Friday of the week containing `selected`.
/// - `Month`: the 42-day grid starting at the Sunday on/before the 1st of
///   `selected`'s month, including lead-in and trail-out days.
#[must_use]
pub fn visible_range(selected: NaiveDate, granularity: Granularity) -> Vec<NaiveDate> {
    match granularity {
        Granularity::Day => vec![selected],
        Granularity::Week => {
            let monday = week_monday(selected);
            days_from(monday, WEEKDAYS_SHOWN)
        }
        Granularity::Month => {
            let first = selected.with_day(1).unwrap_or(selected);
            let grid_start = back_to_sunday(first);
            days_from(grid_start, MONTH_GRID_DAYS)
        }
    }
}

/// Whether `item` is active on calendar date `day`.
///
/// Items whose start date failed to parse are active on no date at all.
#[must_use]
pub fn is_active_on(item: &WorkItem, day: NaiveDate) -> bool {
    let Some(start) = item.start_date else {
        return false;
    };

    if item.kind.is_point_event() {
        start == day
    } else {
        let end = item.end_date.unwrap_or(start);
        start <= day && day <= end
    }
}

/// Group `items` by every date the view displays.
///
/// Every requested date is present in the result, mapped to a possibly empty
/// bucket, so callers can index any date in the range without existence
/// checks. Within a bucket, items keep their input order.
#[must_use]
pub fn bucket(
    items: &[WorkItem],
    selected: NaiveDate,
    granularity: Granularity,
) -> BTreeMap<NaiveDate, Vec<WorkItem>> {
    visible_range(selected, granularity)
        .into_iter()
        .map(|day| {
            let active: Vec<WorkItem> = items
                .iter()
                .filter(|item| is_active_on(item, day))
                .cloned()
                .collect();
            (day, active)
        })
        .collect()
}

/// The Monday on/before `date`, using a Sunday-based day-of-week index.
fn week_monday(date: NaiveDate) -> NaiveDate {
    let dow = date.weekday().num_days_from_sunday();
    let back = if dow == 0 { 6 } else { u64::from(dow) - 1 };
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// The Sunday on/before `date`.
fn back_to_sunday(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

fn days_from(start: NaiveDate, count: u64) -> Vec<NaiveDate> {
    (0..count)
        .filter_map(|offset| start.checked_add_days(Days::new(offset)))
        .collect()
}
