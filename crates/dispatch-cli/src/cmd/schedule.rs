//! `dsp schedule` — bucket work items into a day, week, or month view.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

use dispatch_core::model::item::WorkItem;
use dispatch_core::schedule::{Granularity, bucket};

use super::{FilterArgs, SourceArgs, load_filtered_items, report};
use crate::output::{OutputMode, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// View granularity: day, week, or month. Defaults to the configured view.
    #[arg(long, short = 'v')]
    pub view: Option<String>,

    /// Anchor date (YYYY-MM-DD). Defaults to today.
    #[arg(long, short = 'd')]
    pub date: Option<NaiveDate>,

    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub sources: SourceArgs,
}

#[derive(Debug, Serialize)]
struct DayBucket {
    date: NaiveDate,
    items: Vec<WorkItem>,
}

#[derive(Debug, Serialize)]
struct SchedulePayload {
    view: String,
    selected: NaiveDate,
    days: Vec<DayBucket>,
}

pub fn run_schedule(args: &ScheduleArgs, output: OutputMode, root: &Path) -> Result<()> {
    let (config, items) = load_filtered_items(root, &args.sources, &args.filter)
        .map_err(|e| report(output, e))?;

    let granularity = match args.view.as_deref() {
        Some(raw) => raw.parse::<Granularity>().map_err(|e| report(output, e))?,
        None => config.schedule.default_granularity(),
    };
    let selected = args.date.unwrap_or_else(|| Local::now().date_naive());

    let buckets = bucket(&items, selected, granularity);
    let payload = SchedulePayload {
        view: granularity.to_string(),
        selected,
        days: buckets
            .into_iter()
            .map(|(date, items)| DayBucket { date, items })
            .collect(),
    };

    tracing::debug!(
        view = %payload.view,
        selected = %selected,
        days = payload.days.len(),
        "rendering schedule"
    );

    render_mode(output, &payload, render_text, render_pretty)
}

fn render_text(payload: &SchedulePayload, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "date\tid\tkind\tstatus\ttitle\tcustomer")?;
    for day in &payload.days {
        for item in &day.items {
            writeln!(
                w,
                "{}\t{}\t{}\t{}\t{}\t{}",
                day.date, item.id, item.kind, item.status, item.title, item.customer
            )?;
        }
    }
    Ok(())
}

fn render_pretty(payload: &SchedulePayload, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(
        w,
        &format!("Schedule — {} view around {}", payload.view, payload.selected),
    )?;

    let mut shown = 0usize;
    for day in &payload.days {
        if day.items.is_empty() {
            continue;
        }
        shown += 1;
        writeln!(w)?;
        writeln!(
            w,
            "{} ({} item{})",
            day.date.format("%a %Y-%m-%d"),
            day.items.len(),
            if day.items.len() == 1 { "" } else { "s" }
        )?;
        for item in &day.items {
            let mut line = format!(
                "  {:<10} {:<14} {} — {}  [{}]",
                item.id, item.kind, item.title, item.customer, item.status
            );
            if let Some(ref location) = item.location {
                line.push_str(&format!("  @ {location}"));
            }
            writeln!(w, "{line}")?;
        }
    }

    if shown == 0 {
        writeln!(w)?;
        writeln!(w, "(no items in this {} view)", payload.view)?;
    }
    Ok(())
}
