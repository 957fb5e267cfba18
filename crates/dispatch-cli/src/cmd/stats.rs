//! `dsp stats` — aggregate counts over the normalized dataset.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;

use dispatch_core::model::item::WorkItem;

use super::{FilterArgs, SourceArgs, load_filtered_items, report};
use crate::output::{OutputMode, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub sources: SourceArgs,
}

#[derive(Debug, Serialize)]
struct StatsPayload {
    total: usize,
    by_kind: BTreeMap<String, usize>,
    by_status: BTreeMap<String, usize>,
    by_customer: BTreeMap<String, usize>,
}

fn tally(items: &[WorkItem]) -> StatsPayload {
    let mut by_kind = BTreeMap::new();
    let mut by_status = BTreeMap::new();
    let mut by_customer = BTreeMap::new();

    for item in items {
        *by_kind.entry(item.kind.as_str().to_string()).or_insert(0) += 1;
        *by_status.entry(item.status.clone()).or_insert(0) += 1;
        *by_customer.entry(item.customer.clone()).or_insert(0) += 1;
    }

    StatsPayload {
        total: items.len(),
        by_kind,
        by_status,
        by_customer,
    }
}

pub fn run_stats(args: &StatsArgs, output: OutputMode, root: &Path) -> Result<()> {
    let (_, items) = load_filtered_items(root, &args.sources, &args.filter)
        .map_err(|e| report(output, e))?;

    let payload = tally(&items);
    render_mode(output, &payload, render_text, render_pretty)
}

fn write_group(
    w: &mut dyn Write,
    label: &str,
    counts: &BTreeMap<String, usize>,
) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "{label}")?;
    for (key, count) in counts {
        writeln!(w, "  {key:<24} {count}")?;
    }
    Ok(())
}

fn render_text(payload: &StatsPayload, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "total\t{}", payload.total)?;
    for (key, count) in &payload.by_kind {
        writeln!(w, "kind\t{key}\t{count}")?;
    }
    for (key, count) in &payload.by_status {
        writeln!(w, "status\t{key}\t{count}")?;
    }
    for (key, count) in &payload.by_customer {
        writeln!(w, "customer\t{key}\t{count}")?;
    }
    Ok(())
}

fn render_pretty(payload: &StatsPayload, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Work items: {}", payload.total))?;
    write_group(w, "By kind", &payload.by_kind)?;
    write_group(w, "By status", &payload.by_status)?;
    write_group(w, "By customer", &payload.by_customer)?;
    Ok(())
}
