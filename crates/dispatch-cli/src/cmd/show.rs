//! `dsp show` — full detail for a single work item.

use anyhow::Result;
use clap::Args;
use std::io::{self, Write};
use std::path::Path;

use dispatch_core::error::DispatchError;
use dispatch_core::model::item::WorkItem;

use super::{FilterArgs, SourceArgs, load_filtered_items, report};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Item id, e.g. `wo-2001`.
    pub id: String,
}

pub fn run_show(args: &ShowArgs, output: OutputMode, root: &Path) -> Result<()> {
    let (_, items) = load_filtered_items(
        root,
        &SourceArgs::default(),
        &FilterArgs::default(),
    )
    .map_err(|e| report(output, e))?;

    // Ids are not deduplicated across sources; first match in source order wins.
    let Some(item) = items.into_iter().find(|i| i.id == args.id) else {
        let err = DispatchError::ItemNotFound {
            id: args.id.clone(),
        };
        return Err(report(output, err.into()));
    };

    render_mode(output, &item, render_text, render_pretty)
}

fn render_text(item: &WorkItem, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "id\t{}", item.id)?;
    writeln!(w, "kind\t{}", item.kind)?;
    writeln!(w, "title\t{}", item.title)?;
    writeln!(w, "customer\t{}", item.customer)?;
    writeln!(w, "status\t{}", item.status)?;
    if let Some(ref priority) = item.priority {
        writeln!(w, "priority\t{priority}")?;
    }
    if !item.assigned_to.is_empty() {
        writeln!(w, "assigned\t{}", item.assigned_to.join(","))?;
    }
    if let Some(ref location) = item.location {
        writeln!(w, "location\t{location}")?;
    }
    if let Some(start) = item.start_date {
        writeln!(w, "start\t{start}")?;
    }
    if let Some(end) = item.end_date {
        writeln!(w, "end\t{end}")?;
    }
    if let Some(hours) = item.estimated_hours {
        writeln!(w, "hours\t{hours}")?;
    }
    if let Some(ref description) = item.description {
        writeln!(w, "description\t{description}")?;
    }
    Ok(())
}

fn render_pretty(item: &WorkItem, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("{} ({})", item.title, item.id))?;
    pretty_kv(w, "kind", item.kind.as_str())?;
    pretty_kv(w, "customer", &item.customer)?;
    pretty_kv(w, "status", &item.status)?;
    if let Some(ref priority) = item.priority {
        pretty_kv(w, "priority", priority)?;
    }
    if !item.assigned_to.is_empty() {
        pretty_kv(w, "assigned", item.assigned_to.join(", "))?;
    }
    if let Some(ref location) = item.location {
        pretty_kv(w, "location", location)?;
    }
    match (item.start_date, item.end_date) {
        (Some(start), Some(end)) => pretty_kv(w, "dates", format!("{start} to {end}"))?,
        (Some(start), None) => pretty_kv(w, "date", start.to_string())?,
        _ => {}
    }
    if let Some(hours) = item.estimated_hours {
        pretty_kv(w, "est. hours", format!("{hours}"))?;
    }
    if let Some(ref description) = item.description {
        writeln!(w)?;
        writeln!(w, "{description}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dispatch_core::model::item::ItemKind;

    fn item() -> WorkItem {
        WorkItem {
            id: "wo-1".to_string(),
            kind: ItemKind::WorkOrder,
            title: "Compressor swap".to_string(),
            customer: "Acme Foods".to_string(),
            status: "scheduled".to_string(),
            priority: Some("high".to_string()),
            assigned_to: vec!["marta".to_string(), "refrigeration-tech".to_string()],
            location: Some("12 River Rd".to_string()),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 5),
            end_date: None,
            estimated_hours: Some(4.0),
            description: Some("Unit short-cycling".to_string()),
        }
    }

    #[test]
    fn text_detail_is_key_tab_value() {
        let mut buf = Vec::new();
        render_text(&item(), &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("id\two-1"));
        assert!(text.contains("assigned\tmarta,refrigeration-tech"));
        assert!(text.contains("start\t2025-01-05"));
        assert!(!text.contains("end\t"));
    }

    #[test]
    fn pretty_detail_shows_point_event_as_single_date() {
        let mut buf = Vec::new();
        render_pretty(&item(), &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("Compressor swap (wo-1)"));
        assert!(text.contains("date:"));
        assert!(!text.contains("dates:"));
    }

    #[test]
    fn pretty_detail_shows_range_with_both_ends() {
        let mut detailed = item();
        detailed.end_date = NaiveDate::from_ymd_opt(2025, 1, 7);
        let mut buf = Vec::new();
        render_pretty(&detailed, &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("2025-01-05 to 2025-01-07"));
    }
}
