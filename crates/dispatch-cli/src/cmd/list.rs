//! `dsp list` — flat listing of normalized work items.

use anyhow::Result;
use clap::Args;
use std::io::{self, Write};
use std::path::Path;

use dispatch_core::model::item::WorkItem;

use super::{FilterArgs, SourceArgs, load_filtered_items, report};
use crate::output::{OutputMode, Renderable, render_list};

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub sources: SourceArgs,
}

struct ListRow(WorkItem);

impl Renderable for ListRow {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        let item = &self.0;
        let start = item
            .start_date
            .map_or_else(|| "-".to_string(), |d| d.to_string());
        writeln!(
            w,
            "{:<10} {:<14} {:<10} {:<11} {} ({})",
            item.id, item.kind, start, item.status, item.title, item.customer
        )
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(&mut *w, &self.0)?;
        writeln!(w)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        let item = &self.0;
        let start = item
            .start_date
            .map_or_else(|| "-".to_string(), |d| d.to_string());
        let end = item
            .end_date
            .map_or_else(|| "-".to_string(), |d| d.to_string());
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            item.id, item.kind, start, end, item.status, item.title, item.customer
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["id", "kind", "start", "end", "status", "title", "customer"]
    }
}

pub fn run_list(args: &ListArgs, output: OutputMode, root: &Path) -> Result<()> {
    let (_, items) = load_filtered_items(root, &args.sources, &args.filter)
        .map_err(|e| report(output, e))?;

    tracing::debug!(count = items.len(), "listing work items");

    let rows: Vec<ListRow> = items.into_iter().map(ListRow).collect();
    render_list(&rows, output)?;
    Ok(())
}
