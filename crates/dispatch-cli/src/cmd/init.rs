//! `dsp init` — create the `.dispatch/` data root.

use anyhow::{Result, bail};
use chrono::Local;
use clap::Args;
use std::path::Path;

use dispatch_core::config::DataConfig;
use dispatch_core::dataset::{DISPATCH_DIR, Dataset};

use crate::output::{OutputMode, render_success};

const DEFAULT_CONFIG_TOML: &str = "\
# dispatch configuration
[schedule]
# View used when --view is not given: day, week, or month.
default_view = \"week\"

[sources]
projects = true
work_orders = true
recurring = true
";

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Re-initialize even if `.dispatch/` already exists.
    #[arg(long)]
    pub force: bool,

    /// Skip the sample dataset and create empty collections.
    #[arg(long)]
    pub empty: bool,
}

pub fn run_init(args: &InitArgs, output: OutputMode, root: &Path, quiet: bool) -> Result<()> {
    let dir = root.join(DISPATCH_DIR);
    if dir.exists() && !args.force {
        bail!(
            "{} already exists (use --force to re-initialize)",
            dir.display()
        );
    }

    std::fs::create_dir_all(&dir)?;
    std::fs::write(dir.join("config.toml"), DEFAULT_CONFIG_TOML)?;

    let dataset = if args.empty {
        Dataset::default()
    } else {
        Dataset::sample(Local::now().date_naive())
    };
    dataset.write(root, &DataConfig::default())?;

    tracing::info!(root = %root.display(), sample = !args.empty, "initialized data root");

    render_success(output, &format!("Initialized {}", dir.display()))?;
    if !quiet && !args.empty && !output.is_json() {
        eprintln!("  seeded sample data; try `dsp schedule` or `dsp list`");
    }
    Ok(())
}
