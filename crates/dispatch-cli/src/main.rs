#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use dispatch_core::timing;
use output::{OutputMode, resolve_output_mode};
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "dispatch: schedule aggregator for field-service work",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit command timing report to stderr.
    #[arg(long, global = true)]
    timing: bool,

    /// Output format (overrides the FORMAT env var and TTY detection).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output (shorthand for --format json).
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Lifecycle",
        about = "Initialize a dispatch data root",
        long_about = "Create .dispatch/ in the current directory with a default config and sample data.",
        after_help = "EXAMPLES:\n    # Initialize with sample data\n    dsp init\n\n    # Initialize with empty collections\n    dsp init --empty\n\n    # Start over\n    dsp init --force"
    )]
    Init(cmd::init::InitArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show the calendar schedule",
        long_about = "Bucket work items from all sources into a day, week, or month view.",
        after_help = "EXAMPLES:\n    # This week's working days\n    dsp schedule\n\n    # A single day\n    dsp schedule --view day --date 2025-01-06\n\n    # Month view for one customer, no recurring jobs\n    dsp schedule --view month --customer \"Acme Foods\" --no-recurring\n\n    # Emit machine-readable output\n    dsp schedule --json"
    )]
    Schedule(cmd::schedule::ScheduleArgs),

    #[command(
        next_help_heading = "Read",
        about = "List work items",
        long_about = "List normalized work items from all sources with optional filters.",
        after_help = "EXAMPLES:\n    # Everything\n    dsp list\n\n    # Filter by status and assignee\n    dsp list --status scheduled --assignee marta\n\n    # Free-text search\n    dsp list --search freezer\n\n    # Emit machine-readable output\n    dsp list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one work item",
        long_about = "Show full details for a single work item by id.",
        after_help = "EXAMPLES:\n    # Show an item\n    dsp show wo-2001\n\n    # Emit machine-readable output\n    dsp show wo-2001 --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Read",
        about = "Aggregate counts over work items",
        long_about = "Count work items by kind, status, and customer, after filters.",
        after_help = "EXAMPLES:\n    # Overall counts\n    dsp stats\n\n    # Counts for one customer\n    dsp stats --customer \"Acme Foods\"\n\n    # Emit machine-readable output\n    dsp stats --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Maintenance",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    dsp completions bash\n\n    # Generate zsh completions\n    dsp completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("DISPATCH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "dispatch=debug,info"
        } else {
            "dispatch=info,warn"
        })
    });

    let format = env::var("DISPATCH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let timing_enabled = cli.timing || timing::timing_enabled_from_env();
    timing::set_timing_enabled(timing_enabled);
    timing::clear_timings();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let root = std::env::current_dir()?;
    let user_config = dispatch_core::config::load_user_config()?;
    let output = resolve_output_mode(cli.format, cli.json, user_config.output.as_deref());

    let command_result = match cli.command {
        Commands::Init(ref args) => timing::timed("cmd.init", || {
            cmd::init::run_init(args, output, &root, cli.quiet)
        }),
        Commands::Schedule(ref args) => timing::timed("cmd.schedule", || {
            cmd::schedule::run_schedule(args, output, &root)
        }),
        Commands::List(ref args) => {
            timing::timed("cmd.list", || cmd::list::run_list(args, output, &root))
        }
        Commands::Show(ref args) => {
            timing::timed("cmd.show", || cmd::show::run_show(args, output, &root))
        }
        Commands::Stats(ref args) => {
            timing::timed("cmd.stats", || cmd::stats::run_stats(args, output, &root))
        }
        Commands::Completions(ref args) => timing::timed("cmd.completions", || {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }),
    };

    if timing_enabled {
        let report = timing::collect_report();
        if report.is_empty() {
            eprintln!("timing report: no samples recorded");
        } else {
            eprintln!("timing report:");
            eprintln!("{}", report.display_table());
            eprintln!("timing report (json):");
            eprintln!("{}", serde_json::to_string_pretty(&report.to_json())?);
        }
    }

    command_result
}
