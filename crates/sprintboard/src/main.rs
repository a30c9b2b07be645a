//! sprintboard - Project, task and sprint dashboard metrics

mod cli;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use sprintboard_core::error::LoadReport;
use sprintboard_core::metrics::{
    DashboardView, bucket_by_priority, bucket_by_status, build_burndown, compute_stats_with,
    project_progress_rows, recent_activity, team_workload_rows,
};
use sprintboard_core::{CoreError, DashboardConfig, DashboardSnapshot, SnapshotLoader};
use std::path::{Path, PathBuf};
use std::time::Duration;

use cli::OutputFormat;

#[derive(Parser)]
#[command(
    name = "sprintboard",
    version,
    about = "Project, task and sprint dashboard metrics",
    long_about = "Computes dashboard metrics from a snapshot of projects, tasks and sprints.\n\
                  \n\
                  The snapshot is a JSON document holding the /projects, /tasks and /sprints\n\
                  responses plus optional per-sprint burndown samples.\n\
                  \n\
                  Examples:\n\
                    sprintboard stats                     # Summary cards\n\
                    sprintboard charts                    # Status/priority/progress/workload\n\
                    sprintboard burndown --sprint 15      # One sprint's burndown\n\
                    sprintboard activity --limit 5        # Recently updated tasks\n\
                    sprintboard overview --format json    # Everything, as JSON\n\
                    sprintboard watch --interval 60       # Refresh every minute\n\
                  \n\
                  Environment Variables:\n\
                    SPRINTBOARD_SNAPSHOT                  # Snapshot path\n\
                    SPRINTBOARD_CONFIG                    # Config file path\n\
                    SPRINTBOARD_FORMAT                    # Force output format: json|table\n\
                    SPRINTBOARD_NO_COLOR                  # Disable ANSI colors\n\
                    SPRINTBOARD_LOG                       # Log filter (e.g. debug)"
)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Snapshot JSON (default: <data_dir>/sprintboard/snapshot.json)
    #[arg(long, env = "SPRINTBOARD_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Config file (default: <config_dir>/sprintboard/config.toml)
    #[arg(long, env = "SPRINTBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Force output format (json|table)
    #[arg(long, env = "SPRINTBOARD_FORMAT", value_parser = ["json", "table"])]
    format: Option<String>,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, env = "SPRINTBOARD_NO_COLOR")]
    no_color: bool,

    /// Evaluate as of this instant instead of the current time
    #[arg(long)]
    now: Option<String>,

    /// Verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Subcommand)]
enum Mode {
    /// Print summary statistics (default)
    Stats,
    /// Print status/priority distributions and project rows
    Charts,
    /// Print sprint burndown
    Burndown {
        /// Sprint id (default: every active sprint)
        #[arg(long, short = 's')]
        sprint: Option<u64>,
    },
    /// Print recently updated tasks
    Activity {
        /// Max entries (default from config)
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },
    /// Print the whole dashboard
    Overview,
    /// Reload the snapshot and reprint stats on an interval
    Watch {
        /// Seconds between refreshes (default from config)
        #[arg(long, short = 'i')]
        interval: Option<u64>,
        /// Stop after this many refreshes
        #[arg(long)]
        count: Option<usize>,
    },
}

/// Flags shared by every command handler
struct Session {
    snapshot_path: PathBuf,
    config: DashboardConfig,
    format: OutputFormat,
    no_color: bool,
    pinned_now: Option<DateTime<Utc>>,
}

impl Session {
    fn now(&self) -> DateTime<Utc> {
        self.pinned_now.unwrap_or_else(Utc::now)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let snapshot_path = cli
        .snapshot
        .or_else(|| dirs::data_dir().map(|d| d.join("sprintboard").join("snapshot.json")))
        .context("Could not determine snapshot path, pass --snapshot")?;

    let config =
        DashboardConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let pinned_now = match cli.now.as_deref() {
        Some(raw) => Some(cli::resolve_now(Some(raw))?),
        None => None,
    };

    let ctx = Session {
        snapshot_path,
        config,
        format: OutputFormat::parse(cli.format.as_deref()),
        no_color: cli.no_color,
        pinned_now,
    };

    match cli.mode.unwrap_or(Mode::Stats) {
        Mode::Stats => run_stats(&ctx).await?,
        Mode::Charts => run_charts(&ctx).await?,
        Mode::Burndown { sprint } => run_burndown(&ctx, sprint).await?,
        Mode::Activity { limit } => run_activity(&ctx, limit).await?,
        Mode::Overview => run_overview(&ctx).await?,
        Mode::Watch { interval, count } => run_watch(&ctx, interval, count).await?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_env("SPRINTBOARD_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}

/// Load the snapshot, failing on fatal problems and surfacing warnings
async fn load_snapshot(ctx: &Session) -> Result<DashboardSnapshot> {
    let mut report = LoadReport::new();
    let snapshot = SnapshotLoader::new()
        .load_graceful(&ctx.snapshot_path, &mut report)
        .await;

    print_report(&report, ctx.format);

    match snapshot {
        Some(snapshot) if !report.has_fatal_errors() => Ok(snapshot),
        _ => bail!(
            "Could not load snapshot from {}",
            display_path(&ctx.snapshot_path)
        ),
    }
}

fn print_report(report: &LoadReport, format: OutputFormat) {
    if format == OutputFormat::Table && report.has_errors() {
        let (warnings, errors, fatal) = report.error_count();
        eprintln!(
            "Snapshot issues: {} warnings, {} errors, {} fatal",
            warnings, errors, fatal
        );
    }
    for entry in &report.errors {
        tracing::warn!(source = %entry.source, "{}", entry.message);
        if format == OutputFormat::Table {
            eprintln!("  - {}: {}", entry.source, entry.message);
            if let Some(hint) = &entry.suggestion {
                eprintln!("    hint: {}", hint);
            }
        }
    }
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

// ============================================================================
// Command Handlers
// ============================================================================

async fn run_stats(ctx: &Session) -> Result<()> {
    let snapshot = load_snapshot(ctx).await?;
    let stats = compute_stats_with(
        &snapshot.projects,
        &snapshot.tasks,
        ctx.now(),
        ctx.config.deadline_windows(),
    );

    match ctx.format {
        OutputFormat::Json => println!("{}", cli::to_json(&stats)?),
        OutputFormat::Table => {
            if let Some(user) = &snapshot.user {
                println!("sprintboard - {}", user.full_name);
            } else {
                println!("sprintboard");
            }
            println!("================================");
            println!();
            println!("{}", cli::format_stats(&stats));
        }
    }

    Ok(())
}

async fn run_charts(ctx: &Session) -> Result<()> {
    let snapshot = load_snapshot(ctx).await?;
    let status = bucket_by_status(&snapshot.tasks);
    let priority = bucket_by_priority(&snapshot.tasks);
    let progress = project_progress_rows(&snapshot.projects);
    let workload = team_workload_rows(&snapshot.projects);

    match ctx.format {
        OutputFormat::Json => {
            let charts = serde_json::json!({
                "statusBuckets": status,
                "priorityBuckets": priority,
                "projectProgress": progress,
                "teamWorkload": workload,
            });
            println!("{}", cli::to_json(&charts)?);
        }
        OutputFormat::Table => {
            println!("{}", cli::format_buckets("Status", &status, ctx.no_color));
            println!();
            println!("{}", cli::format_buckets("Priority", &priority, ctx.no_color));
            println!();
            println!("{}", cli::format_progress(&progress, ctx.no_color));
            println!();
            println!("{}", cli::format_workload(&workload, ctx.no_color));
        }
    }

    Ok(())
}

async fn run_burndown(ctx: &Session, sprint_id: Option<u64>) -> Result<()> {
    let snapshot = load_snapshot(ctx).await?;

    let sprints: Vec<_> = match sprint_id {
        Some(id) => vec![snapshot
            .sprint(id)
            .ok_or(CoreError::SprintNotFound { sprint_id: id })?],
        None => snapshot.active_sprints().collect(),
    };

    let burndowns: Vec<_> = sprints
        .into_iter()
        .map(|sprint| build_burndown(sprint, snapshot.samples_for(sprint.id)))
        .collect();

    match ctx.format {
        OutputFormat::Json => println!("{}", cli::to_json(&burndowns)?),
        OutputFormat::Table => {
            if burndowns.is_empty() {
                println!("No active sprints");
            }
            for burndown in &burndowns {
                println!("{}", cli::format_burndown(burndown, ctx.no_color));
                println!();
            }
        }
    }

    Ok(())
}

async fn run_activity(ctx: &Session, limit: Option<usize>) -> Result<()> {
    let snapshot = load_snapshot(ctx).await?;
    let now = ctx.now();
    let entries = recent_activity(
        &snapshot.tasks,
        now,
        ctx.config.activity_window(),
        limit.unwrap_or(ctx.config.activity_limit),
    );

    match ctx.format {
        OutputFormat::Json => println!("{}", cli::to_json(&entries)?),
        OutputFormat::Table => println!("{}", cli::format_activity(&entries, now, ctx.no_color)),
    }

    Ok(())
}

async fn run_overview(ctx: &Session) -> Result<()> {
    let snapshot = load_snapshot(ctx).await?;
    let now = ctx.now();
    let view = DashboardView::compute(&snapshot, now, &ctx.config);

    if ctx.format == OutputFormat::Json {
        println!("{}", cli::to_json(&view)?);
        return Ok(());
    }

    println!("{}", cli::format_stats(&view.stats));
    println!();

    let mut open_with_due: Vec<_> = snapshot
        .tasks
        .iter()
        .filter(|t| !t.status.is_done() && t.due_date.is_some())
        .collect();
    open_with_due.sort_by_key(|t| t.due_date);
    if !open_with_due.is_empty() {
        println!("Deadlines:");
        for task in open_with_due.iter().take(ctx.config.activity_limit) {
            println!("  {}", cli::format_deadline(&task.title, task.due_date, now));
        }
        println!();
    }

    println!("{}", cli::format_buckets("Status", &view.status_buckets, ctx.no_color));
    println!();
    println!("{}", cli::format_buckets("Priority", &view.priority_buckets, ctx.no_color));
    println!();
    println!("{}", cli::format_progress(&view.project_progress, ctx.no_color));
    println!();
    println!("{}", cli::format_workload(&view.team_workload, ctx.no_color));
    println!();
    for burndown in &view.burndowns {
        println!("{}", cli::format_burndown(burndown, ctx.no_color));
        println!();
    }
    println!("{}", cli::format_activity(&view.recent_activity, now, ctx.no_color));

    Ok(())
}

/// Re-run the pure metrics on a fixed schedule
///
/// Load failures are logged and retried on the next tick.
async fn run_watch(ctx: &Session, interval: Option<u64>, count: Option<usize>) -> Result<()> {
    let secs = interval.unwrap_or(ctx.config.refresh_interval_secs);
    if secs == 0 {
        bail!("--interval must be greater than zero");
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(secs));
    let mut refreshes = 0usize;

    loop {
        ticker.tick().await;

        match load_snapshot(ctx).await {
            Ok(snapshot) => {
                let now = ctx.now();
                let view = DashboardView::compute(&snapshot, now, &ctx.config);
                match ctx.format {
                    OutputFormat::Json => println!("{}", serde_json::to_string(&view)?),
                    OutputFormat::Table => {
                        println!("--- {} ---", now.format("%Y-%m-%d %H:%M:%S"));
                        println!("{}", cli::format_stats(&view.stats));
                        for sprint in view.sprints_at_risk() {
                            println!("! {} is at risk ({}% complete)", sprint.name, sprint.percent_complete);
                        }
                        println!();
                    }
                }
            }
            Err(e) => tracing::error!(error = %e, "Refresh failed"),
        }

        refreshes += 1;
        if count.is_some_and(|max| refreshes >= max) {
            break;
        }
    }

    Ok(())
}
