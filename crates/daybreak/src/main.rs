mod bootstrap;

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::{error, info, warn};

use attendance_core::config::Config;
use attendance_core::error::AttendanceError;
use attendance_data::{discovery, merge, pipeline, roster};
use attendance_report::week::WeekRange;
use attendance_report::{builder, markdown, xlsx};

/// Badge check-in reconciliation for the 晨曦计划 study program.
#[derive(Parser, Debug)]
#[command(
    name = "daybreak",
    about = "Reconcile badge check-in exports into attendance reports",
    version
)]
struct Cli {
    /// Directory holding the roster and attendance exports
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Roster CSV file; relative paths resolve against --dir
    #[arg(long, default_value = "学生名单.csv")]
    roster: PathBuf,

    /// Optional JSON config overriding thresholds and labels
    #[arg(long)]
    config: Option<PathBuf>,

    /// Anchor date for the reporting week (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    week_end: Option<NaiveDate>,

    /// Logging level
    #[arg(long, default_value = "info", value_parser = ["trace", "debug", "info", "warn", "error"])]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    bootstrap::setup_logging(&cli.log_level)?;

    info!("daybreak v{} starting", env!("CARGO_PKG_VERSION"));
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::default(),
    };

    let roster_path = resolve_against(&cli.dir, &cli.roster);
    let roster = roster::load_roster(&roster_path)?;
    info!(
        "Loaded {} roster entries from {}",
        roster.len(),
        roster_path.display()
    );

    let today = Local::now().date_naive();
    let week = WeekRange::containing(cli.week_end.unwrap_or(today));
    info!("Reporting week: {} to {}", week.start, week.end);

    let plan = discovery::plan_sources(&cli.dir, today);
    if plan.is_empty() {
        warn!("No attendance source files found in {}", cli.dir.display());
    }

    let mut results = Vec::new();
    for source in &plan {
        info!(
            "Processing {} ({}-{:02})",
            source.path.display(),
            source.year_month.year,
            source.year_month.month
        );
        match pipeline::process_file(source, &roster, &config) {
            Ok(result) => {
                info!(
                    "  {} valid sessions, {} anomalies",
                    result.valid.len(),
                    result.anomalies.len()
                );
                results.push(result);
            }
            Err(e) => warn!("Skipping {}: {}", source.path.display(), e),
        }
    }

    if results.is_empty() {
        return Err(AttendanceError::NoData.into());
    }

    let merged = merge::merge_results(results);
    info!(
        "Merged dataset: {} valid records, {} anomalies",
        merged.valid.len(),
        merged.anomalies.len()
    );

    let report = builder::build_report(&merged, &roster, week, &config.class_label);

    // Both artifacts share one generation timestamp, so repeated runs
    // never collide or overwrite.
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let workbook_path = cli.dir.join(format!("晨曦计划打卡统计结果_{}.xlsx", timestamp));
    let weekly_path = cli.dir.join(format!("晨曦计划周报_{}.md", timestamp));

    // The two writes are independent: one may land while the other fails.
    let mut failures = 0;
    match xlsx::write_cumulative_workbook(&report, &workbook_path) {
        Ok(()) => info!("Wrote cumulative workbook {}", workbook_path.display()),
        Err(e) => {
            failures += 1;
            error!("{}", e);
        }
    }
    match markdown::write_weekly_markdown(&report, &weekly_path) {
        Ok(()) => info!("Wrote weekly report {}", weekly_path.display()),
        Err(e) => {
            failures += 1;
            error!("{}", e);
        }
    }

    if failures > 0 {
        anyhow::bail!("{} report artifact(s) failed to write", failures);
    }
    Ok(())
}

fn resolve_against(dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        dir.join(path)
    }
}
