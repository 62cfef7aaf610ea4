use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod classify;
mod loader;
mod models;
mod report;
mod stores;
mod workbook;

use crate::classify::{ClassifyOptions, DEFAULT_TEAM, DEFAULT_WINDOW_DAYS};
use crate::models::RunSummary;

#[derive(Parser)]
#[command(name = "helpdesk-daily-report")]
#[command(about = "Daily helpdesk workload report by assignee and store", long_about = None)]
struct Cli {
    /// Export of currently active tickets
    #[arg(long, default_value = "active_tickets.csv")]
    active: PathBuf,
    /// Export of closed tickets
    #[arg(long, default_value = "closed_tickets.csv")]
    closed: PathBuf,
    #[arg(long, default_value = "IT_Daily_Report.xlsx")]
    out: PathBuf,
    /// Only tickets routed to this team are reported
    #[arg(long, default_value = DEFAULT_TEAM)]
    team: String,
    /// Trailing window, in days, for closed tickets
    #[arg(long, default_value_t = DEFAULT_WINDOW_DAYS)]
    window_days: i64,
    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = ClassifyOptions {
        team: cli.team,
        window_days: cli.window_days.max(1),
    };

    let active = loader::load_tickets(&cli.active, loader::ACTIVE_REQUIRED)?;
    let closed = loader::load_tickets(&cli.closed, loader::CLOSED_REQUIRED)?;
    info!(
        active = active.records.len(),
        closed = closed.records.len(),
        "loaded ticket exports"
    );

    let now = Utc::now().naive_utc();
    let tickets = classify::classify(active, closed, &options, now);
    info!(
        team = %options.team,
        active = tickets.active.len(),
        closed = tickets.closed.len(),
        resolved = tickets.resolved_promoted,
        "classified tickets"
    );

    let sheets = report::build_sheets(&tickets, options.window_days);
    workbook::write_report(&cli.out, &sheets)?;
    info!(path = %cli.out.display(), "saved report");

    let summary = RunSummary {
        output: cli.out.display().to_string(),
        active_tickets: tickets.active.len(),
        closed_tickets: tickets.closed.len(),
        resolved_promoted: tickets.resolved_promoted,
        assignees: report::summarize_by_assignee(&tickets).len(),
        cutoff: classify::cutoff(now, options.window_days),
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&summary).context("failed to encode summary")?;
        println!("{json}");
    } else {
        println!("Active tickets: {}", summary.active_tickets);
        println!(
            "Closed/resolved tickets (last {} days): {}",
            options.window_days, summary.closed_tickets
        );
        println!("Assignees: {}", summary.assignees);
        println!("Report written to {}.", summary.output);
    }

    Ok(())
}
