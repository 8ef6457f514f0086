//! Check command handler.
//!
//! Prints which playback tools can be found, as a table or as JSON.

use anyhow::{Result, bail};
use std::sync::Arc;

use magplay_core::ServiceConfig;
use magplay_runtime::{
    DiagnosticsReport, SystemCommandProbe, ToolDiagnostic, ToolStatus, probe_installation,
};

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Execute the check command.
///
/// Fails when no strategy the configured mode uses can be launched.
pub async fn execute(config: &ServiceConfig, json: bool) -> Result<()> {
    let probe = Arc::new(SystemCommandProbe::new(config.probe_timeout));
    let report = probe_installation(config, probe).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if !report.has_playable_strategy() {
        bail!("no playback tool available for mode '{}'", report.mode);
    }
    Ok(())
}

fn print_report(report: &DiagnosticsReport) {
    println!("{BOLD}Playback tools{RESET} (mode: {})", report.mode);
    println!("{}", "-".repeat(60));

    match (&report.package_root, &report.package_root_error) {
        (Some(root), _) => println!("  package root: {}", root.display()),
        (None, Some(e)) => println!("  package root: {YELLOW}unavailable{RESET} ({e})"),
        (None, None) => {}
    }
    println!();

    for tool in &report.tools {
        print_tool(tool);
    }
}

/// Print a single strategy row.
fn print_tool(tool: &ToolDiagnostic) {
    let status = match &tool.status {
        ToolStatus::Resolved { .. } => match &tool.version {
            Some(version) => format!("{GREEN}✓ {version}{RESET}"),
            None => format!("{GREEN}✓ found{RESET}"),
        },
        ToolStatus::Missing { .. } if tool.active => format!("{RED}✗ missing{RESET}"),
        ToolStatus::Missing { .. } => format!("{YELLOW}○ missing{RESET}"),
    };
    let marker = if tool.active { "*" } else { " " };

    println!(
        "{marker}{:<27} {:<12} {}",
        tool.strategy.as_str(),
        tool.tool,
        status
    );

    match &tool.status {
        ToolStatus::Resolved { invocation } => {
            println!("    runs: {invocation}");
            if let Some(location) = &tool.location {
                println!("    at:   {}", location.display());
            }
        }
        ToolStatus::Missing { reason } => println!("    {reason}"),
    }
}
