//! Rendering of solve results.

use clap::ValueEnum;
use owo_colors::OwoColorize;
use rosterforge::{EventProblem, Schedule, ScheduleRow, SolveStatus};
use serde::Serialize;

use crate::error::CliError;

const SLOT_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored table, one line per seat and slot
    Table,
    /// Machine-readable report with persistence rows
    Json,
}

/// JSON document written by `--format json`.
#[derive(Debug, Serialize)]
struct Report {
    status: String,
    objective: Option<f64>,
    filled: usize,
    missing: usize,
    rows: Vec<ScheduleRow>,
}

/// Serializes the outcome of a solve. An invalid result carries its status
/// and no rows.
pub fn render_json(status: SolveStatus, schedule: Option<&Schedule>) -> Result<String, CliError> {
    let report = Report {
        status: status.to_string(),
        objective: schedule.map(Schedule::objective),
        filled: schedule.map_or(0, Schedule::filled_count),
        missing: schedule.map_or(0, Schedule::missing_count),
        rows: schedule.map(Schedule::rows).unwrap_or_default(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Formats the rows of a schedule chronologically, naming roles and
/// volunteers from the problem.
pub fn render_table(problem: &EventProblem, schedule: &Schedule) -> String {
    let mut rows = schedule.rows();
    rows.sort_unstable_by_key(|row| (row.slot, row.role, row.position));

    let role_name = |row: &ScheduleRow| {
        problem
            .role(row.role)
            .map_or_else(|| format!("role#{}", row.role.0), |role| role.name.clone())
    };
    let role_width = rows
        .iter()
        .map(|row| role_name(row).len())
        .max()
        .unwrap_or(0)
        .max("Role".len());

    let mut out = String::new();
    out.push_str(&format!(
        "{:<28}  {:<role_width$}  {:>3}  {}\n",
        "Slot".bold(),
        "Role".bold(),
        "Pos".bold(),
        "Volunteer".bold(),
    ));

    for row in &rows {
        let slot = format!(
            "{} - {}",
            row.slot.start().format(SLOT_FORMAT),
            row.slot.end().format("%H:%M")
        );
        let volunteer = match row.volunteer {
            Some(id) => problem
                .volunteer(id)
                .map_or_else(|| format!("volunteer#{}", id.0), |v| v.name.clone())
                .bright_green()
                .to_string(),
            None => "(missing)".bright_red().to_string(),
        };
        out.push_str(&format!(
            "{:<28}  {:<role_width$}  {:>3}  {}\n",
            slot.bright_black(),
            role_name(row),
            row.position,
            volunteer,
        ));
    }

    out.push_str(&format!(
        "\n{} filled, {} missing, objective {}\n",
        schedule.filled_count().to_string().bright_green(),
        schedule.missing_count().to_string().bright_red(),
        schedule.objective().to_string().bright_yellow(),
    ));
    out
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
