//! Problem files accepted by `rosterforge solve`.
//!
//! A problem file describes the event window and its slot granularity, the
//! roles and volunteers, and optionally the rows of an earlier schedule that
//! must be kept.
//!
//! ```yaml
//! event:
//!   start: 2025-06-01T08:00:00
//!   end: 2025-06-01T12:00:00
//!   granularity_minutes: 60
//! roles:
//!   - id: 1
//!     name: Bar
//!     window: { start: 2025-06-01T08:00:00, end: 2025-06-01T12:00:00 }
//!     occurrence: 2
//! volunteers:
//!   - id: 1
//!     name: Alice
//!     availability:
//!       - { start: 2025-06-01T08:00:00, end: 2025-06-01T12:00:00 }
//!     friend: 2
//! ```

use std::path::Path;

use chrono::{Duration, NaiveDateTime};
use rosterforge::{EventProblem, Role, ScheduleRow, ScheduleWindow, Volunteer};
use serde::Deserialize;
use tracing::info;

use crate::error::CliError;

/// On-disk layout of an event problem.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProblemFile {
    pub event: EventSection,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub volunteers: Vec<Volunteer>,
    #[serde(default)]
    pub prior_schedule: Vec<ScheduleRow>,
}

/// Event bounds and the slot grid.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EventSection {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub granularity_minutes: i64,
}

impl ProblemFile {
    pub fn from_json_str(s: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, CliError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Tiles the event window and turns filled prior rows into fixed
    /// placements.
    pub fn into_problem(self) -> Result<EventProblem, CliError> {
        let EventSection {
            start,
            end,
            granularity_minutes,
        } = self.event;
        if granularity_minutes <= 0 {
            return Err(CliError::Granularity(granularity_minutes));
        }

        let window = ScheduleWindow::tile(Duration::minutes(granularity_minutes), start, end)?;
        Ok(EventProblem::new(window, self.roles, self.volunteers)
            .with_prior_schedule(self.prior_schedule))
    }
}

/// Reads a problem file, picking the format from its extension.
pub fn load_problem(path: &Path) -> Result<EventProblem, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let file = match extension.as_deref() {
        Some("json") => ProblemFile::from_json_str(&contents)?,
        Some("yaml") | Some("yml") => ProblemFile::from_yaml_str(&contents)?,
        _ => return Err(CliError::UnsupportedFormat(path.to_path_buf())),
    };

    let problem = file.into_problem()?;
    info!(
        event = "problem_loaded",
        path = %path.display(),
        slots = problem.window.len() as u64,
        roles = problem.roles.len() as u64,
        volunteers = problem.volunteers.len() as u64,
        fixed = problem.fixed_placements.len() as u64,
    );
    Ok(problem)
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
