//! Colorful console output for scheduler solves.
//!
//! Provides a custom `tracing` layer that formats scheduler events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (solve and search start/end)
//! - **DEBUG**: Improving solutions found by the search

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_DIRECTIVES: &str = "rosterforge=info,rosterforge_solver=info";

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the RosterForge banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(RosterConsoleLayer)
            .try_init();
    });
}

// Marks the start of solving for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since solve start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 ____            _            _____
|  _ \ ___  ___| |_ ___ _ __|  ___|__  _ __ __ _  ___
| |_) / _ \/ __| __/ _ \ '__| |_ / _ \| '__/ _` |/ _ \
|  _ < (_) \__ \ ||  __/ |  |  _| (_) | | | (_| |  __/
|_| \_\___/|___/\__\___|_|  |_|  \___/|_|  \__, |\___|
                                            |___/
"#;

    let version_line = format!("                   v{} - Volunteer Duty Scheduler\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats scheduler events with colors.
pub struct RosterConsoleLayer;

impl<S: Subscriber> Layer<S> for RosterConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let target = event.metadata().target();

        // Accept events from the engine and the solver
        if !target.starts_with("rosterforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    backend: Option<String>,
    friend_mode: Option<String>,
    status: Option<String>,
    volunteer_count: Option<u64>,
    occurrence_count: Option<u64>,
    slot_count: Option<u64>,
    variable_count: Option<u64>,
    constraint_count: Option<u64>,
    time_limit_secs: Option<u64>,
    nodes: Option<u64>,
    pruned: Option<u64>,
    conflicts: Option<u64>,
    nodes_per_s: Option<u64>,
    filled: Option<u64>,
    missing: Option<u64>,
    duration_ms: Option<u64>,
    objective: Option<f64>,
    feasible: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "backend" => self.backend = Some(s),
            "friend_mode" => self.friend_mode = Some(s),
            "status" => self.status = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "volunteer_count" => self.volunteer_count = Some(value),
            "occurrence_count" => self.occurrence_count = Some(value),
            "slot_count" => self.slot_count = Some(value),
            "variable_count" => self.variable_count = Some(value),
            "constraint_count" => self.constraint_count = Some(value),
            "time_limit_secs" => self.time_limit_secs = Some(value),
            "nodes" => self.nodes = Some(value),
            "pruned" => self.pruned = Some(value),
            "conflicts" => self.conflicts = Some(value),
            "nodes_per_s" => self.nodes_per_s = Some(value),
            "filled" => self.filled = Some(value),
            "missing" => self.missing = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "objective" {
            self.objective = Some(value);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "feasible" {
            self.feasible = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "backend" => self.backend = Some(value.to_string()),
            "friend_mode" => self.friend_mode = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "search_end" => format_search_end(v),
        "incumbent" => format_incumbent(v),
        "solve_end" => format_solve_end(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let backend = v.backend.as_deref().unwrap_or("solver");
    let mode = v.friend_mode.as_deref().unwrap_or("strict");

    let mut output = format!(
        "{} {} Scheduling │ {} volunteers │ {} seats │ {} slots │ {} variables │ {} constraints │ friends {} │ {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        count(v.volunteer_count).bright_yellow(),
        count(v.occurrence_count).bright_yellow(),
        count(v.slot_count).bright_yellow(),
        count(v.variable_count).bright_yellow(),
        count(v.constraint_count).bright_yellow(),
        mode.white().bold(),
        backend.bright_cyan(),
    );

    if let Some(limit) = v.time_limit_secs.filter(|&secs| secs > 0) {
        output.push_str(&format!(
            " │ {}s limit",
            limit.to_formatted_string(&Locale::en).bright_yellow()
        ));
    }

    output
}

fn format_incumbent(v: &EventVisitor) -> String {
    format!(
        "    {} Node {:>10} │ objective {}",
        "->".bright_blue(),
        count(v.nodes).white(),
        format_objective(v.objective)
    )
}

fn format_search_end(v: &EventVisitor) -> String {
    format!(
        "{} {} Search ended │ {} │ {} nodes │ {} pruned │ {} conflicts │ {} nodes/s",
        format_elapsed(),
        "◀".bright_blue(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        count(v.nodes).white(),
        count(v.pruned).white(),
        count(v.conflicts).white(),
        count(v.nodes_per_s).bright_magenta().bold(),
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("unknown");
    let valid = v.feasible.unwrap_or(status == "optimal");

    let mut output = format!(
        "{} {} Scheduling complete │ {} │ {} filled │ {} missing │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_objective(v.objective),
        count(v.filled).bright_green(),
        count(v.missing).bright_yellow(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
    );

    // Summary box
    let status_text = if valid {
        "OPTIMAL SCHEDULE FOUND".to_string()
    } else {
        format!("NO SCHEDULE ({})", status.to_uppercase())
    };
    let inner_width: usize = 58;
    let total_pad = inner_width.saturating_sub(status_text.len());
    let left_pad = total_pad / 2;
    let right_pad = total_pad - left_pad;
    let status_colored = if valid {
        status_text.bright_green().bold().to_string()
    } else {
        status_text.bright_red().bold().to_string()
    };

    output.push_str("\n\n");
    output.push_str(
        &"╔══════════════════════════════════════════════════════════╗"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        status_colored,
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(
        &"╚══════════════════════════════════════════════════════════╝"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    output
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

fn format_objective(objective: Option<f64>) -> String {
    match objective {
        None => "N/A".white().to_string(),
        Some(value) if value < 0.0 => format!("{:.2}", value).bright_green().to_string(),
        Some(value) => format!("{:.2}", value).yellow().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unrelated_events_are_silent() {
        let visitor = EventVisitor {
            event: Some("role_demand".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor).is_empty());
    }

    #[test]
    fn test_solve_end_reports_status() {
        let visitor = EventVisitor {
            event: Some("solve_end".to_string()),
            status: Some("infeasible".to_string()),
            feasible: Some(false),
            filled: Some(0),
            missing: Some(4),
            ..EventVisitor::default()
        };
        let output = format_event(&visitor);
        assert!(output.contains("NO SCHEDULE (INFEASIBLE)"));
    }

    #[test]
    fn test_init_twice_is_noop() {
        init();
        init();
    }
}
