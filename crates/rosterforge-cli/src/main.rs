//! `rosterforge` command-line interface.

mod error;
mod input;
mod output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use rosterforge::{FriendMode, RosterError, ScheduleResult, Scheduler, SchedulerConfig};

use crate::error::CliError;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "rosterforge")]
#[command(version, about = "Volunteer duty scheduling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve an event problem and print its schedule rows
    Solve {
        /// Problem file (.json, .yaml or .yml)
        #[arg(short, long)]
        problem: PathBuf,

        /// Scheduler configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Overrides the configured friend mode (strict, at-best, none)
        #[arg(long, value_parser = parse_friend_mode)]
        friend_mode: Option<FriendMode>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

fn parse_friend_mode(s: &str) -> Result<FriendMode, String> {
    s.parse().map_err(|err: rosterforge_config::ConfigError| err.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Command::Solve {
            problem,
            config,
            friend_mode,
            format,
        } => solve(&problem, config.as_deref(), friend_mode, format),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".bright_red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn solve(
    problem_path: &Path,
    config_path: Option<&Path>,
    friend_mode: Option<FriendMode>,
    format: OutputFormat,
) -> Result<(), CliError> {
    // The console layer prints to stdout and would corrupt JSON output.
    if format == OutputFormat::Table {
        rosterforge::console::init();
    }

    let problem = input::load_problem(problem_path)?;
    let mut config = match config_path {
        Some(path) => SchedulerConfig::load(path)?,
        None => SchedulerConfig::default(),
    };
    if let Some(mode) = friend_mode {
        config = config.with_friend_mode(mode);
    }

    let mut scheduler = Scheduler::new(problem).with_config(config);
    let result = scheduler.solve()?.clone();

    match format {
        OutputFormat::Json => {
            println!("{}", output::render_json(result.status(), result.schedule())?)
        }
        OutputFormat::Table => {
            if let Some(schedule) = result.schedule() {
                print!("{}", output::render_table(scheduler.problem(), schedule));
            }
        }
    }

    match result {
        ScheduleResult::Valid(_) => Ok(()),
        ScheduleResult::Invalid(status) => Err(RosterError::NotOptimal {
            status: status.to_string(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_solve_arguments() {
        let cli = Cli::try_parse_from([
            "rosterforge",
            "solve",
            "--problem",
            "event.yaml",
            "--friend-mode",
            "at-best",
            "--format",
            "json",
        ])
        .unwrap();

        let Command::Solve {
            problem,
            config,
            friend_mode,
            format,
        } = cli.command;
        assert_eq!(problem, PathBuf::from("event.yaml"));
        assert_eq!(config, None);
        assert_eq!(friend_mode, Some(FriendMode::AtBest));
        assert_eq!(format, OutputFormat::Json);
    }

    #[test]
    fn test_format_defaults_to_table() {
        let cli = Cli::try_parse_from(["rosterforge", "solve", "-p", "event.json"]).unwrap();
        let Command::Solve {
            friend_mode, format, ..
        } = cli.command;
        assert_eq!(friend_mode, None);
        assert_eq!(format, OutputFormat::Table);
    }

    #[test]
    fn test_unknown_friend_mode_rejected() {
        let parsed = Cli::try_parse_from([
            "rosterforge",
            "solve",
            "--problem",
            "event.json",
            "--friend-mode",
            "sometimes",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_missing_problem_file_reports_path() {
        let err = solve(
            Path::new("/nonexistent/event.json"),
            None,
            None,
            OutputFormat::Json,
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/event.json"));
    }
}
