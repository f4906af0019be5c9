//! # Command Shell
//!
//! Line-oriented loop over a [`Supermarket`]. Every failure becomes a status
//! line and the loop keeps going; only I/O on the output stream stops it.

use std::io::{BufRead, Write};

use clap::error::ErrorKind;
use souq_core::Supermarket;
use tracing::debug;

use crate::commands::{execute, parse_line};
use crate::config::DisplaySettings;
use crate::error::{ConsoleError, ConsoleResult};
use crate::report::{self, Report};

/// Prompt shown when reading from a terminal.
pub const PROMPT: &str = "souq> ";

/// Counters for a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub commands: usize,
    pub failures: usize,
}

/// Output of a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOutcome {
    /// Text to print, if any.
    pub output: Option<String>,
    pub failed: bool,
    pub exit: bool,
}

impl LineOutcome {
    fn skipped() -> Self {
        LineOutcome {
            output: None,
            failed: false,
            exit: false,
        }
    }
}

pub struct Shell {
    store: Supermarket,
    display: DisplaySettings,
}

impl Shell {
    pub fn new(store: Supermarket, display: DisplaySettings) -> Self {
        Shell { store, display }
    }

    pub fn store(&self) -> &Supermarket {
        &self.store
    }

    /// Parses and runs one line.
    pub fn handle_line(&mut self, line: &str) -> LineOutcome {
        let command = match parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => return LineOutcome::skipped(),
            // `<command> --help`
            Err(ConsoleError::Usage(e)) if e.kind() == ErrorKind::DisplayHelp => {
                return self.outcome(Ok(Report::Help(e.to_string())));
            }
            Err(e) => return self.outcome(Err(e)),
        };

        debug!(?command, "Running command");
        let result = execute(&mut self.store, command);
        self.outcome(result)
    }

    fn outcome(&self, result: ConsoleResult<Report>) -> LineOutcome {
        match result {
            Ok(report) => {
                let exit = report.is_exit();
                match report::render(&report, &self.display) {
                    Ok(text) => LineOutcome {
                        output: Some(text),
                        failed: false,
                        exit,
                    },
                    Err(e) => LineOutcome {
                        output: Some(report::render_error(&e, &self.display)),
                        failed: true,
                        exit,
                    },
                }
            }
            Err(e) => {
                debug!(error = %e, "Command failed");
                LineOutcome {
                    output: Some(report::render_error(&e, &self.display)),
                    failed: true,
                    exit: false,
                }
            }
        }
    }

    /// Reads commands until EOF or `exit`.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
        interactive: bool,
    ) -> ConsoleResult<SessionSummary> {
        let mut summary = SessionSummary::default();

        if interactive {
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }

        for line in input.lines() {
            let line = line?;
            let outcome = self.handle_line(&line);

            if let Some(text) = &outcome.output {
                summary.commands += 1;
                writeln!(out, "{text}")?;
            }
            if outcome.failed {
                summary.failures += 1;
            }
            if outcome.exit {
                break;
            }

            if interactive {
                write!(out, "{PROMPT}")?;
                out.flush()?;
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use souq_core::StoreSettings;

    fn shell() -> Shell {
        let store = Supermarket::new(StoreSettings::default()).unwrap();
        Shell::new(store, DisplaySettings::default())
    }

    fn run_script(shell: &mut Shell, script: &str) -> (String, SessionSummary) {
        let mut out = Vec::new();
        let summary = shell.run(script.as_bytes(), &mut out, false).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_script_session() {
        let mut shell = shell();
        let (out, summary) = run_script(
            &mut shell,
            "# morning\n\
             add-customer C1 Mona\n\
             add-item C1 0001 10\n\
             enqueue C1\n\
             checkout 1 --coupon SAVE5\n\
             sales\n",
        );

        assert_eq!(summary, SessionSummary { commands: 5, failures: 0 });
        assert!(out.contains("C1 is queued at CASH1"));
        assert!(out.contains("Sale S1 at CASH1"));
        assert!(out.contains("Revenue: LE 427.50"));
        assert_eq!(shell.store().ledger().len(), 1);
    }

    #[test]
    fn test_failures_do_not_stop_session() {
        let mut shell = shell();
        let (out, summary) = run_script(
            &mut shell,
            "add-item NOBODY 0001 1\n\
             frobnicate\n\
             add-customer C1 Mona\n\
             add-item C1 0001 999\n\
             cart C1\n",
        );

        assert_eq!(summary.commands, 5);
        assert_eq!(summary.failures, 3);
        assert!(out.contains("error: Customer not found: NOBODY"));
        assert!(out.contains("error: Insufficient stock for 0001: available 50, requested 999"));
        assert!(out.contains("C1's cart is empty"));
        assert_eq!(shell.store().inventory().get("0001").unwrap().stock(), 50);
    }

    #[test]
    fn test_exit_stops_reading() {
        let mut shell = shell();
        let (out, summary) = run_script(&mut shell, "customers\nexit\nadd-customer C1 Mona\n");

        assert_eq!(summary.commands, 2);
        assert!(out.ends_with("Goodbye.\n"));
        assert!(shell.store().customers().is_empty());
    }

    #[test]
    fn test_subcommand_help_is_not_a_failure() {
        let mut shell = shell();
        let outcome = shell.handle_line("checkout --help");
        assert!(!outcome.failed);
        assert!(outcome.output.unwrap().contains("--coupon"));
    }

    #[test]
    fn test_json_errors() {
        let store = Supermarket::new(StoreSettings::default()).unwrap();
        let mut shell = Shell::new(
            store,
            DisplaySettings {
                json: true,
                ..Default::default()
            },
        );

        let outcome = shell.handle_line("checkout 1");
        assert!(outcome.failed);
        let value: serde_json::Value = serde_json::from_str(&outcome.output.unwrap()).unwrap();
        assert_eq!(value["error"]["code"], "QUEUE_ERROR");
    }
}
