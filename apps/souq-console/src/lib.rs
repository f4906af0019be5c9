//! # Souq Console Library
//!
//! The operator-facing shell for Souq POS. `main.rs` only parses flags and
//! calls [`run`]; everything else lives here so it can be tested.
//!
//! ## Module Organization
//! ```text
//! souq_console/
//! ├── lib.rs       ◄─── You are here (startup & run)
//! ├── cli.rs       ◄─── Process flags (--config, --cashiers, --script, ...)
//! ├── config.rs    ◄─── souq.toml + SOUQ_* environment
//! ├── commands.rs  ◄─── Shell grammar and dispatch to Supermarket
//! ├── report.rs    ◄─── Tables and JSON output
//! ├── shell.rs     ◄─── Read-eval-print loop
//! └── error.rs     ◄─── ConsoleError
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Console Startup                                 │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, written to stderr            │
//! │     • Default: warn,souq=info; override with RUST_LOG                  │
//! │                                                                         │
//! │  2. Load Configuration ───────────────────────────────────────────────► │
//! │     • defaults → souq.toml → SOUQ_* env → CLI flags                    │
//! │                                                                         │
//! │  3. Open the Store ───────────────────────────────────────────────────► │
//! │     • tills created, catalog seeded unless --no-seed                   │
//! │                                                                         │
//! │  4. Run the Shell ────────────────────────────────────────────────────► │
//! │     • --script file, or stdin (prompt only on a terminal)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod report;
pub mod shell;

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};

use souq_core::Supermarket;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::ConsoleConfig;
use error::ConsoleResult;
use shell::{SessionSummary, Shell};

/// Runs the console with the given flags.
pub fn run(cli: Cli) -> ConsoleResult<SessionSummary> {
    let mut config = ConsoleConfig::load(cli.config.clone())?;
    cli.apply(&mut config);
    config.validate()?;

    let store = Supermarket::new(config.store.clone())?;
    info!(
        cashiers = config.store.cashier_count,
        products = store.inventory().len(),
        "Store opened"
    );

    let mut shell = Shell::new(store, config.display);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = match &cli.script {
        Some(path) => {
            info!(?path, "Running script");
            let file = File::open(path)?;
            shell.run(BufReader::new(file), &mut out, false)?
        }
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            shell.run(stdin.lock(), &mut out, interactive)?
        }
    };

    info!(
        commands = summary.commands,
        failures = summary.failures,
        "Session finished"
    );
    Ok(summary)
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so they never interleave with report output.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,souq=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
