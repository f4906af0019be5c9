//! # Souq Console Entry Point
//!
//! ```text
//! $ souq --cashiers 2
//! souq> add-customer C1 Mona
//! souq> add-item C1 0001 10
//! souq> enqueue C1
//! souq> checkout 1 --coupon SAVE5
//! ```
//!
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

use clap::Parser;
use souq_console::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    souq_console::init_tracing();

    match souq_console::run(cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
