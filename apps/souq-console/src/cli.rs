//! Process flags.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ConsoleConfig;

#[derive(Debug, Parser)]
#[command(
    name = "souq",
    version,
    about = "In-memory supermarket POS: inventory, carts with undo, cashier queues and sales"
)]
pub struct Cli {
    /// Path to souq.toml (defaults to the platform config directory)
    #[arg(long, env = "SOUQ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of regular cashiers
    #[arg(long)]
    pub cashiers: Option<usize>,

    /// Start with an empty inventory
    #[arg(long)]
    pub no_seed: bool,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Print reports as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Applies flags over the loaded configuration. Flags win over file
    /// and environment.
    pub fn apply(&self, config: &mut ConsoleConfig) {
        if let Some(cashiers) = self.cashiers {
            config.store.cashier_count = cashiers;
        }
        if self.no_seed {
            config.store.seed_catalog = false;
        }
        if self.json {
            config.display.json = true;
        }
    }
}
