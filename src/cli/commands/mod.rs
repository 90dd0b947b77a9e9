//! CLI command definitions and dispatch.
//!
//! This module provides the command-line interface for book-isbn.
//! Running without a subcommand does the whole job: fetch the wish list,
//! look up every title, write the JSON file. The subcommands in `enrich`
//! expose the two halves on their own.

mod enrich;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config::{self, Config};
use crate::enrichment::{FailurePolicy, PoolConfig};
use crate::error::Result;
use crate::output;

pub use enrich::{cmd_lookup, cmd_run, cmd_titles};

/// Look up ISBNs for the books on a Bookmeter wish list
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Bookmeter user id
    #[arg(short = 'u', long = "user", global = true)]
    pub user_id: Option<String>,

    /// Maximum concurrent lookups
    #[arg(short = 'l', long = "limit", global = true, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Output path for the JSON book list
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Log every title as it is looked up
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Keep going when a lookup fails and list the failures in the output
    #[arg(long, global = true)]
    pub best_effort: bool,

    /// Per-lookup timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Config file (default: the OS config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Google Books API key (or set GOOGLE_BOOKS_API_KEY env var)
    #[arg(long, env = "GOOGLE_BOOKS_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the titles on the wish list without looking them up
    Titles,
    /// Look up the given titles and print the result as JSON
    Lookup {
        /// Titles to search for
        #[arg(required = true)]
        titles: Vec<String>,
    },
}

/// Effective settings after merging the config file with command-line flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub user_id: String,
    pub api_key: Option<String>,
    pub pool: PoolConfig,
    pub output: PathBuf,
}

impl Cli {
    /// Load the config file and apply flag overrides on top.
    ///
    /// Every configuration error surfaces here, before any network activity.
    pub fn settings(&self) -> Result<Settings> {
        let config = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load(),
        };
        self.apply(config)
    }

    fn apply(&self, mut config: Config) -> Result<Settings> {
        if let Some(ref user_id) = self.user_id {
            config.source.user_id = user_id.clone();
        }
        if let Some(limit) = self.limit {
            config.enrichment.concurrency_limit = limit;
        }
        if let Some(ref path) = self.output {
            config.output.path = path.clone();
        }
        if self.verbose {
            config.enrichment.verbose = true;
        }
        if self.best_effort {
            config.enrichment.failure_policy = FailurePolicy::BestEffort;
        }
        if let Some(secs) = self.timeout {
            config.enrichment.lookup_timeout_secs = Some(secs);
        }
        if let Some(ref key) = self.api_key {
            config.credentials.google_books_api_key = Some(key.clone());
        }

        let pool = config.enrichment.to_pool_config()?;
        output::validate_path(&config.output.path)?;

        Ok(Settings {
            user_id: config.source.user_id,
            api_key: config.credentials.google_books_api_key,
            pool,
            output: config.output.path,
        })
    }
}

/// Run the command selected on the command line.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let settings = cli.settings()?;
    let rt = Runtime::new()?;

    match &cli.command {
        None => cmd_run(&rt, &settings)?,
        Some(Commands::Titles) => cmd_titles(&rt, &settings)?,
        Some(Commands::Lookup { titles }) => cmd_lookup(&rt, &settings, titles)?,
    }
    Ok(())
}
