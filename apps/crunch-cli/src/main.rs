use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use crunch_persist::{EmptyAggregate, Store};
use tracing_subscriber::EnvFilter;

mod command;
mod config;
mod render;
mod repl;

use config::ShellConfig;
use repl::Repl;

#[derive(Parser)]
#[command(name = "crunch", about = "Integer-sequence key-value store with snapshots")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How MIN, MAX and SUM report an empty sequence
    #[arg(long, value_enum)]
    empty_aggregate: Option<AggregateArg>,

    /// Read commands from a file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Do not print the prompt
    #[arg(long)]
    no_prompt: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum AggregateArg {
    /// Print `nil`
    Nil,
    /// Print `0`
    Zero,
}

impl From<AggregateArg> for EmptyAggregate {
    fn from(arg: AggregateArg) -> Self {
        match arg {
            AggregateArg::Nil => Self::Nil,
            AggregateArg::Zero => Self::Zero,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout belongs to the shell.
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => ShellConfig::load(path)?,
        None => ShellConfig::default(),
    };
    if let Some(arg) = cli.empty_aggregate {
        config.store.empty_aggregate = arg.into();
    }
    tracing::debug!(?config, "starting shell");

    let prompt = (!cli.no_prompt).then(|| config.prompt.clone());
    let mut shell = Repl::new(Store::with_config(config.store), io::stdout().lock(), prompt);

    match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening script {}", path.display()))?;
            shell.run(BufReader::new(file))?;
        }
        None => shell.run(io::stdin().lock())?,
    }
    tracing::debug!(
        entries = shell.store().entries().len(),
        snapshots = shell.store().snapshots().len(),
        "session ended"
    );

    Ok(())
}
