use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use filmlink::{run_match, FilmlinkConfig, InputPaths};

/// Link encyclopedia film articles to movie catalog records.
#[derive(Parser, Debug)]
#[command(name = "filmlink", version, about)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Match every movie article in the dump against the catalog
    Match(MatchArgs),
}

#[derive(Args, Debug)]
struct MatchArgs {
    /// Encyclopedia abstract dump (XML)
    wiki: PathBuf,
    /// Movie metadata table (CSV)
    catalog: PathBuf,
    /// Credits table (CSV)
    credits: PathBuf,

    /// Output CSV path, overriding the configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// YAML configuration file
    #[arg(short, long, env = "FILMLINK_CONFIG")]
    config: Option<PathBuf>,
}

fn init_tracing(verbose: bool, json: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json_logs);

    match cli.command {
        Command::Match(args) => {
            let mut config = match &args.config {
                Some(path) => FilmlinkConfig::from_file(path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => FilmlinkConfig::default(),
            };
            if let Some(output) = args.output {
                config.output.path = output;
            }

            let inputs = InputPaths {
                wiki: args.wiki,
                catalog: args.catalog,
                credits: args.credits,
            };
            let summary = run_match(&inputs, &config).await?;
            info!(
                documents_seen = summary.reader.documents_seen,
                movies = summary.reader.movies_emitted,
                matched = summary.table.len(),
                replaced = summary.stats.replaced,
                "done"
            );
        }
    }

    Ok(())
}
