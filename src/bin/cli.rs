//! Boost docs redirect CLI
//!
//! Local execution entry point. For AWS Lambda, use `docs-redirect-lambda`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use docs_redirect::{Resolver, error::Result, models::Config, pipeline};

/// Resolve legacy Boost documentation URLs to the latest release
#[derive(Parser, Debug)]
#[command(
    name = "docs-redirect",
    version,
    about = "Legacy Boost documentation redirect resolver"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "storage/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve one or more paths or URLs
    Resolve {
        /// Paths such as `1_84_0/libs/any/index.html` or full URLs
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Resolve every path in a file and write a JSON report
    Batch {
        /// File with one path per line
        #[arg(short, long)]
        input: PathBuf,

        /// Report destination (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate configuration and the cache index
    Validate,
}

/// Initialize logging based on verbosity flag and configured level.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config);
    config.apply_env();
    init_logging(cli.verbose, &config.logging.level);

    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Resolve { paths } => {
            let resolver = Resolver::from_config(&config).await?;
            for (input, result) in pipeline::run_resolve(&resolver, &paths).await? {
                println!("{}", pipeline::format_line(&input, &result));
            }
        }

        Command::Batch { input, output } => {
            let resolver = Resolver::from_config(&config).await?;
            let report =
                pipeline::run_batch(&resolver, &input, config.resolver.max_concurrent).await?;

            match output {
                Some(path) => {
                    report.write(&path).await?;
                    log::info!("Report saved to {}", path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&report)?),
            }

            for (matcher, count) in &report.by_matcher {
                log::info!("  {matcher}: {count}");
            }
        }

        Command::Validate => {
            let summary = pipeline::run_validate(&config).await?;
            log::info!(
                "All validations passed (latest={}, {} cached keys)",
                summary.latest_slug,
                summary.cached_keys
            );
        }
    }

    Ok(())
}
