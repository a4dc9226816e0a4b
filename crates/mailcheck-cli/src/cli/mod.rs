//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Filter used by `-v`.
const VERBOSE_FILTER: &str =
    "warn,mailcheck=debug,mailcheck_client=debug,mailcheck_analyzer=debug,mailcheck_cli=debug";

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config = Config::load()?;

    // Flag, then config file, then pretty
    let output_format = cli.output.or(config.output_format).unwrap_or_default();

    let ctx = commands::Context {
        resolver_url: cli.resolver_url,
        config,
        output_format,
        explain: cli.explain,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Check(args) => commands::check::execute(ctx, args).await,
        Commands::Impact(args) => commands::impact::execute(ctx, args).await,
        Commands::Config(args) => commands::config::execute(&ctx, args),
    }
}

/// Log to stderr. `RUST_LOG` wins unless `-v` was given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}
