//! Command implementations.

pub mod check;
pub mod config;
pub mod impact;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use indicatif::{ProgressBar, ProgressStyle};
use mailcheck::{Analyzer, AnalyzerConfig, DemoResolver, DohClient, DomainReport, Resolver};
use tracing::debug;

use crate::cli::args::LookupArgs;
use crate::config::Config;
use crate::output::OutputFormat;

/// Analyzer over whichever resolver the flags select.
pub type DynAnalyzer = Analyzer<Arc<dyn Resolver>>;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Resolver endpoint from `--resolver-url` or the environment
    pub resolver_url: Option<String>,

    /// Loaded configuration file
    pub config: Config,

    /// Output format
    pub output_format: OutputFormat,

    /// Whether to show educational explanations
    pub explain: bool,

    /// Verbose output
    pub verbose: bool,
}

impl Context {
    /// Selectors to try: flags first, then config, then built-in defaults.
    pub fn selectors(&self, lookup: &LookupArgs) -> Vec<String> {
        if !lookup.selectors.is_empty() {
            lookup.selectors.clone()
        } else if !self.config.selectors.is_empty() {
            self.config.selectors.clone()
        } else {
            mailcheck::DEFAULT_SELECTORS.iter().map(ToString::to_string).collect()
        }
    }

    /// Per-lookup timeout from flags or config.
    pub fn lookup_timeout(&self, lookup: &LookupArgs) -> Result<Duration> {
        match lookup.timeout.or(self.config.timeout_secs) {
            Some(0) => anyhow::bail!("timeout must be at least 1 second"),
            Some(secs) => Ok(Duration::from_secs(secs)),
            None => Ok(mailcheck::DEFAULT_LOOKUP_TIMEOUT),
        }
    }

    /// Build the analyzer for a command.
    pub fn analyzer(&self, lookup: &LookupArgs) -> Result<DynAnalyzer> {
        let timeout = self.lookup_timeout(lookup)?;

        let resolver: Arc<dyn Resolver> = if lookup.demo {
            let seed = lookup.seed.unwrap_or_default();
            debug!(seed, "using demo resolver");
            Arc::new(DemoResolver::new(seed))
        } else {
            let mut builder = DohClient::builder().timeout(timeout);
            if let Some(url) = self
                .resolver_url
                .as_deref()
                .or(self.config.resolver_url.as_deref())
            {
                builder = builder.endpoint(url);
            }
            let client = builder
                .try_build()
                .context("configuring the DNS-over-HTTPS client")?;
            debug!(endpoint = %client.endpoint(), "using DNS-over-HTTPS resolver");
            Arc::new(client)
        };

        let config = AnalyzerConfig::new()
            .selectors(self.selectors(lookup))
            .lookup_timeout(timeout);

        Ok(Analyzer::with_config(resolver, config))
    }

    /// Run an analysis, with a spinner for interactive pretty output.
    pub async fn analyze(&self, analyzer: &DynAnalyzer, domain: &str) -> Result<DomainReport> {
        let spinner = (self.output_format == OutputFormat::Pretty).then(|| {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
                pb.set_style(style);
            }
            pb.set_message(format!("Checking {domain}..."));
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });

        let result = analyzer.analyze(domain).await;

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        Ok(result?)
    }
}
