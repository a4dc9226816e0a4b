//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;

/// Check a domain's email authentication setup
///
/// Looks up SPF, DKIM, DMARC and MX records over DNS-over-HTTPS and
/// scores the result from 0 to 100.
/// Use --explain on any command to see which lookups it makes.
#[derive(Parser, Debug)]
#[command(name = "mailcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// DNS-over-HTTPS JSON endpoint (or set MAILCHECK_RESOLVER_URL)
    #[arg(long, env = "MAILCHECK_RESOLVER_URL", global = true)]
    pub resolver_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Explain what this command does (educational mode)
    #[arg(long, global = true)]
    pub explain: bool,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check SPF, DKIM, DMARC and MX for a domain
    Check(CheckArgs),

    /// Estimate revenue lost to weak email authentication
    Impact(ImpactArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Lookup options shared by check and impact
// ============================================================================

#[derive(Args, Debug, Default)]
pub struct LookupArgs {
    /// DKIM selector to try, in order (repeatable; replaces the defaults)
    #[arg(short, long = "selector", value_name = "SELECTOR")]
    pub selectors: Vec<String>,

    /// Per-lookup timeout in seconds
    #[arg(short, long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Answer from a deterministic offline resolver instead of the network
    #[arg(long)]
    pub demo: bool,

    /// Seed for the demo resolver
    #[arg(long, requires = "demo")]
    pub seed: Option<u64>,
}

// ============================================================================
// Check command
// ============================================================================

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Domain, hostname or URL to check (e.g. https://www.example.com/shop)
    pub domain: String,

    #[command(flatten)]
    pub lookup: LookupArgs,
}

// ============================================================================
// Impact command
// ============================================================================

#[derive(Args, Debug)]
pub struct ImpactArgs {
    /// Domain, hostname or URL to check
    pub domain: String,

    /// Marketing emails sent per month
    #[arg(long, value_name = "COUNT")]
    pub monthly_emails: u64,

    /// Average order value
    #[arg(long, value_name = "AMOUNT")]
    pub order_value: f64,

    /// Email-to-order conversion rate in percent (e.g. 2.5)
    #[arg(long, value_name = "PERCENT")]
    pub conversion: f64,

    /// Email address to unlock the calculator with (prompted when omitted)
    #[arg(long)]
    pub email: Option<String>,

    /// Do not send the lead to the relay
    #[arg(long)]
    pub no_submit: bool,

    /// Lead relay endpoint (or set MAILCHECK_RELAY_URL)
    #[arg(long, env = "MAILCHECK_RELAY_URL")]
    pub relay_url: Option<String>,

    /// Mailing list to subscribe the lead to (or set MAILCHECK_LIST_ID)
    #[arg(long, env = "MAILCHECK_LIST_ID")]
    pub list_id: Option<String>,

    #[command(flatten)]
    pub lookup: LookupArgs,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (e.g., resolver_url, selectors)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn selectors_repeat_in_order() {
        let cli = Cli::parse_from([
            "mailcheck",
            "check",
            "example.com",
            "-s",
            "k1",
            "--selector",
            "google",
        ]);
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.domain, "example.com");
        assert_eq!(args.lookup.selectors, ["k1", "google"]);
        assert!(!args.lookup.demo);
    }

    #[test]
    fn seed_requires_demo() {
        let err = Cli::try_parse_from(["mailcheck", "check", "example.com", "--seed", "7"]);
        assert!(err.is_err());

        let cli =
            Cli::try_parse_from(["mailcheck", "check", "example.com", "--demo", "--seed", "7"])
                .unwrap();
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.lookup.seed, Some(7));
    }

    #[test]
    fn impact_takes_calculator_inputs() {
        let cli = Cli::parse_from([
            "mailcheck",
            "impact",
            "shop.example",
            "--monthly-emails",
            "50000",
            "--order-value",
            "80",
            "--conversion",
            "1.5",
            "--no-submit",
            "-o",
            "json",
        ]);
        assert_eq!(cli.output, Some(OutputFormat::Json));
        let Commands::Impact(args) = cli.command else {
            panic!("expected impact");
        };
        assert_eq!(args.monthly_emails, 50_000);
        assert!((args.order_value - 80.0).abs() < f64::EPSILON);
        assert!(args.no_submit);
        assert!(args.email.is_none());
    }
}
