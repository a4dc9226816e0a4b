//! mailcheck - email authentication checker
//!
//! Checks a domain's SPF, DKIM, DMARC and MX records and estimates what
//! weak authentication costs in lost revenue.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    mailcheck_cli::run().await
}
