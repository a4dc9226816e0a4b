//! `mailcheck check` - analyze a domain.

use anyhow::Result;

use super::Context;
use crate::cli::args::CheckArgs;
use crate::education::Explain;
use crate::output::render_report;

pub async fn execute(ctx: Context, args: CheckArgs) -> Result<()> {
    if ctx.explain {
        let domain = mailcheck::normalize_domain(&args.domain)
            .unwrap_or_else(|_| args.domain.clone());
        Explain::check(&domain, &ctx.selectors(&args.lookup)).print();
    }

    let analyzer = ctx.analyzer(&args.lookup)?;
    let report = ctx.analyze(&analyzer, &args.domain).await?;

    print!("{}", render_report(&report, ctx.output_format)?);

    Ok(())
}
