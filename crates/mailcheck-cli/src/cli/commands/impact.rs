//! `mailcheck impact` - the lead funnel: check, capture an email, estimate.

use std::io::IsTerminal;

use anyhow::{Context as _, Result};
use colored::Colorize;
use dialoguer::Input;
use mailcheck::funnel::validate_email;
use mailcheck::{ImpactInputs, LeadSession, LeadSink, RelayClient};
use tracing::{debug, warn};

use super::Context;
use crate::cli::args::ImpactArgs;
use crate::education::Explain;
use crate::output::{render_impact, ImpactSummary};

pub async fn execute(ctx: Context, args: ImpactArgs) -> Result<()> {
    if ctx.explain {
        let domain = mailcheck::normalize_domain(&args.domain)
            .unwrap_or_else(|_| args.domain.clone());
        Explain::impact(&domain).print();
    }

    let inputs = ImpactInputs {
        monthly_emails: args.monthly_emails,
        average_order_value: args.order_value,
        conversion_rate_pct: args.conversion,
    };
    inputs.validate()?;

    // Reject a bad --email before spending any lookups
    let email = args.email.as_deref().map(validate_email).transpose()?;

    let mut session = LeadSession::new();

    let analyzer = ctx.analyzer(&args.lookup)?;
    session.record_report(ctx.analyze(&analyzer, &args.domain).await?);

    let email = match email {
        Some(email) => email,
        None => prompt_email()?,
    };
    session.capture_email(&email)?;

    if args.no_submit {
        debug!("lead submission disabled");
    } else {
        submit_lead(&ctx, &args, &session).await;
    }

    let estimate = session.estimate_impact(&inputs)?;
    let report = session
        .report()
        .context("the funnel lost its report")?;

    print!("{}", render_impact(&ImpactSummary::new(report, &estimate), ctx.output_format)?);

    Ok(())
}

fn prompt_email() -> Result<String> {
    if !std::io::stdin().is_terminal() {
        anyhow::bail!("--email is required when not running interactively");
    }

    let email: String = Input::new()
        .with_prompt("Work email to unlock the calculator")
        .validate_with(|input: &String| {
            validate_email(input)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()?;

    Ok(email)
}

/// Send the lead to the relay when one is configured. Failures are reported
/// but do not block the estimate.
async fn submit_lead(ctx: &Context, args: &ImpactArgs, session: &LeadSession) {
    let Some(relay_url) = args.relay_url.as_deref().or(ctx.config.relay_url.as_deref()) else {
        debug!("no relay configured; lead kept local");
        return;
    };
    let list_id = args.list_id.clone().or_else(|| ctx.config.list_id.clone());

    let result = async {
        let lead = session.lead_submission(ctx.config.source(), list_id)?;
        let relay = RelayClient::builder(relay_url).build()?;
        relay.submit(&lead).await
    }
    .await;

    if let Err(e) = result {
        warn!(error = %e, "lead submission failed");
        eprintln!("{} lead not submitted: {}", "Warning:".yellow().bold(), e);
    }
}
