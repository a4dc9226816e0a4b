//! Educational features: what each command looks up and why it matters.

use colored::Colorize;

/// Command explanation builder.
pub struct Explain {
    title: String,
    description: String,
    lookups: Vec<String>,
    what_happens: Vec<String>,
    learn_more: Option<String>,
}

impl Explain {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: String::new(),
            lookups: Vec::new(),
            what_happens: Vec::new(),
            learn_more: None,
        }
    }

    fn description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    fn lookup(mut self, query: &str) -> Self {
        self.lookups.push(query.to_string());
        self
    }

    fn step(mut self, step: &str) -> Self {
        self.what_happens.push(step.to_string());
        self
    }

    fn rfc(mut self, number: u16) -> Self {
        self.learn_more = Some(format!("https://www.rfc-editor.org/rfc/rfc{number}"));
        self
    }

    /// Render the explanation as plain or colored text.
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push('\n');
        out.push_str(&format!("{}\n\n", format!("=== {} ===", self.title).bold().cyan()));

        if !self.description.is_empty() {
            out.push_str(&format!("{}\n\n", self.description));
        }

        if !self.lookups.is_empty() {
            out.push_str(&format!("{}\n", "DNS lookups:".bold()));
            for query in &self.lookups {
                out.push_str(&format!("  {}\n", query.dimmed()));
            }
            out.push('\n');
        }

        if !self.what_happens.is_empty() {
            out.push_str(&format!("{}\n", "How it works:".bold()));
            for (i, step) in self.what_happens.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", i + 1, step));
            }
            out.push('\n');
        }

        if let Some(url) = &self.learn_more {
            out.push_str(&format!("{} {}\n\n", "Learn more:".bold(), url.cyan().underline()));
        }

        out.push_str(&format!("{}\n", "=== Results ===".bold().cyan()));
        out
    }

    /// Print the explanation to stderr, keeping stdout for results.
    pub fn print(&self) {
        eprintln!("{}", self.render());
    }

    // ========================================================================
    // Factory methods for each command
    // ========================================================================

    pub fn check(domain: &str, selectors: &[String]) -> Self {
        let dkim_name = selectors.first().map_or_else(
            || format!("<selector>._domainkey.{domain}"),
            |s| format!("{s}._domainkey.{domain}"),
        );

        Self::new("Email Authentication Check")
            .description(&format!(
                "Checks how well {domain} proves that its mail is really its own. \
                 Receivers use these records to decide between inbox, spam folder and rejection."
            ))
            .lookup(&format!("TXT {domain}  (SPF)"))
            .lookup(&format!("TXT {dkim_name}  (DKIM, then the next selector until one matches)"))
            .lookup(&format!("TXT _dmarc.{domain}  (DMARC)"))
            .lookup(&format!("MX  {domain}"))
            .step("The input is reduced to a bare domain (scheme, www., path and port dropped)")
            .step("SPF, DKIM, DMARC and MX are looked up at the same time")
            .step("Each mechanism passes when a record with the right version tag exists")
            .step("The score adds SPF 30, DKIM 30, DMARC 25 and MX 15 for each pass")
            .rfc(7489)
    }

    pub fn impact(domain: &str) -> Self {
        Self::new("Revenue Impact")
            .description(&format!(
                "Estimates revenue lost because mail from {domain} misses the inbox."
            ))
            .step("Runs the same check as `mailcheck check`")
            .step("Asks for an email address to unlock the calculator")
            .step("Sends the lead to the configured relay (skip with --no-submit)")
            .step("Inbox rate is modelled as 60% at score 0 rising to 95% at score 100")
            .step("Missed emails x conversion rate x order value = lost revenue")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_lists_every_lookup() {
        colored::control::set_override(false);
        let text = Explain::check("example.com", &["google".to_string()]).render();
        assert!(text.contains("TXT example.com"));
        assert!(text.contains("google._domainkey.example.com"));
        assert!(text.contains("_dmarc.example.com"));
        assert!(text.contains("MX  example.com"));
        assert!(text.contains("rfc7489"));
    }

    #[test]
    fn impact_mentions_opting_out_of_submission() {
        colored::control::set_override(false);
        let text = Explain::impact("example.com").render();
        assert!(text.contains("--no-submit"));
    }
}
