use std::fmt;

use crate::models::{DerivedValues, LimitWarning, Scenario};
use crate::utils::tokenomics::LP_FUND_SHARE;

/// Formats large numbers with a B/M/K suffix and comma-grouped integer part.
pub fn format_number(num: f64) -> String {
    if num >= 1_000_000_000.0 {
        format!("{}B", group_thousands(num / 1_000_000_000.0))
    } else if num >= 1_000_000.0 {
        format!("{}M", group_thousands(num / 1_000_000.0))
    } else if num >= 1_000.0 {
        format!("{}K", group_thousands(num / 1_000.0))
    } else {
        group_thousands(num)
    }
}

pub fn format_currency(num: f64) -> String {
    format!("${}", format_number(num))
}

pub fn format_percent(pct: f64) -> String {
    format!("{:.1}%", pct)
}

pub fn format_multiple(multiple: f64) -> String {
    format!("{:.2}x", multiple)
}

/// Two decimals with commas between thousands, e.g. `1234567.891` -> `1,234,567.89`.
fn group_thousands(num: f64) -> String {
    let fixed = format!("{:.2}", num.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if num < 0.0 && fixed.chars().any(|c| c != '0' && c != '.') { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Plain-text rendering of everything the calculator shows for one scenario.
pub struct Report<'a> {
    pub scenario: &'a Scenario,
    pub derived: &'a DerivedValues,
    pub warning: Option<LimitWarning>,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (scenario, derived) = (self.scenario, self.derived);
        let lp_share = LP_FUND_SHARE * 100.0;
        let team_share = 100.0 - lp_share;

        writeln!(f, "Token Distribution")?;
        writeln!(f, "  Team Tokens:         {} tokens ({})", format_number(derived.team_tokens), format_percent(scenario.team_pct))?;
        writeln!(f, "  Public Sale Tokens:  {} tokens ({})", format_number(derived.public_tokens), format_percent(scenario.public_pct))?;
        writeln!(f, "  LP Tokens:           {} tokens ({})", format_number(derived.lp_tokens), format_percent(derived.lp_pct))?;
        writeln!(f, "  Total Allocation:    {}", format_percent(scenario.team_pct + scenario.public_pct + derived.lp_pct))?;
        writeln!(f)?;
        writeln!(f, "Funds & Valuation")?;
        writeln!(f, "  Total Funds Raised:  {}", format_currency(scenario.funds_to_raise))?;
        writeln!(f, "  LP Funds ({:.0}%):      {}", lp_share, format_currency(derived.lp_funds))?;
        writeln!(f, "  Team Funds ({:.0}%):    {}", team_share, format_currency(derived.team_funds))?;
        writeln!(f)?;
        writeln!(f, "Fully Diluted Valuations")?;
        writeln!(f, "  Pre-Market FDV:      {}", format_currency(derived.pre_market_fdv))?;
        writeln!(f, "  Market FDV:          {}", format_currency(derived.market_fdv))?;
        writeln!(f, "  FDV Multiple:        {}", format_multiple(derived.fdv_multiple))?;

        if let Some(warning) = self.warning {
            writeln!(f)?;
            writeln!(f, "Warning: {}", warning)?;
        }

        Ok(())
    }
}

pub fn render_report(scenario: &Scenario, derived: &DerivedValues, warning: Option<LimitWarning>) -> String {
    Report { scenario, derived, warning }.to_string()
}
