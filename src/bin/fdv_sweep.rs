use clap::Parser;

use token_economics_calculator::models::Scenario;
use token_economics_calculator::utils::format::{format_currency, format_multiple, format_percent};
use token_economics_calculator::utils::TokenomicsCalculator;

/// Tabulates pre-market and market FDV across public sale allocations.
#[derive(Parser)]
#[command(name = "fdv_sweep")]
struct Cli {
    /// Team token allocation (%)
    #[arg(long, default_value_t = 10.0)]
    team: f64,
    /// Funds to raise ($)
    #[arg(long, default_value_t = 100_000.0)]
    funds: f64,
    /// Public allocation step in percentage points
    #[arg(long, default_value_t = 5.0)]
    step: f64,
}

fn main() {
    let cli = Cli::parse();
    let calculator = TokenomicsCalculator::new();

    if cli.step <= 0.0 {
        eprintln!("--step must be positive");
        std::process::exit(2);
    }

    println!(
        "{:>8} {:>8} {:>14} {:>14} {:>9}  {}",
        "public", "lp", "pre-market", "market", "multiple", "status"
    );

    // Index the rows so repeated addition of the step cannot drift past 100
    let rows = (100.0 / cli.step + 1e-9).floor() as u32;
    for i in 0..=rows {
        let public_pct = sweep_value(i, cli.step);
        let scenario = Scenario::new(cli.team, public_pct, cli.funds);

        match calculator.compute(scenario.team_pct, scenario.public_pct, scenario.funds_to_raise) {
            Ok(derived) => {
                let status = match calculator.validate(&scenario) {
                    Ok(_) => "ok".to_string(),
                    Err(e) => e.reason().code().to_lowercase(),
                };
                println!(
                    "{:>8} {:>8} {:>14} {:>14} {:>9}  {}",
                    format_percent(public_pct),
                    format_percent(derived.lp_pct),
                    format_currency(derived.pre_market_fdv),
                    format_currency(derived.market_fdv),
                    format_multiple(derived.fdv_multiple),
                    status
                );
            }
            Err(e) => {
                println!("{:>8} {:>8}  {}", format_percent(public_pct), "-", e);
            }
        }
    }
}

/// Public allocation for row `i`, with multiplication noise rounded away.
fn sweep_value(i: u32, step: f64) -> f64 {
    (i as f64 * step * 1e6).round() / 1e6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_reaches_exactly_one_hundred() {
        let step: f64 = 0.1;
        let rows = (100.0 / step + 1e-9).floor() as u32;

        assert_eq!(rows, 1000);
        assert_eq!(sweep_value(rows, step), 100.0);
        assert_eq!(sweep_value(300, step), 30.0);
        assert_eq!(sweep_value(3, 0.25), 0.75);
    }
}
