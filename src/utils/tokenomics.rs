use log::{debug, info};

use crate::models::{
    AllocationError, DerivedValues, LimitWarning, Outcome, Scenario, ScenarioField,
};

/// 10 billion tokens, fixed for every scenario.
pub const TOTAL_TOKEN_SUPPLY: f64 = 10_000_000_000.0;

/// Share of the raised funds that seeds the liquidity pool; the rest goes to the team.
pub const LP_FUND_SHARE: f64 = 0.20;

/// LP allocation below which the UI flags the slider as pinned at its minimum.
const LP_NEAR_MINIMUM_PCT: f64 = 1.0;
/// Distance (in percentage points) from FDV parity that counts as "at the limit".
const FDV_PARITY_BAND_PCT: f64 = 0.5;
/// Public allocation at or below which the FDV parity warning is not raised.
const MIN_PUBLIC_FOR_PARITY_PCT: f64 = 0.1;

pub struct TokenomicsCalculator {
    pub total_supply: f64,
    pub lp_fund_share: f64,
}

impl Default for TokenomicsCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenomicsCalculator {
    pub fn new() -> Self {
        Self {
            total_supply: TOTAL_TOKEN_SUPPLY,
            lp_fund_share: LP_FUND_SHARE,
        }
    }

    pub fn with_total_supply(total_supply: f64) -> Self {
        Self {
            total_supply,
            ..Self::new()
        }
    }

    /// Derives the LP allocation, token and fund splits, prices and FDVs.
    ///
    /// Fails with `OutOfBounds` for non-finite or out-of-range inputs, with
    /// `OffStep` for values between slider notches, and with
    /// `InvalidAllocation` when team + public leaves nothing for the LP. A
    /// scenario whose market FDV sits below its pre-market FDV still computes;
    /// see [`DerivedValues::meets_fdv_floor`].
    pub fn compute(
        &self,
        team_pct: f64,
        public_pct: f64,
        funds_to_raise: f64,
    ) -> Result<DerivedValues, AllocationError> {
        let scenario = Scenario::new(team_pct, public_pct, funds_to_raise);
        check_finite(&scenario)?;

        let lp_pct = scenario.lp_pct();
        if lp_pct <= 0.0 {
            return Err(AllocationError::InvalidAllocation {
                team_pct,
                public_pct,
                lp_pct,
            });
        }

        check_bounds(&scenario)?;

        let team_tokens = self.total_supply * (team_pct / 100.0);
        let public_tokens = self.total_supply * (public_pct / 100.0);
        let lp_tokens = self.total_supply * (lp_pct / 100.0);

        let lp_funds = funds_to_raise * self.lp_fund_share;
        let team_funds = funds_to_raise * (1.0 - self.lp_fund_share);

        // No public sale means no sale price
        let ico_price = if public_tokens > 0.0 {
            funds_to_raise / public_tokens
        } else {
            0.0
        };
        let lp_price = lp_funds / lp_tokens;

        let pre_market_fdv = self.total_supply * ico_price;
        let market_fdv = self.total_supply * lp_price;
        let fdv_multiple = if pre_market_fdv > 0.0 {
            market_fdv / pre_market_fdv
        } else {
            0.0
        };

        debug!(
            "Tokenomics calc: team={}%, public={}%, lp={}%, funds=${}, ico_price=${}, lp_price=${}, fdv_ico=${:.0}, fdv_lp=${:.0}, multiple={:.2}x",
            team_pct, public_pct, lp_pct, funds_to_raise, ico_price, lp_price, pre_market_fdv, market_fdv, fdv_multiple
        );

        Ok(DerivedValues {
            lp_pct,
            team_tokens,
            public_tokens,
            lp_tokens,
            team_funds,
            lp_funds,
            ico_price,
            lp_price,
            pre_market_fdv,
            market_fdv,
            fdv_multiple,
        })
    }

    /// Full check of a scenario: everything `compute` checks plus the FDV floor.
    pub fn validate(&self, scenario: &Scenario) -> Result<DerivedValues, AllocationError> {
        let derived = self.compute(scenario.team_pct, scenario.public_pct, scenario.funds_to_raise)?;

        if !derived.meets_fdv_floor() {
            return Err(AllocationError::MarketFdvBelowIcoFdv {
                market_fdv: derived.market_fdv,
                pre_market_fdv: derived.pre_market_fdv,
            });
        }

        Ok(derived)
    }

    /// Decides whether moving one slider to `value` may be committed.
    ///
    /// `current` is never modified; on rejection the caller keeps it as is.
    pub fn validate_change(&self, current: &Scenario, field: ScenarioField, value: f64) -> Outcome {
        let candidate = current.with_field(field, value);

        match self.validate(&candidate) {
            Ok(_) => Outcome::Accepted(candidate),
            Err(e) => {
                info!("Rejected {} -> {}: {}", field, value, e);
                Outcome::Rejected(e)
            }
        }
    }

    /// Flags a scenario that is valid but pinned against one of its limits.
    pub fn limit_warning(&self, scenario: &Scenario) -> Option<LimitWarning> {
        let lp_pct = scenario.lp_pct();

        if lp_pct < LP_NEAR_MINIMUM_PCT {
            return Some(LimitWarning::LpNearMinimum);
        }

        if scenario.public_pct > MIN_PUBLIC_FOR_PARITY_PCT {
            let max_lp_allowed = self.lp_fund_share * scenario.public_pct;
            if (lp_pct - max_lp_allowed).abs() < FDV_PARITY_BAND_PCT {
                return Some(LimitWarning::AtFdvParity);
            }
        }

        None
    }
}

/// [`TokenomicsCalculator::compute`] with the fixed supply and LP share.
pub fn compute(team_pct: f64, public_pct: f64, funds_to_raise: f64) -> Result<DerivedValues, AllocationError> {
    TokenomicsCalculator::new().compute(team_pct, public_pct, funds_to_raise)
}

/// [`TokenomicsCalculator::validate_change`] with the fixed supply and LP share.
pub fn validate_change(current: &Scenario, field: ScenarioField, value: f64) -> Outcome {
    TokenomicsCalculator::new().validate_change(current, field, value)
}

fn check_finite(scenario: &Scenario) -> Result<(), AllocationError> {
    for field in ScenarioField::ALL {
        let value = scenario.get(field);
        if !value.is_finite() {
            let bounds = field.bounds();
            return Err(AllocationError::OutOfBounds {
                field,
                value,
                min: bounds.min,
                max: bounds.max,
            });
        }
    }
    Ok(())
}

fn check_bounds(scenario: &Scenario) -> Result<(), AllocationError> {
    for field in ScenarioField::ALL {
        let value = scenario.get(field);
        let bounds = field.bounds();
        if !bounds.contains(value) {
            return Err(AllocationError::OutOfBounds {
                field,
                value,
                min: bounds.min,
                max: bounds.max,
            });
        }
        if !bounds.on_step(value) {
            return Err(AllocationError::OffStep {
                field,
                value,
                step: bounds.step,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RejectionReason;

    #[test]
    fn test_example_one_rejected_on_fdv_floor() {
        let calc = TokenomicsCalculator::with_total_supply(1_000_000_000.0);
        let derived = calc.compute(10.0, 60.0, 500_000.0).unwrap();

        assert!((derived.lp_pct - 30.0).abs() < 1e-9);
        assert!((derived.public_tokens - 600_000_000.0).abs() < 1e-3);
        assert!((derived.ico_price - 0.000833).abs() < 1e-6);
        assert!((derived.pre_market_fdv - 833_333.33).abs() < 0.01);
        assert!((derived.lp_funds - 100_000.0).abs() < 1e-9);
        assert!((derived.lp_tokens - 300_000_000.0).abs() < 1e-3);
        assert!((derived.lp_price - 0.000333).abs() < 1e-6);
        assert!((derived.market_fdv - 333_333.33).abs() < 0.01);
        assert!(!derived.meets_fdv_floor());

        let current = Scenario::new(10.0, 75.0, 500_000.0);
        let outcome = calc.validate_change(&current, ScenarioField::PublicPct, 60.0);
        assert_eq!(outcome.reason(), Some(RejectionReason::MarketFdvBelowIcoFdv));
    }

    #[test]
    fn test_example_two_allocation_sums() {
        let derived = compute(5.0, 50.0, 200_000.0).unwrap();

        assert_eq!(derived.lp_pct, 45.0);
        assert_eq!(5.0 + 50.0 + derived.lp_pct, 100.0);
        assert!(derived.lp_pct > 0.0);
    }

    #[test]
    fn test_example_three_lp_non_positive() {
        let current = Scenario::new(10.0, 40.0, 100_000.0);
        let outcome = validate_change(&current, ScenarioField::TeamPct, 70.0);

        assert_eq!(outcome.reason(), Some(RejectionReason::LpWouldBeNonPositive));
        assert_eq!(current, Scenario::new(10.0, 40.0, 100_000.0));
    }

    #[test]
    fn test_compute_rejects_zero_lp() {
        let result = compute(30.0, 70.0, 100_000.0);
        assert!(matches!(result, Err(AllocationError::InvalidAllocation { .. })));
    }

    #[test]
    fn test_compute_rejects_out_of_bounds() {
        let result = compute(10.0, 80.0, 5_000.0);
        match result {
            Err(AllocationError::OutOfBounds { field, .. }) => assert_eq!(field, ScenarioField::FundsToRaise),
            other => panic!("expected OutOfBounds, got {:?}", other),
        }

        let result = compute(f64::NAN, 80.0, 100_000.0);
        assert_eq!(result.unwrap_err().reason(), RejectionReason::OutOfBounds);
    }

    #[test]
    fn test_funds_split() {
        let derived = compute(10.0, 80.0, 100_000.0).unwrap();
        assert!((derived.lp_funds - 20_000.0).abs() < 1e-9);
        assert!((derived.team_funds - 80_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_scenario_is_valid() {
        let calc = TokenomicsCalculator::new();
        let derived = calc.validate(&Scenario::default()).unwrap();

        assert_eq!(derived.lp_pct, 10.0);
        assert!((derived.team_tokens - 1_000_000_000.0).abs() < 1e-3);
        assert!((derived.fdv_multiple - 1.6).abs() < 1e-9);
        assert_eq!(calc.limit_warning(&Scenario::default()), None);
    }

    #[test]
    fn test_fdv_parity_is_accepted() {
        // lp 15 == 0.2 * public 75
        let current = Scenario::default();
        let outcome = validate_change(&current, ScenarioField::PublicPct, 75.0);
        assert!(outcome.is_accepted());

        let outcome = validate_change(&current, ScenarioField::PublicPct, 74.0);
        assert_eq!(outcome.reason(), Some(RejectionReason::MarketFdvBelowIcoFdv));
    }

    #[test]
    fn test_zero_public_sale_has_no_ico_price() {
        let derived = compute(0.0, 0.0, 100_000.0).unwrap();
        assert_eq!(derived.ico_price, 0.0);
        assert_eq!(derived.pre_market_fdv, 0.0);
        assert_eq!(derived.fdv_multiple, 0.0);
        assert!(derived.meets_fdv_floor());
    }

    #[test]
    fn test_funds_change_rejected_out_of_bounds() {
        let current = Scenario::default();
        let outcome = validate_change(&current, ScenarioField::FundsToRaise, 2_500_000.0);
        assert_eq!(outcome.reason(), Some(RejectionReason::OutOfBounds));

        let outcome = validate_change(&current, ScenarioField::FundsToRaise, 2_000_000.0);
        assert_eq!(outcome, Outcome::Accepted(Scenario::new(10.0, 80.0, 2_000_000.0)));
    }

    #[test]
    fn test_compute_is_deterministic() {
        let a = compute(7.0, 83.0, 430_000.0).unwrap();
        let b = compute(7.0, 83.0, 430_000.0).unwrap();

        assert_eq!(a.ico_price.to_bits(), b.ico_price.to_bits());
        assert_eq!(a.lp_price.to_bits(), b.lp_price.to_bits());
        assert_eq!(a.market_fdv.to_bits(), b.market_fdv.to_bits());
        assert_eq!(a.fdv_multiple.to_bits(), b.fdv_multiple.to_bits());
    }

    #[test]
    fn test_accepted_scenarios_hold_invariants() {
        let calc = TokenomicsCalculator::new();
        let mut accepted = 0;
        let mut off_step = 0;

        // Walk tenths of a percent, not just whole percent
        for team in 0..=300 {
            for public in 0..=1000 {
                let start = Scenario::new(team as f64 / 10.0, 90.0, 100_000.0);
                let outcome = calc.validate_change(&start, ScenarioField::PublicPct, public as f64 / 10.0);

                match outcome {
                    Outcome::Accepted(scenario) => {
                        accepted += 1;
                        let derived = calc.compute(scenario.team_pct, scenario.public_pct, scenario.funds_to_raise).unwrap();
                        assert_eq!(scenario.team_pct + scenario.public_pct + derived.lp_pct, 100.0);
                        assert!(derived.lp_pct > 0.0);
                        assert!(derived.market_fdv >= derived.pre_market_fdv * (1.0 - 1e-9));
                    }
                    Outcome::Rejected(AllocationError::OffStep { .. }) => off_step += 1,
                    Outcome::Rejected(_) => {}
                }
            }
        }

        assert!(accepted > 0);
        assert!(off_step > 0);
    }

    #[test]
    fn test_off_step_values_rejected() {
        let current = Scenario::default();

        let outcome = validate_change(&current, ScenarioField::TeamPct, 6.1);
        assert!(matches!(outcome, Outcome::Rejected(AllocationError::OffStep { field: ScenarioField::TeamPct, .. })));
        assert_eq!(outcome.reason(), Some(RejectionReason::OutOfBounds));

        let outcome = validate_change(&current, ScenarioField::FundsToRaise, 123_456.78);
        assert_eq!(outcome.reason(), Some(RejectionReason::OutOfBounds));

        let outcome = validate_change(&current, ScenarioField::FundsToRaise, 120_000.0);
        assert!(outcome.is_accepted());
    }

    #[test]
    fn test_example_two_rejected_as_change() {
        let current = Scenario::new(5.0, 90.0, 200_000.0);
        let outcome = validate_change(&current, ScenarioField::PublicPct, 50.0);

        assert_eq!(outcome.reason(), Some(RejectionReason::MarketFdvBelowIcoFdv));
        assert_eq!(current.public_pct, 90.0);
    }

    #[test]
    fn test_team_above_range_with_positive_lp() {
        let current = Scenario::new(30.0, 60.0, 100_000.0);
        let outcome = validate_change(&current, ScenarioField::TeamPct, 31.0);

        match outcome {
            Outcome::Rejected(AllocationError::OutOfBounds { field, value, max, .. }) => {
                assert_eq!(field, ScenarioField::TeamPct);
                assert_eq!(value, 31.0);
                assert_eq!(max, 30.0);
            }
            other => panic!("expected OutOfBounds, got {:?}", other),
        }
    }

    #[test]
    fn test_limit_warnings() {
        let calc = TokenomicsCalculator::new();

        let near_zero = Scenario::new(20.0, 79.5, 100_000.0);
        assert_eq!(calc.limit_warning(&near_zero), Some(LimitWarning::LpNearMinimum));

        // lp 15 against a ceiling of 0.2 * 75 = 15
        let parity = Scenario::new(10.0, 75.0, 100_000.0);
        assert_eq!(calc.limit_warning(&parity), Some(LimitWarning::AtFdvParity));
    }
}
