use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{AllocationError, Scenario};

/// Everything the calculator shows for one scenario.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct DerivedValues {
    pub lp_pct: f64,
    pub team_tokens: f64,
    pub public_tokens: f64,
    pub lp_tokens: f64,
    pub team_funds: f64,
    pub lp_funds: f64,
    pub ico_price: f64,
    pub lp_price: f64,
    pub pre_market_fdv: f64,
    pub market_fdv: f64,
    pub fdv_multiple: f64,
}

/// Relative slack allowed when comparing the two FDVs.
pub const FDV_TOLERANCE: f64 = 1e-9;

impl DerivedValues {
    /// True when the LP price does not value the project below the ICO price.
    pub fn meets_fdv_floor(&self) -> bool {
        self.market_fdv + FDV_TOLERANCE * self.pre_market_fdv >= self.pre_market_fdv
    }
}

/// Why a proposed change was refused.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    LpWouldBeNonPositive,
    MarketFdvBelowIcoFdv,
    OutOfBounds,
}

impl RejectionReason {
    pub fn code(&self) -> &'static str {
        match self {
            RejectionReason::LpWouldBeNonPositive => "LP_WOULD_BE_NON_POSITIVE",
            RejectionReason::MarketFdvBelowIcoFdv => "MARKET_FDV_BELOW_ICO_FDV",
            RejectionReason::OutOfBounds => "OUT_OF_BOUNDS",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            RejectionReason::LpWouldBeNonPositive => "LP cannot be 0%",
            RejectionReason::MarketFdvBelowIcoFdv => "LP FDV would drop below ICO FDV",
            RejectionReason::OutOfBounds => "Value outside the allowed range",
        };
        write!(f, "{}", text)
    }
}

/// Result of validating a proposed slider move.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Accepted(Scenario),
    Rejected(AllocationError),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    pub fn reason(&self) -> Option<RejectionReason> {
        match self {
            Outcome::Accepted(_) => None,
            Outcome::Rejected(err) => Some(err.reason()),
        }
    }
}

/// Advisory flag raised when a slider sits at, or right next to, a limit.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LimitWarning {
    LpNearMinimum,
    AtFdvParity,
}

impl fmt::Display for LimitWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LimitWarning::LpNearMinimum => write!(f, "At MINIMUM: LP cannot be 0%"),
            LimitWarning::AtFdvParity => write!(f, "At MINIMUM constraint: LP FDV = ICO FDV"),
        }
    }
}
