use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inclusive numeric range a slider may take, moving in whole steps from `min`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// True when `value` sits exactly on a slider notch.
    pub fn on_step(&self, value: f64) -> bool {
        let steps = (value - self.min) / self.step;
        steps.is_finite() && steps == steps.round()
    }
}

// Percent sliders move in whole percent, which keeps the LP residual exact
pub const TEAM_PCT_BOUNDS: Bounds = Bounds::new(0.0, 30.0, 1.0);
pub const PUBLIC_PCT_BOUNDS: Bounds = Bounds::new(0.0, 100.0, 1.0);
pub const FUNDS_TO_RAISE_BOUNDS: Bounds = Bounds::new(10_000.0, 2_000_000.0, 10_000.0);

/// The three user-adjustable inputs.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioField {
    TeamPct,
    PublicPct,
    FundsToRaise,
}

impl ScenarioField {
    pub const ALL: [ScenarioField; 3] = [
        ScenarioField::TeamPct,
        ScenarioField::PublicPct,
        ScenarioField::FundsToRaise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioField::TeamPct => "team_pct",
            ScenarioField::PublicPct => "public_pct",
            ScenarioField::FundsToRaise => "funds_to_raise",
        }
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            ScenarioField::TeamPct => TEAM_PCT_BOUNDS,
            ScenarioField::PublicPct => PUBLIC_PCT_BOUNDS,
            ScenarioField::FundsToRaise => FUNDS_TO_RAISE_BOUNDS,
        }
    }
}

impl fmt::Display for ScenarioField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ScenarioField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept the CLI-friendly dashed spelling as well
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "team_pct" | "team" => Ok(ScenarioField::TeamPct),
            "public_pct" | "public" => Ok(ScenarioField::PublicPct),
            "funds_to_raise" | "funds" => Ok(ScenarioField::FundsToRaise),
            other => Err(format!(
                "unknown field '{}', expected one of team_pct, public_pct, funds_to_raise",
                other
            )),
        }
    }
}

/// One calculator state: the three slider values.
///
/// The LP allocation is never stored, it is always the residual of the
/// other two percentages.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Scenario {
    pub team_pct: f64,
    pub public_pct: f64,
    pub funds_to_raise: f64,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            team_pct: 10.0,
            public_pct: 80.0,
            funds_to_raise: 100_000.0,
        }
    }
}

impl Scenario {
    pub fn new(team_pct: f64, public_pct: f64, funds_to_raise: f64) -> Self {
        Self {
            team_pct,
            public_pct,
            funds_to_raise,
        }
    }

    pub fn lp_pct(&self) -> f64 {
        100.0 - self.team_pct - self.public_pct
    }

    pub fn get(&self, field: ScenarioField) -> f64 {
        match field {
            ScenarioField::TeamPct => self.team_pct,
            ScenarioField::PublicPct => self.public_pct,
            ScenarioField::FundsToRaise => self.funds_to_raise,
        }
    }

    /// Copy of this scenario with one field replaced.
    pub fn with_field(&self, field: ScenarioField, value: f64) -> Self {
        let mut candidate = *self;
        match field {
            ScenarioField::TeamPct => candidate.team_pct = value,
            ScenarioField::PublicPct => candidate.public_pct = value,
            ScenarioField::FundsToRaise => candidate.funds_to_raise = value,
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lp_pct_is_residual() {
        let scenario = Scenario::new(5.0, 50.0, 200_000.0);
        assert_eq!(scenario.lp_pct(), 45.0);
        assert_eq!(scenario.team_pct + scenario.public_pct + scenario.lp_pct(), 100.0);
    }

    #[test]
    fn test_with_field_leaves_original_untouched() {
        let current = Scenario::default();
        let candidate = current.with_field(ScenarioField::PublicPct, 70.0);

        assert_eq!(current.public_pct, 80.0);
        assert_eq!(candidate.public_pct, 70.0);
        assert_eq!(candidate.team_pct, current.team_pct);
        assert_eq!(candidate.funds_to_raise, current.funds_to_raise);
    }

    #[test]
    fn test_field_parsing() {
        assert_eq!("team_pct".parse::<ScenarioField>().unwrap(), ScenarioField::TeamPct);
        assert_eq!("Public-Pct".parse::<ScenarioField>().unwrap(), ScenarioField::PublicPct);
        assert_eq!("funds".parse::<ScenarioField>().unwrap(), ScenarioField::FundsToRaise);
        assert!("lp_pct".parse::<ScenarioField>().is_err());
    }

    #[test]
    fn test_field_serializes_snake_case() {
        let json = serde_json::to_string(&ScenarioField::FundsToRaise).unwrap();
        assert_eq!(json, "\"funds_to_raise\"");
    }

    #[test]
    fn test_bounds_contains_edges() {
        assert!(TEAM_PCT_BOUNDS.contains(0.0));
        assert!(TEAM_PCT_BOUNDS.contains(30.0));
        assert!(!TEAM_PCT_BOUNDS.contains(30.5));
        assert!(!FUNDS_TO_RAISE_BOUNDS.contains(9_999.0));
        assert!(!PUBLIC_PCT_BOUNDS.contains(f64::NAN));
    }

    #[test]
    fn test_bounds_on_step() {
        assert!(TEAM_PCT_BOUNDS.on_step(16.0));
        assert!(!TEAM_PCT_BOUNDS.on_step(16.1));
        assert!(FUNDS_TO_RAISE_BOUNDS.on_step(430_000.0));
        assert!(!FUNDS_TO_RAISE_BOUNDS.on_step(123_456.78));
        assert!(!PUBLIC_PCT_BOUNDS.on_step(f64::INFINITY));
    }
}
