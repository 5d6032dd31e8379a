use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::models::{Bounds, DerivedValues, LimitWarning, RejectionReason, Scenario, ScenarioField};

/// One UI instance's committed state.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub scenario: Scenario,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Last time the client read or changed this session; drives idle eviction.
    pub last_active: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionView {
    pub session_id: String,
    pub scenario: Scenario,
    pub derived: DerivedValues,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<LimitWarning>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChangeRequest {
    pub field: ScenarioField,
    pub value: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ComputeRequest {
    pub team_pct: f64,
    pub public_pct: f64,
    pub funds_to_raise: f64,
}

impl From<&ComputeRequest> for Scenario {
    fn from(req: &ComputeRequest) -> Self {
        Scenario::new(req.team_pct, req.public_pct, req.funds_to_raise)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalculationResponse {
    pub scenario: Scenario,
    pub derived: DerivedValues,
    /// False when the LP price would value the project below the ICO price.
    pub meets_fdv_floor: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<LimitWarning>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub current: Scenario,
    pub field: ScenarioField,
    pub value: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub accepted: bool,
    /// The candidate when accepted, otherwise the unchanged current scenario.
    pub scenario: Scenario,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectionReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FieldBounds {
    pub team_pct: Bounds,
    pub public_pct: Bounds,
    pub funds_to_raise: Bounds,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DefaultsResponse {
    pub scenario: Scenario,
    pub derived: DerivedValues,
    pub bounds: FieldBounds,
    pub total_token_supply: f64,
    pub lp_fund_share: f64,
}
