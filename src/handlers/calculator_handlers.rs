use actix_web::{web, HttpResponse};
use log::{info, debug, error};

use crate::models::{
    ApiError, CalculationResponse, ComputeRequest, DefaultsResponse, FieldBounds, Outcome,
    Scenario, ValidateRequest, ValidateResponse, FUNDS_TO_RAISE_BOUNDS, PUBLIC_PCT_BOUNDS,
    TEAM_PCT_BOUNDS,
};
use crate::utils::TokenomicsCalculator;

/// Default scenario, its derived values, and the slider ranges
pub async fn get_defaults(calculator: web::Data<TokenomicsCalculator>) -> Result<HttpResponse, ApiError> {
    let scenario = Scenario::default();
    let derived = calculator.validate(&scenario).map_err(|e| {
        error!("Default scenario failed validation: {}", e);
        ApiError::InternalError(e.to_string())
    })?;

    Ok(HttpResponse::Ok().json(DefaultsResponse {
        scenario,
        derived,
        bounds: FieldBounds {
            team_pct: TEAM_PCT_BOUNDS,
            public_pct: PUBLIC_PCT_BOUNDS,
            funds_to_raise: FUNDS_TO_RAISE_BOUNDS,
        },
        total_token_supply: calculator.total_supply,
        lp_fund_share: calculator.lp_fund_share,
    }))
}

/// Compute derived values for a scenario without committing anything
pub async fn compute(
    calculator: web::Data<TokenomicsCalculator>,
    payload: web::Json<ComputeRequest>,
) -> Result<HttpResponse, ApiError> {
    debug!(
        "Compute request: team={}%, public={}%, funds=${}",
        payload.team_pct, payload.public_pct, payload.funds_to_raise
    );

    let scenario = Scenario::from(&*payload);
    let derived = calculator.compute(payload.team_pct, payload.public_pct, payload.funds_to_raise)?;

    Ok(HttpResponse::Ok().json(CalculationResponse {
        scenario,
        derived,
        meets_fdv_floor: derived.meets_fdv_floor(),
        warning: calculator.limit_warning(&scenario),
    }))
}

/// Check whether a single slider move may be applied to `current`
pub async fn validate_change(
    calculator: web::Data<TokenomicsCalculator>,
    payload: web::Json<ValidateRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = payload.into_inner();
    info!("Validating {} -> {}", request.field, request.value);

    let response = match calculator.validate_change(&request.current, request.field, request.value) {
        Outcome::Accepted(scenario) => ValidateResponse {
            accepted: true,
            scenario,
            reason: None,
            message: None,
        },
        Outcome::Rejected(e) => ValidateResponse {
            accepted: false,
            scenario: request.current,
            reason: Some(e.reason()),
            message: Some(e.to_string()),
        },
    };

    Ok(HttpResponse::Ok().json(response))
}
