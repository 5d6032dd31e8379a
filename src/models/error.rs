use serde::Serialize;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;
use thiserror::Error;

use crate::models::{RejectionReason, Scenario, ScenarioField};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AllocationError {
    #[error("{field} = {value} is outside the allowed range [{min}, {max}]")]
    OutOfBounds {
        field: ScenarioField,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} = {value} is not a multiple of the {step} slider step")]
    OffStep {
        field: ScenarioField,
        value: f64,
        step: f64,
    },

    #[error("Invalid allocation: team {team_pct}% + public {public_pct}% leaves LP at {lp_pct}%")]
    InvalidAllocation {
        team_pct: f64,
        public_pct: f64,
        lp_pct: f64,
    },

    #[error("Market FDV ${market_fdv:.2} would fall below pre-market FDV ${pre_market_fdv:.2}")]
    MarketFdvBelowIcoFdv {
        market_fdv: f64,
        pre_market_fdv: f64,
    },
}

impl AllocationError {
    pub fn reason(&self) -> RejectionReason {
        match self {
            AllocationError::OutOfBounds { .. } | AllocationError::OffStep { .. } => {
                RejectionReason::OutOfBounds
            }
            AllocationError::InvalidAllocation { .. } => RejectionReason::LpWouldBeNonPositive,
            AllocationError::MarketFdvBelowIcoFdv { .. } => RejectionReason::MarketFdvBelowIcoFdv,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Committed scenario the client should snap back to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<Scenario>,
}

#[derive(Debug)]
pub enum ApiError {
    Allocation(AllocationError),
    Rejected {
        error: AllocationError,
        committed: Scenario,
    },
    ValidationError(String),
    NotFound(String),
    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::Allocation(e) => write!(f, "{}", e),
            ApiError::Rejected { error, .. } => write!(f, "Change rejected: {}", error),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AllocationError> for ApiError {
    fn from(err: AllocationError) -> Self {
        ApiError::Allocation(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Allocation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Rejected { .. } => StatusCode::CONFLICT,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Allocation(e) => ErrorResponse {
                code: e.reason().code().to_string(),
                message: e.reason().to_string(),
                details: Some(e.to_string()),
                scenario: None,
            },
            ApiError::Rejected { error, committed } => ErrorResponse {
                code: error.reason().code().to_string(),
                message: error.reason().to_string(),
                details: Some(error.to_string()),
                scenario: Some(*committed),
            },
            ApiError::ValidationError(_) => ErrorResponse {
                code: "VALIDATION_ERROR".to_string(),
                message: self.to_string(),
                details: None,
                scenario: None,
            },
            ApiError::NotFound(_) => ErrorResponse {
                code: "NOT_FOUND".to_string(),
                message: self.to_string(),
                details: None,
                scenario: None,
            },
            ApiError::InternalError(_) => ErrorResponse {
                code: "INTERNAL_ERROR".to_string(),
                message: "Internal server error".to_string(),
                details: None,
                scenario: None,
            },
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_mapping() {
        let lp = AllocationError::InvalidAllocation {
            team_pct: 70.0,
            public_pct: 40.0,
            lp_pct: -10.0,
        };
        assert_eq!(lp.reason(), RejectionReason::LpWouldBeNonPositive);

        let bounds = AllocationError::OutOfBounds {
            field: ScenarioField::FundsToRaise,
            value: 5_000.0,
            min: 10_000.0,
            max: 2_000_000.0,
        };
        assert_eq!(bounds.reason(), RejectionReason::OutOfBounds);
        assert!(bounds.to_string().contains("funds_to_raise = 5000"));
    }

    #[test]
    fn test_status_codes() {
        let err = ApiError::NotFound("session abc".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let rejected = ApiError::Rejected {
            error: AllocationError::MarketFdvBelowIcoFdv {
                market_fdv: 1.0,
                pre_market_fdv: 2.0,
            },
            committed: Scenario::default(),
        };
        assert_eq!(rejected.status_code(), StatusCode::CONFLICT);
    }
}
