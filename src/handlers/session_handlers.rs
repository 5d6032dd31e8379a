use actix_web::{web, HttpResponse};
use log::{info, error};

use crate::models::{ApiError, ChangeRequest};
use crate::services::SessionService;

/// Start a session on the default scenario
pub async fn create_session(session_service: web::Data<SessionService>) -> Result<HttpResponse, ApiError> {
    let view = session_service.create_session()?;
    Ok(HttpResponse::Created().json(view))
}

pub async fn get_session(
    session_service: web::Data<SessionService>,
    session_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let view = session_service.get_session(&session_id)?;
    Ok(HttpResponse::Ok().json(view))
}

/// Apply one slider move; a rejected move answers 409 with the committed scenario
pub async fn propose_change(
    session_service: web::Data<SessionService>,
    session_id: web::Path<String>,
    payload: web::Json<ChangeRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("Session {}: proposing {} = {}", session_id, payload.field, payload.value);

    match session_service.propose_change(&session_id, payload.field, payload.value) {
        Ok(view) => Ok(HttpResponse::Ok().json(view)),
        Err(e) => {
            if let ApiError::InternalError(_) = e {
                error!("Failed to apply change to session {}: {}", session_id, e);
            }
            Err(e)
        }
    }
}

pub async fn end_session(
    session_service: web::Data<SessionService>,
    session_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    session_service.end_session(&session_id)?;
    Ok(HttpResponse::NoContent().finish())
}
