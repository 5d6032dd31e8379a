use actix_web::web;
use crate::handlers::session_handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/sessions")
            .route("", web::post().to(session_handlers::create_session))
            .route("/{id}", web::get().to(session_handlers::get_session))
            .route("/{id}", web::delete().to(session_handlers::end_session))
            .route("/{id}/changes", web::post().to(session_handlers::propose_change))
    );
}
