use actix_web::web;
use crate::handlers::calculator_handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/calculator")
            .route("/defaults", web::get().to(calculator_handlers::get_defaults))
            .route("/compute", web::post().to(calculator_handlers::compute))
            .route("/validate", web::post().to(calculator_handlers::validate_change))
    );
}
