mod calculator_routes;
mod session_routes;

pub use calculator_routes::configure as configure_calculator_routes;
pub use session_routes::configure as configure_session_routes;

pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    configure_calculator_routes(cfg);
    configure_session_routes(cfg);
}
