pub mod calculator_handlers;
pub mod session_handlers;
