mod allocation;
mod error;
mod scenario;
mod session;

pub use allocation::*;
pub use error::*;
pub use scenario::*;
pub use session::*;
