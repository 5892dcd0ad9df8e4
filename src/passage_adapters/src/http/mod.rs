pub mod bearer;
pub mod routes;

pub use bearer::require_bearer;
pub use routes::{ApiError, ErrorResponse};
