pub mod helpers;
pub mod passage_server;
pub mod telemetry;

pub use helpers::{BootstrapError, configure_postgresql, configure_redis};
pub use passage_server::PassageServer;
pub use telemetry::init_tracing;
