pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    AuthSettings, PassageSettings, PostgresSettings, RedisSettings, ServerSettings, SettingsError,
};
