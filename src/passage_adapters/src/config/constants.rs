pub mod env {
    pub const JWT_SECRET_ENV_VAR: &str = "JWT_SECRET";
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const REDIS_HOST_NAME_ENV_VAR: &str = "REDIS_HOST_NAME";
    pub const REDIS_PASSWORD_ENV_VAR: &str = "REDIS_PASSWORD";
    pub const APP_ENVIRONMENT_ENV_VAR: &str = "APP_ENVIRONMENT";
    pub const SETTINGS_ENV_PREFIX: &str = "PASSAGE";
    pub const SETTINGS_ENV_SEPARATOR: &str = "__";
}

pub mod defaults {
    pub const ACCESS_TOKEN_TTL_SECS: u64 = 15 * 60;
    pub const REFRESH_TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;
    pub const REQUEST_TIMEOUT_MILLIS: u64 = 10_000;
    pub const REDIS_HOST_NAME: &str = "127.0.0.1";
    pub const REDIS_DB: i64 = 0;
    pub const CONFIG_DIR: &str = "config";
}

pub mod prod {
    pub const AUTH_ADDRESS: &str = "0.0.0.0:8080";
    pub const ACCOUNT_ADDRESS: &str = "0.0.0.0:8081";
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
