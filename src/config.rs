use std::env;

/// Runtime configuration, collected once at startup and injected everywhere.
///
/// The admin credential and the session secret deliberately live here rather
/// than in the source tree: rotating them is a deployment concern.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub session_secret: String,
    pub admin_username: String,
    pub admin_password_hash: String,
}

impl AppConfig {
    /// Read configuration from the environment (after `dotenvy` has loaded
    /// any `.env` file). Panics on missing mandatory variables: there is no
    /// sensible way to run without them.
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .expect("PORT must be a valid number");
        let session_secret = env::var("SESSION_SECRET").expect("SESSION_SECRET must be set");
        let admin_username = env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
        let admin_password_hash =
            env::var("ADMIN_PASSWORD_HASH").expect("ADMIN_PASSWORD_HASH must be set");

        AppConfig {
            database_url,
            host,
            port,
            session_secret,
            admin_username,
            admin_password_hash,
        }
    }
}
