use std::env;

use rosterly_application::MIN_SECRET_LENGTH;
use rosterly_core::AppError;

/// Default rank ladder used when `DIRECTORY_HIERARCHY` is not set.
const DEFAULT_HIERARCHY: &str = "Dept Head,Deputy Head,Section Head,Team Lead,Staff";

/// Runtime configuration for the API process.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Interface to bind.
    pub api_host: String,
    /// Port to bind.
    pub api_port: u16,
    /// Secret for signing access tokens. Never logged.
    pub access_secret: String,
    /// Secret for signing refresh tokens. Never logged.
    pub refresh_secret: String,
    /// Rank names, most-senior first.
    pub hierarchy: Vec<String>,
    /// Whether to seed a small demo org at startup.
    pub dev_seed: bool,
}

impl ApiConfig {
    /// Loads configuration from the environment.
    pub fn load() -> Result<Self, AppError> {
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let access_secret = required_env("AUTH_ACCESS_SECRET")?;
        let refresh_secret = required_env("AUTH_REFRESH_SECRET")?;
        for (name, secret) in [
            ("AUTH_ACCESS_SECRET", &access_secret),
            ("AUTH_REFRESH_SECRET", &refresh_secret),
        ] {
            if secret.len() < MIN_SECRET_LENGTH {
                return Err(AppError::Validation(format!(
                    "{name} must be at least {MIN_SECRET_LENGTH} characters"
                )));
            }
        }

        let hierarchy = env::var("DIRECTORY_HIERARCHY")
            .unwrap_or_else(|_| DEFAULT_HIERARCHY.to_owned())
            .split(',')
            .map(|rank| rank.trim().to_owned())
            .collect();

        let dev_seed = env::var("DEV_SEED")
            .unwrap_or_else(|_| "false".to_owned())
            .eq_ignore_ascii_case("true");

        Ok(Self {
            api_host,
            api_port,
            access_secret,
            refresh_secret,
            hierarchy,
            dev_seed,
        })
    }
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}
