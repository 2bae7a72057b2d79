use std::{env, time::Duration};

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

pub const DEFAULT_GENERATION_API_BASE: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_GENERATION_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GENERATION_TEMPERATURE: f32 = 0.9;
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_PAST_QUESTIONS_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct Config {
    pub db_user: String,
    pub db_password: SecretString,
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    pub db_connect_timeout: Duration,
    /// Bound on the whole past-questions lookup, connect included.
    pub past_questions_timeout: Duration,
    pub generation_api_key: SecretString,
    pub generation_api_base: String,
    pub generation_model: String,
    pub generation_temperature: f32,
    pub generation_timeout: Duration,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            db_user: env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string()),
            db_password: SecretString::from(env::var("DB_PASSWORD").unwrap_or_default()),
            db_host: env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            db_port: parse_var("DB_PORT").unwrap_or(5432),
            db_name: env::var("DB_NAME").unwrap_or_else(|_| "postgres".to_string()),
            db_connect_timeout: Duration::from_secs(
                parse_var("DB_CONNECT_TIMEOUT_SECS").unwrap_or(5),
            ),
            past_questions_timeout: Duration::from_secs(
                parse_var("PAST_QUESTIONS_TIMEOUT_SECS")
                    .unwrap_or(DEFAULT_PAST_QUESTIONS_TIMEOUT_SECS),
            ),
            generation_api_key: SecretString::from(
                env::var("GENERATION_API_KEY")
                    .or_else(|_| env::var("API_KEY"))
                    .unwrap_or_default(),
            ),
            generation_api_base: env::var("GENERATION_API_BASE")
                .unwrap_or_else(|_| DEFAULT_GENERATION_API_BASE.to_string()),
            generation_model: env::var("GENERATION_MODEL")
                .unwrap_or_else(|_| DEFAULT_GENERATION_MODEL.to_string()),
            generation_temperature: parse_var("GENERATION_TEMPERATURE")
                .unwrap_or(DEFAULT_GENERATION_TEMPERATURE),
            generation_timeout: Duration::from_secs(
                parse_var("GENERATION_TIMEOUT_SECS").unwrap_or(DEFAULT_GENERATION_TIMEOUT_SECS),
            ),
            web_server_host: env::var("WEB_SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_server_port: parse_var("WEB_SERVER_PORT")
                .or_else(|| parse_var("PORT"))
                .unwrap_or(5000),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|origins| split_origins(&origins))
                .unwrap_or_default(),
        }
    }

    /// Checks the settings the server cannot run without.
    pub fn validate(&self) -> AppResult<()> {
        if self.generation_api_key.expose_secret().trim().is_empty() {
            return Err(AppError::Configuration(
                "GENERATION_API_KEY (or API_KEY) must be set".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.generation_temperature) {
            return Err(AppError::Configuration(format!(
                "GENERATION_TEMPERATURE must be between 0 and 2 (got {})",
                self.generation_temperature
            )));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            db_user: "quizgen".to_string(),
            db_password: SecretString::from("quizgen".to_string()),
            db_host: "localhost".to_string(),
            db_port: 5432,
            db_name: "quizgen-test".to_string(),
            db_connect_timeout: Duration::from_secs(1),
            past_questions_timeout: Duration::from_secs(2),
            generation_api_key: SecretString::from("test_api_key".to_string()),
            generation_api_base: DEFAULT_GENERATION_API_BASE.to_string(),
            generation_model: DEFAULT_GENERATION_MODEL.to_string(),
            generation_temperature: DEFAULT_GENERATION_TEMPERATURE,
            generation_timeout: Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 5000,
            cors_allowed_origins: vec![],
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|value| value.trim().parse().ok())
}

fn split_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
