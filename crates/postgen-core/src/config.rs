use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_PROVIDER_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_PROVIDER_MODEL: &str = "gpt-4o-mini";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let provider_api_key = require("OPENAI_API_KEY")?;
    let provider_endpoint = or_default("OPENAI_API_ENDPOINT", DEFAULT_PROVIDER_ENDPOINT);
    if !provider_endpoint.starts_with("http://") && !provider_endpoint.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "OPENAI_API_ENDPOINT".to_string(),
            reason: format!("expected an http(s) URL, got '{provider_endpoint}'"),
        });
    }
    let provider_model = or_default("POSTGEN_MODEL", DEFAULT_PROVIDER_MODEL);
    let provider_timeout_secs = parse_u64("POSTGEN_PROVIDER_TIMEOUT_SECS", "120")?;

    let env = parse_environment(&or_default("POSTGEN_ENV", "development"));
    let bind_addr = parse_addr("POSTGEN_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("POSTGEN_LOG_LEVEL", "info");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        provider_endpoint,
        provider_api_key,
        provider_model,
        provider_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
