use crate::app_config::AppConfig;
use crate::geo::Coordinate;
use crate::ConfigError;

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
pub const DEFAULT_USER_AGENT: &str = "nearby/0.1 (place-discovery)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
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
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str| -> Result<Option<f64>, ConfigError> {
        lookup(var)
            .ok()
            .map(|raw| {
                raw.trim()
                    .parse::<f64>()
                    .map_err(|e| ConfigError::InvalidEnvVar {
                        var: var.to_string(),
                        reason: e.to_string(),
                    })
            })
            .transpose()
    };

    let overpass_url = or_default("NEARBY_OVERPASS_URL", DEFAULT_OVERPASS_URL);
    let request_timeout_secs = parse_u64("NEARBY_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "NEARBY_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("NEARBY_USER_AGENT", DEFAULT_USER_AGENT);
    let log_level = or_default("NEARBY_LOG_LEVEL", "info");

    let default_origin = match (parse_f64("NEARBY_LAT")?, parse_f64("NEARBY_LNG")?) {
        (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng).map_err(|e| {
            ConfigError::InvalidEnvVar {
                var: "NEARBY_LAT/NEARBY_LNG".to_string(),
                reason: e.to_string(),
            }
        })?),
        (None, None) => None,
        (Some(_), None) => return Err(ConfigError::MissingEnvVar("NEARBY_LNG".to_string())),
        (None, Some(_)) => return Err(ConfigError::MissingEnvVar("NEARBY_LAT".to_string())),
    };

    Ok(AppConfig {
        overpass_url,
        request_timeout_secs,
        user_agent,
        log_level,
        default_origin,
    })
}
