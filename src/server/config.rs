use std::str::FromStr;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_APP_ENV: &str = "development";
const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;
const DEFAULT_BCRYPT_COST: u32 = 12;

pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_address: String,
    /// Deployment environment; `production` hides error details.
    pub app_env: String,
    pub jwt_expiry_hours: i64,
    pub bcrypt_cost: u32,
    /// Allowed CORS origin; any origin when unset.
    pub cors_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of a variable, `None` when unset
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and parsable
    /// - `Err(AppError::ConfigErr)` - Missing required variable or unparsable value
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };

        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", DEFAULT_BCRYPT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidEnvVar {
                name: "BCRYPT_COST".to_string(),
                reason: "must be between 4 and 31".to_string(),
            }
            .into());
        }

        let jwt_expiry_hours = parse_or(&lookup, "JWT_EXPIRY_HOURS", DEFAULT_JWT_EXPIRY_HOURS)?;
        if jwt_expiry_hours <= 0 {
            return Err(ConfigError::InvalidEnvVar {
                name: "JWT_EXPIRY_HOURS".to_string(),
                reason: "must be positive".to_string(),
            }
            .into());
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            bind_address: lookup("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            app_env: lookup("APP_ENV").unwrap_or_else(|| DEFAULT_APP_ENV.to_string()),
            jwt_expiry_hours,
            bcrypt_cost,
            cors_origin: lookup("CORS_ORIGIN").filter(|v| !v.trim().is_empty()),
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                reason: e.to_string(),
            }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn applies_defaults_for_optional_variables() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.jwt_expiry_hours, 24);
        assert_eq!(config.bcrypt_cost, 12);
        assert!(config.cors_origin.is_none());
        assert!(!config.is_production());
    }

    #[test]
    fn missing_secret_is_reported_by_name() {
        let result = Config::from_lookup(lookup_from(&[("DATABASE_URL", "sqlite::memory:")]));

        match result {
            Err(AppError::ConfigErr(ConfigError::MissingEnvVar(name))) => {
                assert_eq!(name, "JWT_SECRET")
            }
            _ => panic!("expected missing JWT_SECRET"),
        }
    }

    #[test]
    fn rejects_unparsable_numbers() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "secret"),
            ("BCRYPT_COST", "cheap"),
        ]));

        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::InvalidEnvVar { .. }))
        ));
    }

    #[test]
    fn production_is_case_insensitive() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "secret"),
            ("APP_ENV", "Production"),
        ]))
        .unwrap();

        assert!(config.is_production());
    }
}
