/*
 * Responsibility
 * - Load settings from the environment (.env included): listen port, public key, algorithm,
 *   leeway (at most one hour), request timeout
 * - Validate them once at startup (anything missing or invalid aborts the process)
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use jsonwebtoken::Algorithm;

use crate::services::auth::token_verifier::MAX_LEEWAY_SECONDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where the PEM public key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKeySource {
    Path(PathBuf),
    Pem(String),
}

pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub jwt_public_key: PublicKeySource,
    pub jwt_algorithm: Algorithm,
    pub access_token_leeway_seconds: u64,

    pub tickets_seed_path: Option<PathBuf>,

    pub request_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let jwt_public_key = match (lookup("JWT_PUBLIC_KEY_PATH"), lookup("JWT_PUBLIC_KEY_PEM")) {
            (Some(path), _) if !path.trim().is_empty() => PublicKeySource::Path(PathBuf::from(path)),
            (_, Some(pem)) if !pem.trim().is_empty() => {
                PublicKeySource::Pem(pem.replace("\\n", "\n"))
            }
            _ => return Err(ConfigError::Missing("JWT_PUBLIC_KEY_PATH")),
        };

        let jwt_algorithm = match lookup("JWT_ALGORITHM") {
            Some(raw) => {
                Algorithm::from_str(raw.trim()).map_err(|_| ConfigError::Invalid("JWT_ALGORITHM"))?
            }
            None => Algorithm::RS512,
        };

        let access_token_leeway_seconds = match lookup("ACCESS_TOKEN_LEEWAY_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs <= MAX_LEEWAY_SECONDS)
                .ok_or(ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"))?,
            None => 0,
        };

        let request_timeout_seconds = match lookup("REQUEST_TIMEOUT_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"))?,
            None => 30,
        };

        let tickets_seed_path = lookup("TICKETS_SEED_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            addr,
            app_env,
            jwt_public_key,
            jwt_algorithm,
            access_token_leeway_seconds,
            tickets_seed_path,
            request_timeout_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = config_from(&[("JWT_PUBLIC_KEY_PATH", "testdata/public.pem")]).expect("config");

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.jwt_algorithm, Algorithm::RS512);
        assert_eq!(config.access_token_leeway_seconds, 0);
        assert_eq!(
            config.jwt_public_key,
            PublicKeySource::Path(PathBuf::from("testdata/public.pem"))
        );
        assert!(config.tickets_seed_path.is_none());
        assert_eq!(config.request_timeout_seconds, 30);
    }

    #[test]
    fn missing_public_key_is_rejected() {
        let result = config_from(&[("PORT", "8080")]);

        assert!(matches!(result, Err(ConfigError::Missing("JWT_PUBLIC_KEY_PATH"))));
    }

    #[test]
    fn inline_pem_expands_escaped_newlines() {
        let config = config_from(&[("JWT_PUBLIC_KEY_PEM", "-----BEGIN-----\\nabc\\n-----END-----")])
            .expect("config");

        assert_eq!(
            config.jwt_public_key,
            PublicKeySource::Pem("-----BEGIN-----\nabc\n-----END-----".to_string())
        );
    }

    #[test]
    fn path_wins_over_inline_pem() {
        let config = config_from(&[
            ("JWT_PUBLIC_KEY_PATH", "/etc/keys/public.pem"),
            ("JWT_PUBLIC_KEY_PEM", "inline"),
        ])
        .expect("config");

        assert!(matches!(config.jwt_public_key, PublicKeySource::Path(_)));
    }

    #[test]
    fn explicit_values_are_parsed() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("APP_ENV", "PROD"),
            ("JWT_PUBLIC_KEY_PATH", "k.pem"),
            ("JWT_ALGORITHM", "ES256"),
            ("ACCESS_TOKEN_LEEWAY_SECONDS", "30"),
            ("TICKETS_SEED_PATH", "tickets.json"),
            ("REQUEST_TIMEOUT_SECONDS", "5"),
        ])
        .expect("config");

        assert_eq!(config.addr.port(), 8080);
        assert!(config.app_env.is_production());
        assert_eq!(config.jwt_algorithm, Algorithm::ES256);
        assert_eq!(config.access_token_leeway_seconds, 30);
        assert_eq!(config.tickets_seed_path, Some(PathBuf::from("tickets.json")));
        assert_eq!(config.request_timeout_seconds, 5);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let key = ("JWT_PUBLIC_KEY_PATH", "k.pem");

        assert!(matches!(
            config_from(&[key, ("PORT", "eighty")]),
            Err(ConfigError::Invalid("PORT"))
        ));
        assert!(matches!(
            config_from(&[key, ("JWT_ALGORITHM", "none")]),
            Err(ConfigError::Invalid("JWT_ALGORITHM"))
        ));
        assert!(matches!(
            config_from(&[key, ("ACCESS_TOKEN_LEEWAY_SECONDS", "-1")]),
            Err(ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"))
        ));
        assert!(matches!(
            config_from(&[key, ("REQUEST_TIMEOUT_SECONDS", "0")]),
            Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"))
        ));
    }

    #[test]
    fn leeway_is_bounded() {
        let key = ("JWT_PUBLIC_KEY_PATH", "k.pem");

        let at_bound = config_from(&[key, ("ACCESS_TOKEN_LEEWAY_SECONDS", "3600")]).expect("config");
        assert_eq!(at_bound.access_token_leeway_seconds, MAX_LEEWAY_SECONDS);

        assert!(matches!(
            config_from(&[key, ("ACCESS_TOKEN_LEEWAY_SECONDS", "3601")]),
            Err(ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"))
        ));
        assert!(matches!(
            config_from(&[key, ("ACCESS_TOKEN_LEEWAY_SECONDS", &u64::MAX.to_string())]),
            Err(ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"))
        ));
    }
}
