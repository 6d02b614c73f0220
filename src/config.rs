use anyhow::{bail, Context, Result};
use std::env;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }
}

/// Log output style, `LOG_FORMAT=pretty|compact|json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

impl LogFormat {
    /// Unset or unrecognised values fall back to JSON in prod, pretty elsewhere.
    pub fn resolve(raw: Option<&str>, env: &Environment) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("pretty") => Self::Pretty,
            Some("compact") => Self::Compact,
            Some("json") => Self::Json,
            _ if matches!(env, Environment::Prod) => Self::Json,
            _ => Self::Pretty,
        }
    }
}

#[derive(Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,
    pub log_format: LogFormat,

    // Token signing
    pub jwt_secret: String,
    pub auth_cookie_name: String,

    // Remote dashboard API
    pub api_base_url: String,
    pub api_timeout_seconds: u64,

    // CORS
    pub cors_allow_origins: Vec<String>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("env", &self.env)
            .field("server_addr", &self.server_addr)
            .field("log_format", &self.log_format)
            .field("jwt_secret", &"[redacted]")
            .field("auth_cookie_name", &self.auth_cookie_name)
            .field("api_base_url", &self.api_base_url)
            .field("api_timeout_seconds", &self.api_timeout_seconds)
            .field("cors_allow_origins", &self.cors_allow_origins)
            .finish()
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    ///
    /// `JWT_SECRET` has no fallback: a missing or blank secret is a startup error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Environment::parse(&lookup("ENV").unwrap_or_else(|| "dev".to_string()));
        let server_addr = lookup("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let log_format = LogFormat::resolve(lookup("LOG_FORMAT").as_deref(), &env);

        // Token signing
        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET must be set")?;
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }
        let auth_cookie_name = lookup("AUTH_COOKIE_NAME")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "token".to_string());

        // Remote dashboard API
        let api_base_url =
            lookup("API_BASE_URL").unwrap_or_else(|| "http://localhost:8000".to_string());
        let api_timeout_seconds = lookup("API_TIMEOUT_SECONDS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        // CORS
        let cors_allow_origins = lookup("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Settings {
            env,
            server_addr,
            log_format,
            jwt_secret,
            auth_cookie_name,
            api_base_url,
            api_timeout_seconds,
            cors_allow_origins,
        })
    }
}
