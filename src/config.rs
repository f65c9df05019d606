//! Installation configuration.
//!
//! The bridge needs exactly two pieces of configuration to talk to Teamwork:
//! the installation base URL (e.g. `https://acme.teamwork.com`) and an API
//! token. Both are resolved explicit-argument-first, then from the
//! environment.

use std::env;

use miette::Diagnostic;
use thiserror::Error;

/// Environment variable holding the installation base URL.
pub const SERVER_ENV: &str = "TEAMWORK_SERVER";
/// Environment variable holding the API token.
pub const API_TOKEN_ENV: &str = "TEAMWORK_API_TOKEN";

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("no Teamwork server configured")]
    #[diagnostic(
        code(twmcp::config::missing_server),
        help("Pass --server or set the TEAMWORK_SERVER environment variable, e.g. https://acme.teamwork.com")
    )]
    MissingServer,

    #[error("no Teamwork API token configured")]
    #[diagnostic(
        code(twmcp::config::missing_token),
        help("Pass --api-token or set the TEAMWORK_API_TOKEN environment variable")
    )]
    MissingApiToken,
}

/// Credentials and target installation for the Teamwork API.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Teamwork installation, without a trailing slash.
    pub server: String,
    /// API token, sent as the HTTP Basic username with an empty password.
    pub api_token: String,
}

impl Config {
    /// Resolve the configuration.
    ///
    /// Priority for each value:
    /// 1. Explicit argument (CLI flag)
    /// 2. Environment variable (`TEAMWORK_SERVER` / `TEAMWORK_API_TOKEN`)
    pub fn resolve(
        server: Option<String>,
        api_token: Option<String>,
    ) -> Result<Self, ConfigError> {
        let server = server
            .or_else(|| env::var(SERVER_ENV).ok())
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingServer)?;
        let api_token = api_token
            .or_else(|| env::var(API_TOKEN_ENV).ok())
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingApiToken)?;

        Ok(Self {
            server: server.trim_end_matches('/').to_string(),
            api_token,
        })
    }
}

#[cfg(test)]
mod config_test {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_explicit_values_win() {
        unsafe {
            env::set_var(SERVER_ENV, "https://env.teamwork.com");
            env::set_var(API_TOKEN_ENV, "env-token");
        }

        let config = Config::resolve(
            Some("https://explicit.teamwork.com/".to_string()),
            Some("explicit-token".to_string()),
        )
        .unwrap();

        assert_eq!(config.server, "https://explicit.teamwork.com");
        assert_eq!(config.api_token, "explicit-token");

        unsafe {
            env::remove_var(SERVER_ENV);
            env::remove_var(API_TOKEN_ENV);
        }
    }

    #[test]
    #[serial]
    fn test_env_fallback() {
        unsafe {
            env::set_var(SERVER_ENV, "https://env.teamwork.com");
            env::set_var(API_TOKEN_ENV, "env-token");
        }

        let config = Config::resolve(None, None).unwrap();
        assert_eq!(config.server, "https://env.teamwork.com");
        assert_eq!(config.api_token, "env-token");

        unsafe {
            env::remove_var(SERVER_ENV);
            env::remove_var(API_TOKEN_ENV);
        }
    }

    #[test]
    #[serial]
    fn test_missing_server_is_an_error() {
        unsafe {
            env::remove_var(SERVER_ENV);
            env::remove_var(API_TOKEN_ENV);
        }

        let err = Config::resolve(None, Some("token".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::MissingServer));
    }

    #[test]
    #[serial]
    fn test_missing_token_is_an_error() {
        unsafe {
            env::remove_var(SERVER_ENV);
            env::remove_var(API_TOKEN_ENV);
        }

        let err =
            Config::resolve(Some("https://acme.teamwork.com".to_string()), None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiToken));
    }
}
