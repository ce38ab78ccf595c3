//! Environment-driven configuration
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file by `dotenvy` at startup.

use std::env;
use url::Url;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

pub const API_URL_VAR: &str = "PADDOCK_API_URL";
pub const TIMEOUT_VAR: &str = "PADDOCK_REQUEST_TIMEOUT_SECS";
pub const REPORT_DAYS_VAR: &str = "PADDOCK_REPORT_DAYS";
pub const HISTORY_DAYS_VAR: &str = "PADDOCK_HISTORY_DAYS";
pub const SYNTHETIC_DATA_VAR: &str = "PADDOCK_SYNTHETIC_DATA";
pub const LOG_FILTER_VAR: &str = "PADDOCK_LOG";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_REPORT_DAYS: u32 = 30;
pub const DEFAULT_HISTORY_DAYS: u32 = 180;
const DEFAULT_LOG_FILTER: &str = "info";

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("Missing configuration: {0}")]
  MissingConfig(String),

  #[error("Invalid configuration for {var}: {reason}")]
  InvalidConfig { var: String, reason: String },
}

/// ---------------------------------------------------------------------------
/// Dashboard Configuration
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DashboardConfig {
  /// Base URL of the REST API; endpoint paths are joined onto it
  pub api_base_url: Url,
  pub request_timeout_secs: u64,
  /// Default look-back window for report listings
  pub report_days: u32,
  /// Default look-back window for a horse's race/breeze history
  pub history_days: u32,
  /// Serve velocity and history from the synthetic generators
  pub synthetic_data: bool,
  pub log_filter: String,
}

impl DashboardConfig {
  /// Config pointing at `base_url` with every other value defaulted
  pub fn new(base_url: &str) -> Result<Self, ConfigError> {
    Ok(Self {
      api_base_url: parse_base_url(base_url)?,
      request_timeout_secs: DEFAULT_TIMEOUT_SECS,
      report_days: DEFAULT_REPORT_DAYS,
      history_days: DEFAULT_HISTORY_DAYS,
      synthetic_data: false,
      log_filter: DEFAULT_LOG_FILTER.to_string(),
    })
  }

  pub fn from_env() -> Result<Self, ConfigError> {
    let base_url =
      env::var(API_URL_VAR).map_err(|_| ConfigError::MissingConfig(API_URL_VAR.into()))?;

    Ok(Self {
      api_base_url: parse_base_url(&base_url)?,
      request_timeout_secs: parse_var(TIMEOUT_VAR)?.unwrap_or(DEFAULT_TIMEOUT_SECS),
      report_days: parse_var(REPORT_DAYS_VAR)?.unwrap_or(DEFAULT_REPORT_DAYS),
      history_days: parse_var(HISTORY_DAYS_VAR)?.unwrap_or(DEFAULT_HISTORY_DAYS),
      synthetic_data: env::var(SYNTHETIC_DATA_VAR)
        .map(|v| parse_flag(&v))
        .unwrap_or(false),
      log_filter: env::var(LOG_FILTER_VAR).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
    })
  }
}

/// Base URLs always end in `/` so relative joins keep any path prefix (`/api`)
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
  let trimmed = raw.trim();
  let with_slash = if trimmed.ends_with('/') {
    trimmed.to_string()
  } else {
    format!("{}/", trimmed)
  };

  let url = Url::parse(&with_slash).map_err(|e| ConfigError::InvalidConfig {
    var: API_URL_VAR.into(),
    reason: e.to_string(),
  })?;

  match url.scheme() {
    "http" | "https" => Ok(url),
    other => Err(ConfigError::InvalidConfig {
      var: API_URL_VAR.into(),
      reason: format!("unsupported scheme '{}'", other),
    }),
  }
}

fn parse_var<T: std::str::FromStr>(var: &str) -> Result<Option<T>, ConfigError>
where
  T::Err: std::fmt::Display,
{
  match env::var(var) {
    Ok(raw) => raw
      .trim()
      .parse::<T>()
      .map(Some)
      .map_err(|e| ConfigError::InvalidConfig {
        var: var.into(),
        reason: e.to_string(),
      }),
    Err(_) => Ok(None),
  }
}

fn parse_flag(raw: &str) -> bool {
  matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  const ALL_VARS: [&str; 6] = [
    API_URL_VAR,
    TIMEOUT_VAR,
    REPORT_DAYS_VAR,
    HISTORY_DAYS_VAR,
    SYNTHETIC_DATA_VAR,
    LOG_FILTER_VAR,
  ];

  fn cleared() -> Vec<(&'static str, Option<&'static str>)> {
    ALL_VARS.iter().map(|v| (*v, None)).collect()
  }

  #[test]
  #[serial]
  fn test_missing_api_url() {
    temp_env::with_vars(cleared(), || {
      let err = DashboardConfig::from_env().unwrap_err();
      assert_eq!(err, ConfigError::MissingConfig(API_URL_VAR.into()));
    });
  }

  #[test]
  #[serial]
  fn test_defaults() {
    let mut vars = cleared();
    vars.push((API_URL_VAR, Some("https://api.example.com/api")));

    temp_env::with_vars(vars, || {
      let config = DashboardConfig::from_env().expect("config");
      assert_eq!(config.api_base_url.as_str(), "https://api.example.com/api/");
      assert_eq!(config.request_timeout_secs, 30);
      assert_eq!(config.report_days, 30);
      assert_eq!(config.history_days, 180);
      assert!(!config.synthetic_data);
      assert_eq!(config.log_filter, "info");
    });
  }

  #[test]
  #[serial]
  fn test_overrides() {
    temp_env::with_vars(
      vec![
        (API_URL_VAR, Some("http://localhost:3000/")),
        (TIMEOUT_VAR, Some("5")),
        (REPORT_DAYS_VAR, Some("90")),
        (HISTORY_DAYS_VAR, Some("365")),
        (SYNTHETIC_DATA_VAR, Some("TRUE")),
        (LOG_FILTER_VAR, Some("paddock_monitor=debug")),
      ],
      || {
        let config = DashboardConfig::from_env().expect("config");
        assert_eq!(config.api_base_url.as_str(), "http://localhost:3000/");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.report_days, 90);
        assert_eq!(config.history_days, 365);
        assert!(config.synthetic_data);
        assert_eq!(config.log_filter, "paddock_monitor=debug");
      },
    );
  }

  #[test]
  #[serial]
  fn test_invalid_number() {
    let mut vars = cleared();
    vars.push((API_URL_VAR, Some("http://localhost:3000")));
    vars.push((TIMEOUT_VAR, Some("soon")));

    temp_env::with_vars(vars, || {
      let err = DashboardConfig::from_env().unwrap_err();
      assert!(matches!(err, ConfigError::InvalidConfig { ref var, .. } if var == TIMEOUT_VAR));
    });
  }

  #[test]
  fn test_rejects_non_http_scheme() {
    let err = DashboardConfig::new("ftp://files.example.com").unwrap_err();
    assert!(err.to_string().contains("unsupported scheme"));
    assert!(DashboardConfig::new("not a url").is_err());
  }

  #[test]
  fn test_parse_flag() {
    assert!(parse_flag("1"));
    assert!(parse_flag(" yes "));
    assert!(!parse_flag("0"));
    assert!(!parse_flag("nope"));
  }
}
