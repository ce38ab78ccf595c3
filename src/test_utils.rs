//! Test utilities shared by the unit tests
//!
//! This module provides:
//! - API clients pointed at a mock server
//! - Mock data factories and canned response bodies
//! - Helper assertions

use serde_json::json;
use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::DashboardConfig;
use crate::models::{TrainerHorse, User};
use crate::session::Session;

/// ---------------------------------------------------------------------------
/// Client Helpers
/// ---------------------------------------------------------------------------

/// Anonymous client against `base_url` (usually `mockito::Server::url()`)
pub fn mock_client(base_url: &str) -> ApiClient {
  let config = DashboardConfig::new(base_url).expect("Invalid mock base URL");
  ApiClient::new(&config, Arc::new(Session::new())).expect("Failed to build client")
}

/// Client whose session already holds `token`
pub fn mock_client_with_token(base_url: &str, token: &str) -> ApiClient {
  let config = DashboardConfig::new(base_url).expect("Invalid mock base URL");
  ApiClient::new(&config, Arc::new(Session::with_token(token))).expect("Failed to build client")
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

pub fn mock_user() -> User {
  User {
    id: "user-1".to_string(),
    email: "trainer@example.com".to_string(),
    name: Some("Test Trainer".to_string()),
    role: Some("trainer".to_string()),
    trainer_code: Some("T1".to_string()),
  }
}

/// Horse `n` of a mock stable. Every third horse carries a welfare alert.
pub fn mock_trainer_horse(n: usize, trainer_code: &str) -> TrainerHorse {
  TrainerHorse {
    id: format!("horse-{}", n),
    name: format!("Test Horse {}", n),
    age: Some(3 + (n % 4) as u32),
    sex: Some(if n % 2 == 0 { "F" } else { "C" }.to_string()),
    trainer_code: Some(trainer_code.to_string()),
    owner: Some("Test Stables LLC".to_string()),
    wellness_score: Some(60.0 + (n * 7 % 45) as f64),
    performance_score: Some(80.0 + (n * 3 % 20) as f64),
    fatigue_score: Some(50.0 + (n * 11 % 60) as f64),
    welfare_alert: n % 3 == 0,
    last_event_date: Some("2025-05-20".to_string()),
    shared_with: Vec::new(),
  }
}

/// `/trainer/horses` body with horses 1..=n
pub fn horses_body(n: usize, trainer_code: &str) -> String {
  let horses: Vec<TrainerHorse> = (1..=n).map(|i| mock_trainer_horse(i, trainer_code)).collect();
  json!({
    "horses": horses,
    "meta": { "total": n, "trainerCode": trainer_code }
  })
  .to_string()
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {{
    let (left, right): (f64, f64) = ($left, $right);
    let diff = (left - right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      left,
      right,
      diff,
      $tolerance
    );
  }};
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::HorsesResponse;

  #[test]
  fn test_horses_body_decodes() {
    let body: HorsesResponse = serde_json::from_str(&horses_body(3, "T1")).expect("decode");
    assert_eq!(body.horses.len(), 3);
    assert_eq!(body.meta.total, 3);
    assert_eq!(body.meta.trainer_code.as_deref(), Some("T1"));
    assert_eq!(body.horses[2].name, "Test Horse 3");
    assert!(body.horses[2].welfare_alert);
  }

  #[test]
  fn test_mock_clients_carry_session() {
    let anonymous = mock_client("http://localhost:1234");
    assert!(!anonymous.session().is_authenticated());

    let authed = mock_client_with_token("http://localhost:1234", "tok");
    assert_eq!(authed.session().token().as_deref(), Some("tok"));
  }

  #[test]
  fn test_approx_macro() {
    assert_approx_eq!(0.1 + 0.2, 0.3, 1e-9);
  }
}
