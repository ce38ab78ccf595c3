use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id: String,
  pub email: String,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub role: Option<String>,
  #[serde(default)]
  pub trainer_code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
  pub email: String,
  pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
  pub email: String,
  pub password: String,
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub trainer_code: Option<String>,
}

/// Response from `/auth/login` and `/auth/register`
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
  pub token: String,
  pub user: User,
}
