//! REST API client for the dashboard backend
//!
//! Every call attaches the session's bearer token when one is present and
//! resolves to `Result<T, ApiError>`. Structured error bodies
//! (`{ "message": ..., "errors": { field: [..] } }`) come back verbatim as
//! `ApiError::Api`; everything else is a transport or decode failure.

use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::DashboardConfig;
use crate::models::{
  AuthResponse, Credentials, HistoryResponse, HorseSharing, HorsesResponse, NewHorse, Registration,
  ReportRequest, ReportRequestReceipt, ReportsResponse, TrackSchedulesResponse, TrainerHorse, User,
  VelocityData,
};
use crate::session::Session;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

pub type FieldErrors = HashMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
  #[error("HTTP request failed: {0}")]
  Transport(String),

  /// Non-2xx response; `message` and `errors` are passed through verbatim
  #[error("{message}")]
  Api {
    status: u16,
    message: String,
    errors: Option<FieldErrors>,
  },

  /// Non-2xx response without a usable error body
  #[error("Request failed with status {0}")]
  Status(u16),

  #[error("Failed to parse response: {0}")]
  Decode(String),

  #[error("Invalid request URL: {0}")]
  Url(String),
}

impl From<reqwest::Error> for ApiError {
  fn from(e: reqwest::Error) -> Self {
    if e.is_decode() {
      ApiError::Decode(e.to_string())
    } else {
      ApiError::Transport(e.to_string())
    }
  }
}

impl Serialize for ApiError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

impl ApiError {
  pub fn status(&self) -> Option<u16> {
    match self {
      ApiError::Api { status, .. } => Some(*status),
      ApiError::Status(status) => Some(*status),
      _ => None,
    }
  }

  pub fn field_errors(&self) -> Option<&FieldErrors> {
    match self {
      ApiError::Api { errors, .. } => errors.as_ref(),
      _ => None,
    }
  }

  /// Text shown to the user when loading `resource` failed.
  /// Only structured API messages are surfaced; transport detail is not.
  pub fn user_message(&self, resource: &str) -> String {
    match self {
      ApiError::Api { message, .. } => message.clone(),
      _ => format!("Failed to load {}. Please try again.", resource),
    }
  }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
  message: Option<String>,
  error: Option<String>,
  errors: Option<FieldErrors>,
}

/// Only a JSON body carrying `message` or `error` counts as a structured error
async fn error_from_response(response: Response) -> ApiError {
  let status = response.status().as_u16();
  let text = response.text().await.unwrap_or_default();

  let structured = serde_json::from_str::<ErrorBody>(&text)
    .ok()
    .and_then(|body| Some((body.message.or(body.error)?, body.errors)));

  match structured {
    Some((message, errors)) => ApiError::Api {
      status,
      message,
      errors,
    },
    None => {
      warn!(
        status,
        body = %text.chars().take(500).collect::<String>(),
        "Unstructured error response"
      );
      ApiError::Status(status)
    }
  }
}

/// ---------------------------------------------------------------------------
/// Client
/// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct UserEnvelope {
  user: User,
}

pub struct ApiClient {
  http: Client,
  base_url: Url,
  session: Arc<Session>,
}

impl ApiClient {
  pub fn new(config: &DashboardConfig, session: Arc<Session>) -> Result<Self, ApiError> {
    let http = Client::builder()
      .timeout(Duration::from_secs(config.request_timeout_secs))
      .build()?;

    Ok(Self {
      http,
      base_url: config.api_base_url.clone(),
      session,
    })
  }

  pub fn session(&self) -> &Arc<Session> {
    &self.session
  }

  /// Join path segments (each percent-encoded) and query pairs onto the base URL
  fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url, ApiError> {
    let mut url = self.base_url.clone();

    url
      .path_segments_mut()
      .map_err(|_| ApiError::Url(format!("{} cannot be a base URL", self.base_url)))?
      .pop_if_empty()
      .extend(segments);

    if !query.is_empty() {
      let mut pairs = url.query_pairs_mut();
      for (key, value) in query {
        pairs.append_pair(key, value);
      }
    }

    Ok(url)
  }

  /// Send a request and fail on non-2xx
  async fn send<B: Serialize + ?Sized>(
    &self,
    method: Method,
    segments: &[&str],
    query: &[(&str, String)],
    body: Option<&B>,
  ) -> Result<Response, ApiError> {
    let url = self.endpoint(segments, query)?;
    debug!(%method, %url, "API request");

    let mut builder = self.http.request(method, url);
    if let Some(token) = self.session.token() {
      builder = builder.bearer_auth(token);
    }
    if let Some(body) = body {
      builder = builder.json(body);
    }

    let response = builder.send().await?;

    if !response.status().is_success() {
      let error = error_from_response(response).await;
      debug!(error = %error, "API error response");
      return Err(error);
    }

    Ok(response)
  }

  async fn request<T, B>(
    &self,
    method: Method,
    segments: &[&str],
    query: &[(&str, String)],
    body: Option<&B>,
  ) -> Result<T, ApiError>
  where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
  {
    let response = self.send(method, segments, query, body).await?;
    let text = response.text().await?;

    serde_json::from_str(&text).map_err(|e| {
      warn!(
        error = %e,
        body = %text.chars().take(500).collect::<String>(),
        "Failed to parse API response"
      );
      ApiError::Decode(e.to_string())
    })
  }

  async fn get<T: DeserializeOwned>(
    &self,
    segments: &[&str],
    query: &[(&str, String)],
  ) -> Result<T, ApiError> {
    self.request::<T, ()>(Method::GET, segments, query, None).await
  }

  /// -------------------------------------------------------------------------
  /// Horses
  /// -------------------------------------------------------------------------

  pub async fn get_trainer_horses(&self) -> Result<HorsesResponse, ApiError> {
    self.get(&["trainer", "horses"], &[]).await
  }

  pub async fn get_trainer_stable(&self) -> Result<HorsesResponse, ApiError> {
    self.get(&["trainer", "stable"], &[]).await
  }

  pub async fn create_horse(&self, horse: &NewHorse) -> Result<TrainerHorse, ApiError> {
    self
      .request(Method::POST, &["trainer", "horses"], &[], Some(horse))
      .await
  }

  /// Replace the list of veterinarians a horse's records are shared with
  pub async fn update_horse_sharing(
    &self,
    horse_id: &str,
    shared_with: &[String],
  ) -> Result<TrainerHorse, ApiError> {
    let body = HorseSharing {
      shared_with: shared_with.to_vec(),
    };
    self
      .request(Method::PUT, &["horses", horse_id, "sharing"], &[], Some(&body))
      .await
  }

  pub async fn get_horse_history(&self, horse_id: &str, days: u32) -> Result<HistoryResponse, ApiError> {
    self
      .get(&["horses", horse_id, "history"], &[("days", days.to_string())])
      .await
  }

  /// -------------------------------------------------------------------------
  /// Reports
  /// -------------------------------------------------------------------------

  pub async fn get_trainer_reports(&self, days: u32) -> Result<ReportsResponse, ApiError> {
    self
      .get(&["trainer", "reports"], &[("days", days.to_string())])
      .await
  }

  pub async fn get_all_reports(&self, days: u32) -> Result<ReportsResponse, ApiError> {
    self.get(&["reports"], &[("days", days.to_string())]).await
  }

  pub async fn submit_report_request(
    &self,
    request: &ReportRequest,
  ) -> Result<ReportRequestReceipt, ApiError> {
    self
      .request(Method::POST, &["reports", "requests"], &[], Some(request))
      .await
  }

  /// -------------------------------------------------------------------------
  /// Telemetry and Schedules
  /// -------------------------------------------------------------------------

  pub async fn get_velocity_data(&self, entry_code: &str) -> Result<VelocityData, ApiError> {
    self.get(&["velocity", entry_code], &[]).await
  }

  pub async fn get_track_schedules(&self) -> Result<TrackSchedulesResponse, ApiError> {
    self.get(&["tracks", "schedules"], &[]).await
  }

  /// -------------------------------------------------------------------------
  /// Authentication
  /// -------------------------------------------------------------------------

  pub async fn login(&self, credentials: &Credentials) -> Result<User, ApiError> {
    let auth: AuthResponse = self
      .request(Method::POST, &["auth", "login"], &[], Some(credentials))
      .await?;

    info!(user = %auth.user.email, "Logged in");
    self.session.set(auth.token, Some(auth.user.clone()));
    Ok(auth.user)
  }

  pub async fn register(&self, registration: &Registration) -> Result<User, ApiError> {
    let auth: AuthResponse = self
      .request(Method::POST, &["auth", "register"], &[], Some(registration))
      .await?;

    info!(user = %auth.user.email, "Registered");
    self.session.set(auth.token, Some(auth.user.clone()));
    Ok(auth.user)
  }

  /// Clears the local session whether or not the server call succeeds
  pub async fn logout(&self) -> Result<(), ApiError> {
    let result = self
      .send::<()>(Method::POST, &["auth", "logout"], &[], None)
      .await
      .map(|_| ());

    self.session.clear();
    if let Err(e) = &result {
      warn!(error = %e, "Logout request failed; local session cleared anyway");
    }
    result
  }

  pub async fn get_user(&self) -> Result<User, ApiError> {
    let envelope: UserEnvelope = self.get(&["auth", "user"], &[]).await?;
    self.session.set_user(envelope.user.clone());
    Ok(envelope.user)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
