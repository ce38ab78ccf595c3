//! Paddock Monitor: data layer for a racehorse welfare and performance
//! dashboard.
//!
//! Scores are mapped to colours by [`color`], velocity telemetry and horse
//! histories can be synthesised deterministically by [`velocity`] and
//! [`trends`], and the REST API is reached through [`api::ApiClient`] and
//! the fetch-state stores in [`stores`].

pub mod api;
pub mod color;
pub mod config;
pub mod logging;
pub mod models;
pub mod session;
pub mod store;
pub mod stores;
pub mod trends;
pub mod velocity;

#[cfg(test)]
mod test_utils;

use std::sync::Arc;
use tracing::info;

use api::{ApiClient, ApiError};
use config::{ConfigError, DashboardConfig};
use session::Session;
use store::StoreOptions;
use stores::{
  DataSource, HorseHistoryStore, HorseListStore, ReportScope, ReportsStore, TrackScheduleStore,
  VelocityStore,
};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("Failed to build API client: {0}")]
  Client(#[from] ApiError),
}

/// Application root: owns the config, the auth session and the shared client,
/// and builds stores wired to them
pub struct Dashboard {
  config: DashboardConfig,
  session: Arc<Session>,
  client: Arc<ApiClient>,
}

impl Dashboard {
  /// Load `.env`, read configuration from the environment and start logging
  pub fn from_env() -> Result<Self, StartupError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = DashboardConfig::from_env()?;
    logging::init(&config.log_filter);
    Self::new(config)
  }

  pub fn new(config: DashboardConfig) -> Result<Self, StartupError> {
    let session = Arc::new(Session::new());
    let client = Arc::new(ApiClient::new(&config, Arc::clone(&session))?);

    info!(
      api = %config.api_base_url,
      synthetic = config.synthetic_data,
      "Dashboard ready"
    );

    Ok(Self {
      config,
      session,
      client,
    })
  }

  pub fn config(&self) -> &DashboardConfig {
    &self.config
  }

  pub fn session(&self) -> &Arc<Session> {
    &self.session
  }

  pub fn client(&self) -> &Arc<ApiClient> {
    &self.client
  }

  /// Source for velocity and history data
  pub fn data_source(&self) -> DataSource {
    if self.config.synthetic_data {
      DataSource::Synthetic
    } else {
      DataSource::Api(Arc::clone(&self.client))
    }
  }

  /// -------------------------------------------------------------------------
  /// Store Factories
  /// -------------------------------------------------------------------------

  pub fn horses(&self, options: StoreOptions) -> HorseListStore {
    HorseListStore::horses_list(Arc::clone(&self.client), options)
  }

  pub fn stable(&self, options: StoreOptions) -> HorseListStore {
    HorseListStore::stable(Arc::clone(&self.client), options)
  }

  pub fn trainer_reports(&self, options: StoreOptions) -> ReportsStore {
    ReportsStore::new(
      Arc::clone(&self.client),
      ReportScope::Trainer,
      self.config.report_days,
      options,
    )
  }

  pub fn all_reports(&self, options: StoreOptions) -> ReportsStore {
    ReportsStore::new(
      Arc::clone(&self.client),
      ReportScope::All,
      self.config.report_days,
      options,
    )
  }

  pub fn velocity(&self, entry_code: Option<String>, options: StoreOptions) -> VelocityStore {
    VelocityStore::new(self.data_source(), entry_code, options)
  }

  pub fn history(&self, horse_id: Option<String>, options: StoreOptions) -> HorseHistoryStore {
    HorseHistoryStore::new(self.data_source(), horse_id, options).with_days(self.config.history_days)
  }

  pub fn schedules(&self, options: StoreOptions) -> TrackScheduleStore {
    TrackScheduleStore::new(Arc::clone(&self.client), options)
  }
}
