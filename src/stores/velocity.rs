use std::sync::{PoisonError, RwLock};
use tracing::debug;

use crate::models::{VelocityData, VelocityMetrics};
use crate::store::{FetchOutcome, Resource, ResourceState, StoreOptions};
use crate::stores::DataSource;
use crate::trends::seeded_rng;
use crate::velocity::mock_velocity_data;

/// Race distance assumed for synthetic profiles
const SYNTHETIC_DISTANCE: &str = "6f";

/// Velocity telemetry for a single race entry
pub struct VelocityStore {
  source: DataSource,
  options: StoreOptions,
  entry_code: RwLock<Option<String>>,
  resource: Resource<Option<VelocityData>>,
}

impl VelocityStore {
  pub fn new(source: DataSource, entry_code: Option<String>, options: StoreOptions) -> Self {
    let loading = options.fetch_on_mount && entry_code.is_some();
    Self {
      source,
      options,
      entry_code: RwLock::new(entry_code),
      resource: Resource::new("velocity data", loading),
    }
  }

  pub fn entry_code(&self) -> Option<String> {
    self.entry_code.read().unwrap_or_else(PoisonError::into_inner).clone()
  }

  pub async fn mount(&self) -> Option<FetchOutcome> {
    if self.options.fetch_on_mount && self.entry_code().is_some() {
      Some(self.fetch().await)
    } else {
      None
    }
  }

  pub async fn fetch(&self) -> FetchOutcome {
    let Some(code) = self.entry_code() else {
      self.resource.settle_idle();
      return FetchOutcome::Skipped;
    };

    match &self.source {
      DataSource::Api(client) => {
        self
          .resource
          .load(async { client.get_velocity_data(&code).await.map(Some) })
          .await
      }
      DataSource::Synthetic => {
        debug!(entry_code = %code, "Generating synthetic velocity profile");
        let data = mock_velocity_data(&code, SYNTHETIC_DISTANCE, &mut seeded_rng(&code));
        self.resource.load(async { Ok(Some(data)) }).await
      }
    }
  }

  pub async fn refetch(&self) -> FetchOutcome {
    self.fetch().await
  }

  /// Switch to another entry. With `fetch_on_mount` a new code refetches;
  /// clearing it leaves the store idle with its last data.
  pub async fn set_entry_code(&self, entry_code: Option<String>) -> Option<FetchOutcome> {
    {
      let mut current = self.entry_code.write().unwrap_or_else(PoisonError::into_inner);
      if *current == entry_code {
        return None;
      }
      *current = entry_code;
    }

    if self.entry_code().is_none() {
      self.resource.settle_idle();
      return Some(FetchOutcome::Skipped);
    }
    if !self.options.fetch_on_mount {
      return None;
    }
    Some(self.fetch().await)
  }

  pub fn state(&self) -> ResourceState<Option<VelocityData>> {
    self.resource.snapshot()
  }

  pub fn data(&self) -> Option<VelocityData> {
    self.resource.data()
  }

  pub fn metrics(&self) -> Option<VelocityMetrics> {
    self
      .resource
      .with_data(|data| data.as_ref().map(|d| d.metrics.clone()))
  }

  pub fn loading(&self) -> bool {
    self.resource.loading()
  }

  pub fn error(&self) -> Option<String> {
    self.resource.error()
  }
}
