use chrono::Utc;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

use crate::config::DEFAULT_HISTORY_DAYS;
use crate::models::{EventType, HistoryResponse, TrendsEvent};
use crate::store::{FetchOutcome, Resource, ResourceState, StoreOptions};
use crate::stores::DataSource;
use crate::trends::synthetic_history;

/// Race and breeze history for one horse, newest first
pub struct HorseHistoryStore {
  source: DataSource,
  options: StoreOptions,
  horse_id: RwLock<Option<String>>,
  days: RwLock<u32>,
  resource: Resource<HistoryResponse>,
}

impl HorseHistoryStore {
  pub fn new(source: DataSource, horse_id: Option<String>, options: StoreOptions) -> Self {
    let loading = options.fetch_on_mount && horse_id.is_some();
    Self {
      source,
      options,
      horse_id: RwLock::new(horse_id),
      days: RwLock::new(DEFAULT_HISTORY_DAYS),
      resource: Resource::new("horse history", loading),
    }
  }

  pub fn with_days(self, days: u32) -> Self {
    *self.days.write().unwrap_or_else(PoisonError::into_inner) = days;
    self
  }

  pub fn horse_id(&self) -> Option<String> {
    self.horse_id.read().unwrap_or_else(PoisonError::into_inner).clone()
  }

  pub fn days(&self) -> u32 {
    *self.days.read().unwrap_or_else(PoisonError::into_inner)
  }

  pub async fn mount(&self) -> Option<FetchOutcome> {
    if self.options.fetch_on_mount && self.horse_id().is_some() {
      Some(self.fetch().await)
    } else {
      None
    }
  }

  pub async fn fetch(&self) -> FetchOutcome {
    let Some(horse_id) = self.horse_id() else {
      self.resource.settle_idle();
      return FetchOutcome::Skipped;
    };
    let days = self.days();

    match &self.source {
      DataSource::Api(client) => self.resource.load(client.get_horse_history(&horse_id, days)).await,
      DataSource::Synthetic => {
        debug!(horse_id = %horse_id, days, "Generating synthetic history");
        let history = synthetic_history(&horse_id, days, Utc::now().date_naive());
        self.resource.load(async { Ok(history) }).await
      }
    }
  }

  pub async fn refetch(&self) -> FetchOutcome {
    self.fetch().await
  }

  pub async fn set_horse_id(&self, horse_id: Option<String>) -> Option<FetchOutcome> {
    {
      let mut current = self.horse_id.write().unwrap_or_else(PoisonError::into_inner);
      if *current == horse_id {
        return None;
      }
      *current = horse_id;
    }

    if self.horse_id().is_none() {
      self.resource.settle_idle();
      return Some(FetchOutcome::Skipped);
    }
    if !self.options.fetch_on_mount {
      return None;
    }
    Some(self.fetch().await)
  }

  pub async fn set_days(&self, days: u32) -> Option<FetchOutcome> {
    {
      let mut current = self.days.write().unwrap_or_else(PoisonError::into_inner);
      if *current == days {
        return None;
      }
      *current = days;
    }
    if !self.options.fetch_on_mount || self.horse_id().is_none() {
      return None;
    }
    Some(self.fetch().await)
  }

  pub fn state(&self) -> ResourceState<HistoryResponse> {
    self.resource.snapshot()
  }

  pub fn events(&self) -> Vec<TrendsEvent> {
    self.resource.with_data(|data| data.events.clone())
  }

  pub fn events_of(&self, event_type: EventType) -> Vec<TrendsEvent> {
    self.resource.with_data(|data| {
      data
        .events
        .iter()
        .filter(|e| e.event_type == event_type)
        .cloned()
        .collect()
    })
  }

  pub fn horse_name(&self) -> String {
    self.resource.with_data(|data| data.meta.horse_name.clone())
  }

  pub fn total(&self) -> usize {
    self.resource.with_data(|data| data.meta.total)
  }

  pub fn loading(&self) -> bool {
    self.resource.loading()
  }

  pub fn error(&self) -> Option<String> {
    self.resource.error()
  }
}
