use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

use crate::api::{ApiClient, ApiError};
use crate::models::{HorsesResponse, NewHorse, TrainerHorse};
use crate::store::{FetchOutcome, Resource, ResourceState, StoreOptions};

/// Which horse list endpoint backs the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorseList {
  /// `/trainer/horses`
  Trainer,
  /// `/trainer/stable`
  Stable,
}

impl HorseList {
  fn resource_name(&self) -> &'static str {
    match self {
      HorseList::Trainer => "horses",
      HorseList::Stable => "stable",
    }
  }
}

/// Lookup tables built from one revision of the horse list.
/// First occurrence wins, matching a front-to-back scan.
struct HorseIndex {
  revision: u64,
  by_id: HashMap<String, usize>,
  by_name: HashMap<String, usize>,
}

impl HorseIndex {
  fn build(horses: &[TrainerHorse], revision: u64) -> Self {
    let mut by_id = HashMap::with_capacity(horses.len());
    let mut by_name = HashMap::with_capacity(horses.len());

    for (i, horse) in horses.iter().enumerate() {
      by_id.entry(horse.id.clone()).or_insert(i);
      by_name.entry(horse.name.to_lowercase()).or_insert(i);
    }

    Self {
      revision,
      by_id,
      by_name,
    }
  }
}

pub struct HorseListStore {
  client: Arc<ApiClient>,
  list: HorseList,
  options: StoreOptions,
  resource: Resource<HorsesResponse>,
  index: RwLock<Option<HorseIndex>>,
}

impl HorseListStore {
  pub fn new(client: Arc<ApiClient>, list: HorseList, options: StoreOptions) -> Self {
    Self {
      client,
      list,
      options,
      resource: Resource::new(list.resource_name(), options.fetch_on_mount),
      index: RwLock::new(None),
    }
  }

  pub fn horses_list(client: Arc<ApiClient>, options: StoreOptions) -> Self {
    Self::new(client, HorseList::Trainer, options)
  }

  pub fn stable(client: Arc<ApiClient>, options: StoreOptions) -> Self {
    Self::new(client, HorseList::Stable, options)
  }

  /// -------------------------------------------------------------------------
  /// Fetching
  /// -------------------------------------------------------------------------

  pub async fn mount(&self) -> Option<FetchOutcome> {
    if self.options.fetch_on_mount {
      Some(self.fetch().await)
    } else {
      None
    }
  }

  pub async fn fetch(&self) -> FetchOutcome {
    match self.list {
      HorseList::Trainer => self.resource.load(self.client.get_trainer_horses()).await,
      HorseList::Stable => self.resource.load(self.client.get_trainer_stable()).await,
    }
  }

  pub async fn refetch(&self) -> FetchOutcome {
    self.fetch().await
  }

  /// -------------------------------------------------------------------------
  /// State
  /// -------------------------------------------------------------------------

  pub fn state(&self) -> ResourceState<HorsesResponse> {
    self.resource.snapshot()
  }

  pub fn horses(&self) -> Vec<TrainerHorse> {
    self.resource.with_data(|data| data.horses.clone())
  }

  pub fn total_count(&self) -> usize {
    self.resource.with_data(|data| data.meta.total)
  }

  pub fn trainer_code(&self) -> Option<String> {
    self.resource.with_data(|data| data.meta.trainer_code.clone())
  }

  pub fn loading(&self) -> bool {
    self.resource.loading()
  }

  pub fn error(&self) -> Option<String> {
    self.resource.error()
  }

  /// -------------------------------------------------------------------------
  /// Lookups (rebuilt only when the list changes)
  /// -------------------------------------------------------------------------

  fn lookup(&self, pick: impl Fn(&HorseIndex) -> Option<usize>) -> Option<TrainerHorse> {
    let revision = self.resource.revision();

    let cached = {
      let index = self.index.read().unwrap_or_else(PoisonError::into_inner);
      index
        .as_ref()
        .filter(|idx| idx.revision == revision)
        .map(|idx| pick(idx))
    };

    let position = match cached {
      Some(position) => position,
      None => {
        let rebuilt = self
          .resource
          .with_data(|data| HorseIndex::build(&data.horses, revision));
        let position = pick(&rebuilt);
        *self.index.write().unwrap_or_else(PoisonError::into_inner) = Some(rebuilt);
        position
      }
    };

    position.and_then(|i| self.resource.with_data(|data| data.horses.get(i).cloned()))
  }

  /// Case-insensitive name lookup
  pub fn find_by_name(&self, name: &str) -> Option<TrainerHorse> {
    let key = name.to_lowercase();
    self
      .lookup(|idx| idx.by_name.get(&key).copied())
      .filter(|horse| horse.name.to_lowercase() == key)
  }

  pub fn find_by_id(&self, id: &str) -> Option<TrainerHorse> {
    self
      .lookup(|idx| idx.by_id.get(id).copied())
      .filter(|horse| horse.id == id)
  }

  /// -------------------------------------------------------------------------
  /// Mutations
  /// -------------------------------------------------------------------------

  /// Register a horse, then reload the list so counts stay server-authoritative
  pub async fn create_horse(&self, horse: &NewHorse) -> Result<TrainerHorse, ApiError> {
    let created = self.client.create_horse(horse).await?;
    info!(horse = %created.name, "Horse created");
    self.refetch().await;
    Ok(created)
  }

  /// Update a horse's sharing list and patch the local copy in place
  pub async fn update_sharing(
    &self,
    horse_id: &str,
    shared_with: &[String],
  ) -> Result<TrainerHorse, ApiError> {
    let updated = self.client.update_horse_sharing(horse_id, shared_with).await?;

    self.resource.update(|data| {
      if let Some(horse) = data.horses.iter_mut().find(|h| h.id == updated.id) {
        horse.shared_with = updated.shared_with.clone();
      }
    });

    info!(horse_id, vets = shared_with.len(), "Sharing list updated");
    Ok(updated)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
