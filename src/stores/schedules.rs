use std::sync::Arc;

use crate::api::ApiClient;
use crate::models::{TrackSchedule, TrackSchedulesResponse};
use crate::store::{FetchOutcome, Resource, ResourceState, StoreOptions};

/// Upcoming race days across tracks
pub struct TrackScheduleStore {
  client: Arc<ApiClient>,
  options: StoreOptions,
  resource: Resource<TrackSchedulesResponse>,
}

impl TrackScheduleStore {
  pub fn new(client: Arc<ApiClient>, options: StoreOptions) -> Self {
    Self {
      client,
      options,
      resource: Resource::new("track schedules", options.fetch_on_mount),
    }
  }

  pub async fn mount(&self) -> Option<FetchOutcome> {
    if self.options.fetch_on_mount {
      Some(self.fetch().await)
    } else {
      None
    }
  }

  pub async fn fetch(&self) -> FetchOutcome {
    self.resource.load(self.client.get_track_schedules()).await
  }

  pub async fn refetch(&self) -> FetchOutcome {
    self.fetch().await
  }

  pub fn state(&self) -> ResourceState<TrackSchedulesResponse> {
    self.resource.snapshot()
  }

  pub fn schedules(&self) -> Vec<TrackSchedule> {
    self.resource.with_data(|data| data.schedules.clone())
  }

  /// All scheduled days at a track, matched case-insensitively
  pub fn find_by_track(&self, track: &str) -> Vec<TrackSchedule> {
    self.resource.with_data(|data| {
      data
        .schedules
        .iter()
        .filter(|s| s.track.eq_ignore_ascii_case(track))
        .cloned()
        .collect()
    })
  }

  pub fn loading(&self) -> bool {
    self.resource.loading()
  }

  pub fn error(&self) -> Option<String> {
    self.resource.error()
  }
}
