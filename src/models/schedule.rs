use serde::{Deserialize, Serialize};

/// Race-day schedule for one track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSchedule {
  pub track: String,
  pub date: String,
  #[serde(default)]
  pub first_post: Option<String>,
  #[serde(default)]
  pub race_count: u32,
  #[serde(default)]
  pub surface: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackSchedulesResponse {
  #[serde(default)]
  pub schedules: Vec<TrackSchedule>,
}
