use serde::{Deserialize, Serialize};

/// A horse as listed on a trainer's dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerHorse {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub age: Option<u32>,
  #[serde(default)]
  pub sex: Option<String>,
  #[serde(default)]
  pub trainer_code: Option<String>,
  #[serde(default)]
  pub owner: Option<String>,
  #[serde(default)]
  pub wellness_score: Option<f64>,
  #[serde(default)]
  pub performance_score: Option<f64>,
  #[serde(default)]
  pub fatigue_score: Option<f64>,
  #[serde(default)]
  pub welfare_alert: bool,
  #[serde(default)]
  pub last_event_date: Option<String>,
  /// Veterinarians (by email) the horse's records are shared with
  #[serde(default)]
  pub shared_with: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorsesMeta {
  pub total: usize,
  #[serde(default)]
  pub trainer_code: Option<String>,
}

/// Payload of `/trainer/horses` and `/trainer/stable`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HorsesResponse {
  #[serde(default)]
  pub horses: Vec<TrainerHorse>,
  #[serde(default)]
  pub meta: HorsesMeta,
}

/// For registering a new horse (without id or scores)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHorse {
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub age: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sex: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub owner: Option<String>,
}

/// Body of a sharing-list update
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorseSharing {
  pub shared_with: Vec<String>,
}
