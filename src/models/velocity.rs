use serde::{Deserialize, Serialize};

/// One telemetry sample. `time` is seconds from the start of the effort.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityDataPoint {
  pub time: f64,
  pub velocity: f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub acceleration: Option<f64>,
}

/// Aggregates derived from a velocity sequence; always recomputed, never stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VelocityMetrics {
  pub max_velocity: f64,
  pub time_to_peak: f64,
  pub time_to_target: Option<f64>,
  pub velocity_at_target: Option<f64>,
  pub target_velocity: f64,
  pub total_duration: f64,
}

/// Payload of `/velocity/{entryCode}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VelocityData {
  pub entry_code: String,
  pub full_race: Vec<VelocityDataPoint>,
  #[serde(rename = "first10Seconds")]
  pub first_10_seconds: Vec<VelocityDataPoint>,
  pub metrics: VelocityMetrics,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub units: Option<String>,
}
