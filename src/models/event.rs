use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::VelocityDataPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
  Race,
  Breeze,
}

/// Split speed at a given elapsed time (breeze workouts)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedDataPoint {
  pub time: f64,
  pub speed: f64,
}

/// One race or breeze in a horse's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsEvent {
  pub id: String,
  pub date: NaiveDate,
  #[serde(rename = "type")]
  pub event_type: EventType,
  pub location: String,
  pub distance: String,
  pub performance_score: f64,
  pub wellness_score: f64,
  pub welfare_alert: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub velocity_data: Option<Vec<VelocityDataPoint>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub speed_data: Option<Vec<SpeedDataPoint>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryMeta {
  #[serde(default)]
  pub horse_name: String,
  pub total: usize,
}

/// Payload of `/horses/{id}/history`. Events are newest-first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
  #[serde(default)]
  pub events: Vec<TrendsEvent>,
  #[serde(default)]
  pub meta: HistoryMeta,
}
