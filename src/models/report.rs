use serde::{Deserialize, Serialize};

use crate::models::EventType;

/// A welfare/performance report for one race or breeze
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
  pub id: String,
  pub horse_id: String,
  pub horse_name: String,
  pub date: String,
  #[serde(rename = "type", default)]
  pub event_type: Option<EventType>,
  #[serde(default)]
  pub entry_code: Option<String>,
  #[serde(default)]
  pub location: Option<String>,
  #[serde(default)]
  pub wellness_score: Option<f64>,
  #[serde(default)]
  pub performance_score: Option<f64>,
  #[serde(default)]
  pub welfare_alert: bool,
  /// Unseen by the current user
  #[serde(default)]
  pub is_new: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportsMeta {
  pub days: u32,
  pub total: usize,
  #[serde(default)]
  pub new_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportsResponse {
  #[serde(default)]
  pub reports: Vec<Report>,
  #[serde(default)]
  pub meta: ReportsMeta,
}

/// Request for a new report on a horse
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
  pub horse_id: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub entry_code: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub notes: Option<String>,
}

/// Acknowledgement of a submitted report request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequestReceipt {
  pub id: String,
  pub status: String,
}
