use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

use crate::api::{ApiClient, ApiError};
use crate::models::{Report, ReportRequest, ReportRequestReceipt, ReportsResponse};
use crate::store::{FetchOutcome, Resource, ResourceState, StoreOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportScope {
  /// Reports for the signed-in trainer's horses (`/trainer/reports`)
  Trainer,
  /// Every report visible to the user (`/reports`)
  All,
}

pub struct ReportsStore {
  client: Arc<ApiClient>,
  scope: ReportScope,
  options: StoreOptions,
  days: RwLock<u32>,
  resource: Resource<ReportsResponse>,
}

impl ReportsStore {
  pub fn new(client: Arc<ApiClient>, scope: ReportScope, days: u32, options: StoreOptions) -> Self {
    Self {
      client,
      scope,
      options,
      days: RwLock::new(days),
      resource: Resource::new("reports", options.fetch_on_mount),
    }
  }

  pub fn scope(&self) -> ReportScope {
    self.scope
  }

  pub fn days(&self) -> u32 {
    *self.days.read().unwrap_or_else(PoisonError::into_inner)
  }

  pub async fn mount(&self) -> Option<FetchOutcome> {
    if self.options.fetch_on_mount {
      Some(self.fetch().await)
    } else {
      None
    }
  }

  pub async fn fetch(&self) -> FetchOutcome {
    let days = self.days();
    match self.scope {
      ReportScope::Trainer => self.resource.load(self.client.get_trainer_reports(days)).await,
      ReportScope::All => self.resource.load(self.client.get_all_reports(days)).await,
    }
  }

  pub async fn refetch(&self) -> FetchOutcome {
    self.fetch().await
  }

  /// Change the look-back window. With `fetch_on_mount` the store refetches
  /// when the value actually changed.
  pub async fn set_days(&self, days: u32) -> Option<FetchOutcome> {
    {
      let mut current = self.days.write().unwrap_or_else(PoisonError::into_inner);
      if *current == days {
        return None;
      }
      *current = days;
    }
    if !self.options.fetch_on_mount {
      return None;
    }
    Some(self.fetch().await)
  }

  pub fn state(&self) -> ResourceState<ReportsResponse> {
    self.resource.snapshot()
  }

  pub fn reports(&self) -> Vec<Report> {
    self.resource.with_data(|data| data.reports.clone())
  }

  pub fn total(&self) -> usize {
    self.resource.with_data(|data| data.meta.total)
  }

  pub fn new_count(&self) -> usize {
    self.resource.with_data(|data| data.meta.new_count)
  }

  pub fn welfare_alerts(&self) -> Vec<Report> {
    self.resource.with_data(|data| {
      data
        .reports
        .iter()
        .filter(|r| r.welfare_alert)
        .cloned()
        .collect()
    })
  }

  pub fn find_by_id(&self, id: &str) -> Option<Report> {
    self
      .resource
      .with_data(|data| data.reports.iter().find(|r| r.id == id).cloned())
  }

  pub fn loading(&self) -> bool {
    self.resource.loading()
  }

  pub fn error(&self) -> Option<String> {
    self.resource.error()
  }

  /// Ask for a new report on a horse; the listing is refreshed afterwards
  pub async fn request_report(
    &self,
    request: &ReportRequest,
  ) -> Result<ReportRequestReceipt, ApiError> {
    let receipt = self.client.submit_report_request(request).await?;
    info!(horse_id = %request.horse_id, request_id = %receipt.id, "Report requested");
    self.refetch().await;
    Ok(receipt)
  }
}
