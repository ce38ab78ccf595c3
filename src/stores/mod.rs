//! Resource stores: one per dashboard data set
//!
//! Each store wraps a `Resource` and follows the same contract: `mount()`
//! fetches once when `fetch_on_mount` is set and any required identifier is
//! present, `fetch()`/`refetch()` reload on demand, and changing an
//! identifier refetches.

pub mod history;
pub mod horses;
pub mod reports;
pub mod schedules;
pub mod velocity;

use std::sync::Arc;

use crate::api::ApiClient;

pub use history::HorseHistoryStore;
pub use horses::{HorseList, HorseListStore};
pub use reports::{ReportScope, ReportsStore};
pub use schedules::TrackScheduleStore;
pub use velocity::VelocityStore;

/// Where telemetry-style resources come from
#[derive(Clone)]
pub enum DataSource {
  Api(Arc<ApiClient>),
  /// Seeded generators, for development and demos before a live feed exists
  Synthetic,
}

impl DataSource {
  pub fn is_synthetic(&self) -> bool {
    matches!(self, DataSource::Synthetic)
  }
}
