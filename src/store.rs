//! Fetch-state container shared by every resource store
//!
//! A `Resource<T>` holds `data`, `loading`, and `error` for one remote
//! resource and applies the outcome of each fetch to them:
//!
//! - a fetch sets `loading` and clears `error` before suspending;
//! - success replaces `data` wholesale, failure records a message and
//!   keeps the previous `data`;
//! - `loading` is cleared once the newest fetch settles.
//!
//! Each fetch takes a ticket from a monotonically increasing counter. A
//! response whose ticket is no longer the newest is dropped, so overlapping
//! refetches cannot overwrite fresher state with a stale response.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, warn};

use crate::api::ApiError;

/// Snapshot of a resource's fetch state
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
  pub data: T,
  pub loading: bool,
  pub error: Option<String>,
}

/// Whether a store fetches on `mount()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
  pub fetch_on_mount: bool,
}

impl Default for StoreOptions {
  fn default() -> Self {
    Self { fetch_on_mount: true }
  }
}

impl StoreOptions {
  pub fn manual() -> Self {
    Self { fetch_on_mount: false }
  }
}

/// How a fetch ended from the store's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
  Updated,
  Failed,
  /// A newer fetch was issued while this one was in flight
  Superseded,
  /// No identifier to fetch for
  Skipped,
}

pub struct Resource<T> {
  /// Human name used in generic error messages ("horses", "reports")
  name: &'static str,
  state: RwLock<ResourceState<T>>,
  latest_ticket: AtomicU64,
  revision: AtomicU64,
}

impl<T: Clone + Default> Resource<T> {
  pub fn new(name: &'static str, loading: bool) -> Self {
    Self {
      name,
      state: RwLock::new(ResourceState {
        data: T::default(),
        loading,
        error: None,
      }),
      latest_ticket: AtomicU64::new(0),
      revision: AtomicU64::new(0),
    }
  }

  pub fn snapshot(&self) -> ResourceState<T> {
    self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
  }

  pub fn data(&self) -> T {
    self.state.read().unwrap_or_else(PoisonError::into_inner).data.clone()
  }

  /// Borrow the current data without cloning it
  pub fn with_data<R>(&self, f: impl FnOnce(&T) -> R) -> R {
    f(&self.state.read().unwrap_or_else(PoisonError::into_inner).data)
  }

  pub fn loading(&self) -> bool {
    self.state.read().unwrap_or_else(PoisonError::into_inner).loading
  }

  pub fn error(&self) -> Option<String> {
    self.state.read().unwrap_or_else(PoisonError::into_inner).error.clone()
  }

  /// Bumped every time `data` is replaced; memoised lookups key on it
  pub fn revision(&self) -> u64 {
    self.revision.load(Ordering::Acquire)
  }

  fn begin(&self) -> u64 {
    let ticket = self.latest_ticket.fetch_add(1, Ordering::AcqRel) + 1;
    let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
    state.loading = true;
    state.error = None;
    ticket
  }

  fn finish(&self, ticket: u64, outcome: Result<T, ApiError>) -> FetchOutcome {
    let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

    if ticket != self.latest_ticket.load(Ordering::Acquire) {
      debug!(resource = self.name, ticket, "Dropping superseded response");
      return FetchOutcome::Superseded;
    }

    state.loading = false;
    match outcome {
      Ok(data) => {
        state.data = data;
        self.revision.fetch_add(1, Ordering::AcqRel);
        FetchOutcome::Updated
      }
      Err(e) => {
        warn!(resource = self.name, error = %e, "Fetch failed");
        state.error = Some(e.user_message(self.name));
        FetchOutcome::Failed
      }
    }
  }

  /// Run one fetch against this resource
  pub async fn load<F>(&self, fetch: F) -> FetchOutcome
  where
    F: Future<Output = Result<T, ApiError>>,
  {
    let ticket = self.begin();
    let outcome = fetch.await;
    self.finish(ticket, outcome)
  }

  /// Patch data in place under a single write lock
  pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
    let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
    let result = f(&mut state.data);
    self.revision.fetch_add(1, Ordering::AcqRel);
    result
  }

  /// Cancel a pending fetch state without fetching, used when a required
  /// identifier goes away
  pub fn settle_idle(&self) {
    self.latest_ticket.fetch_add(1, Ordering::AcqRel);
    self.state.write().unwrap_or_else(PoisonError::into_inner).loading = false;
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use tokio::sync::oneshot;

  fn api_error(message: &str) -> ApiError {
    ApiError::Api {
      status: 401,
      message: message.to_string(),
      errors: None,
    }
  }

  #[test]
  fn test_initial_state() {
    let resource: Resource<Vec<u32>> = Resource::new("numbers", true);
    let state = resource.snapshot();
    assert!(state.loading);
    assert!(state.error.is_none());
    assert!(state.data.is_empty());
    assert_eq!(resource.revision(), 0);

    let idle: Resource<Vec<u32>> = Resource::new("numbers", false);
    assert!(!idle.loading());
  }

  #[tokio::test]
  async fn test_success_replaces_data() {
    let resource: Resource<Vec<u32>> = Resource::new("numbers", true);
    let outcome = resource.load(async { Ok(vec![1, 2, 3]) }).await;

    assert_eq!(outcome, FetchOutcome::Updated);
    assert_eq!(resource.data(), vec![1, 2, 3]);
    assert!(!resource.loading());
    assert_eq!(resource.revision(), 1);
  }

  #[tokio::test]
  async fn test_error_keeps_previous_data() {
    let resource: Resource<Vec<u32>> = Resource::new("numbers", true);
    resource.load(async { Ok(vec![7]) }).await;

    let outcome = resource.load(async { Err(api_error("Unauthorized")) }).await;

    assert_eq!(outcome, FetchOutcome::Failed);
    assert_eq!(resource.error().as_deref(), Some("Unauthorized"));
    assert_eq!(resource.data(), vec![7]);
    assert!(!resource.loading());
    assert_eq!(resource.revision(), 1);
  }

  #[tokio::test]
  async fn test_transport_error_is_generic() {
    let resource: Resource<Vec<u32>> = Resource::new("reports", true);
    resource
      .load(async { Err(ApiError::Transport("connection reset".into())) })
      .await;

    assert_eq!(
      resource.error().as_deref(),
      Some("Failed to load reports. Please try again.")
    );
  }

  #[tokio::test]
  async fn test_new_fetch_clears_error() {
    let resource: Resource<Vec<u32>> = Resource::new("numbers", false);
    resource.load(async { Err(api_error("boom")) }).await;
    assert!(resource.error().is_some());

    resource.load(async { Ok(vec![1]) }).await;
    assert!(resource.error().is_none());
  }

  #[tokio::test]
  async fn test_stale_response_is_dropped() {
    let resource: Resource<Vec<u32>> = Resource::new("numbers", false);
    let (first_tx, first_rx) = oneshot::channel::<Vec<u32>>();
    let (second_tx, second_rx) = oneshot::channel::<Vec<u32>>();

    let first = resource.load(async move {
      first_rx.await.map_err(|e| ApiError::Transport(e.to_string()))
    });
    let second = resource.load(async move {
      second_rx.await.map_err(|e| ApiError::Transport(e.to_string()))
    });

    // Resolve the newer request first, then the older one
    let driver = async {
      tokio::task::yield_now().await;
      second_tx.send(vec![2]).ok();
      tokio::task::yield_now().await;
      first_tx.send(vec![1]).ok();
    };

    let (first_outcome, second_outcome, _) = tokio::join!(first, second, driver);

    assert_eq!(second_outcome, FetchOutcome::Updated);
    assert_eq!(first_outcome, FetchOutcome::Superseded);
    assert_eq!(resource.data(), vec![2]);
    assert!(!resource.loading());
  }

  #[tokio::test]
  async fn test_older_response_while_newer_pending_keeps_loading() {
    let resource: Resource<Vec<u32>> = Resource::new("numbers", false);
    let (first_tx, first_rx) = oneshot::channel::<Vec<u32>>();
    let (second_tx, second_rx) = oneshot::channel::<Vec<u32>>();

    let first = resource.load(async move {
      first_rx.await.map_err(|e| ApiError::Transport(e.to_string()))
    });
    let second = resource.load(async move {
      second_rx.await.map_err(|e| ApiError::Transport(e.to_string()))
    });

    let driver = async {
      tokio::task::yield_now().await;
      first_tx.send(vec![1]).ok();
      tokio::task::yield_now().await;
      tokio::task::yield_now().await;
      // The older response has been dropped; the newer one is still pending
      assert!(resource.loading());
      assert!(resource.data().is_empty());
      second_tx.send(vec![2]).ok();
    };

    let (first_outcome, second_outcome, _) = tokio::join!(first, second, driver);

    assert_eq!(first_outcome, FetchOutcome::Superseded);
    assert_eq!(second_outcome, FetchOutcome::Updated);
    assert_eq!(resource.data(), vec![2]);
  }

  #[tokio::test]
  async fn test_update_patches_latest_data() {
    let resource: Resource<Vec<u32>> = Resource::new("numbers", false);
    resource.load(async { Ok(vec![1, 2]) }).await;
    // A fetch landing before the patch must not be clobbered by it
    resource.load(async { Ok(vec![5, 6, 7]) }).await;

    let len = resource.update(|data| {
      data.push(8);
      data.len()
    });

    assert_eq!(len, 4);
    assert_eq!(resource.data(), vec![5, 6, 7, 8]);
    assert_eq!(resource.revision(), 3);
  }

  #[test]
  fn test_settle_idle_clears_loading() {
    let resource: Resource<Vec<u32>> = Resource::new("numbers", true);
    resource.settle_idle();
    assert!(!resource.loading());
  }
}
