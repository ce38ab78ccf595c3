//! Authentication session
//!
//! One `Session` is created per application and handed to the `ApiClient`
//! at construction. Writes only happen from explicit login/logout flows.

use std::sync::{PoisonError, RwLock};

use crate::models::User;

#[derive(Debug, Clone, Default)]
struct SessionState {
  token: Option<String>,
  user: Option<User>,
}

#[derive(Debug, Default)]
pub struct Session {
  state: RwLock<SessionState>,
}

impl Session {
  pub fn new() -> Self {
    Self::default()
  }

  /// Session that starts out authenticated with a known token
  pub fn with_token(token: impl Into<String>) -> Self {
    Self {
      state: RwLock::new(SessionState {
        token: Some(token.into()),
        user: None,
      }),
    }
  }

  pub fn token(&self) -> Option<String> {
    self.state.read().unwrap_or_else(PoisonError::into_inner).token.clone()
  }

  pub fn user(&self) -> Option<User> {
    self.state.read().unwrap_or_else(PoisonError::into_inner).user.clone()
  }

  pub fn is_authenticated(&self) -> bool {
    self.state.read().unwrap_or_else(PoisonError::into_inner).token.is_some()
  }

  pub fn set(&self, token: String, user: Option<User>) {
    let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
    state.token = Some(token);
    state.user = user;
  }

  pub fn set_user(&self, user: User) {
    self.state.write().unwrap_or_else(PoisonError::into_inner).user = Some(user);
  }

  pub fn clear(&self) {
    *self.state.write().unwrap_or_else(PoisonError::into_inner) = SessionState::default();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::mock_user;

  #[test]
  fn test_new_session_is_anonymous() {
    let session = Session::new();
    assert!(!session.is_authenticated());
    assert_eq!(session.token(), None);
    assert_eq!(session.user(), None);
  }

  #[test]
  fn test_set_and_clear() {
    let session = Session::new();
    session.set("tok-1".into(), Some(mock_user()));
    assert!(session.is_authenticated());
    assert_eq!(session.token().as_deref(), Some("tok-1"));
    assert_eq!(session.user().map(|u| u.email), Some("trainer@example.com".to_string()));

    session.clear();
    assert!(!session.is_authenticated());
    assert_eq!(session.user(), None);
  }

  #[test]
  fn test_with_token() {
    let session = Session::with_token("abc");
    assert_eq!(session.token().as_deref(), Some("abc"));
  }
}
