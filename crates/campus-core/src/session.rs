//! The signed-in user, held as an explicit value.
//!
//! Authentication is demo-grade: every account in the dataset accepts the
//! same configured password. There is no hashing and nothing is persisted.

use crate::{Error, Result, entity::User, store::Store};

/// Password accepted for every account unless configured otherwise.
pub const DEFAULT_DEMO_PASSWORD: &str = "password";

/// Who is signed in, if anyone.
#[derive(Debug, Clone)]
pub struct Session {
  demo_password: String,
  user:          Option<User>,
}

impl Default for Session {
  fn default() -> Self { Self::new(DEFAULT_DEMO_PASSWORD) }
}

impl Session {
  /// A signed-out session accepting `demo_password`.
  pub fn new(demo_password: impl Into<String>) -> Self {
    Self {
      demo_password: demo_password.into(),
      user:          None,
    }
  }

  /// Sign in as the user with `email`.
  ///
  /// Fails with [`Error::MissingCredentials`] if either field is blank and
  /// with [`Error::InvalidCredentials`] if the email is unknown or the
  /// password is wrong. A failed attempt leaves the session unchanged.
  pub fn login(
    &mut self,
    store: &Store,
    email: &str,
    password: &str,
  ) -> Result<&User> {
    if email.trim().is_empty() || password.is_empty() {
      return Err(Error::MissingCredentials);
    }

    let Some(user) = store.user_by_email(email) else {
      tracing::warn!(email, "login rejected: unknown email");
      return Err(Error::InvalidCredentials);
    };
    if password != self.demo_password {
      tracing::warn!(email, "login rejected: wrong password");
      return Err(Error::InvalidCredentials);
    }

    tracing::info!(user_id = %user.id, role = %user.role, "signed in");
    Ok(self.user.insert(user.clone()))
  }

  /// Sign out. Signing out while signed out is a no-op.
  pub fn logout(&mut self) {
    if let Some(user) = self.user.take() {
      tracing::info!(user_id = %user.id, "signed out");
    }
  }

  pub fn current(&self) -> Option<&User> { self.user.as_ref() }

  pub fn is_authenticated(&self) -> bool { self.user.is_some() }
}
