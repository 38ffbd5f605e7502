//! Login session
//!
//! An explicit context object holding the current user, owned by the
//! application controller and passed to whatever needs it. Login and logout
//! are the only transitions; there is no process-wide singleton.

use thiserror::Error;

use crate::models::User;

/// Session lifecycle violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("No user is logged in")]
    NotLoggedIn,

    #[error("A user is already logged in")]
    AlreadyLoggedIn,
}

/// The current login state of one application instance
#[derive(Debug, Default)]
pub struct Session {
    current: Option<User>,
}

impl Session {
    /// Start with nobody logged in
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an authenticated user to the session
    pub fn login(&mut self, user: User) -> Result<(), SessionError> {
        if self.current.is_some() {
            return Err(SessionError::AlreadyLoggedIn);
        }
        tracing::info!(user = user.name(), "user logged in");
        self.current = Some(user);
        Ok(())
    }

    /// End the session
    pub fn logout(&mut self) -> Result<(), SessionError> {
        match self.current.take() {
            Some(user) => {
                tracing::info!(user = user.name(), "user logged out");
                Ok(())
            }
            None => Err(SessionError::NotLoggedIn),
        }
    }

    /// The logged-in user, if any
    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// The logged-in user, or an error for screens that require one
    pub fn require_current(&self) -> Result<&User, SessionError> {
        self.current.as_ref().ok_or(SessionError::NotLoggedIn)
    }
}
