//! Authentication hook for platform bridges.
//!
//! The gateway does not talk to the chat platform; a bridge process does,
//! and it holds the bot access token. When a bridge connects it sends
//! that token in its `Hello` frame and the gateway asks an
//! [`Authenticator`] whether to accept it.

use crate::SessionError;

/// Decides whether a bridge may connect.
///
/// `Send + Sync + 'static` because one authenticator is shared by every
/// link task for the lifetime of the server.
///
/// # Example
///
/// ```rust
/// use parlor_session::{Authenticator, SessionError};
///
/// /// Lets everyone in. Local development only.
/// struct OpenDoor;
///
/// impl Authenticator for OpenDoor {
///     async fn authenticate(&self, _token: &str) -> Result<(), SessionError> {
///         Ok(())
///     }
/// }
/// ```
pub trait Authenticator: Send + Sync + 'static {
    /// Validates a bridge token. The future must be `Send`: it runs
    /// inside a spawned link task.
    ///
    /// # Errors
    /// [`SessionError::AuthFailed`] if the token is not accepted.
    fn authenticate(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<(), SessionError>> + Send;
}

/// Accepts exactly one token, loaded at process start.
#[derive(Clone)]
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticToken").finish_non_exhaustive()
    }
}

impl Authenticator for StaticToken {
    async fn authenticate(&self, token: &str) -> Result<(), SessionError> {
        if token.is_empty() || token != self.token {
            return Err(SessionError::AuthFailed("bad bridge token".into()));
        }
        Ok(())
    }
}
