//! Error types for the session layer.

/// Errors that can occur in the session layer.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A bridge presented a token the [`Authenticator`] rejected.
    ///
    /// [`Authenticator`]: crate::Authenticator
    #[error("authentication failed: {0}")]
    AuthFailed(String),
}
