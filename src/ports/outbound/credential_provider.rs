use async_trait::async_trait;

/// CredentialProvider port: the opaque source of the current session token
///
/// The token is read on every authenticated call rather than captured once,
/// so a refreshed token is picked up without rebuilding any client.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns the bearer token of the signed-in user, or `None` when signed out
    async fn current_token(&self) -> Option<String>;
}
