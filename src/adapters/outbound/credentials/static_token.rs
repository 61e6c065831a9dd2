use crate::ports::outbound::CredentialProvider;
use async_trait::async_trait;
use std::sync::{PoisonError, RwLock};

/// In-memory session token that can be replaced while clients hold on to it
#[derive(Debug, Default)]
pub struct StaticCredentialProvider {
    token: RwLock<Option<String>>,
}

impl StaticCredentialProvider {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token.filter(|t| !t.trim().is_empty())),
        }
    }

    /// Replaces the token after a refresh or sign-in
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    pub fn sign_out(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn current_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
