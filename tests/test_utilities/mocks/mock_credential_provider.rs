use arkitecto::prelude::*;
use async_trait::async_trait;

/// Mock CredentialProvider returning a fixed token
pub struct MockCredentialProvider {
    token: Option<String>,
}

impl MockCredentialProvider {
    pub fn signed_in() -> Self {
        Self {
            token: Some("test-session-token".to_string()),
        }
    }

    pub fn signed_out() -> Self {
        Self { token: None }
    }
}

#[async_trait]
impl CredentialProvider for MockCredentialProvider {
    async fn current_token(&self) -> Option<String> {
        self.token.clone()
    }
}
