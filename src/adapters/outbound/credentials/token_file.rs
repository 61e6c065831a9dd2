use crate::ports::outbound::CredentialProvider;
use crate::shared::security::{validate_input_file, MAX_TOKEN_FILE_SIZE};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Reads the session token from a file on every call.
///
/// Whatever refreshes the session only has to rewrite the file; running
/// clients pick up the new token on their next request.
#[derive(Debug, Clone)]
pub struct TokenFileCredentialProvider {
    path: PathBuf,
}

impl TokenFileCredentialProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CredentialProvider for TokenFileCredentialProvider {
    async fn current_token(&self) -> Option<String> {
        if let Err(e) = validate_input_file(&self.path, "token file", MAX_TOKEN_FILE_SIZE) {
            debug!(path = %self.path.display(), error = %e, "token file unavailable");
            return None;
        }

        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let token = contents.trim();
                (!token.is_empty()).then(|| token.to_string())
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read token file");
                None
            }
        }
    }
}
