use crate::shared::ApiResult;
use async_trait::async_trait;
use serde::Deserialize;

/// Identity claims of the signed-in user, as decoded by the backend
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SignedInUser {
    #[serde(default, alias = "user_id")]
    pub uid: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl SignedInUser {
    /// Name and email when known, the uid otherwise
    pub fn display_name(&self) -> String {
        match (self.name.as_deref(), self.email.as_deref()) {
            (Some(name), Some(email)) => format!("{} <{}>", name, email),
            (Some(name), None) => name.to_string(),
            (None, Some(email)) => email.to_string(),
            (None, None) => self.uid.clone(),
        }
    }
}

/// IdentityProvider port: asks the backend who the current credential belongs to
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_user(&self) -> ApiResult<SignedInUser>;
}
