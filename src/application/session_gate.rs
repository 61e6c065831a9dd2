use crate::ports::outbound::{CredentialProvider, IdentityProvider, SignedInUser};
use crate::shared::error::ArkitectoError;
use crate::shared::AppResult;
use tracing::debug;

/// Whether the host shell may show the project views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Authenticated,
    Unauthenticated,
}

/// SessionGate decides between the sign-in path and the project views.
///
/// Project operations are only reachable behind an authenticated session;
/// the analysis and generation flows stay public.
pub struct SessionGate<'a, P: ?Sized> {
    credentials: &'a P,
}

impl<'a, P: CredentialProvider + ?Sized> SessionGate<'a, P> {
    pub fn new(credentials: &'a P) -> Self {
        Self { credentials }
    }

    pub async fn state(&self) -> SessionState {
        match self.credentials.current_token().await {
            Some(token) if !token.trim().is_empty() => SessionState::Authenticated,
            _ => SessionState::Unauthenticated,
        }
    }

    /// Fails with [`ArkitectoError::NotAuthenticated`] unless signed in
    pub async fn require_session(&self) -> AppResult<()> {
        match self.state().await {
            SessionState::Authenticated => Ok(()),
            SessionState::Unauthenticated => {
                debug!("no credential available, refusing project access");
                Err(ArkitectoError::NotAuthenticated)
            }
        }
    }

    /// Asks the backend who the session belongs to; signed-out sessions never reach it
    pub async fn whoami<I: IdentityProvider + ?Sized>(&self, identity: &I) -> AppResult<SignedInUser> {
        self.require_session().await?;
        let user = identity.current_user().await?;
        debug!(uid = %user.uid, "session identity confirmed");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::ApiError;
    use crate::shared::ApiResult;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedToken(Option<&'static str>);

    #[async_trait]
    impl CredentialProvider for FixedToken {
        async fn current_token(&self) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    #[tokio::test]
    async fn test_token_means_authenticated() {
        let provider = FixedToken(Some("eyJhbGciOi"));
        let gate = SessionGate::new(&provider);
        assert_eq!(gate.state().await, SessionState::Authenticated);
        assert!(gate.require_session().await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_or_blank_token_is_unauthenticated() {
        for token in [None, Some(""), Some("   ")] {
            let provider = FixedToken(token);
            let gate = SessionGate::new(&provider);
            assert_eq!(gate.state().await, SessionState::Unauthenticated);
            let err = gate.require_session().await.unwrap_err();
            assert!(matches!(err, ArkitectoError::NotAuthenticated));
        }
    }

    struct CountingIdentity {
        calls: AtomicUsize,
        answer: ApiResult<SignedInUser>,
    }

    impl CountingIdentity {
        fn answering(answer: ApiResult<SignedInUser>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                answer,
            }
        }
    }

    #[async_trait]
    impl IdentityProvider for CountingIdentity {
        async fn current_user(&self) -> ApiResult<SignedInUser> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.clone()
        }
    }

    #[tokio::test]
    async fn test_whoami_returns_backend_identity() {
        let provider = FixedToken(Some("eyJhbGciOi"));
        let identity = CountingIdentity::answering(Ok(SignedInUser {
            uid: "uid-1".to_string(),
            email: Some("ana@arkitecto.cl".to_string()),
            name: None,
        }));

        let user = SessionGate::new(&provider).whoami(&identity).await.unwrap();

        assert_eq!(user.uid, "uid-1");
        assert_eq!(identity.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_whoami_signed_out_skips_backend() {
        let provider = FixedToken(None);
        let identity = CountingIdentity::answering(Ok(SignedInUser::default()));

        let err = SessionGate::new(&provider).whoami(&identity).await.unwrap_err();

        assert!(matches!(err, ArkitectoError::NotAuthenticated));
        assert_eq!(identity.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_whoami_rejected_token_is_api_error() {
        let provider = FixedToken(Some("expired"));
        let identity = CountingIdentity::answering(Err(ApiError::Application {
            status: 401,
            message: "401 Unauthorized".to_string(),
            detail: Some("Invalid authentication token".to_string()),
        }));

        let err = SessionGate::new(&provider).whoami(&identity).await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid authentication token");
    }
}
