use super::http::{self, HttpSettings};
use crate::budgeting::domain::Project;
use crate::ports::outbound::{
    CredentialProvider, IdentityProvider, ProjectDraft, ProjectRepository, ProjectUpdate,
    SignedInUser,
};
use crate::shared::{ApiResult, Result};
use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

const PROJECTS_PATH: &str = "/api/v1/projects";
const ME_PATH: &str = "/api/v1/me";

#[derive(Debug, Deserialize)]
struct MeResponse {
    user: SignedInUser,
}

/// ProjectApiClient adapter for the authenticated project API
///
/// The bearer token is fetched from the [`CredentialProvider`] for every
/// request, so a refreshed session is picked up without rebuilding the client.
pub struct ProjectApiClient {
    client: reqwest::Client,
    settings: HttpSettings,
    credentials: Arc<dyn CredentialProvider>,
}

impl ProjectApiClient {
    pub fn new(settings: HttpSettings, credentials: Arc<dyn CredentialProvider>) -> Result<Self> {
        let client = http::build_client(&settings)?;
        Ok(Self {
            client,
            settings,
            credentials,
        })
    }

    fn collection_url(&self) -> String {
        self.settings.url(PROJECTS_PATH)
    }

    fn project_url(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url(), urlencoding::encode(id))
    }

    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credentials.current_token().await {
            Some(token) => request.bearer_auth(token),
            None => {
                debug!("no credential available, sending request unauthenticated");
                request
            }
        }
    }
}

#[async_trait]
impl ProjectRepository for ProjectApiClient {
    async fn list_projects(&self) -> ApiResult<Vec<Project>> {
        debug!("GET {}", PROJECTS_PATH);
        let request = self.authorize(self.client.get(self.collection_url())).await;
        http::send_json(request).await
    }

    async fn get_project(&self, id: &str) -> ApiResult<Project> {
        debug!(id, "GET project");
        let request = self.authorize(self.client.get(self.project_url(id))).await;
        http::send_json(request).await
    }

    async fn create_project(&self, draft: &ProjectDraft) -> ApiResult<Project> {
        debug!(title = %draft.title, "POST project");
        let request = self
            .authorize(self.client.post(self.collection_url()).json(draft))
            .await;
        http::send_json(request).await
    }

    async fn update_project(&self, id: &str, update: &ProjectUpdate) -> ApiResult<Project> {
        debug!(id, items = update.budget.items.len(), "PUT project");
        let request = self
            .authorize(self.client.put(self.project_url(id)).json(update))
            .await;
        http::send_json(request).await
    }

    async fn delete_project(&self, id: &str) -> ApiResult<()> {
        debug!(id, "DELETE project");
        let request = self.authorize(self.client.delete(self.project_url(id))).await;
        http::send(request).await.map(|_| ())
    }
}

#[async_trait]
impl IdentityProvider for ProjectApiClient {
    async fn current_user(&self) -> ApiResult<SignedInUser> {
        debug!("GET {}", ME_PATH);
        let request = self.authorize(self.client.get(self.settings.url(ME_PATH))).await;
        let response: MeResponse = http::send_json(request).await?;
        Ok(response.user)
    }
}
