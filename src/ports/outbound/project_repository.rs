use crate::budgeting::domain::{Budget, Location, Project, ProjectMetadata, ProjectStatus};
use crate::shared::ApiResult;
use async_trait::async_trait;
use serde::Serialize;

/// Body of a project creation request (partial project metadata)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub status: ProjectStatus,
}

impl ProjectDraft {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            location: None,
            status: ProjectStatus::Draft,
        }
    }
}

/// Metadata fields to change. Unset fields keep their current value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetadataPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<Location>,
    pub status: Option<ProjectStatus>,
}

impl MetadataPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.status.is_none()
    }
}

/// A requested change to a project: metadata fields, a new budget, or both
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectPatch {
    pub metadata: Option<MetadataPatch>,
    pub budget: Option<Budget>,
}

impl ProjectPatch {
    pub fn metadata(metadata: MetadataPatch) -> Self {
        Self {
            metadata: Some(metadata),
            budget: None,
        }
    }

    pub fn budget(budget: Budget) -> Self {
        Self {
            metadata: None,
            budget: Some(budget),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.budget.is_none()
            && self
                .metadata
                .as_ref()
                .map_or(true, MetadataPatch::is_empty)
    }

    /// Lays the patch over the current project, producing the full update body
    pub fn apply_to(&self, project: &Project) -> ProjectUpdate {
        let mut metadata = project.metadata.clone();
        if let Some(patch) = &self.metadata {
            if let Some(title) = &patch.title {
                metadata.title = title.clone();
            }
            if let Some(description) = &patch.description {
                metadata.description = Some(description.clone());
            }
            if let Some(location) = &patch.location {
                metadata.location = Some(location.clone());
            }
            if let Some(status) = patch.status {
                metadata.status = status;
            }
        }
        ProjectUpdate {
            metadata,
            budget: self.budget.clone().unwrap_or_else(|| project.budget.clone()),
        }
    }
}

/// Body of `PUT /api/v1/projects/{id}`
///
/// The server replaces the stored metadata map wholesale and requires a
/// title, so the complete metadata is always sent along with the budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectUpdate {
    pub metadata: ProjectMetadata,
    pub budget: Budget,
}

/// ProjectRepository port for the authenticated project store
///
/// Implementations attach the current credential to every call. All
/// failures are reported as typed [`crate::shared::error::ApiError`] values
/// so callers can tell connection failures from server answers.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Fetches every project the current user collaborates on
    async fn list_projects(&self) -> ApiResult<Vec<Project>>;

    /// Fetches a single project by id
    async fn get_project(&self, id: &str) -> ApiResult<Project>;

    /// Creates a project and returns it with server-assigned id and timestamps
    async fn create_project(&self, draft: &ProjectDraft) -> ApiResult<Project>;

    /// Replaces a project's metadata and budget and returns the updated project
    async fn update_project(&self, id: &str, update: &ProjectUpdate) -> ApiResult<Project>;

    /// Deletes a project
    async fn delete_project(&self, id: &str) -> ApiResult<()>;
}
