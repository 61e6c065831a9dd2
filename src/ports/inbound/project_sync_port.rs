use crate::budgeting::domain::{AnalysisResult, NewBudgetItem, Project};
use crate::ports::outbound::{ImageUpload, ProjectDraft, ProjectPatch};
use crate::shared::AppResult;
use async_trait::async_trait;
use std::fmt;
use uuid::Uuid;

/// Request parameters for a budget analysis
#[derive(Debug, Clone)]
pub struct AnalysisInput {
    /// Photo of the site or plan. `None` for text-only flows.
    pub image: Option<ImageUpload>,
    /// Free-text instruction, e.g. "build a 10m wall"
    pub instruction: String,
}

impl AnalysisInput {
    pub fn new(image: Option<ImageUpload>, instruction: impl Into<String>) -> Self {
        Self {
            image,
            instruction: instruction.into(),
        }
    }
}

/// Operation that produced a surfaced error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOperation {
    LoadProjects,
    RefreshProject,
    CreateProject,
    UpdateProject,
    DeleteProject,
    Analyze,
}

impl fmt::Display for SyncOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SyncOperation::LoadProjects => "load projects",
            SyncOperation::RefreshProject => "refresh project",
            SyncOperation::CreateProject => "create project",
            SyncOperation::UpdateProject => "update project",
            SyncOperation::DeleteProject => "delete project",
            SyncOperation::Analyze => "analyze budget",
        };
        write!(f, "{}", label)
    }
}

/// An error shown to the user until it is dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfacedError {
    pub id: Uuid,
    pub operation: SyncOperation,
    pub message: String,
}

/// Read-only view of the controller state
#[derive(Debug, Clone, Default)]
pub struct SyncSnapshot {
    pub projects: Vec<Project>,
    pub selected: Option<Project>,
    pub analysis: Option<AnalysisResult>,
    pub errors: Vec<SurfacedError>,
    pub loading: bool,
    pub analyzing: bool,
    pub has_fetched: bool,
}

/// ProjectSyncPort - Inbound port for the project synchronization use case
///
/// Host shells emit intents through this port and read state back through
/// [`ProjectSyncPort::snapshot`]; they never mutate the collection directly.
#[async_trait]
pub trait ProjectSyncPort: Send + Sync {
    /// Starts a session: performs the one-per-session project load
    async fn initialize(&self) -> AppResult<()>;

    /// Ends the session: drops all state and discards results still in flight
    fn teardown(&self);

    /// Loads the project collection once per session, retrying connection failures
    async fn load_projects(&self) -> AppResult<()>;

    /// Re-reads one project from the server and replaces the local copy
    async fn refresh_project(&self, id: &str) -> AppResult<Project>;

    /// Creates a project and appends the server copy to the collection
    async fn create_project(&self, draft: ProjectDraft) -> AppResult<Project>;

    /// Lays the patch over the current project and sends the complete
    /// metadata and budget; the returned project replaces the local one
    async fn update_project(&self, id: &str, patch: ProjectPatch) -> AppResult<Project>;

    /// Deletes a project after interactive confirmation
    ///
    /// # Returns
    /// `false` when the user declined and nothing was sent
    async fn delete_project(&self, id: &str) -> AppResult<bool>;

    /// Adds a budget line to a project and persists the recomputed budget
    async fn add_item(&self, project_id: &str, item: NewBudgetItem) -> AppResult<Project>;

    /// Removes a budget line from a project and persists the recomputed budget
    async fn remove_item(&self, project_id: &str, index: usize) -> AppResult<Project>;

    /// Runs a budget analysis and keeps the result in memory
    async fn run_analysis(&self, input: AnalysisInput) -> AppResult<AnalysisResult>;

    /// Discards the current analysis result
    fn clear_analysis(&self);

    /// Marks a loaded project as the open one
    fn select_project(&self, id: &str) -> AppResult<Project>;

    fn clear_selection(&self);

    /// Dismisses one surfaced error; returns whether it existed
    fn dismiss_error(&self, id: Uuid) -> bool;

    fn snapshot(&self) -> SyncSnapshot;
}
